use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::Url;
use tracing::debug;

use crate::error::{FetchError, Result};
use crate::models::Product;

/// Anything that can produce the product list of a category.
///
/// Implemented by [`ProductClient`] for the real service; the controller and
/// the rendering loop only depend on this trait.
pub trait ProductSource: Send + Sync {
    /// Fetch every product of `category`, in service order.
    ///
    /// `category` is the service key (lower-cased id) but is not trusted:
    /// unknown names are sent as-is and surface as `NotFound`/`Transport`.
    fn fetch_products(&self, category: &str) -> Result<Vec<Product>>;
}

// ---------------------------------------------------------------------------
// Internal response handling
// ---------------------------------------------------------------------------

/// Shared logic for building a configured [`Client`] and making requests.
struct BaseClient {
    base_url: Url,
    http: Client,
}

impl BaseClient {
    fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/json"),
        );

        let http = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .no_proxy()
            .build()?;

        let trimmed = base_url.trim_end_matches('/');
        let base_url = Url::parse(trimmed).map_err(|e| {
            FetchError::transport(None, format!("Invalid base URL {trimmed:?}: {e}"))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(FetchError::transport(
                None,
                format!("Base URL {trimmed:?} cannot carry a path"),
            ));
        }

        Ok(Self { base_url, http })
    }

    /// Build the full URL for `segments`, each percent-encoded.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn get(&self, segments: &[&str]) -> Result<(u16, String)> {
        let url = self.url(segments);
        debug!(%url, "GET");
        let resp = self.http.get(url).send()?;
        read_response(resp)
    }
}

fn read_response(response: Response) -> Result<(u16, String)> {
    let status = response.status().as_u16();
    let body = response.text()?;
    Ok((status, body))
}

/// Map a raw service answer to a product list or a classified error.
pub fn decode_products(status: u16, body: &str) -> Result<Vec<Product>> {
    if (200..300).contains(&status) {
        return serde_json::from_str(body)
            .map_err(|e| FetchError::parse(format!("Invalid product list: {e}")));
    }

    let msg = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_default();

    match status {
        404 => Err(FetchError::not_found(if msg.is_empty() {
            "Not found".to_string()
        } else {
            msg
        })),
        _ => Err(FetchError::transport(
            Some(status),
            if msg.is_empty() {
                format!("HTTP {status}")
            } else {
                msg
            },
        )),
    }
}

// ---------------------------------------------------------------------------
// Public client
// ---------------------------------------------------------------------------

/// HTTP client for the product service.
///
/// ```no_run
/// use storefront_carousel::{ProductClient, ProductSource};
///
/// let client = ProductClient::new("http://127.0.0.1:8001/api").unwrap();
/// for p in client.fetch_products("cafe").unwrap() {
///     println!("{}: {}", p.name, p.display_price());
/// }
/// ```
pub struct ProductClient {
    base: BaseClient,
}

impl ProductClient {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Create a client rooted at `base_url`, e.g. `http://127.0.0.1:8001/api`.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, Self::DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            base: BaseClient::new(base_url, timeout)?,
        })
    }

    /// URL that a fetch of `category` would hit.
    pub fn category_url(&self, category: &str) -> Url {
        self.base.url(&["categorias", category])
    }
}

impl ProductSource for ProductClient {
    fn fetch_products(&self, category: &str) -> Result<Vec<Product>> {
        let (status, body) = self.base.get(&["categorias", category])?;
        decode_products(status, &body)
    }
}
