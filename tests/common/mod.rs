#![allow(dead_code)]

use std::collections::HashMap;

use chrono::{TimeZone, Utc};
use storefront_carousel::{FetchError, Product, ProductSource};

pub fn product(id: u64, category_id: u64) -> Product {
    let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    Product {
        id,
        name: format!("product-{id}"),
        price: 12.5,
        image_url: format!("https://cdn.example.com/{id}.jpg"),
        available: id % 2 == 0,
        category_id,
        created_at: at,
        updated_at: at,
        description: None,
    }
}

pub fn products(n: u64, category_id: u64) -> Vec<Product> {
    (1..=n).map(|id| product(id, category_id)).collect()
}

/// In-memory product service keyed by service key.
#[derive(Default)]
pub struct FakeService {
    responses: HashMap<String, Result<Vec<Product>, FetchError>>,
}

impl FakeService {
    pub fn with(mut self, key: &str, response: Result<Vec<Product>, FetchError>) -> Self {
        self.responses.insert(key.to_string(), response);
        self
    }
}

impl ProductSource for FakeService {
    fn fetch_products(&self, category: &str) -> Result<Vec<Product>, FetchError> {
        self.responses
            .get(category)
            .cloned()
            .unwrap_or_else(|| Err(FetchError::not_found(format!("no category {category}"))))
    }
}
