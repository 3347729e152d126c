//! Integration tests against a running product service.
//!
//! Skipped unless `STOREFRONT_SERVICE_URL` points at the service root, e.g.
//!
//! ```bash
//! STOREFRONT_SERVICE_URL=http://127.0.0.1:8001/api cargo test -- --nocapture
//! ```

use storefront_carousel::{CarouselController, Phase, ProductClient, ProductSource, CATEGORIES};

fn service_url() -> Option<String> {
    std::env::var("STOREFRONT_SERVICE_URL").ok()
}

// ---------------------------------------------------------------------------
// 1. Every category answers
// ---------------------------------------------------------------------------

#[test]
fn test_fetch_every_category() {
    let Some(url) = service_url() else {
        println!("[1] Skipping live tests (STOREFRONT_SERVICE_URL not set)");
        return;
    };
    let client = ProductClient::new(&url).unwrap();

    for category in CATEGORIES.iter() {
        match client.fetch_products(&category.service_key()) {
            Ok(products) => {
                println!("[1] {} has {} products", category.display_name, products.len());
                for p in products.iter().take(3) {
                    println!("  - {} ({})", p.name, p.display_price());
                }
            }
            Err(e) => println!("[1] {} failed: {e}", category.display_name),
        }
    }
}

// ---------------------------------------------------------------------------
// 2. Controller against the live service
// ---------------------------------------------------------------------------

#[test]
fn test_controller_round_trip() {
    let Some(url) = service_url() else {
        println!("[2] Skipping live tests (STOREFRONT_SERVICE_URL not set)");
        return;
    };
    let client = ProductClient::new(&url).unwrap();
    let mut carousel = CarouselController::default();

    let selection = carousel.retry();
    assert!(carousel.load_blocking(&selection, &client));
    assert_ne!(carousel.phase(), Phase::Loading);
    assert_eq!(carousel.active_index(), 0);
    println!(
        "[2] {} -> {:?} with {} products",
        carousel.selected_category().display_name,
        carousel.phase(),
        carousel.products().len()
    );
}

// ---------------------------------------------------------------------------
// 3. Unknown category
// ---------------------------------------------------------------------------

#[test]
fn test_unknown_category_fails() {
    let Some(url) = service_url() else {
        println!("[3] Skipping live tests (STOREFRONT_SERVICE_URL not set)");
        return;
    };
    let client = ProductClient::new(&url).unwrap();
    match client.fetch_products("no-such-category") {
        Ok(products) => println!("[3] Service returned {} products", products.len()),
        Err(e) => println!("[3] Unknown category rejected: {e} ({:?})", e.kind),
    }
}
