//! Storefront product carousel.
//!
//! A headless controller for a category-driven, circularly scrolling product
//! carousel, the HTTP client for its product service, and a terminal
//! rendering surface that drives both.
//!
//! # Quick Start
//!
//! ```no_run
//! use storefront_carousel::{catalog, CarouselController, ProductClient};
//!
//! let client = ProductClient::new("http://127.0.0.1:8001/api").unwrap();
//! let mut carousel = CarouselController::default();
//!
//! let selection = carousel.select_category(catalog::find("Donas").unwrap());
//! carousel.load_blocking(&selection, &client);
//!
//! let view = carousel.view();
//! for p in view.products {
//!     println!("{} {}", p.name, p.display_price());
//! }
//! ```

pub mod animation;
pub mod catalog;
pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod layout;
pub mod models;
pub mod scroll;
pub mod tui;

// Re-export the main public types at the crate root for convenience.
pub use animation::Ticker;
pub use catalog::{CategorySelector, CATEGORIES};
pub use client::{decode_products, ProductClient, ProductSource};
pub use config::{load_settings, Settings};
pub use controller::{
    CarouselController, CarouselView, FetchCompletion, FetchRequest, Phase, RequestToken,
    Selection,
};
pub use error::{ConfigError, FetchError, FetchErrorKind, Result};
pub use layout::{LayoutConfig, Platform};
pub use models::{Category, Product};
pub use scroll::{ScrollCommand, ScrollReport};
