//! Product carousel controller.
//!
//! The controller owns the only mutable carousel state. Every inbound
//! event (category selection, fetch completion, scroll report) is applied
//! synchronously. Fetching itself happens elsewhere: a selection hands out a
//! [`FetchRequest`] tagged with a [`RequestToken`], and the result comes back
//! as a [`FetchCompletion`]. Completions carrying anything but the latest
//! token are dropped, so a slow earlier fetch can never overwrite a later one.

use tracing::{debug, info, warn};

use crate::catalog;
use crate::client::ProductSource;
use crate::error::FetchError;
use crate::models::{Category, Product};
use crate::scroll::{self, ScrollCommand, ScrollReport};

/// Monotonically increasing id of a fetch attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Lifecycle of the carousel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Ready,
    Failed,
}

/// A fetch the surface must run and report back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub token: RequestToken,
    pub category: &'static Category,
}

impl FetchRequest {
    /// Run the fetch synchronously against `source`.
    pub fn run(&self, source: &dyn ProductSource) -> FetchCompletion {
        FetchCompletion {
            token: self.token,
            result: source.fetch_products(&self.category.service_key()),
        }
    }
}

/// Outcome of a [`FetchRequest`].
#[derive(Debug, Clone)]
pub struct FetchCompletion {
    pub token: RequestToken,
    pub result: Result<Vec<Product>, FetchError>,
}

/// What a category selection produces: the fetch to start and the scroll
/// reset to apply before new content arrives.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub request: FetchRequest,
    pub scroll: ScrollCommand,
}

/// State owned by the controller.
#[derive(Debug, Clone)]
pub(crate) struct CarouselState {
    pub(crate) selected_category: &'static Category,
    pub(crate) products: Vec<Product>,
    pub(crate) active_index: usize,
    pub(crate) phase: Phase,
    pub(crate) error: Option<FetchError>,
    pub(crate) scroll_offset: f64,
    pub(crate) page_width: Option<f64>,
}

impl CarouselState {
    fn new(category: &'static Category) -> Self {
        Self {
            selected_category: category,
            products: Vec::new(),
            active_index: 0,
            phase: Phase::Idle,
            error: None,
            scroll_offset: 0.0,
            page_width: None,
        }
    }
}

/// Read-only view handed to the rendering surface.
#[derive(Debug, Clone, Copy)]
pub struct CarouselView<'a> {
    pub category: &'static Category,
    pub products: &'a [Product],
    pub active_index: usize,
    pub loading: bool,
    pub error: Option<&'a FetchError>,
    pub phase: Phase,
    pub scroll_offset: f64,
}

impl<'a> CarouselView<'a> {
    /// Products in render order, sentinel clone last.
    pub fn renderable(&self) -> Vec<&'a Product> {
        scroll::with_sentinel(self.products)
    }

    pub fn active_product(&self) -> Option<&'a Product> {
        self.products.get(self.active_index)
    }

    pub fn dots(&self) -> Vec<bool> {
        scroll::indicator_dots(self.products.len(), self.active_index)
    }
}

pub struct CarouselController {
    state: CarouselState,
    latest: RequestToken,
}

impl Default for CarouselController {
    fn default() -> Self {
        Self::new(catalog::default_category())
    }
}

impl CarouselController {
    /// Create an idle controller with `initial` pre-selected. Nothing is
    /// fetched until [`Self::select_category`] or [`Self::retry`].
    pub fn new(initial: &'static Category) -> Self {
        Self {
            state: CarouselState::new(initial),
            latest: RequestToken(0),
        }
    }

    pub fn view(&self) -> CarouselView<'_> {
        CarouselView {
            category: self.state.selected_category,
            products: &self.state.products,
            active_index: self.state.active_index,
            loading: self.state.phase == Phase::Loading,
            error: self.state.error.as_ref(),
            phase: self.state.phase,
            scroll_offset: self.state.scroll_offset,
        }
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn active_index(&self) -> usize {
        self.state.active_index
    }

    pub fn products(&self) -> &[Product] {
        &self.state.products
    }

    pub fn selected_category(&self) -> &'static Category {
        self.state.selected_category
    }

    pub fn error(&self) -> Option<&FetchError> {
        self.state.error.as_ref()
    }

    pub fn latest_token(&self) -> RequestToken {
        self.latest
    }

    // -- inbound events --------------------------------------------------------

    /// Select `category` and start over. Any fetch still in flight is
    /// superseded; its completion will be dropped.
    pub fn select_category(&mut self, category: &'static Category) -> Selection {
        info!(category = category.id, "category selected");
        self.state.selected_category = category;
        self.begin_fetch()
    }

    /// Selection by id, as emitted by the category strip. Unknown ids are
    /// ignored.
    pub fn on_category_selected(&mut self, category_id: &str) -> Option<Selection> {
        match catalog::find(category_id) {
            Some(category) => Some(self.select_category(category)),
            None => {
                warn!(category = category_id, "ignoring selection of unknown category");
                None
            }
        }
    }

    /// Fetch the selected category again with a fresh token.
    pub fn retry(&mut self) -> Selection {
        debug!(category = self.state.selected_category.id, "retrying fetch");
        self.begin_fetch()
    }

    fn begin_fetch(&mut self) -> Selection {
        self.latest = RequestToken(self.latest.0 + 1);
        self.state.products.clear();
        self.state.active_index = 0;
        self.state.scroll_offset = 0.0;
        self.state.error = None;
        self.state.phase = Phase::Loading;

        let request = FetchRequest {
            token: self.latest,
            category: self.state.selected_category,
        };
        debug!(
            token = request.token.0,
            category = request.category.id,
            "fetch issued"
        );
        Selection {
            request,
            scroll: ScrollCommand::to_start(false),
        }
    }

    /// Apply a fetch outcome. Returns `true` when it changed the state.
    pub fn complete(&mut self, completion: FetchCompletion) -> bool {
        if completion.token != self.latest {
            debug!(
                token = completion.token.0,
                latest = self.latest.0,
                "dropping superseded fetch result"
            );
            return false;
        }
        if self.state.phase != Phase::Loading {
            debug!(token = completion.token.0, "dropping duplicate fetch result");
            return false;
        }

        match completion.result {
            Ok(products) => {
                info!(
                    category = self.state.selected_category.id,
                    count = products.len(),
                    "products loaded"
                );
                self.state.products = products;
                self.state.error = None;
                self.state.phase = Phase::Ready;
            }
            Err(err) => {
                warn!(
                    category = self.state.selected_category.id,
                    error = %err,
                    "product fetch failed"
                );
                self.state.products.clear();
                self.state.error = Some(err);
                self.state.phase = Phase::Failed;
            }
        }
        self.state.active_index = 0;
        self.state.scroll_offset = 0.0;
        true
    }

    /// The surface settled on page `index`.
    pub fn advance_to_index(&mut self, index: i64) {
        self.state.active_index = scroll::clamp_index(index, self.state.products.len());
    }

    /// Apply a scroll observation; returns the scroll the surface must
    /// perform to keep the loop going, if any.
    ///
    /// Does nothing until the viewport has a measured width.
    pub fn on_scroll_position_report(&mut self, report: ScrollReport) -> Option<ScrollCommand> {
        let page_width = report.viewport_width;
        let raw = scroll::page_index(report.offset_x, page_width)?;
        self.state.page_width = Some(page_width);
        self.advance_to_index(raw);

        let len = self.state.products.len();
        let command = scroll::wrap_command(&report, len, page_width, false);
        match command {
            Some(cmd) => {
                debug!(from = report.offset_x, to = cmd.offset, "carousel wrapped");
                if report.offset_x < 0.0 {
                    self.state.active_index = len.saturating_sub(1);
                }
                self.state.scroll_offset = cmd.offset;
            }
            None => self.state.scroll_offset = report.offset_x,
        }
        command
    }

    /// Move one page forward, onto the sentinel after the last product.
    /// `None` while nothing is shown or layout is unmeasured.
    pub fn next_page(&self, animated: bool) -> Option<ScrollCommand> {
        let page_width = self.state.page_width?;
        if self.state.products.is_empty() {
            return None;
        }
        Some(ScrollCommand::to_page(
            self.state.active_index + 1,
            page_width,
            animated,
        ))
    }

    /// Move one page back; before the first product the loop continues at
    /// the last one.
    pub fn previous_page(&self, animated: bool) -> Option<ScrollCommand> {
        let page_width = self.state.page_width?;
        let len = self.state.products.len();
        if len == 0 {
            return None;
        }
        let page = match self.state.active_index {
            0 => len - 1,
            i => i - 1,
        };
        Some(ScrollCommand::to_page(page, page_width, animated))
    }

    /// Run `selection`'s fetch inline and apply it. Convenience for callers
    /// without a worker thread.
    pub fn load_blocking(&mut self, selection: &Selection, source: &dyn ProductSource) -> bool {
        let completion = selection.request.run(source);
        self.complete(completion)
    }
}
