use std::sync::Arc;
use std::thread;
use std::time::Instant;

use crossbeam_channel::{unbounded, Receiver, Sender};
use tracing::debug;

use crate::animation::Ticker;
use crate::catalog::CategorySelector;
use crate::client::ProductSource;
use crate::config::Settings;
use crate::controller::{CarouselController, FetchCompletion, Phase, Selection};
use crate::layout::LayoutConfig;
use crate::scroll::{ScrollCommand, ScrollReport};

/// Main application state.
///
/// Plays the part of the scroll view: it reports every carousel scroll to the
/// controller and applies the commands it gets back.
pub struct AppState {
    /// Carousel core.
    pub(crate) controller: CarouselController,
    /// Category strip.
    pub(crate) selector: CategorySelector,
    /// Where fetches go.
    pub(crate) source: Arc<dyn ProductSource>,
    pub(crate) completions_tx: Sender<FetchCompletion>,
    pub(crate) completions_rx: Receiver<FetchCompletion>,
    /// Carousel auto-advance timer.
    pub(crate) auto_advance: Ticker,
    /// Width of one carousel page, in terminal columns.
    pub(crate) page_width: f64,
    /// Shown in the status bar.
    pub(crate) service_url: String,
    /// Should the application quit?
    pub should_quit: bool,
}

impl AppState {
    pub fn new(source: Arc<dyn ProductSource>, settings: &Settings) -> Self {
        let (completions_tx, completions_rx) = unbounded();
        Self {
            controller: CarouselController::default(),
            selector: CategorySelector::new(LayoutConfig::for_platform(settings.platform())),
            source,
            completions_tx,
            completions_rx,
            auto_advance: Ticker::new(settings.auto_advance()),
            page_width: 0.0,
            service_url: settings.service_url.clone(),
            should_quit: false,
        }
    }

    /// Load the default category, as on first mount.
    pub fn start(&mut self) {
        self.selector.on_content_size_change();
        let selection = self.controller.retry();
        self.begin(selection);
    }

    /// Start the fetch of `selection` on a worker thread.
    pub(crate) fn begin(&mut self, selection: Selection) {
        self.auto_advance.stop();

        let source = Arc::clone(&self.source);
        let tx = self.completions_tx.clone();
        let request = selection.request;
        thread::spawn(move || {
            let completion = request.run(source.as_ref());
            // Receiver is gone only when the app is shutting down.
            let _ = tx.send(completion);
        });
    }

    pub(crate) fn select_category(&mut self, id: &str) {
        if let Some(selection) = self.controller.on_category_selected(id) {
            self.begin(selection);
        }
    }

    pub(crate) fn retry(&mut self) {
        let selection = self.controller.retry();
        self.begin(selection);
    }

    /// Record the measured carousel width; keeps the current page in view.
    pub fn on_layout(&mut self, width: u16) {
        let width = f64::from(width);
        if width == self.page_width {
            return;
        }
        let page = self.controller.active_index();
        self.page_width = width;
        self.scroll_to(ScrollCommand::to_page(page, width, false));
    }

    /// Move the carousel and let the controller react, following wrap
    /// commands until the position settles.
    pub(crate) fn scroll_to(&mut self, command: ScrollCommand) {
        let mut next = Some(command);
        for _ in 0..4 {
            let Some(cmd) = next.take() else { break };
            let report = ScrollReport::paged(
                cmd.offset,
                self.controller.products().len(),
                self.page_width,
            );
            next = self.controller.on_scroll_position_report(report);
        }
    }

    pub(crate) fn next_page(&mut self) {
        if let Some(cmd) = self.controller.next_page(true) {
            self.scroll_to(cmd);
        }
    }

    pub(crate) fn previous_page(&mut self) {
        if let Some(cmd) = self.controller.previous_page(true) {
            self.scroll_to(cmd);
        }
    }

    /// Scroll the category strip by `pages` slides, as a finished drag.
    pub(crate) fn drag_strip(&mut self, pages: f64) {
        let layout = *self.selector.layout();
        let report = self.selector.report_at(
            self.selector.offset() + pages * layout.page_stride(),
            layout.single_slide_viewport(),
        );
        self.selector.on_scroll_end_drag(report);
    }

    /// Apply finished fetches, in arrival order.
    pub(crate) fn drain_completions(&mut self, now: Instant) {
        while let Ok(completion) = self.completions_rx.try_recv() {
            let token = completion.token;
            if !self.controller.complete(completion) {
                continue;
            }
            debug!(token = token.value(), "fetch applied");
            if self.controller.phase() == Phase::Ready {
                self.auto_advance.start(now);
            }
        }
    }
}
