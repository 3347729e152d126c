//! Circular-scroll math shared by the product carousel and the category strip.
//!
//! A looping strip renders its real items followed by a clone of the first
//! item. When the viewport reaches the clone, the owner jumps back to offset 0;
//! when the user drags backward past the start, it jumps to the last real page.
//! Indices never wrap arithmetically, only scroll offsets do.

/// One scroll observation reported by the rendering surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollReport {
    pub offset_x: f64,
    pub content_width: f64,
    pub viewport_width: f64,
}

impl ScrollReport {
    pub fn new(offset_x: f64, content_width: f64, viewport_width: f64) -> Self {
        Self {
            offset_x,
            content_width,
            viewport_width,
        }
    }

    /// Report for a paged strip of `logical_len` items plus the sentinel page,
    /// each page one viewport wide.
    pub fn paged(offset_x: f64, logical_len: usize, page_width: f64) -> Self {
        let pages = if logical_len == 0 { 0 } else { logical_len + 1 };
        Self::new(offset_x, pages as f64 * page_width, page_width)
    }

    /// Largest offset at which the viewport still shows content.
    pub fn effective_end(&self) -> f64 {
        self.content_width - self.viewport_width
    }
}

/// Instruction for the rendering surface to move its scroll position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollCommand {
    pub offset: f64,
    pub animated: bool,
}

impl ScrollCommand {
    pub fn to_start(animated: bool) -> Self {
        Self {
            offset: 0.0,
            animated,
        }
    }

    pub fn to_page(page: usize, page_width: f64, animated: bool) -> Self {
        Self {
            offset: page as f64 * page_width,
            animated,
        }
    }
}

/// `true` once layout has produced a usable width.
pub fn is_measured(width: f64) -> bool {
    width.is_finite() && width > 0.0
}

/// The renderable sequence: every item, then the first one again.
pub fn with_sentinel<T>(items: &[T]) -> Vec<&T> {
    let mut looped: Vec<&T> = items.iter().collect();
    if let Some(first) = items.first() {
        looped.push(first);
    }
    looped
}

/// Relative tolerance under which an offset counts as sitting on a page
/// boundary. `page * width / width` is not always `page` in floating point.
const BOUNDARY_EPSILON: f64 = 1e-9;

/// `offset_x` in pages, snapped to a whole page when within rounding error.
fn pages_at(offset_x: f64, page_width: f64) -> f64 {
    let pages = offset_x / page_width;
    let nearest = pages.round();
    if (pages - nearest).abs() <= BOUNDARY_EPSILON * nearest.abs().max(1.0) {
        nearest
    } else {
        pages
    }
}

/// Raw page index under `offset_x`, or `None` before layout is measured.
pub fn page_index(offset_x: f64, page_width: f64) -> Option<i64> {
    if !is_measured(page_width) || !offset_x.is_finite() {
        return None;
    }
    Some(pages_at(offset_x, page_width).floor() as i64)
}

/// Clamp a raw index into `[0, len)`; `0` for an empty sequence.
pub fn clamp_index(raw: i64, len: usize) -> usize {
    if len == 0 || raw <= 0 {
        return 0;
    }
    (raw as usize).min(len - 1)
}

/// Decide whether an observed position must be wrapped around.
///
/// Offset exactly `0` never triggers a wrap, so a reset is stable until the
/// user scrolls again.
pub fn wrap_command(
    report: &ScrollReport,
    logical_len: usize,
    page_width: f64,
    animated: bool,
) -> Option<ScrollCommand> {
    if logical_len == 0 || !is_measured(page_width) || !report.offset_x.is_finite() {
        return None;
    }
    let end = report.effective_end();
    let slack = BOUNDARY_EPSILON * end.abs().max(page_width);
    if end > 0.0 && report.offset_x >= end - slack {
        Some(ScrollCommand::to_start(animated))
    } else if report.offset_x < -slack {
        Some(ScrollCommand::to_page(logical_len - 1, page_width, animated))
    } else {
        None
    }
}

/// One flag per real item; the sentinel gets no dot of its own.
pub fn indicator_dots(len: usize, active_index: usize) -> Vec<bool> {
    (0..len).map(|i| i == active_index).collect()
}
