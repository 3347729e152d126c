//! Static category table and the looping category strip.

use tracing::debug;

use crate::layout::LayoutConfig;
use crate::models::Category;
use crate::scroll::{self, ScrollCommand, ScrollReport};

pub static CATEGORIES: [Category; 6] = [
    Category {
        id: "Cafe",
        display_name: "Cafes",
        icon_ref: "icono_cafe.png",
    },
    Category {
        id: "Donas",
        display_name: "Donas",
        icon_ref: "icono_dona.png",
    },
    Category {
        id: "Galletas",
        display_name: "Galletas",
        icon_ref: "icono_galletas.png",
    },
    Category {
        id: "Hamburguesas",
        display_name: "Hamburguesas",
        icon_ref: "icono_hamburguesa.png",
    },
    Category {
        id: "Pasteles",
        display_name: "Pastel",
        icon_ref: "icono_pastel.png",
    },
    Category {
        id: "Pizzas",
        display_name: "Pizzas",
        icon_ref: "icono_pizza.png",
    },
];

/// Category shown before the user picks one.
pub fn default_category() -> &'static Category {
    &CATEGORIES[0]
}

/// Look up a category by id. Ids are matched exactly.
pub fn find(id: &str) -> Option<&'static Category> {
    CATEGORIES.iter().find(|c| c.id == id)
}

/// The horizontally looping strip of category slides.
///
/// Holds its own scroll offset; the rendering surface reports drag-end
/// positions and applies the returned commands.
#[derive(Debug, Clone)]
pub struct CategorySelector {
    layout: LayoutConfig,
    offset: f64,
}

impl CategorySelector {
    pub fn new(layout: LayoutConfig) -> Self {
        Self {
            layout,
            offset: 0.0,
        }
    }

    pub fn categories(&self) -> &'static [Category] {
        &CATEGORIES
    }

    /// Slides in render order, first category repeated at the end.
    pub fn strip(&self) -> Vec<&'static Category> {
        scroll::with_sentinel(&CATEGORIES)
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Build the report the surface would send for `offset_x` with the
    /// given viewport width.
    pub fn report_at(&self, offset_x: f64, viewport_width: f64) -> ScrollReport {
        ScrollReport::new(
            offset_x,
            self.layout.content_width(CATEGORIES.len() + 1),
            viewport_width,
        )
    }

    /// Category under the current offset. The sentinel slide maps to the
    /// first category, which it clones.
    pub fn visible(&self) -> &'static Category {
        let strip = self.strip();
        let raw = scroll::page_index(self.offset, self.layout.page_stride()).unwrap_or(0);
        strip[scroll::clamp_index(raw, strip.len())]
    }

    /// Drag ended at `report.offset_x`. Wraps with an animated jump.
    pub fn on_scroll_end_drag(&mut self, report: ScrollReport) -> Option<ScrollCommand> {
        let command = scroll::wrap_command(
            &report,
            CATEGORIES.len(),
            self.layout.page_stride(),
            true,
        );
        self.offset = match command {
            Some(cmd) => {
                debug!(from = report.offset_x, to = cmd.offset, "category strip wrapped");
                cmd.offset
            }
            None if report.offset_x.is_finite() => report.offset_x,
            None => self.offset,
        };
        command
    }

    /// Content was (re)measured; start over from the first slide.
    pub fn on_content_size_change(&mut self) -> ScrollCommand {
        self.offset = 0.0;
        ScrollCommand::to_start(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Platform;

    fn selector() -> CategorySelector {
        CategorySelector::new(LayoutConfig::for_platform(Platform::Ios))
    }

    #[test]
    fn table_is_fixed_and_default_is_cafe() {
        assert_eq!(CATEGORIES.len(), 6);
        assert_eq!(default_category().id, "Cafe");
        assert_eq!(find("Pasteles").map(|c| c.display_name), Some("Pastel"));
        assert_eq!(find("pasteles"), None);
    }

    #[test]
    fn strip_ends_with_first_category() {
        let strip = selector().strip();
        assert_eq!(strip.len(), 7);
        assert_eq!(strip[6].id, "Cafe");
    }

    #[test]
    fn drag_past_end_wraps_to_start() {
        let mut sel = selector();
        let stride = sel.layout().page_stride();
        let report = sel.report_at(6.0 * stride, stride);
        assert_eq!(
            sel.on_scroll_end_drag(report),
            Some(ScrollCommand::to_start(true))
        );
        assert_eq!(sel.offset(), 0.0);
        assert_eq!(sel.visible().id, "Cafe");
    }

    #[test]
    fn drag_before_start_jumps_to_last_category() {
        let mut sel = selector();
        let stride = sel.layout().page_stride();
        let cmd = sel.on_scroll_end_drag(sel.report_at(-10.0, stride));
        assert_eq!(cmd.map(|c| c.offset), Some(5.0 * stride));
        assert_eq!(sel.visible().id, "Pizzas");
    }

    #[test]
    fn plain_drag_moves_visible_category() {
        let mut sel = selector();
        let stride = sel.layout().page_stride();
        assert_eq!(sel.on_scroll_end_drag(sel.report_at(2.0 * stride, stride)), None);
        assert_eq!(sel.visible().id, "Galletas");
        sel.on_content_size_change();
        assert_eq!(sel.visible().id, "Cafe");
    }
}
