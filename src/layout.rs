use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Target platform, resolved once at start-up and injected into layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Android,
    Ios,
    Other,
}

impl Platform {
    /// Platform of the compile target.
    pub fn detect() -> Self {
        if cfg!(target_os = "android") {
            Platform::Android
        } else if cfg!(target_os = "ios") {
            Platform::Ios
        } else {
            Platform::Other
        }
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "android" => Ok(Platform::Android),
            "ios" => Ok(Platform::Ios),
            "other" => Ok(Platform::Other),
            other => Err(format!("unknown platform '{other}'")),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Platform::Android => "android",
            Platform::Ios => "ios",
            Platform::Other => "other",
        };
        f.write_str(name)
    }
}

/// Geometry of the category strip, in layout units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    pub slide_width: f64,
    /// Negative margins overlap neighbouring slides.
    pub slide_margin: f64,
    pub content_margin: f64,
    pub content_padding: f64,
}

impl LayoutConfig {
    pub fn for_platform(platform: Platform) -> Self {
        match platform {
            Platform::Android => Self {
                slide_width: 352.0,
                slide_margin: -125.0,
                content_margin: 0.0,
                content_padding: 129.0,
            },
            Platform::Ios | Platform::Other => Self {
                slide_width: 362.0,
                slide_margin: -125.0,
                content_margin: 129.0,
                content_padding: 0.0,
            },
        }
    }

    /// Horizontal distance between the starts of two consecutive slides.
    pub fn page_stride(&self) -> f64 {
        self.slide_width + 2.0 * self.slide_margin
    }

    /// Viewport showing exactly one slide plus the content padding.
    pub fn single_slide_viewport(&self) -> f64 {
        self.page_stride() + 2.0 * self.content_padding
    }

    /// Scrollable width of a strip holding `slides` slides.
    pub fn content_width(&self, slides: usize) -> f64 {
        slides as f64 * self.page_stride() + 2.0 * self.content_padding
    }
}
