use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::primitives::datetime_to_unix_millis;
use crate::core::scale::PixelRange;
use crate::error::{ChartError, ChartResult};

/// Inner spacing between the viewport edge and the plot area, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Padding {
    #[must_use]
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    #[must_use]
    pub const fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }
}

impl Default for Padding {
    fn default() -> Self {
        Self::uniform(0.0)
    }
}

/// Pixel rectangle a chart draws into, padding included.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub padding: Padding,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            padding: Padding::default(),
        }
    }

    #[must_use]
    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    /// `true` when the usable drawing area is strictly positive on both axes.
    #[must_use]
    pub fn is_valid(self) -> bool {
        self.plot_area().is_ok()
    }

    /// Usable drawing rectangle after padding is removed.
    pub fn plot_area(self) -> ChartResult<PlotArea> {
        let Padding {
            top,
            right,
            bottom,
            left,
        } = self.padding;
        let paddings_finite = [top, right, bottom, left]
            .iter()
            .all(|value| value.is_finite() && *value >= 0.0);
        let width = f64::from(self.width) - left - right;
        let height = f64::from(self.height) - top - bottom;

        if !paddings_finite || width <= 0.0 || height <= 0.0 {
            return Err(ChartError::InvalidViewport {
                width: self.width,
                height: self.height,
            });
        }

        Ok(PlotArea {
            left,
            top,
            width,
            height,
        })
    }
}

/// Usable drawing rectangle in viewport pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    #[must_use]
    pub fn right(self) -> f64 {
        self.left + self.width
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.top + self.height
    }

    #[must_use]
    pub fn center(self) -> PixelPoint {
        PixelPoint::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// Horizontal pixel range, left to right.
    #[must_use]
    pub fn x_range(self) -> PixelRange {
        PixelRange::new(self.left, self.right())
    }

    /// Vertical pixel range, bottom to top: larger domain values land higher.
    #[must_use]
    pub fn y_range(self) -> PixelRange {
        PixelRange::new(self.bottom(), self.top)
    }
}

/// Domain-space sample: `x` is a timestamp (unix millis) or ordinal index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub x: f64,
    pub y: f64,
}

impl DataPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn at_time(time: DateTime<Utc>, y: f64) -> Self {
        Self {
            x: datetime_to_unix_millis(time),
            y,
        }
    }
}

/// Point already mapped into pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}
