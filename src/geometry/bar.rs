use serde::{Deserialize, Serialize};

use crate::core::PlotArea;
use crate::error::{ChartError, ChartResult};

/// Bottom-anchored bar rectangle in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarGeometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BarGeometry {
    #[must_use]
    pub fn center_x(self) -> f64 {
        self.x + self.width / 2.0
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.y + self.height
    }
}

/// Slot layout shared by every bar of one chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarLayout {
    pub origin_x: f64,
    pub baseline_y: f64,
    pub max_height: f64,
    pub bar_width: f64,
    pub spacing: f64,
}

impl BarLayout {
    /// Splits the plot width into `slots` equal bars separated by `spacing`.
    pub fn fit(plot: PlotArea, slots: usize, spacing: f64) -> ChartResult<Self> {
        if slots == 0 {
            return Err(ChartError::InvalidData(
                "bar layout needs at least one slot".to_owned(),
            ));
        }
        if !spacing.is_finite() || spacing < 0.0 {
            return Err(ChartError::InvalidData(
                "bar spacing must be finite and >= 0".to_owned(),
            ));
        }

        let bar_width = plot.width / slots as f64 - spacing;
        if bar_width <= 0.0 {
            return Err(ChartError::InvalidData(format!(
                "{slots} bars with spacing {spacing} do not fit in {} px",
                plot.width
            )));
        }

        Ok(Self {
            origin_x: plot.left,
            baseline_y: plot.bottom(),
            max_height: plot.height,
            bar_width,
            spacing,
        })
    }

    /// Bar for `value` in `slot`, its height proportional to `value / max_value`.
    ///
    /// Negative values collapse to a zero-height bar on the baseline.
    pub fn bar(self, value: f64, max_value: f64, slot: usize) -> ChartResult<BarGeometry> {
        if !value.is_finite() || !max_value.is_finite() || max_value <= 0.0 {
            return Err(ChartError::InvalidData(format!(
                "bar value {value} / max {max_value} must be finite with max > 0"
            )));
        }

        let height = (value / max_value).max(0.0) * self.max_height;
        let x = self.origin_x + slot as f64 * (self.bar_width + self.spacing);
        Ok(BarGeometry {
            x,
            y: self.baseline_y - height,
            width: self.bar_width,
            height,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn plot() -> PlotArea {
        PlotArea {
            left: 50.0,
            top: 20.0,
            width: 450.0,
            height: 250.0,
        }
    }

    #[test]
    fn bars_are_bottom_anchored_and_proportional() {
        let layout = BarLayout::fit(plot(), 3, 5.0).expect("layout");
        assert_relative_eq!(layout.bar_width, 145.0);

        let full = layout.bar(800.0, 800.0, 0).expect("bar");
        let half = layout.bar(400.0, 800.0, 2).expect("bar");
        assert_relative_eq!(full.height, 250.0);
        assert_relative_eq!(full.bottom(), 270.0);
        assert_relative_eq!(half.height, 125.0);
        assert_relative_eq!(half.x, 50.0 + 2.0 * 150.0);
    }

    #[test]
    fn overcrowded_layout_is_rejected() {
        assert!(BarLayout::fit(plot(), 100, 5.0).is_err());
    }
}
