use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Closed domain interval `{min, max}` with `min <= max`.
///
/// A degenerate domain (`min == max`) is valid: every value maps to the
/// midpoint of the target pixel range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleDomain {
    min: f64,
    max: f64,
}

impl ScaleDomain {
    pub fn new(min: f64, max: f64) -> ChartResult<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(ChartError::InvalidData(
                "scale domain must be finite".to_owned(),
            ));
        }
        if min > max {
            return Err(ChartError::InvalidData(format!(
                "scale domain min ({min}) must not exceed max ({max})"
            )));
        }
        Ok(Self { min, max })
    }

    /// Smallest interval covering every finite value; `None` when there is none.
    #[must_use]
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for value in values.into_iter().filter(|value| value.is_finite()) {
            min = min.min(value);
            max = max.max(value);
        }
        (min <= max).then_some(Self { min, max })
    }

    /// Widens the domain so it contains `value` (used to anchor axes at zero).
    #[must_use]
    pub fn including(self, value: f64) -> Self {
        if !value.is_finite() {
            return self;
        }
        Self {
            min: self.min.min(value),
            max: self.max.max(value),
        }
    }

    #[must_use]
    pub fn min(self) -> f64 {
        self.min
    }

    #[must_use]
    pub fn max(self) -> f64 {
        self.max
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.max - self.min
    }

    #[must_use]
    pub fn is_degenerate(self) -> bool {
        self.min == self.max
    }
}

/// Target pixel interval. `start` may exceed `end` for inverted (y-up) axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelRange {
    pub start: f64,
    pub end: f64,
}

impl PixelRange {
    #[must_use]
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn midpoint(self) -> f64 {
        (self.start + self.end) / 2.0
    }

    #[must_use]
    pub fn length(self) -> f64 {
        (self.end - self.start).abs()
    }

    fn validate(self) -> ChartResult<Self> {
        if !self.start.is_finite() || !self.end.is_finite() {
            return Err(ChartError::InvalidData(
                "pixel range must be finite".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Monotonic linear mapping from a [`ScaleDomain`] onto a [`PixelRange`].
///
/// Values are not clamped: inputs outside the domain extrapolate linearly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain: ScaleDomain,
}

impl LinearScale {
    pub fn new(domain_min: f64, domain_max: f64) -> ChartResult<Self> {
        Ok(Self {
            domain: ScaleDomain::new(domain_min, domain_max)?,
        })
    }

    #[must_use]
    pub fn from_domain(domain: ScaleDomain) -> Self {
        Self { domain }
    }

    #[must_use]
    pub fn domain(self) -> ScaleDomain {
        self.domain
    }

    pub fn domain_to_pixel(self, value: f64, range: PixelRange) -> ChartResult<f64> {
        let range = range.validate()?;
        if !value.is_finite() {
            return Err(ChartError::InvalidData("value must be finite".to_owned()));
        }

        if self.domain.is_degenerate() {
            return Ok(range.midpoint());
        }

        let normalized = (value - self.domain.min) / self.domain.span();
        Ok(range.start + normalized * (range.end - range.start))
    }

    /// Inverse of [`Self::domain_to_pixel`].
    ///
    /// A degenerate domain collapses every pixel onto its single value, and a
    /// zero-length pixel range cannot be inverted.
    pub fn pixel_to_domain(self, pixel: f64, range: PixelRange) -> ChartResult<f64> {
        let range = range.validate()?;
        if !pixel.is_finite() {
            return Err(ChartError::InvalidData("pixel must be finite".to_owned()));
        }

        if self.domain.is_degenerate() {
            return Ok(self.domain.min);
        }

        let pixel_span = range.end - range.start;
        if pixel_span == 0.0 {
            return Err(ChartError::InvalidData(
                "cannot invert onto a zero-length pixel range".to_owned(),
            ));
        }

        let normalized = (pixel - range.start) / pixel_span;
        Ok(self.domain.min + normalized * self.domain.span())
    }
}

/// One-shot form of [`LinearScale::domain_to_pixel`].
pub fn scale(domain: ScaleDomain, range: PixelRange, value: f64) -> ChartResult<f64> {
    LinearScale::from_domain(domain).domain_to_pixel(value, range)
}
