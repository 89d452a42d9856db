use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::primitives::{datetime_to_unix_millis, unix_millis_to_datetime};
use crate::core::{LinearScale, PixelRange, ScaleDomain};
use crate::error::{ChartError, ChartResult};

/// Temporal scale interpolating linearly between two instants.
///
/// Internally the instants are carried as unix milliseconds so the mapping is
/// shared with [`LinearScale`], including the midpoint rule when both instants
/// are equal (a single-point series).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeScale {
    start_ms: f64,
    end_ms: f64,
}

impl TimeScale {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> ChartResult<Self> {
        Self::from_millis(datetime_to_unix_millis(start), datetime_to_unix_millis(end))
    }

    pub fn from_millis(start_ms: f64, end_ms: f64) -> ChartResult<Self> {
        if !start_ms.is_finite() || !end_ms.is_finite() {
            return Err(ChartError::InvalidData(
                "time scale range must be finite".to_owned(),
            ));
        }
        if start_ms > end_ms {
            return Err(ChartError::InvalidData(
                "time scale start must not be after its end".to_owned(),
            ));
        }
        Ok(Self { start_ms, end_ms })
    }

    /// Fits the scale to the earliest and latest instant; `None` for no instants.
    #[must_use]
    pub fn from_instants(instants: impl IntoIterator<Item = DateTime<Utc>>) -> Option<Self> {
        let domain = ScaleDomain::from_values(instants.into_iter().map(datetime_to_unix_millis))?;
        Some(Self {
            start_ms: domain.min(),
            end_ms: domain.max(),
        })
    }

    #[must_use]
    pub fn range_millis(self) -> (f64, f64) {
        (self.start_ms, self.end_ms)
    }

    pub fn start(self) -> ChartResult<DateTime<Utc>> {
        unix_millis_to_datetime(self.start_ms)
    }

    pub fn end(self) -> ChartResult<DateTime<Utc>> {
        unix_millis_to_datetime(self.end_ms)
    }

    #[must_use]
    pub fn is_degenerate(self) -> bool {
        self.start_ms == self.end_ms
    }

    pub fn time_to_pixel(self, time: DateTime<Utc>, range: PixelRange) -> ChartResult<f64> {
        self.millis_to_pixel(datetime_to_unix_millis(time), range)
    }

    pub fn millis_to_pixel(self, millis: f64, range: PixelRange) -> ChartResult<f64> {
        self.linear()?.domain_to_pixel(millis, range)
    }

    pub fn pixel_to_time(self, pixel: f64, range: PixelRange) -> ChartResult<DateTime<Utc>> {
        let millis = self.linear()?.pixel_to_domain(pixel, range)?;
        unix_millis_to_datetime(millis)
    }

    /// `count` instants evenly spaced from start to end, both ends included.
    pub fn evenly_spaced(self, count: usize) -> ChartResult<Vec<DateTime<Utc>>> {
        match count {
            0 => Ok(Vec::new()),
            1 => Ok(vec![self.start()?]),
            _ => {
                let step = (self.end_ms - self.start_ms) / (count - 1) as f64;
                (0..count)
                    .map(|i| unix_millis_to_datetime(self.start_ms + step * i as f64))
                    .collect()
            }
        }
    }

    fn linear(self) -> ChartResult<LinearScale> {
        LinearScale::new(self.start_ms, self.end_ms)
    }
}
