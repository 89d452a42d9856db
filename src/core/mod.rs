pub mod primitives;
pub mod scale;
pub mod series;
pub mod time_scale;
pub mod types;

pub use primitives::parse_timestamp;
pub use scale::{LinearScale, PixelRange, ScaleDomain, scale};
pub use series::{PointMeta, Series, SeriesPoint};
pub use time_scale::TimeScale;
pub use types::{DataPoint, Padding, PixelPoint, PlotArea, Viewport};
