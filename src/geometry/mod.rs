//! Geometry builders: pure functions from pixel-space points to path, arc,
//! bar, radar and marker descriptors.

pub mod arc;
pub mod area;
pub mod bar;
pub mod path;
pub mod radar;
pub mod scatter;

pub use arc::{describe_arc, polar_to_cartesian};
pub use area::{AreaGeometry, area_geometry};
pub use bar::{BarGeometry, BarLayout};
pub use path::{PathCommand, PathData, format_coord, line_path};
pub use radar::{RadarAxis, RadarGeometry, radar_geometry};
pub use scatter::{Marker, project_time_points, scatter_markers};
