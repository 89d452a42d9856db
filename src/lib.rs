//! learner-charts: deterministic chart rendering for learner dashboards.
//!
//! Raw activity records (XP transactions, audit totals, graded results,
//! skill transactions) are reduced by `aggregate`, projected and laid out by
//! `charts` on top of `core` scales and `geometry` builders, wrapped in a
//! titled card and handed to a `render` backend. `api::ChartEngine` ties the
//! pipeline together and hands back per-chart `interaction` state.

pub mod aggregate;
pub mod api;
pub mod charts;
pub mod core;
pub mod error;
pub mod geometry;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ChartEngine, ChartEngineConfig, ChartInstance};
pub use charts::{ChartFilter, ChartKind, ChartSpec, EmptyReason, EmptyState, RenderOutcome};
pub use error::{ChartError, ChartResult};
