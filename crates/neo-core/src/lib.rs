//! Core visual-mapping pipeline for the NEO risk views.
//!
//! Everything in this crate is pure: records come in over the wire
//! shape, get filtered down to renderable entities, classified into
//! risk tiers, mapped into scene space, and turned into per-view
//! models. The synchronizer at the end drives a [`view::RenderContext`]
//! so the actual drawing surfaces stay out of the picture entirely.

pub mod error;
pub mod record;
pub mod risk;
pub mod spatial;
pub mod sync;
pub mod view;

pub use error::PassError;
pub use record::{validate, validate_batch, PairComponents, RawRecord, RejectReason, ValidatedRecord};
pub use risk::{is_above_threshold, Rgb8, RiskTier};
pub use spatial::{radial_distance, visual_radius, SpatialMapper, SpatialPosition};
pub use sync::{PassOutcome, ViewSynchronizer};
pub use view::{
    build_bar_chart, build_scatter, build_scene, build_table, BarChartModel, RenderContext,
    ScatterPlotModel, SceneModel, TableModel,
};
