//! Schedule normalization and timeline layout for rotaview.
//!
//! The pipeline is a chain of pure functions:
//! - `normalize` expands the schedule document into today's windows
//! - `apply_overrides` replaces, adds and removes windows
//! - `merge_consecutive` coalesces back-to-back windows of the same map
//! - `layout` packs windows into columns and slices them per hour
//!
//! `recompute` runs the whole chain for a given instant.

pub mod config;
pub mod day;
pub mod document;
pub mod error;
pub mod layout;
pub mod merge;
pub mod model;
pub mod normalize;
pub mod overrides;
pub mod recompute;
pub mod state;
pub mod window;

pub use day::ScheduleDay;
pub use error::{RotaviewError, RotaviewResult};
pub use model::RenderModel;
pub use recompute::{build_windows, recompute};
pub use state::TimelineState;
pub use window::{Confidence, Window};
