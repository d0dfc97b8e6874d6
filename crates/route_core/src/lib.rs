//! # route_core - NFL Route Trajectories
//!
//! Loads NFL player-tracking records, assembles per-player route sequences
//! for each play, and renders them on a football field as SVG.
//!
//! ## Features
//! - Tracking CSV ingestion (Big Data Bowl schema)
//! - Route assembly with frame-order and coordinate integrity checks
//! - Field plots with direction arrows, ball landing and play tags
//!
//! ```rust
//! use route_core::{PlayKey, PlotRequest, RoutePlotter, TrackingRecord, TrajectoryLoader};
//!
//! let records = vec![
//!     TrackingRecord::at(2023090700, 101, 1, 1, 30.0, 20.0),
//!     TrackingRecord::at(2023090700, 101, 1, 2, 32.0, 21.0),
//! ];
//! let routes = TrajectoryLoader::new().load(records).unwrap();
//! let play = PlayKey::new(2023090700, 101);
//! let svg = RoutePlotter::default()
//!     .render_play(&PlotRequest::for_play(&routes, play, false))
//!     .unwrap();
//! assert!(svg.contains("<svg"));
//! ```

pub mod annotations;
pub mod config;
pub mod csv_source;
pub mod error;
pub mod loader;
pub mod models;
pub mod plotter;

pub use annotations::{PlayAnnotations, PocketType, RouteConcept};
pub use config::RenderConfig;
pub use csv_source::{read_tracking_csv, read_tracking_records, ParseStats, RecordFilter};
pub use error::{IntegrityIssue, Result, TrajectoryError};
pub use loader::{PlayTrajectories, RouteMap, TrajectoryLoader};
pub use models::{
    BallLanding, FieldPoint, PassOutcome, Play, PlayDirection, PlayKey, PlayerFrame, PlayerRole,
    RouteKey, RouteSequence, TeamSide, TrackingRecord,
};
pub use plotter::{save_svg, PlotRequest, RoutePlotter, Trajectory};
