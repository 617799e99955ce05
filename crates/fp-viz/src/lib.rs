//! # fp-viz
//!
//! Visualization data artifacts for fast-plotter.
//!
//! This crate turns a reduced binned table into numbers-first histogram
//! artifacts (arrays instead of nested objects). Drawing them is the job of
//! `fp-viz-render`.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// 1D histogram artifacts (stack + data + signal + ratio).
pub mod hist1d;

/// Plot options shared by every artifact builder.
pub mod options;

/// 1D projections of a reduced table.
pub mod projection;

/// Plot property keys and plot collections.
pub mod properties;

/// Dataset role classification.
pub mod roles;

pub use hist1d::{Hist1dArtifact, Hist1dSeries, RatioSeries, hist1d_artifacts};
pub use options::{PlotOptions, YScale};
pub use projection::{Projection, ProjectedSeries, project_1d};
pub use properties::{PlotCollection, PlotProperties};
pub use roles::DatasetRole;
