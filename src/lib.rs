//! Conway's Game of Life on a fixed grid with bounded or toroidal edges,
//! plus the editing model used by the interactive host: direct painting,
//! pattern stamping with mirroring, and an explicit interaction mode.

pub mod camera;
pub mod cell;
pub mod config;
pub mod controller;
pub mod geometry;
pub mod grid;
pub mod patterns;
pub mod simulation;
pub mod stamp;
pub mod topology;

pub use controller::{Controller, InteractionMode};
pub use grid::Grid;
pub use patterns::{Pattern, PatternLibrary};
pub use simulation::{advance, Simulation};
pub use stamp::resolve_stamp_coordinates;
pub use topology::{Coord, Wrap};
