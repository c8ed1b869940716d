//! Planar geometry algorithms built on [`geom_types`]: pairwise and
//! multi-segment intersection, lexicographic search, convex hull and
//! polygon helpers, Fortune's sweep-line Voronoi/Delaunay construction,
//! and a DCEL planar subdivision with point location.

pub mod dcel;
pub mod error;
pub mod geo;
pub mod intersect;
pub mod lex;
pub mod multi_intersect;
pub mod search;
pub mod voronoi;

pub use error::{SubdivisionError, VoronoiError};
