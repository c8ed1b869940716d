//! Subsystem error types, layered on top of [`geom_types::GeomError`].
//!
//! Following the shape of `geo`'s `VoronoiError` wrapping
//! `TriangulationError`, each algorithmic subsystem that can fail in ways
//! beyond bad-argument/overflow/invariant gets its own small enum that
//! wraps [`GeomError`] for the shared cases and adds subsystem-specific
//! variants for the rest.

use std::fmt;

pub use geom_types::{GeomError, GeomResult};

/// Errors from [`crate::voronoi`].
#[derive(Debug, Clone, PartialEq)]
pub enum VoronoiError {
    /// A shared argument/invariant failure (see [`GeomError`]).
    Geom(GeomError),
    /// Fewer than 3 sites were supplied; Fortune's sweep needs at least
    /// three sites to produce a single bounded Voronoi vertex.
    InsufficientSites { found: usize },
}

impl From<GeomError> for VoronoiError {
    fn from(e: GeomError) -> Self {
        VoronoiError::Geom(e)
    }
}

impl fmt::Display for VoronoiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VoronoiError::Geom(e) => write!(f, "{e}"),
            VoronoiError::InsufficientSites { found } => {
                write!(f, "at least 3 sites are required, found {found}")
            }
        }
    }
}

impl std::error::Error for VoronoiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            VoronoiError::Geom(e) => Some(e),
            VoronoiError::InsufficientSites { .. } => None,
        }
    }
}

/// Errors from [`crate::dcel`] subdivision construction.
#[derive(Debug, Clone, PartialEq)]
pub enum SubdivisionError {
    Geom(GeomError),
}

impl From<GeomError> for SubdivisionError {
    fn from(e: GeomError) -> Self {
        SubdivisionError::Geom(e)
    }
}

impl fmt::Display for SubdivisionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubdivisionError::Geom(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for SubdivisionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SubdivisionError::Geom(e) => Some(e),
        }
    }
}
