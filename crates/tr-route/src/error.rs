//! Routing-subsystem error type.

use thiserror::Error;

use tr_core::{GeoPoint, RouteId};

/// Errors produced by `tr-route`.
///
/// Collaborator failures (`Unreachable`, `Status`, `Malformed`) are
/// recoverable: `RouteProvider` degrades to a straight-line route on them.
/// `InvalidCoordinate` and `NoRoutes` mean no route set can exist at all.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("routing service unreachable: {0}")]
    Unreachable(String),

    #[error("routing service returned HTTP {0}")]
    Status(u16),

    #[error("malformed routing response: {0}")]
    Malformed(String),

    #[error("coordinate {0} is not a finite lon/lat pair")]
    InvalidCoordinate(GeoPoint),

    #[error("no route with at least two waypoints could be produced")]
    NoRoutes,

    #[error("route {0} is not part of this route set")]
    UnknownRoute(RouteId),
}

impl RouteError {
    /// `true` for failures of the external collaborator, which the provider
    /// absorbs by falling back.
    pub fn is_collaborator_failure(&self) -> bool {
        matches!(
            self,
            RouteError::Unreachable(_) | RouteError::Status(_) | RouteError::Malformed(_)
        )
    }
}

pub type RouteResult<T> = Result<T, RouteError>;
