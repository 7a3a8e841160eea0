use thiserror::Error;
use tr_core::TrackError;
use tr_nav::NavError;
use tr_route::RouteError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] TrackError),

    #[error("route set unavailable: {0}")]
    Route(#[from] RouteError),

    #[error("navigation setup failed: {0}")]
    Nav(#[from] NavError),

    #[error("tracking session needs a {0} before it can be built")]
    MissingEndpoint(&'static str),
}

pub type SimResult<T> = Result<T, SimError>;
