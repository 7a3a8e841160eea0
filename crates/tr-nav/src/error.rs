use thiserror::Error;

#[derive(Debug, Error)]
pub enum NavError {
    #[error("assumed speed must be a positive number of km/h, got {0}")]
    InvalidSpeed(f64),
}

pub type NavResult<T> = Result<T, NavError>;
