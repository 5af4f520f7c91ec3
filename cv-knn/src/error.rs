use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("cannot build an index from zero points")]
    Empty,
    #[error("points must have at least one dimension")]
    ZeroDimensions,
    #[error("expected a point with {expected} dimensions, found {found}")]
    DimensionMismatch { expected: usize, found: usize },
    #[error("got {points} points but {values} values")]
    LengthMismatch { points: usize, values: usize },
    #[error("covariance matrix is singular or not positive definite")]
    SingularCovariance,
}

pub type Result<T> = std::result::Result<T, Error>;
