use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("probability must be in the open interval (0, 1), got {0}")]
    InvalidProbability(f64),
    #[error("the maximum number of evaluations must be > 0")]
    ZeroEvaluations,
    #[error("the maximum number of samplings must be > 0")]
    ZeroSamplings,
}

pub type Result<T> = std::result::Result<T, Error>;
