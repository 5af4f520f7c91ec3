use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("at least 4 correspondences are needed, got {0}")]
    InsufficientPoints(usize),
    #[error("got {0} source points but {1} destination points")]
    LengthMismatch(usize, usize),
    #[error("all points coincide, they can not be normalized")]
    DegeneratePoints,
    #[error("the homography is singular")]
    Singular,
    #[error("the singular value decomposition did not converge")]
    Decomposition,
    #[error("invalid consensus settings: {0}")]
    Configuration(#[from] cv_ransac::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
