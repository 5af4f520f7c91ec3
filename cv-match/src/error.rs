use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("k must be between 1 and the {samples} training samples, got {k}")]
    InvalidNeighborCount { k: usize, samples: usize },
    #[error("got {inputs} training inputs but {outputs} outputs")]
    LengthMismatch { inputs: usize, outputs: usize },
    #[error("the number of classes must be > 0")]
    NoClasses,
    #[error("label {label} is out of range for {classes} classes")]
    LabelOutOfRange { label: usize, classes: usize },
    #[error("both point sets must contain at least one point")]
    InsufficientPoints,
    #[error("index error: {0}")]
    Index(#[from] cv_knn::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
