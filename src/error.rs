use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Contract violation: {0}")]
    ContractViolation(String),

    #[error("No such file or directory: {}", .0.display())]
    MissingInput(PathBuf),

    #[error("Unable to open video: {0}")]
    OpenVideo(String),

    #[error("Bad region dump at line {line}: {source}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Bad frame index {index:?} at line {line}")]
    FrameIndex { line: usize, index: String },

    #[error("Config Error: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("OpenCV Error: {0}")]
    OpenCv(#[from] opencv::Error),

    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),
}
