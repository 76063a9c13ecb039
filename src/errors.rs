use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SkipListError {
    #[error("promotion probability {0} is outside [0, 1]")]
    InvalidProbability(f64),
    #[error("config i/o error: {0}")]
    Io(#[from] io::Error),
    #[error("malformed config: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SkipListError>;
