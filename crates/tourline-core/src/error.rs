use thiserror::Error;

use crate::sequencer::RunStatus;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Tour already active at action {index} ({status:?})")]
    AlreadyActive { index: usize, status: RunStatus },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
