use std::{io, process::ExitStatus};

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Error that can be returned by the I/O collaborators of the tree engine.
/// The tree operations themselves are total and never fail.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O errors.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// The external Graphviz renderer exited unsuccessfully.
    #[error("dot renderer exited with {0}")]
    Renderer(ExitStatus),
}
