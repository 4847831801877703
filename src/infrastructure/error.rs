//! Infrastructure-level errors

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::application::ApplicationError;

/// Failures outside loading and rendering: currently only writing files the
/// CLI manages itself, such as the config template.
#[derive(Error, Debug)]
pub enum InfraError {
    #[error("{0}")]
    Application(#[from] ApplicationError),

    #[error("cannot {action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl InfraError {
    pub fn io(action: &'static str, path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            action,
            path: path.to_path_buf(),
            source,
        }
    }
}
