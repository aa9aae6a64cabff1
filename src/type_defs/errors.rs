use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TypeDefsError {
    #[error("type defs failed GraphQL syntax check: {0}")]
    InvalidTypeDefs(String),
    #[error("failed to write type defs to '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}
