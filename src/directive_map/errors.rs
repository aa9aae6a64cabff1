use thiserror::Error;

#[derive(Debug, Error)]
pub enum DirectiveMapError {
    #[error("failed to read conversion map '{path}': {source}")]
    FileRead {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse conversion map: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("invalid scalar identifier '{0}' (must match [A-Za-z_][A-Za-z0-9_]*)")]
    InvalidScalarIdentifier(String),
    #[error("empty base type for scalar '{0}'")]
    EmptyBaseType(String),
    #[error("duplicate scalar identifier '{0}' in conversion map")]
    DuplicateScalar(String),
}
