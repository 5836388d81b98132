use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("unknown bump kind '{0}' (expected one of: major, minor, patch)")]
    UnknownBumpKind(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
