//! Errors at the character construction boundary

use thiserror::Error;

/// Errors from building a character out of external identifiers
///
/// These are caller bugs: identifiers are supposed to be validated before
/// they reach the factory, so none of the variants is recoverable here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("unknown race '{0}'")]
    UnknownRace(String),

    #[error("unknown class '{0}'")]
    UnknownClass(String),

    #[error("level {0} is out of range (1-5)")]
    LevelOutOfRange(u8),
}
