use thiserror::Error;

/// Errors raised by the domain model and the scheduling operators.
///
/// Configuration and catalog errors are user-correctable. The remaining variants signal
/// a broken individual and are never produced by the crate's own operators.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("duplicate task id `{0}`")]
    DuplicateTask(String),
    #[error("duplicate resource id `{0}`")]
    DuplicateResource(String),
    #[error("task `{task}` lists dependency `{dependency}` more than once")]
    DuplicateDependency { task: String, dependency: String },
    #[error("task `{0}` must have a positive duration")]
    ZeroDuration(String),
    #[error("resource `{0}` must have positive working hours per day")]
    ZeroCapacity(String),
    #[error("dependency cycle through task `{0}`")]
    Cycle(String),
    #[error("unknown task `{0}`")]
    UnknownTask(String),
    #[error("unknown resource `{0}`")]
    UnknownResource(String),
    #[error("task `{0}` has no schedule entry")]
    MissingEntry(String),
    #[error("task `{0}` is scheduled more than once")]
    DuplicateEntry(String),
    #[error("task `{task}` found at position {position}, expected catalog order")]
    MisplacedEntry { task: String, position: usize },
    #[error("task `{task}` is scheduled on `{found}` but assigned to `{expected}`")]
    ResourceMismatch {
        task: String,
        found: String,
        expected: String,
    },
    #[error("individual has {found} entries, expected {expected}")]
    LengthMismatch { found: usize, expected: usize },
    #[error("time arithmetic overflows at task `{task}`")]
    Overflow { task: String },
}

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;
