//! Session-lifetime, in-memory state. Nothing here is persisted.

use thiserror::Error;
use uuid::Uuid;

pub mod characters;
pub mod jobs;

pub use characters::CharacterStore;
pub use jobs::{JobOutcome, JobRegistry};

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Error, Debug, PartialEq)]
pub enum StoreError {
    #[error("Entity not found: {0}")]
    NotFound(Uuid),
    #[error("Invalid input: {0}")]
    Invalid(&'static str),
    #[error("Job {0} has already finished")]
    AlreadySettled(Uuid),
}
