use crate::model::NodeId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookmarkError {
    /// Listing or subtree retrieval failed.
    #[error("Fetch failed: {0}")]
    FetchFailure(String),

    /// The store rejected a create, update, move or delete.
    #[error("Mutation rejected: {0}")]
    MutationFailure(String),

    #[error("Bookmark not found: {0}")]
    NotFound(NodeId),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Api Error: {0}")]
    Api(String),
}

impl BookmarkError {
    /// Re-labels a store error as a fetch failure, keeping the original message.
    pub fn into_fetch(self) -> Self {
        match self {
            BookmarkError::FetchFailure(_) => self,
            other => BookmarkError::FetchFailure(other.to_string()),
        }
    }

    /// Re-labels a store error as a mutation failure, keeping the original message.
    pub fn into_mutation(self) -> Self {
        match self {
            BookmarkError::MutationFailure(_) => self,
            other => BookmarkError::MutationFailure(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, BookmarkError>;
