use std::io;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Prompt aborted while asking '{question}': {source}")]
    Prompt {
        question: String,

        #[source]
        source: io::Error,
    },

    #[error("Cannot persist credentials: {0}")]
    Storage(#[from] fsutil::Error),
}
