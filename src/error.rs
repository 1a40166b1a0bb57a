use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can end a submission attempt.
///
/// Local validation failures never reach the network. Transport failures
/// and service-reported failures are kept apart: the former get a generic
/// retry hint, the latter are shown verbatim.
#[derive(Debug, Error)]
pub enum Error {
    #[error("no pages selected")]
    EmptySelection,

    #[error("page order has not been changed")]
    NoModification,

    #[error("no document loaded")]
    NoDocument,

    #[error("a submission is already in progress")]
    SubmissionInFlight,

    #[error("this result is already ready; change the pages to submit again")]
    AlreadySubmitted,

    #[error("{0}")]
    Invalid(String),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not reach the PDF service ({0}); please try again")]
    Transport(String),

    #[error("PDF service returned HTTP {0}; please try again")]
    HttpStatus(u16),

    #[error("{0}")]
    Service(String),
}

impl Error {
    pub fn invalid(message: impl Into<String>) -> Self {
        Error::Invalid(message.into())
    }

    /// Whether the error was raised before any request was issued.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Error::EmptySelection
                | Error::NoModification
                | Error::NoDocument
                | Error::SubmissionInFlight
                | Error::AlreadySubmitted
                | Error::Invalid(_)
                | Error::Io { .. }
        )
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) => Error::HttpStatus(status.as_u16()),
            None => Error::Transport(e.to_string()),
        }
    }
}
