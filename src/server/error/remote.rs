use thiserror::Error;

/// Failures talking to the remote repository.
///
/// None of these are surfaced to members; callers log them and keep going with
/// the local copy.
#[derive(Error, Debug)]
pub enum RemoteError {
    /// Transport failure or invalid response body.
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),

    /// Repository answered with an unexpected status code.
    #[error("Repository request for '{path}' failed with status {status}")]
    Status {
        /// Repository path that was requested
        path: String,
        /// HTTP status returned
        status: u16,
    },

    /// File content was not valid base64.
    #[error("Failed to decode content of '{path}': {source}")]
    Decode {
        /// Repository path whose content failed to decode
        path: String,
        #[source]
        source: base64::DecodeError,
    },

    /// Revision token did not match the current file revision.
    #[error("Revision conflict while writing '{0}'")]
    Conflict(String),

    /// No credentials are configured, so remote storage is off.
    #[error("Remote storage is disabled")]
    Disabled,
}
