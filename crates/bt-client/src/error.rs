//! Client Error Types

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BioTimeError {
    /// The upstream login call failed or returned an unusable body.
    #[error("authentication against BioTime failed with status {status}: {body}")]
    Authentication { status: u16, body: String },

    /// Upstream reported a non-success status after the single retry.
    /// Status and body are preserved verbatim for diagnostics.
    #[error("BioTime responded {status}: {body}")]
    Upstream { status: u16, body: String },

    /// A success status carrying a non-JSON body; BioTime sometimes
    /// serves an HTML error page with a 200.
    #[error("BioTime returned non-JSON content ({content_type}) for {url}")]
    ContentType { content_type: String, url: String },

    /// An otherwise-successful response did not match the expected
    /// shape. Distinct from `Upstream`: this is a contract mismatch on
    /// our side of the wire, not an upstream-reported failure.
    #[error("could not deserialize BioTime response: {0}")]
    Deserialization(#[from] serde_json::Error),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl BioTimeError {
    /// Upstream HTTP status associated with this error, where one exists.
    pub fn status(&self) -> Option<u16> {
        match self {
            BioTimeError::Authentication { status, .. } => Some(*status),
            BioTimeError::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, BioTimeError::Upstream { status: 404, .. })
    }
}

pub type Result<T> = std::result::Result<T, BioTimeError>;
