use thiserror::Error;

/// Why a fetch cycle failed. Every variant leaves the current event set untouched.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("feed at {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("malformed feed payload: {reason}")]
    MalformedPayload { reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    Transport,
    MalformedPayload,
}

impl FetchError {
    pub fn transport(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Transport {
            url: url.into(),
            source,
        }
    }

    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedPayload {
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> FetchErrorKind {
        match self {
            FetchError::Transport { .. } | FetchError::Status { .. } => FetchErrorKind::Transport,
            FetchError::MalformedPayload { .. } => FetchErrorKind::MalformedPayload,
        }
    }
}

/// Per-record validation failure. The record is dropped, the fetch still succeeds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RejectReason {
    #[error("record is not a JSON object")]
    NotAnObject,

    #[error("missing or empty id")]
    MissingId,

    #[error("duplicate id within feed")]
    DuplicateId,

    #[error("missing properties object")]
    MissingProperties,

    #[error("magnitude must be a number or null")]
    InvalidMagnitude,

    #[error("place must be a string or null")]
    InvalidPlace,

    #[error("time must be an integer epoch-millisecond value")]
    InvalidTime,

    #[error("geometry.coordinates must hold [longitude, latitude, depth]")]
    InvalidGeometry,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("feature #{index} rejected: {reason}")]
pub struct RecordRejection {
    pub index: usize,
    pub id: Option<String>,
    #[source]
    pub reason: RejectReason,
}
