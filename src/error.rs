use std::fmt::{Debug, Display};

use awc::error::{PayloadError, SendRequestError};
use derivative::Derivative;
use serde::{Serialize, Serializer};
use serde_json::Error as JsonError;

use crate::agent::AgentId;
use crate::campaign::RangeViolation;

#[derive(Debug, Serialize, Derivative)]
#[derivative(PartialEq)]
#[serde(untagged)]
pub enum Error {
    // 400
    ConfigurationNotLoaded,
    ConfirmationRequired {
        action: &'static str,
    },
    ValueOutOfRange {
        violation: RangeViolation,
    },
    InvalidQuery(String),

    // 404
    AgentNotFound {
        agent_id: AgentId,
    },

    // 502
    UnexpectedStatus {
        status: u16,
        detail: Option<String>,
    },
    #[serde(serialize_with = "display")]
    RequestFailed(#[derivative(PartialEq = "ignore")] SendRequestError),
    #[serde(serialize_with = "display")]
    FailedToReadResponse(#[derivative(PartialEq = "ignore")] PayloadError),
    #[serde(serialize_with = "display")]
    InvalidResponse(#[derivative(PartialEq = "ignore")] JsonError),
}

impl Error {
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::ConfigurationNotLoaded => "E4001000",
            Error::ConfirmationRequired { .. } => "E4001001",
            Error::ValueOutOfRange { .. } => "E4001002",
            Error::InvalidQuery(_) => "E4001003",
            Error::AgentNotFound { .. } => "E4041000",
            Error::UnexpectedStatus { .. } => "E5021000",
            Error::RequestFailed(_) => "E5021001",
            Error::FailedToReadResponse(_) => "E5021002",
            Error::InvalidResponse(_) => "E5021003",
        }
    }

    pub fn error_message(&self) -> &'static str {
        match self {
            Error::ConfigurationNotLoaded => "The campaign configuration has not been loaded",
            Error::ConfirmationRequired { .. } => "The requested action must be confirmed",
            Error::ValueOutOfRange { .. } => "The given value is outside of its allowed range",
            Error::InvalidQuery(_) => "The given query could not be encoded",
            Error::AgentNotFound { .. } => "The requested agent was not found",
            Error::UnexpectedStatus { .. } => "The backend rejected the request",
            Error::RequestFailed(_) => "The request to the backend could not be completed",
            Error::FailedToReadResponse(_) => "The response from the backend could not be read",
            Error::InvalidResponse(_) => "The response from the backend could not be parsed",
        }
    }

    /// Whether this failure came from talking to the backend, as opposed to
    /// something rejected before a request was made.
    pub fn is_network_or_server(&self) -> bool {
        matches!(
            self,
            Error::UnexpectedStatus { .. }
                | Error::RequestFailed(_)
                | Error::FailedToReadResponse(_)
                | Error::InvalidResponse(_)
        )
    }

    pub fn detail(&self) -> Option<&str> {
        match self {
            Error::UnexpectedStatus { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    pub fn report(&self) -> ErrorReport<'_> {
        ErrorReport {
            error_code: self.error_code(),
            error_message: self.error_message(),
            error_meta: self,
        }
    }
}

#[derive(Serialize)]
pub struct ErrorReport<'a> {
    pub error_code: &'static str,
    pub error_message: &'static str,
    pub error_meta: &'a Error,
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        Debug::fmt(self, f)
    }
}

impl From<SendRequestError> for Error {
    fn from(error: SendRequestError) -> Error {
        Error::RequestFailed(error)
    }
}

impl From<PayloadError> for Error {
    fn from(error: PayloadError) -> Error {
        Error::FailedToReadResponse(error)
    }
}

impl From<JsonError> for Error {
    fn from(error: JsonError) -> Error {
        Error::InvalidResponse(error)
    }
}

impl From<RangeViolation> for Error {
    fn from(violation: RangeViolation) -> Error {
        Error::ValueOutOfRange { violation }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::RequestFailed(err) => Some(err),
            Error::FailedToReadResponse(err) => Some(err),
            Error::InvalidResponse(err) => Some(err),
            _ => None,
        }
    }
}

fn display<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Display,
    S: Serializer,
{
    serializer.collect_str(value)
}
