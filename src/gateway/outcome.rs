//! Result type of every gateway call.

/// What a gateway call produced. Gateway calls never return `Err` and never panic.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Success { payload: T },
    /// `code` is the HTTP status for server failures and absent when no
    /// response was received.
    Failure { message: String, code: Option<u16> },
}

impl<T> Outcome<T> {
    pub fn success(payload: T) -> Self {
        Self::Success { payload }
    }

    pub fn failure(message: impl Into<String>, code: Option<u16>) -> Self {
        Self::Failure {
            message: message.into(),
            code,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn payload(&self) -> Option<&T> {
        match self {
            Self::Success { payload } => Some(payload),
            Self::Failure { .. } => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Self::Success { payload } => Outcome::Success { payload: f(payload) },
            Self::Failure { message, code } => Outcome::Failure { message, code },
        }
    }

    pub fn into_result(self) -> Result<T, GatewayFailure> {
        match self {
            Self::Success { payload } => Ok(payload),
            Self::Failure { message, code } => Err(GatewayFailure { message, code }),
        }
    }
}

/// A failed [`Outcome`] as an error value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct GatewayFailure {
    pub message: String,
    pub code: Option<u16>,
}
