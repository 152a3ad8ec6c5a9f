use thiserror::Error;

pub const NETWORK_FAILURE_MESSAGE: &str = "Network error occurred while fetching customers";

/// Failure of a customer fetch, normalized from whatever the transport reported.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// No usable response: connect failure, timeout, or an unreadable body.
    #[error("{message}")]
    Network { message: String },
    /// The server answered with a non-success status.
    #[error("{message}")]
    Server { status: u16, message: String },
}

impl FetchError {
    pub fn network() -> Self {
        Self::Network {
            message: NETWORK_FAILURE_MESSAGE.to_string(),
        }
    }

    pub fn server(status: u16, reason: &str) -> Self {
        Self::Server {
            status,
            message: format!("Failed to fetch customers: {reason}"),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Network { .. } => None,
            Self::Server { status, .. } => Some(*status),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Network { message } | Self::Server { message, .. } => message,
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network { .. })
    }
}
