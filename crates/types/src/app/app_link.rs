// Path: crates/types/src/app/app_link.rs

//! Application links: a profile's claim over an account on a third-party
//! application, verified asynchronously by an oracle.

use crate::error::LinkError;
use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};

/// Builds the client id correlating an oracle request with its link.
pub fn client_id(owner: &str, application: &str, username: &str) -> String {
    format!("{}-{}-{}", owner, application, username)
}

/// The application account being claimed.
#[derive(Encode, Decode, Serialize, Deserialize, Clone, PartialEq, Eq, Debug, Hash)]
pub struct LinkData {
    /// Application name, e.g. `twitter`.
    pub application: String,
    /// Account name on the application.
    pub username: String,
}

impl LinkData {
    /// Creates a new `LinkData`.
    pub fn new(application: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            application: application.into(),
            username: username.into(),
        }
    }

    /// Both fields must be non-blank and free of key separators.
    pub fn validate(&self) -> Result<(), LinkError> {
        for (field, value) in [("application", &self.application), ("username", &self.username)] {
            if value.trim().is_empty() {
                return Err(LinkError::InvalidLinkData(format!("{} cannot be empty", field)));
            }
            if value.contains('/') {
                return Err(LinkError::InvalidLinkData(format!(
                    "{} cannot contain '/'",
                    field
                )));
            }
        }
        Ok(())
    }
}

/// Lifecycle of an application link.
#[derive(Encode, Decode, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum ApplicationLinkState {
    /// The oracle request packet was accepted by the channel layer.
    Initialized,
    /// The oracle acknowledged the request and assigned it an id.
    VerificationStarted,
    /// The oracle result verified.
    VerificationSuccess,
    /// The oracle or the result check reported an error.
    VerificationError,
    /// The request packet timed out on the channel.
    VerificationTimedOut,
    /// No result arrived before the expiration height.
    VerificationExpired,
}

impl ApplicationLinkState {
    /// Whether a verification is still in flight.
    pub fn is_ongoing(&self) -> bool {
        matches!(self, Self::Initialized | Self::VerificationStarted)
    }

    /// Terminal states are never left.
    pub fn is_terminal(&self) -> bool {
        !self.is_ongoing()
    }

    /// A stable name used in events and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Initialized => "initialized",
            Self::VerificationStarted => "verification_started",
            Self::VerificationSuccess => "verification_success",
            Self::VerificationError => "verification_error",
            Self::VerificationTimedOut => "verification_timed_out",
            Self::VerificationExpired => "verification_expired",
        }
    }
}

impl core::fmt::Display for ApplicationLinkState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The payload handed to the oracle script.
#[derive(Encode, Decode, Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct OracleRequestCallData {
    /// Application the oracle should query.
    pub application: String,
    /// Hex-encoded, application-specific call data.
    pub call_data: String,
}

impl OracleRequestCallData {
    /// Creates new call data.
    pub fn new(application: impl Into<String>, call_data: impl Into<String>) -> Self {
        Self {
            application: application.into(),
            call_data: call_data.into(),
        }
    }

    /// The application must be non-blank and the call data valid hex.
    pub fn validate(&self) -> Result<(), LinkError> {
        if self.application.trim().is_empty() {
            return Err(LinkError::InvalidLinkData(
                "call data application cannot be empty".into(),
            ));
        }
        hex::decode(&self.call_data)
            .map_err(|e| LinkError::InvalidLinkData(format!("call data is not hex: {}", e)))?;
        Ok(())
    }
}

/// The oracle request recorded on a link.
#[derive(Encode, Decode, Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct OracleRequest {
    /// Oracle-assigned request id, zero until acknowledged.
    pub id: u64,
    /// Oracle script executed for this request.
    pub script_id: u64,
    /// Data passed to the script.
    pub call_data: OracleRequestCallData,
    /// Correlation id, see [`client_id`].
    pub client_id: String,
}

/// Outcome of a finished verification.
#[derive(Encode, Decode, Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub enum LinkResult {
    /// The oracle returned a value signed by the profile owner.
    Success {
        /// Hex-encoded signed value.
        value: String,
        /// Hex-encoded signature over the value.
        signature: String,
    },
    /// Verification failed.
    Error {
        /// Human-readable reason.
        reason: String,
    },
}

impl LinkResult {
    /// Shorthand for a failed result.
    pub fn error(reason: impl Into<String>) -> Self {
        Self::Error {
            reason: reason.into(),
        }
    }
}

/// A profile's claim over an application account.
#[derive(Encode, Decode, Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct ApplicationLink {
    /// The profile owner.
    pub owner: String,
    /// The claimed account.
    pub data: LinkData,
    /// Current lifecycle state.
    pub state: ApplicationLinkState,
    /// The request sent to the oracle.
    pub oracle_request: OracleRequest,
    /// Set once the link reaches a terminal state through a result or an error.
    pub result: Option<LinkResult>,
    /// Block timestamp of creation, in unix seconds.
    pub created_at: u64,
    /// Block height at which an unfinished verification expires.
    pub expires_at: u64,
}

impl ApplicationLink {
    /// The correlation id of this link's oracle request.
    pub fn client_id(&self) -> &str {
        &self.oracle_request.client_id
    }

    /// Whether a verification is still in flight.
    pub fn is_ongoing(&self) -> bool {
        self.state.is_ongoing()
    }
}
