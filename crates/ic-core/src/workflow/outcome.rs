//! Terminal results of one submission.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::clip::ClipCode;
use crate::ids::ContentId;

/// Successful terminal result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClipSuccess {
    /// A clip was pinned, registered and confirmed.
    Created { code: ClipCode, cid: ContentId },
    /// A code was resolved back to its URL.
    Resolved { code: ClipCode, url: String },
}

/// Failure classes surfaced to the user.
///
/// Every variant is terminal for the submission; nothing is retried.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClipFailure {
    #[error("Please enter a valid URL or clip code")]
    InvalidInput,

    #[error("No clip is registered under this code")]
    CodeNotFound,

    #[error("The stored clip is not in a valid format")]
    InvalidClipFormat,

    #[error("Could not upload the clip to IPFS")]
    StoreUnavailable,

    #[error("This code is already registered")]
    AlreadyRegistered,

    #[error("The registry rejected the code length")]
    WrongLength,

    #[error("Could not register the clip on the blockchain")]
    RegistrationFailed,

    #[error("The clip transaction failed to confirm")]
    ConfirmationFailed,

    #[error("Could not reach the clip registry")]
    RegistryUnavailable,

    #[error("Another submission is still in progress")]
    Busy,
}

/// Tagged result of one submission, handed to whatever UI is listening.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClipOutcome {
    Success(ClipSuccess),
    Failure(ClipFailure),
    /// The signer declined; no on-chain record exists and nothing is surfaced.
    Cancelled,
}

impl ClipOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ClipOutcome::Success(_))
    }

    pub fn failure(&self) -> Option<&ClipFailure> {
        match self {
            ClipOutcome::Failure(failure) => Some(failure),
            _ => None,
        }
    }

    /// Code surfaced to the user, if any.
    pub fn code(&self) -> Option<&ClipCode> {
        match self {
            ClipOutcome::Success(ClipSuccess::Created { code, .. })
            | ClipOutcome::Success(ClipSuccess::Resolved { code, .. }) => Some(code),
            _ => None,
        }
    }
}

impl From<ClipFailure> for ClipOutcome {
    fn from(failure: ClipFailure) -> Self {
        ClipOutcome::Failure(failure)
    }
}

impl From<ClipSuccess> for ClipOutcome {
    fn from(success: ClipSuccess) -> Self {
        ClipOutcome::Success(success)
    }
}
