//! Document status state machine.
//!
//! Two rule sets are layered: the owner may submit a draft/rejected document
//! for review or pull it back to draft, and a reviewer who is not the owner may
//! settle a pending document as approved or rejected. Everything else is an
//! illegal transition.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::document::{DocumentMeta, DocumentRef};
use crate::models::status::DocumentStatus;

/// From which statuses the owner may move a document back to draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WithdrawRule {
    Anytime,
    FromRejected,
    Never,
}

impl WithdrawRule {
    pub fn allows(self, from: DocumentStatus) -> bool {
        match self {
            WithdrawRule::Anytime => true,
            WithdrawRule::FromRejected => from == DocumentStatus::Rejected,
            WithdrawRule::Never => false,
        }
    }
}

impl FromStr for WithdrawRule {
    type Err = Error;

    fn from_str(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "anytime" => Ok(WithdrawRule::Anytime),
            "from_rejected" => Ok(WithdrawRule::FromRejected),
            "never" => Ok(WithdrawRule::Never),
            other => Err(Error::Config(format!("Invalid withdraw rule: {}", other))),
        }
    }
}

/// The actor's relation to a document as far as transitions are concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Standing {
    Owner,
    /// Not the owner, but holds the reviewer capability for the kind.
    Reviewer,
    Bystander,
}

/// Decides whether `from -> to` is legal for an actor with `standing`.
pub fn check_transition(
    withdraw: WithdrawRule,
    from: DocumentStatus,
    to: DocumentStatus,
    standing: Standing,
) -> Result<()> {
    use crate::models::status::DocumentStatus::*;

    let legal = match standing {
        Standing::Owner => match to {
            Pending => from.is_editable(),
            Draft => withdraw.allows(from),
            Approved | Rejected => false,
        },
        Standing::Reviewer => from == Pending && matches!(to, Approved | Rejected),
        Standing::Bystander => false,
    };

    if legal {
        Ok(())
    } else {
        Err(Error::IllegalTransition { from, to })
    }
}

/// A validated status change, applied by the store as a compare-and-swap on
/// `(doc.id, from)`.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusChange {
    pub doc: DocumentRef,
    pub from: DocumentStatus,
    pub to: DocumentStatus,
    pub info: String,
    pub actor: Uuid,
    pub at: DateTime<Utc>,
}

impl StatusChange {
    /// Applies the change if `meta` still holds the expected status.
    pub fn apply(&self, meta: &mut DocumentMeta) -> bool {
        if meta.id != self.doc.id || meta.status != self.from {
            return false;
        }
        meta.status = self.to;
        meta.status_info = self.info.clone();
        meta.touch(self.actor, self.at);
        true
    }
}
