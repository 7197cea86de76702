use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Moderation state shared by every document kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    Draft,
    Pending,
    Approved,
    Rejected,
}

impl DocumentStatus {
    pub const ALL: [DocumentStatus; 4] = [
        DocumentStatus::Draft,
        DocumentStatus::Pending,
        DocumentStatus::Approved,
        DocumentStatus::Rejected,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DocumentStatus::Draft => "draft",
            DocumentStatus::Pending => "pending",
            DocumentStatus::Approved => "approved",
            DocumentStatus::Rejected => "rejected",
        }
    }

    /// Single-letter code accepted on input for compatibility with older clients.
    pub fn code(self) -> char {
        match self {
            DocumentStatus::Draft => 'd',
            DocumentStatus::Pending => 'p',
            DocumentStatus::Approved => 'a',
            DocumentStatus::Rejected => 'r',
        }
    }

    /// Statuses in which the owner may still edit or delete the document.
    pub fn is_editable(self) -> bool {
        matches!(self, DocumentStatus::Draft | DocumentStatus::Rejected)
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentStatus {
    type Err = Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let value = raw.trim();
        DocumentStatus::ALL
            .into_iter()
            .find(|status| {
                status.as_str().eq_ignore_ascii_case(value)
                    || (value.len() == 1 && value.starts_with(status.code()))
            })
            .ok_or_else(|| Error::InvalidStatus(raw.to_string()))
    }
}

impl TryFrom<String> for DocumentStatus {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_and_codes() {
        assert_eq!("pending".parse::<DocumentStatus>().unwrap(), DocumentStatus::Pending);
        assert_eq!("Approved".parse::<DocumentStatus>().unwrap(), DocumentStatus::Approved);
        assert_eq!("r".parse::<DocumentStatus>().unwrap(), DocumentStatus::Rejected);
        assert_eq!("d".parse::<DocumentStatus>().unwrap(), DocumentStatus::Draft);
    }

    #[test]
    fn rejects_unknown_codes() {
        for raw in ["", "x", "published", "drafted", "pp"] {
            let err = raw.parse::<DocumentStatus>().unwrap_err();
            assert!(matches!(err, Error::InvalidStatus(_)), "{raw} should be invalid");
        }
    }

    #[test]
    fn only_draft_and_rejected_are_editable() {
        let editable: Vec<_> = DocumentStatus::ALL
            .into_iter()
            .filter(|s| s.is_editable())
            .collect();
        assert_eq!(editable, vec![DocumentStatus::Draft, DocumentStatus::Rejected]);
    }
}
