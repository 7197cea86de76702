use serde::Serialize;
use uuid::Uuid;

use crate::engine::policy::Subject;
use crate::models::status::DocumentStatus;

/// Row filter an actor is allowed to list for one document kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "scope", content = "value", rename_all = "snake_case")]
pub enum Scope {
    All,
    OwnedBy(Uuid),
    WithStatus(DocumentStatus),
    /// The user's own rows plus every row in the given status.
    OwnedOrWithStatus(Uuid, DocumentStatus),
    /// Bilateral documents linked to the user's CV or vacancy, drafts excluded.
    CounterpartOf(Uuid),
    Nothing,
}

impl Scope {
    pub fn admits(&self, subject: &Subject) -> bool {
        match *self {
            Scope::All => true,
            Scope::OwnedBy(user) => subject.owner == user,
            Scope::WithStatus(status) => subject.status == status,
            Scope::OwnedOrWithStatus(user, status) => {
                subject.owner == user || subject.status == status
            }
            Scope::CounterpartOf(user) => {
                subject.counterpart == Some(user) && subject.status != DocumentStatus::Draft
            }
            Scope::Nothing => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::document::DocumentKind;

    fn subject(owner: Uuid, counterpart: Uuid, status: DocumentStatus) -> Subject {
        Subject {
            kind: DocumentKind::CvResponse,
            owner,
            status,
            counterpart: Some(counterpart),
        }
    }

    #[test]
    fn counterpart_scope_skips_drafts() {
        let (owner, other) = (Uuid::new_v4(), Uuid::new_v4());
        let scope = Scope::CounterpartOf(other);
        assert!(!scope.admits(&subject(owner, other, DocumentStatus::Draft)));
        assert!(scope.admits(&subject(owner, other, DocumentStatus::Pending)));
        assert!(!scope.admits(&subject(other, owner, DocumentStatus::Pending)));
    }

    #[test]
    fn status_and_owner_filters() {
        let owner = Uuid::new_v4();
        let row = subject(owner, Uuid::new_v4(), DocumentStatus::Rejected);
        assert!(Scope::OwnedBy(owner).admits(&row));
        assert!(!Scope::WithStatus(DocumentStatus::Approved).admits(&row));
        assert!(Scope::OwnedOrWithStatus(owner, DocumentStatus::Approved).admits(&row));
        assert!(!Scope::OwnedOrWithStatus(Uuid::new_v4(), DocumentStatus::Approved).admits(&row));
        assert!(Scope::All.admits(&row));
        assert!(!Scope::Nothing.admits(&row));
    }
}
