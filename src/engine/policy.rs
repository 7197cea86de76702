//! Per-kind authorization and visibility rules.
//!
//! Every document kind is described by one [`KindPolicy`] row; the generic
//! [`PolicyTable::can_act`] and [`PolicyTable::visible_scope`] read the row
//! instead of branching on the concrete type.

use serde::Serialize;
use uuid::Uuid;

use crate::engine::scope::Scope;
use crate::engine::transition::{self, Standing, WithdrawRule};
use crate::error::{Error, Result};
use crate::models::document::DocumentKind;
use crate::models::status::DocumentStatus;
use crate::models::user::{Actor, Role};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verb {
    Read,
    Write,
    Delete,
    TransitionStatus,
    Message,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    /// Published listing reviewed by a moderator.
    SelfService,
    /// Negotiation between an initiator and the owner of the other linked document.
    Bilateral,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KindPolicy {
    pub kind: DocumentKind,
    pub template: Template,
    pub owner_role: Role,
    pub counterpart_role: Option<Role>,
    /// Roles that may read approved instances they do not own.
    pub approved_readers: Vec<Role>,
    pub withdraw: WithdrawRule,
}

/// What the policy needs to know about one instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subject {
    pub kind: DocumentKind,
    pub owner: Uuid,
    pub status: DocumentStatus,
    pub counterpart: Option<Uuid>,
}

#[derive(Debug, Clone)]
pub struct PolicyTable {
    kinds: [KindPolicy; 5],
}

impl Default for PolicyTable {
    fn default() -> Self {
        let self_service = |kind, owner_role, approved_readers: &[Role]| KindPolicy {
            kind,
            template: Template::SelfService,
            owner_role,
            counterpart_role: None,
            approved_readers: approved_readers.to_vec(),
            withdraw: WithdrawRule::Anytime,
        };
        let bilateral = |kind, owner_role, counterpart_role| KindPolicy {
            kind,
            template: Template::Bilateral,
            owner_role,
            counterpart_role: Some(counterpart_role),
            approved_readers: Vec::new(),
            withdraw: WithdrawRule::Anytime,
        };

        Self {
            kinds: [
                self_service(
                    DocumentKind::Employer,
                    Role::Employer,
                    &[Role::Employee, Role::Employer],
                ),
                self_service(DocumentKind::Cv, Role::Employee, &[Role::Employer]),
                self_service(DocumentKind::Vacancy, Role::Employer, &[Role::Employee]),
                bilateral(DocumentKind::CvResponse, Role::Employer, Role::Employee),
                bilateral(DocumentKind::VacancyResponse, Role::Employee, Role::Employer),
            ],
        }
    }
}

impl PolicyTable {
    pub fn get(&self, kind: DocumentKind) -> &KindPolicy {
        &self.kinds[kind as usize]
    }

    pub fn with_withdraw(mut self, kind: DocumentKind, rule: WithdrawRule) -> Self {
        self.kinds[kind as usize].withdraw = rule;
        self
    }

    /// Applies `rule` to every self-service kind.
    pub fn with_self_service_withdraw(mut self, rule: WithdrawRule) -> Self {
        for policy in self.kinds.iter_mut() {
            if policy.template == Template::SelfService {
                policy.withdraw = rule;
            }
        }
        self
    }

    pub fn can_act(&self, actor: &Actor, verb: Verb, subject: &Subject) -> bool {
        if actor.is_superuser {
            return true;
        }
        let policy = self.get(subject.kind);
        let status = subject.status;

        match policy.template {
            Template::SelfService => {
                if actor.role == policy.owner_role && subject.owner == actor.user_id {
                    match verb {
                        Verb::Read | Verb::TransitionStatus => true,
                        Verb::Write | Verb::Delete => status.is_editable(),
                        Verb::Message => false,
                    }
                } else if actor.role == Role::Moderator {
                    match verb {
                        Verb::Read => true,
                        Verb::TransitionStatus => status == DocumentStatus::Pending,
                        _ => false,
                    }
                } else if policy.approved_readers.contains(&actor.role) {
                    verb == Verb::Read && status == DocumentStatus::Approved
                } else {
                    false
                }
            }
            Template::Bilateral => {
                if actor.role == policy.owner_role && subject.owner == actor.user_id {
                    true
                } else if Some(actor.role) == policy.counterpart_role
                    && subject.counterpart == Some(actor.user_id)
                    && status != DocumentStatus::Draft
                {
                    match verb {
                        Verb::Read => true,
                        Verb::TransitionStatus => status == DocumentStatus::Pending,
                        Verb::Message => status == DocumentStatus::Approved,
                        Verb::Write | Verb::Delete => false,
                    }
                } else {
                    false
                }
            }
        }
    }

    /// Returns `NotFound` when the actor cannot even read the instance, so
    /// invisible documents are indistinguishable from missing ones.
    pub fn authorize(&self, actor: &Actor, verb: Verb, subject: &Subject) -> Result<()> {
        if !self.can_act(actor, Verb::Read, subject) {
            return Err(Error::NotFound(format!("{} not found", subject.kind)));
        }
        if verb != Verb::Read && !self.can_act(actor, verb, subject) {
            tracing::debug!(
                actor = %actor.user_id,
                doc_kind = %subject.kind,
                ?verb,
                status = %subject.status,
                "action denied"
            );
            return Err(Error::Forbidden(format!(
                "not allowed to {} this {}",
                verb_label(verb),
                subject.kind
            )));
        }
        Ok(())
    }

    pub fn standing(&self, actor: &Actor, subject: &Subject) -> Standing {
        if subject.owner == actor.user_id {
            return Standing::Owner;
        }
        if actor.is_superuser {
            return Standing::Reviewer;
        }
        let policy = self.get(subject.kind);
        let reviewer = match policy.template {
            Template::SelfService => actor.role == Role::Moderator,
            Template::Bilateral => {
                Some(actor.role) == policy.counterpart_role
                    && subject.counterpart == Some(actor.user_id)
            }
        };
        if reviewer {
            Standing::Reviewer
        } else {
            Standing::Bystander
        }
    }

    pub fn check_transition(
        &self,
        actor: &Actor,
        subject: &Subject,
        to: DocumentStatus,
    ) -> Result<()> {
        transition::check_transition(
            self.get(subject.kind).withdraw,
            subject.status,
            to,
            self.standing(actor, subject),
        )
    }

    /// Full check for a status change: visibility, then the role's right to
    /// transition, then the state machine.
    pub fn authorize_transition(
        &self,
        actor: &Actor,
        subject: &Subject,
        to: DocumentStatus,
    ) -> Result<()> {
        self.authorize(actor, Verb::Read, subject)?;
        // Reviewers outside the pending window fail the state precondition,
        // reported by check_transition as IllegalTransition.
        if self.standing(actor, subject) != Standing::Reviewer {
            self.authorize(actor, Verb::TransitionStatus, subject)?;
        }
        self.check_transition(actor, subject, to)
    }

    pub fn visible_scope(&self, actor: &Actor, kind: DocumentKind) -> Scope {
        if actor.is_superuser {
            return Scope::All;
        }
        let policy = self.get(kind);
        match policy.template {
            Template::SelfService => {
                if actor.role == policy.owner_role {
                    if policy.approved_readers.contains(&actor.role) {
                        Scope::OwnedOrWithStatus(actor.user_id, DocumentStatus::Approved)
                    } else {
                        Scope::OwnedBy(actor.user_id)
                    }
                } else if actor.role == Role::Moderator {
                    Scope::WithStatus(DocumentStatus::Pending)
                } else if policy.approved_readers.contains(&actor.role) {
                    Scope::WithStatus(DocumentStatus::Approved)
                } else {
                    Scope::Nothing
                }
            }
            Template::Bilateral => {
                if actor.role == policy.owner_role {
                    Scope::OwnedBy(actor.user_id)
                } else if Some(actor.role) == policy.counterpart_role {
                    Scope::CounterpartOf(actor.user_id)
                } else {
                    Scope::Nothing
                }
            }
        }
    }
}

fn verb_label(verb: Verb) -> &'static str {
    match verb {
        Verb::Read => "read",
        Verb::Write => "modify",
        Verb::Delete => "delete",
        Verb::TransitionStatus => "change the status of",
        Verb::Message => "post messages on",
    }
}
