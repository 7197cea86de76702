mod common;

use common::*;
use recruiting_backend::{
    dto::{document_dto::MessagePayload, response_dto::ResponsePayload},
    engine::{PolicyTable, WithdrawRule},
    error::Error,
    models::{
        cv::Cv,
        document::{DocumentKind, DocumentRef, Listed, ListingKind, ResponseKind},
        status::DocumentStatus,
        user::{Actor, Role},
    },
    services::favorite_service::FavoriteListing,
};
use uuid::Uuid;

fn pair(cv_id: Uuid, vacancy_id: Uuid) -> ResponsePayload {
    ResponsePayload { cv_id, vacancy_id }
}

fn message(content: &str) -> MessagePayload {
    MessagePayload {
        content: content.to_string(),
    }
}

#[tokio::test]
async fn cv_review_cycle_controls_employer_visibility() {
    let state = state();
    let employee = employee(&state).await;
    let employer = employer(&state).await;
    let moderator = moderator();

    let cv = state.cv_service.create(&employee, cv_payload("Backend CV")).await.unwrap();
    let doc = DocumentRef::new(DocumentKind::Cv, cv.meta.id);
    let employer_sees = |list: Vec<Listed<Cv>>| list.iter().any(|l| l.item.meta.id == cv.meta.id);
    assert!(!employer_sees(state.cv_service.list(&employer).await.unwrap()));
    assert!(matches!(
        state.cv_service.get(&employer, cv.meta.id).await,
        Err(Error::NotFound(_))
    ));

    state.document_service.change_status(&employee, doc, status("p")).await.unwrap();
    assert!(!employer_sees(state.cv_service.list(&employer).await.unwrap()));

    let meta = state
        .document_service
        .change_status(&moderator, doc, status_with_info("r", "missing experience"))
        .await
        .unwrap();
    assert_eq!(meta.status, DocumentStatus::Rejected);
    assert_eq!(meta.status_info, "missing experience");
    assert_eq!(meta.updated_by, moderator.user_id);
    assert!(!employer_sees(state.cv_service.list(&employer).await.unwrap()));

    state.document_service.change_status(&employee, doc, status("pending")).await.unwrap();
    assert!(!employer_sees(state.cv_service.list(&employer).await.unwrap()));

    state.document_service.change_status(&moderator, doc, status("approved")).await.unwrap();
    assert!(employer_sees(state.cv_service.list(&employer).await.unwrap()));
    let seen = state.cv_service.get(&employer, cv.meta.id).await.unwrap();
    assert_eq!(seen.item.meta.status, DocumentStatus::Approved);
    assert!(!seen.is_favorite);

    // The employer offers one of their own approved vacancies to the CV holder.
    let vacancy = approved_vacancy(&state, &employer).await;
    let response = state
        .response_service
        .create(&employer, ResponseKind::Cv, pair(cv.meta.id, vacancy.meta.id))
        .await
        .unwrap();
    assert_eq!(response.meta.status, DocumentStatus::Draft);
    assert_eq!(response.meta.owner_id, employer.user_id);
    assert_eq!(response.counterpart_id(), employee.user_id);
}

#[tokio::test]
async fn vacancy_review_cycle_and_employee_response() {
    let state = state();
    let employee = employee(&state).await;
    let employer = employer(&state).await;

    let vacancy = state
        .vacancy_service
        .create(&employer, vacancy_payload("Night dispatcher"))
        .await
        .unwrap();
    let doc = DocumentRef::new(DocumentKind::Vacancy, vacancy.meta.id);
    state.document_service.change_status(&employer, doc, status("pending")).await.unwrap();

    // A pending vacancy is invisible to employees, so a write reads as missing.
    let err = state
        .vacancy_service
        .update(&employee, vacancy.meta.id, vacancy_payload("Hijacked"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));

    // The owner may not edit while the vacancy is under review.
    let err = state
        .vacancy_service
        .update(&employer, vacancy.meta.id, vacancy_payload("Renamed"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Forbidden(_)));

    state.document_service.change_status(&moderator(), doc, status("a")).await.unwrap();

    // Approved and visible, the employee still has no write right.
    let err = state
        .vacancy_service
        .update(&employee, vacancy.meta.id, vacancy_payload("Hijacked"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Forbidden(_)));

    let cv = approved_cv(&state, &employee).await;
    let response = state
        .response_service
        .create(&employee, ResponseKind::Vacancy, pair(cv.meta.id, vacancy.meta.id))
        .await
        .unwrap();
    assert_eq!(response.counterpart_id(), employer.user_id);

    let err = state
        .response_service
        .create(&employee, ResponseKind::Vacancy, pair(cv.meta.id, vacancy.meta.id))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Conflict(_)));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn opposite_decisions_race_to_a_single_winner() {
    let state = state();
    let employee = employee(&state).await;
    let cv = state.cv_service.create(&employee, cv_payload("Backend CV")).await.unwrap();
    let doc = DocumentRef::new(DocumentKind::Cv, cv.meta.id);
    state.document_service.change_status(&employee, doc, status("pending")).await.unwrap();

    let handles: Vec<_> = ["approved", "rejected"]
        .into_iter()
        .map(|decision| {
            let state = state.clone();
            tokio::spawn(async move {
                state
                    .document_service
                    .change_status(&moderator(), doc, status(decision))
                    .await
            })
        })
        .collect();

    let mut won = 0;
    let mut lost = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => won += 1,
            Err(Error::IllegalTransition { .. }) => lost += 1,
            Err(other) => panic!("unexpected error: {other}"),
        }
    }
    assert_eq!((won, lost), (1, 1));

    let settled = state.cv_service.get(&employee, cv.meta.id).await.unwrap();
    assert!(matches!(
        settled.item.meta.status,
        DocumentStatus::Approved | DocumentStatus::Rejected
    ));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn concurrent_duplicate_responses_conflict() {
    let state = state();
    let employee = employee(&state).await;
    let employer = employer(&state).await;
    let cv = approved_cv(&state, &employee).await;
    let vacancy = approved_vacancy(&state, &employer).await;

    let handles: Vec<_> = (0..2)
        .map(|_| {
            let state = state.clone();
            let payload = pair(cv.meta.id, vacancy.meta.id);
            tokio::spawn(async move {
                state
                    .response_service
                    .create(&employee, ResponseKind::Vacancy, payload)
                    .await
            })
        })
        .collect();

    let mut created = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => created += 1,
            Err(Error::Conflict(_)) => conflicts += 1,
            Err(other) => panic!("unexpected error: {other}"),
        }
    }
    assert_eq!((created, conflicts), (1, 1));
    assert_eq!(
        state.response_service.list(&employee, ResponseKind::Vacancy).await.unwrap().len(),
        1
    );
}

#[tokio::test]
async fn responses_require_own_approved_listing() {
    let state = state();
    let employee = employee(&state).await;
    let employer = employer(&state).await;
    let rival = employer_with_vacancy(&state).await;
    let cv = approved_cv(&state, &employee).await;

    // Someone else's approved vacancy.
    let err = state
        .response_service
        .create(&employer, ResponseKind::Cv, pair(cv.meta.id, rival))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation { ref field, .. } if field == "vacancy"));

    // Own vacancy that is still a draft.
    let draft = state
        .vacancy_service
        .create(&employer, vacancy_payload("Draft only"))
        .await
        .unwrap();
    let err = state
        .response_service
        .create(&employer, ResponseKind::Cv, pair(cv.meta.id, draft.meta.id))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation { ref field, .. } if field == "vacancy"));

    // Employees cannot initiate a CV response at all.
    let err = state
        .response_service
        .create(&employee, ResponseKind::Cv, pair(cv.meta.id, rival))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Forbidden(_)));

    // A CV that has not been approved cannot be applied with.
    let fresh = state.cv_service.create(&employee, cv_payload("Second CV")).await.unwrap();
    let err = state
        .response_service
        .create(&employee, ResponseKind::Vacancy, pair(fresh.meta.id, rival))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation { ref field, .. } if field == "cv"));
}

async fn employer_with_vacancy(state: &recruiting_backend::AppState) -> Uuid {
    let owner = employer(state).await;
    approved_vacancy(state, &owner).await.meta.id
}

#[tokio::test]
async fn message_thread_follows_response_status() {
    let state = state();
    let employee = employee(&state).await;
    let employer = employer(&state).await;
    let cv = approved_cv(&state, &employee).await;
    let vacancy = approved_vacancy(&state, &employer).await;

    let response = state
        .response_service
        .create(&employee, ResponseKind::Vacancy, pair(cv.meta.id, vacancy.meta.id))
        .await
        .unwrap();
    let doc = DocumentRef::new(ResponseKind::Vacancy, response.meta.id);
    let id = response.meta.id;

    // Draft: the counterpart cannot see it, the initiator cannot post yet.
    let err = state
        .response_service
        .append_message(&employer, ResponseKind::Vacancy, id, message("hello"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
    let err = state
        .response_service
        .append_message(&employee, ResponseKind::Vacancy, id, message("hello"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Forbidden(_)));

    state.document_service.change_status(&employee, doc, status("pending")).await.unwrap();

    // The initiator cannot settle their own response.
    let err = state
        .document_service
        .change_status(&employee, doc, status("approved"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::IllegalTransition { .. }));

    let err = state
        .response_service
        .append_message(&employer, ResponseKind::Vacancy, id, message("hello"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Forbidden(_)));

    state.document_service.change_status(&employer, doc, status("approved")).await.unwrap();

    state
        .response_service
        .append_message(&employee, ResponseKind::Vacancy, id, message("first"))
        .await
        .unwrap();
    state
        .response_service
        .append_message(&employer, ResponseKind::Vacancy, id, message("second"))
        .await
        .unwrap();

    let outsider = Actor::new(Uuid::new_v4(), Role::Employer);
    let err = state
        .response_service
        .append_message(&outsider, ResponseKind::Vacancy, id, message("spam"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));

    let admin = Actor::superuser(Uuid::new_v4(), Role::Moderator);
    let err = state
        .response_service
        .append_message(&admin, ResponseKind::Vacancy, id, message("audit"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Forbidden(_)));

    let thread = state
        .response_service
        .messages(&employer, ResponseKind::Vacancy, id)
        .await
        .unwrap();
    let contents: Vec<_> = thread.iter().map(|m| m.content.as_str()).collect();
    assert_eq!(contents, ["first", "second"]);
    assert_eq!(thread[0].sender_id, employee.user_id);

    // Withdrawing closes the thread again.
    state.document_service.change_status(&employee, doc, status("draft")).await.unwrap();
    let err = state
        .response_service
        .append_message(&employee, ResponseKind::Vacancy, id, message("third"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Forbidden(_)));
}

#[tokio::test]
async fn initiator_can_repoint_a_response() {
    let state = state();
    let employee = employee(&state).await;
    let employer = employer(&state).await;
    let cv = approved_cv(&state, &employee).await;
    let first = approved_vacancy(&state, &employer).await;
    let second = approved_vacancy(&state, &employer).await;

    let a = state
        .response_service
        .create(&employee, ResponseKind::Vacancy, pair(cv.meta.id, first.meta.id))
        .await
        .unwrap();
    let b = state
        .response_service
        .create(&employee, ResponseKind::Vacancy, pair(cv.meta.id, second.meta.id))
        .await
        .unwrap();

    let err = state
        .response_service
        .update(&employee, ResponseKind::Vacancy, b.meta.id, pair(cv.meta.id, first.meta.id))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Conflict(_)));

    state
        .document_service
        .delete(&employee, DocumentRef::new(ResponseKind::Vacancy, a.meta.id))
        .await
        .unwrap();
    let moved = state
        .response_service
        .update(&employee, ResponseKind::Vacancy, b.meta.id, pair(cv.meta.id, first.meta.id))
        .await
        .unwrap();
    assert_eq!(moved.vacancy_id, first.meta.id);
    assert_eq!(moved.meta.status, DocumentStatus::Draft);
}

#[tokio::test]
async fn repointing_to_another_counterpart_resets_approval() {
    let state = state();
    let employer = employer(&state).await;
    let first_holder = employee(&state).await;
    let second_holder = employee(&state).await;
    let vacancy = approved_vacancy(&state, &employer).await;
    let first_cv = approved_cv(&state, &first_holder).await;
    let second_cv = approved_cv(&state, &second_holder).await;

    let offer = state
        .response_service
        .create(&employer, ResponseKind::Cv, pair(first_cv.meta.id, vacancy.meta.id))
        .await
        .unwrap();
    let doc = DocumentRef::new(ResponseKind::Cv, offer.meta.id);
    state.document_service.change_status(&employer, doc, status("pending")).await.unwrap();
    state
        .document_service
        .change_status(&first_holder, doc, status_with_info("approved", "see you monday"))
        .await
        .unwrap();

    let moved = state
        .response_service
        .update(&employer, ResponseKind::Cv, offer.meta.id, pair(second_cv.meta.id, vacancy.meta.id))
        .await
        .unwrap();
    assert_eq!(moved.cv_id, second_cv.meta.id);
    assert_eq!(moved.meta.status, DocumentStatus::Draft);
    assert!(moved.meta.status_info.is_empty());

    let err = state
        .response_service
        .append_message(&employer, ResponseKind::Cv, offer.meta.id, message("Welcome aboard"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Forbidden(_)));

    // Drafts stay hidden from the new counterpart until submitted.
    assert!(matches!(
        state.response_service.get(&second_holder, ResponseKind::Cv, offer.meta.id).await,
        Err(Error::NotFound(_))
    ));
    assert!(matches!(
        state.response_service.get(&first_holder, ResponseKind::Cv, offer.meta.id).await,
        Err(Error::NotFound(_))
    ));

    state.document_service.change_status(&employer, doc, status("pending")).await.unwrap();
    let err = state
        .document_service
        .change_status(&first_holder, doc, status("approved"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
    let meta = state
        .document_service
        .change_status(&second_holder, doc, status("approved"))
        .await
        .unwrap();
    assert_eq!(meta.status, DocumentStatus::Approved);
}

#[tokio::test]
async fn favorites_follow_read_access() {
    let state = state();
    let employee = employee(&state).await;
    let employer = employer(&state).await;
    let cv = approved_cv(&state, &employee).await;

    assert!(state.favorite_service.add(&employer, ListingKind::Cv, cv.meta.id).await.unwrap());
    assert!(!state.favorite_service.add(&employer, ListingKind::Cv, cv.meta.id).await.unwrap());
    assert!(state.cv_service.get(&employer, cv.meta.id).await.unwrap().is_favorite);

    match state.favorite_service.list(&employer, ListingKind::Cv).await.unwrap() {
        FavoriteListing::Cvs(items) => {
            assert_eq!(items.len(), 1);
            assert!(items[0].is_favorite);
        }
        _ => panic!("expected a CV listing"),
    }

    // Favorited CVs drop out once they leave the approved state.
    state
        .document_service
        .change_status(&employee, DocumentRef::new(DocumentKind::Cv, cv.meta.id), status("draft"))
        .await
        .unwrap();
    match state.favorite_service.list(&employer, ListingKind::Cv).await.unwrap() {
        FavoriteListing::Cvs(items) => assert!(items.is_empty()),
        _ => panic!("expected a CV listing"),
    }

    // A draft CV cannot be favorited by someone who cannot read it.
    let err = state
        .favorite_service
        .add(&employer, ListingKind::Cv, cv.meta.id)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));

    assert!(state.favorite_service.ids(&employer, ListingKind::Cv).await.unwrap().contains(&cv.meta.id));
    let err = state
        .favorite_service
        .remove(&employer, ListingKind::Cv, cv.meta.id)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));

    assert!(state.favorite_service.remove(&employee, ListingKind::Cv, cv.meta.id).await.is_ok());
}

#[tokio::test]
async fn withdraw_rule_is_configurable() {
    let anytime = state();
    let owner = employee(&anytime).await;
    let cv = approved_cv(&anytime, &owner).await;
    let doc = DocumentRef::new(DocumentKind::Cv, cv.meta.id);
    anytime.document_service.change_status(&owner, doc, status("draft")).await.unwrap();

    let strict = state_with_policy(PolicyTable::default().with_self_service_withdraw(WithdrawRule::FromRejected));
    let owner = employee(&strict).await;
    let cv = approved_cv(&strict, &owner).await;
    let doc = DocumentRef::new(DocumentKind::Cv, cv.meta.id);
    let err = strict
        .document_service
        .change_status(&owner, doc, status("draft"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::IllegalTransition {
            from: DocumentStatus::Approved,
            to: DocumentStatus::Draft
        }
    ));

    // Responses keep their own rule.
    let employer = employer(&strict).await;
    let vacancy = approved_vacancy(&strict, &employer).await;
    let response = strict
        .response_service
        .create(&owner, ResponseKind::Vacancy, pair(cv.meta.id, vacancy.meta.id))
        .await
        .unwrap();
    let doc = DocumentRef::new(ResponseKind::Vacancy, response.meta.id);
    strict.document_service.change_status(&owner, doc, status("pending")).await.unwrap();
    strict.document_service.change_status(&owner, doc, status("draft")).await.unwrap();
}

#[tokio::test]
async fn approved_listings_are_locked_for_owner_edits_and_deletes() {
    let state = state();
    let employer = employer(&state).await;
    let employee = employee(&state).await;
    let vacancy = approved_vacancy(&state, &employer).await;
    let cv = approved_cv(&state, &employee).await;
    let doc = DocumentRef::new(DocumentKind::Vacancy, vacancy.meta.id);

    let response = state
        .response_service
        .create(&employee, ResponseKind::Vacancy, pair(cv.meta.id, vacancy.meta.id))
        .await
        .unwrap();

    let err = state.document_service.delete(&employer, doc).await.unwrap_err();
    assert!(matches!(err, Error::Forbidden(_)));

    state.document_service.change_status(&employer, doc, status("draft")).await.unwrap();
    let edited = state
        .vacancy_service
        .update(&employer, vacancy.meta.id, vacancy_payload("Day dispatcher"))
        .await
        .unwrap();
    assert_eq!(edited.title, "Day dispatcher");
    assert_eq!(edited.meta.status, DocumentStatus::Draft);

    state.document_service.delete(&employer, doc).await.unwrap();
    let err = state
        .response_service
        .get(&employee, ResponseKind::Vacancy, response.meta.id)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

#[tokio::test]
async fn profiles_are_one_per_user_and_dated_in_the_past() {
    let state = state();
    let user = Actor::new(Uuid::new_v4(), Role::Employee);

    let err = state.cv_service.create(&user, cv_payload("No profile")).await.unwrap_err();
    assert!(matches!(err, Error::Validation { ref field, .. } if field == "employee"));

    let mut payload = employee_profile("Too old");
    payload.birthday = date(1900, 1, 1);
    let err = state.profile_service.create_employee(&user, payload).await.unwrap_err();
    assert!(matches!(err, Error::Validation { ref field, ref reason } if field == "birthday" && reason == "Incorrect date"));

    state
        .profile_service
        .create_employee(&user, employee_profile("Nigora"))
        .await
        .unwrap();
    let err = state
        .profile_service
        .create_employee(&user, employee_profile("Again"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Conflict(_)));

    let employer = Actor::new(Uuid::new_v4(), Role::Employer);
    let err = state
        .profile_service
        .create_employee(&employer, employee_profile("Wrong role"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Forbidden(_)));

    let err = state
        .vacancy_service
        .create(&employer, vacancy_payload("No profile"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation { ref field, .. } if field == "employer"));
}

#[tokio::test]
async fn public_directory_shows_only_approved_employers() {
    let state = state();
    let owner = employer(&state).await;
    let profile = state.profile_service.own_employer(&owner).await.unwrap();

    assert!(state.profile_service.public_employers().await.unwrap().is_empty());
    assert!(matches!(
        state.profile_service.public_employer(profile.meta.id).await,
        Err(Error::NotFound(_))
    ));

    publish(
        &state,
        &owner,
        &moderator(),
        DocumentRef::new(DocumentKind::Employer, profile.meta.id),
    )
    .await;
    let listed = state.profile_service.public_employers().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].meta.id, profile.meta.id);
}

#[tokio::test]
async fn employers_list_and_favorite_approved_companies() {
    let state = state();
    let owner = employer(&state).await;
    let peer = employer(&state).await;
    let company = state.profile_service.own_employer(&owner).await.unwrap();
    let own = state.profile_service.own_employer(&peer).await.unwrap();

    let listed_ids = |list: Vec<Listed<recruiting_backend::models::employer::Employer>>| {
        list.into_iter().map(|l| l.item.meta.id).collect::<Vec<_>>()
    };
    assert_eq!(
        listed_ids(state.profile_service.list_employers(&peer).await.unwrap()),
        vec![own.meta.id]
    );

    publish(
        &state,
        &owner,
        &moderator(),
        DocumentRef::new(DocumentKind::Employer, company.meta.id),
    )
    .await;
    let mut listed = listed_ids(state.profile_service.list_employers(&peer).await.unwrap());
    listed.sort();
    let mut expected = vec![own.meta.id, company.meta.id];
    expected.sort();
    assert_eq!(listed, expected);

    assert!(state
        .favorite_service
        .add(&peer, ListingKind::Employer, company.meta.id)
        .await
        .unwrap());
    match state.favorite_service.list(&peer, ListingKind::Employer).await.unwrap() {
        FavoriteListing::Employers(items) => {
            assert_eq!(items.len(), 1);
            assert_eq!(items[0].item.meta.id, company.meta.id);
            assert!(items[0].is_favorite);
        }
        _ => panic!("expected an employer listing"),
    }
}

#[tokio::test]
async fn profile_emails_stay_unique_across_updates() {
    let state = state();
    let first = employee(&state).await;
    let second = employee(&state).await;
    let taken = state.profile_service.own_employee(&first).await.unwrap().email;

    let mut payload = employee_profile("Nigora");
    payload.email = taken.clone();
    let err = state
        .profile_service
        .update_employee(&second, payload)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Conflict(ref reason) if reason.contains("email")));
    assert_ne!(state.profile_service.own_employee(&second).await.unwrap().email, taken);

    // Keeping one's own address is not a clash.
    let mut payload = employee_profile("Nigora R.");
    payload.email = taken.clone();
    let updated = state.profile_service.update_employee(&first, payload).await.unwrap();
    assert_eq!(updated.name, "Nigora R.");

    let newcomer = Actor::new(Uuid::new_v4(), Role::Employee);
    let mut payload = employee_profile("Dilnoza");
    payload.email = taken;
    let err = state
        .profile_service
        .create_employee(&newcomer, payload)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Conflict(ref reason) if reason.contains("email")));
}
