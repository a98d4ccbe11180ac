mod common;

use common::{applicant, detail, detail_applicant, staff_match, summary_card, Harness};
use serde_json::json;
use shiftdesk_core::coordinator::{
    ButtonState, GroupStatus, HospitalMatches, SagaStage, ShiftManager, INVITE_LABELS,
};
use shiftdesk_core::coordinator::board::{NO_MATCHING_CANDIDATES, NO_OPEN_SHIFT};
use shiftdesk_core::protocol::status::ApplicationStatus;
use shiftdesk_core::session::Role;
use std::sync::Arc;

fn matches(h: &Harness) -> Arc<HospitalMatches> {
    Arc::new(HospitalMatches::new(
        h.dyn_api(),
        h.session.clone(),
        h.notifier.clone(),
        &h.config,
    ))
}

fn manager(h: &Harness) -> Arc<ShiftManager> {
    Arc::new(ShiftManager::new(
        h.dyn_api(),
        h.session.clone(),
        h.notifier.clone(),
        &h.config,
    ))
}

fn grouped() -> serde_json::Value {
    json!({
        "results": [
            {"department": "ICU", "job_id": 42, "results": [staff_match(7, "Ana", 93.0), staff_match(8, "Ben", 71.0)]},
            {"department": "Radiology", "job_id": 50, "results": []},
            {"department": "Emergency", "job_id": null, "results": []}
        ],
        "ai_meta": {"enabled": true, "applied": false, "fallback_reason": "timeout"}
    })
}

#[tokio::test]
async fn test_mount_loads_options_then_all_departments() {
    let h = Harness::hospital(1);
    h.api.reply(
        "meta_options",
        json!({"departments": [{"id": 1, "name": "ICU"}, {"id": 2, "name": "Radiology"}]}),
    );
    h.api.reply("department_recommendations:1/All/6", grouped());
    let m = matches(&h);

    assert!(m.mount().await);
    assert_eq!(
        h.api.labels(),
        vec!["meta_options 1", "department_recommendations 1/All/6"]
    );

    let view = m.view();
    assert_eq!(view.departments.len(), 2);
    assert!(view.has_any_results());
    let statuses: Vec<_> = view.groups.iter().map(|g| g.status()).collect();
    assert_eq!(
        statuses,
        vec![
            GroupStatus::Populated,
            GroupStatus::NoMatchingCandidates,
            GroupStatus::NoOpenShift
        ]
    );
    assert_eq!(view.groups[1].status().placeholder(), Some(NO_MATCHING_CANDIDATES));
    assert_eq!(view.groups[2].status().placeholder(), Some(NO_OPEN_SHIFT));
    assert_eq!(view.groups[0].rows[0].key().as_str(), "42-7");
}

#[tokio::test]
async fn test_invite_sends_null_actor_and_disables_only_that_row() {
    let h = Harness::hospital(1);
    h.api.reply("department_recommendations", grouped());
    h.api.reply("assign", json!({"id": 555, "message": "Assigned"}));
    h.api.hold("assign:42/7");
    let m = matches(&h);
    m.set_department("All").await;

    let task = tokio::spawn({
        let m = m.clone();
        async move { m.invite(42, 7).await }
    });
    h.api.wait_for("assign 42/7").await;
    assert_eq!(m.button(42, 7).label(&INVITE_LABELS), "Inviting...");
    assert_eq!(m.button(42, 8), ButtonState::Idle);

    h.api.release("assign:42/7");
    assert!(task.await.unwrap());
    assert_eq!(m.button(42, 7).label(&INVITE_LABELS), "Invited");
    assert_eq!(m.button(42, 8).label(&INVITE_LABELS), "Quick Invite");

    let body = h.api.calls().last().unwrap().body.clone().unwrap();
    // The hospital id is not a user account id.
    assert_eq!(body, json!({"staff_id": 7, "assigned_by_user_id": null}));
    assert_eq!(h.notifier.successes(), vec!["Staff invited successfully."]);
}

#[tokio::test]
async fn test_refilter_clears_invited_rows() {
    let h = Harness::hospital(1);
    h.api.reply("department_recommendations", grouped());
    h.api.reply("assign", json!({}));
    let m = matches(&h);

    assert!(m.invite(42, 7).await);
    assert_eq!(m.button(42, 7), ButtonState::Done);
    m.set_department("ICU").await;
    assert_eq!(m.button(42, 7), ButtonState::Idle);
}

#[tokio::test]
async fn test_failed_load_clears_groups() {
    let h = Harness::hospital(1);
    h.api.reply("department_recommendations", grouped());
    let m = matches(&h);
    m.set_department("All").await;

    h.api.fail("department_recommendations", 500, "");
    assert!(!m.set_department("ICU").await);
    let view = m.view();
    assert!(view.groups.is_empty());
    assert!(view.ai_meta.is_none());
    assert_eq!(h.notifier.errors(), vec!["Unable to load recommendations."]);
}

#[tokio::test]
async fn test_no_hospital_session_issues_zero_requests() {
    let h = Harness::new(Role::Hospital, None);
    let m = matches(&h);
    let s = manager(&h);

    assert!(!m.mount().await);
    assert!(!m.set_department("ICU").await);
    assert!(!s.load().await);
    assert!(h.api.calls().is_empty());
    assert_eq!(h.notifier.errors().len(), 3);
    assert!(h
        .notifier
        .errors()
        .iter()
        .all(|e| e == "Please login as hospital first."));
}

#[tokio::test]
async fn test_job_recommendations_form_one_group() {
    let h = Harness::hospital(1);
    h.api.reply(
        "job_recommendations:42/6",
        json!({"job_id": 42, "results": [staff_match(9, "Cy", 88.0)]}),
    );
    let m = matches(&h);

    assert!(m.load_for_job(42).await);
    let view = m.view();
    assert_eq!(view.groups.len(), 1);
    assert_eq!(view.groups[0].job_id(), Some(42));
    assert_eq!(view.groups[0].rows[0].subject_id, 9);
}

fn seed_manager(h: &Harness) {
    h.api.reply(
        "shift_summary",
        json!({"results": [summary_card(10, json!([applicant(7, 300, "APPLIED")]))]}),
    );
    h.api.reply(
        "shift_detail:10",
        detail(10, json!([]), json!([detail_applicant(7, 300, "APPLIED")])),
    );
}

#[tokio::test]
async fn test_load_prefers_detail_rows() {
    let h = Harness::hospital(1);
    seed_manager(&h);
    let s = manager(&h);

    assert!(s.load().await);
    assert_eq!(h.api.labels(), vec!["shift_summary 1", "shift_detail 10"]);
    let view = s.view();
    assert_eq!(view.current().unwrap().id, 10);
    let rows = view.applicant_rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].staff_id, Some(7));
    assert_eq!(rows[0].rating, None);
}

#[tokio::test]
async fn test_accept_decides_then_assigns_then_reloads() {
    let h = Harness::hospital(1);
    seed_manager(&h);
    h.api.reply("decide", json!({"status": "ACCEPTED"}));
    h.api.reply("assign", json!({"id": 1}));
    let s = manager(&h);
    s.load().await;

    assert!(s.accept(300).await);
    assert_eq!(
        h.api.labels(),
        vec![
            "shift_summary 1",
            "shift_detail 10",
            "decide 300",
            "assign 10/7",
            "shift_detail 10",
            "shift_summary 1"
        ]
    );
    let calls = h.api.calls();
    assert_eq!(calls[2].body, Some(json!({"status": "ACCEPTED", "note": ""})));
    assert_eq!(
        calls[3].body,
        Some(json!({"staff_id": 7, "assigned_by_user_id": null}))
    );
    let saga = s.view().last_accept.unwrap();
    assert_eq!(saga.stage(), SagaStage::Assigned);
    assert_eq!(h.notifier.successes(), vec!["Applicant accepted and assigned."]);
    assert_eq!(s.guard().processing(), None);
}

#[tokio::test]
async fn test_accept_with_failed_assign_is_not_compensated() {
    let h = Harness::hospital(1);
    seed_manager(&h);
    h.api.reply("decide", json!({"status": "ACCEPTED"}));
    h.api.fail("assign", 400, "Shift is already full.");
    let s = manager(&h);
    s.load().await;

    assert!(!s.accept(300).await);
    assert_eq!(h.notifier.errors(), vec!["Shift is already full."]);
    // No rollback decision and no automatic reload.
    assert_eq!(h.api.count("decide"), 1);
    assert_eq!(h.api.count("shift_detail"), 1);
    assert_eq!(
        s.view().last_accept.unwrap().stage(),
        SagaStage::DecidedUnassigned
    );

    // The server now has the application accepted but nobody assigned.
    h.api.reply(
        "shift_detail:10",
        detail(10, json!([]), json!([detail_applicant(7, 300, "ACCEPTED")])),
    );
    h.api.reply(
        "shift_summary",
        json!({"results": [summary_card(10, json!([]))]}),
    );
    assert!(s.load().await);
    let view = s.view();
    assert!(view.assigned_rows().is_empty());
    assert!(view
        .applicant_rows()
        .iter()
        .all(|a| a.status == ApplicationStatus::Accepted && !a.status.is_pending()));
}

#[tokio::test]
async fn test_accept_with_failed_decide_never_assigns() {
    let h = Harness::hospital(1);
    seed_manager(&h);
    h.api.fail("decide", 409, "Application already decided.");
    let s = manager(&h);
    s.load().await;

    assert!(!s.accept(300).await);
    assert_eq!(h.api.count("assign"), 0);
    assert_eq!(s.view().last_accept.unwrap().stage(), SagaStage::Pending);
    assert_eq!(h.notifier.errors(), vec!["Application already decided."]);
}

#[tokio::test]
async fn test_decline_reloads_both_views() {
    let h = Harness::hospital(1);
    seed_manager(&h);
    h.api.reply("decide", json!({"status": "REJECTED"}));
    let s = manager(&h);
    s.load().await;

    assert!(s.decline(300).await);
    assert_eq!(
        h.api.calls()[2].body,
        Some(json!({"status": "REJECTED", "note": ""}))
    );
    assert_eq!(h.api.count("shift_summary"), 2);
    assert_eq!(h.notifier.successes(), vec!["Application declined."]);
}

#[tokio::test]
async fn test_unknown_application_is_rejected_locally() {
    let h = Harness::hospital(1);
    seed_manager(&h);
    let s = manager(&h);
    s.load().await;

    assert!(!s.decline(999).await);
    assert_eq!(h.api.count("decide"), 0);
    assert_eq!(
        h.notifier.errors(),
        vec!["Application 999 is not on the selected shift."]
    );
}

#[tokio::test]
async fn test_select_refuses_unknown_shift() {
    let h = Harness::hospital(1);
    seed_manager(&h);
    let s = manager(&h);
    s.load().await;

    assert!(!s.select(99).await);
    assert_eq!(h.notifier.errors(), vec!["Shift 99 is not among your shifts."]);
    assert_eq!(h.api.count("shift_detail"), 1);
    let view = s.view();
    assert_eq!(view.selected, Some(10));
    assert_eq!(view.current().unwrap().id, 10);
}
