//! Integration tests for the issue repository.
//!
//! Exercises the repository layer against a real database:
//! - Creation with the atomic first history entry
//! - Lookup and detail reads
//! - List ordering and filter combinations
//! - Status changes, comments, and the append-only history order

use sqlx::SqlitePool;

use fixtrack_core::issue::{STATUS_CLOSED, STATUS_IN_PROGRESS, STATUS_REPORTED, STATUS_RESOLVED};
use fixtrack_db::models::issue::{CreateIssue, IssueFilter};
use fixtrack_db::repositories::IssueRepo;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_issue(title: &str) -> CreateIssue {
    CreateIssue {
        title: title.to_string(),
        location: "Building A".to_string(),
        category: "Plumbing".to_string(),
        urgency: "Normal".to_string(),
        description: "Something is broken".to_string(),
        contact: None,
        media_reference: None,
    }
}

fn filter_status(status: &str) -> IssueFilter {
    IssueFilter {
        status: Some(status.to_string()),
        ..Default::default()
    }
}

fn filter_q(q: &str) -> IssueFilter {
    IssueFilter {
        q: Some(q.to_string()),
        ..Default::default()
    }
}

// ---------------------------------------------------------------------------
// Test: Creation
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_create_sets_defaults_and_first_history_entry(pool: SqlitePool) {
    let input = CreateIssue {
        urgency: "High".to_string(),
        contact: Some("room 114".to_string()),
        ..new_issue("Burst pipe")
    };
    let issue = IssueRepo::create(&pool, &input).await.unwrap();

    assert_eq!(issue.title, "Burst pipe");
    assert_eq!(issue.status, STATUS_REPORTED);
    assert_eq!(issue.contact.as_deref(), Some("room 114"));
    assert_eq!(issue.media_reference, None);
    assert_eq!(issue.updated_at, issue.created_at);

    let history = IssueRepo::history(&pool, issue.id).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].issue_id, issue.id);
    assert_eq!(history[0].actor, "Reporter");
    assert_eq!(history[0].action, "Reported");
    // The creation entry's note carries the urgency.
    assert_eq!(history[0].note, "High");
    assert_eq!(history[0].created_at, issue.created_at);
}

#[sqlx::test]
async fn test_ids_are_assigned_sequentially(pool: SqlitePool) {
    let first = IssueRepo::create(&pool, &new_issue("First")).await.unwrap();
    let second = IssueRepo::create(&pool, &new_issue("Second")).await.unwrap();
    assert!(second.id > first.id);
}

// ---------------------------------------------------------------------------
// Test: Lookup
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_find_by_id_roundtrip(pool: SqlitePool) {
    let created = IssueRepo::create(&pool, &new_issue("Flickering light"))
        .await
        .unwrap();

    let found = IssueRepo::find_by_id(&pool, created.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, created.id);
    assert_eq!(found.title, "Flickering light");
    assert_eq!(found.created_at, created.created_at);
}

#[sqlx::test]
async fn test_find_by_id_unknown_is_none(pool: SqlitePool) {
    assert!(IssueRepo::find_by_id(&pool, 9999).await.unwrap().is_none());
}

#[sqlx::test]
async fn test_find_detail_includes_history(pool: SqlitePool) {
    let created = IssueRepo::create(&pool, &new_issue("Broken window"))
        .await
        .unwrap();
    IssueRepo::add_comment(&pool, created.id, "Admin", "glazier booked")
        .await
        .unwrap();

    let detail = IssueRepo::find_detail(&pool, created.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(detail.issue.id, created.id);
    assert_eq!(detail.history.len(), 2);
    assert_eq!(detail.history[0].action, "Reported");
    assert_eq!(detail.history[1].action, "Comment");
}

#[sqlx::test]
async fn test_find_detail_unknown_is_none(pool: SqlitePool) {
    assert!(IssueRepo::find_detail(&pool, 4242).await.unwrap().is_none());
}

// ---------------------------------------------------------------------------
// Test: Listing and filters
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_list_is_newest_first(pool: SqlitePool) {
    let a = IssueRepo::create(&pool, &new_issue("Oldest")).await.unwrap();
    let b = IssueRepo::create(&pool, &new_issue("Middle")).await.unwrap();
    let c = IssueRepo::create(&pool, &new_issue("Newest")).await.unwrap();

    let issues = IssueRepo::list(&pool, &IssueFilter::default()).await.unwrap();
    let ids: Vec<i64> = issues.iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![c.id, b.id, a.id]);
}

#[sqlx::test]
async fn test_list_filters_by_status(pool: SqlitePool) {
    let open = IssueRepo::create(&pool, &new_issue("Still open")).await.unwrap();
    let fixed = IssueRepo::create(&pool, &new_issue("Already fixed"))
        .await
        .unwrap();
    IssueRepo::update_status(&pool, fixed.id, STATUS_RESOLVED, "Admin", "")
        .await
        .unwrap();

    let resolved = IssueRepo::list(&pool, &filter_status(STATUS_RESOLVED))
        .await
        .unwrap();
    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved[0].id, fixed.id);

    let reported = IssueRepo::list(&pool, &filter_status(STATUS_REPORTED))
        .await
        .unwrap();
    assert_eq!(reported.len(), 1);
    assert_eq!(reported[0].id, open.id);
}

#[sqlx::test]
async fn test_list_filters_by_category(pool: SqlitePool) {
    IssueRepo::create(&pool, &new_issue("Pipe")).await.unwrap();
    let electrical = IssueRepo::create(
        &pool,
        &CreateIssue {
            category: "Electrical".to_string(),
            ..new_issue("Socket sparks")
        },
    )
    .await
    .unwrap();

    let filter = IssueFilter {
        category: Some("Electrical".to_string()),
        ..Default::default()
    };
    let issues = IssueRepo::list(&pool, &filter).await.unwrap();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].id, electrical.id);
}

#[sqlx::test]
async fn test_free_text_search_spans_fields_case_insensitively(pool: SqlitePool) {
    let by_title = IssueRepo::create(&pool, &new_issue("Leaking radiator"))
        .await
        .unwrap();
    let by_location = IssueRepo::create(
        &pool,
        &CreateIssue {
            location: "Radiator room".to_string(),
            ..new_issue("No heating")
        },
    )
    .await
    .unwrap();
    let by_description = IssueRepo::create(
        &pool,
        &CreateIssue {
            description: "the RADIATOR hisses".to_string(),
            ..new_issue("Strange noise")
        },
    )
    .await
    .unwrap();
    IssueRepo::create(&pool, &new_issue("Unrelated")).await.unwrap();

    let issues = IssueRepo::list(&pool, &filter_q("rAdIaToR")).await.unwrap();
    let mut ids: Vec<i64> = issues.iter().map(|i| i.id).collect();
    ids.sort();
    assert_eq!(ids, vec![by_title.id, by_location.id, by_description.id]);
}

#[sqlx::test]
async fn test_combined_filters_are_anded(pool: SqlitePool) {
    let match_all = IssueRepo::create(&pool, &new_issue("Leaky tap")).await.unwrap();
    // Same text, different category.
    IssueRepo::create(
        &pool,
        &CreateIssue {
            category: "IT".to_string(),
            ..new_issue("Leaky tap in server room")
        },
    )
    .await
    .unwrap();

    let filter = IssueFilter {
        status: Some(STATUS_REPORTED.to_string()),
        category: Some("Plumbing".to_string()),
        q: Some("leaky".to_string()),
    };
    let issues = IssueRepo::list(&pool, &filter).await.unwrap();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].id, match_all.id);
}

#[sqlx::test]
async fn test_empty_list_is_empty_vec(pool: SqlitePool) {
    let issues = IssueRepo::list(&pool, &IssueFilter::default()).await.unwrap();
    assert!(issues.is_empty());
}

// ---------------------------------------------------------------------------
// Test: Status changes
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_update_status_appends_transition_entry(pool: SqlitePool) {
    let created = IssueRepo::create(&pool, &new_issue("Jammed door"))
        .await
        .unwrap();

    let updated = IssueRepo::update_status(&pool, created.id, STATUS_RESOLVED, "Admin", "oiled")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.status, STATUS_RESOLVED);
    assert!(updated.updated_at >= created.created_at);

    let history = IssueRepo::history(&pool, created.id).await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[1].action, "Reported -> Resolved");
    assert_eq!(history[1].actor, "Admin");
    assert_eq!(history[1].note, "oiled");
    // The row's updated_at and the entry record the same instant.
    assert_eq!(updated.updated_at, history[1].created_at);
}

#[sqlx::test]
async fn test_update_status_unknown_id_is_none(pool: SqlitePool) {
    let result = IssueRepo::update_status(&pool, 777, STATUS_RESOLVED, "Admin", "")
        .await
        .unwrap();
    assert!(result.is_none());
}

#[sqlx::test]
async fn test_closed_issues_can_be_reopened(pool: SqlitePool) {
    let created = IssueRepo::create(&pool, &new_issue("Recurring leak"))
        .await
        .unwrap();

    IssueRepo::update_status(&pool, created.id, STATUS_CLOSED, "Admin", "")
        .await
        .unwrap();
    let reopened = IssueRepo::update_status(&pool, created.id, STATUS_IN_PROGRESS, "Admin", "back")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(reopened.status, STATUS_IN_PROGRESS);
    let history = IssueRepo::history(&pool, created.id).await.unwrap();
    assert_eq!(history[2].action, "Closed -> In Progress");
}

// ---------------------------------------------------------------------------
// Test: Comments
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_add_comment_leaves_status_untouched(pool: SqlitePool) {
    let created = IssueRepo::create(&pool, &new_issue("Wobbly shelf"))
        .await
        .unwrap();

    let updated = IssueRepo::add_comment(&pool, created.id, "Admin", "parts ordered")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.status, STATUS_REPORTED);
    assert!(updated.updated_at >= created.updated_at);

    let history = IssueRepo::history(&pool, created.id).await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[1].action, "Comment");
    assert_eq!(history[1].note, "parts ordered");
    assert_eq!(updated.updated_at, history[1].created_at);
}

#[sqlx::test]
async fn test_add_comment_unknown_id_is_none(pool: SqlitePool) {
    let result = IssueRepo::add_comment(&pool, 777, "Admin", "hello?").await.unwrap();
    assert!(result.is_none());
}

// ---------------------------------------------------------------------------
// Test: History order
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_history_preserves_append_order(pool: SqlitePool) {
    let created = IssueRepo::create(&pool, &new_issue("Noisy fan")).await.unwrap();

    IssueRepo::update_status(&pool, created.id, STATUS_IN_PROGRESS, "Admin", "")
        .await
        .unwrap();
    IssueRepo::add_comment(&pool, created.id, "Admin", "bearing replaced")
        .await
        .unwrap();
    IssueRepo::update_status(&pool, created.id, STATUS_RESOLVED, "Admin", "")
        .await
        .unwrap();

    let history = IssueRepo::history(&pool, created.id).await.unwrap();
    let actions: Vec<&str> = history.iter().map(|h| h.action.as_str()).collect();
    assert_eq!(
        actions,
        vec![
            "Reported",
            "Reported -> In Progress",
            "Comment",
            "In Progress -> Resolved",
        ]
    );

    // Append order and id order are the same thing.
    for pair in history.windows(2) {
        assert!(pair[0].id < pair[1].id);
        assert!(pair[0].created_at <= pair[1].created_at);
    }
}
