//! Repository for the `issues` and `issue_history` tables.
//!
//! Every mutation runs in one transaction whose first statement writes the
//! issue row. Under WAL that makes concurrent mutations queue on the writer
//! lock up front (the busy timeout absorbs the wait), so a transaction never
//! has to upgrade a read snapshot and each history append commits atomically
//! with its `updated_at` bump.

use sqlx::SqlitePool;

use fixtrack_core::issue::{
    transition_action, ACTION_COMMENT, ACTION_REPORTED, ACTOR_REPORTER, STATUS_REPORTED,
};
use fixtrack_core::types::DbId;

use crate::models::issue::{CreateIssue, HistoryEntry, Issue, IssueDetail, IssueFilter};

/// Column list for issues queries.
const COLUMNS: &str = "id, title, location, category, urgency, description, contact, \
    media_reference, status, created_at, updated_at";

/// Column list for issue_history queries.
const HISTORY_COLUMNS: &str = "id, issue_id, created_at, actor, action, note";

/// Provides create/list/mutation operations for issues. There is no delete:
/// issues and their history are permanent records.
pub struct IssueRepo;

impl IssueRepo {
    /// Create a new issue together with its first history entry
    /// (`Reporter` / `Reported`, note = the urgency), atomically.
    pub async fn create(pool: &SqlitePool, input: &CreateIssue) -> Result<Issue, sqlx::Error> {
        let now = chrono::Utc::now();
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO issues
                (title, location, category, urgency, description, contact,
                 media_reference, status, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING {COLUMNS}"
        );
        let issue = sqlx::query_as::<_, Issue>(&query)
            .bind(&input.title)
            .bind(&input.location)
            .bind(&input.category)
            .bind(&input.urgency)
            .bind(&input.description)
            .bind(&input.contact)
            .bind(&input.media_reference)
            .bind(STATUS_REPORTED)
            .bind(now)
            .bind(now)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query(
            "INSERT INTO issue_history (issue_id, created_at, actor, action, note)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(issue.id)
        .bind(now)
        .bind(ACTOR_REPORTER)
        .bind(ACTION_REPORTED)
        .bind(&input.urgency)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(issue)
    }

    /// Find an issue by its ID.
    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Issue>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM issues WHERE id = ?");
        sqlx::query_as::<_, Issue>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an issue with its full history, oldest entry first. Both reads
    /// happen in one transaction so they see a single snapshot.
    pub async fn find_detail(
        pool: &SqlitePool,
        id: DbId,
    ) -> Result<Option<IssueDetail>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!("SELECT {COLUMNS} FROM issues WHERE id = ?");
        let issue = match sqlx::query_as::<_, Issue>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        {
            Some(issue) => issue,
            None => return Ok(None),
        };

        let query = format!(
            "SELECT {HISTORY_COLUMNS} FROM issue_history WHERE issue_id = ? ORDER BY id ASC"
        );
        let history = sqlx::query_as::<_, HistoryEntry>(&query)
            .bind(id)
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(IssueDetail { issue, history }))
    }

    /// List issues newest-first with optional filters ANDed together.
    /// `q` matches title, description, or location case-insensitively.
    pub async fn list(pool: &SqlitePool, filter: &IssueFilter) -> Result<Vec<Issue>, sqlx::Error> {
        let mut conditions: Vec<&str> = Vec::new();

        if filter.status.is_some() {
            conditions.push("status = ?");
        }
        if filter.category.is_some() {
            conditions.push("category = ?");
        }
        if filter.q.is_some() {
            conditions.push(
                "(LOWER(title) LIKE ? OR LOWER(description) LIKE ? OR LOWER(location) LIKE ?)",
            );
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        // id is the tiebreak so same-second submissions keep a stable order.
        let query = format!(
            "SELECT {COLUMNS} FROM issues {where_clause} ORDER BY created_at DESC, id DESC"
        );

        let mut q = sqlx::query_as::<_, Issue>(&query);

        if let Some(status) = &filter.status {
            q = q.bind(status.clone());
        }
        if let Some(category) = &filter.category {
            q = q.bind(category.clone());
        }
        if let Some(term) = &filter.q {
            let pattern = format!("%{}%", term.to_lowercase());
            q = q.bind(pattern.clone()).bind(pattern.clone()).bind(pattern);
        }

        q.fetch_all(pool).await
    }

    /// Set a new status and append the `"<old> -> <new>"` history entry in
    /// one transaction. Returns the updated issue, `None` for an unknown id.
    ///
    /// Status *values* are validated by the caller; any recognized status
    /// may follow any other, so the repository records whatever transition
    /// it is given.
    pub async fn update_status(
        pool: &SqlitePool,
        id: DbId,
        new_status: &str,
        actor: &str,
        note: &str,
    ) -> Result<Option<Issue>, sqlx::Error> {
        let now = chrono::Utc::now();
        let mut tx = pool.begin().await?;

        // Claim the row and capture the status being replaced. This UPDATE
        // leaves the status column untouched, so RETURNING yields the old
        // value.
        let claimed: Option<(String,)> =
            sqlx::query_as("UPDATE issues SET updated_at = ? WHERE id = ? RETURNING status")
                .bind(now)
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;

        let old_status = match claimed {
            Some((status,)) => status,
            None => return Ok(None),
        };

        let query = format!("UPDATE issues SET status = ? WHERE id = ? RETURNING {COLUMNS}");
        let issue = sqlx::query_as::<_, Issue>(&query)
            .bind(new_status)
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query(
            "INSERT INTO issue_history (issue_id, created_at, actor, action, note)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(id)
        .bind(now)
        .bind(actor)
        .bind(transition_action(&old_status, new_status))
        .bind(note)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(issue))
    }

    /// Append a `Comment` history entry, refreshing `updated_at` but leaving
    /// the status untouched. Returns the updated issue, `None` for an
    /// unknown id.
    pub async fn add_comment(
        pool: &SqlitePool,
        id: DbId,
        actor: &str,
        comment: &str,
    ) -> Result<Option<Issue>, sqlx::Error> {
        let now = chrono::Utc::now();
        let mut tx = pool.begin().await?;

        let query = format!("UPDATE issues SET updated_at = ? WHERE id = ? RETURNING {COLUMNS}");
        let issue = match sqlx::query_as::<_, Issue>(&query)
            .bind(now)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        {
            Some(issue) => issue,
            None => return Ok(None),
        };

        sqlx::query(
            "INSERT INTO issue_history (issue_id, created_at, actor, action, note)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(id)
        .bind(now)
        .bind(actor)
        .bind(ACTION_COMMENT)
        .bind(comment)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(issue))
    }

    /// Full history for an issue, oldest entry first.
    pub async fn history(
        pool: &SqlitePool,
        issue_id: DbId,
    ) -> Result<Vec<HistoryEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {HISTORY_COLUMNS} FROM issue_history WHERE issue_id = ? ORDER BY id ASC"
        );
        sqlx::query_as::<_, HistoryEntry>(&query)
            .bind(issue_id)
            .fetch_all(pool)
            .await
    }
}
