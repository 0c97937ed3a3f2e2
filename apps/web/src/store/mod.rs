//! Remote data client: typed row operations against the hosted relational backend.
//!
//! Rows cross this boundary as `serde_json::Value`; the `data` module owns the
//! mapping into model types. Nothing here retries.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::models::learner::AuthUser;

#[cfg(test)]
pub mod memory;
pub mod postgrest;

pub use postgrest::PostgrestStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Store error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("No row returned from {0}")]
    NoRow(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Courses,
    Modules,
    Lessons,
    Quizzes,
    QuizQuestions,
    Profiles,
    Enrollments,
    Progress,
    Events,
    SandboxStates,
    WorksheetNotes,
    ChatThreads,
    ChatMessages,
}

impl Table {
    pub fn as_str(&self) -> &'static str {
        match self {
            Table::Courses => "courses",
            Table::Modules => "modules",
            Table::Lessons => "lessons",
            Table::Quizzes => "quizzes",
            Table::QuizQuestions => "quiz_questions",
            Table::Profiles => "profiles",
            Table::Enrollments => "enrollments",
            Table::Progress => "progress",
            Table::Events => "events",
            Table::SandboxStates => "sandbox_states",
            Table::WorksheetNotes => "worksheet_notes",
            Table::ChatThreads => "chat_threads",
            Table::ChatMessages => "chat_messages",
        }
    }
}

/// A row read: column list (PostgREST embeds allowed), equality filters,
/// one ordering column and an optional limit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectQuery {
    columns: Option<String>,
    filters: Vec<(String, String)>,
    order: Option<(String, bool)>,
    limit: Option<usize>,
}

impl SelectQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn columns(mut self, columns: &str) -> Self {
        self.columns = Some(columns.to_string());
        self
    }

    pub fn eq(mut self, column: &str, value: impl ToString) -> Self {
        self.filters.push((column.to_string(), value.to_string()));
        self
    }

    pub fn order(mut self, column: &str, ascending: bool) -> Self {
        self.order = Some((column.to_string(), ascending));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn filters(&self) -> &[(String, String)] {
        &self.filters
    }

    pub fn ordering(&self) -> Option<(&str, bool)> {
        self.order.as_ref().map(|(c, asc)| (c.as_str(), *asc))
    }

    pub fn row_limit(&self) -> Option<usize> {
        self.limit
    }

    /// Renders the query as PostgREST query-string parameters.
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![(
            "select".to_string(),
            self.columns.clone().unwrap_or_else(|| "*".to_string()),
        )];
        for (column, value) in self.filters() {
            params.push((column.clone(), format!("eq.{value}")));
        }
        if let Some((column, ascending)) = self.ordering() {
            let dir = if ascending { "asc" } else { "desc" };
            params.push(("order".to_string(), format!("{column}.{dir}")));
        }
        if let Some(limit) = self.row_limit() {
            params.push(("limit".to_string(), limit.to_string()));
        }
        params
    }
}

/// The remote store seam. `PostgrestStore` talks HTTP; tests use `memory::MemoryStore`.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    async fn select(&self, table: Table, query: &SelectQuery) -> Result<Vec<Value>, StoreError>;

    async fn insert(&self, table: Table, row: Value) -> Result<Vec<Value>, StoreError>;

    /// Insert-or-update keyed on the `on_conflict` columns.
    async fn upsert(
        &self,
        table: Table,
        row: Value,
        on_conflict: &[&str],
    ) -> Result<Vec<Value>, StoreError>;

    /// Resolves an access token to the signed-in user. `None` when the token is rejected.
    async fn current_user(&self, access_token: &str) -> Result<Option<AuthUser>, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_query_params() {
        let query = SelectQuery::new()
            .columns("*,modules(*,lessons(*))")
            .eq("slug", "vibe-coding")
            .order("id", true)
            .limit(1);

        assert_eq!(
            query.to_params(),
            vec![
                ("select".to_string(), "*,modules(*,lessons(*))".to_string()),
                ("slug".to_string(), "eq.vibe-coding".to_string()),
                ("order".to_string(), "id.asc".to_string()),
                ("limit".to_string(), "1".to_string()),
            ]
        );
    }

    #[test]
    fn test_select_query_defaults_to_all_columns() {
        let query = SelectQuery::new().order("created_at", false);
        assert_eq!(
            query.to_params(),
            vec![
                ("select".to_string(), "*".to_string()),
                ("order".to_string(), "created_at.desc".to_string()),
            ]
        );
    }

    #[test]
    fn test_table_names() {
        assert_eq!(Table::QuizQuestions.as_str(), "quiz_questions");
        assert_eq!(Table::SandboxStates.as_str(), "sandbox_states");
        assert_eq!(Table::ChatMessages.as_str(), "chat_messages");
    }
}
