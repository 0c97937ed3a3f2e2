//! In-process `RemoteStore` for tests: eq filters, ordering, limits, and
//! upserts keyed on the conflict columns, plus latency and failure injection.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{json, Value};
use uuid::Uuid;

use super::{RemoteStore, SelectQuery, StoreError, Table};
use crate::models::learner::AuthUser;

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<HashMap<Table, Vec<Value>>>,
    latency: Mutex<HashMap<String, Duration>>,
    failing: Mutex<HashSet<Table>>,
    tokens: Mutex<HashMap<String, AuthUser>>,
    next_id: AtomicI64,
    selects: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, table: Table, rows: Vec<Value>) {
        self.tables
            .lock()
            .unwrap()
            .entry(table)
            .or_default()
            .extend(rows);
    }

    pub fn rows(&self, table: Table) -> Vec<Value> {
        self.tables
            .lock()
            .unwrap()
            .get(&table)
            .cloned()
            .unwrap_or_default()
    }

    /// Delays any select whose eq filters mention `value`.
    pub fn delay_for(&self, value: &str, delay: Duration) {
        self.latency.lock().unwrap().insert(value.to_string(), delay);
    }

    pub fn fail_table(&self, table: Table) {
        self.failing.lock().unwrap().insert(table);
    }

    pub fn heal_table(&self, table: Table) {
        self.failing.lock().unwrap().remove(&table);
    }

    pub fn register_token(&self, token: &str, user: AuthUser) {
        self.tokens.lock().unwrap().insert(token.to_string(), user);
    }

    pub fn select_count(&self) -> usize {
        self.selects.load(Ordering::SeqCst)
    }

    fn check_failing(&self, table: Table) -> Result<(), StoreError> {
        if self.failing.lock().unwrap().contains(&table) {
            return Err(StoreError::Api {
                status: 503,
                message: format!("{} is unavailable", table.as_str()),
            });
        }
        Ok(())
    }

    fn stamp(&self, table: Table, mut row: Value) -> Value {
        let now = json!(Utc::now());
        if let Some(obj) = row.as_object_mut() {
            if !obj.contains_key("id") && table != Table::Progress {
                let id = if table == Table::ChatThreads {
                    json!(Uuid::new_v4())
                } else {
                    json!(self.next_id.fetch_add(1, Ordering::SeqCst) + 1)
                };
                obj.insert("id".to_string(), id);
            }
            obj.entry("created_at").or_insert(now.clone());
            obj.insert("updated_at".to_string(), now);
        }
        row
    }
}

fn cell(row: &Value, column: &str) -> String {
    match row.get(column) {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

fn matches(row: &Value, filters: &[(String, String)]) -> bool {
    filters.iter().all(|(column, value)| cell(row, column) == *value)
}

#[async_trait]
impl RemoteStore for MemoryStore {
    async fn select(&self, table: Table, query: &SelectQuery) -> Result<Vec<Value>, StoreError> {
        self.selects.fetch_add(1, Ordering::SeqCst);

        let delay = {
            let latency = self.latency.lock().unwrap();
            query
                .filters()
                .iter()
                .find_map(|(_, value)| latency.get(value).copied())
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        self.check_failing(table)?;

        let mut rows: Vec<Value> = self
            .rows(table)
            .into_iter()
            .filter(|row| matches(row, query.filters()))
            .collect();

        if let Some((column, ascending)) = query.ordering() {
            rows.sort_by(|a, b| {
                let ord = match (a.get(column).and_then(Value::as_i64), b.get(column).and_then(Value::as_i64)) {
                    (Some(x), Some(y)) => x.cmp(&y),
                    _ => cell(a, column).cmp(&cell(b, column)),
                };
                if ascending {
                    ord
                } else {
                    ord.reverse()
                }
            });
        }
        if let Some(limit) = query.row_limit() {
            rows.truncate(limit);
        }
        Ok(rows)
    }

    async fn insert(&self, table: Table, row: Value) -> Result<Vec<Value>, StoreError> {
        self.check_failing(table)?;
        let row = self.stamp(table, row);
        self.tables
            .lock()
            .unwrap()
            .entry(table)
            .or_default()
            .push(row.clone());
        Ok(vec![row])
    }

    async fn upsert(
        &self,
        table: Table,
        row: Value,
        on_conflict: &[&str],
    ) -> Result<Vec<Value>, StoreError> {
        self.check_failing(table)?;

        let key: Vec<(String, String)> = on_conflict
            .iter()
            .map(|column| (column.to_string(), cell(&row, column)))
            .collect();

        let mut tables = self.tables.lock().unwrap();
        let rows = tables.entry(table).or_default();

        if let Some(existing) = rows.iter_mut().find(|r| matches(r, &key)) {
            if let (Some(target), Some(source)) = (existing.as_object_mut(), row.as_object()) {
                for (column, value) in source {
                    target.insert(column.clone(), value.clone());
                }
                target.insert("updated_at".to_string(), json!(Utc::now()));
            }
            return Ok(vec![existing.clone()]);
        }

        let row = self.stamp(table, row);
        rows.push(row.clone());
        Ok(vec![row])
    }

    async fn current_user(&self, access_token: &str) -> Result<Option<AuthUser>, StoreError> {
        Ok(self.tokens.lock().unwrap().get(access_token).cloned())
    }
}
