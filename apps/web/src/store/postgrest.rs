use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::{RemoteStore, SelectQuery, StoreError, Table};
use crate::models::learner::AuthUser;

const REQUEST_TIMEOUT_SECS: u64 = 30;
const RETURN_REPRESENTATION: &str = "return=representation";
const MERGE_DUPLICATES: &str = "resolution=merge-duplicates,return=representation";

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
}

/// HTTP client for a Supabase-style backend: PostgREST under `/rest/v1`,
/// auth under `/auth/v1`.
#[derive(Clone)]
pub struct PostgrestStore {
    client: Client,
    base_url: String,
    api_key: String,
}

impl PostgrestStore {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    fn table_url(&self, table: Table) -> String {
        format!("{}/rest/v1/{}", self.base_url, table.as_str())
    }

    fn with_key(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn rows(response: Response) -> Result<Vec<Value>, StoreError> {
        let response = check_status(response).await?;
        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(Vec::new());
        }
        match serde_json::from_str::<Value>(&body)? {
            Value::Array(rows) => Ok(rows),
            Value::Null => Ok(Vec::new()),
            row => Ok(vec![row]),
        }
    }
}

async fn check_status(response: Response) -> Result<Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    warn!("Store returned {}: {}", status, body);
    Err(StoreError::Api {
        status: status.as_u16(),
        message: error_message(&body),
    })
}

fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|e| e.message.or(e.msg).or(e.error_description))
        .unwrap_or_else(|| body.to_string())
}

#[async_trait]
impl RemoteStore for PostgrestStore {
    async fn select(&self, table: Table, query: &SelectQuery) -> Result<Vec<Value>, StoreError> {
        debug!("select {} {:?}", table.as_str(), query.to_params());
        let response = self
            .with_key(self.client.get(self.table_url(table)))
            .query(&query.to_params())
            .send()
            .await?;
        Self::rows(response).await
    }

    async fn insert(&self, table: Table, row: Value) -> Result<Vec<Value>, StoreError> {
        debug!("insert into {}", table.as_str());
        let response = self
            .with_key(self.client.post(self.table_url(table)))
            .header("Prefer", RETURN_REPRESENTATION)
            .json(&row)
            .send()
            .await?;
        Self::rows(response).await
    }

    async fn upsert(
        &self,
        table: Table,
        row: Value,
        on_conflict: &[&str],
    ) -> Result<Vec<Value>, StoreError> {
        debug!("upsert into {} on ({})", table.as_str(), on_conflict.join(","));
        let mut request = self
            .with_key(self.client.post(self.table_url(table)))
            .header("Prefer", MERGE_DUPLICATES);
        if !on_conflict.is_empty() {
            request = request.query(&[("on_conflict", on_conflict.join(","))]);
        }
        let response = request.json(&row).send().await?;
        Self::rows(response).await
    }

    async fn current_user(&self, access_token: &str) -> Result<Option<AuthUser>, StoreError> {
        let response = self
            .client
            .get(format!("{}/auth/v1/user", self.base_url))
            .header("apikey", &self.api_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        if matches!(
            response.status(),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
        ) {
            return Ok(None);
        }

        let response = check_status(response).await?;
        Ok(Some(response.json::<AuthUser>().await?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_prefers_postgrest_message() {
        let body = r#"{"code":"23505","message":"duplicate key value","details":null}"#;
        assert_eq!(error_message(body), "duplicate key value");
    }

    #[test]
    fn test_error_message_reads_auth_fields() {
        assert_eq!(error_message(r#"{"msg":"invalid JWT"}"#), "invalid JWT");
        assert_eq!(
            error_message(r#"{"error_description":"expired"}"#),
            "expired"
        );
    }

    #[test]
    fn test_error_message_falls_back_to_body() {
        assert_eq!(error_message("gateway timeout"), "gateway timeout");
    }

    #[test]
    fn test_table_url_strips_trailing_slash() {
        let store = PostgrestStore::new("https://demo.supabase.co/", "anon").unwrap();
        assert_eq!(
            store.table_url(Table::Progress),
            "https://demo.supabase.co/rest/v1/progress"
        );
    }
}
