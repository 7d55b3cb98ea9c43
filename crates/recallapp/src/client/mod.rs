//! # Row Client
//!
//! Access layer for the "spreadsheet as a database" REST service. One
//! [`RowClient`] is bound to one spreadsheet for its whole lifetime; the base
//! URL and spreadsheet id never change after construction.
//!
//! ## Endpoints
//!
//! | Operation | Method | Path | Success |
//! |-----------|--------|------|---------|
//! | [`RowClient::health`] | GET | `/health` | `{status}` |
//! | [`RowClient::list_sheets`] | GET | `/sheets` | `{sheets}` |
//! | [`RowClient::get_rows`] | GET | `/sheets/{name}/rows` | `{rows}` |
//! | [`RowClient::create_row`] | POST | `/sheets/{name}/rows` | `{rowIndex}` |
//! | [`RowClient::update_row`] | PUT | `/sheets/{name}/rows/{rowIndex}` | 204 |
//! | [`RowClient::delete_row`] | DELETE | `/sheets/{name}/rows/{rowIndex}` | 204 |
//!
//! ## Response Contract
//!
//! Every request carries `Content-Type: application/json` and
//! `X-Spreadsheet-Id`. Responses are normalized in one place so callers only
//! ever see `Result<T, ClientError>`:
//!
//! - **non-2xx**: body parsed as JSON, else kept as text; the message is the
//!   `error` field when present, else `Request failed with status {code}`.
//! - **204**: empty success, the body is never read.
//! - **2xx without a body**: fine for list/update/delete, but
//!   [`ClientError::MissingBody`] for `health` and `create_row`, which must
//!   return data.
//!
//! Nothing is retried. Row indexes are 0-based positions within the sheet.
//!
//! ## Transports
//!
//! The wire is abstracted behind [`Transport`]:
//! - [`HttpTransport`]: production, reqwest blocking client
//! - [`MemTransport`]: in-memory emulation of the service for tests

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

pub mod error;
pub mod http;
pub mod memory;
pub mod transport;

pub use error::{ClientError, ErrorPayload};
pub use http::HttpTransport;
pub use memory::MemTransport;
pub use transport::{Method, RawResponse, Request, Transport};

pub const SPREADSHEET_HEADER: &str = "X-Spreadsheet-Id";
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Remote sheet descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetInfo {
    pub sheet_id: i64,
    pub title: String,
    pub index: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    pub status: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedRow {
    pub row_index: usize,
}

pub struct RowClient<T: Transport> {
    transport: T,
    base_url: String,
    spreadsheet_id: String,
}

impl RowClient<HttpTransport> {
    /// Client over real HTTP.
    pub fn http(
        base_url: impl Into<String>,
        spreadsheet_id: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ClientError> {
        Ok(Self::new(
            HttpTransport::new(timeout)?,
            base_url,
            spreadsheet_id,
        ))
    }
}

impl<T: Transport> RowClient<T> {
    pub fn new(transport: T, base_url: impl Into<String>, spreadsheet_id: impl Into<String>) -> Self {
        let base_url = base_url.into();
        let base_url = base_url.strip_suffix('/').unwrap_or(&base_url).to_string();
        Self {
            transport,
            base_url,
            spreadsheet_id: spreadsheet_id.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn spreadsheet_id(&self) -> &str {
        &self.spreadsheet_id
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn health(&self) -> Result<Health, ClientError> {
        let value = self
            .request(Method::Get, "/health".to_string(), None)?
            .ok_or_else(|| ClientError::missing_body("Health check returned no data"))?;
        decode(value)
    }

    pub fn list_sheets(&self) -> Result<Vec<SheetInfo>, ClientError> {
        let value = self.request(Method::Get, "/sheets".to_string(), None)?;
        field_list(value, "sheets")
    }

    pub fn get_rows<R: DeserializeOwned>(&self, sheet_name: &str) -> Result<Vec<R>, ClientError> {
        let value = self.request(Method::Get, rows_path(sheet_name), None)?;
        field_list(value, "rows")
    }

    pub fn create_row<R: Serialize>(
        &self,
        sheet_name: &str,
        data: &R,
    ) -> Result<CreatedRow, ClientError> {
        let body = encode(data)?;
        let value = self
            .request(Method::Post, rows_path(sheet_name), Some(body))?
            .filter(|v| v.get("rowIndex").is_some_and(|idx| !idx.is_null()))
            .ok_or_else(|| ClientError::missing_body("Expected response body but got none"))?;
        decode(value)
    }

    pub fn update_row<R: Serialize>(
        &self,
        sheet_name: &str,
        row_index: usize,
        data: &R,
    ) -> Result<(), ClientError> {
        let body = encode(data)?;
        self.request(Method::Put, row_path(sheet_name, row_index), Some(body))?;
        Ok(())
    }

    pub fn delete_row(&self, sheet_name: &str, row_index: usize) -> Result<(), ClientError> {
        self.request(Method::Delete, row_path(sheet_name, row_index), None)?;
        Ok(())
    }

    /// Sends one request and normalizes the response.
    ///
    /// `Ok(None)` means a successful response without a body (204, empty, or
    /// JSON `null`).
    fn request(
        &self,
        method: Method,
        path: String,
        body: Option<Value>,
    ) -> Result<Option<Value>, ClientError> {
        let request = Request {
            method,
            url: format!("{}{}", self.base_url, path),
            path,
            headers: vec![
                ("Content-Type", JSON_CONTENT_TYPE.to_string()),
                (SPREADSHEET_HEADER, self.spreadsheet_id.clone()),
            ],
            body,
        };

        debug!(method = %request.method, path = %request.path, "sheets request");
        let response = self.transport.send(&request).inspect_err(|e| {
            warn!(method = %request.method, path = %request.path, error = %e, "sheets request failed");
        })?;
        debug!(status = response.status, path = %request.path, "sheets response");

        if !response.is_success() {
            let err = ClientError::from_response(response.status, &response.body);
            warn!(status = response.status, path = %request.path, error = %err, "sheets request rejected");
            return Err(err);
        }

        if response.status == 204 || response.body.trim().is_empty() {
            return Ok(None);
        }

        let value: Value = serde_json::from_str(&response.body)
            .map_err(|e| ClientError::Decode(e.to_string()))?;
        Ok(if value.is_null() { None } else { Some(value) })
    }
}

fn rows_path(sheet_name: &str) -> String {
    format!("/sheets/{}/rows", urlencoding::encode(sheet_name))
}

fn row_path(sheet_name: &str, row_index: usize) -> String {
    format!("{}/{}", rows_path(sheet_name), row_index)
}

fn encode<R: Serialize>(data: &R) -> Result<Value, ClientError> {
    serde_json::to_value(data).map_err(|e| ClientError::Decode(e.to_string()))
}

fn decode<R: DeserializeOwned>(value: Value) -> Result<R, ClientError> {
    serde_json::from_value(value).map_err(|e| ClientError::Decode(e.to_string()))
}

/// Pulls a list out of `{field: [...]}`, treating a missing payload or field as empty.
fn field_list<R: DeserializeOwned>(value: Option<Value>, field: &str) -> Result<Vec<R>, ClientError> {
    match value.and_then(|mut v| v.get_mut(field).map(Value::take)) {
        Some(Value::Null) | None => Ok(Vec::new()),
        Some(list) => decode(list),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client(transport: &MemTransport) -> RowClient<&MemTransport> {
        RowClient::new(transport, "https://sheets.example.com/", "sheet-123")
    }

    #[test]
    fn trailing_slash_is_stripped_from_base_url() {
        let transport = MemTransport::new();
        let c = client(&transport);
        assert_eq!(c.base_url(), "https://sheets.example.com");
        assert_eq!(c.spreadsheet_id(), "sheet-123");
    }

    #[test]
    fn every_request_carries_json_and_spreadsheet_headers() {
        let transport = MemTransport::recall();
        let c = client(&transport);
        c.health().unwrap();
        c.list_sheets().unwrap();
        c.get_rows::<Value>("projects").unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 3);
        for req in &requests {
            assert_eq!(req.header("Content-Type"), Some("application/json"));
            assert_eq!(req.header(SPREADSHEET_HEADER), Some("sheet-123"));
            assert!(req.url.starts_with("https://sheets.example.com/"));
        }
        assert_eq!(requests[0].url, "https://sheets.example.com/health");
    }

    #[test]
    fn health_returns_status() {
        let transport = MemTransport::recall();
        assert_eq!(client(&transport).health().unwrap().status, "ok");
    }

    #[test]
    fn health_without_body_is_missing_body_error() {
        let transport = MemTransport::new();
        transport.push_response(RawResponse::no_content());
        let err = client(&transport).health().unwrap_err();
        assert_eq!(
            err,
            ClientError::missing_body("Health check returned no data")
        );
    }

    #[test]
    fn list_sheets_in_order() {
        let transport = MemTransport::recall();
        let sheets = client(&transport).list_sheets().unwrap();
        let titles: Vec<&str> = sheets.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, ["projects", "wikis"]);
        assert_eq!(sheets[1].index, 1);
    }

    #[test]
    fn list_sheets_missing_field_is_empty() {
        let transport = MemTransport::new();
        transport.push_response(RawResponse::json(200, &json!({"other": 1})));
        assert!(client(&transport).list_sheets().unwrap().is_empty());

        transport.push_response(RawResponse::no_content());
        assert!(client(&transport).list_sheets().unwrap().is_empty());
    }

    #[test]
    fn get_rows_missing_field_is_empty() {
        let transport = MemTransport::new();
        transport.push_response(RawResponse::json(200, &json!({})));
        let rows: Vec<Value> = client(&transport).get_rows("projects").unwrap();
        assert!(rows.is_empty());

        transport.push_response(RawResponse::json(200, &json!({"rows": null})));
        let rows: Vec<Value> = client(&transport).get_rows("projects").unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn sheet_name_is_url_encoded() {
        let transport = MemTransport::new();
        transport.add_sheet("my sheet/2");
        let c = client(&transport);
        c.get_rows::<Value>("my sheet/2").unwrap();
        c.delete_row("my sheet/2", 0).unwrap_err();

        let requests = transport.requests();
        assert_eq!(requests[0].path, "/sheets/my%20sheet%2F2/rows");
        assert_eq!(requests[1].path, "/sheets/my%20sheet%2F2/rows/0");
    }

    #[test]
    fn create_row_returns_row_index_and_sends_body() {
        let transport = MemTransport::recall();
        let c = client(&transport);
        let created = c.create_row("wikis", &json!({"id": "w1"})).unwrap();
        assert_eq!(created, CreatedRow { row_index: 0 });
        let created = c.create_row("wikis", &json!({"id": "w2"})).unwrap();
        assert_eq!(created.row_index, 1);

        let last = transport.last_request().unwrap();
        assert_eq!(last.method, Method::Post);
        assert_eq!(last.body, Some(json!({"id": "w2"})));
    }

    #[test]
    fn create_row_without_row_index_is_missing_body_error() {
        let transport = MemTransport::new();
        let c = client(&transport);

        transport.push_response(RawResponse::no_content());
        let err = c.create_row("projects", &json!({})).unwrap_err();
        assert_eq!(err.to_string(), "Expected response body but got none");

        transport.push_response(RawResponse::json(200, &json!({"ok": true})));
        let err = c.create_row("projects", &json!({})).unwrap_err();
        assert!(matches!(err, ClientError::MissingBody { .. }));

        transport.push_response(RawResponse::new(201, "null"));
        let err = c.create_row("projects", &json!({})).unwrap_err();
        assert!(matches!(err, ClientError::MissingBody { .. }));
    }

    #[test]
    fn update_and_delete_accept_204_without_parsing() {
        let transport = MemTransport::new();
        let c = client(&transport);

        // A 204 with garbage must not be parsed.
        transport.push_response(RawResponse::new(204, "not json"));
        c.update_row("projects", 3, &json!({"id": "p"})).unwrap();

        transport.push_response(RawResponse::new(204, "not json"));
        c.delete_row("projects", 3).unwrap();

        let requests = transport.requests();
        assert_eq!(requests[0].method, Method::Put);
        assert_eq!(requests[0].path, "/sheets/projects/rows/3");
        assert_eq!(requests[1].method, Method::Delete);
        assert_eq!(requests[1].body, None);
    }

    #[test]
    fn non_2xx_plain_text_uses_status_fallback() {
        let transport = MemTransport::new();
        transport.push_response(RawResponse::new(500, "<html>oops</html>"));
        let err = client(&transport).list_sheets().unwrap_err();
        assert_eq!(err.to_string(), "Request failed with status 500");
        assert_eq!(err.status(), Some(500));
        assert_eq!(
            err.payload(),
            Some(&ErrorPayload::Text("<html>oops</html>".into()))
        );
    }

    #[test]
    fn non_2xx_json_error_field_is_the_message() {
        let transport = MemTransport::new();
        transport.push_response(RawResponse::json(403, &json!({"error": "Permission denied"})));
        let err = client(&transport).update_row("projects", 0, &json!({})).unwrap_err();
        assert_eq!(err.to_string(), "Permission denied");
        assert_eq!(err.status(), Some(403));
    }

    #[test]
    fn invalid_json_on_success_is_decode_error() {
        let transport = MemTransport::new();
        transport.push_response(RawResponse::new(200, "{not json"));
        let err = client(&transport).list_sheets().unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }

    #[test]
    fn rows_are_typed() {
        #[derive(Deserialize)]
        struct Row {
            id: String,
        }
        let transport = MemTransport::recall();
        transport.insert_row("projects", json!({"id": "a"}));
        transport.insert_row("projects", json!({"id": "b"}));
        let rows: Vec<Row> = client(&transport).get_rows("projects").unwrap();
        let ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
    }
}
