use super::error::ClientError;
use super::transport::{Method, RawResponse, Request, Transport};
use super::SPREADSHEET_HEADER;
use serde_json::{json, Value};
use std::cell::RefCell;
use std::collections::VecDeque;

struct MemSheet {
    sheet_id: i64,
    title: String,
    rows: Vec<Value>,
}

#[derive(Default)]
struct MemState {
    sheets: Vec<MemSheet>,
    scripted: VecDeque<RawResponse>,
    requests: Vec<Request>,
    unreachable: bool,
}

/// In-memory stand-in for the sheets service.
///
/// Implements the same routes as the remote service over a list of sheets
/// held in memory, so commands can be tested end to end without a network.
///
/// Uses `RefCell` for interior mutability since recall is single-threaded;
/// [`Transport::send`] takes `&self`.
///
/// ## Fault Injection
///
/// - [`MemTransport::push_response`] queues canned responses that are returned
///   (in order) before any routing happens.
/// - [`MemTransport::set_unreachable`] makes every call fail with
///   [`ClientError::Transport`].
///
/// Every request is recorded and can be inspected with
/// [`MemTransport::requests`].
#[derive(Default)]
pub struct MemTransport {
    state: RefCell<MemState>,
}

impl MemTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// A service holding empty `projects` and `wikis` sheets.
    pub fn recall() -> Self {
        Self::with_sheets(&["projects", "wikis"])
    }

    pub fn with_sheets(titles: &[&str]) -> Self {
        let transport = Self::new();
        for title in titles {
            transport.add_sheet(title);
        }
        transport
    }

    pub fn add_sheet(&self, title: &str) {
        let mut state = self.state.borrow_mut();
        let sheet_id = state.sheets.len() as i64 * 1000;
        state.sheets.push(MemSheet {
            sheet_id,
            title: title.to_string(),
            rows: Vec::new(),
        });
    }

    /// Appends a row directly, bypassing the request log.
    pub fn insert_row(&self, sheet: &str, row: Value) {
        let mut state = self.state.borrow_mut();
        if let Some(s) = state.sheets.iter_mut().find(|s| s.title == sheet) {
            s.rows.push(row);
        }
    }

    pub fn rows(&self, sheet: &str) -> Vec<Value> {
        self.state
            .borrow()
            .sheets
            .iter()
            .find(|s| s.title == sheet)
            .map(|s| s.rows.clone())
            .unwrap_or_default()
    }

    pub fn push_response(&self, response: RawResponse) {
        self.state.borrow_mut().scripted.push_back(response);
    }

    pub fn set_unreachable(&self, unreachable: bool) {
        self.state.borrow_mut().unreachable = unreachable;
    }

    pub fn requests(&self) -> Vec<Request> {
        self.state.borrow().requests.clone()
    }

    pub fn last_request(&self) -> Option<Request> {
        self.state.borrow().requests.last().cloned()
    }

    fn route(state: &mut MemState, request: &Request) -> RawResponse {
        if request.header(SPREADSHEET_HEADER).map_or(true, str::is_empty) {
            return error(400, "Missing X-Spreadsheet-Id header");
        }

        let segments: Vec<String> = request
            .path
            .trim_start_matches('/')
            .split('/')
            .map(|s| {
                urlencoding::decode(s)
                    .map(|d| d.into_owned())
                    .unwrap_or_else(|_| s.to_string())
            })
            .collect();
        let segments: Vec<&str> = segments.iter().map(String::as_str).collect();

        match (request.method, segments.as_slice()) {
            (Method::Get, ["health"]) => RawResponse::json(200, &json!({"status": "ok"})),
            (Method::Get, ["sheets"]) => {
                let sheets: Vec<Value> = state
                    .sheets
                    .iter()
                    .enumerate()
                    .map(|(index, s)| {
                        json!({"sheetId": s.sheet_id, "title": s.title, "index": index})
                    })
                    .collect();
                RawResponse::json(200, &json!({ "sheets": sheets }))
            }
            (method, ["sheets", name, "rows", rest @ ..]) => {
                let Some(sheet) = state.sheets.iter_mut().find(|s| s.title == *name) else {
                    return error(404, &format!("Sheet '{}' not found", name));
                };
                match (method, rest) {
                    (Method::Get, []) => RawResponse::json(200, &json!({ "rows": sheet.rows })),
                    (Method::Post, []) => {
                        sheet.rows.push(request.body.clone().unwrap_or(Value::Null));
                        RawResponse::json(201, &json!({"rowIndex": sheet.rows.len() - 1}))
                    }
                    (Method::Put, [idx]) => match parse_index(idx, sheet.rows.len()) {
                        Some(i) => {
                            sheet.rows[i] = request.body.clone().unwrap_or(Value::Null);
                            RawResponse::no_content()
                        }
                        None => error(404, &format!("Row {} not found", idx)),
                    },
                    (Method::Delete, [idx]) => match parse_index(idx, sheet.rows.len()) {
                        Some(i) => {
                            sheet.rows.remove(i);
                            RawResponse::no_content()
                        }
                        None => error(404, &format!("Row {} not found", idx)),
                    },
                    _ => RawResponse::new(405, "Method Not Allowed"),
                }
            }
            _ => RawResponse::new(404, "Not Found"),
        }
    }
}

fn parse_index(raw: &str, len: usize) -> Option<usize> {
    raw.parse::<usize>().ok().filter(|i| *i < len)
}

fn error(status: u16, message: &str) -> RawResponse {
    RawResponse::json(status, &json!({ "error": message }))
}

impl Transport for MemTransport {
    fn send(&self, request: &Request) -> Result<RawResponse, ClientError> {
        let mut state = self.state.borrow_mut();
        state.requests.push(request.clone());

        if state.unreachable {
            return Err(ClientError::Transport("connection refused".to_string()));
        }
        if let Some(scripted) = state.scripted.pop_front() {
            return Ok(scripted);
        }
        Ok(Self::route(&mut state, request))
    }
}
