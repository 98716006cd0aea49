// src/sink/sheets_http.rs

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use url::Url;

use super::auth::{ServiceAccountAuth, ServiceAccountKey, TokenSource};
use super::{SheetsApi, SinkError};
use crate::config::SinkConfig;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Google Sheets v4 over blocking HTTP.
pub struct HttpSheetsApi {
    client: Client,
    api_base: Url,
    spreadsheet_id: String,
    tokens: TokenSource,
}

#[derive(Debug, Deserialize)]
struct SpreadsheetMeta {
    #[serde(default)]
    sheets: Vec<SheetEntry>,
}

#[derive(Debug, Deserialize)]
struct SheetEntry {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
struct SheetProperties {
    title: String,
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

impl HttpSheetsApi {
    pub fn new(
        api_base: &str,
        spreadsheet_id: impl Into<String>,
        tokens: TokenSource,
    ) -> Result<Self, SinkError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| SinkError::Transport(e.to_string()))?;
        Self::with_client(client, api_base, spreadsheet_id, tokens)
    }

    pub fn with_client(
        client: Client,
        api_base: &str,
        spreadsheet_id: impl Into<String>,
        tokens: TokenSource,
    ) -> Result<Self, SinkError> {
        let api_base = Url::parse(api_base)
            .map_err(|e| SinkError::NotConfigured(format!("api_base '{api_base}': {e}")))?;
        if api_base.cannot_be_a_base() {
            return Err(SinkError::NotConfigured(format!(
                "api_base '{api_base}' is not a base url"
            )));
        }

        Ok(Self {
            client,
            api_base,
            spreadsheet_id: spreadsheet_id.into(),
            tokens,
        })
    }

    pub fn from_config(cfg: &SinkConfig) -> Result<Self, SinkError> {
        let spreadsheet_id = cfg
            .spreadsheet_id
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| SinkError::NotConfigured("spreadsheet_id is not set".into()))?;

        let tokens = if let Some(t) = cfg.access_token.as_deref().filter(|t| !t.is_empty()) {
            TokenSource::Static(t.to_string())
        } else if let Some(p) = cfg.service_account_key.as_deref() {
            let key = ServiceAccountKey::from_path(p)?;
            TokenSource::ServiceAccount(ServiceAccountAuth::new(key, cfg.token_uri.clone()))
        } else {
            return Err(SinkError::NotConfigured(
                "neither access_token nor service_account_key is set".into(),
            ));
        };

        Self::new(&cfg.api_base, spreadsheet_id, tokens)
    }

    /// `<api_base>/<spreadsheet_id><suffix>/<segments...>?<query>`
    pub fn endpoint(
        &self,
        id_suffix: &str,
        segments: &[&str],
        query: &[(&str, &str)],
    ) -> Result<Url, SinkError> {
        let mut url = self.api_base.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| SinkError::NotConfigured("api_base is not a base url".into()))?;
            path.pop_if_empty()
                .push(&format!("{}{id_suffix}", self.spreadsheet_id))
                .extend(segments);
        }
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    fn send(&mut self, req: RequestBuilder) -> Result<Response, SinkError> {
        let token = self.tokens.bearer(&self.client)?;
        let resp = req.bearer_auth(token).send()?;

        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().unwrap_or_default();
        if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
            return Err(SinkError::Auth(format!("{status}: {body}")));
        }
        Err(SinkError::Http {
            status: status.as_u16(),
            body,
        })
    }
}

/// A1 range on a named sheet, quoted so any title is accepted.
pub fn a1_range(title: &str, cells: &str) -> String {
    format!("'{}'!{cells}", title.replace('\'', "''"))
}

fn cell_text(v: &serde_json::Value) -> String {
    match v {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

impl SheetsApi for HttpSheetsApi {
    fn describe(&self) -> String {
        format!(
            "google sheets {} via {}",
            self.spreadsheet_id,
            self.tokens.describe()
        )
    }

    fn sheet_titles(&mut self) -> Result<Vec<String>, SinkError> {
        let url = self.endpoint("", &[], &[("fields", "sheets.properties.title")])?;
        let req = self.client.get(url);
        let meta: SpreadsheetMeta = self.send(req)?.json()?;
        Ok(meta.sheets.into_iter().map(|s| s.properties.title).collect())
    }

    fn add_sheet(&mut self, title: &str) -> Result<(), SinkError> {
        let url = self.endpoint(":batchUpdate", &[], &[])?;
        let body = json!({
            "requests": [{ "addSheet": { "properties": { "title": title } } }]
        });
        let req = self.client.post(url).json(&body);
        self.send(req)?;
        log::info!("sink: created sheet '{title}'");
        Ok(())
    }

    fn header_row(&mut self, title: &str) -> Result<Vec<String>, SinkError> {
        let range = a1_range(title, "1:1");
        let url = self.endpoint("", &["values", &range], &[])?;
        let req = self.client.get(url);
        let vr: ValueRange = self.send(req)?.json()?;
        Ok(vr
            .values
            .into_iter()
            .next()
            .map(|r| r.iter().map(cell_text).collect())
            .unwrap_or_default())
    }

    fn write_header(&mut self, title: &str, header: &[String]) -> Result<(), SinkError> {
        let range = a1_range(title, "A1");
        let url = self.endpoint("", &["values", &range], &[("valueInputOption", "RAW")])?;
        let req = self.client.put(url).json(&json!({ "values": [header] }));
        self.send(req)?;
        Ok(())
    }

    fn append_row(&mut self, title: &str, values: &[String]) -> Result<(), SinkError> {
        let range = format!("{}:append", a1_range(title, "A1"));
        let url = self.endpoint(
            "",
            &["values", &range],
            &[
                // text starting with '=', '+' or '-' is parsed as a formula
                ("valueInputOption", "USER_ENTERED"),
                ("insertDataOption", "INSERT_ROWS"),
            ],
        )?;
        let req = self.client.post(url).json(&json!({ "values": [values] }));
        self.send(req)?;
        Ok(())
    }
}
