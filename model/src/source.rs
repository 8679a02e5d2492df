use std::collections::BTreeMap;

use anyhow::Result;
use chrono::{DateTime, NaiveDateTime};
use serde::Deserialize;

const BASE_URL: &str = "https://firestore.googleapis.com/v1";
const PAGE_SIZE: usize = 300;

/// The credential blob supplied by the hosting environment. The token is passed
/// through as-is; there's no auth logic here.
#[derive(Deserialize)]
pub struct Credentials {
    pub project_id: String,
    pub token: String,
}

pub fn load_credentials(path: &str) -> Result<Credentials> {
    let bytes = fs_err::read(path)?;
    let credentials = serde_json::from_slice(&bytes)?;
    Ok(credentials)
}

/// One trip per document.
#[derive(Deserialize)]
pub struct Document {
    pub name: String,
    #[serde(default)]
    pub fields: BTreeMap<String, Value>,
}

/// The store wraps every field in a single-key map naming its type.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Value {
    pub string_value: Option<String>,
    pub double_value: Option<f64>,
    pub integer_value: Option<String>,
    pub timestamp_value: Option<String>,
    pub boolean_value: Option<bool>,
    pub null_value: Option<()>,
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        self.string_value.as_deref()
    }

    /// Numbers may arrive as doubles, integers, or stringified, depending on how
    /// the collection was populated.
    pub fn as_f64(&self) -> Option<f64> {
        if let Some(x) = self.double_value {
            return Some(x);
        }
        if let Some(ref x) = self.integer_value {
            return x.parse::<f64>().ok();
        }
        self.string_value
            .as_ref()
            .and_then(|x| x.parse::<f64>().ok())
    }

    pub fn as_datetime(&self) -> Result<NaiveDateTime> {
        if let Some(ref x) = self.timestamp_value {
            return Ok(DateTime::parse_from_rfc3339(x)?.naive_utc());
        }
        if let Some(ref x) = self.string_value {
            if let Ok(datetime) = NaiveDateTime::parse_from_str(x, "%Y-%m-%d %H:%M:%S") {
                return Ok(datetime);
            }
            return Ok(DateTime::parse_from_rfc3339(x)?.naive_utc());
        }
        bail!("not a timestamp");
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListResponse {
    #[serde(default)]
    documents: Vec<Document>,
    next_page_token: Option<String>,
}

/// Enumerates every document in the named collection, following page tokens until
/// the store runs out. Any HTTP or decode error aborts the whole fetch; there's no
/// retry and no partial result.
pub fn fetch_all(credentials: &Credentials, collection: &str) -> Result<Vec<Document>> {
    let url = format!(
        "{}/projects/{}/databases/(default)/documents/{}",
        BASE_URL, credentials.project_id, collection
    );
    let client = reqwest::blocking::Client::new();

    let mut docs = Vec::new();
    let mut page_token: Option<String> = None;
    loop {
        let mut request = client
            .get(&url)
            .bearer_auth(&credentials.token)
            .query(&[("pageSize", PAGE_SIZE.to_string())]);
        if let Some(ref token) = page_token {
            request = request.query(&[("pageToken", token.clone())]);
        }
        let response: ListResponse = request.send()?.error_for_status()?.json()?;

        let count = response.documents.len();
        docs.extend(response.documents);
        info!(
            "Fetched {count} documents from {collection} (total {})",
            docs.len()
        );

        match response.next_page_token {
            Some(token) if count > 0 => {
                page_token = Some(token);
            }
            _ => {
                break;
            }
        }
    }
    Ok(docs)
}
