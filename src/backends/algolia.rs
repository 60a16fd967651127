use crate::backends::traits::{SearchBackend, SearchRequest};
use crate::config::IndexConfig;
use crate::error::SearchError;
use crate::models::Listing;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::{debug, info, warn};

const BACKEND: &str = "algolia";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryBody<'a> {
    query: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    filters: Option<String>,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    hits: Vec<Value>,
}

#[derive(Debug, Serialize)]
struct BatchBody {
    requests: Vec<BatchOperation>,
}

#[derive(Debug, Serialize)]
struct BatchOperation {
    action: &'static str,
    body: Map<String, Value>,
}

/// Outcome of a bulk upsert
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BatchResponse {
    #[serde(rename = "taskID")]
    pub task_id: u64,
    #[serde(rename = "objectIDs", default)]
    pub object_ids: Vec<String>,
}

/// Hosted Algolia index, queried over its REST API
pub struct AlgoliaIndex {
    client: Client,
    app_id: String,
    api_key: String,
    index_name: String,
    read_host: String,
    write_host: String,
}

impl AlgoliaIndex {
    /// `api_key` is the search key for queries, the admin key for writes.
    pub fn new(config: &IndexConfig, api_key: &str) -> Result<Self, SearchError> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;

        let (read_host, write_host) = match &config.host_override {
            Some(host) => {
                let host = host.trim_end_matches('/').to_string();
                (host.clone(), host)
            }
            None => (
                format!("https://{}-dsn.algolia.net", config.app_id),
                format!("https://{}.algolia.net", config.app_id),
            ),
        };

        Ok(Self {
            client,
            app_id: config.app_id.clone(),
            api_key: api_key.to_string(),
            index_name: config.index_name.clone(),
            read_host,
            write_host,
        })
    }

    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("X-Algolia-Application-Id", &self.app_id)
            .header("X-Algolia-API-Key", &self.api_key)
    }

    /// Upsert listing-shaped records. Records without `objectID` or `id` get
    /// an identifier generated by the index.
    pub async fn save_objects(&self, records: Vec<Value>) -> Result<BatchResponse, SearchError> {
        let requests = records
            .into_iter()
            .enumerate()
            .map(|(i, record)| batch_operation(record).ok_or_else(|| {
                SearchError::backend(BACKEND, format!("record {} is not a JSON object", i))
            }))
            .collect::<Result<Vec<_>, _>>()?;

        let url = format!("{}/1/indexes/{}/batch", self.write_host, self.index_name);
        info!("Uploading {} records to index '{}'", requests.len(), self.index_name);

        let response = self
            .authed(self.client.post(&url))
            .json(&BatchBody { requests })
            .send()
            .await?;

        let batch: BatchResponse = check_status(response).await?.json().await?;
        info!("Batch accepted as task {}", batch.task_id);
        Ok(batch)
    }
}

#[async_trait]
impl SearchBackend for AlgoliaIndex {
    async fn search(&self, request: &SearchRequest<'_>) -> Result<Vec<Listing>, SearchError> {
        let url = format!("{}/1/indexes/{}/query", self.read_host, self.index_name);
        // Amenities go out as one facet value ("parking, garden"), unlike the
        // per-term matching of the in-memory backend. Records must store that
        // attribute as the same free text for the clause to match.
        let body = QueryBody {
            query: request.text,
            filters: request.expression.map(|e| e.to_filter_string()),
        };

        debug!("Querying {} with {:?}", url, body);

        let response = self
            .authed(self.client.post(&url))
            .json(&body)
            .send()
            .await?;

        let parsed: QueryResponse = check_status(response).await?.json().await?;
        let total = parsed.hits.len();
        let listings: Vec<Listing> = parsed.hits.into_iter().filter_map(decode_hit).collect();

        if listings.len() < total {
            warn!("Skipped {} undecodable hits", total - listings.len());
        }
        info!("Index returned {} listings", listings.len());
        Ok(listings)
    }

    fn backend_name(&self) -> &'static str {
        BACKEND
    }
}

async fn check_status(response: Response) -> Result<Response, SearchError> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status();
    let detail = response.text().await.unwrap_or_default();
    warn!("Algolia returned status: {}", status);
    Err(SearchError::backend(BACKEND, format!("status {}: {}", status, detail)))
}

/// Hits carry `objectID`; records loaded by us also carry `id`
fn decode_hit(hit: Value) -> Option<Listing> {
    let Value::Object(mut obj) = hit else {
        return None;
    };
    if !obj.contains_key("id") {
        if let Some(object_id) = obj.get("objectID").cloned() {
            obj.insert("id".to_string(), object_id);
        }
    }
    match serde_json::from_value(Value::Object(obj)) {
        Ok(listing) => Some(listing),
        Err(e) => {
            debug!("Skipping hit: {}", e);
            None
        }
    }
}

fn batch_operation(record: Value) -> Option<BatchOperation> {
    let Value::Object(mut body) = record else {
        return None;
    };

    let object_id = body
        .get("objectID")
        .or_else(|| body.get("id"))
        .and_then(|id| match id {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        });

    Some(match object_id {
        Some(id) => {
            body.insert("objectID".to_string(), Value::String(id));
            BatchOperation {
                action: "updateObject",
                body,
            }
        }
        None => BatchOperation {
            action: "addObject",
            body,
        },
    })
}
