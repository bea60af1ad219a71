use async_trait::async_trait;
use reqwest::{Client, Response};
use serde_json::Value;
use tracing::{debug, info};

use super::models::{ItemCollection, Link, SearchRequest, StacItem};
use super::{Catalog, SceneQuery};
use crate::config::Config;
use crate::error::{Error, Result};

/// HTTP client for a STAC API item search endpoint
pub struct StacClient {
    http: Client,
    search_url: String,
    collection: String,
    max_cloud_cover: f64,
    page_limit: u32,
}

impl StacClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.request_timeout())
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            search_url: config.search_url(),
            collection: config.collection.clone(),
            max_cloud_cover: config.max_cloud_cover,
            page_limit: config.page_limit.max(1),
        })
    }

    pub fn search_url(&self) -> &str {
        &self.search_url
    }

    fn request_body(&self, query: &SceneQuery) -> Result<Value> {
        let request = SearchRequest::new(&self.collection, query.coordinate, query.dates, self.max_cloud_cover)
            .with_limit(self.page_limit);
        Ok(serde_json::to_value(request)?)
    }

    async fn fetch_page(&self, request: PageRequest) -> Result<ItemCollection> {
        let response = match request {
            PageRequest::Post { url, body } => self.http.post(url).json(&body).send().await?,
            PageRequest::Get { url } => self.http.get(url).send().await?,
        };
        read_page(response).await
    }
}

/// How to fetch the next page of results
#[derive(Debug, Clone, PartialEq)]
enum PageRequest {
    Post { url: String, body: Value },
    Get { url: String },
}

impl PageRequest {
    /// Follows a STAC `next` link relative to the last POST body sent
    fn follow(link: &Link, previous_body: &Value) -> Self {
        if !link.is_post() {
            return PageRequest::Get { url: link.href.clone() };
        }

        let body = match (&link.body, link.merge) {
            (Some(Value::Object(extra)), true) => {
                let mut merged = previous_body.clone();
                if let Value::Object(target) = &mut merged {
                    for (k, v) in extra {
                        target.insert(k.clone(), v.clone());
                    }
                }
                merged
            }
            (Some(body), _) => body.clone(),
            (None, _) => previous_body.clone(),
        };

        PageRequest::Post { url: link.href.clone(), body }
    }

    fn body(&self) -> Option<&Value> {
        match self {
            PageRequest::Post { body, .. } => Some(body),
            PageRequest::Get { .. } => None,
        }
    }
}

async fn read_page(response: Response) -> Result<ItemCollection> {
    let status = response.status();
    let text = response.text().await?;

    if !status.is_success() {
        return Err(Error::Catalog {
            status: status.as_u16(),
            message: catalog_message(&text),
        });
    }

    Ok(serde_json::from_str(&text)?)
}

/// STAC APIs report errors as `{"code": .., "description": ..}`
fn catalog_message(text: &str) -> String {
    serde_json::from_str::<Value>(text)
        .ok()
        .and_then(|v| v.get("description").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| text.chars().take(200).collect())
}

#[async_trait]
impl Catalog for StacClient {
    async fn search(&self, query: &SceneQuery) -> Result<Vec<StacItem>> {
        let body = self.request_body(query)?;
        debug!(url = %self.search_url, body = %body, "STAC item search");

        let mut items: Vec<StacItem> = Vec::new();
        let mut last_body = body.clone();
        let mut request = PageRequest::Post { url: self.search_url.clone(), body };
        let mut pages = 0usize;

        loop {
            let page = self.fetch_page(request).await?;
            pages += 1;

            let next = page.next_link().cloned();
            let exhausted = page.features.is_empty();
            items.extend(page.features);

            match next {
                Some(link) if !exhausted => {
                    request = PageRequest::follow(&link, &last_body);
                    if let Some(body) = request.body() {
                        last_body = body.clone();
                    }
                    debug!(page = pages + 1, collected = items.len(), "following next link");
                }
                _ => break,
            }
        }

        info!(items = items.len(), pages, "STAC search complete");
        Ok(items)
    }
}
