use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::geo::Coordinate;
use crate::types::{DateRange, SceneResult};

/// Body of a `POST /search` item search
#[derive(Debug, Clone, Serialize)]
pub struct SearchRequest {
    pub collections: Vec<String>,
    pub intersects: geojson::Geometry,
    pub datetime: String,
    pub query: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl SearchRequest {
    /// Point intersection, closed date interval and a strict cloud cover bound
    pub fn new(collection: &str, coordinate: Coordinate, dates: DateRange, max_cloud_cover: f64) -> Self {
        Self {
            collections: vec![collection.to_string()],
            intersects: coordinate.to_geometry(),
            datetime: dates.to_stac_interval(),
            query: serde_json::json!({ "eo:cloud_cover": { "lt": max_cloud_cover } }),
            limit: None,
        }
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// One page of search results
#[derive(Debug, Clone, Deserialize)]
pub struct ItemCollection {
    #[serde(default)]
    pub features: Vec<StacItem>,
    #[serde(default)]
    pub links: Vec<Link>,
}

impl ItemCollection {
    pub fn next_link(&self) -> Option<&Link> {
        self.links.iter().find(|l| l.rel == "next")
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Link {
    pub rel: String,
    pub href: String,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub body: Option<Value>,
    /// Merge `body` into the original request body instead of replacing it
    #[serde(default)]
    pub merge: bool,
}

impl Link {
    pub fn is_post(&self) -> bool {
        self.method.as_deref().map(|m| m.eq_ignore_ascii_case("POST")).unwrap_or(false)
    }
}

/// The parts of a STAC item we look at
#[derive(Debug, Clone, Deserialize)]
pub struct StacItem {
    pub id: String,
    #[serde(default)]
    pub properties: ItemProperties,
    #[serde(default)]
    pub assets: HashMap<String, Asset>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemProperties {
    #[serde(default)]
    pub datetime: Option<DateTime<Utc>>,
    #[serde(default, rename = "eo:cloud_cover")]
    pub cloud_cover: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Asset {
    pub href: String,
}

impl StacItem {
    pub fn thumbnail_href(&self) -> Option<&str> {
        self.assets.get("thumbnail").map(|a| a.href.as_str())
    }

    pub fn to_scene(&self) -> SceneResult {
        SceneResult {
            id: self.id.clone(),
            acquisition_time: self.properties.datetime,
            cloud_cover: self.properties.cloud_cover,
            thumbnail_url: self.thumbnail_href().map(str::to_string),
        }
    }
}
