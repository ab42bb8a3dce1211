use std::{io, thread, time::Duration};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};
use ureq::Agent;

use crate::locations::{query_value, Location};

pub const ENDPOINT: &str = "https://maps.googleapis.com/maps/api/place/nearbysearch/json";
pub const KEYWORD: &str = "basketball court";
// metres
pub const RADIUS: u32 = 3000;
pub const PAGE_DELAY: Duration = Duration::from_secs(2);

/// The two ways a page request can fail. Either one ends pagination for the
/// current location, keeping whatever was already gathered.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request failed: {}", describe(.0))]
    Transport(#[from] ureq::Error),
    #[error("JSON decoding failed: {0}")]
    Decode(#[source] io::Error),
}

// ureq's own Display carries the full url, api key included.
fn describe(e: &ureq::Error) -> String {
    match e {
        ureq::Error::Status(code, _) => format!("HTTP status {code}"),
        ureq::Error::Transport(t) => t.kind().to_string(),
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum SearchRequest {
    Nearby {
        location: Location,
        radius: u32,
        keyword: String,
    },
    Page {
        token: String,
    },
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchPage {
    #[serde(default)]
    pub results: Vec<Place>,
    pub next_page_token: Option<String>,
    pub status: Option<String>,
    pub error_message: Option<String>,
}

impl SearchPage {
    fn log_status(&self) {
        match self.status.as_deref() {
            None | Some("OK") | Some("ZERO_RESULTS") => {}
            Some(status) => warn!(
                status,
                message = self.error_message.as_deref().unwrap_or_default(),
                "places api returned an unexpected status"
            ),
        }
    }
}

/// One search result, kept exactly as the API sent it. Nothing is checked
/// until the record is deduplicated or written out.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Place(Value);

impl From<Value> for Place {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl Place {
    pub fn id(&self) -> Result<&str> {
        self.0
            .get("place_id")
            .and_then(Value::as_str)
            .with_context(|| format!("place without a place_id: {}", self.0))
    }

    pub fn row(&self) -> Result<Row> {
        let raw: RawPlace = serde_json::from_value(self.0.clone())
            .with_context(|| format!("malformed place: {}", self.0))?;

        Ok(Row {
            name: raw.name,
            latitude: raw.geometry.location.lat,
            longitude: raw.geometry.location.lng,
            link: maps_link(&raw.place_id),
        })
    }
}

pub fn maps_link(place_id: &str) -> String {
    format!("https://www.google.com/maps/place/?q=place_id:{place_id}")
}

#[derive(Debug, PartialEq, Serialize)]
pub struct Row {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub link: String,
}

#[derive(Deserialize)]
struct RawPlace {
    place_id: String,
    name: String,
    geometry: RawGeometry,
}

#[derive(Deserialize)]
struct RawGeometry {
    location: RawPosition,
}

#[derive(Deserialize)]
struct RawPosition {
    lat: f64,
    lng: f64,
}

pub trait PlacesApi {
    fn search(&self, request: &SearchRequest) -> Result<SearchPage, FetchError>;
}

pub struct Client {
    agent: Agent,
    endpoint: String,
    key: String,
}

impl Client {
    pub fn new(key: String) -> Self {
        Self::with_endpoint(ENDPOINT, key)
    }

    pub fn with_endpoint(endpoint: &str, key: String) -> Self {
        Self {
            agent: Agent::new(),
            endpoint: endpoint.to_string(),
            key,
        }
    }
}

impl PlacesApi for Client {
    fn search(&self, request: &SearchRequest) -> Result<SearchPage, FetchError> {
        let call = self.agent.get(&self.endpoint);
        let call = match request {
            SearchRequest::Nearby {
                location,
                radius,
                keyword,
            } => call
                .query("location", &query_value(location))
                .query("radius", &radius.to_string())
                .query("keyword", keyword),
            SearchRequest::Page { token } => call.query("pagetoken", token),
        };

        call.query("key", &self.key)
            .call()?
            .into_json()
            .map_err(FetchError::Decode)
    }
}

#[derive(Clone, Debug)]
pub struct Search {
    pub radius: u32,
    pub keyword: String,
    pub page_delay: Duration,
}

/// Appends every result around `location` to `places`, following
/// `next_page_token` until a page comes back without one.
///
/// On error the pages already fetched stay in `places`. There is no cap on
/// the number of pages.
pub fn fetch(
    api: &impl PlacesApi,
    search: &Search,
    location: Location,
    places: &mut Vec<Place>,
) -> Result<(), FetchError> {
    let mut request = SearchRequest::Nearby {
        location,
        radius: search.radius,
        keyword: search.keyword.clone(),
    };

    loop {
        let page = api.search(&request)?;
        page.log_status();
        debug!(
            lat = location.x(),
            lng = location.y(),
            results = page.results.len(),
            "fetched page"
        );
        places.extend(page.results);

        match page.next_page_token {
            Some(token) => {
                // the token takes a moment to become valid upstream
                thread::sleep(search.page_delay);
                request = SearchRequest::Page { token };
            }
            None => return Ok(()),
        }
    }
}
