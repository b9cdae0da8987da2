use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::{
    client::api::ProfileApi,
    entities::profile::{Profile, DEFAULT_PAGE_SIZE},
    errors::ClientError,
};

/// The two response shapes the server may hand back for a listing or
/// search call, plus a catch-all for anything else. Classified once by
/// [`ListingBody::detect`]; nothing downstream probes raw JSON.
#[derive(Debug)]
pub enum ListingBody {
    /// A bare array of profiles (search responses, older list endpoints).
    Bare(Vec<Profile>),
    /// `{data: [...], pagination: {...}}`, metadata possibly partial.
    Envelope {
        data: Vec<Profile>,
        meta: Option<PageMeta>,
    },
    Unrecognized,
}

/// Server-declared pagination metadata. Fields are optional so a partial
/// envelope still yields whatever the server did declare.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageMeta {
    pub total_profiles: Option<u64>,
    pub total_pages: Option<u32>,
}

impl ListingBody {
    pub fn detect(body: Value) -> ListingBody {
        match body {
            Value::Array(_) => match serde_json::from_value(body) {
                Ok(items) => ListingBody::Bare(items),
                Err(_) => ListingBody::Unrecognized,
            },
            Value::Object(mut map) => {
                let Some(data_value) = map.remove("data") else {
                    return ListingBody::Unrecognized;
                };
                let Ok(data) = serde_json::from_value::<Vec<Profile>>(data_value) else {
                    return ListingBody::Unrecognized;
                };
                let meta = map
                    .remove("pagination")
                    .and_then(|v| serde_json::from_value::<PageMeta>(v).ok());
                ListingBody::Envelope { data, meta }
            }
            _ => ListingBody::Unrecognized,
        }
    }
}

/// Canonical listing result, whatever shape the response body had.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageView {
    pub items: Vec<Profile>,
    pub total_profiles: u64,
    pub total_pages: u32,
}

/// Normalizes any response body into a [`PageView`]. Server-declared
/// metadata wins; missing fields fall back to values computed from the
/// items and the assumed page size. An unrecognized shape is an empty
/// view, not an error.
pub fn reconcile(body: Value, page_size: u32) -> PageView {
    match ListingBody::detect(body) {
        ListingBody::Bare(items) => {
            let total_profiles = items.len() as u64;
            PageView {
                total_pages: pages_for(total_profiles, page_size),
                total_profiles,
                items,
            }
        }
        ListingBody::Envelope { data, meta } => {
            let meta = meta.unwrap_or_default();
            let total_profiles = meta.total_profiles.unwrap_or(data.len() as u64);
            let total_pages = meta
                .total_pages
                .unwrap_or_else(|| pages_for(total_profiles, page_size));
            PageView {
                items: data,
                total_profiles,
                total_pages,
            }
        }
        ListingBody::Unrecognized => {
            warn!("unrecognized listing response shape; rendering an empty page");
            PageView::default()
        }
    }
}

fn pages_for(total: u64, page_size: u32) -> u32 {
    total.div_ceil(u64::from(page_size.max(1))) as u32
}

/// The presentation layer's state: current items, page position, and the
/// active search term. Owned explicitly and passed around, never ambient.
#[derive(Debug, Default)]
pub struct ViewState {
    pub items: Vec<Profile>,
    pub current_page: u32,
    pub total_pages: u32,
    pub total_profiles: u64,
    pub search_term: String,
    pub page_size: u32,
}

impl ViewState {
    pub fn new() -> Self {
        ViewState {
            current_page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            ..Default::default()
        }
    }

    /// Fetches one listing page and reconciles it into this state. On
    /// transport failure the loaded items are dropped rather than kept
    /// stale, and the error is returned for the UI to surface.
    pub async fn load_page(&mut self, api: &ProfileApi, page: u32) -> Result<(), ClientError> {
        match api.list(page, self.page_size).await {
            Ok(body) => {
                let view = reconcile(body, self.page_size);
                self.items = view.items;
                self.total_profiles = view.total_profiles;
                self.total_pages = view.total_pages;
                self.current_page = page;
                Ok(())
            }
            Err(e) => {
                self.items.clear();
                self.total_profiles = 0;
                self.total_pages = 0;
                Err(e)
            }
        }
    }

    /// Runs a search. A blank term clears the search and reverts to the
    /// first listing page; that shortcut lives here, not on the server.
    /// If the request fails, the already-loaded items are filtered
    /// locally with the server's own match rule as a best-effort
    /// degradation (it only sees what is loaded, not the full set).
    pub async fn run_search(&mut self, api: &ProfileApi, term: &str) -> Result<(), ClientError> {
        self.search_term = term.to_string();

        if term.trim().is_empty() {
            return self.load_page(api, 1).await;
        }

        match api.search(term).await {
            Ok(body) => {
                let view = reconcile(body, self.page_size);
                self.items = view.items;
            }
            Err(e) => {
                warn!("search request failed ({e}); filtering loaded items locally");
                self.items.retain(|p| matches_term(p, term));
            }
        }

        self.total_profiles = self.items.len() as u64;
        self.total_pages = 1;
        self.current_page = 1;
        Ok(())
    }
}

/// Local mirror of the server's search predicate: substring match on
/// location OR exact membership in the skills list.
fn matches_term(profile: &Profile, term: &str) -> bool {
    profile
        .location
        .as_deref()
        .is_some_and(|location| location.contains(term))
        || profile.skills.iter().any(|skill| skill == term)
}
