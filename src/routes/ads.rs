//! Ad selection handlers.
//!
//! `GET /ads` and `POST /ads` with a JSON body both run the same selection;
//! the response is always `200` with zero or more ads. The GET form accepts
//! repeated keys (`?context_keys=a&context_keys=b`), comma-separated keys
//! (`?context_keys=a,b`), or a mix of both.

use axum::{extract::State, Json};
use axum_extra::extract::Query;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::ads::{Ad, Category};
use crate::state::AppState;

/// JSON body for `POST /ads`
#[derive(Debug, Default, Deserialize)]
pub struct AdRequest {
    #[serde(default)]
    pub context_keys: Vec<Category>,
}

/// Query string for `GET /ads`
#[derive(Debug, Default, Deserialize)]
pub struct AdQuery {
    /// Each value may itself hold comma-separated keys
    #[serde(default)]
    pub context_keys: Vec<String>,
}

impl AdQuery {
    /// Keys in request order. Keys are matched exactly, so only empty
    /// segments are dropped; surrounding whitespace is kept.
    fn categories(&self) -> Vec<Category> {
        self.context_keys
            .iter()
            .flat_map(|value| value.split(','))
            .filter(|key| !key.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[derive(Debug, Serialize)]
pub struct AdResponse {
    pub ads: Vec<Ad>,
}

#[instrument(name = "ads::get", skip(state, query))]
pub async fn get_ads(
    State(state): State<AppState>,
    Query(query): Query<AdQuery>,
) -> Json<AdResponse> {
    select(&state, query.categories())
}

#[instrument(name = "ads::post", skip(state, request))]
pub async fn post_ads(
    State(state): State<AppState>,
    Json(request): Json<AdRequest>,
) -> Json<AdResponse> {
    select(&state, request.context_keys)
}

fn select(state: &AppState, categories: Vec<Category>) -> Json<AdResponse> {
    tracing::info!(context_keys = ?categories, "Received ad request");
    let ads = state.selector.select_ads(&categories);
    Json(AdResponse { ads })
}
