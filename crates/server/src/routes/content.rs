use axum::{extract::State, http::HeaderMap, Json};
use models::{BlogPost, Plan};

use super::{source_header, CONTENT_SOURCE_HEADER};
use crate::state::AppState;

/// Pricing plans; never fails, degrades to the built-in plans.
pub async fn get_pricing(State(state): State<AppState>) -> (HeaderMap, Json<Vec<Plan>>) {
    let res = state.pricing.list_plans().await;
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_SOURCE_HEADER, source_header(&res.source));
    (headers, Json(res.items))
}

/// Up to 20 blog posts; degrades to the sample posts.
pub async fn list_blogs(State(state): State<AppState>) -> (HeaderMap, Json<Vec<BlogPost>>) {
    let res = state.blogs.list_posts().await;
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_SOURCE_HEADER, source_header(&res.source));
    (headers, Json(res.items))
}
