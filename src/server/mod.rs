//! JSON API over the post repository
//!
//! Every request recomputes its answer from the files on disk. Repository
//! calls do blocking file reads, so they run on the blocking thread pool.

use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::SiteConfig;
use crate::content::{Category, Post, PostRepository, Tag};
use crate::i18n::Locale;
use crate::Blog;

/// Server state
pub struct AppState {
    pub repo: PostRepository,
    pub config: SiteConfig,
}

type SharedState = Arc<AppState>;

/// `?locale=` parameter; unknown or missing values mean the default locale
#[derive(Debug, Default, Deserialize)]
pub struct LocaleQuery {
    pub locale: Option<String>,
}

impl LocaleQuery {
    fn locale(&self) -> Locale {
        Locale::parse_or_default(self.locale.as_deref())
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
    pub locale: Option<String>,
}

/// `?locale=&limit=` parameters; a missing limit means the configured one
#[derive(Debug, Default, Deserialize)]
pub struct LimitQuery {
    pub locale: Option<String>,
    pub limit: Option<usize>,
}

/// A category together with its posts
#[derive(Debug, Serialize)]
pub struct CategoryPage {
    pub category: Category,
    pub posts: Vec<Post>,
}

/// API error response
#[derive(Debug)]
pub enum ApiError {
    NotFound,
    Internal,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound => (StatusCode::NOT_FOUND, "Not found").into_response(),
            ApiError::Internal => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
            }
        }
    }
}

/// Build the API router
pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/api/posts", get(list_posts))
        .route("/api/posts/featured", get(featured_posts))
        .route("/api/posts/recent", get(recent_posts))
        .route("/api/posts/:slug", get(get_post))
        .route("/api/posts/:slug/related", get(related_posts))
        .route("/api/categories", get(list_categories))
        .route("/api/categories/:slug", get(get_category))
        .route("/api/tags", get(list_tags))
        .route("/api/search", get(search))
        .route("/api/translations", get(translations))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the API server
pub async fn start(blog: &Blog, ip: &str, port: u16) -> Result<()> {
    let state = Arc::new(AppState {
        repo: blog.repository()?,
        config: blog.config.clone(),
    });

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router(state)).await?;

    Ok(())
}

/// Run a repository call on the blocking pool
async fn blocking<T, F>(state: &SharedState, f: F) -> Result<T, ApiError>
where
    F: FnOnce(&AppState) -> T + Send + 'static,
    T: Send + 'static,
{
    let state = Arc::clone(state);
    tokio::task::spawn_blocking(move || f(&state))
        .await
        .map_err(|e| {
            tracing::error!("Request task failed: {}", e);
            ApiError::Internal
        })
}

async fn list_posts(
    State(state): State<SharedState>,
    Query(query): Query<LocaleQuery>,
) -> Result<Json<Vec<Post>>, ApiError> {
    let locale = query.locale();
    let posts = blocking(&state, move |s| s.repo.get_all_posts(locale)).await?;
    Ok(Json(posts))
}

async fn featured_posts(
    State(state): State<SharedState>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<Vec<Post>>, ApiError> {
    let locale = Locale::parse_or_default(query.locale.as_deref());
    let posts = blocking(&state, move |s| {
        let limit = query.limit.unwrap_or(s.config.featured_limit);
        s.repo.get_featured_posts(locale, limit)
    })
    .await?;
    Ok(Json(posts))
}

async fn recent_posts(
    State(state): State<SharedState>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<Vec<Post>>, ApiError> {
    let locale = Locale::parse_or_default(query.locale.as_deref());
    let posts = blocking(&state, move |s| {
        let limit = query.limit.unwrap_or(s.config.recent_limit);
        s.repo.get_recent_posts(locale, limit)
    })
    .await?;
    Ok(Json(posts))
}

async fn get_post(
    State(state): State<SharedState>,
    Path(slug): Path<String>,
    Query(query): Query<LocaleQuery>,
) -> Result<Json<Post>, ApiError> {
    let locale = query.locale();
    blocking(&state, move |s| s.repo.get_post_by_slug(&slug, locale))
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

async fn related_posts(
    State(state): State<SharedState>,
    Path(slug): Path<String>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<Vec<Post>>, ApiError> {
    let locale = Locale::parse_or_default(query.locale.as_deref());
    let related = blocking(&state, move |s| {
        let limit = query.limit.unwrap_or(s.config.related_limit);
        s.repo
            .get_post_by_slug(&slug, locale)
            .map(|post| s.repo.get_related_posts(&post, locale, limit))
    })
    .await?;

    related.map(Json).ok_or(ApiError::NotFound)
}

async fn list_categories(
    State(state): State<SharedState>,
    Query(query): Query<LocaleQuery>,
) -> Result<Json<Vec<Category>>, ApiError> {
    let locale = query.locale();
    let categories = blocking(&state, move |s| s.repo.get_categories(locale)).await?;
    Ok(Json(categories))
}

async fn get_category(
    State(state): State<SharedState>,
    Path(slug): Path<String>,
    Query(query): Query<LocaleQuery>,
) -> Result<Json<CategoryPage>, ApiError> {
    let locale = query.locale();
    let page = blocking(&state, move |s| {
        s.repo
            .find_category_by_slug(&slug, locale)
            .map(|category| CategoryPage {
                posts: s.repo.get_posts_by_category(&category.name, locale),
                category,
            })
    })
    .await?;

    page.map(Json).ok_or(ApiError::NotFound)
}

async fn list_tags(
    State(state): State<SharedState>,
    Query(query): Query<LocaleQuery>,
) -> Result<Json<Vec<Tag>>, ApiError> {
    let locale = query.locale();
    let tags = blocking(&state, move |s| s.repo.get_tags(locale)).await?;
    Ok(Json(tags))
}

async fn search(
    State(state): State<SharedState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<Post>>, ApiError> {
    let locale = Locale::parse_or_default(query.locale.as_deref());

    // An empty query would match every post
    let Some(q) = query.q.filter(|q| !q.is_empty()) else {
        return Ok(Json(Vec::new()));
    };

    let results = blocking(&state, move |s| s.repo.search_posts(&q, locale)).await?;
    Ok(Json(results))
}

async fn translations(
    State(state): State<SharedState>,
    Query(query): Query<LocaleQuery>,
) -> Json<HashMap<String, String>> {
    Json(state.repo.translations().flatten(query.locale()))
}
