use axum::{
    extract::{Path, Query},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    domain::catalog,
    models::{Article, ArticleFilters, AudioTrack},
    AppError, AppResult,
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct ArticlesQuery {
    /// Category name, or `all`
    pub category: Option<String>,
    /// Age group label, or `all`
    pub age_group: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct AudioQuery {
    /// Matched against title and category, case-insensitively
    pub q: Option<String>,
}

/// GET /api/library/articles?category=&age_group=
#[utoipa::path(
    get,
    path = "/api/library/articles",
    params(ArticlesQuery),
    responses(
        (status = 200, description = "Articles matching both filters", body = Vec<Article>)
    ),
    tag = "library"
)]
pub async fn list_articles(Query(query): Query<ArticlesQuery>) -> Json<Vec<Article>> {
    Json(catalog::filter_articles(
        query.category.as_deref(),
        query.age_group.as_deref(),
    ))
}

/// GET /api/library/articles/filters
#[utoipa::path(
    get,
    path = "/api/library/articles/filters",
    responses(
        (status = 200, description = "Available categories and age groups", body = ArticleFilters)
    ),
    tag = "library"
)]
pub async fn get_article_filters() -> Json<ArticleFilters> {
    Json(catalog::article_filters())
}

/// GET /api/library/articles/{id}
#[utoipa::path(
    get,
    path = "/api/library/articles/{id}",
    params(
        ("id" = String, Path, description = "Article slug")
    ),
    responses(
        (status = 200, description = "Article", body = Article),
        (status = 404, description = "Article not found")
    ),
    tag = "library"
)]
pub async fn get_article(Path(article_id): Path<String>) -> AppResult<Json<Article>> {
    catalog::find_article(&article_id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Article {} not found", article_id)))
}

/// GET /api/library/audio?q=
#[utoipa::path(
    get,
    path = "/api/library/audio",
    params(AudioQuery),
    responses(
        (status = 200, description = "Baby-safe audio tracks", body = Vec<AudioTrack>)
    ),
    tag = "library"
)]
pub async fn list_audio(Query(query): Query<AudioQuery>) -> Json<Vec<AudioTrack>> {
    Json(catalog::search_audio(query.q.as_deref()))
}
