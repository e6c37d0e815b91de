use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Article {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub category: String,
    pub age_group: String,
    pub read_time: String,
    pub last_updated: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ArticleFilters {
    pub categories: Vec<String>,
    pub age_groups: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AudioTrack {
    pub id: String,
    pub title: String,
    pub description: String,
    pub duration_seconds: u32,
    pub category: String,
    pub url: String,
}
