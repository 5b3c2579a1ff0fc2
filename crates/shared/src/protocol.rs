use serde::{Deserialize, Serialize};

use crate::domain::Article;

pub const LOGIN_PATH: &str = "/api/login";
pub const ARTICLES_PATH: &str = "/api/articles";

pub fn article_path(article_id: crate::domain::ArticleId) -> String {
    format!("{ARTICLES_PATH}/{}", article_id.0)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticlesResponse {
    pub message: String,
    pub articles: Vec<Article>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleResponse {
    pub message: String,
    pub article: Article,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
