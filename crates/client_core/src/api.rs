//! HTTP access to the articles API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header::AUTHORIZATION, Client, RequestBuilder};
use serde::de::DeserializeOwned;
use shared::{
    domain::{ArticleFields, ArticleId, Credentials},
    error::ApiError,
    protocol::{
        article_path, ArticleResponse, ArticlesResponse, LoginResponse, MessageResponse,
        ARTICLES_PATH, LOGIN_PATH,
    },
};
use tracing::debug;
use url::Url;

use crate::error::ClientError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:9000";

/// The five calls the client makes. Every authenticated call takes the token as
/// stored; `None` sends the request without an `Authorization` header.
#[async_trait]
pub trait ArticlesApi: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ClientError>;
    async fn list_articles(&self, token: Option<&str>) -> Result<ArticlesResponse, ClientError>;
    async fn create_article(
        &self,
        token: Option<&str>,
        fields: &ArticleFields,
    ) -> Result<ArticleResponse, ClientError>;
    async fn update_article(
        &self,
        token: Option<&str>,
        article_id: ArticleId,
        fields: &ArticleFields,
    ) -> Result<ArticleResponse, ClientError>;
    async fn delete_article(
        &self,
        token: Option<&str>,
        article_id: ArticleId,
    ) -> Result<MessageResponse, ClientError>;
}

pub struct HttpArticlesApi {
    http: Client,
    base_url: String,
}

impl HttpArticlesApi {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_client(base_url, Client::new())
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let http = Client::builder().timeout(timeout).build()?;
        Self::with_client(base_url, http)
    }

    fn with_client(base_url: &str, http: Client) -> Result<Self, ClientError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        Url::parse(trimmed).map_err(|source| ClientError::InvalidBaseUrl {
            url: base_url.to_string(),
            source,
        })?;
        Ok(Self {
            http,
            base_url: trimmed.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        token: Option<&str>,
    ) -> Result<T, ClientError> {
        let request = match token {
            Some(token) => request.header(AUTHORIZATION, token),
            None => request,
        };
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.json::<ApiError>().await.unwrap_or_default();
            return Err(ClientError::Status {
                status: status.as_u16(),
                message: body.into_message(),
            });
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl ArticlesApi for HttpArticlesApi {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ClientError> {
        debug!(username = %credentials.username, "POST {LOGIN_PATH}");
        self.send(self.http.post(self.url(LOGIN_PATH)).json(credentials), None)
            .await
    }

    async fn list_articles(&self, token: Option<&str>) -> Result<ArticlesResponse, ClientError> {
        debug!("GET {ARTICLES_PATH}");
        self.send(self.http.get(self.url(ARTICLES_PATH)), token)
            .await
    }

    async fn create_article(
        &self,
        token: Option<&str>,
        fields: &ArticleFields,
    ) -> Result<ArticleResponse, ClientError> {
        debug!("POST {ARTICLES_PATH}");
        self.send(self.http.post(self.url(ARTICLES_PATH)).json(fields), token)
            .await
    }

    async fn update_article(
        &self,
        token: Option<&str>,
        article_id: ArticleId,
        fields: &ArticleFields,
    ) -> Result<ArticleResponse, ClientError> {
        let path = article_path(article_id);
        debug!("PUT {path}");
        self.send(self.http.put(self.url(&path)).json(fields), token)
            .await
    }

    async fn delete_article(
        &self,
        token: Option<&str>,
        article_id: ArticleId,
    ) -> Result<MessageResponse, ClientError> {
        let path = article_path(article_id);
        debug!("DELETE {path}");
        self.send(self.http.delete(self.url(&path)), token).await
    }
}

#[cfg(test)]
#[path = "tests/api_tests.rs"]
mod tests;
