//! Root orchestrator: owns the UI state and issues the API calls.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use shared::domain::{Article, ArticleFields, ArticleId, Credentials};
use tokio::sync::{broadcast, Mutex};
use tracing::{error, info, warn};

use crate::{api::ArticlesApi, error::ClientError, session::SessionStore};

pub const LOGIN_FAILED: &str = "Login failed.";
pub const FETCH_FAILED: &str = "Failed to fetch articles.";
pub const POST_FAILED: &str = "Failed to post article.";
pub const UPDATE_FAILED: &str = "Failed to update article.";
pub const DELETE_FAILED: &str = "Failed to delete article.";
pub const GOODBYE: &str = "Goodbye!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Login,
    Articles,
}

impl View {
    pub fn path(self) -> &'static str {
        match self {
            View::Login => "/",
            View::Articles => "/articles",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    MessageChanged(String),
    BusyChanged(bool),
    ArticlesChanged { count: usize },
    SelectionChanged(Option<ArticleId>),
    Navigated(View),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppSnapshot {
    pub message: String,
    pub articles: Vec<Article>,
    pub current_article_id: Option<ArticleId>,
    pub busy: bool,
    pub view: View,
}

#[derive(Default)]
struct AppState {
    message: String,
    articles: Vec<Article>,
    current_article_id: Option<ArticleId>,
    view: View,
}

/// Holds the busy flag for the lifetime of one request.
struct BusyGuard<'a> {
    app: &'a ArticlesApp,
}

impl<'a> BusyGuard<'a> {
    fn acquire(app: &'a ArticlesApp) -> Self {
        app.set_busy(true);
        Self { app }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.app.set_busy(false);
    }
}

pub struct ArticlesApp {
    api: Arc<dyn ArticlesApi>,
    session: Arc<dyn SessionStore>,
    busy: AtomicBool,
    inner: Mutex<AppState>,
    events: broadcast::Sender<AppEvent>,
}

impl ArticlesApp {
    pub fn new(api: Arc<dyn ArticlesApi>, session: Arc<dyn SessionStore>) -> Arc<Self> {
        let (events, _) = broadcast::channel(256);
        Arc::new(Self {
            api,
            session,
            busy: AtomicBool::new(false),
            inner: Mutex::new(AppState::default()),
            events,
        })
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<AppEvent> {
        self.events.subscribe()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    pub async fn message(&self) -> String {
        self.inner.lock().await.message.clone()
    }

    pub async fn articles(&self) -> Vec<Article> {
        self.inner.lock().await.articles.clone()
    }

    pub async fn view(&self) -> View {
        self.inner.lock().await.view
    }

    pub async fn snapshot(&self) -> AppSnapshot {
        let guard = self.inner.lock().await;
        AppSnapshot {
            message: guard.message.clone(),
            articles: guard.articles.clone(),
            current_article_id: guard.current_article_id,
            busy: self.is_busy(),
            view: guard.view,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<(), ClientError> {
        self.set_message(String::new()).await;
        let _busy = BusyGuard::acquire(self);

        let body = match self.api.login(credentials).await {
            Ok(body) => body,
            Err(err) => {
                error!(username = %credentials.username, "login failed: {err}");
                let message = err.server_message().unwrap_or(LOGIN_FAILED).to_string();
                self.set_message(message).await;
                return Err(err);
            }
        };

        if let Err(err) = self.session.store_token(&body.token) {
            error!("failed to persist session token: {err}");
            self.set_message(LOGIN_FAILED.to_string()).await;
            return Err(err);
        }

        info!(username = %credentials.username, "logged in");
        self.set_message(body.message).await;
        self.navigate(View::Articles).await;
        Ok(())
    }

    pub async fn logout(&self) -> Result<(), ClientError> {
        let cleared = self.session.clear_token();
        if let Err(err) = &cleared {
            error!("failed to remove session token: {err}");
        }
        info!("logged out");
        self.set_message(GOODBYE.to_string()).await;
        self.navigate(View::Login).await;
        cleared
    }

    pub async fn fetch_articles(&self) -> Result<(), ClientError> {
        self.set_message(String::new()).await;
        let _busy = BusyGuard::acquire(self);

        let token = self.token();
        match self.api.list_articles(token.as_deref()).await {
            Ok(body) => {
                info!(count = body.articles.len(), "fetched articles");
                self.replace_articles(body.articles).await;
                self.set_message(body.message).await;
                Ok(())
            }
            Err(err) if err.is_unauthorized() => {
                warn!("session rejected while fetching articles: {err}");
                self.navigate(View::Login).await;
                Err(err)
            }
            Err(err) => {
                error!("failed to fetch articles: {err}");
                self.set_message(FETCH_FAILED.to_string()).await;
                Err(err)
            }
        }
    }

    pub async fn create_article(&self, fields: ArticleFields) -> Result<Article, ClientError> {
        self.set_message(String::new()).await;
        let _busy = BusyGuard::acquire(self);

        let token = self.token();
        match self.api.create_article(token.as_deref(), &fields).await {
            Ok(body) => {
                info!(article_id = %body.article.article_id, "created article");
                let count = {
                    let mut guard = self.inner.lock().await;
                    guard.articles.push(body.article.clone());
                    guard.articles.len()
                };
                let _ = self.events.send(AppEvent::ArticlesChanged { count });
                self.set_message(body.message).await;
                Ok(body.article)
            }
            Err(err) => {
                error!("failed to post article: {err}");
                self.set_message(POST_FAILED.to_string()).await;
                Err(err)
            }
        }
    }

    pub async fn update_article(
        &self,
        article_id: ArticleId,
        fields: ArticleFields,
    ) -> Result<Article, ClientError> {
        self.set_message(String::new()).await;
        let _busy = BusyGuard::acquire(self);

        let token = self.token();
        match self
            .api
            .update_article(token.as_deref(), article_id, &fields)
            .await
        {
            Ok(body) => {
                info!(%article_id, "updated article");
                let count = {
                    let mut guard = self.inner.lock().await;
                    for article in guard.articles.iter_mut() {
                        if article.article_id == article_id {
                            *article = body.article.clone();
                        }
                    }
                    guard.articles.len()
                };
                let _ = self.events.send(AppEvent::ArticlesChanged { count });
                self.set_message(body.message).await;
                self.set_selection(None).await;
                Ok(body.article)
            }
            Err(err) => {
                error!(%article_id, "failed to update article: {err}");
                self.set_message(UPDATE_FAILED.to_string()).await;
                Err(err)
            }
        }
    }

    pub async fn delete_article(&self, article_id: ArticleId) -> Result<(), ClientError> {
        self.set_message(String::new()).await;
        let _busy = BusyGuard::acquire(self);

        let token = self.token();
        match self.api.delete_article(token.as_deref(), article_id).await {
            Ok(body) => {
                info!(%article_id, "deleted article");
                let count = {
                    let mut guard = self.inner.lock().await;
                    guard
                        .articles
                        .retain(|article| article.article_id != article_id);
                    guard.articles.len()
                };
                let _ = self.events.send(AppEvent::ArticlesChanged { count });
                self.set_message(body.message).await;
                Ok(())
            }
            Err(err) => {
                error!(%article_id, "failed to delete article: {err}");
                self.set_message(DELETE_FAILED.to_string()).await;
                Err(err)
            }
        }
    }

    /// Entering the articles view: without a stored token this goes back to
    /// login, otherwise the collection is (re)loaded.
    pub async fn open_articles_view(&self) -> Result<(), ClientError> {
        if !self.is_authenticated() {
            self.navigate(View::Login).await;
            return Ok(());
        }
        self.navigate(View::Articles).await;
        self.fetch_articles().await
    }

    pub async fn select_article(&self, article_id: ArticleId) -> Result<(), ClientError> {
        let known = self
            .inner
            .lock()
            .await
            .articles
            .iter()
            .any(|article| article.article_id == article_id);
        if !known {
            return Err(ClientError::UnknownArticle(article_id));
        }
        self.set_selection(Some(article_id)).await;
        Ok(())
    }

    pub async fn cancel_edit(&self) {
        self.set_selection(None).await;
    }

    pub async fn current_article(&self) -> Option<Article> {
        let guard = self.inner.lock().await;
        let current = guard.current_article_id?;
        guard
            .articles
            .iter()
            .find(|article| article.article_id == current)
            .cloned()
    }

    fn token(&self) -> Option<String> {
        match self.session.token() {
            Ok(token) => token,
            Err(err) => {
                warn!("failed to read session token: {err}");
                None
            }
        }
    }

    fn set_busy(&self, busy: bool) {
        self.busy.store(busy, Ordering::SeqCst);
        let _ = self.events.send(AppEvent::BusyChanged(busy));
    }

    async fn set_message(&self, message: String) {
        self.inner.lock().await.message = message.clone();
        let _ = self.events.send(AppEvent::MessageChanged(message));
    }

    async fn set_selection(&self, article_id: Option<ArticleId>) {
        self.inner.lock().await.current_article_id = article_id;
        let _ = self.events.send(AppEvent::SelectionChanged(article_id));
    }

    async fn replace_articles(&self, articles: Vec<Article>) {
        let count = articles.len();
        self.inner.lock().await.articles = articles;
        let _ = self.events.send(AppEvent::ArticlesChanged { count });
    }

    async fn navigate(&self, view: View) {
        self.inner.lock().await.view = view;
        info!(path = view.path(), "navigated");
        let _ = self.events.send(AppEvent::Navigated(view));
    }
}

#[cfg(test)]
#[path = "tests/app_tests.rs"]
mod tests;
