pub mod api;
pub mod app;
pub mod error;
pub mod forms;
pub mod session;

pub use api::{ArticlesApi, HttpArticlesApi, DEFAULT_BASE_URL};
pub use app::{AppEvent, AppSnapshot, ArticlesApp, View};
pub use error::ClientError;
pub use forms::{ArticleForm, FormMode, LoginForm};
pub use session::{FileSessionStore, MemorySessionStore, SessionStore, TOKEN_KEY};

#[cfg(test)]
#[path = "tests/stub_api.rs"]
mod stub_api;
