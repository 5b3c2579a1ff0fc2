//! Local form state for the login and article screens. Neither form performs
//! I/O on its own; submission hands a value to [`ArticlesApp`].

use shared::domain::{Article, ArticleFields, ArticleId, Credentials, Topic};

use crate::{app::ArticlesApp, error::ClientError};

pub const USERNAME_MIN_LEN: usize = 3;
pub const PASSWORD_MIN_LEN: usize = 8;
pub const FIELD_MAX_LEN: usize = 20;

fn within_cap(value: &str) -> Result<String, ClientError> {
    if value.chars().count() > FIELD_MAX_LEN {
        return Err(ClientError::Validation(
            "username and password are limited to 20 characters",
        ));
    }
    Ok(value.to_string())
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    username: String,
    password: String,
}

impl LoginForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects input over the field cap and keeps the previous value.
    pub fn set_username(&mut self, value: &str) -> Result<(), ClientError> {
        self.username = within_cap(value)?;
        Ok(())
    }

    pub fn set_password(&mut self, value: &str) -> Result<(), ClientError> {
        self.password = within_cap(value)?;
        Ok(())
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn is_disabled(&self) -> bool {
        !(self.username.trim().chars().count() >= USERNAME_MIN_LEN
            && self.password.trim().chars().count() >= PASSWORD_MIN_LEN)
    }

    pub fn submit(&self) -> Result<Credentials, ClientError> {
        if self.is_disabled() {
            return Err(ClientError::Validation(
                "username needs at least 3 characters and password at least 8",
            ));
        }
        Ok(Credentials::new(&self.username, &self.password))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormMode {
    #[default]
    Create,
    Edit(ArticleId),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleForm {
    mode: FormMode,
    title: String,
    text: String,
    topic: Option<Topic>,
}

impl ArticleForm {
    /// Edit mode prefilled from `selected`, or an empty create form.
    pub fn for_selection(selected: Option<&Article>) -> Self {
        match selected {
            Some(article) => Self {
                mode: FormMode::Edit(article.article_id),
                title: article.title.clone(),
                text: article.text.clone(),
                topic: Some(article.topic),
            },
            None => Self::default(),
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn set_title(&mut self, value: &str) {
        self.title = value.to_string();
    }

    pub fn set_text(&mut self, value: &str) {
        self.text = value.to_string();
    }

    pub fn set_topic(&mut self, topic: Option<Topic>) {
        self.topic = topic;
    }

    pub fn is_disabled(&self) -> bool {
        self.title.trim().is_empty() || self.text.trim().is_empty() || self.topic.is_none()
    }

    pub fn fields(&self) -> Result<ArticleFields, ClientError> {
        let topic = self
            .topic
            .ok_or(ClientError::Validation("choose a topic"))?;
        if self.title.trim().is_empty() || self.text.trim().is_empty() {
            return Err(ClientError::Validation("title and text are required"));
        }
        Ok(ArticleFields {
            title: self.title.trim().to_string(),
            text: self.text.trim().to_string(),
            topic,
        })
    }

    pub async fn submit(&mut self, app: &ArticlesApp) -> Result<Article, ClientError> {
        let fields = self.fields()?;
        let article = match self.mode {
            FormMode::Create => app.create_article(fields).await?,
            FormMode::Edit(article_id) => app.update_article(article_id, fields).await?,
        };
        *self = Self::default();
        Ok(article)
    }

    pub async fn cancel(&mut self, app: &ArticlesApp) {
        app.cancel_edit().await;
        *self = Self::default();
    }
}

#[cfg(test)]
#[path = "tests/forms_tests.rs"]
mod tests;
