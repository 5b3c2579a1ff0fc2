use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(ArticleId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Topic {
    JavaScript,
    React,
    Node,
}

impl Topic {
    pub const ALL: [Topic; 3] = [Topic::JavaScript, Topic::React, Topic::Node];

    pub fn as_str(self) -> &'static str {
        match self {
            Topic::JavaScript => "JavaScript",
            Topic::React => "React",
            Topic::Node => "Node",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown topic '{0}' (expected one of JavaScript, React, Node)")]
pub struct UnknownTopic(pub String);

impl FromStr for Topic {
    type Err = UnknownTopic;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        Topic::ALL
            .into_iter()
            .find(|topic| topic.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownTopic(trimmed.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub article_id: ArticleId,
    pub title: String,
    pub text: String,
    pub topic: Topic,
}

impl Article {
    pub fn fields(&self) -> ArticleFields {
        ArticleFields {
            title: self.title.clone(),
            text: self.text.clone(),
            topic: self.topic,
        }
    }
}

/// Body of create and update requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleFields {
    pub title: String,
    pub text: String,
    pub topic: Topic,
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topic_parses_case_insensitively() {
        assert_eq!("node".parse::<Topic>(), Ok(Topic::Node));
        assert_eq!(" JAVASCRIPT ".parse::<Topic>(), Ok(Topic::JavaScript));
        assert!("rust".parse::<Topic>().is_err());
    }

    #[test]
    fn article_uses_server_field_names() {
        let article: Article = serde_json::from_str(
            r#"{"article_id":3,"title":"Hooks","text":"useState all the way","topic":"React"}"#,
        )
        .expect("article json");
        assert_eq!(article.article_id, ArticleId(3));
        assert_eq!(article.topic, Topic::React);

        let fields = serde_json::to_value(article.fields()).expect("fields json");
        assert_eq!(fields["topic"], "React");
        assert!(fields.get("article_id").is_none());
    }

    #[test]
    fn credentials_debug_hides_password() {
        let rendered = format!("{:?}", Credentials::new("bob", "password1"));
        assert!(rendered.contains("bob"));
        assert!(!rendered.contains("password1"));
    }
}
