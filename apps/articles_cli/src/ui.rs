//! Text presenters for the message line, the spinner, and the article list.

use std::fmt::Write as _;

use client_core::{AppSnapshot, View};
use shared::domain::{Article, ArticleId};

pub const SPINNER_TEXT: &str = "Please wait...";

pub fn render_message(message: &str) -> Option<&str> {
    (!message.is_empty()).then_some(message)
}

pub fn render_spinner(busy: bool) -> Option<&'static str> {
    busy.then_some(SPINNER_TEXT)
}

pub fn render_articles(articles: &[Article], editing: Option<ArticleId>) -> String {
    if articles.is_empty() {
        return "No articles yet\n".to_string();
    }

    let mut out = String::new();
    for article in articles {
        let _ = writeln!(out, "[{}] {}", article.article_id, article.title);
        let _ = writeln!(out, "    {}", article.text);
        let _ = writeln!(out, "    Topic: {}", article.topic);
        match editing {
            Some(id) if id == article.article_id => {
                let _ = writeln!(out, "    (editing)");
            }
            Some(_) => {
                let _ = writeln!(out, "    edit/delete disabled while editing");
            }
            None => {
                let _ = writeln!(
                    out,
                    "    edit: update --id {0} | delete: delete --id {0}",
                    article.article_id
                );
            }
        }
    }
    out
}

/// Message line followed by the article list when the articles view is active.
pub fn render_snapshot(snapshot: &AppSnapshot) -> String {
    let mut out = String::new();
    if let Some(message) = render_message(&snapshot.message) {
        let _ = writeln!(out, "{message}");
    }
    if snapshot.view == View::Articles {
        out.push_str(&render_articles(
            &snapshot.articles,
            snapshot.current_article_id,
        ));
    }
    out
}

#[cfg(test)]
#[path = "tests/ui_tests.rs"]
mod tests;
