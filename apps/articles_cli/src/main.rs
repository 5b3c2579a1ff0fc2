use std::{io::Write, path::PathBuf, process::ExitCode, sync::Arc, time::Duration};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    AppEvent, ArticleForm, ArticlesApp, FileSessionStore, HttpArticlesApi, LoginForm,
    SessionStore, View,
};
use shared::domain::{ArticleId, Topic};
use tokio::{
    sync::broadcast::{self, error::RecvError},
    task::JoinHandle,
};
use tracing_subscriber::EnvFilter;

mod config;
mod ui;

use config::load_settings;

#[derive(Parser, Debug)]
#[command(name = "articles", version, about = "Manage articles on the articles API")]
struct Args {
    /// Config file (defaults to ./articles.toml when present)
    #[arg(long, env = "ARTICLES_CONFIG")]
    config: Option<PathBuf>,
    /// API base URL, e.g. http://localhost:9000
    #[arg(long)]
    base_url: Option<String>,
    /// Directory holding the session token
    #[arg(long)]
    data_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and store the session token
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Remove the stored session token
    Logout,
    /// List articles
    List,
    /// Create an article
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        text: String,
        /// JavaScript, React or Node
        #[arg(long)]
        topic: Topic,
    },
    /// Edit an existing article; omitted fields keep their current value
    Update {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        text: Option<String>,
        #[arg(long)]
        topic: Option<Topic>,
    },
    /// Delete an article
    Delete {
        #[arg(long)]
        id: i64,
    },
    /// Show where the session lives and whether it is present
    Status,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings(args.config.as_deref())?;
    if let Some(base_url) = args.base_url {
        settings.base_url = base_url;
    }
    if let Some(data_dir) = args.data_dir {
        settings.data_dir = data_dir;
    }

    tracing::debug!(
        base_url = %settings.base_url,
        data_dir = %settings.data_dir.display(),
        "loaded settings"
    );

    let api = HttpArticlesApi::with_timeout(
        &settings.base_url,
        Duration::from_secs(settings.request_timeout_secs),
    )
    .with_context(|| format!("failed to set up API client for {}", settings.base_url))?;
    let session = FileSessionStore::in_dir(&settings.data_dir);

    if let Command::Status = args.command {
        let token = session.token().context("failed to read session token")?;
        println!("API:     {}", settings.base_url);
        println!("Session: {}", settings.token_path().display());
        println!(
            "State:   {}",
            if token.is_some() { "logged in" } else { "logged out" }
        );
        return Ok(ExitCode::SUCCESS);
    }

    let app = ArticlesApp::new(Arc::new(api), Arc::new(session));
    let spinner = spawn_spinner(app.subscribe_events(), std::io::stderr());
    let outcome = run(&app, args.command).await;
    let snapshot = app.snapshot().await;
    // Dropping the only handle closes the event bus so the spinner drains and exits.
    drop(app);
    let _ = spinner.await;

    print!("{}", ui::render_snapshot(&snapshot));

    match outcome {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            eprintln!("error: {err:#}");
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn run(app: &ArticlesApp, command: Command) -> Result<()> {
    match command {
        Command::Login { username, password } => {
            let mut form = LoginForm::new();
            form.set_username(&username)?;
            form.set_password(&password)?;
            let credentials = form.submit()?;
            app.login(&credentials).await?;
            open_articles(app).await?;
        }
        Command::Logout => app.logout().await?,
        Command::List => open_articles(app).await?,
        Command::Create { title, text, topic } => {
            open_articles(app).await?;
            let mut form = ArticleForm::for_selection(None);
            form.set_title(&title);
            form.set_text(&text);
            form.set_topic(Some(topic));
            form.submit(app).await?;
        }
        Command::Update {
            id,
            title,
            text,
            topic,
        } => {
            open_articles(app).await?;
            app.select_article(ArticleId(id)).await?;
            let current = app.current_article().await;
            let mut form = ArticleForm::for_selection(current.as_ref());
            if let Some(title) = title {
                form.set_title(&title);
            }
            if let Some(text) = text {
                form.set_text(&text);
            }
            if topic.is_some() {
                form.set_topic(topic);
            }
            form.submit(app).await?;
        }
        Command::Delete { id } => {
            open_articles(app).await?;
            app.delete_article(ArticleId(id)).await?;
        }
        Command::Status => {}
    }
    Ok(())
}

async fn open_articles(app: &ArticlesApp) -> Result<()> {
    app.open_articles_view().await?;
    if app.view().await != View::Articles {
        bail!("not logged in; run `articles login` first");
    }
    Ok(())
}

/// Prints the spinner line for every busy transition until the event bus closes,
/// then hands the writer back.
fn spawn_spinner<W>(mut events: broadcast::Receiver<AppEvent>, mut out: W) -> JoinHandle<W>
where
    W: Write + Send + 'static,
{
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(AppEvent::BusyChanged(busy)) => {
                    if let Some(line) = ui::render_spinner(busy) {
                        let _ = writeln!(out, "{line}");
                    }
                }
                Ok(_) | Err(RecvError::Lagged(_)) => {}
                Err(RecvError::Closed) => break,
            }
        }
        out
    })
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
