use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};
use wiki_quiz::config::Settings;
use wiki_quiz::models::{QuizResponse, StoredQuiz};
use wiki_quiz::{db, quiz, server, service, AppState};

#[derive(Parser)]
#[command(name = "wiki_quiz", about = "Multiple-choice quizzes from Wikipedia articles")]
struct Cli {
    /// SQLite database path (overrides WIKI_QUIZ_DATABASE_PATH)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve {
        /// Address to bind (default from config: 127.0.0.1:8000)
        #[arg(short, long)]
        bind: Option<String>,
    },
    /// Generate (or fetch the cached) quiz for one article and print it as JSON
    Generate {
        url: String,
    },
    /// List stored quizzes, most recent first
    History {
        /// Max rows to display
        #[arg(short = 'n', long, default_value = "50")]
        limit: usize,
    },
    /// Print a stored quiz as JSON
    Show {
        id: i64,
        /// Print the scraped page markup instead
        #[arg(long)]
        markup: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let mut settings = Settings::load().context("Failed to load settings")?;
    if let Some(path) = cli.db {
        settings = settings.with_database_path(path);
    }

    let result = match cli.command {
        Commands::Serve { bind } => {
            if let Some(address) = bind {
                settings = settings.with_bind_address(address);
            }
            let state = AppState::new(settings).context("Failed to initialise state")?;
            server::serve(state).await
        }
        Commands::Generate { url } => {
            let state = AppState::new(settings).context("Failed to initialise state")?;
            let record = service::generate(&state, &url).await?;
            let mut response = QuizResponse::from_record(&record);
            response.quiz = quiz::shuffled(&record.questions);
            println!("{}", serde_json::to_string_pretty(&response)?);
            Ok(())
        }
        Commands::History { limit } => {
            let state = AppState::new(settings).context("Failed to initialise state")?;
            let rows = service::history(&state, Some(limit)).await?;
            if rows.is_empty() {
                println!("No quizzes yet. Run 'generate <url>' first.");
                return Ok(());
            }

            println!("{:>5} | {:<32} | {:<48} | {:<20}", "ID", "Title", "URL", "Generated");
            println!("{}", "-".repeat(114));
            for r in &rows {
                println!(
                    "{:>5} | {:<32} | {:<48} | {:<20}",
                    r.id,
                    truncate(&r.title, 32),
                    truncate(&r.url, 48),
                    r.date_generated.format("%Y-%m-%d %H:%M:%S")
                );
            }
            println!("\n{} quizzes", rows.len());
            Ok(())
        }
        Commands::Show { id, markup } => {
            let state = AppState::new(settings).context("Failed to initialise state")?;
            if markup {
                let html = state.store.run(move |conn| db::raw_markup(conn, id)).await?;
                println!("{}", html.unwrap_or_default());
            } else {
                let record = service::quiz_by_id(&state, id).await?;
                println!("{}", serde_json::to_string_pretty(&StoredQuiz::from(record))?);
            }
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        eprintln!("\nDone in {}", format_duration(elapsed));
    }

    result
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
