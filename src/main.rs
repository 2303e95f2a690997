use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod clock;
mod config;
mod confirm;
mod error;
mod import;
mod models;
mod report;
mod session;
mod stats;
mod store;

use config::AppConfig;
use store::AdminStore;

#[derive(Parser)]
#[command(name = "wotd-admin")]
#[command(about = "Admin console for the word of the day app", long_about = None)]
struct Cli {
    /// Load users from a CSV file instead of the built-in mock data
    #[arg(long, global = true)]
    users_csv: Option<PathBuf>,
    /// Load submissions from a CSV file instead of the built-in mock data
    #[arg(long, global = true)]
    submissions_csv: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the dashboard figures
    Dashboard {
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        json: bool,
    },
    /// Rank users by score
    Leaderboard {
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// List submissions
    Submissions {
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        search: Option<String>,
    },
    /// List users
    Users {
        #[arg(long)]
        search: Option<String>,
    },
    /// Generate a markdown report
    Report {
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
    /// Start an interactive admin console
    Shell,
    /// Refresh the dashboard on a timer
    Watch {
        /// Stop after this many refreshes
        #[arg(long)]
        ticks: Option<u64>,
    },
}

fn load_store(cli: &Cli) -> anyhow::Result<AdminStore> {
    let seeded = AdminStore::seeded();

    let users = match &cli.users_csv {
        Some(path) => import::load_users(path)
            .with_context(|| format!("failed to import users from {}", path.display()))?,
        None => seeded.users().to_vec(),
    };
    let submissions = match &cli.submissions_csv {
        Some(path) => import::load_submissions(path, &users)
            .with_context(|| format!("failed to import submissions from {}", path.display()))?,
        None => seeded.submissions().to_vec(),
    };

    Ok(AdminStore::new(users, submissions, *seeded.activity()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("invalid WOTD_* environment settings")?;

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("wotd_admin={}", config.log_level).into()),
        )
        .init();

    let cli = Cli::parse();
    let mut store = load_store(&cli)?;
    let today = clock::local_now().date();
    info!(
        users = store.users().len(),
        submissions = store.submissions().len(),
        "store ready"
    );

    match cli.command {
        Commands::Dashboard { date, json } => {
            let summary = store.dashboard(date.unwrap_or(today));
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                let now = clock::local_now();
                let at = date.map_or(now, |d| d.and_time(now.time()));
                print!("{}", clock::render_dashboard(&summary, at));
            }
        }
        Commands::Leaderboard { limit } => {
            let mut board = store.leaderboard();
            if board.is_empty() {
                println!("No users registered.");
                return Ok(());
            }
            board.truncate(limit);
            println!("Leaderboard:");
            print!(
                "{}",
                report::render_leaderboard(&store, &board, config.progress_capacity)
            );
        }
        Commands::Submissions { date, search } => {
            let query = search.unwrap_or_default();
            let submissions: Vec<_> = stats::search_submissions(store.submissions(), &query)
                .into_iter()
                .filter(|s| date.map_or(true, |d| s.date == d))
                .collect();
            print!("{}", report::render_submissions(&submissions));
        }
        Commands::Users { search } => {
            let users = stats::search_users(store.users(), search.as_deref().unwrap_or(""));
            print!("{}", report::render_users(&users));
        }
        Commands::Report { date, out } => {
            let report =
                report::build_report(&store, date.unwrap_or(today), config.progress_capacity);
            std::fs::write(&out, report)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Report written to {}.", out.display());
        }
        Commands::Shell => {
            let stdin = io::stdin();
            let stdout = io::stdout();
            session::Session::new(
                &mut store,
                stdin.lock(),
                stdout.lock(),
                today,
                config.progress_capacity,
            )
            .run()
            .context("console I/O failed")?;
        }
        Commands::Watch { ticks } => {
            let mut stdout = io::stdout();
            clock::watch(
                &store,
                &mut stdout,
                config.refresh_period(),
                ticks,
                clock::local_now,
            )
            .await
            .context("dashboard refresh failed")?;
            stdout.flush()?;
        }
    }

    Ok(())
}
