use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use chirp_core::{Chirp, CoreConfig};
use chirp_types::models::User;

#[derive(Parser, Debug)]
#[command(name = "chirp-admin")]
#[command(author, version, about = "Operator tasks for a chirp database", long_about = None)]
struct Args {
    /// SQLite database path (falls back to CHIRP_DB_PATH, then chirp.db)
    #[arg(long)]
    db: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the database if needed and apply migrations
    Migrate,

    /// List users, optionally filtered by a username fragment
    Users {
        #[arg(short, long)]
        query: Option<String>,
    },

    /// Show message, follow and like counts for a user
    Stats { username: String },

    /// Delete a user with their messages, likes and follows
    DeleteUser { username: String },
}

fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chirp_admin=info,chirp_core=info,chirp_db=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let db_path = args
        .db
        .or_else(|| std::env::var_os("CHIRP_DB_PATH").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("chirp.db"));
    let config = CoreConfig::from_env()?;

    let chirp = Chirp::open(&db_path, config)
        .with_context(|| format!("opening database at {}", db_path.display()))?;

    match args.command {
        Command::Migrate => {
            info!("Database at {} is up to date", db_path.display());
        }
        Command::Users { query } => {
            let users = chirp.list_users(query.as_deref())?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&users)?);
            } else {
                for user in &users {
                    print_user(user);
                }
            }
        }
        Command::Stats { username } => {
            let user = chirp
                .get_user_by_username(&username)
                .with_context(|| format!("looking up {username}"))?;
            let stats = chirp.user_stats(user.id)?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!(
                    "@{}: {} messages, {} following, {} followers, {} likes",
                    user.username, stats.messages, stats.following, stats.followers, stats.likes
                );
            }
        }
        Command::DeleteUser { username } => {
            let user = chirp
                .get_user_by_username(&username)
                .with_context(|| format!("looking up {username}"))?;
            chirp.delete_user(user.id)?;
            info!("Deleted @{} ({})", user.username, user.id);
        }
    }

    Ok(())
}

fn print_user(user: &User) {
    println!("{}  @{:<30}  {}", user.id, user.username, user.email);
}
