//! Command-line driver for the feed core.
//!
//! # Responsibility
//! - Run mention extraction, feed/directory filtering and suggestions against
//!   JSON and HTML fixtures on disk.
//! - Start core file logging before any command runs.
//! - Print results as JSON so output can be diffed or piped.

use clap::{Parser, Subcommand};
use std::collections::BTreeSet;
use std::error::Error;
use std::path::{Path, PathBuf};
use teamfeed_core::{
    build_notification_batch, default_log_level, extract_mentions, filter_directory, filter_feed,
    init_logging, suggest_mentions, toggle_expertise, FeedConfig, FilterCriteria, MentionKind,
    Post, User,
};
use uuid::Uuid;

const DEFAULT_LOG_DIR_NAME: &str = "teamfeed-logs";

#[derive(Parser)]
#[command(name = "teamfeed")]
#[command(about = "Team feed mention and filter tooling")]
struct Cli {
    /// Optional JSON config overriding vocabularies and mention defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory for rolling log files (defaults to `<tmp>/teamfeed-logs`)
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// Log level: trace, debug, info, warn or error
    #[arg(long, global = true, default_value_t = default_log_level().to_string())]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the core library is linked
    Ping,
    /// Extract mentions from an HTML body and build its notification batch
    Mentions {
        /// HTML file holding the post body
        html: PathBuf,
        /// Author uid; their own mentions are skipped
        #[arg(long, default_value = "")]
        sender: String,
        /// Post id the notifications refer to (random when omitted)
        #[arg(long)]
        post_id: Option<Uuid>,
    },
    /// Filter a feed snapshot
    Filter {
        /// JSON array of posts
        posts: PathBuf,
        /// JSON array of directory users
        users: PathBuf,
        /// Case-insensitive description query
        #[arg(long, default_value = "")]
        query: String,
        /// Phase tag to require (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
        /// Author team to require (repeatable)
        #[arg(long = "team")]
        teams: Vec<String>,
    },
    /// Search the people directory
    People {
        /// JSON array of directory users
        users: PathBuf,
        /// Case-insensitive display-name query
        #[arg(long, default_value = "")]
        name: String,
        /// Expertise chip to select (repeatable)
        #[arg(long = "expertise")]
        expertises: Vec<String>,
    },
    /// List autocomplete candidates for a partial mention
    Suggest {
        /// Text typed after the denotation character
        term: String,
        /// Denotation character, `@` or `#`
        #[arg(long = "char", default_value = "@")]
        denotation: String,
        /// JSON array of directory users
        #[arg(long)]
        users: Option<PathBuf>,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let log_dir = resolve_log_dir(cli.log_dir.as_deref())?;
    init_logging(&cli.log_level, &log_dir.to_string_lossy())?;

    let config = match &cli.config {
        Some(path) => FeedConfig::load(path)?,
        None => FeedConfig::default(),
    };

    match cli.command {
        Commands::Ping => {
            println!("teamfeed_core ping={}", teamfeed_core::ping());
            println!("teamfeed_core version={}", teamfeed_core::core_version());
        }
        Commands::Mentions {
            html,
            sender,
            post_id,
        } => {
            let content = std::fs::read_to_string(&html)?;
            let mentions = extract_mentions(&content);
            let batch = build_notification_batch(
                mentions.iter().cloned(),
                &sender,
                post_id.unwrap_or_else(Uuid::new_v4),
                &config.mention_preview_text,
            );
            let output = serde_json::json!({
                "mentions": mentions,
                "batch": batch,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Commands::Filter {
            posts,
            users,
            query,
            tags,
            teams,
        } => {
            let posts: Vec<Post> = read_json(&posts)?;
            let users: Vec<User> = read_json(&users)?;

            let mut criteria = FilterCriteria::new().with_query(query);
            for tag in &tags {
                if !criteria.toggle_tag(&config.phase_tags, tag) {
                    eprintln!("ignoring unknown tag `{tag}`");
                }
            }
            let criteria = criteria.with_teams(teams.iter().map(String::as_str));

            let visible = filter_feed(&posts, &users, &criteria);
            println!("{}", serde_json::to_string_pretty(&visible)?);
        }
        Commands::People {
            users,
            name,
            expertises,
        } => {
            let users: Vec<User> = read_json(&users)?;
            let mut selected = BTreeSet::new();
            for expertise in &expertises {
                if !toggle_expertise(&mut selected, &config.expertises, expertise) {
                    eprintln!("ignoring unknown expertise `{expertise}`");
                }
            }

            let found = filter_directory(&users, &name, &selected);
            println!("{}", serde_json::to_string_pretty(&found)?);
        }
        Commands::Suggest {
            term,
            denotation,
            users,
        } => {
            let kind = MentionKind::from_denotation(&denotation)
                .ok_or_else(|| format!("unknown denotation character `{denotation}`"))?;
            let directory: Vec<User> = match users {
                Some(path) => read_json(&path)?,
                None => Vec::new(),
            };
            let people = teamfeed_core::mention::suggest::people_candidates(&directory);
            let matches = suggest_mentions(
                &term,
                kind,
                &people,
                &config.mention_topics,
                config.suggestion_limit,
            );
            println!("{}", serde_json::to_string_pretty(&matches)?);
        }
    }

    Ok(())
}

/// Absolute log directory; relative paths resolve against the working directory.
fn resolve_log_dir(requested: Option<&Path>) -> std::io::Result<PathBuf> {
    match requested {
        Some(dir) if dir.is_absolute() => Ok(dir.to_path_buf()),
        Some(dir) => Ok(std::env::current_dir()?.join(dir)),
        None => Ok(std::env::temp_dir().join(DEFAULT_LOG_DIR_NAME)),
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, Box<dyn Error>> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}
