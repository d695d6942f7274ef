//! mal-helper CLI application.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mal_helper::{
    CatalogClient, CatalogKind, CatalogSpec, HttpTransport, OutputFormat, RecordPrinter,
    SeasonalQuery,
};
use shared::{Config, LogConfig};
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about = "Look up anime and manga on MyAnimeList", long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format for records
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show full details of an anime
    #[command(visible_alias = "info")]
    AnimeInfo {
        /// MyAnimeList anime id
        id: u64,
    },

    /// Search anime by keyword
    #[command(visible_alias = "find-keyword")]
    AnimeKeyword {
        keyword: String,
        /// Number of results
        #[arg(long)]
        limit: Option<u32>,
    },

    /// List top anime
    #[command(visible_alias = "find-rank")]
    AnimeRank {
        /// all, airing, upcoming, tv, ova, movie, special, bypopularity, favorite
        #[arg(long, default_value = "all")]
        ranking_type: String,
        #[arg(long)]
        limit: Option<u32>,
    },

    /// List anime of a season (defaults to the current one)
    #[command(visible_alias = "find-season")]
    AnimeSeason {
        #[arg(long)]
        year: Option<i32>,
        /// winter, spring, summer or fall
        #[arg(long)]
        season: Option<String>,
        /// anime_score or anime_num_list_users
        #[arg(long, default_value = "anime_score")]
        sort: String,
        #[arg(long)]
        limit: Option<u32>,
    },

    /// Show full details of a manga
    MangaInfo {
        /// MyAnimeList manga id
        id: u64,
    },

    /// Search manga by keyword
    MangaKeyword {
        keyword: String,
        #[arg(long)]
        limit: Option<u32>,
    },

    /// List top manga
    MangaRank {
        /// all, manga, novels, oneshots, doujin, manhwa, manhua, bypopularity, favorite
        #[arg(long, default_value = "all")]
        ranking_type: String,
        #[arg(long)]
        limit: Option<u32>,
    },
}

impl Command {
    fn kind(&self) -> CatalogKind {
        match self {
            Command::AnimeInfo { .. }
            | Command::AnimeKeyword { .. }
            | Command::AnimeRank { .. }
            | Command::AnimeSeason { .. } => CatalogKind::Anime,
            Command::MangaInfo { .. }
            | Command::MangaKeyword { .. }
            | Command::MangaRank { .. } => CatalogKind::Manga,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let config = Config::from_file(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    // Initialize logging
    let mut log_config = LogConfig::from_settings("mal-helper", &config.logging);
    log_config.log_dir = config.log_dir().to_string_lossy().to_string();
    if args.verbose {
        log_config.default_level = tracing::Level::DEBUG;
    }
    shared::logging::init(log_config)?;

    // Loading happened before the subscriber existed, so report the fallback here
    if !args.config.exists() {
        warn!(config_file = %args.config.display(), "Config file not found, using defaults");
    } else {
        debug!(config_file = %args.config.display(), "Loaded configuration");
    }

    let client_id = config.mal.resolve_client_id()?;
    let transport = HttpTransport::new(
        Duration::from_secs(config.mal.timeout_seconds),
        &config.mal.user_agent,
    )
    .context("Failed to create MyAnimeList transport")?;

    let kind = args.command.kind();
    let spec = CatalogSpec::for_kind(kind, &config.mal.api_url, &config.mal.web_url);
    let client = CatalogClient::new(spec, client_id, transport);

    let stdout = std::io::stdout();
    let mut printer = RecordPrinter::new(stdout.lock(), args.format);

    run(args.command, &client, config.mal.default_limit, &mut printer).await
}

async fn run<W: Write>(
    command: Command,
    client: &CatalogClient,
    default_limit: u32,
    printer: &mut RecordPrinter<W>,
) -> Result<()> {
    let kind = client.spec().kind;

    let printed = match command {
        Command::AnimeInfo { id } | Command::MangaInfo { id } => {
            let record = client
                .lookup_by_id(id)
                .await
                .with_context(|| format!("Failed to look up {} {}", kind, id))?;
            printer.print(&record)?;
            Some(1)
        }
        Command::AnimeKeyword { keyword, limit } | Command::MangaKeyword { keyword, limit } => {
            let count = client
                .find_by_keyword(&keyword, limit.unwrap_or(default_limit), printer)
                .await
                .with_context(|| format!("Failed to search {} for {:?}", kind, keyword))?;
            Some(count)
        }
        Command::AnimeRank {
            ranking_type,
            limit,
        }
        | Command::MangaRank {
            ranking_type,
            limit,
        } => client
            .get_by_ranking(&ranking_type, limit.unwrap_or(default_limit), printer)
            .await
            .with_context(|| format!("Failed to fetch {} ranking", kind))?,
        Command::AnimeSeason {
            year,
            season,
            sort,
            limit,
        } => {
            let query = SeasonalQuery {
                year,
                season,
                sort,
                limit: limit.unwrap_or(default_limit),
            };
            client
                .get_seasonal(query, printer)
                .await
                .context("Failed to fetch seasonal anime")?
        }
    };

    match printed {
        Some(count) => info!(kind = %kind, records = count, "Done"),
        None => debug!(kind = %kind, "Nothing requested"),
    }

    Ok(())
}
