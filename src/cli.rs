use clap::{Args, Parser, Subcommand};
use coin_core::DEFAULT_CURRENCY;

#[derive(Parser)]
#[command(name = "coin-dash")]
#[command(author, version, about = "Crypto price dashboard backend", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the REST API server and the hourly history scheduler
    Serve(ServeArgs),

    /// Capture one history snapshot and exit
    Snapshot(SnapshotArgs),

    /// Database operations
    Db {
        #[command(subcommand)]
        command: DbCommands,

        /// Database URL (can also be set via DATABASE_URL env var)
        #[arg(long, env = "DATABASE_URL", global = true)]
        database_url: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum DbCommands {
    /// Run migrations
    Migrate,

    /// Show database statistics
    Stats {
        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,
    },
}

/// Settings for reaching CoinGecko and caching its answers
#[derive(Args, Debug, Clone)]
pub struct UpstreamArgs {
    /// Currency used when a request does not name one, and by the scheduler
    #[arg(long, env = "BASE_CURRENCY", default_value = DEFAULT_CURRENCY)]
    pub base_currency: String,

    /// How long a fetched market list is served from cache
    #[arg(long, env = "CACHE_TTL_SECS", default_value = "300")]
    pub cache_ttl_secs: u64,

    /// CoinGecko API base URL
    #[arg(long, env = "COINGECKO_BASE_URL", default_value = "https://api.coingecko.com/api/v3")]
    pub coingecko_base_url: String,

    /// CoinGecko demo API key
    #[arg(long, env = "COINGECKO_API_KEY", hide_env_values = true)]
    pub coingecko_api_key: Option<String>,

    /// Upstream request timeout
    #[arg(long, env = "UPSTREAM_TIMEOUT_SECS", default_value = "10")]
    pub upstream_timeout_secs: u64,
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value = "8080")]
    pub port: u16,

    /// Host to bind to
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Database URL (can also be set via DATABASE_URL env var)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Keep snapshots in process memory instead of Postgres (ignores DATABASE_URL)
    #[arg(long)]
    pub in_memory: bool,

    /// Seconds between history captures, aligned to the epoch
    #[arg(long, env = "HISTORY_INTERVAL_SECS", default_value = "3600")]
    pub history_interval_secs: u64,

    #[command(flatten)]
    pub upstream: UpstreamArgs,
}

#[derive(Args, Debug, Clone)]
pub struct SnapshotArgs {
    /// Database URL (can also be set via DATABASE_URL env var)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    #[command(flatten)]
    pub upstream: UpstreamArgs,
}
