use anyhow::Result;
use clap::Parser;
use ghsearch::commands::{self, DEFAULT_TIMEOUT_SECS, SearchOptions, Settings};
use ghsearch::github::DEFAULT_PER_PAGE;

/// ghsearch - GitHub repository search
///
/// Search GitHub repositories by name, most starred first, one page at a time.
///
/// Examples:
///   ghsearch search react            # First page of repositories named like "react"
///   ghsearch search react --page 3   # Third page
///   ghsearch browse react            # Page through results interactively
#[derive(Parser, Debug)]
#[command(author, version = env!("GHSEARCH_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// GitHub API URL (defaults to https://api.github.com)
    #[arg(
        long = "api-url",
        env = "GHSEARCH_API_URL",
        value_name = "URL",
        global = true
    )]
    pub api_url: Option<String>,

    /// Results per page
    #[arg(
        long = "per-page",
        short = 'n',
        env = "GHSEARCH_PER_PAGE",
        value_name = "N",
        default_value_t = DEFAULT_PER_PAGE,
        global = true
    )]
    pub per_page: u32,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = DEFAULT_TIMEOUT_SECS, global = true)]
    pub timeout: u64,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Print one page of search results
    Search(SearchArgs),

    /// Page through results interactively
    Browse(BrowseArgs),
}

#[derive(clap::Args, Debug)]
pub struct SearchArgs {
    /// Text to look for in repository names
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Page to fetch, starting at 1
    #[arg(long, short = 'p', default_value_t = 1)]
    pub page: u32,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(clap::Args, Debug)]
pub struct BrowseArgs {
    /// Search to run before reading commands
    #[arg(value_name = "QUERY")]
    pub query: Option<String>,
}

impl Cli {
    fn settings(&self) -> Settings {
        Settings {
            api_url: self.api_url.clone(),
            per_page: self.per_page,
            timeout_secs: self.timeout,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let settings = cli.settings();

    match cli.command {
        Commands::Search(args) => {
            let options = SearchOptions {
                query: args.query,
                page: args.page,
                json: args.json,
            };
            commands::search(&settings, &options).await?
        }
        Commands::Browse(args) => commands::browse(&settings, args.query.as_deref()).await?,
    }
    Ok(())
}
