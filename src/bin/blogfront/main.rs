use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use spdlog::{info, warn};

use blogfront::config::Config;
use blogfront::logger::configure_logger;
use blogfront::navigation::NavigationToken;
use blogfront::page_range::{page_range, ButtonBudget, PageEntry};
use blogfront::remote_api::RemoteContentApi;
use blogfront::resolver::{PostResolver, ResolveError};
use blogfront::server::server_run;

use crate::config::open_config;
use crate::config_data::write_sample_cfg;

mod config;
mod config_data;

const CFG_FILE_NAME: &str = "blogfront.toml";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Config path
    #[arg(short, long)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Runs the front server (default)
    Serve,
    /// Resolves a post path segment against the content API
    Resolve {
        /// Store id or slug, as found in /blog/{segment}
        segment: String,
    },
    /// Prints the pagination controls for a page
    Pages {
        /// Current page, 1-indexed
        #[arg(short, long)]
        current: u32,
        /// Total number of pages
        #[arg(short, long)]
        total: u32,
        /// Viewport width in pixels
        #[arg(short, long)]
        width: Option<u32>,
    },
    /// Writes a sample configuration file
    Init {
        /// Where to write the file
        #[arg(short, long, default_value = CFG_FILE_NAME)]
        out: String,
    },
}

fn load_config(config_path: Option<PathBuf>) -> Result<Config> {
    let config = open_config(config_path).map_err(|err| anyhow!("{}\nPlease run blogfront --help", err))?;
    if let Err(err) = configure_logger(&config) {
        warn!("Error creating logger sinks. Using console instead. Desc={}", err);
    }
    Ok(config)
}

async fn resolve_cmd(config: Config, segment: &str) -> Result<()> {
    let resolver = PostResolver::new(RemoteContentApi::new(&config.api)?);
    match resolver.resolve(segment, &NavigationToken::detached()).await {
        Ok(resolution) => {
            println!("{}", serde_json::to_string_pretty(&resolution)?);
            Ok(())
        }
        Err(ResolveError::NotFound { segment, attempts }) => {
            println!("{}", serde_json::to_string_pretty(&attempts)?);
            Err(anyhow!("Post {} not found", segment))
        }
        Err(err) => Err(err.into()),
    }
}

fn pages_cmd(budget: ButtonBudget, current: u32, total: u32, width: Option<u32>) {
    let entries: Vec<String> = page_range(current, total, budget.for_width(width))
        .into_iter()
        .map(|entry| match entry {
            PageEntry::Page(n) if n == current => format!("[{}]", n),
            PageEntry::Page(n) => n.to_string(),
            PageEntry::Ellipsis => "...".to_string(),
        })
        .collect();
    println!("{}", entries.join(" "));
}

#[ntex::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config_path = args.config_path.map(PathBuf::from);

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            let config = load_config(config_path)?;
            info!("Starting blogfront =-=-=-=-=-=-=-=-=-=-=-=-=-=-=-");
            info!("Listening on {}:{}", config.server.address, config.server.port);
            server_run(config).await?;
        }
        Command::Resolve { segment } => {
            let config = load_config(config_path)?;
            resolve_cmd(config, &segment).await?;
        }
        Command::Pages { current, total, width } => {
            // A config is optional here, defaults apply without one
            let budget = open_config(config_path)
                .map(|config| config.pagination.button_budget())
                .unwrap_or_default();
            pages_cmd(budget, current, total, width);
        }
        Command::Init { out } => {
            write_sample_cfg(&PathBuf::from(&out))?;
            println!("Sample configuration written to {}", out);
        }
    }

    Ok(())
}
