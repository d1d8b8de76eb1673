#![deny(missing_docs)]

//! # Docspec CLI
//!
//! Reverse-engineers an OpenAPI document from scraped API documentation.
//!
//! Supported Commands:
//! - `collect`: Requests sample variants of every `GET` endpoint into the cache.
//! - `apply-path-templates`: Records path templates in the managed document.
//! - `fixup`: Lifts response schemas, annotates operations, extracts schemas.
//! - `merge`: Copies hand-maintained sections from the base document.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::error::CliResult;
use crate::fetch::{FetchOptions, Fetcher};
use crate::profile::Profile;

mod collect;
mod discover;
mod error;
mod fetch;
mod fixup;
mod logging;
mod merge;
mod profile;
mod spec_file;
mod templates;

#[derive(Parser, Debug)]
#[clap(author, version, about = "OpenAPI document builder for scraped API documentation")]
struct Cli {
    #[clap(flatten)]
    global: GlobalArgs,

    #[clap(subcommand)]
    command: Commands,
}

/// Options shared by every command.
#[derive(clap::Args, Debug, Clone)]
struct GlobalArgs {
    /// Profile YAML replacing the built-in UEX Corp 2.0 profile.
    #[clap(long, global = true)]
    profile: Option<PathBuf>,

    /// Managed OpenAPI document.
    #[clap(long, global = true, default_value = "openapi.yaml")]
    spec: PathBuf,

    /// Directory of cached responses.
    #[clap(long, global = true, default_value = "cache")]
    cache_dir: PathBuf,

    /// Always request, even when a cached response exists.
    #[clap(long, global = true)]
    no_api_cache: bool,

    /// Skip TLS certificate verification.
    #[clap(long, global = true)]
    insecure: bool,

    /// Debug logging unless `RUST_LOG` is set.
    #[clap(long, short, global = true)]
    verbose: bool,
}

impl GlobalArgs {
    fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            cache_dir: self.cache_dir.clone(),
            use_cache: !self.no_api_cache,
            insecure: self.insecure,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch sample responses of every GET endpoint into the cache.
    Collect(collect::CollectArgs),
    /// Prepend every endpoint's path templates to `x-path-templates`.
    ApplyPathTemplates,
    /// Normalize the managed document after schema inference.
    Fixup(fixup::FixupArgs),
    /// Copy sections of the base document into the managed document.
    Merge(merge::MergeArgs),
}

/// Fetcher for documentation pages.
fn docs_fetcher(profile: &Profile, options: FetchOptions) -> Fetcher {
    let fetcher = Fetcher::new(options);
    match &profile.docs_auth {
        Some(auth) => fetcher.with_basic_auth(auth),
        None => fetcher,
    }
}

fn main() -> CliResult<()> {
    // a missing .env file is fine
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    logging::setup_logging(cli.global.verbose);

    let profile = Profile::load(cli.global.profile.as_deref())?;
    let docs = docs_fetcher(&profile, cli.global.fetch_options());

    match &cli.command {
        Commands::Collect(args) => {
            let api = Fetcher::new(cli.global.fetch_options())
                .with_api_tokens(&args.app_token, &args.user_token);
            collect::execute(&profile, &docs, &api)?;
        }
        Commands::ApplyPathTemplates => {
            templates::execute(&profile, &docs, &cli.global.spec)?;
        }
        Commands::Fixup(args) => {
            fixup::execute(args, &profile, &docs, &cli.global.spec)?;
        }
        Commands::Merge(args) => {
            merge::execute(args, &profile, &cli.global.spec)?;
        }
    }

    Ok(())
}
