use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use feedget_core::{PackageManifest, PackageSummary};
use feedget_feed::{Feed, FeedError, HttpFeed};
use semver::Version;
use thiserror::Error;
use tracing::debug;

use crate::catalog::CatalogCache;
use crate::command::{resolve, Command, Mode};
use crate::wrap::{usable_width, wrap};

pub const DEFAULT_SOURCE_URL: &str = "https://feed.feedget.dev/api/v1";
const PROGRAM: &str = "feedget";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub verbose: bool,
    pub api_key: Option<String>,
    pub source_url: String,
    pub show_help: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            verbose: false,
            api_key: None,
            source_url: DEFAULT_SOURCE_URL.to_string(),
            show_help: false,
        }
    }
}

/// Global flags plus the raw command line. A single parsing pass populates
/// the session config; the remaining tokens form the command and its
/// positional arguments. Flags must precede the command token.
#[derive(Parser, Debug)]
#[command(name = PROGRAM, disable_help_flag = true)]
struct Cli {
    /// Operate in verbose mode
    #[arg(long)]
    verbose: bool,
    /// API key for the feed
    #[arg(short = 'a', long = "apikey", value_name = "KEY")]
    api_key: Option<String>,
    /// Source repository url
    #[arg(short = 's', long = "source", value_name = "URL")]
    source: Option<String>,
    /// Show help
    #[arg(short = 'h', long = "help")]
    help: bool,
    /// Command and positional arguments
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "COMMAND")]
    args: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Status(i32),
    Quit,
    /// A batch invocation with no command token: the caller owns the
    /// read-dispatch loop and its line-input collaborator.
    EnterInteractive,
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("you must specify a package to install")]
    MissingPackageArgument,
    #[error("invalid version '{given}': {source}")]
    InvalidVersion {
        given: String,
        #[source]
        source: semver::Error,
    },
    #[error("pack failed: {0:#}")]
    Pack(anyhow::Error),
    #[error(transparent)]
    Feed(#[from] FeedError),
}

/// One feedget session: configuration, the lazily-connected feed handle, and
/// the memoized catalog. Drives both a single batch invocation and the
/// per-line dispatch of the interactive loop.
pub struct Session {
    config: Config,
    feed: Option<Arc<dyn Feed>>,
    catalog: CatalogCache,
}

impl Session {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            feed: None,
            catalog: CatalogCache::new(),
        }
    }

    #[cfg(test)]
    pub fn with_feed(config: Config, feed: Arc<dyn Feed>) -> Self {
        Self {
            config,
            feed: Some(feed),
            catalog: CatalogCache::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The dispatch boundary: parse flags, resolve the command token, run
    /// the handler, and convert every error to a message plus a status.
    /// Nothing propagates past here.
    pub fn run(&mut self, args: &[String], mode: Mode) -> Outcome {
        let argv = std::iter::once(PROGRAM.to_string()).chain(args.iter().cloned());
        let cli = match Cli::try_parse_from(argv) {
            Ok(cli) => cli,
            Err(err) => {
                match mode {
                    Mode::Interactive => println!("parsing error: {err}"),
                    Mode::Batch => eprintln!("{err}"),
                }
                self.print_usage(mode);
                return Outcome::Status(1);
            }
        };

        self.config.verbose |= cli.verbose;
        if let Some(key) = cli.api_key {
            self.config.api_key = Some(key);
        }
        if let Some(source) = cli.source {
            if source.trim().is_empty() {
                eprintln!("{PROGRAM}: source url must not be empty");
                return Outcome::Status(1);
            }
            self.config.source_url = source;
            // the old handle points at the old feed
            self.feed = None;
        }
        self.config.show_help = cli.help;

        if self.config.show_help {
            self.print_usage(mode);
            return Outcome::Status(0);
        }

        let Some((token, rest)) = cli.args.split_first() else {
            return match mode {
                Mode::Batch => Outcome::EnterInteractive,
                Mode::Interactive => Outcome::Status(0),
            };
        };

        let command = resolve(token, rest.to_vec(), mode);
        debug!(?command, "dispatching");
        self.dispatch(command, mode)
    }

    fn dispatch(&mut self, command: Command, mode: Mode) -> Outcome {
        match command {
            Command::Install(args) => {
                let result = self.install_command(&args);
                Outcome::Status(report(result))
            }
            Command::List(args) => {
                let result = self.list_command(&args);
                Outcome::Status(report(result))
            }
            Command::Pack(args) => {
                let result = self.pack_command(&args);
                Outcome::Status(report(result))
            }
            Command::Unsupported(name) => {
                eprintln!("{PROGRAM}: {name} is not yet supported");
                Outcome::Status(1)
            }
            Command::Help => {
                self.print_usage(mode);
                Outcome::Status(0)
            }
            Command::Quit => Outcome::Quit,
            Command::Unknown(token) => {
                eprintln!("{PROGRAM}: unknown command {token}");
                self.print_usage(mode);
                Outcome::Status(1)
            }
        }
    }

    fn install_command(&mut self, args: &[String]) -> Result<(), CommandError> {
        let Some(id) = args.first() else {
            return Err(CommandError::MissingPackageArgument);
        };
        let version = match args.get(1) {
            Some(raw) => {
                Some(
                    Version::parse(raw).map_err(|source| CommandError::InvalidVersion {
                        given: raw.clone(),
                        source,
                    })?,
                )
            }
            None => None,
        };

        let feed = self.feed()?;
        let installed = feed.install(id, version.as_ref())?;
        println!(
            "installed {} {} -> {}",
            installed.id,
            installed.version,
            installed.path.display()
        );
        Ok(())
    }

    fn list_command(&mut self, args: &[String]) -> Result<(), CommandError> {
        let verbose = self.config.verbose;
        let feed = self.feed()?;
        let catalog = self.catalog.get_or_fetch(&feed)?;
        let lines = format_list_lines(
            catalog,
            args.first().map(String::as_str),
            verbose,
            usable_width(),
        );
        for line in lines {
            println!("{line}");
        }
        Ok(())
    }

    fn pack_command(&self, args: &[String]) -> Result<(), CommandError> {
        let manifest_path = args
            .first()
            .map(|raw| Path::new(raw.as_str()))
            .unwrap_or_else(|| Path::new("package.toml"));
        let manifest = load_manifest(manifest_path).map_err(CommandError::Pack)?;
        let descriptor_path =
            manifest_path.with_file_name(format!("{}.{}.pak", manifest.id, manifest.version));
        write_descriptor(&manifest, &descriptor_path).map_err(CommandError::Pack)?;
        println!(
            "packed {} {} -> {}",
            manifest.id,
            manifest.version,
            descriptor_path.display()
        );
        Ok(())
    }

    fn feed(&mut self) -> Result<Arc<dyn Feed>, CommandError> {
        match &self.feed {
            Some(feed) => Ok(Arc::clone(feed)),
            None => {
                let client =
                    HttpFeed::connect(&self.config.source_url, self.config.api_key.as_deref())?;
                let feed: Arc<dyn Feed> = Arc::new(client);
                self.feed = Some(Arc::clone(&feed));
                Ok(feed)
            }
        }
    }

    fn print_usage(&self, mode: Mode) {
        for line in usage_lines(mode) {
            println!("{line}");
        }
    }
}

fn report(result: Result<(), CommandError>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("{PROGRAM}: {err}");
            1
        }
    }
}

pub(crate) fn format_list_lines(
    catalog: &[PackageSummary],
    term: Option<&str>,
    verbose: bool,
    width: usize,
) -> Vec<String> {
    let mut lines = Vec::new();
    for package in catalog {
        if let Some(term) = term {
            if !package.id_matches(term) {
                continue;
            }
        }
        if verbose {
            lines.push(package.id.clone());
            lines.push(format!("  Version: {}", package.version));
            lines.push(wrap(
                "  ",
                &format!("Description: {}", package.description),
                width,
            ));
        } else {
            lines.push(package.full_name());
        }
    }
    if lines.is_empty() {
        lines.push(format!("{PROGRAM}: no packages"));
    }
    lines
}

pub(crate) fn usage_lines(mode: Mode) -> Vec<String> {
    let mut lines = vec![
        format!("usage: {PROGRAM} [OPTIONS] COMMAND [ARGS]"),
        "commands:".to_string(),
        "   install PACKAGE [VERSION]   install a package from the feed (alias: in)".to_string(),
        "   list [PATTERN]              list feed packages, optionally filtered (alias: ls)"
            .to_string(),
        "   pack [MANIFEST]             build a package descriptor from a local manifest"
            .to_string(),
        "   delete, publish, update     recognized but not yet supported".to_string(),
    ];
    if mode == Mode::Interactive {
        lines.push("   help                        show this help".to_string());
        lines.push("   quit                        leave the session".to_string());
    }
    lines.push("options:".to_string());
    lines.push("   --verbose                   operate in verbose mode".to_string());
    lines.push("   -a, --apikey KEY            api key for the feed".to_string());
    lines.push("   -s, --source URL            override the source feed url".to_string());
    lines.push("   -h, --help                  show this help".to_string());
    lines
}

fn load_manifest(path: &Path) -> anyhow::Result<PackageManifest> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed reading manifest: {}", path.display()))?;
    PackageManifest::from_toml_str(&raw)
}

fn write_descriptor(manifest: &PackageManifest, path: &Path) -> anyhow::Result<()> {
    let body = serde_json::to_string_pretty(manifest)
        .context("failed encoding package descriptor")?;
    std::fs::write(path, body)
        .with_context(|| format!("failed writing descriptor: {}", path.display()))?;
    Ok(())
}
