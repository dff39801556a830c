//! Command-line interface for the harvester.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::{validate_date, validate_title_number, HarvesterConfig};
use crate::error::Result;
use crate::harvester::harvest_title;
use crate::http::create_client;
use crate::types::{DateChoice, PartScope};
use crate::versioner::{fetch_titles, resolve_title_date};

/// eCFR Harvester - Download US federal regulations as per-section JSON documents.
#[derive(Parser)]
#[command(name = "ecfr-harvester")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download one or more CFR titles and write a JSON document per section.
    Download {
        /// CFR title numbers (e.g., 29)
        #[arg(required = true)]
        titles: Vec<u32>,

        /// Directory for cached title XML (default: cache/)
        #[arg(long)]
        cache_dir: Option<PathBuf>,

        /// Output directory (default: documents/)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Download even when a cached copy exists
        #[arg(long)]
        no_cache: bool,

        /// Issue date in YYYY-MM-DD format (default: latest issue)
        #[arg(short, long)]
        date: Option<String>,

        /// Where parts and subparts are searched
        #[arg(long, value_enum, default_value_t = ScopeArg::Subchapter)]
        scope: ScopeArg,
    },

    /// Print the latest issue or amendment date of a title.
    Date {
        /// CFR title number
        title: u32,

        /// Which date to print
        #[arg(short, long, value_enum, default_value_t = DateKindArg::Issue)]
        kind: DateKindArg,
    },

    /// List all titles with their dates.
    Titles,
}

/// Part/subpart search scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScopeArg {
    /// Parts within their subchapter, subparts within their part
    Subchapter,
    /// Every part and subpart of the title under every subchapter
    Document,
}

impl From<ScopeArg> for PartScope {
    fn from(arg: ScopeArg) -> Self {
        match arg {
            ScopeArg::Subchapter => PartScope::Subchapter,
            ScopeArg::Document => PartScope::Document,
        }
    }
}

/// Date kind selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DateKindArg {
    /// Latest issue date
    Issue,
    /// Latest amended date
    Amended,
}

impl From<DateKindArg> for DateChoice {
    fn from(arg: DateKindArg) -> Self {
        match arg {
            DateKindArg::Issue => DateChoice::LatestIssueDate,
            DateKindArg::Amended => DateChoice::LatestAmendedOn,
        }
    }
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Download {
            titles,
            cache_dir,
            output,
            no_cache,
            date,
            scope,
        } => {
            let mut config = HarvesterConfig::new()
                .with_bypass_cache(no_cache)
                .with_part_scope(scope.into());
            if let Some(dir) = cache_dir {
                config = config.with_cache_dir(dir);
            }
            if let Some(dir) = output {
                config = config.with_output_dir(dir);
            }
            if let Some(date) = date {
                config = config.with_issue_date(date);
            }
            download_command(&config, &titles)
        }
        Commands::Date { title, kind } => date_command(title, kind.into()),
        Commands::Titles => titles_command(),
    }
}

/// Execute the download command.
fn download_command(config: &HarvesterConfig, titles: &[u32]) -> Result<()> {
    // Validate inputs before making HTTP requests
    for &title in titles {
        validate_title_number(title)?;
    }
    if let Some(date) = &config.issue_date {
        validate_date(date)?;
    }

    for &title in titles {
        println!(
            "{} title {}",
            style("Harvesting").bold(),
            style(title).cyan()
        );

        let pb = ProgressBar::new_spinner();
        #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .expect("valid template"),
        );
        pb.set_message("Loading XML and writing documents...");
        pb.enable_steady_tick(std::time::Duration::from_millis(100));

        let summary = match harvest_title(config, title) {
            Ok(summary) => summary,
            Err(e) => {
                pb.finish_and_clear();
                return Err(e);
            }
        };

        pb.finish_and_clear();

        println!("  Title: {}", style(&summary.title_description).green());
        println!("  Source: {}", summary.source.as_str());
        println!("  Documents: {}", summary.documents_written);
        println!(
            "{} {}",
            style("Saved to:").green().bold(),
            summary.output_dir.display()
        );
        println!();
    }

    Ok(())
}

/// Execute the date command.
fn date_command(title: u32, choice: DateChoice) -> Result<()> {
    validate_title_number(title)?;

    let client = create_client()?;
    match resolve_title_date(&client, &HarvesterConfig::new(), title, choice)? {
        Some(date) => println!("{date}"),
        None => println!(
            "{} title {} has no {}",
            style("Not found:").yellow().bold(),
            title,
            choice.as_str()
        ),
    }

    Ok(())
}

/// Execute the titles command.
fn titles_command() -> Result<()> {
    let client = create_client()?;
    let titles = fetch_titles(&client, &HarvesterConfig::new())?;

    for title in titles {
        let name = if title.reserved {
            style(title.name).dim()
        } else {
            style(title.name).green()
        };
        println!(
            "{:>3}  {}  issued {}  amended {}",
            title.number,
            name,
            title.latest_issue_date.as_deref().unwrap_or("-"),
            title.latest_amended_on.as_deref().unwrap_or("-"),
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_download() {
        let cli = Cli::parse_from(["ecfr-harvester", "download", "29"]);

        let Commands::Download {
            titles,
            cache_dir,
            output,
            no_cache,
            date,
            scope,
        } = cli.command
        else {
            panic!("expected download command");
        };
        assert_eq!(titles, vec![29]);
        assert!(cache_dir.is_none());
        assert!(output.is_none());
        assert!(!no_cache);
        assert!(date.is_none());
        assert_eq!(scope, ScopeArg::Subchapter);
    }

    #[test]
    fn test_cli_parse_download_with_options() {
        let cli = Cli::parse_from([
            "ecfr-harvester",
            "download",
            "29",
            "40",
            "--no-cache",
            "--date",
            "2024-05-01",
            "--scope",
            "document",
            "--output",
            "/tmp/out",
        ]);

        let Commands::Download {
            titles,
            no_cache,
            date,
            scope,
            output,
            ..
        } = cli.command
        else {
            panic!("expected download command");
        };
        assert_eq!(titles, vec![29, 40]);
        assert!(no_cache);
        assert_eq!(date, Some("2024-05-01".to_string()));
        assert_eq!(PartScope::from(scope), PartScope::Document);
        assert_eq!(output, Some(PathBuf::from("/tmp/out")));
    }

    #[test]
    fn test_cli_parse_date() {
        let cli = Cli::parse_from(["ecfr-harvester", "date", "29", "--kind", "amended"]);

        let Commands::Date { title, kind } = cli.command else {
            panic!("expected date command");
        };
        assert_eq!(title, 29);
        assert_eq!(DateChoice::from(kind), DateChoice::LatestAmendedOn);
    }

    #[test]
    fn test_cli_download_requires_title() {
        assert!(Cli::try_parse_from(["ecfr-harvester", "download"]).is_err());
    }
}
