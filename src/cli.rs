use crate::gitlab::{ErrorPolicy, GitLabClient, ReqwestTransport};
use crate::model::{DateRange, ReportOutput, SCHEMA_VERSION};
use crate::observer::{LogObserver, Observer, ProgressObserver};
use crate::report::{build_report, output_summary, write_json, write_report};
use crate::util::parse_list_argument;
use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, ValueEnum};
use log::{Level, LevelFilter};
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "gitlab-report")]
#[command(about = "Generate a GitLab commit report")]
#[command(version)]
pub struct Cli {
    #[arg(short = 's', long, help = "Start date (format: YYYY-MM-DD)")]
    pub starttime: String,

    #[arg(short = 'e', long, help = "End date (format: YYYY-MM-DD)")]
    pub endtime: String,

    #[arg(short = 't', long, help = "Personal Access Token for GitLab API")]
    pub token: String,

    #[arg(short = 'g', long, help = "GitLab server URL (e.g., https://gitlab.example.com)")]
    pub gitlab: String,

    #[arg(short = 'u', long, help = "Filter commits by a comma-separated list of users (author_name or author_email)")]
    pub user: Option<String>,

    #[arg(short = 'p', long, help = "Filter by a comma-separated list of project names")]
    pub project: Option<String>,

    #[arg(short = 'o', long, default_value = "gitlab_report.txt", help = "Output file name")]
    pub output: PathBuf,

    #[arg(long, help = "Write the report as JSON instead of text")]
    pub json: bool,

    #[arg(long, help = "Fail on the first API error or invalid date instead of continuing")]
    pub strict: bool,

    #[arg(long, value_enum, default_value_t = LogLevel::Debug, help = "Log level")]
    pub log_level: LogLevel,

    #[arg(long, value_name = "SECS", help = "Per-request timeout in seconds (default: none)")]
    pub timeout: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        init_logging(self.log_level.into());

        let users = parse_list_argument(self.user.as_deref());
        let project_names = parse_list_argument(self.project.as_deref());

        let range = match DateRange::parse(&self.starttime, &self.endtime) {
            Ok(range) => range,
            Err(e) => {
                LogObserver.log(Level::Error, "Dates must be in the format YYYY-MM-DD.");
                if self.strict {
                    return Err(e).context("Invalid date range");
                }
                return Ok(());
            }
        };

        let policy = if self.strict {
            ErrorPolicy::Strict
        } else {
            ErrorPolicy::Truncate
        };
        let transport = ReqwestTransport::new(self.timeout.map(Duration::from_secs))
            .context("Failed to build HTTP client")?;
        let client = GitLabClient::new(transport, &self.gitlab, self.token.as_str()).with_policy(policy);

        let observer = ProgressObserver::new();
        observer.log(Level::Info, "Starting the report generation process...");
        let report = build_report(&client, &range, &users, &project_names, &observer);
        observer.finish();
        let report = report.context("Failed to fetch commits from GitLab")?;

        if self.json {
            let output = ReportOutput {
                version: SCHEMA_VERSION,
                generated_at: Utc::now(),
                gitlab_url: client.base_url().to_string(),
                since: range.since(),
                until: range.until(),
                projects: report,
            };
            write_json(&output, &self.output, &observer).context("Failed to write report")?;
            output_summary(&output.projects, &self.output);
        } else {
            write_report(&report, &self.output, &observer).context("Failed to write report")?;
            output_summary(&report, &self.output);
        }

        Ok(())
    }
}

fn init_logging(level: LevelFilter) {
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .target(env_logger::Target::Stderr)
        .format(|buf, record| {
            writeln!(
                buf,
                "{} - {} - {}",
                Utc::now().format("%Y-%m-%d %H:%M:%S,%3f"),
                record.level(),
                record.args()
            )
        })
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> std::result::Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("gitlab-report").chain(args.iter().copied()))
    }

    const REQUIRED: [&str; 8] = ["-s", "2024-01-01", "-e", "2024-01-31", "-t", "tok", "-g", "http://gl"];

    #[test]
    fn defaults() {
        let cli = parse(&REQUIRED).unwrap();
        assert_eq!(cli.output, PathBuf::from("gitlab_report.txt"));
        assert_eq!(cli.log_level, LogLevel::Debug);
        assert!(cli.user.is_none());
        assert!(cli.project.is_none());
        assert!(!cli.strict);
        assert!(!cli.json);
        assert!(cli.timeout.is_none());
    }

    #[test]
    fn long_flags() {
        let cli = parse(&[
            "--starttime", "2024-01-01", "--endtime", "2024-01-31", "--token", "tok",
            "--gitlab", "http://gl", "--user", "alice,bob", "--project", "api",
            "--output", "out.txt", "--log-level", "warn", "--timeout", "30",
        ])
        .unwrap();
        assert_eq!(cli.user.as_deref(), Some("alice,bob"));
        assert_eq!(cli.project.as_deref(), Some("api"));
        assert_eq!(cli.output, PathBuf::from("out.txt"));
        assert_eq!(LevelFilter::from(cli.log_level), LevelFilter::Warn);
        assert_eq!(cli.timeout, Some(30));
    }

    #[test]
    fn required_flags_are_enforced() {
        for skip in [0, 2, 4, 6] {
            let args: Vec<&str> = REQUIRED
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != skip && *i != skip + 1)
                .map(|(_, a)| *a)
                .collect();
            assert!(parse(&args).is_err(), "missing {}", REQUIRED[skip]);
        }
    }
}
