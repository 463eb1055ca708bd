//! CLI argument definitions.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use connect_cli::input::{Assignment, parse_assignment, parse_connect_id, parse_date};
use connect_client::{ParticipantQuery, SurveyKind};

#[derive(Parser)]
#[command(
    name = "connect-dashboard",
    version,
    about = "Site manager dashboard - participant status and maintenance",
    long_about = "Derive participant activity status from backend records and run the\n\
                  site-manager maintenance actions (lookups, edits, incentive and survey\n\
                  resets) from the command line."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Include participant identifiers in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// Dashboard configuration file (TOML).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Concept map to use instead of the embedded one.
    #[arg(long = "concepts", value_name = "PATH", global = true)]
    pub concepts: Option<PathBuf>,

    /// Backend API base URL (overrides config and CONNECT_API_BASE).
    #[arg(long = "api-base", value_name = "URL", global = true)]
    pub api_base: Option<String>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the status table for participants saved as JSON.
    Summary(SummaryArgs),

    /// Look participants up on the backend and print their status tables.
    Lookup(LookupArgs),

    /// Resolve symbolic field names, or list every field.
    Concepts(ConceptsArgs),

    /// Verify the concept map and report its contents.
    Doctor(DoctorArgs),

    /// Show the baseline incentive gate and submit the update when permitted.
    Incentive(IncentiveArgs),

    /// Reset a survey for a participant.
    ResetSurvey(ResetSurveyArgs),

    /// Stage field edits for a participant and submit them.
    Edit(EditArgs),
}

#[derive(Args)]
pub struct SummaryArgs {
    /// A participant record, a list of records, or a saved lookup response.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Print rows as JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
pub struct LookupArgs {
    #[command(flatten)]
    pub filters: FilterArgs,

    /// Print rows as JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
pub struct FilterArgs {
    #[arg(long = "connect-id", value_parser = parse_connect_id)]
    pub connect_id: Option<u64>,
    #[arg(long = "email")]
    pub email: Option<String>,
    #[arg(long = "phone")]
    pub phone: Option<String>,
    #[arg(long = "first-name")]
    pub first_name: Option<String>,
    #[arg(long = "last-name")]
    pub last_name: Option<String>,
    /// Date of birth as YYYYMMDD.
    #[arg(long = "dob")]
    pub dob: Option<String>,
    #[arg(long = "study-id")]
    pub study_id: Option<String>,
}

impl FilterArgs {
    pub fn to_query(&self) -> ParticipantQuery {
        ParticipantQuery {
            connect_id: self.connect_id.map(|id| id.to_string()),
            email: self.email.clone(),
            phone: self.phone.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            dob: self.dob.clone(),
            study_id: self.study_id.clone(),
        }
    }
}

#[derive(Args)]
pub struct ConceptsArgs {
    /// Names to resolve; `group.value` resolves a code inside a group.
    #[arg(value_name = "NAME")]
    pub names: Vec<String>,
}

#[derive(Args)]
pub struct DoctorArgs {
    /// Print the report as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
pub struct IncentiveArgs {
    #[arg(long = "connect-id", value_parser = parse_connect_id)]
    pub connect_id: u64,

    /// Date of eligibility as YYYY-MM-DD (default: today, UTC).
    #[arg(long = "eligibility-date", value_parser = parse_date)]
    pub eligibility_date: Option<NaiveDate>,

    /// Show the gate without submitting.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Args)]
pub struct ResetSurveyArgs {
    #[arg(long = "connect-id", value_parser = parse_connect_id)]
    pub connect_id: u64,

    #[arg(long = "survey")]
    pub survey: SurveyKind,
}

#[derive(Args)]
pub struct EditArgs {
    #[arg(long = "connect-id", value_parser = parse_connect_id)]
    pub connect_id: u64,

    /// FIELD=VALUE to stage; repeat for several fields.
    #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment, required = true)]
    pub set: Vec<Assignment>,

    /// Print the request body without submitting.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
