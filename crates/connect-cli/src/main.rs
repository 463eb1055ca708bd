//! Site manager dashboard CLI.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use connect_cli::logging::{LogConfig, LogFormat, init_logging};
use connect_client::ClientError;
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{
    Environment, run_concepts, run_doctor, run_edit, run_incentive, run_lookup, run_reset_survey,
    run_summary,
};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(&cli) {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(error) => {
            eprintln!("error: {error:#}");
            if let Some(client_error) = error.downcast_ref::<ClientError>() {
                eprintln!("{}", client_error.user_message());
            }
            1
        }
    };
    std::process::exit(exit_code);
}

/// Runs the selected command; `Ok(false)` exits non-zero without an error
/// message.
fn run(cli: &Cli) -> anyhow::Result<bool> {
    let env = Environment::load(cli)?;
    match &cli.command {
        Command::Summary(args) => run_summary(&env, args).map(|()| true),
        Command::Lookup(args) => run_lookup(&env, args).map(|()| true),
        Command::Concepts(args) => run_concepts(&env, args).map(|()| true),
        Command::Doctor(args) => run_doctor(&env, args),
        Command::Incentive(args) => run_incentive(&env, args).map(|()| true),
        Command::ResetSurvey(args) => run_reset_survey(&env, args).map(|()| true),
        Command::Edit(args) => run_edit(&env, args).map(|()| true),
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig::default()
        .with_level_filter(cli.verbosity.tracing_level_filter())
        .with_log_data(cli.log_data);
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config = config.with_format(match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    });
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
