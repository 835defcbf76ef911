//! Command-line surface.
//!
//! Process-level flags are declared with the derive API. The relay options
//! come from the static schema so every declared option is accepted as
//! `--<name>` without repeating the option list here.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Arg, ArgAction, ArgMatches, Command, CommandFactory, FromArgMatches, Parser, ValueEnum};

use crate::config::loader::{hydrate_env_file, SourceLayer};
use crate::config::schema::{OptionInfo, OptionType, ALL_OPTIONS};

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    /// Human-readable, for development.
    #[default]
    Pretty,
    /// One JSON object per line, for log aggregation.
    Json,
}

/// Command line parsed with the env file applied.
#[derive(Debug)]
pub struct Hydrated {
    pub cli: Cli,
    /// Relay options given on the command line.
    pub options: SourceLayer,
    /// Env file that was loaded, or why loading failed.
    pub env_file: Result<Option<PathBuf>, dotenvy::Error>,
}

#[derive(Debug, Parser)]
#[command(name = "message-relayer")]
#[command(about = "Relays cross-domain messages between an L1 and an L2 chain", long_about = None)]
pub struct Cli {
    /// Log output format
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    /// Env file to load before reading the environment [default: ./.env if present]
    #[arg(long, env = "ENV_FILE")]
    pub env_file: Option<PathBuf>,
}

impl Cli {
    /// The full command: process flags plus one argument per relay option.
    pub fn command_with_options() -> Command {
        ALL_OPTIONS
            .iter()
            .fold(Self::command(), |cmd, info| cmd.arg(option_arg(info)))
    }

    /// Parse `std::env::args_os` with the env file applied, exiting with
    /// usage on error.
    pub fn parse_hydrated() -> Hydrated {
        match Self::try_parse_hydrated_from(std::env::args_os()) {
            Ok(hydrated) => hydrated,
            Err(err) => err.exit(),
        }
    }

    /// Parse once to find the env file, load it, then parse again so flags
    /// backed by variables (`LOG_FORMAT`) see the file's values.
    ///
    /// `ENV_FILE` itself is only read from the real environment.
    pub fn try_parse_hydrated_from<I, T>(args: I) -> Result<Hydrated, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let args: Vec<OsString> = args.into_iter().map(Into::into).collect();

        let (first, _) = Self::try_parse_with_options_from(args.iter().cloned())?;
        let env_file = hydrate_env_file(first.env_file.as_deref());

        let (cli, options) = Self::try_parse_with_options_from(args)?;
        Ok(Hydrated { cli, options, env_file })
    }

    /// Parse an explicit argument list.
    pub fn try_parse_with_options_from<I, T>(args: I) -> Result<(Self, SourceLayer), clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = Self::command_with_options().try_get_matches_from(args)?;
        let cli = Self::from_arg_matches(&matches)?;
        Ok((cli, option_layer(&matches)))
    }
}

fn option_arg(info: &OptionInfo) -> Arg {
    let arg = Arg::new(info.name)
        .long(info.name)
        .help(info.help)
        .action(ArgAction::Set);

    match info.kind {
        // A bare `--spreadsheet-mode` switches the mode on.
        OptionType::Bool => arg
            .num_args(0..=1)
            .default_missing_value("true")
            .value_name("BOOL"),
        OptionType::Uint => arg.value_name("N"),
        OptionType::UFloat => arg.value_name("X"),
        OptionType::Str => arg.value_name("VALUE"),
    }
}

/// Collect the relay options given on the command line.
fn option_layer(matches: &ArgMatches) -> SourceLayer {
    ALL_OPTIONS
        .iter()
        .filter_map(|info| {
            matches
                .get_one::<String>(info.name)
                .map(|value| (info.name, value.clone()))
        })
        .collect()
}
