//! IPPcode20 interpreter.
//!
//! Usage: `ippcode [--source FILE] [--input FILE] [--stats FILE [--insts] [--vars]] [--compile FILE]`

use std::path::PathBuf;
use std::process::ExitCode;

use clap::parser::ValueSource;
use clap::{ArgGroup, ArgMatches, CommandFactory, FromArgMatches, Parser};
use ippcode_debug::{StatsConfig, StatsItem};
use ippcode_foundation::ErrorKind;
use ippcode_runtime::{Session, SessionConfig};

#[derive(Parser, Debug)]
#[command(name = "ippcode", version)]
#[command(about = "Interpret an IPPcode20 program")]
#[command(group(ArgGroup::new("program").args(["source", "input"]).required(true).multiple(true)))]
#[command(group(ArgGroup::new("items").args(["insts", "vars"]).multiple(true)))]
struct Args {
    /// Program file (IPPcode20 text, or a `.ippc` image); standard input if omitted
    #[arg(long, value_name = "FILE")]
    source: Option<PathBuf>,

    /// File supplying READ input; standard input if omitted
    #[arg(long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Write execution statistics to FILE
    #[arg(long, value_name = "FILE", requires = "items")]
    stats: Option<PathBuf>,

    /// Report the number of executed instructions
    #[arg(long, requires = "stats")]
    insts: bool,

    /// Report the most variables declared at once
    #[arg(long, requires = "stats")]
    vars: bool,

    /// Save the validated program as an image before running
    #[arg(long, value_name = "FILE")]
    compile: Option<PathBuf>,
}

fn main() -> ExitCode {
    ippcode_runtime::init_logging();

    let matches = match Args::command().try_get_matches() {
        Ok(matches) => matches,
        Err(err) => {
            let _ = err.print();
            if err.use_stderr() {
                return ExitCode::from(
                    ErrorKind::InvalidArguments(err.to_string()).exit_code(),
                );
            }
            return ExitCode::SUCCESS;
        }
    };
    let args = match Args::from_arg_matches(&matches) {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            return ExitCode::from(ErrorKind::InvalidArguments(err.to_string()).exit_code());
        }
    };

    let session = Session::new(session_config(args, &matches));
    match session.run() {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            match &err.context {
                Some(context) => eprintln!("error: {} {context}", err.kind),
                None => eprintln!("error: {}", err.kind),
            }
            ExitCode::from(err.exit_code())
        }
    }
}

fn session_config(args: Args, matches: &ArgMatches) -> SessionConfig {
    let mut config = SessionConfig::new();
    if let Some(source) = args.source {
        config = config.with_source(source);
    }
    if let Some(input) = args.input {
        config = config.with_input(input);
    }
    if let Some(compile) = args.compile {
        config = config.with_compile(compile);
    }
    if let Some(stats) = args.stats {
        config = config.with_stats(stats, stats_items(matches));
    }
    config
}

/// Report items in command-line order.
fn stats_items(matches: &ArgMatches) -> StatsConfig {
    let mut items: Vec<(usize, StatsItem)> = [("insts", StatsItem::Insts), ("vars", StatsItem::Vars)]
        .into_iter()
        .filter(|(id, _)| matches.value_source(id) == Some(ValueSource::CommandLine))
        .filter_map(|(id, item)| matches.index_of(id).map(|index| (index, item)))
        .collect();
    items.sort_by_key(|(index, _)| *index);

    items
        .into_iter()
        .fold(StatsConfig::new(), |config, (_, item)| config.with_item(item))
}
