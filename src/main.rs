use std::io;

use clap::{Args, Parser, Subcommand};
use soroban_tutor::{
    constants::LOG,
    monitor::{Monitor, StateMachine, TutorError},
};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
    /// Load a curriculum file (YAML or JSON) instead of the built-in one
    #[arg(long, global = true)]
    curriculum: Option<String>,
    /// Where to write logs
    #[arg(long, global = true)]
    log: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the interactive tutorial (default)
    #[command(name = "learn")]
    Learn(LearnArgs),
    /// List all available modules
    #[command(name = "list")]
    List,
    /// Check the curriculum format
    #[command(name = "check")]
    Check,
}

#[derive(Args, Debug, Default)]
struct LearnArgs {
    /// Open this module straight away, numbered as in `list`
    #[arg(long = "module", value_name = "NUMBER", value_parser = parse_module_index)]
    index_module: Option<usize>,
}

/// Turns a module number, starting at 1 as printed by `list`, into an index.
fn parse_module_index(arg: &str) -> Result<usize, String> {
    arg.parse::<usize>()
        .map_err(|err| err.to_string())?
        .checked_sub(1)
        .ok_or_else(|| "module numbers start at 1".to_string())
}

fn main() -> Result<(), TutorError> {
    let args = Cli::parse();

    let path_log = args.log.as_deref().unwrap_or(LOG);
    let file = std::fs::OpenOptions::new()
        .read(true)
        .create(true)
        .append(true)
        .open(path_log)?;

    let _ = simplelog::WriteLogger::init(
        simplelog::LevelFilter::Debug,
        simplelog::ConfigBuilder::default()
            .add_filter_allow_str("soroban_tutor")
            .build(),
        file,
    );

    let monitor = Monitor::new(args.curriculum.as_deref())?;

    match args.command.unwrap_or(Command::Learn(LearnArgs::default())) {
        Command::Learn(LearnArgs { index_module }) => {
            let mut tutor = monitor.into_tutor(
                index_module,
                io::stdin().lock(),
                io::stdout(),
            )?;

            while !tutor.is_finished() {
                tutor = tutor.run();
            }
        }
        Command::List => {
            let mut lister = monitor.into_lister(io::stdout())?;

            while !lister.is_finished() {
                lister = lister.run();
            }
        }
        Command::Check => {
            let mut checker = monitor.into_checker();

            while !checker.is_finished() {
                checker = checker.run();
            }

            if !checker.is_valid() {
                return Err(TutorError::CheckFailed);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_module(args: &[&str]) -> Option<usize> {
        match Cli::try_parse_from(args).unwrap().command {
            Some(Command::Learn(LearnArgs { index_module })) => index_module,
            _ => panic!("expected the learn command"),
        }
    }

    #[test]
    fn test_module_numbers_start_at_one() {
        assert_eq!(index_module(&["soroban-tutor", "learn", "--module", "1"]), Some(0));
        assert_eq!(index_module(&["soroban-tutor", "learn", "--module", "8"]), Some(7));
        assert_eq!(index_module(&["soroban-tutor", "learn"]), None);
    }

    #[test]
    fn test_module_number_rejected() {
        assert!(parse_module_index("0").is_err());
        assert!(parse_module_index("-1").is_err());
        assert!(parse_module_index("first").is_err());
        assert!(parse_module_index("18446744073709551616").is_err());
        assert_eq!(
            parse_module_index(&usize::MAX.to_string()),
            Ok(usize::MAX - 1)
        );
        assert!(Cli::try_parse_from(["soroban-tutor", "learn", "--module", "0"]).is_err());
    }
}
