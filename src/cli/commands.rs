//! Command dispatch for the daidetree binary

use std::io;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::{load_message, ScoringService};
use crate::cli::args::{Cli, Commands, ConfigCommands, MessagePair};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::{parse, trees_equal, TreeNodeConvert};
use crate::exitcode;

/// Run the parsed command, returning the process exit code.
pub fn execute_command(cli: &Cli) -> CliResult<i32> {
    let project_dir = match &cli.project_dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().map_err(|e| CliError::Usage(format!("cannot determine cwd: {e}")))?,
    };
    let settings = Settings::load(Some(&project_dir))?;
    debug!("settings: {:?}", settings);

    match &cli.command {
        Some(Commands::Tree { message, signatures }) => {
            let message = read_message(cli, message)?;
            cmd_tree(&message, *signatures || settings.display.show_signatures)
        }
        Some(Commands::Equal(pair)) => {
            let (candidate, reference) = read_pair(cli, pair)?;
            cmd_equal(&candidate, &reference)
        }
        Some(Commands::Score {
            pair,
            abstract_names,
            keep_names,
        }) => {
            let (candidate, reference) = read_pair(cli, pair)?;
            let abstract_override = match (abstract_names, keep_names) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            cmd_score(&settings, &candidate, &reference, abstract_override)
        }
        Some(Commands::Config { command }) => cmd_config(&settings, &project_dir, command),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(exitcode::OK)
        }
        None => Err(CliError::Usage(
            "no command given, see --help".to_string(),
        )),
    }
}

fn read_message(cli: &Cli, argument: &str) -> CliResult<String> {
    if cli.from_file {
        Ok(load_message(Path::new(argument))?)
    } else {
        Ok(argument.to_string())
    }
}

fn read_pair(cli: &Cli, pair: &MessagePair) -> CliResult<(String, String)> {
    Ok((
        read_message(cli, &pair.candidate)?,
        read_message(cli, &pair.reference)?,
    ))
}

#[instrument]
fn cmd_tree(message: &str, signatures: bool) -> CliResult<i32> {
    let tree = parse(message);
    if signatures {
        output::info(&tree.to_signature_tree());
    } else {
        output::info(&tree);
    }
    Ok(exitcode::OK)
}

#[instrument]
fn cmd_equal(candidate: &str, reference: &str) -> CliResult<i32> {
    let (candidate_tree, reference_tree) = (parse(candidate), parse(reference));
    if trees_equal(Some(&candidate_tree), Some(&reference_tree)) {
        output::success("messages are equal");
        Ok(exitcode::OK)
    } else {
        output::failure("messages differ");
        Ok(exitcode::UNEQUAL)
    }
}

#[instrument(skip(settings))]
fn cmd_score(
    settings: &Settings,
    candidate: &str,
    reference: &str,
    abstract_override: Option<bool>,
) -> CliResult<i32> {
    let service = ScoringService::new(settings.scoring.clone());
    let report = service.score_with(candidate, reference, abstract_override);
    let precision = settings.display.precision;

    output::header("Score");
    output::detail(&format!("equal:     {}", report.equal));
    output::score("accuracy", report.accuracy, precision);
    output::score("f-score", report.f_score, precision);
    if report.abstract_names {
        output::detail("(f-score compares structure only)");
    }
    Ok(exitcode::OK)
}

fn cmd_config(settings: &Settings, project_dir: &Path, command: &ConfigCommands) -> CliResult<i32> {
    match command {
        ConfigCommands::Show => output::info(&settings.to_toml()?),
        ConfigCommands::Template => output::info(&Settings::template()),
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => output::detail(&format!("global: {}", path.display())),
                None => output::detail("global: (no home directory)"),
            }
            output::detail(&format!("local:  {}", local_config_path(project_dir).display()));
        }
    }
    Ok(exitcode::OK)
}
