//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueHint};

/// Canonical trees, equality and similarity scores for DAIDE messages
#[derive(Parser, Debug)]
#[command(name = "daidetree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Directory holding a local .daidetree.toml (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub project_dir: Option<PathBuf>,

    /// Treat message arguments as paths to files containing the message
    #[arg(long, global = true)]
    pub from_file: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the canonical tree of a message
    Tree {
        /// DAIDE message
        message: String,

        /// Annotate nodes with their signatures
        #[arg(short, long)]
        signatures: bool,
    },

    /// Check whether two messages are structurally equal (exit code 1 if not)
    Equal(MessagePair),

    /// Score a generated message against a reference
    Score {
        #[command(flatten)]
        pair: MessagePair,

        /// Compare structure only in the F-score
        #[arg(long, conflicts_with = "keep_names")]
        abstract_names: bool,

        /// Compare power and province names in the F-score
        #[arg(long)]
        keep_names: bool,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// A generated message and the reference it is scored against
#[derive(Args, Debug)]
pub struct MessagePair {
    /// Generated message
    pub candidate: String,

    /// Reference message
    pub reference: String,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration
    Show,

    /// Print a commented configuration template
    Template,

    /// Show configuration file locations
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    // https://docs.rs/clap/latest/clap/_derive/_tutorial/index.html#testing
    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn given_score_flags_then_both_name_modes_conflict() {
        let result = Cli::try_parse_from(["daidetree", "score", "A", "B", "--abstract-names", "--keep-names"]);
        assert!(result.is_err());
    }

    #[test]
    fn given_repeated_debug_flag_then_verbosity_counts() {
        let cli = Cli::try_parse_from(["daidetree", "-dd", "tree", "FRA"]).expect("parse");
        assert_eq!(cli.debug, 2);
        assert!(matches!(cli.command, Some(Commands::Tree { .. })));
    }
}
