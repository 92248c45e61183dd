//! # Command-Line Interface Module
//!
//! This module defines the command-line interface for Tunepick using Clap
//! derive macros.
//!
//! ## Commands
//!
//! - `recommend`: One-shot recommendation from answers given as flags
//! - `quiz`: Ask the questionnaire interactively, then recommend
//! - `genres`: List the genres available in the catalog
//! - `completion`: Generate shell completion scripts
//! - `completion-enhanced`: Bash or fish scripts that also complete genres
//!
//! ## Examples
//!
//! ```bash
//! tunepick genres
//! tunepick recommend --genre "dance pop" --tempo fast --energy upbeat \
//!     --instrumentation "with lyrics" --mood happy
//! tunepick --catalog ~/songs.csv --delimiter , quiz
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Shell types supported for completion generation
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    PowerShell,
    /// Elvish shell
    Elvish,
}

/// Main application arguments structure.
///
/// Catalog location and delimiter are global so every subcommand reads the
/// same catalog. Both fall back to `config.json` and then to the defaults.
#[derive(Parser, Debug)]
#[command(name = "tunepick")]
#[command(about = "Tunepick: answer five questions, get a song")]
#[command(version)]
pub struct Args {
    /// Catalog file to recommend from
    #[arg(long, global = true, env = "TUNEPICK_CATALOG", value_hint = clap::ValueHint::FilePath)]
    pub catalog: Option<PathBuf>,

    /// Field separator of the catalog file (single character, `tab` for tabs)
    #[arg(long, global = true, env = "TUNEPICK_DELIMITER")]
    pub delimiter: Option<String>,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Enumeration of all available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Recommend a song from answers given on the command line
    ///
    /// Prints the closest song in the chosen genre and up to five similar
    /// songs. Answers are matched case-insensitively.
    Recommend {
        /// Genre to pick from (see `tunepick genres`)
        #[arg(long)]
        genre: String,

        /// Fast or Slow
        #[arg(long)]
        tempo: String,

        /// Upbeat or Calm
        #[arg(long)]
        energy: String,

        /// Instrumental or "With Lyrics"
        #[arg(long)]
        instrumentation: String,

        /// Happy, Sad, Romantic, Chill or Energetic
        #[arg(long)]
        mood: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,

        /// Show the target profile and every score
        #[arg(short, long)]
        explain: bool,
    },

    /// Answer the questionnaire interactively
    ///
    /// Asks for genre, tempo, energy, instrumentation and mood, re-asking
    /// any question with an invalid answer, then prints a recommendation.
    Quiz {
        /// Show the target profile and every score
        #[arg(short, long)]
        explain: bool,
    },

    /// List the genres available in the catalog
    Genres,

    /// Generate shell completions
    ///
    /// Usage: tunepick completion bash > ~/.local/share/bash-completion/completions/tunepick
    Completion {
        /// Shell to generate completions for
        shell: Shell,
    },

    /// Generate shell completions that complete `--genre` from the catalog
    ///
    /// Usage: tunepick completion-enhanced bash > ~/.local/share/bash-completion/completions/tunepick
    /// Usage: tunepick completion-enhanced fish > ~/.config/fish/completions/tunepick.fish
    CompletionEnhanced {
        /// Shell to generate enhanced completions for (bash and fish supported)
        shell: Shell,
    },

    /// List genres for completion scripts (hidden command)
    #[command(hide = true)]
    CompleteGenres,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_recommend() {
        let args = Args::try_parse_from([
            "tunepick",
            "--delimiter",
            ",",
            "recommend",
            "--genre",
            "dance pop",
            "--tempo",
            "fast",
            "--energy",
            "calm",
            "--instrumentation",
            "With Lyrics",
            "--mood",
            "sad",
            "--json",
        ])
        .expect("valid arguments");

        assert_eq!(args.delimiter.as_deref(), Some(","));
        match args.command {
            Command::Recommend { genre, instrumentation, json, explain, .. } => {
                assert_eq!(genre, "dance pop");
                assert_eq!(instrumentation, "With Lyrics");
                assert!(json);
                assert!(!explain);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_global_catalog_after_subcommand() {
        let args = Args::try_parse_from(["tunepick", "genres", "--catalog", "songs.csv"])
            .expect("valid arguments");
        assert_eq!(args.catalog, Some(PathBuf::from("songs.csv")));
    }

    #[test]
    fn test_parse_completion_enhanced() {
        let args = Args::try_parse_from(["tunepick", "completion-enhanced", "fish"])
            .expect("valid arguments");
        assert!(matches!(
            args.command,
            Command::CompletionEnhanced { shell: Shell::Fish }
        ));
    }

    #[test]
    fn test_recommend_requires_all_answers() {
        assert!(Args::try_parse_from(["tunepick", "recommend", "--genre", "pop"]).is_err());
    }
}
