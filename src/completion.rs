//! # Shell Completion Module
//!
//! Shell completion support for Tunepick:
//! - Generation of completion scripts for various shells
//! - Enhanced bash and fish scripts that complete `--genre` from the catalog
//!   by calling the hidden `tunepick complete-genres` command
//!
//! ## Usage
//!
//! ```bash
//! # Generate bash completions
//! tunepick completion bash > ~/.local/share/bash-completion/completions/tunepick
//!
//! # Generate zsh completions
//! tunepick completion zsh > ~/.config/zsh/completions/_tunepick
//!
//! # Bash completions with genre names from the catalog
//! tunepick completion-enhanced bash > ~/.local/share/bash-completion/completions/tunepick
//! ```

use crate::catalog;
use crate::cli::Shell;
use crate::config::RuntimeConfig;
use clap::Command;
use clap_complete::{generate, Generator, Shell as CompletionShell};
use log::debug;
use std::io::{self, Write};

/// Generate shell completions for the given shell
pub fn generate_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
}

/// Convert our Shell enum to clap_complete's Shell enum
#[must_use]
pub fn shell_to_completion_shell(shell: &Shell) -> CompletionShell {
    match shell {
        Shell::Bash => CompletionShell::Bash,
        Shell::Zsh => CompletionShell::Zsh,
        Shell::Fish => CompletionShell::Fish,
        Shell::PowerShell => CompletionShell::PowerShell,
        Shell::Elvish => CompletionShell::Elvish,
    }
}

/// Enhanced completion script for `shell`, or `None` if only the static
/// script from [`generate_completions`] is available for it.
#[must_use]
pub fn enhanced_completion_script(shell: &Shell) -> Option<&'static str> {
    match shell {
        Shell::Bash => Some(ENHANCED_BASH_COMPLETION),
        Shell::Fish => Some(ENHANCED_FISH_COMPLETION),
        Shell::Zsh | Shell::PowerShell | Shell::Elvish => None,
    }
}

/// Bash script completing `--genre` with the genres of the current catalog.
pub const ENHANCED_BASH_COMPLETION: &str = r#"#!/bin/bash
# Enhanced Tunepick completion script with genre name completion
# Install with: tunepick completion-enhanced bash > ~/.local/share/bash-completion/completions/tunepick

_tunepick_complete_genres() {
    # Genres come one per line; escape them so names with spaces stay one word
    local genre
    if command -v tunepick >/dev/null 2>&1; then
        tunepick complete-genres 2>/dev/null | while IFS= read -r genre; do
            if [[ "${genre,,}" == "${1,,}"* ]]; then
                printf '%q
' "$genre"
            fi
        done
    fi
}

_tunepick() {
    local cur prev words cword
    _init_completion || return

    case "${prev}" in
        --genre)
            mapfile -t COMPREPLY < <(_tunepick_complete_genres "${cur}")
            return 0
            ;;
        --tempo)
            COMPREPLY=($(compgen -W "Fast Slow" -- "${cur}"))
            return 0
            ;;
        --energy)
            COMPREPLY=($(compgen -W "Upbeat Calm" -- "${cur}"))
            return 0
            ;;
        --instrumentation)
            COMPREPLY=($(compgen -W "Instrumental WithLyrics" -- "${cur}"))
            return 0
            ;;
        --mood)
            COMPREPLY=($(compgen -W "Happy Sad Romantic Chill Energetic" -- "${cur}"))
            return 0
            ;;
        --catalog)
            _filedir
            return 0
            ;;
        --delimiter)
            COMPREPLY=($(compgen -W "';' ',' tab" -- "${cur}"))
            return 0
            ;;
        completion)
            COMPREPLY=($(compgen -W "bash zsh fish power-shell elvish" -- "${cur}"))
            return 0
            ;;
        completion-enhanced)
            COMPREPLY=($(compgen -W "bash fish" -- "${cur}"))
            return 0
            ;;
    esac

    local subcommands="recommend quiz genres completion completion-enhanced help"

    if [[ $cword -eq 1 ]]; then
        COMPREPLY=($(compgen -W "$subcommands --catalog --delimiter --help --version" -- "${cur}"))
    else
        case "${words[1]}" in
            recommend)
                COMPREPLY=($(compgen -W "--genre --tempo --energy --instrumentation --mood --json --explain --catalog --delimiter --help" -- "${cur}"))
                ;;
            quiz)
                COMPREPLY=($(compgen -W "--explain --catalog --delimiter --help" -- "${cur}"))
                ;;
            help)
                COMPREPLY=($(compgen -W "$subcommands" -- "${cur}"))
                ;;
            *)
                COMPREPLY=($(compgen -W "--catalog --delimiter --help" -- "${cur}"))
                ;;
        esac
    fi
} &&
complete -F _tunepick tunepick
"#;

/// Fish script completing `--genre` with the genres of the current catalog.
pub const ENHANCED_FISH_COMPLETION: &str = r#"# Enhanced Tunepick completion script for Fish shell with genre name completion
# Install with: tunepick completion-enhanced fish > ~/.config/fish/completions/tunepick.fish

function __tunepick_complete_genres
    if command -sq tunepick
        tunepick complete-genres 2>/dev/null
    end
end

# Clear existing completions to avoid conflicts
complete -c tunepick -e

# Global options
complete -c tunepick -s h -l help -d 'Print help information'
complete -c tunepick -s V -l version -d 'Print version information'
complete -c tunepick -l catalog -r -F -d 'Catalog file to recommend from'
complete -c tunepick -l delimiter -x -a "';' ',' tab" -d 'Field separator of the catalog file'

# Main commands
complete -c tunepick -f -n '__fish_use_subcommand' -a 'recommend' -d 'Recommend a song from answers given on the command line'
complete -c tunepick -f -n '__fish_use_subcommand' -a 'quiz' -d 'Answer the questionnaire interactively'
complete -c tunepick -f -n '__fish_use_subcommand' -a 'genres' -d 'List the genres available in the catalog'
complete -c tunepick -f -n '__fish_use_subcommand' -a 'completion' -d 'Generate shell completions'
complete -c tunepick -f -n '__fish_use_subcommand' -a 'completion-enhanced' -d 'Generate shell completions with genre names'
complete -c tunepick -f -n '__fish_use_subcommand' -a 'help' -d 'Print help for commands'

# recommend command - answers, genre names from the catalog
complete -c tunepick -f -n '__fish_seen_subcommand_from recommend' -l genre -x -a '(__tunepick_complete_genres)' -d 'Genre to pick from'
complete -c tunepick -f -n '__fish_seen_subcommand_from recommend' -l tempo -x -a 'Fast Slow' -d 'Preferred song speed'
complete -c tunepick -f -n '__fish_seen_subcommand_from recommend' -l energy -x -a 'Upbeat Calm' -d 'Upbeat or calm music'
complete -c tunepick -f -n '__fish_seen_subcommand_from recommend' -l instrumentation -x -a 'Instrumental WithLyrics' -d 'Instrumental or lyrical songs'
complete -c tunepick -f -n '__fish_seen_subcommand_from recommend' -l mood -x -a 'Happy Sad Romantic Chill Energetic' -d 'Current mood'
complete -c tunepick -f -n '__fish_seen_subcommand_from recommend' -l json -d 'Print the result as JSON'
complete -c tunepick -f -n '__fish_seen_subcommand_from recommend quiz' -s e -l explain -d 'Show the target profile and every score'

# completion commands - complete with shell types
complete -c tunepick -f -n '__fish_seen_subcommand_from completion' -a 'bash zsh fish power-shell elvish'
complete -c tunepick -f -n '__fish_seen_subcommand_from completion-enhanced' -a 'bash fish'
"#;

/// Genre names for completion. Empty when the catalog cannot be loaded,
/// since completion must never fail loudly.
#[must_use]
pub fn get_genre_completions(config: &RuntimeConfig) -> Vec<String> {
    match catalog::load_cached(&config.catalog_path, config.delimiter) {
        Ok(catalog) => catalog.genres(),
        Err(e) => {
            debug!("No genre completions: {e}");
            Vec::new()
        }
    }
}

/// Writes one genre per line, unquoted. The enhanced scripts escape names
/// themselves.
///
/// # Errors
///
/// Propagates write errors.
pub fn write_genre_completions<W: Write>(out: &mut W, genres: &[String]) -> io::Result<()> {
    for genre in genres {
        writeln!(out, "{genre}")?;
    }
    Ok(())
}

/// Print available genre completions to stdout
///
/// # Errors
///
/// Propagates stdout write errors.
pub fn print_genre_completions(config: &RuntimeConfig) -> io::Result<()> {
    write_genre_completions(&mut io::stdout().lock(), &get_genre_completions(config))
}
