//! # Tunepick - Questionnaire-Driven Song Suggestions
//!
//! Tunepick asks five short questions (genre, tempo, energy, instrumentation
//! and mood) and suggests the closest song from a static catalog, plus up to
//! five similar songs.
//!
//! ## Usage
//!
//! ```bash
//! # See which genres the catalog offers
//! tunepick genres
//!
//! # Answer interactively
//! tunepick quiz
//!
//! # Answer with flags
//! tunepick recommend --genre pop --tempo slow --energy calm \
//!     --instrumentation instrumental --mood chill
//! ```

use anyhow::{bail, Context, Result};
use clap::{CommandFactory, Parser};
use log::{debug, info};
use std::io::{self, Write};
use std::sync::Arc;
use tunepick::catalog::{self, Catalog};
use tunepick::config::RuntimeConfig;
use tunepick::error::RecommendError;
use tunepick::recommender::{self, Recommendation};
use tunepick::{cli, completion, questionnaire, report};

/// Resolves configuration: flags and environment over `config.json` over
/// defaults.
fn runtime_config(args: &cli::Args) -> Result<RuntimeConfig> {
    RuntimeConfig::load()?.with_overrides(args.catalog.clone(), args.delimiter.as_deref())
}

fn open_catalog(config: &RuntimeConfig) -> Result<Arc<Catalog>> {
    debug!("Using catalog {}", config.catalog_path.display());
    catalog::load_cached(&config.catalog_path, config.delimiter).with_context(|| {
        format!(
            "Could not load the song catalog. Pass --catalog <FILE> or place it at {}",
            config.catalog_path.display()
        )
    })
}

/// Prints a recommendation, or the empty-genre warning. An unknown genre is
/// a user-facing notice, not a failure.
fn print_outcome(
    outcome: Result<Recommendation<'_>, RecommendError>,
    json: bool,
    explain: bool,
) -> Result<()> {
    match outcome {
        Ok(recommendation) => {
            let rendered = if json {
                report::render_json(&recommendation)
                    .context("Failed to render recommendation as JSON")?
            } else {
                report::render_text(&recommendation, explain)
            };
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{}", rendered.trim_end())?;
            Ok(())
        }
        Err(RecommendError::NoMatch { genre }) => {
            info!("Genre `{genre}' has no songs");
            eprintln!("{}", report::NO_MATCH_MESSAGE);
            Ok(())
        }
        Err(e @ RecommendError::InvalidPreference(_)) => Err(e.into()),
    }
}

/// Main entry point for the Tunepick application.
///
/// # Logging
///
/// Initializes environment logger which can be controlled via `RUST_LOG`:
/// - `RUST_LOG=debug tunepick quiz` - Enable debug logging
/// - `RUST_LOG=tunepick::scoring=trace tunepick recommend ...` - Every score
fn main() -> Result<()> {
    env_logger::init();

    let args = cli::Args::parse();

    match &args.command {
        cli::Command::Recommend {
            genre,
            tempo,
            energy,
            instrumentation,
            mood,
            json,
            explain,
        } => {
            let config = runtime_config(&args)?;
            let catalog = open_catalog(&config)?;
            let outcome = recommender::recommend_from_answers(
                &catalog,
                genre,
                tempo,
                energy,
                instrumentation,
                mood,
            );
            print_outcome(outcome, *json, *explain)?;
        }
        cli::Command::Quiz { explain } => {
            let config = runtime_config(&args)?;
            let catalog = open_catalog(&config)?;
            let preference = questionnaire::run(
                &mut io::stdin().lock(),
                &mut io::stdout(),
                &catalog.genres(),
            )?;
            println!();
            print_outcome(recommender::recommend(&catalog, &preference), false, *explain)?;
        }
        cli::Command::Genres => {
            let config = runtime_config(&args)?;
            let catalog = open_catalog(&config)?;
            let mut stdout = io::stdout().lock();
            for genre in catalog.genres() {
                writeln!(stdout, "{genre}")?;
            }
        }
        cli::Command::Completion { shell } => {
            let mut cmd = cli::Args::command();
            let shell = completion::shell_to_completion_shell(shell);
            completion::generate_completions(shell, &mut cmd);
        }
        cli::Command::CompletionEnhanced { shell } => {
            let Some(script) = completion::enhanced_completion_script(shell) else {
                bail!("Enhanced completions only supported for bash and fish");
            };
            io::stdout().lock().write_all(script.as_bytes())?;
        }
        cli::Command::CompleteGenres => {
            // Used by completion scripts; stays quiet on a broken config.
            let config = runtime_config(&args).unwrap_or_default();
            completion::print_genre_completions(&config)?;
        }
    }

    Ok(())
}
