//! Questionnaire-driven song suggestions from a static catalog.
//!
//! Core modules:
//! - [`catalog`] - Loading the song table (load-once, shared read-only)
//! - [`preference`] - Questionnaire answers and their target audio features
//! - [`scoring`] - Weighted distance between a song and a target
//! - [`recommender`] - Genre filter, ranking, top pick and similar songs
//!
//! ### Supporting Modules
//!
//! - [`error`] - Typed errors for loading and requests
//! - [`report`] - Text and JSON rendering of recommendations
//! - [`questionnaire`] - Interactive prompt over any reader/writer
//! - [`config`] - Configuration and data directory management
//! - [`cli`] - Command-line interface definitions with clap integration
//! - [`completion`] - Shell completion generation
//!
//! ## Quick Start Example
//!
//! ```no_run
//! use tunepick::{catalog, preference::Preference, recommender, report};
//!
//! let catalog = catalog::load_cached("Spotify.csv".as_ref(), catalog::DEFAULT_DELIMITER)?;
//! let preference = Preference::parse("dance pop", "Fast", "Upbeat", "With Lyrics", "Happy")?;
//!
//! let recommendation = recommender::recommend(&catalog, &preference)?;
//! println!("{}", report::render_text(&recommendation, false));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Algorithm Details
//!
//! Answers map to a fixed target profile:
//!
//! | Answer | Feature | Value |
//! |---|---|---|
//! | Fast / Slow | bpm | 130 / 80 |
//! | Upbeat / Calm | energy | 75 / 35 |
//! | Instrumental / With Lyrics | acousticness | 70 / 20 |
//! | Instrumental / With Lyrics | speechiness | 10 / 50 |
//! | Happy / Sad / Romantic / Chill / Energetic | valence | 80 / 20 / 50 / 40 / 70 |
//!
//! Each song in the chosen genre is scored as
//!
//! ```text
//! 0.3*|Δbpm| + 0.3*|Δenergy| + 0.2*|Δacousticness| + 0.1*|Δspeechiness| + 0.3*|Δvalence|
//! ```
//!
//! and the songs are stable-sorted ascending. Lower is better.
//!
//! ## Error Handling
//!
//! - [`error::LoadError`] - catalog missing or malformed, fatal
//! - [`error::InvalidPreference`] - answer outside its choices, ask again
//! - [`error::RecommendError::NoMatch`] - genre has no songs
//! - [`recommender::SimilarSongs::NoneFound`] - only one song in the genre;
//!   not an error

pub mod catalog;
pub mod cli;
pub mod completion;
pub mod config;
pub mod error;
pub mod preference;
pub mod questionnaire;
pub mod recommender;
pub mod report;
pub mod scoring;
