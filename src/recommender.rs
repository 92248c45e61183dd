//! # Recommendation Pipeline
//!
//! One request runs `Idle -> Filtering -> Ranked` to completion:
//!
//! 1. **Filtering**: keep the songs whose genre matches the requested genre,
//!    ignoring case. No match ends the request with
//!    [`RecommendError::NoMatch`]; there is no fallback genre.
//! 2. **Ranked**: derive the target profile from the answers, score every
//!    remaining song and stable-sort ascending.
//!
//! The best song becomes the top pick and up to [`MAX_SIMILAR`] runners-up
//! become the similar songs. A genre with a single song yields
//! [`SimilarSongs::NoneFound`], which is a successful outcome.
//!
//! The catalog is only read, so a shared `Arc<Catalog>` can serve any number
//! of requests.

use crate::catalog::{Catalog, Song};
use crate::error::RecommendError;
use crate::preference::{preference_to_target, Preference, TargetVector};
use crate::scoring::{rank, ScoredSong};
use log::{debug, warn};
use serde::Serialize;
use std::fmt;

/// Maximum number of similar songs returned after the top pick.
pub const MAX_SIMILAR: usize = 5;

/// Stages a recommendation request passes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Idle,
    Filtering,
    Ranked,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Filtering => "filtering",
            Self::Ranked => "ranked",
        };
        f.write_str(name)
    }
}

/// Runners-up after the top pick.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "songs", rename_all = "snake_case")]
pub enum SimilarSongs<'a> {
    Found(Vec<ScoredSong<'a>>),
    /// The genre held only the top pick.
    NoneFound,
}

impl<'a> SimilarSongs<'a> {
    #[must_use]
    pub fn as_slice(&self) -> &[ScoredSong<'a>] {
        match self {
            Self::Found(songs) => songs,
            Self::NoneFound => &[],
        }
    }
}

/// Outcome of one successful request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation<'a> {
    pub target: TargetVector,
    pub top: ScoredSong<'a>,
    pub similar: SimilarSongs<'a>,
}

/// Songs of `genre`, compared case-insensitively, in catalog order.
///
/// # Errors
///
/// [`RecommendError::NoMatch`] if no song carries the genre.
pub fn filter_by_genre<'a>(
    catalog: &'a Catalog,
    genre: &str,
) -> Result<Vec<&'a Song>, RecommendError> {
    let matches: Vec<&Song> = catalog.iter().filter(|song| song.is_genre(genre)).collect();

    if matches.is_empty() {
        warn!("No songs found in genre `{genre}'");
        return Err(RecommendError::NoMatch {
            genre: genre.to_string(),
        });
    }

    debug!("{} of {} songs match genre `{genre}'", matches.len(), catalog.len());
    Ok(matches)
}

/// Runs the full pipeline for one set of answers.
///
/// Identical catalog and answers always give an identical result.
///
/// # Errors
///
/// [`RecommendError::NoMatch`] if the genre filter leaves nothing to rank.
pub fn recommend<'a>(
    catalog: &'a Catalog,
    preference: &Preference,
) -> Result<Recommendation<'a>, RecommendError> {
    let mut stage = PipelineStage::Idle;
    debug!("Recommendation request for genre `{}' ({stage})", preference.genre);

    stage = PipelineStage::Filtering;
    debug!("Entering {stage} stage");
    let candidates = filter_by_genre(catalog, &preference.genre)?;

    let target = preference_to_target(preference);
    let ranked = rank(candidates, &target);
    stage = PipelineStage::Ranked;
    debug!("Entering {stage} stage with {} scored songs", ranked.len());

    let mut ranked = ranked.into_iter();
    let top = ranked.next().ok_or_else(|| RecommendError::NoMatch {
        genre: preference.genre.clone(),
    })?;

    let similar: Vec<ScoredSong<'a>> = ranked.take(MAX_SIMILAR).collect();
    let similar = if similar.is_empty() {
        debug!("No similar songs besides `{}'", top.song.title);
        SimilarSongs::NoneFound
    } else {
        SimilarSongs::Found(similar)
    };

    Ok(Recommendation { target, top, similar })
}

/// Parses raw answers and runs the pipeline.
///
/// # Errors
///
/// [`RecommendError::InvalidPreference`] for an answer outside its choices,
/// [`RecommendError::NoMatch`] for an unknown genre.
pub fn recommend_from_answers<'a>(
    catalog: &'a Catalog,
    genre: &str,
    tempo: &str,
    energy: &str,
    instrumentation: &str,
    mood: &str,
) -> Result<Recommendation<'a>, RecommendError> {
    let preference = Preference::parse(genre, tempo, energy, instrumentation, mood)?;
    recommend(catalog, &preference)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::AudioFeatures;
    use crate::preference::{EnergyLevel, Instrumentation, Mood, Tempo};

    fn song(title: &str, genre: &str, features: [f64; 5]) -> Song {
        let [bpm, energy, acousticness, speechiness, valence] = features;
        Song {
            title: title.to_string(),
            artist: format!("{title} Artist"),
            genre: genre.to_string(),
            features: AudioFeatures {
                bpm,
                energy,
                acousticness,
                speechiness,
                valence,
            },
        }
    }

    fn happy_pop() -> Preference {
        Preference {
            genre: "pop".to_string(),
            tempo: Tempo::Fast,
            energy: EnergyLevel::Upbeat,
            instrumentation: Instrumentation::Instrumental,
            mood: Mood::Happy,
        }
    }

    fn titles<'a>(songs: &[ScoredSong<'a>]) -> Vec<&'a str> {
        songs.iter().map(|s| s.song.title.as_str()).collect()
    }

    #[test]
    fn test_two_song_scenario() {
        let catalog = Catalog::new(vec![
            song("A", "pop", [130.0, 75.0, 70.0, 10.0, 80.0]),
            song("B", "pop", [80.0, 35.0, 20.0, 50.0, 20.0]),
        ]);

        let rec = recommend(&catalog, &happy_pop()).expect("pop has songs");

        assert_eq!(rec.top.song.title, "A");
        assert_eq!(rec.top.score, 0.0);
        assert_eq!(titles(rec.similar.as_slice()), ["B"]);
        assert!((rec.similar.as_slice()[0].score - 59.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_match_is_error_not_empty_success() {
        let catalog = Catalog::new(vec![song("A", "rock", [130.0, 75.0, 70.0, 10.0, 80.0])]);
        let err = recommend(&catalog, &happy_pop()).unwrap_err();
        assert_eq!(err, RecommendError::NoMatch { genre: "pop".to_string() });
    }

    #[test]
    fn test_empty_catalog_is_no_match() {
        let err = recommend(&Catalog::default(), &happy_pop()).unwrap_err();
        assert!(matches!(err, RecommendError::NoMatch { .. }));
    }

    #[test]
    fn test_single_match_signals_no_similar_songs() {
        let catalog = Catalog::new(vec![
            song("Only", "Pop", [100.0, 50.0, 50.0, 50.0, 50.0]),
            song("Other", "rock", [130.0, 75.0, 70.0, 10.0, 80.0]),
        ]);
        let rec = recommend(&catalog, &happy_pop()).expect("one pop song");
        assert_eq!(rec.top.song.title, "Only");
        assert_eq!(rec.similar, SimilarSongs::NoneFound);
        assert!(rec.similar.as_slice().is_empty());
    }

    #[test]
    fn test_similar_songs_capped_at_five() {
        let catalog: Catalog = (0..10)
            .map(|i| song(&format!("S{i}"), "pop", [130.0 + f64::from(i), 75.0, 70.0, 10.0, 80.0]))
            .collect();
        let rec = recommend(&catalog, &happy_pop()).expect("pop has songs");
        assert_eq!(rec.top.song.title, "S0");
        assert_eq!(titles(rec.similar.as_slice()), ["S1", "S2", "S3", "S4", "S5"]);
    }

    #[test]
    fn test_genre_filter_ignores_case_and_other_genres() {
        let catalog = Catalog::new(vec![
            song("rock-exact", "rock", [130.0, 75.0, 70.0, 10.0, 80.0]),
            song("pop-far", "POP", [60.0, 10.0, 0.0, 90.0, 0.0]),
            song("pop-near", "Pop", [125.0, 70.0, 70.0, 10.0, 80.0]),
        ]);
        let rec = recommend(&catalog, &happy_pop()).expect("pop has songs");
        assert_eq!(rec.top.song.title, "pop-near");
        assert_eq!(titles(rec.similar.as_slice()), ["pop-far"]);
    }

    #[test]
    fn test_exact_match_ranks_first() {
        let catalog = Catalog::new(vec![
            song("close", "pop", [129.0, 75.0, 70.0, 10.0, 80.0]),
            song("exact", "pop", [130.0, 75.0, 70.0, 10.0, 80.0]),
        ]);
        let rec = recommend(&catalog, &happy_pop()).expect("pop has songs");
        assert_eq!(rec.top.song.title, "exact");
    }

    #[test]
    fn test_duplicate_of_top_is_kept_in_similar() {
        let catalog = Catalog::new(vec![
            song("twin-1", "pop", [130.0, 75.0, 70.0, 10.0, 80.0]),
            song("twin-2", "pop", [130.0, 75.0, 70.0, 10.0, 80.0]),
        ]);
        let rec = recommend(&catalog, &happy_pop()).expect("pop has songs");
        assert_eq!(rec.top.song.title, "twin-1");
        assert_eq!(titles(rec.similar.as_slice()), ["twin-2"]);
        assert_eq!(rec.similar.as_slice()[0].score, 0.0);
    }

    #[test]
    fn test_pipeline_is_idempotent() {
        let catalog: Catalog = (0..8)
            .map(|i| {
                let bpm = 100.0 + f64::from(i * 7 % 5);
                song(&format!("S{i}"), "pop", [bpm, 60.0, 40.0, 20.0, f64::from(i * 10)])
            })
            .collect();
        let first = recommend(&catalog, &happy_pop()).expect("pop has songs");
        let second = recommend(&catalog, &happy_pop()).expect("pop has songs");
        assert_eq!(first, second);
    }

    #[test]
    fn test_recommend_from_answers_validates() {
        let catalog = Catalog::new(vec![song("A", "pop", [130.0, 75.0, 70.0, 10.0, 80.0])]);

        let err = recommend_from_answers(&catalog, "pop", "Fast", "Upbeat", "Kazoo", "Happy")
            .unwrap_err();
        assert!(matches!(
            err,
            RecommendError::InvalidPreference(ref e) if e.field == "instrumentation"
        ));

        let rec = recommend_from_answers(&catalog, "pop", "fast", "upbeat", "instrumental", "happy")
            .expect("valid answers");
        assert_eq!(rec.target, preference_to_target(&happy_pop()));
    }

    #[test]
    fn test_stage_display() {
        assert_eq!(PipelineStage::Filtering.to_string(), "filtering");
    }
}
