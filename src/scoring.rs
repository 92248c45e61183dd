//! Song scoring against a target feature profile.
//!
//! The score is a weighted sum of absolute feature differences; lower means
//! closer. The weights are fixed and not normalized.

use crate::catalog::{AudioFeatures, Song};
use crate::preference::TargetVector;
use log::trace;
use serde::Serialize;

/// Per-feature weights of the distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureWeights {
    pub bpm: f64,
    pub energy: f64,
    pub acousticness: f64,
    pub speechiness: f64,
    pub valence: f64,
}

/// The fixed weights every recommendation uses.
pub const WEIGHTS: FeatureWeights = FeatureWeights {
    bpm: 0.3,
    energy: 0.3,
    acousticness: 0.2,
    speechiness: 0.1,
    valence: 0.3,
};

impl FeatureWeights {
    /// Weighted absolute difference between two feature vectors.
    #[must_use]
    pub fn distance(&self, a: &AudioFeatures, b: &AudioFeatures) -> f64 {
        (a.bpm - b.bpm).abs() * self.bpm
            + (a.energy - b.energy).abs() * self.energy
            + (a.acousticness - b.acousticness).abs() * self.acousticness
            + (a.speechiness - b.speechiness).abs() * self.speechiness
            + (a.valence - b.valence).abs() * self.valence
    }
}

/// Similarity score of `song` for `target`. Non-negative; zero exactly when
/// all five features match.
///
/// # Examples
///
/// ```
/// use tunepick::catalog::{AudioFeatures, Song};
/// use tunepick::scoring::score;
///
/// let target = AudioFeatures {
///     bpm: 130.0,
///     energy: 75.0,
///     acousticness: 70.0,
///     speechiness: 10.0,
///     valence: 80.0,
/// };
/// let song = Song {
///     title: "A".to_string(),
///     artist: "Someone".to_string(),
///     genre: "pop".to_string(),
///     features: target,
/// };
/// assert_eq!(score(&song, &target), 0.0);
/// ```
#[must_use]
pub fn score(song: &Song, target: &TargetVector) -> f64 {
    let value = WEIGHTS.distance(&song.features, target);
    trace!("Scored `{}' by `{}' at {value:.3}", song.title, song.artist);
    value
}

/// A song paired with its score for one ranking pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoredSong<'a> {
    #[serde(flatten)]
    pub song: &'a Song,
    pub score: f64,
}

/// Scores every candidate and sorts ascending by score.
///
/// The sort is stable: songs with equal scores keep their input order.
#[must_use]
pub fn rank<'a, I>(candidates: I, target: &TargetVector) -> Vec<ScoredSong<'a>>
where
    I: IntoIterator<Item = &'a Song>,
{
    let mut ranked: Vec<ScoredSong<'a>> = candidates
        .into_iter()
        .map(|song| ScoredSong {
            song,
            score: score(song, target),
        })
        .collect();
    ranked.sort_by(|a, b| a.score.total_cmp(&b.score));
    ranked
}
