//! Human and machine readable rendering of recommendations.

use crate::recommender::{Recommendation, SimilarSongs};
use crate::scoring::ScoredSong;

pub const TOP_HEADING: &str = "Your top recommended song is:";
pub const SIMILAR_HEADING: &str = "You might also like:";
pub const NO_SIMILAR_MESSAGE: &str = "No similar songs found in this genre with those preferences.";
pub const NO_MATCH_MESSAGE: &str = "No songs found in that genre. Try another!";

/// `<title> by <artist>`
#[must_use]
pub fn song_line(scored: &ScoredSong<'_>) -> String {
    format!("{} by {}", scored.song.title, scored.song.artist)
}

/// Plain-text report of a recommendation. With `explain`, the target
/// profile and every score are included.
#[must_use]
pub fn render_text(recommendation: &Recommendation<'_>, explain: bool) -> String {
    let score_suffix = |scored: &ScoredSong<'_>| {
        if explain {
            format!(" (score {:.2})", scored.score)
        } else {
            String::new()
        }
    };

    let mut out = String::new();

    if explain {
        let t = &recommendation.target;
        out.push_str(&format!(
            "Target: bpm {:.0}, energy {:.0}, acousticness {:.0}, \
             speechiness {:.0}, valence {:.0}\n\n",
            t.bpm, t.energy, t.acousticness, t.speechiness, t.valence
        ));
    }

    out.push_str(TOP_HEADING);
    out.push('\n');
    out.push_str(&song_line(&recommendation.top));
    out.push_str(&score_suffix(&recommendation.top));
    out.push_str("\n\n");

    match &recommendation.similar {
        SimilarSongs::Found(songs) => {
            out.push_str(SIMILAR_HEADING);
            out.push('\n');
            for scored in songs {
                out.push_str(&format!("- {}{}\n", song_line(scored), score_suffix(scored)));
            }
        }
        SimilarSongs::NoneFound => {
            out.push_str(NO_SIMILAR_MESSAGE);
            out.push('\n');
        }
    }

    out
}

/// Pretty JSON report of a recommendation.
///
/// # Errors
///
/// Propagates serialization failures from `serde_json`.
pub fn render_json(recommendation: &Recommendation<'_>) -> serde_json::Result<String> {
    serde_json::to_string_pretty(recommendation)
}
