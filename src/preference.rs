//! Questionnaire answers and their mapping onto target audio features.
//!
//! Every enumerated answer is parsed here from free text. Anything outside
//! the allowed choices is rejected with [`InvalidPreference`].

use crate::catalog::AudioFeatures;
use crate::error::InvalidPreference;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Derived numeric feature profile the catalog is scored against.
pub type TargetVector = AudioFeatures;

/// Lowercase and drop separators so "With Lyrics", "with-lyrics" and
/// "WithLyrics" compare equal.
fn normalize(answer: &str) -> String {
    answer
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

macro_rules! choice {
    (
        $(#[$meta:meta])*
        $name:ident, $field:literal {
            $($variant:ident => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Display labels of every allowed answer, in questionnaire order.
            pub const LABELS: &'static [&'static str] = &[$($label),+];
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            #[must_use]
            pub const fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl FromStr for $name {
            type Err = InvalidPreference;

            fn from_str(answer: &str) -> Result<Self, Self::Err> {
                let wanted = normalize(answer);
                Self::ALL
                    .iter()
                    .copied()
                    .find(|choice| normalize(choice.label()) == wanted)
                    .ok_or_else(|| InvalidPreference {
                        field: $field,
                        value: answer.to_string(),
                        allowed: Self::LABELS,
                    })
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

choice! {
    /// Preferred song speed.
    Tempo, "tempo" {
        Fast => "Fast",
        Slow => "Slow",
    }
}

choice! {
    /// Upbeat or calm music.
    EnergyLevel, "energy" {
        Upbeat => "Upbeat",
        Calm => "Calm",
    }
}

choice! {
    /// Instrumental or lyrical songs.
    Instrumentation, "instrumentation" {
        Instrumental => "Instrumental",
        WithLyrics => "With Lyrics",
    }
}

choice! {
    /// Current mood of the listener.
    Mood, "mood" {
        Happy => "Happy",
        Sad => "Sad",
        Romantic => "Romantic",
        Chill => "Chill",
        Energetic => "Energetic",
    }
}

/// The five raw questionnaire answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Preference {
    pub genre: String,
    pub tempo: Tempo,
    pub energy: EnergyLevel,
    pub instrumentation: Instrumentation,
    pub mood: Mood,
}

impl Preference {
    /// Validates free-text answers into a [`Preference`].
    ///
    /// The genre is taken as-is; it is checked against the catalog later.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidPreference`] naming the first enumerated answer that
    /// is not one of its allowed choices.
    pub fn parse(
        genre: &str,
        tempo: &str,
        energy: &str,
        instrumentation: &str,
        mood: &str,
    ) -> Result<Self, InvalidPreference> {
        Ok(Self {
            genre: genre.to_string(),
            tempo: tempo.parse()?,
            energy: energy.parse()?,
            instrumentation: instrumentation.parse()?,
            mood: mood.parse()?,
        })
    }
}

/// Maps questionnaire answers to the feature profile songs are ranked
/// against. Fixed lookup, no configuration.
#[must_use]
pub fn preference_to_target(preference: &Preference) -> TargetVector {
    let bpm = match preference.tempo {
        Tempo::Fast => 130.0,
        Tempo::Slow => 80.0,
    };
    let energy = match preference.energy {
        EnergyLevel::Upbeat => 75.0,
        EnergyLevel::Calm => 35.0,
    };
    let (acousticness, speechiness) = match preference.instrumentation {
        Instrumentation::Instrumental => (70.0, 10.0),
        Instrumentation::WithLyrics => (20.0, 50.0),
    };
    let valence = match preference.mood {
        Mood::Happy => 80.0,
        Mood::Sad => 20.0,
        Mood::Romantic => 50.0,
        Mood::Chill => 40.0,
        Mood::Energetic => 70.0,
    };

    TargetVector {
        bpm,
        energy,
        acousticness,
        speechiness,
        valence,
    }
}
