//! # Catalog Module
//!
//! Loads the static song table that recommendations are drawn from.
//!
//! The source is a delimited text file (`;` by default) with a header row.
//! Header names are trimmed of surrounding whitespace before they are matched
//! against the required columns:
//!
//! | Column | Notes |
//! |---|---|
//! | `title`, `artist` | free text |
//! | `top genre` or `genre` | case-insensitive match key |
//! | `bpm`, `energy`, `acousticness`, `speechiness`, `valence` | numbers |
//!
//! Any additional columns are ignored. A catalog is loaded once per process
//! and shared read-only afterwards through [`load_cached`].

use crate::error::LoadError;
use log::{debug, info, warn};
use path_absolutize::Absolutize;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Default field separator of the catalog file.
pub const DEFAULT_DELIMITER: u8 = b';';

/// Accepted header names for the genre column, in order of preference.
const GENRE_COLUMNS: [&str; 2] = ["top genre", "genre"];

/// The five numeric audio features songs are compared on.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct AudioFeatures {
    pub bpm: f64,
    /// 0-100
    pub energy: f64,
    /// 0-100
    pub acousticness: f64,
    /// 0-100
    pub speechiness: f64,
    /// 0-100
    pub valence: f64,
}

/// One catalog row. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Song {
    pub title: String,
    pub artist: String,
    pub genre: String,
    #[serde(flatten)]
    pub features: AudioFeatures,
}

impl Song {
    /// Case-insensitive genre comparison used by the genre filter.
    #[must_use]
    pub fn is_genre(&self, genre: &str) -> bool {
        self.genre.to_lowercase() == genre.to_lowercase()
    }
}

/// Ordered, read-only sequence of songs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    songs: Vec<Song>,
}

impl Catalog {
    #[must_use]
    pub fn new(songs: Vec<Song>) -> Self {
        Self { songs }
    }

    #[must_use]
    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Song> {
        self.songs.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.songs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    /// Distinct genre values as written in the file, sorted.
    #[must_use]
    pub fn genres(&self) -> Vec<String> {
        self.songs
            .iter()
            .map(|song| song.genre.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

impl FromIterator<Song> for Catalog {
    fn from_iter<I: IntoIterator<Item = Song>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Song;
    type IntoIter = std::slice::Iter<'a, Song>;

    fn into_iter(self) -> Self::IntoIter {
        self.songs.iter()
    }
}

/// Column positions resolved from the header row.
struct ColumnIndex {
    title: usize,
    artist: usize,
    genre: usize,
    bpm: usize,
    energy: usize,
    acousticness: usize,
    speechiness: usize,
    valence: usize,
}

impl ColumnIndex {
    fn resolve(headers: &csv::StringRecord, path: &Path) -> Result<Self, LoadError> {
        let find = |column: &'static str| {
            headers
                .iter()
                .position(|header| header == column)
                .ok_or_else(|| LoadError::MissingColumn {
                    path: path.to_path_buf(),
                    column,
                })
        };

        let genre = GENRE_COLUMNS
            .iter()
            .find_map(|column| headers.iter().position(|header| header == *column))
            .ok_or_else(|| LoadError::MissingColumn {
                path: path.to_path_buf(),
                column: GENRE_COLUMNS[0],
            })?;

        Ok(Self {
            title: find("title")?,
            artist: find("artist")?,
            genre,
            bpm: find("bpm")?,
            energy: find("energy")?,
            acousticness: find("acousticness")?,
            speechiness: find("speechiness")?,
            valence: find("valence")?,
        })
    }

    fn song(&self, record: &csv::StringRecord) -> Result<Song, LoadError> {
        let line = record.position().map_or(0, csv::Position::line);
        let text = |index: usize| record.get(index).unwrap_or_default().to_string();
        let number = |index: usize, column: &'static str| {
            let raw = record.get(index).unwrap_or_default();
            raw.trim()
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .ok_or_else(|| LoadError::InvalidNumber {
                    line,
                    column,
                    value: raw.to_string(),
                })
        };

        Ok(Song {
            title: text(self.title),
            artist: text(self.artist),
            genre: text(self.genre),
            features: AudioFeatures {
                bpm: number(self.bpm, "bpm")?,
                energy: number(self.energy, "energy")?,
                acousticness: number(self.acousticness, "acousticness")?,
                speechiness: number(self.speechiness, "speechiness")?,
                valence: number(self.valence, "valence")?,
            },
        })
    }
}

/// Reads a delimited catalog file into memory.
///
/// No partial catalog is ever returned: the first bad row fails the whole
/// load.
///
/// # Errors
///
/// - [`LoadError::Io`] if the file is missing or unreadable
/// - [`LoadError::MissingColumn`] if a required header is absent
/// - [`LoadError::Csv`] if a row cannot be parsed (e.g. wrong field count)
/// - [`LoadError::InvalidNumber`] if a feature value is not a finite number
pub fn load_catalog(path: &Path, delimiter: u8) -> Result<Catalog, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let csv_error = |source: csv::Error| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::Headers)
        .from_reader(file);

    let columns = ColumnIndex::resolve(reader.headers().map_err(csv_error)?, path)?;

    let songs = reader
        .records()
        .map(|record| columns.song(&record.map_err(csv_error)?))
        .collect::<Result<Vec<_>, _>>()?;

    if songs.is_empty() {
        warn!("Catalog {} has a header but no songs", path.display());
    }
    info!("Loaded {} songs from {}", songs.len(), path.display());

    Ok(Catalog::new(songs))
}

type CatalogCache = Mutex<HashMap<(PathBuf, u8), Arc<Catalog>>>;

lazy_static::lazy_static! {
    /// Process-wide catalogs keyed by absolute path and delimiter
    static ref CATALOG_CACHE: CatalogCache = Mutex::new(HashMap::new());
}

fn cache_key(path: &Path, delimiter: u8) -> (PathBuf, u8) {
    let absolute = path
        .absolutize()
        .map_or_else(|_| path.to_path_buf(), |absolute| absolute.into_owned());
    (absolute, delimiter)
}

/// Load-once access to a catalog.
///
/// The first call for a given file loads it; every later call returns the
/// same shared catalog. Failed loads are not cached.
///
/// # Errors
///
/// Same as [`load_catalog`].
pub fn load_cached(path: &Path, delimiter: u8) -> Result<Arc<Catalog>, LoadError> {
    let key = cache_key(path, delimiter);

    if let Ok(cache) = CATALOG_CACHE.lock() {
        if let Some(catalog) = cache.get(&key) {
            debug!("Catalog cache hit for {}", key.0.display());
            return Ok(Arc::clone(catalog));
        }
    }

    let catalog = Arc::new(load_catalog(path, delimiter)?);

    match CATALOG_CACHE.lock() {
        Ok(mut cache) => Ok(Arc::clone(cache.entry(key).or_insert(catalog))),
        Err(_) => Ok(catalog),
    }
}

/// Drops every cached catalog read from `path`, so a replaced file is
/// reloaded on next access.
pub fn invalidate(path: &Path) {
    let (absolute, _) = cache_key(path, DEFAULT_DELIMITER);
    if let Ok(mut cache) = CATALOG_CACHE.lock() {
        cache.retain(|(cached, _), _| *cached != absolute);
    }
}
