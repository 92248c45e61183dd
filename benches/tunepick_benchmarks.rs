//! # Tunepick Performance Benchmarks
//!
//! Benchmarks for the recommendation hot path.
//!
//! ## Benchmark Categories
//!
//! - **Scoring**: single song and batch ranking
//! - **Pipeline**: genre filter plus ranking over whole catalogs
//! - **Catalog Loading**: parsing a delimited catalog file
//!
//! ## Running Benchmarks
//!
//! ```bash
//! cargo bench
//! cargo bench scoring
//! ```

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use std::io::Write;
use tempfile::NamedTempFile;
use tunepick::catalog::{self, AudioFeatures, Catalog, Song};
use tunepick::preference::{preference_to_target, Preference};
use tunepick::{recommender, scoring};

const GENRES: [&str; 4] = ["pop", "dance pop", "indie rock", "hip hop"];

/// Helper function to create a synthetic catalog
fn create_test_songs(count: usize) -> Vec<Song> {
    (0..count)
        .map(|i| Song {
            title: format!("Song {i:05}"),
            artist: format!("Artist {}", i / 20 + 1),
            genre: GENRES[i % GENRES.len()].to_string(),
            features: AudioFeatures {
                bpm: 60.0 + (i * 7 % 120) as f64,
                energy: (i * 13 % 100) as f64,
                acousticness: (i * 17 % 100) as f64,
                speechiness: (i * 3 % 60) as f64,
                valence: (i * 11 % 100) as f64,
            },
        })
        .collect()
}

fn preference() -> Preference {
    Preference::parse("pop", "Fast", "Upbeat", "With Lyrics", "Happy").expect("valid answers")
}

/// Benchmark scoring and ranking
fn benchmark_scoring(c: &mut Criterion) {
    let mut group = c.benchmark_group("scoring");
    let target = preference_to_target(&preference());

    let song = create_test_songs(1).remove(0);
    group.bench_function("single_song_score", |b| {
        b.iter(|| scoring::score(black_box(&song), black_box(&target)))
    });

    for size in [10, 100, 1000, 10_000] {
        let songs = create_test_songs(size);
        group.bench_with_input(BenchmarkId::new("rank", size), &songs, |b, songs| {
            b.iter(|| scoring::rank(black_box(songs), black_box(&target)))
        });
    }

    group.finish();
}

/// Benchmark the full recommendation pipeline
fn benchmark_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    let preference = preference();

    for size in [100, 1000, 10_000] {
        let catalog = Catalog::new(create_test_songs(size));
        group.bench_with_input(BenchmarkId::new("recommend", size), &catalog, |b, catalog| {
            b.iter(|| recommender::recommend(black_box(catalog), black_box(&preference)))
        });
    }

    group.finish();
}

/// Benchmark parsing a catalog file
fn benchmark_catalog_loading(c: &mut Criterion) {
    let mut group = c.benchmark_group("catalog_loading");

    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    writeln!(file, "title;artist;top genre;bpm;energy;acousticness;speechiness;valence")
        .expect("Failed to write header");
    for song in create_test_songs(1000) {
        let f = song.features;
        writeln!(
            file,
            "{};{};{};{};{};{};{};{}",
            song.title,
            song.artist,
            song.genre,
            f.bpm,
            f.energy,
            f.acousticness,
            f.speechiness,
            f.valence
        )
        .expect("Failed to write row");
    }

    group.bench_function("load_1000_songs", |b| {
        b.iter(|| catalog::load_catalog(black_box(file.path()), b';').expect("catalog loads"))
    });

    group.finish();
}

// Group all benchmarks
criterion_group!(
    benches,
    benchmark_scoring,
    benchmark_pipeline,
    benchmark_catalog_loading
);
criterion_main!(benches);
