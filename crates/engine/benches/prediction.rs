//! Benchmarks for featurization and prediction
//!
//! Run with: cargo bench --package engine
//!
//! Uses a synthetic catalog shaped like MovieLens: a few thousand movies
//! drawn from the standard genre list and a ratings log over them.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use data_loader::{Movie, Rating};
use engine::{build_features, split, tokenize, Predictor};

const GENRES: [&str; 18] = [
    "Action", "Adventure", "Animation", "Children", "Comedy", "Crime",
    "Documentary", "Drama", "Fantasy", "Film-Noir", "Horror", "Musical",
    "Mystery", "Romance", "Sci-Fi", "Thriller", "War", "Western",
];

fn synthetic_catalog(movies: u32) -> Vec<Movie> {
    (0..movies)
        .map(|id| {
            let first = GENRES[(id as usize * 7) % GENRES.len()];
            let second = GENRES[(id as usize * 11 + 3) % GENRES.len()];
            Movie::new(id, format!("Movie {}", id), format!("{}|{}", first, second))
        })
        .collect()
}

fn synthetic_ratings(users: u32, movies: u32, per_user: u32) -> Vec<Rating> {
    (0..users)
        .flat_map(|user| {
            (0..per_user).map(move |k| {
                let movie = (user * 31 + k * 17) % movies;
                Rating::new(user, movie, 0.5 + ((user + k) % 10) as f64 * 0.5)
            })
        })
        .collect()
}

fn bench_build_features(c: &mut Criterion) {
    let movies = synthetic_catalog(9000);

    c.bench_function("build_features", |b| {
        b.iter(|| {
            let featured = build_features(tokenize(black_box(&movies)));
            black_box(featured)
        })
    });
}

fn bench_predict_holdout(c: &mut Criterion) {
    let (featured, _) = build_features(tokenize(&synthetic_catalog(9000)));
    let ratings = synthetic_ratings(600, 9000, 150);
    let split = split(&ratings);
    let predictor = Predictor::new(&featured, &split.train);

    c.bench_function("predict_holdout", |b| {
        b.iter(|| {
            let predictions = predictor.predict_all(black_box(&split.test)).unwrap();
            black_box(predictions)
        })
    });
}

criterion_group!(benches, bench_build_features, bench_predict_holdout);
criterion_main!(benches);
