//! Integration tests for the content-based pipeline.
//!
//! These tests run tokenization, featurization, splitting, prediction and
//! scoring together on small hand-built catalogs.

use approx::assert_relative_eq;
use data_loader::{Movie, Rating};
use engine::*;

fn create_catalog() -> Vec<Movie> {
    vec![
        Movie::new(1, "Scream Date (1999)", "Horror|Romance"),
        Movie::new(2, "Space Trip (2001)", "Sci-Fi"),
        Movie::new(3, "Haunted (2003)", "Horror"),
    ]
}

#[test]
fn test_vocabulary_from_catalog() {
    let movies = vec![Movie::new(123, "A", "Horror|Romance"), Movie::new(456, "B", "Sci-Fi")];
    let (_, vocab) = build_features(tokenize(&movies));

    let pairs: Vec<_> = vocab.iter().collect();
    assert_eq!(pairs, vec![("horror", 0), ("romance", 1), ("sci-fi", 2)]);
}

#[test]
fn test_end_to_end_prediction() {
    let (featured, _) = build_features(tokenize(&create_catalog()));

    // Position 0 is held out; the remaining rows train user 9.
    let ratings = vec![
        Rating::new(9, 3, 5.0),
        Rating::new(9, 1, 4.0),
        Rating::new(9, 2, 2.0),
    ];
    let split = split(&ratings);
    assert_eq!(split.test, vec![Rating::new(9, 3, 5.0)]);
    assert_eq!(split.train.len(), 2);

    let predictions = predict(&featured, &split.train, &split.test).unwrap();
    assert_eq!(predictions.len(), 1);
    assert_relative_eq!(predictions[0], 4.0, epsilon = 1e-9);

    let error = mean_absolute_error(&predictions, &split.test).unwrap();
    assert_relative_eq!(error, 1.0, epsilon = 1e-9);
}

#[test]
fn test_similarity_properties_over_catalog() {
    let (featured, _) = build_features(tokenize(&create_catalog()));

    for a in &featured {
        assert_relative_eq!(similarity(&a.features, &a.features), 1.0, epsilon = 1e-12);
        for b in &featured {
            let ab = similarity(&a.features, &b.features);
            assert_eq!(ab, similarity(&b.features, &a.features));
            assert!((0.0..=1.0 + 1e-12).contains(&ab));
        }
    }

    assert_eq!(similarity(&featured[1].features, &featured[2].features), 0.0);
    assert!(similarity(&featured[0].features, &featured[2].features) > 0.0);
}

#[test]
fn test_run_holdout_report() {
    let movies = create_catalog();
    let ratings = vec![
        Rating::new(9, 3, 5.0),
        Rating::new(9, 1, 4.0),
        Rating::new(7, 2, 1.0),
        Rating::new(7, 1, 3.0),
        Rating::new(9, 2, 2.0),
        Rating::new(7, 3, 3.0),
    ];

    let report = run_holdout(&movies, &ratings, HoldoutSplit::new(2).unwrap()).unwrap();

    assert_eq!(report.movie_count, 3);
    assert_eq!(report.vocabulary_size, 3);
    assert_eq!(report.vocabulary_preview[0], ("horror".to_string(), 0));
    assert_eq!(report.test_count, 3);
    assert_eq!(report.train_count, 3);
    assert_eq!(report.predictions.len(), 3);

    // Held out: (9,3), (7,2), (9,2). Training: (9,1), (7,1), (7,3).
    // (9,3): only movie 1, which shares "horror"       -> 4.0
    // (7,2): movies 1 and 3 share nothing with sci-fi  -> mean 3.0
    // (9,2): movie 1 shares nothing with sci-fi        -> mean 4.0
    assert_relative_eq!(report.predictions[0].value, 4.0, epsilon = 1e-9);
    assert_eq!(report.predictions[1].source, PredictionSource::UserMean);
    assert_eq!(report.predictions[1].value, 3.0);
    assert_eq!(report.predictions[2].value, 4.0);
    assert_eq!(report.fallback_count, 2);

    // |4-5| + |3-1| + |4-2| = 5 over 3 rows
    assert_relative_eq!(report.mean_absolute_error, 5.0 / 3.0, epsilon = 1e-9);
}

#[test]
fn test_run_holdout_missing_history() {
    let movies = create_catalog();
    // User 9's only rating is the held-out one.
    let ratings = vec![Rating::new(9, 3, 5.0), Rating::new(7, 1, 4.0)];

    let err = run_holdout(&movies, &ratings, HoldoutSplit::default()).unwrap_err();
    assert_eq!(err, ContentError::NoTrainingHistory { user_id: 9 });
}
