use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use data_loader::{Dataset, MovieId, UserId};
use engine::{
    run_holdout, similarity, tokenize, Catalog, EvaluationReport, FeatureBuilder, HoldoutSplit,
    PredictionSource, Predictor, DEFAULT_HOLDOUT_EVERY,
};
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

/// genre-recs - content-based movie rating prediction from genre tags
#[derive(Parser)]
#[command(name = "genre-recs")]
#[command(about = "Predict movie ratings from genre similarity (TF-IDF + cosine)", long_about = None)]
struct Cli {
    /// Path to an extracted MovieLens directory (ml-latest-small or ml-1m)
    #[arg(short, long, default_value = "ml-latest-small")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Hold out every Nth rating, predict it, and report the mean absolute error
    Evaluate {
        /// Spacing between held-out ratings
        #[arg(long, default_value_t = DEFAULT_HOLDOUT_EVERY)]
        holdout_every: usize,

        /// Number of predictions to print
        #[arg(long, default_value = "10")]
        show: usize,

        /// Print the full report as JSON instead
        #[arg(long)]
        json: bool,
    },

    /// Predict one user's rating for one movie from all their other ratings
    Predict {
        #[arg(long)]
        user_id: UserId,

        #[arg(long)]
        movie_id: MovieId,

        /// Show the rated movies most similar to the target
        #[arg(long)]
        explain: bool,
    },

    /// List vocabulary terms with their document frequency and IDF
    Vocab {
        /// Number of terms to print (alphabetical order)
        #[arg(long, default_value = "20")]
        limit: usize,
    },
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let start = Instant::now();
    let dataset = Dataset::load_from_dir(&cli.data_dir)
        .with_context(|| format!("Failed to load MovieLens dataset from {}", cli.data_dir.display()))?;
    info!("Loaded dataset in {:?}", start.elapsed());

    match cli.command {
        Commands::Evaluate {
            holdout_every,
            show,
            json,
        } => handle_evaluate(&dataset, holdout_every, show, json)?,
        Commands::Predict {
            user_id,
            movie_id,
            explain,
        } => handle_predict(&dataset, user_id, movie_id, explain)?,
        Commands::Vocab { limit } => handle_vocab(&dataset, limit)?,
    }

    Ok(())
}

/// Handle the 'evaluate' command
fn handle_evaluate(dataset: &Dataset, holdout_every: usize, show: usize, json: bool) -> Result<()> {
    let splitter = HoldoutSplit::new(holdout_every)?;
    let report = run_holdout(dataset.movies(), dataset.ratings(), splitter)
        .context("Hold-out evaluation failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report, show);
    }
    Ok(())
}

/// Handle the 'predict' command
fn handle_predict(dataset: &Dataset, user_id: UserId, movie_id: MovieId, explain: bool) -> Result<()> {
    let movie = dataset
        .get_movie(movie_id)
        .ok_or_else(|| anyhow!("Movie {} not found", movie_id))?;

    // Everything the user rated except the target itself
    let history: Vec<_> = dataset
        .ratings()
        .iter()
        .filter(|r| !(r.user_id == user_id && r.movie_id == movie_id))
        .copied()
        .collect();

    let catalog = Catalog::build(dataset.movies());
    let predictor = Predictor::new(&catalog.movies, &history);
    let prediction = predictor
        .predict_one(user_id, movie_id)
        .with_context(|| format!("Cannot predict movie {} for user {}", movie_id, user_id))?;

    let rule = match prediction.source {
        PredictionSource::Weighted => "similarity-weighted".green(),
        PredictionSource::UserMean => "user mean fallback".yellow(),
    };
    println!("{}", format!("User {} / {}", user_id, movie.title).bold().blue());
    println!("{}Genres: {}", "• ".green(), movie.genres);
    println!("{}Predicted rating: {:.3} ({})", "• ".green(), prediction.value, rule);
    println!("{}Ratings used: {}", "• ".cyan(), predictor.history(user_id).len());

    if let Some(actual) = dataset
        .ratings()
        .iter()
        .find(|r| r.user_id == user_id && r.movie_id == movie_id)
    {
        println!("{}Actual rating: {:.1}", "• ".cyan(), actual.rating);
    }

    if explain {
        let target = predictor.features(movie_id)?;
        let mut neighbours = predictor
            .history(user_id)
            .iter()
            .map(|&(rated, rating)| -> engine::Result<_> {
                Ok((rated, rating, similarity(predictor.features(rated)?, target)))
            })
            .collect::<engine::Result<Vec<_>>>()?;
        neighbours.sort_by(|a, b| b.2.partial_cmp(&a.2).unwrap_or(std::cmp::Ordering::Equal));

        println!("Most similar rated movies:");
        for (rated, rating, sim) in neighbours.iter().take(5) {
            let title = dataset.get_movie(*rated).map(|m| m.title.as_str()).unwrap_or("?");
            println!("  - {} (rated {:.1}, similarity {:.3})", title, rating, sim);
        }
    }
    Ok(())
}

/// Handle the 'vocab' command
fn handle_vocab(dataset: &Dataset, limit: usize) -> Result<()> {
    let tokenized = tokenize(dataset.movies());
    let builder = FeatureBuilder::new(&tokenized);
    let vocabulary = builder.vocabulary();

    println!(
        "{}",
        format!("{} terms over {} movies", vocabulary.len(), builder.movie_count()).bold().blue()
    );
    for (term, idx) in vocabulary.iter().take(limit) {
        let df = builder.document_frequency(term).unwrap_or(0);
        let idf = builder.inverse_document_frequency(term).unwrap_or(0.0);
        println!("{:>4}  {:<20} df={:<6} idf={:.4}", idx, term, df, idf);
    }
    Ok(())
}

/// Helper function to format and print an evaluation report
fn print_report(report: &EvaluationReport, show: usize) {
    println!("{}", "vocab:".bold().blue());
    let preview = report
        .vocabulary_preview
        .iter()
        .map(|(term, idx)| format!("('{}', {})", term, idx))
        .collect::<Vec<_>>()
        .join(", ");
    println!("[{}]", preview);

    println!(
        "{} training ratings; {} testing ratings",
        report.train_count, report.test_count
    );
    println!(
        "{}",
        format!("error={:.6}", report.mean_absolute_error).bold().green()
    );
    println!(
        "{} of {} predictions used the user-mean fallback",
        report.fallback_count, report.test_count
    );

    let shown = report
        .predictions
        .iter()
        .take(show)
        .map(|p| format!("{:.8}", p.value))
        .collect::<Vec<_>>()
        .join(" ");
    println!("[{}]", shown);
}
