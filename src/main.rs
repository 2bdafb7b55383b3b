use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use facegate::{cache, config, embedding, enroll, gallery, matcher, store, RawRow, EMBEDDING_DIM};
use log::{info, warn};

#[derive(Parser)]
#[command(name = "facegate")]
#[command(
    version,
    about = "Face gallery matching - authenticate embeddings against enrolled faces"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Enroll a face from extracted embedding candidates
    Enroll {
        /// External identity key (defaults to a fresh UUID)
        #[arg(short, long)]
        identity: Option<String>,
        /// Display name for the enrollee
        #[arg(short, long)]
        name: String,
        /// JSON file with the embeddings extracted from one photo
        /// (one array per detected face)
        candidates: PathBuf,
    },
    /// Match a query embedding against the enrolled gallery
    Identify {
        /// File with the query embedding in the stored textual format
        query: PathBuf,
        /// Override the configured tolerance for this call
        #[arg(short, long)]
        tolerance: Option<f32>,
    },
    /// List enrolled identities
    List,
    /// Remove all faces enrolled under an identity
    Remove { identity: String },
    /// Remove the whole gallery store
    Purge,
    /// Open config file in editor
    Config,
}

fn main() -> Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();
    let cfg = config::load_config(None)?;

    match cli.command {
        Commands::Enroll {
            identity,
            name,
            candidates,
        } => {
            let identity = identity.unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
            enroll_face(&identity, &name, &candidates)
        }
        Commands::Identify { query, tolerance } => {
            let tolerance = tolerance.unwrap_or(cfg.tolerance);
            identify(&cfg, &query, tolerance)
        }
        Commands::List => list(),
        Commands::Remove { identity } => remove(&identity),
        Commands::Purge => purge(),
        Commands::Config => open_config(),
    }
}

fn enroll_face(identity: &str, name: &str, candidates_path: &Path) -> Result<()> {
    info!("Enrolling identity: {} ({})", identity, name);

    let raw = std::fs::read_to_string(candidates_path)
        .with_context(|| format!("reading candidates from {}", candidates_path.display()))?;
    let candidates: Vec<Vec<f32>> =
        serde_json::from_str(&raw).context("parsing candidate embeddings")?;

    info!("Found {} face candidate(s) in photo", candidates.len());

    let vector = enroll::validate_enrollment(candidates)?;

    let row = RawRow {
        identity: identity.to_string(),
        display_name: name.to_string(),
        embedding: embedding::format_embedding(&vector),
    };
    store::append_row(None, row).context("Failed to save gallery row")?;

    info!("✓ Face enrolled successfully for identity: {}", identity);
    Ok(())
}

fn identify(cfg: &config::Config, query_path: &Path, tolerance: f32) -> Result<()> {
    let raw = std::fs::read_to_string(query_path)
        .with_context(|| format!("reading query from {}", query_path.display()))?;
    let query = embedding::parse_embedding(raw.trim()).context("parsing query embedding")?;

    let mut cache = cache::SnapshotCache::new(cfg.refresh_policy(), EMBEDDING_DIM);
    let snapshot = cache
        .snapshot(|| store::load_rows(None))
        .context("Failed to load gallery rows")?;

    if snapshot.skipped() > 0 {
        warn!("Skipped {} malformed gallery row(s)", snapshot.skipped());
    }
    info!("Matching against {} enrolled face(s)", snapshot.len());

    let decision = match matcher::best_match(&query, &snapshot, tolerance) {
        Ok(decision) => decision,
        Err(matcher::MatchError::GalleryEmpty) => {
            anyhow::bail!("No enrolled faces to compare against. Run 'enroll' first.")
        }
        Err(err) => return Err(err.into()),
    };

    info!(
        "Best distance: {:.4} (tolerance: {:.4})",
        decision.distance, tolerance
    );

    if decision.matched {
        info!(
            "✓ Recognized {} ({})",
            decision.display_name.as_deref().unwrap_or("?"),
            decision.identity.as_deref().unwrap_or("?"),
        );
        Ok(())
    } else {
        anyhow::bail!("Face not recognized (best distance {:.4})", decision.distance)
    }
}

fn list() -> Result<()> {
    let rows = store::load_rows(None).context("Failed to load gallery rows")?;
    let snapshot = gallery::build_gallery(&rows, EMBEDDING_DIM);

    if snapshot.skipped() > 0 {
        warn!("Skipped {} malformed gallery row(s)", snapshot.skipped());
    }

    info!("{} enrolled face(s)", snapshot.len());
    for entry in snapshot.iter() {
        info!("  {} ({})", entry.display_name, entry.identity);
    }
    Ok(())
}

fn remove(identity: &str) -> Result<()> {
    let removed = store::remove_rows(None, identity).context("Failed to update gallery store")?;
    if removed == 0 {
        anyhow::bail!("No faces enrolled under identity: {}", identity);
    }
    info!("✓ Removed {} face(s) for identity: {}", removed, identity);
    Ok(())
}

fn purge() -> Result<()> {
    store::purge(None).context("Failed to purge gallery store")?;
    info!("✓ Gallery store purged");
    Ok(())
}

fn open_config() -> Result<()> {
    let config_path = config::CONFIG_PATH.as_os_str();
    let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());

    info!("Opening config file: {:?}", config_path);

    let status = std::process::Command::new(editor)
        .arg(config_path)
        .status()
        .context("Failed to open editor")?;

    if !status.success() {
        anyhow::bail!("Editor exited with non-zero status");
    }

    Ok(())
}
