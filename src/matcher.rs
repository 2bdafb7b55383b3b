use thiserror::Error;

use crate::embedding;
use crate::gallery::GallerySnapshot;

/// Outcome of one matching call. `distance` is the minimum over the
/// gallery whether or not it cleared the tolerance, so callers can log
/// how close a rejected probe came.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchDecision {
    pub matched: bool,
    pub identity: Option<String>,
    pub display_name: Option<String>,
    pub distance: f32,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MatchError {
    /// No valid entries survived the gallery build. Distinct from a
    /// negative match: there was nothing to compare against.
    #[error("no enrolled faces to compare against")]
    GalleryEmpty,
    /// The query vector does not have the gallery's dimension.
    #[error("query embedding has {actual} components, expected {expected}")]
    InvalidQueryLength { expected: usize, actual: usize },
}

/// Exhaustive nearest-neighbor scan of `query` against the snapshot.
///
/// The entry with the minimum L2 distance wins; among equidistant entries
/// the first in snapshot iteration order is kept. The probe matches iff
/// that minimum is `<= tolerance` (boundary inclusive). Read-only over
/// the snapshot and safe to run concurrently against a shared one.
pub fn best_match(
    query: &[f32],
    snapshot: &GallerySnapshot,
    tolerance: f32,
) -> Result<MatchDecision, MatchError> {
    let mut entries = snapshot.iter();
    let Some(first) = entries.next() else {
        return Err(MatchError::GalleryEmpty);
    };
    if query.len() != snapshot.dim() {
        return Err(MatchError::InvalidQueryLength {
            expected: snapshot.dim(),
            actual: query.len(),
        });
    }

    let mut best = first;
    let mut best_distance = embedding::distance(query, &first.vector);
    for entry in entries {
        let d = embedding::distance(query, &entry.vector);
        // strict `<` keeps the first of equidistant entries
        if d < best_distance {
            best = entry;
            best_distance = d;
        }
    }

    let matched = best_distance <= tolerance;
    Ok(MatchDecision {
        matched,
        identity: matched.then(|| best.identity.clone()),
        display_name: matched.then(|| best.display_name.clone()),
        distance: best_distance,
    })
}
