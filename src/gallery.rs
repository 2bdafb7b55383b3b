use serde::{Deserialize, Serialize};

use crate::embedding;

/// One gallery row as handed over by the store. The embedding stays in
/// its raw textual form until the builder validates it; rows with a
/// null/absent embedding are filtered out upstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRow {
    pub identity: String,
    pub display_name: String,
    pub embedding: String,
}

/// One enrolled face, validated and ready for matching.
#[derive(Debug, Clone)]
pub struct GalleryEntry {
    pub identity: String,
    pub display_name: String,
    pub vector: Vec<f32>,
}

/// Immutable point-in-time view of the gallery. Entries keep the relative
/// order of the rows they were built from; `skipped` counts rows dropped
/// for a malformed embedding or a dimension mismatch.
#[derive(Debug, Clone)]
pub struct GallerySnapshot {
    dim: usize,
    entries: Vec<GalleryEntry>,
    skipped: usize,
}

impl GallerySnapshot {
    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GalleryEntry> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[GalleryEntry] {
        &self.entries
    }
}

/// Build a snapshot from raw rows, keeping every row whose embedding
/// parses to exactly `dim` components and skipping the rest. One bad
/// record never aborts the batch. Zero survivors still yield a valid
/// (empty) snapshot; signalling "no gallery" is the matcher's job.
pub fn build_gallery(rows: &[RawRow], dim: usize) -> GallerySnapshot {
    let mut entries = Vec::with_capacity(rows.len());
    let mut skipped = 0;
    for row in rows {
        match embedding::parse_embedding(&row.embedding) {
            Ok(vector) if vector.len() == dim => entries.push(GalleryEntry {
                identity: row.identity.clone(),
                display_name: row.display_name.clone(),
                vector,
            }),
            Ok(_) | Err(_) => skipped += 1,
        }
    }
    GallerySnapshot {
        dim,
        entries,
        skipped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(identity: &str, name: &str, embedding: &str) -> RawRow {
        RawRow {
            identity: identity.to_string(),
            display_name: name.to_string(),
            embedding: embedding.to_string(),
        }
    }

    #[test]
    fn keeps_valid_rows_in_input_order() {
        let rows = vec![
            row("A1", "Alice", "[1,0,0]"),
            row("B2", "Bob", "[0,1,0]"),
            row("C3", "Carol", "[0,0,1]"),
        ];
        let snapshot = build_gallery(&rows, 3);
        assert_eq!(snapshot.len(), 3);
        assert_eq!(snapshot.skipped(), 0);
        let identities: Vec<_> = snapshot.iter().map(|e| e.identity.as_str()).collect();
        assert_eq!(identities, ["A1", "B2", "C3"]);
    }

    #[test]
    fn malformed_row_is_skipped_not_fatal() {
        let rows = vec![
            row("A1", "Alice", "[1,0,0]"),
            row("X9", "Mallory", "[1,0,notanumber]"),
            row("B2", "Bob", "[0,1,0]"),
        ];
        let snapshot = build_gallery(&rows, 3);
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.skipped(), 1);
        let identities: Vec<_> = snapshot.iter().map(|e| e.identity.as_str()).collect();
        assert_eq!(identities, ["A1", "B2"]);
    }

    #[test]
    fn wrong_dimension_is_skipped() {
        let rows = vec![
            row("A1", "Alice", "[1,0,0]"),
            row("B2", "Bob", "[1,0]"),
            row("C3", "Carol", "[1,0,0,0]"),
        ];
        let snapshot = build_gallery(&rows, 3);
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.skipped(), 2);
    }

    #[test]
    fn zero_survivors_is_a_valid_empty_snapshot() {
        let rows = vec![row("A1", "Alice", "oops")];
        let snapshot = build_gallery(&rows, 3);
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.skipped(), 1);
        assert_eq!(snapshot.dim(), 3);

        let empty = build_gallery(&[], 3);
        assert!(empty.is_empty());
        assert_eq!(empty.skipped(), 0);
    }
}
