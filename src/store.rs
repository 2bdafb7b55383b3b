//! File-backed stand-in for the external gallery source. Rows keep the
//! embedding field in its textual form so the stored representation stays
//! interoperable with the upstream database column.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::GALLERY_STORE_PREFIX;
use crate::gallery::RawRow;

fn gallery_file(prefix: &Path) -> PathBuf {
    prefix.join("gallery.bin")
}

pub fn load_rows(prefix: Option<&Path>) -> Result<Vec<RawRow>> {
    let file = gallery_file(prefix.unwrap_or(&GALLERY_STORE_PREFIX));

    if !file.exists() {
        return Ok(vec![]);
    }

    let data = std::fs::read(&file).with_context(|| format!("reading {}", file.display()))?;
    Ok(postcard::from_bytes(&data)?)
}

pub fn append_row(prefix: Option<&Path>, row: RawRow) -> Result<()> {
    let prefix = prefix.unwrap_or(&GALLERY_STORE_PREFIX);
    std::fs::create_dir_all(prefix)?;
    let mut rows = load_rows(Some(prefix))?;
    rows.push(row);
    let file = gallery_file(prefix);
    let data = postcard::to_allocvec(&rows)?;
    std::fs::write(&file, data)?;
    Ok(())
}

/// Remove every row enrolled under `identity`. Returns how many were
/// dropped.
pub fn remove_rows(prefix: Option<&Path>, identity: &str) -> Result<usize> {
    let prefix = prefix.unwrap_or(&GALLERY_STORE_PREFIX);
    let mut rows = load_rows(Some(prefix))?;
    let before = rows.len();
    rows.retain(|row| row.identity != identity);
    let removed = before - rows.len();
    if removed > 0 {
        let file = gallery_file(prefix);
        let data = postcard::to_allocvec(&rows)?;
        std::fs::write(&file, data)?;
    }
    Ok(removed)
}

pub fn purge(prefix: Option<&Path>) -> Result<()> {
    let file = gallery_file(prefix.unwrap_or(&GALLERY_STORE_PREFIX));
    if file.exists() {
        std::fs::remove_file(&file).with_context(|| format!("removing {}", file.display()))?;
    }
    Ok(())
}
