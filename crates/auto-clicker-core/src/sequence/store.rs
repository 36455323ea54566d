//! Sequence persistence.
//!
//! Sequences are stored as pretty-printed JSON records
//! (`{"meta": {...}, "steps": [...]}`) in a single directory. Saving
//! never overwrites: name collisions resolve to `name (2).json`,
//! `name (3).json` and so on. The most recent capture is additionally
//! written to a fixed snapshot file so it survives a restart without an
//! explicit save.

use crate::{CoreResult, sequence::Sequence};

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use tracing::{debug, info, instrument, warn};

/// File name of the non-user-facing last-capture snapshot.
const SNAPSHOT_NAME: &str = "_last_sequence.json";

/// A directory of saved sequences.
#[derive(Debug, Clone)]
pub struct SequenceStore {
    dir: PathBuf,
}

/// Listing entry for one stored sequence file.
#[derive(Debug, Clone)]
pub struct SequenceEntry {
    /// Path of the sequence file.
    pub path: PathBuf,
    /// Parsed metadata.
    pub meta: crate::sequence::SequenceMeta,
    /// Number of steps in the file.
    pub step_count: usize,
}

impl SequenceStore {
    /// Open a store over `dir`, creating the directory if needed.
    #[track_caller]
    #[instrument]
    pub fn new<P: AsRef<Path> + std::fmt::Debug>(dir: P) -> CoreResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        if !dir.exists() {
            fs::create_dir_all(&dir)?;
            debug!(dir = ?dir, "Created sequences directory");
        }
        Ok(Self { dir })
    }

    /// Directory this store reads and writes.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Save a sequence under a new, distinct file name.
    ///
    /// The name derives from `meta.name` (slugified); an empty name
    /// falls back to a timestamped one. Returns the path written.
    #[track_caller]
    #[instrument(skip(self, sequence))]
    pub fn save(&self, sequence: &Sequence) -> CoreResult<PathBuf> {
        let base = slugify(&sequence.meta.name);
        let path = self.unique_path(&base);
        self.write_json(&path, sequence)?;

        info!(path = ?path, steps = sequence.steps.len(), "Sequence saved");

        Ok(path)
    }

    /// Overwrite the last-capture snapshot.
    #[track_caller]
    #[instrument(skip(self, sequence))]
    pub fn save_snapshot(&self, sequence: &Sequence) -> CoreResult<()> {
        let path = self.dir.join(SNAPSHOT_NAME);
        self.write_json(&path, sequence)?;
        debug!(steps = sequence.steps.len(), "Snapshot written");
        Ok(())
    }

    /// Load the last-capture snapshot, if one exists and parses.
    ///
    /// A missing or corrupt snapshot is not an error; it only means
    /// there is nothing to restore.
    #[instrument(skip(self))]
    pub fn load_snapshot(&self) -> Option<Sequence> {
        let path = self.dir.join(SNAPSHOT_NAME);
        if !path.exists() {
            return None;
        }
        match self.load(&path) {
            Ok(sequence) => Some(sequence),
            Err(e) => {
                warn!(error = %e, "Snapshot unreadable, ignoring");
                None
            }
        }
    }

    /// Load one sequence file.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn load(&self, path: &Path) -> CoreResult<Sequence> {
        let contents = fs::read_to_string(path)?;
        let sequence: Sequence = serde_json::from_str(&contents)?;
        Ok(sequence)
    }

    /// List every readable `.json` sequence in the store, sorted by
    /// file name. Unreadable files are skipped with a warning.
    #[instrument(skip(self))]
    pub fn list(&self) -> CoreResult<Vec<SequenceEntry>> {
        let mut entries = Vec::new();
        for dir_entry in fs::read_dir(&self.dir)? {
            let path = dir_entry?.path();
            if path.extension().is_none_or(|ext| ext != "json") {
                continue;
            }
            match self.load(&path) {
                Ok(sequence) => entries.push(SequenceEntry {
                    path,
                    meta: sequence.meta,
                    step_count: sequence.steps.len(),
                }),
                Err(e) => warn!(path = ?path, error = %e, "Skipping unreadable sequence"),
            }
        }
        entries.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(entries)
    }

    /// Delete one sequence file.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn delete(&self, path: &Path) -> CoreResult<()> {
        fs::remove_file(path)?;
        info!(path = ?path, "Sequence deleted");
        Ok(())
    }

    /// First non-existing path for `base`: `base.json`, then
    /// `base (2).json`, `base (3).json`, ...
    fn unique_path(&self, base: &str) -> PathBuf {
        let path = self.dir.join(format!("{}.json", base));
        if !path.exists() {
            return path;
        }
        let mut i = 2u32;
        loop {
            let path = self.dir.join(format!("{} ({}).json", base, i));
            if !path.exists() {
                return path;
            }
            i += 1;
        }
    }

    // Atomic write: write to temp file then rename, so a crash mid-write
    // cannot corrupt an existing file.
    #[track_caller]
    fn write_json(&self, path: &Path, sequence: &Sequence) -> CoreResult<()> {
        let contents = serde_json::to_string_pretty(sequence)?;

        let temp_path = path.with_extension("json.tmp");
        let mut temp_file = fs::File::create(&temp_path)?;
        temp_file.write_all(contents.as_bytes())?;
        temp_file.sync_all()?;
        fs::rename(&temp_path, path)?;

        Ok(())
    }
}

/// Make a sequence name safe to use as a file name.
///
/// Replaces filesystem-hostile characters with `_`; an empty name
/// becomes a timestamped fallback so saves always have a distinct base.
pub(crate) fn slugify(name: &str) -> String {
    let name = name.trim();
    if name.is_empty() {
        return chrono::Local::now()
            .format("sequence_%Y%m%d_%H%M%S")
            .to_string();
    }
    name.chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' | '\n' | '\r' | '\t' => '_',
            other => other,
        })
        .collect()
}
