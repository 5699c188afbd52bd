//! Saving and loading sessions as JSON snapshots.
//!
//! A snapshot stores the tile grid, players, units and turn state. Graphs
//! are not stored; they are rebuilt from the tiles on load.

use crate::error::SnapshotError;
use crate::session::GameSession;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use tracing::debug;

/// Snapshot format version written by this build.
pub const SNAPSHOT_VERSION: u32 = 1;

/// A named, versioned copy of a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// Format version.
    pub version: u32,
    /// Save name.
    pub name: String,
    /// Session state.
    pub session: GameSession,
}

impl Snapshot {
    /// Wrap a session under a name.
    #[must_use]
    pub fn new(name: impl Into<String>, session: GameSession) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            name: name.into(),
            session,
        }
    }

    /// Parse a snapshot from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is malformed, the version is unsupported
    /// or the session state is inconsistent.
    pub fn from_json(text: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_json::from_str(text)?;
        snapshot.check()
    }

    /// Serialize the snapshot as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    fn check(self) -> Result<Self, SnapshotError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::Version {
                found: self.version,
                expected: SNAPSHOT_VERSION,
            });
        }
        self.session.validate().map_err(SnapshotError::Invalid)?;
        Ok(self)
    }
}

/// Write a session to `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn save_snapshot(
    path: impl AsRef<Path>,
    name: &str,
    session: &GameSession,
) -> Result<(), SnapshotError> {
    let path = path.as_ref();
    let writer = BufWriter::new(fs::File::create(path)?);
    serde_json::to_writer(writer, &Snapshot::new(name, session.clone()))?;
    debug!(path = %path.display(), name, "saved snapshot");
    Ok(())
}

/// Read a snapshot from `path`.
///
/// # Errors
///
/// Returns an error if the file is missing, malformed or inconsistent.
pub fn load_snapshot(path: impl AsRef<Path>) -> Result<Snapshot, SnapshotError> {
    let path = path.as_ref();
    let reader = BufReader::new(fs::File::open(path)?);
    let snapshot: Snapshot = serde_json::from_reader(reader)?;
    let snapshot = snapshot.check()?;
    debug!(path = %path.display(), name = %snapshot.name, "loaded snapshot");
    Ok(snapshot)
}
