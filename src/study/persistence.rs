use std::path::Path;

use serde::{Deserialize, Serialize};

use super::Study;
use crate::error::{Error, Result};
use crate::trial::FrozenTrial;
use crate::types::Direction;

const SNAPSHOT_VERSION: u32 = 1;

/// A serializable snapshot of a study's state.
///
/// # Schema versioning
///
/// The `version` field enables future schema evolution without breaking existing files.
/// The current version is `1`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StudySnapshot {
    /// Schema version for forward compatibility.
    pub version: u32,
    /// The optimization direction.
    pub direction: Direction,
    /// All trials in recorded order.
    pub trials: Vec<FrozenTrial>,
}

impl Study {
    /// Capture the direction and trials as a [`StudySnapshot`].
    #[must_use]
    pub fn snapshot(&self) -> StudySnapshot {
        StudySnapshot {
            version: SNAPSHOT_VERSION,
            direction: self.direction,
            trials: self.trials(),
        }
    }

    /// Rebuild a study from a snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedSnapshot`] if the schema version is unknown.
    pub fn from_snapshot(snapshot: StudySnapshot) -> Result<Self> {
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(Error::UnsupportedSnapshot(snapshot.version));
        }
        Ok(Self::with_trials(snapshot.direction, snapshot.trials))
    }

    /// Save the study state to a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an I/O or serialization error if the file cannot be written.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let snapshot = self.snapshot();

        // Write to a sibling temp file, then rename over the target.
        let parent = path.parent().unwrap_or(Path::new("."));
        let tmp_path = parent.join(format!(
            ".{}.tmp",
            path.file_name().unwrap_or_default().to_string_lossy()
        ));
        let file = std::fs::File::create(&tmp_path)?;
        serde_json::to_writer_pretty(file, &snapshot)?;
        std::fs::rename(&tmp_path, path)?;
        trace_debug!(path = %path.display(), trials = snapshot.trials.len(), "study saved");
        Ok(())
    }

    /// Load a study from a JSON file written by [`save`](Self::save).
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or has an
    /// unsupported schema version.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let snapshot: StudySnapshot = serde_json::from_reader(std::io::BufReader::new(file))?;
        Self::from_snapshot(snapshot)
    }
}
