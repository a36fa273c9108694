//! File-backed save persistence.
//!
//! One JSON save file per install. Writes go through a temporary file in
//! the same directory followed by a rename, so a crash mid-write leaves
//! the previous save intact.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use game_core::SaveGame;
use tracing::{debug, info};

use crate::error::{Result, RuntimeError};

const SAVE_FILE: &str = "save.json";

/// Reads and writes [`SaveGame`] records at a fixed path.
pub struct SaveRepository {
    path: PathBuf,
}

impl SaveRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Repository at the platform's per-user data directory.
    pub fn default_path() -> Result<Self> {
        let dirs = ProjectDirs::from("", "", "asteria").ok_or(RuntimeError::NoSaveDirectory)?;
        Ok(Self::new(dirs.data_dir().join(SAVE_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the record atomically.
    pub fn save(&self, record: &SaveGame) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_vec_pretty(record)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        info!(path = %self.path.display(), bytes = json.len(), "save written");
        Ok(())
    }

    /// Read the record if a save exists. A missing file is `Ok(None)`;
    /// unparseable contents surface as [`RuntimeError::Json`].
    pub fn load(&self) -> Result<Option<SaveGame>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no save file");
                return Ok(None);
            }
            Err(err) => return Err(err.into()),
        };
        let record: SaveGame = serde_json::from_slice(&bytes)?;
        info!(path = %self.path.display(), version = record.version, "save loaded");
        Ok(Some(record))
    }

    /// Delete the save file if present.
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::SaveGame;
    use game_content::{StaticCatalog, starting_player};

    fn sample() -> SaveGame {
        let catalog = StaticCatalog::builtin();
        let player = starting_player("Archivist", &catalog);
        SaveGame::from_player(&player, 12, vec![player.position])
    }

    #[test]
    fn round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let repo = SaveRepository::new(dir.path().join(SAVE_FILE));
        repo.save(&sample()).unwrap();
        let loaded = repo.load().unwrap().unwrap();
        assert_eq!(loaded, sample());
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let repo = SaveRepository::new(dir.path().join(SAVE_FILE));
        assert!(repo.load().unwrap().is_none());
    }

    #[test]
    fn garbage_contents_classify_as_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SAVE_FILE);
        fs::write(&path, b"{ not json").unwrap();
        let repo = SaveRepository::new(path);
        let err = repo.load().unwrap_err();
        assert!(err.is_corrupt_save());
    }

    #[test]
    fn saving_twice_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let repo = SaveRepository::new(dir.path().join(SAVE_FILE));
        let mut record = sample();
        repo.save(&record).unwrap();
        record.turn_count = 99;
        repo.save(&record).unwrap();
        assert_eq!(repo.load().unwrap().unwrap().turn_count, 99);
    }

    #[test]
    fn clear_removes_the_save() {
        let dir = tempfile::tempdir().unwrap();
        let repo = SaveRepository::new(dir.path().join(SAVE_FILE));
        repo.save(&sample()).unwrap();
        repo.clear().unwrap();
        assert!(repo.load().unwrap().is_none());
        repo.clear().unwrap();
    }
}
