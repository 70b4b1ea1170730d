//! JSON persistence for ~/.starfall/ record files.
//!
//! Only run records are stored here; a run in progress is never saved.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::PathBuf;

const HIGH_SCORE_FILE: &str = "best_score.json";

/// Best run on this machine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HighScore {
    pub best_score: u32,
}

/// Get the ~/.starfall/ directory path, creating it if needed.
pub fn starfall_dir() -> io::Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine home directory",
        )
    })?;
    let dir = home_dir.join(".starfall");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Get the full path for a record file in ~/.starfall/.
pub fn record_path(filename: &str) -> io::Result<PathBuf> {
    Ok(starfall_dir()?.join(filename))
}

/// Load a JSON record, returning `T::default()` if missing or invalid.
pub fn load_json_or_default<T: Default + serde::de::DeserializeOwned>(filename: &str) -> T {
    let path = match record_path(filename) {
        Ok(p) => p,
        Err(_) => return T::default(),
    };
    match fs::read_to_string(&path) {
        Ok(json) => serde_json::from_str(&json).unwrap_or_default(),
        Err(_) => T::default(),
    }
}

/// Save a value as pretty-printed JSON to ~/.starfall/.
pub fn save_json<T: Serialize>(filename: &str, data: &T) -> io::Result<()> {
    let path = record_path(filename)?;
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(path, json)?;
    Ok(())
}

pub fn load_high_score() -> HighScore {
    load_json_or_default(HIGH_SCORE_FILE)
}

pub fn save_high_score(high_score: &HighScore) -> io::Result<()> {
    save_json(HIGH_SCORE_FILE, high_score)
}
