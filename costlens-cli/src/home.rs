use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// `$COSTLENS_HOME`, or `~/.costlens` when unset.
pub fn costlens_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("COSTLENS_HOME") {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".costlens"))
}

pub fn ensure_costlens_home() -> Result<PathBuf> {
    let dir = costlens_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}
