//! The saved session: `{config_dir}/greedible/session.json`.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use greedible_auth::Session;

pub fn session_path() -> Result<PathBuf> {
    let base = dirs::config_dir()
        .or_else(|| {
            dirs::home_dir().map(|mut h| {
                h.push(".config");
                h
            })
        })
        .context("failed to resolve a config directory - tried config_dir() and home_dir()/.config")?;
    Ok(base.join("greedible").join("session.json"))
}

pub fn load(path: &Path) -> Result<Option<Session>> {
    if !path.exists() {
        return Ok(None);
    }
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read session file {}", path.display()))?;
    let session: Session = serde_json::from_str(&data)
        .with_context(|| format!("failed to parse session file {}", path.display()))?;
    Ok(Some(session))
}

pub fn save(path: &Path, session: &Session) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let data = serde_json::to_string_pretty(session)?;
    let mut file =
        open_private(path).with_context(|| format!("failed to open {}", path.display()))?;
    restrict_permissions(path)?;
    file.write_all(data.as_bytes())
        .with_context(|| format!("failed to write {}", path.display()))
}

/// Returns whether a session file was removed.
pub fn clear(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(false);
    }
    fs::remove_file(path).with_context(|| format!("failed to remove {}", path.display()))?;
    Ok(true)
}

/// Opens `path` for writing; on unix a new file is created owner-only.
fn open_private(path: &Path) -> std::io::Result<fs::File> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    options.open(path)
}

/// Narrows a file that already existed with wider permissions, before the
/// token is written.
#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
        .with_context(|| format!("failed to restrict permissions on {}", path.display()))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<()> {
    Ok(())
}
