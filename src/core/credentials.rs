//! # Credentials
//!
//! The API key entered on the login screen is kept in `~/.tolk/credentials`,
//! one line, nothing else. Config file and env vars can still provide a key;
//! see `config::resolve` for precedence.

use log::{info, warn};
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::core::config::config_dir;

#[derive(Debug)]
pub enum CredentialsError {
    Io(std::io::Error),
}

impl fmt::Display for CredentialsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialsError::Io(e) => write!(f, "credentials I/O error: {e}"),
        }
    }
}

impl std::error::Error for CredentialsError {}

pub fn credentials_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("credentials"))
}

/// Read the saved key, if any. A missing file is not an error.
pub fn load_api_key() -> Option<String> {
    let path = credentials_path()?;
    match load_api_key_from(&path) {
        Ok(key) => key,
        Err(e) => {
            warn!("Failed to read credentials from {}: {}", path.display(), e);
            None
        }
    }
}

pub fn load_api_key_from(path: &Path) -> Result<Option<String>, CredentialsError> {
    if !path.exists() {
        return Ok(None);
    }
    let contents = fs::read_to_string(path).map_err(CredentialsError::Io)?;
    let key = contents.trim();
    Ok((!key.is_empty()).then(|| key.to_string()))
}

pub fn save_api_key_to(path: &Path, key: &str) -> Result<(), CredentialsError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(CredentialsError::Io)?;
    }
    let mut file = open_private(path).map_err(CredentialsError::Io)?;
    writeln!(file, "{}", key.trim()).map_err(CredentialsError::Io)?;
    info!("Saved API key to {}", path.display());
    Ok(())
}

/// Open for writing, readable by the owner only from the moment it exists.
#[cfg(unix)]
fn open_private(path: &Path) -> std::io::Result<fs::File> {
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    // `mode` only applies on creation; a file saved by an older version keeps its bits
    file.set_permissions(fs::Permissions::from_mode(0o600))?;
    Ok(file)
}

#[cfg(not(unix))]
fn open_private(path: &Path) -> std::io::Result<fs::File> {
    fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("tolk-credentials-{}-{}", name, std::process::id()))
            .join("credentials")
    }

    #[test]
    fn test_missing_file_is_none() {
        let path = temp_path("missing");
        let _ = fs::remove_file(&path);
        assert!(load_api_key_from(&path).unwrap().is_none());
    }

    #[test]
    fn test_save_then_load_trims() {
        let path = temp_path("save");
        save_api_key_to(&path, "  secret:fx \n").unwrap();
        assert_eq!(load_api_key_from(&path).unwrap().as_deref(), Some("secret:fx"));
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn test_saved_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let path = temp_path("mode");
        let _ = fs::remove_file(&path);
        save_api_key_to(&path, "secret:fx").unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o600);
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn test_resave_tightens_existing_file() {
        use std::os::unix::fs::PermissionsExt;

        let path = temp_path("resave");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "old\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        save_api_key_to(&path, "new").unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o600);
        assert_eq!(load_api_key_from(&path).unwrap().as_deref(), Some("new"));
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_blank_file_is_none() {
        let path = temp_path("blank");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "\n  \n").unwrap();
        assert!(load_api_key_from(&path).unwrap().is_none());
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
