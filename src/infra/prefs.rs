//! One-line preference file, the stand-in for the browser's local storage.

use std::{fs, io::ErrorKind, path::PathBuf};

use crate::infra::error::InfraError;

#[derive(Debug, Clone)]
pub struct PreferenceFile {
    path: PathBuf,
}

impl PreferenceFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Read the stored value. A missing file is `Ok(None)`; anything else
    /// that fails is a real error for the caller to degrade on.
    pub fn read(&self) -> Result<Option<String>, InfraError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => {
                let value = raw.trim().to_string();
                Ok((!value.is_empty()).then_some(value))
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(InfraError::Io(err)),
        }
    }

    pub fn write(&self, value: &str) -> Result<(), InfraError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, format!("{value}\n"))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_reads_as_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        let prefs = PreferenceFile::new(dir.path().join("theme"));
        assert_eq!(prefs.read().expect("read"), None);
    }

    #[test]
    fn round_trips_a_value() {
        let dir = tempfile::tempdir().expect("tempdir");
        let prefs = PreferenceFile::new(dir.path().join("nested/theme"));
        prefs.write("dark").expect("write");
        assert_eq!(prefs.read().expect("read"), Some("dark".to_string()));
    }

    #[test]
    fn blank_contents_read_as_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        let prefs = PreferenceFile::new(dir.path().join("theme"));
        prefs.write("  ").expect("write");
        assert_eq!(prefs.read().expect("read"), None);
    }
}
