//! Color-scheme preference: stored choice with a configured fallback.

use tracing::warn;

use crate::config::ColorScheme;
use crate::infra::prefs::PreferenceFile;

pub struct SchemeStore {
    file: PreferenceFile,
    fallback: ColorScheme,
}

impl SchemeStore {
    pub fn new(file: PreferenceFile, fallback: ColorScheme) -> Self {
        Self { file, fallback }
    }

    /// The active scheme: the stored preference when present and readable,
    /// the configured fallback otherwise. Never fails.
    pub fn current(&self) -> ColorScheme {
        match self.file.read() {
            Ok(Some(value)) => value.parse().unwrap_or_else(|_| {
                warn!(value, "unrecognized stored scheme, using fallback");
                self.fallback
            }),
            Ok(None) => self.fallback,
            Err(err) => {
                warn!(error = %err, "scheme preference unreadable, using fallback");
                self.fallback
            }
        }
    }

    /// Flip the scheme and persist the choice. A failed write is logged and
    /// the flipped scheme still applies for this invocation.
    pub fn toggle(&self) -> ColorScheme {
        let next = self.current().flipped();
        if let Err(err) = self.file.write(next.as_str()) {
            warn!(error = %err, "could not persist scheme preference");
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(dir: &tempfile::TempDir, fallback: ColorScheme) -> SchemeStore {
        SchemeStore::new(PreferenceFile::new(dir.path().join("scheme")), fallback)
    }

    #[test]
    fn falls_back_without_a_stored_preference() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert_eq!(store(&dir, ColorScheme::Dark).current(), ColorScheme::Dark);
    }

    #[test]
    fn toggle_persists_and_round_trips() {
        let dir = tempfile::tempdir().expect("tempdir");
        let scheme = store(&dir, ColorScheme::Light);
        assert_eq!(scheme.toggle(), ColorScheme::Dark);
        assert_eq!(scheme.current(), ColorScheme::Dark);
        assert_eq!(scheme.toggle(), ColorScheme::Light);
        assert_eq!(scheme.current(), ColorScheme::Light);
    }

    #[test]
    fn garbage_in_the_file_falls_back() {
        let dir = tempfile::tempdir().expect("tempdir");
        let scheme = store(&dir, ColorScheme::Light);
        PreferenceFile::new(dir.path().join("scheme"))
            .write("blurple")
            .expect("write");
        assert_eq!(scheme.current(), ColorScheme::Light);
    }
}
