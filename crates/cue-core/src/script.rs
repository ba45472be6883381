//! Script source - the plain-text document behind the editor
//!
//! Holds the current text, the modified flag, and the optional backing file.
//! File contents are read and written verbatim as UTF-8; a failed operation
//! leaves the in-memory state exactly as it was.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ScriptError;

/// The editable script and its file association.
#[derive(Debug, Default, Clone)]
pub struct ScriptSource {
    text: String,
    path: Option<PathBuf>,
    modified: bool,
}

impl ScriptSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// True when there is nothing worth presenting.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// File name for the title line, if a file is associated.
    pub fn file_name(&self) -> Option<&str> {
        self.path.as_deref().and_then(Path::file_name)?.to_str()
    }

    /// Replace the text from the editor, marking the script dirty when the
    /// content actually changed.
    pub fn set_text(&mut self, text: String) {
        if self.text != text {
            self.text = text;
            self.modified = true;
        }
    }

    /// Load a text file, replacing the current document.
    pub fn import(&mut self, path: PathBuf) -> Result<(), ScriptError> {
        let text = fs::read_to_string(&path).map_err(|source| ScriptError::Read {
            path: path.clone(),
            source,
        })?;
        self.text = text;
        self.path = Some(path);
        self.modified = false;
        tracing::info!(path = ?self.path, "imported script");
        Ok(())
    }

    /// Write to the backing file. Fails with [`ScriptError::NoPath`] when
    /// the script has never been saved; callers fall back to save-as.
    pub fn save(&mut self) -> Result<(), ScriptError> {
        let path = self.path.clone().ok_or(ScriptError::NoPath)?;
        self.save_as(path)
    }

    /// Write to the given file and adopt it as the backing path.
    pub fn save_as(&mut self, path: PathBuf) -> Result<(), ScriptError> {
        fs::write(&path, &self.text).map_err(|source| ScriptError::Write {
            path: path.clone(),
            source,
        })?;
        self.path = Some(path);
        self.modified = false;
        tracing::info!(path = ?self.path, "saved script");
        Ok(())
    }

    /// Discard the document and its file association.
    pub fn close(&mut self) {
        self.text.clear();
        self.path = None;
        self.modified = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_text_marks_modified_only_on_change() {
        let mut script = ScriptSource::new();
        script.set_text("hello".to_string());
        assert!(script.is_modified());

        let mut script = ScriptSource::new();
        script.set_text(String::new());
        assert!(!script.is_modified());
    }

    #[test]
    fn test_blank_detection() {
        let mut script = ScriptSource::new();
        assert!(script.is_blank());
        script.set_text("  \n\t ".to_string());
        assert!(script.is_blank());
        script.set_text("words".to_string());
        assert!(!script.is_blank());
    }

    #[test]
    fn test_import_save_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("script.txt");
        std::fs::write(&path, "line one\nline two\n").unwrap();

        let mut script = ScriptSource::new();
        script.import(path.clone()).unwrap();
        assert_eq!(script.text(), "line one\nline two\n");
        assert_eq!(script.path(), Some(path.as_path()));
        assert!(!script.is_modified());
        assert_eq!(script.file_name(), Some("script.txt"));

        script.set_text("rewritten\n".to_string());
        assert!(script.is_modified());
        script.save().unwrap();
        assert!(!script.is_modified());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "rewritten\n");
    }

    #[test]
    fn test_failed_import_leaves_state_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let mut script = ScriptSource::new();
        script.set_text("current draft".to_string());

        let missing = dir.path().join("nope.txt");
        let err = script.import(missing).unwrap_err();
        assert!(matches!(err, ScriptError::Read { .. }));
        assert_eq!(script.text(), "current draft");
        assert_eq!(script.path(), None);
        assert!(script.is_modified());
    }

    #[test]
    fn test_save_without_path_fails() {
        let mut script = ScriptSource::new();
        script.set_text("draft".to_string());
        assert!(matches!(script.save(), Err(ScriptError::NoPath)));
        assert!(script.is_modified());
    }

    #[test]
    fn test_save_as_adopts_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("talk.txt");

        let mut script = ScriptSource::new();
        script.set_text("notes".to_string());
        script.save_as(path.clone()).unwrap();
        assert_eq!(script.path(), Some(path.as_path()));
        assert!(!script.is_modified());

        // Subsequent plain save goes to the adopted path.
        script.set_text("more notes".to_string());
        script.save().unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "more notes");
    }

    #[test]
    fn test_close_clears_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("script.txt");
        std::fs::write(&path, "content").unwrap();

        let mut script = ScriptSource::new();
        script.import(path).unwrap();
        script.close();
        assert!(script.is_blank());
        assert_eq!(script.path(), None);
        assert!(!script.is_modified());
    }
}
