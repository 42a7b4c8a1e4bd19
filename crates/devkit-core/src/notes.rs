//! Plain-text notes, one per line.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::ToolError;

pub const NOTES_DIR: &str = "notes";
pub const NOTES_FILENAME: &str = "notes.txt";

#[derive(Debug, Clone)]
pub struct NotesStore {
    path: PathBuf,
}

impl NotesStore {
    /// Notes file at `<data_dir>/notes/notes.txt`.
    pub fn in_data_dir(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(NOTES_DIR).join(NOTES_FILENAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append `text` as a new line.
    pub fn add(&self, text: &str) -> Result<(), ToolError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| ToolError::io(parent, e))?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| ToolError::io(&self.path, e))?;
        writeln!(file, "{text}").map_err(|e| ToolError::io(&self.path, e))
    }

    /// Full file contents, or `None` before the first note.
    pub fn read(&self) -> Result<Option<String>, ToolError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ToolError::io(&self.path, e)),
        }
    }
}
