// crates/cli/src/input.rs
//! Conversation files on disk.
//!
//! Two shapes are accepted:
//!
//! ```json
//! [{"text": "Hi"}, {"text": "Hello, how can I help?"}]
//! ```
//!
//! ```json
//! {"messages": [{"sender": "customer", "text": "Hi"}]}
//! ```

use std::path::{Path, PathBuf};

use convo_score_db::NewMessage;
use convo_score_types::Turn;
use serde::Deserialize;
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Debug, Error)]
pub enum ConversationFileError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed conversation file {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to walk {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Not a directory: {path}")]
    NotADirectory { path: PathBuf },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ConversationFile {
    Turns(Vec<Turn>),
    Messages { messages: Vec<NewMessage> },
}

impl ConversationFile {
    fn into_messages(self) -> Vec<NewMessage> {
        match self {
            Self::Turns(turns) => turns
                .into_iter()
                .map(|t| NewMessage::new(String::new(), t.text))
                .collect(),
            Self::Messages { messages } => messages,
        }
    }
}

pub fn parse_conversation(json: &str) -> Result<Vec<NewMessage>, serde_json::Error> {
    serde_json::from_str::<ConversationFile>(json).map(ConversationFile::into_messages)
}

pub fn read_conversation(path: &Path) -> Result<Vec<NewMessage>, ConversationFileError> {
    let json = std::fs::read_to_string(path).map_err(|source| ConversationFileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_conversation(&json).map_err(|source| ConversationFileError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}

/// Every `*.json` file under `dir`, recursively, sorted by path.
pub fn discover_conversation_files(dir: &Path) -> Result<Vec<PathBuf>, ConversationFileError> {
    if !dir.is_dir() {
        return Err(ConversationFileError::NotADirectory {
            path: dir.to_path_buf(),
        });
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).follow_links(true) {
        let entry = entry.map_err(|source| ConversationFileError::Walk {
            path: dir.to_path_buf(),
            source,
        })?;
        let is_json = entry
            .path()
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if entry.file_type().is_file() && is_json {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_turn_array() {
        let messages = parse_conversation(r#"[{"text": "Hi"}, {"text": "Hello"}]"#).unwrap();
        assert_eq!(
            messages,
            vec![NewMessage::new("", "Hi"), NewMessage::new("", "Hello")]
        );
    }

    #[test]
    fn test_parse_messages_object() {
        let json = r#"{"messages": [
            {"sender": "customer", "text": "My order is late"},
            {"text": "Let me check"}
        ]}"#;
        let messages = parse_conversation(json).unwrap();
        assert_eq!(
            messages,
            vec![
                NewMessage::new("customer", "My order is late"),
                NewMessage::new("", "Let me check"),
            ]
        );
    }

    #[test]
    fn test_parse_empty_conversation() {
        assert!(parse_conversation("[]").unwrap().is_empty());
        assert!(parse_conversation(r#"{"messages": []}"#).unwrap().is_empty());
    }

    #[test]
    fn test_rejects_missing_text() {
        assert!(parse_conversation(r#"[{"body": "Hi"}]"#).is_err());
        assert!(parse_conversation(r#"{"turns": []}"#).is_err());
        assert!(parse_conversation("not json").is_err());
    }

    #[test]
    fn test_read_missing_file_is_io_error() {
        let err = read_conversation(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, ConversationFileError::Io { .. }));
    }

    #[test]
    fn test_discover_sorted_json_only() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("b.json"), "[]").unwrap();
        std::fs::write(dir.path().join("a.json"), "[]").unwrap();
        std::fs::write(dir.path().join("nested/c.JSON"), "[]").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "skip").unwrap();

        let files = discover_conversation_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.json", "b.json", "nested/c.JSON"]);
    }

    #[test]
    fn test_discover_rejects_file_path() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let err = discover_conversation_files(file.path()).unwrap_err();
        assert!(matches!(err, ConversationFileError::NotADirectory { .. }));
    }
}
