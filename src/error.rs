use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced at the edges of the deck builder.
///
/// The assembly engine itself does not fail on malformed-but-present data;
/// these cover unreadable inputs and a commander the pool does not contain.
#[derive(Debug, Error)]
pub enum DeckError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("commander '{0}' is not in the card pool")]
    UnknownCommander(String),
}

impl DeckError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DeckError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        DeckError::Json {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, DeckError>;

/// Reads and deserializes a JSON file, tagging failures with the path.
pub(crate) fn read_json<T: serde::de::DeserializeOwned>(path: &std::path::Path) -> Result<T> {
    let file = std::fs::File::open(path).map_err(|err| DeckError::io(path, err))?;
    let reader = std::io::BufReader::new(file);
    serde_json::from_reader(reader).map_err(|err| DeckError::json(path, err))
}
