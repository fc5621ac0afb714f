use thiserror::Error;

/// Błędy warstwy przechowywania (klucz → JSON).
///
/// Brak wpisu pod kluczem NIE jest błędem – `SnapshotStore::get` zwraca wtedy `Ok(None)`.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("invalid storage key `{0}`")]
    InvalidKey(String),

    #[error("failed to read `{key}`: {source}")]
    Read {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write `{key}`: {source}")]
    Write {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("stored value under `{key}` is malformed: {source}")]
    Malformed {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode value for `{key}`: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    pub fn key(&self) -> &str {
        match self {
            StoreError::InvalidKey(key) => key,
            StoreError::Read { key, .. }
            | StoreError::Write { key, .. }
            | StoreError::Malformed { key, .. }
            | StoreError::Encode { key, .. } => key,
        }
    }

    /// Zawartość istnieje, ale nie da się jej sparsować.
    pub fn is_malformed(&self) -> bool {
        matches!(self, StoreError::Malformed { .. })
    }
}

/// Crate-level error: thin wrapper over storage and publishing failures.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("discord: {0}")]
    Discord(#[from] serenity::Error),

    #[error("invalid snapshot label `{0}` (expected `current` or HHMM)")]
    InvalidLabel(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
