use std::fs;
use std::path::{Path, PathBuf};

use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::error::TokenStoreError;
use crate::paths::token_file_path;
use crate::schema::TokenRecord;

/// Single-slot persistent store for the last obtained access token.
///
/// Writes are plain-file overwrites with last-writer-wins semantics; no
/// locking is taken because the newest token is always an acceptable
/// outcome of a write race.
pub struct TokenStore {
    root: PathBuf,
}

impl TokenStore {
    /// Opens the store rooted at `root`, creating the directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, TokenStoreError> {
        let root = root.into();
        fs::create_dir_all(&root)
            .map_err(|source| TokenStoreError::io("creating token store root", &root, source))?;

        Ok(Self { root })
    }

    #[must_use]
    pub fn path(&self) -> PathBuf {
        token_file_path(&self.root)
    }

    /// Loads the cached token. An absent slot is `Ok(None)`, not an error.
    pub fn load(&self) -> Result<Option<String>, TokenStoreError> {
        let path = self.path();
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(TokenStoreError::io("reading token record", &path, source))
            }
        };

        let record = serde_json::from_str::<TokenRecord>(&raw)
            .map_err(|source| TokenStoreError::json_parse(&path, source))?;
        validate_record(&path, &record)?;

        Ok(Some(record.access_token))
    }

    /// Overwrites the slot with `access_token`, stamped with the current UTC time.
    pub fn save(&self, access_token: &str) -> Result<(), TokenStoreError> {
        let path = self.path();
        let saved_at = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .map_err(TokenStoreError::ClockFormat)?;
        let record = TokenRecord::v1(access_token, saved_at);
        let raw = serde_json::to_string(&record)
            .map_err(|source| TokenStoreError::json_serialize(&path, source))?;

        fs::write(&path, raw)
            .map_err(|source| TokenStoreError::io("writing token record", &path, source))
    }

    /// Removes the slot. Removing an absent slot is not an error.
    pub fn clear(&self) -> Result<(), TokenStoreError> {
        let path = self.path();
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(TokenStoreError::io("removing token record", &path, source)),
        }
    }
}

fn validate_record(path: &Path, record: &TokenRecord) -> Result<(), TokenStoreError> {
    if record.version != 1 {
        return Err(TokenStoreError::UnsupportedVersion {
            path: path.to_path_buf(),
            found: record.version,
        });
    }

    if OffsetDateTime::parse(&record.saved_at, &Rfc3339).is_err() {
        return Err(TokenStoreError::InvalidTimestamp {
            path: path.to_path_buf(),
            value: record.saved_at.clone(),
        });
    }

    if record.access_token.trim().is_empty() {
        return Err(TokenStoreError::EmptyToken {
            path: path.to_path_buf(),
        });
    }

    Ok(())
}
