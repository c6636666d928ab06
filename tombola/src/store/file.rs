//! Room store backed by one JSON file per room.

use async_trait::async_trait;
use log::debug;
use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};
use tokio::fs;

use super::{RoomStore, StoreError, StoreResult};

const EXTENSION: &str = "json";

/// Room documents stored as `<encoded name>.json` files in a directory.
///
/// Names are encoded so any room name maps to exactly one file: ASCII
/// letters, digits, `-` and `_` are kept and every other byte becomes `~xx`.
#[derive(Debug, Clone)]
pub struct FileRoomStore {
    dir: PathBuf,
}

impl FileRoomStore {
    /// Open a store in `dir`, creating the directory if needed.
    pub async fn open(dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).await?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.{EXTENSION}", encode_name(name)))
    }
}

fn encode_name(name: &str) -> String {
    let mut encoded = String::with_capacity(name.len());
    for byte in name.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_' {
            encoded.push(char::from(byte));
        } else {
            encoded.push_str(&format!("~{byte:02x}"));
        }
    }
    encoded
}

fn decode_name(stem: &str) -> Option<String> {
    let mut bytes = Vec::with_capacity(stem.len());
    let mut chars = stem.bytes();
    while let Some(byte) = chars.next() {
        if byte == b'~' {
            let hi = chars.next()?;
            let lo = chars.next()?;
            let hex = [hi, lo];
            let hex = std::str::from_utf8(&hex).ok()?;
            bytes.push(u8::from_str_radix(hex, 16).ok()?);
        } else {
            bytes.push(byte);
        }
    }
    String::from_utf8(bytes).ok()
}

#[async_trait]
impl RoomStore for FileRoomStore {
    async fn load(&self, name: &str) -> StoreResult<Option<String>> {
        match fs::read_to_string(self.path_for(name)).await {
            Ok(doc) => Ok(Some(doc)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    async fn save(&self, name: &str, doc: &str) -> StoreResult<()> {
        let path = self.path_for(name);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, doc).await?;
        fs::rename(&tmp, &path).await?;
        debug!("Saved room {name} to {}", path.display());
        Ok(())
    }

    async fn delete(&self, name: &str) -> StoreResult<bool> {
        match fs::remove_file(self.path_for(name)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    async fn list(&self) -> StoreResult<Vec<String>> {
        let mut names = Vec::new();
        let mut entries = fs::read_dir(&self.dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(EXTENSION) {
                continue;
            }
            if let Some(name) = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .and_then(decode_name)
            {
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }
}
