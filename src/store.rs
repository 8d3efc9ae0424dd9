//! Token persistence: where bearer tokens live between process runs.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::domain::{AccessToken, Credentials};

/// Separator between client id and secret when computing the fingerprint.
const FINGERPRINT_SEPARATOR: &[u8] = b"::";

/// Storage for one bearer token per credential pair.
///
/// The client calls [`TokenStore::prepare`] once during `init`, then [`TokenStore::load`]
/// and, after every successful token request, [`TokenStore::save`]. Implementations are
/// not expected to coordinate between processes; the last write wins.
pub trait TokenStore: Send + Sync {
    /// Key under which the token for `credentials` is stored.
    fn fingerprint(&self, credentials: &Credentials) -> String {
        credentials_fingerprint(credentials)
    }

    /// Make the store ready for use (create directories, open handles, ...).
    fn prepare(&self) -> io::Result<()> {
        Ok(())
    }

    /// Return the stored token, or `None` when nothing usable is stored.
    fn load(&self, fingerprint: &str) -> io::Result<Option<AccessToken>>;

    /// Replace the stored token.
    fn save(&self, fingerprint: &str, token: &AccessToken) -> io::Result<()>;
}

/// Hex-encoded SHA-256 of `client_id::client_secret`.
pub fn credentials_fingerprint(credentials: &Credentials) -> String {
    let mut hasher = Sha256::new();
    hasher.update(credentials.client_id().as_str().as_bytes());
    hasher.update(FINGERPRINT_SEPARATOR);
    hasher.update(credentials.client_secret().as_str().as_bytes());
    hex::encode(hasher.finalize())
}

#[derive(Debug, Clone)]
/// Stores each token as a plaintext file named by its fingerprint inside `dir`.
///
/// The file content is exactly the token string.
pub struct FileTokenStore {
    dir: PathBuf,
}

impl FileTokenStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, fingerprint: &str) -> PathBuf {
        self.dir.join(fingerprint)
    }
}

impl TokenStore for FileTokenStore {
    fn prepare(&self) -> io::Result<()> {
        fs::create_dir_all(&self.dir)
    }

    fn load(&self, fingerprint: &str) -> io::Result<Option<AccessToken>> {
        match fs::read_to_string(self.path_for(fingerprint)) {
            Ok(contents) => Ok(AccessToken::new(contents).ok()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    fn save(&self, fingerprint: &str, token: &AccessToken) -> io::Result<()> {
        fs::write(self.path_for(fingerprint), token.as_str())
    }
}
