use std::{
    fs,
    io,
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use anyhow::{anyhow, Context, Result};
use shared::{domain::Role, protocol::UserProfile};
use tracing::warn;

/// Durable home of the auth token.
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Result<Option<String>>;
    fn save(&self, token: &str) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => {
                let token = raw.trim();
                Ok((!token.is_empty()).then(|| token.to_string()))
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err)
                .with_context(|| format!("failed to read token file '{}'", self.path.display())),
        }
    }

    fn save(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed to create token directory '{}'", parent.display())
            })?;
        }
        write_private(&self.path, token)
            .with_context(|| format!("failed to write token file '{}'", self.path.display()))
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err)
                .with_context(|| format!("failed to remove token file '{}'", self.path.display())),
        }
    }
}

/// Writes the token readable by the owner only. A pre-existing file is
/// tightened to 0600 as well.
#[cfg(unix)]
fn write_private(path: &Path, token: &str) -> io::Result<()> {
    use std::{
        io::Write,
        os::unix::fs::{OpenOptionsExt, PermissionsExt},
    };

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    file.set_permissions(fs::Permissions::from_mode(0o600))?;
    file.write_all(token.as_bytes())
}

#[cfg(not(unix))]
fn write_private(path: &Path, token: &str) -> io::Result<()> {
    fs::write(path, token)
}

#[derive(Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<String>> {
        self.token
            .read()
            .map(|guard| guard.clone())
            .map_err(|_| anyhow!("token store lock poisoned"))
    }

    fn save(&self, token: &str) -> Result<()> {
        let mut guard = self
            .token
            .write()
            .map_err(|_| anyhow!("token store lock poisoned"))?;
        *guard = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut guard = self
            .token
            .write()
            .map_err(|_| anyhow!("token store lock poisoned"))?;
        *guard = None;
        Ok(())
    }
}

/// Token plus the profile fetched with it. A profile is only ever held
/// alongside a token, and both are dropped together.
pub struct Session {
    token: Option<String>,
    user: Option<UserProfile>,
    store: Arc<dyn TokenStore>,
}

impl Session {
    /// Picks up a previously persisted token. Store failures degrade to an
    /// anonymous session.
    pub fn restore(store: Arc<dyn TokenStore>) -> Self {
        let token = store.load().unwrap_or_else(|err| {
            warn!(error = %err, "could not read persisted token");
            None
        });
        Self {
            token,
            user: None,
            store,
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    pub fn role(&self) -> Role {
        self.user.as_ref().map_or(Role::Guest, |user| user.role)
    }

    /// Adopts a freshly issued token. The previous profile belongs to the old
    /// token and is dropped.
    pub fn begin(&mut self, token: String) {
        if let Err(err) = self.store.save(&token) {
            warn!(error = %err, "could not persist token; session is memory-only");
        }
        self.token = Some(token);
        self.user = None;
    }

    /// Returns `false` (and keeps no profile) when there is no token.
    pub fn attach_user(&mut self, user: UserProfile) -> bool {
        if self.token.is_none() {
            warn!(email = %user.email, "refusing profile without a token");
            return false;
        }
        self.user = Some(user);
        true
    }

    pub fn clear(&mut self) {
        self.token = None;
        self.user = None;
        if let Err(err) = self.store.clear() {
            warn!(error = %err, "could not remove persisted token");
        }
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
