//! Credential resolution. Turns the user-supplied flags into a single
//! credential before the campaign starts; the engine treats the result as
//! opaque input to the connection executor.
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use russh::keys::{PrivateKey, load_secret_key};
use tracing::debug;

use crate::args::StressArgs;
use crate::error::{AppError, AppResult, ValidationError};

/// Key filenames probed under ~/.ssh when neither --password nor --key is
/// given, most preferred first.
const DEFAULT_KEY_NAMES: [&str; 2] = ["id_ed25519", "id_rsa"];

#[derive(Clone)]
pub enum Credential {
    Password {
        user: String,
        password: String,
    },
    Key {
        user: String,
        key: Arc<PrivateKey>,
        path: PathBuf,
    },
}

impl Credential {
    #[must_use]
    pub fn user(&self) -> &str {
        match self {
            Credential::Password { user, .. } | Credential::Key { user, .. } => user,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Credential::Password { .. } => "password",
            Credential::Key { .. } => "key",
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credential::Password { user, .. } => f
                .debug_struct("Credential::Password")
                .field("user", user)
                .finish_non_exhaustive(),
            Credential::Key { user, path, .. } => f
                .debug_struct("Credential::Key")
                .field("user", user)
                .field("path", path)
                .finish_non_exhaustive(),
        }
    }
}

/// Resolve the credential from the CLI flags. Password wins when both a
/// password and a key are supplied, matching common SSH client behavior.
pub fn resolve_credential(args: &StressArgs) -> AppResult<Credential> {
    let user = args.user.clone();

    if let Some(password) = args.password.clone() {
        return Ok(Credential::Password { user, password });
    }

    let path = match args.key.as_deref() {
        Some(raw) => {
            let path = expand_tilde(raw);
            if !path.exists() {
                return Err(AppError::validation(ValidationError::KeyNotFound { path }));
            }
            path
        }
        None => discover_default_key().ok_or_else(|| {
            AppError::validation(ValidationError::MissingCredential)
        })?,
    };

    let key = load_secret_key(&path, None).map_err(|source| {
        AppError::validation(ValidationError::KeyUnreadable {
            path: path.clone(),
            source,
        })
    })?;
    debug!("Using SSH key {}", path.display());

    Ok(Credential::Key {
        user,
        key: Arc::new(key),
        path,
    })
}

fn discover_default_key() -> Option<PathBuf> {
    let ssh_dir = user_home_dir()?.join(".ssh");
    DEFAULT_KEY_NAMES
        .iter()
        .map(|name| ssh_dir.join(name))
        .find(|path| path.exists())
}

pub(crate) fn expand_tilde(raw: &str) -> PathBuf {
    if raw == "~" {
        if let Some(home) = user_home_dir() {
            return home;
        }
    }
    if let Some(rest) = raw.strip_prefix("~/") {
        if let Some(home) = user_home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(raw)
}

fn user_home_dir() -> Option<PathBuf> {
    #[cfg(windows)]
    {
        if let Some(value) = std::env::var_os("USERPROFILE") {
            return Some(PathBuf::from(value));
        }
        let drive = std::env::var_os("HOMEDRIVE");
        let path = std::env::var_os("HOMEPATH");
        if let (Some(drive), Some(path)) = (drive, path) {
            let mut full = PathBuf::from(drive);
            full.push(path);
            return Some(full);
        }
    }

    if let Some(value) = std::env::var_os("HOME") {
        return Some(PathBuf::from(value));
    }

    None
}
