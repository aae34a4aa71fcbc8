use std::fmt;
use std::path::{Path, PathBuf};

use services::ServicesConfig;

use crate::cli::GlobalArgs;

#[derive(Debug)]
pub enum ConfigError {
    InvalidDbUrl { raw: String },
    EmptyCompletionKey,
    Io { path: PathBuf, source: std::io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ConfigError::EmptyCompletionKey => write!(f, "--completion-key must not be empty"),
            ConfigError::Io { path, source } => {
                write!(f, "cannot prepare {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Resolved runtime configuration for the binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_url: String,
    pub catalog_path: PathBuf,
    pub content_dir: PathBuf,
    pub services: ServicesConfig,
}

impl AppConfig {
    /// # Errors
    ///
    /// Returns `ConfigError` for a blank database URL or completion key.
    pub fn from_args(args: &GlobalArgs) -> Result<Self, ConfigError> {
        if args.db_url.trim().is_empty() {
            return Err(ConfigError::InvalidDbUrl {
                raw: args.db_url.clone(),
            });
        }
        if args.completion_key.trim().is_empty() {
            return Err(ConfigError::EmptyCompletionKey);
        }
        Ok(Self {
            db_url: normalize_sqlite_url(&args.db_url),
            catalog_path: args.catalog.clone(),
            content_dir: args.content_dir.clone(),
            services: ServicesConfig {
                completion_key: args.completion_key.clone(),
                admin_secret: args.admin_secret.clone(),
            },
        })
    }
}

/// Turn a bare or relative database path into an absolute `sqlite://` URL.
///
/// In-memory URLs and URLs that already carry `sqlite://` pass through.
#[must_use]
pub fn normalize_sqlite_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed == "sqlite::memory:"
        || trimmed.starts_with("sqlite://")
        || trimmed.starts_with("sqlite:file:")
    {
        return trimmed.to_owned();
    }

    let path_str = trimmed.strip_prefix("sqlite:").unwrap_or(trimmed);
    let path = Path::new(path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

/// Make sure the database file and its directory exist before connecting.
///
/// # Errors
///
/// Returns `ConfigError` for a URL without a path or when the file cannot be created.
pub fn prepare_sqlite_file(db_url: &str) -> Result<(), ConfigError> {
    if db_url == "sqlite::memory:" || db_url.starts_with("sqlite:file:") {
        return Ok(());
    }

    let invalid = || ConfigError::InvalidDbUrl {
        raw: db_url.to_owned(),
    };
    let path = db_url.strip_prefix("sqlite://").ok_or_else(invalid)?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(invalid());
    }

    let path = Path::new(path);
    let io_err = |source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)
            .map_err(io_err)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_and_full_urls_pass_through() {
        assert_eq!(normalize_sqlite_url("sqlite::memory:"), "sqlite::memory:");
        assert_eq!(
            normalize_sqlite_url("sqlite:///tmp/lessons.sqlite3"),
            "sqlite:///tmp/lessons.sqlite3"
        );
        assert_eq!(
            normalize_sqlite_url("sqlite:file:memdb?mode=memory&cache=shared"),
            "sqlite:file:memdb?mode=memory&cache=shared"
        );
    }

    #[test]
    fn relative_paths_become_absolute() {
        let url = normalize_sqlite_url("sqlite:data/lessons.sqlite3");
        assert!(url.starts_with("sqlite:///"), "{url}");
        assert!(url.ends_with("data/lessons.sqlite3"));

        assert_eq!(
            normalize_sqlite_url("/var/lib/lessons.sqlite3"),
            "sqlite:///var/lib/lessons.sqlite3"
        );
    }

    #[test]
    fn prepare_creates_missing_file_and_parents() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("nested").join("lessons.sqlite3");
        let url = format!("sqlite://{}?mode=rwc", db.display());

        prepare_sqlite_file(&url).unwrap();
        assert!(db.exists());
        prepare_sqlite_file(&url).unwrap();
    }

    #[test]
    fn prepare_rejects_urls_without_a_path() {
        assert!(matches!(
            prepare_sqlite_file("postgres://localhost/db"),
            Err(ConfigError::InvalidDbUrl { .. })
        ));
        assert!(matches!(
            prepare_sqlite_file("sqlite://"),
            Err(ConfigError::InvalidDbUrl { .. })
        ));
    }
}
