// Configuration loading and parsing (tracker.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::persist::DEFAULT_SESSION_KEY;
use crate::session::SessionDefaults;

/// Config file name inside `config/` and `defaults/`.
pub const CONFIG_FILE: &str = "tracker.toml";

/// Database file name used when no explicit path is configured.
pub const DEFAULT_DB_FILE: &str = "beastgames.db";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to seed {path} from defaults: {source}")]
    SeedError {
        path: PathBuf,
        source: std::io::Error,
    },
}

// ---------------------------------------------------------------------------
// Assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    /// Team names a new or reset session starts with.
    pub session_defaults: SessionDefaults,
    /// Explicit database path, if configured.
    pub db_path: Option<String>,
    /// Key the session record is stored under.
    pub session_key: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            session_defaults: SessionDefaults::default(),
            db_path: None,
            session_key: DEFAULT_SESSION_KEY.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// tracker.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the entire tracker.toml file.
#[derive(Debug, Clone, Deserialize)]
struct TrackerFile {
    teams: TeamsSection,
    #[serde(default)]
    database: DatabaseSection,
    #[serde(default)]
    storage: StorageSection,
}

#[derive(Debug, Clone, Deserialize)]
struct TeamsSection {
    team1_name: String,
    team2_name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct DatabaseSection {
    path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct StorageSection {
    #[serde(default = "default_session_key")]
    session_key: String,
}

impl Default for StorageSection {
    fn default() -> Self {
        StorageSection {
            session_key: default_session_key(),
        }
    }
}

fn default_session_key() -> String {
    DEFAULT_SESSION_KEY.to_string()
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

fn config_path(base_dir: &Path) -> PathBuf {
    base_dir.join("config").join(CONFIG_FILE)
}

/// Load and validate `config/tracker.toml` relative to `base_dir`.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = config_path(base_dir);
    let text = read_file(&path)?;
    let file: TrackerFile = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        source: e,
    })?;

    let config = Config {
        session_defaults: SessionDefaults {
            team1_name: file.teams.team1_name,
            team2_name: file.teams.team2_name,
        },
        db_path: file.database.path.filter(|p| !p.trim().is_empty()),
        session_key: file.storage.session_key,
    };

    validate(&config)?;

    Ok(config)
}

/// Seed `config/tracker.toml` from `defaults/tracker.toml` when the user has
/// none yet. Returns the path written, or `None` when nothing was copied
/// (already present, or no shipped defaults next to `base_dir`).
pub fn seed_config_file(base_dir: &Path) -> Result<Option<PathBuf>, ConfigError> {
    let target = config_path(base_dir);
    let source = base_dir.join("defaults").join(CONFIG_FILE);
    if target.exists() || !source.is_file() {
        return Ok(None);
    }

    let seed_err = |e: std::io::Error| ConfigError::SeedError {
        path: target.clone(),
        source: e,
    };
    if let Some(dir) = target.parent() {
        std::fs::create_dir_all(dir).map_err(seed_err)?;
    }
    std::fs::copy(&source, &target).map_err(seed_err)?;
    Ok(Some(target))
}

/// Load the tracker config relative to the working directory, seeding it from
/// `defaults/` first. With no config file at all the built-in defaults apply.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    load_or_default(&cwd)
}

fn load_or_default(base_dir: &Path) -> Result<Config, ConfigError> {
    if let Some(path) = seed_config_file(base_dir)? {
        info!("Seeded {} from defaults", path.display());
    }
    if !config_path(base_dir).exists() {
        info!("No {} under {}, using built-in defaults", CONFIG_FILE, base_dir.display());
        return Ok(Config::default());
    }
    load_config_from(base_dir)
}

/// Where the database lives: the configured path, else the platform data
/// directory, else the working directory.
pub fn resolve_db_path(config: &Config) -> PathBuf {
    if let Some(path) = &config.db_path {
        return PathBuf::from(path);
    }
    directories::ProjectDirs::from("", "", "beastgames")
        .map(|dirs| dirs.data_dir().join(DEFAULT_DB_FILE))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_FILE))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    let names = [
        ("teams.team1_name", &config.session_defaults.team1_name),
        ("teams.team2_name", &config.session_defaults.team2_name),
    ];
    for (field, name) in names {
        if name.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                field: field.into(),
                message: "must not be empty".into(),
            });
        }
    }

    if config.session_key.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "storage.session_key".into(),
            message: "must not be empty".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    /// Fresh scratch directory with a `config/tracker.toml` containing `body`.
    fn scratch_with_config(name: &str, body: &str) -> PathBuf {
        let tmp = std::env::temp_dir().join(name);
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("config")).unwrap();
        fs::write(tmp.join("config").join(CONFIG_FILE), body).unwrap();
        tmp
    }

    const FULL: &str = r#"
[teams]
team1_name = "Jesse"
team2_name = "Isabell"

[database]
path = "custom.db"

[storage]
session_key = "my_key"
"#;

    #[test]
    fn load_full_config() {
        let tmp = scratch_with_config("beastgames_config_full", FULL);
        let config = load_config_from(&tmp).expect("should load valid config");
        assert_eq!(config.session_defaults.team1_name, "Jesse");
        assert_eq!(config.session_defaults.team2_name, "Isabell");
        assert_eq!(config.db_path.as_deref(), Some("custom.db"));
        assert_eq!(config.session_key, "my_key");
        assert_eq!(resolve_db_path(&config), PathBuf::from("custom.db"));
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn optional_sections_default() {
        let tmp = scratch_with_config(
            "beastgames_config_minimal",
            "[teams]\nteam1_name = \"A\"\nteam2_name = \"B\"\n",
        );
        let config = load_config_from(&tmp).expect("should load minimal config");
        assert!(config.db_path.is_none());
        assert_eq!(config.session_key, DEFAULT_SESSION_KEY);
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn blank_db_path_is_treated_as_unset() {
        let tmp = scratch_with_config(
            "beastgames_config_blank_db",
            "[teams]\nteam1_name = \"A\"\nteam2_name = \"B\"\n[database]\npath = \"  \"\n",
        );
        let config = load_config_from(&tmp).unwrap();
        assert!(config.db_path.is_none());
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_empty_team_name() {
        let tmp = scratch_with_config(
            "beastgames_config_empty_team",
            "[teams]\nteam1_name = \"\"\nteam2_name = \"B\"\n",
        );
        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::ValidationError { field, .. } => assert_eq!(field, "teams.team1_name"),
            other => panic!("expected ValidationError, got: {other}"),
        }
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_empty_session_key() {
        let tmp = scratch_with_config(
            "beastgames_config_empty_key",
            "[teams]\nteam1_name = \"A\"\nteam2_name = \"B\"\n[storage]\nsession_key = \"\"\n",
        );
        let err = load_config_from(&tmp).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { .. }));
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn missing_teams_section_is_parse_error() {
        let tmp = scratch_with_config("beastgames_config_no_teams", "[storage]\n");
        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::ParseError { path, .. } => assert!(path.ends_with(CONFIG_FILE)),
            other => panic!("expected ParseError, got: {other}"),
        }
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn file_not_found_for_missing_config() {
        let tmp = std::env::temp_dir().join("beastgames_config_missing");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&tmp).unwrap();
        let err = load_config_from(&tmp).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { .. }));
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn seed_copies_shipped_tracker_toml() {
        let tmp = std::env::temp_dir().join("beastgames_config_seed_copies");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("defaults")).unwrap();
        fs::write(tmp.join("defaults").join(CONFIG_FILE), FULL).unwrap();

        let seeded = seed_config_file(&tmp).expect("should succeed");
        assert_eq!(seeded, Some(tmp.join("config").join(CONFIG_FILE)));

        let config = load_or_default(&tmp).unwrap();
        assert_eq!(config.session_key, "my_key");
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn seed_leaves_user_config_alone() {
        let tmp = scratch_with_config("beastgames_config_seed_skips", "# custom\n");
        fs::create_dir_all(tmp.join("defaults")).unwrap();
        fs::write(tmp.join("defaults").join(CONFIG_FILE), FULL).unwrap();

        assert_eq!(seed_config_file(&tmp).unwrap(), None);
        let content = fs::read_to_string(tmp.join("config").join(CONFIG_FILE)).unwrap();
        assert_eq!(content, "# custom\n");
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn no_config_anywhere_uses_built_in_defaults() {
        let tmp = std::env::temp_dir().join("beastgames_config_none");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&tmp).unwrap();

        assert_eq!(seed_config_file(&tmp).unwrap(), None);
        let config = load_or_default(&tmp).unwrap();
        assert_eq!(config.session_defaults, SessionDefaults::default());
        assert_eq!(config.session_key, DEFAULT_SESSION_KEY);
        assert!(!tmp.join("config").exists());
        let _ = fs::remove_dir_all(&tmp);
    }
}
