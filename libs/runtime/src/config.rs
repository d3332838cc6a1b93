use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ledger_db::ConnectOpts;

/// Directory under the user's home used when `home_dir` is left empty.
pub const DEFAULT_HOME_SUBDIR: &str = ".report-ledger";

/// Application configuration: typed global sections plus a per-module bag.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Base directory for relative database and log paths. Normalized to an
    /// absolute path on load.
    #[serde(default)]
    pub home_dir: String,
    /// Database configuration (optional).
    pub database: Option<DatabaseConfig>,
    /// Logging configuration (optional, uses defaults if None).
    pub logging: Option<LoggingConfig>,
    /// Per-module configuration bag: module_name → arbitrary JSON/YAML value.
    #[serde(default)]
    pub modules: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// SQLite URL, e.g. `sqlite://reports.db` (relative to `home_dir`) or `sqlite::memory:`.
    pub url: String,
    /// Maximum number of connections in the pool (optional, defaults to 10).
    pub max_conns: Option<u32>,
    /// SQLite busy timeout in milliseconds (optional, defaults to 5000).
    pub busy_timeout_ms: Option<u32>,
    /// Whitelisted SQLite pragmas: `journal_mode`, `synchronous`, `busy_timeout`, `foreign_keys`.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub params: HashMap<String, String>,
}

impl DatabaseConfig {
    /// Connection options derived from this section.
    pub fn connect_opts(&self) -> ConnectOpts {
        ConnectOpts {
            max_conns: self.max_conns,
            acquire_timeout: Some(Duration::from_secs(5)),
            sqlite_busy_timeout: self
                .busy_timeout_ms
                .map(|ms| Duration::from_millis(u64::from(ms))),
            sqlite_params: self.params.clone(),
            create_sqlite_dirs: true,
            ..Default::default()
        }
    }

    /// The URL with a relative SQLite file path resolved against `base_dir`.
    pub fn resolved_url(&self, base_dir: &Path) -> Result<String> {
        absolutize_sqlite_dsn(&self.url, base_dir)
    }
}

/// Logging configuration: subsystem name → settings.
/// Key "default" is the catch-all for logs that don't match explicit subsystems.
pub type LoggingConfig = HashMap<String, Section>;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Section {
    pub console_level: String, // "info", "debug", "error", "off"
    #[serde(default)]
    pub file: String, // "logs/reports.log"; empty disables the file sink
    #[serde(default)]
    pub file_level: String,
    #[serde(default)]
    pub max_backups: Option<usize>,
    #[serde(default)]
    pub max_size_mb: Option<u64>,
}

/// Create a default logging configuration.
pub fn default_logging_config() -> LoggingConfig {
    HashMap::from([(
        "default".to_string(),
        Section {
            console_level: "info".to_string(),
            file: "logs/report-ledger.log".to_string(),
            file_level: "debug".to_string(),
            max_backups: Some(3),
            max_size_mb: Some(100),
        },
    )])
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            home_dir: String::new(),
            database: Some(DatabaseConfig {
                url: "sqlite://reports.db".to_string(),
                max_conns: Some(10),
                busy_timeout_ms: Some(5000),
                params: HashMap::new(),
            }),
            logging: Some(default_logging_config()),
            modules: HashMap::new(),
        }
    }
}

impl AppConfig {
    /// Layered load: defaults → YAML file → `APP__`-prefixed environment.
    /// Also normalizes `home_dir` into an absolute path and creates the directory.
    pub fn load_layered<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        use figment::{
            providers::{Env, Format, Serialized, Yaml},
            Figment,
        };

        // Optional sections stay None unless YAML or ENV provides them.
        let base = AppConfig {
            home_dir: String::new(),
            database: None,
            logging: None,
            modules: HashMap::new(),
        };

        let figment = Figment::new()
            .merge(Serialized::defaults(base))
            .merge(Yaml::file(config_path.as_ref()))
            // APP__DATABASE__URL=sqlite::memory: maps to database.url
            .merge(Env::prefixed("APP__").split("__"));

        let mut config: AppConfig = figment
            .extract()
            .with_context(|| format!("Failed to load config from {:?}", config_path.as_ref()))?;

        config.normalize_home_dir().context("Failed to resolve home_dir")?;
        Ok(config)
    }

    /// Load configuration from file or fall back to built-in defaults.
    pub fn load_or_default<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_layered(path),
            None => {
                let mut c = Self::default();
                c.normalize_home_dir()
                    .context("Failed to resolve home_dir (defaults)")?;
                Ok(c)
            }
        }
    }

    /// Serialize configuration to YAML.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize config to YAML")
    }

    /// Apply overrides from command line arguments.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if args.mock {
            let db = self.database.get_or_insert_with(|| DatabaseConfig {
                url: String::new(),
                max_conns: None,
                busy_timeout_ms: None,
                params: HashMap::new(),
            });
            db.url = "sqlite::memory:".to_string();
        }

        let logging = self.logging.get_or_insert_with(default_logging_config);
        if let Some(default_section) = logging.get_mut("default") {
            match args.verbose {
                0 => {}
                1 => default_section.console_level = "debug".to_string(),
                _ => default_section.console_level = "trace".to_string(),
            }
        }
    }

    /// Typed view of `modules.<name>`, or `T::default()` when the entry is absent.
    pub fn module_config<T>(&self, name: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned + Default,
    {
        match self.modules.get(name) {
            Some(raw) => serde_json::from_value(raw.clone())
                .with_context(|| format!("Invalid config for module '{name}'")),
            None => Ok(T::default()),
        }
    }

    pub fn home_path(&self) -> &Path {
        Path::new(&self.home_dir)
    }

    fn normalize_home_dir(&mut self) -> Result<()> {
        let raw = self.home_dir.trim();
        let opt = (!raw.is_empty()).then(|| raw.to_string());
        let resolved = resolve_home_dir(opt, DEFAULT_HOME_SUBDIR, true)?;
        self.home_dir = resolved.to_string_lossy().to_string();
        Ok(())
    }
}

/// Command line arguments relevant to configuration.
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    pub config: Option<String>,
    pub print_config: bool,
    pub verbose: u8,
    pub mock: bool,
}

/// Resolve the home directory to an absolute path.
///
/// `None` means `<user home>/<default_subdir>`. A leading `~` expands to the
/// user home; other relative paths resolve against the current directory.
pub fn resolve_home_dir(
    home_dir: Option<String>,
    default_subdir: &str,
    create: bool,
) -> Result<PathBuf> {
    let user_home = || dirs::home_dir().ok_or_else(|| anyhow!("cannot determine user home directory"));

    let path = match home_dir {
        None => user_home()?.join(default_subdir),
        Some(p) if p == "~" => user_home()?,
        Some(p) => match p.strip_prefix("~/") {
            Some(rest) => user_home()?.join(rest),
            None => PathBuf::from(p),
        },
    };
    let path = if path.is_relative() {
        std::env::current_dir()
            .context("cannot read current directory")?
            .join(path)
    } else {
        path
    };

    if create {
        std::fs::create_dir_all(&path)
            .with_context(|| format!("cannot create home_dir {}", path.display()))?;
    }
    Ok(path)
}

/// Rewrite a file-backed `sqlite://` DSN so its path is absolute under `base_dir`.
/// Memory DSNs are returned as-is.
pub fn absolutize_sqlite_dsn(dsn: &str, base_dir: &Path) -> Result<String> {
    let dsn = dsn.trim();
    if dsn.eq_ignore_ascii_case("sqlite::memory:") || dsn.eq_ignore_ascii_case("sqlite://memory:")
    {
        return Ok(dsn.to_string());
    }
    let db_path = dsn
        .strip_prefix("sqlite://")
        .or_else(|| dsn.strip_prefix("sqlite:"))
        .ok_or_else(|| anyhow!("DSN must start with sqlite: (got: {})", dsn))?;

    let (path_str, query) = match db_path.split_once('?') {
        Some((p, q)) => (p, Some(q)),
        None => (db_path, None),
    };
    if query.is_some_and(|q| q.to_ascii_lowercase().contains("mode=memory")) {
        return Ok(dsn.to_string());
    }

    let mut p = PathBuf::from(path_str);
    if p.as_os_str().is_empty() {
        return Err(anyhow!("Empty SQLite path in DSN"));
    }
    if p.is_relative() {
        p = base_dir.join(p);
    }

    let mut out = String::from("sqlite://");
    out.push_str(&p.to_string_lossy().replace('\\', "/"));
    if let Some(q) = query {
        out.push('?');
        out.push_str(q);
    }
    Ok(out)
}
