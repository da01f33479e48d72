use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

fn default_host() -> String { "0.0.0.0".into() }
fn default_port() -> u16 { 8000 }

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port(), worker_threads: None }
    }
}

/// Which document store backend a database URL selects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    /// No URL configured; every store call reports the store as unavailable.
    None,
    Postgres(String),
    /// JSON file path taken from a `file://` URL.
    File(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_max_lifetime")]
    pub max_lifetime_secs: u64,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            name: None,
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            idle_timeout_secs: default_idle_timeout(),
            max_lifetime_secs: default_max_lifetime(),
            acquire_timeout_secs: default_acquire_timeout(),
            sqlx_logging: false,
        }
    }
}

fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 1 }
fn default_connect_timeout() -> u64 { 5 }
fn default_idle_timeout() -> u64 { 600 }
fn default_max_lifetime() -> u64 { 3600 }
fn default_acquire_timeout() -> u64 { 5 }

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    load_from_str(&content)
}

pub fn load_from_str(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load `config.toml` (or `CONFIG_PATH`) and fall back to environment-only
    /// configuration when the file is missing or unreadable.
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default().unwrap_or_default();
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize_from_env();
        self.server.validate()?;
        self.database.normalize_from_env();
        self.database.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize_from_env(&mut self) {
        self.apply_env(|key| std::env::var(key).ok());
    }

    /// `HOST` and `PORT` override the file; `TOKIO_WORKER_THREADS` only fills
    /// an unset value.
    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(host) = var("HOST").filter(|h| !h.trim().is_empty()) {
            self.host = host.trim().to_string();
        }
        if let Some(port) = var("PORT").and_then(|p| p.trim().parse::<u16>().ok()) {
            self.port = port;
        }
        if self.worker_threads.is_none() {
            self.worker_threads = var("TOKIO_WORKER_THREADS").and_then(|v| v.parse::<usize>().ok());
        }
    }

    fn validate(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be within 1..=65535"));
        }
        if self.worker_threads == Some(0) {
            self.worker_threads = None;
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DatabaseConfig {
    pub fn normalize_from_env(&mut self) {
        // env fills only what the TOML left empty
        if self.url.trim().is_empty() {
            if let Ok(url) = std::env::var("DATABASE_URL") {
                self.url = url;
            }
        }
        if self.name.as_deref().map_or(true, |n| n.trim().is_empty()) {
            self.name = std::env::var("DATABASE_NAME").ok().filter(|n| !n.trim().is_empty());
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.backend()?;
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections must be >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections must be >= min_connections"));
        }
        if self.connect_timeout_secs == 0 || self.acquire_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be positive seconds"));
        }
        Ok(())
    }

    pub fn is_configured(&self) -> bool {
        !self.url.trim().is_empty()
    }

    /// Classify the URL scheme.
    pub fn backend(&self) -> Result<StoreBackend> {
        let url = self.url.trim();
        if url.is_empty() {
            return Ok(StoreBackend::None);
        }
        let lower = url.to_lowercase();
        if lower.starts_with("postgresql://") || lower.starts_with("postgres://") {
            return Ok(StoreBackend::Postgres(url.to_string()));
        }
        if let Some(path) = url.strip_prefix("file://") {
            if path.is_empty() {
                return Err(anyhow!("database.url file:// needs a path"));
            }
            return Ok(StoreBackend::File(path.to_string()));
        }
        Err(anyhow!("database.url must start with postgres://, postgresql:// or file://"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_toml_with_defaults() {
        let cfg = load_from_str(
            r#"
            [server]
            port = 9001

            [database]
            url = "file://data/store.json"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.port, 9001);
        assert_eq!(cfg.database.max_connections, 10);
        assert_eq!(
            cfg.database.backend().unwrap(),
            StoreBackend::File("data/store.json".into())
        );
    }

    #[test]
    fn empty_url_means_no_store() {
        let db = DatabaseConfig::default();
        assert!(!db.is_configured());
        assert_eq!(db.backend().unwrap(), StoreBackend::None);
        assert!(db.validate().is_ok());
    }

    #[test]
    fn postgres_urls_are_accepted() {
        let db = DatabaseConfig { url: "postgres://u:p@localhost/shop".into(), ..Default::default() };
        assert!(matches!(db.backend().unwrap(), StoreBackend::Postgres(_)));
    }

    #[test]
    fn unknown_scheme_rejected() {
        let db = DatabaseConfig { url: "mongodb://localhost".into(), ..Default::default() };
        assert!(db.validate().is_err());
    }

    #[test]
    fn pool_bounds_checked() {
        let db = DatabaseConfig { min_connections: 5, max_connections: 2, ..Default::default() };
        assert!(db.validate().is_err());
    }

    #[test]
    fn host_and_port_come_from_env() {
        let env: std::collections::HashMap<&str, &str> =
            [("HOST", "127.0.0.1"), ("PORT", "9100"), ("TOKIO_WORKER_THREADS", "3")].into();
        let mut s = ServerConfig::default();
        s.apply_env(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(s.bind_addr(), "127.0.0.1:9100");
        assert_eq!(s.worker_threads, Some(3));
    }

    #[test]
    fn blank_host_and_bad_port_are_ignored() {
        let env: std::collections::HashMap<&str, &str> = [("HOST", "  "), ("PORT", "http")].into();
        let mut s = ServerConfig::default();
        s.apply_env(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(s.bind_addr(), "0.0.0.0:8000");
    }

    #[test]
    fn zero_port_rejected() {
        let mut s = ServerConfig { port: 0, ..Default::default() };
        assert!(s.validate().is_err());
    }
}
