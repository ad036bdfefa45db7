use anyhow::Result;
use anyhow::anyhow;
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub auth: AuthConfig,
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

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port(), worker_threads: None }
    }
}

fn default_host() -> String { "0.0.0.0".into() }
fn default_port() -> u16 { 5000 }

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_db_name")]
    pub name: String,
    #[serde(default = "default_services_collection")]
    pub services_collection: String,
    #[serde(default = "default_bookings_collection")]
    pub bookings_collection: String,
    #[serde(default = "default_max_pool_size")]
    pub max_pool_size: u32,
    #[serde(default = "default_min_pool_size")]
    pub min_pool_size: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_server_selection_timeout")]
    pub server_selection_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            name: default_db_name(),
            services_collection: default_services_collection(),
            bookings_collection: default_bookings_collection(),
            max_pool_size: default_max_pool_size(),
            min_pool_size: default_min_pool_size(),
            connect_timeout_secs: default_connect_timeout(),
            server_selection_timeout_secs: default_server_selection_timeout(),
        }
    }
}

fn default_db_name() -> String { "carDoctor".into() }
fn default_services_collection() -> String { "services".into() }
fn default_bookings_collection() -> String { "checkout".into() }
fn default_max_pool_size() -> u32 { 10 }
fn default_min_pool_size() -> u32 { 0 }
fn default_connect_timeout() -> u64 { 10 }
fn default_server_selection_timeout() -> u64 { 30 }

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub jwt_secret: String,
    #[serde(default = "default_token_ttl")]
    pub token_ttl_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self { jwt_secret: String::new(), token_ttl_secs: default_token_ttl() }
    }
}

fn default_token_ttl() -> u64 { 3600 }

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load `config.toml` (or `CONFIG_PATH`), falling back to defaults when the
    /// file is missing, then overlay the process environment and validate.
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = match load_default() {
            Ok(cfg) => cfg,
            Err(e) => {
                debug!(error = %e, "config file not loaded; using defaults + env");
                AppConfig::default()
            }
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.apply_env(|key| std::env::var(key).ok());
        self.server.normalize()?;
        self.database.validate()?;
        self.auth.validate()?;
        Ok(())
    }

    /// Overlay environment values. `lookup` is injected so the overlay can be
    /// exercised without touching the process environment.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT").and_then(|p| p.parse::<u16>().ok()) {
            self.server.port = port;
        }
        if let Some(host) = lookup("SERVER_HOST") {
            self.server.host = host;
        }
        if let Some(w) = lookup("TOKIO_WORKER_THREADS").and_then(|v| v.parse::<usize>().ok()) {
            self.server.worker_threads = Some(w);
        }
        self.database.normalize_from_env(&lookup);
        if let Some(secret) = lookup("ACCESS_TOKEN_SECRET") {
            self.auth.jwt_secret = secret;
        }
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
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
}

impl DatabaseConfig {
    /// Fill the URL from `MONGODB_URI`/`DATABASE_URL`, or compose an Atlas SRV
    /// URL from `DB_USER`, `DB_PASSWORD` and `DB_CLUSTER`.
    pub fn normalize_from_env<F>(&mut self, lookup: &F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if !self.url.trim().is_empty() {
            return;
        }
        if let Some(url) = lookup("MONGODB_URI").or_else(|| lookup("DATABASE_URL")) {
            self.url = url;
            return;
        }
        if let (Some(user), Some(password), Some(cluster)) =
            (lookup("DB_USER"), lookup("DB_PASSWORD"), lookup("DB_CLUSTER"))
        {
            self.url = format!("mongodb+srv://{user}:{password}@{cluster}/?retryWrites=true&w=majority");
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!("database.url is empty; set it in config.toml or via MONGODB_URI"));
        }
        let lower = self.url.to_lowercase();
        if !(lower.starts_with("mongodb://") || lower.starts_with("mongodb+srv://")) {
            return Err(anyhow!("database.url must start with mongodb:// or mongodb+srv://"));
        }
        if self.name.trim().is_empty() {
            return Err(anyhow!("database.name must not be empty"));
        }
        if self.max_pool_size < self.min_pool_size {
            return Err(anyhow!("database.max_pool_size must be >= min_pool_size"));
        }
        if self.connect_timeout_secs == 0 || self.server_selection_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be positive seconds"));
        }
        Ok(())
    }
}

impl AuthConfig {
    pub fn validate(&self) -> Result<()> {
        if self.jwt_secret.is_empty() {
            return Err(anyhow!("auth.jwt_secret is empty; set ACCESS_TOKEN_SECRET"));
        }
        if self.token_ttl_secs == 0 {
            return Err(anyhow!("auth.token_ttl_secs must be positive"));
        }
        Ok(())
    }
}
