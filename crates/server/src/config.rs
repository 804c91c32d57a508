use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Upper bound for request bodies, which covers logo uploads.
    pub max_upload_size_mb: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".to_string(), port: 8080, max_upload_size_mb: 8 }
    }
}

impl ServerConfig {
    /// Load configuration: built-in defaults, then `config/default.toml` when
    /// present, then `BILLCRAFT__`-prefixed environment variables on top.
    pub fn load() -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            .set_default("host", "127.0.0.1")?
            .set_default("port", 8080i64)?
            .set_default("max_upload_size_mb", 8i64)?;

        if std::path::Path::new("config/default.toml").exists() {
            builder = builder.add_source(config::File::with_name("config/default"));
        }

        builder = builder.add_source(config::Environment::with_prefix("BILLCRAFT").separator("__"));

        builder.build()?.try_deserialize()
    }
}
