use config::{Config, ConfigError, Environment, File};
use secrecy::SecretString;
use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct Settings {
    pub database_url: SecretString,
    pub host: String,
    pub port: u16,
    /// Path every API route is nested under
    pub api_prefix: String,
}

impl Settings {
    /// Defaults, then an optional `trivia.toml`, then `TRIVIA_*` variables.
    pub fn load() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Config::builder()
            .set_default("database_url", "sqlite://trivia.db")?
            .set_default("host", "0.0.0.0")?
            .set_default("port", 8080)?
            .set_default("api_prefix", "/api/v1")?
            .add_source(File::with_name("trivia").required(false))
            .add_source(Environment::with_prefix("TRIVIA"))
            .build()?
            .try_deserialize()
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn defaults_apply_without_sources() {
        let settings = Settings::load().unwrap();
        assert!(!settings.database_url.expose_secret().is_empty());
        assert!(settings.api_prefix.starts_with('/'));
        assert_eq!(
            settings.address(),
            format!("{}:{}", settings.host, settings.port)
        );
    }
}
