use once_cell::sync::Lazy;
use serde::Deserialize;

/// The static config instance.
#[allow(dead_code)]
pub static INSTANCE: Lazy<Config> = Lazy::new(|| {
    #[cfg(not(test))]
    {
        use std::{fs::File, io::Read};

        return toml::from_str(&{
            let mut string = String::new();
            File::open("./data/config.toml")
                .unwrap()
                .read_to_string(&mut string)
                .unwrap();
            string
        })
        .unwrap();
    }

    #[cfg(test)]
    Config::default()
});

/// Describing the client deployment configuration.
#[derive(Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base url all API paths are joined onto.
    pub api_base_url: String,
    /// Seconds between two full feed refresh cycles.
    pub poll_interval_secs: u64,
    /// Bound on a single request, so a hung request cannot
    /// pin an in-flight flag forever.
    pub request_timeout_secs: u64,
    /// Location of the stored bearer token.
    pub credential_path: std::path::PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:8080".to_string(),
            poll_interval_secs: 5,
            request_timeout_secs: 30,
            credential_path: "./data/token".into(),
        }
    }
}
