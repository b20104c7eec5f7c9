use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub listen_addr: String,
    #[serde(default)]
    pub scan_log: ScanLogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanLogConfig {
    pub enabled: bool,
    pub path: String,
    pub flush_interval_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:5000".to_string(),
            scan_log: ScanLogConfig::default(),
        }
    }
}

impl Default for ScanLogConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "/var/lib/scamguard/scans.json".to_string(),
            flush_interval_seconds: 60,
        }
    }
}

impl Config {
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    pub fn to_file(&self, path: &str) -> anyhow::Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scamguard.yaml");
        let path = path.to_str().unwrap();

        let config = Config::default();
        config.to_file(path).unwrap();

        let loaded = Config::from_file(path).unwrap();
        assert_eq!(loaded.listen_addr, "127.0.0.1:5000");
        assert!(loaded.scan_log.enabled);
        assert_eq!(loaded.scan_log.flush_interval_seconds, 60);
    }

    #[test]
    fn scan_log_section_is_optional() {
        let config: Config = serde_yaml::from_str("listen_addr: \"0.0.0.0:8080\"\n").unwrap();
        assert_eq!(config.listen_addr, "0.0.0.0:8080");
        assert_eq!(config.scan_log.path, "/var/lib/scamguard/scans.json");
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(Config::from_file("/nonexistent/scamguard.yaml").is_err());
    }
}
