//! Standard paths used by NeuroCleanse tools

use std::path::PathBuf;

/// Standard NeuroCleanse paths
pub struct Paths {
    /// Data directory (~/.local/share/neurocleanse)
    pub data: PathBuf,
    /// Config directory (~/.config/neurocleanse)
    pub config: PathBuf,
}

impl Default for Paths {
    fn default() -> Self {
        Self::new()
    }
}

impl Paths {
    pub fn new() -> Self {
        let data = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("~/.local/share"))
            .join("neurocleanse");

        let config = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("neurocleanse");

        Self { data, config }
    }

    /// Get the path of the main config file
    pub fn config_file(&self) -> PathBuf {
        self.config.join("config.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_file_lives_in_config_dir() {
        let paths = Paths::new();
        let file = paths.config_file();
        assert!(file.starts_with(&paths.config));
        assert_eq!(file.file_name().and_then(|f| f.to_str()), Some("config.json"));
    }
}
