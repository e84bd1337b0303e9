//! terralib configuration.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{IacError, IacResult};

/// Where and how terraform is invoked.
///
/// Every field except `config_path` has a default, so a YAML file may set
/// only what it needs:
///
/// ```yaml
/// config_path: ./infra
/// timeout_seconds: 600
/// env:
///   TF_IN_AUTOMATION: "1"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerralibConfig {
    /// Directory holding the terraform configuration
    pub config_path: PathBuf,
    /// terraform binary (name on PATH or full path)
    pub binary: String,
    /// Shell used to run the command line
    pub shell: String,
    /// Extra environment variables for terraform
    pub env: HashMap<String, String>,
    /// Kill terraform after this many seconds (0 = never)
    pub timeout_seconds: u64,
    /// Log commands instead of running them
    pub dry_run: bool,
    /// Treat an unclassified non-zero exit as an error
    pub strict_exit: bool,
}

impl Default for TerralibConfig {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from("."),
            binary: "terraform".to_string(),
            shell: "sh".to_string(),
            env: HashMap::new(),
            timeout_seconds: 0,
            dry_run: false,
            strict_exit: false,
        }
    }
}

impl TerralibConfig {
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
            ..Self::default()
        }
    }

    /// Load a configuration from a YAML file.
    pub fn from_yaml_file(path: &Path) -> IacResult<Self> {
        debug!("Loading terralib config from {:?}", path);
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that can never produce a runnable command.
    pub fn validate(&self) -> IacResult<()> {
        if self.binary.trim().is_empty() {
            return Err(IacError::InvalidConfig("binary must not be empty".to_string()));
        }
        if self.shell.trim().is_empty() {
            return Err(IacError::InvalidConfig("shell must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn with_binary(mut self, binary: impl Into<String>) -> Self {
        self.binary = binary.into();
        self
    }

    pub fn with_shell(mut self, shell: impl Into<String>) -> Self {
        self.shell = shell.into();
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    pub fn dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }

    pub fn strict_exit(mut self, enabled: bool) -> Self {
        self.strict_exit = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = TerralibConfig::new("/infra");
        assert_eq!(config.config_path, PathBuf::from("/infra"));
        assert_eq!(config.binary, "terraform");
        assert_eq!(config.shell, "sh");
        assert_eq!(config.timeout_seconds, 0);
        assert!(!config.strict_exit);
    }

    #[test]
    fn test_builder() {
        let config = TerralibConfig::new("/infra")
            .with_binary("tofu")
            .with_env("TF_IN_AUTOMATION", "1")
            .with_timeout(30)
            .strict_exit(true);

        assert_eq!(config.binary, "tofu");
        assert_eq!(config.env.get("TF_IN_AUTOMATION"), Some(&"1".to_string()));
        assert_eq!(config.timeout_seconds, 30);
        assert!(config.strict_exit);
    }

    #[test]
    fn test_from_yaml_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("terralib.yaml");
        std::fs::write(
            &path,
            "config_path: ./infra\ntimeout_seconds: 600\nenv:\n  TF_IN_AUTOMATION: \"1\"\n",
        )
        .unwrap();

        let config = TerralibConfig::from_yaml_file(&path).unwrap();
        assert_eq!(config.config_path, PathBuf::from("./infra"));
        assert_eq!(config.timeout_seconds, 600);
        assert_eq!(config.binary, "terraform");
        assert_eq!(config.env.len(), 1);
    }

    #[test]
    fn test_from_yaml_file_rejects_empty_binary() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("terralib.yaml");
        std::fs::write(&path, "binary: \"\"\n").unwrap();

        let err = TerralibConfig::from_yaml_file(&path).unwrap_err();
        assert!(matches!(err, IacError::InvalidConfig(_)));
    }

    #[test]
    fn test_from_yaml_file_missing() {
        let err = TerralibConfig::from_yaml_file(Path::new("/no/such/terralib.yaml")).unwrap_err();
        assert!(matches!(err, IacError::Io(_)));
    }
}
