use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;

/// 默认的组卷服务地址，部署后需替换为实际的 Web App URL
pub const DEFAULT_ENDPOINT_URL: &str = "https://script.google.com/macros/s/YOUR_DEPLOYMENT_ID/exec";

/// 程序配置文件
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// 组卷服务地址
    pub endpoint_url: String,
    /// 是否在重启之间保存已选题目
    pub persist_selection: bool,
    /// 保存已选题目的状态文件
    pub state_file: PathBuf,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint_url: DEFAULT_ENDPOINT_URL.to_string(),
            persist_selection: true,
            state_file: PathBuf::from("paper_picker_state.json"),
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 默认值叠加环境变量
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// 从 TOML 文件加载，文件中缺失的字段使用默认值
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// 按 默认值 → TOML 文件 → 环境变量 的顺序解析配置
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => {
                Ok(Self::from_toml_file(path)?.with_overrides(|key| std::env::var(key).ok()))
            }
            None => Ok(Self::from_env()),
        }
    }

    /// 用 `lookup` 提供的值覆盖当前配置，无法解析的值保持原样
    pub fn with_overrides(self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            endpoint_url: lookup("PAPER_ENDPOINT_URL").unwrap_or(self.endpoint_url),
            persist_selection: lookup("PERSIST_SELECTION")
                .and_then(|v| v.parse().ok())
                .unwrap_or(self.persist_selection),
            state_file: lookup("STATE_FILE")
                .map(PathBuf::from)
                .unwrap_or(self.state_file),
            verbose_logging: lookup("VERBOSE_LOGGING")
                .and_then(|v| v.parse().ok())
                .unwrap_or(self.verbose_logging),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_overrides_apply_on_top_of_defaults() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("PAPER_ENDPOINT_URL", "http://localhost:9000/exec"),
            ("PERSIST_SELECTION", "false"),
        ]);

        let config = Config::default().with_overrides(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.endpoint_url, "http://localhost:9000/exec");
        assert!(!config.persist_selection);
        assert_eq!(config.state_file, PathBuf::from("paper_picker_state.json"));
    }

    #[test]
    fn test_unparsable_override_keeps_previous_value() {
        let config = Config::default().with_overrides(|k| {
            (k == "VERBOSE_LOGGING").then(|| "sometimes".to_string())
        });

        assert!(!config.verbose_logging);
    }

    #[test]
    fn test_toml_file_fills_missing_fields_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("picker.toml");
        std::fs::write(&path, "endpoint_url = \"https://example.test/exec\"\n").unwrap();

        let config = Config::from_toml_file(&path).unwrap();

        assert_eq!(config.endpoint_url, "https://example.test/exec");
        assert!(config.persist_selection);
    }

    #[test]
    fn test_load_without_file_reads_environment() {
        assert_eq!(Config::load(None).unwrap(), Config::from_env());
    }

    #[test]
    fn test_missing_toml_file_is_reported() {
        let err = Config::from_toml_file(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
