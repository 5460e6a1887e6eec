// src/config.rs

pub mod file;

use self::file::load_or_create_external_config;
use crate::{cli::Cli, constants, error::AppResult, utils::NameStyle};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct NetworkConfig {
    pub connect_timeout_secs: Option<u64>,
    pub timeout_secs: Option<u64>,
    pub max_retries: Option<u32>,
}

/// `~/.coursera-dl/config.json` 的内容，所有字段均可省略
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ExternalConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_root: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_style: Option<NameStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(default)]
    pub network: NetworkConfig,
}

impl ExternalConfig {
    pub(crate) fn default_app_config() -> Self {
        // 为 NetworkConfig 提供一组稳健的默认值
        let network_config = NetworkConfig {
            connect_timeout_secs: Some(10),
            timeout_secs: Some(300),
            max_retries: Some(3),
        };

        Self {
            site_root: Some(constants::DEFAULT_SITE_ROOT.into()),
            name_style: None,
            user_agent: None,
            network: network_config,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub site_root: String,
    pub name_style: NameStyle,
    pub user_agent: String,
    pub connect_timeout: Duration,
    pub timeout: Duration,
    pub max_retries: u32,
}

impl AppConfig {
    /// 命令行参数 > 配置文件 > 内置默认值
    pub fn new(args: &Cli) -> AppResult<Self> {
        let external_config = load_or_create_external_config()?;
        Ok(Self::merge(args, external_config))
    }

    pub(crate) fn merge(args: &Cli, external_config: ExternalConfig) -> Self {
        let site_root = args
            .site_root
            .clone()
            .or(external_config.site_root)
            .unwrap_or_else(|| constants::DEFAULT_SITE_ROOT.into());

        Self {
            site_root: site_root.trim_end_matches('/').to_string(),
            name_style: external_config.name_style.unwrap_or_else(NameStyle::for_host),
            user_agent: external_config
                .user_agent
                .unwrap_or_else(|| constants::USER_AGENT.into()),
            connect_timeout: Duration::from_secs(
                external_config.network.connect_timeout_secs.unwrap_or(10),
            ),
            timeout: Duration::from_secs(external_config.network.timeout_secs.unwrap_or(300)),
            max_retries: external_config.network.max_retries.unwrap_or(3),
        }
    }

    /// 不读取配置文件，直接指向给定站点的配置
    pub fn for_site(site_root: &str) -> Self {
        Self {
            site_root: site_root.trim_end_matches('/').to_string(),
            name_style: NameStyle::for_host(),
            user_agent: constants::USER_AGENT.into(),
            connect_timeout: Duration::from_secs(5),
            timeout: Duration::from_secs(15),
            max_retries: 0,
        }
    }

    pub fn index_url(&self, course_id: &str) -> String {
        constants::index_page::PATH_TEMPLATE
            .replace("{site_root}", &self.site_root)
            .replace("{course_id}", course_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_site_root_overrides_config_file() {
        let args = Cli::parse_from([
            "coursera-dl",
            "ml-001",
            "cookie",
            "--site-root",
            "http://127.0.0.1:8080/",
        ]);
        let external = ExternalConfig {
            site_root: Some("https://example.org".into()),
            name_style: Some(NameStyle::Restrictive),
            ..Default::default()
        };
        let config = AppConfig::merge(&args, external);
        assert_eq!(config.site_root, "http://127.0.0.1:8080");
        assert_eq!(config.name_style, NameStyle::Restrictive);
        assert_eq!(config.max_retries, 3);
        assert_eq!(
            config.index_url("ml-001"),
            "http://127.0.0.1:8080/ml-001/lecture/index"
        );
    }

    #[test]
    fn test_defaults_when_config_file_is_empty() {
        let args = Cli::parse_from(["coursera-dl", "ml-001", "cookie"]);
        let config = AppConfig::merge(&args, serde_json::from_str("{}").unwrap());
        assert_eq!(config.site_root, constants::DEFAULT_SITE_ROOT);
        assert_eq!(config.name_style, NameStyle::for_host());
        assert_eq!(config.timeout, Duration::from_secs(300));
    }

    #[test]
    fn test_name_style_parses_lowercase() {
        let external: ExternalConfig =
            serde_json::from_str(r#"{"name_style": "permissive", "network": {"max_retries": 1}}"#)
                .unwrap();
        assert_eq!(external.name_style, Some(NameStyle::Permissive));
        assert_eq!(external.network.max_retries, Some(1));
    }
}
