//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::collections::HashSet;

use super::ConfigError;
use crate::domain::{Character, CharacterError, ExtraArgs, TtsConfig};

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 演员表
    #[serde(default)]
    pub cast: CastConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 演员表配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CastConfig {
    /// 角色列表（按文件顺序）
    #[serde(default)]
    pub characters: Vec<CharacterConfig>,
}

impl CastConfig {
    /// 按配置顺序构建所有角色
    ///
    /// 角色名重复时返回 `ValidationError`
    pub fn build_characters(&self) -> Result<Vec<Character>, ConfigError> {
        let mut seen = HashSet::new();
        let mut characters = Vec::with_capacity(self.characters.len());

        for entry in &self.characters {
            if !seen.insert(entry.name.as_str()) {
                return Err(ConfigError::ValidationError(format!(
                    "Duplicate character name: {}",
                    entry.name
                )));
            }
            characters.push(entry.build()?);
        }

        Ok(characters)
    }
}

/// 单个角色配置
#[derive(Debug, Clone, Deserialize)]
pub struct CharacterConfig {
    pub name: String,

    #[serde(default)]
    pub role: String,

    /// 给 LLM 的默认描述模板，可包含 `{name}`
    #[serde(default)]
    pub description: String,

    /// 首选 TTS 后端，未设置时使用第一个条目
    #[serde(default)]
    pub preferred_tts: Option<String>,

    /// TTS 后端条目，顺序即优先顺序
    #[serde(default)]
    pub tts: Vec<TtsEntryConfig>,
}

impl CharacterConfig {
    pub fn build(&self) -> Result<Character, ConfigError> {
        let mut keys = HashSet::new();
        let mut tts_configs = Vec::with_capacity(self.tts.len());

        for entry in &self.tts {
            if !keys.insert(entry.key()) {
                return Err(ConfigError::ValidationError(format!(
                    "Duplicate TTS entry '{}' for character '{}'",
                    entry.key(),
                    self.name
                )));
            }
            tts_configs.push((entry.key().to_string(), entry.to_tts_config()?));
        }

        let mut character = Character::new(self.name.as_str(), self.role.as_str(), tts_configs)?
            .with_description(self.description.as_str());

        if let Some(preferred) = &self.preferred_tts {
            character.set_preferred_tts(preferred)?;
        }

        Ok(character)
    }
}

/// TTS 后端条目
#[derive(Debug, Clone, Deserialize)]
pub struct TtsEntryConfig {
    /// 条目名称，默认与 backend 相同
    #[serde(default)]
    pub name: Option<String>,

    pub backend: String,

    pub voice: String,

    #[serde(default)]
    pub extra_args: ExtraArgs,
}

impl TtsEntryConfig {
    pub fn key(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.backend)
    }

    pub fn to_tts_config(&self) -> Result<TtsConfig, CharacterError> {
        TtsConfig::new(
            self.backend.as_str(),
            self.voice.as_str(),
            self.extra_args.clone(),
        )
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
