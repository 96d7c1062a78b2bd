//! Character Context - Value Objects

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::CharacterError;

/// 后端专属参数（语速、音调等），键唯一，值任意
pub type ExtraArgs = Map<String, Value>;

/// 解析后的 TTS 调用参数，至少包含 `voice`
pub type TtsArgs = Map<String, Value>;

/// TTS 后端绑定
///
/// 不变量:
/// - backend 与 voice 非空
/// - 构造后不可变，可在角色之间自由共享
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTtsConfig")]
pub struct TtsConfig {
    backend: String,
    voice: String,
    extra_args: ExtraArgs,
}

/// 未校验的反序列化形态
#[derive(Deserialize)]
struct RawTtsConfig {
    backend: String,
    voice: String,
    #[serde(default)]
    extra_args: ExtraArgs,
}

impl TryFrom<RawTtsConfig> for TtsConfig {
    type Error = CharacterError;

    fn try_from(raw: RawTtsConfig) -> Result<Self, Self::Error> {
        Self::new(raw.backend, raw.voice, raw.extra_args)
    }
}

impl TtsConfig {
    pub fn new(
        backend: impl Into<String>,
        voice: impl Into<String>,
        extra_args: ExtraArgs,
    ) -> Result<Self, CharacterError> {
        let backend = backend.into();
        let voice = voice.into();
        if backend.trim().is_empty() {
            return Err(CharacterError::Validation(
                "TTS backend cannot be empty".to_string(),
            ));
        }
        if voice.trim().is_empty() {
            return Err(CharacterError::Validation(format!(
                "TTS voice cannot be empty (backend '{}')",
                backend
            )));
        }
        Ok(Self {
            backend,
            voice,
            extra_args,
        })
    }

    /// 从松散类型的 JSON 值构造并校验
    ///
    /// 缺少字段、字段类型错误、`extra_args` 不是对象时返回 `Validation`
    pub fn from_value(value: Value) -> Result<Self, CharacterError> {
        let raw: RawTtsConfig = serde_json::from_value(value)
            .map_err(|e| CharacterError::Validation(format!("Invalid TTS config: {}", e)))?;
        Self::try_from(raw)
    }

    /// 返回追加一个额外参数后的新配置，原值不变
    pub fn with_extra_arg(&self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut config = self.clone();
        config.extra_args.insert(key.into(), value.into());
        config
    }

    // Getters
    pub fn backend(&self) -> &str {
        &self.backend
    }

    pub fn voice(&self) -> &str {
        &self.voice
    }

    pub fn extra_args(&self) -> &ExtraArgs {
        &self.extra_args
    }
}
