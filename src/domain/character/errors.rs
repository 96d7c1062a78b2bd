//! Character Context - Errors

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CharacterError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("TTS backend '{0}' not configured for this character")]
    BackendNotConfigured(String),

    #[error("No TTS backend configured for character '{0}'")]
    NoBackendConfigured(String),

    #[error("Malformed description template: {0}")]
    Format(String),
}

impl CharacterError {
    /// 是否为配置类错误（请求的后端不在角色的 TTS 配置中）
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::BackendNotConfigured(_) | Self::NoBackendConfigured(_)
        )
    }
}
