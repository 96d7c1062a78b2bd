//! Voicecast - 多角色音频节目的角色模型
//!
//! 领域层 (domain/):
//! - Character Context: 角色、TTS 后端绑定、提示片段与 TTS 参数解析
//!
//! 配置层 (config/):
//! - 从配置文件与环境变量加载演员表 (cast)

pub mod config;
pub mod domain;

pub use config::{load_config, AppConfig};
pub use domain::{Character, CharacterError, TtsArgs, TtsConfig};
