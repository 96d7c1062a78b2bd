//! Domain Layer - 领域层
//!
//! 包含一个限界上下文:
//! - Character Context: 角色与 TTS 配置

pub mod character;

pub use character::{Character, CharacterError, ExtraArgs, TtsArgs, TtsConfig};
