//! Character Context - 角色限界上下文
//!
//! 职责:
//! - 角色身份与叙事角色
//! - TTS 后端绑定与首选后端
//! - 给 LLM 的提示片段、给 TTS 的调用参数

mod aggregate;
mod errors;
mod template;
mod value_objects;

pub use aggregate::Character;
pub use errors::CharacterError;
pub use template::{render_description, NAME_FIELD};
pub use value_objects::{ExtraArgs, TtsArgs, TtsConfig};
