//! Character Context - Aggregate Root

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use super::template::render_description;
use super::{CharacterError, TtsArgs, TtsConfig};

/// Character 聚合根
///
/// 不变量:
/// - name 非空
/// - tts_configs 非空时 preferred_tts 一定是其中的某个键
/// - tts_configs 为空时 preferred_tts 为 None
/// - 每个角色独占自己的 tts_configs
#[derive(Debug, Clone, Serialize)]
pub struct Character {
    name: String,
    role: String,
    description: String,
    tts_configs: IndexMap<String, TtsConfig>,
    preferred_tts: Option<String>,
}

impl Character {
    /// 创建角色
    ///
    /// 首选 TTS 为插入顺序中的第一个后端。重复的键以后者的配置为准，保留首次出现的位置。
    pub fn new(
        name: impl Into<String>,
        role: impl Into<String>,
        tts_configs: impl IntoIterator<Item = (String, TtsConfig)>,
    ) -> Result<Self, CharacterError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CharacterError::Validation(
                "Character name cannot be empty".to_string(),
            ));
        }

        let tts_configs: IndexMap<String, TtsConfig> = tts_configs.into_iter().collect();
        for (key, config) in &tts_configs {
            if key != config.backend() {
                tracing::warn!(
                    character = %name,
                    key = %key,
                    backend = %config.backend(),
                    "TTS config key differs from its backend"
                );
            }
        }
        let preferred_tts = tts_configs.keys().next().cloned();

        Ok(Self {
            name,
            role: role.into(),
            description: String::new(),
            tts_configs,
            preferred_tts,
        })
    }

    /// 设置给 LLM 的默认描述模板（可包含 `{name}`）
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// 切换首选 TTS 后端
    ///
    /// 后端未配置时返回错误，首选项保持不变
    pub fn set_preferred_tts(&mut self, tts_name: &str) -> Result<(), CharacterError> {
        if !self.tts_configs.contains_key(tts_name) {
            return Err(CharacterError::BackendNotConfigured(tts_name.to_string()));
        }
        tracing::debug!(character = %self.name, backend = tts_name, "Preferred TTS changed");
        self.preferred_tts = Some(tts_name.to_string());
        Ok(())
    }

    /// 生成给 LLM 的角色提示片段
    pub fn to_prompt(&self) -> Result<String, CharacterError> {
        let description = render_description(&self.description, &self.name)?;
        Ok(format!(
            "Character: {}\nRole: {}\n{}",
            self.name, self.role, description
        ))
    }

    /// 解析 TTS 调用参数
    ///
    /// 显式传入的后端优先于首选后端（空字符串视同未传入）。
    /// 结果先放入 `voice`，再合并 `extra_args`；`extra_args` 中的 `voice` 会覆盖前者。
    pub fn get_tts_args(&self, tts_name: Option<&str>) -> Result<TtsArgs, CharacterError> {
        let resolved = match tts_name.filter(|n| !n.is_empty()) {
            Some(name) => name,
            None => self
                .preferred_tts
                .as_deref()
                .ok_or_else(|| CharacterError::NoBackendConfigured(self.name.clone()))?,
        };

        let config = self
            .tts_configs
            .get(resolved)
            .ok_or_else(|| CharacterError::BackendNotConfigured(resolved.to_string()))?;

        // TODO: extra_args 中的 voice 覆盖基础 voice 是沿用的行为，待下游 TTS 客户端确认后再决定是否改为报错
        let mut args = TtsArgs::new();
        args.insert("voice".to_string(), Value::String(config.voice().to_string()));
        for (key, value) in config.extra_args() {
            args.insert(key.clone(), value.clone());
        }

        tracing::debug!(
            character = %self.name,
            backend = resolved,
            arg_count = args.len(),
            "Resolved TTS args"
        );
        Ok(args)
    }

    // Getters
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn tts_configs(&self) -> &IndexMap<String, TtsConfig> {
        &self.tts_configs
    }

    pub fn tts_config(&self, tts_name: &str) -> Option<&TtsConfig> {
        self.tts_configs.get(tts_name)
    }

    pub fn preferred_tts(&self) -> Option<&str> {
        self.preferred_tts.as_deref()
    }

    /// 按插入顺序列出已配置的后端
    pub fn backends(&self) -> impl Iterator<Item = &str> {
        self.tts_configs.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::character::ExtraArgs;
    use serde_json::json;

    fn tts(backend: &str, voice: &str, extra: Value) -> TtsConfig {
        let extra: ExtraArgs = extra.as_object().cloned().unwrap();
        TtsConfig::new(backend, voice, extra).unwrap()
    }

    fn host() -> Character {
        Character::new(
            "Alice",
            "host",
            vec![
                ("openai".to_string(), tts("openai", "alloy", json!({"speed": 1.1}))),
                ("elevenlabs".to_string(), tts("elevenlabs", "Rachel", json!({"stability": 0.5}))),
                ("edge".to_string(), tts("edge", "en-US-AriaNeural", json!({}))),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_preferred_defaults_to_first_inserted() {
        let character = host();
        assert_eq!(character.preferred_tts(), Some("openai"));

        let args = character.get_tts_args(None).unwrap();
        assert_eq!(args, character.get_tts_args(Some("openai")).unwrap());
        assert_eq!(args.get("voice"), Some(&json!("alloy")));
        assert_eq!(args.get("speed"), Some(&json!(1.1)));
    }

    #[test]
    fn test_insertion_order_not_alphabetical() {
        let character = Character::new(
            "Bob",
            "guest",
            vec![
                ("zeta".to_string(), tts("zeta", "z", json!({}))),
                ("alpha".to_string(), tts("alpha", "a", json!({}))),
            ],
        )
        .unwrap();
        assert_eq!(character.preferred_tts(), Some("zeta"));
        assert_eq!(character.backends().collect::<Vec<_>>(), vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_set_preferred_then_default_matches_explicit() {
        let mut character = host();
        for backend in ["elevenlabs", "edge", "openai"] {
            character.set_preferred_tts(backend).unwrap();
            assert_eq!(character.preferred_tts(), Some(backend));
            assert_eq!(
                character.get_tts_args(None).unwrap(),
                character.get_tts_args(Some(backend)).unwrap()
            );
        }
    }

    #[test]
    fn test_set_unknown_preferred_keeps_state() {
        let mut character = host();
        character.set_preferred_tts("elevenlabs").unwrap();

        let err = character.set_preferred_tts("google").unwrap_err();
        assert!(err.is_configuration());
        assert_eq!(err, CharacterError::BackendNotConfigured("google".to_string()));
        assert_eq!(character.preferred_tts(), Some("elevenlabs"));
    }

    #[test]
    fn test_explicit_backend_wins() {
        let character = host();
        let args = character.get_tts_args(Some("elevenlabs")).unwrap();
        assert_eq!(args.get("voice"), Some(&json!("Rachel")));
        assert_eq!(character.preferred_tts(), Some("openai"));
    }

    #[test]
    fn test_empty_explicit_falls_back_to_preferred() {
        let character = host();
        assert_eq!(
            character.get_tts_args(Some("")).unwrap(),
            character.get_tts_args(None).unwrap()
        );
    }

    #[test]
    fn test_unknown_explicit_backend() {
        let err = host().get_tts_args(Some("google")).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_extra_voice_overrides_base_voice() {
        let character = Character::new(
            "Alice",
            "host",
            vec![(
                "openai".to_string(),
                tts("openai", "A", json!({"voice": "B", "rate": 1.0})),
            )],
        )
        .unwrap();

        let args = character.get_tts_args(None).unwrap();
        let expected = json!({"voice": "B", "rate": 1.0});
        assert_eq!(Value::Object(args), expected);
    }

    #[test]
    fn test_prompt() {
        let character = host().with_description("{name} loves jazz.");
        assert_eq!(
            character.to_prompt().unwrap(),
            "Character: Alice\nRole: host\nAlice loves jazz."
        );
    }

    #[test]
    fn test_prompt_with_default_description() {
        let character = Character::new("Bob", "guest", Vec::new()).unwrap();
        assert_eq!(character.to_prompt().unwrap(), "Character: Bob\nRole: guest\n");
    }

    #[test]
    fn test_prompt_malformed_template() {
        let character = host().with_description("{name} interviews {guest}.");
        let err = character.to_prompt().unwrap_err();
        assert!(matches!(err, CharacterError::Format(_)));
    }

    #[test]
    fn test_empty_configs() {
        let character = Character::new("Bob", "guest", Vec::new()).unwrap();
        assert_eq!(character.preferred_tts(), None);

        let err = character.get_tts_args(None).unwrap_err();
        assert!(err.is_configuration());
        assert!(character.get_tts_args(Some("openai")).unwrap_err().is_configuration());
    }

    #[test]
    fn test_empty_configs_reject_set_preferred() {
        let mut character = Character::new("Bob", "guest", Vec::new()).unwrap();
        assert!(character.set_preferred_tts("openai").is_err());
        assert_eq!(character.preferred_tts(), None);
    }

    #[test]
    fn test_configs_not_shared_between_characters() {
        let a = Character::new("A", "host", Vec::new()).unwrap();
        let b = Character::new(
            "B",
            "guest",
            vec![("openai".to_string(), tts("openai", "alloy", json!({})))],
        )
        .unwrap();
        assert!(a.tts_configs().is_empty());
        assert_eq!(b.tts_configs().len(), 1);
    }

    #[test]
    fn test_shared_tts_config_value() {
        let shared = tts("openai", "alloy", json!({"speed": 1.0}));
        let a = Character::new("A", "host", vec![("openai".to_string(), shared.clone())]).unwrap();
        let b = Character::new("B", "guest", vec![("openai".to_string(), shared.clone())]).unwrap();
        assert_eq!(a.tts_config("openai"), Some(&shared));
        assert_eq!(b.tts_config("openai"), Some(&shared));
    }

    #[test]
    fn test_duplicate_key_keeps_first_position() {
        let character = Character::new(
            "Alice",
            "host",
            vec![
                ("openai".to_string(), tts("openai", "alloy", json!({}))),
                ("edge".to_string(), tts("edge", "aria", json!({}))),
                ("openai".to_string(), tts("openai", "nova", json!({}))),
            ],
        )
        .unwrap();
        assert_eq!(character.preferred_tts(), Some("openai"));
        assert_eq!(character.tts_config("openai").unwrap().voice(), "nova");
        assert_eq!(character.backends().count(), 2);
    }

    #[test]
    fn test_empty_name_rejected() {
        let err = Character::new("  ", "host", Vec::new()).unwrap_err();
        assert!(matches!(err, CharacterError::Validation(_)));
    }

    #[test]
    fn test_empty_role_accepted() {
        let character = Character::new("Alice", "", Vec::new()).unwrap();
        assert_eq!(character.role(), "");
    }
}
