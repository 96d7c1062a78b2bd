//! Voicecast - 加载演员表并输出每个角色的提示片段与 TTS 参数

use std::path::PathBuf;

use voicecast::config::{load_config, load_config_from_path, print_config};

fn main() -> anyhow::Result<()> {
    // 第一个参数可指定配置文件，否则按默认路径搜索
    let config = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => load_config_from_path(Some(&path)),
        None => load_config(),
    }
    .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    let log_filter = format!("{},voicecast={}", config.log.level, config.log.level);
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter)),
        )
        .init();

    print_config(&config);

    let cast = config.cast.build_characters()?;
    if cast.is_empty() {
        tracing::warn!("Cast is empty, nothing to do");
        return Ok(());
    }

    for character in &cast {
        println!("{}", character.to_prompt()?);
        match character.get_tts_args(None) {
            Ok(args) => println!("TTS: {}", serde_json::to_string(&args)?),
            Err(e) => tracing::warn!(character = %character.name(), "{}", e),
        }
        println!();
    }

    Ok(())
}
