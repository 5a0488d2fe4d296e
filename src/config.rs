use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::models::Timing;

/// 配置文件结构 (config.toml)，所有字段可省略
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub seed: Option<u64>, // 固定随机种子，便于复现
    pub timing: Timing,
    pub display: DisplayConfig,
}

/// 界面动画参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub pulse_ms: u64,
    pub confetti_count: usize,
    pub confetti_clear_ms: u64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            pulse_ms: 300,
            confetti_count: 30,
            confetti_clear_ms: 2000,
        }
    }
}

const MAX_CONFETTI: usize = 500;

/// 从TOML文件加载配置，文件不存在时使用默认值
pub fn load_config(path: &Path) -> io::Result<GameConfig> {
    if !path.exists() {
        return Ok(GameConfig::default());
    }

    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// 解析并校验配置
pub fn parse_config(content: &str) -> io::Result<GameConfig> {
    let config: GameConfig =
        toml::from_str(content).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    config.validate()?;
    Ok(config)
}

impl GameConfig {
    pub fn validate(&self) -> io::Result<()> {
        let invalid =
            |msg: String| -> io::Result<()> { Err(io::Error::new(io::ErrorKind::InvalidData, msg)) };

        if self.timing.min_delay_ms == 0 {
            return invalid("timing.min_delay_ms 必须大于 0".to_string());
        }
        if self.display.pulse_ms == 0 {
            return invalid("display.pulse_ms 必须大于 0".to_string());
        }
        // 闪烁必须短于最小间隔，否则连续同色会连成一片
        if self.display.pulse_ms >= self.timing.min_delay_ms {
            return invalid(format!(
                "display.pulse_ms ({}) 必须小于 timing.min_delay_ms ({})",
                self.display.pulse_ms, self.timing.min_delay_ms
            ));
        }
        if self.display.confetti_count > MAX_CONFETTI {
            return invalid(format!("display.confetti_count 不能超过 {MAX_CONFETTI}"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_uses_defaults() {
        let path = std::env::temp_dir().join("simon-config-that-does-not-exist.toml");
        let config = load_config(&path).unwrap();
        assert_eq!(config, GameConfig::default());
        assert_eq!(config.timing.initial_delay_ms, 1500);
    }

    #[test]
    fn test_partial_config() {
        let config = parse_config(
            r#"
            seed = 42

            [timing]
            min_delay_ms = 350
            "#,
        )
        .unwrap();

        assert_eq!(config.seed, Some(42));
        assert_eq!(config.timing.min_delay_ms, 350);
        assert_eq!(config.timing.speed_up_step_ms, 100);
        assert_eq!(config.display, DisplayConfig::default());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = parse_config("[timing]\nmin_delay_ms = 0\n").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);

        let err = parse_config("[display]\nconfetti_count = 10000\n").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);

        let err = parse_config(
            "[timing]\nmin_delay_ms = 100\ninitial_delay_ms = 100\n[display]\npulse_ms = 300\n",
        )
        .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);

        // 相等也不行
        let err = parse_config("[timing]\nmin_delay_ms = 300\n").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_malformed_toml() {
        let err = parse_config("timing = [").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("simon-config-{}.toml", std::process::id()));
        fs::write(&path, "[display]\npulse_ms = 120\n").unwrap();
        let config = load_config(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(config.display.pulse_ms, 120);
    }
}
