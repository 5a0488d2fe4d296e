use std::time::Duration;

use rand::Rng;
use rand::distributions::{Distribution, Standard};
use serde::{Deserialize, Serialize};

/// 按钮颜色（两色字母表）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorSymbol {
    Red,
    Blue,
}

impl ColorSymbol {
    pub const ALL: [ColorSymbol; 2] = [ColorSymbol::Red, ColorSymbol::Blue];

    /// 在按钮数组中的下标
    pub fn index(self) -> usize {
        match self {
            ColorSymbol::Red => 0,
            ColorSymbol::Blue => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ColorSymbol::Red => "红",
            ColorSymbol::Blue => "蓝",
        }
    }
}

/// 均匀抽样：红蓝各 50%
impl Distribution<ColorSymbol> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> ColorSymbol {
        if rng.r#gen() {
            ColorSymbol::Red
        } else {
            ColorSymbol::Blue
        }
    }
}

/// 游戏阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    #[default]
    Idle,
    Playback,      // 正在回放序列，输入禁用
    AwaitingInput, // 等待玩家复述
    GameOver,      // 直到重新开始
}

/// 状态机发出、由界面层消费的事件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Reveal(ColorSymbol),
    Progress(u8),
    LevelComplete { level: u32 },
    GameOver { reached: u32 },
    InputEnabled(bool),
}

/// 玩家一次输入的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    /// 非等待输入阶段，忽略
    Ignored,
    Correct { progress: u8 },
    LevelComplete { level: u32 },
    Mismatch { expected: ColorSymbol },
}

/// 回放节奏参数（毫秒）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timing {
    pub min_delay_ms: u64,
    pub speed_up_step_ms: u64,
    pub initial_delay_ms: u64,
    pub lead_time_ms: u64,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            min_delay_ms: 500,
            speed_up_step_ms: 100,
            initial_delay_ms: 1500,
            lead_time_ms: 200,
        }
    }
}

impl Timing {
    /// 每个颜色之间的间隔：max(min, initial - level * step)
    pub fn playback_delay(&self, level: u32) -> Duration {
        let speed_up = u64::from(level).saturating_mul(self.speed_up_step_ms);
        let delay = self.initial_delay_ms.saturating_sub(speed_up);
        Duration::from_millis(delay.max(self.min_delay_ms))
    }

    pub fn lead_time(&self) -> Duration {
        Duration::from_millis(self.lead_time_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_playback_delay_examples() {
        let timing = Timing::default();
        assert_eq!(timing.playback_delay(1), Duration::from_millis(1400));
        assert_eq!(timing.playback_delay(10), Duration::from_millis(500));
        // 原始值为负数时仍取下限
        assert_eq!(timing.playback_delay(20), Duration::from_millis(500));
    }

    #[test]
    fn test_playback_delay_huge_level() {
        let timing = Timing::default();
        assert_eq!(timing.playback_delay(u32::MAX), Duration::from_millis(500));
    }

    #[test]
    fn test_color_sampling_uses_both_colors() {
        let mut rng = StdRng::seed_from_u64(7);
        let samples: Vec<ColorSymbol> = (0..200).map(|_| rng.r#gen()).collect();
        let reds = samples.iter().filter(|c| **c == ColorSymbol::Red).count();
        assert!(reds > 50 && reds < 150, "reds = {reds}");
    }

    #[test]
    fn test_color_index_matches_all() {
        for (i, color) in ColorSymbol::ALL.iter().enumerate() {
            assert_eq!(color.index(), i);
        }
    }

    proptest! {
        #[test]
        fn playback_delay_is_non_increasing(
            min in 0u64..2_000,
            step in 0u64..500,
            initial in 0u64..5_000,
            level in 1u32..200,
        ) {
            let timing = Timing {
                min_delay_ms: min,
                speed_up_step_ms: step,
                initial_delay_ms: initial,
                lead_time_ms: 0,
            };
            prop_assert!(timing.playback_delay(level + 1) <= timing.playback_delay(level));
        }

        #[test]
        fn playback_delay_never_below_min(
            min in 0u64..2_000,
            step in 0u64..500,
            initial in 0u64..5_000,
            level in 1u32..10_000,
        ) {
            let timing = Timing {
                min_delay_ms: min,
                speed_up_step_ms: step,
                initial_delay_ms: initial,
                lead_time_ms: 0,
            };
            prop_assert!(timing.playback_delay(level) >= Duration::from_millis(min));
        }
    }
}
