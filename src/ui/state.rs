//! App 状态定义 (Model)
//!
//! 包含应用状态结构体及相关枚举

use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::layout::Rect;

use super::confetti::Confetti;
use crate::config::{DisplayConfig, GameConfig};
use crate::game::SimonGame;
use crate::models::ColorSymbol;

/// 应用状态
pub struct App {
    pub game: SimonGame,
    pub display: DisplayConfig,
    pub mode: AppMode,
    pub input_enabled: bool,
    pub progress: u8,
    pub highlights: [Option<Instant>; 2], // 按钮点亮截止时刻，按 ColorSymbol::index
    pub confetti: Confetti,
    pub confetti_rng: StdRng,
    pub best_level: u32,
    pub started_at: Option<DateTime<Local>>,
    pub message: Option<String>,
    pub now: Instant,
    pub layout: HitAreas, // 上一帧渲染的可点击区域
}

/// 应用模式
#[derive(Debug, Clone, PartialEq)]
pub enum AppMode {
    Welcome,
    Playing,
    GameOver(GameOverInfo),
}

/// 结束弹窗内容
#[derive(Debug, Clone, PartialEq)]
pub struct GameOverInfo {
    pub reached: u32,
    pub duration: chrono::Duration,
}

/// 鼠标命中区域
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HitAreas {
    pub buttons: [Rect; 2],
    pub dialog: Option<Rect>,
}

impl App {
    /// 创建新的应用实例
    pub fn new(config: GameConfig, now: Instant) -> Self {
        Self {
            game: SimonGame::with_seed(config.timing, config.seed),
            display: config.display,
            mode: AppMode::Welcome,
            input_enabled: false,
            progress: 0,
            highlights: [None; 2],
            confetti: Confetti::default(),
            confetti_rng: StdRng::from_entropy(),
            best_level: 0,
            started_at: None,
            message: None,
            now,
            layout: HitAreas::default(),
        }
    }

    /// 按钮当前是否点亮
    pub fn is_lit(&self, color: ColorSymbol) -> bool {
        self.highlights[color.index()].is_some_and(|until| self.now < until)
    }

    pub fn pulse(&self) -> Duration {
        Duration::from_millis(self.display.pulse_ms)
    }

    /// 主循环下一次需要醒来的时刻
    pub fn next_deadline(&self) -> Option<Instant> {
        let pulses = self.highlights.iter().flatten().copied();
        let confetti = self.confetti.next_deadline();
        self.game
            .next_deadline()
            .into_iter()
            .chain(pulses.filter(|t| *t > self.now))
            .chain(confetti)
            .min()
    }

    /// 等待输入的超时：彩纸下落时按帧刷新，否则睡到下一个定时事件
    pub fn poll_timeout(&self, frame: Duration, idle: Duration) -> Duration {
        if self.confetti.is_active() {
            return frame;
        }
        self.next_deadline()
            .map(|t| t.saturating_duration_since(self.now).min(idle))
            .unwrap_or(idle)
    }
}
