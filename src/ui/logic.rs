//! 业务逻辑处理 (Update/Dispatch)
//!
//! 把 Action 交给状态机，并把状态机发出的事件映射到界面状态

use std::time::{Duration, Instant};

use chrono::Local;
use log::debug;

use super::actions::Action;
use super::state::{App, AppMode, GameOverInfo};
use crate::models::{ColorSymbol, GameEvent, InputOutcome};

impl App {
    /// 核心逻辑分发，返回 true 表示退出
    pub fn dispatch(&mut self, action: Action, now: Instant) -> bool {
        self.now = now;
        match action {
            Action::Quit => return true,
            Action::StartGame => self.start_game(now),
            Action::Choose(color) => self.choose(color, now),
        }
        self.apply_game_events(now);
        false
    }

    /// 时钟推进：触发到期的回放事件、更新动画
    pub fn tick(&mut self, now: Instant) {
        self.now = now;
        self.game.tick(now);
        self.apply_game_events(now);
        self.confetti.update(now);
    }

    // ============ 玩家操作 ============

    /// 开始新一局
    pub fn start_game(&mut self, now: Instant) {
        self.game.start_game(now);
        self.mode = AppMode::Playing;
        self.progress = 0;
        self.highlights = [None; 2];
        self.confetti.clear();
        self.started_at = Some(Local::now());
        self.message = Some("仔细看...".to_string());
    }

    /// 玩家选择颜色，输入禁用时忽略
    pub fn choose(&mut self, color: ColorSymbol, now: Instant) {
        if !self.input_enabled {
            return;
        }
        // 玩家按下的按钮也闪一下
        self.highlights[color.index()] = Some(now + self.pulse());

        match self.game.submit_input(color, now) {
            InputOutcome::Ignored => debug!("input {color:?} ignored"),
            InputOutcome::Correct { progress } => debug!("input {color:?} ok, {progress}%"),
            InputOutcome::LevelComplete { level } => {
                self.message = Some(format!("过关！进入第 {level} 关"));
            }
            InputOutcome::Mismatch { expected } => {
                self.message = Some(format!("应该是{}", expected.label()));
            }
        }
    }

    // ============ 状态机事件 ============

    /// 取出状态机事件并更新界面状态
    pub fn apply_game_events(&mut self, now: Instant) {
        for event in self.game.drain_events() {
            match event {
                GameEvent::Reveal(color) => {
                    self.highlights[color.index()] = Some(now + self.pulse());
                }
                GameEvent::Progress(value) => self.progress = value,
                GameEvent::LevelComplete { level } => {
                    // 过关后的等级减一才是刚刚完成的关卡
                    self.best_level = self.best_level.max(level - 1);
                    self.confetti.burst(
                        &mut self.confetti_rng,
                        now,
                        self.display.confetti_count,
                        Duration::from_millis(self.display.confetti_clear_ms),
                    );
                }
                GameEvent::GameOver { reached } => {
                    let duration = self
                        .started_at
                        .map(|start| Local::now() - start)
                        .unwrap_or_else(chrono::Duration::zero);
                    self.mode = AppMode::GameOver(GameOverInfo { reached, duration });
                    self.input_enabled = false;
                }
                GameEvent::InputEnabled(enabled) => {
                    self.input_enabled = enabled;
                    // 回放开始前熄灭按下时的闪烁，第一个颜色才是独立的一次闪烁
                    if !enabled {
                        self.highlights = [None; 2];
                    }
                    if enabled && self.mode == AppMode::Playing {
                        self.message = Some("轮到你了".to_string());
                    }
                }
            }
        }
    }
}
