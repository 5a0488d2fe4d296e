//! 游戏状态机
//!
//! 持有颜色序列、关卡与复述位置；生成新关卡、校验输入、安排回放。
//! 所有与时间相关的操作都显式接收 `now`，事件通过 `drain_events` 交给界面层。

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::{ColorSymbol, GameEvent, GamePhase, InputOutcome, Timing};
use crate::scheduler::Scheduler;

pub struct SimonGame<R: Rng = StdRng> {
    sequence: Vec<ColorSymbol>,
    level: u32,
    replay_index: usize,
    phase: GamePhase,
    timing: Timing,
    rng: R,
    scheduler: Scheduler,
    events: VecDeque<GameEvent>,
}

impl SimonGame<StdRng> {
    /// 指定种子时序列可复现，否则使用系统熵
    pub fn with_seed(timing: Timing, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::new(timing, rng)
    }
}

impl<R: Rng> SimonGame<R> {
    pub fn new(timing: Timing, rng: R) -> Self {
        Self {
            sequence: Vec::new(),
            level: 1,
            replay_index: 0,
            phase: GamePhase::Idle,
            timing,
            rng,
            scheduler: Scheduler::new(),
            events: VecDeque::new(),
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn sequence(&self) -> &[ColorSymbol] {
        &self.sequence
    }

    pub fn replay_index(&self) -> usize {
        self.replay_index
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// 下一个待触发事件的时刻
    pub fn next_deadline(&self) -> Option<Instant> {
        self.scheduler.next_deadline()
    }

    /// 开始新游戏（会取消上一局尚未触发的回放）
    pub fn start_game(&mut self, now: Instant) {
        self.scheduler.cancel_all();
        self.level = 1;
        self.replay_index = 0;
        self.sequence.clear();
        self.generate_new_level();
        info!("game started");
        self.begin_playback(now);
    }

    /// 序列末尾追加一个随机颜色
    pub fn generate_new_level(&mut self) -> ColorSymbol {
        let color: ColorSymbol = self.rng.r#gen();
        self.sequence.push(color);
        color
    }

    /// 当前关卡的回放间隔
    pub fn playback_delay(&self) -> Duration {
        self.timing.playback_delay(self.level)
    }

    /// 安排整段序列的回放；回放结束后重新允许输入
    pub fn begin_playback(&mut self, now: Instant) {
        self.phase = GamePhase::Playback;
        self.emit(GameEvent::InputEnabled(false));

        let delay = self.playback_delay();
        let mut due = now + self.timing.lead_time();
        self.scheduler.schedule(due, GameEvent::Progress(0));

        for &color in &self.sequence {
            self.scheduler.schedule(due, GameEvent::Reveal(color));
            due += delay;
        }
        self.scheduler.schedule(due, GameEvent::InputEnabled(true));
    }

    /// 触发所有到期事件
    pub fn tick(&mut self, now: Instant) {
        for event in self.scheduler.take_due(now) {
            match event {
                GameEvent::InputEnabled(true) => self.phase = GamePhase::AwaitingInput,
                GameEvent::Reveal(color) => debug!("reveal {color:?}"),
                _ => {}
            }
            self.emit(event);
        }
    }

    /// 校验玩家输入
    pub fn submit_input(&mut self, color: ColorSymbol, now: Instant) -> InputOutcome {
        if self.phase != GamePhase::AwaitingInput {
            return InputOutcome::Ignored;
        }

        let expected = self.sequence[self.replay_index];
        if color != expected {
            return self.game_over(expected);
        }

        self.replay_index += 1;
        let progress = (self.replay_index * 100 / self.sequence.len()) as u8;
        self.emit(GameEvent::Progress(progress));

        if self.replay_index < self.sequence.len() {
            return InputOutcome::Correct { progress };
        }

        self.level += 1;
        self.generate_new_level();
        info!("level complete, now at level {}", self.level);
        self.emit(GameEvent::LevelComplete { level: self.level });
        self.replay_index = 0;
        self.begin_playback(now);

        InputOutcome::LevelComplete { level: self.level }
    }

    /// 取出所有已发出的事件
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain(..).collect()
    }

    // 序列与复述位置保留到下一次开始
    fn game_over(&mut self, expected: ColorSymbol) -> InputOutcome {
        let reached = self.level;
        info!("game over at level {reached}");
        self.level = 1;
        self.phase = GamePhase::GameOver;
        self.scheduler.cancel_all();
        self.emit(GameEvent::GameOver { reached });
        self.emit(GameEvent::InputEnabled(false));
        InputOutcome::Mismatch { expected }
    }

    fn emit(&mut self, event: GameEvent) {
        self.events.push_back(event);
    }
}
