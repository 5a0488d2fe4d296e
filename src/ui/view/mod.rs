//! 视图层模块
//!
//! 包含主渲染入口和各种视图组件

pub mod components;
pub mod layouts;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Gauge, Paragraph},
};

use super::state::{App, AppMode, GameOverInfo};
use crate::models::{ColorSymbol, GamePhase};
use components::{ConfettiLayer, render_color_button, render_dialog_framework};
use layouts::centered_rect;

/// 渲染 UI
pub fn render(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // 标题
            Constraint::Length(3), // 状态
            Constraint::Min(7),    // 按钮
            Constraint::Length(3), // 进度
            Constraint::Length(3), // 帮助
        ])
        .split(frame.area());

    render_title(frame, chunks[0]);
    render_status(frame, app, chunks[1]);
    render_buttons(frame, app, chunks[2]);
    render_progress(frame, app, chunks[3]);
    render_help(frame, app, chunks[4]);

    // 彩纸覆盖在按钮区域上
    frame.render_widget(
        ConfettiLayer {
            confetti: &app.confetti,
            now: app.now,
        },
        chunks[2],
    );

    // 渲染弹窗
    app.layout.dialog = match &app.mode {
        AppMode::Welcome => Some(render_welcome_dialog(frame)),
        AppMode::GameOver(info) => Some(render_game_over_dialog(frame, info)),
        AppMode::Playing => None,
    };
}

fn render_title(frame: &mut Frame, area: Rect) {
    let title = Paragraph::new("🔴🔵 Simon 记忆游戏")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, area);
}

fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let phase = match app.game.phase() {
        GamePhase::Idle => "未开始",
        GamePhase::Playback => "回放中",
        GamePhase::AwaitingInput => "请复述",
        GamePhase::GameOver => "已结束",
    };
    let content = format!(
        "关卡: {}  步骤: {}/{}  间隔: {}ms  最佳: {}  状态: {}",
        app.game.level(),
        app.game.replay_index(),
        app.game.sequence().len(),
        app.game.playback_delay().as_millis(),
        app.best_level,
        phase
    );

    let status = Paragraph::new(content).block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, area);
}

fn render_buttons(frame: &mut Frame, app: &mut App, area: Rect) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    for (color, hotkey) in [(ColorSymbol::Red, "r/←"), (ColorSymbol::Blue, "b/→")] {
        let button_area = halves[color.index()];
        render_color_button(
            frame,
            button_area,
            color,
            hotkey,
            app.is_lit(color),
            app.input_enabled,
        );
        app.layout.buttons[color.index()] = button_area;
    }
}

fn render_progress(frame: &mut Frame, app: &App, area: Rect) {
    let gauge = Gauge::default()
        .block(Block::default().title("进度").borders(Borders::ALL))
        .gauge_style(Style::default().fg(Color::Green).bg(Color::White))
        .percent(u16::from(app.progress.min(100)));
    frame.render_widget(gauge, area);
}

fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = match &app.mode {
        AppMode::Welcome => "[Enter] 开始  [q] 退出",
        AppMode::Playing => "[r/←] 红  [b/→] 蓝  [n] 重新开始  [q] 退出  (也可用鼠标点击)",
        AppMode::GameOver(_) => "[Enter] 再来一局  [q] 退出",
    };

    let message = app.message.as_deref().unwrap_or("");
    let text = if message.is_empty() {
        help_text.to_string()
    } else {
        format!("{}  |  {}", help_text, message)
    };

    let help = Paragraph::new(text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(help, area);
}

fn render_welcome_dialog(frame: &mut Frame) -> Rect {
    let area = centered_rect(50, 30, frame.area());
    let inner = render_dialog_framework(frame, area, "开始");

    let text = "记住红蓝按钮亮起的顺序，然后按同样的顺序复述。\n\n[Enter] 开始游戏";
    let dialog = Paragraph::new(text).alignment(Alignment::Center);
    frame.render_widget(dialog, inner);
    area
}

fn render_game_over_dialog(frame: &mut Frame, info: &GameOverInfo) -> Rect {
    let area = centered_rect(50, 30, frame.area());
    frame.render_widget(Clear, area);

    let seconds = info.duration.num_seconds().max(0);
    let text = format!(
        "游戏结束！\n到达第 {} 关  用时 {:02}:{:02}\n\n[Enter] 再来一局",
        info.reached,
        seconds / 60,
        seconds % 60
    );

    let dialog = Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Red))
        .block(Block::default().title("⚠️ 游戏结束").borders(Borders::ALL));

    frame.render_widget(dialog, area);
    area
}
