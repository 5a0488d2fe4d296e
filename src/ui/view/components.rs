//! 通用 UI 组件
//!
//! 对话框、颜色按钮、彩纸层等通用组件

use std::time::Instant;

use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use crate::models::ColorSymbol;
use crate::ui::confetti::Confetti;

/// [组件] 弹窗基础框架
pub fn render_dialog_framework(frame: &mut Frame, area: Rect, title: &str) -> Rect {
    frame.render_widget(Clear, area);
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

/// 按钮底色与点亮色
pub fn button_colors(color: ColorSymbol) -> (Color, Color) {
    match color {
        ColorSymbol::Red => (Color::Rgb(150, 40, 40), Color::Rgb(255, 80, 80)),
        ColorSymbol::Blue => (Color::Rgb(40, 75, 125), Color::Rgb(80, 150, 255)),
    }
}

/// [组件] 颜色按钮，回放或按下时点亮，禁用时变暗
pub fn render_color_button(
    frame: &mut Frame,
    area: Rect,
    color: ColorSymbol,
    hotkey: &str,
    is_lit: bool,
    is_enabled: bool,
) {
    let (base, lit) = button_colors(color);
    let mut style = Style::default()
        .bg(if is_lit { lit } else { base })
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);
    if !is_enabled && !is_lit {
        style = style.add_modifier(Modifier::DIM);
    }

    // 标签放在按钮垂直中间
    let padding = "\n".repeat(usize::from(area.height.saturating_sub(3) / 2));
    let label = format!("{padding}{}  [{hotkey}]", color.label());

    let button = Paragraph::new(label)
        .alignment(Alignment::Center)
        .style(style)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(button, area);
}

/// [组件] 彩纸层，直接写入缓冲区，覆盖在按钮之上
pub struct ConfettiLayer<'a> {
    pub confetti: &'a Confetti,
    pub now: Instant,
}

impl Widget for ConfettiLayer<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        for particle in &self.confetti.particles {
            let Some(progress) = particle.progress(self.now) else {
                continue;
            };
            let dx = (particle.x * f32::from(area.width)) as u16;
            let dy = (progress * f32::from(area.height)) as u16;
            let x = area.x + dx.min(area.width - 1);
            let y = area.y + dy.min(area.height - 1);

            let (r, g, b) = particle.color;
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_char(particle.glyph()).set_fg(Color::Rgb(r, g, b));
            }
        }
    }
}
