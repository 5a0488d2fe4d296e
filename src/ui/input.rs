//! 键盘/鼠标事件映射 (Input -> Action)
//!
//! 将按键和点击转换为 Action

use std::io;
use std::time::Instant;

use crossterm::event::{KeyCode, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position;

use super::actions::Action;
use super::state::{App, AppMode, HitAreas};
use crate::models::ColorSymbol;

/// 根据当前模式和按键获取对应的 Action
pub fn get_action(mode: &AppMode, key: KeyCode) -> Option<Action> {
    match mode {
        AppMode::Welcome | AppMode::GameOver(_) => match key {
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('s') => Some(Action::StartGame),
            _ => None,
        },
        AppMode::Playing => match key {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char('n') => Some(Action::StartGame),
            KeyCode::Char('r') | KeyCode::Char('h') | KeyCode::Left => {
                Some(Action::Choose(ColorSymbol::Red))
            }
            KeyCode::Char('b') | KeyCode::Char('l') | KeyCode::Right => {
                Some(Action::Choose(ColorSymbol::Blue))
            }
            _ => None,
        },
    }
}

/// 根据上一帧的布局判断点击目标
pub fn get_click_action(mode: &AppMode, layout: &HitAreas, column: u16, row: u16) -> Option<Action> {
    let pos = Position::new(column, row);
    match mode {
        AppMode::Welcome | AppMode::GameOver(_) => layout
            .dialog
            .filter(|area| area.contains(pos))
            .map(|_| Action::StartGame),
        AppMode::Playing => ColorSymbol::ALL
            .into_iter()
            .find(|color| layout.buttons[color.index()].contains(pos))
            .map(Action::Choose),
    }
}

/// 处理按键事件
pub fn handle_key_event(app: &mut App, key: KeyCode, now: Instant) -> io::Result<bool> {
    if let Some(action) = get_action(&app.mode, key) {
        Ok(app.dispatch(action, now))
    } else {
        Ok(false)
    }
}

/// 处理鼠标事件（仅左键按下）
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent, now: Instant) -> io::Result<bool> {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return Ok(false);
    }
    if let Some(action) = get_click_action(&app.mode, &app.layout, mouse.column, mouse.row) {
        Ok(app.dispatch(action, now))
    } else {
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crossterm::event::KeyModifiers;
    use ratatui::layout::Rect;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_mouse_only_left_press_dispatches() {
        let now = Instant::now();
        let mut app = App::new(GameConfig::default(), now);
        app.layout.dialog = Some(Rect::new(20, 10, 30, 8));

        let right = mouse(MouseEventKind::Down(MouseButton::Right), 25, 12);
        assert!(!handle_mouse_event(&mut app, right, now).unwrap());
        let release = mouse(MouseEventKind::Up(MouseButton::Left), 25, 12);
        assert!(!handle_mouse_event(&mut app, release, now).unwrap());
        let outside = mouse(MouseEventKind::Down(MouseButton::Left), 0, 0);
        assert!(!handle_mouse_event(&mut app, outside, now).unwrap());
        assert_eq!(app.mode, AppMode::Welcome);

        let click = mouse(MouseEventKind::Down(MouseButton::Left), 25, 12);
        assert!(!handle_mouse_event(&mut app, click, now).unwrap());
        assert_eq!(app.mode, AppMode::Playing);
        assert_eq!(app.game.sequence().len(), 1);
    }

    #[test]
    fn test_key_mapping_by_mode() {
        assert_eq!(
            get_action(&AppMode::Welcome, KeyCode::Enter),
            Some(Action::StartGame)
        );
        assert_eq!(get_action(&AppMode::Welcome, KeyCode::Char('r')), None);
        assert_eq!(
            get_action(&AppMode::Playing, KeyCode::Left),
            Some(Action::Choose(ColorSymbol::Red))
        );
        assert_eq!(
            get_action(&AppMode::Playing, KeyCode::Char('b')),
            Some(Action::Choose(ColorSymbol::Blue))
        );
        assert_eq!(get_action(&AppMode::Playing, KeyCode::Enter), None);
    }

    #[test]
    fn test_click_hits_buttons() {
        let layout = HitAreas {
            buttons: [Rect::new(0, 5, 10, 5), Rect::new(10, 5, 10, 5)],
            dialog: None,
        };

        assert_eq!(
            get_click_action(&AppMode::Playing, &layout, 3, 6),
            Some(Action::Choose(ColorSymbol::Red))
        );
        assert_eq!(
            get_click_action(&AppMode::Playing, &layout, 15, 9),
            Some(Action::Choose(ColorSymbol::Blue))
        );
        assert_eq!(get_click_action(&AppMode::Playing, &layout, 15, 20), None);
        // 欢迎界面没有弹窗区域时点击无效
        assert_eq!(get_click_action(&AppMode::Welcome, &layout, 3, 6), None);
    }

    #[test]
    fn test_click_dialog_starts_game() {
        let layout = HitAreas {
            buttons: [Rect::default(); 2],
            dialog: Some(Rect::new(20, 10, 30, 8)),
        };

        assert_eq!(
            get_click_action(&AppMode::Welcome, &layout, 25, 12),
            Some(Action::StartGame)
        );
        assert_eq!(get_click_action(&AppMode::Welcome, &layout, 0, 0), None);
    }
}
