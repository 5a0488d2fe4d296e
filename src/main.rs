mod config;
mod game;
mod logging;
mod models;
mod scheduler;
mod ui;

use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::info;
use ratatui::prelude::*;

use crate::config::load_config;
use crate::logging::init_logger;
use crate::ui::{App, render};

/// 动画帧间隔
const FRAME: Duration = Duration::from_millis(33);
/// 无事可做时的最长等待
const IDLE: Duration = Duration::from_millis(250);

/// 获取数据目录路径 (~/.local/share/simon/)
fn get_data_dir() -> io::Result<PathBuf> {
    let data_dir = dirs::data_dir()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "无法获取用户数据目录"))?
        .join("simon");

    fs::create_dir_all(&data_dir)?;

    Ok(data_dir)
}

/// 配置文件路径 (~/.config/simon/config.toml)，不自动创建
fn get_config_path() -> io::Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "无法获取用户配置目录"))?;

    Ok(config_dir.join("simon").join("config.toml"))
}

fn main() -> io::Result<()> {
    init_logger(&get_data_dir()?.join("simon.log"))?;

    // 加载配置
    let config_path = get_config_path()?;
    let config = load_config(&config_path)?;
    info!("config loaded from {}", config_path.display());

    // 创建应用状态
    let mut app = App::new(config, Instant::now());

    // 设置终端
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // 主循环
    let result = run_app(&mut terminal, &mut app);

    // 恢复终端
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    println!("最佳成绩: 第 {} 关", app.best_level);

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> io::Result<()> {
    loop {
        app.tick(Instant::now());
        terminal.draw(|f| render(f, app))?;

        if !event::poll(app.poll_timeout(FRAME, IDLE))? {
            continue;
        }

        let now = Instant::now();
        let quit = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                ui::handle_key_event(app, key.code, now)?
            }
            Event::Mouse(mouse) => ui::handle_mouse_event(app, mouse, now)?,
            _ => false,
        };
        if quit {
            break;
        }
    }
    info!("quit, best level {}", app.best_level);
    Ok(())
}
