//! Action 枚举定义 (Intent)
//!
//! 玩家操作转化为明确的语义化 Action

use crate::models::ColorSymbol;

/// 玩家操作枚举
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Quit,
    StartGame, // 开始 / 再来一局 / 重新开始
    Choose(ColorSymbol),
}
