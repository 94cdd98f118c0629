//! # 光标寻址模块
//!
//! 定义在 H×W×3 像素网格上按光栅顺序推进的逻辑光标：
//! 通道变化最快，其次是列，最后是行。
//! 本模块只做纯算术，不接触像素数据；越界判定由调用方在每次读写前执行。

use crate::constants::CHANNELS;

/// 指向下一个待读/写字节槽位的逻辑位置 `(row, col, channel)`。
///
/// 每次 encode/decode 操作独占一个光标，调用之间不共享任何状态。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub row: u32,
    pub col: u32,
    pub channel: usize,
}

impl Cursor {
    /// 返回位于网格起点 `(0, 0, 0)` 的光标。
    pub fn new() -> Self {
        Cursor {
            row: 0,
            col: 0,
            channel: 0,
        }
    }

    /// 将光标推进一个字节槽位。
    ///
    /// 通道自增；通道绕回 0 时列自增；列到达 `width` 时绕回 0 且行自增。
    /// 行不绕回：推进过末行后 [`Cursor::at_end`] 返回 true。
    pub fn advance(&mut self, width: u32) {
        self.channel += 1;
        if self.channel == CHANNELS {
            self.channel = 0;
            self.col += 1;
            if self.col == width {
                self.col = 0;
                self.row += 1;
            }
        }
    }

    /// 光标是否已走出网格（越过最后一个像素）。
    pub fn at_end(&self, height: u32) -> bool {
        self.row >= height
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Cursor::new()
    }
}
