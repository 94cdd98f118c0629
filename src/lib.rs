//! # pix_lock 库
//!
//! 本库包含密码门控式像素隐写工具的核心逻辑。

// 声明库包含的所有模块。

pub mod cli;
pub mod constants;
pub mod cursor;
pub mod handler;
pub mod steganography;
