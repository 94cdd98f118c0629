//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构，包括子命令和参数。
//! 所有用户通过命令行与程序交互的入口点都在此模块中定义。

use clap::Parser;
use std::path::PathBuf;

/// 一款密码门控式像素隐写的命令行工具，用于在无损格式图像 (如 PNG, BMP) 的 RGB 通道中隐藏或恢复文本。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "一款密码门控式像素隐写的命令行工具，用于在无损格式图像 (如 PNG, BMP) 的 RGB 通道中隐藏或恢复文本。只有提供正确密码才能取回隐藏的消息。"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令：lock (锁入) 和 unlock (取出)。
#[derive(Parser, Debug)]
pub enum Commands {
    /// 将文本文件内容连同密码哈希一起隐藏进无损格式图像。
    Lock(LockArgs),

    /// 凭密码从经过隐写的图像中恢复隐藏的文本。
    Unlock(UnlockArgs),
}

/// 'lock' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct LockArgs {
    /// 用于隐写的载体图像文件路径 (如 PNG, BMP)。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 要隐藏的文本内容的文件路径。
    #[arg(short, long)]
    pub text: PathBuf,

    /// 门控消息的密码。
    #[arg(short, long)]
    pub password: String,

    /// 隐写完成后，保存结果图像的输出路径。
    /// 省略时默认为载体图像同目录下的 `locked_<原文件名>.png`。
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    /// 输出文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,
}

/// 'unlock' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct UnlockArgs {
    /// 已隐藏文本数据的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 隐藏消息时使用的密码。
    #[arg(short, long)]
    pub password: String,

    /// 恢复文本后，保存文本内容的输出路径。
    /// 省略时默认为图像同目录下的 `unlocked_<原文件名主干>.txt`。
    #[arg(short, long)]
    pub text: Option<PathBuf>,

    /// 输出文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,
}
