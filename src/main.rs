use clap::Parser;

use pix_lock::{
    cli::{Cli, Commands},
    handler::{handle_lock, handle_unlock},
};

/// 程序的主入口点
///
/// 负责解析命令行参数，并根据指定的子命令（`lock` 或 `unlock`）
/// 将执行分派到相应的处理函数
fn main() -> anyhow::Result<()> {
    // 解析命令行参数
    let cli = Cli::parse();

    // 根据子命令调用相应的处理函数
    match cli.command {
        Commands::Lock(args) => handle_lock(args),
        Commands::Unlock(args) => handle_unlock(args),
    }
}
