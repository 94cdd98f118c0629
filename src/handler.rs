//! # 命令处理逻辑模块
//!
//! 包含处理 `lock` 和 `unlock` 子命令的高级业务逻辑。
//! 本模块负责协调文件 I/O、调用核心编解码算法以及向用户报告结果。

use crate::cli::{LockArgs, UnlockArgs};
use crate::steganography::{CodecError, embed_message, extract_message};
use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

/// 根据载体图像路径生成默认输出图像路径：同目录下的 `locked_<主干>.png`。
/// 输出始终采用 PNG，避免有损编码破坏嵌入的记录。
fn default_lock_dest(image: &Path) -> PathBuf {
    let stem = image
        .file_stem()
        .map_or_else(|| "image".to_string(), |s| s.to_string_lossy().into_owned());
    image.with_file_name(format!("locked_{stem}.png"))
}

/// 根据隐写图像路径生成默认文本输出路径：同目录下的 `unlocked_<主干>.txt`。
fn default_unlock_dest(image: &Path) -> PathBuf {
    let stem = image
        .file_stem()
        .map_or_else(|| "image".to_string(), |s| s.to_string_lossy().into_owned());
    image.with_file_name(format!("unlocked_{stem}.txt"))
}

/// 覆盖保护：目标文件已存在且未指定 `--force` 时拒绝写入。
fn ensure_writable(path: &Path, force: bool) -> Result<()> {
    anyhow::ensure!(
        force || !path.exists(),
        "Output file already exists: {}. \nUse --force to overwrite it.",
        path.to_string_lossy().red().bold()
    );
    Ok(())
}

/// 处理 'Lock' 命令的执行逻辑。
///
/// 负责读取载体图像和文本文件、将图像转换为 RGB8 网格、
/// 调用核心嵌入函数，最后将结果以 PNG 形式写入目标路径。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径、密码和覆盖标志的 `LockArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取或解码输入的载体图像。
/// * 无法读取要隐藏的文本文件。
/// * 图像容量不足以容纳记录 (哈希字段 + 哨兵 + 长度字段 + 消息)。
/// * 目标文件已存在且未指定 `--force`。
/// * 无法写入到目标图像文件。
pub fn handle_lock(args: LockArgs) -> Result<()> {
    let image = image::open(&args.image).with_context(|| {
        format!(
            "Unable to read image file: {}",
            args.image.to_string_lossy().red().bold()
        )
    })?;
    let mut carrier = image.to_rgb8();

    let message = fs::read_to_string(&args.text).with_context(|| {
        format!(
            "Unable to read text file: {}",
            args.text.to_string_lossy().red().bold()
        )
    })?;

    let dest = args.dest.unwrap_or_else(|| default_lock_dest(&args.image));
    ensure_writable(&dest, args.force)?;

    match embed_message(&mut carrier, &message, &args.password) {
        Ok(()) => {}
        Err(CodecError::CapacityExceeded { required, capacity }) => anyhow::bail!(
            "Not enough space in the image to hide the message. \nRequired: {}, Capacity: {}",
            required.to_string().red().bold(),
            capacity.to_string().green().bold()
        ),
        Err(err) => {
            return Err(err).with_context(|| {
                format!(
                    "Failed to hide the message in '{}'. \nThe image data may be corrupted.",
                    args.image.to_string_lossy().red().bold()
                )
            });
        }
    }

    carrier.save(&dest).with_context(|| {
        format!(
            "Unable to write to target image file: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "The message has been successfully locked into: {}",
        dest.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理 'Unlock' 命令的执行逻辑。
///
/// 负责读取经过隐写的图像文件、校验密码哈希并恢复隐藏的消息，
/// 最后将消息内容写入目标文本文件。
///
/// 密码错误不是异常：此时打印提示信息并正常返回，不产生输出文件。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径、密码和覆盖标志的 `UnlockArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取或解码输入的图像文件。
/// * 图像中的记录被截断或长度字段无效 (不含密码错误的情况)。
/// * 目标文件已存在且未指定 `--force`。
/// * 无法写入到目标文本文件。
pub fn handle_unlock(args: UnlockArgs) -> Result<()> {
    let image = image::open(&args.image).with_context(|| {
        format!(
            "Unable to read image file: {}",
            args.image.to_string_lossy().red().bold()
        )
    })?;
    let carrier = image.to_rgb8();

    let message = match extract_message(&carrier, &args.password) {
        Ok(message) => message,
        Err(CodecError::IncorrectPassword) => {
            println!(
                "{}",
                "Incorrect password. The hidden message stays locked."
                    .red()
                    .bold()
            );
            return Ok(());
        }
        Err(err) => {
            return Err(err).with_context(|| {
                format!(
                    "Failed to recover a message from '{}'. \nThe image may not contain a hidden message or is corrupted.",
                    args.image.to_string_lossy().red().bold()
                )
            });
        }
    };

    let dest = args.text.unwrap_or_else(|| default_unlock_dest(&args.image));
    ensure_writable(&dest, args.force)?;

    fs::write(&dest, &message).with_context(|| {
        format!(
            "Unable to write to target text file: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "The message has been successfully unlocked and saved: {}",
        dest.to_string_lossy().green().bold()
    );
    Ok(())
}
