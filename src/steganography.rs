//! # 记录编解码模块
//!
//! 实现嵌入图像的记录格式及其编解码：
//!
//! ```text
//! hex(sha256(password)) || 0xFF || 消息长度 (4 字节大端序) || 0xFF || utf8(消息)
//! ```
//!
//! 记录字节沿光栅顺序逐通道写入 (见 [`crate::cursor`])。
//! 每次读写前都会进行越界检查，解码对畸形数据只会返回
//! [`CodecError`]，不会越界访问或 panic。

use crate::constants::{CHANNELS, HASH_HEX_LEN, LENGTH_FIELD_BYTES, SENTINEL};
use crate::cursor::Cursor;
use core::fmt;
use image::RgbImage;
use sha2::{Digest, Sha256};

/// 编解码过程中可能出现的所有失败类别。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// 消息加上帧开销超出载体图像容量 (编码)。
    CapacityExceeded { required: usize, capacity: usize },
    /// 密码哈希与记录中的哈希字段不一致 (解码)。
    IncorrectPassword,
    /// 解码出的长度字段为零或超出网格最大载荷 (解码)。
    InvalidLength(usize),
    /// 光标在读完预期字段前走出网格，数据被截断或已损坏 (解码)。
    OutOfBounds,
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityExceeded { required, capacity } => write!(
                f,
                "message does not fit in the image (required {required} bytes, capacity {capacity})"
            ),
            Self::IncorrectPassword => write!(f, "incorrect password"),
            Self::InvalidLength(len) => write!(f, "invalid message length {len}"),
            Self::OutOfBounds => write!(f, "record extends past the end of the image data"),
        }
    }
}

impl std::error::Error for CodecError {}

/// 计算密码的 SHA-256 摘要并渲染为小写十六进制字符串。
pub fn hash_password(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

/// 读取光标当前位置的字节并推进光标。
fn read_byte(img: &RgbImage, cursor: &mut Cursor) -> Result<u8, CodecError> {
    if cursor.at_end(img.height()) {
        return Err(CodecError::OutOfBounds);
    }
    let byte = img.get_pixel(cursor.col, cursor.row).0[cursor.channel];
    cursor.advance(img.width());
    Ok(byte)
}

/// 向光标当前位置写入一个字节并推进光标。
fn write_byte(img: &mut RgbImage, cursor: &mut Cursor, value: u8) -> Result<(), CodecError> {
    if cursor.at_end(img.height()) {
        return Err(CodecError::OutOfBounds);
    }
    img.get_pixel_mut(cursor.col, cursor.row).0[cursor.channel] = value;
    cursor.advance(img.width());
    Ok(())
}

/// 将消息以密码门控记录的形式嵌入图像。
///
/// 容量检查在写入第一个字节之前完成；检查失败时图像保持原样，
/// 调用方不会观察到部分写入。
///
/// # Errors
///
/// 记录总大小 (哈希字段 + 两个哨兵 + 长度字段 + 载荷) 达到或超过
/// `H*W*3` 时返回 [`CodecError::CapacityExceeded`]。
pub fn embed_message(img: &mut RgbImage, message: &str, password: &str) -> Result<(), CodecError> {
    let hash_field = hash_password(password).into_bytes();
    let payload = message.as_bytes();

    let capacity = img.height() as usize * img.width() as usize * CHANNELS;
    let required = hash_field.len() + LENGTH_FIELD_BYTES + payload.len() + 2;
    if required >= capacity {
        return Err(CodecError::CapacityExceeded { required, capacity });
    }

    let length_field = (payload.len() as u32).to_be_bytes();
    let mut cursor = Cursor::new();

    for &byte in &hash_field {
        write_byte(img, &mut cursor, byte)?;
    }
    write_byte(img, &mut cursor, SENTINEL)?;

    for &byte in &length_field {
        write_byte(img, &mut cursor, byte)?;
    }
    write_byte(img, &mut cursor, SENTINEL)?;

    for &byte in payload {
        write_byte(img, &mut cursor, byte)?;
    }

    Ok(())
}

/// 从图像中恢复密码门控记录的消息。
///
/// 解码顺序：有界扫描哈希字段直到哨兵 → 校验密码哈希 → 读取 4 字节
/// 大端序长度 → 跳过第二个哨兵 → 读取载荷并按 UTF-8 宽松解码
/// (损坏的字节序列被替换而不是中止解码)。
///
/// # Errors
///
/// * [`CodecError::IncorrectPassword`] — 密码哈希不匹配。
/// * [`CodecError::InvalidLength`] — 长度字段为零或超出网格容量。
/// * [`CodecError::OutOfBounds`] — 任一阶段光标走出网格。
pub fn extract_message(img: &RgbImage, password: &str) -> Result<String, CodecError> {
    // 零宽度的退化网格没有任何字节槽位
    if img.width() == 0 {
        return Err(CodecError::OutOfBounds);
    }

    let mut cursor = Cursor::new();

    let mut hash_bytes = Vec::with_capacity(HASH_HEX_LEN);
    loop {
        let byte = read_byte(img, &mut cursor)?;
        if byte == SENTINEL {
            break;
        }
        hash_bytes.push(byte);
    }

    let retrieved_hash = String::from_utf8_lossy(&hash_bytes);
    let expected_hash = hash_password(password);
    if retrieved_hash.trim() != expected_hash.trim() {
        return Err(CodecError::IncorrectPassword);
    }

    let mut length_field = [0u8; LENGTH_FIELD_BYTES];
    for slot in length_field.iter_mut() {
        *slot = read_byte(img, &mut cursor)?;
    }
    let length = u32::from_be_bytes(length_field) as usize;

    let capacity = img.height() as usize * img.width() as usize * CHANNELS;
    if length == 0 || length > capacity {
        return Err(CodecError::InvalidLength(length));
    }

    // 跳过第二个哨兵槽位。与旧格式一致，不校验其值。
    read_byte(img, &mut cursor)?;

    let mut payload = Vec::with_capacity(length);
    for _ in 0..length {
        payload.push(read_byte(img, &mut cursor)?);
    }

    Ok(String::from_utf8_lossy(&payload).into_owned())
}
