/// 用作变长字段终止符的哨兵字节值。
/// 哈希字段为 ASCII 十六进制字符 (0x30..0x66)，正常情况下不会与其冲突。
pub const SENTINEL: u8 = 255;

/// SHA-256 摘要的十六进制表示长度 (字节)。
/// 256 bits / 4 bits-per-hex-char = 64 个 ASCII 字符。
pub const HASH_HEX_LEN: usize = 64;

/// 长度字段占用的字节数。
/// 消息字节长度以大端序 `u32` 形式写入，固定 4 字节。
pub const LENGTH_FIELD_BYTES: usize = 4;

/// 每个像素的通道数 (RGB)。
/// 载体图像统一转换为 RGB8，每个通道存放记录的一个字节。
pub const CHANNELS: usize = 3;
