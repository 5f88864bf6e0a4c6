use std::{error::Error, fmt::Display};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HashError {
    /// 实际字节长度`real`和目标字节长度`target`不匹配
    MismatchingByteLen { target: usize, real: usize },
    /// 消息的位长度`bits`无法用`limit_bits`位的长度字段表示
    MessageTooLong { bits: u128, limit_bits: usize },
    /// 填充参数非法: 块位长度和长度字段位长度需是8的整数倍, 且长度字段不超过128位并小于块长度
    InvalidPadding { block_bits: usize, len_bits: usize },
    /// 待解析的消息字节长度`len`不是块字节长度`block`的整数倍
    UnalignedMessage { len: usize, block: usize },
    /// SHA-512/t不支持的摘要字节长度
    InvalidDigestLen(usize),
}

impl Display for HashError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HashError::MismatchingByteLen { target, real } => f.write_fmt(format_args!(
                "real byte length `{real}` not match to target byte length `{target}`"
            )),
            HashError::MessageTooLong { bits, limit_bits } => f.write_fmt(format_args!(
                "message bit length `{bits}` exceeds the capacity of the {limit_bits}-bit length field"
            )),
            HashError::InvalidPadding {
                block_bits,
                len_bits,
            } => f.write_fmt(format_args!(
                "invalid padding parameters: block `{block_bits}` bits, length field `{len_bits}` bits"
            )),
            HashError::UnalignedMessage { len, block } => f.write_fmt(format_args!(
                "message byte length `{len}` is not a multiple of the block byte length `{block}`"
            )),
            HashError::InvalidDigestLen(len) => f.write_fmt(format_args!(
                "invalid digest byte length `{len}` for the SHA512t"
            )),
        }
    }
}

impl Error for HashError {}
