//! # 错误类型模块
//!
//! [`StegoError`] 覆盖嵌入与提取过程中所有可能的失败情形。
//! 所有错误都是确定性的：相同的输入会得到相同的错误，因此不存在重试策略。

use std::fmt;

/// 隐写核心操作可能返回的错误。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StegoError {
    /// 容器在给定参数下无法容纳完整的消息。
    CapacityExceeded {
        required_bits: usize,
        available_bits: usize,
    },
    /// 在收集到所需字节数之前图像已被遍历完。
    InsufficientData {
        requested_bytes: usize,
        extracted_bytes: usize,
    },
    /// 调用方违反了函数的前置条件 (参数非法、缓冲区长度不匹配等)。
    PreconditionViolation(String),
    /// 访问了图像范围之外的像素。
    OutOfBounds { column: usize, row: usize },
}

impl fmt::Display for StegoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityExceeded {
                required_bits,
                available_bits,
            } => write!(
                f,
                "The message is too large to be embedded in this container (required {required_bits} bits, available {available_bits} bits)"
            ),
            Self::InsufficientData {
                requested_bytes,
                extracted_bytes,
            } => write!(
                f,
                "Failed to extract enough image bytes (requested {requested_bytes}, extracted {extracted_bytes})"
            ),
            Self::PreconditionViolation(reason) => write!(f, "precondition violated: {reason}"),
            Self::OutOfBounds { column, row } => {
                write!(f, "pixel ({column}, {row}) is outside the image")
            }
        }
    }
}

impl std::error::Error for StegoError {}

/// 核心操作的结果类型。
pub type Result<T> = std::result::Result<T, StegoError>;
