//! # 重复编码模块
//!
//! 通过把消息复制多份来换取抗噪能力，提取时对每一位做多数表决。
//! 目前只有 KJB 方案使用它，但它本身不依赖任何隐写方案。

use crate::bits::{BitReader, ByteAccumulator};
use crate::error::{Result, StegoError};

/// 返回把 `payload` 连续复制 `multiplicity` 次得到的新缓冲区。
pub fn multiply(payload: &[u8], multiplicity: usize) -> Vec<u8> {
    payload.repeat(multiplicity)
}

/// [`multiply`] 的逆操作。
///
/// 把 `buffer` 视作 `multiplicity` 份首尾相接的副本，第 k 份副本的第 i 位位于比特偏移
/// `i + k * bit_length` 处。对每个比特位置取所有副本的平均值并四舍五入 (0.5 进位)。
///
/// # Errors
///
/// `multiplicity` 为 0，或 `buffer` 的长度不是 `multiplicity` 的整数倍时返回
/// [`StegoError::PreconditionViolation`]。
pub fn demultiply(buffer: &[u8], multiplicity: usize) -> Result<Vec<u8>> {
    if multiplicity == 0 {
        return Err(StegoError::PreconditionViolation(
            "multiplicity must be at least 1".into(),
        ));
    }
    if buffer.len() % multiplicity != 0 {
        return Err(StegoError::PreconditionViolation(format!(
            "buffer length {} is not a multiple of multiplicity {multiplicity}",
            buffer.len()
        )));
    }

    let byte_length = buffer.len() / multiplicity;
    let bit_length = byte_length * 8;
    let mut ones = vec![0usize; bit_length];

    if bit_length > 0 {
        for (index, bit) in BitReader::new(buffer).enumerate() {
            ones[index % bit_length] += bit as usize;
        }
    }

    let mut acc = ByteAccumulator::with_capacity(byte_length);
    for count in ones {
        // round(count / multiplicity) 且 0.5 向上取整
        acc.push(u8::from(2 * count >= multiplicity));
    }

    Ok(acc.into_bytes())
}
