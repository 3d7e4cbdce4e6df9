//! # 块奇偶方案
//!
//! 图像被划分为互不重叠的块，每个完整的块隐藏一个比特：块内所有像素 RGB 值异或后的奇偶性。
//! 奇偶性与消息比特不一致时，只需翻转块内随机一个像素蓝色通道的最低位。

use crate::bits::{Bit, BitReader, ByteAccumulator};
use crate::constants::{DEFAULT_BLOCK_HEIGHT, DEFAULT_BLOCK_WIDTH};
use crate::error::{Result, StegoError};
use crate::grid::{Channel, PixelGrid};
use log::debug;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockSize {
    pub width: usize,
    pub height: usize,
}

impl Default for BlockSize {
    fn default() -> Self {
        Self::new(DEFAULT_BLOCK_WIDTH, DEFAULT_BLOCK_HEIGHT)
    }
}

impl BlockSize {
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// 检查块尺寸是否非空；为空时返回 [`StegoError::PreconditionViolation`]。
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(StegoError::PreconditionViolation(format!(
                "block size must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }
}

/// 完全落在图像内的块数，即可隐藏的比特数。
pub fn block_count(width: usize, height: usize, size: BlockSize) -> usize {
    if size.width == 0 || size.height == 0 {
        return 0;
    }
    (width / size.width) * (height / size.height)
}

/// 按行优先顺序生成完整块左上角的 (列, 行) 坐标；越过右边或下边界的块被跳过。
fn blocks(width: usize, height: usize, size: BlockSize) -> impl Iterator<Item = (usize, usize)> {
    (0..height)
        .step_by(size.height)
        .filter(move |row| row + size.height <= height)
        .flat_map(move |row| {
            (0..width)
                .step_by(size.width)
                .filter(move |column| column + size.width <= width)
                .map(move |column| (column, row))
        })
}

fn parity_bit<G: PixelGrid>(grid: &G, column: usize, row: usize, size: BlockSize) -> Result<Bit> {
    let mut xored_byte = 0u8;
    for x in column..column + size.width {
        for y in row..row + size.height {
            let pixel = grid.pixel(x, y)?;
            for channel in Channel::RGB {
                xored_byte ^= pixel.channel(channel);
            }
        }
    }
    Ok((xored_byte.count_ones() & 1) as Bit)
}

/// 把 `payload` 逐位隐藏到 `grid` 副本的各个块中。
///
/// 需要翻转的像素由 `rng` 在块内均匀选取，测试中可传入固定种子的生成器以得到可复现的结果。
///
/// # Errors
///
/// * 块尺寸为空时返回 [`StegoError::PreconditionViolation`]。
/// * 块用尽而消息尚未写完时返回 [`StegoError::CapacityExceeded`]。
pub fn embed<G: PixelGrid, R: Rng>(
    grid: &G,
    payload: &[u8],
    size: BlockSize,
    rng: &mut R,
) -> Result<G> {
    size.validate()?;

    let mut doctored = grid.clone();
    let mut bits = BitReader::new(payload);
    let required_bits = bits.remaining();
    let mut flipped = 0usize;

    for (column, row) in blocks(grid.width(), grid.height(), size) {
        let Some(bit) = bits.next_bit() else {
            debug!("block parity: embedded {required_bits} bits, flipped {flipped} pixels");
            return Ok(doctored);
        };

        if parity_bit(grid, column, row, size)? != bit {
            let x = rng.random_range(column..column + size.width);
            let y = rng.random_range(row..row + size.height);
            let mut pixel = doctored.pixel(x, y)?;
            pixel.blue ^= 1;
            doctored.set_pixel(x, y, pixel)?;
            flipped += 1;
        }
    }

    if !bits.is_exhausted() {
        return Err(StegoError::CapacityExceeded {
            required_bits,
            available_bits: block_count(grid.width(), grid.height(), size),
        });
    }

    debug!("block parity: embedded {required_bits} bits, flipped {flipped} pixels");
    Ok(doctored)
}

/// 依次读取每个块的奇偶位，直到收集到 `length` 个字节。
///
/// 块用尽时返回已收集到的字节 (可能少于 `length`)，这不被视为错误。
///
/// # Errors
///
/// 块尺寸为空时返回 [`StegoError::PreconditionViolation`]。
pub fn extract<G: PixelGrid>(grid: &G, size: BlockSize, length: usize) -> Result<Vec<u8>> {
    size.validate()?;
    if length == 0 {
        return Ok(Vec::new());
    }

    let available_bytes = block_count(grid.width(), grid.height(), size) / 8;
    let mut acc = ByteAccumulator::with_capacity(length.min(available_bytes));
    for (column, row) in blocks(grid.width(), grid.height(), size) {
        acc.push(parity_bit(grid, column, row, size)?);
        if acc.len() == length {
            return Ok(acc.into_bytes());
        }
    }

    debug!(
        "block parity: image exhausted after {} of {length} bytes",
        acc.len()
    );
    Ok(acc.into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_blocks_are_skipped() {
        let visited: Vec<_> = blocks(7, 5, BlockSize::new(3, 2)).collect();
        assert_eq!(visited, vec![(0, 0), (3, 0), (0, 2), (3, 2)]);
        assert_eq!(block_count(7, 5, BlockSize::new(3, 2)), visited.len());
    }

    #[test]
    fn blocks_touching_the_edge_are_used() {
        assert_eq!(blocks(6, 4, BlockSize::new(3, 2)).count(), 4);
    }
}
