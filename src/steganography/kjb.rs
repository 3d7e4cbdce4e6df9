//! # KJB 方案
//!
//! 按亮度成比例地抬高或压低蓝色通道来嵌入比特；提取时用十字邻域的蓝色均值估计原值，
//! 根据实际值与估计值的大小关系判定比特。判定是统计性的，配合 [`crate::redundancy`]
//! 的重复编码可以降低误码率。

use crate::bits::{BitReader, ByteAccumulator};
use crate::constants::{DEFAULT_CROSS_PIXEL_COUNT, DEFAULT_LAMBDA, DEFAULT_MULTIPLICITY};
use crate::error::{Result, StegoError};
use crate::grid::PixelGrid;
use crate::redundancy::{demultiply, multiply};
use log::debug;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KjbOptions {
    /// 嵌入强度：蓝色通道修改量与像素亮度的比例系数。
    pub lambda: f64,
    /// 十字邻域每条臂的像素数，同时也是遍历步长与边框宽度。
    pub cross_pixel_count: usize,
    /// 消息重复次数。
    pub multiplicity: usize,
}

impl Default for KjbOptions {
    fn default() -> Self {
        Self {
            lambda: DEFAULT_LAMBDA,
            cross_pixel_count: DEFAULT_CROSS_PIXEL_COUNT,
            multiplicity: DEFAULT_MULTIPLICITY,
        }
    }
}

impl KjbOptions {
    /// 检查参数是否合法；非法时返回 [`StegoError::PreconditionViolation`]。
    pub fn validate(&self) -> Result<()> {
        if !self.lambda.is_finite() || self.lambda < 0.0 {
            return Err(StegoError::PreconditionViolation(format!(
                "lambda must be a finite non-negative number, got {}",
                self.lambda
            )));
        }
        if self.cross_pixel_count == 0 {
            return Err(StegoError::PreconditionViolation(
                "cross pixel count must be at least 1".into(),
            ));
        }
        if self.multiplicity == 0 {
            return Err(StegoError::PreconditionViolation(
                "multiplicity must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

fn axis(length: usize, cross: usize) -> std::iter::StepBy<std::ops::Range<usize>> {
    (cross..length.saturating_sub(cross)).step_by(cross)
}

/// 行优先遍历边框以内、间隔 `cross` 的像素，保证每个像素都有完整的十字邻域。
fn positions(width: usize, height: usize, cross: usize) -> impl Iterator<Item = (usize, usize)> {
    axis(height, cross).flat_map(move |row| axis(width, cross).map(move |column| (column, row)))
}

/// 可嵌入的比特数 (包括重复编码产生的冗余比特)。
pub fn capacity_bits(width: usize, height: usize, cross_pixel_count: usize) -> usize {
    if cross_pixel_count == 0 {
        return 0;
    }
    axis(width, cross_pixel_count).len() * axis(height, cross_pixel_count).len()
}

/// 先把 `payload` 重复 `multiplicity` 次，再逐位修改被访问像素的蓝色通道。
///
/// 比特为 1 时蓝色变为 `ceil(B + λY)`，为 0 时变为 `floor(B - λY)`，结果截断到 `[0, 255]`。
///
/// # Errors
///
/// * 参数非法时返回 [`StegoError::PreconditionViolation`]。
/// * 遍历结束时仍有比特未写入返回 [`StegoError::CapacityExceeded`]。
pub fn embed<G: PixelGrid>(grid: &G, payload: &[u8], options: KjbOptions) -> Result<G> {
    options.validate()?;

    let cross = options.cross_pixel_count;
    let available_bits = capacity_bits(grid.width(), grid.height(), cross);

    // 复制消息之前先确认容量
    let required_bits = payload
        .len()
        .checked_mul(8)
        .and_then(|bits| bits.checked_mul(options.multiplicity));
    let required_bits = match required_bits {
        Some(bits) if bits <= available_bits => bits,
        _ => {
            return Err(StegoError::CapacityExceeded {
                required_bits: required_bits.unwrap_or(usize::MAX),
                available_bits,
            });
        }
    };

    let stream = multiply(payload, options.multiplicity);
    let mut bits = BitReader::new(&stream);
    let mut doctored = grid.clone();

    for (column, row) in positions(grid.width(), grid.height(), cross) {
        let Some(bit) = bits.next_bit() else { break };

        let source = grid.pixel(column, row)?;
        let diff = options.lambda * source.luminance();
        let blue = f64::from(source.blue);
        let shifted = if bit == 1 {
            (blue + diff).ceil()
        } else {
            (blue - diff).floor()
        };

        let mut pixel = source;
        pixel.blue = shifted.clamp(0.0, 255.0) as u8;
        doctored.set_pixel(column, row, pixel)?;
    }

    if !bits.is_exhausted() {
        return Err(StegoError::CapacityExceeded {
            required_bits,
            available_bits,
        });
    }

    debug!(
        "KJB: embedded {required_bits} bits (lambda {}, multiplicity {})",
        options.lambda, options.multiplicity
    );
    Ok(doctored)
}

/// 估计每个被访问像素的比特，凑满 `byte_length × multiplicity` 个字节后做多数表决。
///
/// 只有 `cross_pixel_count` 与 `multiplicity` 参与提取，且必须与嵌入时一致。
/// 图像遍历完仍未凑满时，返回已收集到的原始字节 (未经表决)。
///
/// # Errors
///
/// 参数非法时返回 [`StegoError::PreconditionViolation`]。
pub fn extract<G: PixelGrid>(grid: &G, byte_length: usize, options: KjbOptions) -> Result<Vec<u8>> {
    options.validate()?;

    // 超出图像容量的目标永远无法达到，结果只会是部分原始字节
    let target = byte_length.saturating_mul(options.multiplicity);
    if target == 0 {
        return Ok(Vec::new());
    }

    let cross = options.cross_pixel_count;
    let samples = cross.saturating_mul(4);
    let available_bytes = capacity_bits(grid.width(), grid.height(), cross) / 8;
    let mut acc = ByteAccumulator::with_capacity(target.min(available_bytes));

    for (column, row) in positions(grid.width(), grid.height(), cross) {
        let actual = usize::from(grid.pixel(column, row)?.blue);

        let mut estimation = 0usize;
        for sigma in 1..=cross {
            estimation += usize::from(grid.pixel(column, row + sigma)?.blue)
                + usize::from(grid.pixel(column + sigma, row)?.blue)
                + usize::from(grid.pixel(column - sigma, row)?.blue)
                + usize::from(grid.pixel(column, row - sigma)?.blue);
        }

        // actual > estimation / samples
        acc.push(u8::from(actual * samples > estimation));
        if acc.len() == target {
            return demultiply(&acc.into_bytes(), options.multiplicity);
        }
    }

    debug!(
        "KJB: image exhausted after {} of {target} raw bytes",
        acc.len()
    );
    Ok(acc.into_bytes())
}
