//! # LSB 替换方案
//!
//! 依次把消息比特写入每个像素红、绿、蓝通道的最低若干位。Alpha 通道不参与隐写。

use crate::bits::{BitReader, ByteAccumulator};
use crate::constants::{DEFAULT_BITS_PER_CHANNEL, MAX_BITS_PER_CHANNEL};
use crate::error::{Result, StegoError};
use crate::grid::{Channel, PixelGrid};
use log::debug;

/// 像素的遍历顺序。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanOrder {
    /// 外层按行自上而下，内层按列从左到右，逐像素遍历。
    #[default]
    RowMajor,
    /// 外层按列从左到右，内层按行自上而下，两个方向都以 `stride` 为步长。
    ColumnMajor { stride: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LsbOptions {
    /// 每个颜色通道替换的最低有效位数，取值范围 `[1, 7]`。
    pub bits_per_channel: u8,
    pub order: ScanOrder,
}

impl Default for LsbOptions {
    fn default() -> Self {
        Self {
            bits_per_channel: DEFAULT_BITS_PER_CHANNEL,
            order: ScanOrder::RowMajor,
        }
    }
}

impl LsbOptions {
    pub fn new(bits_per_channel: u8) -> Self {
        Self {
            bits_per_channel,
            ..Self::default()
        }
    }

    pub fn with_order(self, order: ScanOrder) -> Self {
        Self { order, ..self }
    }

    /// 检查参数是否合法；非法时返回 [`StegoError::PreconditionViolation`]。
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_BITS_PER_CHANNEL).contains(&self.bits_per_channel) {
            return Err(StegoError::PreconditionViolation(format!(
                "bits per channel must be within [1, {MAX_BITS_PER_CHANNEL}], got {}",
                self.bits_per_channel
            )));
        }
        if let ScanOrder::ColumnMajor { stride: 0 } = self.order {
            return Err(StegoError::PreconditionViolation(
                "column stride must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// 按 `order` 生成被访问像素的 (列, 行) 坐标。
fn scan(order: ScanOrder, width: usize, height: usize) -> impl Iterator<Item = (usize, usize)> {
    let (stride, column_major) = match order {
        ScanOrder::RowMajor => (1, false),
        ScanOrder::ColumnMajor { stride } => (stride, true),
    };
    let (outer, inner) = if column_major {
        (width, height)
    } else {
        (height, width)
    };

    (0..outer).step_by(stride).flat_map(move |o| {
        (0..inner)
            .step_by(stride)
            .map(move |i| if column_major { (o, i) } else { (i, o) })
    })
}

/// 给定尺寸与参数的图像最多能隐藏的比特数。
pub fn capacity_bits(width: usize, height: usize, options: LsbOptions) -> usize {
    let stride = match options.order {
        ScanOrder::RowMajor => 1,
        ScanOrder::ColumnMajor { stride } => stride.max(1),
    };
    let pixels = (0..width).step_by(stride).len() * (0..height).step_by(stride).len();
    pixels * Channel::RGB.len() * usize::from(options.bits_per_channel)
}

/// 把 `payload` 隐藏到 `grid` 的副本中并返回该副本。
///
/// 每个通道的低 `bits_per_channel` 位按从高到低的顺序被消息比特覆盖。
/// 消息写完后立即停止，剩余像素保持不变。
///
/// # Errors
///
/// * 参数非法时返回 [`StegoError::PreconditionViolation`]。
/// * 遍历完所有像素仍有比特未写入时返回 [`StegoError::CapacityExceeded`]。
pub fn embed<G: PixelGrid>(grid: &G, payload: &[u8], options: LsbOptions) -> Result<G> {
    options.validate()?;

    let mut doctored = grid.clone();
    let mut bits = BitReader::new(payload);
    let required_bits = bits.remaining();
    let slots = options.bits_per_channel;

    for (column, row) in scan(options.order, grid.width(), grid.height()) {
        if bits.is_exhausted() {
            break;
        }

        let mut pixel = grid.pixel(column, row)?;
        for channel in Channel::RGB {
            let mut value = pixel.channel(channel);
            for slot in (0..slots).rev() {
                let Some(bit) = bits.next_bit() else { break };
                value = (value & !(1 << slot)) | (bit << slot);
            }
            pixel.set_channel(channel, value);
        }
        doctored.set_pixel(column, row, pixel)?;
    }

    if !bits.is_exhausted() {
        return Err(StegoError::CapacityExceeded {
            required_bits,
            available_bits: capacity_bits(grid.width(), grid.height(), options),
        });
    }

    debug!("LSB: embedded {required_bits} bits at {slots} bit(s) per channel");
    Ok(doctored)
}

/// 按与 [`embed`] 相同的顺序读取最低有效位，直到收集到 `byte_length` 个字节。
///
/// # Errors
///
/// * 参数非法时返回 [`StegoError::PreconditionViolation`]。
/// * 图像在凑满 `byte_length` 个字节之前已遍历完时返回 [`StegoError::InsufficientData`]。
pub fn extract<G: PixelGrid>(grid: &G, byte_length: usize, options: LsbOptions) -> Result<Vec<u8>> {
    options.validate()?;
    if byte_length == 0 {
        return Ok(Vec::new());
    }

    let available_bytes = capacity_bits(grid.width(), grid.height(), options) / 8;
    let mut acc = ByteAccumulator::with_capacity(byte_length.min(available_bytes));
    let slots = options.bits_per_channel;

    for (column, row) in scan(options.order, grid.width(), grid.height()) {
        let pixel = grid.pixel(column, row)?;
        for channel in Channel::RGB {
            let value = pixel.channel(channel);
            for slot in (0..slots).rev() {
                acc.push((value >> slot) & 1);
                if acc.len() == byte_length {
                    return Ok(acc.into_bytes());
                }
            }
        }
    }

    Err(StegoError::InsufficientData {
        requested_bytes: byte_length,
        extracted_bytes: acc.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_major_scan_respects_stride() {
        let visited: Vec<_> = scan(ScanOrder::ColumnMajor { stride: 2 }, 3, 4).collect();
        assert_eq!(visited, vec![(0, 0), (0, 2), (2, 0), (2, 2)]);
    }

    #[test]
    fn row_major_scan_visits_every_pixel() {
        let visited: Vec<_> = scan(ScanOrder::RowMajor, 2, 2).collect();
        assert_eq!(visited, vec![(0, 0), (1, 0), (0, 1), (1, 1)]);
    }

    #[test]
    fn capacity_counts_rgb_slots() {
        assert_eq!(capacity_bits(10, 10, LsbOptions::new(2)), 600);
        let strided = LsbOptions::default().with_order(ScanOrder::ColumnMajor { stride: 2 });
        assert_eq!(capacity_bits(5, 4, strided), 3 * 2 * 3);
    }
}
