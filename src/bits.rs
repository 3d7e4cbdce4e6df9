//! # 比特流模块
//!
//! 将字节缓冲区按位展开 (每个字节高位在前)，以及将比特重新拼装为字节。
//! 所有隐写方案都通过这里的游标逐位消费消息，而不会一次性展开整个比特序列。

/// 单个比特，取值为 0 或 1。
pub type Bit = u8;

/// 以数组形式表示的一个字节，下标 0 对应字节的最高位。
pub type ByteAsBits = [Bit; 8];

/// 字节缓冲区上的只读比特游标。
///
/// 游标只能单向前进，每个比特恰好被读取一次。
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, position: 0 }
    }

    /// 读取下一个比特；比特流耗尽时返回 `None`。
    pub fn next_bit(&mut self) -> Option<Bit> {
        let byte = *self.bytes.get(self.position / 8)?;
        let offset = 7 - (self.position % 8);
        self.position += 1;
        Some((byte >> offset) & 1)
    }

    /// 尚未读取的比特数。
    pub fn remaining(&self) -> usize {
        self.bytes.len() * 8 - self.position
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }
}

impl Iterator for BitReader<'_> {
    type Item = Bit;

    fn next(&mut self) -> Option<Bit> {
        self.next_bit()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for BitReader<'_> {}

/// 按高位在前的顺序把比特拼装成字节。
#[derive(Debug, Default)]
pub struct ByteAccumulator {
    current: u8,
    filled: u8,
    bytes: Vec<u8>,
}

impl ByteAccumulator {
    pub fn with_capacity(byte_capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(byte_capacity),
            ..Self::default()
        }
    }

    /// 追加一个比特；当一个字节凑满 8 位时返回该字节。
    pub fn push(&mut self, bit: Bit) -> Option<u8> {
        self.current = (self.current << 1) | (bit & 1);
        self.filled += 1;
        if self.filled < 8 {
            return None;
        }

        let byte = self.current;
        self.bytes.push(byte);
        self.current = 0;
        self.filled = 0;
        Some(byte)
    }

    /// 已完整拼装的字节数，不包括尚未凑满的比特。
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// 取出所有完整字节，丢弃未凑满的尾部比特。
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

pub fn byte_to_bits(byte: u8) -> ByteAsBits {
    std::array::from_fn(|i| (byte >> (7 - i)) & 1)
}

pub fn bits_to_byte(bits: ByteAsBits) -> u8 {
    bits.iter().fold(0, |byte, &bit| (byte << 1) | (bit & 1))
}

/// 计算两个缓冲区之间不同比特的数量。
///
/// 仅存在于较长缓冲区中的字节，其 8 个比特全部计为不同。
pub fn hamming_distance(a: &[u8], b: &[u8]) -> usize {
    let common: usize = a
        .iter()
        .zip(b)
        .map(|(x, y)| (x ^ y).count_ones() as usize)
        .sum();
    let extra = a.len().abs_diff(b.len()).saturating_mul(8);
    common.saturating_add(extra)
}
