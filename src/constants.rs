/// LSB 方案默认每个颜色通道替换的最低有效位数。
pub const DEFAULT_BITS_PER_CHANNEL: u8 = 1;

/// LSB 方案允许的每通道位数上限。
/// 替换全部 8 位将完全丢失原始颜色，因此最多只允许 7 位。
pub const MAX_BITS_PER_CHANNEL: u8 = 7;

/// 块奇偶方案默认的块宽度 (像素)。
pub const DEFAULT_BLOCK_WIDTH: usize = 3;

/// 块奇偶方案默认的块高度 (像素)。
pub const DEFAULT_BLOCK_HEIGHT: usize = 7;

/// KJB 方案默认的嵌入强度 (蓝色通道修改量与亮度的比例系数)。
pub const DEFAULT_LAMBDA: f64 = 0.1;

/// KJB 方案默认的十字臂长度，原始算法使用 2。
pub const DEFAULT_CROSS_PIXEL_COUNT: usize = 2;

/// KJB 方案默认的消息重复次数 (1 表示不使用冗余)。
pub const DEFAULT_MULTIPLICITY: usize = 1;

/// 未指定输出路径时，隐写图像文件名的前缀。
pub const DOCTORED_PREFIX: &str = "doctored_";

/// 未指定输出路径时，恢复文本文件名的前缀。
pub const RECOVERED_PREFIX: &str = "recovered_";
