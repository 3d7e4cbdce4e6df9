//! # 像素网格模块
//!
//! 隐写算法只依赖这里定义的 [`PixelGrid`] 抽象：宽、高以及按 (列, 行) 读写 RGBA 像素。
//! 图像的解码与编码由 `image` crate 负责，本模块为 [`RgbaImage`] 实现了该抽象。

use crate::error::{Result, StegoError};
use image::{Rgba, RgbaImage};

/// 一个像素的四个 8 位通道。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pixel {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

/// 可被隐写算法修改的颜色通道。Alpha 通道永远不会被触碰。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    /// 所有方案遍历通道时使用的顺序。
    pub const RGB: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];
}

impl Pixel {
    pub const fn new(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    pub fn channel(&self, channel: Channel) -> u8 {
        match channel {
            Channel::Red => self.red,
            Channel::Green => self.green,
            Channel::Blue => self.blue,
        }
    }

    pub fn set_channel(&mut self, channel: Channel, value: u8) {
        match channel {
            Channel::Red => self.red = value,
            Channel::Green => self.green = value,
            Channel::Blue => self.blue = value,
        }
    }

    /// 亮度 Y = 0.299·R + 0.587·G + 0.114·B。
    pub fn luminance(&self) -> f64 {
        0.299 * f64::from(self.red) + 0.587 * f64::from(self.green) + 0.114 * f64::from(self.blue)
    }
}

impl From<Rgba<u8>> for Pixel {
    fn from(Rgba([red, green, blue, alpha]): Rgba<u8>) -> Self {
        Self::new(red, green, blue, alpha)
    }
}

impl From<Pixel> for Rgba<u8> {
    fn from(pixel: Pixel) -> Self {
        Rgba([pixel.red, pixel.green, pixel.blue, pixel.alpha])
    }
}

/// 以 (列, 行) 寻址的矩形像素数组，坐标从 0 开始。
///
/// `Clone` 必须是深拷贝：嵌入函数总是先克隆输入，再修改并返回克隆体。
pub trait PixelGrid: Clone {
    fn width(&self) -> usize;

    fn height(&self) -> usize;

    /// 读取像素；越界时返回 [`StegoError::OutOfBounds`]。
    fn pixel(&self, column: usize, row: usize) -> Result<Pixel>;

    /// 替换像素的全部通道；越界时返回 [`StegoError::OutOfBounds`]。
    fn set_pixel(&mut self, column: usize, row: usize, pixel: Pixel) -> Result<()>;

    fn contains(&self, column: usize, row: usize) -> bool {
        column < self.width() && row < self.height()
    }
}

impl PixelGrid for RgbaImage {
    fn width(&self) -> usize {
        self.dimensions().0 as usize
    }

    fn height(&self) -> usize {
        self.dimensions().1 as usize
    }

    fn pixel(&self, column: usize, row: usize) -> Result<Pixel> {
        if !PixelGrid::contains(self, column, row) {
            return Err(StegoError::OutOfBounds { column, row });
        }
        Ok((*self.get_pixel(column as u32, row as u32)).into())
    }

    fn set_pixel(&mut self, column: usize, row: usize, pixel: Pixel) -> Result<()> {
        if !PixelGrid::contains(self, column, row) {
            return Err(StegoError::OutOfBounds { column, row });
        }
        self.put_pixel(column as u32, row as u32, pixel.into());
        Ok(())
    }
}
