//! # pixel_hide 库
//!
//! 本库包含像素域隐写工具的核心逻辑：比特流、重复编码以及 LSB、块奇偶、KJB 三种隐写方案。

// 声明库包含的所有模块。

pub mod bits;
pub mod cli;
pub mod constants;
pub mod error;
pub mod grid;
pub mod handler;
pub mod redundancy;
pub mod steganography;

pub use error::{Result, StegoError};
pub use grid::{Channel, Pixel, PixelGrid};
