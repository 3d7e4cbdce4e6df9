#![allow(dead_code)]

use image::{ImageBuffer, Rgba, RgbaImage};
use rand::{Rng, RngCore, SeedableRng, rngs::StdRng};
use std::path::Path;

pub const HELLO: &[u8] = b"Hello, world!";

/// 一个辅助函数，用于创建一个带有随机像素 (固定种子) 的测试图像
pub fn random_image(width: u32, height: u32, seed: u64) -> RgbaImage {
    let mut raw_pixels = vec![0u8; (width * height * 4) as usize];
    StdRng::seed_from_u64(seed).fill_bytes(&mut raw_pixels);

    let mut img_buf = ImageBuffer::new(width, height);
    img_buf
        .pixels_mut()
        .zip(raw_pixels.chunks_exact(4))
        .for_each(|(pixel, chunk)| {
            *pixel = Rgba([chunk[0], chunk[1], chunk[2], 255]);
        });
    img_buf
}

/// 纯色图像
pub fn flat_image(width: u32, height: u32, color: [u8; 3]) -> RgbaImage {
    ImageBuffer::from_pixel(width, height, Rgba([color[0], color[1], color[2], 255]))
}

/// 红绿通道固定、蓝色通道在 128 附近均匀抖动 (±`spread`) 的图像
pub fn noisy_blue_image(width: u32, height: u32, spread: i16, seed: u64) -> RgbaImage {
    let mut rng = StdRng::seed_from_u64(seed);
    ImageBuffer::from_fn(width, height, |_, _| {
        let blue = 128 + rng.random_range(-spread..=spread);
        Rgba([128, 128, blue as u8, 255])
    })
}

pub fn save_random_image(path: &Path, width: u32, height: u32, seed: u64) {
    random_image(width, height, seed)
        .save(path)
        .expect("Failed to create test image.");
}
