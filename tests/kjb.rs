mod common;

use common::{HELLO, flat_image, noisy_blue_image};
use pixel_hide::bits::hamming_distance;
use pixel_hide::steganography::kjb::{self, KjbOptions};
use pixel_hide::{PixelGrid, StegoError};

fn options(lambda: f64, multiplicity: usize) -> KjbOptions {
    KjbOptions {
        lambda,
        multiplicity,
        ..KjbOptions::default()
    }
}

/// 纯色图像上邻域估计没有噪声，单次嵌入即可无误码恢复
#[test]
fn test_exact_recovery_on_flat_image() -> anyhow::Result<()> {
    let container = flat_image(64, 64, [120, 130, 140]);

    for multiplicity in [1, 3] {
        let doctored = kjb::embed(&container, HELLO, options(0.1, multiplicity))?;
        let extracted = kjb::extract(&doctored, HELLO.len(), options(0.1, multiplicity))?;
        assert_eq!(extracted, HELLO, "multiplicity: {multiplicity}");
    }
    Ok(())
}

/// lambda = 0.01、不重复时误码是允许的；在轻微纹理的图像上，104 个比特中的错误应少于四分之一
#[test]
fn test_low_strength_single_copy_error_is_bounded() -> anyhow::Result<()> {
    let container = noisy_blue_image(128, 128, 2, 21);

    let doctored = kjb::embed(&container, HELLO, options(0.01, 1))?;
    let extracted = kjb::extract(&doctored, HELLO.len(), options(0.01, 1))?;

    assert_eq!(extracted.len(), HELLO.len());
    let distance = hamming_distance(HELLO, &extracted);
    println!("lambda 0.01, multiplicity 1, hamming distance {distance}");
    assert!(distance < 26);
    Ok(())
}

/// 验证 lambda = 0.01 时，在多张轻微纹理的图像上，重复 15 次嵌入的总误码少于单次嵌入
#[test]
fn test_redundancy_reduces_bit_errors() -> anyhow::Result<()> {
    let lambda = 0.01;
    let (mut single, mut repeated) = (0, 0);

    for seed in 20..30 {
        let container = noisy_blue_image(128, 128, 2, seed);
        for (multiplicity, total) in [(1, &mut single), (15, &mut repeated)] {
            let doctored = kjb::embed(&container, HELLO, options(lambda, multiplicity))?;
            let extracted = kjb::extract(&doctored, HELLO.len(), options(lambda, multiplicity))?;
            *total += hamming_distance(HELLO, &extracted);
        }
    }

    println!("hamming distance over 10 images: multiplicity 1 -> {single}, multiplicity 15 -> {repeated}");
    assert!(single > 0);
    assert!(repeated < single);
    Ok(())
}

/// 验证只有被访问像素的蓝色通道被修改，且原图保持不变
#[test]
fn test_only_blue_of_visited_pixels_changes() -> anyhow::Result<()> {
    let container = noisy_blue_image(32, 32, 20, 23);
    let snapshot = container.clone();

    let doctored = kjb::embed(&container, b"kjb", options(0.1, 1))?;

    assert_eq!(container, snapshot);
    for row in 0..32 {
        for column in 0..32 {
            let before = container.pixel(column, row)?;
            let after = doctored.pixel(column, row)?;
            assert_eq!(
                (before.red, before.green, before.alpha),
                (after.red, after.green, after.alpha)
            );
            let visited = row >= 2 && column >= 2 && row % 2 == 0 && column % 2 == 0;
            if !visited {
                assert_eq!(before.blue, after.blue);
            }
        }
    }
    Ok(())
}

/// 验证蓝色通道被截断到 [0, 255]
#[test]
fn test_blue_is_clamped() -> anyhow::Result<()> {
    let white = flat_image(20, 5, [255, 255, 255]);
    let doctored = kjb::embed(&white, &[0xFF], options(0.5, 1))?;
    assert_eq!(doctored, white);

    // Y ≈ 226，floor(3 - 113) 截断为 0
    let bright_low_blue = flat_image(20, 5, [255, 255, 3]);
    let doctored = kjb::embed(&bright_low_blue, &[0x00], options(0.5, 1))?;
    assert_eq!(doctored.pixel(2, 2)?.blue, 0);
    Ok(())
}

/// 验证容量边界：20x5 图像恰好有 8 个可嵌入位置
#[test]
fn test_capacity_boundary() -> anyhow::Result<()> {
    let container = flat_image(20, 5, [90, 90, 90]);
    assert_eq!(kjb::capacity_bits(20, 5, 2), 8);

    let doctored = kjb::embed(&container, b"k", options(0.1, 1))?;
    assert_eq!(kjb::extract(&doctored, 1, options(0.1, 1))?, b"k");

    assert_eq!(
        kjb::embed(&container, b"kk", options(0.1, 1)).unwrap_err(),
        StegoError::CapacityExceeded {
            required_bits: 16,
            available_bits: 8
        }
    );
    assert!(matches!(
        kjb::embed(&container, b"k", options(0.1, 2)),
        Err(StegoError::CapacityExceeded { .. })
    ));
    Ok(())
}

/// 验证位置用尽时提取返回已收集的原始字节
#[test]
fn test_extract_returns_partial_raw_bytes() -> anyhow::Result<()> {
    let container = flat_image(20, 5, [90, 90, 90]);

    let extracted = kjb::extract(&container, 2, options(0.1, 1))?;

    assert_eq!(extracted.len(), 1);
    Ok(())
}

/// 验证请求远超图像容量的长度时只返回已收集的原始字节
#[test]
fn test_extract_huge_length_returns_partial_raw_bytes() -> anyhow::Result<()> {
    let container = flat_image(20, 5, [90, 90, 90]);

    let extracted = kjb::extract(&container, usize::MAX / 2 + 1, options(0.1, 1))?;

    assert_eq!(extracted.len(), 1);
    Ok(())
}

/// 验证巨大的重复次数在嵌入时报告容量不足，提取时只返回图像能提供的原始字节
#[test]
fn test_huge_multiplicity_does_not_overflow() -> anyhow::Result<()> {
    let container = noisy_blue_image(128, 128, 2, 24);
    let huge = options(0.01, usize::MAX / 4);
    let available_bits = kjb::capacity_bits(128, 128, 2);

    assert_eq!(
        kjb::embed(&container, HELLO, huge).unwrap_err(),
        StegoError::CapacityExceeded {
            required_bits: usize::MAX,
            available_bits
        }
    );

    let extracted = kjb::extract(&container, HELLO.len(), huge)?;
    assert_eq!(extracted.len(), available_bits / 8);
    Ok(())
}

#[test]
fn test_invalid_options_are_rejected() {
    let container = flat_image(16, 16, [1, 2, 3]);
    let invalid = [
        options(f64::NAN, 1),
        options(-0.1, 1),
        options(0.1, 0),
        KjbOptions {
            cross_pixel_count: 0,
            ..KjbOptions::default()
        },
    ];

    for opts in invalid {
        assert!(matches!(
            kjb::embed(&container, HELLO, opts),
            Err(StegoError::PreconditionViolation(_))
        ));
    }
}
