//! # 命令处理逻辑模块
//!
//! 包含处理 `hide` 和 `recover` 子命令的高级业务逻辑。
//! 本模块负责协调文件 I/O、调用核心隐写算法以及向用户报告结果。

use crate::cli::{HideArgs, Method, RecoverArgs, SchemeArgs};
use crate::constants::{DOCTORED_PREFIX, RECOVERED_PREFIX};
use crate::steganography::{block, kjb, lsb};
use anyhow::{Context, Result};
use colored::Colorize;
use image::RgbaImage;
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

/// 处理 'Hide' 命令的执行逻辑。
///
/// 负责读取图像和待隐藏文件、检查隐写空间是否足够、调用所选方法的嵌入函数，
/// 最后将结果写入目标图像文件。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径与隐写参数的 `HideArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 目标文件已存在且未指定 `--force`。
/// * 无法读取或解码输入的图像，或无法读取待隐藏文件。
/// * 图像没有足够的空间来隐藏数据。
/// * 核心嵌入函数在执行过程中失败。
/// * 无法写入到目标图像文件。
pub fn handle_hide(args: HideArgs) -> Result<()> {
    let dest = args
        .dest
        .clone()
        .unwrap_or_else(|| default_doctored_path(&args.image));
    ensure_writable(&dest, args.force)?;

    let picture = open_image(&args.image)?;

    let text = fs::read(&args.text).with_context(|| {
        format!(
            "Unable to read text file: {}",
            args.text.to_string_lossy().red().bold()
        )
    })?;

    validate_scheme(&args.scheme)?;

    let required_space = required_bits(&args.scheme, text.len());
    let available_space = available_bits(&args.scheme, &picture);
    debug!(
        "{:?}: {required_space} bits required, {available_space} bits available",
        args.scheme.method
    );

    anyhow::ensure!(
        available_space >= required_space,
        "Not enough space in the image to hide the text. \nRequired: {}, Available: {}",
        required_space.to_string().red().bold(),
        available_space.to_string().green().bold()
    );

    let doctored = match args.scheme.method {
        Method::Lsb => lsb::embed(&picture, &text, args.scheme.lsb_options()),
        Method::Block => block::embed(&picture, &text, args.scheme.block_size(), &mut rand::rng()),
        Method::Kjb => kjb::embed(&picture, &text, args.scheme.kjb_options()),
    }
    .with_context(|| {
        format!(
            "Failed to hide the message with method {:?}. \nCheck the scheme parameters.",
            args.scheme.method
        )
    })?;

    doctored.save(&dest).with_context(|| {
        format!(
            "Unable to write to target image file: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;

    info!("hid {} bytes in {}", text.len(), dest.display());
    println!(
        "The text has been successfully hidden and saved: {}",
        dest.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理 'Recover' 命令的执行逻辑。
///
/// 负责读取经过隐写的图像文件、调用所选方法的提取函数，
/// 最后将恢复的内容写入目标文件。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径、消息长度与隐写参数的 `RecoverArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 目标文件已存在且未指定 `--force`。
/// * 无法读取或解码输入的图像文件。
/// * 核心提取函数失败，或图像中的数据不足 `length` 个字节。
/// * 无法写入到目标文件。
pub fn handle_recover(args: RecoverArgs) -> Result<()> {
    let text_path = args
        .text
        .clone()
        .unwrap_or_else(|| default_recovered_path(&args.image));
    ensure_writable(&text_path, args.force)?;

    let picture = open_image(&args.image)?;
    validate_scheme(&args.scheme)?;

    let text = match args.scheme.method {
        Method::Lsb => lsb::extract(&picture, args.length, args.scheme.lsb_options()),
        Method::Block => block::extract(&picture, args.scheme.block_size(), args.length),
        Method::Kjb => kjb::extract(&picture, args.length, args.scheme.kjb_options()),
    }
    .with_context(|| {
        format!(
            "Failed to recover the message from '{}'. \nThe image may not contain a hidden message or is corrupted.",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    // block 与 kjb 在图像耗尽时返回较短的结果，这里统一视为错误
    anyhow::ensure!(
        text.len() == args.length,
        "Not enough data in the image. \nRequested: {}, Recovered: {}",
        args.length.to_string().green().bold(),
        text.len().to_string().red().bold()
    );

    fs::write(&text_path, &text).with_context(|| {
        format!(
            "Unable to write to target text file: {}",
            text_path.to_string_lossy().red().bold()
        )
    })?;

    info!("recovered {} bytes into {}", text.len(), text_path.display());
    println!(
        "The text has been successfully recovered and saved: {}",
        text_path.to_string_lossy().green().bold()
    );
    Ok(())
}

fn open_image(path: &Path) -> Result<RgbaImage> {
    let picture = image::open(path).with_context(|| {
        format!(
            "Unable to read image file: {}",
            path.to_string_lossy().red().bold()
        )
    })?;
    Ok(picture.to_rgba8())
}

/// 除非指定了 `force`，否则拒绝覆盖已存在的文件。
fn ensure_writable(path: &Path, force: bool) -> Result<()> {
    anyhow::ensure!(
        force || !path.exists(),
        "Output file already exists: {}. \nUse --force to overwrite it.",
        path.to_string_lossy().red().bold()
    );
    Ok(())
}

/// 在检查容量之前确认所选方法的参数合法。
fn validate_scheme(scheme: &SchemeArgs) -> Result<()> {
    match scheme.method {
        Method::Lsb => scheme.lsb_options().validate(),
        Method::Block => scheme.block_size().validate(),
        Method::Kjb => scheme.kjb_options().validate(),
    }
    .with_context(|| format!("Invalid parameters for method {:?}", scheme.method))
}

/// 需要嵌入的比特数 (KJB 包含重复编码带来的冗余)，溢出时取 `usize::MAX`。
fn required_bits(scheme: &SchemeArgs, payload_len: usize) -> usize {
    let bits = payload_len.saturating_mul(8);
    match scheme.method {
        Method::Kjb => bits.saturating_mul(scheme.multiplicity),
        Method::Lsb | Method::Block => bits,
    }
}

fn available_bits(scheme: &SchemeArgs, picture: &RgbaImage) -> usize {
    let (width, height) = (picture.width() as usize, picture.height() as usize);
    match scheme.method {
        Method::Lsb => lsb::capacity_bits(width, height, scheme.lsb_options()),
        Method::Block => block::block_count(width, height, scheme.block_size()),
        Method::Kjb => kjb::capacity_bits(width, height, scheme.cross),
    }
}

/// `dir/image.png` -> `dir/doctored_image.png`
fn default_doctored_path(image: &Path) -> PathBuf {
    let file_name = image
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image.png".to_string());
    image.with_file_name(format!("{DOCTORED_PREFIX}{file_name}"))
}

/// `dir/image.png` -> `dir/recovered_image.txt`
fn default_recovered_path(image: &Path) -> PathBuf {
    let stem = image
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    image.with_file_name(format!("{RECOVERED_PREFIX}{stem}.txt"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_paths_sit_next_to_the_image() {
        let image = Path::new("/tmp/pictures/cat.png");
        assert_eq!(
            default_doctored_path(image),
            PathBuf::from("/tmp/pictures/doctored_cat.png")
        );
        assert_eq!(
            default_recovered_path(&default_doctored_path(image)),
            PathBuf::from("/tmp/pictures/recovered_doctored_cat.txt")
        );
    }
}
