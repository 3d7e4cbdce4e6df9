//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构，包括子命令和参数。
//! 所有用户通过命令行与程序交互的入口点都在此模块中定义。

use crate::constants::{
    DEFAULT_BITS_PER_CHANNEL, DEFAULT_BLOCK_HEIGHT, DEFAULT_BLOCK_WIDTH,
    DEFAULT_CROSS_PIXEL_COUNT, DEFAULT_LAMBDA, DEFAULT_MULTIPLICITY,
};
use crate::steganography::{BlockSize, KjbOptions, LsbOptions, ScanOrder};
use clap::{Args, Parser, ValueEnum};
use std::path::PathBuf;

/// 一款像素域隐写命令行工具，支持 LSB、块奇偶与 KJB 三种方法，在无损格式图像 (如 PNG, BMP) 中隐藏或恢复数据。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "一款像素域隐写命令行工具，支持 LSB、块奇偶与 KJB 三种方法，在无损格式图像 (如 PNG, BMP) 中隐藏或恢复数据。"
)]
pub struct Cli {
    /// 输出调试日志 (也可以通过 RUST_LOG 环境变量控制)。
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令：hide (隐藏) 和 recover (恢复)。
#[derive(Parser, Debug)]
pub enum Commands {
    /// 在无损格式图像 (如 PNG, BMP) 中隐藏文件内容。
    Hide(HideArgs),

    /// 从经过隐写的图像中恢复隐藏的数据。
    Recover(RecoverArgs),
}

/// 隐写方法。
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Method {
    /// 最低有效位替换。
    #[default]
    Lsb,
    /// 块奇偶校验。
    Block,
    /// KJB 亮度比例嵌入。
    Kjb,
}

/// 各隐写方法的参数，提取时必须与隐藏时保持一致。
#[derive(Args, Debug, Clone)]
pub struct SchemeArgs {
    /// 使用的隐写方法。
    #[arg(short, long, value_enum, default_value_t = Method::Lsb)]
    pub method: Method,

    /// [lsb] 每个颜色通道使用的最低有效位数 (1-7)。
    #[arg(long, default_value_t = DEFAULT_BITS_PER_CHANNEL)]
    pub bits: u8,

    /// [lsb] 改为按列遍历，并以该值为步长跳过像素。
    #[arg(long)]
    pub column_stride: Option<usize>,

    /// [block] 块宽度 (像素)。
    #[arg(long, default_value_t = DEFAULT_BLOCK_WIDTH)]
    pub block_width: usize,

    /// [block] 块高度 (像素)。
    #[arg(long, default_value_t = DEFAULT_BLOCK_HEIGHT)]
    pub block_height: usize,

    /// [kjb] 嵌入强度。
    #[arg(long, default_value_t = DEFAULT_LAMBDA)]
    pub lambda: f64,

    /// [kjb] 十字邻域的臂长。
    #[arg(long, default_value_t = DEFAULT_CROSS_PIXEL_COUNT)]
    pub cross: usize,

    /// [kjb] 消息重复次数，提取时按位多数表决。
    #[arg(long, default_value_t = DEFAULT_MULTIPLICITY)]
    pub multiplicity: usize,
}

impl Default for SchemeArgs {
    fn default() -> Self {
        Self {
            method: Method::default(),
            bits: DEFAULT_BITS_PER_CHANNEL,
            column_stride: None,
            block_width: DEFAULT_BLOCK_WIDTH,
            block_height: DEFAULT_BLOCK_HEIGHT,
            lambda: DEFAULT_LAMBDA,
            cross: DEFAULT_CROSS_PIXEL_COUNT,
            multiplicity: DEFAULT_MULTIPLICITY,
        }
    }
}

impl SchemeArgs {
    pub fn lsb_options(&self) -> LsbOptions {
        let order = match self.column_stride {
            Some(stride) => ScanOrder::ColumnMajor { stride },
            None => ScanOrder::RowMajor,
        };
        LsbOptions::new(self.bits).with_order(order)
    }

    pub fn block_size(&self) -> BlockSize {
        BlockSize::new(self.block_width, self.block_height)
    }

    pub fn kjb_options(&self) -> KjbOptions {
        KjbOptions {
            lambda: self.lambda,
            cross_pixel_count: self.cross,
            multiplicity: self.multiplicity,
        }
    }
}

/// 'hide' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct HideArgs {
    /// 用于隐写的输入图像文件路径 (如 PNG, BMP)。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 要隐藏的内容的文件路径。
    #[arg(short, long)]
    pub text: PathBuf,

    /// 隐写完成后，保存结果图像的输出路径。默认为输入图像旁的 `doctored_<文件名>`。
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    /// 输出文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,

    #[command(flatten)]
    pub scheme: SchemeArgs,
}

/// 'recover' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct RecoverArgs {
    /// 已隐藏数据的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 隐藏数据的字节数。消息本身不携带长度，必须由调用方提供。
    #[arg(short, long)]
    pub length: usize,

    /// 恢复数据后，保存内容的输出路径。默认为图像旁的 `recovered_<文件名>.txt`。
    #[arg(short, long)]
    pub text: Option<PathBuf>,

    /// 输出文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,

    #[command(flatten)]
    pub scheme: SchemeArgs,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn recover_parses_kjb_parameters() {
        let cli = Cli::try_parse_from([
            "pixel_hide", "recover", "-i", "in.png", "-l", "8", "-m", "kjb", "--multiplicity", "10",
        ])
        .unwrap();

        let Commands::Recover(args) = cli.command else {
            panic!("expected the recover subcommand");
        };
        assert_eq!(args.length, 8);
        assert_eq!(args.scheme.method, Method::Kjb);
        assert_eq!(args.scheme.kjb_options().multiplicity, 10);
        assert_eq!(args.scheme.kjb_options().cross_pixel_count, 2);
    }
}
