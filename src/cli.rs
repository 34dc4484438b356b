//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构，包括子命令和参数。
//! 所有用户通过命令行与程序交互的入口点都在此模块中定义。

use crate::constants::MAX_SIDE;
use crate::raster::OutputFormat;
use clap::{ArgAction, Args, Parser};
use std::path::PathBuf;

/// 将文本无损编码为一张或多张灰度图像，或从这些图像中还原文本。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "将文本无损编码为一张或多张灰度图像 (每个像素保存一个字节)，或从这些图像中还原文本。"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 输出更多日志，可重复使用 (-v, -vv, -vvv)。
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// 只输出错误日志。
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// 可用的子命令：encode (编码) 和 decode (解码)。
#[derive(Parser, Debug)]
pub enum Commands {
    /// 将文本或文本文件编码为灰度图像。
    Encode(EncodeArgs),

    /// 将编码图像还原为文本文件。
    Decode(DecodeArgs),
}

/// 'encode' 命令所需的参数。
#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// 直接输入要编码的文本。
    #[arg(short, long, conflicts_with = "file")]
    pub text: Option<String>,

    /// 要编码的文本文件路径。
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// 保存编码图像的目录。默认为输入文件所在目录，直接输入文本时为当前目录。
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,

    /// 图像宽度和高度的上限，同时决定每个分块的大小 (边长的平方)。
    #[arg(short, long, default_value_t = MAX_SIDE, value_parser = clap::value_parser!(u32).range(1..=65535))]
    pub max_side: u32,

    /// 输出图像格式。
    #[arg(long, value_enum, default_value_t = OutputFormat::Png)]
    pub format: OutputFormat,

    /// 覆盖已存在的输出文件。
    #[arg(long)]
    pub force: bool,
}

/// 'decode' 命令所需的参数。
#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// 编码图像的路径，按文件名中的分块序号排序后解码。
    #[arg(required = true, num_args = 1..)]
    pub images: Vec<PathBuf>,

    /// 保存还原文本的路径。默认为第一张图像旁的 `decoded_<名称>.txt`。
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// 覆盖已存在的输出文件。
    #[arg(long)]
    pub force: bool,
}
