//! # 错误类型模块
//!
//! 编解码库层面的错误。命令处理层使用 `anyhow` 为其补充上下文。

use std::path::PathBuf;
use thiserror::Error;

/// 编解码过程中可能出现的错误。
///
/// 所有错误都是确定性的，重试不会改变结果。
#[derive(Debug, Error)]
pub enum CodecError {
    /// 既没有提供文本，也没有提供文件，或者提供的内容为空。
    #[error("No input supplied: provide non-empty --text or --file")]
    EmptyInput,

    /// 图像无法解析为 8 位单通道像素网格。
    #[error("Unable to read image '{}' as an 8-bit grayscale grid: {reason}", path.display())]
    UnreadableImage { path: PathBuf, reason: String },

    /// 像素网格无法写入图像文件。
    #[error("Unable to write image '{}': {reason}", path.display())]
    WriteFailed { path: PathBuf, reason: String },

    /// 最大边长必须至少为 1。
    #[error("Invalid maximum side length: {0} (must be at least 1)")]
    InvalidMaxSide(u32),
}
