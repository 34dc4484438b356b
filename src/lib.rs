//! # text_pixels 库
//!
//! 本库包含文本与灰度图像互相转换的核心逻辑。
//! [`codec`] 是不依赖文件系统的纯变换，其余模块负责命令行、图像读写与文件命名。

// 声明库包含的所有模块。

pub mod chunk;
pub mod cli;
pub mod codec;
pub mod config;
pub mod constants;
pub mod error;
pub mod handler;
pub mod logging;
pub mod naming;
pub mod raster;

pub use codec::{Codec, PixelGrid};
pub use config::CodecConfig;
pub use error::CodecError;
