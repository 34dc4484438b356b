//! # 编解码核心
//!
//! 字节序列与灰度像素网格之间的纯变换，不涉及任何文件系统操作。
//!
//! 采用逐字节映射到像素的格式：
//!
//! * 宽度 `s = min(ceil(sqrt(n)), max_side)`，高度 `ceil(n / s)`。
//! * 第 `i` 个字节写入 `(i / s, i % s)`，按行优先排列，剩余像素以 0 填充。
//! * 解码时按行展开并去掉末尾的 0 像素。
//!
//! 已知限制：分块末尾的 NUL 字节与填充无法区分，解码时会被丢弃。
//! 分块内部的 NUL 字节可以正常还原。

use crate::chunk::{join, split};
use crate::config::CodecConfig;

/// 8 位灰度像素网格，按行优先存储。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl PixelGrid {
    /// 创建一个全 0 的网格。
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize],
        }
    }

    /// 由原始像素数据构造网格，长度必须等于 `width * height`。
    pub fn from_raw(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        (pixels.len() == width as usize * height as usize).then_some(Self {
            width,
            height,
            pixels,
        })
    }

    /// 由长度已确定为 `width * height` 的像素数据构造网格。
    pub(crate) fn from_raw_unchecked(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(pixels.len(), width as usize * height as usize);
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// 读取 `(row, col)` 处的像素，越界时返回 `None`。
    pub fn get(&self, row: u32, col: u32) -> Option<u8> {
        if row >= self.height || col >= self.width {
            return None;
        }
        self.pixels
            .get(row as usize * self.width as usize + col as usize)
            .copied()
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.pixels
    }
}

/// 计算容纳 `len` 个字节所需的网格宽度：`ceil(sqrt(len))`，限制在 `[1, max_side]` 内。
pub fn side_length(len: usize, max_side: u32) -> usize {
    let root = len.isqrt();
    let ceil = if root * root < len { root + 1 } else { root };
    ceil.clamp(1, (max_side as usize).max(1))
}

/// 按配置执行编码与解码。
#[derive(Debug, Clone, Copy, Default)]
pub struct Codec {
    config: CodecConfig,
}

impl Codec {
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// 将一个分块编码为像素网格。
    ///
    /// 空分块得到 1×1 的全 0 网格，解码后仍为空。
    ///
    /// 调用方需保证 `chunk.len() <= max_side^2`。这里只限制宽度，
    /// 超出时高度会大于 `max_side`，不做运行时检查。
    pub fn encode(&self, chunk: &[u8]) -> PixelGrid {
        if chunk.is_empty() {
            return PixelGrid::new(1, 1);
        }

        let width = side_length(chunk.len(), self.config.max_side());
        let height = chunk.len().div_ceil(width);

        let mut pixels = vec![0u8; width * height];
        pixels[..chunk.len()].copy_from_slice(chunk);

        PixelGrid {
            width: width as u32,
            height: height as u32,
            pixels,
        }
    }

    /// 将像素网格解码为分块：按行展开后去掉末尾的 0。
    pub fn decode(&self, grid: &PixelGrid) -> Vec<u8> {
        let end = grid
            .pixels
            .iter()
            .rposition(|&p| p != 0)
            .map_or(0, |last| last + 1);
        grid.pixels[..end].to_vec()
    }

    /// 按 `chunk_size` 切分输入并逐块编码，返回顺序与分块顺序一致。
    pub fn encode_all(&self, bytes: &[u8]) -> Vec<PixelGrid> {
        split(bytes, self.config.chunk_size())
            .map(|chunk| self.encode(chunk))
            .collect()
    }

    /// 按给定顺序解码所有网格并拼接。
    pub fn decode_all<'a, I>(&self, grids: I) -> Vec<u8>
    where
        I: IntoIterator<Item = &'a PixelGrid>,
    {
        join(grids.into_iter().map(|grid| self.decode(grid)))
    }
}
