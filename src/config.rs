//! # 编解码配置
//!
//! 以显式值的形式传入编解码器，不使用任何全局可变状态。

use crate::constants::MAX_SIDE;
use crate::error::CodecError;
use std::num::NonZeroUsize;

/// 编解码器配置。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecConfig {
    max_side: u32,
}

impl CodecConfig {
    /// 使用指定的最大边长创建配置。
    ///
    /// # Errors
    ///
    /// `max_side` 为 0 时返回 [`CodecError::InvalidMaxSide`]。
    pub fn new(max_side: u32) -> Result<Self, CodecError> {
        if max_side == 0 {
            return Err(CodecError::InvalidMaxSide(max_side));
        }
        Ok(Self { max_side })
    }

    pub fn max_side(&self) -> u32 {
        self.max_side
    }

    /// 单个分块的最大字节数，即 `max_side * max_side`。
    pub fn chunk_size(&self) -> NonZeroUsize {
        let side = self.max_side as usize;
        NonZeroUsize::new(side.saturating_mul(side)).unwrap_or(NonZeroUsize::MIN)
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self { max_side: MAX_SIDE }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_uses_max_side() {
        let config = CodecConfig::default();
        assert_eq!(config.max_side(), 1000);
        assert_eq!(config.chunk_size().get(), 1_000_000);
    }

    #[test]
    fn test_zero_side_rejected() {
        assert!(matches!(
            CodecConfig::new(0),
            Err(CodecError::InvalidMaxSide(0))
        ));
    }

    #[test]
    fn test_custom_side() {
        let config = CodecConfig::new(4).unwrap();
        assert_eq!(config.chunk_size().get(), 16);
    }
}
