//! # 分块与拼接
//!
//! 将完整输入切分为固定大小的连续分块，解码时按相同顺序拼接还原。

use std::num::NonZeroUsize;

/// 按 `chunk_size` 将字节序列切分为连续、不重叠的分块。
///
/// 除最后一块外，每块长度都等于 `chunk_size`。空输入不产生任何分块。
pub fn split(bytes: &[u8], chunk_size: NonZeroUsize) -> impl Iterator<Item = &[u8]> {
    bytes.chunks(chunk_size.get())
}

/// 按给定顺序拼接分块。
pub fn join<I>(chunks: I) -> Vec<u8>
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    chunks.into_iter().fold(Vec::new(), |mut joined, chunk| {
        joined.extend_from_slice(chunk.as_ref());
        joined
    })
}
