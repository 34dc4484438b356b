/// 图像宽度或高度的默认上限 (像素)。
/// 每个分块最多 `MAX_SIDE * MAX_SIDE` 字节。
pub const MAX_SIDE: u32 = 1000;

/// 编码产物文件名中位于原始文件名与分块序号之间的标记。
/// 例如 `notes_encoded_3.png`。
pub const ENCODED_MARKER: &str = "_encoded_";

/// 通过 `--text` 直接输入文本时使用的文件名主干。
pub const TEXT_INPUT_STEM: &str = "text";

/// 解码输出文件的默认前缀。
pub const DECODED_PREFIX: &str = "decoded_";

/// 解码输出文件的扩展名。
pub const DECODED_EXTENSION: &str = "txt";
