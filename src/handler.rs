//! # 命令处理逻辑模块
//!
//! 包含处理 `encode` 和 `decode` 子命令的高级业务逻辑。
//! 本模块负责协调文件 I/O、调用核心编解码函数以及向用户报告结果。

use crate::chunk::join;
use crate::cli::{DecodeArgs, EncodeArgs};
use crate::codec::Codec;
use crate::config::CodecConfig;
use crate::constants::TEXT_INPUT_STEM;
use crate::error::CodecError;
use crate::naming::{
    default_decoded_path, encoded_file_name, order_by_chunk_index, stale_chunk_paths,
};
use crate::raster::{load_grid, save_grid};
use anyhow::{Context, Result};
use colored::Colorize;
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// 待编码的输入内容，以及产物的默认命名信息。
struct EncodeInput {
    bytes: Vec<u8>,
    stem: String,
    default_dir: PathBuf,
}

/// 解析 `--text` 或 `--file`。直接输入的文本优先。
fn read_input(args: &EncodeArgs) -> Result<EncodeInput> {
    if let Some(text) = args.text.as_deref().filter(|t| !t.is_empty()) {
        return Ok(EncodeInput {
            bytes: text.as_bytes().to_vec(),
            stem: TEXT_INPUT_STEM.to_string(),
            default_dir: PathBuf::from("."),
        });
    }

    let Some(path) = args.file.as_deref() else {
        return Err(CodecError::EmptyInput.into());
    };

    let bytes = fs::read(path).with_context(|| {
        format!(
            "Unable to read text file: {}",
            path.to_string_lossy().red().bold()
        )
    })?;

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| TEXT_INPUT_STEM.to_string());

    let default_dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    Ok(EncodeInput {
        bytes,
        stem,
        default_dir,
    })
}

/// 在写入前检查输出文件是否已存在。
fn ensure_writable(path: &Path, force: bool) -> Result<()> {
    anyhow::ensure!(
        force || !path.exists(),
        "Output file already exists: {}\nUse --force to overwrite it.",
        path.to_string_lossy().red().bold()
    );
    Ok(())
}

/// 处理 'Encode' 命令的执行逻辑。
///
/// 读取输入文本、按 `max_side^2` 字节切分、将每个分块编码为灰度图像，
/// 并以 `<名称>_encoded_<序号>` 命名保存。所有输出路径在写入任何文件前统一检查。
///
/// # Arguments
///
/// * `args` - 包含输入与输出选项的 `EncodeArgs` 结构体。
///
/// # Returns
///
/// 按分块顺序排列的图像路径。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 没有提供输入，或输入内容为空 ([`CodecError::EmptyInput`])。
/// * 无法读取输入文件。
/// * 输出文件已存在且未指定 `--force`。
/// * 无法创建输出目录或写入图像。
pub fn handle_encode(args: EncodeArgs) -> Result<Vec<PathBuf>> {
    let input = read_input(&args)?;
    if input.bytes.is_empty() {
        return Err(CodecError::EmptyInput.into());
    }

    let config = CodecConfig::new(args.max_side)?;
    let codec = Codec::new(config);
    let out_dir = args.out_dir.clone().unwrap_or(input.default_dir);

    info!(
        "Encoding {} bytes in chunks of up to {} bytes",
        input.bytes.len(),
        config.chunk_size()
    );

    let grids = codec.encode_all(&input.bytes);

    let paths: Vec<PathBuf> = (1..=grids.len())
        .map(|index| out_dir.join(encoded_file_name(&input.stem, index, args.format)))
        .collect();

    paths
        .iter()
        .try_for_each(|path| ensure_writable(path, args.force))?;

    fs::create_dir_all(&out_dir).with_context(|| {
        format!(
            "Unable to create output directory: {}",
            out_dir.to_string_lossy().red().bold()
        )
    })?;

    grids
        .iter()
        .zip(&paths)
        .enumerate()
        .try_for_each(|(i, (grid, path))| {
            debug!(
                "Chunk {} -> {}x{} grid at {}",
                i + 1,
                grid.width(),
                grid.height(),
                path.display()
            );
            save_grid(path, grid, args.format).with_context(|| {
                format!(
                    "Failed to save chunk {} of {}.",
                    (i + 1).to_string().red().bold(),
                    grids.len().to_string().green()
                )
            })
        })?;

    // 旧的多余分块会被解码时的通配输入一并读入
    for stale in stale_chunk_paths(&out_dir, &input.stem, grids.len()) {
        warn!(
            "Leftover chunk from an earlier encode: {} (not part of this output)",
            stale.display()
        );
    }

    println!(
        "The text has been encoded into {} image(s):",
        paths.len().to_string().green().bold()
    );
    for path in &paths {
        println!("  {}", path.to_string_lossy().green().bold());
    }

    Ok(paths)
}

/// 处理 'Decode' 命令的执行逻辑。
///
/// 按文件名中的分块序号排序输入图像，逐张解码并按顺序拼接，
/// 最后将还原的文本写入目标文件。任意一张图像无法读取时整批中止。
///
/// # Arguments
///
/// * `args` - 包含输入图像与输出路径的 `DecodeArgs` 结构体。
///
/// # Returns
///
/// 还原文本的保存路径。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 没有提供任何图像 ([`CodecError::EmptyInput`])。
/// * 输出文件已存在且未指定 `--force`。
/// * 任意一张图像无法解析为 8 位灰度网格 ([`CodecError::UnreadableImage`])。
/// * 无法写入目标文本文件。
pub fn handle_decode(args: DecodeArgs) -> Result<PathBuf> {
    let mut images = args.images;
    order_by_chunk_index(&mut images);

    let Some(first) = images.first() else {
        return Err(CodecError::EmptyInput.into());
    };

    let output = args.output.unwrap_or_else(|| default_decoded_path(first));
    ensure_writable(&output, args.force)?;

    let codec = Codec::default();

    let chunks = images
        .iter()
        .map(|path| {
            let grid = load_grid(path).with_context(|| {
                format!(
                    "Failed to decode '{}'. \nNo output has been written.",
                    path.to_string_lossy().red().bold()
                )
            })?;
            debug!(
                "Decoded {}x{} grid from {}",
                grid.width(),
                grid.height(),
                path.display()
            );
            Ok(codec.decode(&grid))
        })
        .collect::<Result<Vec<Vec<u8>>>>()?;

    let text = join(chunks);
    info!("Recovered {} bytes from {} image(s)", text.len(), images.len());

    fs::write(&output, text).with_context(|| {
        format!(
            "Unable to write to target text file: {}",
            output.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "The text has been successfully decoded and saved: {}",
        output.to_string_lossy().green().bold()
    );

    Ok(output)
}
