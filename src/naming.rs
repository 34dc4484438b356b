//! # 产物命名
//!
//! 编码产物命名为 `<stem>_encoded_<index>.<ext>`，序号从 1 开始。
//! 分块顺序只记录在文件名中，解码时据此恢复顺序。

use crate::constants::{DECODED_EXTENSION, DECODED_PREFIX, ENCODED_MARKER};
use crate::raster::OutputFormat;
use std::fs;
use std::path::{Path, PathBuf};

/// 第 `index` 个分块 (从 1 开始) 的产物文件名。
pub fn encoded_file_name(stem: &str, index: usize, format: OutputFormat) -> String {
    format!("{stem}{ENCODED_MARKER}{index}.{}", format.extension())
}

/// 从产物文件名中解析分块序号。
pub fn chunk_index(path: &Path) -> Option<usize> {
    let stem = path.file_stem()?.to_str()?;
    let (_, index) = stem.rsplit_once(ENCODED_MARKER)?;
    index.parse().ok()
}

/// 去掉分块后缀后的原始文件名主干。
pub fn source_stem(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    match stem.rsplit_once(ENCODED_MARKER) {
        Some((base, index)) if index.parse::<usize>().is_ok() => base.to_string(),
        _ => stem,
    }
}

/// 解码输出的默认路径：与第一张图像同目录，名为 `decoded_<stem>.txt`。
pub fn default_decoded_path(first_image: &Path) -> PathBuf {
    let name = format!(
        "{DECODED_PREFIX}{}.{DECODED_EXTENSION}",
        source_stem(first_image)
    );
    first_image.with_file_name(name)
}

/// 先按原始文件名主干分组，组内按分块序号排序 (数值顺序)。
/// 没有序号的文件排在同组末尾并按文件名排序。
pub fn order_by_chunk_index(paths: &mut [PathBuf]) {
    paths.sort_by_cached_key(|path| {
        let index = chunk_index(path);
        (
            source_stem(path),
            index.is_none(),
            index,
            path.file_name().map(|n| n.to_os_string()),
        )
    });
}

/// 查找 `dir` 中属于 `stem`、序号大于 `count` 的旧产物。
///
/// 目录不存在或无法读取时返回空列表。
pub fn stale_chunk_paths(dir: &Path, stem: &str, count: usize) -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut stale: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file())
        .filter(|path| chunk_index(path).is_some_and(|index| index > count))
        .filter(|path| source_stem(path) == stem)
        .collect();

    order_by_chunk_index(&mut stale);
    stale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoded_file_name() {
        assert_eq!(
            encoded_file_name("notes", 3, OutputFormat::Png),
            "notes_encoded_3.png"
        );
        assert_eq!(
            encoded_file_name("text", 1, OutputFormat::Tiff),
            "text_encoded_1.tiff"
        );
    }

    #[test]
    fn test_chunk_index() {
        assert_eq!(chunk_index(Path::new("dir/notes_encoded_12.png")), Some(12));
        assert_eq!(chunk_index(Path::new("my_encoded_file_encoded_2.png")), Some(2));
        assert_eq!(chunk_index(Path::new("notes.png")), None);
        assert_eq!(chunk_index(Path::new("notes_encoded_x.png")), None);
    }

    #[test]
    fn test_source_stem() {
        assert_eq!(source_stem(Path::new("a/notes_encoded_4.png")), "notes");
        assert_eq!(source_stem(Path::new("a/holiday.png")), "holiday");
    }

    #[test]
    fn test_default_decoded_path() {
        assert_eq!(
            default_decoded_path(Path::new("out/notes_encoded_1.png")),
            Path::new("out/decoded_notes.txt")
        );
    }

    #[test]
    fn test_order_is_numeric() {
        let mut paths: Vec<PathBuf> = [
            "x_encoded_10.png",
            "zzz.png",
            "x_encoded_2.png",
            "aaa.png",
            "x_encoded_1.png",
        ]
        .into_iter()
        .map(PathBuf::from)
        .collect();

        order_by_chunk_index(&mut paths);

        let names: Vec<&str> = paths.iter().filter_map(|p| p.to_str()).collect();
        assert_eq!(
            names,
            [
                "aaa.png",
                "x_encoded_1.png",
                "x_encoded_2.png",
                "x_encoded_10.png",
                "zzz.png"
            ]
        );
    }

    #[test]
    fn test_order_keeps_sources_together() {
        let mut paths: Vec<PathBuf> = [
            "b_encoded_2.png",
            "a_encoded_1.png",
            "b_encoded_1.png",
            "a_encoded_10.png",
            "a_encoded_2.png",
        ]
        .into_iter()
        .map(PathBuf::from)
        .collect();

        order_by_chunk_index(&mut paths);

        let names: Vec<&str> = paths.iter().filter_map(|p| p.to_str()).collect();
        assert_eq!(
            names,
            [
                "a_encoded_1.png",
                "a_encoded_2.png",
                "a_encoded_10.png",
                "b_encoded_1.png",
                "b_encoded_2.png"
            ]
        );
    }

    #[test]
    fn test_stale_chunk_paths() {
        let dir = tempfile::tempdir().unwrap();
        for name in [
            "notes_encoded_1.png",
            "notes_encoded_2.png",
            "notes_encoded_3.png",
            "notes_encoded_11.tiff",
            "other_encoded_5.png",
            "notes.png",
        ] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }

        let stale = stale_chunk_paths(dir.path(), "notes", 2);
        assert_eq!(
            stale,
            vec![
                dir.path().join("notes_encoded_3.png"),
                dir.path().join("notes_encoded_11.tiff"),
            ]
        );

        assert!(stale_chunk_paths(dir.path(), "notes", 11).is_empty());
        assert!(stale_chunk_paths(&dir.path().join("missing"), "notes", 0).is_empty());
    }
}
