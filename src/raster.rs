//! # 图像读写模块
//!
//! 在 [`PixelGrid`] 与无损单通道图像之间转换，提供文件与内存缓冲区两种接口。
//! 接受 8 位灰度 (L8) 图像；BMP、WebP、QOI 等解码为 RGB(A) 的格式，
//! 只要每个像素 R=G=B 且不透明，同样视为灰度网格。其他图像一律视为无法读取。

use crate::codec::PixelGrid;
use crate::error::CodecError;
use clap::ValueEnum;
use image::{ColorType, DynamicImage, GrayImage, ImageFormat};
use std::io::Cursor;
use std::path::Path;

/// 编码产物使用的无损图像格式。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Png,
    Tiff,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Tiff => "tiff",
        }
    }

    fn image_format(self) -> ImageFormat {
        match self {
            OutputFormat::Png => ImageFormat::Png,
            OutputFormat::Tiff => ImageFormat::Tiff,
        }
    }
}

impl From<PixelGrid> for GrayImage {
    fn from(grid: PixelGrid) -> Self {
        let mut img = GrayImage::new(grid.width(), grid.height());
        img.copy_from_slice(grid.pixels());
        img
    }
}

impl From<GrayImage> for PixelGrid {
    fn from(img: GrayImage) -> Self {
        let (width, height) = img.dimensions();
        PixelGrid::from_raw_unchecked(width, height, img.into_raw())
    }
}

/// 取出每个像素的第一个通道，要求 R=G=B 且 alpha (如有) 为 255。
fn gray_from_channels(
    raw: &[u8],
    channels: usize,
    (width, height): (u32, u32),
    color: ColorType,
) -> Result<PixelGrid, String> {
    let is_gray = |px: &[u8]| {
        px[0] == px[1] && px[1] == px[2] && px.get(3).is_none_or(|&a| a == u8::MAX)
    };

    if !raw.chunks_exact(channels).all(is_gray) {
        return Err(format!(
            "expected 8-bit grayscale, found {color:?} with non-gray pixels"
        ));
    }

    let pixels = raw.chunks_exact(channels).map(|px| px[0]).collect();
    Ok(PixelGrid::from_raw_unchecked(width, height, pixels))
}

/// 接受 L8 图像，以及所有像素均为灰色的 8 位 RGB / RGBA 图像。
fn grid_from_image(img: DynamicImage) -> Result<PixelGrid, String> {
    match img {
        DynamicImage::ImageLuma8(gray) => Ok(gray.into()),
        DynamicImage::ImageRgb8(rgb) => {
            gray_from_channels(rgb.as_raw(), 3, rgb.dimensions(), ColorType::Rgb8)
        }
        DynamicImage::ImageRgba8(rgba) => {
            gray_from_channels(rgba.as_raw(), 4, rgba.dimensions(), ColorType::Rgba8)
        }
        other => Err(format!(
            "expected 8-bit grayscale (L8), found {:?}",
            other.color()
        )),
    }
}

/// 将网格编码为内存中的图像文件内容。
///
/// # Errors
///
/// 图像编码器失败时返回 [`CodecError::WriteFailed`]，`path` 为空。
pub fn encode_image(grid: &PixelGrid, format: OutputFormat) -> Result<Vec<u8>, CodecError> {
    let img: GrayImage = grid.clone().into();
    let mut buffer = Cursor::new(Vec::new());
    img.write_to(&mut buffer, format.image_format())
        .map_err(|e| CodecError::WriteFailed {
            path: Default::default(),
            reason: e.to_string(),
        })?;
    Ok(buffer.into_inner())
}

/// 从内存中的图像文件内容解析网格，格式由文件头自动识别。
///
/// # Errors
///
/// 内容无法解析或不是灰度图像时返回 [`CodecError::UnreadableImage`]，`path` 为空。
pub fn decode_image(bytes: &[u8]) -> Result<PixelGrid, CodecError> {
    image::load_from_memory(bytes)
        .map_err(|e| e.to_string())
        .and_then(grid_from_image)
        .map_err(|reason| CodecError::UnreadableImage {
            path: Default::default(),
            reason,
        })
}

/// 将网格保存为图像文件。
///
/// # Errors
///
/// 写入失败时返回 [`CodecError::WriteFailed`]。
pub fn save_grid(path: &Path, grid: &PixelGrid, format: OutputFormat) -> Result<(), CodecError> {
    let img: GrayImage = grid.clone().into();
    img.save_with_format(path, format.image_format())
        .map_err(|e| CodecError::WriteFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
}

/// 读取图像文件并转换为网格。
///
/// # Errors
///
/// 文件无法打开、无法解析或不是灰度图像时返回 [`CodecError::UnreadableImage`]。
pub fn load_grid(path: &Path) -> Result<PixelGrid, CodecError> {
    image::open(path)
        .map_err(|e| e.to_string())
        .and_then(grid_from_image)
        .map_err(|reason| CodecError::UnreadableImage {
            path: path.to_path_buf(),
            reason,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::Codec;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};

    fn write_in(img: &DynamicImage, format: ImageFormat) -> Vec<u8> {
        let mut buffer = Cursor::new(Vec::new());
        img.write_to(&mut buffer, format).unwrap();
        buffer.into_inner()
    }

    #[test]
    fn test_png_buffer_preserves_pixels() {
        let codec = Codec::default();
        let grid = codec.encode("Grüße, pixels!".as_bytes());

        let png = encode_image(&grid, OutputFormat::Png).unwrap();
        assert_eq!(&png[1..4], b"PNG");

        let restored = decode_image(&png).unwrap();
        assert_eq!(restored, grid);
    }

    #[test]
    fn test_tiff_buffer_preserves_pixels() {
        let grid = Codec::default().encode(&[1, 0, 255, 128, 42]);
        let tiff = encode_image(&grid, OutputFormat::Tiff).unwrap();
        assert_eq!(decode_image(&tiff).unwrap(), grid);
    }

    #[test]
    fn test_rgb_image_rejected() {
        let img = RgbImage::from_pixel(2, 2, Rgb([10, 20, 30]));
        let mut buffer = Cursor::new(Vec::new());
        img.write_to(&mut buffer, ImageFormat::Png).unwrap();

        let result = decode_image(&buffer.into_inner());
        match result {
            Err(CodecError::UnreadableImage { reason, .. }) => assert!(reason.contains("Rgb8")),
            other => panic!("expected UnreadableImage, got {other:?}"),
        }
    }

    #[test]
    fn test_grayscale_bmp_is_readable() {
        let gray = GrayImage::from_raw(2, 1, vec![65, 66]).unwrap();
        let bmp = write_in(&DynamicImage::ImageLuma8(gray), ImageFormat::Bmp);

        let grid = decode_image(&bmp).unwrap();
        assert_eq!((grid.width(), grid.height()), (2, 1));
        assert_eq!(Codec::default().decode(&grid), b"AB");
    }

    #[test]
    fn test_gray_rgb_qoi_is_readable() {
        let rgb = RgbImage::from_fn(3, 2, |x, y| {
            let v = (10 * (x + 3 * y) + 1) as u8;
            Rgb([v, v, v])
        });
        let qoi = write_in(&DynamicImage::ImageRgb8(rgb), ImageFormat::Qoi);

        let grid = decode_image(&qoi).unwrap();
        assert_eq!(grid.pixels(), &[1, 11, 21, 31, 41, 51]);
    }

    #[test]
    fn test_translucent_rgba_rejected() {
        let rgba = RgbaImage::from_pixel(2, 2, Rgba([7, 7, 7, 128]));
        let png = write_in(&DynamicImage::ImageRgba8(rgba), ImageFormat::Png);

        assert!(matches!(
            decode_image(&png),
            Err(CodecError::UnreadableImage { .. })
        ));
    }

    #[test]
    fn test_opaque_gray_rgba_accepted() {
        let rgba = RgbaImage::from_pixel(1, 2, Rgba([42, 42, 42, 255]));
        let png = write_in(&DynamicImage::ImageRgba8(rgba), ImageFormat::Png);

        assert_eq!(decode_image(&png).unwrap().pixels(), &[42, 42]);
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(matches!(
            decode_image(b"definitely not an image"),
            Err(CodecError::UnreadableImage { .. })
        ));
    }

    #[test]
    fn test_gray_image_conversion() {
        let grid = PixelGrid::from_raw(3, 1, vec![5, 6, 7]).unwrap();
        let img: GrayImage = grid.clone().into();
        assert_eq!(img.get_pixel(2, 0).0, [7]);
        assert_eq!(PixelGrid::from(img), grid);
    }

    #[test]
    fn test_gray_image_keeps_pixels_and_shape() {
        let img = GrayImage::from_fn(2, 3, |x, y| image::Luma([(1 + x + 2 * y) as u8]));
        let grid = PixelGrid::from(img);

        assert_eq!((grid.width(), grid.height()), (2, 3));
        assert_eq!(grid.pixels(), &[1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_extension() {
        assert_eq!(OutputFormat::Png.extension(), "png");
        assert_eq!(OutputFormat::Tiff.extension(), "tiff");
    }
}
