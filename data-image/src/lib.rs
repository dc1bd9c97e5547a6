use std::io::Cursor;
use std::path::Path;

use data_error::{AvatarError, Result};
use image::imageops::FilterType;
use image::{GenericImageView, ImageOutputFormat};
use log::debug;

/// Side length of the square avatar the browser expects.
pub const AVATAR_DIM: u32 = 256;

/// Decode `source`, crop it to the largest centered square and
/// resample to [`AVATAR_DIM`]², returning PNG-encoded bytes.
///
/// Aspect ratio outside the crop square is discarded, there is no
/// letterboxing. The output is PNG regardless of the source format.
pub fn normalize(source: impl AsRef<Path>) -> Result<Vec<u8>> {
    let source = source.as_ref();
    let img = image::open(source).map_err(AvatarError::ImageDecode)?;

    let (width, height) = img.dimensions();
    let side = width.min(height);
    let left = (width - side) / 2;
    let top = (height - side) / 2;

    let square = img.crop_imm(left, top, side, side);
    let resized =
        square.resize_exact(AVATAR_DIM, AVATAR_DIM, FilterType::Lanczos3);

    let mut bytes = Vec::new();
    resized
        .write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)
        .map_err(|e| AvatarError::ImageProcess(e.to_string()))?;

    debug!(
        "normalized {} ({}x{}) into {} bytes of PNG",
        source.display(),
        width,
        height,
        bytes.len()
    );
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, Rgba, RgbaImage};
    use rstest::rstest;
    use std::path::PathBuf;
    use tempdir::TempDir;

    fn fixture(dir: &TempDir, width: u32, height: u32) -> PathBuf {
        let img = RgbaImage::from_pixel(width, height, Rgba([0, 0, 255, 255]));
        let path = dir.path().join("source.png");
        img.save(&path).unwrap();
        path
    }

    #[rstest]
    #[case(4000, 2000)]
    #[case(50, 80)]
    #[case(256, 256)]
    #[case(1, 1)]
    fn output_is_always_a_256_square(#[case] width: u32, #[case] height: u32) {
        let dir = TempDir::new("normalize").unwrap();
        let path = fixture(&dir, width, height);

        let bytes = normalize(&path).unwrap();

        let out = image::load_from_memory(&bytes).unwrap();
        assert_eq!(out.dimensions(), (AVATAR_DIM, AVATAR_DIM));
    }

    #[test]
    fn crop_keeps_the_source_center() {
        let dir = TempDir::new("normalize").unwrap();

        // Wide blue image with a red block around its center. The
        // centered square crop must keep the block at the output
        // center and leave the corners blue.
        let mut img =
            RgbaImage::from_pixel(400, 100, Rgba([0, 0, 255, 255]));
        for x in 190..210 {
            for y in 40..60 {
                img.put_pixel(x, y, Rgba([255, 0, 0, 255]));
            }
        }
        let path = dir.path().join("wide.png");
        img.save(&path).unwrap();

        let out = image::load_from_memory(&normalize(&path).unwrap()).unwrap();

        let center = out.get_pixel(AVATAR_DIM / 2, AVATAR_DIM / 2);
        assert!(center[0] > 200 && center[2] < 100, "center: {center:?}");
        let corner = out.get_pixel(2, 2);
        assert!(corner[2] > 200 && corner[0] < 100, "corner: {corner:?}");
    }

    #[test]
    fn undecodable_source_is_a_decode_error() {
        let dir = TempDir::new("normalize").unwrap();
        let path = dir.path().join("not-an-image.png");
        std::fs::write(&path, b"certainly not a PNG").unwrap();

        let err = normalize(&path).unwrap_err();
        assert!(matches!(err, AvatarError::ImageDecode(_)));
    }

    #[test]
    fn missing_source_is_a_decode_error() {
        let err = normalize("/no/such/file.png").unwrap_err();
        assert!(matches!(err, AvatarError::ImageDecode(_)));
    }
}
