#![allow(dead_code)]

use std::path::{Path, PathBuf};

/// Write a small SVG drawing of the given size
pub fn write_svg(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    let markup = format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}"><rect width="{w}" height="{h}" fill="#3366cc"/></svg>"##,
        w = width,
        h = height
    );
    std::fs::write(&path, markup).unwrap();
    path
}

/// Write a solid PNG of the given pixel size
pub fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    image::RgbImage::from_pixel(width, height, image::Rgb([200, 40, 40]))
        .save(&path)
        .unwrap();
    path
}

/// Write bytes that no decoder accepts
pub fn write_garbage(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, b"definitely not an image").unwrap();
    path
}
