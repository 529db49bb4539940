use std::io::Cursor;
use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TextureError {
    #[error("texture read error: {0}")]
    Read(#[from] std::io::Error),
    #[error("texture decode error: {0}")]
    Decode(#[from] image::ImageError),
    #[error("texture has no pixels")]
    Empty,
}

/// Equirectangular RGB image of the Earth surface.
#[derive(Clone)]
pub struct EarthTexture {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 3]>,
}

impl EarthTexture {
    pub fn load_from_path(path: &Path) -> Result<Self, TextureError> {
        let bytes = std::fs::read(path)?;
        let texture = Self::from_bytes(&bytes)?;
        log::info!(
            "Loaded Earth texture {} ({}x{})",
            path.display(),
            texture.width,
            texture.height
        );
        Ok(texture)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TextureError> {
        let img = image::ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()?
            .decode()?
            .to_rgb8();
        if img.width() == 0 || img.height() == 0 {
            return Err(TextureError::Empty);
        }
        let width = img.width();
        let height = img.height();
        let pixels = img.pixels().map(|p| p.0).collect();
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// `u` runs west to east, `v` north to south, both in 0..=1.
    pub fn sample(&self, u: f64, v: f64) -> [u8; 3] {
        let x = ((u.clamp(0.0, 1.0) * self.width as f64) as u32).min(self.width - 1);
        let y = ((v.clamp(0.0, 1.0) * self.height as f64) as u32).min(self.height - 1);
        self.pixels[(y * self.width + x) as usize]
    }
}

#[cfg(test)]
impl EarthTexture {
    pub fn solid(width: u32, height: u32, rgb: [u8; 3]) -> Self {
        Self {
            width,
            height,
            pixels: vec![rgb; (width * height) as usize],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_png_and_sample_corners() {
        let mut img = image::RgbImage::new(2, 2);
        img.put_pixel(0, 0, image::Rgb([255, 0, 0]));
        img.put_pixel(1, 0, image::Rgb([0, 255, 0]));
        img.put_pixel(0, 1, image::Rgb([0, 0, 255]));
        img.put_pixel(1, 1, image::Rgb([9, 9, 9]));

        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();

        let texture = EarthTexture::from_bytes(&bytes).unwrap();
        assert_eq!(texture.sample(0.0, 0.0), [255, 0, 0]);
        assert_eq!(texture.sample(1.0, 0.0), [0, 255, 0]);
        assert_eq!(texture.sample(0.0, 1.0), [0, 0, 255]);
        assert_eq!(texture.sample(1.0, 1.0), [9, 9, 9]);
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(EarthTexture::from_bytes(b"not an image").is_err());
    }
}
