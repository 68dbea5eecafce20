use std::sync::Arc;

use image::{DynamicImage, ImageFormat, RgbaImage};
use url::Url;

use crate::{catalog::City, error::Error};

pub const DEFAULT_BASE_URL: &str = "https://example.com/";

const IMAGE_EXTENSION: &str = "jpg";

/// Where city pictures are hosted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageSource {
    base: Url,
}

impl ImageSource {
    pub fn new(base: Url) -> Result<Self, Error> {
        if base.cannot_be_a_base() {
            return Err(Error::InvalidUrl(base.to_string()));
        }
        Ok(Self { base })
    }

    pub fn parse(base: &str) -> Result<Self, Error> {
        Self::new(Url::parse(base)?)
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Picture location for `city`. The file name is appended as a single path
    /// segment, so characters like `/` or spaces in the name get
    /// percent-encoded.
    pub fn url_for(&self, city: &City) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .push(&format!("{city}.{IMAGE_EXTENSION}"));
        }
        url
    }
}

impl Default for ImageSource {
    fn default() -> Self {
        Self::parse(DEFAULT_BASE_URL).expect("Default image base URL is valid")
    }
}

/// Decoded picture, cropped to a circle. Pixels are non-premultiplied RGBA.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CityImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Arc<[u8]>,
}

impl From<RgbaImage> for CityImage {
    fn from(image: RgbaImage) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
            pixels: image.into_raw().into(),
        }
    }
}

pub fn decode(bytes: &[u8]) -> Result<CityImage, Error> {
    let format = match infer::get(bytes) {
        Some(kind) if kind.mime_type() == "image/jpeg" => Some(ImageFormat::Jpeg),
        Some(kind) if kind.mime_type() == "image/png" => Some(ImageFormat::Png),
        _ => None,
    };
    let image = if let Some(format) = format {
        image::load_from_memory_with_format(bytes, format)?
    } else {
        image::load_from_memory(bytes)?
    };
    Ok(circle_crop(&image).into())
}

/// Crops the centered square out of `image` and clears every pixel outside of
/// its inscribed circle.
pub fn circle_crop(image: &DynamicImage) -> RgbaImage {
    let side = image.width().min(image.height());
    let left = (image.width() - side) / 2;
    let top = (image.height() - side) / 2;
    let mut square = image.crop_imm(left, top, side, side).to_rgba8();

    let radius = f64::from(side) / 2.0;
    for (x, y, pixel) in square.enumerate_pixels_mut() {
        // Measure from pixel centers.
        let dx = f64::from(x) + 0.5 - radius;
        let dy = f64::from(y) + 0.5 - radius;
        if dx * dx + dy * dy > radius * radius {
            pixel.0[3] = 0;
        }
    }
    square
}
