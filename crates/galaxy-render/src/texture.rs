//! Image decoding and 2D texture upload.

use std::path::{Path, PathBuf};

/// Bytes per RGBA8 texel.
const BYTES_PER_PIXEL: u32 = 4;

/// Texture decoding and upload failures. None of these are fatal for the
/// viewer: the caller keeps whatever texture it already has.
#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    /// The image file could not be opened or decoded.
    #[error("failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Width or height is zero.
    #[error("texture dimensions must be non-zero, got {width}x{height}")]
    ZeroDimensions { width: u32, height: u32 },

    /// Pixel data length doesn't match `width * height * 4`.
    #[error("texture data size ({actual}) does not match expected ({expected}) for {width}x{height}")]
    DataSizeMismatch {
        actual: usize,
        expected: usize,
        width: u32,
        height: u32,
    },
}

/// Decoded RGBA8 pixels in sRGB, rows top to bottom.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Decode an image file into RGBA8, downscaling (aspect preserved) so
/// neither side exceeds `max_dimension`.
pub fn decode_rgba8(path: &Path, max_dimension: u32) -> Result<DecodedImage, TextureError> {
    let mut img = image::open(path).map_err(|source| TextureError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    if img.width() > max_dimension || img.height() > max_dimension {
        log::info!(
            "Downscaling {} from {}x{} to fit {max_dimension}",
            path.display(),
            img.width(),
            img.height()
        );
        img = img.resize(
            max_dimension,
            max_dimension,
            image::imageops::FilterType::Triangle,
        );
    }

    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    validate(rgba.as_raw(), width, height)?;
    Ok(DecodedImage {
        width,
        height,
        pixels: rgba.into_raw(),
    })
}

fn validate(data: &[u8], width: u32, height: u32) -> Result<(), TextureError> {
    if width == 0 || height == 0 {
        return Err(TextureError::ZeroDimensions { width, height });
    }
    let expected = (width * height * BYTES_PER_PIXEL) as usize;
    if data.len() != expected {
        return Err(TextureError::DataSizeMismatch {
            actual: data.len(),
            expected,
            width,
            height,
        });
    }
    Ok(())
}

/// An uploaded sRGB texture with its default view.
pub struct GpuTexture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub dimensions: (u32, u32),
}

impl GpuTexture {
    pub const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

    /// Upload RGBA8 sRGB pixels.
    pub fn from_rgba8(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        label: &str,
        data: &[u8],
        width: u32,
        height: u32,
    ) -> Result<Self, TextureError> {
        validate(data, width, height)?;

        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::FORMAT,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            data,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(width * BYTES_PER_PIXEL),
                rows_per_image: Some(height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        log::info!("Created texture '{label}' ({width}x{height})");

        Ok(Self {
            texture,
            view,
            dimensions: (width, height),
        })
    }

    /// Upload a decoded image.
    pub fn from_image(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        label: &str,
        image: &DecodedImage,
    ) -> Result<Self, TextureError> {
        Self::from_rgba8(device, queue, label, &image.pixels, image.width, image.height)
    }

    /// 1x1 opaque black stand-in used until the real image arrives.
    pub fn placeholder(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("placeholder-texture"),
            size: wgpu::Extent3d {
                width: 1,
                height: 1,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::FORMAT,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &[0, 0, 0, 255],
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(BYTES_PER_PIXEL),
                rows_per_image: Some(1),
            },
            wgpu::Extent3d {
                width: 1,
                height: 1,
                depth_or_array_layers: 1,
            },
        );
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        Self {
            texture,
            view,
            dimensions: (1, 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::create_test_device;

    fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
        let path = dir.join(name);
        let img = image::RgbaImage::from_fn(width, height, |x, y| {
            image::Rgba([(x % 256) as u8, (y % 256) as u8, 128, 255])
        });
        img.save(&path).unwrap();
        path
    }

    #[test]
    fn test_decode_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_png(dir.path(), "stars.png", 4, 2);
        let decoded = decode_rgba8(&path, 8192).unwrap();
        assert_eq!((decoded.width, decoded.height), (4, 2));
        assert_eq!(decoded.pixels.len(), 4 * 2 * 4);
        // Pixel (1, 1): red = x, green = y.
        assert_eq!(&decoded.pixels[(4 + 1) * 4..(4 + 1) * 4 + 4], &[1, 1, 128, 255]);
    }

    #[test]
    fn test_decode_downscales_to_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_png(dir.path(), "wide.png", 64, 32);
        let decoded = decode_rgba8(&path, 16).unwrap();
        assert_eq!((decoded.width, decoded.height), (16, 8));
        assert_eq!(decoded.pixels.len(), 16 * 8 * 4);
    }

    #[test]
    fn test_missing_file_is_decode_error() {
        let err = decode_rgba8(Path::new("/definitely/not/here.jpg"), 1024).unwrap_err();
        assert!(matches!(err, TextureError::Decode { .. }));
        assert!(err.to_string().contains("/definitely/not/here.jpg"));
    }

    #[test]
    fn test_validate_rejects_bad_sizes() {
        assert!(matches!(
            validate(&[], 0, 4),
            Err(TextureError::ZeroDimensions { width: 0, height: 4 })
        ));
        assert!(matches!(
            validate(&[0; 15], 2, 2),
            Err(TextureError::DataSizeMismatch {
                actual: 15,
                expected: 16,
                ..
            })
        ));
        assert!(validate(&[0; 16], 2, 2).is_ok());
    }

    #[test]
    fn test_upload_texture() {
        let Some((device, queue)) = create_test_device() else {
            return;
        };
        let texture = GpuTexture::from_rgba8(&device, &queue, "test", &[255; 16], 2, 2).unwrap();
        assert_eq!(texture.dimensions, (2, 2));
        assert_eq!(GpuTexture::placeholder(&device, &queue).dimensions, (1, 1));
    }
}
