//! Immutable 2D and cube textures. A texture is a container of one or more images, and
//! can be the source of a texture access from a program.

use crate::math::prelude::Vector2;
use crate::video::errors::{Error, Result};

impl_handle!(TextureHandle);

/// The kind of a texture object.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum TextureTarget {
    Texture2D,
    CubeMap,
}

/// The six faces of a cube map.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum CubeFace {
    PositiveX,
    NegativeX,
    PositiveY,
    NegativeY,
    PositiveZ,
    NegativeZ,
}

impl CubeFace {
    pub const ALL: [CubeFace; 6] = [
        CubeFace::PositiveX,
        CubeFace::NegativeX,
        CubeFace::PositiveY,
        CubeFace::NegativeY,
        CubeFace::PositiveZ,
        CubeFace::NegativeZ,
    ];
}

/// Specify how the texture is used whenever the pixel being sampled.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum TextureFilter {
    /// Returns the value of the texture element that is nearest (in Manhattan distance)
    /// to the center of the pixel being textured.
    Nearest,
    /// Returns the weighted average of the four texture elements that are closest to the
    /// center of the pixel being textured.
    Linear,
}

/// Sets the wrap parameter for texture.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum TextureWrap {
    /// Samples at coord x + 1 map to coord x.
    Repeat,
    /// Samples at coord x + 1 map to coord 1 - x.
    Mirror,
    /// Samples at coord x + 1 map to coord 1.
    Clamp,
}

/// List of all the possible formats of the pixels stored in a texture. The depth formats
/// are only meaningful as frame buffer attachments.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum PixelFormat {
    R8,
    RG8,
    RGB8,
    RGBA8,
    R16F,
    RG16F,
    RGB16F,
    RGBA16F,
    R32F,
    RG32F,
    RGB32F,
    RGBA32F,
    Depth16,
    Depth24,
    Depth32F,
    Depth24Stencil8,
}

impl PixelFormat {
    /// Returns the number of components of this format.
    pub fn components(self) -> u8 {
        match self {
            PixelFormat::R8 | PixelFormat::R16F | PixelFormat::R32F => 1,
            PixelFormat::RG8 | PixelFormat::RG16F | PixelFormat::RG32F => 2,
            PixelFormat::RGB8 | PixelFormat::RGB16F | PixelFormat::RGB32F => 3,
            PixelFormat::RGBA8 | PixelFormat::RGBA16F | PixelFormat::RGBA32F => 4,
            PixelFormat::Depth16
            | PixelFormat::Depth24
            | PixelFormat::Depth32F
            | PixelFormat::Depth24Stencil8 => 1,
        }
    }

    /// Returns the size in bytes of a pixel of this format.
    pub fn size(self) -> u32 {
        match self {
            PixelFormat::R8 => 1,
            PixelFormat::RG8 | PixelFormat::R16F | PixelFormat::Depth16 => 2,
            PixelFormat::RGB8 | PixelFormat::Depth24 => 3,
            PixelFormat::RGBA8
            | PixelFormat::RG16F
            | PixelFormat::R32F
            | PixelFormat::Depth32F
            | PixelFormat::Depth24Stencil8 => 4,
            PixelFormat::RGB16F => 6,
            PixelFormat::RGBA16F | PixelFormat::RG32F => 8,
            PixelFormat::RGB32F => 12,
            PixelFormat::RGBA32F => 16,
        }
    }

    /// Returns the size in bytes of a pixel in host memory when uploading. Depth24
    /// pixels are uploaded as 32-bits integers.
    pub fn host_size(self) -> u32 {
        match self {
            PixelFormat::Depth24 => 4,
            _ => self.size(),
        }
    }

    #[inline]
    pub fn is_depth(self) -> bool {
        match self {
            PixelFormat::Depth16
            | PixelFormat::Depth24
            | PixelFormat::Depth32F
            | PixelFormat::Depth24Stencil8 => true,
            _ => false,
        }
    }

    #[inline]
    pub fn is_stencil(self) -> bool {
        self == PixelFormat::Depth24Stencil8
    }

    #[inline]
    pub fn is_color(self) -> bool {
        !self.is_depth()
    }
}

/// The parameters of a texture object.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub struct TextureParams {
    pub target: TextureTarget,
    /// Sets the format of pixels.
    pub format: PixelFormat,
    /// Sets the wrap parameter for texture.
    pub wrap: TextureWrap,
    /// Specify how the texture is used whenever the pixel being sampled.
    pub filter: TextureFilter,
    /// Generates the remaining mip levels after the layers are uploaded.
    pub mipmap: bool,
    /// Sets the dimensions of the base level.
    pub dimensions: Vector2<u32>,
}

impl Default for TextureParams {
    fn default() -> Self {
        TextureParams {
            target: TextureTarget::Texture2D,
            format: PixelFormat::RGBA8,
            wrap: TextureWrap::Clamp,
            filter: TextureFilter::Linear,
            mipmap: false,
            dimensions: Vector2::new(0, 0),
        }
    }
}

impl TextureParams {
    /// Checks that every layer addresses a level and face which exists in a texture
    /// described by these parameters, and that non-empty layers carry at least the
    /// bytes of a full image of their level. Extra bytes are ignored.
    pub fn validate(&self, layers: &[TextureData]) -> Result<()> {
        if self.dimensions.x == 0 || self.dimensions.y == 0 {
            return Err(Error::TextureInvalid("dimensions must be non-zero".into()));
        }

        for layer in layers {
            match (self.target, layer.face) {
                (TextureTarget::Texture2D, Some(face)) => {
                    return Err(Error::TextureInvalid(format!(
                        "2D texture layer addresses cube face {:?}",
                        face
                    )));
                }
                (TextureTarget::CubeMap, None) => {
                    return Err(Error::TextureInvalid(
                        "cube map layer does not address a face".into(),
                    ));
                }
                _ => {}
            }

            if layer.level >= self.levels() {
                return Err(Error::TextureInvalid(format!(
                    "mip level {} is out of range",
                    layer.level
                )));
            }

            if !layer.bytes.is_empty() {
                let expected = self.bytes_of(layer.level).ok_or_else(|| {
                    Error::TextureInvalid("dimensions are too large".into())
                })?;

                if (layer.bytes.len() as u64) < expected {
                    return Err(Error::TextureInvalid(format!(
                        "mip level {} has {} bytes, {} are required",
                        layer.level,
                        layer.bytes.len(),
                        expected
                    )));
                }
            }
        }

        Ok(())
    }

    /// Returns the number of levels in a complete mip chain of these dimensions.
    pub fn levels(&self) -> u32 {
        let max = self.dimensions.x.max(self.dimensions.y).max(1);
        32 - max.leading_zeros()
    }

    /// Returns the size in bytes of the host image of mip `level`.
    pub fn bytes_of(&self, level: u32) -> Option<u64> {
        let dimensions = self.dimensions_of(level);
        u64::from(dimensions.x)
            .checked_mul(u64::from(dimensions.y))?
            .checked_mul(u64::from(self.format.host_size()))
    }

    /// Returns the dimensions of mip `level`.
    pub fn dimensions_of(&self, level: u32) -> Vector2<u32> {
        Vector2::new(
            (self.dimensions.x >> level).max(1),
            (self.dimensions.y >> level).max(1),
        )
    }
}

/// One image of a texture: a mip level of the 2D image, or of a cube face.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextureData {
    pub face: Option<CubeFace>,
    pub level: u32,
    pub bytes: Vec<u8>,
}

impl TextureData {
    pub fn new(level: u32, bytes: Vec<u8>) -> Self {
        TextureData {
            face: None,
            level,
            bytes,
        }
    }

    pub fn face(face: CubeFace, level: u32, bytes: Vec<u8>) -> Self {
        TextureData {
            face: Some(face),
            level,
            bytes,
        }
    }

    /// Returns true if the host bytes has been released.
    #[inline]
    pub fn is_released(&self) -> bool {
        self.bytes.is_empty() && self.bytes.capacity() == 0
    }

    /// Releases the host bytes.
    pub fn release(&mut self) {
        self.bytes = Vec::new();
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn levels() {
        let mut params = TextureParams::default();
        params.dimensions = Vector2::new(256, 64);
        assert_eq!(params.levels(), 9);
        assert_eq!(params.dimensions_of(7), Vector2::new(2, 1));
        assert_eq!(params.dimensions_of(8), Vector2::new(1, 1));

        params.dimensions = Vector2::new(1, 1);
        assert_eq!(params.levels(), 1);
    }

    #[test]
    fn validate() {
        let mut params = TextureParams::default();
        assert!(params.validate(&[]).is_err());

        params.dimensions = Vector2::new(4, 4);
        assert!(params.validate(&[TextureData::new(0, vec![0; 64])]).is_ok());
        assert!(params.validate(&[TextureData::new(3, vec![0; 4])]).is_err());
        assert!(params
            .validate(&[TextureData::face(CubeFace::NegativeY, 0, vec![])])
            .is_err());

        params.target = TextureTarget::CubeMap;
        assert!(params.validate(&[TextureData::new(0, vec![])]).is_err());
        assert!(params
            .validate(&[TextureData::face(CubeFace::PositiveX, 0, vec![0; 63])])
            .is_err());
        let faces: Vec<_> = CubeFace::ALL
            .iter()
            .map(|&v| TextureData::face(v, 0, vec![0; 64]))
            .collect();
        assert!(params.validate(&faces).is_ok());
    }

    #[test]
    fn short_layers() {
        let mut params = TextureParams::default();
        params.dimensions = Vector2::new(256, 256);
        assert_eq!(params.bytes_of(0), Some(262_144));
        assert_eq!(params.bytes_of(8), Some(4));

        assert!(params.validate(&[TextureData::new(0, vec![0])]).is_err());
        assert!(params.validate(&[TextureData::new(0, vec![0; 262_143])]).is_err());
        assert!(params.validate(&[TextureData::new(0, vec![0; 262_144])]).is_ok());
        assert!(params.validate(&[TextureData::new(8, vec![0; 4])]).is_ok());
        assert!(params.validate(&[TextureData::new(7, vec![0; 4])]).is_err());

        // Empty layers allocate storage only.
        assert!(params.validate(&[TextureData::new(0, vec![])]).is_ok());

        params.format = PixelFormat::Depth24;
        params.dimensions = Vector2::new(2, 2);
        assert_eq!(params.bytes_of(0), Some(16));
        assert!(params.validate(&[TextureData::new(0, vec![0; 12])]).is_err());

        params.dimensions = Vector2::new(u32::max_value(), u32::max_value());
        params.format = PixelFormat::RGBA32F;
        assert!(params.validate(&[TextureData::new(0, vec![0; 16])]).is_err());
    }

    #[test]
    fn formats() {
        assert_eq!(PixelFormat::RGBA8.size(), 4);
        assert_eq!(PixelFormat::RGB32F.components(), 3);
        assert!(PixelFormat::Depth24Stencil8.is_depth());
        assert!(PixelFormat::Depth24Stencil8.is_stencil());
        assert!(PixelFormat::RG16F.is_color());
    }

    #[test]
    fn release() {
        let mut data = TextureData::new(0, vec![1, 2, 3]);
        assert!(!data.is_released());
        data.release();
        assert!(data.is_released());
    }
}
