//! Frame buffers are the render targets of draw calls. Every frame buffer other than the
//! main one is backed by textures, one per attachment point.

use crate::math::prelude::Vector2;
use crate::utils::handle::Handle;
use crate::video::errors::{Error, Result};

use super::texture::{PixelFormat, TextureFilter, TextureWrap};

impl_handle!(FrameBufferHandle);

impl FrameBufferHandle {
    /// The default frame buffer provided by the window system. Its id is reserved and it
    /// could never be destroyed.
    pub const MAIN: FrameBufferHandle = FrameBufferHandle(Handle::new(0));

    #[inline]
    pub fn is_main(self) -> bool {
        self == FrameBufferHandle::MAIN
    }
}

/// The attachment points of a frame buffer.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum Attachment {
    Color(u8),
    Depth,
    Stencil,
    DepthStencil,
}

impl Attachment {
    /// Returns true if images of `format` could be attached to this point.
    pub fn accepts(self, format: PixelFormat) -> bool {
        match self {
            Attachment::Color(_) => format.is_color(),
            Attachment::Depth => format.is_depth(),
            Attachment::Stencil | Attachment::DepthStencil => format.is_stencil(),
        }
    }
}

/// The description of a texture which backs an attachment of frame buffer.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub struct RenderTextureDesc {
    pub attachment: Attachment,
    pub format: PixelFormat,
    pub wrap: TextureWrap,
    pub filter: TextureFilter,
    pub dimensions: Vector2<u32>,
}

impl RenderTextureDesc {
    pub fn new(attachment: Attachment, format: PixelFormat, dimensions: Vector2<u32>) -> Self {
        RenderTextureDesc {
            attachment,
            format,
            wrap: TextureWrap::Clamp,
            filter: TextureFilter::Linear,
            dimensions,
        }
    }
}

/// Checks that the attachments are compatible with each other.
pub fn validate(descs: &[RenderTextureDesc]) -> Result<()> {
    if descs.is_empty() {
        return Err(Error::FrameBufferInvalid("no attachments".into()));
    }

    for (i, desc) in descs.iter().enumerate() {
        if !desc.attachment.accepts(desc.format) {
            return Err(Error::FrameBufferInvalid(format!(
                "{:?} could not be attached to {:?}",
                desc.format, desc.attachment
            )));
        }

        if desc.dimensions != descs[0].dimensions {
            return Err(Error::FrameBufferInvalid(
                "attachments have different dimensions".into(),
            ));
        }

        if descs[..i].iter().any(|v| v.attachment == desc.attachment) {
            return Err(Error::FrameBufferInvalid(format!(
                "{:?} is attached twice",
                desc.attachment
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn main() {
        assert!(FrameBufferHandle::MAIN.is_valid());
        assert!(FrameBufferHandle::MAIN.is_main());
        assert!(!FrameBufferHandle::new(1).is_main());
        assert!(!FrameBufferHandle::INVALID.is_main());
    }

    #[test]
    fn attachments() {
        let dimensions = Vector2::new(128, 128);
        let color = RenderTextureDesc::new(Attachment::Color(0), PixelFormat::RGBA8, dimensions);
        let depth = RenderTextureDesc::new(Attachment::Depth, PixelFormat::Depth24, dimensions);

        assert!(validate(&[]).is_err());
        assert!(validate(&[color, depth]).is_ok());
        assert!(validate(&[color, color]).is_err());

        let mut invalid = depth;
        invalid.format = PixelFormat::RGB8;
        assert!(validate(&[color, invalid]).is_err());

        let mut smaller = depth;
        smaller.dimensions = Vector2::new(64, 64);
        assert!(validate(&[color, smaller]).is_err());
    }
}
