//! The device-independent commands recorded into command buffers.
//!
//! Every command is a plain struct with public fields and a set of chainable setters, so
//! they could be configured right after being appended:
//!
//! ```rust,ignore
//! cmds.draw()
//!     .vertex_buffer(vbo)
//!     .vertex_count(3)
//!     .material(material);
//! ```

use crate::math::prelude::{Color, Rect};

use super::assets::prelude::*;
use super::errors::Result;
use super::visitor::{FrameState, Visitor};

/// Clears the color and/or depth channels of the bound frame buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClearCommand {
    pub color: Color,
    pub depth: f32,
    pub clear_color: bool,
    pub clear_depth: bool,
}

impl Default for ClearCommand {
    fn default() -> Self {
        ClearCommand {
            color: Color::black(),
            depth: 1.0,
            clear_color: false,
            clear_depth: false,
        }
    }
}

impl ClearCommand {
    #[inline]
    pub fn color(&mut self, color: Color) -> &mut Self {
        self.color = color;
        self
    }

    #[inline]
    pub fn depth(&mut self, depth: f32) -> &mut Self {
        self.depth = depth;
        self
    }

    #[inline]
    pub fn clear_color(&mut self, clear: bool) -> &mut Self {
        self.clear_color = clear;
        self
    }

    #[inline]
    pub fn clear_depth(&mut self, clear: bool) -> &mut Self {
        self.clear_depth = clear;
        self
    }
}

/// Draws primitives from a vertex buffer, optionally indexed, with a material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    pub vertex_buffer: VertexBufferHandle,
    pub vertex_offset: u32,
    pub vertex_count: u32,
    pub index_buffer: IndexBufferHandle,
    pub index_offset: u32,
    pub index_count: u32,
    pub primitive: Primitive,
    pub material: MaterialHandle,
}

impl Default for DrawCommand {
    fn default() -> Self {
        DrawCommand {
            vertex_buffer: VertexBufferHandle::INVALID,
            vertex_offset: 0,
            vertex_count: 0,
            index_buffer: IndexBufferHandle::INVALID,
            index_offset: 0,
            index_count: 0,
            primitive: Primitive::Triangles,
            material: MaterialHandle::INVALID,
        }
    }
}

impl DrawCommand {
    #[inline]
    pub fn vertex_buffer(&mut self, handle: VertexBufferHandle) -> &mut Self {
        self.vertex_buffer = handle;
        self
    }

    /// The first vertex to draw, used by non-indexed draws.
    #[inline]
    pub fn vertex_offset(&mut self, offset: u32) -> &mut Self {
        self.vertex_offset = offset;
        self
    }

    #[inline]
    pub fn vertex_count(&mut self, count: u32) -> &mut Self {
        self.vertex_count = count;
        self
    }

    #[inline]
    pub fn index_buffer(&mut self, handle: IndexBufferHandle) -> &mut Self {
        self.index_buffer = handle;
        self
    }

    /// The first index to draw, used by indexed draws.
    #[inline]
    pub fn index_offset(&mut self, offset: u32) -> &mut Self {
        self.index_offset = offset;
        self
    }

    #[inline]
    pub fn index_count(&mut self, count: u32) -> &mut Self {
        self.index_count = count;
        self
    }

    #[inline]
    pub fn primitive(&mut self, primitive: Primitive) -> &mut Self {
        self.primitive = primitive;
        self
    }

    #[inline]
    pub fn material(&mut self, handle: MaterialHandle) -> &mut Self {
        self.material = handle;
        self
    }

    /// Returns true if this draw goes through the index buffer.
    #[inline]
    pub fn is_indexed(&self) -> bool {
        self.index_buffer.is_valid()
    }

    /// Returns the number of vertices this draw assembles primitives from.
    #[inline]
    pub fn count(&self) -> u32 {
        if self.is_indexed() {
            self.index_count
        } else {
            self.vertex_count
        }
    }
}

/// Sets the viewport of the bound frame buffer.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ViewportCommand {
    pub rect: Rect,
}

impl ViewportCommand {
    #[inline]
    pub fn rect(&mut self, rect: Rect) -> &mut Self {
        self.rect = rect;
        self
    }

    #[inline]
    pub fn position(&mut self, x: i32, y: i32) -> &mut Self {
        self.rect.x = x;
        self.rect.y = y;
        self
    }

    #[inline]
    pub fn size(&mut self, width: u32, height: u32) -> &mut Self {
        self.rect.width = width;
        self.rect.height = height;
        self
    }
}

/// Sets the scissor box of the bound frame buffer. It takes effect with materials that
/// have scissor test enabled.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScissorCommand {
    pub rect: Rect,
}

impl ScissorCommand {
    #[inline]
    pub fn rect(&mut self, rect: Rect) -> &mut Self {
        self.rect = rect;
        self
    }

    #[inline]
    pub fn position(&mut self, x: i32, y: i32) -> &mut Self {
        self.rect.x = x;
        self.rect.y = y;
        self
    }

    #[inline]
    pub fn size(&mut self, width: u32, height: u32) -> &mut Self {
        self.rect.width = width;
        self.rect.height = height;
        self
    }
}

/// Uploads bytes into a vertex buffer, starting at byte `offset`.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FillVertexBufferCommand {
    pub handle: VertexBufferHandle,
    pub offset: usize,
    pub bytes: Vec<u8>,
}

impl FillVertexBufferCommand {
    #[inline]
    pub fn handle(&mut self, handle: VertexBufferHandle) -> &mut Self {
        self.handle = handle;
        self
    }

    #[inline]
    pub fn offset(&mut self, offset: usize) -> &mut Self {
        self.offset = offset;
        self
    }

    #[inline]
    pub fn data(&mut self, data: &[u8]) -> &mut Self {
        self.bytes = data.to_vec();
        self
    }

    #[inline]
    pub fn bytes(&mut self, bytes: Vec<u8>) -> &mut Self {
        self.bytes = bytes;
        self
    }
}

/// Uploads bytes into a index buffer, starting at byte `offset`.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FillIndexBufferCommand {
    pub handle: IndexBufferHandle,
    pub offset: usize,
    pub bytes: Vec<u8>,
}

impl FillIndexBufferCommand {
    #[inline]
    pub fn handle(&mut self, handle: IndexBufferHandle) -> &mut Self {
        self.handle = handle;
        self
    }

    #[inline]
    pub fn offset(&mut self, offset: usize) -> &mut Self {
        self.offset = offset;
        self
    }

    #[inline]
    pub fn data(&mut self, data: &[u8]) -> &mut Self {
        self.bytes = data.to_vec();
        self
    }

    #[inline]
    pub fn bytes(&mut self, bytes: Vec<u8>) -> &mut Self {
        self.bytes = bytes;
        self
    }
}

/// Binds a frame buffer as the render target. Binds the main frame buffer by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameBufferCommand {
    pub handle: FrameBufferHandle,
}

impl Default for FrameBufferCommand {
    fn default() -> Self {
        FrameBufferCommand {
            handle: FrameBufferHandle::MAIN,
        }
    }
}

impl FrameBufferCommand {
    #[inline]
    pub fn handle(&mut self, handle: FrameBufferHandle) -> &mut Self {
        self.handle = handle;
        self
    }
}

/// Attaches a image of texture to a attachment point of frame buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameBufferTextureCommand {
    pub frame_buffer: FrameBufferHandle,
    pub texture: TextureHandle,
    pub attachment: Attachment,
    pub face: Option<CubeFace>,
    pub level: u32,
}

impl Default for FrameBufferTextureCommand {
    fn default() -> Self {
        FrameBufferTextureCommand {
            frame_buffer: FrameBufferHandle::INVALID,
            texture: TextureHandle::INVALID,
            attachment: Attachment::Color(0),
            face: None,
            level: 0,
        }
    }
}

impl FrameBufferTextureCommand {
    #[inline]
    pub fn frame_buffer(&mut self, handle: FrameBufferHandle) -> &mut Self {
        self.frame_buffer = handle;
        self
    }

    #[inline]
    pub fn texture(&mut self, handle: TextureHandle) -> &mut Self {
        self.texture = handle;
        self
    }

    #[inline]
    pub fn attachment(&mut self, attachment: Attachment) -> &mut Self {
        self.attachment = attachment;
        self
    }

    #[inline]
    pub fn face(&mut self, face: CubeFace) -> &mut Self {
        self.face = Some(face);
        self
    }

    #[inline]
    pub fn level(&mut self, level: u32) -> &mut Self {
        self.level = level;
        self
    }
}

/// Generates the full mip chain of a texture from its base level.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GenerateMipmapsCommand {
    pub texture: TextureHandle,
}

impl GenerateMipmapsCommand {
    #[inline]
    pub fn texture(&mut self, handle: TextureHandle) -> &mut Self {
        self.texture = handle;
        self
    }
}

/// Overwrites named parameters of a material in place. Names the material does not
/// have are ignored.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SetMaterialParametersCommand {
    pub material: MaterialHandle,
    pub params: Vec<(String, ParamValue)>,
}

impl SetMaterialParametersCommand {
    #[inline]
    pub fn material(&mut self, handle: MaterialHandle) -> &mut Self {
        self.material = handle;
        self
    }

    #[inline]
    pub fn set<T1, T2>(&mut self, name: T1, value: T2) -> &mut Self
    where
        T1: Into<String>,
        T2: Into<ParamValue>,
    {
        self.params.push((name.into(), value.into()));
        self
    }
}

/// The closed set of commands.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Clear(ClearCommand),
    Draw(DrawCommand),
    Viewport(ViewportCommand),
    Scissor(ScissorCommand),
    FillVertexBuffer(FillVertexBufferCommand),
    FillIndexBuffer(FillIndexBufferCommand),
    FrameBuffer(FrameBufferCommand),
    FrameBufferTexture(FrameBufferTextureCommand),
    GenerateMipmaps(GenerateMipmapsCommand),
    SetMaterialParameters(SetMaterialParametersCommand),
}

impl Command {
    /// Dispatches this command to the matching method of `visitor`.
    pub fn accept<V>(&self, visitor: &mut V, frame: &mut FrameState) -> Result<()>
    where
        V: Visitor + ?Sized,
    {
        match *self {
            Command::Clear(ref v) => visitor.visit_clear(frame, v),
            Command::Draw(ref v) => visitor.visit_draw(frame, v),
            Command::Viewport(ref v) => visitor.visit_viewport(frame, v),
            Command::Scissor(ref v) => visitor.visit_scissor(frame, v),
            Command::FillVertexBuffer(ref v) => visitor.visit_fill_vertex_buffer(frame, v),
            Command::FillIndexBuffer(ref v) => visitor.visit_fill_index_buffer(frame, v),
            Command::FrameBuffer(ref v) => visitor.visit_frame_buffer(frame, v),
            Command::FrameBufferTexture(ref v) => visitor.visit_frame_buffer_texture(frame, v),
            Command::GenerateMipmaps(ref v) => visitor.visit_generate_mipmaps(frame, v),
            Command::SetMaterialParameters(ref v) => {
                visitor.visit_set_material_parameters(frame, v)
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match *self {
            Command::Clear(_) => "Clear",
            Command::Draw(_) => "Draw",
            Command::Viewport(_) => "Viewport",
            Command::Scissor(_) => "Scissor",
            Command::FillVertexBuffer(_) => "FillVertexBuffer",
            Command::FillIndexBuffer(_) => "FillIndexBuffer",
            Command::FrameBuffer(_) => "FrameBuffer",
            Command::FrameBufferTexture(_) => "FrameBufferTexture",
            Command::GenerateMipmaps(_) => "GenerateMipmaps",
            Command::SetMaterialParameters(_) => "SetMaterialParameters",
        }
    }
}

macro_rules! impl_command_from {
    ($variant:ident, $cmd:ident) => {
        impl From<$cmd> for Command {
            fn from(cmd: $cmd) -> Self {
                Command::$variant(cmd)
            }
        }
    };
}

impl_command_from!(Clear, ClearCommand);
impl_command_from!(Draw, DrawCommand);
impl_command_from!(Viewport, ViewportCommand);
impl_command_from!(Scissor, ScissorCommand);
impl_command_from!(FillVertexBuffer, FillVertexBufferCommand);
impl_command_from!(FillIndexBuffer, FillIndexBufferCommand);
impl_command_from!(FrameBuffer, FrameBufferCommand);
impl_command_from!(FrameBufferTexture, FrameBufferTextureCommand);
impl_command_from!(GenerateMipmaps, GenerateMipmapsCommand);
impl_command_from!(SetMaterialParameters, SetMaterialParametersCommand);
