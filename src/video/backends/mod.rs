//! Backends translate commands into native calls.
//!
//! `Backend` implements `Visitor` and holds everything that does not depend on the
//! native API: the metadata of resources, validation of handles and the diffing of
//! fixed-function state between draws. The native calls themselves go through a
//! `Driver`, which is implemented with OpenGL in `gl`, and by a recorder in `headless`.

pub mod backend;
pub mod gl;
pub mod headless;

mod utils;

pub use self::backend::Backend;

use crate::errors::*;
use crate::math::prelude::{Color, Rect};

use super::assets::prelude::*;

/// The native calls a backend is built on. Resources are identified by the handles
/// allocated by the device, drivers keep the mapping to their own native objects.
///
/// Handles passed to a driver are always alive, and the `Backend` has validated them.
pub trait Driver {
    /// Returns the name of driver, used in logs.
    fn name(&self) -> &'static str;

    fn create_vertex_buffer(
        &mut self,
        handle: VertexBufferHandle,
        layout: &VertexLayout,
        usage: BufferUsage,
        size: usize,
        data: Option<&[u8]>,
    ) -> Result<()>;

    fn update_vertex_buffer(
        &mut self,
        handle: VertexBufferHandle,
        usage: BufferUsage,
        offset: usize,
        data: &[u8],
    ) -> Result<()>;

    fn delete_vertex_buffer(&mut self, handle: VertexBufferHandle) -> Result<()>;

    fn create_index_buffer(
        &mut self,
        handle: IndexBufferHandle,
        index_type: IndexType,
        usage: BufferUsage,
        size: usize,
        data: Option<&[u8]>,
    ) -> Result<()>;

    fn update_index_buffer(
        &mut self,
        handle: IndexBufferHandle,
        usage: BufferUsage,
        offset: usize,
        data: &[u8],
    ) -> Result<()>;

    fn delete_index_buffer(&mut self, handle: IndexBufferHandle) -> Result<()>;

    /// Compiles a shader. The error carries the diagnostics of compiler.
    fn create_shader(
        &mut self,
        handle: ShaderHandle,
        shader_type: ShaderType,
        source: &str,
    ) -> Result<()>;

    fn delete_shader(&mut self, handle: ShaderHandle) -> Result<()>;

    /// Links a program. The error carries the diagnostics of linker.
    fn create_program(
        &mut self,
        handle: ProgramHandle,
        vs: ShaderHandle,
        fs: ShaderHandle,
    ) -> Result<()>;

    fn delete_program(&mut self, handle: ProgramHandle) -> Result<()>;

    /// Creates a texture and uploads its layers. Generates the rest of mip chain if
    /// `params.mipmap` is set.
    fn create_texture(
        &mut self,
        handle: TextureHandle,
        params: &TextureParams,
        layers: &[TextureData],
    ) -> Result<()>;

    fn generate_mipmaps(&mut self, handle: TextureHandle, target: TextureTarget) -> Result<()>;

    fn delete_texture(&mut self, handle: TextureHandle) -> Result<()>;

    fn create_frame_buffer(&mut self, handle: FrameBufferHandle) -> Result<()>;

    fn attach_texture(
        &mut self,
        handle: FrameBufferHandle,
        attachment: Attachment,
        texture: TextureHandle,
        face: Option<CubeFace>,
        level: u32,
    ) -> Result<()>;

    /// Binds the render target. `FrameBufferHandle::MAIN` binds the default frame buffer.
    fn bind_frame_buffer(&mut self, handle: FrameBufferHandle) -> Result<()>;

    fn delete_frame_buffer(&mut self, handle: FrameBufferHandle) -> Result<()>;

    /// Clears the channels which have a value.
    fn clear(&mut self, color: Option<Color>, depth: Option<f32>) -> Result<()>;

    fn set_viewport(&mut self, rect: Rect) -> Result<()>;

    fn set_scissor(&mut self, rect: Rect) -> Result<()>;

    fn bind_program(&mut self, handle: ProgramHandle) -> Result<()>;

    fn set_color_blend(&mut self, blend: Option<(Equation, BlendFactor, BlendFactor)>)
        -> Result<()>;

    fn set_cull_face(&mut self, face: CullFace) -> Result<()>;

    fn set_polygon_mode(&mut self, mode: PolygonMode) -> Result<()>;

    fn set_depth_test(&mut self, enable: bool) -> Result<()>;

    fn set_scissor_test(&mut self, enable: bool) -> Result<()>;

    /// Sets the value of a uniform variable of the bound program. Texture values are
    /// bound with `bind_texture` instead.
    fn set_uniform(&mut self, program: ProgramHandle, name: &str, value: &ParamValue)
        -> Result<()>;

    /// Binds a texture to texture `unit`, and points the sampler `name` of the bound
    /// program to it.
    fn bind_texture(
        &mut self,
        program: ProgramHandle,
        name: &str,
        unit: u32,
        texture: TextureHandle,
        target: TextureTarget,
    ) -> Result<()>;

    fn draw(
        &mut self,
        vertex_buffer: VertexBufferHandle,
        layout: &VertexLayout,
        primitive: Primitive,
        first: u32,
        count: u32,
    ) -> Result<()>;

    fn draw_indexed(
        &mut self,
        vertex_buffer: VertexBufferHandle,
        layout: &VertexLayout,
        index_buffer: IndexBufferHandle,
        index_type: IndexType,
        primitive: Primitive,
        offset: u32,
        count: u32,
    ) -> Result<()>;

    /// Polls the native error state. It's called after state-mutating calls when error
    /// checking is enabled.
    fn check(&mut self) -> Result<()> {
        Ok(())
    }
}
