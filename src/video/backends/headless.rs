//! A driver that runs without any native device. It records every call into a shared
//! `CallLog`, which makes it useful for headless applications and tests.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::errors::*;
use crate::math::prelude::{Color, Rect};
use crate::video::assets::prelude::*;

use super::Driver;

/// A native call received by `HeadlessDriver`.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateVertexBuffer {
        handle: VertexBufferHandle,
        usage: BufferUsage,
        size: usize,
    },
    UpdateVertexBuffer {
        handle: VertexBufferHandle,
        usage: BufferUsage,
        offset: usize,
        len: usize,
    },
    DeleteVertexBuffer(VertexBufferHandle),
    CreateIndexBuffer {
        handle: IndexBufferHandle,
        index_type: IndexType,
        usage: BufferUsage,
        size: usize,
    },
    UpdateIndexBuffer {
        handle: IndexBufferHandle,
        usage: BufferUsage,
        offset: usize,
        len: usize,
    },
    DeleteIndexBuffer(IndexBufferHandle),
    CreateShader(ShaderHandle, ShaderType),
    DeleteShader(ShaderHandle),
    CreateProgram(ProgramHandle),
    DeleteProgram(ProgramHandle),
    CreateTexture {
        handle: TextureHandle,
        params: TextureParams,
        layers: usize,
    },
    GenerateMipmaps(TextureHandle),
    DeleteTexture(TextureHandle),
    CreateFrameBuffer(FrameBufferHandle),
    AttachTexture {
        handle: FrameBufferHandle,
        attachment: Attachment,
        texture: TextureHandle,
    },
    BindFrameBuffer(FrameBufferHandle),
    DeleteFrameBuffer(FrameBufferHandle),
    Clear {
        color: Option<Color>,
        depth: Option<f32>,
    },
    Viewport(Rect),
    Scissor(Rect),
    BindProgram(ProgramHandle),
    ColorBlend(Option<(Equation, BlendFactor, BlendFactor)>),
    CullFace(CullFace),
    PolygonMode(PolygonMode),
    DepthTest(bool),
    ScissorTest(bool),
    Uniform {
        program: ProgramHandle,
        name: String,
        value: ParamValue,
    },
    BindTexture {
        program: ProgramHandle,
        name: String,
        unit: u32,
        texture: TextureHandle,
    },
    Draw {
        vertex_buffer: VertexBufferHandle,
        primitive: Primitive,
        first: u32,
        count: u32,
    },
    DrawIndexed {
        vertex_buffer: VertexBufferHandle,
        index_buffer: IndexBufferHandle,
        primitive: Primitive,
        offset: u32,
        count: u32,
    },
}

impl Call {
    /// Returns true if this call creates, mutates or deletes native objects.
    pub fn is_resource(&self) -> bool {
        match *self {
            Call::CreateVertexBuffer { .. }
            | Call::UpdateVertexBuffer { .. }
            | Call::DeleteVertexBuffer(_)
            | Call::CreateIndexBuffer { .. }
            | Call::UpdateIndexBuffer { .. }
            | Call::DeleteIndexBuffer(_)
            | Call::CreateShader(_, _)
            | Call::DeleteShader(_)
            | Call::CreateProgram(_)
            | Call::DeleteProgram(_)
            | Call::CreateTexture { .. }
            | Call::GenerateMipmaps(_)
            | Call::DeleteTexture(_)
            | Call::CreateFrameBuffer(_)
            | Call::AttachTexture { .. }
            | Call::DeleteFrameBuffer(_) => true,
            _ => false,
        }
    }
}

/// The calls recorded by `HeadlessDriver`. Clones share the same records.
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<Call>>>,
}

impl CallLog {
    pub fn new() -> Self {
        Default::default()
    }

    fn lock(&self) -> MutexGuard<Vec<Call>> {
        match self.calls.lock() {
            Ok(v) => v,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    #[inline]
    pub fn push(&self, call: Call) {
        self.lock().push(call);
    }

    /// Returns a copy of all the recorded calls.
    #[inline]
    pub fn calls(&self) -> Vec<Call> {
        self.lock().clone()
    }

    /// Returns the number of recorded calls that match `predicate`.
    pub fn count<F>(&self, predicate: F) -> usize
    where
        F: Fn(&Call) -> bool,
    {
        self.lock().iter().filter(|v| predicate(v)).count()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    #[inline]
    pub fn clear(&self) {
        self.lock().clear();
    }
}

/// A `Driver` that records calls instead of making them. Shaders with empty source fail
/// to compile, everything else succeeds.
#[derive(Debug, Clone, Default)]
pub struct HeadlessDriver {
    log: CallLog,
}

impl HeadlessDriver {
    pub fn new() -> Self {
        Default::default()
    }

    #[inline]
    pub fn log(&self) -> &CallLog {
        &self.log
    }

    #[inline]
    fn record(&self, call: Call) -> Result<()> {
        trace!("[Headless] {:?}", call);
        self.log.push(call);
        Ok(())
    }
}

impl Driver for HeadlessDriver {
    fn name(&self) -> &'static str {
        "Headless"
    }

    fn create_vertex_buffer(
        &mut self,
        handle: VertexBufferHandle,
        _: &VertexLayout,
        usage: BufferUsage,
        size: usize,
        _: Option<&[u8]>,
    ) -> Result<()> {
        self.record(Call::CreateVertexBuffer {
            handle,
            usage,
            size,
        })
    }

    fn update_vertex_buffer(
        &mut self,
        handle: VertexBufferHandle,
        usage: BufferUsage,
        offset: usize,
        data: &[u8],
    ) -> Result<()> {
        self.record(Call::UpdateVertexBuffer {
            handle,
            usage,
            offset,
            len: data.len(),
        })
    }

    fn delete_vertex_buffer(&mut self, handle: VertexBufferHandle) -> Result<()> {
        self.record(Call::DeleteVertexBuffer(handle))
    }

    fn create_index_buffer(
        &mut self,
        handle: IndexBufferHandle,
        index_type: IndexType,
        usage: BufferUsage,
        size: usize,
        _: Option<&[u8]>,
    ) -> Result<()> {
        self.record(Call::CreateIndexBuffer {
            handle,
            index_type,
            usage,
            size,
        })
    }

    fn update_index_buffer(
        &mut self,
        handle: IndexBufferHandle,
        usage: BufferUsage,
        offset: usize,
        data: &[u8],
    ) -> Result<()> {
        self.record(Call::UpdateIndexBuffer {
            handle,
            usage,
            offset,
            len: data.len(),
        })
    }

    fn delete_index_buffer(&mut self, handle: IndexBufferHandle) -> Result<()> {
        self.record(Call::DeleteIndexBuffer(handle))
    }

    fn create_shader(
        &mut self,
        handle: ShaderHandle,
        shader_type: ShaderType,
        source: &str,
    ) -> Result<()> {
        if source.trim().is_empty() {
            bail!("{} source of {} is empty.", shader_type, handle);
        }

        self.record(Call::CreateShader(handle, shader_type))
    }

    fn delete_shader(&mut self, handle: ShaderHandle) -> Result<()> {
        self.record(Call::DeleteShader(handle))
    }

    fn create_program(&mut self, handle: ProgramHandle, _: ShaderHandle, _: ShaderHandle) -> Result<()> {
        self.record(Call::CreateProgram(handle))
    }

    fn delete_program(&mut self, handle: ProgramHandle) -> Result<()> {
        self.record(Call::DeleteProgram(handle))
    }

    fn create_texture(
        &mut self,
        handle: TextureHandle,
        params: &TextureParams,
        layers: &[TextureData],
    ) -> Result<()> {
        self.record(Call::CreateTexture {
            handle,
            params: *params,
            layers: layers.len(),
        })
    }

    fn generate_mipmaps(&mut self, handle: TextureHandle, _: TextureTarget) -> Result<()> {
        self.record(Call::GenerateMipmaps(handle))
    }

    fn delete_texture(&mut self, handle: TextureHandle) -> Result<()> {
        self.record(Call::DeleteTexture(handle))
    }

    fn create_frame_buffer(&mut self, handle: FrameBufferHandle) -> Result<()> {
        self.record(Call::CreateFrameBuffer(handle))
    }

    fn attach_texture(
        &mut self,
        handle: FrameBufferHandle,
        attachment: Attachment,
        texture: TextureHandle,
        _: Option<CubeFace>,
        _: u32,
    ) -> Result<()> {
        self.record(Call::AttachTexture {
            handle,
            attachment,
            texture,
        })
    }

    fn bind_frame_buffer(&mut self, handle: FrameBufferHandle) -> Result<()> {
        self.record(Call::BindFrameBuffer(handle))
    }

    fn delete_frame_buffer(&mut self, handle: FrameBufferHandle) -> Result<()> {
        self.record(Call::DeleteFrameBuffer(handle))
    }

    fn clear(&mut self, color: Option<Color>, depth: Option<f32>) -> Result<()> {
        self.record(Call::Clear { color, depth })
    }

    fn set_viewport(&mut self, rect: Rect) -> Result<()> {
        self.record(Call::Viewport(rect))
    }

    fn set_scissor(&mut self, rect: Rect) -> Result<()> {
        self.record(Call::Scissor(rect))
    }

    fn bind_program(&mut self, handle: ProgramHandle) -> Result<()> {
        self.record(Call::BindProgram(handle))
    }

    fn set_color_blend(
        &mut self,
        blend: Option<(Equation, BlendFactor, BlendFactor)>,
    ) -> Result<()> {
        self.record(Call::ColorBlend(blend))
    }

    fn set_cull_face(&mut self, face: CullFace) -> Result<()> {
        self.record(Call::CullFace(face))
    }

    fn set_polygon_mode(&mut self, mode: PolygonMode) -> Result<()> {
        self.record(Call::PolygonMode(mode))
    }

    fn set_depth_test(&mut self, enable: bool) -> Result<()> {
        self.record(Call::DepthTest(enable))
    }

    fn set_scissor_test(&mut self, enable: bool) -> Result<()> {
        self.record(Call::ScissorTest(enable))
    }

    fn set_uniform(
        &mut self,
        program: ProgramHandle,
        name: &str,
        value: &ParamValue,
    ) -> Result<()> {
        self.record(Call::Uniform {
            program,
            name: name.to_owned(),
            value: *value,
        })
    }

    fn bind_texture(
        &mut self,
        program: ProgramHandle,
        name: &str,
        unit: u32,
        texture: TextureHandle,
        _: TextureTarget,
    ) -> Result<()> {
        self.record(Call::BindTexture {
            program,
            name: name.to_owned(),
            unit,
            texture,
        })
    }

    fn draw(
        &mut self,
        vertex_buffer: VertexBufferHandle,
        _: &VertexLayout,
        primitive: Primitive,
        first: u32,
        count: u32,
    ) -> Result<()> {
        self.record(Call::Draw {
            vertex_buffer,
            primitive,
            first,
            count,
        })
    }

    fn draw_indexed(
        &mut self,
        vertex_buffer: VertexBufferHandle,
        _: &VertexLayout,
        index_buffer: IndexBufferHandle,
        _: IndexType,
        primitive: Primitive,
        offset: u32,
        count: u32,
    ) -> Result<()> {
        self.record(Call::DrawIndexed {
            vertex_buffer,
            index_buffer,
            primitive,
            offset,
            count,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn shared() {
        let mut driver = HeadlessDriver::new();
        let log = driver.log().clone();

        driver.bind_program(ProgramHandle::new(1)).unwrap();
        driver.set_depth_test(false).unwrap();
        assert_eq!(log.len(), 2);
        assert_eq!(log.count(|v| *v == Call::DepthTest(false)), 1);

        assert!(driver
            .create_shader(ShaderHandle::new(0), ShaderType::Vertex, "  ")
            .is_err());
        assert_eq!(log.len(), 2);

        log.clear();
        assert!(driver.log().is_empty());
    }

    #[test]
    fn resources() {
        assert!(Call::DeleteTexture(TextureHandle::new(0)).is_resource());
        assert!(!Call::DepthTest(true).is_resource());
    }
}
