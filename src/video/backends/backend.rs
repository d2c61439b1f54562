use smallvec::SmallVec;

use crate::errors;
use crate::utils::handle::HandleLike;
use crate::video::assets::prelude::*;
use crate::video::command::*;
use crate::video::errors::{Error, Result};
use crate::video::settings::VideoSettings;
use crate::video::visitor::{DrawState, FrameState, Visitor};

use super::utils::DataVec;
use super::Driver;

/// Calls `$driver`, then checks the native error state if it's enabled.
macro_rules! native {
    ($native:expr, $call:ident($($arg:expr),*)) => {{
        let result = $native.driver.$call($($arg),*);
        $native.check(stringify!($call), result)
    }};
}

#[derive(Debug, Clone)]
struct VertexBufferData {
    layout: VertexLayout,
    usage: BufferUsage,
    size: usize,
}

#[derive(Debug, Clone, Copy)]
struct IndexBufferData {
    index_type: IndexType,
    usage: BufferUsage,
    size: usize,
}

#[derive(Debug, Clone, Copy)]
struct ShaderData {
    shader_type: ShaderType,
    compiled: bool,
}

#[derive(Debug, Clone, Copy)]
struct ProgramData {
    linked: bool,
}

#[derive(Debug, Clone, Copy)]
struct TextureState {
    params: TextureParams,
}

#[derive(Debug, Clone, Default)]
struct FrameBufferData {
    attachments: SmallVec<[(Attachment, TextureHandle); 4]>,
}

struct Native {
    driver: Box<dyn Driver>,
    check_errors: bool,
}

impl Native {
    fn check(&mut self, call: &'static str, result: errors::Result<()>) -> Result<()> {
        if self.check_errors {
            if let Err(err) = self.driver.check() {
                error!("[{}] {} raised a error. {}", self.driver.name(), call, err);
            }
        }

        result.map_err(|err| Error::Backend(format!("{} failed. {}", call, err)))
    }
}

/// The backend of `GraphicsDevice`.
///
/// It keeps the metadata of every resource (layouts, usages, index types, pixel formats,
/// compile status of shaders), so commands referencing invalid or destroyed resources
/// could be skipped before reaching the driver.
pub struct Backend {
    native: Native,
    max_texture_units: u32,
    vertex_buffers: DataVec<VertexBufferData>,
    index_buffers: DataVec<IndexBufferData>,
    shaders: DataVec<ShaderData>,
    programs: DataVec<ProgramData>,
    textures: DataVec<TextureState>,
    frame_buffers: DataVec<FrameBufferData>,
}

impl Backend {
    pub fn new(driver: Box<dyn Driver>, settings: &VideoSettings) -> Self {
        info!(
            "Creates backend with {} driver, error checks {}.",
            driver.name(),
            if settings.check_errors { "on" } else { "off" }
        );

        Backend {
            native: Native {
                driver,
                check_errors: settings.check_errors,
            },
            max_texture_units: settings.max_texture_units,
            vertex_buffers: DataVec::new(),
            index_buffers: DataVec::new(),
            shaders: DataVec::new(),
            programs: DataVec::new(),
            textures: DataVec::new(),
            frame_buffers: DataVec::new(),
        }
    }

    #[inline]
    pub fn driver(&self) -> &dyn Driver {
        self.native.driver.as_ref()
    }

    pub fn create_vertex_buffer(
        &mut self,
        handle: VertexBufferHandle,
        layout: VertexLayout,
        usage: BufferUsage,
        size: usize,
        data: Option<&[u8]>,
    ) -> Result<()> {
        native!(
            self.native,
            create_vertex_buffer(handle, &layout, usage, size, data)
        )?;

        let data = VertexBufferData {
            layout,
            usage,
            size,
        };

        self.vertex_buffers.create(handle, data);
        Ok(())
    }

    pub fn delete_vertex_buffer(&mut self, handle: VertexBufferHandle) -> Result<()> {
        if self.vertex_buffers.free(handle).is_none() {
            return Err(Error::VertexBufferHandleInvalid(handle));
        }

        native!(self.native, delete_vertex_buffer(handle))
    }

    /// Gets the layout of vertex buffer.
    pub fn vertex_layout(&self, handle: VertexBufferHandle) -> Option<&VertexLayout> {
        self.vertex_buffers.get(handle).map(|v| &v.layout)
    }

    /// Gets the size in bytes of vertex buffer.
    pub fn vertex_buffer_size(&self, handle: VertexBufferHandle) -> Option<usize> {
        self.vertex_buffers.get(handle).map(|v| v.size)
    }

    pub fn create_index_buffer(
        &mut self,
        handle: IndexBufferHandle,
        index_type: IndexType,
        usage: BufferUsage,
        size: usize,
        data: Option<&[u8]>,
    ) -> Result<()> {
        native!(
            self.native,
            create_index_buffer(handle, index_type, usage, size, data)
        )?;

        let data = IndexBufferData {
            index_type,
            usage,
            size,
        };

        self.index_buffers.create(handle, data);
        Ok(())
    }

    pub fn delete_index_buffer(&mut self, handle: IndexBufferHandle) -> Result<()> {
        if self.index_buffers.free(handle).is_none() {
            return Err(Error::IndexBufferHandleInvalid(handle));
        }

        native!(self.native, delete_index_buffer(handle))
    }

    /// Gets the type of indices in index buffer.
    pub fn index_type(&self, handle: IndexBufferHandle) -> Option<IndexType> {
        self.index_buffers.get(handle).map(|v| v.index_type)
    }

    /// Gets the size in bytes of index buffer.
    pub fn index_buffer_size(&self, handle: IndexBufferHandle) -> Option<usize> {
        self.index_buffers.get(handle).map(|v| v.size)
    }

    /// Compiles a shader. The shader is kept as a placeholder if compilation fails,
    /// and programs linked with it will never be drawn.
    pub fn create_shader(
        &mut self,
        handle: ShaderHandle,
        shader_type: ShaderType,
        source: &str,
    ) -> Result<()> {
        let result = self.native.driver.create_shader(handle, shader_type, source);
        let compiled = result.is_ok();

        self.shaders.create(
            handle,
            ShaderData {
                shader_type,
                compiled,
            },
        );

        result.map_err(|err| Error::ShaderCompileFailure(format!("{}", err)))
    }

    pub fn delete_shader(&mut self, handle: ShaderHandle) -> Result<()> {
        match self.shaders.free(handle) {
            Some(ref v) if v.compiled => native!(self.native, delete_shader(handle)),
            Some(_) => Ok(()),
            None => Err(Error::ShaderHandleInvalid(handle)),
        }
    }

    /// Returns true if the shader has been compiled successfully.
    pub fn is_shader_compiled(&self, handle: ShaderHandle) -> bool {
        self.shaders.get(handle).map(|v| v.compiled).unwrap_or(false)
    }

    /// Links a program. The program is kept as a placeholder if linking fails.
    pub fn create_program(
        &mut self,
        handle: ProgramHandle,
        vs: ShaderHandle,
        fs: ShaderHandle,
    ) -> Result<()> {
        let result = self.link(handle, vs, fs);
        self.programs.create(
            handle,
            ProgramData {
                linked: result.is_ok(),
            },
        );

        result
    }

    fn link(&mut self, handle: ProgramHandle, vs: ShaderHandle, fs: ShaderHandle) -> Result<()> {
        for &(shader, expected) in &[(vs, ShaderType::Vertex), (fs, ShaderType::Fragment)] {
            match self.shaders.get(shader) {
                Some(v) if !v.compiled => {
                    let err = format!("{} failed to compile.", shader);
                    return Err(Error::ProgramLinkFailure(err));
                }
                Some(v) if v.shader_type != expected => {
                    let err = format!("{} is not a {}.", shader, expected);
                    return Err(Error::ProgramLinkFailure(err));
                }
                Some(_) => {}
                None => return Err(Error::ShaderHandleInvalid(shader)),
            }
        }

        self.native
            .driver
            .create_program(handle, vs, fs)
            .map_err(|err| Error::ProgramLinkFailure(format!("{}", err)))
    }

    pub fn delete_program(&mut self, handle: ProgramHandle) -> Result<()> {
        match self.programs.free(handle) {
            Some(ref v) if v.linked => native!(self.native, delete_program(handle)),
            Some(_) => Ok(()),
            None => Err(Error::ProgramHandleInvalid(handle)),
        }
    }

    /// Returns true if the program has been linked successfully.
    pub fn is_program_linked(&self, handle: ProgramHandle) -> bool {
        self.programs.get(handle).map(|v| v.linked).unwrap_or(false)
    }

    pub fn create_texture(
        &mut self,
        handle: TextureHandle,
        params: TextureParams,
        layers: &[TextureData],
    ) -> Result<()> {
        params.validate(layers)?;
        native!(self.native, create_texture(handle, &params, layers))?;
        self.textures.create(handle, TextureState { params });
        Ok(())
    }

    pub fn delete_texture(&mut self, handle: TextureHandle) -> Result<()> {
        if self.textures.free(handle).is_none() {
            return Err(Error::TextureHandleInvalid(handle));
        }

        native!(self.native, delete_texture(handle))
    }

    /// Gets the parameters of texture.
    pub fn texture_params(&self, handle: TextureHandle) -> Option<&TextureParams> {
        self.textures.get(handle).map(|v| &v.params)
    }

    /// Creates a frame buffer, with `attachments` attached.
    pub fn create_frame_buffer(
        &mut self,
        handle: FrameBufferHandle,
        attachments: &[(Attachment, TextureHandle)],
    ) -> Result<()> {
        native!(self.native, create_frame_buffer(handle))?;
        self.frame_buffers.create(handle, FrameBufferData::default());

        for &(attachment, texture) in attachments {
            if let Err(err) = self.attach(handle, attachment, texture, None, 0) {
                self.frame_buffers.free(handle);
                native!(self.native, delete_frame_buffer(handle))?;
                return Err(err);
            }
        }

        Ok(())
    }

    pub fn delete_frame_buffer(&mut self, handle: FrameBufferHandle) -> Result<()> {
        if handle.is_main() || self.frame_buffers.free(handle).is_none() {
            return Err(Error::FrameBufferHandleInvalid(handle));
        }

        native!(self.native, delete_frame_buffer(handle))
    }

    /// Gets the textures attached to frame buffer.
    pub fn attachments(&self, handle: FrameBufferHandle) -> Option<&[(Attachment, TextureHandle)]> {
        self.frame_buffers.get(handle).map(|v| &v.attachments[..])
    }

    fn attach(
        &mut self,
        handle: FrameBufferHandle,
        attachment: Attachment,
        texture: TextureHandle,
        face: Option<CubeFace>,
        level: u32,
    ) -> Result<()> {
        let params = self
            .textures
            .get(texture)
            .map(|v| v.params)
            .ok_or_else(|| Error::TextureHandleInvalid(texture))?;

        if !attachment.accepts(params.format) {
            return Err(Error::FrameBufferInvalid(format!(
                "{} in {:?} could not be attached to {:?}.",
                texture, params.format, attachment
            )));
        }

        match (params.target, face) {
            (TextureTarget::Texture2D, None) | (TextureTarget::CubeMap, Some(_)) => {}
            _ => {
                return Err(Error::FrameBufferInvalid(format!(
                    "{} is a {:?} and could not be attached with face {:?}.",
                    texture, params.target, face
                )));
            }
        }

        native!(
            self.native,
            attach_texture(handle, attachment, texture, face, level)
        )?;

        let fb = self
            .frame_buffers
            .get_mut(handle)
            .ok_or_else(|| Error::FrameBufferHandleInvalid(handle))?;

        fb.attachments.retain(|v| v.0 != attachment);
        fb.attachments.push((attachment, texture));
        Ok(())
    }

    /// Applies the fixed-function state and parameters of `material`, skipping the
    /// state which is identical to the previous draw.
    fn apply(
        &mut self,
        previous: Option<DrawState>,
        current: DrawState,
        material: &Material,
    ) -> Result<()> {
        let program = current.program;
        let state = current.state;
        let last = previous.map(|v| v.state);

        if previous.map(|v| v.program) != Some(program) {
            native!(self.native, bind_program(program))?;
        }

        if last.map(|v| v.color_blend) != Some(state.color_blend) {
            native!(self.native, set_color_blend(state.color_blend))?;
        }

        if last.map(|v| v.cull_face) != Some(state.cull_face) {
            native!(self.native, set_cull_face(state.cull_face))?;
        }

        if last.map(|v| v.polygon_mode) != Some(state.polygon_mode) {
            native!(self.native, set_polygon_mode(state.polygon_mode))?;
        }

        if last.map(|v| v.depth_test) != Some(state.depth_test) {
            native!(self.native, set_depth_test(state.depth_test))?;
        }

        if last.map(|v| v.scissor_test) != Some(state.scissor_test) {
            native!(self.native, set_scissor_test(state.scissor_test))?;
        }

        let mut unit = 0;
        for (name, value) in material.iter() {
            if let ParamValue::Texture(texture) = *value {
                let slot = unit;
                unit += 1;

                if slot >= self.max_texture_units {
                    warn!(
                        "Skips {} of {}, all the {} texture units are taken.",
                        name, program, self.max_texture_units
                    );
                    continue;
                }

                let target = match self.textures.get(texture) {
                    Some(v) => v.params.target,
                    None => {
                        debug!("Skips {} of {}, {} is invalid.", name, program, texture);
                        continue;
                    }
                };

                native!(
                    self.native,
                    bind_texture(program, name, slot, texture, target)
                )?;
            } else {
                native!(self.native, set_uniform(program, name, value))?;
            }
        }

        Ok(())
    }
}

impl Visitor for Backend {
    fn visit_clear(&mut self, _: &mut FrameState, cmd: &ClearCommand) -> Result<()> {
        let color = if cmd.clear_color {
            Some(cmd.color)
        } else {
            None
        };

        let depth = if cmd.clear_depth {
            Some(cmd.depth)
        } else {
            None
        };

        if color.is_none() && depth.is_none() {
            return Ok(());
        }

        native!(self.native, clear(color, depth))
    }

    fn visit_draw(&mut self, frame: &mut FrameState, cmd: &DrawCommand) -> Result<()> {
        if !cmd.vertex_buffer.is_valid() {
            frame.stats.skipped = frame.stats.skipped.saturating_add(1);
            return Ok(());
        }

        let index_type = if cmd.index_buffer.is_valid() {
            match self.index_buffers.get(cmd.index_buffer) {
                Some(v) => Some(v.index_type),
                None => {
                    debug!("Skips draw, {} is invalid.", cmd.index_buffer);
                    frame.stats.skipped = frame.stats.skipped.saturating_add(1);
                    return Ok(());
                }
            }
        } else {
            None
        };

        if !self.vertex_buffers.contains(cmd.vertex_buffer) {
            debug!("Skips draw, {} is invalid.", cmd.vertex_buffer);
            frame.stats.skipped = frame.stats.skipped.saturating_add(1);
            return Ok(());
        }

        if let Some(material) = frame.materials.get(cmd.material) {
            let program = material.program();
            if !self.is_program_linked(program) {
                debug!("Skips draw with {}, {} is not linked.", cmd.material, program);
                frame.stats.skipped = frame.stats.skipped.saturating_add(1);
                return Ok(());
            }

            let current = DrawState {
                program,
                state: *material.state(),
            };

            // The native state is unknown if anything fails in between.
            let previous = frame.previous.take();
            self.apply(previous, current, material)?;
            frame.previous = Some(current);
        } else {
            frame.previous = None;
        }

        let layout = self
            .vertex_buffers
            .get(cmd.vertex_buffer)
            .map(|v| &v.layout)
            .ok_or_else(|| Error::VertexBufferHandleInvalid(cmd.vertex_buffer))?;

        match index_type {
            Some(index_type) => native!(
                self.native,
                draw_indexed(
                    cmd.vertex_buffer,
                    layout,
                    cmd.index_buffer,
                    index_type,
                    cmd.primitive,
                    cmd.index_offset,
                    cmd.index_count
                )
            )?,
            None => native!(
                self.native,
                draw(
                    cmd.vertex_buffer,
                    layout,
                    cmd.primitive,
                    cmd.vertex_offset,
                    cmd.vertex_count
                )
            )?,
        }

        frame.stats.draws = frame.stats.draws.saturating_add(1);
        let triangles = cmd.primitive.assemble_triangles(cmd.count());
        frame.stats.triangles = frame.stats.triangles.saturating_add(triangles);
        Ok(())
    }

    fn visit_viewport(&mut self, _: &mut FrameState, cmd: &ViewportCommand) -> Result<()> {
        native!(self.native, set_viewport(cmd.rect))
    }

    fn visit_scissor(&mut self, _: &mut FrameState, cmd: &ScissorCommand) -> Result<()> {
        native!(self.native, set_scissor(cmd.rect))
    }

    fn visit_fill_vertex_buffer(
        &mut self,
        frame: &mut FrameState,
        cmd: &FillVertexBufferCommand,
    ) -> Result<()> {
        let usage = match self.vertex_buffers.get(cmd.handle) {
            Some(v) => v.usage,
            None => {
                debug!("Skips fill, {} is invalid.", cmd.handle);
                frame.stats.skipped = frame.stats.skipped.saturating_add(1);
                return Ok(());
            }
        };

        if usage == BufferUsage::Static {
            return Err(Error::VertexBufferImmutable(cmd.handle));
        }

        if cmd.bytes.is_empty() {
            return Ok(());
        }

        native!(
            self.native,
            update_vertex_buffer(cmd.handle, usage, cmd.offset, &cmd.bytes)
        )
    }

    fn visit_fill_index_buffer(
        &mut self,
        frame: &mut FrameState,
        cmd: &FillIndexBufferCommand,
    ) -> Result<()> {
        let usage = match self.index_buffers.get(cmd.handle) {
            Some(v) => v.usage,
            None => {
                debug!("Skips fill, {} is invalid.", cmd.handle);
                frame.stats.skipped = frame.stats.skipped.saturating_add(1);
                return Ok(());
            }
        };

        if usage == BufferUsage::Static {
            return Err(Error::IndexBufferImmutable(cmd.handle));
        }

        if cmd.bytes.is_empty() {
            return Ok(());
        }

        native!(
            self.native,
            update_index_buffer(cmd.handle, usage, cmd.offset, &cmd.bytes)
        )
    }

    fn visit_frame_buffer(&mut self, frame: &mut FrameState, cmd: &FrameBufferCommand) -> Result<()> {
        if !cmd.handle.is_main() && !self.frame_buffers.contains(cmd.handle) {
            debug!("Skips binding, {} is invalid.", cmd.handle);
            frame.stats.skipped = frame.stats.skipped.saturating_add(1);
            return Ok(());
        }

        native!(self.native, bind_frame_buffer(cmd.handle))
    }

    fn visit_frame_buffer_texture(
        &mut self,
        frame: &mut FrameState,
        cmd: &FrameBufferTextureCommand,
    ) -> Result<()> {
        if !self.frame_buffers.contains(cmd.frame_buffer) || !self.textures.contains(cmd.texture) {
            debug!(
                "Skips attaching {} to {}, the handles are invalid.",
                cmd.texture, cmd.frame_buffer
            );
            frame.stats.skipped = frame.stats.skipped.saturating_add(1);
            return Ok(());
        }

        self.attach(
            cmd.frame_buffer,
            cmd.attachment,
            cmd.texture,
            cmd.face,
            cmd.level,
        )
    }

    fn visit_generate_mipmaps(
        &mut self,
        frame: &mut FrameState,
        cmd: &GenerateMipmapsCommand,
    ) -> Result<()> {
        let target = match self.textures.get(cmd.texture) {
            Some(v) => v.params.target,
            None => {
                debug!("Skips mipmaps generation, {} is invalid.", cmd.texture);
                frame.stats.skipped = frame.stats.skipped.saturating_add(1);
                return Ok(());
            }
        };

        native!(self.native, generate_mipmaps(cmd.texture, target))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::video::backends::headless::{Call, HeadlessDriver};
    use crate::video::cache::MaterialCache;

    fn backend() -> (Backend, HeadlessDriver) {
        let driver = HeadlessDriver::new();
        let backend = Backend::new(Box::new(driver.clone()), &VideoSettings::default());
        (backend, driver)
    }

    #[test]
    fn placeholder() {
        let (mut backend, _) = backend();
        let vs = ShaderHandle::new(0);
        let fs = ShaderHandle::new(1);
        let fs2 = ShaderHandle::new(2);
        backend.create_shader(vs, ShaderType::Vertex, "void main() {}").unwrap();
        assert!(backend.create_shader(fs, ShaderType::Fragment, "").is_err());
        assert!(!backend.is_shader_compiled(fs));
        backend.create_shader(fs2, ShaderType::Fragment, "void main() {}").unwrap();

        let p1 = ProgramHandle::new(0);
        assert!(backend.create_program(p1, vs, fs).is_err());
        assert!(!backend.is_program_linked(p1));

        let p2 = ProgramHandle::new(1);
        assert!(backend.create_program(p2, fs2, vs).is_err());

        let p3 = ProgramHandle::new(2);
        backend.create_program(p3, vs, fs2).unwrap();
        assert!(backend.is_program_linked(p3));

        assert!(backend.delete_program(p1).is_ok());
        assert!(backend.delete_program(p1).is_err());
        assert!(backend.delete_shader(fs).is_ok());
    }

    #[test]
    fn texture_units() {
        let (mut backend, driver) = backend();
        backend.max_texture_units = 1;

        let vs = ShaderHandle::new(0);
        let fs = ShaderHandle::new(1);
        let program = ProgramHandle::new(0);
        backend.create_shader(vs, ShaderType::Vertex, "vs").unwrap();
        backend.create_shader(fs, ShaderType::Fragment, "fs").unwrap();
        backend.create_program(program, vs, fs).unwrap();

        let mut params = TextureParams::default();
        params.dimensions = crate::math::Vector2::new(2, 2);
        let t1 = TextureHandle::new(0);
        let t2 = TextureHandle::new(1);
        backend.create_texture(t1, params, &[]).unwrap();
        backend.create_texture(t2, params, &[]).unwrap();

        let vbo = VertexBufferHandle::new(0);
        let layout = VertexLayout::build()
            .with(0, ElementType::Float, 3, false)
            .finish();
        backend
            .create_vertex_buffer(vbo, layout, BufferUsage::Static, 36, None)
            .unwrap();

        let material = Material::new(vec![program], AlphaMode::Opaque, RenderState::default())
            .with_param("u_A", t1)
            .with_param("u_B", t2);

        let mut materials = MaterialCache::new();
        let material = materials.add(material).unwrap();

        driver.log().clear();
        let mut frame = FrameState::new(&mut materials);
        let mut cmd = DrawCommand::default();
        cmd.vertex_buffer(vbo).vertex_count(3).material(material);
        backend.visit_draw(&mut frame, &cmd).unwrap();

        let binds: Vec<_> = driver
            .log()
            .calls()
            .into_iter()
            .filter_map(|v| match v {
                Call::BindTexture { unit, texture, .. } => Some((unit, texture)),
                _ => None,
            })
            .collect();

        assert_eq!(binds, vec![(0, t1)]);
        assert_eq!(frame.stats.draws, 1);
        assert_eq!(frame.stats.triangles, 1);
    }

    #[test]
    fn fill_usage() {
        let (mut backend, driver) = backend();
        let layout = VertexLayout::build()
            .with(0, ElementType::Float, 3, false)
            .finish();

        let fixed = VertexBufferHandle::new(0);
        let dynamic = VertexBufferHandle::new(1);
        backend
            .create_vertex_buffer(fixed, layout.clone(), BufferUsage::Static, 36, None)
            .unwrap();
        backend
            .create_vertex_buffer(dynamic, layout, BufferUsage::Dynamic, 36, None)
            .unwrap();

        let indices = IndexBufferHandle::new(0);
        backend
            .create_index_buffer(indices, IndexType::U16, BufferUsage::Static, 6, None)
            .unwrap();

        driver.log().clear();
        let mut materials = MaterialCache::new();
        let mut frame = FrameState::new(&mut materials);

        let mut cmd = FillVertexBufferCommand::default();
        cmd.handle(fixed).data(&[0; 12]);
        match backend.visit_fill_vertex_buffer(&mut frame, &cmd) {
            Err(Error::VertexBufferImmutable(v)) => assert_eq!(v, fixed),
            other => panic!("unexpected {:?}", other),
        }

        let mut cmd = FillIndexBufferCommand::default();
        cmd.handle(indices).data(&[0, 0]);
        match backend.visit_fill_index_buffer(&mut frame, &cmd) {
            Err(Error::IndexBufferImmutable(v)) => assert_eq!(v, indices),
            other => panic!("unexpected {:?}", other),
        }

        assert!(driver.log().is_empty());

        let mut cmd = FillVertexBufferCommand::default();
        cmd.handle(dynamic).offset(12).data(&[0; 12]);
        backend.visit_fill_vertex_buffer(&mut frame, &cmd).unwrap();
        assert_eq!(
            driver.log().calls(),
            vec![Call::UpdateVertexBuffer {
                handle: dynamic,
                usage: BufferUsage::Dynamic,
                offset: 12,
                len: 12,
            }]
        );
        assert_eq!(frame.stats.skipped, 0);
    }

    #[test]
    fn frame_buffer() {
        let (mut backend, _) = backend();

        let mut params = TextureParams::default();
        params.dimensions = crate::math::Vector2::new(2, 2);
        let color = TextureHandle::new(0);
        backend.create_texture(color, params, &[]).unwrap();

        let fb = FrameBufferHandle::new(1);
        assert!(backend
            .create_frame_buffer(fb, &[(Attachment::Depth, color)])
            .is_err());
        assert!(backend.attachments(fb).is_none());

        backend
            .create_frame_buffer(fb, &[(Attachment::Color(0), color)])
            .unwrap();
        assert_eq!(backend.attachments(fb).unwrap(), &[(Attachment::Color(0), color)]);

        assert!(backend.delete_frame_buffer(FrameBufferHandle::MAIN).is_err());
        assert!(backend.delete_frame_buffer(fb).is_ok());
    }
}
