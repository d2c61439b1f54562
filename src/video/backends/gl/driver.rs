use std::ffi::{CStr, CString};
use std::os::raw::c_void;
use std::ptr;

use gl::types::*;

use crate::errors::*;
use crate::math::prelude::{Color, Rect};
use crate::utils::prelude::{FastHashMap, HashValue};
use crate::video::assets::prelude::*;

use super::super::utils::DataVec;
use super::super::Driver;
use super::types;

#[derive(Debug)]
struct GLProgram {
    id: GLuint,
    uniforms: FastHashMap<HashValue<str>, GLint>,
}

#[derive(Debug, Clone, Copy)]
struct GLTexture {
    id: GLuint,
    target: GLenum,
}

/// The OpenGL implementation of `Driver`. It requires a context of OpenGL 3.3, or
/// above, which is current on the calling thread.
pub struct GLDriver {
    vertex_buffers: DataVec<GLuint>,
    index_buffers: DataVec<GLuint>,
    shaders: DataVec<GLuint>,
    programs: DataVec<GLProgram>,
    textures: DataVec<GLTexture>,
    frame_buffers: DataVec<GLuint>,

    vao: GLuint,
    enabled_attributes: u32,
    bound_frame_buffer: GLuint,
    bound_program: GLuint,
}

impl GLDriver {
    /// Loads the function pointers of OpenGL with `loader`, and setups the global
    /// states this driver relies on.
    pub fn new<F>(loader: F) -> Result<Self>
    where
        F: FnMut(&str) -> *const c_void,
    {
        gl::load_with(loader);

        unsafe {
            let version = Self::string(gl::VERSION)?;
            let renderer = Self::string(gl::RENDERER)?;
            info!("[GLDriver] OpenGL {} on {}.", version, renderer);

            let mut vao = 0;
            gl::GenVertexArrays(1, &mut vao);
            gl::BindVertexArray(vao);
            gl::PixelStorei(gl::UNPACK_ALIGNMENT, 1);
            gl::Enable(gl::CULL_FACE);
            gl::CullFace(gl::BACK);
            gl::Enable(gl::DEPTH_TEST);
            gl::DepthFunc(gl::LEQUAL);
            check()?;

            Ok(GLDriver {
                vertex_buffers: DataVec::new(),
                index_buffers: DataVec::new(),
                shaders: DataVec::new(),
                programs: DataVec::new(),
                textures: DataVec::new(),
                frame_buffers: DataVec::new(),

                vao,
                enabled_attributes: 0,
                bound_frame_buffer: 0,
                bound_program: 0,
            })
        }
    }

    unsafe fn string(name: GLenum) -> Result<String> {
        let s = gl::GetString(name);
        if s.is_null() {
            bail!("[GL] Failed to query string {:#x}.", name);
        }

        Ok(CStr::from_ptr(s as *const _).to_string_lossy().into_owned())
    }

    unsafe fn compile(shader_type: GLenum, src: &str) -> Result<GLuint> {
        let source = CString::new(src.as_bytes())?;

        let shader = gl::CreateShader(shader_type);
        gl::ShaderSource(shader, 1, &source.as_ptr(), ptr::null());
        gl::CompileShader(shader);

        let mut status = GLint::from(gl::FALSE);
        gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut status);

        if status != GLint::from(gl::TRUE) {
            let mut len = 0;
            gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut len);
            let mut buf = vec![0u8; len.max(1) as usize];
            gl::GetShaderInfoLog(
                shader,
                len,
                ptr::null_mut(),
                buf.as_mut_ptr() as *mut GLchar,
            );
            gl::DeleteShader(shader);

            bail!("{}", Self::info_log(&buf));
        }

        Ok(shader)
    }

    unsafe fn link(vs: GLuint, fs: GLuint) -> Result<GLuint> {
        let program = gl::CreateProgram();
        gl::AttachShader(program, vs);
        gl::AttachShader(program, fs);
        gl::LinkProgram(program);

        let mut status = GLint::from(gl::FALSE);
        gl::GetProgramiv(program, gl::LINK_STATUS, &mut status);

        if status != GLint::from(gl::TRUE) {
            let mut len: GLint = 0;
            gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut len);
            let mut buf = vec![0u8; len.max(1) as usize];
            gl::GetProgramInfoLog(
                program,
                len,
                ptr::null_mut(),
                buf.as_mut_ptr() as *mut GLchar,
            );
            gl::DeleteProgram(program);

            bail!("{}", Self::info_log(&buf));
        }

        gl::DetachShader(program, vs);
        gl::DetachShader(program, fs);
        Ok(program)
    }

    fn info_log(buf: &[u8]) -> String {
        let end = buf.iter().position(|&v| v == 0).unwrap_or(buf.len());
        String::from_utf8_lossy(&buf[..end]).into_owned()
    }

    unsafe fn create_buffer(
        tp: GLenum,
        usage: BufferUsage,
        size: usize,
        data: Option<&[u8]>,
    ) -> Result<GLuint> {
        let mut id = 0;
        gl::GenBuffers(1, &mut id);
        if id == 0 {
            bail!("[GL] Failed to generate buffer object.");
        }

        gl::BindBuffer(tp, id);
        gl::BufferData(tp, size as isize, ptr::null(), usage.into());

        if let Some(bytes) = data {
            let len = bytes.len().min(size);
            if len > 0 {
                gl::BufferSubData(tp, 0, len as isize, bytes.as_ptr() as *const c_void);
            }
        }

        check()?;
        Ok(id)
    }

    unsafe fn update_buffer(
        tp: GLenum,
        id: GLuint,
        usage: BufferUsage,
        offset: usize,
        data: &[u8],
    ) -> Result<()> {
        if data.is_empty() {
            return Ok(());
        }

        gl::BindBuffer(tp, id);

        // Stream buffers are orphaned before uploading.
        if usage == BufferUsage::Stream {
            let mut size = 0;
            gl::GetBufferParameteriv(tp, gl::BUFFER_SIZE, &mut size);
            gl::BufferData(tp, size as isize, ptr::null(), usage.into());
        }

        gl::BufferSubData(
            tp,
            offset as isize,
            data.len() as isize,
            data.as_ptr() as *const c_void,
        );
        check()
    }

    unsafe fn bind_texture_params(target: GLenum, params: &TextureParams, levels: u32) {
        let wrap: GLenum = params.wrap.into();
        gl::TexParameteri(target, gl::TEXTURE_WRAP_S, wrap as GLint);
        gl::TexParameteri(target, gl::TEXTURE_WRAP_T, wrap as GLint);
        if target == gl::TEXTURE_CUBE_MAP {
            gl::TexParameteri(target, gl::TEXTURE_WRAP_R, wrap as GLint);
        }

        let (min_filter, mag_filter) = match (params.filter, levels > 1) {
            (TextureFilter::Nearest, true) => (gl::NEAREST_MIPMAP_NEAREST, gl::NEAREST),
            (TextureFilter::Nearest, false) => (gl::NEAREST, gl::NEAREST),
            (TextureFilter::Linear, true) => (gl::LINEAR_MIPMAP_LINEAR, gl::LINEAR),
            (TextureFilter::Linear, false) => (gl::LINEAR, gl::LINEAR),
        };

        gl::TexParameteri(target, gl::TEXTURE_MIN_FILTER, min_filter as GLint);
        gl::TexParameteri(target, gl::TEXTURE_MAG_FILTER, mag_filter as GLint);
        gl::TexParameteri(target, gl::TEXTURE_BASE_LEVEL, 0);
        gl::TexParameteri(target, gl::TEXTURE_MAX_LEVEL, (levels - 1) as GLint);
    }

    unsafe fn bind_attributes(&mut self, layout: &VertexLayout) {
        let mut enabled = 0u32;
        for attribute in layout.iter() {
            let element: GLenum = attribute.element_type.into();
            let normalized = if attribute.normalized {
                gl::TRUE
            } else {
                gl::FALSE
            };

            gl::EnableVertexAttribArray(attribute.index);
            gl::VertexAttribPointer(
                attribute.index,
                GLint::from(attribute.components),
                element,
                normalized,
                attribute.stride as GLsizei,
                attribute.offset as usize as *const c_void,
            );

            enabled |= 1u32.checked_shl(attribute.index).unwrap_or(0);
        }

        let stale = self.enabled_attributes & !enabled;
        for i in 0..32 {
            if stale & (1 << i) != 0 {
                gl::DisableVertexAttribArray(i);
            }
        }

        self.enabled_attributes = enabled;
    }

    fn uniform_location(&mut self, program: ProgramHandle, name: &str) -> Result<Option<GLint>> {
        let data = self
            .programs
            .get_mut(program)
            .ok_or_else(|| format_err!("{:?} is not alive.", program))?;

        let key: HashValue<str> = name.into();
        if let Some(&location) = data.uniforms.get(&key) {
            return Ok(if location < 0 { None } else { Some(location) });
        }

        let c_name = CString::new(name.as_bytes())?;
        let location = unsafe { gl::GetUniformLocation(data.id, c_name.as_ptr()) };
        data.uniforms.insert(key, location);

        if location < 0 {
            debug!("[GLDriver] uniform {} is not active in {:?}.", name, program);
            return Ok(None);
        }

        Ok(Some(location))
    }

    fn use_program(&mut self, program: ProgramHandle) -> Result<()> {
        let id = self
            .programs
            .get(program)
            .map(|v| v.id)
            .ok_or_else(|| format_err!("{:?} is not alive.", program))?;

        if self.bound_program != id {
            unsafe { gl::UseProgram(id) };
            self.bound_program = id;
        }

        Ok(())
    }
}

impl Drop for GLDriver {
    fn drop(&mut self) {
        unsafe {
            for v in self.vertex_buffers.buf.drain(..).flatten() {
                gl::DeleteBuffers(1, &v);
            }

            for v in self.index_buffers.buf.drain(..).flatten() {
                gl::DeleteBuffers(1, &v);
            }

            for v in self.programs.buf.drain(..).flatten() {
                gl::DeleteProgram(v.id);
            }

            for v in self.shaders.buf.drain(..).flatten() {
                gl::DeleteShader(v);
            }

            for v in self.frame_buffers.buf.drain(..).flatten() {
                gl::DeleteFramebuffers(1, &v);
            }

            for v in self.textures.buf.drain(..).flatten() {
                gl::DeleteTextures(1, &v.id);
            }

            gl::DeleteVertexArrays(1, &self.vao);
        }
    }
}

impl Driver for GLDriver {
    fn name(&self) -> &'static str {
        "GL"
    }

    fn create_vertex_buffer(
        &mut self,
        handle: VertexBufferHandle,
        _: &VertexLayout,
        usage: BufferUsage,
        size: usize,
        data: Option<&[u8]>,
    ) -> Result<()> {
        let id = unsafe { Self::create_buffer(gl::ARRAY_BUFFER, usage, size, data)? };
        self.vertex_buffers.create(handle, id);
        Ok(())
    }

    fn update_vertex_buffer(
        &mut self,
        handle: VertexBufferHandle,
        usage: BufferUsage,
        offset: usize,
        data: &[u8],
    ) -> Result<()> {
        let id = *self
            .vertex_buffers
            .get(handle)
            .ok_or_else(|| format_err!("{:?} is not alive.", handle))?;

        unsafe { Self::update_buffer(gl::ARRAY_BUFFER, id, usage, offset, data) }
    }

    fn delete_vertex_buffer(&mut self, handle: VertexBufferHandle) -> Result<()> {
        if let Some(id) = self.vertex_buffers.free(handle) {
            unsafe { gl::DeleteBuffers(1, &id) };
        }

        Ok(())
    }

    fn create_index_buffer(
        &mut self,
        handle: IndexBufferHandle,
        _: IndexType,
        usage: BufferUsage,
        size: usize,
        data: Option<&[u8]>,
    ) -> Result<()> {
        let id = unsafe { Self::create_buffer(gl::ELEMENT_ARRAY_BUFFER, usage, size, data)? };
        self.index_buffers.create(handle, id);
        Ok(())
    }

    fn update_index_buffer(
        &mut self,
        handle: IndexBufferHandle,
        usage: BufferUsage,
        offset: usize,
        data: &[u8],
    ) -> Result<()> {
        let id = *self
            .index_buffers
            .get(handle)
            .ok_or_else(|| format_err!("{:?} is not alive.", handle))?;

        unsafe { Self::update_buffer(gl::ELEMENT_ARRAY_BUFFER, id, usage, offset, data) }
    }

    fn delete_index_buffer(&mut self, handle: IndexBufferHandle) -> Result<()> {
        if let Some(id) = self.index_buffers.free(handle) {
            unsafe { gl::DeleteBuffers(1, &id) };
        }

        Ok(())
    }

    fn create_shader(
        &mut self,
        handle: ShaderHandle,
        shader_type: ShaderType,
        source: &str,
    ) -> Result<()> {
        let id = unsafe { Self::compile(shader_type.into(), source)? };
        self.shaders.create(handle, id);
        Ok(())
    }

    fn delete_shader(&mut self, handle: ShaderHandle) -> Result<()> {
        if let Some(id) = self.shaders.free(handle) {
            unsafe { gl::DeleteShader(id) };
        }

        Ok(())
    }

    fn create_program(
        &mut self,
        handle: ProgramHandle,
        vs: ShaderHandle,
        fs: ShaderHandle,
    ) -> Result<()> {
        let vs = *self
            .shaders
            .get(vs)
            .ok_or_else(|| format_err!("{:?} is not alive.", vs))?;

        let fs = *self
            .shaders
            .get(fs)
            .ok_or_else(|| format_err!("{:?} is not alive.", fs))?;

        let id = unsafe { Self::link(vs, fs)? };
        self.programs.create(
            handle,
            GLProgram {
                id,
                uniforms: FastHashMap::default(),
            },
        );

        Ok(())
    }

    fn delete_program(&mut self, handle: ProgramHandle) -> Result<()> {
        if let Some(program) = self.programs.free(handle) {
            if self.bound_program == program.id {
                self.bound_program = 0;
            }

            unsafe { gl::DeleteProgram(program.id) };
        }

        Ok(())
    }

    fn create_texture(
        &mut self,
        handle: TextureHandle,
        params: &TextureParams,
        layers: &[TextureData],
    ) -> Result<()> {
        let target: GLenum = params.target.into();
        let (internal_format, format, tp) = types::pixel_format(params.format);

        let uploaded = layers.iter().map(|v| v.level + 1).max().unwrap_or(1);
        let levels = if params.mipmap {
            params.levels()
        } else {
            uploaded
        };

        let faces: Vec<GLenum> = match params.target {
            TextureTarget::Texture2D => vec![gl::TEXTURE_2D],
            TextureTarget::CubeMap => CubeFace::ALL.iter().map(|&v| v.into()).collect(),
        };

        unsafe {
            let mut id = 0;
            gl::GenTextures(1, &mut id);
            if id == 0 {
                bail!("[GL] Failed to generate texture object.");
            }

            gl::BindTexture(target, id);

            for level in 0..uploaded {
                let dimensions = params.dimensions_of(level);
                for &face in &faces {
                    let pixels = layers
                        .iter()
                        .find(|v| {
                            v.level == level
                                && v.face.map(GLenum::from).unwrap_or(gl::TEXTURE_2D) == face
                        })
                        .filter(|v| !v.bytes.is_empty())
                        .map(|v| v.bytes.as_ptr() as *const c_void)
                        .unwrap_or(ptr::null());

                    gl::TexImage2D(
                        face,
                        level as GLint,
                        internal_format as GLint,
                        dimensions.x as GLsizei,
                        dimensions.y as GLsizei,
                        0,
                        format,
                        tp,
                        pixels,
                    );
                }
            }

            Self::bind_texture_params(target, params, levels);
            if params.mipmap {
                gl::GenerateMipmap(target);
            }

            if let Err(err) = check() {
                gl::DeleteTextures(1, &id);
                return Err(err);
            }

            self.textures.create(handle, GLTexture { id, target });
        }

        Ok(())
    }

    fn generate_mipmaps(&mut self, handle: TextureHandle, _: TextureTarget) -> Result<()> {
        let texture = *self
            .textures
            .get(handle)
            .ok_or_else(|| format_err!("{:?} is not alive.", handle))?;

        unsafe {
            gl::BindTexture(texture.target, texture.id);
            gl::GenerateMipmap(texture.target);
        }

        Ok(())
    }

    fn delete_texture(&mut self, handle: TextureHandle) -> Result<()> {
        if let Some(texture) = self.textures.free(handle) {
            unsafe { gl::DeleteTextures(1, &texture.id) };
        }

        Ok(())
    }

    fn create_frame_buffer(&mut self, handle: FrameBufferHandle) -> Result<()> {
        let mut id = 0;
        unsafe { gl::GenFramebuffers(1, &mut id) };
        if id == 0 {
            bail!("[GL] Failed to generate frame buffer object.");
        }

        self.frame_buffers.create(handle, id);
        Ok(())
    }

    fn attach_texture(
        &mut self,
        handle: FrameBufferHandle,
        attachment: Attachment,
        texture: TextureHandle,
        face: Option<CubeFace>,
        level: u32,
    ) -> Result<()> {
        let id = *self
            .frame_buffers
            .get(handle)
            .ok_or_else(|| format_err!("{:?} is not alive.", handle))?;

        let texture = *self
            .textures
            .get(texture)
            .ok_or_else(|| format_err!("{:?} is not alive.", texture))?;

        let target = face.map(GLenum::from).unwrap_or(texture.target);

        unsafe {
            gl::BindFramebuffer(gl::FRAMEBUFFER, id);
            gl::FramebufferTexture2D(
                gl::FRAMEBUFFER,
                attachment.into(),
                target,
                texture.id,
                level as GLint,
            );

            gl::BindFramebuffer(gl::FRAMEBUFFER, self.bound_frame_buffer);
        }

        Ok(())
    }

    fn bind_frame_buffer(&mut self, handle: FrameBufferHandle) -> Result<()> {
        let id = if handle.is_main() {
            0
        } else {
            *self
                .frame_buffers
                .get(handle)
                .ok_or_else(|| format_err!("{:?} is not alive.", handle))?
        };

        unsafe {
            gl::BindFramebuffer(gl::FRAMEBUFFER, id);
            if id != 0 {
                let status = gl::CheckFramebufferStatus(gl::FRAMEBUFFER);
                if status != gl::FRAMEBUFFER_COMPLETE {
                    gl::BindFramebuffer(gl::FRAMEBUFFER, self.bound_frame_buffer);
                    bail!("[GL] {:?} is incomplete ({:#x}).", handle, status);
                }
            }
        }

        self.bound_frame_buffer = id;
        Ok(())
    }

    fn delete_frame_buffer(&mut self, handle: FrameBufferHandle) -> Result<()> {
        if let Some(id) = self.frame_buffers.free(handle) {
            unsafe {
                if self.bound_frame_buffer == id {
                    gl::BindFramebuffer(gl::FRAMEBUFFER, 0);
                    self.bound_frame_buffer = 0;
                }

                gl::DeleteFramebuffers(1, &id);
            }
        }

        Ok(())
    }

    fn clear(&mut self, color: Option<Color>, depth: Option<f32>) -> Result<()> {
        let mut mask = 0;

        unsafe {
            if let Some(v) = color {
                gl::ClearColor(v.r, v.g, v.b, v.a);
                mask |= gl::COLOR_BUFFER_BIT;
            }

            if let Some(v) = depth {
                // Clearing depth has no effects if the writes are masked.
                gl::DepthMask(gl::TRUE);
                gl::ClearDepth(f64::from(v));
                mask |= gl::DEPTH_BUFFER_BIT;
            }

            if mask != 0 {
                gl::Clear(mask);
            }
        }

        Ok(())
    }

    fn set_viewport(&mut self, rect: Rect) -> Result<()> {
        unsafe {
            gl::Viewport(
                rect.x,
                rect.y,
                rect.width as GLsizei,
                rect.height as GLsizei,
            )
        };

        Ok(())
    }

    fn set_scissor(&mut self, rect: Rect) -> Result<()> {
        unsafe {
            gl::Scissor(
                rect.x,
                rect.y,
                rect.width as GLsizei,
                rect.height as GLsizei,
            )
        };

        Ok(())
    }

    fn bind_program(&mut self, handle: ProgramHandle) -> Result<()> {
        self.use_program(handle)
    }

    fn set_color_blend(
        &mut self,
        blend: Option<(Equation, BlendFactor, BlendFactor)>,
    ) -> Result<()> {
        unsafe {
            if let Some((equation, src, dst)) = blend {
                gl::Enable(gl::BLEND);
                gl::BlendFunc(src.into(), dst.into());
                gl::BlendEquation(equation.into());
            } else {
                gl::Disable(gl::BLEND);
            }
        }

        Ok(())
    }

    fn set_cull_face(&mut self, face: CullFace) -> Result<()> {
        unsafe {
            match face {
                CullFace::Nothing => gl::Disable(gl::CULL_FACE),
                CullFace::Front => {
                    gl::Enable(gl::CULL_FACE);
                    gl::CullFace(gl::FRONT);
                }
                CullFace::Back => {
                    gl::Enable(gl::CULL_FACE);
                    gl::CullFace(gl::BACK);
                }
            }
        }

        Ok(())
    }

    fn set_polygon_mode(&mut self, mode: PolygonMode) -> Result<()> {
        unsafe { gl::PolygonMode(gl::FRONT_AND_BACK, mode.into()) };
        Ok(())
    }

    fn set_depth_test(&mut self, enable: bool) -> Result<()> {
        unsafe {
            if enable {
                gl::Enable(gl::DEPTH_TEST);
            } else {
                gl::Disable(gl::DEPTH_TEST);
            }
        }

        Ok(())
    }

    fn set_scissor_test(&mut self, enable: bool) -> Result<()> {
        unsafe {
            if enable {
                gl::Enable(gl::SCISSOR_TEST);
            } else {
                gl::Disable(gl::SCISSOR_TEST);
            }
        }

        Ok(())
    }

    fn set_uniform(
        &mut self,
        program: ProgramHandle,
        name: &str,
        value: &ParamValue,
    ) -> Result<()> {
        self.use_program(program)?;

        let location = match self.uniform_location(program, name)? {
            Some(location) => location,
            None => return Ok(()),
        };

        unsafe {
            match *value {
                ParamValue::Float(v) => gl::Uniform1f(location, v),
                ParamValue::Vec3(v) => gl::Uniform3fv(location, 1, v.as_ptr()),
                ParamValue::Vec4(v) => gl::Uniform4fv(location, 1, v.as_ptr()),
                ParamValue::Mat3(v) => {
                    gl::UniformMatrix3fv(location, 1, gl::FALSE, v.as_ptr() as *const f32)
                }
                ParamValue::Mat4(v) => {
                    gl::UniformMatrix4fv(location, 1, gl::FALSE, v.as_ptr() as *const f32)
                }
                ParamValue::Texture(_) => {
                    bail!("[GL] Texture {} must be bound to a texture unit.", name)
                }
            }
        }

        Ok(())
    }

    fn bind_texture(
        &mut self,
        program: ProgramHandle,
        name: &str,
        unit: u32,
        texture: TextureHandle,
        _: TextureTarget,
    ) -> Result<()> {
        let texture = *self
            .textures
            .get(texture)
            .ok_or_else(|| format_err!("{:?} is not alive.", texture))?;

        self.use_program(program)?;

        unsafe {
            gl::ActiveTexture(gl::TEXTURE0 + unit);
            gl::BindTexture(texture.target, texture.id);
        }

        if let Some(location) = self.uniform_location(program, name)? {
            unsafe { gl::Uniform1i(location, unit as GLint) };
        }

        Ok(())
    }

    fn draw(
        &mut self,
        vertex_buffer: VertexBufferHandle,
        layout: &VertexLayout,
        primitive: Primitive,
        first: u32,
        count: u32,
    ) -> Result<()> {
        let vbo = *self
            .vertex_buffers
            .get(vertex_buffer)
            .ok_or_else(|| format_err!("{:?} is not alive.", vertex_buffer))?;

        unsafe {
            gl::BindBuffer(gl::ARRAY_BUFFER, vbo);
            self.bind_attributes(layout);
            gl::DrawArrays(primitive.into(), first as GLint, count as GLsizei);
        }

        Ok(())
    }

    fn draw_indexed(
        &mut self,
        vertex_buffer: VertexBufferHandle,
        layout: &VertexLayout,
        index_buffer: IndexBufferHandle,
        index_type: IndexType,
        primitive: Primitive,
        offset: u32,
        count: u32,
    ) -> Result<()> {
        let vbo = *self
            .vertex_buffers
            .get(vertex_buffer)
            .ok_or_else(|| format_err!("{:?} is not alive.", vertex_buffer))?;

        let ibo = *self
            .index_buffers
            .get(index_buffer)
            .ok_or_else(|| format_err!("{:?} is not alive.", index_buffer))?;

        let start = offset as usize * index_type.size() as usize;

        unsafe {
            gl::BindBuffer(gl::ARRAY_BUFFER, vbo);
            self.bind_attributes(layout);
            gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, ibo);
            gl::DrawElements(
                primitive.into(),
                count as GLsizei,
                index_type.into(),
                start as *const c_void,
            );
        }

        Ok(())
    }

    fn check(&mut self) -> Result<()> {
        unsafe { check() }
    }
}

unsafe fn check() -> Result<()> {
    match gl::GetError() {
        gl::NO_ERROR => Ok(()),
        gl::INVALID_ENUM => {
            bail!("[GL] An unacceptable value is specified for an enumerated argument.")
        }
        gl::INVALID_VALUE => bail!("[GL] A numeric argument is out of range."),
        gl::INVALID_OPERATION => {
            bail!("[GL] The specified operation is not allowed in the current state.")
        }
        gl::INVALID_FRAMEBUFFER_OPERATION => {
            bail!("[GL] The frame buffer object is not complete.")
        }
        gl::OUT_OF_MEMORY => bail!("[GL] There is not enough memory left to execute the command."),
        code => bail!("[GL] Unknown OpenGL error {:#x}.", code),
    }
}
