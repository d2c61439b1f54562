//! The centralized management of video sub-system.

use crate::math::prelude::{Rect, Vector2};
use crate::utils::prelude::{FastHashMap, HandleLike, HandlePool};
use crate::window::prelude::{ContextHandle, Window};

use super::assets::frame_buffer;
use super::assets::prelude::*;
use super::backends::headless::HeadlessDriver;
use super::backends::{Backend, Driver};
use super::builder::{FrameBufferBuilder, MaterialBuilder, TextureBuilder};
use super::cache::{MaterialCache, ProgramCache, TextureCache};
use super::command_list::CommandList;
use super::errors::{Error, Result};
use super::settings::VideoSettings;
use super::sort_key::{self, SortKey};
use super::visitor::{FrameState, SubmitStats};

/// `GraphicsDevice` allocates the handles of resources, owns the caches and the
/// backend, and dispatches command lists.
///
/// It's bound to the thread where its graphics context is current.
pub struct GraphicsDevice {
    settings: VideoSettings,
    window: Box<dyn Window>,
    context: ContextHandle,
    backend: Backend,

    vertex_buffers: HandlePool<VertexBufferHandle>,
    index_buffers: HandlePool<IndexBufferHandle>,
    shaders: HandlePool<ShaderHandle>,
    programs: HandlePool<ProgramHandle>,
    textures: HandlePool<TextureHandle>,
    frame_buffers: HandlePool<FrameBufferHandle>,
    render_textures: FastHashMap<FrameBufferHandle, Vec<TextureHandle>>,

    materials: MaterialCache,
    texture_cache: TextureCache,
    program_cache: ProgramCache,
}

impl GraphicsDevice {
    /// Creates a graphics context in `window` and makes it current, then creates the
    /// driver with `driver`.
    pub fn new<F>(mut window: Box<dyn Window>, settings: VideoSettings, driver: F) -> Result<Self>
    where
        F: FnOnce(&dyn Window) -> crate::errors::Result<Box<dyn Driver>>,
    {
        let context = window.make_context()?;
        window.set_current_context(context)?;

        let driver = driver(window.as_ref())?;
        let backend = Backend::new(driver, &settings);

        info!(
            "Creates graphics device with {:?} drawable area.",
            window.get_drawable_size()
        );

        Ok(GraphicsDevice {
            settings,
            window,
            context,
            backend,

            vertex_buffers: HandlePool::new(),
            index_buffers: HandlePool::new(),
            shaders: HandlePool::new(),
            programs: HandlePool::new(),
            textures: HandlePool::new(),
            frame_buffers: HandlePool::with_reserved(1),
            render_textures: FastHashMap::default(),

            materials: MaterialCache::new(),
            texture_cache: TextureCache::new(),
            program_cache: ProgramCache::new(),
        })
    }

    /// Creates a device which records native calls instead of issuing them.
    pub fn headless(window: Box<dyn Window>, settings: VideoSettings) -> Result<Self> {
        GraphicsDevice::new(window, settings, |_| Ok(Box::new(HeadlessDriver::new())))
    }

    #[inline]
    pub fn settings(&self) -> &VideoSettings {
        &self.settings
    }

    #[inline]
    pub fn backend(&self) -> &Backend {
        &self.backend
    }

    #[inline]
    pub fn context(&self) -> ContextHandle {
        self.context
    }

    /// Gets the region of window which we are drawing into.
    #[inline]
    pub fn viewport(&self) -> Rect {
        self.window.get_viewport()
    }

    /// Gets the size in pixels of the main frame buffer.
    #[inline]
    pub fn drawable_size(&self) -> Vector2<u32> {
        self.window.get_drawable_size()
    }

    /// Creates a command list with the capacity in settings.
    pub fn make_command_list(&self) -> CommandList {
        CommandList::with_capacity(self.settings.command_buffer_capacity)
    }

    /// Sorts `list` if required, and dispatches it to the backend. The state of
    /// previous draws is discarded once the list has been dispatched.
    pub fn submit(&mut self, mut list: CommandList) -> SubmitStats {
        if self.settings.sort_on_submit && !list.is_sorted() {
            list.sort();
        }

        let mut frame = FrameState::new(&mut self.materials);
        list.accept(&mut self.backend, &mut frame);

        let stats = frame.stats;
        trace!("Submits {:?}.", stats);
        stats
    }

    /// Submits `list`, and presents the back buffer afterwards.
    pub fn submit_and_swap(&mut self, list: CommandList) -> SubmitStats {
        let stats = self.submit(list);
        if let Err(err) = self.window.swap_buffer() {
            error!("Failed to swap buffers. {}", err);
        }

        stats
    }

    /// Makes the sort key of a draw with `material` at `depth`. An invalid material
    /// is treated as an opaque one.
    pub fn make_sort_key(&self, material: MaterialHandle, depth: f32) -> SortKey {
        match self.materials.get(material) {
            Some(v) => sort_key::make_sort_key(v.alpha_mode(), v.identity(), depth),
            None => sort_key::make_sort_key(AlphaMode::Opaque, material.index(), depth),
        }
    }
}

impl GraphicsDevice {
    /// Creates a vertex buffer of `size` bytes. The buffer is filled with `data` if
    /// any, and its layout is fixed for its lifetime.
    pub fn make_vertex_buffer(
        &mut self,
        data: Option<&[u8]>,
        size: usize,
        layout: VertexLayout,
        usage: BufferUsage,
    ) -> Result<VertexBufferHandle> {
        let handle = self
            .vertex_buffers
            .create()
            .ok_or(Error::HandleExhausted("vertex buffer"))?;

        if let Err(err) = self
            .backend
            .create_vertex_buffer(handle, layout, usage, size, data)
        {
            self.vertex_buffers.free(handle);
            return Err(err);
        }

        Ok(handle)
    }

    pub fn destroy_vertex_buffer(&mut self, handle: VertexBufferHandle) {
        if self.vertex_buffers.free(handle) {
            if let Err(err) = self.backend.delete_vertex_buffer(handle) {
                error!("{}", err);
            }
        }
    }

    pub fn make_index_buffer(
        &mut self,
        data: Option<&[u8]>,
        size: usize,
        index_type: IndexType,
        usage: BufferUsage,
    ) -> Result<IndexBufferHandle> {
        let handle = self
            .index_buffers
            .create()
            .ok_or(Error::HandleExhausted("index buffer"))?;

        if let Err(err) = self
            .backend
            .create_index_buffer(handle, index_type, usage, size, data)
        {
            self.index_buffers.free(handle);
            return Err(err);
        }

        Ok(handle)
    }

    pub fn destroy_index_buffer(&mut self, handle: IndexBufferHandle) {
        if self.index_buffers.free(handle) {
            if let Err(err) = self.backend.delete_index_buffer(handle) {
                error!("{}", err);
            }
        }
    }

    /// Compiles a shader. The diagnostics are logged if compilation fails, and the
    /// returned handle is a placeholder which can't be linked.
    pub fn make_shader(&mut self, shader_type: ShaderType, source: &str) -> ShaderHandle {
        let handle = match self.shaders.create() {
            Some(handle) => handle,
            None => {
                error!("{}", Error::HandleExhausted("shader"));
                return ShaderHandle::INVALID;
            }
        };

        if let Err(err) = self.backend.create_shader(handle, shader_type, source) {
            error!("{} of {}. {}", shader_type, handle, err);
        }

        handle
    }

    pub fn destroy_shader(&mut self, handle: ShaderHandle) {
        if self.shaders.free(handle) {
            if let Err(err) = self.backend.delete_shader(handle) {
                error!("{}", err);
            }
        }
    }

    /// Links a program. The diagnostics are logged if linking fails, and the returned
    /// handle is a placeholder. Draws with placeholder programs are skipped.
    pub fn make_program(&mut self, vs: ShaderHandle, fs: ShaderHandle) -> ProgramHandle {
        let handle = match self.programs.create() {
            Some(handle) => handle,
            None => {
                error!("{}", Error::HandleExhausted("program"));
                return ProgramHandle::INVALID;
            }
        };

        if let Err(err) = self.backend.create_program(handle, vs, fs) {
            error!("{} with {} and {}. {}", handle, vs, fs, err);
        }

        handle
    }

    /// Compiles and links a program from sources. Programs which have been linked
    /// from the same sources are shared.
    pub fn program_from_sources(&mut self, vs: &str, fs: &str) -> ProgramHandle {
        let key = ProgramCache::key(vs, fs);
        if let Some(handle) = self.program_cache.get(key) {
            return handle;
        }

        let vs = self.make_shader(ShaderType::Vertex, vs);
        let fs = self.make_shader(ShaderType::Fragment, fs);
        let program = self.make_program(vs, fs);

        self.destroy_shader(vs);
        self.destroy_shader(fs);

        if self.backend.is_program_linked(program) {
            self.program_cache.add(key, program);
        }

        program
    }

    pub fn destroy_program(&mut self, handle: ProgramHandle) {
        if self.programs.free(handle) {
            self.program_cache.remove_handle(handle);
            if let Err(err) = self.backend.delete_program(handle) {
                error!("{}", err);
            }
        }
    }

    /// Creates a texture with the layers. The host bytes of layers are released once
    /// they have been uploaded if `free_host_data` is set.
    pub fn make_texture(
        &mut self,
        layers: &mut [TextureData],
        params: TextureParams,
        free_host_data: bool,
    ) -> Result<TextureHandle> {
        let handle = self
            .textures
            .create()
            .ok_or(Error::HandleExhausted("texture"))?;

        if let Err(err) = self.backend.create_texture(handle, params, layers) {
            self.textures.free(handle);
            return Err(err);
        }

        if free_host_data {
            for v in layers.iter_mut() {
                v.release();
            }
        }

        Ok(handle)
    }

    /// Gets the texture at `path` in cache, or creates it with `func`.
    pub fn texture_from_cache_or<T, F>(&mut self, path: T, func: F) -> Result<TextureHandle>
    where
        T: AsRef<str>,
        F: FnOnce(&mut Self) -> Result<TextureHandle>,
    {
        if let Some(handle) = self.texture_cache.get(&path) {
            if self.textures.contains(handle) {
                return Ok(handle);
            }
        }

        let handle = func(self)?;
        self.texture_cache.add(path, handle);
        Ok(handle)
    }

    pub fn destroy_texture(&mut self, handle: TextureHandle) {
        if self.textures.free(handle) {
            self.texture_cache.remove_handle(handle);
            if let Err(err) = self.backend.delete_texture(handle) {
                error!("{}", err);
            }
        }
    }

    /// Creates a frame buffer, with a texture created for every attachment.
    pub fn make_frame_buffer(&mut self, descs: &[RenderTextureDesc]) -> Result<FrameBufferHandle> {
        frame_buffer::validate(descs)?;

        let mut attachments = Vec::with_capacity(descs.len());
        for desc in descs {
            let params = TextureParams {
                target: TextureTarget::Texture2D,
                format: desc.format,
                wrap: desc.wrap,
                filter: desc.filter,
                mipmap: false,
                dimensions: desc.dimensions,
            };

            match self.make_texture(&mut [], params, true) {
                Ok(texture) => attachments.push((desc.attachment, texture)),
                Err(err) => {
                    self.destroy_render_textures(&attachments);
                    return Err(err);
                }
            }
        }

        let handle = match self.frame_buffers.create() {
            Some(handle) => handle,
            None => {
                self.destroy_render_textures(&attachments);
                return Err(Error::HandleExhausted("frame buffer"));
            }
        };

        if let Err(err) = self.backend.create_frame_buffer(handle, &attachments) {
            self.frame_buffers.free(handle);
            self.destroy_render_textures(&attachments);
            return Err(err);
        }

        let textures = attachments.iter().map(|v| v.1).collect();
        self.render_textures.insert(handle, textures);
        Ok(handle)
    }

    fn destroy_render_textures(&mut self, attachments: &[(Attachment, TextureHandle)]) {
        for &(_, texture) in attachments {
            self.destroy_texture(texture);
        }
    }

    /// Gets the texture which backs `attachment` of frame buffer.
    pub fn render_texture(
        &self,
        handle: FrameBufferHandle,
        attachment: Attachment,
    ) -> Option<TextureHandle> {
        self.backend
            .attachments(handle)?
            .iter()
            .find(|v| v.0 == attachment)
            .map(|v| v.1)
    }

    /// Destroys a frame buffer, and the textures created with it. The main frame buffer
    /// could never be destroyed.
    pub fn destroy_frame_buffer(&mut self, handle: FrameBufferHandle) {
        if !self.frame_buffers.free(handle) {
            return;
        }

        if let Err(err) = self.backend.delete_frame_buffer(handle) {
            error!("{}", err);
        }

        if let Some(textures) = self.render_textures.remove(&handle) {
            for texture in textures {
                self.destroy_texture(texture);
            }
        }
    }

    pub fn make_material(&mut self, material: Material) -> Result<MaterialHandle> {
        self.materials
            .add(material)
            .ok_or(Error::HandleExhausted("material"))
    }

    #[inline]
    pub fn material(&self, handle: MaterialHandle) -> Option<&Material> {
        self.materials.get(handle)
    }

    #[inline]
    pub fn material_mut(&mut self, handle: MaterialHandle) -> Option<&mut Material> {
        self.materials.get_mut(handle)
    }

    pub fn destroy_material(&mut self, handle: MaterialHandle) {
        self.materials.remove(handle);
    }

    pub fn build_texture(&mut self) -> TextureBuilder {
        TextureBuilder::new(self)
    }

    pub fn build_material(&mut self) -> MaterialBuilder {
        MaterialBuilder::new(self)
    }

    pub fn build_frame_buffer(&mut self) -> FrameBufferBuilder {
        FrameBufferBuilder::new(self)
    }

    #[inline]
    pub fn texture_cache(&self) -> &TextureCache {
        &self.texture_cache
    }

    #[inline]
    pub fn program_cache(&self) -> &ProgramCache {
        &self.program_cache
    }

    #[inline]
    pub fn material_cache(&self) -> &MaterialCache {
        &self.materials
    }
}

impl Drop for GraphicsDevice {
    fn drop(&mut self) {
        let frame_buffers: Vec<_> = self.frame_buffers.iter().filter(|v| !v.is_main()).collect();
        for v in frame_buffers {
            self.destroy_frame_buffer(v);
        }

        let textures: Vec<_> = self.textures.iter().collect();
        for v in textures {
            self.destroy_texture(v);
        }

        let programs: Vec<_> = self.programs.iter().collect();
        for v in programs {
            self.destroy_program(v);
        }

        let shaders: Vec<_> = self.shaders.iter().collect();
        for v in shaders {
            self.destroy_shader(v);
        }

        let index_buffers: Vec<_> = self.index_buffers.iter().collect();
        for v in index_buffers {
            self.destroy_index_buffer(v);
        }

        let vertex_buffers: Vec<_> = self.vertex_buffers.iter().collect();
        for v in vertex_buffers {
            self.destroy_vertex_buffer(v);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::video::backends::headless::{Call, HeadlessDriver};
    use crate::window::prelude::HeadlessWindow;

    fn device() -> (GraphicsDevice, HeadlessDriver, HeadlessWindow) {
        let driver = HeadlessDriver::new();
        let window = HeadlessWindow::default();

        let shared = driver.clone();
        let device = GraphicsDevice::new(
            Box::new(window.clone()),
            VideoSettings::default(),
            move |_| Ok(Box::new(shared)),
        )
        .unwrap();

        (device, driver, window)
    }

    #[test]
    fn handles() {
        let (mut device, _, _) = device();
        let layout = VertexLayout::build()
            .with(0, ElementType::Float, 3, false)
            .finish();

        let v1 = device
            .make_vertex_buffer(None, 36, layout.clone(), BufferUsage::Static)
            .unwrap();
        let v2 = device
            .make_vertex_buffer(None, 36, layout.clone(), BufferUsage::Static)
            .unwrap();

        device.destroy_vertex_buffer(v1);
        device.destroy_vertex_buffer(v1);
        assert!(device.backend().vertex_layout(v1).is_none());
        assert!(device.backend().vertex_layout(v2).is_some());

        let v3 = device
            .make_vertex_buffer(None, 36, layout, BufferUsage::Static)
            .unwrap();
        assert_eq!(v3, v1);
    }

    #[test]
    fn placeholders() {
        let (mut device, driver, _) = device();

        let vs = device.make_shader(ShaderType::Vertex, "void main() {}");
        let fs = device.make_shader(ShaderType::Fragment, "   ");
        assert!(vs.is_valid());
        assert!(fs.is_valid());
        assert!(!device.backend().is_shader_compiled(fs));

        let program = device.make_program(vs, fs);
        assert!(program.is_valid());
        assert!(!device.backend().is_program_linked(program));
        assert_eq!(driver.log().count(|v| matches_program(v)), 0);

        device.destroy_program(program);
        device.destroy_program(program);
    }

    fn matches_program(call: &Call) -> bool {
        match *call {
            Call::CreateProgram(..) => true,
            _ => false,
        }
    }

    #[test]
    fn program_cache() {
        let (mut device, driver, _) = device();

        let p1 = device.program_from_sources("void main() {}", "void main() {}");
        let p2 = device.program_from_sources("void main() {}", "void main() {}");
        assert_eq!(p1, p2);
        assert!(device.backend().is_program_linked(p1));
        assert_eq!(driver.log().count(|v| matches_program(v)), 1);
        assert_eq!(device.program_cache().len(), 1);

        device.destroy_program(p1);
        assert_eq!(device.program_cache().len(), 0);

        let p3 = device.program_from_sources("void main() {}", "   ");
        assert!(!device.backend().is_program_linked(p3));
        assert_eq!(device.program_cache().len(), 0);
    }

    #[test]
    fn textures() {
        let (mut device, _, _) = device();

        let mut layers = vec![TextureData::new(0, vec![255; 16])];
        let mut params = TextureParams::default();
        params.dimensions = Vector2::new(2, 2);

        let texture = device.make_texture(&mut layers, params, true).unwrap();
        assert!(layers[0].is_released());
        assert_eq!(device.backend().texture_params(texture), Some(&params));

        let mut layers = vec![TextureData::new(0, vec![255; 16])];
        device.make_texture(&mut layers, params, false).unwrap();
        assert!(!layers[0].is_released());

        params.dimensions = Vector2::new(0, 0);
        assert!(device.make_texture(&mut [], params, true).is_err());

        let cached = device
            .texture_from_cache_or("white.png", |d| d.build_texture().with_dimensions(2, 2).finish())
            .unwrap();
        let again = device
            .texture_from_cache_or("white.png", |_| Err(Error::TextureInvalid("".into())))
            .unwrap();
        assert_eq!(cached, again);

        device.destroy_texture(cached);
        assert!(!device.texture_cache().exists("white.png"));
    }

    #[test]
    fn frame_buffers() {
        let (mut device, driver, _) = device();

        let fb = device
            .build_frame_buffer()
            .with_dimensions(64, 64)
            .with_attachment(Attachment::Color(0), PixelFormat::RGBA8)
            .with_attachment(Attachment::Depth, PixelFormat::Depth24)
            .finish()
            .unwrap();

        assert_ne!(fb, FrameBufferHandle::MAIN);
        let color = device.render_texture(fb, Attachment::Color(0)).unwrap();
        let depth = device.render_texture(fb, Attachment::Depth).unwrap();
        assert_ne!(color, depth);

        let invalid = device
            .build_frame_buffer()
            .with_attachment(Attachment::Depth, PixelFormat::RGBA8)
            .finish();
        assert!(invalid.is_err());

        driver.log().clear();
        device.destroy_frame_buffer(FrameBufferHandle::MAIN);
        assert!(driver.log().is_empty());

        device.destroy_frame_buffer(fb);
        assert!(device.backend().texture_params(color).is_none());
        assert!(device.backend().texture_params(depth).is_none());
        assert_eq!(driver.log().len(), 3);
    }

    #[test]
    fn swap() {
        let (mut device, _, window) = device();
        assert_eq!(device.context(), ContextHandle::new(0));

        let list = device.make_command_list();
        device.submit(list);
        assert_eq!(window.swaps(), 0);

        let stats = device.submit_and_swap(device.make_command_list());
        assert_eq!(stats, SubmitStats::default());
        assert_eq!(window.swaps(), 1);
    }
}
