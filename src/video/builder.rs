//! Fluent builders of the resources which are described by many parameters.

use crate::math::prelude::Vector2;

use super::assets::prelude::*;
use super::device::GraphicsDevice;
use super::errors::Result;

/// Builds a texture with the device it is borrowed from.
pub struct TextureBuilder<'a> {
    device: &'a mut GraphicsDevice,
    params: TextureParams,
    layers: Vec<TextureData>,
    free_host_data: bool,
}

impl<'a> TextureBuilder<'a> {
    pub(crate) fn new(device: &'a mut GraphicsDevice) -> Self {
        TextureBuilder {
            device,
            params: TextureParams::default(),
            layers: Vec::new(),
            free_host_data: true,
        }
    }

    pub fn with_target(mut self, target: TextureTarget) -> Self {
        self.params.target = target;
        self
    }

    pub fn with_format(mut self, format: PixelFormat) -> Self {
        self.params.format = format;
        self
    }

    pub fn with_wrap(mut self, wrap: TextureWrap) -> Self {
        self.params.wrap = wrap;
        self
    }

    pub fn with_filter(mut self, filter: TextureFilter) -> Self {
        self.params.filter = filter;
        self
    }

    /// Generates the full mip chain after the layers have been uploaded.
    pub fn with_mipmap(mut self, mipmap: bool) -> Self {
        self.params.mipmap = mipmap;
        self
    }

    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.params.dimensions = Vector2::new(width, height);
        self
    }

    /// Adds the bytes of mip `level` of a 2D texture.
    pub fn with_data(mut self, level: u32, bytes: Vec<u8>) -> Self {
        self.layers.push(TextureData::new(level, bytes));
        self
    }

    /// Adds the bytes of mip `level` of a cube face.
    pub fn with_face(mut self, face: CubeFace, level: u32, bytes: Vec<u8>) -> Self {
        self.layers.push(TextureData::face(face, level, bytes));
        self
    }

    /// Keeps the host bytes alive after uploading. They are released by default.
    pub fn keep_host_data(mut self) -> Self {
        self.free_host_data = false;
        self
    }

    pub fn finish(mut self) -> Result<TextureHandle> {
        self.device
            .make_texture(&mut self.layers, self.params, self.free_host_data)
    }
}

/// Builds a material with the device it is borrowed from.
pub struct MaterialBuilder<'a> {
    device: &'a mut GraphicsDevice,
    programs: Vec<ProgramHandle>,
    alpha_mode: AlphaMode,
    state: RenderState,
    params: Vec<(String, ParamValue)>,
}

impl<'a> MaterialBuilder<'a> {
    pub(crate) fn new(device: &'a mut GraphicsDevice) -> Self {
        MaterialBuilder {
            device,
            programs: Vec::new(),
            alpha_mode: AlphaMode::default(),
            state: RenderState::default(),
            params: Vec::new(),
        }
    }

    /// Adds a program variant. The first one is active after building.
    pub fn with_program(mut self, program: ProgramHandle) -> Self {
        self.programs.push(program);
        self
    }

    pub fn with_alpha_mode(mut self, alpha_mode: AlphaMode) -> Self {
        self.alpha_mode = alpha_mode;
        self
    }

    pub fn with_color_blend(
        mut self,
        equation: Equation,
        src: BlendFactor,
        dst: BlendFactor,
    ) -> Self {
        self.state.color_blend = Some((equation, src, dst));
        self
    }

    pub fn with_cull_face(mut self, cull_face: CullFace) -> Self {
        self.state.cull_face = cull_face;
        self
    }

    pub fn with_polygon_mode(mut self, polygon_mode: PolygonMode) -> Self {
        self.state.polygon_mode = polygon_mode;
        self
    }

    pub fn with_depth_test(mut self, enable: bool) -> Self {
        self.state.depth_test = enable;
        self
    }

    pub fn with_scissor_test(mut self, enable: bool) -> Self {
        self.state.scissor_test = enable;
        self
    }

    pub fn with_param<T1, T2>(mut self, name: T1, value: T2) -> Self
    where
        T1: Into<String>,
        T2: Into<ParamValue>,
    {
        self.params.push((name.into(), value.into()));
        self
    }

    pub fn finish(self) -> Result<MaterialHandle> {
        let mut material = Material::new(self.programs, self.alpha_mode, self.state);
        for (name, value) in self.params {
            material = material.with_param(name, value);
        }

        self.device.make_material(material)
    }
}

/// Builds a frame buffer, and the textures backing its attachments, with the device it
/// is borrowed from.
pub struct FrameBufferBuilder<'a> {
    device: &'a mut GraphicsDevice,
    dimensions: Vector2<u32>,
    wrap: TextureWrap,
    filter: TextureFilter,
    attachments: Vec<(Attachment, PixelFormat)>,
}

impl<'a> FrameBufferBuilder<'a> {
    /// The frame buffer has the same size as the drawable area of window by default.
    pub(crate) fn new(device: &'a mut GraphicsDevice) -> Self {
        let dimensions = device.drawable_size();
        FrameBufferBuilder {
            device,
            dimensions,
            wrap: TextureWrap::Clamp,
            filter: TextureFilter::Linear,
            attachments: Vec::new(),
        }
    }

    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.dimensions = Vector2::new(width, height);
        self
    }

    pub fn with_wrap(mut self, wrap: TextureWrap) -> Self {
        self.wrap = wrap;
        self
    }

    pub fn with_filter(mut self, filter: TextureFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_attachment(mut self, attachment: Attachment, format: PixelFormat) -> Self {
        self.attachments.push((attachment, format));
        self
    }

    pub fn finish(self) -> Result<FrameBufferHandle> {
        let descs: Vec<_> = self
            .attachments
            .iter()
            .map(|&(attachment, format)| RenderTextureDesc {
                attachment,
                format,
                wrap: self.wrap,
                filter: self.filter,
                dimensions: self.dimensions,
            })
            .collect();

        self.device.make_frame_buffer(&descs)
    }
}
