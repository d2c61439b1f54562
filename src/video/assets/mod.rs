pub mod frame_buffer;
pub mod material;
pub mod mesh;
pub mod shader;
pub mod texture;

pub mod prelude {
    pub use super::frame_buffer::{Attachment, FrameBufferHandle, RenderTextureDesc};

    pub use super::material::{
        AlphaMode, BlendFactor, BlendValue, CullFace, Equation, Material, MaterialHandle,
        ParamValue, PolygonMode, RenderState,
    };

    pub use super::mesh::{
        BufferUsage, ElementType, IndexBufferHandle, IndexType, Primitive, VertexAttribute,
        VertexBufferHandle, VertexLayout, VertexLayoutBuilder,
    };

    pub use super::shader::{ProgramHandle, ShaderHandle, ShaderType};

    pub use super::texture::{
        CubeFace, PixelFormat, TextureData, TextureFilter, TextureHandle, TextureParams,
        TextureTarget, TextureWrap,
    };
}
