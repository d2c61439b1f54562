use super::assets::prelude::*;

#[derive(Debug, Fail)]
pub enum Error {
    #[fail(display = "{} is invalid.", _0)]
    VertexBufferHandleInvalid(VertexBufferHandle),
    #[fail(display = "{} is invalid.", _0)]
    IndexBufferHandleInvalid(IndexBufferHandle),
    #[fail(display = "{} is invalid.", _0)]
    ShaderHandleInvalid(ShaderHandle),
    #[fail(display = "{} is invalid.", _0)]
    ProgramHandleInvalid(ProgramHandle),
    #[fail(display = "{} is invalid.", _0)]
    TextureHandleInvalid(TextureHandle),
    #[fail(display = "{} is invalid.", _0)]
    FrameBufferHandleInvalid(FrameBufferHandle),
    #[fail(display = "{} is invalid.", _0)]
    MaterialHandleInvalid(MaterialHandle),
    #[fail(display = "{} is static and could not be updated.", _0)]
    VertexBufferImmutable(VertexBufferHandle),
    #[fail(display = "{} is static and could not be updated.", _0)]
    IndexBufferImmutable(IndexBufferHandle),
    #[fail(display = "Run out of {} handles.", _0)]
    HandleExhausted(&'static str),
    #[fail(display = "Failed to compile shader, errors: \n{}.", _0)]
    ShaderCompileFailure(String),
    #[fail(display = "Failed to link program, errors: \n{}.", _0)]
    ProgramLinkFailure(String),
    #[fail(display = "Texture is invalid: {}.", _0)]
    TextureInvalid(String),
    #[fail(display = "Frame buffer is invalid: {}.", _0)]
    FrameBufferInvalid(String),
    #[fail(display = "Backend: {}", _0)]
    Backend(String),
}

pub type Result<T> = ::std::result::Result<T, Error>;

impl From<::failure::Error> for Error {
    fn from(err: ::failure::Error) -> Error {
        Error::Backend(format!("{}", err))
    }
}
