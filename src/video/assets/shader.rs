//! Shader stages and the programs linked from them.

use std::fmt;

impl_handle!(ShaderHandle);
impl_handle!(ProgramHandle);

/// The programmable stage a shader object runs at.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum ShaderType {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ShaderType::Vertex => write!(f, "vertex shader"),
            ShaderType::Fragment => write!(f, "fragment shader"),
        }
    }
}
