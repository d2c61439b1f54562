//! A `Material` is a named collection of shading parameters, plus the fixed-function
//! state and programs used to draw with them.

use smallvec::SmallVec;

use crate::math::prelude::{Matrix3, Matrix4, Vector3, Vector4};
use crate::utils::prelude::{FastHashMap, HashValue};

use super::shader::ProgramHandle;
use super::texture::TextureHandle;

impl_handle!(MaterialHandle);

/// How the alpha channel of the rendered color is interpreted.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum AlphaMode {
    /// The alpha value is ignored and the rendered output is fully opaque.
    Opaque,
    /// The rendered output is either fully opaque or fully transparent depending on
    /// the alpha value and the specified alpha cutoff.
    Mask,
    /// The alpha value is used to composite the source and destination areas.
    Blend,
}

impl Default for AlphaMode {
    fn default() -> Self {
        AlphaMode::Opaque
    }
}

/// Specify whether front- or back-facing polygons can be culled.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum CullFace {
    Nothing,
    Front,
    Back,
}

/// Specify how polygons are rasterized.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum PolygonMode {
    Point,
    Line,
    Fill,
}

/// Specifies how incoming RGBA values (source) and the RGBA in framebuffer (destination)
/// are combined.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum Equation {
    /// Adds source and destination. Source and destination are multiplied
    /// by blending parameters before addition.
    Add,
    /// Subtracts destination from source. Source and destination are
    /// multiplied by blending parameters before subtraction.
    Subtract,
    /// Subtracts source from destination. Source and destination are
    /// multiplied by blending parameters before subtraction.
    ReverseSubtract,
}

/// Blend values.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum BlendValue {
    SourceColor,
    SourceAlpha,
    DestinationColor,
    DestinationAlpha,
}

/// Blend factors.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum BlendFactor {
    Zero,
    One,
    Value(BlendValue),
    OneMinusValue(BlendValue),
}

/// The fixed-function state a material is drawn with.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub struct RenderState {
    pub color_blend: Option<(Equation, BlendFactor, BlendFactor)>,
    pub cull_face: CullFace,
    pub polygon_mode: PolygonMode,
    pub depth_test: bool,
    pub scissor_test: bool,
}

impl Default for RenderState {
    fn default() -> Self {
        RenderState {
            color_blend: None,
            cull_face: CullFace::Back,
            polygon_mode: PolygonMode::Fill,
            depth_test: true,
            scissor_test: false,
        }
    }
}

/// The value of a material parameter. Matrices are supplied in column major order.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParamValue {
    Float(f32),
    Vec3([f32; 3]),
    Vec4([f32; 4]),
    Mat3([[f32; 3]; 3]),
    Mat4([[f32; 4]; 4]),
    Texture(TextureHandle),
}

impl ParamValue {
    #[inline]
    pub fn is_texture(&self) -> bool {
        match *self {
            ParamValue::Texture(_) => true,
            _ => false,
        }
    }
}

impl From<f32> for ParamValue {
    fn from(v: f32) -> Self {
        ParamValue::Float(v)
    }
}

impl From<[f32; 3]> for ParamValue {
    fn from(v: [f32; 3]) -> Self {
        ParamValue::Vec3(v)
    }
}

impl From<Vector3<f32>> for ParamValue {
    fn from(v: Vector3<f32>) -> Self {
        ParamValue::Vec3(v.into())
    }
}

impl From<[f32; 4]> for ParamValue {
    fn from(v: [f32; 4]) -> Self {
        ParamValue::Vec4(v)
    }
}

impl From<Vector4<f32>> for ParamValue {
    fn from(v: Vector4<f32>) -> Self {
        ParamValue::Vec4(v.into())
    }
}

impl From<[[f32; 3]; 3]> for ParamValue {
    fn from(v: [[f32; 3]; 3]) -> Self {
        ParamValue::Mat3(v)
    }
}

impl From<Matrix3<f32>> for ParamValue {
    fn from(v: Matrix3<f32>) -> Self {
        ParamValue::Mat3(v.into())
    }
}

impl From<[[f32; 4]; 4]> for ParamValue {
    fn from(v: [[f32; 4]; 4]) -> Self {
        ParamValue::Mat4(v)
    }
}

impl From<Matrix4<f32>> for ParamValue {
    fn from(v: Matrix4<f32>) -> Self {
        ParamValue::Mat4(v.into())
    }
}

impl From<TextureHandle> for ParamValue {
    fn from(v: TextureHandle) -> Self {
        ParamValue::Texture(v)
    }
}

/// A material. The structural fields (alpha mode, programs and render state) are fixed
/// once it has been built, while the parameters could be overwritten by name at any time.
///
/// Parameters keep their insertion order, so the position of a parameter is stable
/// during the lifetime of material.
#[derive(Debug, Clone, Default)]
pub struct Material {
    alpha_mode: AlphaMode,
    programs: SmallVec<[ProgramHandle; 4]>,
    active: usize,
    state: RenderState,
    params: Vec<(String, ParamValue)>,
    positions: FastHashMap<HashValue<str>, usize>,
}

impl Material {
    pub fn new<T>(programs: T, alpha_mode: AlphaMode, state: RenderState) -> Self
    where
        T: IntoIterator<Item = ProgramHandle>,
    {
        Material {
            alpha_mode,
            programs: programs.into_iter().collect(),
            active: 0,
            state,
            params: Vec::new(),
            positions: FastHashMap::default(),
        }
    }

    /// Appends a parameter, or overwrites the value if `name` exists already.
    pub fn with_param<T1, T2>(mut self, name: T1, value: T2) -> Self
    where
        T1: Into<String>,
        T2: Into<ParamValue>,
    {
        let name = name.into();
        let value = value.into();

        if let Some(v) = self.position(&name) {
            self.params[v].1 = value;
            return self;
        }

        self.positions.insert(HashValue::from(&name), self.params.len());
        self.params.push((name, value));
        self
    }

    #[inline]
    pub fn alpha_mode(&self) -> AlphaMode {
        self.alpha_mode
    }

    #[inline]
    pub fn state(&self) -> &RenderState {
        &self.state
    }

    /// Gets the active program, or the invalid handle if this material has none.
    #[inline]
    pub fn program(&self) -> ProgramHandle {
        self.programs
            .get(self.active)
            .cloned()
            .unwrap_or(ProgramHandle::INVALID)
    }

    #[inline]
    pub fn programs(&self) -> &[ProgramHandle] {
        &self.programs
    }

    /// Selects the program variant at `index` as the active one. Returns false if the
    /// index is out of range.
    pub fn select_program(&mut self, index: usize) -> bool {
        if index >= self.programs.len() {
            return false;
        }

        self.active = index;
        true
    }

    /// The identity of this material used in sort keys. Materials sharing the same
    /// active program share the identity.
    #[inline]
    pub fn identity(&self) -> u16 {
        self.program().index()
    }

    /// Overwrites the value of a existing parameter. Returns false if there is no
    /// parameter named `name`.
    pub fn set<T1, T2>(&mut self, name: T1, value: T2) -> bool
    where
        T1: AsRef<str>,
        T2: Into<ParamValue>,
    {
        match self.position(name) {
            Some(v) => {
                self.params[v].1 = value.into();
                true
            }
            None => false,
        }
    }

    #[inline]
    pub fn get<T: AsRef<str>>(&self, name: T) -> Option<&ParamValue> {
        self.position(name).map(|v| &self.params[v].1)
    }

    /// Gets the position of parameter `name`.
    #[inline]
    pub fn position<T: AsRef<str>>(&self, name: T) -> Option<usize> {
        self.positions.get(&HashValue::from(name)).cloned()
    }

    /// Gets the parameter at `position`.
    #[inline]
    pub fn param_at(&self, position: usize) -> Option<(&str, &ParamValue)> {
        self.params.get(position).map(|v| (v.0.as_str(), &v.1))
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.params.iter().map(|v| (v.0.as_str(), &v.1))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::math::SquareMatrix;

    fn material() -> Material {
        Material::new(
            vec![ProgramHandle::new(3), ProgramHandle::new(5)],
            AlphaMode::Opaque,
            RenderState::default(),
        )
        .with_param("u_Time", 0.0f32)
        .with_param("u_Color", [1.0f32, 0.0, 0.0, 1.0])
        .with_param("u_MVP", Matrix4::<f32>::identity())
        .with_param("u_Albedo", TextureHandle::new(1))
    }

    #[test]
    fn params() {
        let mut m = material();
        assert_eq!(m.len(), 4);
        assert_eq!(m.position("u_Color"), Some(1));
        assert_eq!(m.get("u_Time"), Some(&ParamValue::Float(0.0)));
        assert!(m.get("u_Nothing").is_none());

        assert!(m.set("u_Time", 2.0f32));
        assert!(!m.set("u_Nothing", 2.0f32));
        assert_eq!(m.get("u_Time"), Some(&ParamValue::Float(2.0)));
        assert_eq!(m.len(), 4);

        let names: Vec<_> = m.iter().map(|v| v.0).collect();
        assert_eq!(names, vec!["u_Time", "u_Color", "u_MVP", "u_Albedo"]);
        assert_eq!(m.param_at(3).unwrap().1, &ParamValue::Texture(TextureHandle::new(1)));
        assert!(m.param_at(3).unwrap().1.is_texture());
    }

    #[test]
    fn rewrite() {
        let m = material().with_param("u_Time", 1.0f32);
        assert_eq!(m.len(), 4);
        assert_eq!(m.position("u_Time"), Some(0));
        assert_eq!(m.get("u_Time"), Some(&ParamValue::Float(1.0)));
    }

    #[test]
    fn programs() {
        let mut m = material();
        assert_eq!(m.program(), ProgramHandle::new(3));
        assert_eq!(m.identity(), 3);

        assert!(m.select_program(1));
        assert_eq!(m.program(), ProgramHandle::new(5));
        assert!(!m.select_program(2));
        assert_eq!(m.program(), ProgramHandle::new(5));

        let empty = Material::default();
        assert_eq!(empty.program(), ProgramHandle::INVALID);
    }
}
