//! Vertex and index buffers, and the layouts used to interpret their raw bytes.

use smallvec::SmallVec;

use crate::video::MAX_VERTEX_ATTRIBUTES;

impl_handle!(VertexBufferHandle);
impl_handle!(IndexBufferHandle);

/// Hint abouts the intended update strategy of the data.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum BufferUsage {
    /// The data store contents will be specified once and used many times. This is
    /// the most common and most efficient usage.
    Static,
    /// The data store contents will be modified repeatedly and used many times.
    Dynamic,
    /// The data store contents will be modified once per frame and used at most a
    /// few times.
    Stream,
}

impl Default for BufferUsage {
    fn default() -> Self {
        BufferUsage::Static
    }
}

/// The data type of each component of a vertex attribute.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum ElementType {
    Byte,
    UByte,
    Short,
    UShort,
    Int,
    UInt,
    HalfFloat,
    Float,
}

impl ElementType {
    /// Returns the size in bytes of one component.
    pub fn size(self) -> u32 {
        match self {
            ElementType::Byte | ElementType::UByte => 1,
            ElementType::Short | ElementType::UShort | ElementType::HalfFloat => 2,
            ElementType::Int | ElementType::UInt | ElementType::Float => 4,
        }
    }
}

/// The details of a vertex attribute.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub struct VertexAttribute {
    /// The attribute location in program.
    pub index: u32,
    /// The number of components per generic vertex element.
    pub components: u8,
    /// The data type of each component of this element.
    pub element_type: ElementType,
    /// Whether fixed-point data values should be normalized.
    pub normalized: bool,
    /// The byte offset between consecutive vertices.
    pub stride: u32,
    /// The byte offset of this attribute in one vertex.
    pub offset: u32,
}

impl VertexAttribute {
    /// Returns the size in bytes of this attribute in one vertex.
    #[inline]
    pub fn size(&self) -> u32 {
        u32::from(self.components) * self.element_type.size()
    }
}

/// `VertexLayout` defines how a single vertex structure looks like. A vertex
/// layout is an ordered collection of vertex attributes.
#[derive(Debug, Default, PartialEq, Eq, Clone, Hash, Serialize, Deserialize)]
pub struct VertexLayout {
    stride: u32,
    attributes: SmallVec<[VertexAttribute; MAX_VERTEX_ATTRIBUTES]>,
}

impl VertexLayout {
    /// Creates a new an empty `VertexLayoutBuilder`.
    #[inline]
    pub fn build() -> VertexLayoutBuilder {
        VertexLayoutBuilder::new()
    }

    /// Stride of single vertex structure.
    #[inline]
    pub fn stride(&self) -> u32 {
        self.stride
    }

    /// Returns the number of attributes in the layout.
    #[inline]
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Returns the attribute bound to `index`.
    pub fn attribute(&self, index: u32) -> Option<&VertexAttribute> {
        self.attributes.iter().find(|v| v.index == index)
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &VertexAttribute> {
        self.attributes.iter()
    }

    /// Returns the number of bytes that `num` vertices take.
    #[inline]
    pub fn size_of(&self, num: usize) -> usize {
        self.stride as usize * num
    }
}

/// Helper structure to build a vertex layout. Attributes are packed one after another
/// in insertion order, unless an explicit offset is given.
#[derive(Default)]
pub struct VertexLayoutBuilder {
    stride: Option<u32>,
    attributes: SmallVec<[(VertexAttribute, Option<u32>); MAX_VERTEX_ATTRIBUTES]>,
}

impl VertexLayoutBuilder {
    #[inline]
    pub fn new() -> Self {
        Default::default()
    }

    /// Appends an attribute right after the previous one. Specifying an attribute
    /// index twice overwrites the former description.
    #[inline]
    pub fn with(self, index: u32, element_type: ElementType, components: u8, normalized: bool) -> Self {
        self.append(index, element_type, components, normalized, None)
    }

    /// Appends an attribute at an explicit byte offset, which could be used to alias
    /// some bytes intentionally.
    #[inline]
    pub fn with_offset(
        self,
        index: u32,
        element_type: ElementType,
        components: u8,
        normalized: bool,
        offset: u32,
    ) -> Self {
        self.append(index, element_type, components, normalized, Some(offset))
    }

    /// Overrides the stride derived from attributes.
    #[inline]
    pub fn with_stride(mut self, stride: u32) -> Self {
        self.stride = Some(stride);
        self
    }

    fn append(
        mut self,
        index: u32,
        element_type: ElementType,
        components: u8,
        normalized: bool,
        offset: Option<u32>,
    ) -> Self {
        assert!(components > 0 && components <= 4);

        let attribute = VertexAttribute {
            index,
            components,
            element_type,
            normalized,
            stride: 0,
            offset: 0,
        };

        if let Some(v) = self.attributes.iter_mut().find(|v| v.0.index == index) {
            *v = (attribute, offset);
            return self;
        }

        assert!(self.attributes.len() < MAX_VERTEX_ATTRIBUTES);
        self.attributes.push((attribute, offset));
        self
    }

    pub fn finish(self) -> VertexLayout {
        let mut cursor = 0;
        let mut packed = 0;
        let mut attributes = SmallVec::new();

        for (mut attribute, offset) in self.attributes {
            attribute.offset = offset.unwrap_or(cursor);
            cursor = attribute.offset + attribute.size();
            packed = packed.max(cursor);
            attributes.push(attribute);
        }

        let stride = self.stride.unwrap_or(packed);
        for v in &mut attributes {
            let v: &mut VertexAttribute = v;
            v.stride = stride;
        }

        VertexLayout { stride, attributes }
    }
}

/// Vertex indices can be either 8-, 16- or 32-bit.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum IndexType {
    U8,
    U16,
    U32,
}

impl IndexType {
    /// Returns the size in bytes of one index.
    pub fn size(self) -> u32 {
        match self {
            IndexType::U8 => 1,
            IndexType::U16 => 2,
            IndexType::U32 => 4,
        }
    }
}

impl Default for IndexType {
    fn default() -> Self {
        IndexType::U16
    }
}

/// Defines how the input vertex data is used to assemble primitives.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum Primitive {
    /// Separate points.
    Points,
    /// Separate lines.
    Lines,
    /// Line strips.
    LineStrip,
    /// Closed line strips.
    LineLoop,
    /// Separate triangles.
    Triangles,
    /// Triangle strips.
    TriangleStrip,
    /// Triangle fans.
    TriangleFan,
}

impl Default for Primitive {
    fn default() -> Self {
        Primitive::Triangles
    }
}

impl Primitive {
    /// Returns the number of primitives assembled from `n` vertices.
    pub fn assemble(self, n: u32) -> u32 {
        match self {
            Primitive::Points => n,
            Primitive::Lines => n / 2,
            Primitive::LineStrip => n.saturating_sub(1),
            Primitive::LineLoop => if n > 1 { n } else { 0 },
            Primitive::Triangles => n / 3,
            Primitive::TriangleStrip | Primitive::TriangleFan => n.saturating_sub(2),
        }
    }

    /// Returns the number of triangles assembled from `n` vertices.
    pub fn assemble_triangles(self, n: u32) -> u32 {
        match self {
            Primitive::Triangles | Primitive::TriangleStrip | Primitive::TriangleFan => {
                self.assemble(n)
            }
            _ => 0,
        }
    }
}
