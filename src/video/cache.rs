//! Caches of the resources owned by `GraphicsDevice`. Entries are never evicted, they
//! live as long as the device, or until the resource is destroyed explicitly.

use crate::utils::prelude::{hash64, FastHashMap, HandleLike, HandlePool, HashValue};

use super::assets::prelude::{Material, MaterialHandle, ProgramHandle, TextureHandle};

/// Maps the path (or any other application chosen name) of a texture to its handle.
#[derive(Debug, Default)]
pub struct TextureCache {
    textures: FastHashMap<HashValue<str>, TextureHandle>,
}

impl TextureCache {
    pub fn new() -> Self {
        Default::default()
    }

    #[inline]
    pub fn exists<T: AsRef<str>>(&self, path: T) -> bool {
        self.textures.contains_key(&HashValue::from(path))
    }

    /// Adds a entry, and returns the handle it replaces.
    #[inline]
    pub fn add<T: AsRef<str>>(&mut self, path: T, handle: TextureHandle) -> Option<TextureHandle> {
        self.textures.insert(HashValue::from(path), handle)
    }

    #[inline]
    pub fn get<T: AsRef<str>>(&self, path: T) -> Option<TextureHandle> {
        self.textures.get(&HashValue::from(path)).cloned()
    }

    /// Removes all the entries that refer to `handle`.
    pub fn remove_handle(&mut self, handle: TextureHandle) {
        self.textures.retain(|_, v| *v != handle);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

/// Maps the hash of shader sources to the program linked from them.
#[derive(Debug, Default)]
pub struct ProgramCache {
    programs: FastHashMap<u64, ProgramHandle>,
}

impl ProgramCache {
    pub fn new() -> Self {
        Default::default()
    }

    /// Returns the cache key of a program linked from the vertex shader source `vs` and
    /// the fragment shader source `fs`.
    #[inline]
    pub fn key(vs: &str, fs: &str) -> u64 {
        hash64(&(vs, fs))
    }

    #[inline]
    pub fn exists(&self, key: u64) -> bool {
        self.programs.contains_key(&key)
    }

    /// Adds a entry, and returns the handle it replaces.
    #[inline]
    pub fn add(&mut self, key: u64, handle: ProgramHandle) -> Option<ProgramHandle> {
        self.programs.insert(key, handle)
    }

    #[inline]
    pub fn get(&self, key: u64) -> Option<ProgramHandle> {
        self.programs.get(&key).cloned()
    }

    /// Removes all the entries that refer to `handle`.
    pub fn remove_handle(&mut self, handle: ProgramHandle) {
        self.programs.retain(|_, v| *v != handle);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.programs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }
}

/// A dense array of materials, indexed by the id of `MaterialHandle`.
#[derive(Default)]
pub struct MaterialCache {
    handles: HandlePool<MaterialHandle>,
    materials: Vec<Option<Material>>,
}

impl MaterialCache {
    pub fn new() -> Self {
        Default::default()
    }

    /// Adds a material. Returns `None` if all the handles are exhausted.
    pub fn add(&mut self, material: Material) -> Option<MaterialHandle> {
        let handle = self.handles.create()?;
        let index = handle.index() as usize;

        if self.materials.len() <= index {
            self.materials.resize(index + 1, None);
        }

        self.materials[index] = Some(material);
        Some(handle)
    }

    #[inline]
    pub fn exists(&self, handle: MaterialHandle) -> bool {
        self.handles.contains(handle)
    }

    #[inline]
    pub fn get(&self, handle: MaterialHandle) -> Option<&Material> {
        if !self.handles.contains(handle) {
            return None;
        }

        self.materials
            .get(handle.index() as usize)
            .and_then(|v| v.as_ref())
    }

    #[inline]
    pub fn get_mut(&mut self, handle: MaterialHandle) -> Option<&mut Material> {
        if !self.handles.contains(handle) {
            return None;
        }

        self.materials
            .get_mut(handle.index() as usize)
            .and_then(|v| v.as_mut())
    }

    /// Removes a material. Returns `None` if `handle` is invalid or freed already.
    pub fn remove(&mut self, handle: MaterialHandle) -> Option<Material> {
        if !self.handles.free(handle) {
            return None;
        }

        self.materials[handle.index() as usize].take()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    #[inline]
    pub fn handles<'a>(&'a self) -> impl Iterator<Item = MaterialHandle> + 'a {
        self.handles.iter()
    }
}
