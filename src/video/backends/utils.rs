use crate::utils::handle::HandleLike;

/// A sparse array of the backend data of resources, indexed by the id of handle.
#[derive(Debug)]
pub struct DataVec<T>
where
    T: Sized,
{
    pub buf: Vec<Option<T>>,
}

impl<T> Default for DataVec<T> {
    fn default() -> Self {
        DataVec::new()
    }
}

impl<T> DataVec<T>
where
    T: Sized,
{
    pub fn new() -> Self {
        DataVec { buf: Vec::new() }
    }

    pub fn get<H>(&self, handle: H) -> Option<&T>
    where
        H: HandleLike,
    {
        if !handle.is_valid() {
            return None;
        }

        self.buf
            .get(handle.index() as usize)
            .and_then(|v| v.as_ref())
    }

    pub fn get_mut<H>(&mut self, handle: H) -> Option<&mut T>
    where
        H: HandleLike,
    {
        if !handle.is_valid() {
            return None;
        }

        self.buf
            .get_mut(handle.index() as usize)
            .and_then(|v| v.as_mut())
    }

    #[inline]
    pub fn contains<H>(&self, handle: H) -> bool
    where
        H: HandleLike,
    {
        self.get(handle).is_some()
    }

    pub fn create<H>(&mut self, handle: H, value: T)
    where
        H: HandleLike,
    {
        let index = handle.index() as usize;
        if self.buf.len() <= index {
            self.buf.resize_with(index + 1, || None);
        }

        self.buf[index] = Some(value);
    }

    pub fn free<H>(&mut self, handle: H) -> Option<T>
    where
        H: HandleLike,
    {
        if !handle.is_valid() {
            return None;
        }

        self.buf
            .get_mut(handle.index() as usize)
            .and_then(|v| v.take())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::utils::handle::Handle;

    #[test]
    fn basic() {
        let mut v = DataVec::new();
        assert!(v.get(Handle::new(3)).is_none());

        v.create(Handle::new(3), "a");
        assert_eq!(v.get(Handle::new(3)), Some(&"a"));
        assert!(v.get(Handle::new(2)).is_none());
        assert!(v.get(Handle::INVALID).is_none());

        assert_eq!(v.free(Handle::new(3)), Some("a"));
        assert_eq!(v.free(Handle::new(3)), None);
        assert!(!v.contains(Handle::new(3)));
        assert_eq!(v.free(Handle::INVALID), None);
    }
}
