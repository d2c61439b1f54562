use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use super::hash;

/// A pre-computed hash of some value, which could be compared and used as key without
/// touching the original value again.
#[derive(Debug, Eq)]
pub struct HashValue<T>(u64, PhantomData<T>)
where
    T: Hash + ?Sized;

impl<T> HashValue<T>
where
    T: Hash + ?Sized,
{
    #[inline]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl<T> Clone for HashValue<T>
where
    T: Hash + ?Sized,
{
    fn clone(&self) -> Self {
        HashValue(self.0, self.1)
    }
}

impl<T> Copy for HashValue<T> where T: Hash + ?Sized {}

impl<T> PartialEq for HashValue<T>
where
    T: Hash + ?Sized,
{
    fn eq(&self, other: &Self) -> bool {
        self.0.eq(&other.0)
    }
}

impl<T> Hash for HashValue<T>
where
    T: Hash + ?Sized,
{
    fn hash<H>(&self, state: &mut H)
    where
        H: Hasher,
    {
        self.0.hash(state);
    }
}

impl<F> From<F> for HashValue<str>
where
    F: AsRef<str>,
{
    fn from(v: F) -> Self {
        HashValue(hash::hash64(v.as_ref()), PhantomData)
    }
}

impl<T> PartialEq<T> for HashValue<str>
where
    T: AsRef<str>,
{
    fn eq(&self, other: &T) -> bool {
        self.0.eq(&hash::hash64(other.as_ref()))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::utils::hash::FastHashMap;

    #[test]
    fn names() {
        let name = HashValue::<str>::from("u_ModelViewMatrix");
        assert_eq!(name, "u_ModelViewMatrix");
        assert_eq!(name, String::from("u_ModelViewMatrix"));
        assert!(name != "u_ProjectionMatrix");
        assert_eq!(name.value(), hash::hash64("u_ModelViewMatrix"));
    }

    #[test]
    fn locations() {
        let mut locations = FastHashMap::<HashValue<str>, i32>::default();
        locations.insert("u_Color".into(), 0);
        locations.insert("u_Texture".into(), 1);
        locations.insert("u_Color".into(), 2);

        assert_eq!(locations.len(), 2);
        assert_eq!(locations.get(&"u_Color".into()), Some(&2));
        assert_eq!(locations.get(&"u_Normal".into()), None);
    }
}
