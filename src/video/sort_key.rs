//! The 64-bit key command buffers are sorted with.
//!
//! A key packs the identity of material into bits `0..16`, a quantized depth into bits
//! `16..26` and a blend flag into bit `48`:
//!
//! ```text
//!  63        49   48   47       26 25          16 15                0
//! +------------+-------+-----------+--------------+-----------------+
//! |   unused   | blend |  unused   | depth bucket |    identity     |
//! +------------+-------+-----------+--------------+-----------------+
//! ```
//!
//! So opaque and masked draws always come before blended draws. Opaque draws go front
//! to back to make the most of early depth rejection, while blended draws go back to
//! front so they composite correctly. Draws within the same depth bucket are grouped by
//! material identity.

use std::fmt;

use super::assets::prelude::AlphaMode;

/// The number of bits of a quantized depth.
pub const DEPTH_BITS: u32 = 10;

const DEPTH_MASK: u64 = (1 << DEPTH_BITS) - 1;
const DEPTH_SHIFT: u64 = 16;
const BLEND_SHIFT: u64 = 48;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SortKey(u64);

impl SortKey {
    #[inline]
    pub const fn new(value: u64) -> Self {
        SortKey(value)
    }

    #[inline]
    pub fn value(self) -> u64 {
        self.0
    }

    /// Returns the key right after this one.
    #[inline]
    pub fn next(self) -> Self {
        SortKey(self.0.saturating_add(1))
    }

    #[inline]
    pub fn is_blend(self) -> bool {
        (self.0 >> BLEND_SHIFT) & 1 == 1
    }

    #[inline]
    pub fn material_identity(self) -> u16 {
        self.0 as u16
    }

    /// Returns the depth bucket stored in this key. Buckets of blended keys are inverted.
    #[inline]
    pub fn depth_bucket(self) -> u16 {
        ((self.0 >> DEPTH_SHIFT) & DEPTH_MASK) as u16
    }
}

impl From<u64> for SortKey {
    fn from(v: u64) -> Self {
        SortKey(v)
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}

/// Quantizes `depth` by taking the top `DEPTH_BITS` bits of its IEEE-754 bit pattern.
/// It's monotonic for positive depths. Negative depths and NaN produce larger buckets
/// than any positive depth.
#[inline]
pub fn quantize_depth(depth: f32) -> u16 {
    (depth.to_bits() >> (32 - DEPTH_BITS)) as u16
}

/// Makes the sort key of a draw.
pub fn make_sort_key(alpha_mode: AlphaMode, material_identity: u16, depth: f32) -> SortKey {
    let depth = u64::from(quantize_depth(depth));
    let (blend, depth) = match alpha_mode {
        AlphaMode::Blend => (1, DEPTH_MASK - depth),
        AlphaMode::Opaque | AlphaMode::Mask => (0, depth),
    };

    SortKey(u64::from(material_identity) | (depth << DEPTH_SHIFT) | (blend << BLEND_SHIFT))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn pack() {
        let key = make_sort_key(AlphaMode::Opaque, 7, 1.0);
        assert_eq!(key.material_identity(), 7);
        assert_eq!(key.depth_bucket(), quantize_depth(1.0));
        assert!(!key.is_blend());

        let key = make_sort_key(AlphaMode::Blend, 7, 1.0);
        assert_eq!(key.material_identity(), 7);
        assert_eq!(key.depth_bucket(), 0x3FF - quantize_depth(1.0));
        assert!(key.is_blend());
    }

    #[test]
    fn depth_order() {
        let near = make_sort_key(AlphaMode::Opaque, 0, 0.5);
        let far = make_sort_key(AlphaMode::Opaque, 0, 100.0);
        assert!(near < far);

        let near = make_sort_key(AlphaMode::Blend, 0, 0.5);
        let far = make_sort_key(AlphaMode::Blend, 0, 100.0);
        assert!(far < near);

        assert!(quantize_depth(0.0) <= quantize_depth(1.0));
        assert_eq!(quantize_depth(1.0), quantize_depth(1.2));
    }

    #[test]
    fn alpha() {
        let opaque = make_sort_key(AlphaMode::Opaque, 0xFFFF, ::std::f32::MAX);
        let mask = make_sort_key(AlphaMode::Mask, 0xFFFF, ::std::f32::MAX);
        let blend = make_sort_key(AlphaMode::Blend, 0, ::std::f32::MAX);
        assert!(opaque < blend);
        assert!(mask < blend);
    }

    #[test]
    fn nan() {
        let a = make_sort_key(AlphaMode::Opaque, 1, ::std::f32::NAN);
        let b = make_sort_key(AlphaMode::Opaque, 1, ::std::f32::NAN);
        assert_eq!(a, b);
        assert!(!a.is_blend());
    }

    #[test]
    fn next() {
        assert_eq!(SortKey::default().next(), SortKey::new(1));
        assert_eq!(SortKey::new(::std::u64::MAX).next(), SortKey::new(::std::u64::MAX));
    }
}
