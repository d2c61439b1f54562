//! Commonly used utilities like handles, pools and hashes.

#[macro_use]
pub mod handle;
pub mod handle_pool;
pub mod hash;
pub mod hash_value;

pub mod prelude {
    pub use super::handle::{Handle, HandleIndex, HandleLike};
    pub use super::handle_pool::HandlePool;
    pub use super::hash::{hash64, FastHashMap, FastHashSet};
    pub use super::hash_value::HashValue;
}
