//! The video module records rendering works into command lists, and translates them
//! into native calls.
//!
//! # Resources
//!
//! Every resource lives on the device side, and is referenced by a lightweight handle
//! which is `Copy` and carries no ownership. Resources are created and destroyed with
//! `GraphicsDevice` explicitly. Using a handle which is invalid or destroyed already is
//! a silent no-op, it never panics.
//!
//! # Command List
//!
//! Commands are recorded into `CommandBuffer`s, and each buffer is tagged with a 64-bit
//! `SortKey`. Once sorted, a `CommandList` dispatches its buffers in ascending key order
//! and the commands of a buffer in insertion order.
//!
//! The key of a draw packs its material identity, a quantized depth and a blend flag,
//! so sorting a list renders the opaque geometries front-to-back grouped by material, and
//! then the transparent ones back-to-front.
//!
//! ```rust,ignore
//! let mut cmds = device.make_command_list();
//!
//! let key = device.make_sort_key(material, 3.5);
//! cmds.make_command_buffer_keyed(key)
//!     .draw()
//!     .vertex_buffer(vbo)
//!     .vertex_count(3)
//!     .material(material);
//!
//! device.submit_and_swap(cmds);
//! ```
//!
//! # Backends
//!
//! Commands are dispatched to a `Visitor`. The provided `Backend` validates handles,
//! skips redundant state changes between draws, and issues native calls through a
//! `Driver`. There is an OpenGL driver, and a headless one which records calls.

pub mod assets;
pub mod backends;
pub mod builder;
pub mod cache;
pub mod command;
pub mod command_list;
pub mod device;
pub mod errors;
pub mod settings;
pub mod sort_key;
pub mod visitor;

/// The maximum number of attributes in a vertex layout.
pub const MAX_VERTEX_ATTRIBUTES: usize = 16;

pub mod prelude {
    pub use super::assets::prelude::*;
    pub use super::backends::gl::GLDriver;
    pub use super::backends::headless::{Call, CallLog, HeadlessDriver};
    pub use super::backends::{Backend, Driver};
    pub use super::builder::{FrameBufferBuilder, MaterialBuilder, TextureBuilder};
    pub use super::cache::{MaterialCache, ProgramCache, TextureCache};
    pub use super::command::*;
    pub use super::command_list::{CommandBuffer, CommandList};
    pub use super::device::GraphicsDevice;
    pub use super::settings::VideoSettings;
    pub use super::sort_key::{make_sort_key, quantize_depth, SortKey};
    pub use super::visitor::{DrawState, FrameState, SubmitStats, Visitor};
}
