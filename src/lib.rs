//! # What is This?
//!
//! `easel` is a thin rendering layer that sits above OpenGL. Rendering code records
//! device-independent commands (clears, draws, buffer uploads, frame buffer attachments,
//! material parameter updates) into a `CommandList`, every group of commands is tagged
//! with a 64-bit `SortKey`, and the list is sorted and dispatched to a backend that turns
//! the commands into native calls.
//!
//! ```rust,ignore
//! use easel::prelude::*;
//!
//! let window = Box::new(HeadlessWindow::default());
//! let mut device = GraphicsDevice::headless(window, VideoSettings::default())?;
//!
//! let mut cmds = device.make_command_list();
//! cmds.clear().color(Color::red()).clear_color(true);
//! cmds.draw()
//!     .vertex_buffer(vbo)
//!     .vertex_count(3)
//!     .material(material);
//!
//! device.submit_and_swap(cmds);
//! ```
//!
//! All the resources (buffers, shaders, programs, textures, frame buffers and materials)
//! are referenced through lightweight handles. A handle carries no ownership, and using an
//! invalid handle is always a silent no-op instead of an error.

#[macro_use]
extern crate log;
#[macro_use]
extern crate failure;
#[macro_use]
extern crate serde;

pub extern crate cgmath;
pub extern crate gl;

pub mod errors;
#[macro_use]
pub mod utils;
pub mod math;
pub mod video;
pub mod window;

pub mod prelude;
