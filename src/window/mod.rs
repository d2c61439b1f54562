//! The window collaborator of `GraphicsDevice`.
//!
//! Creating windows, polling events and the native context setup are out of the
//! scope of this crate. Applications implement `Window` with whatever they use for
//! these jobs, and hand it to the device.

mod headless;

pub mod prelude {
    pub use super::headless::HeadlessWindow;
    pub use super::{ContextHandle, Window};
}

pub use self::headless::HeadlessWindow;

use crate::errors::*;
use crate::math::prelude::{Rect, Vector2};

impl_handle!(ContextHandle);

/// Represents a native graphics context and the window or environment around it.
pub trait Window {
    /// Creates a graphics context which renders into this window.
    fn make_context(&mut self) -> Result<ContextHandle>;

    /// Makes the context current on the calling thread.
    fn set_current_context(&mut self, handle: ContextHandle) -> Result<()>;

    /// Presents the back buffer.
    fn swap_buffer(&mut self) -> Result<()>;

    /// Gets the region of window which we are drawing into, in pixels.
    fn get_viewport(&self) -> Rect;

    /// Gets the size in pixels of the default frame buffer.
    fn get_drawable_size(&self) -> Vector2<u32>;
}
