use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::errors::*;
use crate::math::prelude::{Rect, Vector2};

use super::{ContextHandle, Window};

/// A window without any native surface, used with the headless driver. It counts
/// the presented frames.
#[derive(Debug, Clone)]
pub struct HeadlessWindow {
    dimensions: Vector2<u32>,
    contexts: u16,
    current: Option<ContextHandle>,
    swaps: Arc<AtomicUsize>,
}

impl Default for HeadlessWindow {
    fn default() -> Self {
        HeadlessWindow::new(Vector2::new(640, 480))
    }
}

impl HeadlessWindow {
    pub fn new(dimensions: Vector2<u32>) -> Self {
        HeadlessWindow {
            dimensions,
            contexts: 0,
            current: None,
            swaps: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Gets the context which is current.
    #[inline]
    pub fn current_context(&self) -> Option<ContextHandle> {
        self.current
    }

    /// Gets the number of `swap_buffer` calls. The counter is shared between clones.
    #[inline]
    pub fn swaps(&self) -> usize {
        self.swaps.load(Ordering::SeqCst)
    }
}

impl Window for HeadlessWindow {
    fn make_context(&mut self) -> Result<ContextHandle> {
        if self.contexts == ::std::u16::MAX - 1 {
            bail!("Run out of context handles.");
        }

        let handle = ContextHandle::new(self.contexts);
        self.contexts += 1;
        Ok(handle)
    }

    fn set_current_context(&mut self, handle: ContextHandle) -> Result<()> {
        if !handle.is_valid() || handle.index() >= self.contexts {
            bail!("{} is invalid.", handle);
        }

        self.current = Some(handle);
        Ok(())
    }

    fn swap_buffer(&mut self) -> Result<()> {
        if self.current.is_none() {
            bail!("There is no current context to present.");
        }

        self.swaps.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    #[inline]
    fn get_viewport(&self) -> Rect {
        Rect::new(0, 0, self.dimensions.x, self.dimensions.y)
    }

    #[inline]
    fn get_drawable_size(&self) -> Vector2<u32> {
        self.dimensions
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn contexts() {
        let mut window = HeadlessWindow::default();
        assert!(window.swap_buffer().is_err());

        let ctx = window.make_context().unwrap();
        assert!(window.set_current_context(ContextHandle::new(5)).is_err());
        window.set_current_context(ctx).unwrap();
        assert_eq!(window.current_context(), Some(ctx));

        let shared = window.clone();
        window.swap_buffer().unwrap();
        window.swap_buffer().unwrap();
        assert_eq!(shared.swaps(), 2);

        assert_eq!(window.get_viewport(), Rect::new(0, 0, 640, 480));
        assert_eq!(window.get_drawable_size(), Vector2::new(640, 480));
    }
}
