//! This module contains the math utils that mainly comes from `cgmath`, plus the
//! small value types used by commands.

pub use cgmath::*;

pub mod color;
pub use self::color::Color;

pub mod rect;
pub use self::rect::Rect;

pub mod prelude {
    pub use super::color::Color;
    pub use super::rect::Rect;
    pub use cgmath::{Matrix3, Matrix4, Vector2, Vector3, Vector4};
}
