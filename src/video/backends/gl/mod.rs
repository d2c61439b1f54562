//! The OpenGL driver.

mod driver;
mod types;

pub use self::driver::GLDriver;
