//! OpenGL 3.3 backend for [glshader](https://crates.io/crates/glshader).
//!
//! Entry points are resolved with the [gl](https://crates.io/crates/gl) crate. They can be
//! loaded by the caller beforehand (`gl::load_with`), or lazily by the context on the first
//! creation if the backend was given a loader with [`GL33::with_loader`].

#[macro_use]
mod log;

mod gl33;

pub use crate::gl33::{gl_shader_type, stage_kind_from_gl, GL33};
