//! Owned shader stages and shader programs.
//!
//! This crate wraps the shader-compilation and program-linking stages of a graphics API. A
//! [`Shader`] owns a single native shader object and tracks its [`CompileStatus`]; a
//! [`Program`] owns a native program object, validates the shaders attached to it and tracks
//! its [`LinkStatus`]. Both release their native object when dropped.
//!
//! Everything is created through a [`Context`], which owns the backend (see the
//! [`backend`] module), the function-loader state and the [`Reporting`] policy deciding
//! whether compile / link failures are returned as errors or logged.
//!
//! ```ignore
//! let mut ctx = Context::new(backend);
//! let vs = ctx.new_shader_from_source(StageKind::Vertex, VS_SRC)?;
//! let fs = ctx.new_shader_from_source(StageKind::Fragment, FS_SRC)?;
//! let program = ctx.new_program_from_shaders([&vs, &fs])?;
//!
//! program.activate();
//! ```
//!
//! [`Shader`]: crate::shader::Shader
//! [`CompileStatus`]: crate::shader::CompileStatus
//! [`Program`]: crate::program::Program
//! [`LinkStatus`]: crate::program::LinkStatus
//! [`Context`]: crate::context::Context
//! [`Reporting`]: crate::report::Reporting

pub mod backend;
pub mod context;
pub mod error;
pub mod program;
pub mod report;
pub mod shader;
pub mod stage;

pub use crate::context::Context;
pub use crate::error::{Error, ErrorKind};
pub use crate::program::{LinkStatus, Program};
pub use crate::report::Reporting;
pub use crate::shader::{CompileStatus, Shader};
pub use crate::stage::StageKind;
