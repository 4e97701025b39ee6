//! Backend interface.
//!
//! A backend is the thin layer issuing the native shader and program calls. Implementing it is
//! `unsafe`: the units in this crate trust the handles it returns to be valid until they give
//! them back through the `drop_*` methods, and they never check a native object twice.
//!
//! Native calls must be issued on the thread owning the graphics context. [`BackendRef`] is
//! reference counted without synchronization, so nothing built on top of it can be sent to
//! another thread.

use crate::stage::StageKind;
use std::{
  cell::{Ref, RefCell, RefMut},
  fmt,
  rc::Rc,
};

/// Native entry point required to create a unit.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum EntryPoint {
  /// Shader object creation.
  CreateShader,
  /// Program object creation.
  CreateProgram,
}

impl fmt::Display for EntryPoint {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      EntryPoint::CreateShader => f.write_str("the shader creation entry point"),
      EntryPoint::CreateProgram => f.write_str("the program creation entry point"),
    }
  }
}

/// Function loading.
pub trait LoaderBackend {
  /// Whether `entry_point` can be called.
  fn is_loaded(&self, entry_point: EntryPoint) -> bool;

  /// Resolve the native entry points.
  ///
  /// A [`Context`](crate::context::Context) calls this at most once, the first time it finds
  /// an entry point missing. The error is a human readable reason.
  fn load_functions(&mut self) -> Result<(), String>;
}

/// Shader objects.
pub unsafe trait ShaderBackend {
  /// Create a shader object of the given kind. `None` if the native API refused.
  unsafe fn new_shader(&mut self, kind: StageKind) -> Option<usize>;

  /// Replace the source of a shader object.
  unsafe fn set_shader_source(&mut self, handle: usize, source: &str);

  /// Compile a shader object and return its info log on failure.
  ///
  /// The log might be empty.
  unsafe fn compile_shader(&mut self, handle: usize) -> Result<(), String>;

  /// Ask a shader object for its kind. `None` for native values with no [`StageKind`].
  unsafe fn shader_kind(&mut self, handle: usize) -> Option<StageKind>;

  /// Release a shader object.
  unsafe fn drop_shader(&mut self, handle: usize);
}

/// Program objects.
pub unsafe trait ProgramBackend {
  /// Create a program object. `None` if the native API refused.
  unsafe fn new_program(&mut self) -> Option<usize>;

  /// Attach a compiled shader object to a program object.
  unsafe fn attach_shader(&mut self, program: usize, shader: usize);

  /// Link a program object and return its info log on failure.
  ///
  /// The log might be empty.
  unsafe fn link_program(&mut self, program: usize) -> Result<(), String>;

  /// Make a program object the current one.
  ///
  /// Must issue the native call every time; other code may have changed the current program.
  unsafe fn use_program(&mut self, program: usize);

  /// Release a program object.
  unsafe fn drop_program(&mut self, program: usize);
}

/// Everything a [`Context`](crate::context::Context) needs.
pub trait Backend: LoaderBackend + ShaderBackend + ProgramBackend {}

impl<B> Backend for B where B: LoaderBackend + ShaderBackend + ProgramBackend {}

/// Shared access to a backend.
///
/// The context and every unit created from it hold one of these, so that units can release
/// their native object when dropped.
#[derive(Debug)]
pub struct BackendRef<B>(Rc<RefCell<B>>);

impl<B> Clone for BackendRef<B> {
  fn clone(&self) -> Self {
    BackendRef(self.0.clone())
  }
}

impl<B> BackendRef<B> {
  /// Wrap a backend.
  pub fn new(backend: B) -> Self {
    BackendRef(Rc::new(RefCell::new(backend)))
  }

  /// Borrow the backend.
  pub fn borrow(&self) -> Ref<B> {
    self.0.borrow()
  }

  /// Borrow the backend mutably, to issue native calls.
  pub fn borrow_mut(&self) -> RefMut<B> {
    self.0.borrow_mut()
  }
}
