//! Graphics context.
//!
//! A [`Context`] owns the backend and the settings every unit created from it shares: the
//! [`Reporting`] policy and the function-loader state.

use crate::{
  backend::{Backend, BackendRef, EntryPoint},
  error::Error,
  program::Program,
  report::Reporting,
  shader::Shader,
  stage::StageKind,
};
use std::{cell::Ref, io::Read, path::Path};

/// Entry point to create shaders and programs.
#[derive(Debug)]
pub struct Context<B> {
  backend: BackendRef<B>,
  reporting: Reporting,
  loader_attempted: bool,
}

impl<B> Context<B>
where
  B: Backend,
{
  /// Create a context with the default [`Reporting`] policy.
  pub fn new(backend: B) -> Self {
    Self::with_reporting(backend, Reporting::default())
  }

  /// Create a context with an explicit [`Reporting`] policy.
  pub fn with_reporting(backend: B, reporting: Reporting) -> Self {
    Context {
      backend: BackendRef::new(backend),
      reporting,
      loader_attempted: false,
    }
  }

  /// Policy given to the units created from now on.
  pub fn reporting(&self) -> Reporting {
    self.reporting
  }

  /// Change the policy given to the units created from now on.
  ///
  /// Units already alive keep the policy they were created with.
  pub fn set_reporting(&mut self, reporting: Reporting) {
    self.reporting = reporting;
  }

  /// Whether the context already tried to load the native functions.
  ///
  /// Set on the first unit creation finding an entry point missing, and never reset.
  pub fn loader_attempted(&self) -> bool {
    self.loader_attempted
  }

  /// Borrow the backend.
  ///
  /// # Panics
  ///
  /// Units borrow the backend mutably to issue native calls. Dropping a shader or a program,
  /// or calling any of their methods reaching the backend, panics while the returned [`Ref`]
  /// is alive.
  pub fn backend(&self) -> Ref<B> {
    self.backend.borrow()
  }

  pub(crate) fn backend_ref(&self) -> BackendRef<B> {
    self.backend.clone()
  }

  /// Make sure `entry_point` can be called, loading the native functions once if needed.
  pub(crate) fn ensure_loaded(&mut self, entry_point: EntryPoint) -> Result<(), Error> {
    let mut backend = self.backend.borrow_mut();

    if backend.is_loaded(entry_point) {
      return Ok(());
    }

    if self.loader_attempted {
      return Err(Error::loader_init(entry_point, None));
    }

    self.loader_attempted = true;
    log::debug!("{} is missing; loading native functions", entry_point);

    match backend.load_functions() {
      Ok(()) if backend.is_loaded(entry_point) => Ok(()),
      Ok(()) => Err(Error::loader_init(entry_point, None)),
      Err(reason) => Err(Error::loader_init(entry_point, Some(reason.as_str()))),
    }
  }

  /// Create an empty shader. See [`Shader::new`].
  pub fn new_shader(&mut self, kind: StageKind) -> Result<Shader<B>, Error> {
    Shader::new(self, kind)
  }

  /// Create a shader and compile `source`. See [`Shader::from_source`].
  pub fn new_shader_from_source(
    &mut self,
    kind: StageKind,
    source: impl AsRef<str>,
  ) -> Result<Shader<B>, Error> {
    Shader::from_source(self, kind, source)
  }

  /// Create a shader and compile what `reader` yields. See [`Shader::from_reader`].
  pub fn new_shader_from_reader(
    &mut self,
    kind: StageKind,
    reader: impl Read,
  ) -> Result<Shader<B>, Error> {
    Shader::from_reader(self, kind, reader)
  }

  /// Create a shader and compile the content of a file. See [`Shader::from_path`].
  pub fn new_shader_from_path(
    &mut self,
    kind: StageKind,
    path: impl AsRef<Path>,
  ) -> Result<Shader<B>, Error> {
    Shader::from_path(self, kind, path)
  }

  /// Create an empty program. See [`Program::new`].
  pub fn new_program(&mut self) -> Result<Program<B>, Error> {
    Program::new(self)
  }

  /// Create a program, attach `shaders` and link. See [`Program::from_shaders`].
  pub fn new_program_from_shaders<'a, I>(&mut self, shaders: I) -> Result<Program<B>, Error>
  where
    I: IntoIterator<Item = &'a Shader<B>>,
    B: 'a,
  {
    Program::from_shaders(self, shaders)
  }
}
