//! Shader stages.
//!
//! A [`Shader`] owns a single native shader object. Its life goes through the states of
//! [`CompileStatus`]:
//!
//! - A new shader, or one that just received a source, is [`CompileStatus::NotCompiled`].
//! - Compiling it moves it to [`CompileStatus::CompileOk`] or [`CompileStatus::CompileError`].
//!   Compiling again is a no-op until a new source is set.
//! - Failing to read a source stream moves it to [`CompileStatus::BadSourceStream`].
//!
//! Setting a source always re-opens the shader, whatever its current status.

use crate::{
  backend::{Backend, BackendRef, EntryPoint, ShaderBackend},
  context::Context,
  error::Error,
  report::Reporting,
  stage::{stage_name, StageKind},
};
use std::{
  fmt,
  fs::File,
  io::{self, Read},
  path::Path,
};

/// Compilation status of a [`Shader`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum CompileStatus {
  /// No compilation happened since the last source change.
  NotCompiled,
  /// The last source stream could not be read.
  BadSourceStream,
  /// The last compilation failed.
  CompileError,
  /// The last compilation succeeded.
  CompileOk,
}

impl fmt::Display for CompileStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      CompileStatus::NotCompiled => f.write_str("not compiled"),
      CompileStatus::BadSourceStream => f.write_str("bad source stream"),
      CompileStatus::CompileError => f.write_str("compilation error"),
      CompileStatus::CompileOk => f.write_str("compiled"),
    }
  }
}

/// An owned shader stage.
///
/// The native shader object is released when the shader is dropped, whatever its status.
#[derive(Debug)]
pub struct Shader<B>
where
  B: ShaderBackend,
{
  handle: usize,
  kind: StageKind,
  status: CompileStatus,
  info_log: Option<String>,
  reporting: Reporting,
  backend: BackendRef<B>,
}

impl<B> Shader<B>
where
  B: Backend,
{
  /// Create an empty shader of the given kind.
  ///
  /// The shader needs a source and a compilation before it can be attached to a program.
  ///
  /// Fails with [`ErrorKind::LoaderInit`](crate::error::ErrorKind::LoaderInit) if the native
  /// functions cannot be loaded, and with
  /// [`ErrorKind::Creation`](crate::error::ErrorKind::Creation) if the native API refuses to
  /// create the object, whatever the reporting policy.
  pub fn new(ctx: &mut Context<B>, kind: StageKind) -> Result<Self, Error> {
    ctx.ensure_loaded(EntryPoint::CreateShader)?;

    let backend = ctx.backend_ref();
    let handle = unsafe { backend.borrow_mut().new_shader(kind) }
      .ok_or_else(|| Error::creation(format!("a {} shader", kind)))?;

    log::trace!("created {} shader {}", kind, handle);

    Ok(Shader {
      handle,
      kind,
      status: CompileStatus::NotCompiled,
      info_log: None,
      reporting: ctx.reporting(),
      backend,
    })
  }

  /// Create a shader, set its source and compile it.
  pub fn from_source(
    ctx: &mut Context<B>,
    kind: StageKind,
    source: impl AsRef<str>,
  ) -> Result<Self, Error> {
    let mut shader = Self::new(ctx, kind)?;
    shader.set_source(source.as_ref());
    shader.compile()?;
    Ok(shader)
  }

  /// Create a shader, read its source from `reader` and compile it.
  pub fn from_reader(ctx: &mut Context<B>, kind: StageKind, reader: impl Read) -> Result<Self, Error> {
    let mut shader = Self::new(ctx, kind)?;
    shader.set_source_from_reader(reader)?;
    shader.compile()?;
    Ok(shader)
  }

  /// Create a shader, read its source from the file at `path` and compile it.
  pub fn from_path(
    ctx: &mut Context<B>,
    kind: StageKind,
    path: impl AsRef<Path>,
  ) -> Result<Self, Error> {
    let mut shader = Self::new(ctx, kind)?;
    shader.set_source_from_path(path)?;
    shader.compile()?;
    Ok(shader)
  }
}

impl<B> Shader<B>
where
  B: ShaderBackend,
{
  /// Native handle, for the rendering code and for programs.
  pub fn handle(&self) -> usize {
    self.handle
  }

  /// Kind the shader was created with.
  pub fn kind(&self) -> StageKind {
    self.kind
  }

  /// Current compilation status.
  pub fn status(&self) -> CompileStatus {
    self.status
  }

  /// Info log of the last failed compilation, if the current source failed to compile.
  pub fn info_log(&self) -> Option<&str> {
    self.info_log.as_deref()
  }

  /// Policy the shader was created with.
  pub fn reporting(&self) -> Reporting {
    self.reporting
  }

  /// Name of the stage, as reported by the native object.
  ///
  /// One of `"compute"`, `"vertex"`, `"tesselation control"`, `"tesselation evaluation"`,
  /// `"geometry"`, `"fragment"`, or `"unknown"` if the native value has no stage kind.
  pub fn type_name(&self) -> &'static str {
    let kind = unsafe { self.backend.borrow_mut().shader_kind(self.handle) };
    stage_name(kind)
  }

  /// Replace the source of the shader.
  ///
  /// The status goes back to [`CompileStatus::NotCompiled`], even if the shader was compiled.
  pub fn set_source(&mut self, source: &str) {
    unsafe { self.backend.borrow_mut().set_shader_source(self.handle, source) };

    self.info_log = None;
    self.status = CompileStatus::NotCompiled;
  }

  /// Read everything `reader` yields and use it as the source of the shader.
  ///
  /// If reading fails (I/O error or invalid UTF-8), nothing is uploaded, the status becomes
  /// [`CompileStatus::BadSourceStream`] and the failure is reported.
  pub fn set_source_from_reader(&mut self, mut reader: impl Read) -> Result<(), Error> {
    let mut source = String::new();

    match reader.read_to_string(&mut source) {
      Ok(_) => {
        self.set_source(&source);
        Ok(())
      }

      Err(e) => self.bad_source_stream(e),
    }
  }

  /// Read the file at `path` and use it as the source of the shader.
  ///
  /// A file that cannot be opened is handled like an unreadable stream.
  pub fn set_source_from_path(&mut self, path: impl AsRef<Path>) -> Result<(), Error> {
    match File::open(path) {
      Ok(file) => self.set_source_from_reader(file),
      Err(e) => self.bad_source_stream(e),
    }
  }

  fn bad_source_stream(&mut self, cause: io::Error) -> Result<(), Error> {
    self.status = CompileStatus::BadSourceStream;
    let err = Error::bad_source_stream(self.type_name(), cause);
    self.reporting.report(err)
  }

  /// Compile the current source.
  ///
  /// Does nothing unless the status is [`CompileStatus::NotCompiled`]. A shader that never
  /// received a source is compiled too, and the native API decides the outcome. On failure the
  /// status becomes [`CompileStatus::CompileError`], the native info log is kept (see
  /// [`Shader::info_log`]) and the failure is reported.
  pub fn compile(&mut self) -> Result<(), Error> {
    if self.status != CompileStatus::NotCompiled {
      log::trace!(
        "skipping compilation of shader {} ({})",
        self.handle,
        self.status
      );
      return Ok(());
    }

    let compiled = unsafe { self.backend.borrow_mut().compile_shader(self.handle) };

    match compiled {
      Ok(()) => {
        self.status = CompileStatus::CompileOk;
        log::debug!("compiled {} shader {}", self.kind, self.handle);
        Ok(())
      }

      Err(log) => {
        self.status = CompileStatus::CompileError;
        let err = Error::compilation(self.type_name(), &log);
        self.info_log = Some(log);
        self.reporting.report(err)
      }
    }
  }
}

impl<B> Drop for Shader<B>
where
  B: ShaderBackend,
{
  fn drop(&mut self) {
    log::trace!("dropping shader {}", self.handle);
    unsafe { self.backend.borrow_mut().drop_shader(self.handle) }
  }
}
