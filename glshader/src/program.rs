//! Shader programs.
//!
//! A [`Program`] owns a native program object made of attached [`Shader`]s. Only compiled
//! shaders can be attached; attaching anything else puts the program in
//! [`LinkStatus::PrepareLinkError`]. Once the program leaves [`LinkStatus::NotLinked`], by a
//! rejected attachment or by a link attempt, it is resolved: further attachments and links are
//! ignored.
//!
//! A program does not own its shaders. The native API keeps attached shader objects alive on
//! its side, so a shader may be dropped once attached.

use crate::{
  backend::{Backend, BackendRef, EntryPoint, ProgramBackend, ShaderBackend},
  context::Context,
  error::Error,
  report::Reporting,
  shader::{CompileStatus, Shader},
};
use std::fmt;

/// Linking status of a [`Program`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum LinkStatus {
  /// No link attempt happened yet.
  NotLinked,
  /// A shader was attached before being compiled.
  PrepareLinkError,
  /// Linking failed.
  LinkError,
  /// Linking succeeded.
  LinkOk,
}

impl LinkStatus {
  /// Whether the program is resolved and ignores further attachments and links.
  pub fn is_resolved(self) -> bool {
    self != LinkStatus::NotLinked
  }
}

impl fmt::Display for LinkStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      LinkStatus::NotLinked => f.write_str("not linked"),
      LinkStatus::PrepareLinkError => f.write_str("prepare link error"),
      LinkStatus::LinkError => f.write_str("link error"),
      LinkStatus::LinkOk => f.write_str("linked"),
    }
  }
}

/// An owned shader program.
///
/// The native program object is released when the program is dropped, whatever its status.
#[derive(Debug)]
pub struct Program<B>
where
  B: ProgramBackend,
{
  handle: usize,
  status: LinkStatus,
  attached: Vec<usize>,
  info_log: Option<String>,
  reporting: Reporting,
  backend: BackendRef<B>,
}

impl<B> Program<B>
where
  B: Backend,
{
  /// Create an empty program.
  ///
  /// Fails with [`ErrorKind::LoaderInit`](crate::error::ErrorKind::LoaderInit) if the native
  /// functions cannot be loaded, and with
  /// [`ErrorKind::Creation`](crate::error::ErrorKind::Creation) if the native API refuses to
  /// create the object, whatever the reporting policy.
  pub fn new(ctx: &mut Context<B>) -> Result<Self, Error> {
    ctx.ensure_loaded(EntryPoint::CreateProgram)?;

    let backend = ctx.backend_ref();
    let handle = unsafe { backend.borrow_mut().new_program() }
      .ok_or_else(|| Error::creation("a shader program"))?;

    log::trace!("created program {}", handle);

    Ok(Program {
      handle,
      status: LinkStatus::NotLinked,
      attached: Vec::new(),
      info_log: None,
      reporting: ctx.reporting(),
      backend,
    })
  }

  /// Create a program, attach every shader in order and link.
  ///
  /// With [`Reporting::Raise`], the first failure is returned. With [`Reporting::Diagnostic`],
  /// every step is attempted; once a step resolves the program, the remaining ones are
  /// ignored and the status tells what happened.
  pub fn from_shaders<'a, I>(ctx: &mut Context<B>, shaders: I) -> Result<Self, Error>
  where
    I: IntoIterator<Item = &'a Shader<B>>,
    B: 'a,
  {
    let mut program = Self::new(ctx)?;

    for shader in shaders {
      program.attach(shader)?;
    }

    program.link()?;
    Ok(program)
  }
}

impl<B> Program<B>
where
  B: ProgramBackend,
{
  /// Native handle, for uniform and attribute queries.
  pub fn handle(&self) -> usize {
    self.handle
  }

  /// Current linking status.
  pub fn status(&self) -> LinkStatus {
    self.status
  }

  /// Native handles of the shaders attached so far, in attachment order.
  pub fn attached(&self) -> &[usize] {
    &self.attached
  }

  /// Info log of the failed link, if linking failed.
  pub fn info_log(&self) -> Option<&str> {
    self.info_log.as_deref()
  }

  /// Policy the program was created with.
  pub fn reporting(&self) -> Reporting {
    self.reporting
  }

  /// Link the attached shaders.
  ///
  /// Does nothing once the program is resolved, which makes linking twice a no-op. On
  /// failure the status becomes [`LinkStatus::LinkError`], the native info log is kept (see
  /// [`Program::info_log`]) and the failure is reported.
  pub fn link(&mut self) -> Result<(), Error> {
    if self.status.is_resolved() {
      log::trace!("skipping link of program {} ({})", self.handle, self.status);
      return Ok(());
    }

    let linked = unsafe { self.backend.borrow_mut().link_program(self.handle) };

    match linked {
      Ok(()) => {
        self.status = LinkStatus::LinkOk;
        log::debug!(
          "linked program {} ({} shaders)",
          self.handle,
          self.attached.len()
        );
        Ok(())
      }

      Err(log) => {
        self.status = LinkStatus::LinkError;
        let err = Error::link(&log);
        self.info_log = Some(log);
        self.reporting.report(err)
      }
    }
  }

  /// Make this program the current one.
  ///
  /// The native call is issued on every call. No status is checked: activating a program that
  /// did not link is left to the native API.
  pub fn activate(&self) {
    unsafe { self.backend.borrow_mut().use_program(self.handle) }
  }
}

impl<B> Program<B>
where
  B: ShaderBackend + ProgramBackend,
{
  /// Attach a shader.
  ///
  /// Ignored once the program is resolved, and for a shader already attached. A shader that is
  /// not [`CompileStatus::CompileOk`] is never handed to the native API: the status becomes
  /// [`LinkStatus::PrepareLinkError`] and the failure is reported.
  pub fn attach(&mut self, shader: &Shader<B>) -> Result<(), Error> {
    if self.status.is_resolved() {
      log::trace!(
        "program {} is resolved ({}); ignoring shader {}",
        self.handle,
        self.status,
        shader.handle()
      );
      return Ok(());
    }

    if shader.status() != CompileStatus::CompileOk {
      self.status = LinkStatus::PrepareLinkError;
      return self.reporting.report(Error::prepare_link(shader.type_name()));
    }

    if self.attached.contains(&shader.handle()) {
      return Ok(());
    }

    unsafe {
      self
        .backend
        .borrow_mut()
        .attach_shader(self.handle, shader.handle())
    };
    self.attached.push(shader.handle());

    Ok(())
  }

  /// Attach a shader and give the program back, to chain attachments.
  ///
  /// ```ignore
  /// program.push(&vs)?.push(&fs)?.link()?;
  /// ```
  pub fn push(&mut self, shader: &Shader<B>) -> Result<&mut Self, Error> {
    self.attach(shader)?;
    Ok(self)
  }
}

impl<B> Drop for Program<B>
where
  B: ProgramBackend,
{
  fn drop(&mut self) {
    log::trace!("dropping program {}", self.handle);
    unsafe { self.backend.borrow_mut().drop_program(self.handle) }
  }
}
