//! Errors raised by shaders and programs.

use crate::backend::EntryPoint;
use std::{error, fmt, io};

/// Kind of an [`Error`].
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ErrorKind {
  /// The native function loader is unavailable: the entry point creating the object was not
  /// loaded and loading it failed.
  ///
  /// Always returned, whatever the [`Reporting`](crate::report::Reporting) policy.
  LoaderInit,
  /// The native API refused to create the object.
  ///
  /// Always returned, whatever the [`Reporting`](crate::report::Reporting) policy.
  Creation,
  /// The shader source stream could not be read.
  BadSourceStream,
  /// The shader failed to compile. The message holds the native info log.
  Compilation,
  /// A shader that was not successfully compiled was attached to a program.
  PrepareLink,
  /// The program failed to link. The message holds the native info log.
  Link,
}

impl ErrorKind {
  /// Whether errors of this kind bypass the diagnostic policy.
  ///
  /// Without a valid native object, there is nothing left to carry a status.
  pub fn is_fatal(self) -> bool {
    matches!(self, ErrorKind::LoaderInit | ErrorKind::Creation)
  }
}

impl fmt::Display for ErrorKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ErrorKind::LoaderInit => f.write_str("function loader error"),
      ErrorKind::Creation => f.write_str("creation error"),
      ErrorKind::BadSourceStream => f.write_str("bad source stream"),
      ErrorKind::Compilation => f.write_str("compilation error"),
      ErrorKind::PrepareLink => f.write_str("prepare link error"),
      ErrorKind::Link => f.write_str("link error"),
    }
  }
}

/// Error raised by a [`Shader`](crate::shader::Shader) or a
/// [`Program`](crate::program::Program).
#[derive(Debug)]
pub struct Error {
  kind: ErrorKind,
  message: String,
  source: Option<io::Error>,
}

impl Error {
  fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
    Error {
      kind,
      message: message.into(),
      source: None,
    }
  }

  pub(crate) fn loader_init(entry_point: EntryPoint, reason: Option<&str>) -> Self {
    let message = match reason {
      Some(reason) => format!("{} is not loaded: {}", entry_point, reason),
      None => format!("{} is not loaded", entry_point),
    };

    Error::new(ErrorKind::LoaderInit, message)
  }

  pub(crate) fn creation(what: impl fmt::Display) -> Self {
    Error::new(ErrorKind::Creation, format!("unable to create {}", what))
  }

  pub(crate) fn bad_source_stream(stage: &str, cause: io::Error) -> Self {
    Error {
      kind: ErrorKind::BadSourceStream,
      message: format!("cannot read the sources of the {} shader: {}", stage, cause),
      source: Some(cause),
    }
  }

  pub(crate) fn compilation(stage: &str, log: &str) -> Self {
    Error::new(
      ErrorKind::Compilation,
      format!("{} shader failed to compile\n{}", stage, log),
    )
  }

  pub(crate) fn prepare_link(stage: &str) -> Self {
    Error::new(
      ErrorKind::PrepareLink,
      format!(
        "the {} shader was not compiled before being attached to the program",
        stage
      ),
    )
  }

  pub(crate) fn link(log: &str) -> Self {
    Error::new(ErrorKind::Link, format!("shader program failed to link\n{}", log))
  }

  /// Kind of error.
  pub fn kind(&self) -> ErrorKind {
    self.kind
  }

  /// Full error message, including the native info log if any.
  pub fn message(&self) -> &str {
    &self.message
  }
}

impl fmt::Display for Error {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}: {}", self.kind, self.message)
  }
}

impl error::Error for Error {
  fn source(&self) -> Option<&(dyn error::Error + 'static)> {
    self
      .source
      .as_ref()
      .map(|e| e as &(dyn error::Error + 'static))
  }
}
