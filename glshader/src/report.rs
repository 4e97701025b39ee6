//! Failure reporting policy.
//!
//! Shaders and programs always record the outcome of an operation in their status. What
//! happens next depends on the [`Reporting`] policy they were created with: the failure is
//! either handed back to the caller as an [`Error`], or written to the diagnostic log and
//! swallowed, in which case the status is the only signal left.

use crate::error::Error;

/// How failures are propagated.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Reporting {
  /// Return failures as `Err`.
  Raise,
  /// Log failures with `log::error!` and return `Ok(())`.
  ///
  /// Callers must poll the status after every mutating call.
  Diagnostic,
}

impl Default for Reporting {
  #[cfg(not(feature = "diagnostic-by-default"))]
  fn default() -> Self {
    Reporting::Raise
  }

  #[cfg(feature = "diagnostic-by-default")]
  fn default() -> Self {
    Reporting::Diagnostic
  }
}

impl Reporting {
  /// Propagate an error according to the policy.
  ///
  /// Fatal errors (see [`ErrorKind::is_fatal`](crate::error::ErrorKind::is_fatal)) are always
  /// returned.
  pub fn report(self, err: Error) -> Result<(), Error> {
    if err.kind().is_fatal() {
      return Err(err);
    }

    match self {
      Reporting::Raise => {
        log::debug!("raising {}", err.kind());
        Err(err)
      }

      Reporting::Diagnostic => {
        log::error!("{}", err);
        Ok(())
      }
    }
  }
}
