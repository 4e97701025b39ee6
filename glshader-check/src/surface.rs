//! Hidden GLFW window providing the OpenGL 3.3 context.

use glfw::{self, Context as _, Glfw, InitError, Window, WindowEvent, WindowMode};
use glshader_gl::GL33;
use std::{cell::RefCell, error, ffi::c_void, fmt, rc::Rc, sync::mpsc::Receiver};

/// Error that can be risen while creating a surface.
#[derive(Debug)]
pub enum SurfaceError {
  /// Initialization of GLFW went wrong.
  InitError(InitError),

  /// The window (and thus the context) could not be created.
  NoWindow,
}

impl fmt::Display for SurfaceError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match self {
      SurfaceError::InitError(e) => write!(f, "initialization error: {}", e),
      SurfaceError::NoWindow => f.write_str("cannot create an OpenGL 3.3 window"),
    }
  }
}

impl From<InitError> for SurfaceError {
  fn from(e: InitError) -> Self {
    SurfaceError::InitError(e)
  }
}

impl error::Error for SurfaceError {
  fn source(&self) -> Option<&(dyn error::Error + 'static)> {
    match self {
      SurfaceError::InitError(e) => Some(e),
      _ => None,
    }
  }
}

/// GLFW surface.
///
/// The window is shared with the backend loader, so it stays alive as long as a shader or a
/// program needs its context.
pub struct Surface {
  _glfw: Glfw,

  /// Hidden window owning the context.
  pub window: Rc<RefCell<Window>>,

  _events_rx: Receiver<(f64, WindowEvent)>,
}

impl Surface {
  /// Initialize GLFW and make a hidden OpenGL 3.3 core context current.
  pub fn new_gl33() -> Result<Self, SurfaceError> {
    #[cfg(feature = "log-errors")]
    let error_cbk = glfw::LOG_ERRORS;
    #[cfg(not(feature = "log-errors"))]
    let error_cbk = glfw::FAIL_ON_ERRORS;

    let mut glfw = glfw::init(error_cbk)?;

    // OpenGL hints
    glfw.window_hint(glfw::WindowHint::OpenGlProfile(
      glfw::OpenGlProfileHint::Core,
    ));
    glfw.window_hint(glfw::WindowHint::OpenGlForwardCompat(true));
    glfw.window_hint(glfw::WindowHint::ContextVersionMajor(3));
    glfw.window_hint(glfw::WindowHint::ContextVersionMinor(3));
    glfw.window_hint(glfw::WindowHint::Visible(false));

    let (mut window, events_rx) = glfw
      .create_window(64, 64, "glshader-check", WindowMode::Windowed)
      .ok_or(SurfaceError::NoWindow)?;

    window.make_current();

    Ok(Surface {
      _glfw: glfw,
      window: Rc::new(RefCell::new(window)),
      _events_rx: events_rx,
    })
  }

  /// OpenGL backend loading its entry points from this surface’s context.
  pub fn backend(&self) -> GL33 {
    let window = self.window.clone();
    GL33::with_loader(move |s| window.borrow_mut().get_proc_address(s) as *const c_void)
  }
}
