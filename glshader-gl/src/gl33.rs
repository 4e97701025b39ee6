use gl::types::{GLchar, GLenum, GLint, GLsizei, GLuint};
use glshader::{
  backend::{EntryPoint, LoaderBackend, ProgramBackend, ShaderBackend},
  StageKind,
};
use std::{ffi::c_void, fmt};

type ProcLoader = Box<dyn FnMut(&str) -> *const c_void>;

/// OpenGL 3.3 backend.
///
/// Native calls go straight to the global `gl` entry points, so the context they target must
/// be current on the calling thread.
pub struct GL33 {
  loader: Option<ProcLoader>,
}

impl fmt::Debug for GL33 {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("GL33")
      .field("loader", &self.loader.as_ref().map(|_| "<loader>"))
      .finish()
  }
}

impl GL33 {
  /// Backend expecting the entry points to be loaded by the caller.
  ///
  /// Creating a shader or a program fails if they are not.
  pub fn new() -> Self {
    GL33 {
      loader: None,
    }
  }

  /// Backend able to load the entry points itself, with a function resolving a symbol name
  /// to its address (e.g. `glfwGetProcAddress`).
  ///
  /// The resolver is only called the first time a missing entry point is needed.
  pub fn with_loader(loader: impl FnMut(&str) -> *const c_void + 'static) -> Self {
    GL33 {
      loader: Some(Box::new(loader)),
    }
  }

  unsafe fn shader_info_log(handle: GLuint) -> String {
    let mut log_len: GLint = 0;
    gl::GetShaderiv(handle, gl::INFO_LOG_LENGTH, &mut log_len);

    let mut log = vec![0u8; log_len.max(0) as usize];
    let mut written: GLsizei = 0;

    if !log.is_empty() {
      gl::GetShaderInfoLog(
        handle,
        log_len,
        &mut written,
        log.as_mut_ptr() as *mut GLchar,
      );
    }

    log.truncate(written.max(0) as usize);
    String::from_utf8_lossy(&log).into_owned()
  }

  unsafe fn program_info_log(handle: GLuint) -> String {
    let mut log_len: GLint = 0;
    gl::GetProgramiv(handle, gl::INFO_LOG_LENGTH, &mut log_len);

    let mut log = vec![0u8; log_len.max(0) as usize];
    let mut written: GLsizei = 0;

    if !log.is_empty() {
      gl::GetProgramInfoLog(
        handle,
        log_len,
        &mut written,
        log.as_mut_ptr() as *mut GLchar,
      );
    }

    log.truncate(written.max(0) as usize);
    String::from_utf8_lossy(&log).into_owned()
  }
}

impl Default for GL33 {
  fn default() -> Self {
    Self::new()
  }
}

impl LoaderBackend for GL33 {
  fn is_loaded(&self, entry_point: EntryPoint) -> bool {
    match entry_point {
      EntryPoint::CreateShader => gl::CreateShader::is_loaded(),
      EntryPoint::CreateProgram => gl::CreateProgram::is_loaded(),
    }
  }

  fn load_functions(&mut self) -> Result<(), String> {
    let loader = self
      .loader
      .as_mut()
      .ok_or_else(|| "no function loader was given to the backend".to_owned())?;

    trace!("loading OpenGL entry points");
    gl::load_with(|name| loader(name));

    Ok(())
  }
}

unsafe impl ShaderBackend for GL33 {
  unsafe fn new_shader(&mut self, kind: StageKind) -> Option<usize> {
    let handle = gl::CreateShader(gl_shader_type(kind));

    if handle == 0 {
      return None;
    }

    trace!("created {} shader {}", kind, handle);
    Some(handle as usize)
  }

  unsafe fn set_shader_source(&mut self, handle: usize, source: &str) {
    // explicit length, so that the source doesn’t need to be nul-terminated
    let src = source.as_ptr() as *const GLchar;
    let len = source.len() as GLint;

    gl::ShaderSource(handle as GLuint, 1, &src, &len);
  }

  unsafe fn compile_shader(&mut self, handle: usize) -> Result<(), String> {
    let handle = handle as GLuint;
    gl::CompileShader(handle);

    let mut compiled: GLint = gl::FALSE.into();
    gl::GetShaderiv(handle, gl::COMPILE_STATUS, &mut compiled);

    if compiled == gl::TRUE.into() {
      Ok(())
    } else {
      Err(Self::shader_info_log(handle))
    }
  }

  unsafe fn shader_kind(&mut self, handle: usize) -> Option<StageKind> {
    let mut ty: GLint = 0;
    gl::GetShaderiv(handle as GLuint, gl::SHADER_TYPE, &mut ty);

    stage_kind_from_gl(ty as GLenum)
  }

  unsafe fn drop_shader(&mut self, handle: usize) {
    trace!("deleting shader {}", handle);
    gl::DeleteShader(handle as GLuint);
  }
}

unsafe impl ProgramBackend for GL33 {
  unsafe fn new_program(&mut self) -> Option<usize> {
    let handle = gl::CreateProgram();

    if handle == 0 {
      return None;
    }

    trace!("created program {}", handle);
    Some(handle as usize)
  }

  unsafe fn attach_shader(&mut self, program: usize, shader: usize) {
    gl::AttachShader(program as GLuint, shader as GLuint);
  }

  unsafe fn link_program(&mut self, program: usize) -> Result<(), String> {
    let handle = program as GLuint;
    gl::LinkProgram(handle);

    let mut linked: GLint = gl::FALSE.into();
    gl::GetProgramiv(handle, gl::LINK_STATUS, &mut linked);

    if linked == gl::TRUE.into() {
      Ok(())
    } else {
      Err(Self::program_info_log(handle))
    }
  }

  // not cached: the application may bind other programs behind our back
  unsafe fn use_program(&mut self, program: usize) {
    gl::UseProgram(program as GLuint);
  }

  unsafe fn drop_program(&mut self, program: usize) {
    trace!("deleting program {}", program);
    gl::DeleteProgram(program as GLuint);
  }
}

/// OpenGL shader type of a stage kind.
pub fn gl_shader_type(kind: StageKind) -> GLenum {
  match kind {
    StageKind::Compute => gl::COMPUTE_SHADER,
    StageKind::Vertex => gl::VERTEX_SHADER,
    StageKind::TessellationControl => gl::TESS_CONTROL_SHADER,
    StageKind::TessellationEvaluation => gl::TESS_EVALUATION_SHADER,
    StageKind::Geometry => gl::GEOMETRY_SHADER,
    StageKind::Fragment => gl::FRAGMENT_SHADER,
  }
}

/// Stage kind of an OpenGL shader type, if it has one.
pub fn stage_kind_from_gl(ty: GLenum) -> Option<StageKind> {
  match ty {
    gl::COMPUTE_SHADER => Some(StageKind::Compute),
    gl::VERTEX_SHADER => Some(StageKind::Vertex),
    gl::TESS_CONTROL_SHADER => Some(StageKind::TessellationControl),
    gl::TESS_EVALUATION_SHADER => Some(StageKind::TessellationEvaluation),
    gl::GEOMETRY_SHADER => Some(StageKind::Geometry),
    gl::FRAGMENT_SHADER => Some(StageKind::Fragment),
    _ => None,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn every_stage_has_a_gl_type() {
    for kind in StageKind::ALL {
      assert_eq!(stage_kind_from_gl(gl_shader_type(kind)), Some(kind));
    }
  }

  #[test]
  fn unknown_gl_type() {
    assert_eq!(stage_kind_from_gl(0), None);
    assert_eq!(stage_kind_from_gl(gl::TEXTURE_2D), None);
  }
}
