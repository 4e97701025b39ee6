//! Recording backend used by the integration tests.
//!
//! Shaders compile when their source defines `main`. Programs fail to link when two attached
//! shaders of the same stage both define `main`.

#![allow(dead_code)]

use glshader::{
  backend::{EntryPoint, LoaderBackend, ProgramBackend, ShaderBackend},
  Context, Reporting, StageKind,
};
use std::collections::HashMap;

pub const VERTEX_SRC: &str = "in vec2 co;\nvoid main() { gl_Position = vec4(co, 0., 1.); }\n";
pub const FRAGMENT_SRC: &str = "out vec4 frag;\nvoid main() { frag = vec4(1.); }\n";
pub const BROKEN_SRC: &str = "This shader won't compile";

pub const COMPILE_LOG: &str = "0:1(1): error: syntax error, unexpected NEW_IDENTIFIER";
pub const LINK_LOG: &str = "error: function `main' is multiply defined";

#[derive(Debug)]
pub struct MockShader {
  pub kind: StageKind,
  pub source: Option<String>,
  pub compiled: bool,
}

#[derive(Debug, Default)]
pub struct MockProgram {
  pub attached: Vec<usize>,
  pub linked: bool,
}

#[derive(Debug)]
pub struct MockBackend {
  loaded: bool,
  loadable: bool,
  refuse_creation: bool,
  unknown_kinds: bool,
  next_handle: usize,
  pub load_attempts: usize,
  pub shaders: HashMap<usize, MockShader>,
  pub programs: HashMap<usize, MockProgram>,
  pub source_uploads: usize,
  pub compile_calls: usize,
  pub attach_calls: usize,
  pub link_calls: usize,
  pub use_calls: usize,
  pub current_program: Option<usize>,
  pub dropped_shaders: Vec<usize>,
  pub dropped_programs: Vec<usize>,
}

impl MockBackend {
  /// A backend with every entry point loaded.
  pub fn new() -> Self {
    MockBackend {
      loaded: true,
      loadable: true,
      refuse_creation: false,
      unknown_kinds: false,
      next_handle: 1,
      load_attempts: 0,
      shaders: HashMap::new(),
      programs: HashMap::new(),
      source_uploads: 0,
      compile_calls: 0,
      attach_calls: 0,
      link_calls: 0,
      use_calls: 0,
      current_program: None,
      dropped_shaders: Vec::new(),
      dropped_programs: Vec::new(),
    }
  }

  /// A backend whose entry points are missing; `loadable` tells whether loading succeeds.
  pub fn unloaded(loadable: bool) -> Self {
    MockBackend {
      loaded: false,
      loadable,
      ..Self::new()
    }
  }

  /// A backend refusing to create any object.
  pub fn refusing() -> Self {
    MockBackend {
      refuse_creation: true,
      ..Self::new()
    }
  }

  /// A backend reporting a stage value it does not know for every shader.
  pub fn with_unknown_kinds() -> Self {
    MockBackend {
      unknown_kinds: true,
      ..Self::new()
    }
  }

  fn next_handle(&mut self) -> Option<usize> {
    if self.refuse_creation {
      return None;
    }

    let handle = self.next_handle;
    self.next_handle += 1;
    Some(handle)
  }

  fn defines_main(&self, shader: usize) -> bool {
    self
      .shaders
      .get(&shader)
      .and_then(|s| s.source.as_deref())
      .map_or(false, |src| src.contains("void main"))
  }
}

impl LoaderBackend for MockBackend {
  fn is_loaded(&self, _: EntryPoint) -> bool {
    self.loaded
  }

  fn load_functions(&mut self) -> Result<(), String> {
    self.load_attempts += 1;

    if self.loadable {
      self.loaded = true;
      Ok(())
    } else {
      Err("no current context".to_owned())
    }
  }
}

unsafe impl ShaderBackend for MockBackend {
  unsafe fn new_shader(&mut self, kind: StageKind) -> Option<usize> {
    let handle = self.next_handle()?;
    self.shaders.insert(
      handle,
      MockShader {
        kind,
        source: None,
        compiled: false,
      },
    );
    Some(handle)
  }

  unsafe fn set_shader_source(&mut self, handle: usize, source: &str) {
    self.source_uploads += 1;

    if let Some(shader) = self.shaders.get_mut(&handle) {
      shader.source = Some(source.to_owned());
      shader.compiled = false;
    }
  }

  unsafe fn compile_shader(&mut self, handle: usize) -> Result<(), String> {
    self.compile_calls += 1;

    let ok = self.defines_main(handle);
    if let Some(shader) = self.shaders.get_mut(&handle) {
      shader.compiled = ok;
    }

    if ok {
      Ok(())
    } else {
      Err(COMPILE_LOG.to_owned())
    }
  }

  unsafe fn shader_kind(&mut self, handle: usize) -> Option<StageKind> {
    if self.unknown_kinds {
      return None;
    }

    self.shaders.get(&handle).map(|shader| shader.kind)
  }

  unsafe fn drop_shader(&mut self, handle: usize) {
    self.shaders.remove(&handle);
    self.dropped_shaders.push(handle);
  }
}

unsafe impl ProgramBackend for MockBackend {
  unsafe fn new_program(&mut self) -> Option<usize> {
    let handle = self.next_handle()?;
    self.programs.insert(handle, MockProgram::default());
    Some(handle)
  }

  unsafe fn attach_shader(&mut self, program: usize, shader: usize) {
    self.attach_calls += 1;

    if let Some(program) = self.programs.get_mut(&program) {
      program.attached.push(shader);
    }
  }

  unsafe fn link_program(&mut self, program: usize) -> Result<(), String> {
    self.link_calls += 1;

    let attached = self
      .programs
      .get(&program)
      .map(|p| p.attached.clone())
      .unwrap_or_default();

    let mut entry_points: HashMap<StageKind, usize> = HashMap::new();
    for shader in attached.iter().filter(|&&s| self.defines_main(s)) {
      if let Some(kind) = self.shaders.get(shader).map(|s| s.kind) {
        *entry_points.entry(kind).or_default() += 1;
      }
    }

    let ok = entry_points.values().all(|&count| count <= 1);
    if let Some(program) = self.programs.get_mut(&program) {
      program.linked = ok;
    }

    if ok {
      Ok(())
    } else {
      Err(LINK_LOG.to_owned())
    }
  }

  unsafe fn use_program(&mut self, program: usize) {
    self.use_calls += 1;
    self.current_program = Some(program);
  }

  unsafe fn drop_program(&mut self, program: usize) {
    self.programs.remove(&program);
    self.dropped_programs.push(program);
  }
}

pub fn context(reporting: Reporting) -> Context<MockBackend> {
  Context::with_reporting(MockBackend::new(), reporting)
}

/// A failing reader, standing for a stream in a bad state.
pub struct BrokenReader;

impl std::io::Read for BrokenReader {
  fn read(&mut self, _: &mut [u8]) -> std::io::Result<usize> {
    Err(std::io::Error::new(
      std::io::ErrorKind::Other,
      "stream is not readable",
    ))
  }
}
