mod surface;

use crate::surface::{Surface, SurfaceError};
use glshader::{CompileStatus, Context, LinkStatus, Reporting, StageKind};
use std::{
  ffi::CStr,
  fmt,
  os::raw::c_char,
  path::{Path, PathBuf},
  process,
};
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(about = "Compile and link GLSL shader files")]
pub struct CLIOpts {
  /// Stage of every shader (vertex, fragment, geometry, compute, …). Guessed from the file
  /// extension if absent.
  #[structopt(short, long, parse(try_from_str = parse_stage))]
  stage: Option<StageKind>,

  /// Log failures and keep going instead of stopping at the first one.
  #[structopt(short, long)]
  diagnostic: bool,

  /// Only compile the shaders.
  #[structopt(long)]
  no_link: bool,

  /// Shader source files.
  #[structopt(parse(from_os_str), required = true)]
  shaders: Vec<PathBuf>,
}

#[derive(Debug)]
pub enum CheckError {
  UnknownStage(PathBuf),
  Surface(SurfaceError),
  Shader(glshader::Error),
}

impl fmt::Display for CheckError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      CheckError::UnknownStage(path) => write!(
        f,
        "cannot guess the stage of {}; use --stage",
        path.display()
      ),
      CheckError::Surface(e) => write!(f, "surface error: {}", e),
      CheckError::Shader(e) => write!(f, "{}", e),
    }
  }
}

impl From<SurfaceError> for CheckError {
  fn from(e: SurfaceError) -> Self {
    CheckError::Surface(e)
  }
}

impl From<glshader::Error> for CheckError {
  fn from(e: glshader::Error) -> Self {
    CheckError::Shader(e)
  }
}

fn parse_stage(s: &str) -> Result<StageKind, String> {
  StageKind::ALL
    .iter()
    .copied()
    .find(|kind| kind.name() == s)
    .or_else(|| StageKind::from_extension(s))
    .ok_or_else(|| format!("unknown stage: {}", s))
}

fn stage_of(path: &Path, forced: Option<StageKind>) -> Result<StageKind, CheckError> {
  forced
    .or_else(|| {
      path
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(StageKind::from_extension)
    })
    .ok_or_else(|| CheckError::UnknownStage(path.to_owned()))
}

// Log the driver information, once the entry points are loaded.
fn log_gl_info() {
  if !gl::GetString::is_loaded() {
    return;
  }

  let infos = [
    ("vendor", gl::VENDOR),
    ("renderer", gl::RENDERER),
    ("version", gl::VERSION),
    ("GLSL version", gl::SHADING_LANGUAGE_VERSION),
  ];

  for (name, info) in infos {
    let s = unsafe { gl::GetString(info) };

    if !s.is_null() {
      let s = unsafe { CStr::from_ptr(s as *const c_char) };
      log::info!("{}: {}", name, s.to_string_lossy());
    }
  }
}

// Returns whether every shader compiled and the program linked.
fn run(cli_opts: CLIOpts) -> Result<bool, CheckError> {
  let stages = cli_opts
    .shaders
    .iter()
    .map(|path| stage_of(path, cli_opts.stage).map(|kind| (path, kind)))
    .collect::<Result<Vec<_>, _>>()?;

  let surface = Surface::new_gl33()?;
  let reporting = if cli_opts.diagnostic {
    Reporting::Diagnostic
  } else {
    Reporting::Raise
  };
  let mut ctx = Context::with_reporting(surface.backend(), reporting);

  let mut shaders = Vec::with_capacity(stages.len());
  for (path, kind) in stages {
    let shader = ctx.new_shader_from_path(kind, path)?;
    log::info!(
      "{}: {} shader, {}",
      path.display(),
      shader.type_name(),
      shader.status()
    );
    shaders.push(shader);
  }

  log_gl_info();

  let mut ok = shaders
    .iter()
    .all(|shader| shader.status() == CompileStatus::CompileOk);

  if !cli_opts.no_link {
    let program = ctx.new_program_from_shaders(&shaders)?;
    log::info!("program: {}", program.status());

    if program.status() == LinkStatus::LinkOk {
      program.activate();
    } else {
      ok = false;
    }
  }

  Ok(ok)
}

fn main() {
  env_logger::builder()
    .filter_level(log::LevelFilter::Info)
    .parse_default_env()
    .init();
  let cli_opts = CLIOpts::from_args();

  log::debug!("CLI options:\n{:#?}", cli_opts);

  match run(cli_opts) {
    Ok(true) => (),

    Ok(false) => process::exit(1),

    Err(e) => {
      log::error!("{}", e);
      process::exit(1);
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn stage_from_name_or_extension() {
    assert_eq!(parse_stage("vertex"), Ok(StageKind::Vertex));
    assert_eq!(parse_stage("tesselation control"), Ok(StageKind::TessellationControl));
    assert_eq!(parse_stage("frag"), Ok(StageKind::Fragment));
    assert!(parse_stage("pixel").is_err());
  }

  #[test]
  fn stage_of_path() {
    assert_eq!(
      stage_of(Path::new("shaders/sky.geom"), None).ok(),
      Some(StageKind::Geometry)
    );
    assert_eq!(
      stage_of(Path::new("shaders/sky.glsl"), Some(StageKind::Compute)).ok(),
      Some(StageKind::Compute)
    );
    assert!(matches!(
      stage_of(Path::new("shaders/sky.glsl"), None),
      Err(CheckError::UnknownStage(_))
    ));
  }
}
