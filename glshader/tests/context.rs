mod common;

use common::{MockBackend, VERTEX_SRC};
use glshader::{CompileStatus, Context, ErrorKind, Reporting, StageKind};

#[test]
fn loaded_backend_is_not_reloaded() {
  let mut ctx = Context::new(MockBackend::new());
  ctx.new_shader(StageKind::Vertex).unwrap();
  ctx.new_program().unwrap();

  assert!(!ctx.loader_attempted());
  assert_eq!(ctx.backend().load_attempts, 0);
}

#[test]
fn lazy_loading_happens_once() {
  let mut ctx = Context::new(MockBackend::unloaded(true));

  ctx.new_shader(StageKind::Vertex).unwrap();
  ctx.new_program().unwrap();
  ctx.new_shader(StageKind::Fragment).unwrap();

  assert!(ctx.loader_attempted());
  assert_eq!(ctx.backend().load_attempts, 1);
}

#[test]
fn missing_loader_is_fatal_for_shaders() {
  let mut ctx = Context::with_reporting(MockBackend::unloaded(false), Reporting::Diagnostic);

  let err = ctx.new_shader(StageKind::Vertex).unwrap_err();

  assert_eq!(err.kind(), ErrorKind::LoaderInit);
  assert!(err.message().contains("no current context"));
}

#[test]
fn missing_loader_is_fatal_for_programs() {
  let mut ctx = Context::with_reporting(MockBackend::unloaded(false), Reporting::Diagnostic);

  let err = ctx.new_program().unwrap_err();

  assert_eq!(err.kind(), ErrorKind::LoaderInit);
}

#[test]
fn failed_loading_is_not_retried() {
  let mut ctx = Context::new(MockBackend::unloaded(false));

  assert!(ctx.new_shader(StageKind::Vertex).is_err());
  assert!(ctx.new_program().is_err());

  assert_eq!(ctx.backend().load_attempts, 1);
}

#[test]
fn refused_creation_is_fatal() {
  let mut ctx = Context::with_reporting(MockBackend::refusing(), Reporting::Diagnostic);

  let shader_err = ctx.new_shader(StageKind::Compute).unwrap_err();
  let program_err = ctx.new_program().unwrap_err();

  assert_eq!(shader_err.kind(), ErrorKind::Creation);
  assert!(shader_err.message().contains("compute"));
  assert_eq!(program_err.kind(), ErrorKind::Creation);
}

#[test]
#[should_panic(expected = "already borrowed")]
fn dropping_a_unit_while_inspecting_the_backend_panics() {
  let mut ctx = Context::new(MockBackend::new());
  let shader = ctx.new_shader(StageKind::Vertex).unwrap();

  let _backend = ctx.backend();
  drop(shader);
}

#[test]
fn backend_can_be_inspected_between_calls() {
  let mut ctx = Context::new(MockBackend::new());
  let shader = ctx.new_shader(StageKind::Vertex).unwrap();
  let handle = shader.handle();

  assert!(ctx.backend().shaders.contains_key(&handle));
  drop(shader);
  assert_eq!(ctx.backend().dropped_shaders, [handle]);
}

#[test]
fn units_keep_the_policy_they_were_created_with() {
  let mut ctx = Context::with_reporting(MockBackend::new(), Reporting::Raise);
  let raising = ctx.new_shader(StageKind::Vertex).unwrap();

  ctx.set_reporting(Reporting::Diagnostic);
  let logging = ctx.new_shader(StageKind::Vertex).unwrap();

  assert_eq!(raising.reporting(), Reporting::Raise);
  assert_eq!(logging.reporting(), Reporting::Diagnostic);
}

#[test]
fn both_policies_set_the_same_status() {
  for reporting in [Reporting::Raise, Reporting::Diagnostic] {
    let mut ctx = Context::with_reporting(MockBackend::new(), reporting);
    let mut shader = ctx.new_shader(StageKind::Vertex).unwrap();
    shader.set_source(common::BROKEN_SRC);

    let result = shader.compile();

    assert_eq!(result.is_err(), reporting == Reporting::Raise);
    assert_eq!(shader.status(), CompileStatus::CompileError);
  }
}

#[cfg(not(feature = "diagnostic-by-default"))]
#[test]
fn default_policy_raises() {
  let mut ctx = Context::new(MockBackend::new());
  assert_eq!(ctx.reporting(), Reporting::Raise);

  let shader = ctx.new_shader_from_source(StageKind::Vertex, VERTEX_SRC);
  assert!(shader.is_ok());
}

#[cfg(feature = "diagnostic-by-default")]
#[test]
fn default_policy_logs() {
  let ctx = Context::new(MockBackend::new());
  assert_eq!(ctx.reporting(), Reporting::Diagnostic);
}
