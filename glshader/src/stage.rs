//! Shader stage kinds.
//!
//! A shader stage is a part of a shader program. Typically, programs are comprised of several
//! stages; the minimal rendering configuration implies at least a vertex stage and a fragment
//! stage, while a compute program holds a single compute stage.

use std::fmt;

/// Name reported for a native stage value no [`StageKind`] maps to.
pub const UNKNOWN_STAGE_NAME: &str = "unknown";

/// A shader stage kind.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum StageKind {
  /// Compute shader.
  Compute,
  /// Vertex shader.
  Vertex,
  /// Tessellation control shader.
  TessellationControl,
  /// Tessellation evaluation shader.
  TessellationEvaluation,
  /// Geometry shader.
  Geometry,
  /// Fragment shader.
  Fragment,
}

impl StageKind {
  /// Every stage kind, in pipeline-independent order.
  pub const ALL: [StageKind; 6] = [
    StageKind::Compute,
    StageKind::Vertex,
    StageKind::TessellationControl,
    StageKind::TessellationEvaluation,
    StageKind::Geometry,
    StageKind::Fragment,
  ];

  /// Short, human readable name of the stage, as used in error messages.
  pub fn name(self) -> &'static str {
    match self {
      StageKind::Compute => "compute",
      StageKind::Vertex => "vertex",
      StageKind::TessellationControl => "tesselation control",
      StageKind::TessellationEvaluation => "tesselation evaluation",
      StageKind::Geometry => "geometry",
      StageKind::Fragment => "fragment",
    }
  }

  /// Guess the stage kind of a source file from its extension.
  ///
  /// The usual glslang extensions are recognized: `vert`, `tesc`, `tese`, `geom`, `frag` and
  /// `comp`.
  pub fn from_extension(ext: &str) -> Option<Self> {
    match ext {
      "comp" => Some(StageKind::Compute),
      "vert" | "vs" => Some(StageKind::Vertex),
      "tesc" => Some(StageKind::TessellationControl),
      "tese" => Some(StageKind::TessellationEvaluation),
      "geom" | "gs" => Some(StageKind::Geometry),
      "frag" | "fs" => Some(StageKind::Fragment),
      _ => None,
    }
  }
}

impl fmt::Display for StageKind {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    f.write_str(self.name())
  }
}

/// Name of an optional stage kind, falling back to [`UNKNOWN_STAGE_NAME`].
pub fn stage_name(kind: Option<StageKind>) -> &'static str {
  kind.map_or(UNKNOWN_STAGE_NAME, StageKind::name)
}
