use thiserror::Error;

use crate::types::{LightType, SurfaceType};

/// Errors raised when mapping bytes to uniform records or when running the
/// opt-in consistency checks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UniformError {
    #[error("{name} expects {expected} bytes, got {actual}")]
    BufferSize {
        name: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("light buffer of {actual} bytes is not a multiple of the {stride}-byte stride")]
    LightStride { stride: usize, actual: usize },
    #[error("light count {count} exceeds the {supplied} light(s) supplied")]
    LightCountExceeded { count: u32, supplied: usize },
    #[error("light {index} has undefined type tag {tag}")]
    UndefinedLightType { index: usize, tag: LightType },
    #[error("undefined surface type tag {0}")]
    UndefinedSurfaceType(SurfaceType),
    #[error("unknown {kind} name `{name}`")]
    UnknownTagName { kind: &'static str, name: String },
}
