use physworld_common::BodyId;

use crate::descriptor::DescriptorError;

/// Errors surfaced by [`World`](crate::World) operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WorldError {
    /// The scenario descriptor could not be turned into a world. Fatal to
    /// construction; no world exists.
    #[error("invalid descriptor: {0}")]
    InvalidDescriptor(#[from] DescriptorError),
    /// A live parameter update carried a non-finite value. The previous
    /// value is kept.
    #[error("invalid parameter {name}: {value} is not finite")]
    InvalidParameter { name: &'static str, value: f32 },
    /// The world configuration is unusable (e.g. a non-positive timestep).
    #[error("invalid world config: {0}")]
    InvalidConfig(String),
    /// The world was torn down; it accepts no further operations.
    #[error("world has been torn down")]
    WorldDisposed,
    #[error("unknown body {0}")]
    UnknownBody(BodyId),
}
