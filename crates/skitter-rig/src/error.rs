//! Error types for skitter-rig.

use thiserror::Error;

/// Errors from leg chain construction.
///
/// Malformed configurations are rejected when a chain is built; per-frame
/// code never sees them.
#[derive(Debug, Clone, Error)]
pub enum RigError {
    /// A chain needs a hip joint, at least one interior joint, and a foot
    /// joint.
    #[error("chain too short: {got} joints, need at least 3")]
    ChainTooShort {
        /// Number of joints requested.
        got: usize,
    },

    /// Bone lengths must be positive and finite.
    #[error("invalid bone length: {got}")]
    InvalidBoneLength {
        /// The rejected length.
        got: f32,
    },
}
