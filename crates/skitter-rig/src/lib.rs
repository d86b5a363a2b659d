//! Procedural leg animation for multi-legged walkers.
//!
//! Provides fixed-bone-length joint chains, a FABRIK-style IK solver with
//! pole-vector roll correction, and a gait controller that plants and
//! steps feet as the body moves. Rendering, input and timing live outside
//! this crate: callers feed in per-frame elapsed time and movement intent,
//! and read back plain joint/foot geometry.
//!
//! # Example
//!
//! ```
//! use glam::Vec3;
//! use skitter_rig::{Body, MoveIntent};
//!
//! let mut body = Body::new(Vec3::new(0.0, 1.0, 0.0));
//! let intent = MoveIntent {
//!     forward: true,
//!     ..Default::default()
//! };
//! for _ in 0..120 {
//!     body.update(1.0 / 60.0, intent);
//! }
//! for view in body.leg_views() {
//!     assert_eq!(view.joints.len(), 4);
//! }
//! ```

mod error;
mod ik;
mod locomotion;

pub use error::RigError;
pub use ik::{Chain, Ik, IkResult, solve_chain};
pub use locomotion::{Body, Gait, LEG_COUNT, Leg, LegView, MoveIntent};
