//! Inverse kinematics for point-joint leg chains.
//!
//! Provides a FABRIK-style relaxation solver for chains of fixed-length
//! bones, with a pole-vector correction that rolls each interior joint
//! toward an attracting point.

use crate::error::RigError;
use glam::{Quat, Vec3};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Squared length under which a direction is treated as degenerate.
const DEGENERATE_SQ: f32 = 1e-12;

/// Configuration for IK solving.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Ik {
    /// Relaxation passes per solve. A fixed count, not a convergence
    /// check; the loop always runs to completion.
    pub iterations: u32,
    /// Squared distance between the foot joint and the requested target
    /// under which the solve is skipped entirely.
    pub skip_epsilon: f32,
}

impl Default for Ik {
    fn default() -> Self {
        Self {
            iterations: 10,
            skip_epsilon: 1e-3,
        }
    }
}

/// Result of an IK solve.
#[derive(Debug, Clone, Copy)]
pub struct IkResult {
    /// False when the solve early-exited because the target already
    /// matched the foot joint.
    pub solved: bool,
    /// Relaxation iterations executed.
    pub iterations: u32,
    /// Interior joints whose pole correction was skipped as degenerate.
    pub pole_skips: u32,
}

/// A leg's joint chain: point joints connected by fixed-length bones.
///
/// Index 0 is the hip-side end, the last index is the foot end. The joint
/// count and bone length are fixed at construction; only the solver moves
/// the joints afterwards.
#[derive(Debug, Clone)]
pub struct Chain {
    joints: Vec<Vec3>,
    bone_length: f32,
}

impl Chain {
    /// Creates a chain as a vertical column above `foot`.
    ///
    /// The foot end starts at `foot` and each joint above it is one bone
    /// length higher, matching a leg at rest before its first solve.
    pub fn column(foot: Vec3, joint_count: usize, bone_length: f32) -> Result<Self, RigError> {
        let up = Vec3::new(0.0, bone_length, 0.0);
        let joints = (0..joint_count)
            .map(|i| foot + up * (joint_count.saturating_sub(i + 1)) as f32)
            .collect();
        Self::from_joints(joints, bone_length)
    }

    /// Creates a chain from explicit joint positions.
    ///
    /// Fails for fewer than three joints or a non-positive bone length.
    pub fn from_joints(joints: Vec<Vec3>, bone_length: f32) -> Result<Self, RigError> {
        if joints.len() < 3 {
            return Err(RigError::ChainTooShort { got: joints.len() });
        }
        if bone_length <= 0.0 || !bone_length.is_finite() {
            return Err(RigError::InvalidBoneLength { got: bone_length });
        }
        Ok(Self { joints, bone_length })
    }

    /// Joint positions, hip end first.
    pub fn joints(&self) -> &[Vec3] {
        &self.joints
    }

    /// Target distance between adjacent joints.
    pub fn bone_length(&self) -> f32 {
        self.bone_length
    }

    /// Number of joints.
    pub fn len(&self) -> usize {
        self.joints.len()
    }

    /// Returns true if the chain has no joints. Construction guarantees at
    /// least three, so this is always false for a built chain.
    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }

    /// Current foot-end joint.
    pub fn foot(&self) -> Vec3 {
        *self.joints.last().unwrap()
    }
}

/// Recomputes every joint position so the foot end reaches `foot_target`
/// and the chain's bend leans toward `pole`.
///
/// The foot end is pinned to the target for the whole solve and equals it
/// exactly on return. The hip end is seeded from `anchor` before the
/// relaxation passes but never clamped to it; the passes move it freely,
/// so an out-of-reach target leaves the chain fully extended toward it
/// rather than stretched from the anchor.
///
/// Solving is skipped entirely (and the chain left untouched) when the
/// target is within `skip_epsilon` squared distance of the current foot
/// joint.
pub fn solve_chain(
    chain: &mut Chain,
    anchor: Vec3,
    foot_target: Vec3,
    pole: Vec3,
    config: &Ik,
) -> IkResult {
    let last = chain.joints.len() - 1;
    if chain.joints[last].distance_squared(foot_target) < config.skip_epsilon {
        return IkResult {
            solved: false,
            iterations: 0,
            pole_skips: 0,
        };
    }

    let bone_length = chain.bone_length;
    let joints = &mut chain.joints;

    // Pin the foot end, dragging the interior joints with it.
    let shift = foot_target - joints[last];
    for joint in joints[1..last].iter_mut() {
        *joint += shift;
    }
    joints[last] = foot_target;
    joints[0] = anchor;

    for _ in 0..config.iterations {
        // Extend bone by bone away from the hip end.
        for j in 1..last {
            let dir = (joints[j] - joints[j - 1]).normalize_or_zero();
            joints[j] = joints[j - 1] + dir * bone_length;
        }
        // Re-anchor at the pinned foot, hip end included. Ending on this
        // pass keeps every adjacent pair exactly one bone length apart.
        for j in (0..last).rev() {
            let dir = (joints[j] - joints[j + 1]).normalize_or_zero();
            joints[j] = joints[j + 1] + dir * bone_length;
        }
    }

    let mut pole_skips = 0;
    for i in 1..last {
        if !roll_toward_pole(joints, i, pole) {
            pole_skips += 1;
        }
    }

    IkResult {
        solved: true,
        iterations: config.iterations,
        pole_skips,
    }
}

/// Rotates interior joint `i` about the axis spanning its neighbors so its
/// bend lines up with the pole point.
///
/// Both rotations here preserve the joint's distance to each neighbor, so
/// bone lengths survive the correction. Returns false when the geometry is
/// degenerate and the joint is left at its relaxed position.
fn roll_toward_pole(joints: &mut [Vec3], i: usize, pole: Vec3) -> bool {
    let origin = joints[i - 1];
    let normal = (joints[i + 1] - origin).normalize_or_zero();
    if normal == Vec3::ZERO {
        log::warn!("pole correction skipped at joint {i}: neighbors coincide");
        return false;
    }

    // Project the joint and the pole onto the plane through `origin`.
    let project = |p: Vec3| p - normal * normal.dot(p - origin);
    let v_joint = project(joints[i]) - origin;
    let v_pole = project(pole) - origin;
    if v_joint.length_squared() < DEGENERATE_SQ || v_pole.length_squared() < DEGENERATE_SQ {
        log::warn!(
            "pole correction skipped at joint {i}: degenerate projection (joint {v_joint}, pole {v_pole})"
        );
        return false;
    }

    let angle = signed_angle(v_joint, v_pole, normal);
    let rotated = Quat::from_axis_angle(normal, angle) * (joints[i] - origin) + origin;
    if rotated.is_nan() {
        log::warn!(
            "pole correction skipped at joint {i}: NaN result (joint {v_joint}, pole {v_pole}, angle {angle})"
        );
        return false;
    }
    joints[i] = rotated;
    true
}

/// Angle that rotates `a` onto `b` about `normal`, in radians.
///
/// Collapses to zero if float drift pushes the dot product out of the acos
/// domain.
fn signed_angle(a: Vec3, b: Vec3, normal: Vec3) -> f32 {
    let d = a.normalize().dot(b.normalize());
    let angle = if (-1.0..=1.0).contains(&d) { d.acos() } else { 0.0 };
    if normal.dot(a.cross(b)) < 0.0 {
        -angle
    } else {
        angle
    }
}
