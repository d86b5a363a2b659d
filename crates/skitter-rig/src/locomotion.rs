//! Gait stepping and body locomotion for multi-legged walkers.
//!
//! Each leg holds its foot planted at a rest position that follows the
//! body. When the body drags the rest position too far from the foot, the
//! leg takes a single timed, arced step to catch up, and the animated foot
//! position drives the leg's IK chain every frame.

use crate::error::RigError;
use crate::ik::{solve_chain, Chain, Ik, IkResult};
use glam::Vec3;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for foot stepping.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Gait {
    /// Squared foot-to-rest distance beyond which a planted foot steps.
    pub trigger_distance_sq: f32,
    /// Duration of a single step in seconds. A step always finishes after
    /// this long, whatever happened to its target.
    pub step_time: f32,
    /// Peak height of the step arc above the lift-off point.
    ///
    /// The arc is relative to the lift-off height only; a target on
    /// higher or lower ground does not reshape it. Adequate for flat
    /// terrain.
    pub step_height: f32,
    /// How far past the new rest position a step lands, along the
    /// direction the rest position moved. Just under one bone keeps the
    /// landing slightly short of a full lead.
    pub stride_lead: f32,
}

impl Default for Gait {
    fn default() -> Self {
        Self {
            trigger_distance_sq: 1.0,
            step_time: 0.2,
            step_height: 0.2,
            stride_lead: 0.99,
        }
    }
}

/// A single leg: an IK joint chain plus foot stepping state.
#[derive(Debug, Clone)]
pub struct Leg {
    /// The joint chain the solver poses every frame.
    pub chain: Chain,
    /// Current animated foot position; the solver's target.
    pub foot_position: Vec3,
    /// Foot position when the current step began.
    pub previous_position: Vec3,
    /// Where the current step lands.
    pub target_position: Vec3,
    /// Position the foot holds while planted; follows the body.
    pub rest_position: Vec3,
    /// Attracting point the chain's bend leans toward.
    pub pole_position: Vec3,
    /// Seconds since the current step began.
    step_timer: f32,
}

impl Leg {
    /// Creates a planted leg with its chain stacked above `foot`, posed by
    /// an initial solve against `anchor` and `pole`.
    pub fn new(
        anchor: Vec3,
        foot: Vec3,
        pole: Vec3,
        joint_count: usize,
        bone_length: f32,
        ik: &Ik,
    ) -> Result<Self, RigError> {
        let mut leg = Self {
            chain: Chain::column(foot, joint_count, bone_length)?,
            foot_position: foot,
            previous_position: foot,
            target_position: foot,
            rest_position: foot,
            pole_position: pole,
            step_timer: 0.0,
        };
        // The fresh column already ends at `foot`, which would trip the
        // solver's early exit; force the initial pose.
        let initial = Ik {
            skip_epsilon: 0.0,
            ..*ik
        };
        solve_chain(&mut leg.chain, anchor, foot, pole, &initial);
        Ok(leg)
    }

    /// True while the foot holds at its last committed target.
    ///
    /// The end-of-step snap assigns the target exactly, so the comparison
    /// is reliable.
    pub fn planted(&self) -> bool {
        self.foot_position == self.target_position
    }

    /// Per-frame update: step triggering, step animation, then the IK
    /// solve, in that order.
    ///
    /// `anchor`, `rest` and `pole` are this frame's hip, rest and pole
    /// positions as derived from the body.
    pub fn update(
        &mut self,
        dt: f32,
        anchor: Vec3,
        rest: Vec3,
        pole: Vec3,
        gait: &Gait,
        ik: &Ik,
    ) -> IkResult {
        self.pole_position = pole;
        let rest_delta = rest - self.rest_position;
        self.rest_position = rest;

        if self.planted()
            && (self.foot_position - rest).length_squared() > gait.trigger_distance_sq
        {
            self.previous_position = self.foot_position;
            self.target_position = rest + rest_delta.normalize_or_zero() * gait.stride_lead;
            self.step_timer = 0.0;
        }

        if !self.planted() {
            self.step_timer += dt;
            let t = self.step_timer / gait.step_time;
            if t < 1.0 {
                let swing = self.previous_position.lerp(self.target_position, t);
                let lift = (t * std::f32::consts::PI).sin() * gait.step_height;
                self.foot_position =
                    Vec3::new(swing.x, self.previous_position.y + lift, swing.z);
            } else {
                self.foot_position = self.target_position;
            }
        }

        solve_chain(&mut self.chain, anchor, self.foot_position, pole, ik)
    }
}

/// Directional movement intent for one frame, as supplied by whatever
/// reads the input device.
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MoveIntent {
    /// Move along +z.
    pub forward: bool,
    /// Move along -z.
    pub back: bool,
    /// Move along -x.
    pub left: bool,
    /// Move along +x.
    pub right: bool,
    /// Move along +y.
    pub up: bool,
    /// Move along -y.
    pub down: bool,
}

impl MoveIntent {
    /// Sum of the active axes. Axes accumulate independently; diagonals
    /// are not renormalized.
    pub fn direction(self) -> Vec3 {
        let mut dir = Vec3::ZERO;
        if self.forward {
            dir.z += 1.0;
        }
        if self.back {
            dir.z -= 1.0;
        }
        if self.left {
            dir.x -= 1.0;
        }
        if self.right {
            dir.x += 1.0;
        }
        if self.up {
            dir.y += 1.0;
        }
        if self.down {
            dir.y -= 1.0;
        }
        dir
    }
}

/// Number of legs in the built-in layout.
pub const LEG_COUNT: usize = 8;

/// Joints per leg chain.
const LEG_JOINTS: usize = 4;

/// Bone length of the built-in legs.
const LEG_BONE: f32 = 1.0;

/// An eight-legged walker: one body position driving every leg's gait and
/// IK each frame.
#[derive(Debug, Clone)]
pub struct Body {
    /// Root position of the whole structure.
    pub position: Vec3,
    /// Per-leg chains and stepping state, in layout order.
    pub legs: Vec<Leg>,
    /// Stepping configuration shared by all legs.
    pub gait: Gait,
    /// Solver configuration shared by all legs.
    pub ik: Ik,
    /// Movement speed in units per second.
    pub speed: f32,
}

impl Body {
    /// Creates a body at `position` with the built-in eight-leg layout,
    /// every foot planted at its rest position.
    pub fn new(position: Vec3) -> Self {
        let gait = Gait::default();
        let ik = Ik::default();
        let legs = (0..LEG_COUNT)
            .map(|i| {
                let (anchor, rest, pole) = leg_frame(position, i);
                Leg::new(anchor, rest, pole, LEG_JOINTS, LEG_BONE, &ik).unwrap()
            })
            .collect();
        Self {
            position,
            legs,
            gait,
            ik,
            speed: 4.0,
        }
    }

    /// Advances the body and every leg by one frame.
    ///
    /// The position update completes before any leg reads it, so all legs
    /// observe the same snapshot.
    pub fn update(&mut self, dt: f32, intent: MoveIntent) {
        self.position += intent.direction() * self.speed * dt;
        let position = self.position;
        for (i, leg) in self.legs.iter_mut().enumerate() {
            let (anchor, rest, pole) = leg_frame(position, i);
            leg.update(dt, anchor, rest, pole, &self.gait, &self.ik);
        }
    }

    /// Current foot positions, in leg order.
    pub fn foot_positions(&self) -> Vec<Vec3> {
        self.legs.iter().map(|l| l.foot_position).collect()
    }

    /// Which legs are currently planted.
    pub fn planted_legs(&self) -> Vec<bool> {
        self.legs.iter().map(|l| l.planted()).collect()
    }

    /// Geometry for an external renderer: joints, foot, rest and pole per
    /// leg. The core has no opinion on how or whether these are drawn.
    pub fn leg_views(&self) -> Vec<LegView> {
        self.legs
            .iter()
            .map(|l| LegView {
                joints: l.chain.joints().to_vec(),
                foot: l.foot_position,
                rest: l.rest_position,
                pole: l.pole_position,
            })
            .collect()
    }
}

/// Anchor, rest and pole positions for leg `i` of the built-in layout.
///
/// Legs sit in a 2x4 grid around the body: hips one half unit out, rest
/// positions spread three times as wide and one unit down, poles above and
/// between the two.
fn leg_frame(position: Vec3, i: usize) -> (Vec3, Vec3, Vec3) {
    let x = (i / 4) as f32 - 0.5;
    let z = (i % 4) as f32 / 3.0 - 0.5;
    let anchor = position + Vec3::new(x, 0.0, z);
    let rest = position + Vec3::new(x * 3.0, -1.0, z * 3.0);
    let pole = position + Vec3::new(x * 2.0, 1.0, z * 2.0);
    (anchor, rest, pole)
}

/// Per-leg geometry snapshot for visualization.
#[derive(Debug, Clone)]
pub struct LegView {
    /// Joint positions, hip end first.
    pub joints: Vec<Vec3>,
    /// Animated foot position.
    pub foot: Vec3,
    /// Rest position the foot returns to.
    pub rest: Vec3,
    /// Pole point the bend leans toward.
    pub pole: Vec3,
}
