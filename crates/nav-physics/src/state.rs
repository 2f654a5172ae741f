//! Agent state snapshot.

use nav_core::{ControlState, Vec3};

use crate::aabb::Aabb;

/// Agent collision box width (x and z extent).
pub const AGENT_WIDTH: f64 = 0.6;
/// Standing collision box height.
pub const AGENT_HEIGHT: f64 = 1.8;
/// Collision box height while sneaking.
pub const AGENT_SNEAK_HEIGHT: f64 = 1.5;
/// Eye height above the feet while standing.
pub const EYE_HEIGHT: f64 = 1.62;
/// Eye height while sneaking.
pub const SNEAK_EYE_HEIGHT: f64 = 1.27;

/// A snapshot of the agent's physical state.
///
/// The execution layer copies this from the live agent at the start of every
/// prediction and at every tick boundary; physics stepping mutates the copy
/// only.  Look angles use radians: `yaw = 0` faces +z, increasing yaw turns
/// toward −x; `pitch > 0` looks up.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentState {
    /// Feet position (bottom-center of the collision box).
    pub pos: Vec3,
    /// Velocity in blocks per tick.
    pub vel: Vec3,
    pub yaw: f64,
    pub pitch: f64,
    /// Standing on a support surface as of the last step.
    pub on_ground: bool,
    /// Collision box overlaps a liquid cell.
    pub in_liquid: bool,
    /// Last step clamped horizontal motion against a block.
    pub collided_horizontally: bool,
    /// Last step clamped vertical motion against a block.
    pub collided_vertically: bool,
    /// Movement keys currently held.
    pub control: ControlState,
}

impl AgentState {
    /// A grounded, motionless agent standing at `pos`.
    pub fn standing_at(pos: Vec3) -> Self {
        Self {
            pos,
            vel: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            on_ground: true,
            in_liquid: false,
            collided_horizontally: false,
            collided_vertically: false,
            control: ControlState::NONE,
        }
    }

    /// Current collision box height (sneaking shrinks it).
    #[inline]
    pub fn height(&self) -> f64 {
        if self.control.sneak { AGENT_SNEAK_HEIGHT } else { AGENT_HEIGHT }
    }

    /// Eye position — ray origins for visibility checks.
    #[inline]
    pub fn eye_pos(&self) -> Vec3 {
        let eye = if self.control.sneak { SNEAK_EYE_HEIGHT } else { EYE_HEIGHT };
        self.pos.offset(0.0, eye, 0.0)
    }

    /// Current collision box.
    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::agent(self.pos, AGENT_WIDTH, self.height())
    }

    /// Unit view vector for the current yaw/pitch.
    pub fn look_dir(&self) -> Vec3 {
        let (cp, sp) = (self.pitch.cos(), self.pitch.sin());
        Vec3::new(-self.yaw.sin() * cp, sp, self.yaw.cos() * cp)
    }

    /// Point the look angles at `target`.
    pub fn look_at(&mut self, target: Vec3) {
        let d = target - self.eye_pos();
        let horiz = (d.x * d.x + d.z * d.z).sqrt();
        self.yaw = f64::atan2(-d.x, d.z);
        self.pitch = f64::atan2(d.y, horiz);
    }

    /// Point the look angles at `target` horizontally only, keeping the gaze
    /// level — the path-following look used while walking.
    pub fn look_at_horizontal(&mut self, target: Vec3) {
        let eye = self.eye_pos();
        self.look_at(Vec3::new(target.x, eye.y, target.z));
    }
}
