//! Agent movement-control state.
//!
//! The control state (movement keys held down) is the single shared mutable
//! resource of the execution layer: only one writer — the executor's per-tick
//! logic or the active block interaction — may change it per tick.  The
//! executor enforces that rule; this module just provides the value type.

use std::fmt;

/// One movement-control key.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Control {
    Forward,
    Back,
    Left,
    Right,
    Jump,
    Sprint,
    Sneak,
}

/// The full set of held movement keys.
///
/// Plain bools rather than a bitset: there are seven keys, and field access
/// reads better in physics code (`controls.jump`) than mask arithmetic.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ControlState {
    pub forward: bool,
    pub back:    bool,
    pub left:    bool,
    pub right:   bool,
    pub jump:    bool,
    pub sprint:  bool,
    pub sneak:   bool,
}

impl ControlState {
    /// All keys released.
    pub const NONE: ControlState = ControlState {
        forward: false,
        back:    false,
        left:    false,
        right:   false,
        jump:    false,
        sprint:  false,
        sneak:   false,
    };

    #[inline]
    pub fn set(&mut self, control: Control, held: bool) {
        match control {
            Control::Forward => self.forward = held,
            Control::Back => self.back = held,
            Control::Left => self.left = held,
            Control::Right => self.right = held,
            Control::Jump => self.jump = held,
            Control::Sprint => self.sprint = held,
            Control::Sneak => self.sneak = held,
        }
    }

    #[inline]
    pub fn get(&self, control: Control) -> bool {
        match control {
            Control::Forward => self.forward,
            Control::Back => self.back,
            Control::Left => self.left,
            Control::Right => self.right,
            Control::Jump => self.jump,
            Control::Sprint => self.sprint,
            Control::Sneak => self.sneak,
        }
    }

    /// Release every key.
    #[inline]
    pub fn clear(&mut self) {
        *self = Self::NONE;
    }

    /// `true` if no key is held.
    #[inline]
    pub fn is_clear(&self) -> bool {
        *self == Self::NONE
    }
}

impl fmt::Display for ControlState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut held = vec![];
        if self.forward { held.push("forward") }
        if self.back { held.push("back") }
        if self.left { held.push("left") }
        if self.right { held.push("right") }
        if self.jump { held.push("jump") }
        if self.sprint { held.push("sprint") }
        if self.sneak { held.push("sneak") }
        if held.is_empty() {
            write!(f, "(none)")
        } else {
            write!(f, "{}", held.join("+"))
        }
    }
}
