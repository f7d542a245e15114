//! Decoded controller input consumed by the match.
//!
//! Device polling happens outside the core; hosts hand over one
//! [`InputSnapshot`] per frame. AI-driven sides ignore their half.

use bitflags::bitflags;

bitflags! {
    /// Buttons held or pressed by one side during a frame.
    ///
    /// `ATTACK`, `SPECIAL` and `DASH` are edge-triggered (pressed this frame);
    /// `BLOCK` is level-triggered (held).
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct InputButtons: u8 {
        const ATTACK  = 1 << 0;
        const SPECIAL = 1 << 1;
        const BLOCK   = 1 << 2;
        const DASH    = 1 << 3;
    }
}

/// Input for one fighter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SideInput {
    /// -1 (left), 0 (still) or +1 (right). Other values are clamped.
    pub movement_axis: i8,
    pub buttons: InputButtons,
}

impl SideInput {
    pub const IDLE: Self = Self {
        movement_axis: 0,
        buttons: InputButtons::empty(),
    };

    pub fn new(movement_axis: i8, buttons: InputButtons) -> Self {
        Self {
            movement_axis: movement_axis.clamp(-1, 1),
            buttons,
        }
    }

    pub fn moving(axis: i8) -> Self {
        Self::new(axis, InputButtons::empty())
    }

    pub fn pressing(buttons: InputButtons) -> Self {
        Self::new(0, buttons)
    }

    #[inline]
    pub fn attack_pressed(&self) -> bool {
        self.buttons.contains(InputButtons::ATTACK)
    }

    #[inline]
    pub fn special_pressed(&self) -> bool {
        self.buttons.contains(InputButtons::SPECIAL)
    }

    #[inline]
    pub fn block_held(&self) -> bool {
        self.buttons.contains(InputButtons::BLOCK)
    }

    #[inline]
    pub fn dash_pressed(&self) -> bool {
        self.buttons.contains(InputButtons::DASH)
    }

    /// Axis normalized to {-1, 0, 1}.
    #[inline]
    pub fn axis(&self) -> i32 {
        i32::from(self.movement_axis.signum())
    }
}

/// One frame of decoded input for both sides.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InputSnapshot {
    pub player: SideInput,
    /// Used only when the opponent is human-controlled.
    pub opponent: SideInput,
}

impl InputSnapshot {
    pub fn player(player: SideInput) -> Self {
        Self {
            player,
            opponent: SideInput::IDLE,
        }
    }
}
