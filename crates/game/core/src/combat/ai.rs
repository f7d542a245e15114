//! Distance-driven fighter AI.
//!
//! The AI never touches a [`Combatant`] directly. It synthesizes a
//! [`SideInput`] that then goes through the same rules as a human input.

use crate::env::{AiProfile, RngState, SpecialPolicy};
use crate::input::{InputButtons, SideInput};
use crate::state::{Combatant, Tick};

/// Chase, stop, swing.
#[derive(Clone, Copy, Debug)]
pub struct OpponentAi<'a> {
    profile: &'a AiProfile,
}

impl<'a> OpponentAi<'a> {
    pub fn new(profile: &'a AiProfile) -> Self {
        Self { profile }
    }

    /// Chooses this frame's input for `me` against `foe`.
    ///
    /// The policy is consulted only when an attack can actually start, so the
    /// random stream advances once per swing rather than once per frame.
    pub fn decide(
        &self,
        me: &Combatant,
        foe: &Combatant,
        now: Tick,
        policy: &dyn SpecialPolicy,
        rng: &mut RngState,
    ) -> SideInput {
        if me.is_defeated() || foe.is_defeated() {
            return SideInput::IDLE;
        }

        let distance = me.distance_to(foe);
        if distance < self.profile.attack_range {
            if !me.attack_ready_at.has_elapsed(now) || me.blocking {
                return SideInput::IDLE;
            }
            let button = if policy.should_use_special(self.profile, distance, rng) {
                InputButtons::SPECIAL
            } else {
                InputButtons::ATTACK
            };
            return SideInput::pressing(button);
        }

        if distance < self.profile.sight_range {
            let axis = if foe.position < me.position { -1 } else { 1 };
            return SideInput::moving(axis);
        }

        SideInput::IDLE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FighterProfile;
    use crate::env::NeverSpecial;
    use crate::state::{Facing, Side};

    fn at(side: Side, position: i32) -> Combatant {
        Combatant::new(side, &FighterProfile::default_player(), position, Facing::Right)
    }

    #[test]
    fn walks_towards_player_in_sight() {
        let profile = AiProfile::default();
        let ai = OpponentAi::new(&profile);
        let mut rng = RngState::new(1);

        let input = ai.decide(
            &at(Side::Opponent, 700),
            &at(Side::Player, 300),
            Tick(0),
            &NeverSpecial,
            &mut rng,
        );
        assert_eq!(input, SideInput::moving(-1));
    }

    #[test]
    fn attacks_in_range_when_ready() {
        let profile = AiProfile::default();
        let ai = OpponentAi::new(&profile);
        let mut rng = RngState::new(1);
        let me = at(Side::Opponent, 350);
        let foe = at(Side::Player, 300);

        let input = ai.decide(&me, &foe, Tick(0), &NeverSpecial, &mut rng);
        assert!(input.attack_pressed());
        assert_eq!(input.movement_axis, 0);

        let always = |_: &AiProfile, _: u32, _: &mut RngState| true;
        let input = ai.decide(&me, &foe, Tick(0), &always, &mut rng);
        assert!(input.special_pressed());
    }

    #[test]
    fn waits_out_cooldown_in_range() {
        let profile = AiProfile::default();
        let ai = OpponentAi::new(&profile);
        let mut rng = RngState::new(1);
        let mut me = at(Side::Opponent, 350);
        me.attack_ready_at = Tick(500);

        let input = ai.decide(&me, &at(Side::Player, 300), Tick(100), &NeverSpecial, &mut rng);
        assert_eq!(input, SideInput::IDLE);
    }

    #[test]
    fn idles_out_of_sight() {
        let profile = AiProfile {
            sight_range: 200,
            ..AiProfile::default()
        };
        let ai = OpponentAi::new(&profile);
        let mut rng = RngState::new(1);

        let input = ai.decide(
            &at(Side::Opponent, 900),
            &at(Side::Player, 100),
            Tick(0),
            &NeverSpecial,
            &mut rng,
        );
        assert_eq!(input, SideInput::IDLE);
    }
}
