//! Movement, blocking and dashing.

use crate::config::{ArenaConfig, FighterProfile};
use crate::input::SideInput;
use crate::state::{Combatant, Tick};

/// Raises or drops the guard according to `held`.
///
/// Dropping the guard starts the block recovery.
pub fn update_block(fighter: &mut Combatant, profile: &FighterProfile, held: bool, now: Tick) {
    if held && !fighter.blocking && !fighter.is_defeated() && fighter.block_ready_at.has_elapsed(now)
    {
        fighter.blocking = true;
    } else if !held && fighter.blocking {
        fighter.blocking = false;
        fighter.block_ready_at = now + profile.block_cooldown_ms;
    }
}

/// Dashes in the facing direction when the dash is off cooldown.
///
/// Returns true if the dash happened.
pub fn try_dash(
    fighter: &mut Combatant,
    profile: &FighterProfile,
    arena: &ArenaConfig,
    now: Tick,
) -> bool {
    if fighter.blocking || fighter.is_defeated() || !fighter.dash_ready_at.has_elapsed(now) {
        return false;
    }

    let dash = &profile.dash;
    let shift = i32::try_from(dash.distance)
        .unwrap_or(i32::MAX)
        .saturating_mul(fighter.facing.sign());
    fighter.position = arena.clamp(fighter.position.saturating_add(shift));
    fighter.invulnerable = true;
    fighter.invulnerable_until = now + dash.invulnerable_ms;
    fighter.dash_ready_at = now + dash.cooldown_ms;
    true
}

/// Walks along `axis` for `delta_ms` at the profile's speed.
///
/// Progress below one unit is kept on the fighter, so many short frames cover
/// the same ground as one long frame. Stopping, turning or hitting a wall
/// discards it.
pub fn walk(
    fighter: &mut Combatant,
    profile: &FighterProfile,
    arena: &ArenaConfig,
    axis: i32,
    delta_ms: u64,
) {
    if axis == 0 || fighter.blocking || fighter.is_defeated() {
        fighter.stride_carry = 0;
        return;
    }
    if fighter.stride_carry.signum() == -axis.signum() {
        fighter.stride_carry = 0;
    }

    let millis = i64::from(profile.speed)
        .saturating_mul(i64::try_from(delta_ms).unwrap_or(i64::MAX))
        .saturating_mul(i64::from(axis.signum()))
        .saturating_add(i64::from(fighter.stride_carry));
    let step = i32::try_from(millis / 1000).unwrap_or(if axis < 0 { i32::MIN } else { i32::MAX });
    // |millis % 1000| < 1000, so the remainder always fits.
    let carry = (millis % 1000) as i32;

    let target = fighter.position.saturating_add(step);
    fighter.position = arena.clamp(target);
    fighter.stride_carry = if fighter.position == target { carry } else { 0 };
}

/// Applies the level-triggered part of an input (guard and dash) at `now`.
///
/// Attacks are resolved separately through the combat resolver.
pub fn apply_stance(
    fighter: &mut Combatant,
    profile: &FighterProfile,
    arena: &ArenaConfig,
    input: &SideInput,
    now: Tick,
) -> bool {
    update_block(fighter, profile, input.block_held(), now);
    input.dash_pressed() && try_dash(fighter, profile, arena, now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Facing, Side};

    fn fighter() -> (Combatant, FighterProfile) {
        let profile = FighterProfile::default_player();
        (
            Combatant::new(Side::Player, &profile, 300, Facing::Right),
            profile,
        )
    }

    #[test]
    fn walking_uses_speed_and_clamps() {
        let (mut c, p) = fighter();
        let arena = ArenaConfig::default();

        walk(&mut c, &p, &arena, 1, 500);
        assert_eq!(c.position, 500);

        walk(&mut c, &p, &arena, -1, 10_000);
        assert_eq!(c.position, 0);
    }

    #[test]
    fn short_frames_cover_the_same_ground() {
        let (mut stepped, p) = fighter();
        let (mut once, _) = fighter();
        let slow = FighterProfile {
            speed: 200,
            ..p.clone()
        };
        let arena = ArenaConfig::default();

        for _ in 0..250 {
            walk(&mut stepped, &slow, &arena, 1, 4);
        }
        walk(&mut once, &slow, &arena, 1, 1000);

        assert_eq!(stepped.position, 500);
        assert_eq!(stepped.position, once.position);
        assert_eq!(stepped.stride_carry, 0);
    }

    #[test]
    fn stopping_drops_partial_progress() {
        let (mut c, p) = fighter();
        let arena = ArenaConfig::default();

        walk(&mut c, &p, &arena, 1, 1);
        assert_eq!(c.position, 300);
        assert_eq!(c.stride_carry, 400);

        walk(&mut c, &p, &arena, 0, 16);
        assert_eq!(c.stride_carry, 0);

        walk(&mut c, &p, &arena, -1, 1);
        assert_eq!(c.stride_carry, -400);
        walk(&mut c, &p, &arena, -1, 2);
        assert_eq!(c.position, 299);
        assert_eq!(c.stride_carry, -200);
    }

    #[test]
    fn releasing_block_starts_recovery() {
        let (mut c, p) = fighter();

        update_block(&mut c, &p, true, Tick(0));
        assert!(c.blocking);

        update_block(&mut c, &p, false, Tick(100));
        assert!(!c.blocking);
        assert_eq!(c.block_ready_at, Tick(600));

        update_block(&mut c, &p, true, Tick(599));
        assert!(!c.blocking);
        update_block(&mut c, &p, true, Tick(600));
        assert!(c.blocking);
    }

    #[test]
    fn blocking_fighter_does_not_walk() {
        let (mut c, p) = fighter();
        let arena = ArenaConfig::default();
        c.blocking = true;

        walk(&mut c, &p, &arena, 1, 1000);
        assert_eq!(c.position, 300);
    }

    #[test]
    fn dash_grants_invulnerability_and_cooldown() {
        let (mut c, p) = fighter();
        let arena = ArenaConfig::default();

        assert!(try_dash(&mut c, &p, &arena, Tick(50)));
        assert_eq!(c.position, 600);
        assert!(c.invulnerable);
        assert_eq!(c.invulnerable_until, Tick(1050));

        assert!(!try_dash(&mut c, &p, &arena, Tick(500)));
        assert_eq!(c.position, 600);

        c.expire_timers(Tick(1050));
        assert!(!c.invulnerable);
    }
}
