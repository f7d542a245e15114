//! Seeded randomness for opponent decisions.
//!
//! The only chance-gated rule in a match is whether the opponent reaches for
//! its special attack. That decision is injected as a [`SpecialPolicy`] fed by
//! an explicit [`RngState`], so a fixed seed reproduces a match exactly.

use super::roster::AiProfile;

/// PCG-XSH-RR stream (64-bit state, 32-bit output).
///
/// - **Deterministic**: Same seed always produces same sequence
/// - **Small state**: Only 64 bits, cheap to clone into snapshots
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RngState {
    state: u64,
}

impl RngState {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    pub const fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// `state' = (state × multiplier + increment) mod 2^64`
    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = Self::pcg_step(self.state);
        Self::pcg_output(self.state)
    }

    /// Roll a d100 (1-100 inclusive).
    pub fn roll_d100(&mut self) -> u32 {
        (self.next_u32() % 100) + 1
    }
}

/// Decides whether an in-range opponent uses its special attack.
pub trait SpecialPolicy: Send + Sync {
    fn should_use_special(&self, ai: &AiProfile, distance: u32, rng: &mut RngState) -> bool;
}

impl<F> SpecialPolicy for F
where
    F: Fn(&AiProfile, u32, &mut RngState) -> bool + Send + Sync,
{
    fn should_use_special(&self, ai: &AiProfile, distance: u32, rng: &mut RngState) -> bool {
        self(ai, distance, rng)
    }
}

/// Rolls against the acting opponent's own `special_chance_percent`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProfileChance;

impl SpecialPolicy for ProfileChance {
    fn should_use_special(&self, ai: &AiProfile, _distance: u32, rng: &mut RngState) -> bool {
        rng.roll_d100() <= u32::from(ai.special_chance_percent)
    }
}

/// Fixed-percentage special trigger, whatever the roster says.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChancePolicy {
    pub percent: u8,
}

impl SpecialPolicy for ChancePolicy {
    fn should_use_special(&self, _ai: &AiProfile, _distance: u32, rng: &mut RngState) -> bool {
        // Always consume a roll so the stream does not depend on the percentage.
        rng.roll_d100() <= u32::from(self.percent)
    }
}

/// Policy that never fires a special.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NeverSpecial;

impl SpecialPolicy for NeverSpecial {
    fn should_use_special(&self, _ai: &AiProfile, _distance: u32, _rng: &mut RngState) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_stream() {
        let mut a = RngState::new(42);
        let mut b = RngState::new(42);
        for _ in 0..16 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn d100_stays_in_range() {
        let mut rng = RngState::new(7);
        for _ in 0..1000 {
            let roll = rng.roll_d100();
            assert!((1..=100).contains(&roll));
        }
    }

    #[test]
    fn chance_policy_extremes() {
        let mut rng = RngState::new(1);
        let ai = AiProfile::default();
        let always = ChancePolicy { percent: 100 };
        let never = ChancePolicy { percent: 0 };
        for _ in 0..50 {
            assert!(always.should_use_special(&ai, 10, &mut rng));
            assert!(!never.should_use_special(&ai, 10, &mut rng));
        }
    }

    #[test]
    fn profile_chance_reads_the_opponent() {
        let mut rng = RngState::new(9);
        let reckless = AiProfile {
            special_chance_percent: 100,
            ..AiProfile::default()
        };
        let cautious = AiProfile {
            special_chance_percent: 0,
            ..AiProfile::default()
        };
        for _ in 0..50 {
            assert!(ProfileChance.should_use_special(&reckless, 10, &mut rng));
            assert!(!ProfileChance.should_use_special(&cautious, 10, &mut rng));
        }
    }

    #[test]
    fn closures_are_policies() {
        let close_only = |_: &AiProfile, distance: u32, _: &mut RngState| distance < 50;
        let ai = AiProfile::default();
        let mut rng = RngState::new(0);
        assert!(close_only.should_use_special(&ai, 10, &mut rng));
        assert!(!close_only.should_use_special(&ai, 60, &mut rng));
    }
}
