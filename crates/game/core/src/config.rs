//! Static match configuration.
//!
//! Everything here is immutable once a match starts. Per-opponent variation
//! lives in [`crate::env::OpponentProfile`] records looked up by phase index.

/// Numbers that describe a single attack kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackProfile {
    pub damage: u32,
    /// Maximum horizontal distance (exclusive) at which the attack connects.
    pub range: u32,
    pub cooldown_ms: u64,
    /// Distance the target is pushed away on a clean hit.
    pub knockback: u32,
}

impl AttackProfile {
    pub const fn new(damage: u32, range: u32, cooldown_ms: u64, knockback: u32) -> Self {
        Self {
            damage,
            range,
            cooldown_ms,
            knockback,
        }
    }
}

/// Dash movement and its invulnerability window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DashProfile {
    pub distance: u32,
    pub invulnerable_ms: u64,
    pub cooldown_ms: u64,
}

impl Default for DashProfile {
    fn default() -> Self {
        Self {
            distance: 300,
            invulnerable_ms: 1000,
            cooldown_ms: 1000,
        }
    }
}

/// Combat statistics shared by the player and every opponent.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FighterProfile {
    pub name: String,
    pub max_health: u32,
    /// Walking speed in arena units per second.
    pub speed: u32,
    pub normal: AttackProfile,
    pub special: AttackProfile,
    #[cfg_attr(feature = "serde", serde(default = "FighterProfile::default_block_cooldown"))]
    pub block_cooldown_ms: u64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub dash: DashProfile,
}

impl FighterProfile {
    pub const DEFAULT_BLOCK_COOLDOWN_MS: u64 = 500;

    #[cfg(feature = "serde")]
    fn default_block_cooldown() -> u64 {
        Self::DEFAULT_BLOCK_COOLDOWN_MS
    }

    /// The player character used when no configuration file overrides it.
    pub fn default_player() -> Self {
        Self {
            name: "Breno".to_owned(),
            max_health: 100,
            speed: 400,
            normal: AttackProfile::new(10, 100, 800, 40),
            special: AttackProfile::new(35, 420, 3000, 60),
            block_cooldown_ms: Self::DEFAULT_BLOCK_COOLDOWN_MS,
            dash: DashProfile::default(),
        }
    }

    /// Profile for the given attack kind.
    pub fn attack(&self, kind: crate::combat::AttackKind) -> &AttackProfile {
        match kind {
            crate::combat::AttackKind::Normal => &self.normal,
            crate::combat::AttackKind::Special => &self.special,
        }
    }
}

/// Arena geometry. Fighters live on a single horizontal axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArenaConfig {
    pub width: i32,
    pub player_start: i32,
    pub opponent_start: i32,
}

impl ArenaConfig {
    #[inline]
    pub fn clamp(&self, x: i32) -> i32 {
        x.clamp(0, self.width)
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: 1000,
            player_start: 300,
            opponent_start: 700,
        }
    }
}

/// Match configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MatchConfig {
    /// Best-of-N rounds per phase. Must be odd so a majority always exists.
    pub rounds_per_phase: u8,
    pub total_phases: u32,
    pub arena: ArenaConfig,
    pub player: FighterProfile,
    /// When false, losing a phase ends the match instead of offering choices.
    pub continue_on_defeat: bool,
    /// Seed for the opponent decision stream.
    pub seed: u64,
}

impl MatchConfig {
    pub const DEFAULT_ROUNDS_PER_PHASE: u8 = 3;
    pub const DEFAULT_TOTAL_PHASES: u32 = 3;
    pub const DEFAULT_SEED: u64 = 0x5EED_F16B;

    pub fn new() -> Self {
        Self {
            rounds_per_phase: Self::DEFAULT_ROUNDS_PER_PHASE,
            total_phases: Self::DEFAULT_TOTAL_PHASES,
            arena: ArenaConfig::default(),
            player: FighterProfile::default_player(),
            continue_on_defeat: true,
            seed: Self::DEFAULT_SEED,
        }
    }

    /// Round wins required to take a phase.
    #[inline]
    pub fn win_threshold(&self) -> u8 {
        self.rounds_per_phase / 2 + 1
    }

    pub fn with_rounds_per_phase(mut self, rounds: u8) -> Self {
        self.rounds_per_phase = rounds;
        self
    }

    pub fn with_total_phases(mut self, phases: u32) -> Self {
        self.total_phases = phases;
        self
    }

    pub fn with_player(mut self, player: FighterProfile) -> Self {
        self.player = player;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_continue_on_defeat(mut self, enabled: bool) -> Self {
        self.continue_on_defeat = enabled;
        self
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn majority_threshold_for_odd_rounds() {
        assert_eq!(MatchConfig::new().win_threshold(), 2);
        assert_eq!(MatchConfig::new().with_rounds_per_phase(1).win_threshold(), 1);
        assert_eq!(MatchConfig::new().with_rounds_per_phase(5).win_threshold(), 3);
    }

    #[test]
    fn arena_clamps_to_bounds() {
        let arena = ArenaConfig::default();
        assert_eq!(arena.clamp(-20), 0);
        assert_eq!(arena.clamp(1200), 1000);
        assert_eq!(arena.clamp(420), 420);
    }
}
