/// Game configuration constants and tunable parameters.
///
/// Timing constants are fixed by the rules and exposed as associated consts.
/// The remaining fields can be tuned per match (usually from a TOML file).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// CT removed from every character hit by a stunning attack.
    pub stun_ct_penalty: i32,
    /// Starting CT of a freshly planted delayed blast. Negative values delay detonation.
    pub delayed_damage_start_ct: i32,
    /// Sight radius used for targeting; zero means the whole map.
    pub visibility_radius: u32,
    /// Whether enemies try to heal themselves before anything else.
    pub enemy_self_heal: bool,
    /// Health percentage below which an enemy considers healing.
    pub self_heal_threshold_percent: u32,
    /// Upper bound on dispatches per scheduler run before giving up.
    pub max_scheduler_steps: u32,
}

impl GameConfig {
    // ===== charge time =====
    pub const CT_NEEDED_FOR_ACTION: i32 = 100;
    pub const CT_PER_TICK: i32 = 10;
    pub const CT_PER_MOVEMENT: i32 = 100;
    pub const CT_PER_BASIC_ACTION: i32 = 100;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_STUN_CT_PENALTY: i32 = 200;
    pub const DEFAULT_DELAYED_DAMAGE_START_CT: i32 = -100;
    pub const DEFAULT_VISIBILITY_RADIUS: u32 = 0;
    pub const DEFAULT_SELF_HEAL_THRESHOLD_PERCENT: u32 = 50;
    pub const DEFAULT_MAX_SCHEDULER_STEPS: u32 = 10_000;

    pub fn new() -> Self {
        Self {
            stun_ct_penalty: Self::DEFAULT_STUN_CT_PENALTY,
            delayed_damage_start_ct: Self::DEFAULT_DELAYED_DAMAGE_START_CT,
            visibility_radius: Self::DEFAULT_VISIBILITY_RADIUS,
            enemy_self_heal: false,
            self_heal_threshold_percent: Self::DEFAULT_SELF_HEAL_THRESHOLD_PERCENT,
            max_scheduler_steps: Self::DEFAULT_MAX_SCHEDULER_STEPS,
        }
    }

    #[must_use]
    pub fn with_enemy_self_heal(mut self, enabled: bool) -> Self {
        self.enemy_self_heal = enabled;
        self
    }

    #[must_use]
    pub fn with_visibility_radius(mut self, radius: u32) -> Self {
        self.visibility_radius = radius;
        self
    }

    #[must_use]
    pub fn with_max_scheduler_steps(mut self, steps: u32) -> Self {
        self.max_scheduler_steps = steps;
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
