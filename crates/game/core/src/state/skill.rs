//! Skill definitions: effect payload, targeting shape and resource state.

use bitflags::bitflags;

use super::EntityId;

bitflags! {
    /// Optional riders on a direct damage effect.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct DamageFlags: u8 {
        /// Knocks every hit character's CT down by the configured stun penalty.
        const STUN      = 1 << 0;
        /// Pushes every hit character one tile further along the line of fire.
        const KNOCKBACK = 1 << 1;
        /// Moves the invoker next to the target before the hit resolves.
        const CHARGE    = 1 << 2;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageInfo {
    pub power: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub flags: DamageFlags,
}

impl DamageInfo {
    pub const fn new(power: i32) -> Self {
        Self {
            power,
            flags: DamageFlags::empty(),
        }
    }

    #[must_use]
    pub const fn with_flags(mut self, flags: DamageFlags) -> Self {
        self.flags = flags;
        self
    }

    pub const fn stuns(&self) -> bool {
        self.flags.contains(DamageFlags::STUN)
    }
}

/// What a skill does, paired with the payload that effect needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillEffect {
    #[default]
    None,
    Damage(DamageInfo),
    /// Plants a blast that detonates after a delay.
    DelayedDamage { power: i32 },
    /// Relocates the invoker to the target point.
    Movement,
    /// Relocates the invoker then strikes the closest opposing character within `range`.
    MoveAndDamageClosest { power: i32, range: u32 },
    Heal { power: i32 },
}

impl SkillEffect {
    /// Effect strength used to rank skills; zero for effects without power.
    pub const fn power(&self) -> i32 {
        match self {
            SkillEffect::None | SkillEffect::Movement => 0,
            SkillEffect::Damage(info) => info.power,
            SkillEffect::DelayedDamage { power }
            | SkillEffect::MoveAndDamageClosest { power, .. }
            | SkillEffect::Heal { power } => *power,
        }
    }

    pub const fn kind(&self) -> EffectKind {
        match self {
            SkillEffect::None => EffectKind::None,
            SkillEffect::Damage(_) => EffectKind::Damage,
            SkillEffect::DelayedDamage { .. } => EffectKind::DelayedDamage,
            SkillEffect::Movement => EffectKind::Movement,
            SkillEffect::MoveAndDamageClosest { .. } => EffectKind::MoveAndDamageClosest,
            SkillEffect::Heal { .. } => EffectKind::Heal,
        }
    }

    /// True for effects whose destination tile must be free.
    pub const fn relocates_invoker(&self) -> bool {
        matches!(
            self,
            SkillEffect::Movement | SkillEffect::MoveAndDamageClosest { .. }
        )
    }
}

/// Payload-free discriminant of [`SkillEffect`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EffectKind {
    None,
    Damage,
    DelayedDamage,
    Movement,
    MoveAndDamageClosest,
    Heal,
}

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargettingStyle {
    #[default]
    None,
    Point,
    Line,
    Cone,
}

/// Targeting shape of a skill.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetInfo {
    pub style: TargettingStyle,
    /// Maximum reach in tiles.
    pub range: u32,
    /// Burst radius around the target; zero for single-target skills.
    #[cfg_attr(feature = "serde", serde(default))]
    pub area: u32,
}

impl TargetInfo {
    pub const NONE: Self = Self {
        style: TargettingStyle::None,
        range: 0,
        area: 0,
    };

    pub const fn point(range: u32, area: u32) -> Self {
        Self {
            style: TargettingStyle::Point,
            range,
            area,
        }
    }

    pub const fn line(range: u32) -> Self {
        Self {
            style: TargettingStyle::Line,
            range,
            area: 0,
        }
    }

    pub const fn cone(range: u32) -> Self {
        Self {
            style: TargettingStyle::Cone,
            range,
            area: 0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ammo {
    pub current: u32,
    pub max: u32,
}

/// Ammo and cooldown bookkeeping for a single skill.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SkillResources {
    /// `None` for skills without ammo.
    pub ammo: Option<Ammo>,
    /// Cooldown ticks still to run.
    pub cooldown: u32,
    /// Cooldown set after each use; zero disables cooldowns.
    pub max_cooldown: u32,
    /// Each completed cooldown returns one round of ammo instead of gating use.
    pub recharged_ammo_on_cooldown: bool,
}

impl SkillResources {
    pub const UNLIMITED: Self = Self {
        ammo: None,
        cooldown: 0,
        max_cooldown: 0,
        recharged_ammo_on_cooldown: false,
    };

    pub const fn with_ammo(current: u32, max: u32) -> Self {
        Self {
            ammo: Some(Ammo { current, max }),
            ..Self::UNLIMITED
        }
    }

    pub const fn with_cooldown(max_cooldown: u32) -> Self {
        Self {
            max_cooldown,
            ..Self::UNLIMITED
        }
    }

    /// Ammo that refills one round per completed cooldown.
    pub const fn recharging(current: u32, max: u32, max_cooldown: u32) -> Self {
        Self {
            ammo: Some(Ammo { current, max }),
            cooldown: 0,
            max_cooldown,
            recharged_ammo_on_cooldown: true,
        }
    }

    #[must_use]
    pub const fn with_current_cooldown(mut self, cooldown: u32) -> Self {
        self.cooldown = cooldown;
        self
    }

    fn has_ammo(&self) -> bool {
        self.ammo.is_none_or(|ammo| ammo.current > 0)
    }

    /// Ready when ammo remains and no cooldown is running.
    ///
    /// Recharging skills ignore the cooldown: it only paces the refill.
    pub fn ready_for_use(&self) -> bool {
        if self.recharged_ammo_on_cooldown {
            self.has_ammo()
        } else {
            self.has_ammo() && self.cooldown == 0
        }
    }

    pub fn uses_cooldown(&self) -> bool {
        self.max_cooldown > 0
    }

    pub fn ammo_below_max(&self) -> bool {
        self.ammo.is_some_and(|ammo| ammo.current < ammo.max)
    }

    #[must_use]
    pub fn with_ammo_added(mut self, amount: u32) -> Self {
        if let Some(ammo) = self.ammo.as_mut() {
            ammo.current = (ammo.current + amount).min(ammo.max);
        }
        self
    }
}

/// Named ability owned by exactly one character.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Skill {
    pub id: EntityId,
    pub name: String,
    pub effect: SkillEffect,
    pub target_info: TargetInfo,
    #[cfg_attr(feature = "serde", serde(default))]
    pub resources: SkillResources,
}

impl Skill {
    pub fn new(id: EntityId, name: impl Into<String>, effect: SkillEffect, target_info: TargetInfo) -> Self {
        Self {
            id,
            name: name.into(),
            effect,
            target_info,
            resources: SkillResources::UNLIMITED,
        }
    }

    #[must_use]
    pub fn with_resources(mut self, resources: SkillResources) -> Self {
        self.resources = resources;
        self
    }

    #[must_use]
    pub fn with_id(mut self, id: EntityId) -> Self {
        self.id = id;
        self
    }

    pub fn ready_for_use(&self) -> bool {
        self.resources.ready_for_use()
    }

    pub fn power(&self) -> i32 {
        self.effect.power()
    }

    /// Reach used to classify an actor as melee or ranged.
    pub fn attack_range(&self) -> u32 {
        match self.effect {
            SkillEffect::MoveAndDamageClosest { range, .. } => range,
            _ => self.target_info.range,
        }
    }
}
