use std::fmt;

/// Unique identifier for characters, skills and scripts.
///
/// Identifiers come from a single [`IdAllocator`] per match and are never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Sequential identifier source (monotonically increasing).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    pub const fn new() -> Self {
        Self { next: 1 }
    }

    /// Resumes allocation after a saved match.
    pub const fn starting_at(next: u32) -> Self {
        Self { next }
    }

    pub fn allocate(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next = self.next.wrapping_add(1).max(1);
        id
    }

    /// The identifier the next call to [`allocate`](Self::allocate) returns.
    pub const fn peek(&self) -> u32 {
        self.next
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

/// Current and maximum hit points.
///
/// `current` may dip to zero or below; the combat layer removes dead enemies
/// right away and reports the player's death instead of removing them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Health {
    pub current: i32,
    pub maximum: i32,
}

impl Health {
    pub const fn new(current: i32, maximum: i32) -> Self {
        Self { current, maximum }
    }

    pub const fn full(maximum: i32) -> Self {
        Self::new(maximum, maximum)
    }

    #[must_use]
    pub const fn damaged(self, amount: i32) -> Self {
        Self::new(self.current - amount, self.maximum)
    }

    /// Adds hit points without exceeding the maximum.
    #[must_use]
    pub fn healed(self, amount: i32) -> Self {
        Self::new((self.current + amount).min(self.maximum), self.maximum)
    }

    pub const fn is_dead(self) -> bool {
        self.current <= 0
    }

    /// Whole-number percentage of maximum health remaining.
    pub fn percent(self) -> i32 {
        if self.maximum <= 0 {
            return 0;
        }
        self.current.max(0) * 100 / self.maximum
    }
}

/// Flat damage reduction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Defense {
    pub standard: i32,
}

impl Defense {
    pub const NONE: Self = Self { standard: 0 };

    pub const fn new(standard: i32) -> Self {
        Self { standard }
    }

    /// Damage left after reduction; never negative.
    pub fn reduce(self, amount: i32) -> i32 {
        (amount - self.standard).max(0)
    }
}
