//! Stat blocks and partial stat deltas.
//!
//! [`StatBlock`] is the full set of six named stats a character carries.
//! [`PartialStats`] is a sparse block where an absent stat means "untouched",
//! which is distinct from an explicit zero.

use strum::IntoEnumIterator;

/// The six named stats of a character.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::EnumIter,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum StatKind {
    Health,
    Willpower,
    Perception,
    Reputation,
    Strength,
    Agility,
}

/// Complete stat block.
///
/// Values are signed on purpose: poison and curses drive stats below zero and
/// nothing in the engine clamps them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatBlock {
    pub health: i32,
    pub willpower: i32,
    pub perception: i32,
    pub reputation: i32,
    pub strength: i32,
    pub agility: i32,
}

impl StatBlock {
    pub const fn new(
        health: i32,
        willpower: i32,
        perception: i32,
        reputation: i32,
        strength: i32,
        agility: i32,
    ) -> Self {
        Self {
            health,
            willpower,
            perception,
            reputation,
            strength,
            agility,
        }
    }

    pub fn get(&self, kind: StatKind) -> i32 {
        match kind {
            StatKind::Health => self.health,
            StatKind::Willpower => self.willpower,
            StatKind::Perception => self.perception,
            StatKind::Reputation => self.reputation,
            StatKind::Strength => self.strength,
            StatKind::Agility => self.agility,
        }
    }

    pub fn set(&mut self, kind: StatKind, value: i32) {
        match kind {
            StatKind::Health => self.health = value,
            StatKind::Willpower => self.willpower = value,
            StatKind::Perception => self.perception = value,
            StatKind::Reputation => self.reputation = value,
            StatKind::Strength => self.strength = value,
            StatKind::Agility => self.agility = value,
        }
    }

    /// Returns a copy with one stat replaced (builder pattern).
    #[must_use]
    pub fn with(mut self, kind: StatKind, value: i32) -> Self {
        self.set(kind, value);
        self
    }

    /// Adds every stat present in `delta`; absent stats pass through.
    #[must_use]
    pub fn apply(&self, delta: &PartialStats) -> Self {
        let mut next = *self;
        for (kind, value) in delta.iter() {
            next.set(kind, next.get(kind).saturating_add(value));
        }
        next
    }

    /// Iterates `(kind, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (StatKind, i32)> + '_ {
        StatKind::iter().map(move |kind| (kind, self.get(kind)))
    }
}

/// Sparse stat block; `None` means the stat is untouched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PartialStats {
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub health: Option<i32>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub willpower: Option<i32>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub perception: Option<i32>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub reputation: Option<i32>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub strength: Option<i32>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub agility: Option<i32>,
}

impl PartialStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, kind: StatKind) -> Option<i32> {
        match kind {
            StatKind::Health => self.health,
            StatKind::Willpower => self.willpower,
            StatKind::Perception => self.perception,
            StatKind::Reputation => self.reputation,
            StatKind::Strength => self.strength,
            StatKind::Agility => self.agility,
        }
    }

    fn slot_mut(&mut self, kind: StatKind) -> &mut Option<i32> {
        match kind {
            StatKind::Health => &mut self.health,
            StatKind::Willpower => &mut self.willpower,
            StatKind::Perception => &mut self.perception,
            StatKind::Reputation => &mut self.reputation,
            StatKind::Strength => &mut self.strength,
            StatKind::Agility => &mut self.agility,
        }
    }

    pub fn set(&mut self, kind: StatKind, value: Option<i32>) {
        *self.slot_mut(kind) = value;
    }

    /// Sets one stat (builder pattern).
    #[must_use]
    pub fn with(mut self, kind: StatKind, value: i32) -> Self {
        self.set(kind, Some(value));
        self
    }

    /// Adds `value` to a stat, materializing it when absent.
    pub fn add(&mut self, kind: StatKind, value: i32) {
        let slot = self.slot_mut(kind);
        *slot = Some(slot.unwrap_or(0).saturating_add(value));
    }

    /// Sums another partial block into this one, stat by stat.
    ///
    /// A stat absent from both operands stays absent.
    pub fn accumulate(&mut self, other: &PartialStats) {
        for (kind, value) in other.iter() {
            self.add(kind, value);
        }
    }

    /// Returns the additive inverse of every present stat.
    #[must_use]
    pub fn negated(&self) -> Self {
        let mut negated = Self::new();
        for (kind, value) in self.iter() {
            negated.set(kind, Some(value.saturating_neg()));
        }
        negated
    }

    /// Drops stats whose value is exactly zero.
    #[must_use]
    pub fn without_zeros(&self) -> Self {
        let mut pruned = Self::new();
        for (kind, value) in self.iter().filter(|(_, value)| *value != 0) {
            pruned.set(kind, Some(value));
        }
        pruned
    }

    /// Iterates the present stats in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (StatKind, i32)> + '_ {
        StatKind::iter().filter_map(move |kind| self.get(kind).map(|value| (kind, value)))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }
}

impl FromIterator<(StatKind, i32)> for PartialStats {
    fn from_iter<I: IntoIterator<Item = (StatKind, i32)>>(iter: I) -> Self {
        let mut stats = Self::new();
        for (kind, value) in iter {
            stats.add(kind, value);
        }
        stats
    }
}
