//! Per-object state machine.

use crate::action::EffectPayload;
use crate::state::StateId;
use crate::stats::PartialStats;

/// One declared state of an object and what being in it means.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StateDef {
    pub id: StateId,
    /// Verbs that move the object into this state.
    #[cfg_attr(feature = "serde", serde(default))]
    pub action_names: Vec<String>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub description: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: EffectPayload,
}

impl StateDef {
    pub fn new<I, S>(id: impl Into<StateId>, action_names: I, effects: EffectPayload) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            action_names: action_names.into_iter().map(Into::into).collect(),
            description: None,
            effects,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn matches_verb(&self, verb: &str) -> bool {
        let verb_words = words(verb);
        if verb_words.is_empty() {
            return false;
        }

        self.action_names.iter().any(|name| {
            let name_words = words(name);
            !name_words.is_empty()
                && verb_words
                    .windows(name_words.len())
                    .any(|window| window == name_words.as_slice())
        })
    }
}

fn words(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}

/// Computes the payload that moves an object from `previous` into `next`.
///
/// Numeric stats and list fields follow different rules:
///
/// - `stats`: `next.stats - previous.stats` per stat. Nets of zero are
///   dropped; a stat absent from both stays absent.
/// - list fields: `remove_* = (previous.add_* ∪ next.remove_*) \ next.add_*`
///   and `add_* = next.add_*`.
///
/// Without a previous state only `next`'s stats and additions are emitted.
/// The target of `next` carries over; transfer and object-state fields never
/// do.
pub fn transition_payload(previous: Option<&StateDef>, next: &StateDef) -> EffectPayload {
    let entering = &next.effects;

    let Some(previous) = previous else {
        return EffectPayload {
            target: entering.target.clone(),
            stats: entering.stats,
            add_traits: entering.add_traits.clone(),
            add_flags: entering.add_flags.clone(),
            add_effects: entering.add_effects.clone(),
            ..EffectPayload::default()
        };
    };
    let leaving = &previous.effects;

    let mut stats = PartialStats::new();
    if let Some(old) = &leaving.stats {
        stats.accumulate(&old.negated());
    }
    if let Some(new) = &entering.stats {
        stats.accumulate(new);
    }
    let stats = stats.without_zeros();

    EffectPayload {
        target: entering.target.clone(),
        stats: (!stats.is_empty()).then_some(stats),
        add_traits: entering.add_traits.clone(),
        remove_traits: net_removals(
            &leaving.add_traits,
            &entering.remove_traits,
            &entering.add_traits,
        ),
        add_flags: entering.add_flags.clone(),
        remove_flags: net_removals(
            &leaving.add_flags,
            &entering.remove_flags,
            &entering.add_flags,
        ),
        add_effects: entering.add_effects.clone(),
        remove_effects: net_removals(
            &leaving.add_effects,
            &entering.remove_effects,
            &entering.add_effects,
        ),
        ..EffectPayload::default()
    }
}

/// `(left ∪ right) \ keep`, first-seen order, no duplicates.
fn net_removals<T: Clone + PartialEq>(left: &[T], right: &[T], keep: &[T]) -> Vec<T> {
    let mut removals: Vec<T> = Vec::new();
    for value in left.iter().chain(right) {
        if !keep.contains(value) && !removals.contains(value) {
            removals.push(value.clone());
        }
    }
    removals
}
