//! Authoring-time checks the engine relies on but never re-verifies.
//!
//! Containers are assumed cycle-free and slot ids unique within their
//! container. State machines are assumed to declare their default state, and
//! state payloads are assumed to reference known effects.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};

use tale_core::inventory::hands;
use tale_core::{
    EffectId, EffectManager, ErrorSeverity, GameError, GameState, ObjectDefinition, ObjectId,
    SlotId, StateId,
};

/// A single defect found in authored objects.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ContentIssue {
    #[error("container cycle: {path}")]
    ContainerCycle { object: ObjectId, path: String },

    #[error("object `{object}` declares slot `{slot}` more than once")]
    DuplicateSlot { object: ObjectId, slot: SlotId },

    #[error("object `{object}` declares state `{state}` more than once")]
    DuplicateState { object: ObjectId, state: StateId },

    #[error("object id `{object}` is used by more than one object")]
    DuplicateObject { object: ObjectId },

    #[error("object `{object}` defaults to undeclared state `{state}`")]
    UndeclaredDefaultState { object: ObjectId, state: StateId },

    #[error("state `{state}` of object `{object}` references unknown effect `{effect}`")]
    UnknownEffect {
        object: ObjectId,
        state: StateId,
        effect: EffectId,
    },

    #[error("slot `{slot}` of object `{object}` holds `{item}`, which has no registered definition")]
    UnregisteredSlotItem {
        object: ObjectId,
        slot: SlotId,
        item: ObjectId,
    },
}

impl GameError for ContentIssue {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Content
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ContainerCycle { .. } => "CONTENT_CONTAINER_CYCLE",
            Self::DuplicateSlot { .. } => "CONTENT_DUPLICATE_SLOT",
            Self::DuplicateState { .. } => "CONTENT_DUPLICATE_STATE",
            Self::DuplicateObject { .. } => "CONTENT_DUPLICATE_OBJECT",
            Self::UndeclaredDefaultState { .. } => "CONTENT_UNDECLARED_DEFAULT_STATE",
            Self::UnknownEffect { .. } => "CONTENT_UNKNOWN_EFFECT",
            Self::UnregisteredSlotItem { .. } => "CONTENT_UNREGISTERED_SLOT_ITEM",
        }
    }
}

/// Checks placed objects (scene and inventory roots) together with the slot
/// registry. Returns every issue found; an empty list means the content is
/// safe to load.
pub fn validate_objects<'a, I>(
    placed: I,
    registry: &[ObjectDefinition],
    effects: &EffectManager,
) -> Vec<ContentIssue>
where
    I: IntoIterator<Item = &'a ObjectDefinition>,
{
    let mut issues = Vec::new();

    let placed: Vec<&ObjectDefinition> = placed
        .into_iter()
        .flat_map(ObjectDefinition::walk)
        .collect();
    let registered: Vec<&ObjectDefinition> =
        registry.iter().flat_map(ObjectDefinition::walk).collect();
    let registered_ids: BTreeSet<&str> = registry.iter().map(|object| object.id.as_str()).collect();

    let mut by_id: BTreeMap<&str, &ObjectDefinition> = BTreeMap::new();
    for &object in placed.iter().chain(&registered) {
        match by_id.entry(object.id.as_str()) {
            Entry::Vacant(entry) => {
                entry.insert(object);
            }
            Entry::Occupied(_) if !hands::is_hand(object) => {
                issues.push(ContentIssue::DuplicateObject {
                    object: object.id.clone(),
                });
            }
            Entry::Occupied(_) => {}
        }
    }

    for &object in placed.iter().chain(&registered) {
        check_slots(object, &registered_ids, &mut issues);
        check_states(object, effects, &mut issues);
    }

    issues.extend(find_cycles(&by_id));
    issues
}

/// Runs [`validate_objects`] over everything a state holds.
pub fn validate_state(state: &GameState, effects: &EffectManager) -> Vec<ContentIssue> {
    let in_scenes = state.scene_objects.values().flatten();
    let carried = state
        .characters
        .values()
        .flat_map(|character| &character.inventory)
        .filter_map(|entry| entry.object());
    let registry: Vec<ObjectDefinition> = state.objects.values().cloned().collect();

    validate_objects(in_scenes.chain(carried), &registry, effects)
}

fn check_slots(
    object: &ObjectDefinition,
    registered: &BTreeSet<&str>,
    issues: &mut Vec<ContentIssue>,
) {
    let mut seen = BTreeSet::new();
    for slot in &object.slots {
        if !seen.insert(slot.id.as_str()) {
            issues.push(ContentIssue::DuplicateSlot {
                object: object.id.clone(),
                slot: slot.id.clone(),
            });
        }
        if let Some(item) = slot.item_id.as_ref().filter(|item| !registered.contains(item.as_str())) {
            issues.push(ContentIssue::UnregisteredSlotItem {
                object: object.id.clone(),
                slot: slot.id.clone(),
                item: item.clone(),
            });
        }
    }
}

fn check_states(object: &ObjectDefinition, effects: &EffectManager, issues: &mut Vec<ContentIssue>) {
    let mut declared = BTreeSet::new();
    for state in &object.states {
        if !declared.insert(state.id.as_str()) {
            issues.push(ContentIssue::DuplicateState {
                object: object.id.clone(),
                state: state.id.clone(),
            });
        }

        let payload = &state.effects;
        for effect in payload.add_effects.iter().chain(&payload.remove_effects) {
            if effects.definition(effect.as_str()).is_none() {
                issues.push(ContentIssue::UnknownEffect {
                    object: object.id.clone(),
                    state: state.id.clone(),
                    effect: effect.clone(),
                });
            }
        }
    }

    if let Some(default) = object
        .default_state
        .as_ref()
        .filter(|default| !declared.contains(default.as_str()))
    {
        issues.push(ContentIssue::UndeclaredDefaultState {
            object: object.id.clone(),
            state: default.clone(),
        });
    }
}

/// Follows storage and slot references by id. Each cycle is reported once,
/// at the first object on it reached in id order.
fn find_cycles(by_id: &BTreeMap<&str, &ObjectDefinition>) -> Vec<ContentIssue> {
    let mut issues = Vec::new();
    let mut finished = BTreeSet::new();
    for &id in by_id.keys() {
        let mut path = Vec::new();
        visit(id, by_id, &mut path, &mut finished, &mut issues);
    }
    issues
}

fn visit<'a>(
    id: &'a str,
    by_id: &BTreeMap<&'a str, &'a ObjectDefinition>,
    path: &mut Vec<&'a str>,
    finished: &mut BTreeSet<&'a str>,
    issues: &mut Vec<ContentIssue>,
) {
    if let Some(start) = path.iter().position(|seen| *seen == id) {
        let mut cycle = path[start..].to_vec();
        cycle.push(id);
        issues.push(ContentIssue::ContainerCycle {
            object: ObjectId::new(id),
            path: cycle.join(" -> "),
        });
        return;
    }
    if !finished.insert(id) {
        return;
    }
    let Some(&object) = by_id.get(id) else {
        return;
    };

    path.push(id);
    let stored = object.contains.iter().map(|child| child.id.as_str());
    let slotted = object
        .slots
        .iter()
        .filter_map(|slot| slot.item_id.as_ref())
        .map(|item| item.as_str());
    for child in stored.chain(slotted) {
        visit(child, by_id, path, finished, issues);
    }
    path.pop();
}
