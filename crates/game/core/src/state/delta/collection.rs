use std::collections::BTreeMap;

/// Keyed collection delta capturing additions, removals, and updates.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CollectionChanges<Id, Patch> {
    pub added: Vec<Id>,
    pub removed: Vec<Id>,
    pub updated: Vec<Patch>,
}

impl<Id, Patch> CollectionChanges<Id, Patch> {
    pub(super) fn new() -> Self {
        Self {
            added: Vec::new(),
            removed: Vec::new(),
            updated: Vec::new(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.updated.is_empty()
    }
}

impl<Id, Patch> Default for CollectionChanges<Id, Patch> {
    fn default() -> Self {
        Self::new()
    }
}

pub(super) fn diff_collection<Id, T, Patch, FPatch>(
    before: &BTreeMap<Id, T>,
    after: &BTreeMap<Id, T>,
    mut patch_fn: FPatch,
) -> CollectionChanges<Id, Patch>
where
    Id: Ord + Clone,
    FPatch: FnMut(&T, &T) -> Option<Patch>,
{
    let mut delta = CollectionChanges::new();

    for (id, entry) in after {
        match before.get(id) {
            Some(previous) => {
                if let Some(patch) = patch_fn(previous, entry) {
                    delta.updated.push(patch);
                }
            }
            None => delta.added.push(id.clone()),
        }
    }

    delta.removed.extend(
        before
            .keys()
            .filter(|id| !after.contains_key(*id))
            .cloned(),
    );
    delta
}

/// Keys whose value differs between the two maps, including keys present in
/// only one of them.
pub(super) fn changed_keys<Id, T>(before: &BTreeMap<Id, T>, after: &BTreeMap<Id, T>) -> Vec<Id>
where
    Id: Ord + Clone,
    T: PartialEq,
{
    let mut keys: Vec<Id> = before
        .iter()
        .filter(|(id, value)| after.get(*id) != Some(*value))
        .map(|(id, _)| id.clone())
        .collect();
    keys.extend(
        after
            .keys()
            .filter(|id| !before.contains_key(*id))
            .cloned(),
    );
    keys.sort();
    keys
}
