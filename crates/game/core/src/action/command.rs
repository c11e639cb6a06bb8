use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use super::kinds::{ChangeStateCommand, TransferCommand};
use super::{ActionResult, Intent};
use crate::env::GameEnv;
use crate::inventory::find_object;
use crate::object::{ObjectDefinition, ResolvedObjects};
use crate::state::{CharacterState, GameState};

/// Resolves one kind of intent into a declarative result.
///
/// Implementations read the state and never modify it; anything that should
/// change goes into the returned payload. Game-outcome failures are results,
/// not errors.
pub trait Command: Send + Sync {
    /// Intent kind this command answers to.
    fn kind(&self) -> &str;

    fn resolve(
        &self,
        state: &GameState,
        intent: &Intent,
        context: &CommandContext<'_>,
        env: &GameEnv<'_>,
    ) -> ActionResult;
}

/// Scene context supplied alongside an intent.
#[derive(Clone, Copy, Debug)]
pub struct CommandContext<'a> {
    pub scene_objects: &'a [ObjectDefinition],
    /// Definitions of slot occupants.
    pub objects: &'a ResolvedObjects,
}

impl<'a> CommandContext<'a> {
    pub fn new(scene_objects: &'a [ObjectDefinition], objects: &'a ResolvedObjects) -> Self {
        Self {
            scene_objects,
            objects,
        }
    }

    /// Context for the state's current scene.
    pub fn for_current_scene(state: &'a GameState) -> Self {
        Self::new(state.current_scene_objects(), &state.objects)
    }

    /// Finds an object in scope: in the scene or carried by `actor`,
    /// including inside slotted containers.
    pub fn find_object(
        &self,
        actor: &'a CharacterState,
        id: &str,
    ) -> Option<&'a ObjectDefinition> {
        find_object(self.scene_objects, id, self.objects).or_else(|| {
            find_object(
                actor.inventory.iter().filter_map(|entry| entry.object()),
                id,
                self.objects,
            )
        })
    }
}

/// Commands keyed by intent kind.
#[derive(Clone, Default)]
pub struct CommandRegistry {
    commands: BTreeMap<String, Arc<dyn Command>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with the built-in commands.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(ChangeStateCommand);
        registry.register(TransferCommand);
        registry
    }

    /// Adds a command, replacing any with the same kind.
    pub fn register<C>(&mut self, command: C) -> Option<Arc<dyn Command>>
    where
        C: Command + 'static,
    {
        self.commands
            .insert(command.kind().to_owned(), Arc::new(command))
    }

    pub fn get(&self, kind: &str) -> Option<&dyn Command> {
        self.commands.get(kind).map(Arc::as_ref)
    }

    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.commands.keys().map(String::as_str)
    }
}

impl fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("kinds", &self.kinds().collect::<Vec<_>>())
            .finish()
    }
}
