use bitflags::bitflags;

bitflags! {
    /// Tracks which fields of a [`CharacterState`](crate::state::CharacterState)
    /// changed during a turn.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct CharacterFields: u8 {
        const BASE_STATS = 1 << 0;
        const STATS      = 1 << 1;
        const TRAITS     = 1 << 2;
        const FLAGS      = 1 << 3;
        const INVENTORY  = 1 << 4;
        const EFFECTS    = 1 << 5;
    }
}

bitflags! {
    /// Tracks which fields of [`WorldState`](crate::state::WorldState) changed.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct WorldFields: u8 {
        const GLOBAL_FLAGS   = 1 << 0;
        const VISITED_SCENES = 1 << 1;
        const SCENE_FLAGS    = 1 << 2;
        const TURN           = 1 << 3;
        const CURRENT_SCENE  = 1 << 4;
    }
}
