use std::collections::BTreeMap;

use super::{EntityId, Orientation, Position};

/// Who controls an actor.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ActorKind {
    Player,
    Npc,
}

/// A scheduled character: the player or a non-player character.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorState {
    pub name: String,
    pub kind: ActorKind,
    pub glyph: char,
    pub position: Position,
    pub orientation: Orientation,
    /// Actors block movement unless flagged otherwise.
    pub passable: bool,
    pub opaque: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: Option<String>,
}

impl ActorState {
    pub fn new(
        name: impl Into<String>,
        kind: ActorKind,
        glyph: char,
        position: Position,
        orientation: Orientation,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            glyph,
            position,
            orientation,
            passable: false,
            opaque: false,
            description: None,
        }
    }

    pub fn player(position: Position, orientation: Orientation) -> Self {
        Self::new("you", ActorKind::Player, '@', position, orientation)
    }

    pub fn npc(
        name: impl Into<String>,
        glyph: char,
        position: Position,
        orientation: Orientation,
    ) -> Self {
        Self::new(name, ActorKind::Npc, glyph, position, orientation)
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn is_player(&self) -> bool {
        self.kind == ActorKind::Player
    }
}

/// Which way a door leaf runs, fixed when the door is placed.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum DoorAxis {
    /// Set into a wall running east-west.
    Horizontal,
    /// Set into a wall running north-south.
    Vertical,
}

/// A door occupant. Passability and opacity follow `closed`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DoorState {
    pub closed: bool,
    /// Prevents opening; has no effect on closing.
    pub locked: bool,
    pub axis: DoorAxis,
}

impl DoorState {
    pub const fn new(axis: DoorAxis, closed: bool) -> Self {
        Self {
            closed,
            locked: false,
            axis,
        }
    }

    pub const fn is_passable(&self) -> bool {
        !self.closed
    }

    pub const fn is_opaque(&self) -> bool {
        self.closed
    }

    pub const fn glyph(&self) -> char {
        if self.closed { '+' } else { '\'' }
    }
}

/// Any other placed object: thin-wall segments, rubble, decorations.
///
/// Capabilities are optional. A feature that does not declare passability is
/// walked over; one that does not declare opacity is seen through.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeatureState {
    pub name: String,
    pub glyph: char,
    #[cfg_attr(feature = "serde", serde(default))]
    pub passable: Option<bool>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub opaque: Option<bool>,
}

impl FeatureState {
    pub fn new(name: impl Into<String>, glyph: char) -> Self {
        Self {
            name: name.into(),
            glyph,
            passable: None,
            opaque: None,
        }
    }

    /// A wall segment standing on a floor cell.
    pub fn thin_wall(glyph: char) -> Self {
        Self {
            passable: Some(false),
            opaque: Some(true),
            ..Self::new("thin wall", glyph)
        }
    }

    pub fn rubble() -> Self {
        Self::new("rubble", ',')
    }
}

/// Anything that can sit in a cell's occupant list.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Occupant {
    Actor(ActorState),
    Door(DoorState),
    Feature(FeatureState),
}

impl Occupant {
    pub fn name(&self) -> &str {
        match self {
            Occupant::Actor(actor) => &actor.name,
            Occupant::Door(_) => "door",
            Occupant::Feature(feature) => &feature.name,
        }
    }

    pub fn glyph(&self) -> char {
        match self {
            Occupant::Actor(actor) => actor.glyph,
            Occupant::Door(door) => door.glyph(),
            Occupant::Feature(feature) => feature.glyph,
        }
    }

    pub fn is_passable(&self) -> bool {
        match self {
            Occupant::Actor(actor) => actor.passable,
            Occupant::Door(door) => door.is_passable(),
            Occupant::Feature(feature) => feature.passable.unwrap_or(true),
        }
    }

    pub fn is_opaque(&self) -> bool {
        match self {
            Occupant::Actor(actor) => actor.opaque,
            Occupant::Door(door) => door.is_opaque(),
            Occupant::Feature(feature) => feature.opaque.unwrap_or(false),
        }
    }

    pub fn as_actor(&self) -> Option<&ActorState> {
        match self {
            Occupant::Actor(actor) => Some(actor),
            _ => None,
        }
    }

    pub fn as_door(&self) -> Option<&DoorState> {
        match self {
            Occupant::Door(door) => Some(door),
            _ => None,
        }
    }
}

impl From<ActorState> for Occupant {
    fn from(actor: ActorState) -> Self {
        Occupant::Actor(actor)
    }
}

impl From<DoorState> for Occupant {
    fn from(door: DoorState) -> Self {
        Occupant::Door(door)
    }
}

impl From<FeatureState> for Occupant {
    fn from(feature: FeatureState) -> Self {
        Occupant::Feature(feature)
    }
}

/// Arena of every occupant in the world, keyed by id.
///
/// Cells only hold ids; this is the single owner of the occupant values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntitiesState {
    occupants: BTreeMap<EntityId, Occupant>,
    next_id: u32,
}

impl EntitiesState {
    pub fn new() -> Self {
        Self {
            occupants: BTreeMap::new(),
            // 0 is reserved for the player
            next_id: 1,
        }
    }

    /// Stores an occupant under a fresh id. Players always get
    /// [`EntityId::PLAYER`].
    pub(crate) fn insert(&mut self, occupant: Occupant) -> EntityId {
        let id = match &occupant {
            Occupant::Actor(actor) if actor.is_player() => EntityId::PLAYER,
            _ => {
                let id = EntityId(self.next_id);
                self.next_id += 1;
                id
            }
        };
        self.occupants.insert(id, occupant);
        id
    }

    pub(crate) fn remove(&mut self, id: EntityId) -> Option<Occupant> {
        self.occupants.remove(&id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.occupants.contains_key(&id)
    }

    pub fn get(&self, id: EntityId) -> Option<&Occupant> {
        self.occupants.get(&id)
    }

    pub fn actor(&self, id: EntityId) -> Option<&ActorState> {
        self.occupants.get(&id).and_then(Occupant::as_actor)
    }

    pub fn actor_mut(&mut self, id: EntityId) -> Option<&mut ActorState> {
        match self.occupants.get_mut(&id) {
            Some(Occupant::Actor(actor)) => Some(actor),
            _ => None,
        }
    }

    pub fn door(&self, id: EntityId) -> Option<&DoorState> {
        self.occupants.get(&id).and_then(Occupant::as_door)
    }

    pub fn door_mut(&mut self, id: EntityId) -> Option<&mut DoorState> {
        match self.occupants.get_mut(&id) {
            Some(Occupant::Door(door)) => Some(door),
            _ => None,
        }
    }

    pub fn player(&self) -> Option<&ActorState> {
        self.actor(EntityId::PLAYER)
    }

    /// Every actor id in ascending order.
    pub fn actor_ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.occupants
            .iter()
            .filter(|(_, occupant)| matches!(occupant, Occupant::Actor(_)))
            .map(|(id, _)| *id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Occupant)> {
        self.occupants.iter().map(|(id, occupant)| (*id, occupant))
    }

    pub fn len(&self) -> usize {
        self.occupants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.occupants.is_empty()
    }
}

impl Default for EntitiesState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn door_capabilities_follow_closed_flag() {
        let mut door = DoorState::new(DoorAxis::Vertical, true);
        assert!(!door.is_passable());
        assert!(door.is_opaque());
        door.closed = false;
        assert!(door.is_passable());
        assert!(!door.is_opaque());
    }

    #[test]
    fn features_without_capabilities_are_passable_and_transparent() {
        let rubble = Occupant::from(FeatureState::rubble());
        assert!(rubble.is_passable());
        assert!(!rubble.is_opaque());

        let wall = Occupant::from(FeatureState::thin_wall('|'));
        assert!(!wall.is_passable());
        assert!(wall.is_opaque());
    }

    #[test]
    fn player_always_receives_reserved_id() {
        let mut entities = EntitiesState::new();
        let npc = entities.insert(ActorState::npc("rat", 'r', Position::ORIGIN, Orientation::EAST).into());
        let player = entities.insert(ActorState::player(Position::ORIGIN, Orientation::EAST).into());
        assert_eq!(player, EntityId::PLAYER);
        assert_ne!(npc, EntityId::PLAYER);
        assert_eq!(entities.actor_ids().collect::<Vec<_>>(), vec![player, npc]);
    }
}
