use std::collections::BTreeMap;

use crate::state::FeatureState;

/// Immutable description of a tile kind.
///
/// Terrain values are compared and hashed by content, which is what lets a
/// map intern them into a compact palette instead of storing one per cell.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TerrainType {
    pub name: String,
    pub glyph: char,
    pub passable: bool,
    pub opaque: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: Option<String>,
}

impl TerrainType {
    /// Creates a passable, transparent terrain.
    pub fn new(name: impl Into<String>, glyph: char) -> Self {
        Self {
            name: name.into(),
            glyph,
            passable: true,
            opaque: false,
            description: None,
        }
    }

    #[must_use]
    pub fn impassable(mut self) -> Self {
        self.passable = false;
        self
    }

    #[must_use]
    pub fn opaque(mut self) -> Self {
        self.opaque = true;
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Nothing at all. Every map palette starts with this at index 0.
    pub fn void() -> Self {
        Self::new("void", ' ').impassable()
    }

    pub fn floor() -> Self {
        Self::new("floor", '.')
    }

    pub fn wall() -> Self {
        Self::new("wall", '#').impassable().opaque()
    }
}

/// What a special-feature glyph places on top of a floor cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FeatureGlyph {
    /// A door; its axis is inferred from the surrounding walls at load time.
    Door { closed: bool },
    /// Any other non-terrain occupant.
    Feature(FeatureState),
}

/// Process-wide catalogue of terrain kinds and load-time glyph tables.
///
/// Built once at startup and handed by reference to whatever needs to turn
/// characters into terrain (map loading, cell import).
#[derive(Clone, Debug)]
pub struct TerrainRegistry {
    terrains: Vec<TerrainType>,
    glyphs: BTreeMap<char, usize>,
    features: BTreeMap<char, FeatureGlyph>,
    underlay: usize,
}

impl TerrainRegistry {
    /// An empty registry that only knows `void` and `floor`.
    pub fn new() -> Self {
        let mut registry = Self {
            terrains: Vec::new(),
            glyphs: BTreeMap::new(),
            features: BTreeMap::new(),
            underlay: 0,
        };
        registry.register(TerrainType::void());
        registry.underlay = registry.register(TerrainType::floor());
        registry
    }

    /// The stock glyph tables: `#` wall, `.` floor, `+`/`'` closed and open
    /// doors, `|`/`-` thin-wall segments and `,` rubble.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        let floor = registry.underlay;
        registry.glyphs.insert('.', floor);
        let wall = registry.register(TerrainType::wall());
        registry.glyphs.insert('#', wall);

        registry.register_feature('+', FeatureGlyph::Door { closed: true });
        registry.register_feature('\'', FeatureGlyph::Door { closed: false });
        registry.register_feature('|', FeatureGlyph::Feature(FeatureState::thin_wall('|')));
        registry.register_feature('-', FeatureGlyph::Feature(FeatureState::thin_wall('-')));
        registry.register_feature(',', FeatureGlyph::Feature(FeatureState::rubble()));
        registry
    }

    /// Adds a terrain kind (deduplicated by value) and returns its slot.
    pub fn register(&mut self, terrain: TerrainType) -> usize {
        if let Some(index) = self.terrains.iter().position(|known| *known == terrain) {
            return index;
        }
        self.terrains.push(terrain);
        self.terrains.len() - 1
    }

    pub fn register_feature(&mut self, glyph: char, feature: FeatureGlyph) {
        self.features.insert(glyph, feature);
    }

    /// Terrain for a load-time glyph. Unmapped characters are `void`.
    pub fn terrain_for_glyph(&self, glyph: char) -> &TerrainType {
        let index = self.glyphs.get(&glyph).copied().unwrap_or(0);
        &self.terrains[index]
    }

    pub fn feature_for_glyph(&self, glyph: char) -> Option<&FeatureGlyph> {
        self.features.get(&glyph)
    }

    /// Terrain placed beneath feature glyphs.
    pub fn underlay(&self) -> &TerrainType {
        &self.terrains[self.underlay]
    }

    pub fn iter(&self) -> impl Iterator<Item = &TerrainType> {
        self.terrains.iter()
    }
}

impl Default for TerrainRegistry {
    fn default() -> Self {
        Self::standard()
    }
}
