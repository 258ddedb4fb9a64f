//! Material definitions and the static property table

use serde::{Deserialize, Serialize};

/// Every kind of material a cell can hold
///
/// Serialized in snake_case (`iron_ore`, `conveyor_right`, ...), which is the
/// tag format used by world snapshots.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialKind {
    #[default]
    Air,
    Stone,
    Dirt,
    Sand,
    Wood,
    Water,
    Lava,
    Oil,
    Steam,
    Smoke,
    Coal,
    IronOre,
    Ice,
    Glass,
    Acid,
    Crystal,
    Grass,
    Fire,
    Seed,
    Pump,

    // Conveyor belts (directional)
    ConveyorRight,
    ConveyorLeft,
    ConveyorUp,
    ConveyorDown,

    // Crafted items
    IronPlate,
    Gear,
    Circuit,
    Wire,
    Steel,
}

impl MaterialKind {
    pub const COUNT: usize = 29;

    pub const ALL: [MaterialKind; Self::COUNT] = [
        MaterialKind::Air,
        MaterialKind::Stone,
        MaterialKind::Dirt,
        MaterialKind::Sand,
        MaterialKind::Wood,
        MaterialKind::Water,
        MaterialKind::Lava,
        MaterialKind::Oil,
        MaterialKind::Steam,
        MaterialKind::Smoke,
        MaterialKind::Coal,
        MaterialKind::IronOre,
        MaterialKind::Ice,
        MaterialKind::Glass,
        MaterialKind::Acid,
        MaterialKind::Crystal,
        MaterialKind::Grass,
        MaterialKind::Fire,
        MaterialKind::Seed,
        MaterialKind::Pump,
        MaterialKind::ConveyorRight,
        MaterialKind::ConveyorLeft,
        MaterialKind::ConveyorUp,
        MaterialKind::ConveyorDown,
        MaterialKind::IronPlate,
        MaterialKind::Gear,
        MaterialKind::Circuit,
        MaterialKind::Wire,
        MaterialKind::Steel,
    ];

    /// Static properties of this kind
    #[inline]
    pub fn def(self) -> &'static MaterialDef {
        Materials::get(self)
    }

    #[inline]
    pub fn is_air(self) -> bool {
        self == MaterialKind::Air
    }

    #[inline]
    pub fn density(self) -> f32 {
        self.def().density
    }

    #[inline]
    pub fn phase(self) -> Phase {
        self.def().phase
    }

    /// Participates in structural stability instead of falling freely
    #[inline]
    pub fn is_stone_like(self) -> bool {
        self.def().stone_like
    }

    /// Blocks movement
    #[inline]
    pub fn is_solid(self) -> bool {
        self.def().solid
    }

    #[inline]
    pub fn is_liquid(self) -> bool {
        self.def().phase == Phase::Liquid
    }

    /// Air counts as a gas
    #[inline]
    pub fn is_gas(self) -> bool {
        self.def().phase == Phase::Gas
    }

    #[inline]
    pub fn is_flammable(self) -> bool {
        self.def().flammable
    }

    #[inline]
    pub fn is_conveyor(self) -> bool {
        self.conveyor_direction().is_some()
    }

    pub fn is_crafted_item(self) -> bool {
        matches!(
            self,
            MaterialKind::IronPlate
                | MaterialKind::Gear
                | MaterialKind::Circuit
                | MaterialKind::Wire
                | MaterialKind::Steel
        )
    }

    /// Direction a conveyor belt carries items resting on it
    pub fn conveyor_direction(self) -> Option<Direction> {
        match self {
            MaterialKind::ConveyorRight => Some(Direction::Right),
            MaterialKind::ConveyorLeft => Some(Direction::Left),
            MaterialKind::ConveyorUp => Some(Direction::Up),
            MaterialKind::ConveyorDown => Some(Direction::Down),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        self.def().name
    }
}

/// Physical phase class of a material
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Blocks movement; stone-like solids hold position while stable, the rest fall
    Solid,
    /// Falls and spreads sideways (water, lava, oil, acid)
    Liquid,
    /// Rises and disperses (air, steam, smoke)
    Gas,
    /// Neither moves nor blocks (fire, seed)
    Inert,
}

/// Grid direction. Y grows downward, so `Up` is `(0, -1)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Right,
    Left,
    Up,
    Down,
}

impl Direction {
    #[inline]
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::Right => (1, 0),
            Direction::Left => (-1, 0),
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
        }
    }
}

/// Immutable properties of one material kind
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MaterialDef {
    pub kind: MaterialKind,
    pub name: &'static str,
    pub phase: Phase,

    /// Relative density, compared for stratification
    pub density: f32,

    /// Base color (RGBA)
    pub color: [u8; 4],

    pub flammable: bool,
    /// Checked by the stability propagator (stone, ore, glass, crystal, pump, conveyors, crafted items)
    pub stone_like: bool,
    /// Blocks movement. The support overlay is not a material and never blocks.
    pub solid: bool,
}

impl MaterialDef {
    const fn new(
        kind: MaterialKind,
        name: &'static str,
        phase: Phase,
        density: f32,
        color: [u8; 4],
    ) -> Self {
        Self {
            kind,
            name,
            phase,
            density,
            color,
            flammable: false,
            stone_like: false,
            solid: matches!(phase, Phase::Solid),
        }
    }

    const fn flammable(self) -> Self {
        Self {
            flammable: true,
            ..self
        }
    }

    const fn stone_like(self) -> Self {
        Self {
            stone_like: true,
            ..self
        }
    }
}

const CONVEYOR_COLOR: [u8; 4] = [255, 176, 0, 255];

use MaterialKind as K;
use Phase::{Gas, Inert, Liquid, Solid};

/// Indexed by `MaterialKind as usize`
static MATERIALS: [MaterialDef; MaterialKind::COUNT] = [
    MaterialDef::new(K::Air, "air", Gas, 0.001, [0, 0, 0, 0]),
    MaterialDef::new(K::Stone, "stone", Solid, 2.6, [64, 64, 64, 255]).stone_like(),
    MaterialDef::new(K::Dirt, "dirt", Solid, 1.5, [139, 69, 19, 255]),
    MaterialDef::new(K::Sand, "sand", Solid, 1.6, [210, 180, 140, 255]),
    MaterialDef::new(K::Wood, "wood", Solid, 0.6, [139, 69, 19, 255]).flammable(),
    MaterialDef::new(K::Water, "water", Liquid, 1.0, [30, 144, 255, 255]),
    MaterialDef::new(K::Lava, "lava", Liquid, 3.0, [255, 69, 0, 255]),
    MaterialDef::new(K::Oil, "oil", Liquid, 0.9, [47, 27, 20, 255]).flammable(),
    MaterialDef::new(K::Steam, "steam", Gas, 0.0006, [255, 255, 255, 77]),
    MaterialDef::new(K::Smoke, "smoke", Gas, 0.0005, [80, 80, 80, 128]),
    MaterialDef::new(K::Coal, "coal", Solid, 1.3, [28, 28, 28, 255]).flammable(),
    MaterialDef::new(K::IronOre, "iron_ore", Solid, 3.5, [101, 67, 33, 255]).stone_like(),
    MaterialDef::new(K::Ice, "ice", Solid, 0.9, [224, 246, 255, 255]),
    MaterialDef::new(K::Glass, "glass", Solid, 2.5, [200, 220, 255, 179]).stone_like(),
    MaterialDef::new(K::Acid, "acid", Liquid, 1.1, [144, 238, 144, 255]),
    MaterialDef::new(K::Crystal, "crystal", Solid, 2.8, [255, 105, 180, 255]).stone_like(),
    MaterialDef::new(K::Grass, "grass", Solid, 0.3, [34, 139, 34, 255]).flammable(),
    MaterialDef::new(K::Fire, "fire", Inert, 0.0001, [255, 68, 0, 255]),
    MaterialDef::new(K::Seed, "seed", Inert, 0.5, [101, 67, 33, 255]),
    MaterialDef::new(K::Pump, "pump", Solid, 2.0, [0, 255, 255, 255]).stone_like(),
    MaterialDef::new(K::ConveyorRight, "conveyor_right", Solid, 1.0, CONVEYOR_COLOR).stone_like(),
    MaterialDef::new(K::ConveyorLeft, "conveyor_left", Solid, 1.0, CONVEYOR_COLOR).stone_like(),
    MaterialDef::new(K::ConveyorUp, "conveyor_up", Solid, 1.0, CONVEYOR_COLOR).stone_like(),
    MaterialDef::new(K::ConveyorDown, "conveyor_down", Solid, 1.0, CONVEYOR_COLOR).stone_like(),
    MaterialDef::new(K::IronPlate, "iron_plate", Solid, 1.0, [184, 184, 184, 255]).stone_like(),
    MaterialDef::new(K::Gear, "gear", Solid, 1.0, [204, 170, 0, 255]).stone_like(),
    MaterialDef::new(K::Circuit, "circuit", Solid, 1.0, [0, 255, 0, 255]).stone_like(),
    MaterialDef::new(K::Wire, "wire", Solid, 1.0, [255, 102, 0, 255]).stone_like(),
    MaterialDef::new(K::Steel, "steel", Solid, 1.0, [192, 192, 192, 255]).stone_like(),
];

/// Static lookup into the material table. Holds no state.
pub struct Materials;

impl Materials {
    #[inline]
    pub fn get(kind: MaterialKind) -> &'static MaterialDef {
        &MATERIALS[kind as usize]
    }

    pub fn iter() -> impl Iterator<Item = &'static MaterialDef> {
        MATERIALS.iter()
    }
}
