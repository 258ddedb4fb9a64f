//! Per-coordinate cell record

use glam::{IVec2, Vec2};

use crate::{MaterialDef, MaterialKind};

/// Room temperature (Celsius) that cells drift back toward
pub const AMBIENT_TEMPERATURE: f32 = 20.0;

/// One grid coordinate's state
///
/// `kind`, `temperature`, `age`, `velocity`, `stable` and `conveyor_cooldown`
/// describe whatever currently occupies the coordinate and travel with it on a
/// swap. `has_support` and `support_stable` describe the coordinate itself.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    /// Grid coordinate of this slot (fixed for the life of the grid)
    pub pos: IVec2,
    pub kind: MaterialKind,
    /// Celsius
    pub temperature: f32,
    /// Ticks since the last kind change, advanced by the ageing rule
    pub age: u32,
    /// Advisory only, no rule reads it yet
    pub velocity: Vec2,
    /// Structural stability, meaningful for stone-like kinds only
    pub stable: bool,
    /// Support overlay placed on this coordinate
    pub has_support: bool,
    /// Stability of the overlay, meaningful only when `has_support`
    pub support_stable: bool,
    /// Ticks to wait before a conveyor may move this cell again
    pub conveyor_cooldown: i32,
}

impl Cell {
    pub fn new(kind: MaterialKind, pos: IVec2) -> Self {
        Self {
            pos,
            kind,
            temperature: AMBIENT_TEMPERATURE,
            age: 0,
            velocity: Vec2::ZERO,
            stable: false,
            has_support: false,
            support_stable: false,
            conveyor_cooldown: 0,
        }
    }

    /// An air cell at `pos`
    pub fn air(pos: IVec2) -> Self {
        Self::new(MaterialKind::Air, pos)
    }

    #[inline]
    pub fn def(&self) -> &'static MaterialDef {
        self.kind.def()
    }

    #[inline]
    pub fn is_air(&self) -> bool {
        self.kind.is_air()
    }

    #[inline]
    pub fn is_stone_like(&self) -> bool {
        self.kind.is_stone_like()
    }

    #[inline]
    pub fn is_solid(&self) -> bool {
        self.kind.is_solid()
    }

    #[inline]
    pub fn is_liquid(&self) -> bool {
        self.kind.is_liquid()
    }

    #[inline]
    pub fn is_gas(&self) -> bool {
        self.kind.is_gas()
    }

    #[inline]
    pub fn is_flammable(&self) -> bool {
        self.kind.is_flammable()
    }

    #[inline]
    pub fn is_conveyor(&self) -> bool {
        self.kind.is_conveyor()
    }

    #[inline]
    pub fn density(&self) -> f32 {
        self.kind.density()
    }

    /// Whether this cell deviates from a freshly created air cell in any persisted field
    pub fn is_default(&self) -> bool {
        self.is_air() && self.temperature == AMBIENT_TEMPERATURE && !self.stable && !self.has_support
    }

    /// Exchange occupant state with `other`, leaving coordinates and support overlays in place
    pub fn swap_occupant(&mut self, other: &mut Cell) {
        std::mem::swap(&mut self.kind, &mut other.kind);
        std::mem::swap(&mut self.temperature, &mut other.temperature);
        std::mem::swap(&mut self.age, &mut other.age);
        std::mem::swap(&mut self.velocity, &mut other.velocity);
        std::mem::swap(&mut self.stable, &mut other.stable);
        std::mem::swap(&mut self.conveyor_cooldown, &mut other.conveyor_cooldown);
    }

    /// Reset to air at ambient temperature and drop any overlay
    pub fn clear(&mut self) {
        *self = Self::air(self.pos);
    }
}
