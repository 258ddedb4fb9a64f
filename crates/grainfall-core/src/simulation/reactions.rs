//! Chemical reaction table
//!
//! Interactions between a cell and one orthogonal neighbour, e.g.
//! water + lava -> steam + stone. The table is ordered; evaluation stops at
//! the first reaction that matches and passes its probability gate.

use crate::simulation::MaterialKind;

/// Which materials one side of a reaction accepts
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operand {
    Kind(MaterialKind),
    /// Any flammable material
    Flammable,
    /// Wood or grass
    Organic,
}

impl Operand {
    pub fn matches(self, kind: MaterialKind) -> bool {
        match self {
            Operand::Kind(k) => k == kind,
            Operand::Flammable => kind.is_flammable(),
            Operand::Organic => matches!(kind, MaterialKind::Wood | MaterialKind::Grass),
        }
    }
}

/// What one side turns into. `temperature: None` keeps the current temperature.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Product {
    pub kind: MaterialKind,
    pub temperature: Option<f32>,
}

impl Product {
    pub const fn of(kind: MaterialKind) -> Self {
        Self {
            kind,
            temperature: None,
        }
    }

    pub const fn at(kind: MaterialKind, temperature: f32) -> Self {
        Self {
            kind,
            temperature: Some(temperature),
        }
    }
}

/// Definition of a reaction between a cell and an adjacent cell
#[derive(Clone, Debug, PartialEq)]
pub struct Reaction {
    /// Human-readable name
    pub name: &'static str,

    /// The cell being evaluated
    pub cell: Operand,
    /// One of its 4 neighbours
    pub neighbor: Operand,

    pub cell_becomes: Option<Product>,
    pub neighbor_becomes: Option<Product>,

    /// Probability per evaluation when both sides match (0.0 - 1.0)
    pub probability: f32,
}

/// Ignition and burning temperatures
pub const IGNITION_TEMPERATURE: f32 = 500.0;
const BURNT_SMOKE_TEMPERATURE: f32 = 200.0;
const STEAM_TEMPERATURE: f32 = 100.0;

/// Ordered list of all reactions
pub struct ReactionRegistry {
    reactions: Vec<Reaction>,
}

impl ReactionRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            reactions: Vec::new(),
        };
        registry.register_default_reactions();
        registry
    }

    /// A registry with no reactions
    pub fn empty() -> Self {
        Self {
            reactions: Vec::new(),
        }
    }

    fn register_default_reactions(&mut self) {
        use MaterialKind::*;

        // Water + Lava -> Steam + Stone, from whichever side is evaluated
        self.register(Reaction {
            name: "water_lava_quench",
            cell: Operand::Kind(Water),
            neighbor: Operand::Kind(Lava),
            cell_becomes: Some(Product::of(Steam)),
            neighbor_becomes: Some(Product::at(Stone, STEAM_TEMPERATURE)),
            probability: 1.0,
        });
        self.register(Reaction {
            name: "lava_water_quench",
            cell: Operand::Kind(Lava),
            neighbor: Operand::Kind(Water),
            cell_becomes: Some(Product::at(Stone, STEAM_TEMPERATURE)),
            neighbor_becomes: Some(Product::of(Steam)),
            probability: 1.0,
        });

        self.register(Reaction {
            name: "fire_spread",
            cell: Operand::Flammable,
            neighbor: Operand::Kind(Fire),
            cell_becomes: Some(Product::at(Fire, IGNITION_TEMPERATURE)),
            neighbor_becomes: None,
            probability: 0.05,
        });

        self.register(Reaction {
            name: "lava_ignite",
            cell: Operand::Flammable,
            neighbor: Operand::Kind(Lava),
            cell_becomes: Some(Product::at(Fire, IGNITION_TEMPERATURE)),
            neighbor_becomes: None,
            probability: 0.1,
        });

        // Fire consumes adjacent fuel
        self.register(Reaction {
            name: "fire_burn_fuel",
            cell: Operand::Kind(Fire),
            neighbor: Operand::Flammable,
            cell_becomes: None,
            neighbor_becomes: Some(Product::at(Smoke, BURNT_SMOKE_TEMPERATURE)),
            probability: 0.02,
        });

        self.register(Reaction {
            name: "acid_corrode_organic",
            cell: Operand::Kind(Acid),
            neighbor: Operand::Organic,
            cell_becomes: None,
            neighbor_becomes: Some(Product::of(Air)),
            probability: 0.05,
        });

        self.register(Reaction {
            name: "water_extinguish",
            cell: Operand::Kind(Water),
            neighbor: Operand::Kind(Fire),
            cell_becomes: None,
            neighbor_becomes: Some(Product::at(Steam, STEAM_TEMPERATURE)),
            probability: 1.0,
        });
    }

    /// Append a reaction; it is tried after every reaction already registered
    pub fn register(&mut self, reaction: Reaction) {
        self.reactions.push(reaction);
    }

    pub fn reactions(&self) -> &[Reaction] {
        &self.reactions
    }

    /// Reactions whose operands accept this pair, in evaluation order
    pub fn candidates(
        &self,
        cell: MaterialKind,
        neighbor: MaterialKind,
    ) -> impl Iterator<Item = &Reaction> {
        self.reactions
            .iter()
            .filter(move |r| r.cell.matches(cell) && r.neighbor.matches(neighbor))
    }

    pub fn len(&self) -> usize {
        self.reactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reactions.is_empty()
    }
}

impl Default for ReactionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operands() {
        assert!(Operand::Flammable.matches(MaterialKind::Oil));
        assert!(!Operand::Flammable.matches(MaterialKind::Water));
        assert!(Operand::Organic.matches(MaterialKind::Grass));
        assert!(!Operand::Organic.matches(MaterialKind::Coal));
        assert!(Operand::Kind(MaterialKind::Lava).matches(MaterialKind::Lava));
    }

    #[test]
    fn test_default_order() {
        let registry = ReactionRegistry::new();
        let names: Vec<_> = registry.reactions().iter().map(|r| r.name).collect();
        assert_eq!(
            names,
            vec![
                "water_lava_quench",
                "lava_water_quench",
                "fire_spread",
                "lava_ignite",
                "fire_burn_fuel",
                "acid_corrode_organic",
                "water_extinguish",
            ]
        );
    }

    #[test]
    fn test_candidates() {
        let registry = ReactionRegistry::new();

        let wood_next_to_lava: Vec<_> = registry
            .candidates(MaterialKind::Wood, MaterialKind::Lava)
            .map(|r| r.name)
            .collect();
        assert_eq!(wood_next_to_lava, vec!["lava_ignite"]);

        let water_next_to_fire: Vec<_> = registry
            .candidates(MaterialKind::Water, MaterialKind::Fire)
            .map(|r| r.name)
            .collect();
        assert_eq!(water_next_to_fire, vec!["water_extinguish"]);

        assert_eq!(
            registry
                .candidates(MaterialKind::Stone, MaterialKind::Sand)
                .count(),
            0
        );
    }

    #[test]
    fn test_quench_products() {
        let registry = ReactionRegistry::new();
        let quench = registry
            .candidates(MaterialKind::Lava, MaterialKind::Water)
            .next()
            .unwrap();
        assert_eq!(quench.cell_becomes.unwrap().kind, MaterialKind::Stone);
        assert_eq!(quench.cell_becomes.unwrap().temperature, Some(100.0));
        assert_eq!(quench.neighbor_becomes, Some(Product::of(MaterialKind::Steam)));
    }

    #[test]
    fn test_register_custom() {
        let mut registry = ReactionRegistry::empty();
        assert!(registry.is_empty());
        registry.register(Reaction {
            name: "acid_dissolve_stone",
            cell: Operand::Kind(MaterialKind::Acid),
            neighbor: Operand::Kind(MaterialKind::Stone),
            cell_becomes: None,
            neighbor_becomes: Some(Product::of(MaterialKind::Air)),
            probability: 0.01,
        });
        assert_eq!(registry.len(), 1);
    }
}
