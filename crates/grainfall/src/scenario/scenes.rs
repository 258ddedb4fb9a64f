//! Built-in demo scenes

use grainfall_core::prelude::MaterialKind;

use super::definition::{ScenarioAction, ScenarioDefinition};
use super::verification::VerificationCondition;

/// Names accepted by [`builtin`]
pub const SCENE_NAMES: [&str; 3] = ["bridge", "reservoir", "volcano"];

/// Look up a built-in scene by name
pub fn builtin(name: &str) -> Option<ScenarioDefinition> {
    match name {
        "bridge" => Some(bridge()),
        "reservoir" => Some(reservoir()),
        "volcano" => Some(volcano()),
        _ => None,
    }
}

fn fill(x0: i32, y0: i32, x1: i32, y1: i32, material: MaterialKind) -> ScenarioAction {
    ScenarioAction::Fill {
        x0,
        y0,
        x1,
        y1,
        material,
    }
}

/// Steel deck on two stone pillars with sand poured on top
fn bridge() -> ScenarioDefinition {
    ScenarioDefinition {
        name: "bridge".to_string(),
        description: "A steel deck spans two stone pillars and catches falling sand".to_string(),
        width: 64,
        height: 48,
        setup: vec![
            fill(0, 47, 63, 47, MaterialKind::Stone),
            fill(10, 31, 10, 46, MaterialKind::Stone),
            fill(50, 31, 50, 46, MaterialKind::Stone),
            fill(10, 30, 50, 30, MaterialKind::Steel),
            fill(20, 18, 40, 18, MaterialKind::Sand),
        ],
        ticks: 120,
        verify: vec![
            VerificationCondition::MaterialAt {
                x: 30,
                y: 30,
                material: MaterialKind::Steel,
            },
            VerificationCondition::Stable {
                x: 30,
                y: 30,
                expected: true,
            },
            VerificationCondition::CountAtLeast {
                material: MaterialKind::Sand,
                count: 21,
            },
            VerificationCondition::RegionEmpty {
                x0: 20,
                y0: 18,
                x1: 40,
                y1: 18,
            },
        ],
    }
}

/// Walled pool of water with two pumps on its floor
fn reservoir() -> ScenarioDefinition {
    ScenarioDefinition {
        name: "reservoir".to_string(),
        description: "Pumps push water upward inside a stone basin".to_string(),
        width: 48,
        height: 32,
        setup: vec![
            fill(0, 31, 47, 31, MaterialKind::Stone),
            fill(8, 16, 8, 30, MaterialKind::Stone),
            fill(40, 16, 40, 30, MaterialKind::Stone),
            fill(9, 24, 39, 30, MaterialKind::Water),
            ScenarioAction::Place {
                x: 20,
                y: 30,
                material: MaterialKind::Pump,
            },
            ScenarioAction::Place {
                x: 28,
                y: 30,
                material: MaterialKind::Pump,
            },
        ],
        ticks: 200,
        verify: vec![
            VerificationCondition::CountAtLeast {
                material: MaterialKind::Water,
                count: 215,
            },
            VerificationCondition::Stable {
                x: 8,
                y: 16,
                expected: true,
            },
        ],
    }
}

/// Lava pool between a lake and a stand of wood
fn volcano() -> ScenarioDefinition {
    ScenarioDefinition {
        name: "volcano".to_string(),
        description: "Lava meets water on one side and wood on the other".to_string(),
        width: 64,
        height: 48,
        setup: vec![
            fill(0, 47, 63, 47, MaterialKind::Stone),
            fill(26, 40, 38, 46, MaterialKind::Lava),
            fill(8, 40, 20, 46, MaterialKind::Water),
            fill(44, 38, 46, 46, MaterialKind::Wood),
            ScenarioAction::Support { x: 45, y: 37 },
        ],
        ticks: 300,
        verify: vec![VerificationCondition::CountAtLeast {
            material: MaterialKind::Stone,
            count: 64,
        }],
    }
}
