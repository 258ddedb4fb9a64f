//! Temperature simulation
//!
//! Heat spreads between orthogonal neighbours one pair at a time, so the
//! order neighbours are visited in (up, down, left, right) shows up in the
//! exact values. Every evaluated cell also relaxes slightly toward ambient.

use crate::simulation::AMBIENT_TEMPERATURE;
use crate::world::{Grid, ORTHOGONAL};

/// Fraction of the way each side of a pair moves toward the pair average
const DIFFUSION_RATE: f32 = 0.1;

/// Fraction of the distance from ambient kept per evaluation
const AMBIENT_RETENTION: f32 = 0.999;

/// Stateless heat transfer between a cell and its neighbours
pub struct TemperatureSimulator;

impl TemperatureSimulator {
    /// Exchange heat with each neighbour in turn, then decay toward ambient
    pub fn transfer(grid: &mut Grid, x: i32, y: i32) {
        let Some(mut temperature) = grid.get_cell(x, y).map(|c| c.temperature) else {
            return;
        };

        for (dx, dy) in ORTHOGONAL {
            let Some(neighbor) = grid.get_cell_mut(x + dx, y + dy) else {
                continue;
            };

            let average = (temperature + neighbor.temperature) / 2.0;
            temperature += (average - temperature) * DIFFUSION_RATE;
            neighbor.temperature += (average - neighbor.temperature) * DIFFUSION_RATE;
        }

        if let Some(cell) = grid.get_cell_mut(x, y) {
            cell.temperature = Self::decay(temperature);
        }
    }

    /// One step of relaxation toward ambient
    #[inline]
    pub fn decay(temperature: f32) -> f32 {
        AMBIENT_TEMPERATURE + (temperature - AMBIENT_TEMPERATURE) * AMBIENT_RETENTION
    }
}
