//! Snapshot codec - sparse in-memory serialization of the grid
//!
//! Only cells that differ from fresh air are listed. Stability flags are
//! written for display but never trusted on load: restoring a snapshot
//! always leaves stability dirty so the next propagation pass recomputes it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::grid::Grid;
use crate::simulation::{AMBIENT_TEMPERATURE, MaterialKind};

/// Why a snapshot could not be restored. The grid is untouched in every case.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot is {width}x{height} but the world is {expected_width}x{expected_height}")]
    DimensionMismatch {
        expected_width: u32,
        expected_height: u32,
        width: u32,
        height: u32,
    },

    #[error("malformed snapshot: {0}")]
    Json(#[from] serde_json::Error),
}

/// Whole-grid snapshot
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldSnapshot {
    pub width: u32,
    pub height: u32,
    /// Render scale carried through for the host, unused by the engine
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cell_size: Option<u32>,
    pub cells: Vec<CellRecord>,
}

/// One non-default cell
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellRecord {
    pub x: i32,
    pub y: i32,
    #[serde(rename = "type")]
    pub kind: MaterialKind,
    #[serde(default = "ambient")]
    pub temperature: f32,
    #[serde(default)]
    pub stable: bool,
    #[serde(default)]
    pub has_support: bool,
    #[serde(default)]
    pub support_stable: bool,
}

fn ambient() -> f32 {
    AMBIENT_TEMPERATURE
}

/// Converts between a grid and its snapshot
pub struct PersistenceSystem;

impl PersistenceSystem {
    /// Sparse listing of every cell that is not default air, row-major
    pub fn snapshot(grid: &Grid) -> WorldSnapshot {
        let cells: Vec<CellRecord> = grid
            .cells()
            .iter()
            .filter(|cell| !cell.is_default())
            .map(|cell| CellRecord {
                x: cell.pos.x,
                y: cell.pos.y,
                kind: cell.kind,
                temperature: (cell.temperature * 10.0).round() / 10.0,
                stable: cell.stable,
                has_support: cell.has_support,
                support_stable: cell.support_stable,
            })
            .collect();

        log::debug!(
            "Serialized {}x{} grid: {} non-default cells",
            grid.width(),
            grid.height(),
            cells.len()
        );

        WorldSnapshot {
            width: grid.width() as u32,
            height: grid.height() as u32,
            cell_size: None,
            cells,
        }
    }

    /// Replace the grid's contents with the snapshot.
    ///
    /// Every cell is reset to air and the active set is cleared first, then
    /// the records are replayed. Only the 3x3 neighbourhoods of applied
    /// records end up active; cells active before the load are not.
    /// Records outside the grid are skipped. Returns how many records were
    /// applied.
    pub fn restore(grid: &mut Grid, snapshot: &WorldSnapshot) -> Result<usize, SnapshotError> {
        let (width, height) = (grid.width() as u32, grid.height() as u32);
        if snapshot.width != width || snapshot.height != height {
            log::warn!(
                "Snapshot dimensions {}x{} do not match world {}x{}",
                snapshot.width,
                snapshot.height,
                width,
                height
            );
            return Err(SnapshotError::DimensionMismatch {
                expected_width: width,
                expected_height: height,
                width: snapshot.width,
                height: snapshot.height,
            });
        }

        grid.reset();

        let mut applied = 0;
        for record in &snapshot.cells {
            let Some(cell) = grid.get_cell_mut(record.x, record.y) else {
                log::debug!("Skipping out-of-bounds record at ({}, {})", record.x, record.y);
                continue;
            };

            cell.kind = record.kind;
            cell.temperature = record.temperature;
            cell.stable = record.stable;
            cell.has_support = record.has_support;
            cell.support_stable = record.support_stable;

            grid.mark_active(record.x, record.y);
            applied += 1;
        }

        grid.mark_stability_dirty();

        log::info!(
            "Restored {}x{} grid from snapshot ({} cells)",
            width,
            height,
            applied
        );
        Ok(applied)
    }

    pub fn to_json(snapshot: &WorldSnapshot) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(snapshot)?)
    }

    pub fn from_json(json: &str) -> Result<WorldSnapshot, SnapshotError> {
        serde_json::from_str(json).map_err(|e| {
            log::warn!("Failed to parse snapshot: {}", e);
            SnapshotError::from(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_is_sparse() {
        let mut grid = Grid::new(8, 8);
        grid.set_cell(1, 7, MaterialKind::Stone);
        grid.set_support(4, 4, true);
        grid.get_cell_mut(6, 6).unwrap().temperature = 35.0;

        let snapshot = PersistenceSystem::snapshot(&grid);

        assert_eq!(snapshot.width, 8);
        assert_eq!(snapshot.height, 8);
        let coords: Vec<_> = snapshot.cells.iter().map(|r| (r.x, r.y)).collect();
        assert_eq!(coords, vec![(4, 4), (6, 6), (1, 7)]);
    }

    #[test]
    fn test_temperature_rounded_to_one_decimal() {
        let mut grid = Grid::new(4, 4);
        grid.set_cell(0, 0, MaterialKind::Lava);
        grid.get_cell_mut(0, 0).unwrap().temperature = 812.347;

        let snapshot = PersistenceSystem::snapshot(&grid);
        assert!((snapshot.cells[0].temperature - 812.3).abs() < 1e-3);
    }

    #[test]
    fn test_json_field_names() {
        let mut grid = Grid::new(4, 4);
        grid.set_cell(2, 3, MaterialKind::IronOre);
        grid.set_support(2, 3, true);

        let json = PersistenceSystem::to_json(&PersistenceSystem::snapshot(&grid)).unwrap();

        assert!(json.contains(r#""type":"iron_ore""#));
        assert!(json.contains(r#""hasSupport":true"#));
        assert!(json.contains(r#""supportStable":false"#));
        assert!(!json.contains("cellSize"));
    }

    #[test]
    fn test_missing_fields_default() {
        let snapshot = PersistenceSystem::from_json(
            r#"{"width":4,"height":4,"cellSize":4,"cells":[{"x":1,"y":2,"type":"sand"}]}"#,
        )
        .unwrap();

        assert_eq!(snapshot.cell_size, Some(4));
        let record = &snapshot.cells[0];
        assert_eq!(record.kind, MaterialKind::Sand);
        assert_eq!(record.temperature, AMBIENT_TEMPERATURE);
        assert!(!record.stable);
        assert!(!record.has_support);
    }

    #[test]
    fn test_unknown_material_is_rejected() {
        let result = PersistenceSystem::from_json(
            r#"{"width":4,"height":4,"cells":[{"x":1,"y":2,"type":"unobtainium"}]}"#,
        );
        assert!(matches!(result, Err(SnapshotError::Json(_))));
    }

    #[test]
    fn test_restore_replays_records() {
        let mut source = Grid::new(6, 6);
        source.set_cell(1, 5, MaterialKind::Water);
        source.set_cell(3, 5, MaterialKind::Glass);
        source.set_support(3, 4, true);
        let snapshot = PersistenceSystem::snapshot(&source);

        let mut target = Grid::new(6, 6);
        target.set_cell(0, 0, MaterialKind::Sand);
        target.clear_stability_dirty();

        let applied = PersistenceSystem::restore(&mut target, &snapshot).unwrap();

        assert_eq!(applied, 3);
        assert_eq!(target.kind_at(0, 0), Some(MaterialKind::Air));
        assert_eq!(target.kind_at(1, 5), Some(MaterialKind::Water));
        assert_eq!(target.kind_at(3, 5), Some(MaterialKind::Glass));
        assert!(target.get_cell(3, 4).unwrap().has_support);
        assert!(target.is_active(1, 5));
        assert!(!target.is_active(0, 0));
        assert!(!target.is_active(1, 1));
        assert_eq!(target.active_cell_count(), 13);
        assert!(target.is_stability_dirty());
    }

    #[test]
    fn test_restore_skips_out_of_bounds_records() {
        let mut grid = Grid::new(4, 4);
        let snapshot = WorldSnapshot {
            width: 4,
            height: 4,
            cell_size: None,
            cells: vec![
                CellRecord {
                    x: -1,
                    y: 0,
                    kind: MaterialKind::Stone,
                    temperature: AMBIENT_TEMPERATURE,
                    stable: false,
                    has_support: false,
                    support_stable: false,
                },
                CellRecord {
                    x: 3,
                    y: 3,
                    kind: MaterialKind::Stone,
                    temperature: AMBIENT_TEMPERATURE,
                    stable: true,
                    has_support: false,
                    support_stable: false,
                },
            ],
        };

        assert_eq!(PersistenceSystem::restore(&mut grid, &snapshot).unwrap(), 1);
        assert_eq!(grid.kind_at(3, 3), Some(MaterialKind::Stone));
    }

    #[test]
    fn test_dimension_mismatch_leaves_grid_untouched() {
        let mut grid = Grid::new(5, 5);
        grid.set_cell(2, 2, MaterialKind::Coal);
        let before = grid.cells().to_vec();

        let snapshot = WorldSnapshot {
            width: 6,
            height: 5,
            cell_size: None,
            cells: Vec::new(),
        };
        let err = PersistenceSystem::restore(&mut grid, &snapshot).unwrap_err();

        assert!(matches!(
            err,
            SnapshotError::DimensionMismatch {
                expected_width: 5,
                width: 6,
                ..
            }
        ));
        assert_eq!(grid.cells(), &before[..]);
    }
}
