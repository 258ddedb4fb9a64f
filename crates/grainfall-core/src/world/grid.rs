//! Grid - fixed-size cell arena with active tracking
//!
//! The grid owns every `Cell`. All mutation goes through its methods so the
//! bookkeeping that rides on a change (active marking, stability
//! invalidation) cannot be skipped. Out-of-bounds coordinates are an ordinary
//! outcome: reads return `None`, writes return `false`.

use ahash::AHashSet;
use glam::{IVec2, Vec2};

use crate::simulation::{AMBIENT_TEMPERATURE, Cell, MaterialKind};

/// Orthogonal neighbour offsets in scan order: up, down, left, right
pub(crate) const ORTHOGONAL: [(i32, i32); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

/// Rectangle outside of which non-active cells are not evaluated.
/// Start is inclusive, end is exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UpdateRegion {
    pub start_x: i32,
    pub start_y: i32,
    pub end_x: i32,
    pub end_y: i32,
}

impl UpdateRegion {
    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.start_x && x < self.end_x && y >= self.start_y && y < self.end_y
    }
}

/// Dense 2D cell storage plus the sparse active set
pub struct Grid {
    width: i32,
    height: i32,
    /// Row-major, index = y * width + x
    cells: Vec<Cell>,
    /// Coordinates flagged for evaluation by recent changes
    active: AHashSet<IVec2>,
    update_region: Option<UpdateRegion>,
    /// Structural stability needs a recompute
    stability_dirty: bool,
}

impl Grid {
    /// A grid of air. Dimensions are fixed for the grid's lifetime.
    ///
    /// # Panics
    ///
    /// When `width * height` does not fit in an `i32`. Use [`Grid::try_new`]
    /// to handle that case.
    pub fn new(width: u32, height: u32) -> Self {
        match Self::try_new(width, height) {
            Some(grid) => grid,
            None => panic!("grid of {}x{} cells is too large", width, height),
        }
    }

    /// A grid of air, or `None` when the cell count overflows `i32`.
    /// Coordinates and row-major indices are computed in `i32`.
    pub fn try_new(width: u32, height: u32) -> Option<Self> {
        let width = i32::try_from(width).ok()?;
        let height = i32::try_from(height).ok()?;
        let count = width.checked_mul(height)?;

        let mut cells = Vec::with_capacity(count as usize);
        for y in 0..height {
            for x in 0..width {
                cells.push(Cell::air(IVec2::new(x, y)));
            }
        }

        Some(Self {
            width,
            height,
            cells,
            active: AHashSet::new(),
            update_region: None,
            stability_dirty: true,
        })
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.in_bounds(x, y) {
            Some((y * self.width + x) as usize)
        } else {
            None
        }
    }

    /// Bounds-checked read
    #[inline]
    pub fn get_cell(&self, x: i32, y: i32) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    #[inline]
    pub(crate) fn get_cell_mut(&mut self, x: i32, y: i32) -> Option<&mut Cell> {
        self.index(x, y).map(|i| &mut self.cells[i])
    }

    #[inline]
    pub fn kind_at(&self, x: i32, y: i32) -> Option<MaterialKind> {
        self.get_cell(x, y).map(|c| c.kind)
    }

    /// All cells, row-major
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// Place `kind` at a coordinate.
    ///
    /// Resets temperature, age and stability but keeps the support overlay.
    /// Crossing the air/non-air boundary marks the 3x3 neighbourhood active;
    /// gaining or losing stone-like status dirties stability.
    pub fn set_cell(&mut self, x: i32, y: i32, kind: MaterialKind) -> bool {
        let Some(idx) = self.index(x, y) else {
            return false;
        };

        let cell = &mut self.cells[idx];
        cell.temperature = AMBIENT_TEMPERATURE;
        cell.velocity = Vec2::ZERO;
        cell.conveyor_cooldown = 0;

        if self.replace_kind(idx, kind) {
            self.mark_active(x, y);
        }
        true
    }

    /// Change the occupant's kind as a rule outcome.
    ///
    /// Unlike `set_cell` the temperature is kept, and the neighbourhood is
    /// always marked active.
    pub(crate) fn convert(&mut self, x: i32, y: i32, kind: MaterialKind) -> bool {
        let Some(idx) = self.index(x, y) else {
            return false;
        };
        self.replace_kind(idx, kind);
        self.mark_active(x, y);
        true
    }

    /// `convert`, then pin the temperature
    pub(crate) fn convert_with_temperature(
        &mut self,
        x: i32,
        y: i32,
        kind: MaterialKind,
        temperature: f32,
    ) -> bool {
        if !self.convert(x, y, kind) {
            return false;
        }
        if let Some(cell) = self.get_cell_mut(x, y) {
            cell.temperature = temperature;
        }
        true
    }

    /// Returns whether the air/non-air boundary was crossed
    fn replace_kind(&mut self, idx: usize, kind: MaterialKind) -> bool {
        let cell = &mut self.cells[idx];
        let was_air = cell.is_air();
        let was_stone_like = cell.is_stone_like();

        cell.kind = kind;
        cell.age = 0;
        cell.stable = false;

        let pos = cell.pos;
        if was_stone_like != kind.is_stone_like() {
            self.invalidate_stability_around(pos.x, pos.y);
        }

        was_air != kind.is_air()
    }

    /// Dirty stability and force stone-like 4-neighbours to be re-seeded
    fn invalidate_stability_around(&mut self, x: i32, y: i32) {
        self.stability_dirty = true;
        for (dx, dy) in ORTHOGONAL {
            if let Some(neighbor) = self.get_cell_mut(x + dx, y + dy)
                && neighbor.is_stone_like()
            {
                neighbor.stable = false;
            }
        }
    }

    /// Exchange the occupants of two coordinates.
    ///
    /// Support overlays are bound to coordinates and stay where they are;
    /// everything describing the occupant moves.
    pub fn swap(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) -> bool {
        let (Some(a), Some(b)) = (self.index(x1, y1), self.index(x2, y2)) else {
            return false;
        };

        if a != b {
            let (low, high) = (a.min(b), a.max(b));
            let (head, tail) = self.cells.split_at_mut(high);
            head[low].swap_occupant(&mut tail[0]);
        }

        self.mark_active(x1, y1);
        self.mark_active(x2, y2);

        let (first, second) = (&self.cells[a], &self.cells[b]);
        if first.is_stone_like()
            || second.is_stone_like()
            || first.has_support
            || second.has_support
        {
            self.stability_dirty = true;
        }

        true
    }

    /// Place or remove the support overlay at a coordinate, leaving the occupant alone
    pub fn set_support(&mut self, x: i32, y: i32, has_support: bool) -> bool {
        let Some(cell) = self.get_cell_mut(x, y) else {
            return false;
        };
        cell.has_support = has_support;
        cell.support_stable = false;

        self.stability_dirty = true;
        self.mark_active(x, y);
        true
    }

    /// Move an overlay from one coordinate to another
    pub(crate) fn move_support(&mut self, from_x: i32, from_y: i32, to_x: i32, to_y: i32) -> bool {
        let (Some(from), Some(to)) = (self.index(from_x, from_y), self.index(to_x, to_y)) else {
            return false;
        };

        self.cells[from].has_support = false;
        self.cells[from].support_stable = false;
        self.cells[to].has_support = true;
        self.cells[to].support_stable = false;

        self.mark_active(from_x, from_y);
        self.mark_active(to_x, to_y);
        self.stability_dirty = true;
        true
    }

    /// Flag the 3x3 neighbourhood (clipped to the grid) for evaluation
    pub fn mark_active(&mut self, x: i32, y: i32) {
        for dy in -1..=1 {
            for dx in -1..=1 {
                let (nx, ny) = (x + dx, y + dy);
                if self.in_bounds(nx, ny) {
                    self.active.insert(IVec2::new(nx, ny));
                }
            }
        }
    }

    #[inline]
    pub fn is_active(&self, x: i32, y: i32) -> bool {
        self.active.contains(&IVec2::new(x, y))
    }

    pub fn active_cell_count(&self) -> usize {
        self.active.len()
    }

    pub(crate) fn deactivate(&mut self, x: i32, y: i32) {
        self.active.remove(&IVec2::new(x, y));
    }

    /// Evict `batch` arbitrary entries once the active set grows past `cap`.
    /// Evicted cells that are still busy get re-marked by their next change.
    pub(crate) fn prune_active(&mut self, cap: usize, batch: usize) -> usize {
        if self.active.len() <= cap {
            return 0;
        }

        let evicted: Vec<IVec2> = self.active.iter().take(batch).copied().collect();
        for pos in &evicted {
            self.active.remove(pos);
        }
        evicted.len()
    }

    /// Restrict evaluation of non-active cells to the given rectangle grown by `buffer`
    pub fn set_update_region(
        &mut self,
        start_x: i32,
        start_y: i32,
        end_x: i32,
        end_y: i32,
        buffer: i32,
    ) {
        self.update_region = Some(UpdateRegion {
            start_x: (start_x - buffer).max(0),
            start_y: (start_y - buffer).max(0),
            end_x: (end_x + buffer).min(self.width),
            end_y: (end_y + buffer).min(self.height),
        });
    }

    pub fn clear_update_region(&mut self) {
        self.update_region = None;
    }

    pub fn update_region(&self) -> Option<UpdateRegion> {
        self.update_region
    }

    /// Active cells are always eligible; the rest only inside the update region, if any
    pub fn is_eligible(&self, x: i32, y: i32) -> bool {
        match self.update_region {
            None => true,
            Some(region) => region.contains(x, y) || self.is_active(x, y),
        }
    }

    #[inline]
    pub fn is_stability_dirty(&self) -> bool {
        self.stability_dirty
    }

    pub fn mark_stability_dirty(&mut self) {
        self.stability_dirty = true;
    }

    pub(crate) fn clear_stability_dirty(&mut self) {
        self.stability_dirty = false;
    }

    /// Every cell back to default air and an empty active set
    pub(crate) fn reset(&mut self) {
        for cell in &mut self.cells {
            cell.clear();
        }
        self.active.clear();
    }
}
