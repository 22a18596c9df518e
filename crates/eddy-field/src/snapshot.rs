//! Immutable density snapshots for observer egress.

use eddy_core::{GridGenerationId, TickId};

/// A full, immutable copy of the density field at one tick.
///
/// Snapshots are what leave the simulation: every response to an
/// external request is a complete grid, never a delta. The copy is
/// detached from the live grid, so an in-progress tick can never tear
/// an observer's view.
#[derive(Clone, Debug, PartialEq)]
pub struct DensitySnapshot {
    tick: TickId,
    generation: GridGenerationId,
    size: u32,
    cells: Vec<f32>,
}

impl DensitySnapshot {
    /// Assemble a snapshot from a row-major cell buffer.
    ///
    /// `cells.len()` must equal `size * size`; the grid that produces
    /// snapshots upholds this.
    pub(crate) fn new(
        tick: TickId,
        generation: GridGenerationId,
        size: u32,
        cells: Vec<f32>,
    ) -> Self {
        debug_assert_eq!(cells.len(), (size as usize) * (size as usize));
        Self {
            tick,
            generation,
            size,
            cells,
        }
    }

    /// The tick that produced this snapshot.
    pub fn tick(&self) -> TickId {
        self.tick
    }

    /// The grid incarnation this snapshot was taken from.
    pub fn generation(&self) -> GridGenerationId {
        self.generation
    }

    /// Grid edge length.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Density at cell `(x, y)`, or `None` out of range.
    pub fn get(&self, x: i32, y: i32) -> Option<f32> {
        let n = self.size as i32;
        if x < 0 || x >= n || y < 0 || y >= n {
            return None;
        }
        Some(self.cells[(x as usize) * (self.size as usize) + (y as usize)])
    }

    /// The full field as a flat row-major slice.
    pub fn as_slice(&self) -> &[f32] {
        &self.cells
    }

    /// The field as nested row-major rows — the wire shape for
    /// transports that emit the density matrix as nested sequences.
    pub fn to_rows(&self) -> Vec<Vec<f32>> {
        let n = self.size as usize;
        self.cells.chunks(n).map(|row| row.to_vec()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot_3x3() -> DensitySnapshot {
        let cells: Vec<f32> = (0..9).map(|i| i as f32).collect();
        DensitySnapshot::new(TickId(4), GridGenerationId(2), 3, cells)
    }

    #[test]
    fn get_is_row_major() {
        let snap = snapshot_3x3();
        assert_eq!(snap.get(0, 0), Some(0.0));
        assert_eq!(snap.get(0, 2), Some(2.0));
        assert_eq!(snap.get(1, 0), Some(3.0));
        assert_eq!(snap.get(2, 2), Some(8.0));
    }

    #[test]
    fn get_out_of_range_is_none() {
        let snap = snapshot_3x3();
        assert_eq!(snap.get(-1, 0), None);
        assert_eq!(snap.get(3, 0), None);
        assert_eq!(snap.get(0, 3), None);
    }

    #[test]
    fn to_rows_round_trips_the_buffer() {
        let snap = snapshot_3x3();
        let rows = snap.to_rows();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], vec![0.0, 1.0, 2.0]);
        assert_eq!(rows[2], vec![6.0, 7.0, 8.0]);
        let flat: Vec<f32> = rows.into_iter().flatten().collect();
        assert_eq!(&flat[..], snap.as_slice());
    }

    #[test]
    fn metadata_is_preserved() {
        let snap = snapshot_3x3();
        assert_eq!(snap.tick(), TickId(4));
        assert_eq!(snap.generation(), GridGenerationId(2));
        assert_eq!(snap.size(), 3);
        assert_eq!(snap.cell_count(), 9);
    }
}
