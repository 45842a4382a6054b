//! Acceleration grid for neighbor lookups during dart throwing.
use glam::Vec2;

/// Maps each cell to the accepted point stored there, if any.
///
/// Cells are sized so that no two accepted points can share one (the caller
/// derives the cell size from the smallest effective radius), which keeps a
/// single index per cell sufficient. Scratch state: rebuilt fresh for every
/// sampling call, never persisted.
#[derive(Debug)]
pub(crate) struct AccelerationGrid {
    cell_size: f32,
    width: usize,
    height: usize,
    cells: Vec<Option<usize>>,
}

impl AccelerationGrid {
    /// Creates an empty grid covering `[0, extent]` in both axes.
    pub fn new(extent: Vec2, cell_size: f32) -> Self {
        debug_assert!(cell_size > 0.0, "cell_size must be > 0");
        let width = (extent.x.max(0.0) / cell_size).ceil() as usize + 1;
        let height = (extent.y.max(0.0) / cell_size).ceil() as usize + 1;
        Self {
            cell_size,
            width,
            height,
            cells: vec![None; width * height],
        }
    }

    /// Cell coordinates of `point`, clamped to the grid.
    fn cell_of(&self, point: Vec2) -> (usize, usize) {
        let x = ((point.x / self.cell_size).floor() as isize)
            .clamp(0, self.width as isize - 1) as usize;
        let y = ((point.y / self.cell_size).floor() as isize)
            .clamp(0, self.height as isize - 1) as usize;
        (x, y)
    }

    /// Stamps `point`'s cell with the point's index.
    pub fn insert(&mut self, point: Vec2, index: usize) {
        let (x, y) = self.cell_of(point);
        self.cells[y * self.width + x] = Some(index);
    }

    /// Indices of accepted points within `ring` cells of `point`'s cell.
    pub fn occupied_near(
        &self,
        point: Vec2,
        ring: usize,
    ) -> impl Iterator<Item = usize> + '_ {
        let (cx, cy) = self.cell_of(point);
        let x0 = cx.saturating_sub(ring);
        let x1 = (cx + ring).min(self.width - 1);
        let y0 = cy.saturating_sub(ring);
        let y1 = (cy + ring).min(self.height - 1);
        (y0..=y1)
            .flat_map(move |y| (x0..=x1).map(move |x| y * self.width + x))
            .filter_map(move |cell| self.cells[cell])
    }
}
