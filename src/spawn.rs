//! Jittered grid placement.
//!
//! Neurons are laid out on a near-square grid covering the placement
//! rectangle, one per cell in row-major order, then nudged randomly inside
//! their cell. The grid is centered on the origin in the world XZ plane and
//! the slab depth runs along world Y.

use std::f32::consts::TAU;

use glam::Vec3;

use crate::config::NeuronConfig;
use crate::pose::Pose;
use crate::random::RandomSource;

/// Grid dimensions for a given neuron count and rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    /// Number of cells to fill.
    pub count: usize,
    /// `ceil(sqrt(count))`.
    pub rows: usize,
    /// `ceil(count / rows)`.
    pub columns: usize,
    /// Cell size along the rectangle length (world X).
    pub x_spacing: f32,
    /// Cell size along the rectangle width (world Z).
    pub y_spacing: f32,
}

impl GridLayout {
    /// Compute the grid for `count` neurons over a `length` × `width`
    /// rectangle. A zero count gives an empty grid.
    pub fn for_count(count: usize, length: f32, width: f32) -> Self {
        if count == 0 {
            return Self {
                count: 0,
                rows: 0,
                columns: 0,
                x_spacing: 0.0,
                y_spacing: 0.0,
            };
        }

        let rows = ceil_sqrt(count);
        let columns = count.div_ceil(rows);
        Self {
            count,
            rows,
            columns,
            x_spacing: length / columns as f32,
            y_spacing: width / rows as f32,
        }
    }

    /// Number of cells that stay empty in the last row.
    pub fn unused_cells(&self) -> usize {
        self.rows * self.columns - self.count
    }

    /// `(row, col)` of each filled cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.rows)
            .flat_map(move |row| (0..self.columns).map(move |col| (row, col)))
            .take(self.count)
    }

    /// Unjittered grid coordinate of a cell as `(x, y)` in the rectangle.
    pub fn cell_origin(&self, row: usize, col: usize) -> (f32, f32) {
        let x = (col as f32 - self.columns as f32 / 2.0) * self.x_spacing;
        let y = (row as f32 - self.rows as f32 / 2.0) * self.y_spacing;
        (x, y)
    }

    /// Random pose for every cell.
    ///
    /// Per cell, in this order: jitter in x and y within half a spacing,
    /// depth within `±depth / 2`, a yaw in `[0, 2π)` about the vertical axis,
    /// and a uniform scale in `base_scale ± scale_variation`.
    pub fn scatter<R: RandomSource + ?Sized>(
        &self,
        depth: f32,
        neuron: &NeuronConfig,
        rng: &mut R,
    ) -> Vec<Pose> {
        let mut poses = Vec::with_capacity(self.count);
        for (row, col) in self.cells() {
            let (cx, cy) = self.cell_origin(row, col);
            let x = cx + rng.symmetric(self.x_spacing / 2.0);
            let y = cy + rng.symmetric(self.y_spacing / 2.0);
            let z = rng.symmetric(depth / 2.0);
            let yaw = rng.range(0.0, TAU);
            let scale = rng.range(
                neuron.base_scale - neuron.scale_variation,
                neuron.base_scale + neuron.scale_variation,
            );

            poses.push(Pose::upright(Vec3::new(x, z, y), yaw, scale));
        }
        poses
    }
}

/// Smallest `r` with `r * r >= n`.
fn ceil_sqrt(n: usize) -> usize {
    let mut r = (n as f64).sqrt() as usize;
    while r * r < n {
        r += 1;
    }
    while r > 1 && (r - 1) * (r - 1) >= n {
        r -= 1;
    }
    r
}
