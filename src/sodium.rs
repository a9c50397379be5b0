// ------------------------------------------------------------------------------- MODULES

pub mod liquid;
pub mod vapor;

// ------------------------------------------------------------------------------- IMPORTS

use crate::prelude_crate::*;

/// Linear interpolation in T over a monotone grid, clamped at both ends.
pub(crate) fn interp_table<const N: usize>(
    t_grid: &[Float; N],
    y_grid: &[Float; N],
    t: Float,
) -> Float {
    if t <= t_grid[0] {
        return y_grid[0];
    }
    if t >= t_grid[N - 1] {
        return y_grid[N - 1];
    }
    let i = lower_index(t_grid, t);
    y_grid[i] + (t - t_grid[i]) / (t_grid[i + 1] - t_grid[i]) * (y_grid[i + 1] - y_grid[i])
}

/// Index of the grid interval containing `x`; saturates so `i + 1` stays valid.
pub(crate) fn lower_index<const N: usize>(grid: &[Float; N], x: Float) -> usize {
    let mut i = 0;
    while i + 2 < N && x > grid[i + 1] {
        i += 1;
    }
    i
}

#[cfg(test)]
mod tests {
    use super::*;

    const GRID: [Float; 4] = [100.0, 200.0, 300.0, 400.0];
    const VALS: [Float; 4] = [1.0, 2.0, 4.0, 8.0];

    #[test]
    fn interpolation_hits_grid_points_and_midpoints() {
        assert!((interp_table(&GRID, &VALS, 200.0) - 2.0).abs() < 1e-12);
        assert!((interp_table(&GRID, &VALS, 250.0) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn interpolation_clamps_out_of_range() {
        assert_eq!(interp_table(&GRID, &VALS, 50.0), 1.0);
        assert_eq!(interp_table(&GRID, &VALS, 500.0), 8.0);
    }

    #[test]
    fn lower_index_saturates() {
        assert_eq!(lower_index(&GRID, 50.0), 0);
        assert_eq!(lower_index(&GRID, 250.0), 1);
        assert_eq!(lower_index(&GRID, 400.0), 2);
    }
}
