use crate::prelude_crate::*;

// ------------------------------------------------------------- STRUCT: PaddedPressure

/// Pressure field extended with one ghost cell on each side.
///
/// The left ghost mirrors the first interior value; the right ghost pins the
/// Dirichlet outlet pressure. Signed indexing keeps the 4-point face stencil
/// branch-free at the first and last interior faces.
#[derive(Debug, Clone)]
pub(crate) struct PaddedPressure {
    buf: Vec<Float>,
    p_outlet: Float,
}

impl PaddedPressure {
    pub(crate) fn new(p: &[Float], p_outlet: Float) -> Self {
        let mut padded = PaddedPressure {
            buf: vec![0.0; p.len() + 2],
            p_outlet,
        };
        padded.refresh(p);
        padded
    }

    /// Copies the interior pressures and rebuilds both ghosts.
    pub(crate) fn refresh(&mut self, p: &[Float]) {
        let n = p.len();
        self.buf[1..=n].copy_from_slice(p);
        self.buf[0] = p[0];
        self.buf[n + 1] = self.p_outlet;
    }

    /// Value at cell offset `i`, where -1 is the left ghost and N the right.
    pub(crate) fn at(&self, i: isize) -> Float {
        self.buf[(i + 1) as usize]
    }
}

// ----------------------------------------------------------------------------- FUNCTIONS

/// Fourth-difference pressure smoothing term for the face between cells
/// `f` and `f + 1` (Rhie-Chow), built on the momentum main diagonal.
pub(crate) fn rhie_chow_term(f: usize, b_u: &[Float], p: &PaddedPressure, dz: Float) -> Float {
    let i = f as isize;
    -(1.0 / b_u[f] + 1.0 / b_u[f + 1]) / (8.0 * dz)
        * (p.at(i - 1) - 3.0 * p.at(i) + 3.0 * p.at(i + 1) - p.at(i + 2))
}

/// Interpolated velocity at the face between cells `f` and `f + 1`.
pub(crate) fn face_velocity(
    f: usize,
    u: &[Float],
    b_u: &[Float],
    p: &PaddedPressure,
    dz: Float,
    rhie_chow: bool,
) -> Float {
    let correction = if rhie_chow {
        rhie_chow_term(f, b_u, p, dz)
    } else {
        0.0
    };
    0.5 * (u[f] + u[f + 1]) + correction
}

/// First-order upwind face value on the sign of the face velocity.
pub(crate) fn upwind(u_face: Float, left: Float, right: Float) -> Float {
    if u_face >= 0.0 {
        left
    } else {
        right
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ghosts_mirror_inlet_and_pin_outlet() {
        let p = vec![1.0, 2.0, 3.0, 4.0];
        let padded = PaddedPressure::new(&p, 9.0);
        assert_eq!(padded.at(-1), 1.0);
        assert_eq!(padded.at(0), 1.0);
        assert_eq!(padded.at(3), 4.0);
        assert_eq!(padded.at(4), 9.0);
    }

    #[test]
    fn refresh_tracks_the_field() {
        let mut p = vec![1.0, 2.0, 3.0, 4.0];
        let mut padded = PaddedPressure::new(&p, 9.0);
        p[0] = 5.0;
        p[2] = 7.0;
        padded.refresh(&p);
        assert_eq!(padded.at(-1), 5.0);
        assert_eq!(padded.at(2), 7.0);
        assert_eq!(padded.at(4), 9.0);
    }

    #[test]
    fn smoothing_vanishes_on_linear_pressure() {
        let p: Vec<Float> = (0..8).map(|i| i as Float).collect();
        let padded = PaddedPressure::new(&p, 8.0);
        let b_u = vec![1.0; 8];
        // Interior faces see a pure 4th difference of a linear field.
        for f in 1..6 {
            assert_eq!(rhie_chow_term(f, &b_u, &padded, 0.01), 0.0);
        }
    }

    #[test]
    fn smoothing_opposes_checkerboard_pressure() {
        let p: Vec<Float> = (0..8).map(|i| if i % 2 == 0 { 1.0 } else { -1.0 }).collect();
        let padded = PaddedPressure::new(&p, 1.0);
        let b_u = vec![1.0; 8];
        let dz = 0.01;
        // Face 2 has the high cell on its left: the correction drives flow
        // from high to low pressure, draining the mode.
        assert!(rhie_chow_term(2, &b_u, &padded, dz) > 0.0);
        // Face 3 is the mirrored arrangement.
        assert!(rhie_chow_term(3, &b_u, &padded, dz) < 0.0);
    }

    #[test]
    fn upwind_follows_the_flow_direction() {
        assert_eq!(upwind(1.0, 3.0, 7.0), 3.0);
        assert_eq!(upwind(-1.0, 3.0, 7.0), 7.0);
        assert_eq!(upwind(0.0, 3.0, 7.0), 3.0);
    }

    #[test]
    fn face_velocity_without_correction_is_the_average() {
        let p = vec![1.0; 4];
        let padded = PaddedPressure::new(&p, 1.0);
        let b_u = vec![1.0; 4];
        let u = vec![1.0, 3.0, 5.0, 7.0];
        assert_eq!(face_velocity(1, &u, &b_u, &padded, 0.01, false), 4.0);
        // Uniform pressure makes the corrected value identical.
        assert_eq!(face_velocity(1, &u, &b_u, &padded, 0.01, true), 4.0);
    }
}
