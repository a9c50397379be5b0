use crate::error::{SolveResult, SolverError};
use crate::prelude_crate::*;

// -------------------------------------------------------------- STRUCT: TridiagonalSystem

/// Coefficients of a tridiagonal linear system A x = d.
///
/// `a` is the sub-diagonal (`a[0]` unused), `b` the main diagonal, `c` the
/// super-diagonal (`c[n - 1]` unused) and `d` the right-hand side. The
/// assembly sweeps fill rows cell by cell; `solve` runs the Thomas algorithm.
#[derive(Debug, Clone)]
pub struct TridiagonalSystem {
    pub a: Vec<Float>,
    pub b: Vec<Float>,
    pub c: Vec<Float>,
    pub d: Vec<Float>,
}

impl TridiagonalSystem {
    pub fn with_len(n: usize) -> Self {
        TridiagonalSystem {
            a: vec![0.0; n],
            b: vec![0.0; n],
            c: vec![0.0; n],
            d: vec![0.0; n],
        }
    }

    pub fn len(&self) -> usize {
        self.b.len()
    }

    pub fn is_empty(&self) -> bool {
        self.b.is_empty()
    }

    pub fn set_row(&mut self, i: usize, a: Float, b: Float, c: Float, d: Float) {
        self.a[i] = a;
        self.b[i] = b;
        self.c[i] = c;
        self.d[i] = d;
    }

    /// Thomas algorithm: forward elimination followed by back substitution.
    ///
    /// The system must be diagonally dominant in practice; there is no
    /// pivoting. A pivot that rounds to zero fails with
    /// [`SolverError::NumericalBreakdown`].
    pub fn solve(&self) -> SolveResult<Vec<Float>> {
        let n = self.len();
        assert!(n > 0, "empty tridiagonal system");
        assert!(self.a.len() == n && self.c.len() == n && self.d.len() == n);

        let mut c_star = vec![0.0; n];
        let mut d_star = vec![0.0; n];

        if self.b[0] == 0.0 {
            return Err(SolverError::NumericalBreakdown { row: 0 });
        }
        c_star[0] = self.c[0] / self.b[0];
        d_star[0] = self.d[0] / self.b[0];

        for i in 1..n {
            let m = self.b[i] - self.a[i] * c_star[i - 1];
            if m == 0.0 {
                return Err(SolverError::NumericalBreakdown { row: i });
            }
            c_star[i] = self.c[i] / m;
            d_star[i] = (self.d[i] - self.a[i] * d_star[i - 1]) / m;
        }

        let mut x = vec![0.0; n];
        x[n - 1] = d_star[n - 1];
        for i in (0..n - 1).rev() {
            x[i] = d_star[i] - c_star[i] * x[i + 1];
        }

        Ok(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    fn reconstruct_rhs(sys: &TridiagonalSystem, x: &[Float]) -> Vec<Float> {
        let n = sys.len();
        (0..n)
            .map(|i| {
                let mut row = sys.b[i] * x[i];
                if i > 0 {
                    row += sys.a[i] * x[i - 1];
                }
                if i < n - 1 {
                    row += sys.c[i] * x[i + 1];
                }
                row
            })
            .collect()
    }

    #[test]
    fn identity_system_returns_rhs() {
        let mut sys = TridiagonalSystem::with_len(5);
        for i in 0..5 {
            sys.set_row(i, 0.0, 1.0, 0.0, (i + 1) as Float);
        }
        let x = sys.solve().unwrap();
        for (i, x_i) in x.iter().enumerate() {
            assert!((x_i - (i + 1) as Float).abs() < 1e-12);
        }
    }

    #[test]
    fn laplacian_system_satisfies_residual() {
        let mut sys = TridiagonalSystem::with_len(4);
        sys.set_row(0, 0.0, 2.0, -1.0, 1.0);
        sys.set_row(1, -1.0, 2.0, -1.0, 0.0);
        sys.set_row(2, -1.0, 2.0, -1.0, 0.0);
        sys.set_row(3, -1.0, 2.0, 0.0, 1.0);

        let x = sys.solve().unwrap();
        let rhs = reconstruct_rhs(&sys, &x);
        for (lhs, d) in rhs.iter().zip(sys.d.iter()) {
            assert!((lhs - d).abs() < 1e-10);
        }
    }

    #[test]
    fn random_dominant_systems_round_trip() {
        let n = 100;
        let mut rng = rand::rng();
        for _ in 0..1000 {
            let mut sys = TridiagonalSystem::with_len(n);
            for i in 0..n {
                let a = if i > 0 { rng.random_range(-1.0..1.0) } else { 0.0 };
                let c = if i < n - 1 { rng.random_range(-1.0..1.0) } else { 0.0 };
                let b = rng.random_range(10.0..20.0);
                let d = rng.random_range(-1.0..1.0);
                sys.set_row(i, a, b, c, d);
            }
            let x = sys.solve().unwrap();
            let rhs = reconstruct_rhs(&sys, &x);
            for (lhs, d) in rhs.iter().zip(sys.d.iter()) {
                let scale = d.abs().max(1.0);
                assert!((lhs - d).abs() / scale < 1e-10);
            }
        }
    }

    #[test]
    fn vanishing_pivot_is_a_breakdown() {
        let mut sys = TridiagonalSystem::with_len(2);
        // second pivot: b[1] - a[1] * c[0] / b[0] = 1 - 1 = 0
        sys.set_row(0, 0.0, 1.0, 1.0, 1.0);
        sys.set_row(1, 1.0, 1.0, 0.0, 1.0);

        let err = sys.solve().unwrap_err();
        assert!(matches!(
            err,
            crate::error::SolverError::NumericalBreakdown { row: 1 }
        ));
    }

    #[test]
    fn zero_leading_diagonal_is_a_breakdown() {
        let mut sys = TridiagonalSystem::with_len(3);
        sys.set_row(0, 0.0, 0.0, 1.0, 1.0);
        sys.set_row(1, 1.0, 2.0, 1.0, 1.0);
        sys.set_row(2, 1.0, 2.0, 0.0, 1.0);

        assert!(sys.solve().is_err());
    }
}
