use crate::prelude_crate::*;
use crate::solver::{faces, Solver};
use crate::tridiagonal::TridiagonalSystem;
use rayon::prelude::*;

impl Solver {
    /// One PISO corrector pass.
    ///
    /// Solves the compressible pressure-correction system, applies p' to the
    /// pressure (PISO needs no under-relaxation), rebuilds the padded buffer
    /// and corrects the interior velocities. Returns the largest velocity
    /// change, which drives the outer convergence check.
    pub(crate) fn pressure_corrector(&mut self) -> SolveResult<Float> {
        let n = self.params.cells;
        let dz = self.params.dz();
        let dt = self.params.dt;
        let rv = self.params.rv;
        let rhie_chow = self.params.rhie_chow;

        let rows: Vec<[Float; 4]> = (1..n - 1)
            .into_par_iter()
            .map(|i| {
                // Elliptic face coefficients from the averaged reciprocal
                // momentum diagonal and arithmetic face density.
                let d_w = 0.5 * (1.0 / self.b_u[i - 1] + 1.0 / self.b_u[i]);
                let e_w = 0.5 * (self.rho[i - 1] + self.rho[i]) * d_w / dz;

                let d_e = 0.5 * (1.0 / self.b_u[i] + 1.0 / self.b_u[i + 1]);
                let e_e = 0.5 * (self.rho[i] + self.rho[i + 1]) * d_e / dz;

                // Compressibility of an ideal gas.
                let psi = 1.0 / (rv * self.t[i]);

                // Starred face mass fluxes with upwind density.
                let u_w = faces::face_velocity(i - 1, &self.u, &self.b_u, &self.p_pad, dz, rhie_chow);
                let mdot_w = faces::upwind(u_w, self.rho[i - 1], self.rho[i]) * u_w;

                let u_e = faces::face_velocity(i, &self.u, &self.b_u, &self.p_pad, dz, rhie_chow);
                let mdot_e = faces::upwind(u_e, self.rho[i], self.rho[i + 1]) * u_e;

                let mass_imbalance =
                    (self.rho[i] - self.rho_old[i]) * dz / dt + (mdot_e - mdot_w);

                let a = -e_w;
                let c = -e_e;
                let b = e_w + e_e + psi * dz / dt;
                let d = self.sm[i] * dz - mass_imbalance;
                [a, b, c, d]
            })
            .collect();

        let mut sys = TridiagonalSystem::with_len(n);
        for (offset, row) in rows.into_iter().enumerate() {
            sys.set_row(offset + 1, row[0], row[1], row[2], row[3]);
        }

        // p': zero gradient at the inlet, zero correction at the outlet.
        sys.set_row(0, 0.0, 1.0, -1.0, 0.0);
        sys.set_row(n - 1, 0.0, 1.0, 0.0, 0.0);

        let p_prime = sys.solve()?;

        for (p_i, dp) in self.p.iter_mut().zip(p_prime.iter()) {
            *p_i += dp;
        }
        self.p_pad.refresh(&self.p);

        // Explicit velocity correction on the interior cells.
        let b_u = &self.b_u;
        let max_err = self.u[1..n - 1]
            .par_iter_mut()
            .enumerate()
            .map(|(offset, u_i)| {
                let i = offset + 1;
                let du = (p_prime[i + 1] - p_prime[i - 1]) / (2.0 * dz * b_u[i]);
                *u_i -= du;
                du.abs()
            })
            .reduce(|| 0.0, Float::max);

        Ok(max_err)
    }

    /// Outer PISO loop: predictor plus `corr_iter` corrector passes, repeated
    /// until the velocity correction drops below tolerance or the iteration
    /// cap is reached. Returns the iteration count and the final residual.
    pub(crate) fn piso_loop(&mut self) -> SolveResult<(usize, Float)> {
        let mut max_err = 1.0;
        let mut iter = 0;
        while iter < self.params.tot_iter && max_err > self.params.tol {
            self.momentum_predictor()?;
            for _ in 0..self.params.corr_iter {
                max_err = self.pressure_corrector()?;
            }
            iter += 1;
        }
        Ok((iter, max_err))
    }
}
