use crate::prelude_crate::*;
use crate::solver::{faces, Solver};
use crate::tridiagonal::TridiagonalSystem;
use rayon::prelude::*;

impl Solver {
    /// Assembles and solves the implicit momentum system for the starred
    /// velocity field.
    ///
    /// Viscous diffusion carries the 4/3 one-dimensional compressible shear
    /// factor; convection is first-order upwind on Rhie-Chow face velocities.
    /// The solved main diagonal replaces `b_u` for the downstream face
    /// stencils; the assembly itself reads the previous diagonal.
    pub(crate) fn momentum_predictor(&mut self) -> SolveResult<()> {
        let n = self.params.cells;
        let dz = self.params.dz();
        let dt = self.params.dt;
        let rhie_chow = self.params.rhie_chow;

        let rows: Vec<[Float; 4]> = (1..n - 1)
            .into_par_iter()
            .map(|i| {
                let mu_p = sodium::vapor::mu(self.t[i]);
                let mu_l = sodium::vapor::mu(self.t[i - 1]);
                let mu_r = sodium::vapor::mu(self.t[i + 1]);

                let d_l = 4.0 / 3.0 * 0.5 * (mu_p + mu_l) / dz;
                let d_r = 4.0 / 3.0 * 0.5 * (mu_p + mu_r) / dz;

                let u_l = faces::face_velocity(i - 1, &self.u, &self.b_u, &self.p_pad, dz, rhie_chow);
                let u_r = faces::face_velocity(i, &self.u, &self.b_u, &self.p_pad, dz, rhie_chow);

                let rho_l = faces::upwind(u_l, self.rho[i - 1], self.rho[i]);
                let rho_r = faces::upwind(u_r, self.rho[i], self.rho[i + 1]);

                let f_l = rho_l * u_l;
                let f_r = rho_r * u_r;

                let a = -f_l.max(0.0) - d_l;
                let c = (-f_r).max(0.0) - d_r;
                let b = (f_r.max(0.0) - (-f_l).max(0.0)) + self.rho[i] * dz / dt + d_l + d_r;
                let d = -0.5 * (self.p[i + 1] - self.p[i - 1])
                    + self.rho[i] * self.u[i] * dz / dt
                    + self.su[i] * dz;
                [a, b, c, d]
            })
            .collect();

        let mut sys = TridiagonalSystem::with_len(n);
        for (offset, row) in rows.into_iter().enumerate() {
            sys.set_row(offset + 1, row[0], row[1], row[2], row[3]);
        }

        // Dirichlet velocity at both ends.
        let d_first = 4.0 / 3.0 * sodium::vapor::mu(self.t[0]) / dz;
        let d_last = 4.0 / 3.0 * sodium::vapor::mu(self.t[n - 1]) / dz;
        let b_first = self.rho[0] * dz / dt + 2.0 * d_first;
        let b_last = self.rho[n - 1] * dz / dt + 2.0 * d_last;
        sys.set_row(0, 0.0, b_first, 0.0, b_first * self.params.u_inlet);
        sys.set_row(n - 1, 0.0, b_last, 0.0, b_last * self.params.u_outlet);

        self.u = sys.solve()?;
        self.b_u = sys.b;
        Ok(())
    }
}
