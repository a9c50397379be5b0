use crate::prelude_crate::*;
use crate::solver::{faces, Solver};
use crate::tridiagonal::TridiagonalSystem;
use rayon::prelude::*;

impl Solver {
    /// Implicit energy update: upwind convection, central diffusion, pressure
    /// work, zero-gradient temperature at both ends.
    ///
    /// When the closure is active the conductivity is augmented with the
    /// eddy-viscosity contribution through the turbulent Prandtl number.
    pub(crate) fn energy_solve(&mut self) -> SolveResult<()> {
        let n = self.params.cells;
        let dz = self.params.dz();
        let dt = self.params.dt;
        let rhie_chow = self.params.rhie_chow;
        let turbulence = self.params.turbulence;
        let pr_t = self.params.pr_t;

        let k_eff = |i: usize, cp_i: Float| {
            let k_cond = sodium::vapor::k(self.t[i], self.p[i]);
            if turbulence {
                k_cond + self.mu_t[i] * cp_i / pr_t
            } else {
                k_cond
            }
        };

        let rows: Vec<[Float; 4]> = (1..n - 1)
            .into_par_iter()
            .map(|i| {
                let cp_p = sodium::vapor::cp(self.t[i]);
                let cp_l = sodium::vapor::cp(self.t[i - 1]);
                let cp_r = sodium::vapor::cp(self.t[i + 1]);

                let keff_p = k_eff(i, cp_p);
                let keff_l = k_eff(i - 1, cp_l);
                let keff_r = k_eff(i + 1, cp_r);

                let d_l = 0.5 * (keff_p + keff_l) / dz;
                let d_r = 0.5 * (keff_p + keff_r) / dz;

                let u_l = faces::face_velocity(i - 1, &self.u, &self.b_u, &self.p_pad, dz, rhie_chow);
                let u_r = faces::face_velocity(i, &self.u, &self.b_u, &self.p_pad, dz, rhie_chow);

                let rho_l = faces::upwind(u_l, self.rho[i - 1], self.rho[i]);
                let rho_r = faces::upwind(u_r, self.rho[i], self.rho[i + 1]);

                let cp_w = faces::upwind(u_l, cp_l, cp_p);
                let cp_e = faces::upwind(u_r, cp_p, cp_r);

                let c_l = rho_l * u_l * cp_w;
                let c_r = rho_r * u_r * cp_e;

                let transient = self.rho_old[i] * cp_p * dz / dt;
                let pressure_work = (self.p[i] - self.p_old[i]) / dt;

                let a = -d_l - c_l.max(0.0);
                let c = -d_r + (-c_r).max(0.0);
                let b = (c_r.max(0.0) - (-c_l).max(0.0)) + d_l + d_r + transient;
                let d = transient * self.t_old[i] + pressure_work * dz + self.st[i] * dz;
                [a, b, c, d]
            })
            .collect();

        let mut sys = TridiagonalSystem::with_len(n);
        for (offset, row) in rows.into_iter().enumerate() {
            sys.set_row(offset + 1, row[0], row[1], row[2], row[3]);
        }

        // Zero-gradient temperature at both ends.
        sys.set_row(0, 0.0, 1.0, -1.0, 0.0);
        sys.set_row(n - 1, -1.0, 1.0, 0.0, 0.0);

        self.t = sys.solve()?;
        Ok(())
    }
}
