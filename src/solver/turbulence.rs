use crate::prelude_crate::*;
use crate::solver::Solver;
use crate::tridiagonal::TridiagonalSystem;
use rayon::prelude::*;

// SST-style model constants.
pub(crate) const SIGMA_K: Float = 0.85;
pub(crate) const SIGMA_OMEGA: Float = 0.5;
pub(crate) const BETA_STAR: Float = 0.09;
pub(crate) const BETA: Float = 0.075;
pub(crate) const ALPHA: Float = 5.0 / 9.0;

impl Solver {
    /// Advances the k and omega transport equations one step and refreshes
    /// the capped eddy viscosity.
    ///
    /// Both equations are implicit tridiagonals with uniform diffusion and a
    /// linear destruction term on the diagonal; boundary rows stay frozen at
    /// the initial free-stream values.
    pub(crate) fn turbulence_update(&mut self) -> SolveResult<()> {
        let n = self.params.cells;
        let dz = self.params.dz();
        let dt = self.params.dt;

        // Shear production from the central strain rate.
        let production: Vec<Float> = (0..n)
            .into_par_iter()
            .map(|i| {
                if i == 0 || i == n - 1 {
                    return 0.0;
                }
                let dudz = (self.u[i + 1] - self.u[i - 1]) / (2.0 * dz);
                self.mu_t[i] * dudz * dudz
            })
            .collect();

        let k_rows: Vec<[Float; 4]> = (1..n - 1)
            .into_par_iter()
            .map(|i| {
                let mu_eff = sodium::vapor::mu(self.t[i]) + self.mu_t[i];
                let diff = mu_eff / (SIGMA_K * dz * dz);
                let b = self.rho[i] / dt + 2.0 * diff + BETA_STAR * self.rho[i] * self.omega_turb[i];
                let d = self.rho[i] / dt * self.k_turb[i] + production[i];
                [-diff, b, -diff, d]
            })
            .collect();

        let mut sys = TridiagonalSystem::with_len(n);
        for (offset, row) in k_rows.into_iter().enumerate() {
            sys.set_row(offset + 1, row[0], row[1], row[2], row[3]);
        }
        sys.set_row(0, 0.0, 1.0, 0.0, self.k_turb[0]);
        sys.set_row(n - 1, 0.0, 1.0, 0.0, self.k_turb[n - 1]);
        self.k_turb = sys.solve()?;

        let w_rows: Vec<[Float; 4]> = (1..n - 1)
            .into_par_iter()
            .map(|i| {
                let mu_eff = sodium::vapor::mu(self.t[i]) + self.mu_t[i];
                let diff = mu_eff / (SIGMA_OMEGA * dz * dz);
                let b = self.rho[i] / dt + 2.0 * diff + BETA * self.rho[i] * self.omega_turb[i];
                let d = self.rho[i] / dt * self.omega_turb[i]
                    + ALPHA * (self.omega_turb[i] / self.k_turb[i]) * production[i];
                [-diff, b, -diff, d]
            })
            .collect();

        let mut sys = TridiagonalSystem::with_len(n);
        for (offset, row) in w_rows.into_iter().enumerate() {
            sys.set_row(offset + 1, row[0], row[1], row[2], row[3]);
        }
        sys.set_row(0, 0.0, 1.0, 0.0, self.omega_turb[0]);
        sys.set_row(n - 1, 0.0, 1.0, 0.0, self.omega_turb[n - 1]);
        self.omega_turb = sys.solve()?;

        // Eddy viscosity with the molecular-viscosity cap.
        let (rho, k_turb, omega_turb, t) = (&self.rho, &self.k_turb, &self.omega_turb, &self.t);
        self.mu_t = (0..n)
            .into_par_iter()
            .map(|i| {
                let mu = sodium::vapor::mu(t[i]);
                let mu_t = rho[i] * k_turb[i] / omega_turb[i].max(OMEGA_FLOOR);
                mu_t.min(MU_T_CAP_RATIO * mu)
            })
            .collect();

        Ok(())
    }
}
