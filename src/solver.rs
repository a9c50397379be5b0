// ------------------------------------------------------------------------------- MODULES

mod energy;
pub(crate) mod faces;
pub(crate) mod io;
mod momentum;
mod pressure;
mod turbulence;

// ------------------------------------------------------------------------------- IMPORTS

use crate::cli::{self, Config};
use crate::prelude_crate::*;
use colored::*;
use faces::PaddedPressure;
use rayon::prelude::*;
use std::process;

// -------------------------------------------------------------------- STRUCT: Parameters

/// Startup-time description of a pipe-flow case.
pub struct Parameters {
    /// Domain length [m]
    pub length: Float,
    /// Number of grid cells
    pub cells: usize,
    /// Pipe diameter, used only for the Reynolds estimate [m]
    pub d_pipe: Float,
    /// Time step [s]
    pub dt: Float,
    /// Simulated interval [s]
    pub t_max: Float,
    /// Outer PISO iteration cap per step
    pub tot_iter: usize,
    /// Corrector passes per predictor call
    pub corr_iter: usize,
    /// Velocity-correction tolerance for PISO convergence
    pub tol: Float,
    /// Gas constant of the vapor [J/(kg*K)]
    pub rv: Float,
    pub u_init: Float,
    pub p_init: Float,
    pub t_init: Float,
    pub u_inlet: Float,
    pub u_outlet: Float,
    pub p_outlet: Float,
    /// Fractions of the domain covered by the source and sink zones
    pub mass_source_zone: Float,
    pub mass_sink_zone: Float,
    /// Mass source magnitude [kg/(m^3*s)]
    pub mass_source_rate: Float,
    pub energy_source_zone: Float,
    pub energy_sink_zone: Float,
    /// Energy source magnitude [W/m^3]
    pub energy_source_rate: Float,
    /// Momentum source magnitude, zoned with the mass zones [N/m^3]
    pub momentum_source_rate: Float,
    /// Rhie-Chow face-flux correction toggle
    pub rhie_chow: bool,
    /// k-omega closure toggle
    pub turbulence: bool,
    /// Turbulence intensity used for the initial k and omega
    pub turb_intensity: Float,
    /// Turbulent Prandtl number
    pub pr_t: Float,
}

impl Default for Parameters {
    fn default() -> Self {
        Parameters {
            length: 1.0,
            cells: 100,
            d_pipe: 0.1,
            dt: 1e-3,
            t_max: 1.0,
            tot_iter: 200,
            corr_iter: 2,
            tol: 1e-8,
            rv: 361.8,
            u_init: 0.01,
            p_init: 50_000.0,
            t_init: 1000.0,
            u_inlet: 0.0,
            u_outlet: 0.0,
            p_outlet: 50_000.0,
            mass_source_zone: 0.2,
            mass_sink_zone: 0.2,
            mass_source_rate: 0.1,
            energy_source_zone: 0.2,
            energy_sink_zone: 0.2,
            energy_source_rate: 500_000.0,
            momentum_source_rate: 0.0,
            rhie_chow: true,
            turbulence: false,
            turb_intensity: 0.05,
            pr_t: 0.01,
        }
    }
}

impl Parameters {
    pub fn dz(&self) -> Float {
        self.length / self.cells as Float
    }

    pub fn steps(&self) -> usize {
        (self.t_max / self.dt).round() as usize
    }
}

// ------------------------------------------------------------------------ STRUCT: Solver

/// Owner of all field arrays and the per-step driver.
///
/// Components receive read-only views of the current state; assembly sweeps
/// collect coefficient rows with a deterministic barrier before the
/// sequential tridiagonal solve.
pub struct Solver {
    params: Parameters,
    config: Config,
    u: Vec<Float>,
    p: Vec<Float>,
    /// Temperature [K]
    t: Vec<Float>,
    rho: Vec<Float>,
    t_old: Vec<Float>,
    rho_old: Vec<Float>,
    p_old: Vec<Float>,
    sm: Vec<Float>,
    su: Vec<Float>,
    st: Vec<Float>,
    k_turb: Vec<Float>,
    omega_turb: Vec<Float>,
    mu_t: Vec<Float>,
    /// Main diagonal of the momentum system, kept for the face stencils
    b_u: Vec<Float>,
    p_pad: PaddedPressure,
    time_step: usize,
    outer_iterations: usize,
    residual: Float,
}

impl Solver {
    pub fn new(config: Config, params: Parameters) -> Self {
        let n = params.cells;
        if n < 4 {
            panic!("grid needs at least 4 cells, got {n}");
        }
        let dz = params.dz();

        let u = vec![params.u_init; n];
        let p = vec![params.p_init; n];
        let t = vec![params.t_init; n];
        let rho_init = (params.p_init / (params.rv * params.t_init.max(T_FLOOR))).max(RHO_FLOOR);
        let rho = vec![rho_init; n];

        let sm = zoned_sources(
            n,
            params.mass_source_zone,
            params.mass_sink_zone,
            params.mass_source_rate,
        );
        let su = zoned_sources(
            n,
            params.mass_source_zone,
            params.mass_sink_zone,
            params.momentum_source_rate,
        );
        let st = zoned_sources(
            n,
            params.energy_source_zone,
            params.energy_sink_zone,
            params.energy_source_rate,
        );

        // Free-stream seed from the intensity and a 0.01 m/s reference
        // velocity scale.
        let k0 = 1.5 * (params.turb_intensity * 0.01).powi(2);
        let l_t = 0.07 * params.length;
        let omega0 = k0.sqrt() / (0.09 * l_t);

        // Seed the momentum diagonal so the first face sweep has a finite
        // 1/b_u before any predictor has run.
        let b_u0 = 2.0 * (4.0 / 3.0 * sodium::vapor::mu(params.t_init) / dz)
            + dz / params.dt * rho_init;

        let p_pad = PaddedPressure::new(&p, params.p_outlet);

        Solver {
            config,
            u,
            p,
            t,
            rho,
            t_old: vec![params.t_init; n],
            rho_old: vec![rho_init; n],
            p_old: vec![params.p_init; n],
            sm,
            su,
            st,
            k_turb: vec![k0; n],
            omega_turb: vec![omega0; n],
            mu_t: vec![0.0; n],
            b_u: vec![b_u0; n],
            p_pad,
            time_step: 0,
            outer_iterations: 0,
            residual: 0.0,
            params,
        }
    }
}

impl Solver {
    pub fn get_velocity(&self) -> &[Float] {
        &self.u
    }

    pub fn get_pressure(&self) -> &[Float] {
        &self.p
    }

    pub fn get_temperature(&self) -> &[Float] {
        &self.t
    }

    pub fn get_density(&self) -> &[Float] {
        &self.rho
    }

    pub fn get_turbulent_viscosity(&self) -> &[Float] {
        &self.mu_t
    }

    pub fn get_time_step(&self) -> usize {
        self.time_step
    }

    /// PISO iterations used by the most recent step.
    pub fn get_outer_iterations(&self) -> usize {
        self.outer_iterations
    }

    /// Largest velocity correction at PISO exit of the most recent step.
    pub fn get_residual(&self) -> Float {
        self.residual
    }

    pub fn get_parameters(&self) -> &Parameters {
        &self.params
    }

    pub fn time(&self) -> Float {
        self.time_step as Float * self.params.dt
    }

    pub fn max_courant(&self) -> Float {
        let max_u = self.u.iter().cloned().fold(Float::NEG_INFINITY, Float::max);
        max_u * self.params.dt / self.params.dz()
    }

    pub fn max_reynolds(&self) -> Float {
        let max_u = self.u.iter().cloned().fold(Float::NEG_INFINITY, Float::max);
        let max_rho = self
            .rho
            .iter()
            .cloned()
            .fold(Float::NEG_INFINITY, Float::max);
        let min_t = self.t.iter().cloned().fold(Float::INFINITY, Float::min);
        max_u * self.params.d_pipe * max_rho / sodium::vapor::mu(min_t)
    }
}

impl Solver {
    /// Ideal-gas density refresh with the temperature and density floors.
    pub(crate) fn eos_refresh(&mut self) {
        let rv = self.params.rv;
        let p = &self.p;
        self.rho
            .par_iter_mut()
            .zip(self.t.par_iter_mut())
            .zip(p.par_iter())
            .for_each(|((rho_i, t_i), p_i)| {
                if *t_i < T_FLOOR {
                    *t_i = T_FLOOR;
                }
                *rho_i = (p_i / (rv * *t_i)).max(RHO_FLOOR);
            });
    }

    /// Advances the solution by one time step.
    pub fn step(&mut self) -> SolveResult<()> {
        self.t_old.copy_from_slice(&self.t);
        self.rho_old.copy_from_slice(&self.rho);
        self.p_old.copy_from_slice(&self.p);

        let (iterations, residual) = self.piso_loop()?;
        self.outer_iterations = iterations;
        self.residual = residual;

        self.eos_refresh();
        if self.params.turbulence {
            self.turbulence_update()?;
        }
        self.energy_solve()?;
        self.eos_refresh();

        self.time_step += 1;
        Ok(())
    }

    /// Runs the configured number of steps and writes the final profiles.
    pub fn run(&mut self) -> SolveResult<()> {
        let steps = self
            .config
            .get_max_steps()
            .unwrap_or_else(|| self.params.steps());
        for _ in 0..steps {
            self.print_progress();
            self.step()?;
        }
        self.write_profiles(self.config.get_output())?;
        Ok(())
    }
}

// ----------------------------------------------------------------------------- FUNCTIONS

/// Zoning rule shared by every source field: the first `floor(N * source)`
/// interior cells carry `+rate`, the last `floor(N * sink)` interior cells
/// carry `-rate`. The edge cells hold boundary conditions, never sources.
fn zoned_sources(n: usize, source_zone: Float, sink_zone: Float, rate: Float) -> Vec<Float> {
    let source_cells = (n as Float * source_zone).floor() as usize;
    let sink_cells = (n as Float * sink_zone).floor() as usize;
    let mut field = vec![0.0; n];
    for (i, value) in field.iter_mut().enumerate().take(n - 1).skip(1) {
        if i <= source_cells {
            *value = rate;
        } else if i >= n - sink_cells {
            *value = -rate;
        }
    }
    field
}

/// Parses the command line, sizes the thread pool and runs the case to
/// completion. Fatal numerical or I/O errors terminate the process with a
/// nonzero exit code.
pub fn solve(params: Parameters) {
    let config = match cli::get_args().and_then(|matches| cli::parse_matches(&matches)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    cli::init_global_pool(config.get_number_of_threads());

    match config.mode {
        cli::Mode::Run => {
            let mut solver = Solver::new(config, params);
            if let Err(e) = solver.run() {
                eprintln!("{} {e}", "error:".red().bold());
                process::exit(1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiescent_parameters() -> Parameters {
        Parameters {
            u_init: 0.0,
            mass_source_rate: 0.0,
            energy_source_rate: 0.0,
            ..Parameters::default()
        }
    }

    fn solver_with(params: Parameters) -> Solver {
        Solver::new(Config::default(), params)
    }

    #[test]
    fn quiescent_state_is_preserved() {
        let mut solver = solver_with(quiescent_parameters());
        for _ in 0..10 {
            solver.step().unwrap();
        }
        for i in 0..100 {
            assert!(solver.u[i].abs() <= 1e-10, "u[{i}] = {}", solver.u[i]);
            assert!((solver.p[i] - 50_000.0).abs() <= 1.0, "p[{i}] = {}", solver.p[i]);
            assert!((solver.t[i] - 1000.0).abs() <= 1e-8, "T[{i}] = {}", solver.t[i]);
        }
    }

    #[test]
    fn uniform_flow_is_preserved() {
        let mut solver = solver_with(Parameters {
            u_init: 0.4,
            u_inlet: 0.4,
            u_outlet: 0.4,
            mass_source_rate: 0.0,
            energy_source_rate: 0.0,
            ..Parameters::default()
        });
        for _ in 0..10 {
            solver.step().unwrap();
        }
        for i in 0..100 {
            assert!((solver.u[i] - 0.4).abs() <= 1e-8, "u[{i}] = {}", solver.u[i]);
        }
    }

    #[test]
    fn dirichlet_velocities_hold_after_piso() {
        let mut solver = solver_with(Parameters {
            u_init: 0.0,
            ..Parameters::default()
        });
        for _ in 0..5 {
            solver.step().unwrap();
        }
        assert_eq!(solver.u[0], 0.0);
        assert_eq!(solver.u[99], 0.0);
    }

    #[test]
    fn padded_buffer_tracks_ghost_semantics() {
        let mut solver = solver_with(Parameters::default());
        for _ in 0..3 {
            solver.step().unwrap();
        }
        let n = solver.params.cells;
        assert_eq!(solver.p_pad.at(-1), solver.p[0]);
        assert_eq!(solver.p_pad.at(n as isize), solver.params.p_outlet);
    }

    #[test]
    fn density_matches_the_equation_of_state() {
        let mut solver = solver_with(Parameters::default());
        for _ in 0..3 {
            solver.step().unwrap();
        }
        for i in 0..solver.params.cells {
            assert!(solver.t[i] >= T_FLOOR);
            assert!(solver.rho[i] >= RHO_FLOOR);
            let eos = solver.p[i] / (solver.params.rv * solver.t[i].max(T_FLOOR));
            if eos > RHO_FLOOR {
                assert!((solver.rho[i] - eos).abs() <= 1e-12);
            }
        }
    }

    #[test]
    fn source_sink_zoning_drives_midplane_flow() {
        let mut solver = solver_with(Parameters {
            u_init: 0.0,
            ..Parameters::default()
        });
        for _ in 0..100 {
            solver.step().unwrap();
            assert!(
                solver.get_outer_iterations() <= 50,
                "PISO used {} iterations at step {}",
                solver.get_outer_iterations(),
                solver.get_time_step()
            );
            assert!(solver.get_residual() <= 1e-8);
        }
        // Mass enters on the left and leaves on the right: the midplane
        // velocity points downstream.
        assert!(solver.u[50] > 0.0, "u[50] = {}", solver.u[50]);
    }

    #[test]
    fn turbulent_viscosity_respects_the_cap() {
        let mut solver = solver_with(Parameters {
            turbulence: true,
            ..Parameters::default()
        });
        for _ in 0..10 {
            solver.step().unwrap();
            for i in 0..solver.params.cells {
                let cap = MU_T_CAP_RATIO * sodium::vapor::mu(solver.t[i]);
                assert!(
                    solver.mu_t[i] <= cap * (1.0 + 1e-9),
                    "mu_t[{i}] = {} above cap {cap}",
                    solver.mu_t[i]
                );
            }
        }
    }

    #[test]
    fn zoning_skips_the_edge_cells() {
        let field = zoned_sources(100, 0.2, 0.2, 0.1);
        assert_eq!(field[0], 0.0);
        assert_eq!(field[99], 0.0);
        assert_eq!(field[1], 0.1);
        assert_eq!(field[20], 0.1);
        assert_eq!(field[21], 0.0);
        assert_eq!(field[79], 0.0);
        assert_eq!(field[80], -0.1);
        assert_eq!(field[98], -0.1);
    }

    #[test]
    fn step_counter_and_time_advance_together() {
        let mut solver = solver_with(quiescent_parameters());
        solver.step().unwrap();
        solver.step().unwrap();
        assert_eq!(solver.get_time_step(), 2);
        assert!((solver.time() - 2e-3).abs() < 1e-15);
    }
}
