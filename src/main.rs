use pisoflow::prelude::*;

fn main() {
    // Sodium vapor in a one-metre pipe segment: evaporation zone over the
    // first fifth of the domain, condensation zone over the last fifth.
    let params = Parameters {
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
    };

    solve(params);
}
