use crate::error::SolveResult;
use clap::{Arg, Command};
use std::num::{NonZero, NonZeroUsize};
use std::path::PathBuf;

// ------------------------------------------------------------------------ STRUCT: Config

#[derive(Debug)]
pub struct Config {
    pub mode: Mode,
    pub number_of_threads: NonZeroUsize,
    pub output: Option<PathBuf>,
    pub max_steps: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            mode: Mode::Run,
            number_of_threads: NonZero::new(1).unwrap(),
            output: None,
            max_steps: None,
        }
    }
}

impl Config {
    pub fn get_number_of_threads(&self) -> usize {
        usize::from(self.number_of_threads)
    }

    pub fn get_output(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(crate::solver::io::PROFILES_FILE))
    }

    pub fn get_max_steps(&self) -> Option<usize> {
        self.max_steps
    }
}

#[derive(Debug)]
pub enum Mode {
    Run,
}

// ----------------------------------------------------------------------------- FUNCTIONS

pub fn get_args() -> SolveResult<clap::ArgMatches> {
    let matches = clap::command!()
        .propagate_version(true)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("number_of_threads")
                .short('n')
                .long("num-threads")
                .value_name("NTHREADS")
                .help("The number of threads used (min = 1)")
                .value_parser(clap::value_parser!(NonZeroUsize))
                .default_value("1")
                .global(true),
        )
        .subcommand(
            Command::new("run")
                .about("Run the simulation")
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .value_name("FILE")
                        .help("Path of the final profile file")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("max_steps")
                        .short('m')
                        .long("max-steps")
                        .value_name("STEPS")
                        .help("Override of the number of time steps")
                        .value_parser(clap::value_parser!(usize)),
                ),
        )
        .get_matches();
    Ok(matches)
}

pub fn parse_matches(matches: &clap::ArgMatches) -> SolveResult<Config> {
    let number_of_threads = *matches
        .get_one::<NonZeroUsize>("number_of_threads")
        .expect("Has 1 as default");
    match matches.subcommand() {
        Some(("run", sub_m)) => {
            let config = Config {
                mode: Mode::Run,
                number_of_threads,
                output: sub_m.get_one::<PathBuf>("output").cloned(),
                max_steps: sub_m.get_one::<usize>("max_steps").copied(),
            };
            Ok(config)
        }
        _ => unreachable!("At least one subcommand is required: .subcommand_required(true)"),
    }
}

pub fn init_global_pool(number_of_threads: usize) {
    if let Err(e) = rayon::ThreadPoolBuilder::new()
        .num_threads(number_of_threads)
        .build_global()
    {
        eprintln!("Could not size the global thread pool: {e}");
    }
}
