use crate::prelude_crate::*;
use crate::solver::Solver;
use colored::*;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

pub(crate) const PROFILES_FILE: &str = "solution_profiles.txt";

impl Solver {
    /// One console line per step; the column header is reprinted every
    /// hundred steps.
    pub fn print_progress(&self) {
        if self.get_time_step() % PROGRESS_HEADER_EVERY == 0 {
            println!(
                "\n{:>10} {:>12} {:>16} {:>16}\n",
                "step".cyan().bold(),
                "time".cyan().bold(),
                "max_courant".cyan().bold(),
                "max_reynolds".cyan().bold()
            );
        }
        println!(
            "{:>10} {:>12.4e} {:>16.8e} {:>16.8e}",
            self.get_time_step(),
            self.time(),
            self.max_courant(),
            self.max_reynolds()
        );
    }

    /// Writes the final velocity, pressure and temperature profiles as three
    /// comma-separated lines.
    pub fn write_profiles<P>(&self, path: P) -> io::Result<()>
    where
        P: AsRef<Path>,
    {
        println!(
            "\nWriting {}.\n",
            path.as_ref().display().to_string().yellow().bold()
        );
        let mut file = File::create(path)?;
        writeln!(file, "{}", join_profile(self.get_velocity()))?;
        writeln!(file)?;
        writeln!(file, "{}", join_profile(self.get_pressure()))?;
        writeln!(file)?;
        writeln!(file, "{}", join_profile(self.get_temperature()))?;
        Ok(())
    }
}

fn join_profile(values: &[Float]) -> String {
    values
        .iter()
        .map(|value| format!("{value:.8e}"))
        .collect::<Vec<String>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profiles_are_comma_separated() {
        let line = join_profile(&[1.0, 2.5, -3.0]);
        assert_eq!(line.split(", ").count(), 3);
        assert!(line.starts_with("1.0"));
    }
}
