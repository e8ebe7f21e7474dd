use crate::{write_case, BoundarySearch, Oracle, Result};
use colored::Colorize;
use rand::Rng;
use serde::Serialize;
use std::{
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub solver: String,
    pub num_vars: u32,
    pub cases: Vec<CaseReport>,
}

/// One generated boundary pair
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseReport {
    pub index: usize,
    pub sat: PathBuf,
    pub unsat: PathBuf,
    /// Clause count of the satisfiable file; the unsatisfiable one has one more
    pub last_sat_clauses: usize,
    pub oracle_calls: usize,
    pub elapsed: Duration,
}

/// Generate `num_cases` boundary pairs into `out_dir`, reporting progress on stderr
pub fn generate<O, R>(
    oracle: &mut O,
    search: &BoundarySearch,
    num_cases: usize,
    out_dir: &Path,
    rng: &mut R,
) -> Result<Report>
where
    O: Oracle + ?Sized,
    R: Rng + ?Sized,
{
    let mut cases = Vec::with_capacity(num_cases);
    for index in 0..num_cases {
        eprintln!(
            "{:>12} case #{index} ({}/{num_cases}) [n = {}, solver = {}]",
            "Generating".bold().blue(),
            index + 1,
            search.num_vars(),
            oracle.name()
        );
        let start = Instant::now();
        let pair = search.run(oracle, rng)?;
        let elapsed = start.elapsed();
        eprintln!(
            "{:>12} {} SAT / {} UNSAT clauses ({} oracle calls in {:?})",
            "Boundary".bold().green(),
            pair.last_sat.num_clauses(),
            pair.first_unsat.num_clauses(),
            pair.oracle_calls,
            elapsed
        );

        let (sat, unsat) = write_case(out_dir, index, &pair)?;
        eprintln!(
            "{:>12} {} {}",
            "Wrote".bold().magenta(),
            sat.display(),
            unsat.display()
        );
        cases.push(CaseReport {
            index,
            sat,
            unsat,
            last_sat_clauses: pair.last_sat.num_clauses(),
            oracle_calls: pair.oracle_calls,
            elapsed,
        });
    }

    Ok(Report {
        solver: oracle.name(),
        num_vars: search.num_vars(),
        cases,
    })
}
