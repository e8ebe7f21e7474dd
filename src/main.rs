use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use cnf_boundary::*;
use colored::Colorize;
use rand::{rngs::StdRng, RngCore, SeedableRng};
use std::{
    fs,
    path::{Path, PathBuf},
};

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate pairs of adjacent SAT/UNSAT random formulas
    Generate {
        /// Number of variables
        #[arg(value_parser = clap::value_parser!(u32).range(5..))]
        num_vars: u32,
        /// Number of boundary pairs to generate
        #[arg(value_parser = clap::value_parser!(u64).range(1..))]
        num_cases: u64,
        #[command(flatten)]
        solver: SolverArgs,
        #[arg(long, default_value = "generated")]
        out_dir: PathBuf,
        /// Seed of the random generator, taken from the OS if absent
        #[arg(long)]
        seed: Option<u64>,
        /// Fail once the formula would grow beyond this many clauses
        #[arg(
            long,
            default_value_t = DEFAULT_MAX_CLAUSES as u64,
            value_parser = clap::value_parser!(u64).range(1..)
        )]
        max_clauses: u64,
        /// Write a JSON report of the generated cases
        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// Renumber `*.cnf` files in a directory into `0.cnf, 1.cnf, ...`
    Normalize {
        dir: PathBuf,
        /// Only print the renames
        #[arg(long)]
        dry_run: bool,
    },
    /// Print the verdict of the solver for a DIMACS file
    Check {
        file: PathBuf,
        #[command(flatten)]
        solver: SolverArgs,
    },
}

#[derive(Debug, Args)]
struct SolverArgs {
    /// Solver executable, or `builtin` for the in-process brute force solver
    #[arg(long, default_value = "minisat")]
    solver: String,
    /// Extra argument passed to the solver
    #[arg(long = "solver-arg", allow_hyphen_values = true)]
    solver_args: Vec<String>,
}

impl SolverArgs {
    fn oracle(&self) -> Box<dyn Oracle> {
        if self.solver == "builtin" {
            Box::new(BruteForce)
        } else {
            Box::new(ProcessOracle::new(&self.solver).with_args(&self.solver_args))
        }
    }
}

/// Renames to perform in `dir`, applied unless `dry_run`
fn normalize(dir: &Path, dry_run: bool) -> cnf_boundary::Result<Vec<Rename>> {
    let plan = plan_renames(dir)?;
    if dry_run {
        Ok(plan.into_iter().filter(|r| !r.is_noop()).collect())
    } else {
        apply_renames(dir, &plan)
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Command::Generate {
            num_vars,
            num_cases,
            solver,
            out_dir,
            seed,
            max_clauses,
            report,
        } => {
            let mut oracle = solver.oracle();
            let mut rng: Box<dyn RngCore> = match seed {
                Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
                None => Box::new(rand::rng()),
            };
            let search = BoundarySearch::new(num_vars).max_clauses(max_clauses as usize);
            let result = generate(
                oracle.as_mut(),
                &search,
                num_cases as usize,
                &out_dir,
                &mut rng,
            )?;
            if let Some(path) = report {
                fs::write(&path, serde_json::to_string_pretty(&result)?)
                    .with_context(|| format!("Failed to write report {}", path.display()))?;
            }
        }
        Command::Normalize { dir, dry_run } => {
            let renames = normalize(&dir, dry_run)?;
            for rename in &renames {
                println!("{}", rename);
            }
            eprintln!(
                "{:>12} {} files in {}",
                "Renamed".bold().green(),
                renames.len(),
                dir.display()
            );
        }
        Command::Check { file, solver } => {
            let input = fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let cnf = CNF::from_dimacs(&input)?;
            let verdict = solver.oracle().evaluate(&cnf)?;
            println!("{}", verdict);
        }
    }
    Ok(())
}
