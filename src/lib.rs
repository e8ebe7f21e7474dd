//! Generator of SAT/UNSAT boundary instances for SAT solver benchmarks
//!
//! For a fixed number of variables, random 3 to 5 literal clauses are appended
//! until an [Oracle] reports the formula unsatisfiable, and the clause count
//! where satisfiability flips is located by bisection.

mod boundary;
mod brute_force;
mod emit;
mod error;
mod expr;
mod generate;
mod normalize;
mod oracle;

#[cfg(test)]
mod testing;

pub use boundary::*;
pub use brute_force::*;
pub use emit::*;
pub use error::*;
pub use expr::*;
pub use generate::*;
pub use normalize::*;
pub use oracle::*;

use std::{collections::BTreeMap, num::NonZeroU32};

/// Assignment of variables
pub type State = BTreeMap<NonZeroU32, bool>;
