use crate::{Clause, Literal, Oracle, Result, State, Verdict, CNF};
use std::num::NonZeroU32;

/// In-process oracle by exhaustive splitting on variables
///
/// Exponential in the number of variables, only meant for small instances.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BruteForce;

impl Oracle for BruteForce {
    fn name(&self) -> String {
        "brute_force".to_string()
    }

    fn evaluate(&mut self, cnf: &CNF) -> Result<Verdict> {
        let verdict = if brute_force(cnf).is_some() {
            Verdict::Sat
        } else {
            Verdict::UnSat
        };
        log::debug!("brute_force says {} for {} clauses", verdict, cnf.num_clauses());
        Ok(verdict)
    }
}

/// Smallest variable ID in the remaining clauses
pub fn take_minimal_id(clauses: &[Clause]) -> Option<NonZeroU32> {
    clauses
        .iter()
        .filter_map(|c| c.literals().next().map(|lit| lit.id))
        .min()
}

/// Find a satisfying (partial) assignment; variables not in the returned state are free
pub fn brute_force(input: &CNF) -> Option<State> {
    let mut state = State::default();
    if search(input.clauses().to_vec(), &mut state) {
        Some(state)
    } else {
        None
    }
}

fn search(clauses: Vec<Clause>, state: &mut State) -> bool {
    // Never feasible
    if clauses.iter().any(Clause::is_empty) {
        return false;
    }
    // Already solved
    let Some(fix) = take_minimal_id(&clauses) else {
        return true;
    };
    for value in [true, false] {
        log::trace!("Set x{} = {}", fix, value);
        let lit = Literal::with_polarity(fix, value);
        if search(substitute(&clauses, lit), state) {
            state.insert(fix, value);
            return true;
        }
    }
    false
}

/// Drop clauses satisfied by `lit` and remove its negation from the others
fn substitute(clauses: &[Clause], lit: Literal) -> Vec<Clause> {
    clauses
        .iter()
        .filter(|c| !c.contains(lit))
        .map(|c| {
            let mut c = c.clone();
            c.remove(!lit);
            c
        })
        .collect()
}
