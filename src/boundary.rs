use crate::{Clause, Error, Literal, Oracle, Result, Verdict, CNF};
use rand::Rng;
use std::{collections::BTreeSet, num::NonZeroU32};

/// Smallest variable count for which clauses of [MAX_CLAUSE_SIZE] distinct variables exist
pub const MIN_VARS: u32 = 5;
pub const MIN_CLAUSE_SIZE: usize = 3;
pub const MAX_CLAUSE_SIZE: usize = 5;
/// Default ceiling of the growth phase
pub const DEFAULT_MAX_CLAUSES: usize = 1 << 20;

/// Random clause of 3 to 5 literals over distinct variables in `1..=num_vars`
pub fn random_clause<R: Rng + ?Sized>(num_vars: u32, rng: &mut R) -> Clause {
    assert!(num_vars >= MIN_VARS, "At least {MIN_VARS} variables required");
    let size = rng.random_range(MIN_CLAUSE_SIZE..=MAX_CLAUSE_SIZE);
    let mut ids = BTreeSet::new();
    while ids.len() < size {
        ids.insert(NonZeroU32::MIN.saturating_add(rng.random_range(0..num_vars)));
    }
    ids.into_iter()
        .map(|id| Literal::with_polarity(id, rng.random_bool(0.5)))
        .collect()
}

/// Two formulas where satisfiability flips
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundaryPair {
    /// Satisfiable prefix, one clause shorter than `first_unsat`
    pub last_sat: CNF,
    pub first_unsat: CNF,
    /// Number of oracle queries spent on the search
    pub oracle_calls: usize,
}

/// Search for the clause count at which a random formula becomes unsatisfiable
///
/// Clauses are appended in batches doubling the formula until the oracle reports
/// UNSAT, then the last doubling is bisected down to adjacent prefixes.
///
/// ```rust
/// use cnf_boundary::{BoundarySearch, BruteForce, Oracle, Verdict};
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let mut rng = StdRng::seed_from_u64(0);
/// let pair = BoundarySearch::new(6).run(&mut BruteForce, &mut rng).unwrap();
/// assert_eq!(pair.last_sat.num_clauses() + 1, pair.first_unsat.num_clauses());
/// assert_eq!(BruteForce.evaluate(&pair.last_sat).unwrap(), Verdict::Sat);
/// assert_eq!(BruteForce.evaluate(&pair.first_unsat).unwrap(), Verdict::UnSat);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundarySearch {
    num_vars: u32,
    max_clauses: usize,
}

impl BoundarySearch {
    pub fn new(num_vars: u32) -> Self {
        assert!(num_vars >= MIN_VARS, "At least {MIN_VARS} variables required");
        Self {
            num_vars,
            max_clauses: DEFAULT_MAX_CLAUSES,
        }
    }

    /// Give up with [Error::GenerationExhausted] instead of growing beyond `max_clauses`
    pub fn max_clauses(mut self, max_clauses: usize) -> Self {
        assert!(max_clauses >= 1, "Ceiling must allow the initial clause");
        self.max_clauses = max_clauses;
        self
    }

    pub fn num_vars(&self) -> u32 {
        self.num_vars
    }

    pub fn run<O, R>(&self, oracle: &mut O, rng: &mut R) -> Result<BoundaryPair>
    where
        O: Oracle + ?Sized,
        R: Rng + ?Sized,
    {
        let mut oracle = Counting::new(oracle);
        let mut cnf = CNF::new(self.num_vars);
        cnf.push(random_clause(self.num_vars, rng));

        while oracle.evaluate(&cnf)?.is_sat() {
            let len = cnf.num_clauses();
            if len.saturating_mul(2) > self.max_clauses {
                return Err(Error::GenerationExhausted {
                    max_clauses: self.max_clauses,
                });
            }
            for _ in 0..len {
                cnf.push(random_clause(self.num_vars, rng));
            }
            log::debug!("Grown to {} clauses", cnf.num_clauses());
        }

        // The previous length was SAT, or is the empty formula
        let mut right = cnf.num_clauses();
        let mut left = right / 2;
        while right - left > 1 {
            let mid = left + (right - left) / 2;
            match oracle.evaluate(&cnf.prefix(mid))? {
                Verdict::Sat => left = mid,
                Verdict::UnSat => right = mid,
            }
            log::trace!("Bisect [{left}, {right}]");
        }
        log::debug!(
            "Boundary at {left}/{right} clauses after {} oracle calls",
            oracle.calls
        );

        Ok(BoundaryPair {
            last_sat: cnf.prefix(left),
            first_unsat: cnf.prefix(right),
            oracle_calls: oracle.calls,
        })
    }
}

struct Counting<'a, O: ?Sized> {
    inner: &'a mut O,
    calls: usize,
}

impl<'a, O: Oracle + ?Sized> Counting<'a, O> {
    fn new(inner: &'a mut O) -> Self {
        Self { inner, calls: 0 }
    }

    fn evaluate(&mut self, cnf: &CNF) -> Result<Verdict> {
        self.calls += 1;
        self.inner.evaluate(cnf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        testing::{Scripted, Threshold},
        BruteForce,
    };
    use proptest::prelude::*;
    use rand::{rngs::StdRng, SeedableRng};

    proptest! {
        #[test]
        fn test_random_clause(seed: u64, num_vars in MIN_VARS..200) {
            let mut rng = StdRng::seed_from_u64(seed);
            for _ in 0..20 {
                let clause = random_clause(num_vars, &mut rng);
                prop_assert!((MIN_CLAUSE_SIZE..=MAX_CLAUSE_SIZE).contains(&clause.num_literals()));
                // distinct magnitudes
                prop_assert_eq!(clause.supp().len(), clause.num_literals());
                for lit in clause.literals() {
                    prop_assert!(lit.id.get() <= num_vars);
                }
            }
        }

        #[test]
        fn test_threshold_boundary(unsat_from in 1..5000usize, seed: u64) {
            let mut oracle = Threshold::new(unsat_from);
            let mut rng = StdRng::seed_from_u64(seed);
            let pair = BoundarySearch::new(5).run(&mut oracle, &mut rng).unwrap();
            prop_assert_eq!(pair.last_sat.num_clauses(), unsat_from - 1);
            prop_assert_eq!(pair.first_unsat.num_clauses(), unsat_from);
            prop_assert_eq!(pair.first_unsat.prefix(unsat_from - 1), pair.last_sat.clone());
            prop_assert_eq!(pair.oracle_calls, oracle.calls.len());
        }
    }

    #[test]
    fn test_query_sequence() {
        let mut oracle = Threshold::new(6);
        let mut rng = StdRng::seed_from_u64(1);
        let pair = BoundarySearch::new(10).run(&mut oracle, &mut rng).unwrap();
        // growth 1, 2, 4, 8 then bisection of [4, 8]
        assert_eq!(oracle.calls, vec![1, 2, 4, 8, 6, 5]);
        assert_eq!(pair.last_sat.num_clauses(), 5);
        assert_eq!(pair.oracle_calls, 6);
    }

    #[test]
    fn test_unsat_single_clause() {
        // Cannot happen with a real solver, but reduces to the empty formula
        let mut oracle = Threshold::new(1);
        let mut rng = StdRng::seed_from_u64(2);
        let pair = BoundarySearch::new(5).run(&mut oracle, &mut rng).unwrap();
        assert_eq!(pair.last_sat, CNF::new(5));
        assert_eq!(pair.first_unsat.num_clauses(), 1);
        assert_eq!(oracle.calls, vec![1]);
    }

    #[test]
    fn test_generation_exhausted() {
        let mut oracle = Threshold::new(usize::MAX);
        let mut rng = StdRng::seed_from_u64(3);
        let err = BoundarySearch::new(5)
            .max_clauses(64)
            .run(&mut oracle, &mut rng)
            .unwrap_err();
        assert!(matches!(err, Error::GenerationExhausted { max_clauses: 64 }));
        assert_eq!(oracle.calls, vec![1, 2, 4, 8, 16, 32, 64]);
    }

    #[test]
    fn test_bisection_keeps_endpoints() {
        // Answers given per query, in query order
        let verdicts = [
            Verdict::Sat,   // 1
            Verdict::Sat,   // 2
            Verdict::Sat,   // 4
            Verdict::UnSat, // 8
            Verdict::UnSat, // 6
            Verdict::Sat,   // 5
        ];
        let mut oracle = Scripted::new(verdicts);
        let mut rng = StdRng::seed_from_u64(4);
        let pair = BoundarySearch::new(7).run(&mut oracle, &mut rng).unwrap();
        assert_eq!(pair.last_sat.num_clauses(), 5);
        assert_eq!(pair.first_unsat.num_clauses(), 6);
    }

    #[test]
    fn test_oracle_error_is_propagated() {
        let mut oracle = Scripted::new([Verdict::Sat]);
        let mut rng = StdRng::seed_from_u64(5);
        let err = BoundarySearch::new(5).run(&mut oracle, &mut rng).unwrap_err();
        assert!(matches!(err, Error::MalformedSolverOutput { .. }));
    }

    #[test]
    fn test_brute_force_boundary() {
        let mut rng = StdRng::seed_from_u64(10);
        let mut oracle = BruteForce;
        let pair = BoundarySearch::new(10).run(&mut oracle, &mut rng).unwrap();
        let left = pair.last_sat.num_clauses();
        assert_eq!(pair.first_unsat.num_clauses(), left + 1);
        assert_eq!(pair.first_unsat.prefix(left), pair.last_sat);
        assert_eq!(oracle.evaluate(&pair.last_sat).unwrap(), Verdict::Sat);
        assert_eq!(oracle.evaluate(&pair.first_unsat).unwrap(), Verdict::UnSat);
        assert_eq!(pair.last_sat.num_vars(), 10);
    }
}
