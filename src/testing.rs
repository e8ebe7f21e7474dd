use crate::{Error, Oracle, Result, Verdict, CNF};
use std::collections::VecDeque;

/// Oracle which is satisfiable strictly below `unsat_from` clauses
#[derive(Debug, Clone, Default)]
pub struct Threshold {
    pub unsat_from: usize,
    /// Clause counts of every query, in order
    pub calls: Vec<usize>,
}

impl Threshold {
    pub fn new(unsat_from: usize) -> Self {
        Self {
            unsat_from,
            calls: Vec::new(),
        }
    }
}

impl Oracle for Threshold {
    fn name(&self) -> String {
        format!("threshold({})", self.unsat_from)
    }

    fn evaluate(&mut self, cnf: &CNF) -> Result<Verdict> {
        self.calls.push(cnf.num_clauses());
        Ok(if cnf.num_clauses() < self.unsat_from {
            Verdict::Sat
        } else {
            Verdict::UnSat
        })
    }
}

/// Oracle answering from a fixed list, failing once it runs out
#[derive(Debug, Clone, Default)]
pub struct Scripted {
    verdicts: VecDeque<Verdict>,
}

impl Scripted {
    pub fn new(verdicts: impl IntoIterator<Item = Verdict>) -> Self {
        Self {
            verdicts: verdicts.into_iter().collect(),
        }
    }
}

impl Oracle for Scripted {
    fn name(&self) -> String {
        "scripted".to_string()
    }

    fn evaluate(&mut self, _cnf: &CNF) -> Result<Verdict> {
        self.verdicts
            .pop_front()
            .ok_or(Error::MalformedSolverOutput { line: None })
    }
}

/// Shell script talking like MiniSat, SAT strictly below `unsat_from` clauses
///
/// Run through `sh` so that the script itself never has to be executable.
#[cfg(unix)]
pub fn fake_solver(dir: &std::path::Path, unsat_from: usize) -> crate::ProcessOracle {
    let script = dir.join("fake-minisat.sh");
    std::fs::write(
        &script,
        format!(
            r#"read -r p cnf vars clauses
cat > /dev/null
echo "|  Number of variables: $vars |"
echo "|  Number of clauses:   $clauses |"
echo
if [ "$clauses" -lt {unsat_from} ]; then echo SATISFIABLE; else echo UNSATISFIABLE; fi
"#
        ),
    )
    .unwrap();
    crate::ProcessOracle::new("sh").with_args([script.to_str().unwrap()])
}
