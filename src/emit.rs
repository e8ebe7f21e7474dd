use crate::{BoundaryPair, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Files `<n>_<index>_sat.txt` and `<n>_<index>_unsat.txt` under `dir`
pub fn case_paths(dir: &Path, num_vars: u32, index: usize) -> (PathBuf, PathBuf) {
    (
        dir.join(format!("{num_vars}_{index}_sat.txt")),
        dir.join(format!("{num_vars}_{index}_unsat.txt")),
    )
}

/// Write both formulas of a boundary pair as DIMACS text, creating `dir` if missing
pub fn write_case(dir: &Path, index: usize, pair: &BoundaryPair) -> Result<(PathBuf, PathBuf)> {
    fs::create_dir_all(dir)?;
    let (sat, unsat) = case_paths(dir, pair.last_sat.num_vars(), index);
    fs::write(&sat, pair.last_sat.to_dimacs())?;
    fs::write(&unsat, pair.first_unsat.to_dimacs())?;
    log::info!("Wrote {} and {}", sat.display(), unsat.display());
    Ok((sat, unsat))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{clause, CNF};

    #[test]
    fn test_write_case() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("generated");
        let first_unsat = CNF::from_clauses(5, vec![clause![1, 2, -3], clause![-1, 4, 5, 2]]);
        let pair = BoundaryPair {
            last_sat: first_unsat.prefix(1),
            first_unsat,
            oracle_calls: 3,
        };

        let (sat, unsat) = write_case(&out, 7, &pair).unwrap();
        assert_eq!(sat, out.join("5_7_sat.txt"));
        assert_eq!(unsat, out.join("5_7_unsat.txt"));

        insta::assert_snapshot!(fs::read_to_string(&sat).unwrap().trim_end(), @r"
        p cnf 5 1
        1 2 -3 0
        ");
        let parsed = CNF::from_dimacs(&fs::read_to_string(&unsat).unwrap()).unwrap();
        assert_eq!(parsed, pair.first_unsat);
    }
}
