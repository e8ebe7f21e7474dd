use super::Clause;
use crate::{Error, Result};
use std::fmt;

/// Expression in Conjunctive Normal Form over a fixed number of variables
///
/// Clauses are kept in the order they were appended, so that the first `len`
/// clauses of a formula form a shorter formula ([CNF::prefix]).
///
/// ```rust
/// use cnf_boundary::{clause, CNF};
///
/// let mut cnf = CNF::new(3);
/// cnf.push(clause![1, -2]);
/// cnf.push(clause![2, 3]);
/// assert_eq!(cnf.to_dimacs(), "p cnf 3 2\n1 -2 0\n2 3 0\n");
/// assert_eq!(cnf.prefix(1).to_dimacs(), "p cnf 3 1\n1 -2 0\n");
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct CNF {
    num_vars: u32,
    clauses: Vec<Clause>,
}

impl CNF {
    /// Empty formula (trivially satisfiable) over `num_vars` variables
    pub fn new(num_vars: u32) -> Self {
        Self {
            num_vars,
            clauses: Vec::new(),
        }
    }

    pub fn from_clauses(num_vars: u32, clauses: Vec<Clause>) -> Self {
        Self { num_vars, clauses }
    }

    pub fn num_vars(&self) -> u32 {
        self.num_vars
    }

    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn push(&mut self, clause: Clause) {
        debug_assert!(
            clause.max_id().is_none_or(|id| id.get() <= self.num_vars),
            "Literal out of range in {clause}"
        );
        self.clauses.push(clause);
    }

    /// Formula made of the first `len` clauses
    pub fn prefix(&self, len: usize) -> Self {
        assert!(len <= self.clauses.len(), "Prefix longer than formula");
        Self {
            num_vars: self.num_vars,
            clauses: self.clauses[..len].to_vec(),
        }
    }

    /// Serialize into DIMACS text, every line terminated by a newline
    pub fn to_dimacs(&self) -> String {
        self.to_string()
    }

    /// Parse DIMACS text with one clause per line
    ///
    /// Comment lines starting with `c` and blank lines are skipped.
    ///
    /// ```rust
    /// use cnf_boundary::CNF;
    ///
    /// let cnf = CNF::from_dimacs("c example\np cnf 4 2\n1 -4 0\n2 3 0\n").unwrap();
    /// assert_eq!(cnf.num_vars(), 4);
    /// assert_eq!(cnf.num_clauses(), 2);
    ///
    /// // Header and body must agree
    /// assert!(CNF::from_dimacs("p cnf 4 2\n1 -4 0\n").is_err());
    /// ```
    pub fn from_dimacs(input: &str) -> Result<Self> {
        let mut header: Option<(u32, usize)> = None;
        let mut clauses = Vec::new();

        for (i, line) in input.lines().enumerate() {
            let line_no = i + 1;
            let error = |message: String| Error::Dimacs {
                line: line_no,
                message,
            };
            let line = line.trim();
            if line.is_empty() || line.starts_with('c') {
                continue;
            }
            if line.starts_with('p') {
                if header.is_some() {
                    return Err(error("duplicated header".to_string()));
                }
                header = Some(parse_header(line).map_err(error)?);
                continue;
            }
            let Some((num_vars, _)) = header else {
                return Err(error("clause before `p cnf` header".to_string()));
            };
            let clause = Clause::from_dimacs(line).map_err(error)?;
            if let Some(id) = clause.max_id() {
                if id.get() > num_vars {
                    return Err(error(format!(
                        "variable {id} exceeds declared count {num_vars}"
                    )));
                }
            }
            clauses.push(clause);
        }

        let Some((num_vars, num_clauses)) = header else {
            return Err(Error::Dimacs {
                line: 0,
                message: "missing `p cnf` header".to_string(),
            });
        };
        if clauses.len() != num_clauses {
            return Err(Error::Dimacs {
                line: 0,
                message: format!(
                    "header declares {num_clauses} clauses but {} found",
                    clauses.len()
                ),
            });
        }
        Ok(Self { num_vars, clauses })
    }
}

fn parse_header(line: &str) -> std::result::Result<(u32, usize), String> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let [p, cnf, num_vars, num_clauses] = tokens.as_slice() else {
        return Err(format!("malformed header `{line}`"));
    };
    if *p != "p" || *cnf != "cnf" {
        return Err(format!("malformed header `{line}`"));
    }
    let num_vars = num_vars
        .parse()
        .map_err(|_| format!("invalid variable count `{num_vars}`"))?;
    let num_clauses = num_clauses
        .parse()
        .map_err(|_| format!("invalid clause count `{num_clauses}`"))?;
    Ok((num_vars, num_clauses))
}

impl fmt::Display for CNF {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "p cnf {} {}", self.num_vars, self.clauses.len())?;
        for clause in &self.clauses {
            writeln!(f, "{}", clause.as_dimacs())?;
        }
        Ok(())
    }
}

impl fmt::Debug for CNF {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.clauses.is_empty() {
            return write!(f, "⊤");
        }
        for (i, clause) in self.clauses.iter().enumerate() {
            if i > 0 {
                write!(f, " ∧ ")?;
            }
            if clause.num_literals() > 1 {
                write!(f, "({})", clause)?;
            } else {
                write!(f, "{}", clause)?;
            }
        }
        Ok(())
    }
}
