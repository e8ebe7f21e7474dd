use crate::{Error, Result, CNF};
use std::{
    fmt,
    io::{self, Write},
    process::{Command, Stdio},
};

/// Satisfiability of a formula as reported by an [Oracle]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    Sat,
    UnSat,
}

impl Verdict {
    pub fn is_sat(self) -> bool {
        matches!(self, Verdict::Sat)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Sat => write!(f, "SAT"),
            Verdict::UnSat => write!(f, "UNSAT"),
        }
    }
}

/// Black-box decision procedure for CNF satisfiability
pub trait Oracle {
    fn name(&self) -> String;

    /// Decide the satisfiability of `cnf` without modifying it
    fn evaluate(&mut self, cnf: &CNF) -> Result<Verdict>;
}

/// Read the verdict from the output of a MiniSat-style solver
///
/// The verdict is the second-to-last newline-delimited segment, i.e. the last
/// line in a newline-terminated output.
///
/// ```rust
/// use cnf_boundary::{parse_verdict, Verdict};
///
/// let out = "|  Number of variables:            10 |\n\nSATISFIABLE\n";
/// assert_eq!(parse_verdict(out).unwrap(), Verdict::Sat);
/// assert_eq!(parse_verdict("UNSATISFIABLE\n").unwrap(), Verdict::UnSat);
///
/// // Without a trailing newline the verdict is not where it is expected
/// assert!(parse_verdict("SATISFIABLE").is_err());
/// ```
pub fn parse_verdict(stdout: &str) -> Result<Verdict> {
    let segments: Vec<&str> = stdout.split('\n').collect();
    let line = segments
        .len()
        .checked_sub(2)
        .map(|i| segments[i].trim_end_matches('\r'));
    match line {
        Some("SATISFIABLE") => Ok(Verdict::Sat),
        Some("UNSATISFIABLE") => Ok(Verdict::UnSat),
        other => Err(Error::MalformedSolverOutput {
            line: other.map(str::to_string),
        }),
    }
}

/// Runs an external solver per query, DIMACS on stdin and verdict on stdout
///
/// The call blocks until the solver exits. Its exit status is not
/// interpreted since MiniSat exits with `10` or `20`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOracle {
    program: String,
    args: Vec<String>,
}

impl Default for ProcessOracle {
    fn default() -> Self {
        Self::new("minisat")
    }
}

impl ProcessOracle {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    fn run(&self, input: &str) -> Result<String> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| Error::ProcessLaunch {
                program: self.program.clone(),
                source,
            })?;
        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| Error::SolverIo(io::Error::other("stdin is not piped")))?;

        // Feed stdin concurrently so that a chatty solver cannot fill the stdout pipe
        let (written, output) = std::thread::scope(|s| {
            let writer = s.spawn(move || stdin.write_all(input.as_bytes()));
            let output = child.wait_with_output();
            let written = writer
                .join()
                .unwrap_or_else(|_| Err(io::Error::other("stdin writer panicked")));
            (written, output)
        });

        match written {
            Ok(()) => {}
            // The solver may stop reading once it has decided
            Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
                log::debug!("{} closed stdin early", self.program);
            }
            Err(e) => return Err(Error::SolverIo(e)),
        }
        let output = output.map_err(Error::SolverIo)?;
        log::debug!("{} exited with {}", self.program, output.status);

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        log::trace!("{} output:\n{}", self.program, stdout);
        Ok(stdout)
    }
}

impl Oracle for ProcessOracle {
    fn name(&self) -> String {
        self.program.clone()
    }

    fn evaluate(&mut self, cnf: &CNF) -> Result<Verdict> {
        let stdout = self.run(&cnf.to_dimacs())?;
        let verdict = parse_verdict(&stdout)?;
        log::debug!(
            "{} says {} for {} clauses",
            self.program,
            verdict,
            cnf.num_clauses()
        );
        Ok(verdict)
    }
}
