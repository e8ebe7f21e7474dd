use crate::{Error, Result};
use regex::Regex;
use std::{
    cmp::Ordering,
    fmt, fs, io,
    path::Path,
    sync::LazyLock,
};

static BENCH_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^bench_(\d+)\.smt2\.cnf").expect("valid regex"));

/// Ordering key of a `*.cnf` file name
///
/// Names tagged as `bench_<digits>.smt2.cnf` sort by their number, ahead of
/// every untagged name. Untagged names sort in natural order.
///
/// ```rust
/// use cnf_boundary::SortKey;
///
/// assert!(SortKey::of("bench_2.smt2.cnf") < SortKey::of("bench_10.smt2.cnf"));
/// assert!(SortKey::of("bench_99.smt2.cnf") < SortKey::of("0.cnf"));
/// assert!(SortKey::of("2.cnf") < SortKey::of("10.cnf"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortKey {
    Tagged(u64),
    Untagged(NaturalName),
}

impl SortKey {
    pub fn of(file_name: &str) -> Self {
        BENCH_PATTERN
            .captures(file_name)
            .and_then(|c| c[1].parse().ok())
            .map(SortKey::Tagged)
            .unwrap_or_else(|| SortKey::Untagged(NaturalName(file_name.to_string())))
    }
}

/// File name compared with digit runs as numbers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NaturalName(pub String);

impl PartialOrd for NaturalName {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for NaturalName {
    fn cmp(&self, other: &Self) -> Ordering {
        natural_cmp(&self.0, &other.0).then_with(|| self.0.cmp(&other.0))
    }
}

fn split_digits(s: &str) -> (&str, &str) {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s.split_at(end)
}

fn natural_cmp(mut a: &str, mut b: &str) -> Ordering {
    loop {
        match (a.chars().next(), b.chars().next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) if x.is_ascii_digit() && y.is_ascii_digit() => {
                let (da, ra) = split_digits(a);
                let (db, rb) = split_digits(b);
                let (ta, tb) = (da.trim_start_matches('0'), db.trim_start_matches('0'));
                let ordering = ta
                    .len()
                    .cmp(&tb.len())
                    .then_with(|| ta.cmp(tb))
                    .then_with(|| da.len().cmp(&db.len()));
                if ordering != Ordering::Equal {
                    return ordering;
                }
                (a, b) = (ra, rb);
            }
            (Some(x), Some(y)) => {
                if x != y {
                    return x.cmp(&y);
                }
                (a, b) = (&a[x.len_utf8()..], &b[y.len_utf8()..]);
            }
        }
    }
}

/// Planned move of a file within the directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rename {
    pub from: String,
    pub to: String,
}

impl Rename {
    pub fn is_noop(&self) -> bool {
        self.from == self.to
    }
}

impl fmt::Display for Rename {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.from, self.to)
    }
}

/// Non-hidden regular files with the `.cnf` suffix
fn list_cnf_files(dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            log::warn!("Skip non UTF-8 file name {:?}", entry.file_name());
            continue;
        };
        if name.starts_with('.') || !name.ends_with(".cnf") || !entry.path().is_file() {
            continue;
        }
        names.push(name);
    }
    Ok(names)
}

/// Target name of every `*.cnf` file in `dir`, in sorted order
pub fn plan_renames(dir: &Path) -> Result<Vec<Rename>> {
    let mut entries: Vec<(SortKey, String)> = list_cnf_files(dir)?
        .into_iter()
        .map(|name| (SortKey::of(&name), name))
        .collect();
    entries.sort();
    Ok(entries
        .into_iter()
        .enumerate()
        .map(|(id, (_, from))| Rename {
            from,
            to: format!("{id}.cnf"),
        })
        .collect())
}

fn rename(dir: &Path, from: &str, to: &str) -> Result<()> {
    let (from, to) = (dir.join(from), dir.join(to));
    fs::rename(&from, &to).map_err(|source| Error::Rename { from, to, source })
}

/// Apply a plan from [plan_renames], returning the renames actually performed
///
/// Files move through hidden temporary names first, so that no target
/// overwrites a file which is still to be moved. Nothing is moved if a
/// temporary name is already taken, e.g. left over by an interrupted run.
/// A failure after that leaves the directory partially renumbered.
pub fn apply_renames(dir: &Path, plan: &[Rename]) -> Result<Vec<Rename>> {
    let moves: Vec<Rename> = plan.iter().filter(|r| !r.is_noop()).cloned().collect();
    let staged = |r: &Rename| format!(".{}.renumber", r.to);
    for r in &moves {
        let path = dir.join(staged(r));
        if fs::symlink_metadata(&path).is_ok() {
            return Err(Error::Rename {
                from: dir.join(&r.from),
                to: path,
                source: io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    "temporary name already exists",
                ),
            });
        }
    }
    for r in &moves {
        rename(dir, &r.from, &staged(r))?;
    }
    for r in &moves {
        rename(dir, &staged(r), &r.to)?;
        log::debug!("Renamed {} to {}", r.from, r.to);
    }
    Ok(moves)
}

/// Renumber the `*.cnf` files in `dir` into `0.cnf, 1.cnf, ...`
pub fn normalize_dir(dir: &Path) -> Result<Vec<Rename>> {
    let plan = plan_renames(dir)?;
    apply_renames(dir, &plan)
}
