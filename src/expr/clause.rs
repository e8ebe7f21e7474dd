use super::Literal;
use proptest::prelude::*;
use std::{collections::BTreeSet, fmt, num::NonZeroU32};

/// A clause in [Conjunctive Normal Form](https://en.wikipedia.org/wiki/Conjunctive_normal_form)
///
/// The empty clause cannot be satisfied and is written as `⊥`.
///
/// ```rust
/// use cnf_boundary::clause;
///
/// assert_eq!(clause![2, -1].to_string(), "¬x1 ∨ x2");
/// assert_eq!(clause![].to_string(), "⊥");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Clause {
    literals: BTreeSet<Literal>,
}

#[macro_export]
macro_rules! clause {
    ($($lit:expr),*) => {
        $crate::Clause::from_literals(&[$($lit.into()),*])
    };
}

impl Clause {
    pub fn new(literals: BTreeSet<Literal>) -> Self {
        Self { literals }
    }

    pub fn from_literals(literals: &[Literal]) -> Self {
        Self::new(literals.iter().cloned().collect())
    }

    /// Parse a clause from a DIMACS format line
    ///
    /// ```rust
    /// use cnf_boundary::Clause;
    /// let clause = Clause::from_dimacs("1 -2 0").unwrap();
    /// assert_eq!(clause.to_string(), "x1 ∨ ¬x2");
    ///
    /// // `0` alone is the empty clause
    /// let clause = Clause::from_dimacs("0").unwrap();
    /// assert_eq!(clause.to_string(), "⊥");
    ///
    /// // The terminating `0` is mandatory
    /// assert!(Clause::from_dimacs("1 2").is_err());
    /// ```
    pub fn from_dimacs(s: &str) -> Result<Self, String> {
        let mut literals = BTreeSet::new();
        let mut tokens = s.split_whitespace();
        loop {
            let Some(token) = tokens.next() else {
                return Err("clause is not terminated by 0".to_string());
            };
            let value: i32 = token
                .parse()
                .map_err(|_| format!("invalid literal `{token}`"))?;
            match Literal::from_dimacs(value) {
                Some(lit) => {
                    literals.insert(lit);
                }
                None => break,
            }
        }
        if let Some(rest) = tokens.next() {
            return Err(format!("unexpected `{rest}` after terminating 0"));
        }
        Ok(Self::new(literals))
    }

    /// Convert the clause to a DIMACS format string
    ///
    /// ```rust
    /// use cnf_boundary::{clause, Clause};
    /// assert_eq!(clause![3, -1].as_dimacs(), "-1 3 0");
    /// assert_eq!(Clause::default().as_dimacs(), "0");
    /// ```
    pub fn as_dimacs(&self) -> String {
        let mut s = String::new();
        for lit in &self.literals {
            s.push_str(&lit.as_i32().to_string());
            s.push(' ');
        }
        s.push('0');
        s
    }

    pub fn literals(&self) -> impl DoubleEndedIterator<Item = &Literal> {
        self.literals.iter()
    }

    /// Number of literals in the clause
    pub fn num_literals(&self) -> usize {
        self.literals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn contains(&self, lit: Literal) -> bool {
        self.literals.contains(&lit)
    }

    pub fn remove(&mut self, lit: Literal) -> bool {
        self.literals.remove(&lit)
    }

    /// Variables appearing in the clause
    pub fn supp(&self) -> BTreeSet<NonZeroU32> {
        self.literals.iter().map(|lit| lit.id).collect()
    }

    /// Largest variable ID, `None` for the empty clause
    pub fn max_id(&self) -> Option<NonZeroU32> {
        self.literals.iter().map(|lit| lit.id).max()
    }
}

impl From<Vec<i32>> for Clause {
    fn from(literals: Vec<i32>) -> Self {
        Self::new(literals.into_iter().map(Literal::new).collect())
    }
}

impl FromIterator<Literal> for Clause {
    fn from_iter<I: IntoIterator<Item = Literal>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.literals.is_empty() {
            return write!(f, "⊥");
        }
        for (i, literal) in self.literals.iter().enumerate() {
            if i > 0 {
                write!(f, " ∨ ")?;
            }
            write!(f, "{}", literal)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Clause {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl Arbitrary for Clause {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        proptest::collection::vec(any::<Literal>(), 0..6)
            .prop_map(|literals| Clause::from_literals(&literals))
            .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lit;
    use maplit::btreeset;

    #[test]
    fn test_supp() {
        let c = clause![4, -2, 9];
        assert_eq!(
            c.supp(),
            btreeset! {
                NonZeroU32::new(2).unwrap(),
                NonZeroU32::new(4).unwrap(),
                NonZeroU32::new(9).unwrap(),
            }
        );
        assert_eq!(c.max_id(), NonZeroU32::new(9));
        assert_eq!(Clause::default().max_id(), None);
    }

    #[test]
    fn test_dimacs_errors() {
        assert!(Clause::from_dimacs("1 x 0").is_err());
        assert!(Clause::from_dimacs("1 0 2").is_err());
        assert!(Clause::from_dimacs("").is_err());
    }

    #[test]
    fn test_dedup() {
        let c = clause![1, 1, -3];
        assert_eq!(c.num_literals(), 2);
        assert!(c.contains(lit!(1)));
        assert!(c.contains(lit!(-3)));
        assert!(!c.contains(lit!(3)));
    }

    proptest! {
        #[test]
        fn test_dimacs_round_trip(c: Clause) {
            prop_assert_eq!(Clause::from_dimacs(&c.as_dimacs()).unwrap(), c);
        }
    }
}
