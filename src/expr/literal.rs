use proptest::prelude::*;
use std::{fmt, num::NonZeroU32, ops::Not};

/// A literal in [Conjunctive Normal Form](https://en.wikipedia.org/wiki/Conjunctive_normal_form)
///
/// # Order
///
/// - Literals are ordered by their ID
/// - If the IDs are the same, positive literals are less than negative literals
///
/// ```rust
/// use cnf_boundary::lit;
///
/// let a = lit!(1);
/// let b = lit!(-1);
/// let c = lit!(2);
/// let d = lit!(-2);
///
/// assert!(a < b); // x1 < ¬x1
/// assert!(b < c); // ¬x1 < x2
/// assert!(c < d); // x2 < ¬x2
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Literal {
    pub id: NonZeroU32,
    pub positive: bool,
}

#[macro_export]
macro_rules! lit {
    ($lit:expr) => {
        $crate::Literal::new($lit)
    };
}

impl Literal {
    /// Similar to DIMACS format, literals are 1-indexed and negative literals are negated
    pub fn new(lit: i32) -> Self {
        Self::from_dimacs(lit).expect("0 is not allowed for ID")
    }

    /// Checked version of [Literal::new], `None` for `0`
    pub fn from_dimacs(lit: i32) -> Option<Self> {
        let id = NonZeroU32::new(lit.unsigned_abs())?;
        Some(Self {
            id,
            positive: lit > 0,
        })
    }

    /// Literal of the 1-indexed variable `id` with the given polarity
    pub fn with_polarity(id: NonZeroU32, positive: bool) -> Self {
        Self { id, positive }
    }

    pub fn as_i32(&self) -> i32 {
        if self.positive {
            self.id.get() as i32
        } else {
            -(self.id.get() as i32)
        }
    }

    /// Truth value of this literal under an assignment of its variable
    pub fn eval(&self, value: bool) -> bool {
        value == self.positive
    }
}

impl From<i32> for Literal {
    fn from(id: i32) -> Self {
        Self::new(id)
    }
}

impl Not for Literal {
    type Output = Self;

    fn not(self) -> Self::Output {
        Self::Output {
            positive: !self.positive,
            ..self
        }
    }
}

impl PartialOrd for Literal {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Literal {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match self.id.cmp(&other.id) {
            std::cmp::Ordering::Equal => self.positive.cmp(&other.positive).reverse(),
            ordering => ordering,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.positive {
            write!(f, "x{}", self.id)
        } else {
            write!(f, "¬x{}", self.id)
        }
    }
}

impl fmt::Debug for Literal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl Arbitrary for Literal {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        // IDs must stay representable as a DIMACS `i32`
        (1..=i32::MAX as u32, any::<bool>())
            .prop_map(|(id, positive)| Self {
                id: NonZeroU32::new(id).unwrap(),
                positive,
            })
            .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn test_double_negation(lit: Literal) {
            assert_eq!(!(!lit), lit);
        }

        #[test]
        fn test_order_of_negation(lit: Literal) {
            let negated = !lit;
            if lit.positive {
                assert!(negated > lit);
            } else {
                assert!(lit > negated);
            }
        }

        #[test]
        fn test_i32_round_trip(lit: Literal) {
            assert_eq!(Literal::new(lit.as_i32()), lit);
        }

        #[test]
        fn test_eval_negation(lit: Literal, value: bool) {
            assert_ne!(lit.eval(value), (!lit).eval(value));
        }
    }

    #[test]
    fn test_zero_is_rejected() {
        assert_eq!(Literal::from_dimacs(0), None);
        assert_eq!(Literal::from_dimacs(-7), Some(!lit!(7)));
    }
}
