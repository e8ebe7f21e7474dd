mod clause;
mod cnf;
mod literal;

pub use clause::Clause;
pub use cnf::CNF;
pub use literal::Literal;
