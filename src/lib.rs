pub mod tabulate;

pub use tabulate::{tabularize, Tabularizer};
