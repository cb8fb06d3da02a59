pub mod fitness;

pub use fitness::{parse_rating, FitnessFunction};
