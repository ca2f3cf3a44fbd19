pub mod acquire;

pub use acquire::{Acquirer, Acquisition, HousingSource, acquire};
