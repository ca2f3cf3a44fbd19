pub mod dataset;

pub use dataset::HousingDataset;
