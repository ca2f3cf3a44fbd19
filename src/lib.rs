pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod service;
pub mod types;

pub use cache::CsvCache;
pub use config::{Config, Credentials};
pub use db::{ConnectionDescriptor, HomeRecord, MySqlSource};
pub use error::AcquireError;
pub use service::{Acquirer, Acquisition, HousingSource};
pub use types::HousingDataset;
