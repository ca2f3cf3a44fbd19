use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One single-family home, as selected by the acquisition query.
///
/// Field names double as the CSV header and the SQL column aliases. Every
/// column is nullable in `properties_2017`, so each one is optional here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct HomeRecord {
    pub bedroom_count: Option<f64>,
    pub bath_count: Option<f64>,
    pub finished_sq_feet: Option<f64>,
    pub home_value: Option<f64>,
    pub yearbuilt: Option<f64>,
    pub fips: Option<f64>,
}
