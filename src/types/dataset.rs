use crate::db::HomeRecord;

/// Tabular housing data: an ordered list of rows over [`HousingDataset::COLUMNS`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HousingDataset {
    rows: Vec<HomeRecord>,
}

impl HousingDataset {
    /// Column names in output order. Matches the CSV header.
    pub const COLUMNS: [&'static str; 6] = [
        "bedroom_count",
        "bath_count",
        "finished_sq_feet",
        "home_value",
        "yearbuilt",
        "fips",
    ];

    pub fn new(rows: Vec<HomeRecord>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[HomeRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl From<Vec<HomeRecord>> for HousingDataset {
    fn from(rows: Vec<HomeRecord>) -> Self {
        Self::new(rows)
    }
}

impl FromIterator<HomeRecord> for HousingDataset {
    fn from_iter<I: IntoIterator<Item = HomeRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
