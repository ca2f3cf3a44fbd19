//! The fixed acquisition query.

/// Single family homes with a 2017 transaction, aliased to the
/// [`HomeRecord`](crate::db::HomeRecord) field names.
pub const ZILLOW_QUERY: &str = r#"
SELECT bedroomcnt AS bedroom_count,
       bathroomcnt AS bath_count,
       calculatedfinishedsquarefeet AS finished_sq_feet,
       taxvaluedollarcnt AS home_value,
       yearbuilt,
       fips
FROM properties_2017
JOIN propertylandusetype USING (propertylandusetypeid)
JOIN predictions_2017 ON properties_2017.id = predictions_2017.id
WHERE propertylandusetype.propertylandusedesc = 'Single Family Residential'
  AND predictions_2017.transactiondate LIKE '2017%'
"#;
