use std::path::Path;

use csv::Writer;
use log::info;

use crate::error::ScrapeError;
use crate::extractor::ParcelRecord;

pub const NOT_AVAILABLE: &str = "N/A";

pub fn value_or_na(value: &Option<String>) -> String {
    value
        .clone()
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

pub fn pct_or_na(value: Option<f64>) -> String {
    match value {
        Some(pct) => pct.to_string(),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Writes the whole run in one go: header row first, then one data row
/// per record in accumulation order. An empty run is an explicit error
/// rather than a headerless file.
pub fn write_results<P: AsRef<Path>>(
    path: P,
    records: &[ParcelRecord],
    tax_year: i32,
    include_areas: bool,
) -> Result<(), ScrapeError> {
    if records.is_empty() {
        return Err(ScrapeError::NoRecords);
    }

    let mut writer = Writer::from_path(path.as_ref())?;

    let mut header = vec![
        "Account Number".to_string(),
        "Property Address".to_string(),
        format!("{} Appraised Value", tax_year),
        format!("{} Appraised Value", tax_year - 1),
        "% Change Appraised".to_string(),
        format!("{} Market Value", tax_year),
        format!("{} Market Value", tax_year - 1),
        "% Change Market".to_string(),
    ];
    if include_areas {
        header.push("Land Area".to_string());
        header.push("Total Living Area".to_string());
    }
    writer.write_record(&header)?;

    for record in records {
        let mut row = vec![
            record.account.clone(),
            value_or_na(&record.property_address),
            value_or_na(&record.appraised_curr),
            value_or_na(&record.appraised_prev),
            pct_or_na(record.pct_appraised),
            value_or_na(&record.market_curr),
            value_or_na(&record.market_prev),
            pct_or_na(record.pct_market),
        ];
        if include_areas {
            row.push(value_or_na(&record.land_area));
            row.push(value_or_na(&record.living_area));
        }
        writer.write_record(&row)?;
    }

    writer.flush()?;
    info!(
        "Wrote {} records to {:?}",
        records.len(),
        path.as_ref()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn record(account: &str) -> ParcelRecord {
        ParcelRecord {
            account: account.to_string(),
            property_address: Some("123 MAIN ST".to_string()),
            appraised_curr: Some("198000".to_string()),
            appraised_prev: Some("180000".to_string()),
            pct_appraised: Some(10.0),
            market_curr: Some("230000".to_string()),
            market_prev: Some("200000".to_string()),
            pct_market: Some(15.0),
            land_area: Some("5000".to_string()),
            living_area: Some("1234".to_string()),
        }
    }

    #[test]
    fn test_empty_run_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let result = write_results(&path, &[], 2025, true);
        assert!(matches!(result, Err(ScrapeError::NoRecords)));
        assert!(!path.exists());
    }

    #[test]
    fn test_header_and_row_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        write_results(&path, &[record("A1"), record("A2")], 2025, true).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "Account Number,Property Address,2025 Appraised Value,2024 Appraised Value,\
             % Change Appraised,2025 Market Value,2024 Market Value,% Change Market,\
             Land Area,Total Living Area"
        );
        assert!(lines[1].starts_with("A1,"));
        assert!(lines[2].starts_with("A2,"));
    }

    #[test]
    fn test_missing_fields_render_as_na() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let empty = ParcelRecord {
            account: "A1".to_string(),
            ..Default::default()
        };
        write_results(&path, &[empty], 2025, true).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[1], "A1,N/A,N/A,N/A,N/A,N/A,N/A,N/A,N/A,N/A");
    }

    #[test]
    fn test_area_columns_omitted_when_disabled() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        write_results(&path, &[record("A1")], 2025, false).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0].split(',').count(), 8);
        assert_eq!(lines[1].split(',').count(), 8);
        assert!(!lines[0].contains("Land Area"));
    }
}
