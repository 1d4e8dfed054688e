//! CSV boundary: patient import and row export

use crate::client::{ClientError, GraphClient};
use crate::cypher::Statement;
use crate::model::Patient;
use crate::recommend::Recommendation;
use serde::Deserialize;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum CsvError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// `row` counts data rows from 1, header excluded
    #[error("Row {row}: {message}")]
    Row { row: usize, message: String },

    #[error(transparent)]
    Client(#[from] ClientError),
}

/// Column names written above exported recommendations
pub const RECOMMENDATION_COLUMNS: [&str; 7] = [
    "name",
    "dosage",
    "side_effects",
    "symptoms",
    "doctor",
    "hospital",
    "predicted_efficacy",
];

/// Required patient columns; anything else in the file is ignored
#[derive(Debug, Deserialize)]
struct PatientRow {
    name: String,
    age: i64,
    gender: String,
}

/// Upsert every patient row of the CSV at `path`
pub async fn import_patients(client: &dyn GraphClient, path: &Path) -> Result<usize, CsvError> {
    let file = File::open(path)?;
    let imported = import_patients_from_reader(client, file).await?;
    info!(path = %path.display(), imported, "Patient import finished");
    Ok(imported)
}

/// Upsert every patient row read from `reader`, one write transaction per
/// row. The first malformed row stops the import; earlier rows stay.
pub async fn import_patients_from_reader<R: Read>(
    client: &dyn GraphClient,
    reader: R,
) -> Result<usize, CsvError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let headers = reader.headers()?.clone();

    let mut imported = 0;
    for (index, record) in reader.records().enumerate() {
        let row = index + 1;
        let record = record.map_err(|e| CsvError::Row {
            row,
            message: e.to_string(),
        })?;
        let parsed: PatientRow = record.deserialize(Some(&headers)).map_err(|e| CsvError::Row {
            row,
            message: e.to_string(),
        })?;

        let patient = Patient::new(parsed.name, parsed.age, parsed.gender);
        debug!(row, name = %patient.name, "Upserting patient");
        client
            .execute_write(&[Statement::UpsertPatient(patient)])
            .await?;
        imported += 1;
    }
    Ok(imported)
}

/// Write rows of string-like fields to `path`. No header is implied and
/// rows may differ in length.
pub fn export_rows<I, R, F>(rows: I, path: &Path) -> Result<usize, CsvError>
where
    I: IntoIterator<Item = R>,
    R: IntoIterator<Item = F>,
    F: AsRef<[u8]>,
{
    let file = File::create(path)?;
    let written = export_rows_to_writer(rows, file)?;
    info!(path = %path.display(), rows = written, "Exported rows");
    Ok(written)
}

pub fn export_rows_to_writer<I, R, F, W>(rows: I, writer: W) -> Result<usize, CsvError>
where
    I: IntoIterator<Item = R>,
    R: IntoIterator<Item = F>,
    F: AsRef<[u8]>,
    W: Write,
{
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(writer);
    let mut written = 0;
    for row in rows {
        writer.write_record(row)?;
        written += 1;
    }
    writer.flush()?;
    Ok(written)
}

/// Flatten recommendations into export rows (see `RECOMMENDATION_COLUMNS`)
pub fn recommendation_rows(recommendations: &[Recommendation]) -> Vec<Vec<String>> {
    recommendations
        .iter()
        .map(|rec| {
            let t = &rec.treatment;
            vec![
                t.name.clone(),
                t.dosage.clone(),
                t.side_effects.clone(),
                t.symptoms.join(";"),
                t.doctor.clone().unwrap_or_default(),
                t.hospital.clone().unwrap_or_default(),
                rec.predicted_efficacy.to_string(),
            ]
        })
        .collect()
}
