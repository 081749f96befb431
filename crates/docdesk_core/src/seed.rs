//! Sample documents shown on a fresh landing page.

use crate::model::document::{DocumentRecord, DocumentValidationError};
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

const SAMPLE_DOCUMENTS: [(&str, &str, (i32, u32, u32)); 2] = [
    ("Fake Doc 1", "Fake Doc 1 content", (2020, 1, 1)),
    ("Fake Doc 2", "Fake Doc 2 content", (2021, 6, 12)),
];

/// Builds the sample records with fresh ids, in their listing order.
pub fn sample_documents() -> Result<Vec<DocumentRecord>, DocumentValidationError> {
    SAMPLE_DOCUMENTS
        .iter()
        .map(|(title, content, (year, month, day))| {
            DocumentRecord::with_id(
                Uuid::new_v4(),
                title,
                *content,
                midnight_utc(*year, *month, *day),
            )
        })
        .collect()
}

fn midnight_utc(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}
