use log::debug;

use super::model::FrequencyResponseRecord;

// ---------------------------------------------------------------------------
// Column mapping
// ---------------------------------------------------------------------------

/// Record field a header cell maps onto. Matching is exact and case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Frequency,
    Magnitude,
    Phase,
    Sti,
    StiDegradation,
    Position,
    Color,
    Ignored,
}

impl Column {
    fn from_header(name: &str) -> Self {
        match name {
            "Frequency_Hz" => Column::Frequency,
            "Magnitude_dB" => Column::Magnitude,
            "Phase_deg" => Column::Phase,
            "STI" => Column::Sti,
            "STI_Degradation_%" => Column::StiDegradation,
            "position" => Column::Position,
            "Color" => Column::Color,
            _ => Column::Ignored,
        }
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Parse a frequency-response CSV export into records.
///
/// Layout: the first non-blank line is the header, every later non-blank line
/// is one record. Cells are split on `,` with quoting disabled and trimmed.
/// Column order comes from the header; unknown columns are dropped.
///
/// Never fails: an unparseable numeric cell becomes `NaN`, a cell missing
/// from a short row is read as empty, and an unreadable row is skipped.
pub fn parse_frequency_response_csv(text: &str) -> Vec<FrequencyResponseRecord> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .quoting(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut rows = reader.records().enumerate().filter_map(|(row_no, result)| {
        match result {
            Ok(record) if is_blank(&record) => None,
            Ok(record) => Some(record),
            Err(e) => {
                debug!("skipping unreadable CSV row {row_no}: {e}");
                None
            }
        }
    });

    let columns: Vec<Column> = match rows.next() {
        Some(header) => header.iter().map(Column::from_header).collect(),
        None => return Vec::new(),
    };

    let records: Vec<FrequencyResponseRecord> =
        rows.map(|record| parse_row(&record, &columns)).collect();

    debug!(
        "parsed {} frequency response records ({} columns)",
        records.len(),
        columns.len()
    );
    records
}

fn is_blank(record: &csv::StringRecord) -> bool {
    record.iter().all(str::is_empty)
}

fn parse_row(record: &csv::StringRecord, columns: &[Column]) -> FrequencyResponseRecord {
    let mut rec = FrequencyResponseRecord::default();

    for (i, column) in columns.iter().enumerate() {
        let cell = record.get(i).unwrap_or("");
        match column {
            Column::Frequency => rec.frequency = parse_number(cell),
            Column::Magnitude => rec.magnitude = Some(parse_number(cell)),
            Column::Phase => rec.phase = Some(parse_number(cell)),
            Column::Sti => rec.sti = Some(parse_number(cell)),
            Column::StiDegradation => rec.sti_degradation = Some(parse_number(cell)),
            Column::Position => rec.position = Some(cell.to_string()),
            Column::Color => rec.color = Some(cell.to_string()),
            Column::Ignored => {}
        }
    }
    rec
}

fn parse_number(cell: &str) -> f64 {
    cell.parse::<f64>().unwrap_or(f64::NAN)
}
