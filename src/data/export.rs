use log::warn;
use serde::Serialize;
use serde_json::Value as JsonValue;

/// Errors from turning rows into CSV text.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("row {0} does not serialize to an object")]
    NotAnObject(usize),
    #[error("serializing row {row}: {source}")]
    Serialize {
        row: usize,
        #[source]
        source: serde_json::Error,
    },
}

// ---------------------------------------------------------------------------
// CSV text
// ---------------------------------------------------------------------------

/// Serialize rows into the dashboard's CSV export text.
///
/// Headers are the first row's keys in field order. String cells containing a
/// comma are wrapped in double quotes (embedded quotes are left as-is); absent
/// and null cells are empty. Returns `Ok(None)` for no rows.
pub fn to_csv_string<T: Serialize>(rows: &[T]) -> Result<Option<String>, ExportError> {
    if rows.is_empty() {
        warn!("No data to export");
        return Ok(None);
    }

    let objects = rows
        .iter()
        .enumerate()
        .map(|(i, row)| match serde_json::to_value(row) {
            Ok(JsonValue::Object(map)) => Ok(map),
            Ok(_) => Err(ExportError::NotAnObject(i)),
            Err(source) => Err(ExportError::Serialize { row: i, source }),
        })
        .collect::<Result<Vec<_>, _>>()?;

    let headers: Vec<&String> = objects[0].keys().collect();

    let mut lines = Vec::with_capacity(objects.len() + 1);
    lines.push(
        headers
            .iter()
            .map(|h| h.as_str())
            .collect::<Vec<_>>()
            .join(","),
    );
    for obj in &objects {
        let cells: Vec<String> = headers
            .iter()
            .map(|h| format_cell(obj.get(h.as_str())))
            .collect();
        lines.push(cells.join(","));
    }
    Ok(Some(lines.join("\n")))
}

fn format_cell(value: Option<&JsonValue>) -> String {
    match value {
        None | Some(JsonValue::Null) => String::new(),
        Some(JsonValue::String(s)) if s.contains(',') => format!("\"{s}\""),
        Some(JsonValue::String(s)) => s.clone(),
        Some(JsonValue::Number(n)) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => i.to_string(),
            (None, Some(f)) => f.to_string(),
            _ => n.to_string(),
        },
        Some(other) => other.to_string(),
    }
}

/// `"{prefix}_{YYYY-MM-DD}.{extension}"` with today's local date.
pub fn generate_filename(prefix: &str, extension: &str) -> String {
    let date = chrono::Local::now().format("%Y-%m-%d");
    format!("{prefix}_{date}.{extension}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::FrequencyResponseRecord;
    use serde_json::json;

    #[test]
    fn header_from_first_row_in_field_order() {
        let rows = vec![json!({"frequency": 100, "magnitude": 85, "position": "Host A"})];
        let csv = to_csv_string(&rows).unwrap().unwrap();
        assert_eq!(csv, "frequency,magnitude,position\n100,85,Host A");
    }

    #[test]
    fn one_line_per_row_without_trailing_newline() {
        let rows = vec![json!({"value": 1}), json!({"value": 2}), json!({"value": 3})];
        let csv = to_csv_string(&rows).unwrap().unwrap();
        assert_eq!(csv.split('\n').count(), 4);
        assert!(!csv.ends_with('\n'));
    }

    #[test]
    fn commas_are_quoted_but_quotes_are_not_escaped() {
        let rows = vec![json!({"name": "Host, A", "note": "say \"hi\""})];
        let csv = to_csv_string(&rows).unwrap().unwrap();
        assert_eq!(csv.lines().nth(1), Some("\"Host, A\",say \"hi\""));
    }

    #[test]
    fn later_rows_use_first_row_headers() {
        let rows = vec![json!({"a": 1, "b": 2}), json!({"b": 3, "c": 4})];
        let csv = to_csv_string(&rows).unwrap().unwrap();
        assert_eq!(csv, "a,b\n1,2\n,3");
    }

    #[test]
    fn floats_print_shortest() {
        let rows = vec![json!({"rt60": 0.85, "whole": 85.0, "neg": -2.5})];
        let csv = to_csv_string(&rows).unwrap().unwrap();
        assert_eq!(csv.lines().nth(1), Some("0.85,85,-2.5"));
    }

    #[test]
    fn empty_rows_export_nothing() {
        let rows: Vec<JsonValue> = Vec::new();
        assert!(to_csv_string(&rows).unwrap().is_none());
    }

    #[test]
    fn non_object_rows_are_rejected() {
        let rows = vec![json!({"a": 1}), json!([1, 2])];
        assert!(matches!(
            to_csv_string(&rows),
            Err(ExportError::NotAnObject(1))
        ));
    }

    #[test]
    fn parsed_records_export_with_record_keys() {
        let records = vec![FrequencyResponseRecord {
            frequency: 125.0,
            magnitude: Some(85.5),
            position: Some("Mid Room".into()),
            ..Default::default()
        }];
        let csv = to_csv_string(&records).unwrap().unwrap();
        assert_eq!(csv, "frequency,magnitude,position\n125,85.5,Mid Room");
    }

    #[test]
    fn filename_has_prefix_date_and_extension() {
        let name = generate_filename("rt60-comparison", "csv");
        assert!(name.starts_with("rt60-comparison_"));
        assert!(name.ends_with(".csv"));
        let date = &name["rt60-comparison_".len()..name.len() - ".csv".len()];
        assert_eq!(date.len(), 10);
        assert_eq!(date.matches('-').count(), 2);
    }
}
