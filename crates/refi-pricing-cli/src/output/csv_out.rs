use serde_json::Value;
use std::io;

use super::{flatten_scalars, format_scalar, record_arrays, result_of};

type StdoutCsv<'a> = csv::Writer<io::StdoutLock<'a>>;

/// Write CSV to stdout. Results with row arrays (schedules, rate sheets)
/// print the rows; anything else prints as field/value pairs.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    match result_of(value) {
        Value::Object(result) => match record_arrays(result).first() {
            Some((_, records)) => write_records(&mut wtr, records),
            None => {
                let _ = wtr.write_record(["field", "value"]);
                for (key, val) in flatten_scalars(result) {
                    let _ = wtr.write_record([key, format_scalar(&val)]);
                }
            }
        },
        Value::Array(arr) => write_records(&mut wtr, arr),
        other => {
            let _ = wtr.write_record([format_scalar(other)]);
        }
    }

    let _ = wtr.flush();
}

fn write_records(wtr: &mut StdoutCsv<'_>, records: &[Value]) {
    let Some(Value::Object(first)) = records.first() else {
        for item in records {
            let _ = wtr.write_record([format_scalar(item)]);
        }
        return;
    };

    let headers: Vec<&str> = first.keys().map(String::as_str).collect();
    let _ = wtr.write_record(&headers);
    for map in records.iter().filter_map(Value::as_object) {
        let row: Vec<String> = headers
            .iter()
            .map(|h| map.get(*h).map(format_scalar).unwrap_or_default())
            .collect();
        let _ = wtr.write_record(&row);
    }
}
