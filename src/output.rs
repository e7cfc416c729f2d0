//! Encoding of shaped records for response bodies and exports.
//!
//! Supported outputs:
//! - A JSON array of objects: `[{"Id":1}, {"Id":2}]`
//! - Newline-delimited JSON (NDJSON): `{"Id":1}\n{"Id":2}\n`
//! - CSV with a header row taken from the first record's keys
//!
//! Objects keep key order. Repeated keys (see [`crate::DuplicateFields::Keep`]) are written
//! as-is in JSON and as repeated columns in CSV.

use std::io::Write;

use crate::error::ShapeResult;
use crate::types::{ShapedRecord, Value};

/// Encode records as a JSON array string.
pub fn to_json_string(records: &[ShapedRecord]) -> ShapeResult<String> {
    Ok(serde_json::to_string(records)?)
}

/// Write records as a JSON array and flush the writer.
pub fn write_json<W: Write>(mut writer: W, records: &[ShapedRecord]) -> ShapeResult<()> {
    serde_json::to_writer(&mut writer, records)?;
    writer.flush()?;
    Ok(())
}

/// Write records as NDJSON, one object per line.
pub fn write_ndjson<W: Write>(mut writer: W, records: &[ShapedRecord]) -> ShapeResult<()> {
    for record in records {
        serde_json::to_writer(&mut writer, record)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

/// Write records as CSV.
///
/// All records of one projection share the same keys, so the header comes from the first
/// record. Empty input writes nothing. [`Value::Null`] becomes an empty cell and lists are
/// written as JSON text.
pub fn write_csv<W: Write>(writer: W, records: &[ShapedRecord]) -> ShapeResult<()> {
    let Some(first) = records.first() else {
        return Ok(());
    };

    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(first.keys())?;
    for record in records {
        let row = record.values().map(csv_cell).collect::<ShapeResult<Vec<_>>>()?;
        wtr.write_record(&row)?;
    }
    wtr.flush()?;
    Ok(())
}

fn csv_cell(value: &Value) -> ShapeResult<String> {
    Ok(match value {
        Value::Null => String::new(),
        Value::Bool(v) => v.to_string(),
        Value::Int64(v) => v.to_string(),
        Value::UInt64(v) => v.to_string(),
        Value::Float64(v) => v.to_string(),
        Value::Utf8(s) => s.clone(),
        Value::List(_) => serde_json::to_string(value)?,
    })
}

#[cfg(test)]
mod tests {
    use std::io::{self, Write};

    use super::{to_json_string, write_csv, write_json, write_ndjson};
    use crate::error::ShapeError;
    use crate::types::{ShapedRecord, Value};

    /// Buffers writes and counts flushes, optionally failing them.
    #[derive(Default)]
    struct FlushCounter {
        buf: Vec<u8>,
        flushes: usize,
        fail_flush: bool,
    }

    impl Write for FlushCounter {
        fn write(&mut self, data: &[u8]) -> io::Result<usize> {
            self.buf.extend_from_slice(data);
            Ok(data.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            self.flushes += 1;
            if self.fail_flush {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "peer went away"));
            }
            Ok(())
        }
    }

    fn records() -> Vec<ShapedRecord> {
        (1..=2)
            .map(|id| {
                let mut r = ShapedRecord::new();
                r.insert("Id", Value::Int64(id));
                r.insert("Title", Value::Utf8(format!("t{id}")));
                r.insert("Tags", Value::List(vec![Value::Utf8("x".to_string())]));
                r.insert("Rating", Value::Null);
                r
            })
            .collect()
    }

    #[test]
    fn json_array_keeps_key_order() {
        let json = to_json_string(&records()[..1]).unwrap();
        assert_eq!(json, r#"[{"Id":1,"Title":"t1","Tags":["x"],"Rating":null}]"#);
    }

    #[test]
    fn json_writer_is_flushed() {
        let mut out = FlushCounter::default();
        write_json(&mut out, &records()[..1]).unwrap();
        assert_eq!(out.flushes, 1);
        assert_eq!(
            String::from_utf8(out.buf).unwrap(),
            r#"[{"Id":1,"Title":"t1","Tags":["x"],"Rating":null}]"#
        );
    }

    #[test]
    fn flush_failures_are_reported_as_io_errors() {
        let mut out = FlushCounter {
            fail_flush: true,
            ..Default::default()
        };
        let err = write_json(&mut out, &records()).unwrap_err();
        assert!(matches!(err, ShapeError::Io(_)));

        let mut out = FlushCounter {
            fail_flush: true,
            ..Default::default()
        };
        let err = write_ndjson(&mut out, &records()).unwrap_err();
        assert!(matches!(err, ShapeError::Io(_)));
        assert_eq!(out.flushes, 1);
    }

    #[test]
    fn ndjson_writes_one_line_per_record() {
        let mut buf = Vec::new();
        write_ndjson(&mut buf, &records()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with(r#"{"Id":2,"#));
    }

    #[test]
    fn csv_uses_first_record_keys_as_header() {
        let mut buf = Vec::new();
        write_csv(&mut buf, &records()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "Id,Title,Tags,Rating\n1,t1,\"[\"\"x\"\"]\",\n2,t2,\"[\"\"x\"\"]\",\n"
        );
    }

    #[test]
    fn csv_of_empty_input_is_empty() {
        let mut buf = Vec::new();
        write_csv(&mut buf, &[]).unwrap();
        assert!(buf.is_empty());
    }
}
