use crate::helpe::*;

impl CapacityReport {
    /// Wraps one parsed row. `values` maps column names to the raw
    /// tokens found underneath them, in header order; `exit_status`
    /// is the out-of-band status of the process that printed the
    /// table.
    pub fn new(values: IndexMap<String, String>, exit_status: i32) -> Self {
        Self {
            values,
            exit_status,
        }
    }

    /// Looks up `name` and parses its token as a 64-bit float.
    ///
    /// Absent and non-numeric are the same defect from the checks'
    /// point of view: the report cannot answer for that column. That
    /// means a parsing or tool-version mismatch upstream, never a bad
    /// capacity, so it is kept apart from [Violation].
    pub fn float_value(&self, name: &str) -> Result<Kilobytes, CheckError> {
        let raw = match self.values.get(name) {
            Some(v) => v,
            None    => {
                return Err(CheckError::FieldMissing {
                    column: name.to_string(),
                    raw:    None,
                });
            }
        };
        match raw.trim().parse::<Kilobytes>() {
            Ok(v)   => Ok(v),
            Err(_)  => {
                Err(CheckError::FieldMissing {
                    column: name.to_string(),
                    raw:    Some(raw.clone()),
                })
            }
        }
    }

    pub fn exit_status(&self) -> i32 {
        self.exit_status
    }

    /// Column names in the order the header declared them.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(|k| k.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_report() -> CapacityReport {
        let values: IndexMap<String, String> = [
            ("NGC", "41984.0"),
            ("YGC", "0"),
            ("EC", "n/a"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        CapacityReport::new(values, 0)
    }

    #[test]
    fn tokens_parse_on_demand() {
        let r = tiny_report();
        assert_eq!(r.float_value("NGC").unwrap(), 41984.0);
        // Counters are plain integers in the table; they still read
        // back as floats.
        assert_eq!(r.float_value("YGC").unwrap(), 0.0);
    }

    #[test]
    fn absent_column_is_a_field_error() {
        let err = tiny_report().float_value("OGC").unwrap_err();
        match err {
            CheckError::FieldMissing { column, raw } => {
                assert_eq!(column, "OGC");
                assert_eq!(raw, None);
            },
            other => panic!("expected FieldMissing, got {}", other),
        }
    }

    #[test]
    fn garbled_token_is_a_field_error_too() {
        let err = tiny_report().float_value("EC").unwrap_err();
        match err {
            CheckError::FieldMissing { column, raw } => {
                assert_eq!(column, "EC");
                assert_eq!(raw.as_deref(), Some("n/a"));
            },
            other => panic!("expected FieldMissing, got {}", other),
        }
    }

    #[test]
    fn exit_status_rides_along() {
        let r = CapacityReport::new(IndexMap::new(), 137);
        assert_eq!(r.exit_status(), 137);
    }
}
