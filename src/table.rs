//! In-memory representation of a tabular source and automatic detection of
//! its free-text column.

/// A single cell value, tagged at decode time.
///
/// Downstream code never branches on a dynamic type, only on this closed
/// set. Any variant coerces to text via [`FieldValue::as_text`].
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Null,
}

impl FieldValue {
    /// Classify a raw CSV cell: empty is null, anything that parses as a
    /// number is numeric, the rest is text.
    pub fn parse(raw: &str) -> Self {
        if raw.is_empty() {
            FieldValue::Null
        } else if let Ok(n) = raw.parse::<f64>() {
            FieldValue::Number(n)
        } else {
            FieldValue::Text(raw.to_string())
        }
    }

    /// Coerce to the string form used for normalization and length stats.
    pub fn as_text(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Number(n) => n.to_string(),
            FieldValue::Null => String::new(),
        }
    }
}

/// One source table: a decoded CSV file.
///
/// `path` is the file's path relative to the dataset root; it becomes part
/// of every document id derived from this table. Immutable once read.
#[derive(Debug, Clone)]
pub struct SourceTable {
    pub path: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<FieldValue>>,
}

impl SourceTable {
    /// Pick the column most likely to hold free text.
    ///
    /// A single-column table returns that column unconditionally. Otherwise
    /// the textual column (at least one `Text` value) with the greatest mean
    /// coerced-string length wins; ties resolve to the earliest column.
    /// `None` means no textual column exists.
    pub fn select_text_column(&self) -> Option<usize> {
        if self.columns.len() == 1 {
            return Some(0);
        }

        let mut best: Option<(usize, f64)> = None;
        for col in 0..self.columns.len() {
            let textual = self
                .rows
                .iter()
                .any(|row| matches!(row.get(col), Some(FieldValue::Text(_))));
            if !textual {
                continue;
            }

            let total: usize = self
                .rows
                .iter()
                .map(|row| row.get(col).map_or(0, |v| v.as_text().chars().count()))
                .sum();
            let mean = total as f64 / self.rows.len() as f64;

            match best {
                Some((_, best_mean)) if mean <= best_mean => {}
                _ => best = Some((col, mean)),
            }
        }

        best.map(|(col, _)| col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(columns: &[&str], rows: &[&[&str]]) -> SourceTable {
        SourceTable {
            path: "test.csv".to_string(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: rows
                .iter()
                .map(|row| row.iter().map(|cell| FieldValue::parse(cell)).collect())
                .collect(),
        }
    }

    #[test]
    fn parse_classifies_values() {
        assert_eq!(FieldValue::parse(""), FieldValue::Null);
        assert_eq!(FieldValue::parse("42"), FieldValue::Number(42.0));
        assert_eq!(FieldValue::parse("-3.5"), FieldValue::Number(-3.5));
        assert_eq!(
            FieldValue::parse("42 tahun"),
            FieldValue::Text("42 tahun".to_string())
        );
    }

    #[test]
    fn as_text_coerces_every_variant() {
        assert_eq!(FieldValue::Text("abc".to_string()).as_text(), "abc");
        assert_eq!(FieldValue::Number(42.0).as_text(), "42");
        assert_eq!(FieldValue::Null.as_text(), "");
    }

    #[test]
    fn single_column_wins_unconditionally() {
        // Even a purely numeric single column is returned.
        let t = table(&["id"], &[&["1"], &["2"], &["3"]]);
        assert_eq!(t.select_text_column(), Some(0));
    }

    #[test]
    fn longest_mean_text_column_wins() {
        let t = table(
            &["id", "judul", "isi"],
            &[
                &["1", "BBM naik", "Harga bahan bakar minyak naik menjelang akhir tahun"],
                &["2", "Banjir", "Hujan deras menyebabkan banjir di beberapa wilayah"],
            ],
        );
        assert_eq!(t.select_text_column(), Some(2));
    }

    #[test]
    fn all_numeric_columns_yield_none() {
        let t = table(&["id", "skor"], &[&["1", "0.5"], &["2", "0.7"]]);
        assert_eq!(t.select_text_column(), None);
    }

    #[test]
    fn ties_resolve_to_first_column() {
        let t = table(&["a", "b"], &[&["abc", "xyz"], &["def", "uvw"]]);
        assert_eq!(t.select_text_column(), Some(0));
    }

    #[test]
    fn numeric_column_with_long_values_is_ignored() {
        let t = table(
            &["timestamp", "pesan"],
            &[
                &["1700000000000", "ok"],
                &["1700000000001", "ya"],
            ],
        );
        assert_eq!(t.select_text_column(), Some(1));
    }
}
