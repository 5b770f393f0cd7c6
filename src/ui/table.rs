//! ui::table
//!
//! Plain ASCII tables.
//!
//! ```text
//! +-------------+----------+
//! | FORK        | AHEAD BY |
//! +-------------+----------+
//! | alice/hello | 4        |
//! +-------------+----------+
//! ```
//!
//! Widths are measured in chars, so non-ASCII names stay aligned as long
//! as the terminal renders them one column wide.

/// A table with a header row.
#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Create a table. Headers are shown upper-cased.
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            headers: headers
                .into_iter()
                .map(|h| h.as_ref().to_uppercase())
                .collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row. Missing cells render empty, extra cells are dropped.
    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    fn widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(i))
                    .map(|cell| cell.chars().count())
                    .chain(std::iter::once(header.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    /// Render the table, one line per row plus borders, ending in a newline.
    pub fn render(&self) -> String {
        let widths = self.widths();
        let separator = separator_line(&widths);

        let mut out = String::new();
        out.push_str(&separator);
        out.push_str(&row_line(&self.headers, &widths));
        out.push_str(&separator);
        for row in &self.rows {
            out.push_str(&row_line(row, &widths));
        }
        out.push_str(&separator);
        out
    }
}

fn separator_line(widths: &[usize]) -> String {
    let mut line = String::from("+");
    for width in widths {
        line.push_str(&"-".repeat(width + 2));
        line.push('+');
    }
    line.push('\n');
    line
}

fn row_line(cells: &[String], widths: &[usize]) -> String {
    let mut line = String::from("|");
    for (i, width) in widths.iter().enumerate() {
        let cell = cells.get(i).map(String::as_str).unwrap_or("");
        let pad = width - cell.chars().count();
        line.push(' ');
        line.push_str(cell);
        line.push_str(&" ".repeat(pad + 1));
        line.push('|');
    }
    line.push('\n');
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_aligned_columns() {
        let mut table = Table::new(["Fork", "Ahead by"]);
        table.push_row(vec!["alice/hello".into(), "4".into()]);
        table.push_row(vec!["bo/x".into(), "12".into()]);

        let expected = "\
+-------------+----------+
| FORK        | AHEAD BY |
+-------------+----------+
| alice/hello | 4        |
| bo/x        | 12       |
+-------------+----------+
";
        assert_eq!(table.render(), expected);
    }

    #[test]
    fn short_rows_are_padded() {
        let mut table = Table::new(["a", "b"]);
        table.push_row(vec!["x".into()]);

        let rendered = table.render();
        assert!(rendered.contains("| x |   |"), "{}", rendered);
    }

    #[test]
    fn empty_table_has_header_only() {
        let table = Table::new(["Fork"]);
        assert_eq!(table.render().lines().count(), 4);
    }

    #[test]
    fn width_counts_chars_not_bytes() {
        let mut table = Table::new(["n"]);
        table.push_row(vec!["ü".into()]);
        let rendered = table.render();
        assert!(rendered.contains("| ü |"), "{}", rendered);
        assert!(rendered.starts_with("+---+\n"));
    }
}
