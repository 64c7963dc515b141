use super::reader::CsvRow;
use crate::utils::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Newline {
    Lf,
    #[default]
    Crlf,
}

impl Newline {
    pub fn as_str(&self) -> &'static str {
        match self {
            Newline::Lf => "\n",
            Newline::Crlf => "\r\n",
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CsvWriteOptions {
    pub include_bom: bool,
    pub newline: Newline,
}

/// Quotes a field iff it contains a double-quote, comma, CR, LF, or
/// leading/trailing whitespace; embedded quotes are doubled. Everything else
/// passes through verbatim.
pub fn escape_field(value: &str) -> String {
    let needs_quoting = value.contains('"')
        || value.contains(',')
        || value.contains('\r')
        || value.contains('\n')
        || value != value.trim();

    if needs_quoting {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Renders the header line plus one line per row in header order. Missing
/// keys serialize as the empty string. No trailing line terminator.
pub fn serialize_rows(headers: &[String], rows: &[CsvRow], opts: CsvWriteOptions) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);

    let header_line: Vec<String> = headers.iter().map(|h| escape_field(h)).collect();
    lines.push(header_line.join(","));

    for row in rows {
        let fields: Vec<String> = headers
            .iter()
            .map(|h| escape_field(row.get(h).map(String::as_str).unwrap_or("")))
            .collect();
        lines.push(fields.join(","));
    }

    let mut out = String::new();
    if opts.include_bom {
        out.push('\u{feff}');
    }
    out.push_str(&lines.join(opts.newline.as_str()));
    out
}

pub async fn write_csv_file(
    path: &str,
    headers: &[String],
    rows: &[CsvRow],
    opts: CsvWriteOptions,
) -> Result<()> {
    let text = serialize_rows(headers, rows, opts);
    tokio::fs::write(path, text).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::reader::parse_csv;
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn row(pairs: &[(&str, &str)]) -> CsvRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn plain_field_is_verbatim() {
        assert_eq!(escape_field("hello"), "hello");
    }

    #[test]
    fn internal_spaces_are_never_quoted() {
        assert_eq!(escape_field("a b c"), "a b c");
    }

    #[test]
    fn embedded_quotes_are_doubled_and_wrapped() {
        assert_eq!(escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn comma_and_newline_force_quoting() {
        assert_eq!(escape_field("a,b"), "\"a,b\"");
        assert_eq!(escape_field("a\nb"), "\"a\nb\"");
        assert_eq!(escape_field("a\rb"), "\"a\rb\"");
    }

    #[test]
    fn boundary_whitespace_forces_quoting() {
        assert_eq!(escape_field(" a"), "\" a\"");
        assert_eq!(escape_field("a "), "\"a \"");
    }

    #[test]
    fn serializes_with_default_crlf() {
        let text = serialize_rows(
            &headers(&["a", "b"]),
            &[row(&[("a", "1"), ("b", "2")])],
            CsvWriteOptions::default(),
        );
        assert_eq!(text, "a,b\r\n1,2");
    }

    #[test]
    fn lf_newline_and_bom_options() {
        let opts = CsvWriteOptions {
            include_bom: true,
            newline: Newline::Lf,
        };
        let text = serialize_rows(&headers(&["a"]), &[row(&[("a", "1")])], opts);
        assert_eq!(text, "\u{feff}a\n1");
    }

    #[test]
    fn missing_key_serializes_as_empty() {
        let text = serialize_rows(
            &headers(&["a", "b"]),
            &[row(&[("a", "1")])],
            CsvWriteOptions::default(),
        );
        assert_eq!(text, "a,b\r\n1,");
    }

    #[test]
    fn round_trips_through_parse() {
        let hs = headers(&["a", "b", "c"]);
        let rows = vec![
            row(&[("a", "plain"), ("b", "with \"quotes\""), ("c", "x,y\nz")]),
            row(&[("a", "spaced out"), ("b", ""), ("c", "2")]),
        ];
        let text = serialize_rows(&hs, &rows, CsvWriteOptions::default());
        let parsed = parse_csv(&text).unwrap();
        assert_eq!(parsed.headers, hs);
        assert_eq!(parsed.rows, rows);
    }
}
