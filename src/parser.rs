use crate::models::CsvRow;

pub const COL_DATE: &str = "Date";
pub const COL_TYPE: &str = "Type";
pub const COL_DESCRIPTION: &str = "Merchant/Description";
pub const COL_AMOUNT: &str = "Debit/Credit";
pub const COL_BALANCE: &str = "Balance";

/// Lines containing this are statement footers, not transactions.
const FOOTER_MARKER: &str = "Arranged overdraft limit";

/// Parse a semicolon-delimited statement export into rows keyed by the header line.
///
/// Blank lines, footer lines and lines with fewer fields than the header are dropped
/// without error. Fields are split verbatim on `;` (no quote handling) and trimmed.
pub fn parse_statement(text: &str) -> Vec<CsvRow> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut records = rdr.records().filter_map(|r| r.ok());
    let Some(header) = records.next() else {
        return Vec::new();
    };
    let columns: Vec<String> = header.iter().map(str::to_string).collect();
    let mut rows = Vec::new();

    for record in records {
        // A whitespace-only line comes through as a single empty field.
        if record.len() == 1 && record[0].is_empty() {
            continue;
        }
        if record.iter().any(|f| f.contains(FOOTER_MARKER)) {
            continue;
        }
        if record.len() < columns.len() {
            continue;
        }
        let mut row = CsvRow::default();
        for (column, value) in columns.iter().zip(record.iter()) {
            row.insert(column, value);
        }
        rows.push(row);
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Date;Type;Merchant/Description;Debit/Credit;Balance";

    fn statement(lines: &[&str]) -> String {
        let mut text = String::from(HEADER);
        for line in lines {
            text.push('\n');
            text.push_str(line);
        }
        text
    }

    #[test]
    fn test_rows_keyed_by_header() {
        let text = statement(&["05/03/2024;DEBIT;TESCO STORES;-£12.50;£987.50"]);
        let rows = parse_statement(&text);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get(COL_DATE), Some("05/03/2024"));
        assert_eq!(rows[0].get(COL_TYPE), Some("DEBIT"));
        assert_eq!(rows[0].get(COL_DESCRIPTION), Some("TESCO STORES"));
        assert_eq!(rows[0].get(COL_AMOUNT), Some("-£12.50"));
        assert_eq!(rows[0].get(COL_BALANCE), Some("£987.50"));
    }

    #[test]
    fn test_values_and_header_are_trimmed() {
        let text = " Date ; Type ;Merchant/Description; Debit/Credit ;Balance\n 01/02/2024 ; FPI ;  ACME  ; +£5.00 ; £5.00 ";
        let rows = parse_statement(text);
        assert_eq!(rows[0].get(COL_DATE), Some("01/02/2024"));
        assert_eq!(rows[0].get(COL_DESCRIPTION), Some("ACME"));
        assert_eq!(rows[0].get(COL_AMOUNT), Some("+£5.00"));
    }

    #[test]
    fn test_empty_values_are_omitted() {
        let text = statement(&["05/03/2024;DEBIT;;-£12.50;"]);
        let rows = parse_statement(&text);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get(COL_DESCRIPTION), None);
        assert_eq!(rows[0].get(COL_BALANCE), None);
        assert_eq!(rows[0].get(COL_TYPE), Some("DEBIT"));
    }

    #[test]
    fn test_drops_blank_footer_and_short_lines() {
        let text = statement(&[
            "05/03/2024;DEBIT;TESCO;-£12.50;£987.50",
            "",
            "   ",
            "06/03/2024;DEBIT;SHORT",
            "Arranged overdraft limit;;;;",
            "07/03/2024;FPI;SALARY;+£1000.00;£1987.50",
            "",
            "",
        ]);
        let rows = parse_statement(&text);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get(COL_DESCRIPTION), Some("TESCO"));
        assert_eq!(rows[1].get(COL_DESCRIPTION), Some("SALARY"));
    }

    #[test]
    fn test_trailing_blank_lines_do_not_change_count() {
        let body = ["05/03/2024;DEBIT;TESCO;-£12.50;£987.50"];
        let plain = parse_statement(&statement(&body));
        let padded = parse_statement(&format!("{}\n\n\n", statement(&body)));
        assert_eq!(plain.len(), padded.len());
    }

    #[test]
    fn test_crlf_line_endings() {
        let text = format!("{HEADER}\r\n05/03/2024;DEBIT;TESCO;-£12.50;£987.50\r\n");
        let rows = parse_statement(&text);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get(COL_BALANCE), Some("£987.50"));
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let text = statement(&["05/03/2024;DEBIT;TESCO;-£12.50;£987.50;extra"]);
        let rows = parse_statement(&text);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("extra"), None);
    }

    #[test]
    fn test_all_empty_fields_still_form_a_row() {
        let rows = parse_statement(&statement(&[";;;;"]));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0], CsvRow::default());
    }

    #[test]
    fn test_parsing_is_repeatable() {
        let text = statement(&[
            "05/03/2024;DEBIT;TESCO;-£12.50;£987.50",
            "07/03/2024;FPI;SALARY;+£1000.00;£1987.50",
        ]);
        assert_eq!(parse_statement(&text), parse_statement(&text));
    }

    #[test]
    fn test_header_only_or_empty_input() {
        assert!(parse_statement(HEADER).is_empty());
        assert!(parse_statement("").is_empty());
    }
}
