use insolvenztracker_lib::{MatchRecord, MatchRow};
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Clone, Debug, PartialEq)]
pub enum OutputFormat {
    Table,
    Markdown,
    Json,
}

impl OutputFormat {
    /// Unknown names fall back to a plain table.
    pub fn parse(name: &str) -> Self {
        match name {
            "json" => Self::Json,
            "markdown" | "md" => Self::Markdown,
            _ => Self::Table,
        }
    }
}

#[derive(Tabled)]
struct MatchTableRow {
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Confidence")]
    confidence: String,
    #[tabled(rename = "Client ID")]
    client_id: i64,
    #[tabled(rename = "Client")]
    client_name: String,
    #[tabled(rename = "Announced Company")]
    company_name: String,
    #[tabled(rename = "Case Number")]
    case_number: String,
    #[tabled(rename = "Court")]
    court: String,
    #[tabled(rename = "Published")]
    publication_date: String,
}

#[derive(Tabled, Serialize)]
pub struct NormalizedRow {
    #[tabled(rename = "Input")]
    pub input: String,
    #[tabled(rename = "Normalized")]
    pub normalized: String,
}

#[derive(Tabled, Serialize)]
pub struct ScoreRow {
    #[tabled(rename = "A")]
    pub a: String,
    #[tabled(rename = "B")]
    pub b: String,
    #[tabled(rename = "Token Set", display_with = "format_confidence")]
    pub token_set: f64,
    #[tabled(rename = "Token Sort", display_with = "format_confidence")]
    pub token_sort: f64,
    #[tabled(rename = "Hybrid", display_with = "format_confidence")]
    pub hybrid: f64,
}

// -- Row builders --

fn build_match_rows(matches: &[MatchRecord]) -> Vec<MatchTableRow> {
    matches
        .iter()
        .map(|m| MatchTableRow {
            kind: m.kind.to_string(),
            confidence: format_confidence(&m.confidence),
            client_id: m.client_id,
            client_name: m.client_name.clone(),
            company_name: m.announcement.company_name.clone(),
            case_number: m.announcement.case_number.clone(),
            court: m.announcement.court.clone(),
            publication_date: m.announcement.publication_date.clone(),
        })
        .collect()
}

fn build_flat_rows(matches: &[MatchRecord]) -> Vec<MatchRow> {
    matches.iter().map(MatchRecord::to_row).collect()
}

// -- Table / markdown output --

fn render<T: Tabled>(rows: Vec<T>, format: &OutputFormat) -> String {
    let mut table = Table::new(rows);
    if *format == OutputFormat::Markdown {
        table.with(Style::markdown());
    }
    table.to_string()
}

pub fn print_matches(matches: &[MatchRecord], format: &OutputFormat) {
    match format {
        OutputFormat::Json => print_json(&matches),
        _ => println!("{}", render(build_match_rows(matches), format)),
    }
}

/// Like [`print_matches`], but JSON carries one flat row per match.
/// Tables are already flat and render the same.
pub fn print_flat_matches(matches: &[MatchRecord], format: &OutputFormat) {
    match format {
        OutputFormat::Json => print_json(&build_flat_rows(matches)),
        _ => print_matches(matches, format),
    }
}

pub fn print_rows<T: Tabled + Serialize>(rows: Vec<T>, format: &OutputFormat) {
    match format {
        OutputFormat::Json => print_json(&rows),
        _ => println!("{}", render(rows, format)),
    }
}

// -- JSON output --

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

fn format_confidence(value: &f64) -> String {
    format!("{:.1}", value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use insolvenztracker_lib::{find_matches, AnnouncementRecord, ClientRecord};

    fn load_matches() -> Vec<MatchRecord> {
        let clients: Vec<ClientRecord> = serde_json::from_str(include_str!(
            "../../insolvenztracker_lib/tests/fixtures/clients.json"
        ))
        .unwrap();
        let announcements: Vec<AnnouncementRecord> = serde_json::from_str(include_str!(
            "../../insolvenztracker_lib/tests/fixtures/announcements.json"
        ))
        .unwrap();
        find_matches(&clients, &announcements, 80.0)
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!(OutputFormat::parse("json"), OutputFormat::Json);
        assert_eq!(OutputFormat::parse("markdown"), OutputFormat::Markdown);
        assert_eq!(OutputFormat::parse("md"), OutputFormat::Markdown);
        assert_eq!(OutputFormat::parse("table"), OutputFormat::Table);
        assert_eq!(OutputFormat::parse("xml"), OutputFormat::Table);
    }

    #[test]
    fn test_format_confidence() {
        assert_eq!(format_confidence(&100.0), "100.0");
        assert_eq!(format_confidence(&97.14009661835748), "97.1");
    }

    #[test]
    fn test_build_match_rows_mapping() {
        let matches = load_matches();
        let rows = build_match_rows(&matches);
        assert_eq!(rows.len(), 5);

        let row = &rows[0];
        assert_eq!(row.kind, "exact");
        assert_eq!(row.confidence, "100.0");
        assert_eq!(row.client_id, 1);
        assert_eq!(row.client_name, "Musterbau");
        assert_eq!(row.company_name, "Musterbau GmbH");
        assert_eq!(row.case_number, "IN 211/25");
        assert_eq!(row.court, "Amtsgericht München");
        assert_eq!(row.publication_date, "01.07.2025");

        assert_eq!(rows[1].kind, "soft");
        assert_eq!(rows[1].confidence, "97.1");
    }

    #[test]
    fn test_build_match_rows_empty() {
        let rows = build_match_rows(&[]);
        assert!(rows.is_empty());
    }

    #[test]
    fn test_build_flat_rows_inlines_announcement() {
        let rows = build_flat_rows(&load_matches());
        assert_eq!(rows.len(), 5);

        let value = serde_json::to_value(&rows[1]).unwrap();
        assert_eq!(value["match_type"], "soft");
        assert_eq!(value["client_id"], 2);
        assert_eq!(value["company_name"], "Baumueller Handels GmbH");
        assert_eq!(value["case_number"], "IN 87/25");
        assert!(value.get("announcement").is_none());
    }

    #[test]
    fn test_markdown_match_headers() {
        let rows = build_match_rows(&load_matches());
        let md = render(rows, &OutputFormat::Markdown);

        let header_line = md.lines().next().unwrap();
        assert!(header_line.starts_with('|'));
        assert!(header_line.contains("Type"));
        assert!(header_line.contains("Confidence"));
        assert!(header_line.contains("Case Number"));
    }

    #[test]
    fn test_table_contains_values() {
        let rows = build_match_rows(&load_matches());
        let table = render(rows, &OutputFormat::Table);
        assert!(table.contains("Baumueller Handels GmbH"));
        assert!(table.contains("IN 45/25"));
    }

    #[test]
    fn test_json_match_shape() {
        let matches = load_matches();
        let value = serde_json::to_value(&matches).unwrap();
        let first = &value[0];
        assert_eq!(first["kind"], "exact");
        assert_eq!(first["client_id"], 1);
        assert_eq!(first["matched_company_name"], "musterbau gmbh");
        assert_eq!(first["announcement"]["company_name"], "Musterbau GmbH");
    }
}
