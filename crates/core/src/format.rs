//! Renders a raw result set into markdown-flavored display text.
//!
//! Branch order: error line, empty-set line, count, total (deals only),
//! then the numbered list capped at the first ten results. Unknown object
//! types get only the generic header.

use serde_json::Value;

use crate::catalog::ObjectType;
use crate::intent::{QueryIntent, SummaryType};
use crate::records::{Record, ResultSet};
use crate::stages::StageVocabulary;

const LIST_CAP: usize = 10;

pub fn format_response(
    result_set: &ResultSet,
    intent: &QueryIntent,
    stages: &StageVocabulary,
) -> String {
    if let Some(error) = &result_set.error {
        return format!("❌ Sorry, I encountered an error: {error}");
    }

    let results = &result_set.results;
    if results.is_empty() {
        return "🔍 I couldn't find any matching records.".to_string();
    }

    match intent.summary_type {
        SummaryType::Count => {
            format!("📊 Total {}: **{}**", intent.object_type, results.len())
        }
        SummaryType::Total if intent.object_type == "deals" => {
            let total: f64 = results.iter().map(|record| record.number("amount")).sum();
            format!(
                "💰 Total deal value: **{}** across {} deals",
                format_currency(total),
                results.len()
            )
        }
        // "total" over non-deals and any unrecognized mode render as a list.
        _ => format_list(results, intent, stages),
    }
}

fn format_list(results: &[Record], intent: &QueryIntent, stages: &StageVocabulary) -> String {
    let mut lines = vec![format!("📋 I found **{} {}**:\n", results.len(), intent.object_type)];

    let object_type = ObjectType::parse(&intent.object_type);
    for (index, record) in results.iter().take(LIST_CAP).enumerate() {
        let position = index + 1;
        match object_type {
            Some(ObjectType::Deals) => push_deal(&mut lines, position, record, stages),
            Some(ObjectType::Contacts) => push_contact(&mut lines, position, record),
            Some(ObjectType::Companies) => push_company(&mut lines, position, record),
            // Unknown object type: header only, no per-record detail.
            None => {}
        }
    }

    if results.len() > LIST_CAP {
        lines.push(format!("\n_...and {} more results._", results.len() - LIST_CAP));
    }

    lines.join("\n")
}

fn push_deal(lines: &mut Vec<String>, position: usize, record: &Record, stages: &StageVocabulary) {
    let name = record.text_or("dealname", "Unnamed Deal");
    let raw_stage = record.text_or("dealstage", "N/A");
    let stage = stages.label_for(raw_stage).unwrap_or(raw_stage);

    lines.push(format!("**{position}.** 🏷️ {name}"));
    lines.push(format!("   - 💵 Amount: {}", amount_display(record)));
    lines.push(format!("   - 📊 Stage: {stage}"));
    if let Some(close_date) = record.text("closedate") {
        lines.push(format!("   - 📅 Close Date: {}", date_portion(close_date)));
    }
    lines.push(String::new());
}

fn push_contact(lines: &mut Vec<String>, position: usize, record: &Record) {
    let first = record.text_or("firstname", "");
    let last = record.text_or("lastname", "");
    let full = format!("{first} {last}");
    let name = full.trim();
    let name = if name.is_empty() { "Unnamed Contact" } else { name };

    lines.push(format!("**{position}.** 👤 {name}"));
    lines.push(format!("   - 📧 Email: {}", record.text_or("email", "N/A")));
    if let Some(company) = record.text("company") {
        lines.push(format!("   - 🏢 Company: {company}"));
    }
    lines.push(String::new());
}

fn push_company(lines: &mut Vec<String>, position: usize, record: &Record) {
    lines.push(format!("**{position}.** 🏢 {}", record.text_or("name", "Unnamed Company")));
    if let Some(industry) = record.text("industry") {
        lines.push(format!("   - 🏭 Industry: {industry}"));
    }
    if let Some(domain) = record.text("domain") {
        lines.push(format!("   - 🌐 Domain: {domain}"));
    }
    lines.push(String::new());
}

/// Deal amounts render as currency when numeric, "N/A" otherwise; an
/// absent amount counts as zero.
fn amount_display(record: &Record) -> String {
    let parsed = match record.properties.get("amount") {
        Some(Value::Number(number)) => number.as_f64(),
        Some(Value::String(text)) => text.trim().parse().ok(),
        Some(_) => None,
        None => Some(0.0),
    };
    match parsed {
        Some(amount) => format_currency(amount),
        None => "N/A".to_string(),
    }
}

/// First ten characters of an ISO-style timestamp, i.e. the date portion.
fn date_portion(raw: &str) -> &str {
    raw.get(..10).unwrap_or(raw)
}

/// Two decimal places with thousands separators, e.g. `$1,234,567.89`.
pub fn format_currency(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let total_cents = (amount.abs() * 100.0).round() as u64;
    let whole = (total_cents / 100).to_string();
    let cents = total_cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    format!("{sign}${grouped}.{cents:02}")
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use serde_json::json;

    use super::{format_currency, format_response};
    use crate::intent::{QueryIntent, SummaryType};
    use crate::records::{Record, ResultSet};
    use crate::stages::StageVocabulary;

    fn intent(object_type: &str, summary_type: SummaryType) -> QueryIntent {
        QueryIntent {
            object_type: object_type.to_string(),
            filters: BTreeMap::new(),
            properties: vec!["dealname".to_string(), "amount".to_string()],
            limit: 10,
            summary_type,
        }
    }

    fn record(properties: serde_json::Value) -> Record {
        serde_json::from_value(json!({ "properties": properties })).unwrap()
    }

    fn result_set(records: Vec<Record>) -> ResultSet {
        ResultSet { results: records, error: None }
    }

    #[test]
    fn error_result_renders_a_single_error_line() {
        let output = format_response(
            &ResultSet::from_error("503 Service Unavailable"),
            &intent("deals", SummaryType::List),
            &StageVocabulary::new(),
        );
        assert_eq!(output, "❌ Sorry, I encountered an error: 503 Service Unavailable");
        assert_eq!(output.lines().count(), 1);
    }

    #[test]
    fn empty_results_render_a_not_found_line() {
        let output = format_response(
            &result_set(Vec::new()),
            &intent("contacts", SummaryType::List),
            &StageVocabulary::new(),
        );
        assert_eq!(output, "🔍 I couldn't find any matching records.");
    }

    #[test]
    fn count_summary_states_the_result_count() {
        let records = (0..7).map(|_| record(json!({"email": "x@y.z"}))).collect();
        let output = format_response(
            &result_set(records),
            &intent("contacts", SummaryType::Count),
            &StageVocabulary::new(),
        );
        assert_eq!(output, "📊 Total contacts: **7**");
    }

    #[test]
    fn total_summary_sums_amounts_leniently() {
        let records = vec![
            record(json!({"amount": "100.50"})),
            record(json!({"amount": null})),
            record(json!({"amount": "49.5"})),
        ];
        let output = format_response(
            &result_set(records),
            &intent("deals", SummaryType::Total),
            &StageVocabulary::new(),
        );
        assert_eq!(output, "💰 Total deal value: **$150.00** across 3 deals");
    }

    #[test]
    fn total_over_non_deals_falls_back_to_list() {
        let records = vec![record(json!({"name": "Initech"}))];
        let output = format_response(
            &result_set(records),
            &intent("companies", SummaryType::Total),
            &StageVocabulary::new(),
        );
        assert!(output.starts_with("📋 I found **1 companies**:"));
        assert!(output.contains("🏢 Initech"));
    }

    #[test]
    fn list_caps_at_ten_and_notes_the_rest() {
        let records = (1..=15)
            .map(|n| record(json!({"dealname": format!("Deal {n}"), "amount": "100"})))
            .collect();
        let output = format_response(
            &result_set(records),
            &intent("deals", SummaryType::List),
            &StageVocabulary::new(),
        );
        assert!(output.contains("**10.** 🏷️ Deal 10"));
        assert!(!output.contains("Deal 11"));
        assert!(output.contains("_...and 5 more results._"));
    }

    #[test]
    fn deal_fields_fall_back_per_field() {
        let records = vec![record(json!({
            "amount": "not a number",
            "dealstage": "contractsent",
            "closedate": "2026-03-15T00:00:00Z"
        }))];
        let output = format_response(
            &result_set(records),
            &intent("deals", SummaryType::List),
            &StageVocabulary::new(),
        );
        assert!(output.contains("🏷️ Unnamed Deal"));
        assert!(output.contains("Amount: N/A"));
        assert!(output.contains("Stage: Contract Sent"));
        assert!(output.contains("Close Date: 2026-03-15"));
    }

    #[test]
    fn missing_amount_renders_as_zero_dollars() {
        let records = vec![record(json!({"dealname": "No amount yet"}))];
        let output = format_response(
            &result_set(records),
            &intent("deals", SummaryType::List),
            &StageVocabulary::new(),
        );
        assert!(output.contains("Amount: $0.00"));
    }

    #[test]
    fn unknown_stage_codes_render_raw() {
        let records = vec![record(json!({"dealname": "Custom", "dealstage": "negotiation"}))];
        let output = format_response(
            &result_set(records),
            &intent("deals", SummaryType::List),
            &StageVocabulary::new(),
        );
        assert!(output.contains("Stage: negotiation"));
    }

    #[test]
    fn contact_rendering_builds_full_names() {
        let records = vec![
            record(json!({"firstname": "Ada", "lastname": "Lovelace", "email": "ada@acme.io", "company": "Acme"})),
            record(json!({})),
        ];
        let output = format_response(
            &result_set(records),
            &intent("contacts", SummaryType::List),
            &StageVocabulary::new(),
        );
        assert!(output.contains("👤 Ada Lovelace"));
        assert!(output.contains("Email: ada@acme.io"));
        assert!(output.contains("Company: Acme"));
        assert!(output.contains("👤 Unnamed Contact"));
        assert!(output.contains("Email: N/A"));
    }

    #[test]
    fn company_rendering_skips_absent_fields() {
        let records = vec![record(json!({"name": "Globex", "industry": "Manufacturing"}))];
        let output = format_response(
            &result_set(records),
            &intent("companies", SummaryType::List),
            &StageVocabulary::new(),
        );
        assert!(output.contains("🏢 Globex"));
        assert!(output.contains("Industry: Manufacturing"));
        assert!(!output.contains("Domain:"));
    }

    #[test]
    fn unknown_object_type_renders_generic_header_only() {
        let records = vec![record(json!({"name": "Widget"}))];
        let output = format_response(
            &result_set(records),
            &intent("products", SummaryType::List),
            &StageVocabulary::new(),
        );
        assert!(output.starts_with("📋 I found **1 products**:"));
        assert!(!output.contains("Widget"));
    }

    #[test]
    fn currency_formatting_groups_thousands() {
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(999.999), "$1,000.00");
        assert_eq!(format_currency(1_234_567.89), "$1,234,567.89");
        assert_eq!(format_currency(-45.5), "-$45.50");
    }
}
