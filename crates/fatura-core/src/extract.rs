//! Invoice field extraction over stored rules.

use indexmap::IndexMap;
use tracing::debug;

use crate::matcher::{find_field, GroupPolicy, MatchOptions};
use crate::rules::RuleSet;
use crate::table::Record;

/// Sentinel recorded for a field when no value could be extracted.
/// Distinct from an error; kept in Turkish for compatibility with
/// exports produced by earlier tooling.
pub const NOT_FOUND: &str = "bulunamadı";

/// The closed set of canonical invoice fields, in record order.
pub const CANONICAL_FIELDS: [&str; 5] = ["date", "total", "invoice_no", "seller", "tax"];

/// Values of the five canonical invoice fields. `None` means not found;
/// the sentinel is applied only when the result is rendered into a
/// record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvoiceFields {
    pub date: Option<String>,
    pub total: Option<String>,
    pub invoice_no: Option<String>,
    pub seller: Option<String>,
    pub tax: Option<String>,
}

impl InvoiceFields {
    /// Render into a record with the canonical keys in canonical order.
    pub fn into_record(self, source_name: impl Into<String>) -> Record {
        let mut record = Record::new(source_name);
        record.insert("date", self.date.unwrap_or_else(not_found));
        record.insert("total", self.total.unwrap_or_else(not_found));
        record.insert("invoice_no", self.invoice_no.unwrap_or_else(not_found));
        record.insert("seller", self.seller.unwrap_or_else(not_found));
        record.insert("tax", self.tax.unwrap_or_else(not_found));
        record
    }
}

fn not_found() -> String {
    NOT_FOUND.to_string()
}

/// Extract the five canonical fields from normalized text.
///
/// Each field applies its stored rule under the first-group policy.
/// `date` matches case-sensitively (dates carry no letters worth
/// folding); the other four are case-insensitive. Fields fail
/// independently: a missing rule, an invalid expression, or plain
/// absence of a match each leave only that field unfound.
pub fn extract_canonical(rules: &RuleSet, text: &str) -> InvoiceFields {
    let fields = InvoiceFields {
        date: canonical_field(rules, "date", text, false),
        total: canonical_field(rules, "total", text, true),
        invoice_no: canonical_field(rules, "invoice_no", text, true),
        seller: canonical_field(rules, "seller", text, true),
        tax: canonical_field(rules, "tax", text, true),
    };
    debug!(
        "canonical extraction: date={} total={} invoice_no={} seller={} tax={}",
        fields.date.is_some(),
        fields.total.is_some(),
        fields.invoice_no.is_some(),
        fields.seller.is_some(),
        fields.tax.is_some(),
    );
    fields
}

fn canonical_field(
    rules: &RuleSet,
    name: &str,
    text: &str,
    case_insensitive: bool,
) -> Option<String> {
    let rule = rules.get(name)?;
    find_field(
        &rule.pattern,
        text,
        MatchOptions::new(GroupPolicy::FirstGroup).case_insensitive(case_insensitive),
    )
}

/// Apply every stored rule to the text under the whole-match policy, in
/// store order. This is the flexible path for user-extensible rule
/// sets; values include whatever label text the expression spans.
pub fn extract_dynamic(rules: &RuleSet, text: &str) -> IndexMap<String, Option<String>> {
    rules
        .iter()
        .map(|(name, rule)| {
            let value = find_field(
                &rule.pattern,
                text,
                MatchOptions::new(GroupPolicy::WholeMatch),
            );
            (name.clone(), value)
        })
        .collect()
}

/// Build the canonical-mode record for one document.
pub fn canonical_record(rules: &RuleSet, text: &str, source_name: impl Into<String>) -> Record {
    extract_canonical(rules, text).into_record(source_name)
}

/// Build the bulk-mode record for one document: one value per stored
/// rule, keyed by rule name.
pub fn dynamic_record(rules: &RuleSet, text: &str, source_name: impl Into<String>) -> Record {
    let mut record = Record::new(source_name);
    for (name, value) in extract_dynamic(rules, text) {
        record.insert(name, value.unwrap_or_else(not_found));
    }
    record
}
