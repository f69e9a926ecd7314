//! Named extraction rules for Turkish invoices.

pub mod store;

pub use store::PatternStore;

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

// Default matching expressions. Labels sit in non-capturing groups so the
// first capturing group of whichever alternative fires is the value.
pub const DATE_PATTERN: &str = r"(\d{2}[./-]\d{2}[./-]\d{4})|(\d{4}[./-]\d{2}[./-]\d{2})";
pub const TOTAL_PATTERN: &str = r"(?:Toplam|Genel Toplam|Tutar)[^\d]*(\d{1,3}(?:[.,]\d{3})*[.,]\d{2})|(\d{1,3}(?:[.,]\d{3})*[.,]\d{2})\s*(?:TL|TRY|₺)";
pub const INVOICE_NO_PATTERN: &str = r"(?:Fatura No|Fatura Numarası|No|Numara)[^\w]*(\w{5,})|No[:\s]+(\w{5,})";
pub const SELLER_PATTERN: &str = r"(?:Satıcı|Firma|Şirket)[^\n:]*[:\s]+([\w \-\.]+)";
pub const TAX_PATTERN: &str = r"(?:Vergi No|VKN|Vergi Numarası)[^\d]*(\d{10})";
pub const PURCHASE_PATTERN: &str = r"(?:Satın Alım|Alım|Satınalma)[^\n:]*[:\s]+([\w \-\.]+)";
pub const SALE_PATTERN: &str = r"(?:Satış|Satılan|Satış İşlemi)[^\n:]*[:\s]+([\w \-\.]+)";

/// Descriptive tag attached to a rule. Display only; never consulted
/// during matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Date,
    Amount,
    InvoiceId,
    Seller,
    Tax,
    Purchase,
    Sale,
    #[default]
    Other,
}

impl Category {
    /// Map a tag string to a category. Any tag outside the known set
    /// (including legacy free-form labels) becomes `Other`.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "date" => Category::Date,
            "amount" => Category::Amount,
            "invoice-id" => Category::InvoiceId,
            "seller" => Category::Seller,
            "tax" => Category::Tax,
            "purchase" => Category::Purchase,
            "sale" => Category::Sale,
            _ => Category::Other,
        }
    }
}

// Reading an unknown tag must not fail the whole store document.
impl<'de> Deserialize<'de> for Category {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let tag = String::deserialize(deserializer)?;
        Ok(Category::from_tag(&tag))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Date => "date",
            Category::Amount => "amount",
            Category::InvoiceId => "invoice-id",
            Category::Seller => "seller",
            Category::Tax => "tax",
            Category::Purchase => "purchase",
            Category::Sale => "sale",
            Category::Other => "other",
        };
        f.write_str(name)
    }
}

/// One named extraction rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rule {
    /// Matching expression applied to normalized document text. May
    /// contain any number of capturing groups; validity is checked at
    /// match time, not on insertion.
    pub pattern: String,
    /// Illustrative sample value. Documentation only.
    #[serde(default)]
    pub example: String,
    /// Category tag, written as `type` in the store document.
    #[serde(rename = "type", default)]
    pub category: Category,
}

impl Rule {
    /// Create a rule with the given expression and no metadata.
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            example: String::new(),
            category: Category::Other,
        }
    }

    /// Set the illustrative example.
    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.example = example.into();
        self
    }

    /// Set the category tag.
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }
}

// Stored rules come in two shapes: a bare expression string (legacy
// shorthand) or the full object. Both must parse; writing always emits
// the object form via the derived Serialize above.
impl<'de> Deserialize<'de> for Rule {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Plain(String),
            Full {
                pattern: String,
                #[serde(default)]
                example: String,
                #[serde(rename = "type", default)]
                category: Category,
            },
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Plain(pattern) => Rule::new(pattern),
            Repr::Full {
                pattern,
                example,
                category,
            } => Rule {
                pattern,
                example,
                category,
            },
        })
    }
}

/// Ordered rule collection as held by the store. Iteration order is the
/// store document's insertion order.
pub type RuleSet = IndexMap<String, Rule>;

/// The built-in rule set seeded into an absent store document.
pub fn default_rules() -> RuleSet {
    let mut rules = RuleSet::new();
    rules.insert(
        "date".to_string(),
        Rule::new(DATE_PATTERN)
            .with_example("01.01.2023")
            .with_category(Category::Date),
    );
    rules.insert(
        "total".to_string(),
        Rule::new(TOTAL_PATTERN)
            .with_example("1.234,56 TL")
            .with_category(Category::Amount),
    );
    rules.insert(
        "invoice_no".to_string(),
        Rule::new(INVOICE_NO_PATTERN)
            .with_example("FTR20230001")
            .with_category(Category::InvoiceId),
    );
    rules.insert(
        "seller".to_string(),
        Rule::new(SELLER_PATTERN)
            .with_example("Axxion Yazılım")
            .with_category(Category::Seller),
    );
    rules.insert(
        "tax".to_string(),
        Rule::new(TAX_PATTERN)
            .with_example("1234567890")
            .with_category(Category::Tax),
    );
    rules.insert(
        "purchase".to_string(),
        Rule::new(PURCHASE_PATTERN)
            .with_example("Satın Alım: Bilgisayar")
            .with_category(Category::Purchase),
    );
    rules.insert(
        "sale".to_string(),
        Rule::new(SALE_PATTERN)
            .with_example("Satış: Yazıcı")
            .with_category(Category::Sale),
    );
    rules
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules_complete() {
        let rules = default_rules();
        let names: Vec<&str> = rules.keys().map(String::as_str).collect();
        assert_eq!(
            names,
            vec!["date", "total", "invoice_no", "seller", "tax", "purchase", "sale"]
        );
    }

    #[test]
    fn test_default_expressions_compile() {
        for (name, rule) in default_rules() {
            assert!(
                regex::Regex::new(&rule.pattern).is_ok(),
                "default rule {name} does not compile"
            );
        }
    }

    #[test]
    fn test_deserialize_plain_string() {
        let rule: Rule = serde_json::from_str(r#""\\d+""#).unwrap();
        assert_eq!(rule.pattern, r"\d+");
        assert_eq!(rule.example, "");
        assert_eq!(rule.category, Category::Other);
    }

    #[test]
    fn test_deserialize_object_form() {
        let rule: Rule = serde_json::from_str(
            r#"{"pattern": "\\d{10}", "example": "1234567890", "type": "tax"}"#,
        )
        .unwrap();
        assert_eq!(rule.pattern, r"\d{10}");
        assert_eq!(rule.example, "1234567890");
        assert_eq!(rule.category, Category::Tax);
    }

    #[test]
    fn test_deserialize_unknown_category_tag() {
        let rule: Rule =
            serde_json::from_str(r#"{"pattern": "x", "type": "vergi"}"#).unwrap();
        assert_eq!(rule.category, Category::Other);
    }

    #[test]
    fn test_serialize_emits_object_form() {
        let rule = Rule::new(r"\d+");
        let json = serde_json::to_value(&rule).unwrap();
        assert_eq!(json["pattern"], r"\d+");
        assert_eq!(json["example"], "");
        assert_eq!(json["type"], "other");
    }
}
