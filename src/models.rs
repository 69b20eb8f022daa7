use chrono::Local;
use serde::{Deserialize, Serialize};

/// One expense record as the remote service returns it from `/display`.
///
/// The service keys records positionally; there is no stable id. Edits locate
/// a record by asserting its previous field values (see [`ExpenseFields::match_key`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub expense_date: String,
    pub expense_category: String,
    pub expense_amount: String,
}

/// The editable field triple, used both for the draft the user mutates and for
/// the pre-edit snapshot that becomes the match key on submit.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseFields {
    /// Calendar date serialized as `YYYY-MM-DD`.
    pub date: String,
    /// Free-text category.
    pub category: String,
    /// Non-negative numeric amount, kept as the string the service stores.
    pub amount: String,
}

impl ExpenseFields {
    /// Default form state: zero amount, empty category, today's date.
    pub fn blank() -> Self {
        Self {
            date: today_string(),
            category: String::new(),
            amount: "0".to_string(),
        }
    }

    /// Encode these values as the `selected_data` match key the edit endpoints
    /// expect: literal `Key=value` strings in Date, Category, Amount order.
    pub fn match_key(&self) -> [String; 3] {
        [
            format!("Date={}", self.date),
            format!("Category={}", self.category),
            format!("Amount={}", self.amount),
        ]
    }
}

impl From<&ExpenseRecord> for ExpenseFields {
    fn from(record: &ExpenseRecord) -> Self {
        Self {
            date: record.expense_date.clone(),
            category: record.expense_category.clone(),
            amount: record.expense_amount.clone(),
        }
    }
}

/// Today's local date as `YYYY-MM-DD` (chrono months are already 1-based).
pub fn today_string() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

/// Display currency for the amount field. Cosmetic only: the service stores
/// amounts as bare numeric strings and no request payload carries a currency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Currency {
    Dollar,
    Euro,
    Rupee,
}

impl Currency {
    pub const ALL: [Currency; 3] = [Currency::Dollar, Currency::Euro, Currency::Rupee];

    pub fn symbol(&self) -> &str {
        match self {
            Currency::Dollar => "$",
            Currency::Euro => "€",
            Currency::Rupee => "₹",
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Currency::Dollar => "Dollar",
            Currency::Euro => "Euro",
            Currency::Rupee => "Rupee",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn match_key_uses_literal_key_value_strings() {
        let fields = ExpenseFields {
            date: "2024-02-02".to_string(),
            category: "Rent".to_string(),
            amount: "500".to_string(),
        };
        assert_eq!(
            fields.match_key(),
            [
                "Date=2024-02-02".to_string(),
                "Category=Rent".to_string(),
                "Amount=500".to_string(),
            ]
        );
    }

    #[test]
    fn blank_fields_default_to_zero_amount_and_today() {
        let blank = ExpenseFields::blank();
        assert_eq!(blank.amount, "0");
        assert_eq!(blank.category, "");
        assert_eq!(blank.date, today_string());
    }

    #[test]
    fn fields_mirror_a_wire_record() {
        let record = ExpenseRecord {
            expense_date: "2024-01-01".to_string(),
            expense_category: "Food".to_string(),
            expense_amount: "10".to_string(),
        };
        let fields = ExpenseFields::from(&record);
        assert_eq!(fields.date, "2024-01-01");
        assert_eq!(fields.category, "Food");
        assert_eq!(fields.amount, "10");
    }

    #[test]
    fn record_deserializes_from_display_payload() {
        let json = r#"{"expense_date":"2024-02-02","expense_category":"Rent","expense_amount":"500"}"#;
        let record: ExpenseRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.expense_category, "Rent");
    }
}
