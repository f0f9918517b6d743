//! Parses and validates the request body for creating a transaction.

use serde_json::{Map, Value};

use crate::{
    transaction::{NewTransaction, TransactionType},
    validation::{FieldIssue, ValidationError},
};

/// Minor units per major currency unit, e.g. cents per dollar.
const MINOR_UNITS_PER_MAJOR: f64 = 100.0;

/// The largest amount magnitude accepted, in minor units.
///
/// This is 2^53 - 1, the largest integer a JSON client holding numbers as
/// IEEE 754 doubles can represent exactly.
const MAX_AMOUNT_MINOR_UNITS: i64 = 9_007_199_254_740_991;

/// Parse the JSON `body` of a create transaction request.
///
/// The body must be an object with the fields `title` (string), `amount`
/// (number, in major units) and `type` (`"credit"` or `"debit"`). Unknown
/// fields are ignored.
///
/// # Errors
/// Returns a [ValidationError] listing every missing or malformed field. If
/// the body is not a JSON object the single issue is reported on `body`.
pub fn parse_new_transaction(body: &[u8]) -> Result<NewTransaction, ValidationError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|error| ValidationError::single("body", &format!("invalid JSON: {error}")))?;

    let Value::Object(fields) = value else {
        return Err(ValidationError::single("body", "expected a JSON object"));
    };

    let mut issues = Vec::new();
    let title = collect(&mut issues, parse_title(&fields));
    let amount = collect(&mut issues, parse_amount(&fields));
    let transaction_type = collect(&mut issues, parse_type(&fields));

    match (title, amount, transaction_type) {
        (Some(title), Some(magnitude), Some(transaction_type)) if issues.is_empty() => {
            Ok(NewTransaction {
                title,
                amount: transaction_type.signed(magnitude),
            })
        }
        _ => Err(ValidationError { issues }),
    }
}

fn collect<T>(issues: &mut Vec<FieldIssue>, result: Result<T, FieldIssue>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(issue) => {
            issues.push(issue);
            None
        }
    }
}

fn required<'a>(fields: &'a Map<String, Value>, field: &str) -> Result<&'a Value, FieldIssue> {
    fields
        .get(field)
        .ok_or_else(|| FieldIssue::new(field, "is required"))
}

fn parse_title(fields: &Map<String, Value>) -> Result<String, FieldIssue> {
    match required(fields, "title")? {
        Value::String(title) => Ok(title.to_owned()),
        _ => Err(FieldIssue::new("title", "expected a string")),
    }
}

fn parse_amount(fields: &Map<String, Value>) -> Result<i64, FieldIssue> {
    let amount = match required(fields, "amount")? {
        Value::Number(number) => number.as_f64(),
        _ => None,
    }
    .ok_or_else(|| FieldIssue::new("amount", "expected a number"))?;

    to_minor_units(amount)
        .ok_or_else(|| FieldIssue::new("amount", "must be at most 90071992547409.91"))
}

fn parse_type(fields: &Map<String, Value>) -> Result<TransactionType, FieldIssue> {
    match required(fields, "type")? {
        Value::String(kind) if kind == "credit" => Ok(TransactionType::Credit),
        Value::String(kind) if kind == "debit" => Ok(TransactionType::Debit),
        _ => Err(FieldIssue::new("type", "expected \"credit\" or \"debit\"")),
    }
}

/// Convert an amount in major units to minor units, rounding to the nearest
/// minor unit.
///
/// Returns `None` if the magnitude of the result exceeds
/// [MAX_AMOUNT_MINOR_UNITS].
fn to_minor_units(amount: f64) -> Option<i64> {
    let minor_units = (amount * MINOR_UNITS_PER_MAJOR).round();

    if minor_units.is_finite() && minor_units.abs() <= MAX_AMOUNT_MINOR_UNITS as f64 {
        Some(minor_units as i64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::transaction::{NewTransaction, form::parse_new_transaction};

    fn parse(body: serde_json::Value) -> Result<NewTransaction, crate::validation::ValidationError> {
        parse_new_transaction(body.to_string().as_bytes())
    }

    #[test]
    fn credit_is_stored_positive_in_cents() {
        let got = parse(json!({ "title": "Salary", "amount": 10, "type": "credit" }));

        assert_eq!(
            got,
            Ok(NewTransaction {
                title: "Salary".to_owned(),
                amount: 1000
            })
        );
    }

    #[test]
    fn debit_is_stored_negative_in_cents() {
        let got = parse(json!({ "title": "Coffee", "amount": 10, "type": "debit" }));

        assert_eq!(got.map(|transaction| transaction.amount), Ok(-1000));
    }

    #[test]
    fn fractional_amounts_round_to_nearest_cent() {
        let got = parse(json!({ "title": "Coffee", "amount": 10.1, "type": "credit" }));

        assert_eq!(got.map(|transaction| transaction.amount), Ok(1010));
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let got = parse(json!({ "title": "a", "amount": 1, "type": "credit", "note": true }));

        assert!(got.is_ok(), "want Ok, got {got:?}");
    }

    #[test]
    fn missing_fields_are_all_reported() {
        let error = parse(json!({})).unwrap_err();

        assert_eq!(error.issues.len(), 3);
        assert!(error.has_field("title"));
        assert!(error.has_field("amount"));
        assert!(error.has_field("type"));
    }

    #[test]
    fn wrong_types_are_reported() {
        let error = parse(json!({ "title": 42, "amount": "10", "type": "credit" })).unwrap_err();

        assert_eq!(error.issues.len(), 2);
        assert!(error.has_field("title"));
        assert!(error.has_field("amount"));
    }

    #[test]
    fn unknown_transaction_type_is_rejected() {
        let error = parse(json!({ "title": "a", "amount": 1, "type": "refund" })).unwrap_err();

        assert_eq!(error.issues.len(), 1);
        assert!(error.has_field("type"));
    }

    #[test]
    fn huge_amount_is_rejected() {
        let error = parse(json!({ "title": "a", "amount": 1e300, "type": "credit" })).unwrap_err();

        assert!(error.has_field("amount"));
    }

    #[test]
    fn amount_beyond_exact_double_range_is_rejected() {
        for amount in [1e14, -1e14, 9.1e13] {
            let error = parse(json!({ "title": "a", "amount": amount, "type": "debit" }))
                .expect_err(&format!("want {amount} to be rejected"));

            assert!(error.has_field("amount"));
        }
    }

    #[test]
    fn amount_within_exact_double_range_is_accepted() {
        let got = parse(json!({ "title": "a", "amount": 9e13, "type": "debit" }));

        assert_eq!(
            got.map(|transaction| transaction.amount),
            Ok(-9_000_000_000_000_000)
        );
    }

    #[test]
    fn invalid_json_is_rejected() {
        let error = parse_new_transaction(b"{ not json").unwrap_err();

        assert!(error.has_field("body"));
    }

    #[test]
    fn non_object_body_is_rejected() {
        let error = parse(json!([1, 2, 3])).unwrap_err();

        assert!(error.has_field("body"));
    }
}
