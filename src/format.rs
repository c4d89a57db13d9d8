// Conversion between table items and JSON.
//
// DynamoDB carries every number as a decimal string. For display those
// strings become plain JSON numbers: integral values print as integers,
// anything with a fractional part prints as a float.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use serde::Serialize;
use serde_json::{Map, Number, Value};

use crate::api::Item;
use crate::error::StoreError;

/// Render one item as a single line of JSON.
pub fn render_item(item: &Item) -> serde_json::Result<String> {
    serde_json::to_string(&item_to_json(item))
}

/// Convert a whole item into a JSON object. Keys come out sorted.
pub fn item_to_json(item: &Item) -> Value {
    let map: Map<String, Value> = item
        .iter()
        .map(|(name, value)| (name.clone(), attribute_to_json(value)))
        .collect();
    Value::Object(map)
}

/// Convert one attribute value into its JSON counterpart.
pub fn attribute_to_json(value: &AttributeValue) -> Value {
    match value {
        AttributeValue::N(raw) => number_to_json(raw),
        AttributeValue::S(text) => Value::String(text.clone()),
        AttributeValue::Bool(flag) => Value::Bool(*flag),
        AttributeValue::Null(_) => Value::Null,
        AttributeValue::Ss(set) => Value::Array(set.iter().cloned().map(Value::String).collect()),
        AttributeValue::Ns(set) => Value::Array(set.iter().map(|n| number_to_json(n)).collect()),
        AttributeValue::L(list) => Value::Array(list.iter().map(attribute_to_json).collect()),
        AttributeValue::M(map) => Value::Object(
            map.iter()
                .map(|(name, value)| (name.clone(), attribute_to_json(value)))
                .collect(),
        ),
        AttributeValue::B(blob) => Value::String(format!("<{} bytes>", blob.as_ref().len())),
        AttributeValue::Bs(blobs) => Value::Array(
            blobs
                .iter()
                .map(|blob| Value::String(format!("<{} bytes>", blob.as_ref().len())))
                .collect(),
        ),
        _ => Value::Null,
    }
}

/// Turn a DynamoDB number string into an integer when it has no fractional
/// part and into a float otherwise. Strings that are not numbers at all are
/// passed through unchanged.
///
/// DynamoDB numbers carry up to 38 digits; integers beyond `i64` keep every
/// digit rather than degrading to a float.
pub fn number_to_json(raw: &str) -> Value {
    let raw = raw.trim();
    if let Ok(int) = raw.parse::<i64>() {
        return Value::Number(int.into());
    }
    if let Some(digits) = integral_digits(raw) {
        if let Ok(number) = serde_json::from_str::<Number>(&digits) {
            return Value::Number(number);
        }
    }
    match raw.parse::<f64>() {
        Ok(float) if float.fract() == 0.0 && float.abs() < i64::MAX as f64 => {
            Value::Number((float as i64).into())
        }
        Ok(float) => Number::from_f64(float)
            .map(Value::Number)
            .unwrap_or_else(|| Value::String(raw.to_string())),
        Err(_) => Value::String(raw.to_string()),
    }
}

/// Plain integer literal for `raw` when it has no fractional part, so
/// `-120.000` becomes `-120`. Exponent forms are left to the float path.
fn integral_digits(raw: &str) -> Option<String> {
    let (sign, unsigned) = match raw.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", raw.strip_prefix('+').unwrap_or(raw)),
    };
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    if whole.is_empty()
        || !whole.bytes().all(|b| b.is_ascii_digit())
        || !fraction.bytes().all(|b| b == b'0')
    {
        return None;
    }
    Some(format!("{sign}{whole}"))
}

/// Serialize a value into a table item. The value must serialize to a JSON
/// object; numbers become `N`, strings `S`, and so on.
pub fn to_item<T: Serialize>(value: &T) -> Result<Item, StoreError> {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => Ok(map
            .into_iter()
            .map(|(name, value)| (name, json_to_attribute(value)))
            .collect()),
        Ok(other) => Err(StoreError::InvalidItem(format!(
            "expected an object, got {other}"
        ))),
        Err(err) => Err(StoreError::InvalidItem(err.to_string())),
    }
}

fn json_to_attribute(value: Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(flag) => AttributeValue::Bool(flag),
        Value::Number(number) => AttributeValue::N(number.to_string()),
        Value::String(text) => AttributeValue::S(text),
        Value::Array(items) => {
            AttributeValue::L(items.into_iter().map(json_to_attribute).collect())
        }
        Value::Object(map) => AttributeValue::M(
            map.into_iter()
                .map(|(name, value)| (name, json_to_attribute(value)))
                .collect::<HashMap<_, _>>(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ClientRecord;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn integral_numbers_render_as_integers() {
        assert_eq!(number_to_json("12345"), json!(12345));
        assert_eq!(number_to_json("-7"), json!(-7));
        assert_eq!(number_to_json("5.0"), json!(5));
        assert_eq!(number_to_json("1E+2"), json!(100));
    }

    #[test]
    fn fractional_numbers_render_as_floats() {
        assert_eq!(number_to_json("2.5"), json!(2.5));
        assert_eq!(number_to_json("-0.125"), json!(-0.125));
    }

    #[test]
    fn wide_integers_keep_every_digit() {
        let raw = "12345678901234567890123";
        assert_eq!(serde_json::to_string(&number_to_json(raw)).unwrap(), raw);

        let max = "-99999999999999999999999999999999999999.00";
        assert_eq!(
            serde_json::to_string(&number_to_json(max)).unwrap(),
            "-99999999999999999999999999999999999999"
        );
    }

    #[test]
    fn only_plain_integral_literals_are_taken_verbatim() {
        assert_eq!(integral_digits("+42.000").as_deref(), Some("42"));
        assert_eq!(integral_digits("42.5"), None);
        assert_eq!(integral_digits("1E+22"), None);
        assert_eq!(integral_digits(".0"), None);
        assert_eq!(integral_digits("-"), None);
    }

    #[test]
    fn garbage_numbers_pass_through_as_text() {
        assert_eq!(number_to_json("not-a-number"), json!("not-a-number"));
    }

    #[test]
    fn client_record_becomes_a_typed_item() {
        let record = ClientRecord {
            client_id: 12345,
            business_name: "Acme".into(),
            point_of_contact: "Jane Doe".into(),
            email: "jane@acme.com".into(),
            phone_number: "555-1234".into(),
        };
        let item = to_item(&record).unwrap();

        assert_eq!(item.len(), 5);
        assert_eq!(item["ClientID"], AttributeValue::N("12345".into()));
        assert_eq!(item["Client Name"], AttributeValue::S("Acme".into()));
        assert_eq!(item["Phone Number"], AttributeValue::S("555-1234".into()));
    }

    #[test]
    fn rendered_item_reads_back_as_the_same_record() {
        let record = ClientRecord {
            client_id: 7,
            business_name: "Globex".into(),
            point_of_contact: "Hank Scorpio".into(),
            email: "hank@globex.com".into(),
            phone_number: "555-0000".into(),
        };
        let line = render_item(&to_item(&record).unwrap()).unwrap();
        let parsed: ClientRecord = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn nested_attributes_are_converted() {
        let mut item = Item::new();
        item.insert("Balance".into(), AttributeValue::N("10.75".into()));
        item.insert(
            "Tags".into(),
            AttributeValue::L(vec![
                AttributeValue::S("gold".into()),
                AttributeValue::Bool(true),
            ]),
        );
        assert_eq!(
            item_to_json(&item),
            json!({ "Balance": 10.75, "Tags": ["gold", true] })
        );
    }

    #[test]
    fn non_objects_cannot_become_items() {
        assert!(matches!(to_item(&42), Err(StoreError::InvalidItem(_))));
    }
}
