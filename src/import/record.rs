use serde_json::Value;

use crate::recipes::{
    filter::{leading_decimal, leading_int},
    repo_types::NewRecipe,
};

/// Normalizes one raw dataset entry. Entries without a usable `title` are
/// rejected; malformed numbers become `None`.
pub fn normalize(raw: &Value) -> Option<NewRecipe> {
    Some(NewRecipe {
        title: title(raw.get("title"))?,
        cuisine: text(raw.get("cuisine")),
        rating: decimal(raw.get("rating")),
        prep_time: minutes(raw.get("prep_time")),
        cook_time: minutes(raw.get("cook_time")),
        total_time: minutes(raw.get("total_time")),
        description: text(raw.get("description")),
        nutrients: raw.get("nutrients").filter(|v| !v.is_null()).cloned(),
        serves: text(raw.get("serves")),
    })
}

/// Empty strings, `0`, `false` and `null` are not titles; other scalars are
/// stored as their text.
fn title(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if s.is_empty() => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::Bool(false) => None,
        v => text(Some(v)),
    }
}

fn decimal(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => leading_decimal(s),
        _ => None,
    }
}

fn minutes(value: Option<&Value>) -> Option<i32> {
    let whole = match value? {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|v| v.is_finite()).map(|v| v.trunc() as i64))?,
        Value::String(s) => leading_int(s)?,
        _ => return None,
    };
    i32::try_from(whole).ok()
}

fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        v @ (Value::Number(_) | Value::Bool(_)) => Some(v.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn entries_without_title_are_rejected() {
        assert!(normalize(&json!({ "cuisine": "Thai" })).is_none());
        assert!(normalize(&json!({ "title": "" })).is_none());
        assert!(normalize(&json!({ "title": null })).is_none());
        assert!(normalize(&json!("not an object")).is_none());
        assert!(normalize(&json!({ "title": 0 })).is_none());
        assert!(normalize(&json!({ "title": false })).is_none());
        assert!(normalize(&json!({ "title": ["Pie"] })).is_none());
    }

    #[test]
    fn scalar_titles_are_kept_as_text() {
        assert_eq!(normalize(&json!({ "title": 1984 })).unwrap().title, "1984");
        assert_eq!(normalize(&json!({ "title": true })).unwrap().title, "true");
        assert_eq!(normalize(&json!({ "title": "0" })).unwrap().title, "0");
    }

    #[test]
    fn numbers_are_normalized() {
        let r = normalize(&json!({
            "title": "Sweet Potato Pie",
            "rating": "NaN",
            "prep_time": "15",
            "cook_time": 45.9,
            "total_time": "NaN",
        }))
        .unwrap();
        assert_eq!(r.rating, None);
        assert_eq!(r.prep_time, Some(15));
        assert_eq!(r.cook_time, Some(45));
        assert_eq!(r.total_time, None);

        let r = normalize(&json!({ "title": "Pie", "rating": 4.8, "total_time": "60 mins" })).unwrap();
        assert_eq!(r.rating, Some(4.8));
        assert_eq!(r.total_time, Some(60));
    }

    #[test]
    fn out_of_range_minutes_are_absent() {
        let r = normalize(&json!({ "title": "Pie", "prep_time": 99_999_999_999i64 })).unwrap();
        assert_eq!(r.prep_time, None);
    }

    #[test]
    fn text_fields_and_nutrients_pass_through() {
        let r = normalize(&json!({
            "title": "Pie",
            "cuisine": "Southern Recipes",
            "serves": 8,
            "nutrients": { "calories": "389 kcal", "fatContent": "21 g" },
            "description": null,
        }))
        .unwrap();
        assert_eq!(r.cuisine.as_deref(), Some("Southern Recipes"));
        assert_eq!(r.serves.as_deref(), Some("8"));
        assert_eq!(r.description, None);
        assert_eq!(r.nutrients.unwrap()["calories"], "389 kcal");
    }
}
