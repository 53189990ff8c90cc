use std::{fmt, io::Read};

use serde::de::{self, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde_json::Value;

/// Feeds every entry of a top-level JSON object (or array) to `on_entry`
/// without materializing the whole document.
pub fn for_each_entry<R, F>(reader: R, on_entry: F) -> anyhow::Result<()>
where
    R: Read,
    F: FnMut(Value) -> Result<(), String>,
{
    let mut de = serde_json::Deserializer::from_reader(reader);
    (&mut de).deserialize_any(EntryVisitor(on_entry))?;
    de.end()?;
    Ok(())
}

struct EntryVisitor<F>(F);

impl<'de, F> Visitor<'de> for EntryVisitor<F>
where
    F: FnMut(Value) -> Result<(), String>,
{
    type Value = ();

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an object or array of recipes")
    }

    fn visit_map<M>(mut self, mut map: M) -> Result<(), M::Error>
    where
        M: MapAccess<'de>,
    {
        while let Some((IgnoredAny, entry)) = map.next_entry::<IgnoredAny, Value>()? {
            (self.0)(entry).map_err(de::Error::custom)?;
        }
        Ok(())
    }

    fn visit_seq<S>(mut self, mut seq: S) -> Result<(), S::Error>
    where
        S: SeqAccess<'de>,
    {
        while let Some(entry) = seq.next_element::<Value>()? {
            (self.0)(entry).map_err(de::Error::custom)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(input: &str) -> anyhow::Result<Vec<Value>> {
        let mut out = Vec::new();
        for_each_entry(input.as_bytes(), |v| {
            out.push(v);
            Ok(())
        })?;
        Ok(out)
    }

    #[test]
    fn visits_object_values_in_order() {
        let entries = collect(r#"{"0": {"title": "a"}, "x": {"title": "b"}}"#).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1]["title"], "b");
    }

    #[test]
    fn accepts_top_level_array() {
        assert_eq!(collect(r#"[{"title": "a"}, 3]"#).unwrap().len(), 2);
    }

    #[test]
    fn malformed_document_is_an_error() {
        assert!(collect(r#"{"0": {"title": "a"}"#).is_err());
        assert!(collect(r#"{"0": {}} trailing"#).is_err());
        assert!(collect("42").is_err());
    }

    #[test]
    fn callback_error_stops_the_stream() {
        let mut seen = 0;
        let err = for_each_entry(r#"[1, 2, 3]"#.as_bytes(), |_| {
            seen += 1;
            Err("stop".to_string())
        })
        .unwrap_err();
        assert_eq!(seen, 1);
        assert!(err.to_string().contains("stop"));
    }
}
