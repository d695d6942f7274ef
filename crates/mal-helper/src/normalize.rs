//! Flattening of API records into display fields.
//!
//! Every rule only fires when its field still has the nested shape the API
//! sends, so running a record through twice changes nothing.

use crate::render::RecordPrinter;
use serde_json::{Map, Value};
use std::io::{self, Write};

/// Cover art reference; never displayed.
pub const IMAGE_FIELD: &str = "main_picture";

const SEPARATOR: &str = ", ";

/// Extra rule a catalog kind applies on top of the shared ones
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtraFieldRule {
    None,
    /// `[{"name": ..}, ..]` joined by name (anime studios)
    JoinByName(&'static str),
    /// `[{"node": {"id": ..}}, ..]` joined by id (manga authors)
    JoinAuthorIds(&'static str),
}

impl ExtraFieldRule {
    fn apply(self, record: &mut Map<String, Value>) {
        match self {
            ExtraFieldRule::None => {}
            ExtraFieldRule::JoinByName(field) => join_names(record, field),
            ExtraFieldRule::JoinAuthorIds(field) => join_author_ids(record, field),
        }
    }
}

/// Normalize one record and return it.
///
/// Values that are not JSON objects are returned untouched.
pub fn normalize_one(mut record: Value, rule: ExtraFieldRule) -> Value {
    if let Value::Object(fields) = &mut record {
        normalize_fields(fields, rule);
    }
    record
}

/// Normalize each record and print it through `printer`.
///
/// Returns how many records were printed.
pub fn normalize_many<W: Write>(
    records: Vec<Value>,
    rule: ExtraFieldRule,
    printer: &mut RecordPrinter<W>,
) -> io::Result<usize> {
    let mut printed = 0;
    for record in records {
        printer.print_record(&normalize_one(record, rule))?;
        printed += 1;
    }
    Ok(printed)
}

/// Apply every rule in place.
pub fn normalize_fields(record: &mut Map<String, Value>, rule: ExtraFieldRule) {
    record.retain(|key, _| key != IMAGE_FIELD);
    rule.apply(record);
    join_names(record, "genres");
    flatten_alternative_titles(record);
}

fn join_names(record: &mut Map<String, Value>, field: &str) {
    let Some(Value::Array(entries)) = record.get(field) else {
        return;
    };

    let joined = entries
        .iter()
        .filter_map(|entry| entry.get("name"))
        .filter_map(scalar_to_string)
        .collect::<Vec<_>>()
        .join(SEPARATOR);

    record.insert(field.to_string(), Value::String(joined));
}

// Authors only expose their numeric id inline, not a name.
fn join_author_ids(record: &mut Map<String, Value>, field: &str) {
    let Some(Value::Array(entries)) = record.get(field) else {
        return;
    };

    let joined = entries
        .iter()
        .filter_map(|entry| entry.get("node")?.get("id"))
        .filter_map(scalar_to_string)
        .collect::<Vec<_>>()
        .join(SEPARATOR);

    record.insert(field.to_string(), Value::String(joined));
}

fn flatten_alternative_titles(record: &mut Map<String, Value>) {
    let Some(Value::Object(titles)) = record.get("alternative_titles") else {
        return;
    };

    let synonyms = titles
        .get("synonyms")
        .and_then(Value::as_array)
        .map(|s| s.iter().collect::<Vec<_>>())
        .unwrap_or_default();

    let joined = synonyms
        .into_iter()
        .chain(titles.get("en"))
        .chain(titles.get("ja"))
        .filter_map(Value::as_str)
        .filter(|title| !title.is_empty())
        .collect::<Vec<_>>()
        .join(SEPARATOR);

    record.insert("alternative_titles".to_string(), Value::String(joined));
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::OutputFormat;
    use serde_json::json;

    const ANIME: ExtraFieldRule = ExtraFieldRule::JoinByName("studios");
    const MANGA: ExtraFieldRule = ExtraFieldRule::JoinAuthorIds("authors");

    #[test]
    fn test_image_removed_and_genres_joined() {
        let record = json!({
            "main_picture": {"medium": "https://cdn.myanimelist.net/images/anime/1.jpg"},
            "genres": [{"id": 1, "name": "Action"}, {"id": 8, "name": "Drama"}]
        });

        assert_eq!(
            normalize_one(record, ExtraFieldRule::None),
            json!({"genres": "Action, Drama"})
        );
    }

    #[test]
    fn test_missing_fields_are_left_alone() {
        let record = json!({"id": 1, "title": "Cowboy Bebop"});
        assert_eq!(normalize_one(record.clone(), ANIME), record);
    }

    #[test]
    fn test_alternative_titles_drop_empty_entries() {
        let record = json!({
            "alternative_titles": {"synonyms": ["Foo", "Bar"], "en": "", "ja": "フー"}
        });

        assert_eq!(
            normalize_one(record, ExtraFieldRule::None),
            json!({"alternative_titles": "Foo, Bar, フー"})
        );
    }

    #[test]
    fn test_alternative_titles_null_and_missing_synonyms() {
        let record = json!({"alternative_titles": {"en": "Spike", "ja": null}});

        assert_eq!(
            normalize_one(record, ExtraFieldRule::None),
            json!({"alternative_titles": "Spike"})
        );
    }

    #[test]
    fn test_studios_joined_for_anime() {
        let record = json!({"studios": [{"id": 14, "name": "A"}, {"id": 2, "name": "B"}]});
        assert_eq!(normalize_one(record, ANIME), json!({"studios": "A, B"}));
    }

    #[test]
    fn test_authors_joined_by_id_for_manga() {
        let record = json!({
            "authors": [
                {"node": {"id": 7}, "role": "Story"},
                {"node": {"id": 9}, "role": "Art"}
            ]
        });
        assert_eq!(normalize_one(record, MANGA), json!({"authors": "7, 9"}));
    }

    #[test]
    fn test_kind_rules_do_not_cross() {
        let record = json!({"studios": [{"name": "A"}]});
        assert_eq!(normalize_one(record.clone(), MANGA), record);
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let record = json!({
            "main_picture": {"large": "x"},
            "genres": [{"name": "Action"}],
            "alternative_titles": {"synonyms": ["Foo"], "en": "Bar", "ja": ""},
            "studios": [{"name": "Sunrise"}],
            "authors": [{"node": {"id": 1}}]
        });

        let once = normalize_one(record.clone(), ANIME);
        assert_eq!(normalize_one(once.clone(), ANIME), once);

        let once = normalize_one(record, MANGA);
        assert_eq!(normalize_one(once.clone(), MANGA), once);
        assert!(once.get(IMAGE_FIELD).is_none());
    }

    #[test]
    fn test_non_object_passes_through() {
        assert_eq!(normalize_one(Value::Null, ANIME), Value::Null);
    }

    #[test]
    fn test_normalize_many_prints_each_record() {
        let mut out = Vec::new();
        let mut printer = RecordPrinter::new(&mut out, OutputFormat::Text);
        let records = vec![
            json!({"id": 1, "genres": [{"name": "Action"}]}),
            json!({"id": 2, "main_picture": {}}),
        ];

        let printed = normalize_many(records, ANIME, &mut printer).unwrap();
        assert_eq!(printed, 2);

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "id:     1\ngenres: Action\n\nid: 2\n\n");
    }
}
