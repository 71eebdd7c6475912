//! Row formatting — property map → Notion pages API body.

use serde_json::{json, Map, Value};

use voxnote_core::{FieldValue, PropertyMap};

/// Build the request body for creating a new row in `db_id`.
pub fn format_row(db_id: &str, properties: &PropertyMap) -> Value {
    let mut props = Map::new();
    for (name, value) in properties.iter() {
        props.insert(name.to_string(), format_property(value));
    }
    json!({
        "parent": { "database_id": db_id },
        "properties": props,
    })
}

fn format_property(value: &FieldValue) -> Value {
    match value {
        FieldValue::Title(content) => json!({
            "title": [{ "text": { "content": content } }]
        }),
        FieldValue::RichText(content) => json!({
            "rich_text": [{ "type": "text", "text": { "content": content } }]
        }),
        FieldValue::Date { start } => json!({ "date": { "start": start } }),
        FieldValue::Select(name) => json!({ "select": { "name": name } }),
        FieldValue::Number(n) => json!({ "number": n }),
        FieldValue::MultiSelect(name) => json!({
            "multi_select": [{ "name": name }]
        }),
        FieldValue::Phone(number) => json!({ "phone_number": number }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_shape() {
        let mut properties = PropertyMap::new();
        properties.insert("Name", FieldValue::Title("New Row in Table".into()));
        properties.insert("Status", FieldValue::Select("To Do".into()));

        let row = format_row("db-1", &properties);
        assert_eq!(row["parent"]["database_id"], "db-1");
        assert_eq!(
            row["properties"]["Name"]["title"][0]["text"]["content"],
            "New Row in Table"
        );
        assert_eq!(row["properties"]["Status"]["select"]["name"], "To Do");
    }

    #[test]
    fn test_rich_text_and_date_shapes() {
        let mut properties = PropertyMap::new();
        properties.insert("Concept", FieldValue::RichText("une idée".into()));
        properties.insert(
            "Date",
            FieldValue::Date {
                start: "2024-01-15T09:30:00".into(),
            },
        );

        let row = format_row("db-1", &properties);
        let concept = &row["properties"]["Concept"]["rich_text"][0];
        assert_eq!(concept["type"], "text");
        assert_eq!(concept["text"]["content"], "une idée");
        assert_eq!(
            row["properties"]["Date"]["date"]["start"],
            "2024-01-15T09:30:00"
        );
    }

    #[test]
    fn test_number_phone_and_multi_select_shapes() {
        let mut properties = PropertyMap::new();
        properties.insert("Score", FieldValue::Number(4.5));
        properties.insert("Contact", FieldValue::Phone("+33600000000".into()));
        properties.insert("Tags", FieldValue::MultiSelect("idea".into()));

        let row = format_row("db-1", &properties);
        assert_eq!(row["properties"]["Score"]["number"], 4.5);
        assert_eq!(row["properties"]["Contact"]["phone_number"], "+33600000000");
        assert_eq!(row["properties"]["Tags"]["multi_select"][0]["name"], "idea");
    }
}
