use serde::Deserialize;

use crate::types::FlexibleId;

/// An item as returned by the `GetItem` GraphQL query.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BoardItem {
    pub id: FlexibleId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub board: Option<BoardRef>,
    #[serde(default)]
    pub column_values: Vec<ColumnValue>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BoardRef {
    pub id: FlexibleId,
}

/// A single field value on an item.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ColumnValue {
    pub id: String,
    /// Human-readable rendering. `null` for never-set columns.
    #[serde(default)]
    pub text: Option<String>,
    /// Raw structured value (monday.com sends it as a JSON-encoded string).
    #[serde(default)]
    pub value: Option<serde_json::Value>,
}

/// The `data` member of a `GetItem` response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemsData {
    #[serde(default)]
    pub items: Option<Vec<BoardItem>>,
}

impl ItemsData {
    /// First returned item, if any.
    pub fn into_first(self) -> Option<BoardItem> {
        self.items.and_then(|items| items.into_iter().next())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn parses_graphql_item() {
        let data: ItemsData = serde_json::from_value(json!({
            "items": [{
                "id": "55",
                "name": "Task1",
                "board": {"id": "123"},
                "column_values": [
                    {"id": "status", "text": "Done", "value": "{\"index\":1}"},
                    {"id": "date4", "text": null, "value": null}
                ]
            }]
        }))
        .unwrap();

        let item = data.into_first().unwrap();
        assert_eq!(item.id, FlexibleId::Text("55".into()));
        assert_eq!(item.name.as_deref(), Some("Task1"));
        assert_eq!(item.board.unwrap().id.to_string(), "123");
        assert_eq!(item.column_values.len(), 2);
        assert_eq!(item.column_values[1].text, None);
    }

    #[test]
    fn empty_or_missing_items() {
        let empty: ItemsData = serde_json::from_value(json!({"items": []})).unwrap();
        assert!(empty.into_first().is_none());

        let missing: ItemsData = serde_json::from_value(json!({})).unwrap();
        assert!(missing.into_first().is_none());

        let null: ItemsData = serde_json::from_value(json!({"items": null})).unwrap();
        assert!(null.into_first().is_none());
    }
}
