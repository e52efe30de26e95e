/// Fetch a single item with its board and every column value.
pub const ITEM_QUERY: &str = r#"
query GetItem($item_id: [ID!]!) {
  items (ids: $item_id) {
    id
    name
    board { id }
    column_values { id text value }
  }
}
"#;

/// Variables for [`ITEM_QUERY`].
pub fn item_variables(item_id: i64) -> serde_json::Value {
    serde_json::json!({ "item_id": item_id })
}
