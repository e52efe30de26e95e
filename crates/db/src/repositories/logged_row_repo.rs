//! Repository for the append-only target table (default `public.monday_logger`).

use mondaysync_core::Row;
use serde_json::{Map, Value};
use sqlx::PgPool;

use crate::ident::{quote_ident, TargetTable};

/// Build the INSERT for `columns` into `table`.
///
/// Values travel as one JSON object bound to `$1` and are expanded with
/// `json_populate_record` against the table's own row type, so Postgres runs
/// each column's input function on the text (`"2025-01-31"` into a DATE
/// column, `"3"` into an INTEGER). With no columns the statement falls back
/// to `DEFAULT VALUES` so an empty mapping still records the event.
pub fn build_insert_sql<'a>(
    table: &TargetTable,
    columns: impl IntoIterator<Item = &'a str>,
) -> String {
    let quoted: Vec<String> = columns.into_iter().map(quote_ident).collect();
    if quoted.is_empty() {
        return format!("INSERT INTO {} DEFAULT VALUES", table.qualified());
    }

    let list = quoted.join(", ");
    format!(
        "INSERT INTO {table} ({list}) SELECT {list} FROM json_populate_record(NULL::{table}, $1::json)",
        table = table.qualified(),
    )
}

/// Row values keyed by column name. Absent values become JSON `null`.
pub fn row_to_json(row: &Row) -> Value {
    let record: Map<String, Value> = row
        .columns()
        .zip(row.values())
        .map(|(column, value)| {
            let value = value.map_or(Value::Null, |v| Value::String(v.to_string()));
            (column.to_string(), value)
        })
        .collect();
    Value::Object(record)
}

/// Inserts mapped rows. There is no update or delete path.
pub struct LoggedRowRepo;

impl LoggedRowRepo {
    /// Insert one row inside its own transaction.
    ///
    /// Any failure rolls the transaction back (on drop) and is returned as-is.
    pub async fn insert(pool: &PgPool, table: &TargetTable, row: &Row) -> Result<(), sqlx::Error> {
        let sql = build_insert_sql(table, row.columns());

        let mut query = sqlx::query(&sql);
        if !row.is_empty() {
            query = query.bind(row_to_json(row).to_string());
        }

        let mut tx = pool.begin().await?;
        query.execute(&mut *tx).await?;
        tx.commit().await?;

        tracing::debug!(%table, columns = row.len(), "Row inserted");
        Ok(())
    }
}
