//! SQL identifier quoting.
//!
//! Column and table names come from configuration, not from webhook input, but
//! they are still spliced into SQL text. Every identifier goes through
//! [`quote_ident`]; values never do and are always bound as parameters.

/// Quote a PostgreSQL identifier, doubling any embedded `"`.
pub fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// Schema-qualified destination table for inserted rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetTable {
    pub schema: String,
    pub name: String,
}

impl TargetTable {
    pub fn new(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            name: name.into(),
        }
    }

    /// `"schema"."name"`, both parts quoted.
    pub fn qualified(&self) -> String {
        format!("{}.{}", quote_ident(&self.schema), quote_ident(&self.name))
    }
}

impl Default for TargetTable {
    fn default() -> Self {
        Self::new("public", "monday_logger")
    }
}

impl std::fmt::Display for TargetTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.schema, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_identifier_is_wrapped() {
        assert_eq!(quote_ident("status"), "\"status\"");
    }

    #[test]
    fn reserved_words_are_quoted() {
        assert_eq!(quote_ident("order"), "\"order\"");
        assert_eq!(quote_ident("user"), "\"user\"");
    }

    #[test]
    fn embedded_quotes_are_doubled() {
        assert_eq!(quote_ident("we\"ird"), "\"we\"\"ird\"");
        assert_eq!(quote_ident("\""), "\"\"\"\"");
    }

    #[test]
    fn injection_attempt_stays_inside_identifier() {
        let quoted = quote_ident("a\"); DROP TABLE x; --");
        assert_eq!(quoted, "\"a\"\"); DROP TABLE x; --\"");
        // Exactly the outer pair plus doubled inner quotes.
        let inner = &quoted[1..quoted.len() - 1];
        assert!(!inner.replace("\"\"", "").contains('"'));
    }

    #[test]
    fn spaces_and_case_are_preserved() {
        assert_eq!(quote_ident("Due Date"), "\"Due Date\"");
    }

    #[test]
    fn qualified_table_quotes_both_parts() {
        let table = TargetTable::new("sales", "my\"table");
        assert_eq!(table.qualified(), "\"sales\".\"my\"\"table\"");
        assert_eq!(TargetTable::default().qualified(), "\"public\".\"monday_logger\"");
    }
}
