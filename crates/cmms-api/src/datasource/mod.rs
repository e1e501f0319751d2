// Datasources: one module per domain concept.
//
// Each module adds inherent methods to `DirectusClient` that take
// domain-level identifiers and filters and return raw `models::*` payloads.
// Directus filter JSON, field selections, sort keys and collection paths
// never leave this module tree.

pub mod actions;
pub mod auth;
pub mod interventions;
pub mod machines;
pub mod preventive;
pub mod purchase_requests;
pub mod stats;
pub mod stock;
pub mod supplier_orders;

use serde_json::Value;

/// Directus `/items` query parameters.
#[derive(Debug, Default)]
pub(crate) struct ItemsQuery {
    fields: Option<String>,
    filter: Option<Value>,
    sort: Option<&'static str>,
    limit: Option<i64>,
}

impl ItemsQuery {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn fields(mut self, fields: &[&str]) -> Self {
        self.fields = Some(fields.join(","));
        self
    }

    /// Add a filter clause; multiple clauses are combined with `_and`.
    pub(crate) fn filter(mut self, clause: Value) -> Self {
        self.filter = Some(match self.filter.take() {
            None => clause,
            Some(Value::Object(existing)) if existing.contains_key("_and") => {
                let mut clauses = existing
                    .get("_and")
                    .and_then(Value::as_array)
                    .cloned()
                    .unwrap_or_default();
                clauses.push(clause);
                serde_json::json!({ "_and": clauses })
            }
            Some(existing) => serde_json::json!({ "_and": [existing, clause] }),
        });
        self
    }

    pub(crate) fn sort(mut self, sort: &'static str) -> Self {
        self.sort = Some(sort);
        self
    }

    /// `-1` asks Directus for every row.
    pub(crate) fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub(crate) fn into_params(self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(fields) = self.fields {
            params.push(("fields", fields));
        }
        if let Some(filter) = self.filter {
            params.push(("filter", filter.to_string()));
        }
        if let Some(sort) = self.sort {
            params.push(("sort", sort.to_owned()));
        }
        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }
        params
    }
}

/// `{ "<field>": { "_eq": <value> } }`
pub(crate) fn eq(field: &str, value: impl Into<Value>) -> Value {
    let mut clause = serde_json::Map::new();
    clause.insert(field.to_owned(), serde_json::json!({ "_eq": value.into() }));
    Value::Object(clause)
}

/// Append query parameters to a write path (reqwest only adds `query` on
/// the builder, which the write helpers don't expose).
pub(crate) fn with_query(path: &str, params: &[(&str, String)]) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in params {
        serializer.append_pair(key, value);
    }
    format!("{path}?{}", serializer.finish())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn query_params_in_directus_shape() {
        let params = ItemsQuery::new()
            .fields(&["id", "code"])
            .filter(eq("status", "open"))
            .sort("-created_at")
            .limit(-1)
            .into_params();

        assert_eq!(
            params,
            vec![
                ("fields", "id,code".to_owned()),
                ("filter", r#"{"status":{"_eq":"open"}}"#.to_owned()),
                ("sort", "-created_at".to_owned()),
                ("limit", "-1".to_owned()),
            ]
        );
    }

    #[test]
    fn filters_combine_with_and() {
        let params = ItemsQuery::new()
            .filter(eq("a", 1))
            .filter(eq("b", 2))
            .filter(eq("c", 3))
            .into_params();
        let (_, filter) = &params[0];
        let parsed: Value = serde_json::from_str(filter).unwrap_or_default();
        assert_eq!(
            parsed,
            json!({ "_and": [
                { "a": { "_eq": 1 } },
                { "b": { "_eq": 2 } },
                { "c": { "_eq": 3 } },
            ]})
        );
    }
}
