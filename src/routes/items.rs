//! Query-parameter demos: repeated values, ranges, patterns

use crate::core::validation::{
    FieldKind, FieldSpec, Guarded, GuardedInput, Pattern, RouteSchema,
};
use axum::Json;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::OnceLock;

/// Inputs of `GET /items/`
#[derive(Debug, Deserialize)]
pub struct ItemListQuery {
    /// Every `item-query` occurrence, in submission order
    pub q: Option<Vec<String>>,
    pub size: i64,
}

impl GuardedInput for ItemListQuery {
    fn schema() -> &'static RouteSchema {
        static SCHEMA: OnceLock<RouteSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            RouteSchema::new(vec![
                FieldSpec::query("q", FieldKind::StringList)
                    .alias("item-query")
                    .min_length(3)
                    .max_length(50)
                    .pattern(Pattern::letters_and_spaces())
                    .optional(),
                FieldSpec::query("size", FieldKind::Integer)
                    .ge(1.0)
                    .le(100.0)
                    .default_value(json!(10)),
            ])
        })
    }
}

/// Fixed item placeholders plus the page size and any active filters
pub async fn read_items(Guarded(query): Guarded<ItemListQuery>) -> Json<Value> {
    let mut results = json!({
        "items": [{"item_id": "Foo"}, {"item_id": "Bar"}],
        "page_size": query.size,
    });

    if let Some(filters) = query.q.filter(|q| !q.is_empty()) {
        results["active_filters"] = json!(filters);
    }

    Json(results)
}

/// Inputs of `GET /items/{item_id}`
#[derive(Debug, Deserialize)]
pub struct ItemLookup {
    pub item_id: i64,
    pub q: Option<String>,
}

impl GuardedInput for ItemLookup {
    fn schema() -> &'static RouteSchema {
        static SCHEMA: OnceLock<RouteSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            RouteSchema::new(vec![
                FieldSpec::path("item_id", FieldKind::Integer)
                    .ge(1.0)
                    .le(1000.0),
                FieldSpec::query("q", FieldKind::String)
                    .min_length(3)
                    .pattern(Pattern::letters_and_spaces())
                    .optional(),
            ])
        })
    }
}

pub async fn read_item(Guarded(input): Guarded<ItemLookup>) -> Json<Value> {
    Json(json!({
        "item_id": input.item_id,
        "search_query": input.q,
    }))
}
