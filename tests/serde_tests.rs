//! Serialization of persisted query state and settings.

#![cfg(feature = "serde")]

use std::time::Duration;

use admin_query::prelude::*;
use rstest::rstest;
use serde_json::json;

#[rstest]
fn test_query_state_json_shape() {
    let config = catalog::orders();
    let scope = Scope::tenant("shopA");
    let state = reduce(
        &QueryState::initial(&config, &scope),
        QueryAction::set("financialStatus", CriterionValue::text("paid")),
        &ReduceContext::new(&config, &scope),
    );

    let value = serde_json::to_value(&state).unwrap();
    assert_eq!(
        value,
        json!({
            "criteria": {
                "financialStatus": { "type": "text", "value": "paid" },
                "shop": { "type": "text", "value": "shopA" }
            },
            "sort": { "column": "created_at", "direction": "descending" },
            "page": 1,
            "pageSize": 50
        })
    );

    let restored: QueryState = serde_json::from_value(value).unwrap();
    assert_eq!(restored, state);
}

#[rstest]
#[case::page(json!({ "criteria": {}, "sort": { "column": "created_at", "direction": "descending" }, "page": 0, "pageSize": 50 }), "page")]
#[case::page_size(json!({ "criteria": {}, "sort": { "column": "created_at", "direction": "descending" }, "page": 1, "pageSize": 0 }), "pageSize")]
fn test_query_state_rejects_empty_window(#[case] value: serde_json::Value, #[case] field: &str) {
    let error = serde_json::from_value::<QueryState>(value).unwrap_err();
    assert!(error.to_string().contains(&format!("{field} must be at least 1")));
}

#[rstest]
fn test_scope_json_shape() {
    assert_eq!(
        serde_json::to_value(Scope::tenant("shopA")).unwrap(),
        json!({ "mode": "tenant", "lockedTenant": "shopA" })
    );
    assert_eq!(serde_json::to_value(Scope::Admin).unwrap(), json!({ "mode": "admin" }));
}

#[rstest]
fn test_settings_partial_json_uses_defaults() {
    let settings: Settings = serde_json::from_value(json!({ "debounce": 120 })).unwrap();
    assert_eq!(settings.debounce, Duration::from_millis(120));
    assert!(settings.notify_on_failure);
    assert_eq!(settings.page_size_override, None);
}

#[rstest]
fn test_pagination_meta_camel_case() {
    let meta: PaginationMeta = serde_json::from_value(json!({
        "page": 2, "limit": 25, "total": 60, "hasNext": true, "hasPrev": true
    }))
    .unwrap();
    assert_eq!(meta, PaginationMeta::new(2, 25, 60));
}
