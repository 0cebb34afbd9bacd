//! Built-in resource configurations.
//!
//! Every resource list of the dashboard is one of these configurations fed
//! into the same controller. All of them pin the owning shop under
//! single-tenant scope; stores filter on their own domain.

use super::{LockCriterion, ResourceConfig};
use crate::criteria::CriterionSpec;
use crate::query::SortDirective;

/// Orders, newest first, 50 per page.
#[must_use]
pub fn orders() -> ResourceConfig {
    ResourceConfig::new("orders", SortDirective::descending("created_at"))
        .page_size(50)
        .criterion(CriterionSpec::text("shop", "Store"))
        .criterion(CriterionSpec::text("search", "Search").debounced())
        .criterion(CriterionSpec::text("email", "Customer email").debounced())
        .criterion(CriterionSpec::choice(
            "financialStatus",
            "Payment",
            [
                "pending",
                "authorized",
                "paid",
                "partially_paid",
                "refunded",
                "partially_refunded",
                "voided",
            ],
        ))
        .criterion(CriterionSpec::choice(
            "fulfillmentStatus",
            "Fulfillment",
            ["fulfilled", "unfulfilled", "partial", "restocked"],
        ))
        .criterion(CriterionSpec::number("minTotal", "Minimum total"))
        .criterion(CriterionSpec::number("maxTotal", "Maximum total"))
        .criterion(CriterionSpec::date_range("createdAt", "Created"))
        .lock(LockCriterion::new("shop"))
}

/// Products, newest first.
#[must_use]
pub fn products() -> ResourceConfig {
    ResourceConfig::new("products", SortDirective::descending("created_at"))
        .page_size(50)
        .criterion(CriterionSpec::text("shop", "Store"))
        .criterion(CriterionSpec::text("search", "Search").debounced())
        .criterion(CriterionSpec::choice(
            "status",
            "Status",
            ["active", "draft", "archived"],
        ))
        .criterion(CriterionSpec::text("vendor", "Vendor").debounced())
        .criterion(CriterionSpec::text("productType", "Product type"))
        .criterion(CriterionSpec::number("minPrice", "Minimum price"))
        .criterion(CriterionSpec::number("maxPrice", "Maximum price"))
        .lock(LockCriterion::new("shop"))
}

/// Customers, newest first.
#[must_use]
pub fn customers() -> ResourceConfig {
    ResourceConfig::new("customers", SortDirective::descending("created_at"))
        .page_size(50)
        .criterion(CriterionSpec::text("shop", "Store"))
        .criterion(CriterionSpec::text("email", "Email").debounced())
        .criterion(CriterionSpec::text("name", "Name").debounced())
        .criterion(CriterionSpec::boolean("acceptsMarketing", "Accepts marketing"))
        .criterion(CriterionSpec::number("minOrders", "Minimum orders"))
        .criterion(CriterionSpec::date_range("createdAt", "Joined"))
        .lock(LockCriterion::new("shop"))
}

/// Image generations, newest first.
#[must_use]
pub fn generations() -> ResourceConfig {
    ResourceConfig::new("generations", SortDirective::descending("created_at"))
        .page_size(25)
        .criterion(CriterionSpec::text("shop", "Store"))
        .criterion(CriterionSpec::text("customerEmail", "Customer email").debounced())
        .criterion(CriterionSpec::choice(
            "status",
            "Status",
            ["pending", "processing", "completed", "failed"],
        ))
        .criterion(CriterionSpec::text("model", "Model"))
        .criterion(CriterionSpec::date_range("createdAt", "Created"))
        .lock(LockCriterion::new("shop"))
}

/// Credit ledger entries, newest first.
#[must_use]
pub fn credits() -> ResourceConfig {
    ResourceConfig::new("credits", SortDirective::descending("created_at"))
        .page_size(50)
        .criterion(CriterionSpec::text("shop", "Store"))
        .criterion(CriterionSpec::text("customerEmail", "Customer email").debounced())
        .criterion(CriterionSpec::choice(
            "type",
            "Type",
            ["purchase", "usage", "refund", "bonus", "adjustment"],
        ))
        .criterion(CriterionSpec::number("minAmount", "Minimum amount"))
        .criterion(CriterionSpec::date_range("createdAt", "Created"))
        .lock(LockCriterion::new("shop"))
}

/// Installed stores, most recently installed first.
#[must_use]
pub fn stores() -> ResourceConfig {
    ResourceConfig::new("stores", SortDirective::descending("installed_at"))
        .page_size(25)
        .criterion(CriterionSpec::text("domain", "Domain"))
        .criterion(CriterionSpec::text("search", "Search").debounced())
        .criterion(CriterionSpec::choice(
            "plan",
            "Plan",
            ["free", "basic", "pro", "enterprise"],
        ))
        .criterion(CriterionSpec::boolean("active", "Active"))
        .lock(LockCriterion::new("domain"))
}

/// Cart events, most recent first.
#[must_use]
pub fn cart_events() -> ResourceConfig {
    ResourceConfig::new("cart_events", SortDirective::descending("occurred_at"))
        .page_size(100)
        .criterion(CriterionSpec::text("shop", "Store"))
        .criterion(CriterionSpec::choice(
            "eventType",
            "Event",
            ["add", "remove", "update", "checkout"],
        ))
        .criterion(CriterionSpec::text("productId", "Product"))
        .criterion(CriterionSpec::text("sessionId", "Session").internal())
        .criterion(CriterionSpec::date_range("occurredAt", "Occurred"))
        .lock(LockCriterion::new("shop"))
}

/// All built-in configurations.
#[must_use]
pub fn all() -> Vec<ResourceConfig> {
    vec![
        orders(),
        products(),
        customers(),
        generations(),
        credits(),
        stores(),
        cart_events(),
    ]
}

/// Looks up a built-in configuration by resource name.
#[must_use]
pub fn by_name(name: &str) -> Option<ResourceConfig> {
    all().into_iter().find(|config| config.name() == name)
}
