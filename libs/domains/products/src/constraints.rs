//! Storage constraint names and the client messages they translate to.

use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

pub const NAME_UNIQUE: &str = "tbl_product_name_key";
pub const PRICE_CHECK: &str = "tbl_product_price_check";
pub const QUANTITY_CHECK: &str = "tbl_product_quantity_check";

/// Message for any violation not listed in the table.
pub const GENERIC_MESSAGE: &str = "The operation violates a data integrity constraint.";

static MESSAGES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        (NAME_UNIQUE, "A product with this name already exists."),
        (PRICE_CHECK, "Price must be greater than 0."),
        (QUANTITY_CHECK, "Quantity must be greater than 0."),
    ])
});

/// Postgres violation wording, with the quoted constraint name when present
static VIOLATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"violates (?:unique|check|foreign key|not-null|exclusion) constraint(?: "(?P<name>[^"]+)")?"#).unwrap()
});

pub fn message_for(constraint: Option<&str>) -> &'static str {
    constraint
        .and_then(|name| MESSAGES.get(name).copied())
        .unwrap_or(GENERIC_MESSAGE)
}

/// Whether a driver message reports a constraint violation at all.
pub fn is_violation(message: &str) -> bool {
    VIOLATION.is_match(message)
}

/// Constraint name quoted in a driver message, if any.
pub fn constraint_name(message: &str) -> Option<String> {
    VIOLATION
        .captures(message)?
        .name("name")
        .map(|m| m.as_str().to_string())
}
