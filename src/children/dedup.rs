//! Accessor/backing field coalescing.
//!
//! Backend reports both an accessor (`name`) and a field behind it (`_name`). If they hold
//! the same value only the accessor is shown.

use crate::value::ValueNode;
use indexmap::IndexMap;

/// Naming convention that links an accessor with its backing field.
pub trait AccessorConvention: Send + Sync {
    /// Backing field name for an accessor, `None` if `accessor` itself looks like a backing field.
    fn backing_field(&self, accessor: &str) -> Option<String>;

    /// Accessor name for a backing field, `None` if `field` is not a backing field.
    fn accessor<'a>(&self, field: &'a str) -> Option<&'a str>;
}

/// Backing field name is an accessor name with a prefix (`_name` for `name`).
#[derive(Debug, Clone)]
pub struct PrefixConvention {
    prefix: String,
}

impl PrefixConvention {
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
        }
    }
}

impl AccessorConvention for PrefixConvention {
    fn backing_field(&self, accessor: &str) -> Option<String> {
        if self.prefix.is_empty() || accessor.starts_with(&self.prefix) {
            return None;
        }
        Some(format!("{}{accessor}", self.prefix))
    }

    fn accessor<'a>(&self, field: &'a str) -> Option<&'a str> {
        if self.prefix.is_empty() {
            return None;
        }
        field.strip_prefix(&self.prefix).filter(|name| !name.is_empty())
    }
}

/// Insert a child value into name -> value map.
///
/// - an existing backing field with the same raw result is replaced by the new accessor
/// - a new backing field with the same raw result as an existing accessor is dropped
/// - otherwise the value is inserted (or overwrites a value with the same name)
pub fn insert_checking_duplicates(
    children: &mut IndexMap<String, ValueNode>,
    value: ValueNode,
    convention: &dyn AccessorConvention,
) {
    let same_result = |existing: Option<&ValueNode>| {
        existing.is_some_and(|existing| existing.raw_result() == value.raw_result())
    };

    if let Some(backing_field) = convention.backing_field(value.name()) {
        if same_result(children.get(&backing_field)) {
            children.shift_remove(&backing_field);
        }
    } else if let Some(accessor) = convention.accessor(value.name()) {
        if same_result(children.get(accessor)) {
            return;
        }
    }

    children.insert(value.name().to_string(), value);
}
