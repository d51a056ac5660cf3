//! Store-neutral structured query model.
//!
//! Use cases describe what they want (collection, ordering, limit, cursor,
//! filter) with these types; the store adapter owns the translation into the
//! concrete wire payload. Cursors reference documents by their path relative
//! to the database root, because only the adapter knows the fully qualified
//! resource name.

use super::value::TypedValue;

/// A query over one collection of documents.
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredQuery {
    /// Collection the query selects from.
    pub collection_id: String,
    /// Ordering clauses, applied in sequence.
    pub order_by: Vec<OrderBy>,
    /// Maximum number of results.
    pub limit: Option<u32>,
    /// Start the result window strictly after this document
    /// (path relative to the database root).
    pub start_after: Option<String>,
    /// Optional result filter.
    pub filter: Option<Filter>,
}

impl StructuredQuery {
    pub fn collection(collection_id: impl Into<String>) -> Self {
        Self {
            collection_id: collection_id.into(),
            order_by: Vec::new(),
            limit: None,
            start_after: None,
            filter: None,
        }
    }

    /// Add a descending ordering on `field`.
    pub fn descending(mut self, field: impl Into<String>) -> Self {
        self.order_by.push(OrderBy {
            field: field.into(),
            direction: Direction::Descending,
        });
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn starting_after(mut self, document_path: impl Into<String>) -> Self {
        self.start_after = Some(document_path.into());
        self
    }

    /// Keep only documents matching at least one of `conditions` (OR filter).
    pub fn matching_any(mut self, conditions: Vec<Condition>) -> Self {
        self.filter = Some(Filter::AnyOf(conditions));
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    pub field: String,
    pub direction: Direction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Composite OR over field conditions.
    AnyOf(Vec<Condition>),
}

/// A single field condition.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub field: String,
    pub op: ConditionOp,
    pub value: TypedValue,
}

impl Condition {
    pub fn equal(field: impl Into<String>, value: TypedValue) -> Self {
        Self {
            field: field.into(),
            op: ConditionOp::Equal,
            value,
        }
    }

    pub fn array_contains(field: impl Into<String>, value: TypedValue) -> Self {
        Self {
            field: field.into(),
            op: ConditionOp::ArrayContains,
            value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionOp {
    Equal,
    ArrayContains,
}
