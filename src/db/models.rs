//! Database models for the key-value store.

use derive_getters::Getters;
use derive_new::new;
use diesel::prelude::*;

use crate::db::schema;

/// A stored key-value pair.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Getters)]
#[diesel(table_name = schema::kv_store)]
pub struct KvEntry {
    key: String,
    value: String,
}

/// Insertable key-value pair. Writing an existing key replaces its value.
#[derive(Debug, Clone, Insertable, new, Getters)]
#[diesel(table_name = schema::kv_store)]
pub struct NewKvEntry {
    key: String,
    value: String,
}
