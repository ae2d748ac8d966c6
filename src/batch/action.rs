//! Row-level actions and their HTTP mapping

use std::fmt;
use std::str::FromStr;

use reqwest::Method;

use super::payload::RowPayload;
use crate::errors::{DataverseError, Result};
use crate::metadata::TableRow;

/// Operation applied to a single row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Insert a new row
    Create,
    /// Modify an existing row
    Update,
    /// Modify a row, creating it when absent
    Upsert,
    /// Remove a row
    Delete,
}

impl Action {
    /// Resolve the HTTP method and path relative to the service root.
    ///
    /// Update and upsert resolve identically; neither adds conditional
    /// `If-Match` / `If-None-Match` headers.
    pub fn resolve<T: TableRow>(self, row: &T) -> Result<(Method, String)> {
        self.resolve_payload(row)
    }

    pub(crate) fn resolve_payload(self, row: &dyn RowPayload) -> Result<(Method, String)> {
        let collection = row.collection_name()?;

        Ok(match self {
            Action::Create => (Method::POST, collection.to_string()),
            Action::Update | Action::Upsert => (Method::PATCH, keyed(collection, row)?),
            Action::Delete => (Method::DELETE, keyed(collection, row)?),
        })
    }

    /// Lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Update => "update",
            Action::Upsert => "upsert",
            Action::Delete => "delete",
        }
    }
}

fn keyed(collection: &str, row: &dyn RowPayload) -> Result<String> {
    Ok(format!("{}({})", collection, row.row_id()?))
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = DataverseError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "create" => Ok(Action::Create),
            "update" => Ok(Action::Update),
            "upsert" => Ok(Action::Upsert),
            "delete" => Ok(Action::Delete),
            _ => Err(DataverseError::UnsupportedAction(s.to_string())),
        }
    }
}
