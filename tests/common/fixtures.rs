//! Row fixtures
//!
//! Plain serde structs mapped to the `accounts` and `contacts` collections.

use dataverse_client::table_row;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accountid: Option<Uuid>,
    pub name: String,
    #[serde(default)]
    pub revenue: Option<f64>,
}

table_row!(Account, "account", "accounts", accountid);

impl Account {
    /// Account not yet created, without an id
    pub fn new(name: &str) -> Self {
        Self {
            accountid: None,
            name: name.to_string(),
            revenue: None,
        }
    }

    /// Existing account with a fresh id
    pub fn existing(name: &str) -> Self {
        Self {
            accountid: Some(Uuid::new_v4()),
            ..Self::new(name)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contactid: Option<Uuid>,
    pub lastname: String,
    #[serde(default)]
    pub emailaddress1: Option<String>,
}

table_row!(Contact, "contact", "contacts", contactid);

impl Contact {
    pub fn existing(lastname: &str) -> Self {
        Self {
            contactid: Some(Uuid::new_v4()),
            lastname: lastname.to_string(),
            emailaddress1: None,
        }
    }
}

/// Row type whose collection name cannot be used in a resource path
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Unmapped {
    pub id: Option<Uuid>,
}

table_row!(Unmapped, "unmapped", "", id);
