//! Macros for row metadata
//!
//! Attach table metadata to a plain serde struct without writing the
//! [`TableRow`](crate::TableRow) impl by hand.

/// Implement [`TableRow`](crate::TableRow) for a struct.
///
/// The id field must be an `Option<Uuid>`.
///
/// ```rust,ignore
/// #[derive(Serialize, Deserialize)]
/// struct Account {
///     accountid: Option<Uuid>,
///     name: String,
/// }
///
/// dataverse_client::table_row!(Account, "account", "accounts", accountid);
/// ```
#[macro_export]
macro_rules! table_row {
    ($row_type:ty, $logical_name:expr, $collection_name:expr, $id_field:ident) => {
        impl $crate::TableRow for $row_type {
            fn logical_name() -> &'static str {
                $logical_name
            }

            fn logical_collection_name() -> &'static str {
                $collection_name
            }

            fn row_id(&self) -> Option<$crate::uuid::Uuid> {
                self.$id_field
            }
        }
    };
}
