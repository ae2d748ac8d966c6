//! Type-erased row access for heterogeneous batches

use uuid::Uuid;

use crate::codec::{self, SerializerOptions};
use crate::errors::Result;
use crate::metadata::{self, TableRow};

/// What a change request needs from its row, independent of the row type
pub(crate) trait RowPayload: Send + Sync {
    fn type_name(&self) -> &'static str;

    fn collection_name(&self) -> Result<&'static str>;

    fn row_id(&self) -> Result<Uuid>;

    fn to_json(&self, options: &SerializerOptions) -> Result<Vec<u8>>;
}

impl<T: TableRow> RowPayload for T {
    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn collection_name(&self) -> Result<&'static str> {
        metadata::collection_name::<T>()
    }

    fn row_id(&self) -> Result<Uuid> {
        metadata::row_id(self)
    }

    fn to_json(&self, options: &SerializerOptions) -> Result<Vec<u8>> {
        codec::to_json_vec(self, options)
    }
}
