//! Response envelopes.

use serde::Serialize;

/// Standard `{ "data": T }` envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// `{ "data": [...], "stats": {...} }` returned by the filtered list
/// endpoints. The stats always describe the unfiltered collection.
#[derive(Debug, Serialize)]
pub struct ListResponse<T: Serialize, S: Serialize> {
    pub data: Vec<T>,
    pub stats: S,
}
