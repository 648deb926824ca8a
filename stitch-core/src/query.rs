//! Server-side request boundary
//!
//! Framework-free handling of the two registry endpoints: resolving items
//! with code attached, and the bare catalog listing. An HTTP layer wraps
//! these functions; it only needs to map `QueryError::status` onto its
//! response codes and serialize `error_body` on failure.

use serde_json::json;
use thiserror::Error;

use crate::catalog::Catalog;
use crate::resolver::{ResolveError, Resolver};
use crate::schema::{ItemDescriptor, ItemKind, ResolvedItem};
use crate::source::SourceStore;

/// Raw query parameters of an item resolution request
#[derive(Debug, Default, Clone)]
pub struct ItemsRequest {
    /// Comma-joined item names (the `names` parameter)
    pub names: Option<String>,

    /// Optional kind filter (the `type` parameter)
    pub kind: Option<String>,
}

/// Request failures, each mapped to an HTTP-equivalent status
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("A list of item names must be provided in the query string")]
    MissingNames,

    #[error("Invalid item type '{value}' provided. Valid types are: {valid}")]
    InvalidKind { value: String, valid: String },

    #[error("{0}. It may not exist in the registry. Please make sure item names are correct.")]
    NotFound(ResolveError),

    #[error("Error fetching registry items")]
    Internal(#[source] ResolveError),
}

impl QueryError {
    pub fn status(&self) -> u16 {
        match self {
            QueryError::MissingNames | QueryError::InvalidKind { .. } => 400,
            QueryError::NotFound(_) => 404,
            QueryError::Internal(_) => 500,
        }
    }
}

/// The `{ "error": … }` body returned on any failure
pub fn error_body(err: &QueryError) -> serde_json::Value {
    json!({ "error": err.to_string() })
}

/// Handle an item resolution request against a catalog and source store
pub fn resolve_items(
    catalog: &Catalog,
    sources: &SourceStore,
    request: &ItemsRequest,
) -> Result<Vec<ResolvedItem>, QueryError> {
    let names: Vec<String> = request
        .names
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    if names.is_empty() {
        return Err(QueryError::MissingNames);
    }

    let kind = match request.kind.as_deref() {
        None | Some("") => None,
        Some(value) => Some(value.parse::<ItemKind>().map_err(|_| {
            QueryError::InvalidKind {
                value: value.to_string(),
                valid: ItemKind::valid_kinds(),
            }
        })?),
    };

    let resolver = Resolver::new(catalog, sources);
    resolver.resolve(&names, kind).map_err(|err| match err {
        ResolveError::NotFound(_) => QueryError::NotFound(err),
        ResolveError::Source { .. } => {
            tracing::error!("source read failed during resolution: {err:#?}");
            QueryError::Internal(err)
        }
    })
}

/// The bare catalog listing: every descriptor, no code attached
pub fn list_items(catalog: &Catalog) -> &[ItemDescriptor] {
    catalog.items()
}
