//! Dependency resolution
//!
//! Expands a list of requested item names into the transitive closure of
//! catalog items with source code attached. Deduplication is driven by a
//! visited-name set threaded through the recursive walk, so the flattened
//! result of one `resolve` call never contains the same name twice, even
//! when sibling branches share a dependency.

use std::collections::HashSet;
use thiserror::Error;

use crate::catalog::Catalog;
use crate::schema::{ItemDescriptor, ItemKind, ResolvedItem};
use crate::source::SourceStore;

/// Errors from a `resolve` call
#[derive(Debug, Error)]
pub enum ResolveError {
    /// One or more requested names had no catalog match. Always batched:
    /// every missing name is reported in a single error.
    #[error("the following items could not be found: {}", .0.join(", "))]
    NotFound(Vec<String>),

    /// A matched item's source file could not be read. This indicates a
    /// catalog/storage inconsistency, not a caller mistake.
    #[error("failed to read source for '{name}'")]
    Source {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

/// Resolves item names against a catalog and source store
pub struct Resolver<'a> {
    catalog: &'a Catalog,
    sources: &'a SourceStore,
}

impl<'a> Resolver<'a> {
    pub fn new(catalog: &'a Catalog, sources: &'a SourceStore) -> Self {
        Self { catalog, sources }
    }

    /// Expand `names` into a deduplicated, code-bearing dependency tree
    ///
    /// Fails as a batch if any name is unmatched; no partial result is
    /// returned. The top-level list is ordered ascending by direct
    /// dependency count, so foundational items come first.
    pub fn resolve(
        &self,
        names: &[String],
        kind: Option<ItemKind>,
    ) -> Result<Vec<ResolvedItem>, ResolveError> {
        let mut found: Vec<&ItemDescriptor> = Vec::new();
        let mut missing: Vec<String> = Vec::new();

        for name in names {
            match self.catalog.find(name, kind) {
                Some(desc) => found.push(desc),
                None => missing.push(name.clone()),
            }
        }

        if !missing.is_empty() {
            return Err(ResolveError::NotFound(missing));
        }

        // Fewer direct dependencies first; stable, so equal counts keep
        // their request order.
        found.sort_by_key(|desc| desc.item_dependencies.len());

        let mut seen: HashSet<String> = HashSet::new();
        let mut resolved = Vec::with_capacity(found.len());

        for desc in found {
            // A requested item may already be embedded in an earlier
            // sibling's dependency tree; emitting it again would duplicate
            // its name in the flattened result.
            if seen.contains(&desc.name) {
                tracing::debug!("'{}' already resolved, skipping", desc.name);
                continue;
            }
            resolved.push(self.resolve_item(desc, &mut seen)?);
        }

        Ok(resolved)
    }

    fn resolve_item(
        &self,
        desc: &ItemDescriptor,
        seen: &mut HashSet<String>,
    ) -> Result<ResolvedItem, ResolveError> {
        seen.insert(desc.name.clone());

        let source_code =
            self.sources
                .read(desc.kind, &desc.name)
                .map_err(|source| ResolveError::Source {
                    name: desc.name.clone(),
                    source,
                })?;

        let mut resolved_dependencies = Vec::new();
        for dep in &desc.item_dependencies {
            if seen.contains(&dep.name) {
                continue;
            }
            resolved_dependencies.push(self.resolve_item(dep, seen)?);
        }

        Ok(ResolvedItem {
            name: desc.name.clone(),
            kind: desc.kind,
            package_dependencies: desc.package_dependencies.clone(),
            dev_package_dependencies: desc.dev_package_dependencies.clone(),
            source_code,
            resolved_dependencies,
        })
    }
}
