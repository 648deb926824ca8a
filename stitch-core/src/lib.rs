//! Stitch core - registry resolution and installation
//!
//! This crate implements the pipeline behind the `stitch` CLI: a static
//! catalog of distributable source items (components, hooks, types,
//! utilities, styles), a resolver that expands requested item names into a
//! deduplicated, code-bearing dependency tree, and an installer that
//! materializes that tree into a consuming project.
//!
//! # Architecture
//!
//! ```text
//! Catalog (static item table)
//!     │
//!     ▼
//! Resolver ──reads──▶ SourceStore (kind-specific source directories)
//!     │
//!     ├── query     ← server-side request boundary (no HTTP framework)
//!     └── client    ← RegistryClient fetching resolved items remotely
//!            │
//!            ▼
//! Installer ──writes──▶ project dirs (per ProjectConfig)
//!           ──invokes─▶ package manager (npm/pnpm/yarn/bun)
//! ```

pub mod catalog;
pub mod client;
pub mod installer;
pub mod manifest;
pub mod package_manager;
pub mod project;
pub mod query;
pub mod resolver;
pub mod schema;
pub mod source;

pub use catalog::Catalog;
pub use client::RegistryClient;
pub use installer::Installer;
pub use manifest::PackageManifest;
pub use package_manager::PackageManager;
pub use project::ProjectConfig;
pub use resolver::{ResolveError, Resolver};
pub use schema::{ItemDescriptor, ItemKind, ResolvedItem};
pub use source::SourceStore;
