//! Adapters for the four narrow interfaces the core depends on:
//! a JSON-RPC-over-HTTP catalog/tool client, a file-backed token
//! loader, and a 24-hour local catalog cache. None of this is part of
//! the core — it exists to be swapped or mocked behind
//! `palette_core::ports`.

pub mod cache;
pub mod client;
pub mod rpc;
pub mod token;

pub use cache::FileCatalogCache;
pub use client::HttpCatalogClient;
pub use token::FileTokenStore;
