//! Outbound services: the backend API client and link resolution.

pub mod backend;
pub mod link_resolver;

pub use backend::{BackendClient, BackendError, BrandScope, CLIENT_ID_HEADER};
pub use link_resolver::{BackendResolver, HeuristicResolver, LinkResolver};
