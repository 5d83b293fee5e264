//! Posting module: postings, comments, sympathies and the posting quota.
//!
//! Same layering as `auth`: domain types, a repository trait with an
//! in-memory mock, a SeaORM repository and the service on top.

pub mod domain;
pub mod errors;
pub mod policy;
pub mod repository;
pub mod service;
pub mod repo;

pub use errors::PostingError;
pub use service::PostingService;
