// ABOUTME: Domain service for boards, items and tags
// ABOUTME: Owns validation and tag invariants; the only caller of the storage gateway

pub mod error;
pub mod markdown;
pub mod service;
pub mod tags;

pub use error::{ServiceError, ServiceResult};
pub use markdown::items_to_markdown;
pub use service::BoardService;
pub use tags::{extract_tags, normalize_tags, TAGS_SEPARATOR};
