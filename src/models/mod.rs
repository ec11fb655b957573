//! Content documents and gateway DTOs
//!
//! `content` holds the typed shapes of the remote content API; `requests` and
//! `responses` are the bodies exchanged with gateway clients.

pub mod content;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use content::{AudioMeta, MenuItem, Page, PageSummary, SearchResult, SiteData};
pub use requests::SearchParams;
pub use responses::{
    ClearResponse, ErrorResponse, HealthResponse, InvalidateResponse, LoadResponse,
    StatusResponse,
};
