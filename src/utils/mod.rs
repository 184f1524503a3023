//! Utility modules supporting catalog searches.
//!
//! - [`HttpClient`]: shared reqwest client configured from [`SearchConfig`](crate::config::SearchConfig)
//! - [`render_table`], [`render_plain`], [`render_json`]: result output for the CLI
//! - [`truncate_with_ellipsis`]: width-aware text truncation

mod display;
mod http;

pub use display::{
    availability_label, render_json, render_plain, render_table, truncate_with_ellipsis,
};
pub use http::HttpClient;
