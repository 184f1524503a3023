//! Unified search result shared by every library catalog.

use serde::{Deserialize, Serialize};

/// Format of a catalog title
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Ebook,
    Audiobook,
    Magazine,
    #[serde(untagged)]
    Other(String),
}

impl MediaKind {
    /// Map a catalog `type.id` value onto a known kind
    pub fn from_type_id(id: &str) -> Self {
        match id.to_ascii_lowercase().as_str() {
            "ebook" => MediaKind::Ebook,
            "audiobook" => MediaKind::Audiobook,
            "magazine" => MediaKind::Magazine,
            _ => MediaKind::Other(id.to_string()),
        }
    }

    /// Returns the display name of the kind
    pub fn name(&self) -> &str {
        match self {
            MediaKind::Ebook => "eBook",
            MediaKind::Audiobook => "Audiobook",
            MediaKind::Magazine => "Magazine",
            MediaKind::Other(s) => s,
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A title held by one library, in a backend-agnostic shape.
///
/// Built only by [`normalize`](crate::search::normalize); `is_available`
/// is derived from the copy counts and never set independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryResult {
    /// First creator, "First Last"
    pub author: String,

    /// Short title
    pub title: String,

    /// Full title including subtitle phrases
    pub long_title: String,

    /// Identifier of the library that was queried
    pub library: String,

    /// Copies the library owns
    pub total_copies: u32,

    /// True when the library owns copies and at least one is on the shelf
    pub is_available: bool,

    pub available_copies: u32,

    pub holds_count: u32,

    pub estimated_wait_days: u32,

    pub media_type: MediaKind,
}

impl LibraryResult {
    /// Whether borrowing requires joining the holds queue
    pub fn needs_hold(&self) -> bool {
        self.total_copies > 0 && !self.is_available
    }
}
