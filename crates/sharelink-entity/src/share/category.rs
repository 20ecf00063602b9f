//! Share category enumeration.

use serde::{Deserialize, Serialize};

/// Kind of protected resource a share link grants access to.
///
/// The category fixes the cache namespace and the public URL segment of a
/// link; it never changes after the link is minted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShareCategory {
    /// A one-shot login session for an existing user.
    Login,
    /// A private message.
    Message,
    /// An uploaded file.
    File,
}

impl ShareCategory {
    /// All categories, in declaration order.
    pub const ALL: [ShareCategory; 3] = [Self::Login, Self::Message, Self::File];

    /// Public URL segment that prefixes tokens of this category.
    pub fn path_segment(&self) -> &'static str {
        match self {
            Self::Login => "ls",
            Self::Message => "ms",
            Self::File => "fs",
        }
    }

    /// Cache key namespace for stored share values of this category.
    pub fn namespace(&self) -> &'static str {
        match self {
            Self::Login => "ls-",
            Self::Message => "ms-",
            Self::File => "fs-",
        }
    }

    /// Whether links of this category may carry a use counter.
    pub fn supports_count(&self) -> bool {
        !matches!(self, Self::Login)
    }

    /// Resolve a category from its public URL segment.
    pub fn from_path_segment(segment: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|category| category.path_segment() == segment)
    }
}

impl std::fmt::Display for ShareCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Login => write!(f, "login"),
            Self::Message => write!(f, "message"),
            Self::File => write!(f, "file"),
        }
    }
}

impl std::str::FromStr for ShareCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "login" => Ok(Self::Login),
            "message" => Ok(Self::Message),
            "file" => Ok(Self::File),
            _ => Err(format!("Invalid share category: {s}")),
        }
    }
}
