pub mod author;
pub mod fortune;
pub mod tag;

pub use author::*;
pub use fortune::*;
pub use tag::*;

use serde::Serialize;

/// Inclusive character-count bounds for a text attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextLimits {
    pub min: usize,
    pub max: usize,
}

/// Length bounds, counted in Unicode scalar values
pub const AUTHOR_NAME_LIMITS: TextLimits = TextLimits { min: 1, max: 128 };
pub const TAG_VALUE_LIMITS: TextLimits = TextLimits { min: 1, max: 32 };
pub const FORTUNE_CONTENT_LIMITS: TextLimits = TextLimits { min: 1, max: 512 };

/// Response wrapper for collections: `{"items": [...]}`
#[derive(Debug, Serialize)]
pub struct ItemsResponse<T> {
    pub items: Vec<T>,
}

impl<T> ItemsResponse<T> {
    pub fn collect_from<S, I>(iter: I) -> Self
    where
        I: IntoIterator<Item = S>,
        T: From<S>,
    {
        Self {
            items: iter.into_iter().map(T::from).collect(),
        }
    }
}
