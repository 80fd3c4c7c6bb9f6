//! Story filter - which fetched items count toward a feed.

use crate::types::{Item, ItemKind};

/// True iff the item is a story carrying a non-empty external link
pub fn is_qualifying(item: &Item) -> bool {
    item.kind == ItemKind::Story && item.url.as_deref().is_some_and(|u| !u.is_empty())
}
