//! Data model produced by the configuration parser.
//!
//! Everything here is plain data: owned strings, vectors and a sorted map.
//! The types derive `serde` traits so a parsed page can be snapshotted as
//! JSON or handed to a renderer in another process.
//!
//! Social links and category links share the [`Link`] fields. In JSON the
//! shared fields are flattened, so a [`LinkItem`] serializes as
//! `{name, icon, url, description}`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A fully parsed page configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Profile fields keyed by normalized name (`hero_image`, `username`, ...).
    pub profile: BTreeMap<String, String>,
    /// Social icons in source order.
    pub social: Vec<SocialLink>,
    /// Link categories in source order.
    pub categories: Vec<Category>,
}

impl Document {
    /// Look up a profile field by its normalized key.
    pub fn profile_field(&self, key: &str) -> Option<&str> {
        self.profile.get(key).map(String::as_str)
    }

    /// True when nothing at all was recognized.
    pub fn is_empty(&self) -> bool {
        self.profile.is_empty() && self.social.is_empty() && self.categories.is_empty()
    }

    /// Iterate over every category link, in source order.
    pub fn links(&self) -> impl Iterator<Item = &LinkItem> {
        self.categories.iter().flat_map(|c| c.links.iter())
    }
}

/// Fields shared by social links and category links.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Display label.
    pub name: String,
    /// Normalized icon URL, possibly empty.
    #[serde(default)]
    pub icon: String,
    /// Normalized target URL, possibly empty.
    #[serde(default)]
    pub url: String,
}

impl Link {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Whether the link has somewhere to go.
    #[inline]
    pub fn has_url(&self) -> bool {
        !self.url.is_empty()
    }
}

/// An entry in the social icon row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    #[serde(flatten)]
    pub link: Link,
}

impl SocialLink {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            link: Link::named(name),
        }
    }
}

/// A titled group of link cards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    /// Optional header icon, normalized.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub icon: String,
    pub links: Vec<LinkItem>,
}

impl Category {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// A link card inside a category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkItem {
    #[serde(flatten)]
    pub link: Link,
    #[serde(default)]
    pub description: String,
}

impl LinkItem {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            link: Link::named(name),
            description: String::new(),
        }
    }
}
