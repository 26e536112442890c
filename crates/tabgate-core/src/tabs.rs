//! Tab identities and the configured tab set.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TabSetError;

/// Stable identity of a tab (`home`, `cart`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(String);

impl TabId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TabId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl PartialEq<str> for TabId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for TabId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// A tab in the navigation shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tab {
    pub id: TabId,
    pub title: String,
    /// Whether selecting this tab needs a signed-in session.
    #[serde(default)]
    pub requires_auth: bool,
}

impl Tab {
    pub fn new(id: &str, title: &str, requires_auth: bool) -> Self {
        Self {
            id: TabId::new(id),
            title: title.to_string(),
            requires_auth,
        }
    }

    /// Home, Cart and Profile; Cart and Profile are protected.
    pub fn standard() -> Vec<Tab> {
        vec![
            Tab::new("home", "Home", false),
            Tab::new("cart", "Cart", true),
            Tab::new("profile", "Profile", true),
        ]
    }
}

/// Ordered, validated set of tabs with a designated fallback.
///
/// The fallback is where the selection lands when a protected tab is
/// blocked, so it must exist and must not require sign-in.
#[derive(Debug, Clone)]
pub struct TabSet {
    tabs: Vec<Tab>,
    fallback: usize,
}

impl TabSet {
    /// Builds a tab set.
    ///
    /// # Errors
    /// Returns an error if the set is empty, has duplicate ids, or the
    /// fallback is missing or protected.
    pub fn new(tabs: Vec<Tab>, fallback: &TabId) -> Result<Self, TabSetError> {
        if tabs.is_empty() {
            return Err(TabSetError::Empty);
        }

        let mut seen = HashSet::new();
        for tab in &tabs {
            if !seen.insert(tab.id.as_str()) {
                return Err(TabSetError::Duplicate(tab.id.clone()));
            }
        }

        let Some(index) = tabs.iter().position(|t| &t.id == fallback) else {
            return Err(TabSetError::UnknownFallback(fallback.clone()));
        };
        if tabs[index].requires_auth {
            return Err(TabSetError::ProtectedFallback(fallback.clone()));
        }

        Ok(Self {
            tabs,
            fallback: index,
        })
    }

    /// The Home/Cart/Profile set with Home as fallback.
    pub fn standard() -> Self {
        Self {
            tabs: Tab::standard(),
            fallback: 0,
        }
    }

    pub fn get(&self, id: &str) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.id == id)
    }

    pub fn position(&self, id: &TabId) -> Option<usize> {
        self.tabs.iter().position(|t| &t.id == id)
    }

    pub fn by_index(&self, index: usize) -> Option<&Tab> {
        self.tabs.get(index)
    }

    pub fn fallback(&self) -> &Tab {
        &self.tabs[self.fallback]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tab> {
        self.tabs.iter()
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_set_falls_back_to_home() {
        let tabs = TabSet::standard();
        assert_eq!(tabs.fallback().id, "home");
        assert_eq!(tabs.len(), 3);
        assert!(tabs.get("cart").is_some_and(|t| t.requires_auth));
        assert!(tabs.get("profile").is_some_and(|t| t.requires_auth));
        assert!(tabs.get("orders").is_none());
    }

    #[test]
    fn rejects_empty_set() {
        let err = TabSet::new(Vec::new(), &TabId::new("home")).unwrap_err();
        assert_eq!(err, TabSetError::Empty);
    }

    #[test]
    fn rejects_duplicate_ids() {
        let tabs = vec![Tab::new("home", "Home", false), Tab::new("home", "Again", false)];
        let err = TabSet::new(tabs, &TabId::new("home")).unwrap_err();
        assert_eq!(err, TabSetError::Duplicate(TabId::new("home")));
    }

    #[test]
    fn rejects_protected_fallback() {
        let err = TabSet::new(Tab::standard(), &TabId::new("cart")).unwrap_err();
        assert_eq!(err, TabSetError::ProtectedFallback(TabId::new("cart")));
    }

    #[test]
    fn rejects_missing_fallback() {
        let err = TabSet::new(Tab::standard(), &TabId::new("search")).unwrap_err();
        assert_eq!(err, TabSetError::UnknownFallback(TabId::new("search")));
    }

    #[test]
    fn supports_custom_protected_tabs() {
        let tabs = vec![
            Tab::new("browse", "Browse", false),
            Tab::new("home", "Home", false),
            Tab::new("orders", "Orders", true),
            Tab::new("wallet", "Wallet", true),
        ];
        let set = TabSet::new(tabs, &TabId::new("browse")).unwrap();
        assert_eq!(set.fallback().id, "browse");
        assert_eq!(set.position(&TabId::new("wallet")), Some(3));
        assert_eq!(set.iter().filter(|t| t.requires_auth).count(), 2);
    }
}
