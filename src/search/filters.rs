use crate::catalog::ColorEntry;

const HEATHER_TAG: &str = "heather";
const ANTIQUE_TAG: &str = "antique";

/// Structured attribute filters. Every field that is set must hold.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SearchFilters {
    /// Exact family match.
    pub family: Option<String>,
    /// `Some(true)` requires the `heather` tag, `Some(false)` forbids it.
    pub is_heather: Option<bool>,
    /// `Some(true)` requires the `antique` tag, `Some(false)` forbids it.
    pub is_antique: Option<bool>,
}

fn tag_constraint_holds(entry: &ColorEntry, tag: &str, wanted: Option<bool>) -> bool {
    wanted.is_none_or(|wanted| entry.has_tag(tag) == wanted)
}

impl SearchFilters {
    #[must_use]
    pub fn family(mut self, family: impl Into<String>) -> Self {
        self.family = Some(family.into());
        self
    }

    #[must_use]
    pub const fn heather(mut self, is_heather: bool) -> Self {
        self.is_heather = Some(is_heather);
        self
    }

    #[must_use]
    pub const fn antique(mut self, is_antique: bool) -> Self {
        self.is_antique = Some(is_antique);
        self
    }

    pub const fn is_empty(&self) -> bool {
        self.family.is_none() && self.is_heather.is_none() && self.is_antique.is_none()
    }

    pub fn matches(&self, entry: &ColorEntry) -> bool {
        let family_ok = self
            .family
            .as_deref()
            .is_none_or(|family| entry.family() == Some(family));
        family_ok
            && tag_constraint_holds(entry, HEATHER_TAG, self.is_heather)
            && tag_constraint_holds(entry, ANTIQUE_TAG, self.is_antique)
    }
}
