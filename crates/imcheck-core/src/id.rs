//! Widget / window ID system using 64-bit FNV-1a hashing.
//!
//! IDs are scoped: a widget's ID is its parent scope's ID combined with the
//! hash of its label, so `"Test Window/Test Checkbox"` names exactly one item.

/// A cheap, copyable widget identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Id(pub u64);

impl Id {
    /// Hash a single label segment (FNV-1a).
    pub fn from_str(s: &str) -> Self {
        Self(fnv1a(s.as_bytes()))
    }

    /// Combine a parent scope with a child ID.
    #[inline]
    pub fn combine(self, child: Self) -> Self {
        // Boost-style hash combine
        let x = self.0 ^ child.0.wrapping_add(0x9e37_79b9)
            .wrapping_add(self.0 << 6)
            .wrapping_add(self.0 >> 2);
        Self(x)
    }

    /// ID of the labelled child inside this scope.
    pub fn child(self, label: &str) -> Self {
        self.combine(Self::from_str(parse_label(label).1))
    }

    /// Resolve a `/`-separated label path from the root scope.
    ///
    /// Each segment goes through [`parse_label`], so `"##listbox/Item 2"`
    /// resolves to the same ID the list box gives its second row.
    pub fn from_path(path: &str) -> Self {
        let mut segments = path.split('/').filter(|s| !s.is_empty());
        let first = match segments.next() {
            Some(s) => Self::from_str(parse_label(s).1),
            None => return Self::null(),
        };
        segments.fold(first, |acc, seg| acc.child(seg))
    }

    /// Returns 0 (null ID sentinel).
    pub const fn null() -> Self { Self(0) }
    pub fn is_null(self) -> bool { self.0 == 0 }
}

/// Parse a label of the form `"Label##hidden_id"`.
/// Returns `(display_text, id_source)`.
pub fn parse_label(label: &str) -> (&str, &str) {
    if let Some(pos) = label.find("##") {
        (&label[..pos], &label[pos + 2..])
    } else {
        (label, label)
    }
}

// ─── FNV-1a ──────────────────────────────────────────────────────────────────

const FNV_OFFSET: u64 = 14695981039346656037;
const FNV_PRIME:  u64 = 1099511628211;

fn fnv1a(data: &[u8]) -> u64 {
    let mut hash = FNV_OFFSET;
    for &b in data { hash ^= b as u64; hash = hash.wrapping_mul(FNV_PRIME); }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_suffix_is_the_id_source() {
        assert_eq!(parse_label("Slider##vol"), ("Slider", "vol"));
        assert_eq!(parse_label("##listbox"), ("", "listbox"));
        assert_eq!(parse_label("Plain"), ("Plain", "Plain"));
    }

    #[test]
    fn path_matches_nested_scopes() {
        let win = Id::from_str("Test Window");
        let expected = win.child("##listbox").child("Item 2");
        assert_eq!(Id::from_path("Test Window/##listbox/Item 2"), expected);
    }

    #[test]
    fn scope_changes_the_id() {
        let a = Id::from_str("A").child("OK");
        let b = Id::from_str("B").child("OK");
        assert_ne!(a, b);
        assert!(Id::from_path("").is_null());
    }
}
