//! DDL document splitting - best-effort textual segmentation
//!
//! A dump is cut at every occurrence of the literal keyword token, and
//! each fragment is truncated at its first `;`. Fragments without a
//! terminator are trailing noise and are dropped. There is no quote or
//! comment tracking: a `;` inside a string literal ends its block early.

/// Statement keywords the splitter recognizes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DdlKeyword {
    Create,
    Alter,
}

impl DdlKeyword {
    /// The literal token the source text is split on
    pub fn token(&self) -> &'static str {
        match self {
            DdlKeyword::Create => "CREATE",
            DdlKeyword::Alter => "ALTER",
        }
    }
}

impl std::fmt::Display for DdlKeyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.token())
    }
}

/// Lazily yield the statement blocks introduced by `keyword`, in source
/// order, each truncated at its first terminator.
pub fn statement_blocks(source: &str, keyword: DdlKeyword) -> impl Iterator<Item = &str> {
    source
        .split(keyword.token())
        .filter_map(|fragment| fragment.split_once(';').map(|(block, _)| block))
}
