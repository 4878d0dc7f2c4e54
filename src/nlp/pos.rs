//! Part-of-speech categories
//!
//! Maps raw tagger tags onto the small category alphabet used by the
//! candidate grammar, and decides which neighbouring words count as
//! context words.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::types::{Tagset, Token};

/// Category alphabet of the candidate grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Noun,
    Prefix,
    Adjective,
    Adverb,
    Suffix,
    /// Anything outside the grammar; always breaks a span
    Other,
}

impl Category {
    /// One-letter symbol (`N`, `P`, `J`, `D`, `S`, `O`)
    pub fn symbol(self) -> char {
        match self {
            Category::Noun => 'N',
            Category::Prefix => 'P',
            Category::Adjective => 'J',
            Category::Adverb => 'D',
            Category::Suffix => 'S',
            Category::Other => 'O',
        }
    }
}

/// Maps raw tags to [`Category`] values
#[derive(Debug, Clone)]
pub struct TagMapper {
    categories: FxHashMap<String, Category>,
    /// Tags outside NOUN/ADJECTIVE that still qualify a context word
    context_tags: FxHashSet<String>,
}

impl Default for TagMapper {
    fn default() -> Self {
        Self::unidic()
    }
}

impl TagMapper {
    /// Mapper for KyTea / UniDic style major tags
    pub fn unidic() -> Self {
        let categories = [
            ("名詞", Category::Noun),
            ("接頭辞", Category::Prefix),
            ("形容詞", Category::Adjective),
            ("副詞", Category::Adverb),
            ("接尾辞", Category::Suffix),
        ]
        .into_iter()
        .map(|(tag, cat)| (tag.to_string(), cat))
        .collect();

        let context_tags = ["動詞"].into_iter().map(str::to_string).collect();

        Self {
            categories,
            context_tags,
        }
    }

    /// Mapper for MeCab IPADIC major tags
    pub fn ipadic() -> Self {
        Self::unidic().with_mapping("接頭詞", Category::Prefix)
    }

    /// Create the mapper for a tagset preset
    pub fn for_tagset(tagset: Tagset) -> Self {
        match tagset {
            Tagset::Unidic => Self::unidic(),
            Tagset::Ipadic => Self::ipadic(),
        }
    }

    /// Add or override a tag mapping
    pub fn with_mapping(mut self, tag: &str, category: Category) -> Self {
        self.categories.insert(tag.to_string(), category);
        self
    }

    /// Mark a tag as eligible for context words.
    ///
    /// Tags mapped to NOUN or ADJECTIVE are always eligible.
    pub fn with_context_tag(mut self, tag: &str) -> Self {
        self.context_tags.insert(tag.to_string());
        self
    }

    /// Classify a raw tag.
    ///
    /// MeCab-style feature lists are classified by their first field.
    pub fn category(&self, tag: &str) -> Category {
        self.categories
            .get(major_tag(tag))
            .copied()
            .unwrap_or(Category::Other)
    }

    /// Classify a token; an empty surface form is always [`Category::Other`].
    pub fn token_category(&self, token: &Token) -> Category {
        if token.surface.is_empty() {
            return Category::Other;
        }
        self.category(&token.tag)
    }

    /// Whether a token may serve as a context word
    pub fn is_context_token(&self, token: &Token) -> bool {
        match self.token_category(token) {
            Category::Noun | Category::Adjective => true,
            _ => !token.surface.is_empty() && self.context_tags.contains(major_tag(&token.tag)),
        }
    }
}

/// First field of a comma-separated feature list
fn major_tag(tag: &str) -> &str {
    tag.split(',').next().unwrap_or(tag)
}
