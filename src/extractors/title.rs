// src/extractors/title.rs
use serde::Serialize;

use crate::config::TitleSplitPolicy;

/// A reference title split into its edition token and the bare title.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SplitTitle {
    pub edition: String,
    pub title: String,
}

pub struct TitleSplitter {
    policy: TitleSplitPolicy,
}

impl TitleSplitter {
    pub fn new(policy: TitleSplitPolicy) -> Self {
        Self { policy }
    }

    /// Splits `"(2019) Standard Title"` into edition `"2019"` and title `"Standard Title"`.
    ///
    /// Everything up to and including the first `)` is the edition, with all
    /// parentheses removed. The title starts after that `)` and exactly one
    /// separator character. Never fails; out-of-range titles are empty.
    pub fn split(&self, raw_title: &str) -> SplitTitle {
        match raw_title.find(')') {
            Some(close) => SplitTitle {
                edition: strip_parens(&raw_title[..=close]),
                title: skip_first_char(&raw_title[close + 1..]).to_string(),
            },
            None => match self.policy {
                TitleSplitPolicy::Legacy => SplitTitle {
                    edition: strip_parens(raw_title),
                    title: skip_first_char(raw_title).to_string(),
                },
                TitleSplitPolicy::Corrected => SplitTitle {
                    edition: String::new(),
                    title: raw_title.to_string(),
                },
            },
        }
    }
}

impl Default for TitleSplitter {
    fn default() -> Self {
        Self::new(TitleSplitPolicy::default())
    }
}

fn strip_parens(s: &str) -> String {
    s.chars().filter(|c| !matches!(c, '(' | ')')).collect()
}

fn skip_first_char(s: &str) -> &str {
    let mut chars = s.chars();
    chars.next();
    chars.as_str()
}
