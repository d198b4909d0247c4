//! Search provider: turns a query into the ordered list of matching node ids
//! the honeycomb layout consumes.

use std::cmp::Reverse;

use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use crate::engine::{Node, NodeId};

pub trait SearchProvider {
    /// Ids of `nodes` matching `query`, most relevant first.
    fn search(&self, query: &str, nodes: &[Node]) -> Vec<NodeId>;
}

pub struct FuzzySearch {
    matcher: SkimMatcherV2,
    max_results: Option<usize>,
}

impl Default for FuzzySearch {
    fn default() -> Self {
        Self::new(None)
    }
}

impl FuzzySearch {
    pub fn new(max_results: Option<usize>) -> Self {
        Self {
            matcher: SkimMatcherV2::default(),
            max_results,
        }
    }

    fn score(&self, text: &str, query: &str) -> Option<i64> {
        self.matcher
            .fuzzy_match(text, query)
            .or_else(|| self.matcher.fuzzy_match(&text.to_lowercase(), &query.to_lowercase()))
    }

    fn node_score(&self, node: &Node, query: &str) -> Option<i64> {
        let by_id = self.score(&node.id, query);
        let by_type = if node.metadata.node_type.is_empty() {
            None
        } else {
            self.score(&node.metadata.node_type, query)
        };
        by_id.max(by_type)
    }
}

impl SearchProvider for FuzzySearch {
    fn search(&self, query: &str, nodes: &[Node]) -> Vec<NodeId> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }

        let mut scored = nodes
            .iter()
            .filter_map(|node| self.node_score(node, query).map(|score| (score, node.id.as_str())))
            .collect::<Vec<_>>();
        scored.sort_by_key(|&(score, id)| (Reverse(score), id));

        let limit = self.max_results.unwrap_or(scored.len());
        scored
            .into_iter()
            .take(limit)
            .map(|(_, id)| id.to_owned())
            .collect()
    }
}
