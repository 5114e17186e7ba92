//! Cycle and depth guard for walking the manager relation
//!
//! Two shapes of traversal share the same protection against malformed data:
//! iterative chain climbing (person -> manager -> manager ...) and recursive
//! descent when building the chart tree. Both stop on a revisited id or on a
//! fixed ceiling and report why they stopped instead of failing.

use std::collections::HashSet;

/// Ceiling on manager hops when climbing a chain
pub const MAX_CHAIN_HOPS: usize = 50;

/// Deepest level rendered below a root
pub const MAX_RENDER_DEPTH: usize = 10;

/// Result of following one link from the current id
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Link {
    /// No further link (the current id is a root)
    End,
    /// Link to an id that resolves
    To(String),
    /// Link to an id that does not resolve
    Dangling(String),
}

/// Why a chain stopped extending
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainEnd {
    Root,
    Dangling { missing: String },
    Cycle { repeated: String },
    HopLimit,
}

/// Ordered ancestors of a starting id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chain {
    pub start: String,
    /// Nearest ancestor first; never contains `start` or a duplicate
    pub ancestors: Vec<String>,
    pub end: ChainEnd,
}

impl Chain {
    /// True when the chain reached a root without faults
    pub fn is_complete(&self) -> bool {
        self.end == ChainEnd::Root
    }
}

/// Climb from `start` following `next` until the chain ends.
///
/// A revisited id stops the climb before it is recorded, so a two-person
/// loop `1 -> 2 -> 1` started at `1` yields ancestors `[2]`.
pub fn climb<F>(start: &str, max_hops: usize, mut next: F) -> Chain
where
    F: FnMut(&str) -> Link,
{
    let mut visited: HashSet<String> = HashSet::from([start.to_string()]);
    let mut ancestors = Vec::new();
    let mut current = start.to_string();

    let end = loop {
        match next(&current) {
            Link::End => break ChainEnd::Root,
            Link::Dangling(missing) => break ChainEnd::Dangling { missing },
            Link::To(id) => {
                if visited.contains(&id) {
                    break ChainEnd::Cycle { repeated: id };
                }
                if ancestors.len() >= max_hops {
                    break ChainEnd::HopLimit;
                }
                visited.insert(id.clone());
                ancestors.push(id.clone());
                current = id;
            }
        }
    };

    Chain {
        start: start.to_string(),
        ancestors,
        end,
    }
}

/// Outcome of trying to descend into a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Descent {
    Enter,
    /// The id is already on the path from the root
    Cycle,
    /// The node would sit below the depth ceiling
    TooDeep,
}

/// Ids from the root down to the current node, passed explicitly
/// through recursive traversals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AncestorPath {
    ids: Vec<String>,
}

impl AncestorPath {
    pub fn new() -> Self {
        Self::default()
    }

    /// Level of a node whose ancestors are this path (roots are level 0)
    pub fn depth(&self) -> usize {
        self.ids.len()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|a| a == id)
    }

    /// Decide whether `id` may be entered below this path
    pub fn check(&self, id: &str, max_depth: usize) -> Descent {
        if self.contains(id) {
            Descent::Cycle
        } else if self.depth() > max_depth {
            Descent::TooDeep
        } else {
            Descent::Enter
        }
    }

    /// The path extended by `id`
    pub fn with(&self, id: &str) -> AncestorPath {
        let mut ids = self.ids.clone();
        ids.push(id.to_string());
        AncestorPath { ids }
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn links(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(a, b)| (a.to_string(), b.to_string()))
            .collect()
    }

    fn follow<'a>(
        managers: &'a HashMap<String, String>,
        known: &'a [&'a str],
    ) -> impl FnMut(&str) -> Link + 'a {
        move |id| match managers.get(id) {
            None => Link::End,
            Some(m) if known.iter().any(|k| *k == m.as_str()) => Link::To(m.clone()),
            Some(m) => Link::Dangling(m.clone()),
        }
    }

    #[test]
    fn test_climb_to_root() {
        let managers = links(&[("3", "2"), ("2", "1")]);
        let known = ["1", "2", "3"];
        let chain = climb("3", MAX_CHAIN_HOPS, follow(&managers, &known));
        assert_eq!(chain.ancestors, vec!["2", "1"]);
        assert_eq!(chain.end, ChainEnd::Root);
        assert!(chain.is_complete());
    }

    #[test]
    fn test_climb_two_person_cycle() {
        let managers = links(&[("1", "2"), ("2", "1")]);
        let known = ["1", "2"];
        let chain = climb("1", MAX_CHAIN_HOPS, follow(&managers, &known));
        assert_eq!(chain.ancestors, vec!["2"]);
        assert_eq!(
            chain.end,
            ChainEnd::Cycle {
                repeated: "1".to_string()
            }
        );
    }

    #[test]
    fn test_climb_self_reference() {
        let managers = links(&[("1", "1")]);
        let known = ["1"];
        let chain = climb("1", MAX_CHAIN_HOPS, follow(&managers, &known));
        assert!(chain.ancestors.is_empty());
        assert!(matches!(chain.end, ChainEnd::Cycle { .. }));
    }

    #[test]
    fn test_climb_dangling() {
        let managers = links(&[("2", "1"), ("1", "ghost")]);
        let known = ["1", "2"];
        let chain = climb("2", MAX_CHAIN_HOPS, follow(&managers, &known));
        assert_eq!(chain.ancestors, vec!["1"]);
        assert_eq!(
            chain.end,
            ChainEnd::Dangling {
                missing: "ghost".to_string()
            }
        );
    }

    #[test]
    fn test_climb_hop_limit() {
        // An endless chain 0 -> 1 -> 2 -> ... never revisits an id
        let chain = climb("0", 5, |id| {
            let n: usize = id.parse().unwrap();
            Link::To((n + 1).to_string())
        });
        assert_eq!(chain.ancestors.len(), 5);
        assert_eq!(chain.end, ChainEnd::HopLimit);
    }

    #[test]
    fn test_chain_exactly_at_limit_reaches_root() {
        let managers = links(&[("0", "1"), ("1", "2")]);
        let known = ["0", "1", "2"];
        let chain = climb("0", 2, follow(&managers, &known));
        assert_eq!(chain.end, ChainEnd::Root);
    }

    #[test]
    fn test_ancestor_path_cycle_before_depth() {
        let mut path = AncestorPath::new();
        for id in ["a", "b", "c"] {
            path = path.with(id);
        }
        assert_eq!(path.depth(), 3);
        assert_eq!(path.check("b", 1), Descent::Cycle);
        assert_eq!(path.check("d", 1), Descent::TooDeep);
        assert_eq!(path.check("d", 3), Descent::Enter);
    }

    #[test]
    fn test_ancestor_path_with_is_pure() {
        let root = AncestorPath::new().with("a");
        let child = root.with("b");
        assert_eq!(root.ids(), ["a".to_string()]);
        assert_eq!(child.ids().len(), 2);
    }
}
