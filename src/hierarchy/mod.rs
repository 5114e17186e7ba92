//! Hierarchy resolution: which people are visible, who the roots are, and
//! who is drawn below whom.

pub mod guard;
pub mod relation;
pub mod resolver;
pub mod tree;

pub use guard::{AncestorPath, Chain, ChainEnd, Descent, MAX_CHAIN_HOPS, MAX_RENDER_DEPTH};
pub use relation::{Hierarchy, ViewOptions};
pub use resolver::{resolve_visible_set, Filter, VisibleSet};
pub use tree::{CardNode, ChartNode, TreeBuilder};
