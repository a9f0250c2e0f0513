use log::{debug, trace};

use crate::geometry::Aabb;
use crate::scene::PrimitiveSource;

use super::Config;

/// A tree node. A leaf holds primitive indices in fixed-capacity slots; a
/// branch holds exactly `max_child_nodes` children. A freshly split branch
/// still carries empty children: their box is the empty sentinel with
/// negative volume, and anything that checks volume skips them.
#[derive(Clone, Debug)]
pub enum Node {
    Leaf {
        bounds: Aabb,
        slots: Box<[Option<u32>]>,
    },
    Branch {
        bounds: Aabb,
        children: Vec<Node>,
    },
}

impl Node {
    pub fn empty_leaf(capacity: usize) -> Self {
        Node::Leaf {
            bounds: Aabb::EMPTY,
            slots: vec![None; capacity].into_boxed_slice(),
        }
    }

    pub fn bounds(&self) -> Aabb {
        match self {
            Node::Leaf { bounds, .. } => *bounds,
            Node::Branch { bounds, .. } => *bounds,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    pub fn depth(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Branch { children, .. } => {
                1 + children.iter().map(Node::depth).max().unwrap_or(0)
            }
        }
    }

    pub fn count(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Branch { children, .. } => {
                1 + children.iter().map(Node::count).sum::<usize>()
            }
        }
    }

    /// Inserts a primitive into the subtree rooted here. `item` is the
    /// primitive's box, looked up once by the caller.
    pub fn insert<S: PrimitiveSource + ?Sized>(
        &mut self,
        index: u32,
        item: Aabb,
        source: &S,
        config: &Config,
    ) {
        match self {
            Node::Leaf { bounds, slots } => {
                if let Some(free) = slots.iter().position(Option::is_none) {
                    slots[free] = Some(index);
                    *bounds = slots
                        .iter()
                        .flatten()
                        .fold(Aabb::EMPTY, |acc, &held| acc.union(&source.bounds(held)));
                    return;
                }
                // no slot left: become a branch, then place the incoming
                // primitive through the branch path below
                self.split(source, config);
                self.insert(index, item, source, config);
            }
            Node::Branch { bounds, children } => {
                Self::place(children, bounds, index, item, source, config);
            }
        }
    }

    /// Converts a full leaf into a branch. The two held primitives whose
    /// union box is largest seed the first two children; everything else
    /// is reinserted through the branch path.
    fn split<S: PrimitiveSource + ?Sized>(&mut self, source: &S, config: &Config) {
        let held: Vec<u32> = match self {
            Node::Leaf { slots, .. } => slots.iter().flatten().copied().collect(),
            Node::Branch { .. } => return,
        };
        debug!("splitting leaf holding {} primitives", held.len());
        let mut seeds = (0, 1);
        let mut largest = f32::NEG_INFINITY;
        for i in 0..held.len() {
            let a = source.bounds(held[i]);
            for j in (i + 1)..held.len() {
                let size = a.union_size(&source.bounds(held[j]));
                if size > largest {
                    largest = size;
                    seeds = (i, j);
                }
            }
        }
        let mut children = Vec::with_capacity(config.max_child_nodes);
        for _ in 0..config.max_child_nodes {
            children.push(Node::empty_leaf(config.max_values_per_node));
        }
        children[0].insert(held[seeds.0], source.bounds(held[seeds.0]), source, config);
        children[1].insert(held[seeds.1], source.bounds(held[seeds.1]), source, config);
        let bounds = children[0].bounds().union(&children[1].bounds());
        *self = Node::Branch { bounds, children };
        for (at, &held_index) in held.iter().enumerate() {
            if at == seeds.0 || at == seeds.1 {
                continue;
            }
            self.insert(held_index, source.bounds(held_index), source, config);
        }
    }

    /// Branch placement. A child whose box already covers the incoming one
    /// takes it outright. Otherwise a child is ruled out when taking the
    /// primitive would grow it past the branch's growth budget, or when
    /// its grown box would overlap a sibling; the surviving child with the
    /// least volume growth wins. Ruling out is advisory: with every child
    /// ruled out, the same minimization runs over all of them.
    fn place<S: PrimitiveSource + ?Sized>(
        children: &mut [Node],
        bounds: &mut Aabb,
        index: u32,
        item: Aabb,
        source: &S,
        config: &Config,
    ) {
        for child in children.iter_mut() {
            if child.bounds().fully_contains(&item) {
                child.insert(index, item, source, config);
                *bounds = bounds.union(&child.bounds());
                return;
            }
        }
        let budget = bounds.size() / (config.max_child_nodes as f32 * config.growth_factor);
        let grown: Vec<f32> = children
            .iter()
            .map(|child| child.bounds().union_size(&item))
            .collect();
        let ignored: Vec<bool> = children
            .iter()
            .enumerate()
            .map(|(at, child)| {
                if grown[at] > budget {
                    return true;
                }
                let post = child.bounds().union(&item);
                children
                    .iter()
                    .enumerate()
                    .any(|(other, sibling)| other != at && post.overlap(&sibling.bounds()))
            })
            .collect();
        let everyone_ignored = ignored.iter().all(|&ruled_out| ruled_out);
        let mut chosen = 0;
        let mut best = f32::INFINITY;
        for (at, child) in children.iter().enumerate() {
            if !everyone_ignored && ignored[at] {
                continue;
            }
            let cost = grown[at] - child.bounds().size().max(0.0);
            if cost < best {
                best = cost;
                chosen = at;
            }
        }
        trace!("primitive {index} placed in child {chosen}, growth cost {best}");
        children[chosen].insert(index, item, source, config);
        *bounds = children
            .iter()
            .fold(Aabb::EMPTY, |acc, child| acc.union(&child.bounds()));
    }
}
