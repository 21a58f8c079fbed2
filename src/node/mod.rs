pub mod error;
pub mod leaf;

use leaf::Leaf;

/// Node in a quadtree for storing an image.
///
/// Either a leaf, or a branch owning exactly four subnodes that tile its
/// rectangle (top-left, top-right, bottom-left, bottom-right).
///
/// Branches keep their own record too: its color is the mean over the
/// branch's whole rectangle, computed from the source pixels and not from
/// the subnodes, and merging compares subnodes against it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuadtreeNode {
	Leaf(Leaf),
	Branch(Leaf, Box<[QuadtreeNode; 4]>),
}

impl QuadtreeNode {
	/// The rectangle and mean color covered by this node.
	pub fn region(&self) -> &Leaf {
		match self {
			QuadtreeNode::Leaf(leaf) | QuadtreeNode::Branch(leaf, _) => leaf,
		}
	}

	pub fn is_leaf(&self) -> bool {
		matches!(self, QuadtreeNode::Leaf(_))
	}

	pub fn sections(&self) -> Option<&[QuadtreeNode; 4]> {
		match self {
			QuadtreeNode::Leaf(_) => None,
			QuadtreeNode::Branch(_, sections) => Some(sections),
		}
	}

	/// Flattens the tree into its leaf records, depth first and in quadrant
	/// order.
	///
	/// Together the records cover every pixel of the root rectangle exactly
	/// once. Zero-sized leaves produced by splitting one-pixel-wide strips
	/// are kept.
	pub fn leaves(&self) -> Vec<Leaf> {
		let mut out = Vec::with_capacity(self.leaf_count());
		self.collect_leaves(&mut out);
		out
	}

	fn collect_leaves(&self, out: &mut Vec<Leaf>) {
		match self {
			QuadtreeNode::Leaf(leaf) => out.push(*leaf),
			QuadtreeNode::Branch(_, sections) => {
				for section in sections.iter() {
					section.collect_leaves(out);
				}
			}
		}
	}

	pub fn leaf_count(&self) -> usize {
		match self {
			QuadtreeNode::Leaf(_) => 1,
			QuadtreeNode::Branch(_, sections) => sections.iter().map(QuadtreeNode::leaf_count).sum(),
		}
	}

	/// Number of branch levels below this node; 0 for a leaf.
	pub fn depth(&self) -> usize {
		match self {
			QuadtreeNode::Leaf(_) => 0,
			QuadtreeNode::Branch(_, sections) =>
				1 + sections.iter().map(QuadtreeNode::depth).max().unwrap_or(0),
		}
	}
}

pub mod image;
pub mod qtl;

#[cfg(test)]
mod tests {
	use super::*;

	fn branch_of(parent: Leaf, colors: [u32; 4]) -> QuadtreeNode {
		let quads = parent.split();
		QuadtreeNode::Branch(parent, Box::new([
			QuadtreeNode::Leaf(Leaf { color: colors[0], ..quads[0] }),
			QuadtreeNode::Leaf(Leaf { color: colors[1], ..quads[1] }),
			QuadtreeNode::Leaf(Leaf { color: colors[2], ..quads[2] }),
			QuadtreeNode::Leaf(Leaf { color: colors[3], ..quads[3] }),
		]))
	}

	#[test]
	fn leaves_are_collected_in_quadrant_order() {
		let tree = branch_of(Leaf::new(0, 0, 4, 4, 0x808080), [1, 2, 3, 4]);
		let colors = tree.leaves().iter().map(|l| l.color).collect::<Vec<_>>();
		assert_eq!(colors, vec![1, 2, 3, 4]);
		assert_eq!(tree.leaf_count(), 4);
		assert_eq!(tree.depth(), 1);
		assert!(!tree.is_leaf());
	}

	#[test]
	fn nested_branches_are_visited_depth_first() {
		let root = Leaf::new(0, 0, 4, 4, 0);
		let quads = root.split();
		let nested = branch_of(quads[0], [10, 11, 12, 13]);
		let tree = QuadtreeNode::Branch(root, Box::new([
			nested,
			QuadtreeNode::Leaf(Leaf { color: 20, ..quads[1] }),
			QuadtreeNode::Leaf(Leaf { color: 30, ..quads[2] }),
			QuadtreeNode::Leaf(Leaf { color: 40, ..quads[3] }),
		]));
		let colors = tree.leaves().iter().map(|l| l.color).collect::<Vec<_>>();
		assert_eq!(colors, vec![10, 11, 12, 13, 20, 30, 40]);
		assert_eq!(tree.depth(), 2);
		assert_eq!(tree.sections().map(|s| s[0].leaf_count()), Some(4));
	}

	#[test]
	fn leaf_node_yields_itself() {
		let leaf = Leaf::new(0, 0, 3, 3, 0xff0000);
		let tree = QuadtreeNode::Leaf(leaf);
		assert_eq!(tree.leaves(), vec![leaf]);
		assert_eq!(tree.region(), &leaf);
		assert!(tree.sections().is_none());
		assert_eq!(tree.depth(), 0);
	}
}
