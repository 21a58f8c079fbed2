pub mod node;
pub mod payload;

pub use node::{error, leaf, qtl, QuadtreeNode};
pub use node::image::reconstruct;

use ::image::RgbImage;
use error::{AnalyzeError, PayloadError};
use leaf::color_within_tolerance;

/// Largest width or height `compress` accepts.
///
/// Leaf geometry is stored in 10 bits, and a whole-image leaf must be able
/// to hold the image's full width and height.
pub const MAX_DIMENSION: u32 = (1 << qtl::GEOMETRY_BITS) - 1;

/// Tunables for `compress`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompressOptions {
	/// Nodes at this depth are never split.
	pub max_depth: u32,
	/// How far, in percent of the mean, a channel may stray before a region
	/// counts as non-uniform. 0 is lossless in the red channel.
	pub tolerance: u32,
	/// Upper bound on merge passes after construction.
	pub merge_passes: usize,
}

impl Default for CompressOptions {
	fn default() -> Self {
		CompressOptions { max_depth: 200, tolerance: 0, merge_passes: 10 }
	}
}

impl QuadtreeNode {
	/// Collapses branches whose four sections are leaves close enough in
	/// color to the branch itself.
	///
	/// Sections are merged first, so a collapse can make the parent
	/// eligible within the same pass. Every channel of every section is
	/// compared to the branch's own color, which stays the mean over its
	/// rectangle. Returns how many branches were collapsed.
	pub fn merge_similar_nodes(&mut self, tolerance: u32) -> usize {
		let (parent, merged, collapse) = match self {
			QuadtreeNode::Leaf(_) => return 0,
			QuadtreeNode::Branch(parent, sections) => {
				let merged = sections.iter_mut()
					.map(|s| s.merge_similar_nodes(tolerance))
					.sum::<usize>();
				let collapse = sections.iter().all(|s| s.is_leaf()
					&& color_within_tolerance(s.region().color, parent.color, tolerance));
				(*parent, merged, collapse)
			}
		};
		if collapse {
			*self = QuadtreeNode::Leaf(parent);
			merged + 1
		} else {
			merged
		}
	}

	/// Runs up to `passes` merge passes, stopping early once a pass changes
	/// nothing. Returns the total number of collapsed branches.
	pub fn merge_passes(&mut self, tolerance: u32, passes: usize) -> usize {
		let mut total = 0;
		for pass in 0..passes {
			let merged = self.merge_similar_nodes(tolerance);
			log::trace!("merge pass {} collapsed {} branches", pass, merged);
			if merged == 0 {
				break;
			}
			total += merged;
		}
		total
	}
}

/// Compresses an image into a payload string.
///
/// Builds the quadtree, merges it, and packs its leaves as QTL records.
pub fn compress(img: &RgbImage, options: &CompressOptions) -> Result<String, AnalyzeError> {
	if img.width() > MAX_DIMENSION || img.height() > MAX_DIMENSION {
		return Err(AnalyzeError::TooLarge {
			width: img.width(),
			height: img.height(),
			limit: MAX_DIMENSION,
		});
	}
	let mut tree = QuadtreeNode::from_image(img, options.max_depth, options.tolerance);
	let (built, depth) = (tree.leaf_count(), tree.depth());
	let merged = tree.merge_passes(options.tolerance, options.merge_passes);
	let leaves = tree.leaves();
	log::debug!(
		"{}x{} image: {} leaves built at depth {}, {} branches merged, {} leaves kept at depth {}",
		img.width(), img.height(), built, depth, merged, leaves.len(), tree.depth()
	);
	Ok(payload::to_payload(&qtl::encode(&leaves)))
}

/// Restores an image from a payload string made by `compress`.
pub fn decompress(source: &str) -> Result<RgbImage, PayloadError> {
	let bytes = payload::from_payload(source)?;
	let leaves = qtl::decode(&bytes);
	log::debug!("{} leaves decoded from {} bytes", leaves.len(), bytes.len());
	Ok(reconstruct(&leaves))
}
