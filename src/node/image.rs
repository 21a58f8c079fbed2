use image::{Rgb, RgbImage};

use super::leaf::{pack, within_tolerance, Leaf};
use super::QuadtreeNode;

/// Settings threaded through a single build.
#[derive(Clone, Copy, Debug)]
struct Limits {
	max_depth: u32,
	tolerance: u32,
}

/// Mean color of the pixels in `region`, each channel truncated.
///
/// Zero-sized regions have no pixels and get color 0.
fn mean_color(img: &RgbImage, region: &Leaf) -> u32 {
	let count = region.area();
	if count == 0 {
		return 0;
	}
	let mut sums = [0u64; 3];
	for y in region.y..region.y + region.height {
		for x in region.x..region.x + region.width {
			let Rgb(px) = img.get_pixel(x, y);
			for (sum, channel) in sums.iter_mut().zip(px.iter()) {
				*sum += *channel as u64;
			}
		}
	}
	pack([
		(sums[0] / count) as u8,
		(sums[1] / count) as u8,
		(sums[2] / count) as u8,
	])
}

/// Whether every pixel's red channel is within `tolerance` percent of the
/// red channel of `region.color`.
///
/// Green and blue are not looked at here; merging checks all three.
fn red_is_homogeneous(img: &RgbImage, region: &Leaf, tolerance: u32) -> bool {
	let red = region.channels()[0];
	(region.y..region.y + region.height).all(|y| {
		(region.x..region.x + region.width)
			.all(|x| within_tolerance(img.get_pixel(x, y).0[0], red, tolerance))
	})
}

impl QuadtreeNode {
	/// Analyzes an image into a quadtree.
	///
	/// A node is split into four while it is shallower than `max_depth` and
	/// some pixel's red channel strays more than `tolerance` percent from the
	/// node's mean red. A `tolerance` of 0 only stops at regions whose red
	/// channel is uniform.
	///
	/// An empty image gives a single zero-sized leaf.
	pub fn from_image(img: &RgbImage, max_depth: u32, tolerance: u32) -> Self {
		let limits = Limits { max_depth, tolerance };
		Self::mount(img, Leaf::rect(0, 0, img.width(), img.height()), 0, &limits)
	}

	fn mount(img: &RgbImage, mut region: Leaf, depth: u32, limits: &Limits) -> Self {
		region.color = mean_color(img, &region);
		if depth >= limits.max_depth || red_is_homogeneous(img, &region, limits.tolerance) {
			return QuadtreeNode::Leaf(region);
		}
		let quads = region.split();
		let sections = [
			Self::mount(img, quads[0], depth + 1, limits),
			Self::mount(img, quads[1], depth + 1, limits),
			Self::mount(img, quads[2], depth + 1, limits),
			Self::mount(img, quads[3], depth + 1, limits),
		];
		QuadtreeNode::Branch(region, Box::new(sections))
	}
}

/// Paints leaf records onto a fresh image.
///
/// The canvas is the bounding box of the leaves, anchored at the origin;
/// pixels no leaf covers stay black. Leaves are painted in order, so later
/// ones win where records overlap.
pub fn reconstruct(leaves: &[Leaf]) -> RgbImage {
	let width = leaves.iter().map(|l| l.x + l.width).max().unwrap_or(0);
	let height = leaves.iter().map(|l| l.y + l.height).max().unwrap_or(0);
	let mut img = RgbImage::new(width, height);
	for leaf in leaves.iter().filter(|l| l.area() > 0) {
		image::imageops::replace(
			&mut img,
			&RgbImage::from_pixel(leaf.width, leaf.height, Rgb(leaf.channels())),
			leaf.x as i64,
			leaf.y as i64,
		);
	}
	img
}
