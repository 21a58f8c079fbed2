/// Packed `0xRRGGBB` color.
pub type Color = u32;

/// A rectangle of the image together with the mean color of the pixels
/// it covers.
///
/// Every node of a `QuadtreeNode` carries one of these; once the tree is
/// flattened, the leaves' records are all that is kept.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Leaf {
	pub x: u32,
	pub y: u32,
	pub width: u32,
	pub height: u32,
	pub color: Color,
}

impl Leaf {
	pub fn new(x: u32, y: u32, width: u32, height: u32, color: Color) -> Self {
		Self { x, y, width, height, color }
	}

	/// A record with no color assigned yet.
	pub fn rect(x: u32, y: u32, width: u32, height: u32) -> Self {
		Self::new(x, y, width, height, 0)
	}

	pub fn area(&self) -> u64 {
		self.width as u64 * self.height as u64
	}

	/// Splits the rectangle into its four quadrants, in top-left, top-right,
	/// bottom-left, bottom-right order.
	///
	/// For odd sizes the extra column goes to the right quadrants and the
	/// extra row to the bottom ones, so the quadrants always tile `self`
	/// exactly. Zero-sized quadrants are possible for widths or heights of 1.
	pub fn split(&self) -> [Leaf; 4] {
		let half_w = self.width / 2;
		let half_h = self.height / 2;
		let rem_w = self.width - half_w;
		let rem_h = self.height - half_h;
		[
			Leaf::rect(self.x, self.y, half_w, half_h),
			Leaf::rect(self.x + half_w, self.y, rem_w, half_h),
			Leaf::rect(self.x, self.y + half_h, half_w, rem_h),
			Leaf::rect(self.x + half_w, self.y + half_h, rem_w, rem_h),
		]
	}

	/// Red, green and blue channels of `color`.
	pub fn channels(&self) -> [u8; 3] {
		unpack(self.color)
	}
}

pub fn pack(rgb: [u8; 3]) -> Color {
	(rgb[0] as u32) << 16 | (rgb[1] as u32) << 8 | rgb[2] as u32
}

pub fn unpack(color: Color) -> [u8; 3] {
	[(color >> 16) as u8, (color >> 8) as u8, color as u8]
}

/// Whether `value` is within `tolerance` percent of `reference`.
///
/// The allowed deviation is `reference * tolerance / 100`, truncated, so a
/// reference of 0 only admits an exact match.
pub fn within_tolerance(value: u8, reference: u8, tolerance: u32) -> bool {
	let limit = reference as u64 * tolerance as u64 / 100;
	(value.abs_diff(reference) as u64) <= limit
}

/// Per-channel `within_tolerance` over all three channels.
pub fn color_within_tolerance(color: Color, reference: Color, tolerance: u32) -> bool {
	unpack(color).iter()
		.zip(unpack(reference).iter())
		.all(|(c, r)| within_tolerance(*c, *r, tolerance))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn split_even_rectangle() {
		let quads = Leaf::rect(0, 0, 8, 8).split();
		assert_eq!(quads, [
			Leaf::rect(0, 0, 4, 4),
			Leaf::rect(4, 0, 4, 4),
			Leaf::rect(0, 4, 4, 4),
			Leaf::rect(4, 4, 4, 4),
		]);
	}

	#[test]
	fn split_odd_rectangle_gives_remainder_to_right_and_bottom() {
		let quads = Leaf::rect(2, 3, 3, 5).split();
		assert_eq!(quads, [
			Leaf::rect(2, 3, 1, 2),
			Leaf::rect(3, 3, 2, 2),
			Leaf::rect(2, 5, 1, 3),
			Leaf::rect(3, 5, 2, 3),
		]);
		assert_eq!(quads.iter().map(Leaf::area).sum::<u64>(), 15);
	}

	#[test]
	fn split_single_column_has_empty_quadrants() {
		let quads = Leaf::rect(0, 0, 1, 2).split();
		assert_eq!(quads[0].area(), 0);
		assert_eq!(quads[2].area(), 0);
		assert_eq!(quads[1], Leaf::rect(0, 0, 1, 1));
		assert_eq!(quads[3], Leaf::rect(0, 1, 1, 1));
	}

	#[test]
	fn pack_and_unpack_channels() {
		assert_eq!(pack([0x12, 0x34, 0x56]), 0x123456);
		assert_eq!(unpack(0xabcdef), [0xab, 0xcd, 0xef]);
		assert_eq!(Leaf::new(0, 0, 1, 1, 0x010203).channels(), [1, 2, 3]);
	}

	#[test]
	fn tolerance_is_relative_to_reference() {
		// 10% of 200 is 20
		assert!(within_tolerance(220, 200, 10));
		assert!(within_tolerance(180, 200, 10));
		assert!(!within_tolerance(221, 200, 10));
		// 5% of 10 truncates to 0
		assert!(!within_tolerance(11, 10, 5));
		assert!(within_tolerance(0, 0, 100));
		assert!(!within_tolerance(1, 0, 100));
	}

	#[test]
	fn color_tolerance_checks_every_channel() {
		assert!(color_within_tolerance(0x646464, 0x646464, 0));
		assert!(!color_within_tolerance(0x646564, 0x646464, 0));
		assert!(!color_within_tolerance(0x646465, 0x646464, 0));
		assert!(color_within_tolerance(0x6e5a64, 0x646464, 10));
	}
}
