//! The QTL leaf format: each leaf record packed into eight bytes.
//!
//! Fields are written bitwise big-endian with no padding between them:
//!
//! | field  | bits |
//! |--------|------|
//! | x      | 10   |
//! | y      | 10   |
//! | width  | 10   |
//! | height | 10   |
//! | color  | 24   |
//!
//! Records are concatenated with no header, count or checksum. Geometry
//! wider than 10 bits loses its upper bits, so 1024 is written as 0.

use bitvec::prelude::*;

use super::leaf::Leaf;

/// A `BitVec` variant ideal for packing leaf records.
type LeafEncodeBitVec = BitVec<u8, Msb0>;

/// Bytes taken by one leaf record.
pub const RECORD_BYTES: usize = 8;
/// Bits kept of each of `x`, `y`, `width` and `height`.
pub const GEOMETRY_BITS: u32 = 10;
pub const COLOR_BITS: u32 = 24;

/// Appends the low `width` bits of `value`, most significant first.
fn push_field(buffer: &mut LeafEncodeBitVec, value: u32, width: u32) {
	for bit_ind in 0..width {
		buffer.push(value & (1 << (width - bit_ind - 1)) != 0);
	}
}

/// Reads `width` bits starting at `start` as a big-endian number.
fn read_field(bits: &BitSlice<u8, Msb0>, start: usize, width: u32) -> u32 {
	let mut n = 0;
	for bit_ind in 0..width as usize {
		n |= (bits[start + bit_ind] as u32) << (width as usize - bit_ind - 1);
	}
	n
}

impl Leaf {
	/// Appends this record's 64 bits to `buffer`.
	pub fn encode_into(&self, buffer: &mut LeafEncodeBitVec) {
		for field in [self.x, self.y, self.width, self.height] {
			push_field(buffer, field, GEOMETRY_BITS);
		}
		push_field(buffer, self.color, COLOR_BITS);
	}

	/// Reads one record.
	pub fn decode_from(record: &[u8; RECORD_BYTES]) -> Leaf {
		let bits = record.view_bits::<Msb0>();
		let g = GEOMETRY_BITS as usize;
		Leaf {
			x: read_field(bits, 0, GEOMETRY_BITS),
			y: read_field(bits, g, GEOMETRY_BITS),
			width: read_field(bits, 2 * g, GEOMETRY_BITS),
			height: read_field(bits, 3 * g, GEOMETRY_BITS),
			color: read_field(bits, 4 * g, COLOR_BITS),
		}
	}
}

/// Packs leaf records into QTL bytes, `RECORD_BYTES` per leaf.
pub fn encode(leaves: &[Leaf]) -> Vec<u8> {
	let mut bit_buf = LeafEncodeBitVec::with_capacity(leaves.len() * RECORD_BYTES * 8);
	for leaf in leaves {
		leaf.encode_into(&mut bit_buf);
	}
	log::trace!("packed {} leaves into {} bytes", leaves.len(), bit_buf.len() / 8);
	bit_buf.into_vec()
}

/// Unpacks QTL bytes into leaf records.
///
/// Nothing is validated: a trailing partial record is dropped silently and
/// corrupted bytes come back as whatever geometry they spell.
pub fn decode(source: &[u8]) -> Vec<Leaf> {
	let records = source.chunks_exact(RECORD_BYTES);
	if !records.remainder().is_empty() {
		log::debug!("ignoring {} trailing bytes of a partial record", records.remainder().len());
	}
	records
		.filter_map(|r| <&[u8; RECORD_BYTES]>::try_from(r).ok())
		.map(Leaf::decode_from)
		.collect()
}
