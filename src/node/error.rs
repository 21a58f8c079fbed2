use thiserror::Error;

/// Reason why an image couldn't be turned into a payload.
#[derive(Debug, Error)]
pub enum AnalyzeError {
	/// A side of the image does not fit in the 10-bit leaf geometry.
	#[error("image is {width}x{height}, but neither side may exceed {limit}")]
	TooLarge { width: u32, height: u32, limit: u32 },
}

/// Reason why a payload couldn't be opened.
#[derive(Debug, Error)]
pub enum PayloadError {
	/// The text does not start with the payload header.
	#[error("not a quadtree leaf payload")]
	NotAContainer,
	/// The text after the header is not base64.
	#[error("payload body is not valid base64: {0}")]
	Base64(#[from] base64::DecodeError),
}
