use std::fmt;

/// One key or index step in a decode location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
	/// Named object property.
	Key(String),
	/// Zero-based array element index.
	Index(usize),
}

/// Ordered decode location, used only for diagnostics.
///
/// Each recursive descent produces its own extended copy; sibling branches
/// never observe each other's segments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodingPath {
	segments: Vec<PathSegment>,
}

impl CodingPath {
	/// Empty path at the root value.
	pub fn root() -> Self {
		Self { segments: Vec::new() }
	}

	/// Segments from the root to the current location.
	pub fn segments(&self) -> &[PathSegment] {
		&self.segments
	}

	/// Extended copy with a trailing named key.
	pub fn child_key(&self, key: &str) -> Self {
		let mut segments = self.segments.clone();
		segments.push(PathSegment::Key(key.to_owned()));
		Self { segments }
	}

	/// Extended copy with a trailing element index.
	pub fn child_index(&self, index: usize) -> Self {
		let mut segments = self.segments.clone();
		segments.push(PathSegment::Index(index));
		Self { segments }
	}
}

impl fmt::Display for CodingPath {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("$")?;
		for segment in &self.segments {
			match segment {
				PathSegment::Key(key) => write!(f, ".{key}")?,
				PathSegment::Index(index) => write!(f, "[{index}]")?,
			}
		}
		Ok(())
	}
}
