/// Comma-delimited, trimmed segments of a geocoder address, in original order.
///
/// Empty segments ("Rua A,, Centro") are dropped so positional rules count
/// only real components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressParts {
    raw: String,
    segments: Vec<String>,
}

impl AddressParts {
    pub fn split(address: &str) -> Self {
        let segments = address
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        Self {
            raw: address.to_string(),
            segments,
        }
    }

    /// Build from segments that were split upstream. Segments may themselves
    /// contain commas ("Rua das Flores, 123").
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments
            .into_iter()
            .map(|s| s.into().trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        Self {
            raw: segments.join(", "),
            segments,
        }
    }

    /// The unsplit address text.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&str> {
        self.segments.get(idx).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(String::as_str)
    }
}
