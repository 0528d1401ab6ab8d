use crate::io::Format;

/// Where a marker line sits relative to the record it delimits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// The marker is the first line of the next record.
    Opens,
    /// The marker is the last line of the current record.
    Closes,
}

/// Format-specific record delimiter: a substring that marks a boundary line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundaryRule {
    pub marker: &'static str,
    pub placement: Placement,
}

impl BoundaryRule {
    pub fn for_format(format: Format) -> Self {
        match format {
            Format::Mol2 => Self {
                marker: "MOLECULE",
                placement: Placement::Opens,
            },
            Format::Sdf => Self {
                marker: "$$$$",
                placement: Placement::Closes,
            },
            Format::Maestro => Self {
                marker: "f_m_ct ",
                placement: Placement::Opens,
            },
        }
    }

    /// True if `line` contains the marker anywhere.
    pub fn matches(&self, line: &[u8]) -> bool {
        let marker = self.marker.as_bytes();
        line.len() >= marker.len() && line.windows(marker.len()).any(|w| w == marker)
    }

    pub fn opens(&self) -> bool {
        self.placement == Placement::Opens
    }
}
