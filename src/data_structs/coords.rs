use std::fmt::Display;

use crate::data_structs::enums::Strand;

/// A genomic span: sequence name, 1-based inclusive start and end, strand.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Contig {
    seqname: String,
    start:   u64,
    end:     u64,
    strand:  Strand,
}

impl Contig {
    /// Creates a new `Contig`.
    pub fn new(
        seqname: impl Into<String>,
        start: u64,
        end: u64,
        strand: Strand,
    ) -> Self {
        assert!(
            start <= end,
            "Start position must be less than or equal to end position"
        );
        Self {
            seqname: seqname.into(),
            start,
            end,
            strand,
        }
    }

    /// Returns the sequence name.
    pub fn seqname(&self) -> &str {
        &self.seqname
    }

    /// Returns the start position (1-based).
    pub fn start(&self) -> u64 {
        self.start
    }

    /// Returns the end position (1-based, inclusive).
    pub fn end(&self) -> u64 {
        self.end
    }

    /// Returns the strand.
    pub fn strand(&self) -> Strand {
        self.strand
    }

    /// Number of bases covered by the span.
    pub fn length(&self) -> u64 {
        self.end - self.start + 1
    }

    /// Checks if this span is fully contained within another on the same
    /// sequence.
    pub fn is_in(
        &self,
        other: &Self,
    ) -> bool {
        self.seqname == other.seqname
            && self.start >= other.start
            && self.end <= other.end
    }
}

impl Display for Contig {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(
            f,
            "{}:{}-{} ({})",
            self.seqname, self.start, self.end, self.strand
        )
    }
}
