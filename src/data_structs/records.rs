use serde::Serialize;

/// An identified sequence, nucleotide or protein.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeqRecord {
    pub id:  String,
    pub seq: String,
}

impl SeqRecord {
    pub fn new(
        id: impl Into<String>,
        seq: impl Into<String>,
    ) -> Self {
        Self {
            id:  id.into(),
            seq: seq.into(),
        }
    }
}

/// The most significant alignment found for one search.
///
/// `identity_percent` is `round(100 * identities / align_len, 2)` for the
/// top-scoring segment of the hit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlignmentHit {
    pub query_id:         String,
    pub hit_title:        String,
    pub e_value:          f64,
    pub score:            f64,
    pub identity_percent: f64,
}
