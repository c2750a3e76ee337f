mod gff_entry;
mod store;

pub use gff_entry::{
    GffAttributes,
    GffEntry,
    RawGffEntry,
};
pub use store::{
    AnnotIndex,
    CDS_TYPE,
    TRANSCRIPT_FALLBACK_TYPE,
    TRANSCRIPT_TYPE,
};
