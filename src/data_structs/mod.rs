pub mod annotation;
mod coords;
mod enums;
mod records;

pub use coords::Contig;
pub use enums::Strand;
pub use records::{
    AlignmentHit,
    SeqRecord,
};
pub use annotation::{
    AnnotIndex,
    GffEntry,
};
