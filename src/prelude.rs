pub use crate::data_structs::annotation::{
    AnnotIndex,
    GffAttributes,
    GffEntry,
    RawGffEntry,
};
pub use crate::data_structs::{
    AlignmentHit,
    Contig,
    SeqRecord,
    Strand,
};
pub use crate::error::{
    PipelineError,
    Result,
};
pub use crate::io::{
    fetch_source,
    write_fasta,
    SequenceStore,
};
pub use crate::tools::{
    assemble_coding_sequences,
    select_best_hit,
    translate,
    AlignmentEngine,
    BlastCli,
    JobContext,
    Pipeline,
    PipelineInputs,
};
