mod assemble;
mod blast;
mod hits;
mod pipeline;
mod translate;

pub use assemble::assemble_coding_sequences;
pub use blast::{
    AlignmentEngine,
    BlastCli,
};
pub use hits::{
    read_search_records,
    select_best_hit,
    HitCandidate,
    SearchRecord,
};
pub use pipeline::{
    JobContext,
    Pipeline,
    PipelineInputs,
};
pub use translate::translate;
