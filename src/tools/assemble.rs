use log::debug;

use crate::data_structs::annotation::{
    AnnotIndex,
    CDS_TYPE,
};
use crate::data_structs::SeqRecord;
use crate::error::{
    PipelineError,
    Result,
};
use crate::io::SequenceStore;

/// Reconstructs one coding sequence per CDS-bearing transcript.
///
/// Transcript-level features come from the index (mRNA, falling back to
/// gene); each transcript's CDS children are concatenated in ascending
/// genomic start order. Segments are concatenated in genomic orientation
/// for both strands — minus-strand transcripts come out unreversed.
/// Transcripts without CDS children are skipped; an empty result set is a
/// hard failure carrying `label`.
pub fn assemble_coding_sequences(
    index: &AnnotIndex,
    store: &SequenceStore,
    label: &str,
) -> Result<Vec<SeqRecord>> {
    let mut records = Vec::new();

    for transcript in index.transcript_features() {
        let segments = index.children_of_type(&transcript.id, CDS_TYPE);
        if segments.is_empty() {
            continue;
        }

        let total: u64 = segments
            .iter()
            .map(|segment| segment.contig.length())
            .sum();
        let mut seq = String::with_capacity(total as usize);
        for segment in &segments {
            seq.push_str(store.slice(
                segment.contig.seqname(),
                segment.contig.start(),
                segment.contig.end(),
            )?);
        }

        debug!(
            "assembled {} ({} segments, {} bp)",
            transcript.id,
            segments.len(),
            seq.len()
        );
        records.push(SeqRecord::new(transcript.id.clone(), seq));
    }

    if records.is_empty() {
        return Err(PipelineError::NoCodingSequence(label.to_string()));
    }
    Ok(records)
}
