use std::fs::File;
use std::io::{
    BufWriter,
    Read,
    Write,
};
use std::path::Path;

use bio::io::fasta::Reader as FastaReader;
use hashbrown::HashMap;
use noodles::fasta as noodles_fasta;

use crate::data_structs::SeqRecord;
use crate::error::{
    PipelineError,
    Result,
};

/// Random-access view over the contigs of one assembly.
///
/// Contig buffers are immutable after load; the store only ever hands out
/// substrings.
pub struct SequenceStore {
    contigs: HashMap<String, String>,
}

impl SequenceStore {
    /// Loads all records of a nucleotide FASTA stream.
    ///
    /// Fails when the stream holds no records, a record is malformed, or a
    /// contig name repeats with a different sequence length. A repeat with
    /// the identical length keeps the first copy.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut contigs: HashMap<String, String> = HashMap::new();

        for record in FastaReader::new(reader).records() {
            let record = record.map_err(|e| {
                PipelineError::SequenceLoad(e.to_string())
            })?;
            record.check().map_err(|e| {
                PipelineError::SequenceLoad(format!(
                    "malformed record '{}': {e}",
                    record.id()
                ))
            })?;

            let name = record.id().to_string();
            let seq = String::from_utf8_lossy(record.seq()).into_owned();
            if let Some(existing) = contigs.get(&name) {
                if existing.len() != seq.len() {
                    return Err(PipelineError::SequenceLoad(format!(
                        "contig '{name}' appears twice with conflicting \
                         lengths ({} vs {})",
                        existing.len(),
                        seq.len()
                    )));
                }
                continue;
            }
            contigs.insert(name, seq);
        }

        if contigs.is_empty() {
            return Err(PipelineError::SequenceLoad(
                "no sequence records found".to_string(),
            ));
        }
        Ok(Self { contigs })
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_reader(File::open(path)?)
    }

    /// Length of a contig, if present.
    pub fn contig_length(
        &self,
        name: &str,
    ) -> Option<u64> {
        self.contigs.get(name).map(|s| s.len() as u64)
    }

    pub fn n_contigs(&self) -> usize {
        self.contigs.len()
    }

    /// Substring of a contig, 1-based inclusive coordinates.
    pub fn slice(
        &self,
        contig: &str,
        start: u64,
        end: u64,
    ) -> Result<&str> {
        let seq = self.contigs.get(contig).ok_or_else(|| {
            PipelineError::OutOfRange(format!("unknown contig '{contig}'"))
        })?;
        if start < 1 || start > end {
            return Err(PipelineError::OutOfRange(format!(
                "invalid interval {start}..{end} on '{contig}'"
            )));
        }
        if end > seq.len() as u64 {
            return Err(PipelineError::OutOfRange(format!(
                "{contig}:{start}-{end} exceeds contig length {}",
                seq.len()
            )));
        }
        Ok(&seq[(start - 1) as usize..end as usize])
    }
}

/// Writes records as FASTA wrapped at 80 columns.
pub fn write_fasta<W: Write>(
    records: &[SeqRecord],
    writer: W,
) -> Result<()> {
    let mut writer = noodles_fasta::io::Writer::new(writer);
    for record in records {
        let definition =
            noodles_fasta::record::Definition::new(record.id.as_str(), None);
        let sequence = noodles_fasta::record::Sequence::from(
            record.seq.as_bytes().to_vec(),
        );
        writer
            .write_record(&noodles_fasta::Record::new(definition, sequence))?;
    }
    Ok(())
}

/// Writes records as FASTA to a file path.
pub fn write_fasta_file<P: AsRef<Path>>(
    records: &[SeqRecord],
    path: P,
) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_fasta(records, &mut writer)?;
    writer.flush()?;
    Ok(())
}
