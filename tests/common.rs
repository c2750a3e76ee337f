use std::cell::RefCell;
use std::fs;
use std::path::{
    Path,
    PathBuf,
};

use orthoscan::prelude::*;

/// Two-gene query genome; tx1 carries a 10 bp + 8 bp CDS pair.
pub const QUERY_FASTA: &str = "\
>chr1
ATGGCTGCTAAAGGTTGGCTGAAGCCCGGGTTTACGTACGTACGTACGATCGATCGATCG
";

pub const QUERY_GFF: &str = "\
##gff-version 3
chr1\ttoy\tgene\t1\t30\t.\t+\t.\tID=gene1
chr1\ttoy\tmRNA\t1\t30\t.\t+\t.\tID=tx1;Parent=gene1
chr1\ttoy\tCDS\t1\t10\t.\t+\t0\tID=cds1a;Parent=tx1
chr1\ttoy\tCDS\t21\t28\t.\t+\t0\tID=cds1b;Parent=tx1
chr1\ttoy\tgene\t31\t54\t.\t+\t.\tID=gene2
chr1\ttoy\tmRNA\t31\t54\t.\t+\t.\tID=tx2;Parent=gene2
chr1\ttoy\tCDS\t31\t42\t.\t+\t0\tID=cds2;Parent=tx2
";

pub const TARGET_FASTA: &str = "\
>scaf1
ATGGCTGCTAAAGGTTGGCTGAAGTAAGGG
";

pub const TARGET_GFF: &str = "\
##gff-version 3
scaf1\ttoy\tgene\t1\t27\t.\t+\t.\tID=tgene1
scaf1\ttoy\tmRNA\t1\t27\t.\t+\t.\tID=tx_t1;Parent=tgene1
scaf1\ttoy\tCDS\t1\t27\t.\t+\t0\tID=tcds1;Parent=tx_t1
";

/// Target annotation whose transcripts carry no CDS at all.
pub const TARGET_GFF_NO_CDS: &str = "\
##gff-version 3
scaf1\ttoy\tgene\t1\t27\t.\t+\t.\tID=tgene1
scaf1\ttoy\tmRNA\t1\t27\t.\t+\t.\tID=tx_t1;Parent=tgene1
";

/// Engine result with exactly one hit for tx1: e-value 2e-10, 19/20
/// identities (95%).
pub const SINGLE_HIT_XML: &str = r#"<?xml version="1.0"?>
<BlastOutput>
  <BlastOutput_program>blastx</BlastOutput_program>
  <BlastOutput_iterations>
    <Iteration>
      <Iteration_query-def>tx1</Iteration_query-def>
      <Iteration_hits>
        <Hit>
          <Hit_id>gnl|BL_ORD_ID|0</Hit_id>
          <Hit_def>tx_t1</Hit_def>
          <Hit_hsps>
            <Hsp>
              <Hsp_score>56</Hsp_score>
              <Hsp_evalue>2e-10</Hsp_evalue>
              <Hsp_identity>19</Hsp_identity>
              <Hsp_align-len>20</Hsp_align-len>
            </Hsp>
          </Hit_hsps>
        </Hit>
      </Iteration_hits>
    </Iteration>
    <Iteration>
      <Iteration_query-def>tx2</Iteration_query-def>
      <Iteration_hits></Iteration_hits>
    </Iteration>
  </BlastOutput_iterations>
</BlastOutput>
"#;

pub const NO_HIT_XML: &str = r#"<?xml version="1.0"?>
<BlastOutput>
  <BlastOutput_iterations>
    <Iteration>
      <Iteration_query-def>tx1</Iteration_query-def>
      <Iteration_hits></Iteration_hits>
    </Iteration>
  </BlastOutput_iterations>
</BlastOutput>
"#;

/// What a fake engine saw of one invocation.
#[derive(Debug, Clone, Default)]
pub struct EngineTrace {
    pub database_builds: usize,
    pub searches:        usize,
    pub database_fasta:  String,
    pub query_fasta:     String,
}

/// In-memory alignment engine: records its inputs and writes canned XML.
pub struct FakeEngine {
    result_xml: &'static str,
    pub trace:  RefCell<EngineTrace>,
}

impl FakeEngine {
    pub fn new(result_xml: &'static str) -> Self {
        Self {
            result_xml,
            trace: RefCell::new(EngineTrace::default()),
        }
    }
}

impl AlignmentEngine for FakeEngine {
    fn build_database(
        &self,
        proteins: &Path,
        _db_prefix: &Path,
    ) -> Result<()> {
        let mut trace = self.trace.borrow_mut();
        trace.database_builds += 1;
        trace.database_fasta = fs::read_to_string(proteins)?;
        Ok(())
    }

    fn search(
        &self,
        query: &Path,
        _db_prefix: &Path,
        out: &Path,
        _n_threads: usize,
    ) -> Result<()> {
        let mut trace = self.trace.borrow_mut();
        trace.searches += 1;
        trace.query_fasta = fs::read_to_string(query)?;
        fs::write(out, self.result_xml)?;
        Ok(())
    }
}

/// Engine that always fails to build its database.
pub struct BrokenEngine;

impl AlignmentEngine for BrokenEngine {
    fn build_database(
        &self,
        _proteins: &Path,
        _db_prefix: &Path,
    ) -> Result<()> {
        Err(PipelineError::AlignmentEngine {
            code:   Some(2),
            stderr: "BLAST Database creation error".to_string(),
        })
    }

    fn search(
        &self,
        _query: &Path,
        _db_prefix: &Path,
        _out: &Path,
        _n_threads: usize,
    ) -> Result<()> {
        unreachable!("search must not run when the database build failed")
    }
}

/// Writes the four toy inputs into `dir` and returns pipeline inputs for
/// them.
pub fn write_inputs(
    dir: &Path,
    target_gff: &str,
    job_id: &str,
) -> PipelineInputs {
    let write = |name: &str, content: &str| -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    };

    PipelineInputs {
        query_assembly:    write("query.fna", QUERY_FASTA)
            .display()
            .to_string(),
        query_annotation:  write("query.gff", QUERY_GFF)
            .display()
            .to_string(),
        target_assembly:   write("target.fna", TARGET_FASTA)
            .display()
            .to_string(),
        target_annotation: write("target.gff", target_gff)
            .display()
            .to_string(),
        job_id:            job_id.to_string(),
    }
}

/// Scratch directory the pipeline derives from a job id.
pub fn scratch_dir(job_id: &str) -> PathBuf {
    std::env::temp_dir().join(format!("orthoscan-{job_id}"))
}
