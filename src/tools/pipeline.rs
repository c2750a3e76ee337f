use std::fs;
use std::path::PathBuf;

use log::{
    info,
    warn,
};

use crate::data_structs::{
    AlignmentHit,
    AnnotIndex,
    SeqRecord,
};
use crate::error::Result;
use crate::io::{
    fetch_source,
    write_fasta_file,
    SequenceStore,
};
use crate::tools::assemble::assemble_coding_sequences;
use crate::tools::blast::AlignmentEngine;
use crate::tools::hits::{
    read_search_records,
    select_best_hit,
};
use crate::tools::translate::translate;

/// The five inputs identifying one pipeline invocation.
///
/// Assembly/annotation sources may be local paths or `http(s)://` URLs.
/// Callers must keep `job_id` unique across concurrently running jobs —
/// it namespaces every temporary artifact.
#[derive(Debug, Clone)]
pub struct PipelineInputs {
    pub query_assembly:    String,
    pub query_annotation:  String,
    pub target_assembly:   String,
    pub target_annotation: String,
    pub job_id:            String,
}

/// Scope owning every temporary artifact of one job.
///
/// Artifact paths are derived from the job identifier inside a job-private
/// scratch directory. Dropping the context removes all registered
/// artifacts and the directory, best-effort: a failed removal is logged as
/// a warning and never fails the run.
pub struct JobContext {
    job_id:    String,
    dir:       PathBuf,
    artifacts: Vec<PathBuf>,
}

impl JobContext {
    pub fn create(job_id: &str) -> Result<Self> {
        let dir = std::env::temp_dir().join(format!("orthoscan-{job_id}"));
        fs::create_dir_all(&dir)?;
        Ok(Self {
            job_id: job_id.to_string(),
            dir,
            artifacts: Vec::new(),
        })
    }

    pub fn job_id(&self) -> &str {
        &self.job_id
    }

    /// Reserves a job-scoped artifact path and registers it for cleanup.
    pub fn artifact(
        &mut self,
        name: &str,
    ) -> PathBuf {
        let path = self.dir.join(format!("{}_{name}", self.job_id));
        self.register(path.clone());
        path
    }

    /// Registers an externally created file for cleanup.
    pub fn register(
        &mut self,
        path: PathBuf,
    ) {
        if !self.artifacts.contains(&path) {
            self.artifacts.push(path);
        }
    }
}

impl Drop for JobContext {
    fn drop(&mut self) {
        for path in self.artifacts.drain(..) {
            if !path.exists() {
                continue;
            }
            if let Err(e) = fs::remove_file(&path) {
                warn!("could not remove artifact {}: {e}", path.display());
            }
        }
        if self.dir.exists() {
            if let Err(e) = fs::remove_dir(&self.dir) {
                warn!(
                    "could not remove scratch dir {}: {e}",
                    self.dir.display()
                );
            }
        }
    }
}

/// Database component files created by the engine next to the prefix.
const DB_EXTENSIONS: [&str; 3] = ["phr", "pin", "psq"];

/// Linear pipeline driver.
///
/// Stages run strictly in sequence; the first failing stage aborts the run.
/// Temporary artifacts are cleaned up on every exit path.
pub struct Pipeline<'a> {
    engine:    &'a dyn AlignmentEngine,
    n_threads: usize,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        engine: &'a dyn AlignmentEngine,
        n_threads: usize,
    ) -> Self {
        Self { engine, n_threads }
    }

    /// Runs the whole job and returns its most significant hit, if any.
    pub fn run(
        &self,
        inputs: &PipelineInputs,
    ) -> Result<Option<AlignmentHit>> {
        let mut ctx = JobContext::create(&inputs.job_id)?;
        // ctx must outlive every stage so cleanup covers all exit paths
        self.run_stages(inputs, &mut ctx)
    }

    fn run_stages(
        &self,
        inputs: &PipelineInputs,
        ctx: &mut JobContext,
    ) -> Result<Option<AlignmentHit>> {
        let job_id = ctx.job_id().to_string();

        info!("job {job_id}: fetching inputs");
        let query_cds = self.extract_side(
            &inputs.query_assembly,
            &inputs.query_annotation,
            "query",
            ctx,
        )?;
        let target_cds = self.extract_side(
            &inputs.target_assembly,
            &inputs.target_annotation,
            "target",
            ctx,
        )?;

        info!(
            "job {job_id}: translating {} target transcripts",
            target_cds.len()
        );
        let target_proteins: Vec<SeqRecord> =
            target_cds.iter().map(translate).collect();

        let query_path = ctx.artifact("query_cds.fna");
        let db_fasta = ctx.artifact("target_prot.faa");
        write_fasta_file(&query_cds, &query_path)?;
        write_fasta_file(&target_proteins, &db_fasta)?;

        let db_prefix = ctx.artifact("target_db");
        for ext in DB_EXTENSIONS {
            ctx.register(PathBuf::from(format!(
                "{}.{ext}",
                db_prefix.display()
            )));
        }
        let results_xml = ctx.artifact("blast_results.xml");

        info!("job {job_id}: building database and searching");
        self.engine.build_database(&db_fasta, &db_prefix)?;
        self.engine
            .search(&query_path, &db_prefix, &results_xml, self.n_threads)?;

        info!("job {job_id}: selecting best hit");
        let xml = fs::read_to_string(&results_xml)?;
        let records = read_search_records(&xml)?;
        Ok(select_best_hit(&records))
    }

    /// Materializes one genome's inputs and reconstructs its coding
    /// sequences.
    fn extract_side(
        &self,
        assembly_source: &str,
        annotation_source: &str,
        label: &str,
        ctx: &mut JobContext,
    ) -> Result<Vec<SeqRecord>> {
        let assembly_dest = ctx.artifact(&format!("{label}_assembly.fna"));
        let annotation_dest = ctx.artifact(&format!("{label}_annotation.gff"));

        let assembly_path = fetch_source(assembly_source, &assembly_dest)?;
        let annotation_path =
            fetch_source(annotation_source, &annotation_dest)?;

        info!("job {}: extracting {label} coding sequences", ctx.job_id());
        let index =
            AnnotIndex::from_gff_text(&fs::read_to_string(&annotation_path)?)?;
        let store = SequenceStore::from_path(&assembly_path)?;
        assemble_coding_sequences(&index, &store, label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artifacts_are_removed_on_drop() {
        let path;
        {
            let mut ctx = JobContext::create("ctx-test-1").unwrap();
            path = ctx.artifact("marker.txt");
            fs::write(&path, "x").unwrap();
            assert!(path.exists());
        }
        assert!(!path.exists());
        assert!(!path.parent().unwrap().exists());
    }

    #[test]
    fn artifact_names_carry_the_job_id() {
        let mut ctx = JobContext::create("job42").unwrap();
        let path = ctx.artifact("blast_results.xml");
        assert!(path
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("job42_"));
    }

    #[test]
    fn registering_twice_is_harmless() {
        let mut ctx = JobContext::create("ctx-test-2").unwrap();
        let a = ctx.artifact("a");
        ctx.register(a.clone());
        ctx.register(a);
        assert_eq!(ctx.artifacts.len(), 1);
    }
}
