use std::io::Read;
use std::path::Path;
use std::process::{
    Command,
    Stdio,
};
use std::time::{
    Duration,
    Instant,
};

use log::{
    debug,
    info,
};

use crate::error::{
    PipelineError,
    Result,
};

/// Capability interface over the external local-alignment engine.
///
/// The pipeline only ever talks to this trait, so the core logic can be
/// exercised against an in-memory fake without real binaries on `PATH`.
pub trait AlignmentEngine {
    /// Builds a searchable protein database from a FASTA file.
    fn build_database(
        &self,
        proteins: &Path,
        db_prefix: &Path,
    ) -> Result<()>;

    /// Searches a nucleotide query FASTA against a previously built
    /// database, writing XML results to `out`.
    fn search(
        &self,
        query: &Path,
        db_prefix: &Path,
        out: &Path,
        n_threads: usize,
    ) -> Result<()>;
}

/// NCBI BLAST+ command-line engine (`makeblastdb` + `blastx`).
#[derive(Debug, Default)]
pub struct BlastCli {
    timeout: Option<Duration>,
}

impl BlastCli {
    /// `timeout` bounds the wall clock of each engine invocation; on
    /// expiry the child process is killed and the run fails.
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }

    fn invoke(
        &self,
        command: Command,
        program: &str,
    ) -> Result<()> {
        match self.timeout {
            Some(timeout) => Self::run_with_timeout(command, program, timeout),
            None => Self::run(command, program),
        }
    }

    fn run(
        mut command: Command,
        program: &str,
    ) -> Result<()> {
        debug!("running {command:?}");
        let output = command.output().map_err(|e| {
            PipelineError::AlignmentEngine {
                code:   None,
                stderr: format!("could not launch {program}: {e}"),
            }
        })?;
        if !output.status.success() {
            return Err(PipelineError::AlignmentEngine {
                code:   output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr)
                    .trim()
                    .to_string(),
            });
        }
        Ok(())
    }

    fn run_with_timeout(
        mut command: Command,
        program: &str,
        timeout: Duration,
    ) -> Result<()> {
        debug!("running {command:?} (timeout {}s)", timeout.as_secs());
        command.stdout(Stdio::null()).stderr(Stdio::piped());
        let mut child = command.spawn().map_err(|e| {
            PipelineError::AlignmentEngine {
                code:   None,
                stderr: format!("could not launch {program}: {e}"),
            }
        })?;

        let deadline = Instant::now() + timeout;
        loop {
            match child.try_wait()? {
                Some(status) => {
                    let mut stderr = String::new();
                    if let Some(mut pipe) = child.stderr.take() {
                        pipe.read_to_string(&mut stderr).ok();
                    }
                    if status.success() {
                        return Ok(());
                    }
                    return Err(PipelineError::AlignmentEngine {
                        code:   status.code(),
                        stderr: stderr.trim().to_string(),
                    });
                },
                None if Instant::now() >= deadline => {
                    child.kill().ok();
                    child.wait().ok();
                    return Err(PipelineError::AlignmentEngine {
                        code:   None,
                        stderr: format!(
                            "{program} timed out after {}s",
                            timeout.as_secs()
                        ),
                    });
                },
                None => std::thread::sleep(Duration::from_millis(200)),
            }
        }
    }
}

impl AlignmentEngine for BlastCli {
    fn build_database(
        &self,
        proteins: &Path,
        db_prefix: &Path,
    ) -> Result<()> {
        info!("building alignment database {}", db_prefix.display());
        let mut command = Command::new("makeblastdb");
        command
            .arg("-in")
            .arg(proteins)
            .arg("-dbtype")
            .arg("prot")
            .arg("-out")
            .arg(db_prefix);
        self.invoke(command, "makeblastdb")
    }

    fn search(
        &self,
        query: &Path,
        db_prefix: &Path,
        out: &Path,
        n_threads: usize,
    ) -> Result<()> {
        info!("searching with {n_threads} worker threads");
        let mut command = Command::new("blastx");
        command
            .arg("-query")
            .arg(query)
            .arg("-db")
            .arg(db_prefix)
            .arg("-out")
            .arg(out)
            .arg("-outfmt")
            .arg("5")
            .arg("-num_threads")
            .arg(n_threads.to_string());
        self.invoke(command, "blastx")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_binary_reports_engine_error() {
        let mut command = Command::new("definitely-not-a-real-binary");
        command.arg("--version");
        let err = BlastCli::run(command, "definitely-not-a-real-binary")
            .unwrap_err();
        match err {
            PipelineError::AlignmentEngine { code, stderr } => {
                assert_eq!(code, None);
                assert!(stderr.contains("could not launch"));
            },
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn nonzero_exit_carries_code_and_stderr() {
        let mut command = Command::new("sh");
        command.arg("-c").arg("echo boom >&2; exit 3");
        let err = BlastCli::run(command, "sh").unwrap_err();
        match err {
            PipelineError::AlignmentEngine { code, stderr } => {
                assert_eq!(code, Some(3));
                assert_eq!(stderr, "boom");
            },
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn timeout_kills_the_child() {
        let mut command = Command::new("sleep");
        command.arg("30");
        let err = BlastCli::run_with_timeout(
            command,
            "sleep",
            Duration::from_millis(300),
        )
        .unwrap_err();
        match err {
            PipelineError::AlignmentEngine { code, stderr } => {
                assert_eq!(code, None);
                assert!(stderr.contains("timed out"));
            },
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
