//! # orthoscan
//!
//! `orthoscan` is a Rust library and command-line tool for comparing the
//! coding complement of two genome assemblies. Given an assembly (FASTA) and
//! a gene annotation (GFF) for each side, it reconstructs coding sequences
//! transcript by transcript, translates the target set to protein, hands
//! both sets to an external local-alignment engine (NCBI BLAST+), and
//! reduces the search output to the single most significant hit.
//!
//! If you do not want to use orthoscan as a crate, check out the
//! `orthoscan` CLI tool in the `console` workspace member.
//!
//! ## Structure
//!
//! The crate is organized into several modules:
//!
//! * [`data_structs`]: the fundamental data types — genomic spans
//!   ([`Contig`]), annotation features ([`GffEntry`], [`AnnotIndex`]) and
//!   sequence/hit records ([`SeqRecord`], [`AlignmentHit`]).
//! * [`io`]: FASTA loading and writing ([`SequenceStore`]) and
//!   materialization of local or remote input sources.
//! * [`tools`]: the pipeline stages — coding-sequence assembly,
//!   translation, alignment-engine orchestration, best-hit selection and
//!   the job-scoped driver.
//! * [`utils`]: small shared helpers.
//!
//! The number of worker threads handed to the alignment engine can be
//! configured with the `ORTHOSCAN_NUM_THREADS` environment variable.
//!
//! [`Contig`]: data_structs::Contig
//! [`GffEntry`]: data_structs::GffEntry
//! [`AnnotIndex`]: data_structs::AnnotIndex
//! [`SeqRecord`]: data_structs::SeqRecord
//! [`AlignmentHit`]: data_structs::AlignmentHit
//! [`SequenceStore`]: io::SequenceStore

pub mod data_structs;
pub mod error;
pub mod io;
pub mod prelude;
pub mod tools;
pub mod utils;

#[allow(unused_imports)]
use prelude::*;
