mod download;
mod fasta;

pub use download::{
    fetch_source,
    API_KEY_ENV,
};
pub use fasta::{
    write_fasta,
    write_fasta_file,
    SequenceStore,
};
