use hashbrown::HashMap;
use itertools::Itertools;
use multimap::MultiMap;

use crate::data_structs::annotation::{
    GffEntry,
    RawGffEntry,
};
use crate::error::{
    PipelineError,
    Result,
};

/// Feature type used to enumerate transcripts.
pub const TRANSCRIPT_TYPE: &str = "mRNA";
/// Fallback transcript type for annotations without an explicit mRNA level.
pub const TRANSCRIPT_FALLBACK_TYPE: &str = "gene";
/// Feature type of coding-sequence segments.
pub const CDS_TYPE: &str = "CDS";

/// In-memory hierarchical index over the features of one annotation file.
///
/// The index owns every feature; queries hand out references. Parent-child
/// linkage follows the `Parent` attribute, not containment.
pub struct AnnotIndex {
    id_map:       HashMap<String, GffEntry>,
    children_map: MultiMap<String, String>,
}

impl Default for AnnotIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl AnnotIndex {
    pub fn new() -> Self {
        Self {
            id_map:       Default::default(),
            children_map: Default::default(),
        }
    }

    /// Parses the tab-separated records of a GFF document into an index.
    ///
    /// Comment lines (`#…`) are skipped. Any record with a wrong column
    /// count, unparseable coordinates or a bad strand fails the whole
    /// parse.
    pub fn from_gff_text(text: &str) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .comment(Some(b'#'))
            .flexible(false)
            .from_reader(text.as_bytes());

        let mut index = Self::new();
        for record in reader.deserialize::<RawGffEntry>() {
            let raw = record.map_err(|e| {
                PipelineError::AnnotationParse(e.to_string())
            })?;
            index.insert(GffEntry::try_from(raw)?);
        }
        Ok(index)
    }

    /// Inserts a feature, keeping parent linkage intact.
    ///
    /// An id that is already taken gets an `.N` suffix so that sibling
    /// segments sharing one id (a common GFF layout for CDS parts) all
    /// survive indexing.
    pub fn insert(
        &mut self,
        mut entry: GffEntry,
    ) {
        if self.id_map.contains_key(&entry.id) {
            let base = entry.id.clone();
            let mut n = 1usize;
            while self.id_map.contains_key(&entry.id) {
                entry.id = format!("{base}.{n}");
                n += 1;
            }
        }
        for parent in entry.parent_ids().to_vec() {
            self.children_map.insert(parent, entry.id.clone());
        }
        self.id_map.insert(entry.id.clone(), entry);
    }

    pub fn get(
        &self,
        id: &str,
    ) -> Option<&GffEntry> {
        self.id_map.get(id)
    }

    /// All features of one type, ordered by (sequence name, start, id) so
    /// that downstream output is deterministic.
    pub fn features_of_type(
        &self,
        feature_type: &str,
    ) -> Vec<&GffEntry> {
        self.id_map
            .values()
            .filter(|entry| entry.feature_type == feature_type)
            .sorted_by(|a, b| {
                (a.contig.seqname(), a.contig.start(), a.id.as_str())
                    .cmp(&(b.contig.seqname(), b.contig.start(), b.id.as_str()))
            })
            .collect()
    }

    /// Children of `parent_id` with the given type, ordered by ascending
    /// genomic start.
    pub fn children_of_type(
        &self,
        parent_id: &str,
        feature_type: &str,
    ) -> Vec<&GffEntry> {
        self.children_map
            .get_vec(parent_id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| self.id_map.get(id))
                    .filter(|entry| entry.feature_type == feature_type)
                    .sorted_by_key(|entry| entry.contig.start())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Transcript-level features: mRNA, or gene when the annotation has no
    /// mRNA level at all.
    pub fn transcript_features(&self) -> Vec<&GffEntry> {
        let transcripts = self.features_of_type(TRANSCRIPT_TYPE);
        if transcripts.is_empty() {
            self.features_of_type(TRANSCRIPT_FALLBACK_TYPE)
        }
        else {
            transcripts
        }
    }

    pub fn len(&self) -> usize {
        self.id_map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.id_map.is_empty()
    }
}

impl FromIterator<GffEntry> for AnnotIndex {
    fn from_iter<T: IntoIterator<Item = GffEntry>>(iter: T) -> Self {
        let mut new_self = Self::new();
        iter.into_iter().for_each(|entry| {
            new_self.insert(entry);
        });
        new_self
    }
}
