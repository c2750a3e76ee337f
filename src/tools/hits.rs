use serde::Deserialize;

use crate::data_structs::AlignmentHit;
use crate::error::{
    PipelineError,
    Result,
};

/// One candidate alignment within a query's search record, already ranked
/// by the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct HitCandidate {
    pub title:      String,
    pub e_value:    f64,
    pub score:      f64,
    pub identities: u64,
    pub align_len:  u64,
}

/// One query's search record: zero or more ranked candidates.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRecord {
    pub query_id: String,
    pub hits:     Vec<HitCandidate>,
}

/// Decodes engine XML output (`-outfmt 5`) into per-query search records.
///
/// Only the top-scoring segment of each hit is kept; candidates stay in
/// engine rank order. An undecodable document is fatal.
pub fn read_search_records(xml: &str) -> Result<Vec<SearchRecord>> {
    let parsed: BlastOutputXml = quick_xml::de::from_str(xml)
        .map_err(|e| PipelineError::ResultParse(e.to_string()))?;

    let records = parsed
        .iterations
        .records
        .into_iter()
        .map(|iteration| {
            let hits = iteration
                .hits
                .unwrap_or_default()
                .hits
                .into_iter()
                .filter_map(|hit| {
                    let title = hit.title();
                    let hsp = hit.hsps.hsps.into_iter().next()?;
                    Some(HitCandidate {
                        title,
                        e_value:    hsp.evalue,
                        score:      hsp.score,
                        identities: hsp.identity,
                        align_len:  hsp.align_len,
                    })
                })
                .collect();
            SearchRecord {
                query_id: iteration.query_def,
                hits,
            }
        })
        .collect();

    Ok(records)
}

/// Reduces search records to the single most significant hit.
///
/// Keeps the candidate with the strictly lowest e-value across all records
/// (record-internal ranking is trusted, so only each record's first
/// candidate competes); ties keep the first one seen. `None` when every
/// record is empty.
pub fn select_best_hit(records: &[SearchRecord]) -> Option<AlignmentHit> {
    let mut best: Option<AlignmentHit> = None;

    for record in records {
        let Some(candidate) = record.hits.first() else {
            continue;
        };
        let is_better = match &best {
            Some(current) => candidate.e_value < current.e_value,
            None => true,
        };
        if is_better {
            best = Some(AlignmentHit {
                query_id:         record.query_id.clone(),
                hit_title:        candidate.title.clone(),
                e_value:          candidate.e_value,
                score:            candidate.score,
                identity_percent: identity_percent(
                    candidate.identities,
                    candidate.align_len,
                ),
            });
        }
    }

    best
}

/// `round(100 * identities / align_len, 2)`.
fn identity_percent(
    identities: u64,
    align_len: u64,
) -> f64 {
    (10_000.0 * identities as f64 / align_len as f64).round() / 100.0
}

#[derive(Debug, Deserialize)]
struct BlastOutputXml {
    #[serde(rename = "BlastOutput_iterations")]
    iterations: IterationsXml,
}

#[derive(Debug, Deserialize, Default)]
struct IterationsXml {
    #[serde(rename = "Iteration", default)]
    records: Vec<IterationXml>,
}

#[derive(Debug, Deserialize)]
struct IterationXml {
    #[serde(rename = "Iteration_query-def")]
    query_def: String,
    #[serde(rename = "Iteration_hits")]
    hits:      Option<IterationHitsXml>,
}

#[derive(Debug, Deserialize, Default)]
struct IterationHitsXml {
    #[serde(rename = "Hit", default)]
    hits: Vec<HitXml>,
}

#[derive(Debug, Deserialize)]
struct HitXml {
    #[serde(rename = "Hit_id", default)]
    id:   String,
    #[serde(rename = "Hit_def", default)]
    def:  String,
    #[serde(rename = "Hit_hsps")]
    hsps: HitHspsXml,
}

impl HitXml {
    /// Title the way NCBI toolkits render it: id and definition joined.
    fn title(&self) -> String {
        match (self.id.is_empty(), self.def.is_empty()) {
            (false, false) => format!("{} {}", self.id, self.def),
            (false, true) => self.id.clone(),
            _ => self.def.clone(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
struct HitHspsXml {
    #[serde(rename = "Hsp", default)]
    hsps: Vec<HspXml>,
}

#[derive(Debug, Deserialize)]
struct HspXml {
    #[serde(rename = "Hsp_score")]
    score:     f64,
    #[serde(rename = "Hsp_evalue")]
    evalue:    f64,
    #[serde(rename = "Hsp_identity")]
    identity:  u64,
    #[serde(rename = "Hsp_align-len")]
    align_len: u64,
}
