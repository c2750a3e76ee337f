use std::fmt;
use std::fmt::Write;
use std::str::FromStr;

use hashbrown::HashMap;
use nanoid::nanoid;
use serde::Deserialize;

use crate::data_structs::coords::Contig;
use crate::data_structs::enums::Strand;
use crate::error::PipelineError;

/// Parsed GFF attribute column.
///
/// Only the keys the pipeline links features with are broken out; every
/// other `key=value` pair is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GffAttributes {
    pub id:     Option<String>,
    pub parent: Option<Vec<String>>,
    pub other:  HashMap<String, String>,
}

impl GffAttributes {
    /// Sets the ID attribute.
    pub fn with_id<S: Into<String>>(
        mut self,
        id: Option<S>,
    ) -> Self {
        self.id = id.map(|s| s.into());
        self
    }

    /// Sets the Parent attribute.
    pub fn with_parent<S: Into<String>>(
        mut self,
        parent: Option<Vec<S>>,
    ) -> Self {
        self.parent = parent.map(|v| {
            v.into_iter()
                .map(|s| s.into())
                .collect()
        });
        self
    }
}

impl FromStr for GffAttributes {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut attributes = GffAttributes::default();
        for pair in s.split(';') {
            let pair = pair.trim();
            if pair.is_empty() {
                continue;
            }

            let mut parts = pair.splitn(2, '=');
            let key = parts.next().ok_or_else(|| {
                PipelineError::AnnotationParse(format!(
                    "missing attribute key in '{pair}'"
                ))
            })?;
            let value = parts.next();

            match key {
                "ID" => {
                    attributes.id = value.map(|s| s.to_string());
                },
                "Parent" => {
                    attributes.parent = value
                        .map(|s| s.split(',').map(|p| p.to_string()).collect());
                },
                _ => {
                    if let Some(val) = value {
                        attributes
                            .other
                            .insert(key.to_string(), val.to_string());
                    }
                },
            }
        }

        Ok(attributes)
    }
}

impl fmt::Display for GffAttributes {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let mut serialized = String::with_capacity(64);
        if let Some(id) = self.id.as_ref() {
            write!(serialized, "ID={id}")?;
        }
        if let Some(parents) = self.parent.as_ref() {
            if !serialized.is_empty() {
                serialized.push(';');
            }
            write!(serialized, "Parent={}", parents.join(","))?;
        }
        let mut sorted_other: Vec<_> = self.other.iter().collect();
        sorted_other.sort_unstable_by_key(|(k, _)| *k);
        for (k, v) in sorted_other {
            if !serialized.is_empty() {
                serialized.push(';');
            }
            write!(serialized, "{k}={v}")?;
        }
        write!(f, "{serialized}")
    }
}

/// One tab-separated GFF line, column for column.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawGffEntry {
    pub seqid:        String,
    pub source:       String,
    pub feature_type: String,
    pub start:        u64,
    pub end:          u64,
    pub score:        String,
    pub strand:       char,
    pub phase:        String,
    pub attributes:   String,
}

/// A validated annotation feature.
#[derive(Debug, Clone, PartialEq)]
pub struct GffEntry {
    pub contig:       Contig,
    pub feature_type: String,
    pub attributes:   GffAttributes,
    pub id:           String,
}

impl GffEntry {
    /// Builds an entry; features without an `ID` attribute get a generated
    /// one so they can still be indexed.
    pub fn new(
        contig: Contig,
        feature_type: impl Into<String>,
        attributes: Option<GffAttributes>,
    ) -> Self {
        let attributes = attributes.unwrap_or_default();
        let id = attributes
            .id
            .as_ref()
            .cloned()
            .unwrap_or_else(|| nanoid!(16));
        Self {
            contig,
            feature_type: feature_type.into(),
            attributes,
            id,
        }
    }

    /// Ids of the features this one names as parents.
    pub fn parent_ids(&self) -> &[String] {
        self.attributes
            .parent
            .as_deref()
            .unwrap_or(&[])
    }
}

impl TryFrom<RawGffEntry> for GffEntry {
    type Error = PipelineError;

    fn try_from(value: RawGffEntry) -> Result<Self, Self::Error> {
        if value.start < 1 || value.start > value.end {
            return Err(PipelineError::AnnotationParse(format!(
                "invalid interval {}..{} on {}",
                value.start, value.end, value.seqid
            )));
        }
        if !matches!(value.strand, '+' | '-' | '.') {
            return Err(PipelineError::AnnotationParse(format!(
                "invalid strand '{}' on {}:{}",
                value.strand, value.seqid, value.start
            )));
        }

        let attributes = GffAttributes::from_str(&value.attributes)?;
        let contig = Contig::new(
            value.seqid,
            value.start,
            value.end,
            Strand::from(value.strand),
        );

        Ok(GffEntry::new(contig, value.feature_type, Some(attributes)))
    }
}
