use std::fmt;

use failure::Error;
use pest::Parser;

use crate::error::ParseError;

/// Labels that bypass the grammar and are stored verbatim.
const LITERAL_LABELS: [&str; 2] = [".", "._NT"];

// dummy struct required by pest
#[derive(Parser)]
#[grammar = "label.pest"]
struct StemParser;

/// Decomposed nonterminal label.
///
/// A label token such as `NP-SBJ-3=2` consists of a bare category (`NP`),
/// zero or more function tags (`-SBJ`), an optional trace index (`3`) and an
/// optional gap index (`2`). Function tags are stored literally, leading
/// hyphens included, so reassembly is a plain concatenation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Label {
    bare: String,
    function_tags: String,
    trace_index: Option<usize>,
    gap_index: Option<usize>,
}

/// Recoverable irregularities in a label token.
///
/// Historical corpora contain label shapes outside the regular grammar. These
/// are reported to stderr and parsing continues with best-effort values
/// instead of failing the whole tree.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LabelAnomaly {
    /// Trace and gap indices in gap-first order, e.g. `IP-MAT=2-1` instead of
    /// the canonical `IP-MAT-1=2`.
    GapTraceOrder,
    /// The suffix after `=` is not an integer; the gap index is left unset.
    NonIntegerGap,
}

impl Label {
    /// Decompose a nonterminal label token.
    ///
    /// Returns the structured label together with an anomaly flag when the
    /// input used one of the tolerated legacy shapes. Fails with
    /// [`ParseError::LabelFormat`] when the token matches no recognized shape.
    pub fn parse(label: &str) -> Result<(Label, Option<LabelAnomaly>), Error> {
        if LITERAL_LABELS.contains(&label) {
            return Ok((
                Label {
                    bare: label.to_string(),
                    function_tags: String::new(),
                    trace_index: None,
                    gap_index: None,
                },
                None,
            ));
        }

        let mut anomaly = None;
        let mut trace_index = None;
        let mut gap_index = None;
        let mut stem = label;

        match (label.rfind('-'), label.rfind('=')) {
            (Some(hyphen), Some(equals)) if hyphen > equals => {
                // Legacy gap-first order, e.g. `IP-MAT=2-1`. The rightmost
                // suffix takes the trace role, the preceding `=` the gap role.
                eprintln!("gap index precedes trace index in label: {}", label);
                anomaly = Some(LabelAnomaly::GapTraceOrder);
                trace_index = label[hyphen + 1..].parse().ok();
                stem = &label[..hyphen];
                match stem[equals + 1..].parse() {
                    Ok(gap) => gap_index = Some(gap),
                    Err(_) => eprintln!("non-integer gap index in label: {}", label),
                }
                stem = &stem[..equals];
            }
            (_, Some(equals)) => {
                match label[equals + 1..].parse() {
                    Ok(gap) => gap_index = Some(gap),
                    Err(_) => {
                        eprintln!("non-integer gap index in label: {}", label);
                        anomaly = Some(LabelAnomaly::NonIntegerGap);
                    }
                }
                stem = &label[..equals];
                if let Some(hyphen) = stem.rfind('-') {
                    if let Ok(trace) = stem[hyphen + 1..].parse() {
                        trace_index = Some(trace);
                        stem = &stem[..hyphen];
                    }
                }
            }
            (Some(hyphen), None) => {
                // A hyphen suffix is a trace index only if it is an integer,
                // otherwise it is part of the function tags.
                if let Ok(trace) = label[hyphen + 1..].parse() {
                    trace_index = Some(trace);
                    stem = &label[..hyphen];
                }
            }
            (None, None) => (),
        }

        let (bare, function_tags) = split_stem(stem, label)?;
        Ok((
            Label {
                bare,
                function_tags,
                trace_index,
                gap_index,
            },
            anomaly,
        ))
    }

    /// Bare category with function tags and indices stripped.
    pub fn bare(&self) -> &str {
        self.bare.as_str()
    }

    /// Function tag string as captured, leading hyphens included. Empty when
    /// the label carries no tags.
    pub fn function_tags(&self) -> &str {
        self.function_tags.as_str()
    }

    /// Trace index, if the label carries one.
    pub fn trace_index(&self) -> Option<usize> {
        self.trace_index
    }

    /// Gap index, if the label carries one.
    pub fn gap_index(&self) -> Option<usize> {
        self.gap_index
    }
}

impl fmt::Display for Label {
    /// Reassemble the full label.
    ///
    /// Indices are always emitted gap-first (`NP-SBJ=2-1`) regardless of the
    /// order the input used, so anomalous legacy input does not round-trip
    /// verbatim.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.bare, self.function_tags)?;
        if let Some(gap) = self.gap_index {
            write!(f, "={}", gap)?;
        }
        if let Some(trace) = self.trace_index {
            write!(f, "-{}", trace)?;
        }
        Ok(())
    }
}

// Validate the stem against the grammar and split off the bare category.
// `label` is the full token, carried along for error reporting.
fn split_stem(stem: &str, label: &str) -> Result<(String, String), Error> {
    let mut pairs = StemParser::parse(Rule::stem, stem)
        .map_err(|_| ParseError::LabelFormat(label.to_string()))?;
    // safe to unwrap: a successful parse of Rule::stem yields the stem pair
    // with the bare category as its first inner pair
    let stem_pair = pairs.next().unwrap();
    let bare = stem_pair.into_inner().next().unwrap().as_str();
    Ok((bare.to_string(), stem[bare.len()..].to_string()))
}
