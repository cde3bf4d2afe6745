//! # Transition Rules Codec
//!
//! The zone-rules blob written after each zone's raw offset:
//!
//! ```text
//! Blob        := length:int32 Body        (length = byte size of Body)
//! Body        := count:int32 Transition*count
//! Transition  := at:int64 offsetMillis:int32 dst:int32
//! ```
//!
//! The outer length makes the blob self-describing, so a table can be
//! decoded by a reader that skips it as raw bytes.

use serde::Serialize;

use tzp_core::{Comments, DataReader, DataWriter, TableError, ZoneId};
use tzp_table::ZoneRulesCodec;

use crate::catalog::Catalog;
use crate::model::Transition;

/// A zone's transitions, ascending by instant.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ZoneRules {
    pub transitions: Vec<Transition>,
}

/// Encodes transitions from a [`Catalog`] and decodes them from tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransitionRulesCodec<'a> {
    catalog: Option<&'a Catalog>,
}

impl<'a> TransitionRulesCodec<'a> {
    /// A codec that encodes rules from `catalog`.
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog: Some(catalog),
        }
    }

    /// A decode-only codec. Encoding fails with `UnknownIdentifier`.
    pub fn reader() -> Self {
        Self::default()
    }
}

impl ZoneRulesCodec for TransitionRulesCodec<'_> {
    type Rules = ZoneRules;

    fn encode(&self, zone: &ZoneId) -> Result<ZoneRules, TableError> {
        let catalog = self
            .catalog
            .ok_or_else(|| TableError::unknown_zone(zone.as_str()))?;
        Ok(ZoneRules {
            transitions: catalog.zone(zone)?.transitions.clone(),
        })
    }

    fn write(&self, rules: &ZoneRules, out: &mut DataWriter) -> Result<(), TableError> {
        let mut body = DataWriter::new();
        body.write_len("transition count", rules.transitions.len())?;
        for t in &rules.transitions {
            body.write_i64(t.at);
            body.write_i32(t.offset_millis);
            body.write_i32(i32::from(t.dst));
        }
        out.write_bytes(body.as_bytes())
    }

    fn read(&self, input: &mut DataReader<'_>) -> Result<ZoneRules, TableError> {
        let base = input.position() + 4;
        let blob = input.read_bytes()?;
        // Offsets inside the blob are reported relative to the whole table.
        let shift = |e: TableError| match e {
            TableError::UnexpectedEndOfData {
                offset,
                needed,
                available,
            } => TableError::MalformedRecord {
                offset: base + offset,
                reason: format!(
                    "rules blob ends early: needed {needed} byte(s), {available} available"
                ),
            },
            TableError::MalformedRecord { offset, reason } => TableError::MalformedRecord {
                offset: base + offset,
                reason,
            },
            TableError::TrailingData { offset, remaining } => TableError::MalformedRecord {
                offset: base + offset,
                reason: format!("{remaining} unread byte(s) in rules blob"),
            },
            other => other,
        };

        let mut body = DataReader::new(blob);
        let count = body.read_len("transition count").map_err(shift)?;
        let mut transitions = Vec::new();
        for _ in 0..count {
            let offset = body.position();
            let at = body.read_i64().map_err(shift)?;
            let offset_millis = body.read_i32().map_err(shift)?;
            let dst = match body.read_i32().map_err(shift)? {
                0 => false,
                1 => true,
                n => {
                    return Err(shift(TableError::MalformedRecord {
                        offset,
                        reason: format!("dst flag must be 0 or 1, got {n}"),
                    }))
                }
            };
            transitions.push(Transition {
                at,
                offset_millis,
                dst,
            });
        }
        body.finish().map_err(shift)?;
        Ok(ZoneRules { transitions })
    }

    fn comment(&self, rules: &ZoneRules, comments: &mut Comments) {
        comments.line(format_args!("transitions: {}", rules.transitions.len()));
        comments.indent();
        for t in &rules.transitions {
            comments.line(format_args!(
                "at: {} offset: {}{}",
                t.at,
                t.offset_millis,
                if t.dst { " dst" } else { "" }
            ));
        }
        comments.outdent();
    }
}
