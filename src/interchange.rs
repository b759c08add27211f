//! The state document passed between separate stage runs.
//!
//! Each stage run loads the document, takes its input from the section of the
//! stage before it, and stores the document back with its own section added.
//! Earlier sections pass through unchanged; recording a stage drops the
//! sections of every later stage, which were computed from older input.
//!
//! The document is TOML with one optional section per stage: `reservoir`,
//! `wells` and `flowlines` hold one entry per line, `trunk` holds the
//! junction and the trunk profile. Values are SI.

mod records;

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::production::{
    FlowlineOutput, LINE_COUNT, LineProfile, ReservoirOutput, Stage, TrunkOutput, WellOutput,
};

use records::{DrainageRecord, LineRecord, TrunkRecord};

/// A stage was run before the stage it depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("the {stage} stage needs {missing} stage output, which the state document lacks")]
pub struct SequenceError {
    /// The stage that was asked to run.
    pub stage: Stage,
    /// The upstream stage whose section is missing.
    pub missing: Stage,
}

/// Errors raised while reading or writing a state document.
#[derive(Debug, Error)]
pub enum InterchangeError {
    #[error("failed to read state document {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write state document {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse state document")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize state document")]
    Serialize(#[from] toml::ser::Error),

    /// A section does not describe a valid stage output.
    #[error("malformed `{section}` section: {reason}")]
    Malformed {
        section: &'static str,
        reason: String,
    },

    #[error(transparent)]
    Sequence(#[from] SequenceError),
}

/// Persisted outputs of the stages run so far.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StateDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reservoir: Option<Vec<DrainageRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    wells: Option<Vec<LineRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    flowlines: Option<Vec<LineRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    trunk: Option<TrunkRecord>,
}

impl StateDocument {
    /// Reads a state document from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`InterchangeError::Read`] or [`InterchangeError::Parse`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, InterchangeError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| InterchangeError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Writes this document to `path`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns [`InterchangeError::Serialize`] or [`InterchangeError::Write`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), InterchangeError> {
        let path = path.as_ref();
        let text = self.to_toml_string()?;
        fs::write(path, text).map_err(|source| InterchangeError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parses a state document.
    ///
    /// # Errors
    ///
    /// Returns [`InterchangeError::Parse`] if the text is not a state document.
    pub fn from_toml_str(text: &str) -> Result<Self, InterchangeError> {
        Ok(toml::from_str(text)?)
    }

    /// Serializes this document.
    ///
    /// # Errors
    ///
    /// Returns [`InterchangeError::Serialize`] if serialization fails.
    pub fn to_toml_string(&self) -> Result<String, InterchangeError> {
        Ok(toml::to_string(self)?)
    }

    /// Records the reservoir stage output.
    pub fn record_reservoir(&mut self, output: &ReservoirOutput) {
        self.reservoir = Some(output.wells.iter().map(DrainageRecord::from).collect());
        self.wells = None;
        self.flowlines = None;
        self.trunk = None;
    }

    /// Records the well stage output.
    pub fn record_wells(&mut self, output: &WellOutput) {
        self.wells = Some(output.wells.iter().map(LineRecord::from).collect());
        self.flowlines = None;
        self.trunk = None;
    }

    /// Records the flowline stage output.
    pub fn record_flowlines(&mut self, output: &FlowlineOutput) {
        self.flowlines = Some(output.lines.iter().map(LineRecord::from).collect());
        self.trunk = None;
    }

    /// Records the trunk stage output.
    pub fn record_trunk(&mut self, output: &TrunkOutput) {
        self.trunk = Some(TrunkRecord::from(output));
    }

    /// Input of the well stage.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError`] if the reservoir has not been recorded, or
    /// [`InterchangeError::Malformed`] if its section is invalid.
    pub fn well_input(&self) -> Result<ReservoirOutput, InterchangeError> {
        const SECTION: &str = "reservoir";

        let records = self.reservoir.as_deref().ok_or(SequenceError {
            stage: Stage::Well,
            missing: Stage::Reservoir,
        })?;
        let wells = per_line(SECTION, records, |record| {
            record
                .to_profile()
                .ok_or_else(|| malformed(SECTION, "profile arrays are empty or differ in length"))
        })?;

        Ok(ReservoirOutput { wells })
    }

    /// Input of the flowline stage.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError`] if the wells have not been recorded, or
    /// [`InterchangeError::Malformed`] if their section is invalid.
    pub fn flowline_input(&self) -> Result<WellOutput, InterchangeError> {
        let records = self.wells.as_deref().ok_or(SequenceError {
            stage: Stage::Flowline,
            missing: Stage::Well,
        })?;

        Ok(WellOutput {
            wells: line_profiles("wells", records)?,
        })
    }

    /// Input of the trunk stage.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError`] if the flowlines have not been recorded, or
    /// [`InterchangeError::Malformed`] if their section is invalid.
    pub fn trunk_input(&self) -> Result<FlowlineOutput, InterchangeError> {
        let records = self.flowlines.as_deref().ok_or(SequenceError {
            stage: Stage::Trunk,
            missing: Stage::Flowline,
        })?;

        Ok(FlowlineOutput {
            lines: line_profiles("flowlines", records)?,
        })
    }

    /// The recorded trunk output, if the trunk stage has run.
    ///
    /// # Errors
    ///
    /// Returns [`InterchangeError::Malformed`] if the section is invalid.
    pub fn trunk_output(&self) -> Result<Option<TrunkOutput>, InterchangeError> {
        self.trunk
            .as_ref()
            .map(|record| {
                record
                    .to_output()
                    .ok_or_else(|| malformed("trunk", "line arrays are empty or differ in length"))
            })
            .transpose()
    }
}

fn malformed(section: &'static str, reason: impl Into<String>) -> InterchangeError {
    InterchangeError::Malformed {
        section,
        reason: reason.into(),
    }
}

/// Converts exactly one record per line.
fn per_line<R, T>(
    section: &'static str,
    records: &[R],
    convert: impl Fn(&R) -> Result<T, InterchangeError>,
) -> Result<[T; LINE_COUNT], InterchangeError> {
    let converted = records.iter().map(convert).collect::<Result<Vec<_>, _>>()?;
    let count = converted.len();
    converted
        .try_into()
        .map_err(|_| malformed(section, format!("expected {LINE_COUNT} entries, found {count}")))
}

fn line_profiles(
    section: &'static str,
    records: &[LineRecord],
) -> Result<[LineProfile; LINE_COUNT], InterchangeError> {
    per_line(section, records, |record| {
        record
            .to_profile()
            .ok_or_else(|| malformed(section, "line arrays are empty or differ in length"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use twine_core::Model;

    use crate::{config::Config, models::production::Pipeline};

    fn document() -> (StateDocument, crate::models::production::PipelineOutput) {
        let config = Config::from_toml_str(include_str!("../data/field.toml")).unwrap();
        let output = Pipeline::new(&config).call(&config.reservoir).unwrap();

        let mut document = StateDocument::default();
        document.record_reservoir(&output.reservoir);
        document.record_wells(&output.wells);
        document.record_flowlines(&output.flowlines);
        document.record_trunk(&output.trunk);
        (document, output)
    }

    #[test]
    fn sections_survive_a_text_round_trip() {
        let (document, output) = document();

        let text = document.to_toml_string().unwrap();
        let restored = StateDocument::from_toml_str(&text).unwrap();

        assert_eq!(restored, document);
        assert_eq!(restored.well_input().unwrap(), output.reservoir);
        assert_eq!(restored.flowline_input().unwrap(), output.wells);
        assert_eq!(restored.trunk_input().unwrap(), output.flowlines);
        assert_eq!(restored.trunk_output().unwrap(), Some(output.trunk));
    }

    #[test]
    fn stages_out_of_order_are_sequence_errors() {
        let empty = StateDocument::default();

        assert!(matches!(
            empty.well_input(),
            Err(InterchangeError::Sequence(SequenceError {
                stage: Stage::Well,
                missing: Stage::Reservoir
            }))
        ));
        assert!(matches!(
            empty.trunk_input(),
            Err(InterchangeError::Sequence(SequenceError {
                stage: Stage::Trunk,
                missing: Stage::Flowline
            }))
        ));
        assert!(matches!(empty.trunk_output(), Ok(None)));
    }

    #[test]
    fn recording_an_upstream_stage_clears_later_sections() {
        let (mut document, output) = document();

        document.record_reservoir(&output.reservoir);
        assert!(document.well_input().is_ok());
        assert!(matches!(
            document.flowline_input(),
            Err(InterchangeError::Sequence(_))
        ));
        assert!(matches!(document.trunk_output(), Ok(None)));
    }

    #[test]
    fn wrong_line_count_is_malformed() {
        let (mut document, _) = document();
        if let Some(wells) = document.wells.as_mut() {
            wells.pop();
        }

        assert!(matches!(
            document.flowline_input(),
            Err(InterchangeError::Malformed {
                section: "wells",
                ..
            })
        ));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        assert!(matches!(
            StateDocument::load("no/such/state.toml"),
            Err(InterchangeError::Read { .. })
        ));
    }
}
