use std::{fs::File, io::BufReader, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::Result;

///
/// What happens to the order of a [`TraceStore`](crate::TraceStore) after an abstraction step
///
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PostAbstractionOrder {
    /// Keep traces where they are, even if they are no longer ordered or became identical
    #[default]
    Preserve,
    /// Re-sort the traces and merge identical ones after every abstraction step
    ResortAndMerge,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
/// Algorithm parameters for abstraction discovery
pub struct DiscoveryConfig {
    /// A pair is sequential if its precedence-dominance is strictly above this value
    pub seq_threshold: u64,
    /// A pair is concurrent if its precedence-dominance is strictly below this value
    pub con_threshold: u64,
    /// A pair is a choice if both supports are at most `total_events / choice_divisor`
    pub choice_divisor: u64,
    /// Factor applied to SEQ/CON scores of pairs of two original actions
    pub original_boost: u64,
    /// Handling of the trace order after rewriting the log
    pub post_abstraction_order: PostAbstractionOrder,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            seq_threshold: 70,
            con_threshold: 30,
            choice_divisor: 100,
            original_boost: 100,
            post_abstraction_order: PostAbstractionOrder::Preserve,
        }
    }
}

impl DiscoveryConfig {
    /// Serialize discovery parameters to JSON string
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
    /// Deserialize discovery parameters from JSON string
    ///
    /// Missing fields fall back to their [`Default`] values.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
    /// Read discovery parameters from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }
}
