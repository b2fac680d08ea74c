//! Tunable ranking parameters.
//!
//! Every field has a default, so a config file only needs the values it changes:
//!
//! ```json
//! { "bm25": { "k1": 1.5 }, "positional": { "stopword_weighting": "last_token" } }
//! ```

use crate::resolve::MatchPolicy;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RankingConfig {
    pub bm25: Bm25Params,
    pub blend: BlendWeights,
    pub positional: PositionalParams,
    pub default_policy: MatchPolicy,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Bm25Params {
    /// Term-frequency saturation.
    pub k1: f64,
    /// Length-normalisation strength, 0 disables it.
    pub b: f64,
}

impl Default for Bm25Params {
    fn default() -> Self { Self { k1: 1.2, b: 0.75 } }
}

/// `positional_scale * (title_positional * pt + content_positional * pc)
///  + title_bm25 * bt + content_bm25 * bc`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BlendWeights {
    pub positional_scale: f64,
    pub title_positional: f64,
    pub content_positional: f64,
    pub title_bm25: f64,
    pub content_bm25: f64,
}

impl Default for BlendWeights {
    fn default() -> Self {
        Self { positional_scale: 10.0, title_positional: 0.7, content_positional: 0.2, title_bm25: 0.7, content_bm25: 0.3 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopwordWeighting {
    /// Each matched token's count gets its own multiplier.
    #[default]
    PerToken,
    /// One multiplier for the whole sum, picked by the last query token.
    LastToken,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PositionalParams {
    pub count_weight: f64,
    pub order_weight: f64,
    pub content_word_multiplier: f64,
    pub stopword_multiplier: f64,
    pub stopword_weighting: StopwordWeighting,
}

impl Default for PositionalParams {
    fn default() -> Self {
        Self {
            count_weight: 0.3,
            order_weight: 0.7,
            content_word_multiplier: 4.0,
            stopword_multiplier: 0.25,
            stopword_weighting: StopwordWeighting::PerToken,
        }
    }
}

impl RankingConfig {
    pub fn validate(&self) -> Result<()> {
        let b = &self.blend;
        let p = &self.positional;
        let checks = [
            ("bm25.k1", self.bm25.k1),
            ("bm25.b", self.bm25.b),
            ("blend.positional_scale", b.positional_scale),
            ("blend.title_positional", b.title_positional),
            ("blend.content_positional", b.content_positional),
            ("blend.title_bm25", b.title_bm25),
            ("blend.content_bm25", b.content_bm25),
            ("positional.count_weight", p.count_weight),
            ("positional.order_weight", p.order_weight),
            ("positional.content_word_multiplier", p.content_word_multiplier),
            ("positional.stopword_multiplier", p.stopword_multiplier),
        ];
        for (name, value) in checks {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidConfig(format!("{name} must be a finite non-negative number, got {value}")));
            }
        }
        if self.bm25.b > 1.0 {
            return Err(Error::InvalidConfig(format!("bm25.b must be within [0, 1], got {}", self.bm25.b)));
        }
        Ok(())
    }
}
