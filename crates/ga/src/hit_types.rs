//! Hit-type registry: which fields each GA `send` hit takes, and in what
//! positional order.
//!
//! Field names follow the analytics.js `send` method reference. Required fields
//! are passed before optional ones, each group in declaration order.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use i13n_core::DispatchError;

/// Field contract for one hit type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitTypeSpec {
    pub required: &'static [&'static str],
    pub optional: &'static [&'static str],
}

const EVENT: HitTypeSpec = HitTypeSpec {
    required: &["category", "action", "label"],
    optional: &["value"],
};

const PAGEVIEW: HitTypeSpec = HitTypeSpec {
    required: &[],
    optional: &["location", "page", "title"],
};

const SOCIAL: HitTypeSpec = HitTypeSpec {
    required: &["socialNetwork", "socialAction", "socialTarget"],
    optional: &[],
};

const TIMING: HitTypeSpec = HitTypeSpec {
    required: &["timingCategory", "timingVar", "timingValue"],
    optional: &["timingLabel"],
};

// Exception hits carry a single free-form field.
const EXCEPTION: HitTypeSpec = HitTypeSpec {
    required: &[],
    optional: &["errorData"],
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HitType {
    Event,
    Pageview,
    Social,
    Timing,
    Exception,
}

impl HitType {
    pub const ALL: [HitType; 5] = [
        HitType::Event,
        HitType::Pageview,
        HitType::Social,
        HitType::Timing,
        HitType::Exception,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            HitType::Event => "event",
            HitType::Pageview => "pageview",
            HitType::Social => "social",
            HitType::Timing => "timing",
            HitType::Exception => "exception",
        }
    }

    pub fn spec(self) -> &'static HitTypeSpec {
        match self {
            HitType::Event => &EVENT,
            HitType::Pageview => &PAGEVIEW,
            HitType::Social => &SOCIAL,
            HitType::Timing => &TIMING,
            HitType::Exception => &EXCEPTION,
        }
    }
}

impl FromStr for HitType {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HitType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| DispatchError::UnsupportedHitType(s.to_string()))
    }
}

impl fmt::Display for HitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
