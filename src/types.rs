use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ── Price Paths ──

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub time: DateTime<Utc>,
    pub price: f64,
}

impl PricePoint {
    pub fn new(time: DateTime<Utc>, price: f64) -> Self {
        Self { time, price }
    }
}

/// Time-ascending sequence of price points at a fixed sampling increment.
/// Serialized as a bare JSON array of `{time, price}` objects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PricePath {
    pub points: Vec<PricePoint>,
}

impl PricePath {
    pub fn new(points: Vec<PricePoint>) -> Self {
        Self { points }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        self.points.first().map(|p| p.time)
    }

    pub fn prices(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.price).collect()
    }
}

impl From<Vec<PricePoint>> for PricePath {
    fn from(points: Vec<PricePoint>) -> Self {
        Self { points }
    }
}

// ── Scoring Output ──

/// Position of a detail row inside its interval block: a 1-based increment,
/// or the interval's closing subtotal row.
///
/// Serializes as a JSON integer for steps and as the string `"Total"` for
/// the subtotal, which is the shape downstream consumers read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Increment {
    Step(usize),
    Total,
}

impl Increment {
    pub const TOTAL_SENTINEL: &'static str = "Total";

    #[inline]
    pub fn is_total(&self) -> bool {
        matches!(self, Self::Total)
    }
}

impl std::fmt::Display for Increment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Step(n) => write!(f, "{n}"),
            Self::Total => f.write_str(Self::TOTAL_SENTINEL),
        }
    }
}

impl Serialize for Increment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Step(n) => serializer.serialize_u64(*n as u64),
            Self::Total => serializer.serialize_str(Self::TOTAL_SENTINEL),
        }
    }
}

impl<'de> Deserialize<'de> for Increment {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Step(usize),
            Label(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Step(0) => Err(serde::de::Error::custom("increment must be positive")),
            Raw::Step(n) => Ok(Self::Step(n)),
            Raw::Label(s) if s == Self::TOTAL_SENTINEL => Ok(Self::Total),
            Raw::Label(s) => Err(serde::de::Error::custom(format!(
                "unknown increment label: {s}"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailedScoreEntry {
    #[serde(rename = "Interval")]
    pub interval: String,
    #[serde(rename = "Increment")]
    pub increment: Increment,
    #[serde(rename = "CRPS")]
    pub crps: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub total_score: f64,
    pub detailed_scores: Vec<DetailedScoreEntry>,
}

impl ScoreResult {
    /// Subtotal rows only, in interval declaration order.
    pub fn interval_totals(&self) -> impl Iterator<Item = &DetailedScoreEntry> {
        self.detailed_scores.iter().filter(|e| e.increment.is_total())
    }

    /// Per-increment rows only.
    pub fn increments(&self) -> impl Iterator<Item = &DetailedScoreEntry> {
        self.detailed_scores.iter().filter(|e| !e.increment.is_total())
    }
}
