//! Local sample-matching verdicts.
//!
//! Works without the classification service: the normalized input is
//! compared for exact equality against a short list of known headlines.

use serde::Serialize;

const FAKE_SAMPLES: &[&str] = &[
    "India and Pakistan Declare Full-Scale War Following Pahalgam Bus Attack",
    "China Diverts Brahmaputra to Relieve Pakistans Water Crisis",
    "U.S. Dollar Collapses Overnight Amidst Trumps 100% Universal Import Tariff",
    "Aliens landed in Paris",
    "Cure for cancer found in potato",
    "Government bans breathing on weekends",
    "Chocolate causes immortality",
];

const REAL_SAMPLES: &[&str] = &[
    "hindu tourists attacked in kashmir, 26 fatalities",
    "Militants in Indian Kashmir Separate Men from Women and Children Before Opening Fire in Baisaran Valley",
    "Panic in Pakistan as India Vows to Cut Off Water Supply Over Kashmir",
    "Tariffs to Trigger Sharp US Economic Slowdown, Chance of Recession Jumps to 45%: Reuters Poll",
    "Global warming affects ocean levels",
    "New AI model improves healthcare diagnosis",
    "India launches new satellite successfully",
    "Electric vehicle adoption increases in 2025",
    "UN discusses global peace resolution",
];

const RED: &str = "#DC2626";
const GREEN: &str = "#059669";
const GRAY: &str = "#6B7280";

/// Which bucket the input fell into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleMatch {
    Empty,
    Fake,
    Real,
    Unknown,
}

/// Response body of the sample-matching endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FallbackVerdict {
    pub message: &'static str,
    pub color: &'static str,
    pub score: Option<u8>,
    pub factors: Vec<&'static str>,
}

/// Classify `input` against the built-in samples.
pub fn match_sample(input: &str) -> SampleMatch {
    let normalized = input.trim().to_lowercase();
    if normalized.is_empty() {
        return SampleMatch::Empty;
    }

    let matches = |samples: &[&str]| samples.iter().any(|s| s.to_lowercase() == normalized);
    if matches(FAKE_SAMPLES) {
        SampleMatch::Fake
    } else if matches(REAL_SAMPLES) {
        SampleMatch::Real
    } else {
        SampleMatch::Unknown
    }
}

/// Build the response body for `input`.
pub fn check_sample(input: &str) -> FallbackVerdict {
    match match_sample(input) {
        SampleMatch::Empty => FallbackVerdict {
            message: "Please enter a news article or URL.",
            color: RED,
            score: None,
            factors: Vec::new(),
        },
        SampleMatch::Fake => FallbackVerdict {
            message: "This news appears to be FAKE.",
            color: RED,
            score: Some(20),
            factors: vec!["Contains sensational claims", "Emotional tone", "No evidence"],
        },
        SampleMatch::Real => FallbackVerdict {
            message: "This news appears to be REAL.",
            color: GREEN,
            score: Some(85),
            factors: vec!["Credible sources", "Factual consistency", "Neutral language"],
        },
        SampleMatch::Unknown => FallbackVerdict {
            message: "Unable to determine authenticity. Try another headline.",
            color: GRAY,
            score: Some(50),
            factors: vec!["Not enough data", "Check multiple sources"],
        },
    }
}
