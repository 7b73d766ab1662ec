use lucid_core::{AnomalyCode, StageIndex, Tier};
use lucid_system_progression::{Outcome, Verdict};
use serde::Serialize;

/// One generated room and how the observer judged it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub(crate) struct StageRecord {
    pub(crate) stage: StageIndex,
    pub(crate) requested_anomaly: bool,
    pub(crate) code: AnomalyCode,
    pub(crate) verdict: Verdict,
    pub(crate) signals: usize,
}

impl StageRecord {
    /// Single console line describing the room.
    pub(crate) fn line(&self) -> String {
        let anomaly = match self.code {
            AnomalyCode::NoAnomaly if self.requested_anomaly => "none (withheld)".to_owned(),
            AnomalyCode::NoAnomaly => "none".to_owned(),
            AnomalyCode::Hard { family, variant } => match variant {
                Some(variant) => format!("{family:?} armed with {variant:?}"),
                None => format!("{family:?}"),
            },
            code => format!("{code:?}"),
        };
        format!(
            "stage {:02} | {:<40} | {:?} | {} signals",
            self.stage.get(),
            anomaly,
            self.verdict,
            self.signals
        )
    }
}

/// How the run came to an end.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub(crate) enum Ending {
    /// The observer reached the final stage.
    Escaped {
        /// Final stage reached.
        stage: StageIndex,
    },
    /// A tier ran out of anomalies under the end-run policy.
    CatalogExhausted {
        /// Tier that ran out.
        tier: Tier,
        /// Number of entries the tier held.
        len: usize,
    },
}

impl Ending {
    pub(crate) fn from_outcome(outcome: Outcome) -> Option<Self> {
        match outcome {
            Outcome::Escaped { stage } => Some(Self::Escaped { stage }),
            Outcome::Advanced { .. } | Outcome::Reset { .. } => None,
        }
    }

    pub(crate) fn line(&self) -> String {
        match self {
            Self::Escaped { stage } => format!("escaped at stage {stage}"),
            Self::CatalogExhausted { tier, len } => {
                format!("run ended: all {len} {tier} anomalies have been shown")
            }
        }
    }
}

/// Complete transcript of a run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub(crate) struct RunSummary {
    pub(crate) seed: u64,
    pub(crate) rooms: Vec<StageRecord>,
    pub(crate) ending: Ending,
}
