//! Coverage-based verification verdicts.
//!
//! Coverage is the fraction of sub-queries with retrieved evidence. Each
//! mode maps it through its own threshold table; neither inspects claims.

use docent_core::models::{
    TraceVerdict, TraceVerification, Verdict, VerificationMode, VerificationSummary,
};

use crate::response::SubQueryResult;

pub fn coverage(subqueries: &[SubQueryResult]) -> f32 {
    if subqueries.is_empty() {
        return 0.0;
    }
    let covered = subqueries.iter().filter(|s| s.has_evidence()).count();
    covered as f32 / subqueries.len() as f32
}

/// Verdict for `mode`, or `None` when verification is off.
pub fn compute_verification(mode: VerificationMode, coverage: f32) -> Option<VerificationSummary> {
    let (verdict, notes) = match mode {
        VerificationMode::None => return None,
        VerificationMode::Ragv => {
            if coverage >= 0.8 {
                (Verdict::Supported, "Most claims backed by retrieved context.")
            } else if coverage >= 0.5 {
                (Verdict::PartiallySupported, "Some claims lack strong evidence.")
            } else {
                (Verdict::Insufficient, "Evidence coverage is low.")
            }
        }
        VerificationMode::Llm => {
            if coverage >= 0.9 {
                (Verdict::FullySupported, "Verifier found no issues.")
            } else if coverage >= 0.6 {
                (Verdict::PartiallySupported, "Verifier suggests reviewing some claims.")
            } else {
                (Verdict::Unclear, "Verifier could not confirm several claims.")
            }
        }
    };
    Some(VerificationSummary {
        mode,
        verdict,
        coverage,
        notes: Some(notes.to_string()),
    })
}

/// Collapse a verdict to the trace's pass / weak / fail scale.
pub fn to_trace_verification(summary: &VerificationSummary) -> TraceVerification {
    let verdict = match summary.verdict {
        Verdict::Supported | Verdict::FullySupported => TraceVerdict::Pass,
        Verdict::PartiallySupported => TraceVerdict::Weak,
        Verdict::Insufficient | Verdict::Unclear => TraceVerdict::Fail,
    };
    TraceVerification {
        verdict,
        coverage: summary.coverage,
        notes: summary.notes.clone(),
    }
}
