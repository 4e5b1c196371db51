//! Normalized clothing and metabolism scales.
//!
//! The interactive surface adjusts both as a (0,1) amount; the tables
//! here map amounts to physical figures and a nearby descriptor.

/// A resolved clothing or metabolism figure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedFigure {
    /// Normalized position on the scale, clamped to (0,1).
    pub amount: f64,
    /// Physical value (clo or met).
    pub value: f64,
    /// Descriptor of the nearest anchor.
    pub description: &'static str,
}

const CLOTHING_ANCHORS: &[(f64, &str)] = &[
    (0.0, "unclothed"),
    (0.3, "shorts"),
    (0.5, "light summer wear"),
    (1.0, "casual indoor"),
    (1.5, "business suit"),
    (2.0, "heavy layers"),
    (3.0, "arctic gear"),
];
const CLO_MAX: f64 = 3.0;

const METABOLISM_ANCHORS: &[(f64, &str)] = &[
    (0.7, "sleeping"),
    (0.8, "reclining"),
    (1.0, "seated, quiet"),
    (1.2, "sitting/standing"),
    (1.6, "light activity"),
    (2.0, "medium activity"),
    (3.0, "heavy activity"),
    (4.0, "athletic"),
];
const MET_MIN: f64 = 0.7;
const MET_MAX: f64 = 4.0;

fn nearest(anchors: &'static [(f64, &'static str)], value: f64) -> &'static str {
    anchors
        .iter()
        .min_by(|a, b| {
            (a.0 - value)
                .abs()
                .partial_cmp(&(b.0 - value).abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|&(_, desc)| desc)
        .unwrap_or("unknown")
}

/// Clothing figure for a normalized amount.
pub fn clothing(amount: f64) -> ResolvedFigure {
    let amount = amount.clamp(0.0, 1.0);
    let clo = amount * CLO_MAX;
    ResolvedFigure {
        amount,
        value: clo,
        description: nearest(CLOTHING_ANCHORS, clo),
    }
}

/// Normalized amount for a clo value.
pub fn clothing_amount(clo: f64) -> f64 {
    (clo / CLO_MAX).clamp(0.0, 1.0)
}

/// Metabolism figure for a normalized rate.
pub fn metabolism(rate: f64) -> ResolvedFigure {
    let rate = rate.clamp(0.0, 1.0);
    let met = MET_MIN + rate * (MET_MAX - MET_MIN);
    ResolvedFigure {
        amount: rate,
        value: met,
        description: nearest(METABOLISM_ANCHORS, met),
    }
}

/// Normalized rate for a met value.
pub fn metabolism_rate(met: f64) -> f64 {
    ((met - MET_MIN) / (MET_MAX - MET_MIN)).clamp(0.0, 1.0)
}
