//! Build validation
//!
//! One mandatory check (component completeness) aborts the pipeline; every
//! other check is advisory and produces a [`BuildWarning`] that is attached
//! to the result and logged, never blocking it.

use crate::build::models::{
    AccessoryKind, BuildRequest, BuildWarning, DraftBuild, DriftBand, Part, PartCategory,
};

/// Ideal minimum laptop recommendations
pub const IDEAL_MIN_LAPTOPS: usize = 3;
/// Ideal minimum for monitors, headsets and mini PCs
pub const IDEAL_MIN_OTHER: usize = 2;
/// Compatibility scores below this are flagged
pub const COMPATIBILITY_WARN_THRESHOLD: u8 = 90;

/// Plausible price window (INR) per accessory kind
pub fn price_window(kind: AccessoryKind) -> (f64, f64) {
    match kind {
        AccessoryKind::Laptop => (25_000.0, 300_000.0),
        AccessoryKind::Monitor => (5_000.0, 100_000.0),
        AccessoryKind::Headset => (1_000.0, 30_000.0),
        AccessoryKind::MiniPc => (15_000.0, 300_000.0),
    }
}

/// Mandatory check: every required category must be covered
///
/// Returns the missing categories in presentation order; an empty result
/// means the build is structurally complete.
pub fn check_completeness(parts: &[Part]) -> Vec<PartCategory> {
    PartCategory::ALL
        .into_iter()
        .filter(|category| !parts.iter().any(|part| part.category == *category))
        .collect()
}

/// Classify the recomputed total against the budget bands
pub fn classify_budget_drift(budget: u64, total_cost: f64) -> Option<DriftBand> {
    let budget = budget as f64;
    if total_cost < budget * 0.70 || total_cost > budget * 1.30 {
        Some(DriftBand::OutsideWide)
    } else if total_cost < budget * 0.85 || total_cost > budget * 1.15 {
        Some(DriftBand::OutsidePreferred)
    } else {
        None
    }
}

fn check_accessory_counts(draft: &DraftBuild) -> Vec<BuildWarning> {
    let counts = [
        (AccessoryKind::Laptop, draft.laptops.len(), IDEAL_MIN_LAPTOPS),
        (AccessoryKind::Monitor, draft.monitors.len(), IDEAL_MIN_OTHER),
        (AccessoryKind::Headset, draft.headsets.len(), IDEAL_MIN_OTHER),
        (AccessoryKind::MiniPc, draft.mini_pcs.len(), IDEAL_MIN_OTHER),
    ];

    counts
        .into_iter()
        .filter(|(_, count, ideal_min)| count < ideal_min)
        .map(|(accessory, count, ideal_min)| BuildWarning::AccessoryShortfall {
            accessory,
            count,
            ideal_min,
        })
        .collect()
}

fn check_compatibility(score: u8) -> Option<BuildWarning> {
    (score < COMPATIBILITY_WARN_THRESHOLD).then_some(BuildWarning::LowCompatibility { score })
}

fn check_accessory_prices(draft: &DraftBuild) -> Vec<BuildWarning> {
    let mut warnings = Vec::new();

    let mut flag = |kind: AccessoryKind, name: &str, price: f64| {
        let (low, high) = price_window(kind);
        if price < low || price > high {
            warnings.push(BuildWarning::ImplausiblePrice {
                accessory: kind,
                name: name.to_string(),
                price,
            });
        }
    };

    for laptop in &draft.laptops {
        flag(AccessoryKind::Laptop, &laptop.name, laptop.price);
    }
    for monitor in &draft.monitors {
        flag(AccessoryKind::Monitor, &monitor.name, monitor.price);
    }
    for headset in &draft.headsets {
        flag(AccessoryKind::Headset, &headset.name, headset.price);
    }
    for mini_pc in &draft.mini_pcs {
        flag(AccessoryKind::MiniPc, &mini_pc.name, mini_pc.price);
    }

    warnings
}

/// Run all advisory checks against a structurally complete draft
///
/// `total_cost` is the recomputed part-price sum, not the model's figure.
pub fn advisory_warnings(
    request: &BuildRequest,
    draft: &DraftBuild,
    total_cost: f64,
) -> Vec<BuildWarning> {
    let mut warnings = check_accessory_counts(draft);

    if let Some(band) = classify_budget_drift(request.budget, total_cost) {
        warnings.push(BuildWarning::BudgetDrift {
            band,
            total_cost,
            budget: request.budget,
        });
    }

    if let Some(warning) = check_compatibility(draft.compatibility) {
        warnings.push(warning);
    }

    warnings.extend(check_accessory_prices(draft));
    warnings
}
