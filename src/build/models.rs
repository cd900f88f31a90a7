//! Data models for build generation

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Required component categories for a complete build
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PartCategory {
    #[serde(rename = "CPU")]
    Cpu,
    #[serde(rename = "Motherboard")]
    Motherboard,
    #[serde(rename = "RAM")]
    Ram,
    #[serde(rename = "GPU")]
    Gpu,
    #[serde(rename = "SSD")]
    Ssd,
    #[serde(rename = "PSU")]
    Psu,
    #[serde(rename = "Case")]
    Case,
    #[serde(rename = "Cooler")]
    Cooler,
}

impl PartCategory {
    /// All categories a valid build must cover, in presentation order
    pub const ALL: [PartCategory; 8] = [
        PartCategory::Cpu,
        PartCategory::Motherboard,
        PartCategory::Ram,
        PartCategory::Gpu,
        PartCategory::Ssd,
        PartCategory::Psu,
        PartCategory::Case,
        PartCategory::Cooler,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cpu => "CPU",
            Self::Motherboard => "Motherboard",
            Self::Ram => "RAM",
            Self::Gpu => "GPU",
            Self::Ssd => "SSD",
            Self::Psu => "PSU",
            Self::Case => "Case",
            Self::Cooler => "Cooler",
        }
    }
}

impl fmt::Display for PartCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build generation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildRequest {
    /// Use-case label, e.g. "Gaming" or "Video Editing"
    pub category: String,
    /// Total budget in INR
    pub budget: u64,
}

/// A single recommended component
///
/// `asin` carries the marketplace identifier, or the sentinels "STOCK"
/// (bundled cooler) / "INTEGRATED" (integrated graphics).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    pub category: PartCategory,
    pub name: String,
    pub asin: String,
    pub price: f64,
    #[serde(default)]
    pub specs: HashMap<String, serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Accessory recommendation kinds, used for counts and price windows
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AccessoryKind {
    Laptop,
    Monitor,
    Headset,
    MiniPc,
}

impl AccessoryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Laptop => "laptop",
            Self::Monitor => "monitor",
            Self::Headset => "headset",
            Self::MiniPc => "mini_pc",
        }
    }

    /// Human label used in log lines
    pub fn label(&self) -> &'static str {
        match self {
            Self::Laptop => "laptop",
            Self::Monitor => "monitor",
            Self::Headset => "headset",
            Self::MiniPc => "mini PC",
        }
    }
}

/// Recommended laptop alternative
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Laptop {
    pub name: String,
    pub processor: String,
    pub ram: String,
    pub storage: String,
    pub gpu: String,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Recommended monitor
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Monitor {
    pub name: String,
    pub resolution: String,
    pub size: String,
    pub refresh_rate: String,
    pub panel_type: String,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Recommended headset
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Headset {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub connectivity: String,
    #[serde(default)]
    pub features: Vec<String>,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Recommended mini PC alternative
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MiniPc {
    pub name: String,
    pub processor: String,
    pub ram: String,
    pub storage: String,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Raw model output, prior to validation and post-processing
///
/// `total_cost` is the model's self-reported figure and is never trusted;
/// the service recomputes the total from the part prices.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftBuild {
    pub parts: Vec<Part>,
    #[serde(default)]
    pub laptops: Vec<Laptop>,
    #[serde(default)]
    pub monitors: Vec<Monitor>,
    #[serde(default)]
    pub headsets: Vec<Headset>,
    #[serde(default)]
    pub mini_pcs: Vec<MiniPc>,
    #[serde(default)]
    pub total_cost: f64,
    #[serde(default)]
    pub compatibility: u8,
    #[serde(default)]
    pub compatibility_notes: String,
}

/// Budget drift bands for advisory warnings
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DriftBand {
    /// Outside the +/-15% preferred band but within +/-30%
    OutsidePreferred,
    /// Outside the +/-30% wide band
    OutsideWide,
}

/// Advisory validation finding; never blocks returning a build
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BuildWarning {
    AccessoryShortfall {
        accessory: AccessoryKind,
        count: usize,
        ideal_min: usize,
    },
    BudgetDrift {
        band: DriftBand,
        total_cost: f64,
        budget: u64,
    },
    LowCompatibility {
        score: u8,
    },
    ImplausiblePrice {
        accessory: AccessoryKind,
        name: String,
        price: f64,
    },
}

impl BuildWarning {
    /// Stable label used for metrics
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AccessoryShortfall { .. } => "accessory_shortfall",
            Self::BudgetDrift { .. } => "budget_drift",
            Self::LowCompatibility { .. } => "low_compatibility",
            Self::ImplausiblePrice { .. } => "implausible_price",
        }
    }
}

impl fmt::Display for BuildWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AccessoryShortfall {
                accessory,
                count,
                ideal_min,
            } => write!(
                f,
                "only {} {} recommendation(s), ideal is at least {}",
                count,
                accessory.label(),
                ideal_min
            ),
            Self::BudgetDrift {
                band: DriftBand::OutsidePreferred,
                total_cost,
                budget,
            } => write!(
                f,
                "total cost {} is more than 15% away from budget {}",
                total_cost, budget
            ),
            Self::BudgetDrift {
                band: DriftBand::OutsideWide,
                total_cost,
                budget,
            } => write!(
                f,
                "total cost {} is more than 30% away from budget {}",
                total_cost, budget
            ),
            Self::LowCompatibility { score } => {
                write!(f, "compatibility score {} is below 90", score)
            }
            Self::ImplausiblePrice {
                accessory,
                name,
                price,
            } => write!(
                f,
                "{} \"{}\" priced at {} is outside the plausible range",
                accessory.label(),
                name,
                price
            ),
        }
    }
}

/// Fully assembled build returned to the caller
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildResult {
    pub category: String,
    pub budget: u64,
    pub parts: Vec<Part>,
    pub laptops: Vec<Laptop>,
    pub monitors: Vec<Monitor>,
    pub headsets: Vec<Headset>,
    pub mini_pcs: Vec<MiniPc>,
    pub total_cost: f64,
    pub compatibility: u8,
    pub compatibility_notes: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<BuildWarning>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_part_category_labels() {
        assert_eq!(PartCategory::Cpu.as_str(), "CPU");
        assert_eq!(PartCategory::Cooler.as_str(), "Cooler");
        assert_eq!(PartCategory::ALL.len(), 8);
    }

    #[test]
    fn test_part_category_serde_roundtrip() {
        for category in PartCategory::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.as_str()));
            let back: PartCategory = serde_json::from_str(&json).unwrap();
            assert_eq!(back, category);
        }
    }

    #[test]
    fn test_draft_build_deserializes_with_defaults() {
        let json = r#"{
            "parts": [{
                "category": "GPU",
                "name": "RTX 4060",
                "asin": "B0C6WXYZ12",
                "price": 31500,
                "specs": {"vram": "8GB"}
            }]
        }"#;

        let draft: DraftBuild = serde_json::from_str(json).unwrap();
        assert_eq!(draft.parts.len(), 1);
        assert_eq!(draft.parts[0].category, PartCategory::Gpu);
        assert!(draft.parts[0].url.is_none());
        assert!(draft.laptops.is_empty());
        assert_eq!(draft.total_cost, 0.0);
        assert_eq!(draft.compatibility, 0);
    }

    #[test]
    fn test_draft_build_camel_case_keys() {
        let json = r#"{
            "parts": [],
            "miniPcs": [{
                "name": "Beelink SER5",
                "processor": "Ryzen 5 5560U",
                "ram": "16GB",
                "storage": "500GB",
                "price": 32000
            }],
            "totalCost": 32000,
            "compatibilityNotes": "n/a"
        }"#;

        let draft: DraftBuild = serde_json::from_str(json).unwrap();
        assert_eq!(draft.mini_pcs.len(), 1);
        assert_eq!(draft.total_cost, 32000.0);
        assert_eq!(draft.compatibility_notes, "n/a");
    }

    #[test]
    fn test_headset_type_field_rename() {
        let json = r#"{
            "name": "HyperX Cloud II",
            "type": "Over-ear",
            "connectivity": "Wired",
            "features": ["7.1 surround"],
            "price": 6500
        }"#;

        let headset: Headset = serde_json::from_str(json).unwrap();
        assert_eq!(headset.kind, "Over-ear");

        let back = serde_json::to_value(&headset).unwrap();
        assert_eq!(back["type"], "Over-ear");
    }

    #[test]
    fn test_build_result_skips_empty_warnings() {
        let result = BuildResult {
            category: "Gaming".to_string(),
            budget: 100_000,
            parts: vec![],
            laptops: vec![],
            monitors: vec![],
            headsets: vec![],
            mini_pcs: vec![],
            total_cost: 0.0,
            compatibility: 95,
            compatibility_notes: String::new(),
            warnings: vec![],
        };

        let value = serde_json::to_value(&result).unwrap();
        assert!(value.get("warnings").is_none());
        assert!(value.get("totalCost").is_some());
        assert!(value.get("miniPcs").is_some());
        assert!(value.get("compatibilityNotes").is_some());
    }

    #[test]
    fn test_warning_display() {
        let warning = BuildWarning::AccessoryShortfall {
            accessory: AccessoryKind::Laptop,
            count: 1,
            ideal_min: 3,
        };
        assert_eq!(
            warning.to_string(),
            "only 1 laptop recommendation(s), ideal is at least 3"
        );
        assert_eq!(warning.kind(), "accessory_shortfall");
    }
}
