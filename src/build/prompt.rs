//! Prompt construction for build generation
//!
//! The prompt embeds the use case, the budget with its acceptable bands,
//! tier-specific component price guidance, and use-case optimization hints,
//! followed by the exact output schema the model must produce.

use crate::build::models::BuildRequest;

/// Inclusive budget band in INR
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetBand {
    pub low: f64,
    pub high: f64,
}

impl BudgetBand {
    pub fn contains(&self, amount: f64) -> bool {
        amount >= self.low && amount <= self.high
    }
}

/// Preferred band: budget +/-15%
pub fn preferred_band(budget: u64) -> BudgetBand {
    let budget = budget as f64;
    BudgetBand {
        low: budget * 0.85,
        high: budget * 1.15,
    }
}

/// Wide tolerance band: budget +/-30%
pub fn wide_band(budget: u64) -> BudgetBand {
    let budget = budget as f64;
    BudgetBand {
        low: budget * 0.70,
        high: budget * 1.30,
    }
}

/// Price tier derived from the requested budget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Entry,
    Mid,
    HighEnd,
}

impl Tier {
    /// Entry below INR 60k, mid up to INR 120k, high-end above
    pub fn for_budget(budget: u64) -> Self {
        if budget < 60_000 {
            Self::Entry
        } else if budget <= 120_000 {
            Self::Mid
        } else {
            Self::HighEnd
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Entry => "entry",
            Self::Mid => "mid",
            Self::HighEnd => "high-end",
        }
    }

    /// Component price guidance embedded into the prompt
    pub fn guidance(&self) -> &'static str {
        match self {
            Self::Entry => {
                "Price guidance (entry tier): CPU INR 7,000-15,000; motherboard INR 5,000-10,000; \
                 16GB RAM INR 3,000-5,000; GPU INR 12,000-22,000 or integrated graphics; \
                 500GB NVMe SSD INR 2,500-4,000; PSU INR 2,500-4,500; case INR 2,000-4,000; \
                 stock or budget tower cooler."
            }
            Self::Mid => {
                "Price guidance (mid tier): CPU INR 15,000-30,000; motherboard INR 10,000-18,000; \
                 16-32GB RAM INR 5,000-10,000; GPU INR 25,000-55,000; \
                 1TB NVMe SSD INR 5,000-8,000; PSU INR 5,000-8,000; case INR 4,000-8,000; \
                 tower air cooler INR 2,000-5,000."
            }
            Self::HighEnd => {
                "Price guidance (high-end tier): CPU INR 30,000-60,000; motherboard INR 18,000-35,000; \
                 32-64GB RAM INR 10,000-25,000; GPU INR 60,000-180,000; \
                 2TB NVMe SSD INR 10,000-18,000; PSU INR 8,000-15,000; case INR 8,000-15,000; \
                 240-360mm liquid cooler INR 8,000-15,000."
            }
        }
    }
}

/// Use-case specific optimization hints
///
/// Unknown categories fall through to a balanced default; the request is
/// deliberately not rejected for an unrecognized label.
pub fn optimization_hints(category: &str) -> &'static str {
    match category.trim().to_lowercase().as_str() {
        "gaming" => {
            "- Allocate roughly 35-40% of the budget to the GPU.\n\
             - Pick a CPU that will not bottleneck the GPU at 1440p.\n\
             - Prefer 16GB+ dual-channel RAM at 3200MHz or faster.\n\
             - Favor airflow-oriented cases for sustained GPU boost clocks."
        }
        "content creation" => {
            "- Prioritize CPU core count and multi-threaded performance.\n\
             - Target 32GB RAM as the working minimum.\n\
             - Include fast NVMe storage for scratch and asset libraries.\n\
             - A capable GPU helps viewport and export acceleration."
        }
        "ai/ml development" | "ai/ml" => {
            "- Maximize GPU VRAM; it is the binding constraint for model work.\n\
             - Prefer CUDA-capable GPUs with 12GB+ VRAM where the budget allows.\n\
             - Target 32-64GB system RAM for data preprocessing.\n\
             - Fast NVMe storage shortens dataset load times."
        }
        "video editing" => {
            "- Balance CPU and GPU; editors lean on both for timeline and export.\n\
             - Target 32GB+ RAM for 4K timelines.\n\
             - Use a dedicated fast NVMe drive for media cache.\n\
             - Hardware encode support (NVENC/Quick Sync) matters for delivery."
        }
        "office/productivity" | "office" => {
            "- Integrated graphics are sufficient; skip a discrete GPU.\n\
             - Prioritize a reliable PSU and a quiet, compact case.\n\
             - 16GB RAM covers office multitasking comfortably.\n\
             - Spend the savings on a faster SSD and better peripherals."
        }
        "budget gaming" => {
            "- Stretch the GPU budget with last-generation value cards.\n\
             - A 6-core CPU with stock cooler keeps cost down without hurting 1080p.\n\
             - 16GB RAM, single stick only if a second slot stays free for upgrade.\n\
             - Cut the case budget before cutting the PSU budget."
        }
        _ => {
            "- Balance spend evenly across the core components.\n\
             - Prefer widely available parts with good warranty support in India."
        }
    }
}

const SCHEMA_INSTRUCTIONS: &str = "\
Respond with a single JSON object and nothing else, using exactly these keys:\n\
- \"parts\": array of exactly 8 objects, one for each of CPU, Motherboard, RAM, GPU, SSD, PSU, Case, Cooler. \
Each object has \"category\" (one of those labels), \"name\" (exact retail product name), \
\"asin\" (Amazon ASIN if known, otherwise \"STOCK\" for a bundled cooler or \"INTEGRATED\" for integrated graphics), \
\"price\" (number, INR), and \"specs\" (object of key specifications).\n\
- \"laptops\": 3 to 4 prebuilt laptop alternatives (never fewer than 1), each with \"name\", \"processor\", \"ram\", \"storage\", \"gpu\", \"price\".\n\
- \"monitors\": 2 to 4 monitor recommendations, each with \"name\", \"resolution\", \"size\", \"refreshRate\", \"panelType\", \"price\".\n\
- \"headsets\": 2 to 4 headset recommendations, each with \"name\", \"type\", \"connectivity\", \"features\" (array of strings), \"price\".\n\
- \"miniPcs\": 2 to 4 mini PC alternatives, each with \"name\", \"processor\", \"ram\", \"storage\", \"price\".\n\
- \"totalCost\": sum of the 8 part prices in INR.\n\
- \"compatibility\": integer 0-100 scoring how well the parts work together.\n\
- \"compatibilityNotes\": short explanation of the compatibility assessment.\n\
All prices are plain numbers in INR without separators or currency symbols.";

/// Build the full generation prompt for a request
pub fn build_prompt(request: &BuildRequest) -> String {
    let tier = Tier::for_budget(request.budget);
    let preferred = preferred_band(request.budget);
    let wide = wide_band(request.budget);

    format!(
        "You are an expert PC build consultant for the Indian market. \
         Recommend a complete PC build for the \"{}\" use case with a budget of INR {}.\n\n\
         Budget discipline:\n\
         - Aim for a total between INR {:.0} and INR {:.0} (budget +/-15%).\n\
         - Never land below INR {:.0} or above INR {:.0} (budget +/-30%).\n\n\
         {}\n\n\
         Use-case priorities:\n{}\n\n{}",
        request.category,
        request.budget,
        preferred.low,
        preferred.high,
        wide.low,
        wide.high,
        tier.guidance(),
        optimization_hints(&request.category),
        SCHEMA_INSTRUCTIONS,
    )
}
