use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter, IntoStaticStr,
)]
pub enum RiceVariety {
    Arborio,
    Basmati,
    Jasmine,
    Ipsala,
    Karacadag,
}

/// Gradient endpoints used when rendering a variety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorScheme {
    pub accent_from: &'static str,
    pub accent_to: &'static str,
    pub background_from: &'static str,
    pub background_to: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiceVarietyInfo {
    pub variety: RiceVariety,
    pub description: &'static str,
    pub colors: ColorScheme,
}

const ARBORIO: RiceVarietyInfo = RiceVarietyInfo {
    variety: RiceVariety::Arborio,
    description: "Short-grain rice from Italy, perfect for risotto with its creamy texture.",
    colors: ColorScheme {
        accent_from: "#3b82f6",
        accent_to: "#4f46e5",
        background_from: "#eff6ff",
        background_to: "#eef2ff",
    },
};

const BASMATI: RiceVarietyInfo = RiceVarietyInfo {
    variety: RiceVariety::Basmati,
    description: "Long-grain aromatic rice from India and Pakistan, ideal for biryanis.",
    colors: ColorScheme {
        accent_from: "#22c55e",
        accent_to: "#059669",
        background_from: "#f0fdf4",
        background_to: "#ecfdf5",
    },
};

const JASMINE: RiceVarietyInfo = RiceVarietyInfo {
    variety: RiceVariety::Jasmine,
    description: "Fragrant long-grain rice from Thailand with a subtle floral aroma.",
    colors: ColorScheme {
        accent_from: "#a855f7",
        accent_to: "#7c3aed",
        background_from: "#faf5ff",
        background_to: "#f5f3ff",
    },
};

const IPSALA: RiceVarietyInfo = RiceVarietyInfo {
    variety: RiceVariety::Ipsala,
    description: "Turkish aromatic rice with excellent cooking properties.",
    colors: ColorScheme {
        accent_from: "#f97316",
        accent_to: "#dc2626",
        background_from: "#fff7ed",
        background_to: "#fef2f2",
    },
};

const KARACADAG: RiceVarietyInfo = RiceVarietyInfo {
    variety: RiceVariety::Karacadag,
    description: "Ancient Turkish rice variety known for its nutty flavor.",
    colors: ColorScheme {
        accent_from: "#f59e0b",
        accent_to: "#ca8a04",
        background_from: "#fffbeb",
        background_to: "#fefce8",
    },
};

impl RiceVariety {
    /// Entry shown when a label is not one of the known varieties.
    pub const FALLBACK: RiceVariety = RiceVariety::Basmati;

    pub fn from_label(label: &str) -> Option<Self> {
        label.parse().ok()
    }

    pub fn name(self) -> &'static str {
        self.into()
    }

    pub fn info(self) -> &'static RiceVarietyInfo {
        match self {
            RiceVariety::Arborio => &ARBORIO,
            RiceVariety::Basmati => &BASMATI,
            RiceVariety::Jasmine => &JASMINE,
            RiceVariety::Ipsala => &IPSALA,
            RiceVariety::Karacadag => &KARACADAG,
        }
    }

    pub fn all() -> Vec<RiceVariety> {
        RiceVariety::iter().collect()
    }
}

/// Metadata for any label; unknown labels get the fallback entry.
pub fn info_for(label: &str) -> &'static RiceVarietyInfo {
    RiceVariety::from_label(label)
        .unwrap_or(RiceVariety::FALLBACK)
        .info()
}
