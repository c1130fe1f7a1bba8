//! Charm category registry
//!
//! A fixed table of seven categories, each with a display label, a colour
//! theme and the trait names it recognises. The table is built once and
//! handed to the resolver by reference; nothing mutates it afterwards.

use crate::error::{AsterError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Category identifier
///
/// Variant order mirrors the standard registry declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryId {
    Empathy,
    Responsibility,
    Curiosity,
    Stability,
    Morality,
    Humor,
    Passion,
}

impl CategoryId {
    /// Every category id, in standard declaration order
    pub const ALL: [CategoryId; 7] = [
        Self::Empathy,
        Self::Responsibility,
        Self::Curiosity,
        Self::Stability,
        Self::Morality,
        Self::Humor,
        Self::Passion,
    ];

    /// Category used when no trait classifies
    pub const FALLBACK: CategoryId = Self::Passion;

    /// Convert to string representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Empathy => "empathy",
            Self::Responsibility => "responsibility",
            Self::Curiosity => "curiosity",
            Self::Stability => "stability",
            Self::Morality => "morality",
            Self::Humor => "humor",
            Self::Passion => "passion",
        }
    }

    /// Parse from string
    #[must_use]
    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.as_str() == s)
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// RGB triple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Comma-separated form used inside `rgba(...)` CSS expressions
    pub fn css_triplet(&self) -> String {
        format!("{}, {}, {}", self.0, self.1, self.2)
    }
}

/// Gradient utility classes consumed by the renderer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradientClasses {
    pub from: String,
    pub to: String,
    pub border: String,
    pub text: String,
}

/// Four-shade palette of a category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub primary: Rgb,
    pub secondary: Rgb,
    pub dark: Rgb,
    pub darker: Rgb,
}

/// Visual theme of a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub classes: GradientClasses,
    pub palette: Palette,
}

impl Theme {
    /// Build the Tailwind theme for a colour family (`pink`, `cyan`, ...)
    pub fn tailwind(family: &str, palette: Palette) -> Self {
        Self {
            classes: GradientClasses {
                from: format!("from-{family}-500"),
                to: format!("to-{family}-700"),
                border: format!("border-{family}-400"),
                text: format!("text-{family}-300"),
            },
            palette,
        }
    }

    /// Background class derived from the gradient start, e.g. `bg-pink-500`
    pub fn background_class(&self) -> String {
        self.classes.from.replacen("from-", "bg-", 1)
    }
}

/// A charm category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub display_name: String,
    pub theme: Theme,
    pub recognized_traits: Vec<String>,
}

impl Category {
    /// Whether `trait_name` matches any recognised trait
    ///
    /// Matching is bidirectional substring containment, case-sensitive.
    /// Short or overlapping names are ambiguous under this rule and that
    /// ambiguity is observable behaviour.
    pub fn recognizes(&self, trait_name: &str) -> bool {
        self.recognized_traits
            .iter()
            .any(|known| trait_name.contains(known.as_str()) || known.contains(trait_name))
    }
}

/// Immutable table of categories in declaration order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryRegistry {
    categories: Vec<Category>,
    /// Position of each `CategoryId` (by discriminant) in `categories`
    #[serde(skip)]
    slots: [usize; 7],
}

impl CategoryRegistry {
    /// Build a registry from a custom table
    ///
    /// Every `CategoryId` must appear exactly once and every category needs
    /// at least one non-empty recognised trait.
    pub fn new(categories: Vec<Category>) -> Result<Self> {
        for id in CategoryId::ALL {
            match categories.iter().filter(|c| c.id == id).count() {
                0 => {
                    return Err(AsterError::invalid_registry(format!(
                        "category '{id}' is missing"
                    )))
                }
                1 => {}
                n => {
                    return Err(AsterError::invalid_registry(format!(
                        "category '{id}' declared {n} times"
                    )))
                }
            }
        }

        for category in &categories {
            if category.recognized_traits.is_empty() {
                return Err(AsterError::invalid_registry(format!(
                    "category '{}' recognises no traits",
                    category.id
                )));
            }
            if category.recognized_traits.iter().any(String::is_empty) {
                return Err(AsterError::invalid_registry(format!(
                    "category '{}' contains an empty trait name",
                    category.id
                )));
            }
        }

        Ok(Self::from_validated(categories))
    }

    /// The standard seven-category table
    pub fn standard() -> Self {
        let categories = STANDARD_TABLE
            .iter()
            .map(|entry| Category {
                id: entry.id,
                display_name: entry.display_name.to_string(),
                theme: Theme::tailwind(entry.family, entry.palette),
                recognized_traits: entry.traits.iter().map(|t| (*t).to_string()).collect(),
            })
            .collect();

        Self::from_validated(categories)
    }

    fn from_validated(categories: Vec<Category>) -> Self {
        let mut slots = [0; 7];
        for (position, category) in categories.iter().enumerate() {
            slots[category.id as usize] = position;
        }

        Self { categories, slots }
    }

    /// Look up a category
    pub fn get(&self, id: CategoryId) -> &Category {
        &self.categories[self.slots[id as usize]]
    }

    /// The fallback category (`passion`)
    pub fn fallback(&self) -> &Category {
        self.get(CategoryId::FALLBACK)
    }

    /// Categories in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }

    /// Number of categories
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Always false for a constructed registry
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl Default for CategoryRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

struct TableEntry {
    id: CategoryId,
    display_name: &'static str,
    family: &'static str,
    palette: Palette,
    traits: &'static [&'static str],
}

const STANDARD_TABLE: [TableEntry; 7] = [
    TableEntry {
        id: CategoryId::Empathy,
        display_name: "이해심 및 공감 능력",
        family: "pink",
        palette: Palette {
            primary: Rgb(236, 72, 153),
            secondary: Rgb(190, 24, 93),
            dark: Rgb(131, 24, 67),
            darker: Rgb(80, 7, 36),
        },
        traits: &["다정함", "공감 능력", "이해심", "배려심", "경청 능력", "위로 능력", "섬세함"],
    },
    TableEntry {
        id: CategoryId::Responsibility,
        display_name: "성실성 및 책임감",
        family: "cyan",
        palette: Palette {
            primary: Rgb(6, 182, 212),
            secondary: Rgb(14, 116, 144),
            dark: Rgb(22, 78, 99),
            darker: Rgb(8, 51, 68),
        },
        traits: &["성실함", "책임감", "인내심", "계획성", "세심함", "신중함", "절제력"],
    },
    TableEntry {
        id: CategoryId::Curiosity,
        display_name: "지적 호기심 및 개방성",
        family: "yellow",
        palette: Palette {
            primary: Rgb(234, 179, 8),
            secondary: Rgb(161, 98, 7),
            dark: Rgb(113, 63, 18),
            darker: Rgb(66, 32, 6),
        },
        traits: &[
            "호기심",
            "창의성",
            "열린 마음",
            "모험심",
            "비판적 사고력",
            "통찰력",
            "넓은 시야",
            "집중력",
        ],
    },
    TableEntry {
        id: CategoryId::Stability,
        display_name: "정서적 안정 및 자기 인식",
        family: "green",
        palette: Palette {
            primary: Rgb(34, 197, 94),
            secondary: Rgb(21, 128, 61),
            dark: Rgb(20, 83, 45),
            darker: Rgb(5, 46, 22),
        },
        traits: &[
            "침착함",
            "안정감",
            "자기 성찰",
            "긍정적",
            "현실 감각",
            "자기 객관화",
            "자존감",
            "겸손",
        ],
    },
    TableEntry {
        id: CategoryId::Morality,
        display_name: "도덕성 및 양심",
        family: "blue",
        palette: Palette {
            primary: Rgb(59, 130, 246),
            secondary: Rgb(29, 78, 216),
            dark: Rgb(30, 58, 138),
            darker: Rgb(23, 37, 84),
        },
        traits: &["정직함", "양심", "일관성", "원칙 준수", "진정성", "약자보호"],
    },
    TableEntry {
        id: CategoryId::Humor,
        display_name: "유머감각및 사교성",
        family: "orange",
        palette: Palette {
            primary: Rgb(249, 115, 22),
            secondary: Rgb(194, 65, 12),
            dark: Rgb(124, 45, 18),
            darker: Rgb(67, 20, 7),
        },
        traits: &[
            "유머 감각",
            "분위기 메이커",
            "다양한 친분",
            "타인을 편하게 해주는 능력",
            "연락 등 관계를 이어가는 능력",
            "사교적 에너지",
        ],
    },
    TableEntry {
        id: CategoryId::Passion,
        display_name: "목표 지향성 및 야망",
        family: "red",
        palette: Palette {
            primary: Rgb(239, 68, 68),
            secondary: Rgb(185, 28, 28),
            dark: Rgb(127, 29, 29),
            darker: Rgb(69, 10, 10),
        },
        traits: &["목표 의식", "열정", "자기 계발 의지", "리더십", "야망", "경쟁심", "전략적 사고"],
    },
];
