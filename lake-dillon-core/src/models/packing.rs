use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PackingCategory {
    Clothing,
    Toiletries,
    #[serde(rename = "Baby Gear")]
    BabyGear,
    Entertainment,
    Food,
    Documents,
    Other,
}

impl PackingCategory {
    pub const ALL: [PackingCategory; 7] = [
        PackingCategory::Clothing,
        PackingCategory::Toiletries,
        PackingCategory::BabyGear,
        PackingCategory::Entertainment,
        PackingCategory::Food,
        PackingCategory::Documents,
        PackingCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PackingCategory::Clothing => "Clothing",
            PackingCategory::Toiletries => "Toiletries",
            PackingCategory::BabyGear => "Baby Gear",
            PackingCategory::Entertainment => "Entertainment",
            PackingCategory::Food => "Food",
            PackingCategory::Documents => "Documents",
            PackingCategory::Other => "Other",
        }
    }
}

impl fmt::Display for PackingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PackingCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        PackingCategory::ALL
            .into_iter()
            .find(|c| c.as_str().replace(' ', "").to_lowercase() == wanted)
            .ok_or_else(|| {
                format!(
                    "Invalid category '{}'. Valid options: clothing, toiletries, baby-gear, \
                     entertainment, food, documents, other",
                    s
                )
            })
    }
}

/// One thing a family member needs to bring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackingItem {
    pub id: String,
    pub name: String,
    pub category: PackingCategory,
    #[serde(default)]
    pub packed: bool,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_member_id: Option<String>,
}

impl fmt::Display for PackingItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.packed { "x" } else { " " };
        write!(f, "[{}] {} ({}) [{}]", mark, self.name, self.category, self.id)
    }
}
