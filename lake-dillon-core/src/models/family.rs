use serde::{Deserialize, Serialize};
use std::fmt;

/// A traveller. The catalog is static and never mutated at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyMember {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_pregnant: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_toddler: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_needs: Option<Vec<String>>,
}

impl FamilyMember {
    fn new(id: &str, name: &str, age: f32) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            age: Some(age),
            is_pregnant: None,
            is_toddler: None,
            special_needs: None,
        }
    }

    fn with_needs(mut self, needs: &[&str]) -> Self {
        self.special_needs = Some(needs.iter().map(|n| n.to_string()).collect());
        self
    }

    pub fn is_toddler(&self) -> bool {
        self.is_toddler.unwrap_or(false)
    }

    pub fn is_pregnant(&self) -> bool {
        self.is_pregnant.unwrap_or(false)
    }
}

impl fmt::Display for FamilyMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)?;
        if let Some(age) = self.age {
            write!(f, ", age {}", age)?;
        }
        if let Some(needs) = self.special_needs.as_ref().filter(|n| !n.is_empty()) {
            write!(f, "\n    {}", needs.join("; "))?;
        }
        Ok(())
    }
}

/// The travelling party.
pub fn family_members() -> Vec<FamilyMember> {
    let mut micah = FamilyMember::new("micah", "Micah", 33.0).with_needs(&[
        "6 months pregnant",
        "Needs frequent breaks",
        "Low-impact activities only",
    ]);
    micah.is_pregnant = Some(true);

    let mut leah = FamilyMember::new("leah", "Leah", 3.0).with_needs(&[
        "Toddler-friendly activities",
        "Needs nap time",
        "Frequent snacks",
    ]);
    leah.is_toddler = Some(true);

    let mut walker = FamilyMember::new("walker", "Walker", 1.5).with_needs(&[
        "Toddler-friendly activities",
        "Stroller access",
        "Frequent diaper changes",
    ]);
    walker.is_toddler = Some(true);

    vec![
        FamilyMember::new("jason", "Jason", 35.0),
        micah,
        FamilyMember::new("sam", "Sam", 30.0),
        leah,
        walker,
    ]
}

pub fn find_member(id: &str) -> Option<FamilyMember> {
    family_members().into_iter().find(|m| m.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_ids_are_unique() {
        let members = family_members();
        let mut ids: Vec<&str> = members.iter().map(|m| m.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 5);
    }

    #[test]
    fn test_flags() {
        assert!(find_member("micah").unwrap().is_pregnant());
        assert!(find_member("walker").unwrap().is_toddler());
        assert!(!find_member("jason").unwrap().is_toddler());
        assert!(find_member("nobody").is_none());
    }
}
