//! Sparse update bodies.
//!
//! Every field is optional; only the fields present in the request are
//! written. Unknown keys are rejected during deserialization, so a patch can
//! never name a column outside its entity's fixed set. For nullable columns
//! an explicit `null` clears the stored value, which is why those fields are
//! `Option<Option<T>>`: the outer `None` means "absent".

use serde::{Deserialize, Deserializer};

fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SkillPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub level: Option<i64>,
    #[serde(default, deserialize_with = "nullable")]
    pub icon: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub color: Option<Option<String>>,
    #[serde(default)]
    pub order_index: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub technologies: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub github_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub live_url: Option<Option<String>>,
    #[serde(default)]
    pub featured: Option<bool>,
    #[serde(default)]
    pub order_index: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EducationPatch {
    #[serde(default)]
    pub degree: Option<String>,
    #[serde(default)]
    pub institution: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub location: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub start_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub end_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub gpa: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub honors: Option<Option<String>>,
    /// `null` resets the list to empty.
    #[serde(default, deserialize_with = "nullable")]
    pub courses: Option<Option<Vec<String>>>,
    #[serde(default, deserialize_with = "nullable")]
    pub achievements: Option<Option<Vec<String>>>,
    #[serde(default)]
    pub featured: Option<bool>,
    #[serde(default)]
    pub order_index: Option<i64>,
}
