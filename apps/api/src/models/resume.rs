//! Canonical resume document model.
//!
//! All user-facing field names are camelCase on the wire (the editing UI and
//! the JSON export file both speak that dialect). Sequences are ordered and
//! replaced wholesale by the editing session; entities are never mutated in
//! place, so a document can be shared freely once deserialized.
#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersonalInfo {
    pub name: String,
    pub title: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub website: String,
    pub summary: String,
    /// Data-URL encoded portrait, as captured by the editor's photo upload.
    pub photo: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Experience {
    pub id: String,
    pub company: String,
    pub position: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Education {
    pub id: String,
    pub institution: String,
    pub degree: String,
    pub field: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Skill {
    pub id: String,
    pub name: String,
    /// Proficiency 1–5. Clamped into range at the deserialization boundary so
    /// no downstream consumer has to re-check it.
    #[serde(deserialize_with = "de_skill_level")]
    pub level: u8,
}

impl Default for Skill {
    fn default() -> Self {
        Skill {
            id: String::new(),
            name: String::new(),
            level: DEFAULT_SKILL_LEVEL,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Reference {
    pub id: String,
    pub name: String,
    pub position: String,
    pub company: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResumeDocument {
    pub personal_info: PersonalInfo,
    pub experiences: Vec<Experience>,
    pub education: Vec<Education>,
    pub skills: Vec<Skill>,
    pub references: Vec<Reference>,
}

const DEFAULT_SKILL_LEVEL: u8 = 3;

impl ResumeDocument {
    /// A freshly created document: empty fields, exactly one placeholder
    /// entry per sequence, each with a stable opaque id assigned here and
    /// never reused.
    pub fn seeded() -> Self {
        ResumeDocument {
            personal_info: PersonalInfo::default(),
            experiences: vec![Experience {
                id: new_entity_id(),
                achievements: vec![String::new()],
                ..Experience::default()
            }],
            education: vec![Education {
                id: new_entity_id(),
                ..Education::default()
            }],
            skills: vec![Skill {
                id: new_entity_id(),
                ..Skill::default()
            }],
            references: vec![Reference {
                id: new_entity_id(),
                ..Reference::default()
            }],
        }
    }
}

fn new_entity_id() -> String {
    Uuid::new_v4().to_string()
}

fn de_skill_level<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = i64::deserialize(deserializer)?;
    Ok(raw.clamp(1, 5) as u8)
}

/// The client-local import/export envelope: the whole document plus the
/// active theme selector and the moment it was written.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeExport {
    pub resume_data: ResumeDocument,
    pub active_color: String,
    pub timestamp: DateTime<Utc>,
}
