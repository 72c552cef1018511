//! Localized string tables for the synthesized document.
//!
//! Two locales ship with the service. The tables cover every label the
//! synthesizer emits; an unrecognized language code falls back to English so
//! a bad request still renders something sensible.

/// Labels interpolated into the synthesized resume markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Strings {
    pub professional_summary: &'static str,
    pub experience: &'static str,
    pub education: &'static str,
    pub skills: &'static str,
    pub references: &'static str,
    pub key_achievements: &'static str,
    pub position: &'static str,
    pub company: &'static str,
    pub start_date: &'static str,
    pub end_date: &'static str,
    pub institution: &'static str,
    pub your_name: &'static str,
    pub your_job_title: &'static str,
    /// Connective between a reference's position and company ("X at Y").
    pub at: &'static str,
    /// Connective between a degree and its field ("BSc in Physics").
    pub in_field: &'static str,
}

pub const DEFAULT_LANGUAGE: &str = "en";

pub const EN: Strings = Strings {
    professional_summary: "PROFESSIONAL SUMMARY",
    experience: "EXPERIENCE",
    education: "EDUCATION",
    skills: "SKILLS",
    references: "REFERENCES",
    key_achievements: "Key Achievements:",
    position: "Position",
    company: "Company",
    start_date: "Start Date",
    end_date: "End Date",
    institution: "Institution",
    your_name: "Your Name",
    your_job_title: "Your Job Title",
    at: "at",
    in_field: "in",
};

pub const FR: Strings = Strings {
    professional_summary: "RÉSUMÉ PROFESSIONNEL",
    experience: "EXPÉRIENCE",
    education: "FORMATION",
    skills: "COMPÉTENCES",
    references: "RÉFÉRENCES",
    key_achievements: "Réalisations clés :",
    position: "Poste",
    company: "Entreprise",
    start_date: "Date de début",
    end_date: "Date de fin",
    institution: "Institution",
    your_name: "Votre nom",
    your_job_title: "Votre titre de poste",
    at: "chez",
    in_field: "en",
};

/// Resolves a language code to its string table, falling back to English.
pub fn resolve(language: &str) -> &'static Strings {
    match language {
        "fr" => &FR,
        _ => &EN,
    }
}
