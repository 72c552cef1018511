//! Structured resume body synthesis.
//!
//! Mirrors the live preview's markup so the structured path and the snapshot
//! path lay out identically under the shared document shell. Sections whose
//! backing data is empty are omitted entirely rather than rendered as empty
//! headings.

use super::escape_html;
use crate::models::locale::Strings;
use crate::models::resume::{Education, Experience, Reference, ResumeDocument, Skill};
use crate::models::theme::Theme;

/// Muted color for date ranges and reference contact lines.
const MUTED_TEXT: &str = "#4b5563";

/// Renders the full resume body fragment for the given theme and locale.
pub fn body(doc: &ResumeDocument, theme: &Theme, strings: &Strings) -> String {
    let mut out = String::new();

    out.push_str(
        r#"<div id="resume-preview" class="border rounded-lg overflow-hidden bg-white" style="max-width:800px;margin:0 auto;font-family:system-ui,-apple-system,sans-serif;line-height:1.4;letter-spacing:0.01em">"#,
    );
    out.push_str(&header(doc, theme, strings));
    out.push_str(r#"<div class="p-4">"#);
    out.push_str(&summary_section(doc, theme, strings));
    out.push_str(&experience_section(doc, theme, strings));
    out.push_str(&education_section(doc, theme, strings));
    out.push_str(&skills_section(doc, theme, strings));
    out.push_str(&references_section(doc, theme, strings));
    out.push_str("</div></div>");

    out
}

fn section_heading(label: &str, theme: &Theme) -> String {
    format!(
        r#"<h2 class="text-base font-semibold mb-1 pb-2" style="border-bottom:1px solid {border}">{label}</h2>"#,
        border = theme.border,
    )
}

fn header(doc: &ResumeDocument, theme: &Theme, strings: &Strings) -> String {
    let info = &doc.personal_info;
    let mut out = String::new();

    out.push_str(&format!(
        r#"<div class="p-4" style="background-color:{secondary}"><div class="flex items-start gap-4">"#,
        secondary = theme.secondary,
    ));

    if !info.photo.is_empty() {
        out.push_str(&format!(
            r#"<div class="flex-shrink-0"><div class="w-16 h-16 rounded-full object-cover border-2 border-white shadow-md bg-gray-200 flex items-center justify-center" style="background-image:url({photo});background-size:cover;background-position:center"></div></div>"#,
            photo = escape_html(&info.photo),
        ));
    }

    let name = if info.name.is_empty() {
        strings.your_name.to_string()
    } else {
        escape_html(&info.name)
    };
    let title = if info.title.is_empty() {
        strings.your_job_title.to_string()
    } else {
        escape_html(&info.title)
    };
    out.push_str(&format!(
        r#"<div class="flex-grow"><h1 class="text-xl font-bold">{name}</h1><p class="text-base" style="color:{text}">{title}</p></div></div>"#,
        text = theme.text,
    ));

    out.push_str(r#"<div class="mt-2 flex flex-wrap gap-x-4 gap-y-1 text-xs">"#);
    for (icon, value) in [
        ("\u{2709}\u{FE0F}", &info.email),
        ("\u{1F4F1}", &info.phone),
        ("\u{1F4CD}", &info.location),
        ("\u{1F517}", &info.website),
    ] {
        if !value.is_empty() {
            out.push_str(&format!(
                r#"<div class="flex items-center"><span class="mr-1">{icon}</span><span>{value}</span></div>"#,
                value = escape_html(value),
            ));
        }
    }
    out.push_str("</div></div>");

    out
}

fn summary_section(doc: &ResumeDocument, theme: &Theme, strings: &Strings) -> String {
    let summary = &doc.personal_info.summary;
    if summary.is_empty() {
        return String::new();
    }
    format!(
        r#"<div class="mb-4">{heading}<p class="text-xs leading-relaxed">{summary}</p></div>"#,
        heading = section_heading(strings.professional_summary, theme),
        summary = escape_html(summary),
    )
}

fn experience_visible(exp: &Experience) -> bool {
    !exp.company.is_empty() || !exp.position.is_empty()
}

fn experience_section(doc: &ResumeDocument, theme: &Theme, strings: &Strings) -> String {
    if !doc.experiences.iter().any(experience_visible) {
        return String::new();
    }

    let mut out = String::new();
    out.push_str(r#"<div class="mb-4">"#);
    out.push_str(&section_heading(strings.experience, theme));

    for exp in doc.experiences.iter().filter(|e| experience_visible(e)) {
        let position = non_empty_or(&exp.position, strings.position);
        let company = non_empty_or(&exp.company, strings.company);
        let start = non_empty_or(&exp.start_date, strings.start_date);
        let end = non_empty_or(&exp.end_date, strings.end_date);

        out.push_str(&format!(
            r#"<div class="mb-3"><div class="flex justify-between items-start"><div><h3 class="font-medium text-sm">{position}</h3><p class="text-xs">{company}</p></div><p class="text-xs" style="color:{muted}">{start} - {end}</p></div>"#,
            muted = MUTED_TEXT,
        ));

        if !exp.description.is_empty() {
            out.push_str(&format!(
                r#"<p class="text-xs mt-1 leading-relaxed">{}</p>"#,
                escape_html(&exp.description),
            ));
        }

        // Blank achievements are filtered out, never rendered as empty items.
        let achievements: Vec<&String> = exp
            .achievements
            .iter()
            .filter(|a| !a.trim().is_empty())
            .collect();
        if !achievements.is_empty() {
            out.push_str(&format!(
                r#"<div class="mt-1"><p class="text-xs font-medium">{}</p><ul class="list-disc list-outside text-xs pl-4 ml-2 leading-relaxed">"#,
                strings.key_achievements,
            ));
            for achievement in achievements {
                out.push_str(&format!("<li>{}</li>", escape_html(achievement)));
            }
            out.push_str("</ul></div>");
        }

        out.push_str("</div>");
    }

    out.push_str("</div>");
    out
}

fn education_visible(edu: &Education) -> bool {
    !edu.institution.is_empty() || !edu.degree.is_empty()
}

fn education_section(doc: &ResumeDocument, theme: &Theme, strings: &Strings) -> String {
    if !doc.education.iter().any(education_visible) {
        return String::new();
    }

    let mut out = String::new();
    out.push_str(r#"<div class="mb-4">"#);
    out.push_str(&section_heading(strings.education, theme));

    for edu in doc.education.iter().filter(|e| education_visible(e)) {
        let degree_line = if edu.field.is_empty() {
            escape_html(&edu.degree)
        } else {
            format!(
                "{} {} {}",
                escape_html(&edu.degree),
                strings.in_field,
                escape_html(&edu.field)
            )
        };
        let institution = non_empty_or(&edu.institution, strings.institution);
        let start = non_empty_or(&edu.start_date, strings.start_date);
        let end = non_empty_or(&edu.end_date, strings.end_date);

        out.push_str(&format!(
            r#"<div class="mb-3"><div class="flex justify-between items-start"><div><h3 class="font-medium text-sm">{degree_line}</h3><p class="text-xs">{institution}</p></div><p class="text-xs" style="color:{muted}">{start} - {end}</p></div>"#,
            muted = MUTED_TEXT,
        ));

        if !edu.description.is_empty() {
            out.push_str(&format!(
                r#"<p class="text-xs mt-1 leading-relaxed">{}</p>"#,
                escape_html(&edu.description),
            ));
        }

        out.push_str("</div>");
    }

    out.push_str("</div>");
    out
}

fn skill_visible(skill: &Skill) -> bool {
    !skill.name.is_empty()
}

fn skills_section(doc: &ResumeDocument, theme: &Theme, strings: &Strings) -> String {
    if !doc.skills.iter().any(skill_visible) {
        return String::new();
    }

    let mut out = String::new();
    out.push_str(r#"<div class="mb-4">"#);
    out.push_str(&section_heading(strings.skills, theme));
    out.push_str(r#"<div class="flex flex-wrap gap-1">"#);

    for skill in doc.skills.iter().filter(|s| skill_visible(s)) {
        // Expert-level skills (4+) get the solid primary chip.
        let style = if skill.level >= 4 {
            format!("background-color:{};color:white", theme.primary)
        } else {
            format!("background-color:{};color:{}", theme.secondary, theme.text)
        };
        out.push_str(&format!(
            r#"<div class="px-2 py-1 rounded-full text-xs" style="{style}">{name}</div>"#,
            name = escape_html(&skill.name),
        ));
    }

    out.push_str("</div></div>");
    out
}

fn reference_visible(reference: &Reference) -> bool {
    !reference.name.is_empty()
}

fn references_section(doc: &ResumeDocument, theme: &Theme, strings: &Strings) -> String {
    if !doc.references.iter().any(reference_visible) {
        return String::new();
    }

    let mut out = String::new();
    out.push_str("<div>");
    out.push_str(&section_heading(strings.references, theme));
    out.push_str(r#"<div class="grid grid-cols-1 md:grid-cols-2 gap-3">"#);

    for reference in doc.references.iter().filter(|r| reference_visible(r)) {
        out.push_str(&format!(
            r#"<div class="text-xs"><p class="font-medium">{}</p>"#,
            escape_html(&reference.name),
        ));

        if !reference.position.is_empty() && !reference.company.is_empty() {
            out.push_str(&format!(
                "<p>{} {} {}</p>",
                escape_html(&reference.position),
                strings.at,
                escape_html(&reference.company),
            ));
        }

        if !reference.email.is_empty() || !reference.phone.is_empty() {
            let mut contact = String::new();
            if !reference.email.is_empty() {
                contact.push_str(&format!("<span>{}</span>", escape_html(&reference.email)));
            }
            if !reference.email.is_empty() && !reference.phone.is_empty() {
                contact.push_str("<span> | </span>");
            }
            if !reference.phone.is_empty() {
                contact.push_str(&format!("<span>{}</span>", escape_html(&reference.phone)));
            }
            out.push_str(&format!(
                r#"<p style="color:{MUTED_TEXT}">{contact}</p>"#
            ));
        }

        out.push_str("</div>");
    }

    out.push_str("</div></div>");
    out
}

fn non_empty_or(value: &str, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        escape_html(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{locale, theme};

    fn populated_doc() -> ResumeDocument {
        serde_json::from_str(
            r#"{
                "personalInfo": {
                    "name": "Jane Doe",
                    "title": "Staff Engineer",
                    "email": "jane@example.com",
                    "phone": "+1 555 0100",
                    "location": "Lyon",
                    "website": "https://jane.dev",
                    "summary": "Systems engineer."
                },
                "experiences": [{
                    "id": "e1",
                    "company": "Acme",
                    "position": "Engineer",
                    "startDate": "2019",
                    "endDate": "2024",
                    "description": "Built things.",
                    "achievements": ["Shipped v1", "   ", "", "Cut latency 40%"]
                }],
                "education": [{
                    "id": "d1",
                    "institution": "ENS",
                    "degree": "MSc",
                    "field": "CS",
                    "startDate": "2014",
                    "endDate": "2016",
                    "description": ""
                }],
                "skills": [
                    {"id": "s1", "name": "Rust", "level": 5},
                    {"id": "s2", "name": "SQL", "level": 2}
                ],
                "references": [{
                    "id": "r1",
                    "name": "Ref One",
                    "position": "CTO",
                    "company": "Acme",
                    "email": "ref@acme.io",
                    "phone": "+1 555 0101"
                }]
            }"#,
        )
        .unwrap()
    }

    fn render(doc: &ResumeDocument) -> String {
        body(doc, theme::resolve("blue"), locale::resolve("en"))
    }

    #[test]
    fn test_identical_inputs_produce_byte_identical_output() {
        let doc = populated_doc();
        assert_eq!(render(&doc), render(&doc));
    }

    #[test]
    fn test_empty_sequences_omit_section_headings() {
        let mut doc = populated_doc();
        doc.experiences.clear();
        doc.education.clear();
        doc.skills.clear();
        doc.references.clear();
        doc.personal_info.summary.clear();

        let html = render(&doc);
        let strings = locale::resolve("en");
        assert!(!html.contains(strings.experience));
        assert!(!html.contains(strings.education));
        assert!(!html.contains(strings.skills));
        assert!(!html.contains(strings.references));
        assert!(!html.contains(strings.professional_summary));
    }

    #[test]
    fn test_placeholder_only_entries_do_not_surface_sections() {
        // A seeded document is all placeholders; nothing should render as a section.
        let doc = ResumeDocument::seeded();
        let html = render(&doc);
        let strings = locale::resolve("en");
        assert!(!html.contains(strings.experience));
        assert!(!html.contains(strings.key_achievements));
        // Header placeholders do surface.
        assert!(html.contains(strings.your_name));
    }

    #[test]
    fn test_blank_achievements_filtered_in_order() {
        let doc = populated_doc();
        let html = render(&doc);

        let first = html.find("Shipped v1").expect("first achievement present");
        let second = html.find("Cut latency 40%").expect("second achievement present");
        assert!(first < second, "achievements keep original order");
        assert!(!html.contains("<li></li>"));
        assert!(!html.contains("<li>   </li>"));
        assert_eq!(html.matches("<li>").count(), 2);
    }

    #[test]
    fn test_user_markup_is_escaped() {
        let mut doc = populated_doc();
        doc.personal_info.name = "<script>alert('x')</script>".to_string();
        doc.experiences[0].achievements = vec!["<b>bold</b>".to_string()];

        let html = render(&doc);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("&lt;b&gt;bold&lt;/b&gt;"));
    }

    #[test]
    fn test_theme_colors_resolved_into_markup() {
        let doc = populated_doc();
        let blue = body(&doc, theme::resolve("blue"), locale::resolve("en"));
        assert!(blue.contains("#2563eb"));
        assert!(blue.contains("#dbeafe"));

        let unknown = body(&doc, theme::resolve("nope"), locale::resolve("en"));
        assert_eq!(blue, unknown);
    }

    #[test]
    fn test_skill_chip_styling_switches_on_level() {
        let doc = populated_doc();
        let html = render(&doc);
        // Rust (level 5): solid primary chip. SQL (level 2): tinted chip.
        assert!(html.contains("background-color:#2563eb;color:white"));
        assert!(html.contains("background-color:#dbeafe;color:#2563eb"));
    }

    #[test]
    fn test_french_locale_headings() {
        let doc = populated_doc();
        let html = body(&doc, theme::resolve("blue"), locale::resolve("fr"));
        assert!(html.contains("EXPÉRIENCE"));
        assert!(html.contains("FORMATION"));
        assert!(html.contains("Réalisations clés :"));
    }

    #[test]
    fn test_reference_contact_line_separator() {
        let mut doc = populated_doc();
        let html = render(&doc);
        assert!(html.contains("<span> | </span>"));

        doc.references[0].phone.clear();
        let html = render(&doc);
        assert!(html.contains("ref@acme.io"));
        assert!(!html.contains("<span> | </span>"));
    }
}
