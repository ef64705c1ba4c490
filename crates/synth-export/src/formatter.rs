//! Human-readable renderings of a single record.

use crate::error::ExportError;
use clap::ValueEnum;
use std::fmt::{self, Write as _};
use synth_core::{CareerStage, Record};

/// Output format for a single record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DisplayFormat {
    Json,
    Text,
    Markdown,
    Html,
}

/// Render one record in `format`.
pub fn render_record(record: &Record, format: DisplayFormat) -> Result<String, ExportError> {
    match format {
        DisplayFormat::Json => Ok(serde_json::to_string_pretty(record)?),
        DisplayFormat::Text => render_text(record),
        DisplayFormat::Markdown => render_markdown(record),
        DisplayFormat::Html => render_html(record),
    }
}

/// Plain-text CV layout.
pub fn render_text(record: &Record) -> Result<String, ExportError> {
    let mut out = String::new();
    write_text(&mut out, record)?;
    Ok(out)
}

/// Markdown CV layout.
pub fn render_markdown(record: &Record) -> Result<String, ExportError> {
    let mut out = String::new();
    write_markdown(&mut out, record)?;
    Ok(out)
}

/// Standalone HTML page with the CV.
pub fn render_html(record: &Record) -> Result<String, ExportError> {
    let mut out = String::new();
    write_html(&mut out, record)?;
    Ok(out)
}

fn period(stage: &CareerStage) -> String {
    match stage.end_year {
        Some(end) => format!("{}-{}", stage.start_year, end),
        None => format!("{}-present", stage.start_year),
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn section(out: &mut String, title: &str) -> fmt::Result {
    writeln!(out, "{title}")?;
    writeln!(out, "{}", "-".repeat(title.chars().count()))
}

fn write_text(out: &mut String, record: &Record) -> fmt::Result {
    let p = &record.profile;
    writeln!(out, "{}", "=".repeat(60))?;
    writeln!(out, "SYNTHETIC CAREER PROFILE")?;
    writeln!(out, "{}", "=".repeat(60))?;
    writeln!(out)?;

    section(out, "PERSONAL DETAILS")?;
    writeln!(out, "Name: {}", p.full_name())?;
    writeln!(out, "Age: {} ({})", p.age, p.birth_year())?;
    writeln!(
        out,
        "Residence: {}, {}",
        p.locality.settlement, p.locality.subdivision
    )?;
    writeln!(out, "Language region: {}", p.region)?;
    writeln!(out, "Sector: {}", p.sector)?;
    writeln!(out)?;

    section(out, "EDUCATION")?;
    for stage in &record.education {
        writeln!(out, "{}-{}: {}", stage.start_year, stage.end_year, stage.level.label())?;
        writeln!(out, "  {}", stage.institution)?;
        writeln!(out, "  {}", stage.qualification)?;
        writeln!(out)?;
    }

    section(out, "CAREER")?;
    for stage in &record.career {
        writeln!(out, "{}: {}", period(stage), stage.position)?;
        writeln!(out, "  {}, {}", stage.employer, stage.location)?;
        writeln!(out, "  {}, {}", stage.employment_type, stage.workload)?;
        writeln!(out)?;
    }

    section(out, "LANGUAGES")?;
    for skill in &record.skills.languages {
        writeln!(out, "{}: {}", capitalize(&skill.language), skill.proficiency)?;
    }
    writeln!(out)?;

    section(out, "SKILLS")?;
    writeln!(
        out,
        "Professional: {}",
        record.skills.professional_skills.join(", ")
    )?;
    writeln!(out, "IT: {}", record.skills.it_skills.join(", "))?;
    writeln!(out)?;

    section(out, "LEISURE")?;
    write!(out, "{}", record.leisure_activities.join(", "))
}

fn write_markdown(out: &mut String, record: &Record) -> fmt::Result {
    let p = &record.profile;
    writeln!(out, "# {}\n", p.full_name())?;
    writeln!(out, "**Age:** {}  ", p.age)?;
    writeln!(
        out,
        "**Residence:** {}, {}  ",
        p.locality.settlement, p.locality.subdivision
    )?;
    writeln!(out, "**Language region:** {}  ", p.region)?;
    writeln!(out, "**Sector:** {}\n", p.sector)?;

    writeln!(out, "## Education\n")?;
    for stage in &record.education {
        writeln!(
            out,
            "- **{}-{}:** {}  ",
            stage.start_year,
            stage.end_year,
            stage.level.label()
        )?;
        writeln!(out, "  *{}*  ", stage.institution)?;
        writeln!(out, "  {}\n", stage.qualification)?;
    }

    writeln!(out, "## Career\n")?;
    for stage in &record.career {
        writeln!(out, "- **{}:** {}  ", period(stage), stage.position)?;
        writeln!(out, "  *{}, {}*  ", stage.employer, stage.location)?;
        writeln!(out, "  {}, {}\n", stage.employment_type, stage.workload)?;
    }

    writeln!(out, "## Languages\n")?;
    for skill in &record.skills.languages {
        writeln!(
            out,
            "- **{}:** {}",
            capitalize(&skill.language),
            skill.proficiency
        )?;
    }

    writeln!(out, "\n## Skills\n")?;
    writeln!(
        out,
        "- **Professional:** {}",
        record.skills.professional_skills.join(", ")
    )?;
    writeln!(out, "- **IT:** {}", record.skills.it_skills.join(", "))?;

    write!(out, "\n## Leisure\n\n{}", record.leisure_activities.join(", "))
}

fn write_html(out: &mut String, record: &Record) -> fmt::Result {
    let p = &record.profile;
    let name = escape_html(&p.full_name());
    writeln!(out, "<!DOCTYPE html>")?;
    writeln!(out, "<html lang=\"{}\">", escape_html(&p.primary_language))?;
    writeln!(out, "<head>")?;
    writeln!(out, "<meta charset=\"utf-8\">")?;
    writeln!(out, "<title>{name}</title>")?;
    writeln!(out, "</head>")?;
    writeln!(out, "<body>")?;
    writeln!(out, "<h1>{name}</h1>")?;
    writeln!(out, "<dl>")?;
    writeln!(out, "<dt>Age</dt><dd>{} ({})</dd>", p.age, p.birth_year())?;
    writeln!(
        out,
        "<dt>Residence</dt><dd>{}, {}</dd>",
        escape_html(&p.locality.settlement),
        escape_html(&p.locality.subdivision)
    )?;
    writeln!(out, "<dt>Language region</dt><dd>{}</dd>", p.region)?;
    writeln!(out, "<dt>Sector</dt><dd>{}</dd>", escape_html(&p.sector))?;
    writeln!(out, "</dl>")?;

    writeln!(out, "<h2>Education</h2>\n<ul>")?;
    for stage in &record.education {
        writeln!(
            out,
            "<li><strong>{}-{}:</strong> {}<br><em>{}</em><br>{}</li>",
            stage.start_year,
            stage.end_year,
            stage.level.label(),
            escape_html(&stage.institution),
            escape_html(&stage.qualification)
        )?;
    }
    writeln!(out, "</ul>")?;

    writeln!(out, "<h2>Career</h2>\n<ul>")?;
    for stage in &record.career {
        writeln!(
            out,
            "<li><strong>{}:</strong> {}<br><em>{}, {}</em><br>{}, {}</li>",
            period(stage),
            escape_html(&stage.position),
            escape_html(&stage.employer),
            escape_html(&stage.location),
            stage.employment_type,
            stage.workload
        )?;
    }
    writeln!(out, "</ul>")?;

    writeln!(out, "<h2>Languages</h2>\n<ul>")?;
    for skill in &record.skills.languages {
        writeln!(
            out,
            "<li><strong>{}:</strong> {}</li>",
            escape_html(&capitalize(&skill.language)),
            skill.proficiency
        )?;
    }
    writeln!(out, "</ul>")?;

    writeln!(out, "<h2>Skills</h2>\n<ul>")?;
    writeln!(
        out,
        "<li><strong>Professional:</strong> {}</li>",
        escape_html(&record.skills.professional_skills.join(", "))
    )?;
    writeln!(
        out,
        "<li><strong>IT:</strong> {}</li>",
        escape_html(&record.skills.it_skills.join(", "))
    )?;
    writeln!(out, "</ul>")?;

    writeln!(out, "<h2>Leisure</h2>")?;
    writeln!(
        out,
        "<p>{}</p>",
        escape_html(&record.leisure_activities.join(", "))
    )?;
    write!(out, "</body>\n</html>")
}
