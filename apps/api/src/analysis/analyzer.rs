use std::collections::BTreeSet;

use chrono::Datelike;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::analysis::vocab::{EDUCATION_KEYWORDS, JOB_TITLES, TECHNICAL_SKILLS};

/// Headers that open a skills block.
const SKILL_HEADERS: &[&str] = &["skills", "technologies", "technical", "proficiencies"];
/// Headers that terminate a skills block.
const SKILL_SECTION_BREAKS: &[&str] = &["experience", "education", "projects", "publications"];
/// Headers that open an education block.
const EDUCATION_HEADERS: &[&str] = &["education", "academic"];
/// Headers that terminate an education block.
const EDUCATION_SECTION_BREAKS: &[&str] = &["experience", "skills", "projects", "publications"];
/// Delimiters separating individual skills on one line.
const SKILL_DELIMITERS: &[char] = &[',', '•', '|', '/', '\\', '·', '⋅', '◦', '‣', '⁃', '-'];

static DATE_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:19|20)\d{2}\b\s*(?:[-–—]|to)?\s*(?:\b(?:19|20)\d{2}\b|present|current|now)")
        .expect("valid regex")
});
static YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(?:19|20)\d{2}\b").expect("valid regex"));
static PRESENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)present|current|now").expect("valid regex"));
static EMAIL: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\w.-]+@[\w.-]+\.\w+").expect("valid regex"));
static PHONE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\+\d{1,3}[\s-]?)?\(?\d{3}\)?[\s.-]?\d{3}[\s.-]?\d{4}").expect("valid regex")
});
static LINKEDIN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)linkedin\.com/in/[\w-]+").expect("valid regex"));

/// Heuristic profile derived from resume text. Computed fresh on every
/// analysis call and replaced wholesale, never mutated in place.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResumeProfile {
    pub job_position: String,
    /// Comma-joined skill list, kept as a single string for prompt embedding.
    pub job_desc: String,
    /// Estimated years of experience as an integer string.
    pub job_experience: String,
    pub skills: Vec<String>,
    pub education: Vec<String>,
    pub contact_info: ContactInfo,
    pub all_job_titles: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct ContactInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
}

impl ResumeProfile {
    fn not_specified() -> Self {
        ResumeProfile {
            job_position: "Not specified".to_string(),
            job_desc: "Not specified".to_string(),
            job_experience: "1".to_string(),
            skills: Vec::new(),
            education: Vec::new(),
            contact_info: ContactInfo::default(),
            all_job_titles: Vec::new(),
        }
    }
}

/// Analyzes extracted resume text. Pure and infallible: identical text
/// always yields an identical profile, and unusable input yields a fully
/// populated profile with safe defaults.
pub fn analyze_resume_text(text: &str) -> ResumeProfile {
    if text.trim().is_empty() {
        return ResumeProfile::not_specified();
    }

    let all_job_titles = extract_job_titles(text);
    let job_position = all_job_titles
        .first()
        .cloned()
        .unwrap_or_else(|| first_lines_fallback(text));

    let skills = extract_skills(text);
    let job_desc = if skills.is_empty() {
        "Not specified".to_string()
    } else {
        skills.join(", ")
    };

    ResumeProfile {
        job_position: if job_position.is_empty() {
            "Not specified".to_string()
        } else {
            job_position
        },
        job_desc,
        job_experience: extract_experience(text, chrono::Utc::now().year()),
        skills,
        education: extract_education(text),
        contact_info: extract_contact_info(text),
        all_job_titles,
    }
}

/// Two passes: vocabulary substring match over the whole text, then a scan
/// of any skills section splitting lines on common delimiters. Deduplicated
/// via a set; insertion order across the passes is not preserved.
pub fn extract_skills(text: &str) -> Vec<String> {
    let mut skills = BTreeSet::new();
    let lower = text.to_lowercase();

    for skill in TECHNICAL_SKILLS {
        if lower.contains(skill) {
            skills.insert((*skill).to_string());
        }
    }

    let mut in_skills_section = false;
    for line in text.lines() {
        let lower_line = line.to_lowercase();

        if SKILL_HEADERS.iter().any(|h| lower_line.contains(h)) {
            in_skills_section = true;
            continue;
        }

        if in_skills_section {
            if SKILL_SECTION_BREAKS.iter().any(|h| lower_line.contains(h)) {
                in_skills_section = false;
                continue;
            }

            for part in line.split(SKILL_DELIMITERS) {
                let trimmed = part.trim();
                if trimmed.len() > 2 {
                    let trimmed_lower = trimmed.to_lowercase();
                    if TECHNICAL_SKILLS.iter().any(|s| trimmed_lower.contains(s)) {
                        skills.insert(trimmed.to_string());
                    }
                }
            }
        }
    }

    skills.into_iter().collect()
}

/// Vocabulary match over the full text plus a scan of the first 5
/// non-blank lines (which usually carry the current position), expanding
/// each match to a window of up to 4 words. The first matched title wins.
pub fn extract_job_titles(text: &str) -> Vec<String> {
    let mut titles: Vec<String> = Vec::new();
    let lower = text.to_lowercase();

    for title in JOB_TITLES {
        if lower.contains(title) && !titles.iter().any(|t| t == title) {
            titles.push((*title).to_string());
        }
    }

    let first_lines = text
        .lines()
        .filter(|l| !l.trim().is_empty())
        .take(5)
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();
    let words: Vec<&str> = first_lines.split_whitespace().collect();

    for title in JOB_TITLES {
        if first_lines.contains(title) {
            let head = title.split(' ').next().unwrap_or(title);
            if let Some(pos) = words.iter().position(|w| w.contains(head)) {
                let window = words[pos..(pos + 4).min(words.len())].join(" ");
                if !titles.contains(&window) {
                    titles.push(window);
                }
            }
        }
    }

    titles
}

/// Line scan within a heading-delimited education section; a line is kept
/// if it contains any degree or institution keyword.
pub fn extract_education(text: &str) -> Vec<String> {
    let mut education = Vec::new();
    let mut in_education_section = false;

    for line in text.lines() {
        let lower_line = line.to_lowercase();

        if EDUCATION_HEADERS.iter().any(|h| lower_line.contains(h)) {
            in_education_section = true;
            continue;
        }

        if in_education_section {
            if EDUCATION_SECTION_BREAKS
                .iter()
                .any(|h| lower_line.contains(h))
            {
                in_education_section = false;
                continue;
            }

            if EDUCATION_KEYWORDS.iter().any(|k| lower_line.contains(k)) {
                let trimmed = line.trim().to_string();
                if !education.contains(&trimmed) {
                    education.push(trimmed);
                }
            }
        }
    }

    education
}

/// Estimates years of experience from date ranges.
///
/// Primary: collect every year in `start–end|present` shaped ranges (a
/// "present" token counts as the current year) and return `max - min`.
/// Fallback: any plausible 4-digit years anywhere in the text, the latest
/// bounded by the current year. Fewer than 2 years found at all -> "1".
pub fn extract_experience(text: &str, current_year: i32) -> String {
    let mut years: Vec<i32> = Vec::new();

    for m in DATE_RANGE.find_iter(text) {
        let range = m.as_str();
        for y in YEAR.find_iter(range) {
            if let Ok(year) = y.as_str().parse::<i32>() {
                years.push(year);
            }
        }
        if PRESENT.is_match(range) {
            years.push(current_year);
        }
    }

    if years.len() >= 2 {
        let earliest = years.iter().min().copied().unwrap_or(current_year);
        let latest = years.iter().max().copied().unwrap_or(current_year);
        return (latest - earliest).to_string();
    }

    let mut all_years: Vec<i32> = YEAR
        .find_iter(text)
        .filter_map(|m| m.as_str().parse::<i32>().ok())
        .collect();

    if all_years.len() >= 2 {
        all_years.sort_unstable();
        let earliest = all_years[0];
        let latest = all_years[all_years.len() - 1].min(current_year);
        return (latest - earliest).to_string();
    }

    "1".to_string()
}

/// First email, first phone number, first LinkedIn profile path; each
/// independent and omitted if absent.
pub fn extract_contact_info(text: &str) -> ContactInfo {
    ContactInfo {
        email: EMAIL.find(text).map(|m| m.as_str().to_string()),
        phone: PHONE.find(text).map(|m| m.as_str().to_string()),
        linkedin: LINKEDIN.find(text).map(|m| m.as_str().to_string()),
    }
}

/// No title matched anywhere: first 3 non-blank lines, capped at 100 chars.
fn first_lines_fallback(text: &str) -> String {
    text.lines()
        .filter(|l| !l.trim().is_empty())
        .take(3)
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(100)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str =
        "Worked 2018-2022 as Software Engineer. Skills: Python, React, AWS.";

    #[test]
    fn test_sample_resume_position() {
        let profile = analyze_resume_text(SAMPLE);
        assert!(profile
            .job_position
            .to_lowercase()
            .contains("software engineer"));
    }

    #[test]
    fn test_sample_resume_skills() {
        let profile = analyze_resume_text(SAMPLE);
        for skill in ["python", "react", "aws"] {
            assert!(
                profile.skills.iter().any(|s| s.to_lowercase().contains(skill)),
                "missing skill {skill} in {:?}",
                profile.skills
            );
        }
    }

    #[test]
    fn test_sample_resume_experience() {
        let profile = analyze_resume_text(SAMPLE);
        assert_eq!(profile.job_experience, "4");
    }

    #[test]
    fn test_analyzer_is_idempotent() {
        let text = "Senior Backend Developer\n2015 - present\nSkills: Rust, PostgreSQL, Docker";
        assert_eq!(analyze_resume_text(text), analyze_resume_text(text));
    }

    #[test]
    fn test_empty_input_yields_defaults() {
        let profile = analyze_resume_text("   \n  ");
        assert_eq!(profile.job_position, "Not specified");
        assert_eq!(profile.job_desc, "Not specified");
        assert_eq!(profile.job_experience, "1");
    }

    #[test]
    fn test_single_year_defaults_to_one() {
        assert_eq!(extract_experience("Graduated in 2020.", 2026), "1");
    }

    #[test]
    fn test_date_range_with_present_token() {
        // 2019 plus the current year from "present"
        assert_eq!(extract_experience("2019 - present", 2026), "7");
    }

    #[test]
    fn test_date_range_en_dash() {
        assert_eq!(extract_experience("2018\u{2013}2022", 2026), "4");
    }

    #[test]
    fn test_fallback_years_bounded_by_current_year() {
        // No range shape, just scattered years; 2099 is clamped down.
        assert_eq!(extract_experience("since 2015. Certification 2099.", 2026), "11");
    }

    #[test]
    fn test_skills_section_scan_picks_up_compound_tokens() {
        let text = "Technical Skills\nReact Native • Node.js • GraphQL\n\nExperience\nAcme Corp";
        let skills = extract_skills(text);
        assert!(skills.iter().any(|s| s.to_lowercase().contains("react native")));
        assert!(skills.iter().any(|s| s.to_lowercase().contains("node")));
    }

    #[test]
    fn test_skills_section_stops_at_next_heading() {
        let text = "Skills\nPython\nExperience\nUsed Java at BigCo in 2001";
        let skills = extract_skills(text);
        // "java" still matches via the whole-text vocabulary pass,
        // but the section scan must not add the experience line itself.
        assert!(!skills.iter().any(|s| s.contains("BigCo")));
    }

    #[test]
    fn test_education_section_scan() {
        let text = "Education\nBachelor of Science, Computer Science — MIT\nDean's list\n\nExperience\nAcme";
        let education = extract_education(text);
        assert_eq!(education.len(), 1);
        assert!(education[0].contains("Bachelor"));
    }

    #[test]
    fn test_contact_info_extraction() {
        let text = "Jane Doe\njane.doe@example.com | +1 555-123-4567\nlinkedin.com/in/janedoe";
        let contact = extract_contact_info(text);
        assert_eq!(contact.email.as_deref(), Some("jane.doe@example.com"));
        assert!(contact.phone.is_some());
        assert_eq!(contact.linkedin.as_deref(), Some("linkedin.com/in/janedoe"));
    }

    #[test]
    fn test_contact_info_all_optional() {
        let contact = extract_contact_info("No contact details here");
        assert!(contact.email.is_none());
        assert!(contact.phone.is_none());
        assert!(contact.linkedin.is_none());
    }

    #[test]
    fn test_job_position_falls_back_to_first_lines() {
        let text = "Marine Biologist\nOceanography Division\nCoral reef research\nMore text";
        let profile = analyze_resume_text(text);
        assert!(profile.job_position.starts_with("Marine Biologist"));
        assert!(profile.job_position.chars().count() <= 100);
    }

    #[test]
    fn test_first_title_wins() {
        let titles = extract_job_titles("software engineer and developer");
        assert_eq!(titles[0], "software engineer");
    }
}
