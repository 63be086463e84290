//! Assessment — the model's free-text comparison plus a best-effort
//! structured breakdown.
//!
//! The model is asked for four named outputs but nothing enforces the
//! shape of its reply. The parser below recovers the structure when the
//! reply follows the requested layout; otherwise `breakdown` stays `None`
//! and callers fall back to the raw text.

use serde::Serialize;

/// Outcome of one comparison. `text` is always the model's reply verbatim.
#[derive(Debug, Clone, Serialize)]
pub struct Assessment {
    pub text: String,
    pub breakdown: Option<Breakdown>,
}

impl Assessment {
    pub fn from_response(text: String) -> Self {
        let breakdown = parse_breakdown(&text);
        Self { text, breakdown }
    }
}

/// The four outputs the prompt requests, recovered from the reply.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Breakdown {
    pub match_score: u8,
    pub strengths: Vec<String>,
    pub missing_skills: Vec<String>,
    pub recommendation: String,
}

#[derive(Clone, Copy)]
enum Section {
    None,
    Strengths,
    MissingSkills,
    Recommendation,
}

/// Scans the reply line by line for the requested sections. Returns `None`
/// unless both a bounded score and a recommendation are found; the two
/// lists may legitimately be empty.
pub fn parse_breakdown(text: &str) -> Option<Breakdown> {
    let mut score: Option<u8> = None;
    let mut strengths = Vec::new();
    let mut missing_skills = Vec::new();
    let mut recommendation_lines: Vec<String> = Vec::new();
    let mut section = Section::None;

    for line in text.lines() {
        let item = strip_bullet(line.trim());
        if item.is_empty() {
            continue;
        }
        let lower = item.to_lowercase();

        if lower.starts_with("match_score") || lower.starts_with("match score") {
            score = score.or_else(|| parse_score(item));
            section = Section::None;
        } else if lower.starts_with("strengths") {
            section = Section::Strengths;
            push_inline_remainder(item, &mut strengths);
        } else if lower.starts_with("missing_skills") || lower.starts_with("missing skills") {
            section = Section::MissingSkills;
            push_inline_remainder(item, &mut missing_skills);
        } else if lower.starts_with("recommendation") {
            section = Section::Recommendation;
            if let Some(rest) = after_colon(item) {
                recommendation_lines.push(rest.to_string());
            }
        } else {
            match section {
                Section::Strengths => strengths.push(item.to_string()),
                Section::MissingSkills => missing_skills.push(item.to_string()),
                Section::Recommendation => recommendation_lines.push(item.to_string()),
                Section::None => {}
            }
        }
    }

    let recommendation = recommendation_lines.join(" ");
    if recommendation.is_empty() {
        return None;
    }

    Some(Breakdown {
        match_score: score?,
        strengths,
        missing_skills,
        recommendation,
    })
}

/// Pulls the score off a `match_score` line. The `(0-100)` range reminder
/// the model often echoes back is discarded before scanning for digits.
fn parse_score(line: &str) -> Option<u8> {
    let without_parens = strip_parenthesized(line);
    first_integer(&without_parens).filter(|score| *score <= 100)
}

fn strip_parenthesized(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut depth = 0usize;
    for c in line.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            _ if depth == 0 => out.push(c),
            _ => {}
        }
    }
    out
}

fn first_integer(text: &str) -> Option<u8> {
    let mut digits = String::new();
    for c in text.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
        } else if !digits.is_empty() {
            break;
        }
    }
    digits.parse().ok()
}

fn strip_bullet(line: &str) -> &str {
    line.trim_start_matches(['-', '*', '•'])
        .trim_start_matches(|c: char| c.is_ascii_digit() || c == '.' || c == ')')
        .trim()
}

/// Captures list items written on the header line itself, e.g.
/// `strengths: Rust, Tokio`.
fn push_inline_remainder(line: &str, items: &mut Vec<String>) {
    if let Some(rest) = after_colon(line) {
        items.extend(
            rest.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from),
        );
    }
}

fn after_colon(line: &str) -> Option<&str> {
    line.split_once(':')
        .map(|(_, rest)| rest.trim())
        .filter(|rest| !rest.is_empty())
}
