// Comparison prompt template. The CV excerpt is hard-capped to bound
// request size; the job description is interpolated as-is.

/// Maximum number of CV characters interpolated into the prompt.
pub const CV_CHAR_LIMIT: usize = 3000;

/// Substituted when the target listing carries no description text.
pub const NO_JOB_DESCRIPTION: &str = "There is no job description";

/// Comparison prompt. Replace `{cv_text}` and `{job_text}` before sending.
pub const COMPARE_PROMPT_TEMPLATE: &str = r#"Compare the CV and Job Description.

Return:
- match_score (0-100)
- strengths
- missing_skills
- recommendation

CV:
{cv_text}

Job Description:
{job_text}"#;

/// Assembles the single user-role instruction sent to the model.
/// The CV text is truncated to its first `CV_CHAR_LIMIT` characters; no
/// other sanitization is applied to either input.
pub fn build_compare_prompt(cv_text: &str, job_description: Option<&str>) -> String {
    let cv_excerpt: String = cv_text.chars().take(CV_CHAR_LIMIT).collect();
    let job_text = job_description.unwrap_or(NO_JOB_DESCRIPTION);

    COMPARE_PROMPT_TEMPLATE
        .replace("{cv_text}", &cv_excerpt)
        .replace("{job_text}", job_text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_cv_is_interpolated_in_full() {
        let cv = "a".repeat(100);
        let prompt = build_compare_prompt(&cv, Some("Rust engineer role"));
        assert!(prompt.contains(&cv));
        assert!(prompt.contains("Rust engineer role"));
    }

    #[test]
    fn test_cv_at_the_limit_is_kept_whole() {
        let cv = "b".repeat(3000);
        let prompt = build_compare_prompt(&cv, None);
        assert_eq!(prompt.matches('b').count(), 3000);
    }

    #[test]
    fn test_oversized_cv_is_truncated_to_the_limit() {
        let cv = "c".repeat(10_000);
        let prompt = build_compare_prompt(&cv, None);
        assert_eq!(prompt.matches('c').count(), 3000);
    }

    #[test]
    fn test_truncation_counts_characters_not_bytes() {
        // Multibyte input must not panic or split a character.
        let cv = "é".repeat(4000);
        let prompt = build_compare_prompt(&cv, None);
        assert_eq!(prompt.matches('é').count(), 3000);
    }

    #[test]
    fn test_missing_job_description_uses_placeholder() {
        let prompt = build_compare_prompt("some cv", None);
        assert!(prompt.contains(NO_JOB_DESCRIPTION));
    }

    #[test]
    fn test_prompt_names_all_four_requested_outputs() {
        let prompt = build_compare_prompt("cv", Some("jd"));
        for output in ["match_score (0-100)", "strengths", "missing_skills", "recommendation"] {
            assert!(prompt.contains(output), "missing {output}");
        }
    }
}
