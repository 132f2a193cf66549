//! Matcher: exact, case-sensitive set arithmetic over two skill lists.
//!
//! The match rate is measured against the job description: the share of
//! distinct JD skills that also appear in the CV. It is not symmetric.

use std::collections::{BTreeSet, HashSet};

use serde::Serialize;

/// Full comparison of one JD against one CV.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchReport {
    pub jd_skills: Vec<String>,
    pub cv_skills: Vec<String>,
    pub matching_skills: Vec<String>, // sorted
    pub missing_skills: Vec<String>,  // JD order, no repeats
    pub match_rate: f64,              // 0.0 – 100.0
    pub match_rate_display: String,   // "42.50%"
}

/// Skills present in both lists. Commutative.
pub fn find_matching_skills(a: &[String], b: &[String]) -> BTreeSet<String> {
    let b: HashSet<&str> = b.iter().map(String::as_str).collect();
    a.iter()
        .filter(|skill| b.contains(skill.as_str()))
        .cloned()
        .collect()
}

/// |set(cv) ∩ set(jd)| / |set(jd)| × 100, or 0 when the JD has no skills.
pub fn calculate_match_rate(cv_skills: &[String], jd_skills: &[String]) -> f64 {
    let jd: HashSet<&str> = jd_skills.iter().map(String::as_str).collect();
    if jd.is_empty() {
        return 0.0;
    }

    let cv: HashSet<&str> = cv_skills.iter().map(String::as_str).collect();
    let matched = jd.intersection(&cv).count();

    (matched as f64 / jd.len() as f64) * 100.0
}

pub fn format_match_rate(rate: f64) -> String {
    format!("{rate:.2}%")
}

/// JD skills the CV does not mention, first occurrence only.
pub fn find_missing_skills(jd_skills: &[String], cv_skills: &[String]) -> Vec<String> {
    let cv: HashSet<&str> = cv_skills.iter().map(String::as_str).collect();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut missing = Vec::new();

    for skill in jd_skills {
        if !cv.contains(skill.as_str()) && seen.insert(skill.as_str()) {
            missing.push(skill.clone());
        }
    }

    missing
}

pub fn build_match_report(jd_skills: Vec<String>, cv_skills: Vec<String>) -> MatchReport {
    let matching_skills = find_matching_skills(&jd_skills, &cv_skills)
        .into_iter()
        .collect();
    let missing_skills = find_missing_skills(&jd_skills, &cv_skills);
    let match_rate = calculate_match_rate(&cv_skills, &jd_skills);

    MatchReport {
        jd_skills,
        cv_skills,
        matching_skills,
        missing_skills,
        match_rate,
        match_rate_display: format_match_rate(match_rate),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_match_rate_half() {
        let rate = calculate_match_rate(&skills(&["Python", "SQL"]), &skills(&["Python", "Java"]));
        assert!((rate - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_match_rate_zero_for_empty_jd() {
        assert_eq!(calculate_match_rate(&skills(&["Python", "SQL"]), &[]), 0.0);
        assert_eq!(calculate_match_rate(&[], &[]), 0.0);
    }

    #[test]
    fn test_match_rate_is_not_symmetric() {
        let cv = skills(&["Python"]);
        let jd = skills(&["Python", "Java", "Go", "SQL"]);
        assert_eq!(calculate_match_rate(&cv, &jd), 25.0);
        assert_eq!(calculate_match_rate(&jd, &cv), 100.0);
    }

    #[test]
    fn test_match_rate_counts_distinct_jd_skills() {
        let cv = skills(&["Rust"]);
        let jd = skills(&["Rust", "Rust", "Go"]);
        assert_eq!(calculate_match_rate(&cv, &jd), 50.0);
    }

    #[test]
    fn test_match_rate_never_exceeds_100() {
        let cv = skills(&["Rust", "Rust", "Go"]);
        let jd = skills(&["Rust", "Go", "Go"]);
        assert_eq!(calculate_match_rate(&cv, &jd), 100.0);
    }

    #[test]
    fn test_matching_is_commutative() {
        let a = skills(&["Python", "SQL", "Docker", "SQL"]);
        let b = skills(&["Docker", "Java", "Python"]);
        assert_eq!(find_matching_skills(&a, &b), find_matching_skills(&b, &a));
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let matched = find_matching_skills(&skills(&["python", "SQL"]), &skills(&["Python", "SQL"]));
        assert_eq!(matched.into_iter().collect::<Vec<_>>(), vec!["SQL"]);
    }

    #[test]
    fn test_format_match_rate_two_decimals() {
        assert_eq!(format_match_rate(42.5), "42.50%");
        assert_eq!(format_match_rate(0.0), "0.00%");
        assert_eq!(format_match_rate(100.0 / 3.0), "33.33%");
    }

    #[test]
    fn test_missing_skills_keep_jd_order_without_repeats() {
        let jd = skills(&["Kafka", "Rust", "Kafka", "Go"]);
        let cv = skills(&["Rust"]);
        assert_eq!(find_missing_skills(&jd, &cv), vec!["Kafka", "Go"]);
    }

    #[test]
    fn test_build_match_report() {
        let report = build_match_report(
            skills(&["Python", "Java", "SQL", "Docker"]),
            skills(&["SQL", "Python", "Excel"]),
        );
        assert_eq!(report.matching_skills, vec!["Python", "SQL"]);
        assert_eq!(report.missing_skills, vec!["Java", "Docker"]);
        assert_eq!(report.match_rate, 50.0);
        assert_eq!(report.match_rate_display, "50.00%");
        assert_eq!(report.cv_skills.len(), 3);
    }
}
