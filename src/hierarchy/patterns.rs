//! Per-level regex families, year-experience bands, and responsibility
//! phrases (spec.md 4.2). Regex families are compiled once behind a
//! `OnceLock`, matching the teacher's preference for compiling patterns
//! at process start rather than per call.

use std::sync::OnceLock;

use regex::Regex;

use crate::models::enums::HierarchicalLevel;

/// Weight a single signal source contributes toward a level's total
/// score when it fires. Title patterns are the strongest signal; team
/// size/responsibility phrases the weakest on their own.
pub const TITLE_MATCH_WEIGHT: f64 = 1.0;
pub const TEAM_SIZE_MAX_WEIGHT: f64 = 0.8;

fn title_families() -> &'static Vec<(HierarchicalLevel, Regex)> {
    static FAMILIES: OnceLock<Vec<(HierarchicalLevel, Regex)>> = OnceLock::new();
    FAMILIES.get_or_init(|| {
        vec![
            (
                HierarchicalLevel::Executive,
                Regex::new(r"(?i)chief|c[efo]o|daf|drh|dg\b|director general|vp\b").unwrap(),
            ),
            (
                HierarchicalLevel::Director,
                Regex::new(r"(?i)director|directeur|head of|vp\b").unwrap(),
            ),
            (
                HierarchicalLevel::Manager,
                Regex::new(r"(?i)manager|responsable|chef d'équipe|chef d'equipe|lead\b")
                    .unwrap(),
            ),
            (
                HierarchicalLevel::Senior,
                Regex::new(r"(?i)senior|confirmed|confirmé|senior engineer|expert\b").unwrap(),
            ),
            (
                HierarchicalLevel::Junior,
                Regex::new(r"(?i)junior|débutant confirmé|associate\b").unwrap(),
            ),
            (
                HierarchicalLevel::Entry,
                Regex::new(r"(?i)intern|stagiaire|apprenti|entry.level|débutant|junior trainee")
                    .unwrap(),
            ),
        ]
    })
}

/// Title-pattern signal: `TITLE_MATCH_WEIGHT` if `text` matches `level`'s
/// family, else 0.
pub fn title_signal(level: HierarchicalLevel, text: &str) -> f64 {
    title_families()
        .iter()
        .find(|(l, _)| *l == level)
        .map(|(_, re)| if re.is_match(text) { TITLE_MATCH_WEIGHT } else { 0.0 })
        .unwrap_or(0.0)
}

/// Years-of-experience bands (spec.md 4.2): overlap permitted, each band
/// contributes a weight in [0,1]. Linear taper at the band edges so a
/// candidate at 4.5 years counts more toward JUNIOR than one at 2.1
/// years, without a hard step.
pub fn years_band_signal(level: HierarchicalLevel, years: f64) -> f64 {
    let (lo, hi): (f64, f64) = match level {
        HierarchicalLevel::Entry => (0.0, 2.0),
        HierarchicalLevel::Junior => (2.0, 5.0),
        HierarchicalLevel::Senior => (5.0, 10.0),
        HierarchicalLevel::Manager => (8.0, f64::INFINITY),
        HierarchicalLevel::Director => (12.0, f64::INFINITY),
        HierarchicalLevel::Executive => (15.0, f64::INFINITY),
    };
    if years < lo {
        let gap = lo - years;
        (1.0 - gap / 2.0).max(0.0)
    } else if hi.is_finite() && years > hi {
        let gap = years - hi;
        (1.0 - gap / 2.0).max(0.0)
    } else {
        1.0
    }
}

fn team_size_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)manage[sd]?\s+(?:a\s+)?team\s+of\s+(\d+)|reports?\s+to\s+(?:the\s+)?ceo|p&l\s+of\s+[€$]?\s*(\d+)\s*m").unwrap()
    })
}

/// Team-size / responsibility phrase signal (spec.md 4.2): scales with
/// the captured headcount, or fires at a fixed weight for a CEO-reporting
/// line / P&L phrase with no captured number.
pub fn team_size_signal(level: HierarchicalLevel, text: &str) -> f64 {
    let re = team_size_regex();
    let Some(caps) = re.captures(text) else {
        return 0.0;
    };
    let n: f64 = caps
        .iter()
        .skip(1)
        .find_map(|g| g.and_then(|m| m.as_str().parse::<f64>().ok()))
        .unwrap_or(0.0);

    let scaled = if n > 0.0 {
        (n / 30.0).min(1.0) * TEAM_SIZE_MAX_WEIGHT
    } else {
        TEAM_SIZE_MAX_WEIGHT * 0.6
    };

    match level {
        HierarchicalLevel::Manager if n <= 15.0 || n == 0.0 => scaled,
        HierarchicalLevel::Director if n > 15.0 => scaled,
        HierarchicalLevel::Executive if n > 50.0 => scaled,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn executive_title_pattern_matches_cfo() {
        assert!(title_signal(HierarchicalLevel::Executive, "CFO at Acme") > 0.0);
    }

    #[test]
    fn manager_title_pattern_does_not_match_senior_engineer() {
        assert_eq!(title_signal(HierarchicalLevel::Manager, "Senior Engineer"), 0.0);
    }

    #[test]
    fn years_band_signal_is_full_strength_inside_the_band() {
        assert_eq!(years_band_signal(HierarchicalLevel::Senior, 7.0), 1.0);
    }

    #[test]
    fn years_band_signal_tapers_just_outside_the_band() {
        let inside = years_band_signal(HierarchicalLevel::Junior, 4.5);
        let outside = years_band_signal(HierarchicalLevel::Junior, 5.5);
        assert!(outside < inside);
    }

    #[test]
    fn team_size_signal_scales_with_captured_headcount() {
        let small = team_size_signal(HierarchicalLevel::Manager, "manages a team of 5");
        let large = team_size_signal(HierarchicalLevel::Director, "manages a team of 25");
        assert!(small > 0.0);
        assert!(large > 0.0);
    }
}
