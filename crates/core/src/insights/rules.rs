//! Value-engineering policy table
//!
//! Each rule pairs description keywords with a suggestion and a bounded
//! savings range, expressed as percentages of the matched item's total cost.
//! The percentages are business policy, not derived values; review them with
//! the quantity-surveying team before changing.

/// One value-engineering rule.
#[derive(Debug, Clone, Copy)]
pub struct VeRule {
    /// Lower-cased substrings matched against the item description.
    pub keywords: &'static [&'static str],
    /// Work category label used in the generated insight title.
    pub category: &'static str,
    pub suggestion: &'static str,
    pub savings_min_pct: f64,
    pub savings_max_pct: f64,
}

/// Keyword-ordered rule table; the first matching rule wins.
pub const VE_RULES: &[VeRule] = &[
    VeRule {
        keywords: &["concrete", "cement", "rcc"],
        category: "Concrete works",
        suggestion: "Review the mix design and evaluate fly-ash or GGBS substitution \
                     for non-structural pours",
        savings_min_pct: 5.0,
        savings_max_pct: 12.0,
    },
    VeRule {
        keywords: &["steel", "rebar", "reinforcement"],
        category: "Reinforcement",
        suggestion: "Rationalize bar diameters and evaluate mechanical couplers over \
                     lap splices",
        savings_min_pct: 4.0,
        savings_max_pct: 10.0,
    },
    VeRule {
        keywords: &["brick", "block", "masonry"],
        category: "Masonry",
        suggestion: "Consider AAC blocks or an alternative walling system for \
                     non-loadbearing walls",
        savings_min_pct: 6.0,
        savings_max_pct: 15.0,
    },
    VeRule {
        keywords: &["excavation", "earthwork", "backfill"],
        category: "Earthworks",
        suggestion: "Re-balance cut and fill volumes and review haul distances",
        savings_min_pct: 5.0,
        savings_max_pct: 12.0,
    },
    VeRule {
        keywords: &["formwork", "shuttering"],
        category: "Formwork",
        suggestion: "Increase formwork reuse cycles with a modular system",
        savings_min_pct: 5.0,
        savings_max_pct: 10.0,
    },
    VeRule {
        keywords: &["tile", "paint", "plaster", "finish"],
        category: "Finishes",
        suggestion: "Re-specify finish grades in back-of-house and non-public areas",
        savings_min_pct: 8.0,
        savings_max_pct: 20.0,
    },
];

/// Find the first rule whose keyword list matches `description`.
pub fn match_rule(description: &str) -> Option<&'static VeRule> {
    let lowered = description.to_lowercase();
    VE_RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|keyword| lowered.contains(keyword)))
}
