//! WBS code hierarchy derivation
//!
//! Item codes are dotted strings (`"1.2.3"`). Depth and parentage are pure
//! string operations over the code; segments are not interpreted numerically,
//! so codes like `"A.1"` work unchanged.

/// 1-based hierarchy depth of a dotted item code.
///
/// A code with no dots is level 1. Blank input also maps to level 1 so the
/// derivation never fails.
pub fn level(code: &str) -> u32 {
    let trimmed = code.trim();
    if trimmed.is_empty() {
        return 1;
    }
    trimmed.split('.').count() as u32
}

/// The code with its final segment removed, or `None` for a root code.
pub fn parent_code(code: &str) -> Option<String> {
    code.trim().rsplit_once('.').map(|(parent, _)| parent.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_counts_dot_segments() {
        assert_eq!(level("7"), 1);
        assert_eq!(level("1.2"), 2);
        assert_eq!(level("1.2.3"), 3);
        assert_eq!(level("A.1"), 2);
    }

    #[test]
    fn level_of_blank_input_is_one() {
        assert_eq!(level(""), 1);
        assert_eq!(level("   "), 1);
    }

    #[test]
    fn parent_drops_the_last_segment() {
        assert_eq!(parent_code("1.2.3").as_deref(), Some("1.2"));
        assert_eq!(parent_code("1.2").as_deref(), Some("1"));
        assert_eq!(parent_code("A.1.b").as_deref(), Some("A.1"));
    }

    #[test]
    fn root_codes_have_no_parent() {
        assert_eq!(parent_code("7"), None);
        assert_eq!(parent_code(""), None);
    }

    #[test]
    fn level_and_parent_agree() {
        for code in ["4", "4.1", "4.1.9", "A.B.C.D"] {
            match parent_code(code) {
                None => assert_eq!(level(code), 1),
                Some(parent) => assert_eq!(level(code), level(&parent) + 1),
            }
        }
    }
}
