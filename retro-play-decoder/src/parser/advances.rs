//! Advance clauses (`2-H`, `1X3(E5)`, `3-H(NR)(UR)`, `BX2(8E4)`)

use super::fielders::parse_fielder_chain;
use crate::notation::Base;
use crate::types::Advance;

/// Explicit RBI annotation on a clause
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RbiMark {
    Unmarked,
    Credited,
    NotCredited,
}

/// Annotations that carry no information for narration
const IGNORED_ANNOTATIONS: &[&str] = &["WP", "PB", "TH", "INT", "AP", "OBS", "BR"];

/// Parse one advance clause. `rbi_credited` is left false; it depends on the
/// whole play and is settled once the event is assembled.
pub(crate) fn parse_advance(clause: &str) -> Option<(Advance, RbiMark)> {
    let mut chars = clause.chars();
    let from_base = chars.next().and_then(Base::from_char).filter(|b| b.is_origin())?;
    let thrown_out = match chars.next()? {
        '-' => false,
        'X' => true,
        _ => return None,
    };
    let to_base = chars.next().and_then(Base::from_char).filter(|b| b.is_destination())?;

    let mut advance = Advance {
        from_base,
        to_base,
        is_out: false,
        is_error: false,
        rbi_credited: false,
        unearned: false,
        fielders: Vec::new(),
        error_fielder: None,
    };
    let mut rbi = RbiMark::Unmarked;

    for group in annotation_groups(chars.as_str())? {
        // "(E9/TH)" describes the error; the throw part adds nothing
        let annotation = group.split('/').next().unwrap_or_default();
        match annotation {
            "NR" | "NORBI" => rbi = RbiMark::NotCredited,
            "RBI" => rbi = RbiMark::Credited,
            "UR" | "TUR" => advance.unearned = true,
            a if IGNORED_ANNOTATIONS.contains(&a) || a.starts_with("TH") => {}
            a => {
                // Unrecognized annotations are skipped
                if let Some(chain) = parse_fielder_chain(a) {
                    if let Some(position) = chain.error_fielder() {
                        advance.is_error = true;
                        advance.error_fielder = Some(position);
                    }
                    advance.fielders.extend(chain.fielders);
                }
            }
        }
    }

    // An error on the throw negates the out
    advance.is_out = thrown_out && !advance.is_error;

    Some((advance, rbi))
}

/// Split `(a)(b)(c)` into its group contents. Text outside parentheses makes
/// the clause malformed.
fn annotation_groups(text: &str) -> Option<Vec<&str>> {
    let mut groups = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        let inner = rest.strip_prefix('(')?;
        let close = inner.find(')')?;
        groups.push(&inner[..close]);
        rest = &inner[close + 1..];
    }
    Some(groups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notation::Position;
    use crate::types::FielderRole;

    #[test]
    fn test_safe_advance() {
        let (advance, rbi) = parse_advance("2-H").unwrap();
        assert_eq!(advance.from_base, Base::Second);
        assert_eq!(advance.to_base, Base::Home);
        assert!(!advance.is_out);
        assert!(advance.scores());
        assert_eq!(rbi, RbiMark::Unmarked);
    }

    #[test]
    fn test_out_with_putout_chain() {
        let (advance, _) = parse_advance("3XH(25)").unwrap();
        assert!(advance.is_out);
        assert_eq!(advance.fielders.len(), 2);
        assert_eq!(advance.fielders[1].role, FielderRole::Putout);
    }

    #[test]
    fn test_error_negates_out() {
        let (advance, _) = parse_advance("1X3(E5)").unwrap();
        assert!(!advance.is_out);
        assert!(advance.is_error);
        assert_eq!(advance.error_fielder, Some(Position::ThirdBase));

        let (advance, _) = parse_advance("BX2(8E4)").unwrap();
        assert!(!advance.is_out);
        assert_eq!(advance.error_fielder, Some(Position::SecondBase));
    }

    #[test]
    fn test_annotations() {
        let (advance, rbi) = parse_advance("3-H(NR)(UR)").unwrap();
        assert!(advance.unearned);
        assert_eq!(rbi, RbiMark::NotCredited);

        let (_, rbi) = parse_advance("3-H(RBI)").unwrap();
        assert_eq!(rbi, RbiMark::Credited);

        let (advance, _) = parse_advance("1-3(E9/TH)").unwrap();
        assert!(advance.is_error);
        assert_eq!(advance.error_fielder, Some(Position::RightField));

        let (advance, _) = parse_advance("2-3(WP)").unwrap();
        assert!(!advance.is_error);
    }

    #[test]
    fn test_malformed_clauses() {
        assert!(parse_advance("H-1").is_none());
        assert!(parse_advance("1-B").is_none());
        assert!(parse_advance("1/2").is_none());
        assert!(parse_advance("1-2junk").is_none());
        assert!(parse_advance("1-2(E5").is_none());
        assert!(parse_advance("").is_none());
    }
}
