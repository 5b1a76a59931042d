//! Fielder chains
//!
//! A chain is the digit sequence describing who handled the ball, e.g. `643`,
//! `64(1)3`, `8(B)84(2)` or `5E3`. Digits are read left to right and never
//! reordered. A `(x)` group retires runner `x` and makes the fielder before it
//! the putout fielder; `E<n>` charges an error to fielder `n`.

use crate::notation::{Base, Position};
use crate::types::{Fielder, FielderRole};

/// Decomposed fielder chain
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Chain {
    pub fielders: Vec<Fielder>,
    /// Runners retired by `(x)` groups, in order
    pub outs: Vec<Base>,
    /// Fielders follow the last out/error group, so the batter is retired
    pub trailing: bool,
}

impl Chain {
    pub fn has_error(&self) -> bool {
        self.fielders.iter().any(|f| f.role == FielderRole::Error)
    }

    /// Position charged with the last error in the chain
    pub fn error_fielder(&self) -> Option<Position> {
        self.fielders
            .iter()
            .rev()
            .find(|f| f.role == FielderRole::Error)
            .map(|f| f.position)
    }
}

/// Parse a fielder chain. Returns `None` on any character outside the chain
/// grammar.
pub(crate) fn parse_fielder_chain(text: &str) -> Option<Chain> {
    let mut chain = Chain::default();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '1'..='9' => {
                let position = Position::from_digit(c)?;
                chain.fielders.push(Fielder::new(position, FielderRole::Assist));
                chain.trailing = true;
            }
            'E' => {
                let position = chars.next().and_then(Position::from_digit)?;
                chain.fielders.push(Fielder::new(position, FielderRole::Error));
                chain.trailing = false;
            }
            '(' => {
                let base = chars.next().and_then(Base::from_char)?;
                if !base.is_origin() || chars.next() != Some(')') {
                    return None;
                }
                mark_last_putout(&mut chain.fielders);
                chain.outs.push(base);
                chain.trailing = false;
            }
            _ => return None,
        }
    }

    if chain.trailing {
        mark_last_putout(&mut chain.fielders);
    }

    Some(chain)
}

/// Parse a chain whose fielders merely handled the ball (hits, fielder's
/// choice). Only plain digits are accepted.
pub(crate) fn parse_fielded(text: &str) -> Option<Vec<Fielder>> {
    text.chars()
        .map(|c| Position::from_digit(c).map(|p| Fielder::new(p, FielderRole::Fielded)))
        .collect()
}

fn mark_last_putout(fielders: &mut [Fielder]) {
    if let Some(last) = fielders.last_mut() {
        if last.role == FielderRole::Assist {
            last.role = FielderRole::Putout;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positions(chain: &Chain) -> Vec<u8> {
        chain.fielders.iter().map(|f| f.position.number()).collect()
    }

    fn roles(chain: &Chain) -> Vec<FielderRole> {
        chain.fielders.iter().map(|f| f.role).collect()
    }

    #[test]
    fn test_simple_chain_keeps_order() {
        let chain = parse_fielder_chain("643").unwrap();
        assert_eq!(positions(&chain), vec![6, 4, 3]);
        assert_eq!(
            roles(&chain),
            vec![FielderRole::Assist, FielderRole::Assist, FielderRole::Putout]
        );
        assert!(chain.trailing);
        assert!(chain.outs.is_empty());

        let reversed = parse_fielder_chain("346").unwrap();
        assert_eq!(positions(&reversed), vec![3, 4, 6]);
    }

    #[test]
    fn test_double_play_chain() {
        let chain = parse_fielder_chain("64(1)3").unwrap();
        assert_eq!(positions(&chain), vec![6, 4, 3]);
        assert_eq!(
            roles(&chain),
            vec![FielderRole::Assist, FielderRole::Putout, FielderRole::Putout]
        );
        assert_eq!(chain.outs, vec![Base::First]);
        assert!(chain.trailing);
    }

    #[test]
    fn test_force_without_batter_out() {
        let chain = parse_fielder_chain("54(1)").unwrap();
        assert_eq!(chain.outs, vec![Base::First]);
        assert!(!chain.trailing);
    }

    #[test]
    fn test_explicit_batter_out() {
        let chain = parse_fielder_chain("8(B)84(2)").unwrap();
        assert_eq!(chain.outs, vec![Base::Batter, Base::Second]);
        assert_eq!(positions(&chain), vec![8, 8, 4]);
    }

    #[test]
    fn test_error_in_chain() {
        let chain = parse_fielder_chain("5E3").unwrap();
        assert!(chain.has_error());
        assert_eq!(chain.error_fielder(), Some(Position::FirstBase));
        assert!(!chain.trailing);
        assert_eq!(chain.fielders[0].role, FielderRole::Assist);
    }

    #[test]
    fn test_malformed_chains() {
        assert!(parse_fielder_chain("6X3").is_none());
        assert!(parse_fielder_chain("60").is_none());
        assert!(parse_fielder_chain("6(H)3").is_none());
        assert!(parse_fielder_chain("6(1").is_none());
        assert!(parse_fielder_chain("E").is_none());
    }

    #[test]
    fn test_fielded() {
        let fielders = parse_fielded("78").unwrap();
        assert_eq!(fielders.len(), 2);
        assert!(fielders.iter().all(|f| f.role == FielderRole::Fielded));
        assert_eq!(parse_fielded("").unwrap(), vec![]);
        assert!(parse_fielded("7G").is_none());
    }
}
