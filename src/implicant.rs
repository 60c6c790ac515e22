//! Implicants: product terms over `n` ordered variables.
//!
//! Each position holds `0`, `1` or `-` (don't care). Position `i` corresponds
//! to the `i`-th variable and to bit `n-1-i` of a row index, so the first
//! variable is the most significant bit.

use std::fmt::{Debug, Display, Formatter};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Trit {
    Zero,
    One,
    DontCare,
}

impl Trit {
    pub fn from_bit(bit: bool) -> Self {
        if bit {
            Trit::One
        } else {
            Trit::Zero
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Trit::Zero => '0',
            Trit::One => '1',
            Trit::DontCare => '-',
        }
    }

    pub fn is_literal(self) -> bool {
        self != Trit::DontCare
    }
}

#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Implicant(Vec<Trit>);

// Constructors
impl Implicant {
    /// The fully specified implicant of row `index` over `n` variables.
    pub fn from_index(index: u64, n: usize) -> Self {
        assert!(n < 64, "At most 63 variables are supported");
        Self((0..n).map(|i| Trit::from_bit((index >> (n - 1 - i)) & 1 == 1)).collect())
    }

    pub fn from_trits(trits: Vec<Trit>) -> Self {
        Self(trits)
    }
}

// Getters
impl Implicant {
    pub fn trits(&self) -> &[Trit] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of `1` positions.
    pub fn ones(&self) -> usize {
        self.0.iter().filter(|&&t| t == Trit::One).count()
    }

    /// Number of positions that produce a literal.
    pub fn literal_count(&self) -> usize {
        self.0.iter().filter(|t| t.is_literal()).count()
    }

    /// True when every position is don't care (the constant-one cube).
    pub fn is_universal(&self) -> bool {
        self.literal_count() == 0
    }
}

impl Implicant {
    /// Merges two implicants differing in exactly one position, which becomes don't care.
    ///
    /// Positions where one side has `-` and the other a literal count as a difference,
    /// so only implicants with identical don't-care masks ever merge.
    pub fn merge(&self, other: &Self) -> Option<Self> {
        assert_eq!(self.len(), other.len(), "Implicant width mismatch");
        let mut diff = None;
        for (i, (a, b)) in self.0.iter().zip(other.0.iter()).enumerate() {
            if a != b {
                if diff.is_some() || !a.is_literal() || !b.is_literal() {
                    return None;
                }
                diff = Some(i);
            }
        }
        let i = diff?;
        let mut merged = self.0.clone();
        merged[i] = Trit::DontCare;
        Some(Self(merged))
    }

    /// Checks whether row `index` lies inside this implicant.
    pub fn covers(&self, index: u64) -> bool {
        let n = self.len();
        self.0.iter().enumerate().all(|(i, &t)| match t {
            Trit::DontCare => true,
            t => t == Trit::from_bit((index >> (n - 1 - i)) & 1 == 1),
        })
    }

    /// Row indices covered by this implicant, in ascending order.
    pub fn indices(&self) -> Vec<u64> {
        let n = self.len();
        let mut result = vec![0u64];
        for (i, t) in self.0.iter().enumerate() {
            let weight = 1u64 << (n - 1 - i);
            match t {
                Trit::Zero => {}
                Trit::One => result.iter_mut().for_each(|x| *x |= weight),
                Trit::DontCare => {
                    let with_one: Vec<u64> = result.iter().map(|x| x | weight).collect();
                    result.extend(with_one);
                }
            }
        }
        result.sort_unstable();
        result
    }
}

impl Display for Implicant {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for t in self.0.iter() {
            write!(f, "{}", t.to_char())?;
        }
        Ok(())
    }
}

impl Debug for Implicant {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    fn imp(s: &str) -> Implicant {
        Implicant::from_trits(
            s.chars()
                .map(|c| match c {
                    '0' => Trit::Zero,
                    '1' => Trit::One,
                    _ => Trit::DontCare,
                })
                .collect(),
        )
    }

    #[test]
    fn test_from_index_msb_first() {
        assert_eq!(Implicant::from_index(0b011, 3).to_string(), "011");
        assert_eq!(Implicant::from_index(4, 3).to_string(), "100");
        assert_eq!(Implicant::from_index(1, 1).to_string(), "1");
    }

    #[test]
    fn test_merge() {
        assert_eq!(imp("010").merge(&imp("011")), Some(imp("01-")));
        assert_eq!(imp("01-").merge(&imp("11-")), Some(imp("-1-")));
        assert_eq!(imp("010").merge(&imp("001")), None);
        assert_eq!(imp("01-").merge(&imp("010")), None);
        assert_eq!(imp("010").merge(&imp("010")), None);
    }

    #[test]
    fn test_covers() {
        let c = imp("-10");
        assert!(c.covers(0b010));
        assert!(c.covers(0b110));
        assert!(!c.covers(0b011));
        assert!(imp("---").covers(5));
    }

    #[test]
    fn test_indices() {
        assert_eq!(imp("-1-").indices(), vec![2, 3, 6, 7]);
        assert_eq!(imp("101").indices(), vec![5]);
        assert!(imp("--").is_universal());
    }
}
