use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::Serialize;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GateType {
    And,
    Or,
    Not,
    Nand,
    Nor,
    Xor,
    Xnor,
}

impl GateType {
    pub const ALL: [GateType; 7] = [
        GateType::And,
        GateType::Or,
        GateType::Not,
        GateType::Nand,
        GateType::Nor,
        GateType::Xor,
        GateType::Xnor,
    ];
}

// Getters
impl GateType {
    /// Number of inputs the gate expects.
    pub const fn arity(self) -> usize {
        match self {
            GateType::Not => 1,
            _ => 2,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            GateType::And => "AND",
            GateType::Or => "OR",
            GateType::Not => "NOT",
            GateType::Nand => "NAND",
            GateType::Nor => "NOR",
            GateType::Xor => "XOR",
            GateType::Xnor => "XNOR",
        }
    }
}

impl GateType {
    /// Applies the gate truth function to the given inputs.
    ///
    /// Binary gates are applied n-ary style over all inputs.
    /// `NOT` looks at its first input only; with no input it sees 0.
    pub fn apply(self, inputs: &[bool]) -> bool {
        let ones = inputs.iter().filter(|&&b| b).count();
        match self {
            GateType::And => ones == inputs.len(),
            GateType::Or => ones > 0,
            GateType::Not => !inputs.first().copied().unwrap_or(false),
            GateType::Nand => ones != inputs.len(),
            GateType::Nor => ones == 0,
            GateType::Xor => ones % 2 == 1,
            GateType::Xnor => ones % 2 == 0,
        }
    }
}

impl Display for GateType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for GateType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        GateType::ALL
            .into_iter()
            .find(|g| g.name() == upper)
            .ok_or_else(|| format!("unknown gate type '{}'", s))
    }
}
