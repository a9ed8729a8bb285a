//! Repeat operators (`n`, `*`, `n*m`, ...) lowered to the combinator vocabulary.
//!
//! The target only has zero-or-more, one-or-more and optional, so bounded
//! repetitions are spelled out: `2*4x` becomes `seq(x, x, optional(x), optional(x))`.

use abnf_sitter_core::Rule;

/// Largest count accepted in a repeat operator.
pub const MAX_REPEAT_COUNT: u32 = 1024;

/// Largest expression one bounded repetition may expand into, in rule nodes.
/// Nested repetitions multiply, so the check runs on the expanded element.
pub const MAX_EXPANDED_NODES: usize = 1 << 16;

/// Bounds of a repeat operator, checked when expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepeatBounds {
    pub min: u32,
    /// `None` means unbounded.
    pub max: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepeatError {
    /// Upper bound below lower bound, e.g. `5*2`.
    Inverted { min: u32, max: u32 },
    /// No occurrence allowed: `0`, `*0`, `0*0`.
    Empty,
    /// A count that does not fit `MAX_REPEAT_COUNT`.
    TooLarge(String),
    /// The copies would exceed `MAX_EXPANDED_NODES`.
    Oversized { nodes: usize },
}

impl std::fmt::Display for RepeatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RepeatError::Inverted { min, max } => {
                write!(f, "lower bound {min} exceeds upper bound {max}")
            }
            RepeatError::Empty => write!(f, "no occurrence allowed"),
            RepeatError::TooLarge(count) => {
                write!(f, "count {count} exceeds {MAX_REPEAT_COUNT}")
            }
            RepeatError::Oversized { nodes } => {
                write!(
                    f,
                    "expansion needs {nodes} rule nodes, more than {MAX_EXPANDED_NODES}"
                )
            }
        }
    }
}

impl RepeatBounds {
    pub fn exactly(n: u32) -> Self {
        Self {
            min: n,
            max: Some(n),
        }
    }

    /// Parse the operator pieces: leading digits, `*` marker, trailing digits.
    ///
    /// Without `*` the leading digits are an exact count. With `*` the lower
    /// bound defaults to 0 and the upper bound to unbounded.
    pub fn parse(lower: Option<&str>, star: bool, upper: Option<&str>) -> Result<Self, RepeatError> {
        let lower = lower.map(parse_count).transpose()?;
        let upper = upper.map(parse_count).transpose()?;

        if !star {
            // `n` alone; a missing count only arises from malformed trees
            return Ok(Self::exactly(lower.unwrap_or(1)));
        }

        Ok(Self {
            min: lower.unwrap_or(0),
            max: upper,
        })
    }

    /// Lower `element` repeated within these bounds.
    pub fn expand(self, element: Rule) -> Result<Rule, RepeatError> {
        let copied = match self.max {
            None if self.min > 1 => self.min as usize + 1,
            None => 1,
            Some(max) => max as usize,
        };
        let nodes = element.node_count().saturating_mul(copied);
        if nodes > MAX_EXPANDED_NODES {
            return Err(RepeatError::Oversized { nodes });
        }

        match self.max {
            None => Ok(match self.min {
                0 => Rule::repeat(element),
                1 => Rule::repeat1(element),
                k => {
                    let mut members = copies(&element, k);
                    members.push(Rule::repeat(element));
                    Rule::seq(members)
                }
            }),
            Some(max) if max < self.min => Err(RepeatError::Inverted { min: self.min, max }),
            Some(0) => Err(RepeatError::Empty),
            Some(max) => {
                let mut members = copies(&element, self.min);
                let optional = Rule::optional(element);
                members.extend(copies(&optional, max - self.min));
                Ok(Rule::seq(members))
            }
        }
    }
}

fn parse_count(digits: &str) -> Result<u32, RepeatError> {
    match digits.parse::<u32>() {
        Ok(n) if n <= MAX_REPEAT_COUNT => Ok(n),
        _ => Err(RepeatError::TooLarge(digits.to_string())),
    }
}

fn copies(rule: &Rule, count: u32) -> Vec<Rule> {
    (0..count).map(|_| rule.clone()).collect()
}
