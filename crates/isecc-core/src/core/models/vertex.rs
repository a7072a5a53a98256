//! Decoding of vertex-group codes.
//!
//! Vertex groups are written by subparticle extraction as fixed-width codes, and the offsets
//! below are positional rather than delimiter based:
//!
//! ```text
//! pentavalent:  5f01
//!                 ^^      [2..4]   five-fold general code
//!
//! hexavalent:   5f01a.3f01a.2f01a
//!                 ^^^               [2..4] five-fold general,  [4]  five-fold specific
//!                       ^^^         [8..10] three-fold general, [10] three-fold specific
//!                             ^^^   [14..16] two-fold general,  [16] two-fold specific
//! ```

use std::fmt;
use std::ops::Range;
use thiserror::Error;

const FIVE_FOLD_GENERAL: Range<usize> = 2..4;
const FIVE_FOLD_SPECIFIC: usize = 4;
const THREE_FOLD_GENERAL: Range<usize> = 8..10;
const THREE_FOLD_SPECIFIC: usize = 10;
const TWO_FOLD_GENERAL: Range<usize> = 14..16;
const TWO_FOLD_SPECIFIC: usize = 16;

const PENTAVALENT_MIN_LEN: usize = FIVE_FOLD_GENERAL.end;
const HEXAVALENT_MIN_LEN: usize = TWO_FOLD_SPECIFIC + 1;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VertexDecodeError {
    #[error("Vertex code '{code}' is too short (expected at least {required} characters)")]
    TooShort { code: String, required: usize },
    #[error("Invalid {tier} general code '{value}' in vertex code '{code}'")]
    InvalidGeneral {
        code: String,
        tier: &'static str,
        value: String,
    },
    #[error("Invalid {tier} specific code at position {position} in vertex code '{code}'")]
    InvalidSpecific {
        code: String,
        tier: &'static str,
        position: usize,
    },
}

/// One symmetry tier of a vertex assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexTier {
    pub general: u32,
    pub specific: Option<char>,
}

/// Five-fold, three-fold and two-fold vertex identifiers of a capsomer.
///
/// Pentavalent capsomers sit on a five-fold vertex and only carry its general code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexAssignment {
    pub five_fold: VertexTier,
    pub three_fold: Option<VertexTier>,
    pub two_fold: Option<VertexTier>,
}

impl fmt::Display for VertexTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.general)?;
        if let Some(letter) = self.specific {
            write!(f, "{}", letter)?;
        }
        Ok(())
    }
}

pub fn decode_pentavalent(code: &str) -> Result<VertexAssignment, VertexDecodeError> {
    require_len(code, PENTAVALENT_MIN_LEN)?;
    Ok(VertexAssignment {
        five_fold: VertexTier {
            general: general_code(code, FIVE_FOLD_GENERAL, "five-fold")?,
            specific: None,
        },
        three_fold: None,
        two_fold: None,
    })
}

pub fn decode_hexavalent(code: &str) -> Result<VertexAssignment, VertexDecodeError> {
    require_len(code, HEXAVALENT_MIN_LEN)?;
    Ok(VertexAssignment {
        five_fold: tier(code, FIVE_FOLD_GENERAL, FIVE_FOLD_SPECIFIC, "five-fold")?,
        three_fold: Some(tier(code, THREE_FOLD_GENERAL, THREE_FOLD_SPECIFIC, "three-fold")?),
        two_fold: Some(tier(code, TWO_FOLD_GENERAL, TWO_FOLD_SPECIFIC, "two-fold")?),
    })
}

fn require_len(code: &str, required: usize) -> Result<(), VertexDecodeError> {
    if code.len() < required {
        return Err(VertexDecodeError::TooShort {
            code: code.to_string(),
            required,
        });
    }
    Ok(())
}

fn tier(
    code: &str,
    general: Range<usize>,
    specific: usize,
    name: &'static str,
) -> Result<VertexTier, VertexDecodeError> {
    Ok(VertexTier {
        general: general_code(code, general, name)?,
        specific: Some(specific_code(code, specific, name)?),
    })
}

fn general_code(
    code: &str,
    range: Range<usize>,
    tier: &'static str,
) -> Result<u32, VertexDecodeError> {
    let invalid = |value: &str| VertexDecodeError::InvalidGeneral {
        code: code.to_string(),
        tier,
        value: value.to_string(),
    };
    let slice = code.get(range).ok_or_else(|| invalid(""))?;
    slice.parse().map_err(|_| invalid(slice))
}

fn specific_code(
    code: &str,
    position: usize,
    tier: &'static str,
) -> Result<char, VertexDecodeError> {
    code.get(position..position + 1)
        .and_then(|s| s.chars().next())
        .ok_or_else(|| VertexDecodeError::InvalidSpecific {
            code: code.to_string(),
            tier,
            position,
        })
}
