use std::fmt;

use crate::charset::ClassSet;

/// Bits per score step. A score of 8 is reached at 512 bits.
const BITS_PER_SCORE: u32 = 64;
pub const MAX_SCORE: u8 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StrengthLabel {
    Weak,
    Fair,
    Good,
    Strong,
    VeryStrong,
    Excellent,
    Maximum,
    Insane,
}

impl StrengthLabel {
    /// Upper bounds (exclusive) in entropy bits, ascending.
    const THRESHOLDS: [(u32, Self); 7] = [
        (64, Self::Weak),
        (98, Self::Fair),
        (128, Self::Good),
        (192, Self::Strong),
        (256, Self::VeryStrong),
        (384, Self::Excellent),
        (512, Self::Maximum),
    ];

    pub fn from_entropy_bits(bits: u32) -> Self {
        Self::THRESHOLDS
            .iter()
            .find(|(limit, _)| bits < *limit)
            .map_or(Self::Insane, |(_, label)| *label)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Weak => "Weak",
            Self::Fair => "Fair",
            Self::Good => "Good",
            Self::Strong => "Strong",
            Self::VeryStrong => "Very Strong",
            Self::Excellent => "Excellent",
            Self::Maximum => "Maximum",
            Self::Insane => "INSANE",
        }
    }
}

impl fmt::Display for StrengthLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrengthAssessment {
    /// `0..=MAX_SCORE`, one step per 64 bits.
    pub score: u8,
    pub label: StrengthLabel,
    pub entropy_bits: u32,
}

/// Scores `password` by the size of the character classes it draws from.
///
/// Entropy is `floor(chars * log2(A))` where `A` is the summed size of the
/// classes present. The estimate assumes uniform choice within those classes,
/// so it is an upper bound for human-chosen passwords.
pub fn estimate_strength(password: &str) -> StrengthAssessment {
    let alphabet = ClassSet::of(password).alphabet_size();
    let length = password.chars().count();

    let entropy_bits = if alphabet == 0 {
        0
    } else {
        (length as f64 * (alphabet as f64).log2()).floor() as u32
    };

    StrengthAssessment {
        score: (entropy_bits / BITS_PER_SCORE).min(u32::from(MAX_SCORE)) as u8,
        label: StrengthLabel::from_entropy_bits(entropy_bits),
        entropy_bits,
    }
}
