use std::sync::OnceLock;

pub const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
pub const DIGITS: &str = "0123456789";

/// ASCII punctuation used by the derivation table. Every derived password
/// depends on this order.
pub const SYMBOLS: &str = "!@#$%^&*()-_=+[]{}|;:'\",.<>/?`~";

/// Non-ASCII block appended to the derivation table.
pub const EXTENDED: &str = "§±×÷√∞≠≈€£¥₿©®™µΩπδλΣΦΨΞ";

/// Symbols accepted by common account password policies. Random passwords
/// draw their special characters from here only.
pub const RESTRICTED_SYMBOLS: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?/~";

static CHARACTER_TABLE: OnceLock<Vec<char>> = OnceLock::new();
static RESTRICTED_TABLE: OnceLock<Vec<u8>> = OnceLock::new();

/// The 117-entry table the deriver maps KDF bytes through.
pub fn character_table() -> &'static [char] {
    CHARACTER_TABLE.get_or_init(|| {
        [UPPERCASE, LOWERCASE, DIGITS, SYMBOLS, EXTENDED]
            .iter()
            .flat_map(|part| part.chars())
            .collect()
    })
}

/// The 90-entry ASCII table used by the random generator, in class order.
pub fn restricted_table() -> &'static [u8] {
    RESTRICTED_TABLE.get_or_init(|| {
        restricted_classes()
            .iter()
            .flat_map(|class| class.iter().copied())
            .collect()
    })
}

/// Uppercase, lowercase, digit and special subsequences of the restricted
/// table. A random password takes at least one character from each.
pub const fn restricted_classes() -> [&'static [u8]; 4] {
    [
        UPPERCASE.as_bytes(),
        LOWERCASE.as_bytes(),
        DIGITS.as_bytes(),
        RESTRICTED_SYMBOLS.as_bytes(),
    ]
}

/// Character classes recognized by the strength estimator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharClass {
    Uppercase,
    Lowercase,
    Digit,
    /// Any ASCII punctuation.
    Special,
    /// Anything else, including the extended symbol block.
    Extended,
}

impl CharClass {
    pub const ALL: [Self; 5] = [
        Self::Uppercase,
        Self::Lowercase,
        Self::Digit,
        Self::Special,
        Self::Extended,
    ];

    pub fn of(c: char) -> Self {
        if c.is_ascii_uppercase() {
            Self::Uppercase
        } else if c.is_ascii_lowercase() {
            Self::Lowercase
        } else if c.is_ascii_digit() {
            Self::Digit
        } else if c.is_ascii_punctuation() {
            Self::Special
        } else {
            Self::Extended
        }
    }

    /// Number of symbols an attacker has to consider for this class.
    pub const fn size(self) -> usize {
        match self {
            Self::Uppercase | Self::Lowercase => 26,
            Self::Digit => 10,
            Self::Special => 32,
            Self::Extended => 24,
        }
    }

    const fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// Set of [`CharClass`] values seen in a string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassSet(u8);

impl ClassSet {
    pub fn of(s: &str) -> Self {
        s.chars().fold(Self::default(), |set, c| set.with(CharClass::of(c)))
    }

    pub const fn with(self, class: CharClass) -> Self {
        Self(self.0 | class.bit())
    }

    pub const fn contains(self, class: CharClass) -> bool {
        self.0 & class.bit() != 0
    }

    /// Sum of the sizes of the classes present.
    pub fn alphabet_size(self) -> usize {
        CharClass::ALL
            .iter()
            .filter(|class| self.contains(**class))
            .map(|class| class.size())
            .sum()
    }
}
