//! Product codes and the sequence that hands them out.

use serde::Serialize;

use kiputech_core::ValueObject;

/// Human-facing product code (e.g. `P007`).
///
/// Stored trimmed, compared case-insensitively.
#[derive(Debug, Clone, Eq, Serialize)]
#[serde(transparent)]
pub struct ProductCode(String);

impl ProductCode {
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(raw.as_ref().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when `raw` names this code (trimmed, case-insensitive).
    pub fn matches(&self, raw: &str) -> bool {
        self.0.to_uppercase() == raw.trim().to_uppercase()
    }
}

impl PartialEq for ProductCode {
    fn eq(&self, other: &Self) -> bool {
        self.matches(&other.0)
    }
}

impl ValueObject for ProductCode {}

impl core::fmt::Display for ProductCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ProductCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

pub const DEFAULT_CODE_PREFIX: &str = "P";
pub const DEFAULT_CODE_WIDTH: usize = 3;

/// Monotonic generator for auto-assigned codes.
///
/// Owned by whoever owns the products (normally the inventory). Manual codes
/// are reported through [`CodeSequence::observe`] so the generator never hands
/// out a number that was already used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeSequence {
    prefix: String,
    width: usize,
    last: u64,
}

impl CodeSequence {
    pub fn new(prefix: impl Into<String>, width: usize) -> Self {
        Self {
            prefix: prefix.into(),
            width,
            last: 0,
        }
    }

    /// Last number handed out or observed.
    pub fn current(&self) -> u64 {
        self.last
    }

    /// Advance and return the next code (`P` + zero-padded number by default).
    pub fn next_code(&mut self) -> ProductCode {
        self.last = self.last.saturating_add(1);
        ProductCode(format!(
            "{}{:0width$}",
            self.prefix,
            self.last,
            width = self.width
        ))
    }

    /// Raise the floor to the number embedded in a manually supplied code.
    ///
    /// All ASCII digits in the code are concatenated (`A1-B2` counts as 12).
    /// Codes without digits, or whose digits overflow `u64`, are ignored.
    pub fn observe(&mut self, code: &str) {
        let digits: String = code.chars().filter(char::is_ascii_digit).collect();
        if digits.is_empty() {
            return;
        }
        if let Ok(n) = digits.parse::<u64>() {
            self.last = self.last.max(n);
        }
    }
}

impl Default for CodeSequence {
    fn default() -> Self {
        Self::new(DEFAULT_CODE_PREFIX, DEFAULT_CODE_WIDTH)
    }
}
