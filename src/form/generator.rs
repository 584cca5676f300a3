use rand::rngs::ThreadRng;
use rand::Rng;

use crate::form::field::Field;

const FIRST_NAMES: &[&str] = &[
    "민준", "서준", "도윤", "예준", "시우", "하준", "주원", "지호", "지후", "준서", "서연", "서윤",
    "지우", "서현", "하윤", "민서", "지유", "윤서", "채원", "수아",
];

const LAST_NAMES: &[&str] = &["김", "이", "박", "최", "정", "강", "조", "윤", "장", "임"];

const COMPANIES: &[&str] = &["삼송", "현다이", "네버", "카카우", "쿠폰"];

const EMAIL_DOMAINS: &[&str] = &[
    "gmale.com",
    "never.com",
    "cacao.com",
    "hammail.net",
    "late.com",
];

const EMAIL_LOCAL_PART_LEN: usize = 10;
const EMAIL_LOCAL_PART_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

const PHONE_HYPHEN: &str = "010-0000-0000";
const PHONE_DIGITS: &str = "01000000000";

/// `maxlength` below this means the hyphenated number would not fit.
const HYPHENATED_PHONE_LEN: i64 = 13;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PhoneFormat {
    #[default]
    Hyphen,
    Digits,
}

impl PhoneFormat {
    /// Infer whether a field expects a separator-free number.
    pub fn for_field(field: &Field) -> Self {
        let digit_pattern = field.pattern.as_deref().is_some_and(|p| {
            (p.contains(r"\d") || p.contains("[0-9]")) && !p.contains('-')
        });
        let short = field
            .max_length
            .as_deref()
            .and_then(parse_leading_int)
            .is_some_and(|len| len < HYPHENATED_PHONE_LEN);

        if digit_pattern || short {
            PhoneFormat::Digits
        } else {
            PhoneFormat::Hyphen
        }
    }
}

/// Kind of synthetic value to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Email,
    FirstName,
    LastName,
    FullName,
    Company,
    Phone(PhoneFormat),
}

/// Produces synthetic placeholder values from the fixed tables.
pub struct ValueGenerator<R = ThreadRng> {
    rng: R,
}

impl ValueGenerator<ThreadRng> {
    pub fn new() -> Self {
        Self { rng: rand::rng() }
    }
}

impl Default for ValueGenerator<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> ValueGenerator<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    pub fn generate(&mut self, kind: ValueKind) -> String {
        match kind {
            ValueKind::Email => self.email(),
            ValueKind::FirstName => self.first_name(),
            ValueKind::LastName => self.last_name(),
            ValueKind::FullName => self.full_name(),
            ValueKind::Company => self.company(),
            ValueKind::Phone(format) => phone(format).to_string(),
        }
    }

    pub fn email(&mut self) -> String {
        let local: String = (0..EMAIL_LOCAL_PART_LEN)
            .map(|_| {
                let i = self.rng.random_range(0..EMAIL_LOCAL_PART_CHARS.len());
                EMAIL_LOCAL_PART_CHARS[i] as char
            })
            .collect();
        format!("{local}@{}", self.pick(EMAIL_DOMAINS))
    }

    pub fn first_name(&mut self) -> String {
        self.pick(FIRST_NAMES).to_string()
    }

    pub fn last_name(&mut self) -> String {
        self.pick(LAST_NAMES).to_string()
    }

    /// Family name first, no separator.
    pub fn full_name(&mut self) -> String {
        let last = self.pick(LAST_NAMES);
        let first = self.pick(FIRST_NAMES);
        format!("{last}{first}")
    }

    pub fn company(&mut self) -> String {
        self.pick(COMPANIES).to_string()
    }

    fn pick(&mut self, items: &'static [&'static str]) -> &'static str {
        items[self.rng.random_range(0..items.len())]
    }
}

/// The fixed placeholder number in the requested format.
pub fn phone(format: PhoneFormat) -> &'static str {
    match format {
        PhoneFormat::Hyphen => PHONE_HYPHEN,
        PhoneFormat::Digits => PHONE_DIGITS,
    }
}

pub fn first_names() -> &'static [&'static str] {
    FIRST_NAMES
}

pub fn last_names() -> &'static [&'static str] {
    LAST_NAMES
}

pub fn companies() -> &'static [&'static str] {
    COMPANIES
}

pub fn email_domains() -> &'static [&'static str] {
    EMAIL_DOMAINS
}

/// Leading integer of an attribute value, ignoring surrounding whitespace
/// and anything after the digits (`"11abc"` is 11, `"abc"` is `None`).
fn parse_leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (sign, rest) = match s.as_bytes().first() {
        Some(b'-') => (-1, &s[1..]),
        Some(b'+') => (1, &s[1..]),
        _ => (1, s),
    };
    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..digits_end];
    if digits.is_empty() {
        return None;
    }
    // Only overflow can fail past this point; saturate like a float would.
    let n = digits.parse::<i64>().unwrap_or(i64::MAX);
    Some(sign * n)
}
