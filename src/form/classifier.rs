use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::form::field::Field;

/// Semantic purpose of a form field.
///
/// Variant order is the order manual rules are applied in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Email,
    FullName,
    FirstName,
    LastName,
    Name,
    Company,
    Phone,
    None,
}

impl Category {
    /// Categories the name-pair resolver accepts as a full-name target.
    pub fn accepts_full_name(self) -> bool {
        matches!(self, Category::FullName | Category::Name | Category::FirstName)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Email => "email",
            Category::FullName => "fullName",
            Category::FirstName => "firstName",
            Category::LastName => "lastName",
            Category::Name => "name",
            Category::Company => "company",
            Category::Phone => "phone",
            Category::None => "none",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const EMAIL_TOKENS: &str = r"e-?mail|메일|업무\s?메일";
const FULL_NAME_TOKENS: &str = r"full-?name|성함";
const LAST_NAME_TOKENS: &str = r"last-?name|lname|성";
const FIRST_NAME_TOKENS: &str = r"first-?name|fname|이름";
const NAME_TOKENS: &str = r"name|이름";
const COMPANY_TOKENS: &str = r"company|organization|기업|회사명?";
const PHONE_TOKENS: &str = r"phone|mobile|tel|전화";

/// One step of the priority chain: `pattern` must match and `unless` must not.
struct Rule {
    pattern: Regex,
    unless: Option<Regex>,
    category: Category,
}

impl Rule {
    fn new(pattern: &str, unless: Option<&str>, category: Category) -> Self {
        Self {
            pattern: Regex::new(pattern).expect("static regex must compile"),
            unless: unless.map(|u| Regex::new(u).expect("static regex must compile")),
            category,
        }
    }

    fn matches(&self, signature: &str) -> bool {
        self.pattern.is_match(signature)
            && !self.unless.as_ref().is_some_and(|u| u.is_match(signature))
    }
}

/// First match wins. A signature carrying both first- and last-name tokens
/// falls through to the generic `name` rule.
static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        Rule::new(EMAIL_TOKENS, None, Category::Email),
        Rule::new(FULL_NAME_TOKENS, None, Category::FullName),
        Rule::new(LAST_NAME_TOKENS, Some(FIRST_NAME_TOKENS), Category::LastName),
        Rule::new(FIRST_NAME_TOKENS, Some(LAST_NAME_TOKENS), Category::FirstName),
        Rule::new(NAME_TOKENS, None, Category::Name),
        Rule::new(COMPANY_TOKENS, None, Category::Company),
        Rule::new(PHONE_TOKENS, None, Category::Phone),
    ]
});

/// Classify a lowercased attribute signature.
pub fn classify_signature(signature: &str) -> Category {
    RULES
        .iter()
        .find(|rule| rule.matches(signature))
        .map(|rule| rule.category)
        .unwrap_or(Category::None)
}

/// Classify a field from its `id`, `name`, `placeholder` and `aria-label`.
pub fn classify(field: &Field) -> Category {
    classify_signature(&field.signature())
}
