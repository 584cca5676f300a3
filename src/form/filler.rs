use rand::rngs::ThreadRng;
use rand::Rng;
use serde::Serialize;

use crate::form::classifier::{classify, Category};
use crate::form::document::{FieldEvent, FormDocument};
use crate::form::field::{enumerate_candidates, Field, FieldHandle};
use crate::form::generator::{PhoneFormat, ValueGenerator, ValueKind};
use crate::settings::{FillMode, FillSettings};

/// A single write performed during a fill run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilledField {
    pub handle: FieldHandle,
    pub category: Category,
    pub value: String,
}

/// Outcome of one fill run, in the order the writes happened.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FillReport {
    pub filled: Vec<FilledField>,
}

impl FillReport {
    pub fn len(&self) -> usize {
        self.filled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filled.is_empty()
    }

    pub fn get(&self, handle: FieldHandle) -> Option<&FilledField> {
        self.filled.iter().find(|f| f.handle == handle)
    }
}

/// A field chosen by a pass, identified by its position in the candidate list.
#[derive(Debug, Clone, Copy)]
struct Target {
    position: usize,
    category: Category,
    kind: ValueKind,
}

/// One field-selection step of a run. Each pass sees the writes of the
/// passes before it.
#[derive(Debug)]
enum Pass<'a> {
    NamePair,
    Sweep,
    Rule { category: Category, text: &'a str },
}

impl Pass<'_> {
    fn select(&self, fields: &[Field]) -> Vec<Target> {
        match self {
            Pass::NamePair => resolve_name_pair(fields),
            Pass::Sweep => sweep(fields),
            Pass::Rule { category, text } => match_rule(fields, *category, text)
                .into_iter()
                .collect(),
        }
    }
}

fn passes(settings: &FillSettings) -> Vec<Pass<'_>> {
    match settings.mode {
        FillMode::Auto => vec![Pass::NamePair, Pass::Sweep],
        FillMode::Manual => settings
            .active_rules()
            .map(|(category, rule)| Pass::Rule {
                category,
                text: rule.text.as_str(),
            })
            .collect(),
    }
}

fn first_empty(fields: &[Field], category: Category) -> Option<usize> {
    fields
        .iter()
        .position(|f| f.is_empty() && classify(f) == category)
}

/// Split first/last fields when both exist, otherwise a single full-name field.
fn resolve_name_pair(fields: &[Field]) -> Vec<Target> {
    let last = first_empty(fields, Category::LastName);
    let first = first_empty(fields, Category::FirstName);

    if let (Some(last), Some(first)) = (last, first) {
        return vec![
            Target {
                position: last,
                category: Category::LastName,
                kind: ValueKind::LastName,
            },
            Target {
                position: first,
                category: Category::FirstName,
                kind: ValueKind::FirstName,
            },
        ];
    }

    fields
        .iter()
        .enumerate()
        .filter(|(_, f)| f.is_empty())
        .map(|(position, f)| (position, classify(f)))
        .find(|(_, category)| category.accepts_full_name())
        .map(|(position, category)| Target {
            position,
            category,
            kind: ValueKind::FullName,
        })
        .into_iter()
        .collect()
}

/// Remaining empty, editable email, company and phone fields.
fn sweep(fields: &[Field]) -> Vec<Target> {
    fields
        .iter()
        .enumerate()
        .filter(|(_, f)| f.is_empty() && f.is_editable())
        .filter_map(|(position, f)| {
            let category = classify(f);
            let kind = match category {
                Category::Email => ValueKind::Email,
                Category::Company => ValueKind::Company,
                Category::Phone => ValueKind::Phone(PhoneFormat::for_field(f)),
                _ => return None,
            };
            Some(Target {
                position,
                category,
                kind,
            })
        })
        .collect()
}

/// First empty field whose signature contains `text`, case-insensitively.
fn match_rule(fields: &[Field], category: Category, text: &str) -> Option<Target> {
    let kind = manual_value_kind(category)?;
    let needle = text.to_lowercase();
    fields
        .iter()
        .position(|f| f.is_empty() && f.signature().contains(&needle))
        .map(|position| Target {
            position,
            category,
            kind,
        })
}

/// Manual rules always produce a hyphenated phone number.
fn manual_value_kind(category: Category) -> Option<ValueKind> {
    match category {
        Category::Email => Some(ValueKind::Email),
        Category::FullName | Category::Name => Some(ValueKind::FullName),
        Category::FirstName => Some(ValueKind::FirstName),
        Category::LastName => Some(ValueKind::LastName),
        Category::Company => Some(ValueKind::Company),
        Category::Phone => Some(ValueKind::Phone(PhoneFormat::Hyphen)),
        Category::None => None,
    }
}

/// Write `value` into `field`, then dispatch bubbling `input` and `change`.
///
/// Does not check whether the field is already filled.
pub fn execute<D: FormDocument + ?Sized>(doc: &mut D, field: &mut Field, value: &str) {
    doc.set_value(field.handle, value);
    field.value = value.to_string();
    doc.notify(field.handle, FieldEvent::Input);
    doc.notify(field.handle, FieldEvent::Change);
}

/// Runs one fill over a document according to the settings' mode.
pub struct FormFiller<R = ThreadRng> {
    generator: ValueGenerator<R>,
}

impl FormFiller<ThreadRng> {
    pub fn new() -> Self {
        Self {
            generator: ValueGenerator::new(),
        }
    }
}

impl Default for FormFiller<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> FormFiller<R> {
    pub fn with_generator(generator: ValueGenerator<R>) -> Self {
        Self { generator }
    }

    pub fn fill<D: FormDocument + ?Sized>(
        &mut self,
        doc: &mut D,
        settings: &FillSettings,
    ) -> FillReport {
        let mut fields = enumerate_candidates(doc.inputs());
        let mut report = FillReport::default();

        for pass in passes(settings) {
            for target in pass.select(&fields) {
                let value = self.generator.generate(target.kind);
                let field = &mut fields[target.position];
                execute(doc, field, &value);
                tracing::debug!(
                    handle = field.handle.0,
                    category = %target.category,
                    value = %value,
                    "filled field"
                );
                report.filled.push(FilledField {
                    handle: field.handle,
                    category: target.category,
                    value,
                });
            }
        }

        tracing::info!(
            mode = ?settings.mode,
            candidates = fields.len(),
            filled = report.len(),
            "fill run complete"
        );
        report
    }
}
