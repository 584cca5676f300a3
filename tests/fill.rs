use form_autofill::form::generator::{companies, email_domains, first_names, last_names};
use form_autofill::form::{
    Category, Field, FieldEvent, FieldHandle, FillOp, FormFiller, FormSnapshot, ValueGenerator,
};
use form_autofill::settings::{FillSettings, ManualRule};
use rand::rngs::StdRng;
use rand::SeedableRng;
use regex::Regex;

fn filler() -> FormFiller<StdRng> {
    FormFiller::with_generator(ValueGenerator::with_rng(StdRng::seed_from_u64(42)))
}

fn value(doc: &FormSnapshot, handle: usize) -> &str {
    doc.value(FieldHandle(handle)).expect("field exists")
}

fn is_full_name(value: &str) -> bool {
    last_names().iter().any(|last| {
        value
            .strip_prefix(last)
            .is_some_and(|rest| first_names().contains(&rest))
    })
}

fn email_format() -> Regex {
    let domains: Vec<String> = email_domains().iter().map(|d| regex::escape(d)).collect();
    Regex::new(&format!("^[a-z0-9]{{10}}@({})$", domains.join("|"))).unwrap()
}

#[test]
fn test_split_name_fields_are_filled_separately() {
    let mut doc = FormSnapshot::new(vec![
        Field::new(0).with_id("lastName"),
        Field::new(1).with_id("firstName"),
        Field::new(2).with_id("fullName"),
    ]);

    let report = filler().fill(&mut doc, &FillSettings::auto());

    assert!(last_names().contains(&value(&doc, 0)));
    assert!(first_names().contains(&value(&doc, 1)));
    assert_eq!(value(&doc, 2), "");
    assert_eq!(report.len(), 2);
    assert_eq!(report.get(FieldHandle(0)).unwrap().category, Category::LastName);
    assert_eq!(report.get(FieldHandle(1)).unwrap().category, Category::FirstName);
}

#[test]
fn test_single_full_name_field() {
    let mut doc = FormSnapshot::new(vec![
        Field::new(0).with_id("fullName"),
        Field::new(1).with_id("username"),
    ]);

    filler().fill(&mut doc, &FillSettings::auto());

    assert!(is_full_name(value(&doc, 0)), "got {}", value(&doc, 0));
    assert_eq!(value(&doc, 1), "");
}

#[test]
fn test_lone_first_name_field_gets_full_name() {
    let mut doc = FormSnapshot::new(vec![Field::new(0).with_id("firstName")]);

    filler().fill(&mut doc, &FillSettings::auto());

    assert!(is_full_name(value(&doc, 0)), "got {}", value(&doc, 0));
}

#[test]
fn test_prefilled_last_name_falls_back_to_full_name() {
    let mut doc = FormSnapshot::new(vec![
        Field::new(0).with_id("lastName").with_value("Kim"),
        Field::new(1).with_id("firstName"),
    ]);

    let report = filler().fill(&mut doc, &FillSettings::auto());

    assert_eq!(value(&doc, 0), "Kim");
    assert!(is_full_name(value(&doc, 1)));
    assert_eq!(report.len(), 1);
}

#[test]
fn test_no_name_fields_is_a_no_op() {
    let mut doc = FormSnapshot::new(vec![Field::new(0).with_id("zip")]);

    let report = filler().fill(&mut doc, &FillSettings::auto());

    assert!(report.is_empty());
    assert!(doc.ops().is_empty());
}

#[test]
fn test_sweep_fills_email_company_and_phone() {
    let mut doc = FormSnapshot::new(vec![
        Field::new(0).with_type("email").with_name("email"),
        Field::new(1).with_id("company"),
        Field::new(2).with_type("tel").with_id("phone"),
        Field::new(3).with_id("coupon"),
    ]);

    filler().fill(&mut doc, &FillSettings::auto());

    assert!(email_format().is_match(value(&doc, 0)), "got {}", value(&doc, 0));
    assert!(companies().contains(&value(&doc, 1)));
    assert_eq!(value(&doc, 2), "010-0000-0000");
    assert_eq!(value(&doc, 3), "");
}

#[test]
fn test_phone_format_follows_field_attributes() {
    let mut doc = FormSnapshot::new(vec![
        Field::new(0).with_id("phone1").with_pattern("[0-9]{11}"),
        Field::new(1).with_id("phone2").with_max_length("13"),
        Field::new(2).with_id("phone3").with_max_length("11"),
        Field::new(3).with_id("phone4").with_pattern(r"\d{11}"),
    ]);

    filler().fill(&mut doc, &FillSettings::auto());

    assert_eq!(value(&doc, 0), "01000000000");
    assert_eq!(value(&doc, 1), "010-0000-0000");
    assert_eq!(value(&doc, 2), "01000000000");
    assert_eq!(value(&doc, 3), "01000000000");
}

#[test]
fn test_sweep_skips_disabled_and_read_only() {
    let mut doc = FormSnapshot::new(vec![
        Field::new(0).with_id("email").disabled(),
        Field::new(1).with_id("company").read_only(),
        Field::new(2).with_id("phone"),
    ]);

    let report = filler().fill(&mut doc, &FillSettings::auto());

    assert_eq!(value(&doc, 0), "");
    assert_eq!(value(&doc, 1), "");
    assert_eq!(report.len(), 1);
    assert_eq!(report.filled[0].handle, FieldHandle(2));
}

#[test]
fn test_non_text_inputs_are_never_touched() {
    let mut doc = FormSnapshot::new(vec![
        Field::new(0).with_type("checkbox").with_id("email"),
        Field::new(1).with_type("password").with_id("company"),
        Field::new(2).with_type("hidden").with_id("fullName"),
    ]);

    let report = filler().fill(&mut doc, &FillSettings::auto());

    assert!(report.is_empty());
    assert!(doc.ops().is_empty());
}

#[test]
fn test_write_is_followed_by_input_then_change() {
    let mut doc = FormSnapshot::new(vec![Field::new(5).with_id("company")]);

    let report = filler().fill(&mut doc, &FillSettings::auto());

    let handle = FieldHandle(5);
    assert_eq!(
        doc.ops(),
        &[
            FillOp::Set {
                handle,
                value: report.filled[0].value.clone(),
            },
            FillOp::Dispatch {
                handle,
                event: FieldEvent::Input,
            },
            FillOp::Dispatch {
                handle,
                event: FieldEvent::Change,
            },
        ]
    );
}

#[test]
fn test_second_run_writes_nothing() {
    let mut doc = FormSnapshot::new(vec![
        Field::new(0).with_id("fullName"),
        Field::new(1).with_id("email"),
        Field::new(2).with_id("company"),
        Field::new(3).with_id("mobile"),
        Field::new(4).with_id("notes"),
    ]);
    let mut filler = filler();

    let first = filler.fill(&mut doc, &FillSettings::auto());
    assert_eq!(first.len(), 4);

    let mut again = FormSnapshot::new(doc.fields().to_vec());
    let second = filler.fill(&mut again, &FillSettings::auto());
    assert!(second.is_empty());
    assert!(again.ops().is_empty());
}

#[test]
fn test_manual_rule_matches_substring() {
    let settings = FillSettings::manual().with_rule(Category::Email, ManualRule::new("mail"));
    let mut doc = FormSnapshot::new(vec![
        Field::new(0).with_id("username"),
        Field::new(1).with_id("user_mail_addr"),
    ]);

    let report = filler().fill(&mut doc, &settings);

    assert_eq!(value(&doc, 0), "");
    assert!(email_format().is_match(value(&doc, 1)), "got {}", value(&doc, 1));
    assert_eq!(report.filled[0].category, Category::Email);
}

#[test]
fn test_manual_rule_is_case_insensitive_and_literal() {
    let settings = FillSettings::manual()
        .with_rule(Category::Company, ManualRule::new("CORP.NAME"))
        .with_rule(Category::Phone, ManualRule::new("Contact"));
    let mut doc = FormSnapshot::new(vec![
        Field::new(0).with_id("corpXname"),
        Field::new(1).with_name("corp.name"),
        Field::new(2).with_placeholder("contact number").with_pattern("[0-9]{11}"),
    ]);

    filler().fill(&mut doc, &settings);

    assert_eq!(value(&doc, 0), "");
    assert!(companies().contains(&value(&doc, 1)));
    // Manual mode always uses the hyphenated number.
    assert_eq!(value(&doc, 2), "010-0000-0000");
}

#[test]
fn test_inert_manual_rules() {
    let settings = FillSettings::manual()
        .with_rule(
            Category::Email,
            ManualRule {
                enabled: false,
                text: "mail".into(),
            },
        )
        .with_rule(Category::Company, ManualRule::new(""));
    let mut doc = FormSnapshot::new(vec![
        Field::new(0).with_id("email"),
        Field::new(1).with_id("company"),
    ]);

    let report = filler().fill(&mut doc, &settings);

    assert!(report.is_empty());
    assert!(doc.ops().is_empty());
}

#[test]
fn test_manual_mode_ignores_classifier() {
    let mut doc = FormSnapshot::new(vec![Field::new(0).with_id("email")]);

    let report = filler().fill(&mut doc, &FillSettings::manual());

    assert!(report.is_empty());
}

#[test]
fn test_manual_rules_see_earlier_fills() {
    let settings = FillSettings::manual()
        .with_rule(Category::Email, ManualRule::new("user"))
        .with_rule(Category::Name, ManualRule::new("user"));
    let mut doc = FormSnapshot::new(vec![
        Field::new(0).with_id("user_a"),
        Field::new(1).with_id("user_b"),
    ]);

    filler().fill(&mut doc, &settings);

    assert!(email_format().is_match(value(&doc, 0)));
    assert!(is_full_name(value(&doc, 1)));
}

#[test]
fn test_generator_tables() {
    let mut generator = ValueGenerator::with_rng(StdRng::seed_from_u64(1));
    for _ in 0..50 {
        assert!(email_format().is_match(&generator.email()));
        assert!(is_full_name(&generator.full_name()));
        assert!(first_names().contains(&generator.first_name().as_str()));
        assert!(last_names().contains(&generator.last_name().as_str()));
    }
}

#[test]
fn test_manual_rules_for_name_parts_and_none() {
    let settings = FillSettings::manual()
        .with_rule(Category::FullName, ManualRule::new("whole"))
        .with_rule(Category::FirstName, ManualRule::new("given"))
        .with_rule(Category::LastName, ManualRule::new("family"))
        .with_rule(Category::None, ManualRule::new("memo"));
    let mut doc = FormSnapshot::new(vec![
        Field::new(0).with_id("given"),
        Field::new(1).with_id("family"),
        Field::new(2).with_id("whole"),
        Field::new(3).with_id("memo"),
    ]);

    let report = filler().fill(&mut doc, &settings);

    assert!(first_names().contains(&value(&doc, 0)), "got {}", value(&doc, 0));
    assert!(last_names().contains(&value(&doc, 1)), "got {}", value(&doc, 1));
    assert!(is_full_name(value(&doc, 2)), "got {}", value(&doc, 2));
    assert_eq!(value(&doc, 3), "");
    assert_eq!(report.len(), 3);
}
