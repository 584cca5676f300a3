use form_autofill::{logging, AutofillBrowser, Category, FillSettings, ManualRule, SettingsStore};

const FORM: &str = r#"
<form>
  <input id="user_mail_addr" placeholder="Mail">
  <input id="applicant" placeholder="Applicant">
  <input id="org_code" placeholder="Organisation">
  <input id="contact" placeholder="Contact number">
</form>
"#;

#[tokio::main]
async fn main() -> form_autofill::Result<()> {
    logging::init();

    // First argument: settings file. Seeded with example rules when absent.
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "autofill-settings.json".to_string());
    let store = SettingsStore::new(path);
    if store.try_load()?.is_none() {
        let seeded = FillSettings::manual()
            .with_rule(Category::Email, ManualRule::new("mail"))
            .with_rule(Category::Name, ManualRule::new("applicant"))
            .with_rule(Category::Company, ManualRule::new("org"))
            .with_rule(Category::Phone, ManualRule::new("contact"));
        store.save(&seeded)?;
        println!("Wrote example settings to {}", store.path().display());
    }
    let settings = store.load();

    let browser = AutofillBrowser::builder().headless(true).build().await?;
    let page = browser.new_page("about:blank").await?;
    page.set_html(FORM).await?;

    let report = page.fill_forms(&settings).await?;
    println!("Filled {} fields ({:?} mode):", report.len(), settings.mode);
    for filled in &report.filled {
        println!("  #{} {}: {}", filled.handle.0, filled.category, filled.value);
    }
    Ok(())
}
