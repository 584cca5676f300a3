use form_autofill::config::BrowserBuilder;
use form_autofill::{logging, FillSettings};

#[tokio::main]
async fn main() -> form_autofill::Result<()> {
    logging::init();

    let url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "https://httpbin.org/forms/post".to_string());

    let browser = BrowserBuilder::from_env().build().await?;
    let page = browser.new_page("about:blank").await?;
    page.goto(&url).await?;
    page.wait_for_selector("input").await?;

    let fields = page.form_fields().await?;
    println!("Found {} inputs:", fields.len());
    for field in &fields {
        println!(
            "  #{} (type={}, id={}, name={}) -> {}",
            field.handle.0,
            field.input_type.as_deref().unwrap_or("text"),
            field.id,
            field.name,
            form_autofill::classify(field)
        );
    }

    let report = page.fill_forms(&FillSettings::auto()).await?;
    for filled in &report.filled {
        println!("  filled #{} as {}: {}", filled.handle.0, filled.category, filled.value);
    }

    Ok(())
}
