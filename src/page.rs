use std::time::Duration;

use chromiumoxide::page::Page as CrPage;

use crate::error::{Error, Result};
use crate::form::{Field, FillOp, FillReport, FormFiller, FormSnapshot};
use crate::settings::FillSettings;

/// Collects every `<input>` in document order. `handle` is the element's
/// index in `document.querySelectorAll('input')`.
const INPUTS_JS: &str = r#"
    JSON.stringify(
        Array.from(document.querySelectorAll('input')).map((el, i) => ({
            handle: i,
            type: el.getAttribute('type'),
            id: el.id || '',
            name: el.name || '',
            placeholder: el.placeholder || '',
            ariaLabel: el.getAttribute('aria-label'),
            value: el.value || '',
            disabled: !!el.disabled,
            readOnly: !!el.readOnly,
            pattern: el.getAttribute('pattern'),
            maxLength: el.getAttribute('maxlength')
        }))
    )
"#;

/// Wrapper around a chromiumoxide Page exposing navigation and form filling.
pub struct Page {
    inner: CrPage,
    default_timeout: Duration,
}

impl Page {
    pub(crate) fn new(inner: CrPage, default_timeout: Duration) -> Self {
        Self { inner, default_timeout }
    }

    // ── Navigation ──────────────────────────────────────────────────

    /// Navigate to the given URL and wait for the page to load.
    pub async fn goto(&self, url: &str) -> Result<()> {
        self.inner
            .goto(url)
            .await
            .map_err(|e| Error::NavigationError(e.to_string()))?;
        Ok(())
    }

    /// Replace the document with the given HTML.
    pub async fn set_html(&self, html: &str) -> Result<()> {
        self.inner
            .set_content(html)
            .await
            .map_err(|e| Error::NavigationError(e.to_string()))?;
        Ok(())
    }

    /// Wait for an element matching the given CSS selector to appear in the DOM.
    /// Polls every 100ms up to the configured default timeout.
    pub async fn wait_for_selector(&self, selector: &str) -> Result<()> {
        let timeout = self.default_timeout;
        let interval = Duration::from_millis(100);
        let start = std::time::Instant::now();

        loop {
            match self.inner.find_element(selector).await {
                Ok(_) => return Ok(()),
                Err(_) if start.elapsed() < timeout => {
                    tokio::time::sleep(interval).await;
                }
                Err(_) => {
                    return Err(Error::Timeout(format!(
                        "Timed out waiting for selector: {}",
                        selector
                    )));
                }
            }
        }
    }

    // ── Forms ───────────────────────────────────────────────────────

    /// Get every `<input>` on the page with the attributes the classifier reads.
    pub async fn form_fields(&self) -> Result<Vec<Field>> {
        let result = self
            .inner
            .evaluate(INPUTS_JS)
            .await
            .map_err(|e| Error::JsError(e.to_string()))?;
        let json_str: String = result
            .into_value()
            .map_err(|e| Error::JsError(e.to_string()))?;
        let fields: Vec<Field> =
            serde_json::from_str(&json_str).map_err(|e| Error::JsError(e.to_string()))?;
        Ok(fields)
    }

    /// Fill the page's empty text-like inputs with synthetic data.
    ///
    /// The inputs are snapshotted, the fill runs against the snapshot, and the
    /// recorded writes and events are replayed in a single script turn.
    pub async fn fill_forms(&self, settings: &FillSettings) -> Result<FillReport> {
        let inputs = self.form_fields().await?;
        let (report, ops) = {
            let mut snapshot = FormSnapshot::new(inputs);
            let report = FormFiller::new().fill(&mut snapshot, settings);
            (report, snapshot.take_ops())
        };

        if !ops.is_empty() {
            let applied = self.apply_ops(&ops).await?;
            if applied != report.len() {
                tracing::warn!(
                    expected = report.len(),
                    applied,
                    "page inputs changed between snapshot and fill"
                );
            }
        }
        Ok(report)
    }

    /// Replay recorded writes and notifications, returning the number of
    /// values written.
    async fn apply_ops(&self, ops: &[FillOp]) -> Result<usize> {
        let ops_js = serde_json::to_string(ops).map_err(|e| Error::JsError(e.to_string()))?;
        let js = format!(
            r#"
            (() => {{
                const inputs = document.querySelectorAll('input');
                let applied = 0;
                for (const op of {ops_js}) {{
                    const el = inputs[op.handle];
                    if (!el) continue;
                    if (op.op === 'set') {{
                        el.value = op.value;
                        applied++;
                    }} else {{
                        el.dispatchEvent(new Event(op.event, {{ bubbles: true }}));
                    }}
                }}
                return applied;
            }})()
            "#,
        );
        let result = self
            .inner
            .evaluate(js)
            .await
            .map_err(|e| Error::JsError(e.to_string()))?;
        result
            .into_value::<usize>()
            .map_err(|e| Error::JsError(e.to_string()))
    }

    /// Current `value` of the element matching the given CSS selector.
    pub async fn field_value(&self, selector: &str) -> Result<String> {
        let selector_js = serde_json::to_string(selector)
            .map_err(|e| Error::JsError(e.to_string()))?;
        let js = format!(
            r#"
            (() => {{
                const el = document.querySelector({selector_js});
                if (!el) throw new Error('Element not found: ' + {selector_js});
                return el.value;
            }})()
            "#,
        );
        let result = self
            .inner
            .evaluate(js)
            .await
            .map_err(|e| Error::JsError(e.to_string()))?;
        result
            .into_value::<String>()
            .map_err(|e| Error::JsError(e.to_string()))
    }

    /// Evaluate a JavaScript expression and return the result as a string.
    pub async fn evaluate(&self, expression: &str) -> Result<String> {
        let result = self
            .inner
            .evaluate(expression)
            .await
            .map_err(|e| Error::JsError(e.to_string()))?;
        match result.value() {
            Some(val) => Ok(val.to_string()),
            None => Ok(String::new()),
        }
    }
}
