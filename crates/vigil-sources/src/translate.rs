//! LibreTranslate-compatible translation client.

use vigil_ingest::Translation;

use crate::{SourceClient, error::SourceError, http::check_response};

#[derive(serde::Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'a str,
}

#[derive(serde::Deserialize)]
struct TranslateResponse {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

impl SourceClient {
    /// Translate `text` into the configured target language.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::NotConfigured`] when no endpoint is set, or any
    /// transport, status, or parse error from the service.
    pub async fn translate(&self, text: &str) -> Result<String, SourceError> {
        let Some(base) = &self.translate_url else {
            return Err(SourceError::NotConfigured("translation endpoint"));
        };
        let request = TranslateRequest {
            q: text,
            source: "auto",
            target: &self.translate_target,
            format: "text",
        };
        let resp = check_response(
            self.http
                .post(format!("{base}/translate"))
                .json(&request)
                .send()
                .await?,
        )
        .await?;
        let data: TranslateResponse = resp.json().await?;
        Ok(data.translated_text)
    }

    /// Translate non-blank `text`, recording failures as [`Translation::Unavailable`].
    ///
    /// Returns `None` for blank input, which has nothing to translate.
    pub async fn translation(&self, text: &str) -> Option<Translation> {
        if text.trim().is_empty() {
            return None;
        }
        Some(Translation::from_result(text, self.translate(text).await))
    }
}
