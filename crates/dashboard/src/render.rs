//! HTML page rendering

use askama::Template;
use sentiment_engine::InferenceResult;

use crate::config::Branding;

/// Warning or error block shown under the form
#[derive(Debug, Clone)]
pub struct Notice {
    pub kind: &'static str,
    pub message: String,
}

impl Notice {
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            kind: "warning",
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: "error",
            message: message.into(),
        }
    }
}

/// Display form of an [`InferenceResult`]
#[derive(Debug, Clone)]
pub struct ResultCard {
    pub icon: &'static str,
    pub name: &'static str,
    pub color: &'static str,
    pub message: &'static str,
    pub confidence: String,
}

impl From<&InferenceResult> for ResultCard {
    fn from(result: &InferenceResult) -> Self {
        Self {
            icon: result.label.icon,
            name: result.label.name,
            color: result.label.color,
            message: result.label.message,
            confidence: format_confidence(result.confidence),
        }
    }
}

/// Percentage with two decimals, e.g. `97.31%`
pub fn format_confidence(confidence: f32) -> String {
    format!("{:.2}%", confidence * 100.0)
}

/// The whole dashboard page
#[derive(Template)]
#[template(path = "page.html")]
pub struct PageTemplate<'a> {
    pub branding: &'a Branding,
    pub logo: Option<&'a str>,
    pub text: &'a str,
    pub notice: Option<Notice>,
    pub card: Option<ResultCard>,
}

impl<'a> PageTemplate<'a> {
    pub fn new(branding: &'a Branding, logo: Option<&'a str>) -> Self {
        Self {
            branding,
            logo,
            text: "",
            notice: None,
            card: None,
        }
    }

    pub fn with_text(mut self, text: &'a str) -> Self {
        self.text = text;
        self
    }

    pub fn with_notice(mut self, notice: Notice) -> Self {
        self.notice = Some(notice);
        self
    }

    pub fn with_result(mut self, result: &InferenceResult) -> Self {
        self.card = Some(ResultCard::from(result));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sentiment_engine::LabelTable;

    fn positive_result() -> InferenceResult {
        InferenceResult {
            predicted_index: 2,
            confidence: 0.9731,
            probabilities: vec![0.0269, 0.9731],
            label: *LabelTable::ternary().get(2).unwrap(),
        }
    }

    #[test]
    fn test_format_confidence() {
        assert_eq!(format_confidence(0.9731), "97.31%");
        assert_eq!(format_confidence(1.0), "100.00%");
        assert_eq!(format_confidence(0.0), "0.00%");
    }

    #[test]
    fn test_empty_page_has_form_and_footer() {
        let branding = Branding::default();
        let html = PageTemplate::new(&branding, None).render().unwrap();
        assert!(html.contains("I am Miluna"));
        assert!(html.contains("action=\"/analyze\""));
        assert!(html.contains("Built by Ali Khllo"));
        assert!(html.contains("SYSTEM VERSION: Miluna-DASHBOARD-2026"));
        assert!(!html.contains("class=\"result\""));
        assert!(!html.contains("logo-orb\"><img"));
    }

    #[test]
    fn test_result_card_rendered() {
        let branding = Branding::default();
        let result = positive_result();
        let html = PageTemplate::new(&branding, None)
            .with_text("I am so happy today")
            .with_result(&result)
            .render()
            .unwrap();
        assert!(html.contains("POSITIVE"));
        assert!(html.contains("🌕"));
        assert!(html.contains("CONFIDENCE: 97.31%"));
        assert!(html.contains("Your energy shines bright!"));
    }

    #[test]
    fn test_logo_embedded_when_present() {
        let branding = Branding::default();
        let html = PageTemplate::new(&branding, Some("data:image/png;base64,aGVsbG8="))
            .render()
            .unwrap();
        assert!(html.contains("<img src=\"data:image/png;base64,aGVsbG8=\""));
        assert!(html.contains("UNIVERSITAS MERCU BUANA"));
    }

    #[test]
    fn test_user_text_is_escaped() {
        let branding = Branding::default();
        let html = PageTemplate::new(&branding, None)
            .with_text("<script>alert(1)</script>")
            .with_notice(Notice::warning("Please enter text."))
            .render()
            .unwrap();
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("notice warning"));
    }
}
