use super::View;

/// Mount point for the PDF signing screen.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignPdfView;

impl View for SignPdfView {
    fn name(&self) -> &'static str {
        "sign-pdf"
    }

    fn title(&self) -> &'static str {
        "Sign PDF"
    }
}
