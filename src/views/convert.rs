use super::View;

/// Mount point for the document conversion screen.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConvertDocumentView;

impl View for ConvertDocumentView {
    fn name(&self) -> &'static str {
        "convert-document"
    }

    fn title(&self) -> &'static str {
        "Convert Document"
    }
}
