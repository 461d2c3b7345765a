use tower_lsp::lsp_types::*;

/// Pull diagnostics report for a document.
///
/// Avi has no checker yet, so known and unknown documents alike get an
/// empty full report.
pub fn document_report(_document: Option<&str>) -> DocumentDiagnosticReportResult {
    DocumentDiagnosticReportResult::Report(DocumentDiagnosticReport::Full(
        RelatedFullDocumentDiagnosticReport {
            related_documents: None,
            full_document_diagnostic_report: FullDocumentDiagnosticReport {
                result_id: None,
                items: vec![],
            },
        },
    ))
}
