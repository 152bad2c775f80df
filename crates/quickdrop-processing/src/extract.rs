//! Best-effort text extraction for AI context.

/// Extract readable text from an uploaded file.
///
/// PDFs go through pdf-extract; anything else is treated as text and decoded
/// as lossy UTF-8. Extraction never fails: unreadable content yields an empty
/// string and the caller degrades gracefully.
pub fn extract_text(filename: &str, data: &[u8]) -> String {
    let is_pdf = data.starts_with(b"%PDF")
        || filename
            .rsplit('.')
            .next()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));

    if is_pdf {
        match pdf_extract::extract_text_from_mem(data) {
            Ok(text) => text.trim().to_string(),
            Err(e) => {
                tracing::debug!(error = %e, filename, "PDF text extraction failed");
                String::new()
            }
        }
    } else {
        String::from_utf8_lossy(data).trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_passthrough() {
        let text = extract_text("notes.txt", b"  hello world\n");
        assert_eq!(text, "hello world");
    }

    #[test]
    fn test_invalid_utf8_is_lossy_not_fatal() {
        let text = extract_text("blob.txt", &[0x68, 0x69, 0xFF, 0xFE]);
        assert!(text.starts_with("hi"));
    }

    #[test]
    fn test_broken_pdf_yields_empty() {
        // PDF magic but no document body
        let text = extract_text("doc.pdf", b"%PDF-1.7 garbage");
        assert_eq!(text, "");
    }

    #[test]
    fn test_pdf_detected_by_extension() {
        // not a real PDF, so extraction fails and we get empty rather than
        // the raw bytes decoded as text
        let text = extract_text("report.PDF", b"not really a pdf");
        assert_eq!(text, "");
    }
}
