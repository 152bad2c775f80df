//! Inline HTML rendering for the upload page.
//!
//! The page is small enough that a templating engine would be overhead; the
//! markup lives here as ordinary string building with escaping applied to
//! every dynamic value.

use axum::response::Html;

/// Values rendered into the upload page.
#[derive(Debug, Default)]
pub struct IndexPage {
    pub link: Option<String>,
    pub error: Option<String>,
    pub description: Option<String>,
    pub suggested_filename: Option<String>,
    pub qr_url: Option<String>,
}

impl IndexPage {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_error(message: impl Into<String>) -> Self {
        IndexPage {
            error: Some(message.into()),
            ..Self::default()
        }
    }
}

pub fn render_index(page: &IndexPage) -> Html<String> {
    let mut body = String::with_capacity(4096);

    body.push_str(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>QuickDrop</title>
<style>
  body { font-family: system-ui, sans-serif; max-width: 640px; margin: 3rem auto; padding: 0 1rem; color: #222; }
  h1 { font-size: 1.6rem; }
  form.upload { margin: 1.5rem 0; }
  button { padding: 0.4rem 1rem; cursor: pointer; }
  .error { color: #b00020; }
  .share { background: #f4f7f4; border: 1px solid #cfd8cf; border-radius: 6px; padding: 1rem; margin: 1rem 0; }
  .share a { word-break: break-all; }
  .hint { color: #666; font-size: 0.9rem; }
  #answer { white-space: pre-wrap; background: #f4f4f7; padding: 0.75rem; border-radius: 6px; }
  textarea { width: 100%; box-sizing: border-box; }
</style>
</head>
<body>
<h1>QuickDrop</h1>
<p class="hint">Share a file with a link that expires after 15 minutes.</p>
<form class="upload" method="post" enctype="multipart/form-data">
  <input type="file" name="file">
  <button type="submit">Upload</button>
</form>
"#,
    );

    if let Some(ref error) = page.error {
        body.push_str(&format!(
            "<p class=\"error\">{}</p>\n",
            escape_html(error)
        ));
    }

    if let Some(ref link) = page.link {
        let link = escape_html(link);
        body.push_str("<div class=\"share\">\n");
        body.push_str(&format!(
            "<p>Share link: <a href=\"{link}\">{link}</a></p>\n"
        ));

        if let Some(ref description) = page.description {
            body.push_str(&format!(
                "<p>Description: {}</p>\n",
                escape_html(description)
            ));
        }

        if let Some(ref suggestion) = page.suggested_filename {
            body.push_str(&format!(
                "<p>Suggested filename: {}</p>\n",
                escape_html(suggestion)
            ));
        }

        if let Some(ref qr_url) = page.qr_url {
            body.push_str(&format!(
                "<p><img src=\"{}\" alt=\"QR code for share link\" width=\"240\" height=\"240\"></p>\n",
                escape_html(qr_url)
            ));
        }
        body.push_str("</div>\n");

        body.push_str(
            r#"<h2>Ask about this file</h2>
<textarea id="question" rows="3" placeholder="Ask a question about the uploaded document"></textarea>
<button onclick="askAi()">Ask</button>
<p id="answer"></p>
<script>
async function askAi() {
  const question = document.getElementById('question').value;
  const answer = document.getElementById('answer');
  answer.textContent = '...';
  try {
    const res = await fetch('/ask_ai', {
      method: 'POST',
      headers: { 'Content-Type': 'application/json' },
      body: JSON.stringify({ question }),
    });
    const data = await res.json();
    answer.textContent = data.answer;
  } catch (e) {
    answer.textContent = 'Error: ' + e;
  }
}
</script>
"#,
        );
    }

    body.push_str("</body>\n</html>\n");
    Html(body)
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_page_has_form_only() {
        let html = render_index(&IndexPage::empty()).0;
        assert!(html.contains("enctype=\"multipart/form-data\""));
        assert!(!html.contains("Share link"));
        assert!(!html.contains("class=\"error\""));
    }

    #[test]
    fn test_error_is_rendered_escaped() {
        let html = render_index(&IndexPage::with_error("<script>alert(1)</script>")).0;
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>alert"));
    }

    #[test]
    fn test_share_block_includes_all_details() {
        let page = IndexPage {
            link: Some("http://localhost:3000/Ab3dE9xZ".to_string()),
            error: None,
            description: Some("A quarterly report".to_string()),
            suggested_filename: Some("q3-report.pdf".to_string()),
            qr_url: Some("/uploads/qr_x.png".to_string()),
        };
        let html = render_index(&page).0;
        assert!(html.contains("http://localhost:3000/Ab3dE9xZ"));
        assert!(html.contains("A quarterly report"));
        assert!(html.contains("q3-report.pdf"));
        assert!(html.contains("/uploads/qr_x.png"));
        assert!(html.contains("ask_ai"));
    }
}
