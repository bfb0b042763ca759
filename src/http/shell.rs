//! Application shell pages.
//!
//! The server never renders a view itself. It returns the HTML shell with
//! the mount point tagged by view name; the view takes over client-side.

use crate::views::View;

/// Render the shell for `view` under `base`. `None` renders the not-found
/// shell with nothing mounted.
pub fn render_shell(base: &str, view: Option<&dyn View>) -> String {
    let title = view.map(|v| v.title()).unwrap_or("Not Found");
    let mount = match view {
        Some(v) => format!(r#"<div id="app" data-view="{}"></div>"#, escape(v.name())),
        None => r#"<div id="app"></div>"#.to_string(),
    };

    format!(
        concat!(
            "<!doctype html>\n",
            "<html lang=\"en\">\n",
            "<head>\n",
            "<meta charset=\"utf-8\">\n",
            "<title>{title} · docdesk</title>\n",
            "<base href=\"{base}/\">\n",
            "</head>\n",
            "<body>\n",
            "{mount}\n",
            "</body>\n",
            "</html>\n",
        ),
        title = escape(title),
        base = escape(base),
        mount = mount,
    )
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
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
    use crate::views::SignPdfView;

    #[test]
    fn test_view_shell() {
        let html = render_shell("/app", Some(&SignPdfView));
        assert!(html.contains(r#"data-view="sign-pdf""#));
        assert!(html.contains("<title>Sign PDF · docdesk</title>"));
        assert!(html.contains(r#"<base href="/app/">"#));
    }

    #[test]
    fn test_not_found_shell() {
        let html = render_shell("", None);
        assert!(html.contains(r#"<div id="app"></div>"#));
        assert!(html.contains("Not Found"));
        assert!(!html.contains("data-view"));
    }

    #[test]
    fn test_base_is_escaped() {
        let html = render_shell("/a\"<b>", None);
        assert!(html.contains(r#"<base href="/a&quot;&lt;b&gt;/">"#));
    }
}
