//! HTML to markdown rendering.

/// Render HTML as markdown using the html2md crate.
///
/// Images with no alt text come out as `![](src)`, which is the form the quiz
/// parser looks for.
pub fn html_to_markdown(html: &str) -> String {
    html2md::parse_html(html)
}
