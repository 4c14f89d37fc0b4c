//! # Comment Sanitizing
//!
//! Admin comments are stored as plain text: markup is stripped and the
//! result trimmed before it reaches the history table or a customer email.
//!
//! ```text
//! "  <b>Shipped</b> via <a href=\"x>y\">UPS</a>\n"
//!        │ strip_tags
//!        ▼
//! "  Shipped via UPS\n"
//!        │ trim
//!        ▼
//! "Shipped via UPS"
//! ```

/// Scanner position while stripping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scan {
    Text,
    /// Inside `<...>`, with the open quote character if any.
    Tag(Option<char>),
    /// Inside `<!-- ... -->`.
    Comment,
}

/// Removes markup tags and HTML comments.
///
/// - A `>` inside a quoted attribute value does not close the tag.
/// - A `<` followed by whitespace is literal text (`a < b` survives).
/// - An unterminated tag swallows the rest of the input.
pub fn strip_tags(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut scan = Scan::Text;
    let mut chars = input.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        match scan {
            Scan::Text => {
                if c != '<' {
                    out.push(c);
                    continue;
                }
                match chars.peek() {
                    Some((_, next)) if next.is_whitespace() => out.push(c),
                    _ if input[idx..].starts_with("<!--") => {
                        for _ in 0..3 {
                            chars.next();
                        }
                        scan = Scan::Comment;
                    }
                    _ => scan = Scan::Tag(None),
                }
            }
            Scan::Tag(None) => match c {
                '"' | '\'' => scan = Scan::Tag(Some(c)),
                '>' => scan = Scan::Text,
                _ => {}
            },
            Scan::Tag(Some(quote)) => {
                if c == quote {
                    scan = Scan::Tag(None);
                }
            }
            Scan::Comment => {
                if c == '>' && input[..idx].ends_with("--") {
                    scan = Scan::Text;
                }
            }
        }
    }

    out
}

/// Strips tags and trims whitespace. `None` becomes an empty comment.
pub fn clean_comment(comment: Option<&str>) -> String {
    comment
        .map(|c| strip_tags(c).trim().to_string())
        .unwrap_or_default()
}

/// Escapes text for inclusion in HTML element content or attributes.
pub fn escape_html(input: &str) -> String {
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
    fn test_strip_simple_tags() {
        assert_eq!(strip_tags("<b>bold</b> text"), "bold text");
        assert_eq!(strip_tags("<p>one</p><p>two</p>"), "onetwo");
        assert_eq!(strip_tags("no markup"), "no markup");
    }

    #[test]
    fn test_quoted_gt_does_not_close_tag() {
        assert_eq!(
            strip_tags(r#"<a href="x>y" title='a>b'>link</a>"#),
            "link"
        );
    }

    #[test]
    fn test_html_comments_removed() {
        assert_eq!(strip_tags("a<!-- hidden > still -->b"), "ab");
        assert_eq!(strip_tags("a<!---->b"), "ab");
    }

    #[test]
    fn test_less_than_followed_by_space_is_text() {
        assert_eq!(strip_tags("1 < 2 and <i>3</i>"), "1 < 2 and 3");
    }

    #[test]
    fn test_unterminated_tag_swallows_rest() {
        assert_eq!(strip_tags("keep <script"), "keep ");
    }

    #[test]
    fn test_script_body_is_kept_as_text() {
        assert_eq!(
            strip_tags("<script>alert(1)</script>"),
            "alert(1)"
        );
    }

    #[test]
    fn test_clean_comment_strips_and_trims() {
        assert_eq!(
            clean_comment(Some("  <b>Shipped</b> via UPS \n")),
            "Shipped via UPS"
        );
        assert_eq!(clean_comment(Some("   ")), "");
        assert_eq!(clean_comment(None), "");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }
}
