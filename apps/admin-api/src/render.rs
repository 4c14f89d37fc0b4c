//! HTML for the order view's comment-history block.
//!
//! The admin page swaps this fragment in after a successful submission.

use statusguard_core::sanitize::escape_html;
use statusguard_core::{Order, OrderWorkflow, StatusHistoryEntry};

/// Renders the history block for `order`, newest entry first.
pub fn render_history_block(
    order: &Order,
    entries: &[StatusHistoryEntry],
    workflow: Option<&OrderWorkflow>,
) -> String {
    let label = |status: &str| -> String {
        workflow
            .and_then(|w| w.status_label(status))
            .unwrap_or(status)
            .to_string()
    };

    let mut html = String::new();
    html.push_str(&format!(
        "<section id=\"order_history_block\" class=\"edit-order-comments\" data-order-id=\"{}\">\n",
        order.id
    ));
    html.push_str(&format!(
        "  <div class=\"order-status\">Status: <span>{}</span></div>\n",
        escape_html(&label(&order.status))
    ));
    html.push_str("  <ul class=\"note-list\">\n");

    for entry in entries {
        html.push_str("    <li class=\"note-list-item\">\n");
        html.push_str(&format!(
            "      <span class=\"note-list-date\">{}</span>\n",
            entry.created_at.format("%b %-d, %Y %-I:%M:%S %p")
        ));
        if let Some(status) = entry.status.as_deref() {
            html.push_str(&format!(
                "      <span class=\"note-list-status\">{}</span>\n",
                escape_html(&label(status))
            ));
        }
        html.push_str(&format!(
            "      <span class=\"note-list-customer\">Customer {}</span>\n",
            if entry.is_customer_notified {
                "Notified"
            } else {
                "Not Notified"
            }
        ));
        if let Some(comment) = entry.comment.as_deref().filter(|c| !c.is_empty()) {
            html.push_str(&format!(
                "      <div class=\"note-list-comment\">{}</div>\n",
                escape_html(comment)
            ));
        }
        html.push_str("    </li>\n");
    }

    html.push_str("  </ul>\n</section>\n");
    html
}
