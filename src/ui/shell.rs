//! Page shell and landing page.

use super::card::{Card, render_card_grid};
use super::escape::html_escape;
use super::popup::POPUP_ROOT_ID;
use crate::navigation::OPEN_DEEP_LINK_EVENT;

/// Generate the HTML shell for a page.
///
/// The shell loads HTMX and opens deep links announced by the server through
/// the `open-deep-link` trigger event in a new browsing context.
#[must_use]
pub fn html_shell(site_name: &str, title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{title} - {site}</title>
    <script src="/static/vendor/htmx-2.0.8.min.js"></script>
    <link rel="stylesheet" href="/static/app.css">
</head>
<body class="min-h-screen bg-white text-gray-900 antialiased"
      hx-on:{event}="window.open(event.detail.url, '_blank')">
    <header class="w-full shadow-sm">
        <div class="container mx-auto flex h-16 items-center justify-between px-4 max-w-5xl">
            <a href="/" class="font-semibold text-lg">{site}</a>
        </div>
    </header>
    <main id="app" class="container mx-auto px-4 py-8 max-w-5xl">
        {content}
    </main>
    <div id="{root}"></div>
</body>
</html>"#,
        title = html_escape(title),
        site = html_escape(site_name),
        event = OPEN_DEEP_LINK_EVENT,
        root = POPUP_ROOT_ID,
    )
}

/// Landing page content: the card grid and a button that mounts the popup.
#[must_use]
pub fn landing_content(cards: &[Card]) -> String {
    format!(
        r##"<div class="space-y-8">
    {grid}
    <div class="text-center">
        <button type="button" class="bg-blue-500 text-white rounded px-6 py-3"
            hx-post="/popup" hx-target="#{root}" hx-swap="innerHTML">Contact us</button>
    </div>
</div>"##,
        grid = render_card_grid(cards),
        root = POPUP_ROOT_ID,
    )
}
