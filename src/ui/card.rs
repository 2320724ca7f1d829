//! Product card: an image tile linking to a product or collection page.

use serde::{Deserialize, Serialize};

use super::escape::html_escape;

/// Content of one card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Image URL. An empty value renders as a broken image.
    pub image: String,
    /// Title drawn over the image; also the image's alt text.
    pub title: String,
    /// Paragraph below the image.
    pub paragraph: String,
    /// Where the whole tile links to.
    pub link: String,
}

/// Render a card as a clickable tile.
///
/// # Example
///
/// ```rust
/// use bedwood_storefront::ui::{Card, render_card};
///
/// let html = render_card(&Card {
///     image: "/static/sofa.jpg".into(),
///     title: "Sofas".into(),
///     paragraph: "Three-seaters in teak and linen".into(),
///     link: "/collections/sofas".into(),
/// });
/// assert!(html.starts_with(r#"<a href="/collections/sofas""#));
/// ```
#[must_use]
pub fn render_card(card: &Card) -> String {
    format!(
        r#"<a href="{link}" class="relative w-full max-w-lg overflow-hidden block">
    <div class="aspect-[1.5/1] shadow-md">
        <img src="{image}" alt="{title}" class="w-full h-full object-cover">
        <div class="absolute top-0 left-0 p-4 bg-opacity-0 text-black">
            <h3 class="text-lg font-bold mb-2">{title}</h3>
        </div>
    </div>
    <div class="py-1">
        <p class="text-base font-medium font-sans">{paragraph}</p>
    </div>
</a>"#,
        link = html_escape(&card.link),
        image = html_escape(&card.image),
        title = html_escape(&card.title),
        paragraph = html_escape(&card.paragraph),
    )
}

/// Render cards in a responsive grid.
#[must_use]
pub fn render_card_grid(cards: &[Card]) -> String {
    let tiles: String = cards.iter().map(render_card).collect();
    format!(r#"<section class="grid gap-6 md:grid-cols-2 lg:grid-cols-3">{tiles}</section>"#)
}
