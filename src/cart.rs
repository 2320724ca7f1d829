//! Cart summaries sent to the shop over a messaging deep link.
//!
//! The checkout flow hands over the cart and the customer's contact details;
//! [`build_message`] turns them into an itemized text with a subtotal and
//! returns the deep link that opens a chat pre-filled with it.

use std::num::NonZeroU32;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::deeplink::DeepLinkTarget;
use crate::money::{DEFAULT_CURRENCY_SYMBOL, Price, format_cents};

/// Errors related to cart summaries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// An item is priced in a different currency than the first item
    /// (index, item symbol, cart symbol).
    #[error("Item {0} is priced in {1:?}, but the cart is priced in {2:?}")]
    CurrencyMismatch(usize, String, String),

    /// The total no longer fits in a decimal (index of the item that overflowed).
    #[error("Cart total overflows at item {0}")]
    Overflow(usize),
}

/// A product as listed in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Display name.
    pub name: String,
    /// Unit price with its currency symbol.
    pub price: Price,
}

/// A product and how many of it the customer wants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub product: Product,
    pub quantity: NonZeroU32,
}

/// Contact details entered at checkout. Inserted into the message verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

/// Sum of unit price times quantity over all items.
///
/// Returns the currency symbol shared by the items together with the exact
/// total. An empty cart totals zero in [`DEFAULT_CURRENCY_SYMBOL`].
///
/// # Errors
///
/// Returns [`CartError::CurrencyMismatch`] if items use different symbols and
/// [`CartError::Overflow`] if the total exceeds the decimal range.
pub fn subtotal(items: &[CartItem]) -> Result<(&str, Decimal), CartError> {
    let symbol = items
        .first()
        .map_or(DEFAULT_CURRENCY_SYMBOL, |item| item.product.price.symbol());

    items
        .iter()
        .enumerate()
        .try_fold(Decimal::ZERO, |total, (i, item)| {
            let price = &item.product.price;
            if price.symbol() != symbol {
                return Err(CartError::CurrencyMismatch(
                    i,
                    price.symbol().to_string(),
                    symbol.to_string(),
                ));
            }
            price
                .amount()
                .checked_mul(Decimal::from(item.quantity.get()))
                .and_then(|line| total.checked_add(line))
                .ok_or(CartError::Overflow(i))
        })
        .map(|total| (symbol, total))
}

/// Compose the plain-text cart summary (before percent-encoding).
///
/// # Errors
///
/// Returns a [`CartError`] if the subtotal cannot be computed.
pub fn compose_cart_message(items: &[CartItem], contact: &ContactInfo) -> Result<String, CartError> {
    let (symbol, total) = subtotal(items)?;

    let details = items
        .iter()
        .map(|item| {
            format!(
                "\nName: {}\nQuantity: {}\nPrice: {}\n",
                item.product.name, item.quantity, item.product.price
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let message = format!(
        "*Product Summary:*\n{details}\n\n*Subtotal:* {symbol}{subtotal}\n\n*User Info:*\nName: {name}\nEmail: {email}\nPhone: {phone}\nAddress: {address}",
        subtotal = format_cents(total),
        name = contact.name,
        email = contact.email,
        phone = contact.phone,
        address = contact.address,
    );

    Ok(message.trim().to_string())
}

/// Build the deep link that opens a chat with the cart summary pre-filled.
///
/// # Errors
///
/// Returns a [`CartError`] if the subtotal cannot be computed.
pub fn build_message(
    items: &[CartItem],
    contact: &ContactInfo,
    target: &DeepLinkTarget,
) -> Result<String, CartError> {
    let message = compose_cart_message(items, contact)?;
    let url = target.link(&message);

    tracing::info!(
        name: "cart.link.built",
        items = items.len(),
        recipient = %target.recipient(),
        message_length = message.len(),
        "Cart deep link built"
    );

    Ok(url)
}
