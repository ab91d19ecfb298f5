use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use serde_json::Value;

use super::{catalog::Product, links::LinkBuilder};

/// Plain-text description limit, in characters.
pub const DESCRIPTION_MAX_CHARS: usize = 160;

/// What the overlay shows for a purchasable product.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSnapshot {
    pub id: u64,
    pub name: String,
    pub sku: String,
    pub price: f64,
    pub price_formatted: String,
    pub currency: String,
    pub image: Option<String>,
    pub description: String,
    pub permalink: Option<String>,
    pub purchase_url: String,
    pub short_url: String,
    pub qr_url: String,
    pub token: String,
}

impl ProductSnapshot {
    pub fn build(product: &Product, token: &str, links: &LinkBuilder) -> Self {
        let price = parse_price(product.price.as_ref());
        let description = if product.short_description.trim().is_empty() {
            &product.description
        } else {
            &product.short_description
        };

        Self {
            id: product.id,
            name: product.name.clone(),
            sku: product.sku.clone(),
            price,
            price_formatted: format_price(price, links.currency()),
            currency: links.currency().to_string(),
            image: product.image().map(str::to_string),
            description: plain_text(description, DESCRIPTION_MAX_CHARS),
            permalink: product.permalink.clone(),
            purchase_url: links.cart_url(product.id),
            short_url: links.short_url(token),
            qr_url: links.qr_url(token),
            token: token.to_string(),
        }
    }
}

/// Missing, non-numeric or non-finite prices count as zero.
pub fn parse_price(raw: Option<&Value>) -> f64 {
    let price = match raw {
        Some(Value::String(s)) => s.trim().parse::<f64>().unwrap_or(0.0),
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        _ => 0.0,
    };
    if price.is_finite() { price } else { 0.0 }
}

pub fn format_price(price: f64, currency: &str) -> String {
    format!("{} {:.2}", currency, price)
}

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<[^<>]*>"#).expect("tag pattern"));
static NUMERIC_ENTITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&#(\d{1,7});").expect("entity pattern"));

/// Drops tags, decodes the common entities, collapses whitespace and cuts the
/// result to at most `max_chars` characters.
pub fn plain_text(html: &str, max_chars: usize) -> String {
    let stripped = TAG_RE.replace_all(html, " ");
    let decoded = decode_entities(&stripped);
    let collapsed = decoded.split_whitespace().collect::<Vec<_>>().join(" ");

    if collapsed.chars().count() <= max_chars {
        return collapsed;
    }
    collapsed
        .chars()
        .take(max_chars)
        .collect::<String>()
        .trim_end()
        .to_string()
}

fn decode_entities(text: &str) -> String {
    let named = text
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&hellip;", "\u{2026}");

    let numeric = NUMERIC_ENTITY_RE.replace_all(&named, |caps: &regex::Captures| {
        caps[1]
            .parse::<u32>()
            .ok()
            .and_then(char::from_u32)
            .map(String::from)
            .unwrap_or_default()
    });

    // last, so "&amp;lt;" stays literal
    numeric.replace("&amp;", "&")
}
