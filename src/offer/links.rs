use crate::configs::ShopConfig;

/// Builds the public URLs handed out with an offer.
#[derive(Debug, Clone)]
pub struct LinkBuilder {
    public_base: String,
    shop: ShopConfig,
}

impl LinkBuilder {
    pub fn new(public_base: String, shop: ShopConfig) -> Self {
        Self {
            public_base: public_base.trim_end_matches('/').to_string(),
            shop,
        }
    }

    pub fn short_url(&self, token: &str) -> String {
        format!("{}/b/{}", self.public_base, token)
    }

    pub fn qr_url(&self, token: &str) -> String {
        format!("{}/qr/{}.png", self.public_base, token)
    }

    pub fn cart_url(&self, product_id: u64) -> String {
        self.shop.cart_url(product_id)
    }

    pub fn currency(&self) -> &str {
        &self.shop.currency
    }
}
