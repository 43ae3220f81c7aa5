use serde::{Deserialize, Serialize};

/// Details of a card to create.
///
/// Every field is optional so that partially filled requests can be
/// reported precisely; [`NewCard::missing_fields`] lists what is still
/// required. `callback_url` is the only truly optional field.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct NewCard {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(|s| s.trim().is_empty())
}

impl NewCard {
    /// Required fields that are absent or blank, in declaration order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if is_blank(&self.currency) {
            missing.push("currency");
        }
        if self.amount.is_none() {
            missing.push("amount");
        }
        let billing = [
            ("billing_name", &self.billing_name),
            ("billing_address", &self.billing_address),
            ("billing_city", &self.billing_city),
            ("billing_state", &self.billing_state),
            ("billing_postal_code", &self.billing_postal_code),
            ("billing_country", &self.billing_country),
        ];
        for (name, value) in billing {
            if is_blank(value) {
                missing.push(name);
            }
        }
        missing
    }
}
