//! Payment provider webhook events.
//!
//! Defines the payload shape delivered by the payment provider and the closed
//! vocabulary of event kinds we recognize. Only the kind and the customer
//! email affect membership; the remaining fields are kept for logging and are
//! typed loosely so an odd value there never rejects a delivery.

use serde::{Deserialize, Deserializer, Serialize};

/// Webhook payload as delivered by the payment provider.
///
/// Every field is optional; a payload with no `event`, or a non-string one, is
/// treated as an unknown kind rather than rejected.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct WebhookEvent {
    /// Event name (e.g., "purchase_approved").
    #[serde(default)]
    pub event: Option<serde_json::Value>,

    #[serde(default, deserialize_with = "lenient")]
    pub order: Option<OrderInfo>,

    #[serde(default)]
    pub customer: Option<CustomerInfo>,

    #[serde(default, deserialize_with = "lenient")]
    pub product: Option<ProductInfo>,

    #[serde(default, deserialize_with = "lenient")]
    pub subscription: Option<SubscriptionInfo>,
}

/// Decode a log-only block, dropping it when its shape is unexpected.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Order details. Providers send ids and amounts as either strings or numbers.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OrderInfo {
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    #[serde(default)]
    pub amount: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CustomerInfo {
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ProductInfo {
    #[serde(default)]
    pub name: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SubscriptionInfo {
    #[serde(default)]
    pub id: Option<serde_json::Value>,
}

impl WebhookEvent {
    /// Parse the event name into a known kind.
    pub fn kind(&self) -> EventKind {
        match &self.event {
            Some(serde_json::Value::String(name)) => EventKind::parse(name),
            Some(serde_json::Value::Null) | None => EventKind::Unknown(String::new()),
            Some(other) => EventKind::Unknown(other.to_string()),
        }
    }

    /// Customer email, if the payload carries one.
    pub fn customer_email(&self) -> Option<&str> {
        self.customer.as_ref().and_then(|c| c.email.as_deref())
    }

    pub fn order_id(&self) -> Option<String> {
        self.order.as_ref().and_then(|o| o.id.as_ref()).map(display_value)
    }

    pub fn order_amount(&self) -> Option<String> {
        self.order
            .as_ref()
            .and_then(|o| o.amount.as_ref())
            .map(display_value)
    }

    pub fn product_name(&self) -> Option<String> {
        self.product
            .as_ref()
            .and_then(|p| p.name.as_ref())
            .map(display_value)
    }

    pub fn subscription_id(&self) -> Option<String> {
        self.subscription
            .as_ref()
            .and_then(|s| s.id.as_ref())
            .map(display_value)
    }
}

fn display_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Payment method for "payment generated" notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    Pix,
    Boleto,
    PicPay,
}

/// Known webhook event kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    PurchaseApproved,
    PurchaseRefused,
    /// A payment slip or instant-payment code was issued; nothing is paid yet.
    PaymentGenerated(PaymentMethod),
    Chargeback,
    Refund,
    SubscriptionCreated,
    SubscriptionCanceled,
    SubscriptionRenewed,
    SubscriptionRenewalRefused,
    /// Unrecognized or missing event name.
    Unknown(String),
}

/// What an event does to the buyer list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MembershipAction {
    /// Add the customer to the list.
    Grant,
    /// Remove the customer from the list.
    Revoke,
    /// Log only.
    Observe,
}

impl EventKind {
    /// Parse an event name. Never fails; unrecognized names become `Unknown`.
    pub fn parse(s: &str) -> Self {
        match s {
            "purchase_approved" => Self::PurchaseApproved,
            "purchase_refused" => Self::PurchaseRefused,
            "pix_gerado" => Self::PaymentGenerated(PaymentMethod::Pix),
            "boleto_gerado" => Self::PaymentGenerated(PaymentMethod::Boleto),
            "picpay_gerado" => Self::PaymentGenerated(PaymentMethod::PicPay),
            "chargeback" => Self::Chargeback,
            "refund" => Self::Refund,
            "subscription_created" => Self::SubscriptionCreated,
            "subscription_canceled" => Self::SubscriptionCanceled,
            "subscription_renewed" => Self::SubscriptionRenewed,
            "subscription_renewal_refused" => Self::SubscriptionRenewalRefused,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Wire name of the event.
    pub fn as_str(&self) -> &str {
        match self {
            Self::PurchaseApproved => "purchase_approved",
            Self::PurchaseRefused => "purchase_refused",
            Self::PaymentGenerated(PaymentMethod::Pix) => "pix_gerado",
            Self::PaymentGenerated(PaymentMethod::Boleto) => "boleto_gerado",
            Self::PaymentGenerated(PaymentMethod::PicPay) => "picpay_gerado",
            Self::Chargeback => "chargeback",
            Self::Refund => "refund",
            Self::SubscriptionCreated => "subscription_created",
            Self::SubscriptionCanceled => "subscription_canceled",
            Self::SubscriptionRenewed => "subscription_renewed",
            Self::SubscriptionRenewalRefused => "subscription_renewal_refused",
            Self::Unknown(name) => name,
        }
    }

    /// Membership effect of this kind.
    pub fn action(&self) -> MembershipAction {
        match self {
            Self::PurchaseApproved | Self::SubscriptionCreated | Self::SubscriptionRenewed => {
                MembershipAction::Grant
            }
            Self::SubscriptionCanceled
            | Self::SubscriptionRenewalRefused
            | Self::Refund
            | Self::Chargeback => MembershipAction::Revoke,
            Self::PurchaseRefused | Self::PaymentGenerated(_) | Self::Unknown(_) => {
                MembershipAction::Observe
            }
        }
    }
}
