//! Plugin Descriptors
//!
//! The ordered list of integrations handed to the host framework. Order is
//! significant: the host registers plugins in sequence and later entries may
//! rely on earlier ones.
//!
//! Wire shapes:
//! - bare name: `"medusa-payment-manual"`
//! - resolve only: `{ "resolve": "medusa-plugin-wishlist" }`
//! - with options: `{ "resolve": "medusa-file-s3", "options": { ... } }`

mod options;

pub use options::*;

use serde::de::{self, DeserializeOwned, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::EnvSnapshot;
use crate::types::{ConfigError, Result};

pub const FULFILLMENT_MANUAL: &str = "medusa-fulfillment-manual";
pub const PAYMENT_MANUAL: &str = "medusa-payment-manual";
pub const ADMIN: &str = "@medusajs/admin";
pub const FILE_S3: &str = "medusa-file-s3";
pub const PAYMENT_STRIPE: &str = "medusa-payment-stripe";
pub const WISHLIST: &str = "medusa-plugin-wishlist";
pub const DISCOUNT_GENERATOR: &str = "medusa-plugin-discount-generator";
pub const RESTOCK_NOTIFICATION: &str = "medusa-plugin-restock-notification";
pub const NODEMAILER: &str = "medusa-plugin-nodemailer";
pub const MEILISEARCH: &str = "medusa-plugin-meilisearch";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plugin {
    FulfillmentManual,
    PaymentManual,
    Admin(AdminOptions),
    FileS3(S3Options),
    PaymentStripe(StripeOptions),
    Wishlist,
    DiscountGenerator,
    RestockNotification,
    Nodemailer(NodemailerOptions),
    Meilisearch(MeilisearchOptions),
}

/// How a plugin appears in the exported list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    Bare,
    ResolveOnly,
    WithOptions,
}

impl Plugin {
    /// Package name the host resolves
    pub fn resolve(&self) -> &'static str {
        match self {
            Plugin::FulfillmentManual => FULFILLMENT_MANUAL,
            Plugin::PaymentManual => PAYMENT_MANUAL,
            Plugin::Admin(_) => ADMIN,
            Plugin::FileS3(_) => FILE_S3,
            Plugin::PaymentStripe(_) => PAYMENT_STRIPE,
            Plugin::Wishlist => WISHLIST,
            Plugin::DiscountGenerator => DISCOUNT_GENERATOR,
            Plugin::RestockNotification => RESTOCK_NOTIFICATION,
            Plugin::Nodemailer(_) => NODEMAILER,
            Plugin::Meilisearch(_) => MEILISEARCH,
        }
    }

    fn shape(&self) -> Shape {
        match self {
            Plugin::FulfillmentManual | Plugin::PaymentManual => Shape::Bare,
            Plugin::Wishlist | Plugin::DiscountGenerator | Plugin::RestockNotification => {
                Shape::ResolveOnly
            }
            _ => Shape::WithOptions,
        }
    }

    pub fn has_options(&self) -> bool {
        self.shape() == Shape::WithOptions
    }

    /// Parse a single list entry, rejecting unknown plugins and option keys.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::String(name) => Self::from_parts(&name, None),
            Value::Object(mut entry) => {
                let name = match entry.remove("resolve") {
                    Some(Value::String(name)) => name,
                    Some(other) => {
                        return Err(ConfigError::InvalidPlugin(format!(
                            "resolve must be a string, got {}",
                            other
                        )));
                    }
                    None => {
                        return Err(ConfigError::InvalidPlugin(
                            "missing resolve field".to_string(),
                        ));
                    }
                };
                let options = entry.remove("options");
                if let Some(key) = entry.keys().next() {
                    return Err(ConfigError::InvalidPlugin(format!(
                        "unknown field '{}' in {}",
                        key, name
                    )));
                }
                Self::from_parts(&name, options)
            }
            other => Err(ConfigError::InvalidPlugin(format!(
                "expected a name or an object, got {}",
                other
            ))),
        }
    }

    fn from_parts(name: &str, options: Option<Value>) -> Result<Self> {
        match name {
            FULFILLMENT_MANUAL => no_options(name, options, Plugin::FulfillmentManual),
            PAYMENT_MANUAL => no_options(name, options, Plugin::PaymentManual),
            WISHLIST => no_options(name, options, Plugin::Wishlist),
            DISCOUNT_GENERATOR => no_options(name, options, Plugin::DiscountGenerator),
            RESTOCK_NOTIFICATION => no_options(name, options, Plugin::RestockNotification),
            ADMIN => Ok(Plugin::Admin(parse_options(options)?)),
            FILE_S3 => Ok(Plugin::FileS3(parse_options(options)?)),
            PAYMENT_STRIPE => Ok(Plugin::PaymentStripe(parse_options(options)?)),
            NODEMAILER => Ok(Plugin::Nodemailer(parse_options(options)?)),
            MEILISEARCH => Ok(Plugin::Meilisearch(parse_options(options)?)),
            other => Err(ConfigError::UnknownPlugin(other.to_string())),
        }
    }
}

fn no_options(name: &str, options: Option<Value>, plugin: Plugin) -> Result<Plugin> {
    match options {
        None | Some(Value::Null) => Ok(plugin),
        Some(Value::Object(map)) if map.is_empty() => Ok(plugin),
        Some(_) => Err(ConfigError::InvalidPlugin(format!(
            "{} takes no options",
            name
        ))),
    }
}

fn parse_options<T: DeserializeOwned>(options: Option<Value>) -> Result<T> {
    let value = options.unwrap_or_else(|| Value::Object(Map::new()));
    Ok(serde_json::from_value(value)?)
}

impl Serialize for Plugin {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self.shape() {
            Shape::Bare => serializer.serialize_str(self.resolve()),
            Shape::ResolveOnly => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("resolve", self.resolve())?;
                map.end()
            }
            Shape::WithOptions => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("resolve", self.resolve())?;
                match self {
                    Plugin::Admin(opts) => map.serialize_entry("options", opts)?,
                    Plugin::FileS3(opts) => map.serialize_entry("options", opts)?,
                    Plugin::PaymentStripe(opts) => map.serialize_entry("options", opts)?,
                    Plugin::Nodemailer(opts) => map.serialize_entry("options", opts)?,
                    Plugin::Meilisearch(opts) => map.serialize_entry("options", opts)?,
                    _ => {}
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Plugin {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Plugin::from_value(value).map_err(de::Error::custom)
    }
}

/// Build the plugin list in registration order.
pub fn assemble(env: &EnvSnapshot) -> Vec<Plugin> {
    vec![
        Plugin::FulfillmentManual,
        Plugin::PaymentManual,
        Plugin::Admin(AdminOptions::from_env(env)),
        Plugin::FileS3(S3Options::from_env(env)),
        Plugin::PaymentStripe(StripeOptions::from_env(env)),
        Plugin::Wishlist,
        Plugin::DiscountGenerator,
        Plugin::RestockNotification,
        Plugin::Nodemailer(NodemailerOptions::from_env(env)),
        Plugin::Meilisearch(MeilisearchOptions::from_env(env)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const ORDER: [&str; 10] = [
        FULFILLMENT_MANUAL,
        PAYMENT_MANUAL,
        ADMIN,
        FILE_S3,
        PAYMENT_STRIPE,
        WISHLIST,
        DISCOUNT_GENERATOR,
        RESTOCK_NOTIFICATION,
        NODEMAILER,
        MEILISEARCH,
    ];

    fn names(plugins: &[Plugin]) -> Vec<&'static str> {
        plugins.iter().map(Plugin::resolve).collect()
    }

    #[test]
    fn test_order_is_stable_across_environments() {
        let empty = assemble(&EnvSnapshot::default());
        let full = assemble(&EnvSnapshot::from_pairs([
            ("OPEN_BROWSER", "false"),
            ("S3_BUCKET", "media"),
            ("STRIPE_API_KEY", "sk_live"),
            ("MEILISEARCH_HOST", "http://search:7700"),
        ]));

        assert_eq!(names(&empty), ORDER);
        assert_eq!(names(&full), ORDER);
    }

    #[test]
    fn test_serialized_shapes() {
        let value = serde_json::to_value(assemble(&EnvSnapshot::default())).unwrap();
        let list = value.as_array().unwrap();

        assert_eq!(list[0], json!("medusa-fulfillment-manual"));
        assert_eq!(list[1], json!("medusa-payment-manual"));
        assert_eq!(list[2]["resolve"], "@medusajs/admin");
        assert_eq!(list[2]["options"]["autoRebuild"], true);
        assert_eq!(list[2]["options"]["develop"]["open"], true);
        assert_eq!(list[3], json!({ "resolve": "medusa-file-s3", "options": {} }));
        assert_eq!(list[5], json!({ "resolve": "medusa-plugin-wishlist" }));
        assert_eq!(list[7], json!({ "resolve": "medusa-plugin-restock-notification" }));
    }

    #[test]
    fn test_parse_accepts_both_name_forms() {
        let bare = Plugin::from_value(json!("medusa-plugin-wishlist")).unwrap();
        let object = Plugin::from_value(json!({ "resolve": "medusa-payment-manual" })).unwrap();

        assert_eq!(bare, Plugin::Wishlist);
        assert_eq!(object, Plugin::PaymentManual);
    }

    #[test]
    fn test_parse_round_trips_assembled_list() {
        let env = EnvSnapshot::from_pairs([
            ("S3_URL", "https://media.example"),
            ("EMAIL_SENDER_PASS", "pw"),
        ]);
        let plugins = assemble(&env);
        let json = serde_json::to_string(&plugins).unwrap();
        let parsed: Vec<Plugin> = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, plugins);
    }

    #[test]
    fn test_unknown_plugin_rejected() {
        let err = Plugin::from_value(json!("medusa-plugin-ses")).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownPlugin(name) if name == "medusa-plugin-ses"));
    }

    #[test]
    fn test_unknown_entry_field_rejected() {
        let err = Plugin::from_value(json!({
            "resolve": "medusa-plugin-wishlist",
            "enabled": true
        }))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPlugin(_)));
    }

    #[test]
    fn test_options_on_bare_plugin_rejected() {
        let err = Plugin::from_value(json!({
            "resolve": "medusa-fulfillment-manual",
            "options": { "auto": true }
        }))
        .unwrap_err();
        assert!(err.to_string().contains("takes no options"));
    }

    #[test]
    fn test_unknown_option_key_rejected() {
        let err = Plugin::from_value(json!({
            "resolve": "medusa-payment-stripe",
            "options": { "api_key": "sk", "automatic_payment_methods": true }
        }))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_has_options() {
        assert!(!Plugin::FulfillmentManual.has_options());
        assert!(!Plugin::Wishlist.has_options());
        assert!(Plugin::PaymentStripe(StripeOptions::default()).has_options());
    }
}
