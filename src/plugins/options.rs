//! Plugin Option Types
//!
//! One struct per integration, mirroring the option keys each plugin reads.
//! Unknown keys are rejected when parsing.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::EnvSnapshot;

// =============================================================================
// Admin Dashboard
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AdminOptions {
    pub auto_rebuild: bool,
    pub develop: AdminDevelopOptions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AdminDevelopOptions {
    /// Open a browser tab when the dev server starts
    pub open: bool,
}

impl AdminOptions {
    /// `OPEN_BROWSER=false` disables the browser; anything else enables it
    pub fn from_env(env: &EnvSnapshot) -> Self {
        Self {
            auto_rebuild: true,
            develop: AdminDevelopOptions {
                open: env.get("OPEN_BROWSER") != Some("false"),
            },
        }
    }
}

// =============================================================================
// S3 File Storage
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct S3Options {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub s3_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bucket: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_key_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_access_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_control: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_file_duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
}

impl S3Options {
    pub fn from_env(env: &EnvSnapshot) -> Self {
        Self {
            s3_url: env.optional("S3_URL"),
            bucket: env.optional("S3_BUCKET"),
            region: env.optional("S3_REGION"),
            access_key_id: env.optional("S3_ACCESS_KEY_ID"),
            secret_access_key: env.optional("S3_SECRET_ACCESS_KEY"),
            cache_control: env.optional("S3_CACHE_CONTROL"),
            download_file_duration: env.optional("S3_DOWNLOAD_FILE_DURATION"),
            prefix: env.optional("S3_PREFIX"),
        }
    }
}

// =============================================================================
// Stripe Payments
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StripeOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_secret: Option<String>,
}

impl StripeOptions {
    pub fn from_env(env: &EnvSnapshot) -> Self {
        Self {
            api_key: env.optional("STRIPE_API_KEY"),
            webhook_secret: env.optional("STRIPE_WEBHOOK_SECRET"),
        }
    }
}

// =============================================================================
// Nodemailer Email
// =============================================================================

pub const SENDER_EMAIL: &str = "noreply@ayla.shop";
pub const SMTP_HOST: &str = "smtp.hostinger.com";
pub const SMTP_PORT: u16 = 465;
pub const EMAIL_TEMPLATE_PATH: &str = "data/templates";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NodemailerOptions {
    pub from_email: String,
    /// Passed verbatim to the SMTP transport factory
    pub transport: SmtpTransport,
    pub email_template_path: String,
    /// Event name -> template directory; only mapped events are subscribed
    pub template_map: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SmtpTransport {
    pub host: String,
    pub port: u16,
    pub secure_connection: bool,
    pub auth: SmtpAuth,
    pub tls: SmtpTls,
    #[serde(rename = "requireTLS")]
    pub require_tls: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SmtpAuth {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pass: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SmtpTls {
    pub ciphers: String,
}

impl NodemailerOptions {
    pub fn from_env(env: &EnvSnapshot) -> Self {
        let template_map = [
            ("order.placed", "orderplaced"),
            ("user.password.reset", "userpasswordreset"),
        ]
        .into_iter()
        .map(|(event, template)| (event.to_string(), template.to_string()))
        .collect();

        Self {
            from_email: SENDER_EMAIL.to_string(),
            transport: SmtpTransport {
                host: SMTP_HOST.to_string(),
                port: SMTP_PORT,
                secure_connection: false,
                auth: SmtpAuth {
                    user: env.optional("EMAIL_SENDER_ADDRESS"),
                    pass: env.optional("EMAIL_SENDER_PASS"),
                },
                tls: SmtpTls {
                    ciphers: "SSLv3".to_string(),
                },
                require_tls: true,
            },
            email_template_path: EMAIL_TEMPLATE_PATH.to_string(),
            template_map,
        }
    }
}

// =============================================================================
// Meilisearch
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MeilisearchOptions {
    pub config: MeilisearchClient,
    /// Index name -> index configuration
    pub settings: BTreeMap<String, MeilisearchIndex>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct MeilisearchClient {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MeilisearchIndex {
    pub index_settings: IndexSettings,
    pub primary_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct IndexSettings {
    pub searchable_attributes: Vec<String>,
    pub displayed_attributes: Vec<String>,
}

impl MeilisearchOptions {
    pub fn from_env(env: &EnvSnapshot) -> Self {
        let products = MeilisearchIndex {
            index_settings: IndexSettings {
                searchable_attributes: to_strings(&["title", "description", "variant_sku"]),
                displayed_attributes: to_strings(&[
                    "title",
                    "description",
                    "variant_sku",
                    "thumbnail",
                    "handle",
                ]),
            },
            primary_key: "id".to_string(),
        };

        Self {
            config: MeilisearchClient {
                host: env.optional("MEILISEARCH_HOST"),
                api_key: env.optional("MEILISEARCH_API_KEY"),
            },
            settings: BTreeMap::from([("products".to_string(), products)]),
        }
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
