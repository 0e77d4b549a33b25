//! Customer tools.

mod create;
mod delete;
mod get;
mod list;
mod orders;
mod update;

pub use create::{CreateCustomerParams, CreateCustomerTool};
pub use delete::{DeleteCustomerParams, DeleteCustomerTool};
pub use get::{GetCustomerByIdParams, GetCustomerByIdTool};
pub use list::{GetCustomersParams, GetCustomersTool};
pub use orders::{GetCustomerOrdersParams, GetCustomerOrdersTool};
pub use update::{UpdateCustomerParams, UpdateCustomerTool};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domains::tools::definitions::common::Violations;

pub(crate) const CUSTOMER_SUMMARY: &str = r#"
fragment CustomerSummary on Customer {
  id
  firstName
  lastName
  displayName
  email
  phone
  state
  tags
  numberOfOrders
  amountSpent { amount currencyCode }
  createdAt
  updatedAt
}
"#;

pub(crate) const CUSTOMER_DETAIL: &str = r#"
fragment CustomerDetail on Customer {
  ...CustomerSummary
  note
  verifiedEmail
  taxExempt
  emailMarketingConsent { marketingState marketingOptInLevel }
  defaultAddress { id address1 address2 city province provinceCode country countryCodeV2 zip phone }
  addresses(first: 10) { id address1 address2 city province country zip phone }
}
"#;

/// A postal address.
#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddressInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    /// Province or state code, e.g. `ON`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub province_code: Option<String>,
    /// Two-letter country code, e.g. `CA`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Customer attributes shared by create and update.
#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Phone number in E.164 format, e.g. `+16135551111`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    /// Replaces the full tag list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_exempt: Option<bool>,

    /// Replaces the customer's addresses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub addresses: Option<Vec<AddressInput>>,
}

impl CustomerFields {
    pub(crate) fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.phone.is_none()
            && self.first_name.is_none()
            && self.last_name.is_none()
            && self.note.is_none()
            && self.tags.is_none()
            && self.tax_exempt.is_none()
            && self.addresses.is_none()
    }

    pub(crate) fn check(&self, v: &mut Violations) {
        if let Some(email) = &self.email {
            v.check(looks_like_email(email), "email", "must be an email address");
        }
        if let Some(phone) = &self.phone {
            v.check(looks_like_phone(phone), "phone", "must be in E.164 format, e.g. +16135551111");
        }
        for (i, address) in self.addresses.iter().flatten().enumerate() {
            if let Some(code) = &address.country_code {
                v.check(
                    code.len() == 2 && code.chars().all(|c| c.is_ascii_alphabetic()),
                    &format!("addresses[{i}].countryCode"),
                    "must be a two-letter country code",
                );
            }
        }
    }
}

fn looks_like_email(value: &str) -> bool {
    let Some((local, domain)) = value.trim().split_once('@') else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

fn looks_like_phone(value: &str) -> bool {
    let Some(digits) = value.trim().strip_prefix('+') else {
        return false;
    };
    (7..=15).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit())
}
