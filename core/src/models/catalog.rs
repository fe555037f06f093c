// farmacart/src/models/catalog.rs

//! Records rendered by the admin, seller and marketing list views.
//! Only the columns those views show are modelled; unknown fields are ignored.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
  pub id: i64,
  pub name: String,
  #[serde(default)]
  pub parent_id: Option<i64>,
  #[serde(default = "enabled")]
  pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceList {
  pub id: i64,
  pub name: String,
  /// Percentage applied over base price by the backend. Informational on the client.
  #[serde(default)]
  pub markup_percent: f64,
  #[serde(default = "enabled")]
  pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesGroup {
  pub id: i64,
  pub name: String,
  #[serde(default)]
  pub price_list_id: Option<i64>,
  #[serde(default)]
  pub member_count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
  Admin,
  Seller,
  Marketing,
  Customer,
}

impl Role {
  /// Roles that get a dashboard in addition to the storefront.
  pub fn has_dashboard(self) -> bool {
    !matches!(self, Role::Customer)
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
  pub id: i64,
  pub email: String,
  #[serde(default)]
  pub full_name: Option<String>,
  pub role: Role,
  #[serde(default)]
  pub sales_group_id: Option<i64>,
  #[serde(default = "enabled")]
  pub is_active: bool,
}

fn enabled() -> bool {
  true
}
