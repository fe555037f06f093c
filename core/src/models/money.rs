// farmacart/src/models/money.rs

//! Exact money arithmetic. The backend sends prices as JSON numbers; they are held here
//! as integer minor units so cart totals never accumulate float error.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money {
  cents: i64,
}

impl Money {
  pub const ZERO: Money = Money { cents: 0 };

  pub const fn from_cents(cents: i64) -> Self {
    Money { cents }
  }

  /// Rounds half away from zero to the nearest cent.
  pub fn from_major(amount: f64) -> Self {
    Money {
      cents: (amount * 100.0).round() as i64,
    }
  }

  pub const fn cents(self) -> i64 {
    self.cents
  }

  pub fn as_major(self) -> f64 {
    self.cents as f64 / 100.0
  }

  pub fn times(self, quantity: u32) -> Self {
    Money {
      cents: self.cents * i64::from(quantity),
    }
  }
}

impl Add for Money {
  type Output = Money;

  fn add(self, rhs: Money) -> Money {
    Money {
      cents: self.cents + rhs.cents,
    }
  }
}

impl Sum for Money {
  fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
    iter.fold(Money::ZERO, Add::add)
  }
}

impl fmt::Display for Money {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let sign = if self.cents < 0 { "-" } else { "" };
    let abs = self.cents.unsigned_abs();
    write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
  }
}

impl Serialize for Money {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(self.as_major())
  }
}

impl<'de> Deserialize<'de> for Money {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    // Some endpoints serialize decimals as strings.
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
      Number(f64),
      Text(String),
    }

    match Raw::deserialize(deserializer)? {
      Raw::Number(n) => Ok(Money::from_major(n)),
      Raw::Text(s) => s
        .trim()
        .parse::<f64>()
        .map(Money::from_major)
        .map_err(|e| serde::de::Error::custom(format!("invalid price '{}': {}", s, e))),
    }
  }
}
