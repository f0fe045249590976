use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;
use uuid::Uuid;

/// Absolute tolerance when comparing a reported total against
/// quantity x unit_price. Anything beyond one cent is recomputed.
const TOTAL_PRICE_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Kind of financial transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Sale,
    Purchase,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Sale => "sale",
            TransactionType::Purchase => "purchase",
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = ();

    /// Lenient parse of the service-reported type. "expense" is treated as a
    /// purchase; anything else is rejected and the candidate dropped.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sale" | "sales" => Ok(TransactionType::Sale),
            "purchase" | "expense" => Ok(TransactionType::Purchase),
            _ => Err(()),
        }
    }
}

/// A persisted financial record, the terminal artifact of a pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub translated_text_id: Uuid,
    pub product_name: String,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub total_price: Decimal,
    pub transaction_type: TransactionType,
    pub created_at: DateTime<Utc>,
}

/// Wire shape of a financial record in pipeline responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialRecordResponse {
    pub product_name: String,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub total_price: Decimal,
    pub transaction_type: TransactionType,
}

impl From<FinancialRecord> for FinancialRecordResponse {
    fn from(record: FinancialRecord) -> Self {
        FinancialRecordResponse {
            product_name: record.product_name,
            quantity: record.quantity,
            unit_price: record.unit_price,
            total_price: record.total_price,
            transaction_type: record.transaction_type,
        }
    }
}

/// A schema-validated record ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFinancialRecord {
    pub product_name: String,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub total_price: Decimal,
    pub transaction_type: TransactionType,
}

/// A raw record candidate as reported by the extraction service, before
/// schema validation. Field aliases cover the short key names the model
/// sometimes emits despite the schema instruction.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordCandidate {
    #[serde(alias = "product", alias = "item")]
    pub product_name: Option<String>,
    #[serde(alias = "qty")]
    pub quantity: Option<i64>,
    #[serde(alias = "price")]
    pub unit_price: Option<Decimal>,
    #[serde(alias = "total")]
    pub total_price: Option<Decimal>,
    #[serde(alias = "type")]
    pub transaction_type: Option<String>,
}

impl RecordCandidate {
    /// Parse one element of the service's top-level array. A malformed
    /// element yields `None` and is dropped rather than failing the run.
    pub fn from_value(value: serde_json::Value) -> Option<Self> {
        serde_json::from_value(value).ok()
    }
}

impl NewFinancialRecord {
    /// Validate a candidate against the record schema, dropping it on any
    /// type or range violation.
    ///
    /// Numeric policy: quantity must be a positive integer; unit and total
    /// price non-negative. When the reported total deviates from
    /// quantity x unit_price by more than the tolerance (or is missing), the
    /// total is recomputed rather than trusted.
    pub fn try_from_candidate(candidate: RecordCandidate) -> Option<Self> {
        let product_name = candidate.product_name?.trim().to_string();
        if product_name.is_empty() {
            return None;
        }

        let quantity: i32 = candidate.quantity.and_then(|q| q.try_into().ok())?;
        if quantity <= 0 {
            return None;
        }

        let unit_price = candidate.unit_price?;
        if unit_price.is_sign_negative() {
            return None;
        }

        let transaction_type = candidate
            .transaction_type
            .as_deref()
            .and_then(|t| t.parse::<TransactionType>().ok())?;

        // Checked: an absurd quantity x unit_price from the service must drop
        // the candidate, not panic the run.
        let computed = Decimal::from(quantity).checked_mul(unit_price)?.round_dp(2);
        let total_price = match candidate.total_price {
            Some(reported)
                if !reported.is_sign_negative()
                    && (reported - computed).abs() <= TOTAL_PRICE_TOLERANCE =>
            {
                reported
            }
            _ => computed,
        };

        Some(NewFinancialRecord {
            product_name,
            quantity,
            unit_price,
            total_price,
            transaction_type,
        })
    }
}
