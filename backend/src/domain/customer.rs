//! Customer records.
//!
//! Customers are created lazily the first time a rental references a
//! (name, phone) pair the store has not seen. They are updated in place
//! and never deleted by this service. Uniqueness of (name, phone) is a
//! lookup predicate, not an enforced constraint; concurrent creation can
//! produce duplicates and the service accepts that.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A stored customer record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub id: Uuid,
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create a customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}
