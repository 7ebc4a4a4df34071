//! PostgreSQL-backed `CustomerRepository` implementation using Diesel.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{CustomerRepository, PersistenceError};
use crate::domain::{Customer, NewCustomer};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{CustomerRow, CustomerUpdate, NewCustomerRow};
use super::pool::DbPool;
use super::schema::customers;

/// Diesel-backed implementation of the customer repository port.
#[derive(Clone)]
pub struct DieselCustomerRepository {
    pool: DbPool,
}

impl DieselCustomerRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            phone: row.phone,
            address: row.address,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl CustomerRepository for DieselCustomerRepository {
    async fn find_by_name_and_phone(
        &self,
        name: &str,
        phone: Option<&str>,
    ) -> Result<Option<Customer>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let query = customers::table
            .filter(customers::name.eq(name.to_owned()))
            .into_boxed();
        let query = match phone {
            Some(phone) => query.filter(customers::phone.eq(phone.to_owned())),
            None => query.filter(customers::phone.is_null()),
        };

        let row = query
            .select(CustomerRow::as_select())
            .first::<CustomerRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(Customer::from))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = customers::table
            .find(id)
            .select(CustomerRow::as_select())
            .first::<CustomerRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(Customer::from))
    }

    async fn insert(&self, customer: NewCustomer) -> Result<Customer, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewCustomerRow {
            id: Uuid::new_v4(),
            name: &customer.name,
            phone: customer.phone.as_deref(),
            address: customer.address.as_deref(),
        };

        let row = diesel::insert_into(customers::table)
            .values(&new_row)
            .returning(CustomerRow::as_returning())
            .get_result::<CustomerRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(Customer::from(row))
    }

    async fn save(&self, customer: &Customer) -> Result<(), PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let update = CustomerUpdate {
            name: &customer.name,
            phone: customer.phone.as_deref(),
            address: customer.address.as_deref(),
            updated_at: Utc::now(),
        };

        diesel::update(customers::table.find(customer.id))
            .set(&update)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}
