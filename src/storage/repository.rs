use crate::domain::Customer;

/// In-memory collection of customers.
///
/// Lookups scan the whole collection and compare tax-ids; insertion order is
/// kept so listings are stable across calls.
#[derive(Debug, Default)]
pub struct Repository {
    customers: Vec<Customer>,
}

impl Repository {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================
    // Customer operations
    // ========================

    /// Whether any customer is registered under `cpf`.
    pub fn contains(&self, cpf: &str) -> bool {
        self.customers.iter().any(|customer| customer.cpf == cpf)
    }

    /// Save a new customer. Callers check uniqueness first.
    pub fn save_customer(&mut self, customer: Customer) {
        self.customers.push(customer);
    }

    /// Get a customer by tax-id.
    pub fn get_customer(&self, cpf: &str) -> Option<&Customer> {
        self.customers.iter().find(|customer| customer.cpf == cpf)
    }

    /// Get a customer by tax-id for mutation.
    pub fn get_customer_mut(&mut self, cpf: &str) -> Option<&mut Customer> {
        self.customers.iter_mut().find(|customer| customer.cpf == cpf)
    }

    /// Remove the customer whose tax-id equals `cpf`.
    pub fn remove_customer(&mut self, cpf: &str) -> Option<Customer> {
        let index = self
            .customers
            .iter()
            .position(|customer| customer.cpf == cpf)?;
        Some(self.customers.remove(index))
    }

    pub fn list_customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }
}
