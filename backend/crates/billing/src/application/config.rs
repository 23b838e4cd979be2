//! Billing configuration

/// Billing behaviour knobs
#[derive(Debug, Clone)]
pub struct BillingConfig {
    /// Lower-case method codes a payment may declare
    pub accepted_methods: Vec<String>,
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            accepted_methods: ["bank_transfer", "mobile_wallet", "cash"]
                .into_iter()
                .map(str::to_owned)
                .collect(),
        }
    }
}

impl BillingConfig {
    pub fn with_methods<I, S>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.accepted_methods = methods
            .into_iter()
            .map(|m| m.as_ref().trim().to_lowercase())
            .filter(|m| !m.is_empty())
            .collect();
        self
    }

    /// Normalized method code if accepted.
    pub fn accept_method(&self, method: &str) -> Option<String> {
        let method = method.trim().to_lowercase();
        self.accepted_methods
            .iter()
            .any(|m| *m == method)
            .then_some(method)
    }
}
