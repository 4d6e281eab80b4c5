use std::sync::{Arc, PoisonError, RwLock};

use api_types::balance::MonthlyBalance;
use tokio::sync::Mutex;

use crate::api::ApiClient;
use crate::error::StoreError;
use crate::session::Session;

#[derive(Debug, Clone, Default)]
pub struct BalanceState {
    pub is_loading: bool,
    pub error_message: Option<String>,
    pub monthly: Option<MonthlyBalance>,
}

/// Fetches the monthly income/expense totals. Holds no collection, just
/// the latest summary; same token-guard and error protocol as the
/// resource stores.
#[derive(Clone, Debug)]
pub struct BalanceStore {
    api: ApiClient,
    session: Session,
    state: Arc<RwLock<BalanceState>>,
    gate: Arc<Mutex<()>>,
}

impl BalanceStore {
    pub fn new(api: ApiClient, session: Session) -> Self {
        Self {
            api,
            session,
            state: Arc::new(RwLock::new(BalanceState::default())),
            gate: Arc::new(Mutex::new(())),
        }
    }

    pub fn snapshot(&self) -> BalanceState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub async fn load_monthly(&self, year: i32, month: u32) {
        let _gate = self.gate.lock().await;

        let Some(token) = self.session.token() else {
            self.publish_failure(StoreError::Unauthenticated.to_string());
            return;
        };

        {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            state.is_loading = true;
            state.error_message = None;
        }

        let year = year.to_string();
        let month = month.to_string();
        let query = [("year", year.as_str()), ("month", month.as_str())];
        match self
            .api
            .get_json::<MonthlyBalance>(&token, "/api/balances/mensual", &query)
            .await
        {
            Ok(monthly) => {
                let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
                state.is_loading = false;
                state.monthly = monthly;
            }
            Err(err) => self.publish_failure(err.to_string()),
        }
    }

    fn publish_failure(&self, message: String) {
        tracing::warn!(error = %message, "balance load failed");
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.is_loading = false;
        state.error_message = Some(message);
    }
}
