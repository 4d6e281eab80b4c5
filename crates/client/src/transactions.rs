use api_types::category::CategoryView;
use api_types::transaction::{TransactionRequest, TransactionView};

use crate::api::ApiClient;
use crate::session::Session;
use crate::store::{CollectionState, Keyed, ResourceStore, remove_by_id, replace_by_id};

impl Keyed for TransactionView {
    fn key(&self) -> &str {
        &self.id
    }
}

/// Eventually-consistent mirror of the user's transactions, optionally
/// scoped to a single account via the `cuenta` query filter.
#[derive(Clone, Debug)]
pub struct TransactionStore {
    api: ApiClient,
    core: ResourceStore<TransactionView>,
}

impl TransactionStore {
    pub fn new(api: ApiClient, session: Session) -> Self {
        Self {
            api,
            core: ResourceStore::new(session),
        }
    }

    pub fn snapshot(&self) -> CollectionState<TransactionView> {
        self.core.snapshot()
    }

    /// Replaces the collection with the server's transaction list,
    /// scoped to `account_id` when given.
    pub async fn load(&self, account_id: Option<&str>) {
        let api = &self.api;
        self.core
            .execute(
                |token| async move {
                    let query: Vec<(&str, &str)> = match account_id {
                        Some(id) => vec![("cuenta", id)],
                        None => Vec::new(),
                    };
                    api.get_json::<Vec<TransactionView>>(&token, "/api/transacciones", &query)
                        .await
                },
                |items, fetched| *items = fetched.unwrap_or_default(),
            )
            .await;
    }

    /// Registers an income. Shares the request shape with
    /// [`add_expense`](Self::add_expense); only the path differs.
    pub async fn add_income(&self, request: TransactionRequest) {
        self.add("/api/transacciones/ingresos", request).await;
    }

    pub async fn add_expense(&self, request: TransactionRequest) {
        self.add("/api/transacciones/gastos", request).await;
    }

    async fn add(&self, path: &str, request: TransactionRequest) {
        let api = &self.api;
        self.core
            .execute(
                |token| async move { api.post_json(Some(&token), path, &request).await },
                |items, created: Option<TransactionView>| {
                    if let Some(transaction) = created {
                        items.push(transaction);
                    }
                },
            )
            .await;
    }

    pub async fn edit(&self, id: &str, request: TransactionRequest) {
        let path = format!("/api/transacciones/{id}");
        let submitted = request.clone();
        let api = &self.api;
        self.core
            .execute(
                |token| async move { api.put_json(&token, &path, &request).await },
                |items, updated: Option<TransactionView>| match updated {
                    Some(transaction) => replace_by_id(items, id, transaction),
                    // 204: apply the submitted fields locally. The kind is
                    // fixed at creation and not part of the edit request,
                    // so the existing one is kept.
                    None => {
                        if let Some(slot) = items.iter_mut().find(|t| t.id == id) {
                            slot.account_id = submitted.account_id;
                            slot.amount_minor = submitted.amount_minor;
                            slot.note = submitted.note;
                            slot.category_id = submitted.category_id;
                            slot.occurred_at = submitted.occurred_at;
                        }
                    }
                },
            )
            .await;
    }

    pub async fn delete(&self, id: &str) {
        let path = format!("/api/transacciones/{id}");
        let api = &self.api;
        self.core
            .execute(
                |token| async move { api.delete(&token, &path).await },
                |items, ()| remove_by_id(items, id),
            )
            .await;
    }
}

/// Render-time join: resolves a transaction's category display label
/// against a category collection snapshot.
pub fn category_name<'a>(categories: &'a [CategoryView], category_id: &str) -> Option<&'a str> {
    categories
        .iter()
        .find(|category| category.id == category_id)
        .map(|category| category.name.as_str())
}
