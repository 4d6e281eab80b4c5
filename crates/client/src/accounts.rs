use api_types::account::{AccountUpsert, AccountView};

use crate::api::ApiClient;
use crate::session::Session;
use crate::store::{CollectionState, Keyed, ResourceStore, remove_by_id, replace_by_id};

impl Keyed for AccountView {
    fn key(&self) -> &str {
        &self.id
    }
}

/// Eventually-consistent mirror of the user's accounts.
#[derive(Clone, Debug)]
pub struct AccountStore {
    api: ApiClient,
    core: ResourceStore<AccountView>,
}

impl AccountStore {
    pub fn new(api: ApiClient, session: Session) -> Self {
        Self {
            api,
            core: ResourceStore::new(session),
        }
    }

    pub fn snapshot(&self) -> CollectionState<AccountView> {
        self.core.snapshot()
    }

    /// Replaces the collection with the server's full account list.
    pub async fn load(&self) {
        let api = &self.api;
        self.core
            .execute(
                |token| async move {
                    api.get_json::<Vec<AccountView>>(&token, "/api/cuentas", &[])
                        .await
                },
                |items, fetched| *items = fetched.unwrap_or_default(),
            )
            .await;
    }

    pub async fn create(&self, name: impl Into<String>, opening_balance_minor: Option<i64>) {
        let body = AccountUpsert {
            name: name.into(),
            balance_minor: opening_balance_minor,
        };
        let api = &self.api;
        self.core
            .execute(
                |token| async move { api.post_json(Some(&token), "/api/cuentas", &body).await },
                |items, created: Option<AccountView>| {
                    if let Some(account) = created {
                        items.push(account);
                    }
                },
            )
            .await;
    }

    pub async fn update(&self, id: &str, name: impl Into<String>, balance_minor: i64) {
        let name = name.into();
        let body = AccountUpsert {
            name: name.clone(),
            balance_minor: Some(balance_minor),
        };
        let path = format!("/api/cuentas/{id}");
        let api = &self.api;
        self.core
            .execute(
                |token| async move { api.put_json(&token, &path, &body).await },
                |items, updated: Option<AccountView>| {
                    // 204 means the server accepted the edit without echoing
                    // the entity back; apply the submitted fields locally.
                    let replacement = updated.unwrap_or(AccountView {
                        id: id.to_string(),
                        name,
                        balance_minor,
                    });
                    replace_by_id(items, id, replacement);
                },
            )
            .await;
    }

    pub async fn delete(&self, id: &str) {
        let path = format!("/api/cuentas/{id}");
        let api = &self.api;
        self.core
            .execute(
                |token| async move { api.delete(&token, &path).await },
                |items, ()| remove_by_id(items, id),
            )
            .await;
    }
}
