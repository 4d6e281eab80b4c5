use api_types::category::{CategoryKind, CategoryNew, CategoryView};

use crate::api::ApiClient;
use crate::session::Session;
use crate::store::{CollectionState, Keyed, ResourceStore, remove_by_id};

impl Keyed for CategoryView {
    fn key(&self) -> &str {
        &self.id
    }
}

/// Eventually-consistent mirror of the user's categories.
///
/// Categories have no update operation; they are created and, at most,
/// deleted.
#[derive(Clone, Debug)]
pub struct CategoryStore {
    api: ApiClient,
    core: ResourceStore<CategoryView>,
}

impl CategoryStore {
    pub fn new(api: ApiClient, session: Session) -> Self {
        Self {
            api,
            core: ResourceStore::new(session),
        }
    }

    pub fn snapshot(&self) -> CollectionState<CategoryView> {
        self.core.snapshot()
    }

    pub async fn load(&self) {
        let api = &self.api;
        self.core
            .execute(
                |token| async move {
                    api.get_json::<Vec<CategoryView>>(&token, "/api/categorias", &[])
                        .await
                },
                |items, fetched| *items = fetched.unwrap_or_default(),
            )
            .await;
    }

    pub async fn create(&self, name: impl Into<String>, kind: CategoryKind) {
        let body = CategoryNew {
            name: name.into(),
            kind,
        };
        let api = &self.api;
        self.core
            .execute(
                |token| async move {
                    api.post_json(Some(&token), "/api/categorias/crear", &body)
                        .await
                },
                |items, created: Option<CategoryView>| {
                    if let Some(category) = created {
                        items.push(category);
                    }
                },
            )
            .await;
    }

    pub async fn delete(&self, id: &str) {
        let path = format!("/api/categorias/{id}");
        let api = &self.api;
        self.core
            .execute(
                |token| async move { api.delete(&token, &path).await },
                |items, ()| remove_by_id(items, id),
            )
            .await;
    }
}
