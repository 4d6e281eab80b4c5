use api_types::category::CategoryKind;
use api_types::transaction::TransactionRequest;

use crate::accounts::AccountStore;
use crate::categories::CategoryStore;
use crate::transactions::TransactionStore;

/// Screens of the "create new…" dialog flow. `Closed` is the resting
/// state; every open flow starts at `SelectType`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DialogState {
    Closed,
    SelectType,
    CreateAccount,
    CreateCategory,
    CreateIncome,
    CreateOutgoing,
    ListCategories,
}

/// What the user picked on the `SelectType` screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CreateKind {
    Account,
    Category,
    Income,
    Outgoing,
}

/// Sequences the creation flow across the stores: select a type, fill
/// the form, submit to the matching store's create operation.
///
/// Owns only its own navigation state; all entity data lives in the
/// stores, and all I/O goes through them. Forward transitions push onto
/// an explicit back stack, so nested screens can be left one level at a
/// time without losing history.
pub struct DialogFlow {
    accounts: AccountStore,
    categories: CategoryStore,
    transactions: TransactionStore,
    current: DialogState,
    stack: Vec<DialogState>,
}

impl DialogFlow {
    pub fn new(
        accounts: AccountStore,
        categories: CategoryStore,
        transactions: TransactionStore,
    ) -> Self {
        Self {
            accounts,
            categories,
            transactions,
            current: DialogState::Closed,
            stack: Vec::new(),
        }
    }

    pub fn current(&self) -> DialogState {
        self.current
    }

    /// Opens the flow at the type selector and primes the account and
    /// category collections; a store that is already loaded is not
    /// fetched again.
    pub async fn open(&mut self) {
        self.current = DialogState::SelectType;
        self.stack.clear();

        if !self.accounts.snapshot().is_loaded {
            self.accounts.load().await;
        }
        if !self.categories.snapshot().is_loaded {
            self.categories.load().await;
        }
    }

    /// Moves from the type selector to the chosen creation screen.
    /// Ignored anywhere else.
    pub fn choose(&mut self, kind: CreateKind) {
        if self.current != DialogState::SelectType {
            return;
        }
        self.stack.push(self.current);
        self.current = match kind {
            CreateKind::Account => DialogState::CreateAccount,
            CreateKind::Category => DialogState::CreateCategory,
            CreateKind::Income => DialogState::CreateIncome,
            CreateKind::Outgoing => DialogState::CreateOutgoing,
        };
    }

    /// Opens the category list from the category form.
    pub fn view_categories(&mut self) {
        if self.current != DialogState::CreateCategory {
            return;
        }
        self.stack.push(self.current);
        self.current = DialogState::ListCategories;
    }

    /// Returns to the previous screen; with nothing left to return to,
    /// the flow closes.
    pub fn back(&mut self) {
        self.current = self.stack.pop().unwrap_or(DialogState::Closed);
    }

    /// Closes the flow from any screen and forgets the history.
    pub fn dismiss(&mut self) {
        self.current = DialogState::Closed;
        self.stack.clear();
    }

    pub async fn submit_account(
        &mut self,
        name: impl Into<String>,
        opening_balance_minor: Option<i64>,
    ) {
        if self.current != DialogState::CreateAccount {
            return;
        }
        self.accounts.create(name, opening_balance_minor).await;
        self.dismiss();
    }

    pub async fn submit_category(&mut self, name: impl Into<String>, kind: CategoryKind) {
        if self.current != DialogState::CreateCategory {
            return;
        }
        self.categories.create(name, kind).await;
        self.dismiss();
    }

    pub async fn submit_income(&mut self, request: TransactionRequest) {
        if self.current != DialogState::CreateIncome {
            return;
        }
        self.transactions.add_income(request).await;
        self.dismiss();
    }

    pub async fn submit_expense(&mut self, request: TransactionRequest) {
        if self.current != DialogState::CreateOutgoing {
            return;
        }
        self.transactions.add_expense(request).await;
        self.dismiss();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiClient;
    use crate::session::Session;

    // An unauthenticated session: store loads triggered by `open` fail
    // their token guard without touching the network.
    fn flow() -> DialogFlow {
        let api = ApiClient::with_base_url("http://127.0.0.1:9");
        let session = Session::new();
        DialogFlow::new(
            AccountStore::new(api.clone(), session.clone()),
            CategoryStore::new(api.clone(), session.clone()),
            TransactionStore::new(api, session),
        )
    }

    #[tokio::test]
    async fn starts_closed_and_opens_to_select_type() {
        let mut flow = flow();
        assert_eq!(flow.current(), DialogState::Closed);
        flow.open().await;
        assert_eq!(flow.current(), DialogState::SelectType);
    }

    #[tokio::test]
    async fn choose_routes_to_each_creation_screen() {
        for (kind, expected) in [
            (CreateKind::Account, DialogState::CreateAccount),
            (CreateKind::Category, DialogState::CreateCategory),
            (CreateKind::Income, DialogState::CreateIncome),
            (CreateKind::Outgoing, DialogState::CreateOutgoing),
        ] {
            let mut flow = flow();
            flow.open().await;
            flow.choose(kind);
            assert_eq!(flow.current(), expected);
            flow.back();
            assert_eq!(flow.current(), DialogState::SelectType);
        }
    }

    #[tokio::test]
    async fn nested_back_unwinds_one_level_at_a_time() {
        let mut flow = flow();
        flow.open().await;
        flow.choose(CreateKind::Category);
        flow.view_categories();
        assert_eq!(flow.current(), DialogState::ListCategories);

        flow.back();
        assert_eq!(flow.current(), DialogState::CreateCategory);
        flow.back();
        assert_eq!(flow.current(), DialogState::SelectType);
        flow.back();
        assert_eq!(flow.current(), DialogState::Closed);
    }

    #[tokio::test]
    async fn dismiss_closes_from_any_depth() {
        let mut flow = flow();
        flow.open().await;
        flow.choose(CreateKind::Category);
        flow.view_categories();
        flow.dismiss();
        assert_eq!(flow.current(), DialogState::Closed);

        // History is gone: back stays closed.
        flow.back();
        assert_eq!(flow.current(), DialogState::Closed);
    }

    #[tokio::test]
    async fn choose_is_ignored_when_closed() {
        let mut flow = flow();
        flow.choose(CreateKind::Account);
        assert_eq!(flow.current(), DialogState::Closed);
    }

    #[tokio::test]
    async fn view_categories_only_from_category_form() {
        let mut flow = flow();
        flow.open().await;
        flow.view_categories();
        assert_eq!(flow.current(), DialogState::SelectType);
    }
}
