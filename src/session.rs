//! Draft/snapshot state for editing one remote expense.
//!
//! The remote service identifies records positionally and locates them on edit
//! by matching their previous field values, so the session keeps two copies of
//! the selected record: the draft the user mutates, and a snapshot of the
//! values as loaded. The snapshot is the match key for every edit request and
//! rolls over to the submitted values once a submit completes.

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::api::{
    ApiError, EditCategoryRequest, EditCostRequest, EditDateRequest, ExpenseApi,
};
use crate::models::ExpenseFields;

/// Editing state for one selected expense.
#[derive(Debug, Clone)]
pub struct EditSession {
    /// String-encoded indices into the remote list, as supplied by the
    /// expense table. Only a single-element selection is editable.
    selection: Vec<String>,
    /// The values being edited.
    pub draft: ExpenseFields,
    /// The values the remote service held when the selection was loaded.
    /// Must still match the server's record when a submit is issued,
    /// otherwise the service silently updates nothing.
    pub snapshot: ExpenseFields,
}

impl EditSession {
    pub fn new() -> Self {
        Self {
            selection: Vec::new(),
            draft: ExpenseFields::blank(),
            snapshot: ExpenseFields::blank(),
        }
    }

    pub fn selection(&self) -> &[String] {
        &self.selection
    }

    /// Whether submitting would issue edit requests.
    pub fn is_editable(&self) -> bool {
        self.selection.len() == 1
    }

    /// Load phase: react to a selection change.
    ///
    /// With exactly one selected index, fetches the full list and scans to the
    /// record at that position, setting draft and snapshot to its values. An
    /// out-of-range or unparseable index leaves both unchanged. Any other
    /// selection length resets the draft to blank without fetching; the
    /// snapshot keeps its prior value (matching the source screen, which only
    /// cleared the visible fields).
    pub async fn load<A: ExpenseApi + Sync>(
        &mut self,
        api: &A,
        user_id: &str,
        selection: Vec<String>,
    ) -> Result<(), ApiError> {
        self.selection = selection;

        if self.selection.len() != 1 {
            debug!(
                "selection length {} is not editable, resetting draft",
                self.selection.len()
            );
            self.draft = ExpenseFields::blank();
            return Ok(());
        }

        let expenses = api.fetch_expenses(user_id).await?;
        let index = self.selection[0].parse::<usize>().ok();

        match index.and_then(|i| expenses.get(i)) {
            Some(record) => {
                info!("loaded expense at index {} for editing", self.selection[0]);
                self.snapshot = ExpenseFields::from(record);
                self.draft = self.snapshot.clone();
            }
            None => {
                // Matches the source behavior: a selection pointing outside
                // the list is a silent no-op, not an error.
                warn!(
                    "selected index {} not present in a list of {} expenses",
                    self.selection[0],
                    expenses.len()
                );
            }
        }

        Ok(())
    }

    /// Submit phase: push the draft to the remote service.
    ///
    /// With exactly one selected record, issues `edit_cost`, `edit_date` and
    /// `edit_category` in that order, each awaited before the next and each
    /// keyed by the pre-edit snapshot. The requests are not transactional: a
    /// failure aborts the remainder and propagates, leaving the snapshot
    /// untouched. On success (or when the selection is not editable and no
    /// requests were sent at all) the snapshot becomes the submitted draft
    /// without verifying the server applied it, the settle delay elapses, and
    /// `true` is returned as the completion signal for the owning screen.
    pub async fn submit<A: ExpenseApi + Sync>(
        &mut self,
        api: &A,
        user_id: &str,
        settle_delay: Duration,
    ) -> Result<bool, ApiError> {
        if self.is_editable() {
            let selected_data = self.snapshot.match_key();
            info!("submitting expense edit keyed on {:?}", selected_data);

            api.edit_cost(&EditCostRequest {
                user_id: user_id.to_string(),
                new_cost: self.draft.amount.clone(),
                selected_data: selected_data.clone(),
            })
            .await?;

            api.edit_date(&EditDateRequest {
                user_id: user_id.to_string(),
                new_date: self.draft.date.clone(),
                selected_data: selected_data.clone(),
            })
            .await?;

            api.edit_category(&EditCategoryRequest {
                user_id: user_id.to_string(),
                new_category: self.draft.category.clone(),
                selected_data,
            })
            .await?;
        } else {
            debug!("submit with selection length {}, no requests sent", self.selection.len());
        }

        self.snapshot = self.draft.clone();
        tokio::time::sleep(settle_delay).await;
        Ok(true)
    }
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExpenseRecord;
    use async_trait::async_trait;
    use std::sync::Mutex;

    const USER: &str = "864914213";

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Fetch,
        Cost(String, [String; 3]),
        Date(String, [String; 3]),
        Category(String, [String; 3]),
    }

    /// Recording fake for the expense service.
    struct RecordingApi {
        expenses: Vec<ExpenseRecord>,
        calls: Mutex<Vec<Call>>,
        fail_cost: bool,
    }

    impl RecordingApi {
        fn with_expenses(expenses: Vec<ExpenseRecord>) -> Self {
            Self {
                expenses,
                calls: Mutex::new(Vec::new()),
                fail_cost: false,
            }
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ExpenseApi for RecordingApi {
        async fn fetch_expenses(&self, _user_id: &str) -> Result<Vec<ExpenseRecord>, ApiError> {
            self.calls.lock().unwrap().push(Call::Fetch);
            Ok(self.expenses.clone())
        }

        async fn edit_cost(&self, request: &EditCostRequest) -> Result<(), ApiError> {
            if self.fail_cost {
                return Err(ApiError::Api {
                    status_code: 400,
                    message: "user is missing or invalid".to_string(),
                });
            }
            self.calls.lock().unwrap().push(Call::Cost(
                request.new_cost.clone(),
                request.selected_data.clone(),
            ));
            Ok(())
        }

        async fn edit_date(&self, request: &EditDateRequest) -> Result<(), ApiError> {
            self.calls.lock().unwrap().push(Call::Date(
                request.new_date.clone(),
                request.selected_data.clone(),
            ));
            Ok(())
        }

        async fn edit_category(&self, request: &EditCategoryRequest) -> Result<(), ApiError> {
            self.calls.lock().unwrap().push(Call::Category(
                request.new_category.clone(),
                request.selected_data.clone(),
            ));
            Ok(())
        }
    }

    fn sample_expenses() -> Vec<ExpenseRecord> {
        vec![
            ExpenseRecord {
                expense_date: "2024-01-01".to_string(),
                expense_category: "Food".to_string(),
                expense_amount: "10".to_string(),
            },
            ExpenseRecord {
                expense_date: "2024-02-02".to_string(),
                expense_category: "Rent".to_string(),
                expense_amount: "500".to_string(),
            },
        ]
    }

    #[tokio::test]
    async fn single_selection_loads_the_record_at_that_index() {
        let api = RecordingApi::with_expenses(sample_expenses());
        let mut session = EditSession::new();

        session.load(&api, USER, vec!["1".to_string()]).await.unwrap();

        assert_eq!(session.draft.date, "2024-02-02");
        assert_eq!(session.draft.category, "Rent");
        assert_eq!(session.draft.amount, "500");
        assert_eq!(session.snapshot, session.draft);
    }

    #[tokio::test]
    async fn empty_selection_resets_draft_without_fetching() {
        let api = RecordingApi::with_expenses(sample_expenses());
        let mut session = EditSession::new();
        session.load(&api, USER, vec!["0".to_string()]).await.unwrap();
        let loaded_snapshot = session.snapshot.clone();

        session.load(&api, USER, Vec::new()).await.unwrap();

        assert_eq!(session.draft, ExpenseFields::blank());
        // Only the visible fields reset; the snapshot keeps the loaded values.
        assert_eq!(session.snapshot, loaded_snapshot);
        assert_eq!(
            api.calls().iter().filter(|c| **c == Call::Fetch).count(),
            1
        );
    }

    #[tokio::test]
    async fn multi_selection_resets_draft_without_fetching() {
        let api = RecordingApi::with_expenses(sample_expenses());
        let mut session = EditSession::new();

        session
            .load(&api, USER, vec!["0".to_string(), "1".to_string()])
            .await
            .unwrap();

        assert_eq!(session.draft, ExpenseFields::blank());
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn out_of_range_index_leaves_state_unchanged() {
        let api = RecordingApi::with_expenses(sample_expenses());
        let mut session = EditSession::new();
        session.load(&api, USER, vec!["0".to_string()]).await.unwrap();
        let draft_before = session.draft.clone();
        let snapshot_before = session.snapshot.clone();

        session.load(&api, USER, vec!["5".to_string()]).await.unwrap();

        assert_eq!(session.draft, draft_before);
        assert_eq!(session.snapshot, snapshot_before);
    }

    #[tokio::test]
    async fn unparseable_index_is_a_silent_no_op() {
        let api = RecordingApi::with_expenses(sample_expenses());
        let mut session = EditSession::new();
        let draft_before = session.draft.clone();

        session.load(&api, USER, vec!["x".to_string()]).await.unwrap();

        assert_eq!(session.draft, draft_before);
    }

    #[tokio::test]
    async fn submit_sends_three_requests_keyed_by_the_pre_edit_snapshot() {
        let api = RecordingApi::with_expenses(sample_expenses());
        let mut session = EditSession::new();
        session.load(&api, USER, vec!["1".to_string()]).await.unwrap();

        session.draft.amount = "600".to_string();
        let completed = session
            .submit(&api, USER, Duration::ZERO)
            .await
            .unwrap();
        assert!(completed);

        let key = [
            "Date=2024-02-02".to_string(),
            "Category=Rent".to_string(),
            "Amount=500".to_string(),
        ];
        assert_eq!(
            api.calls(),
            vec![
                Call::Fetch,
                Call::Cost("600".to_string(), key.clone()),
                Call::Date("2024-02-02".to_string(), key.clone()),
                Call::Category("Rent".to_string(), key),
            ]
        );

        // Snapshot rolls over to the submitted values, unverified.
        assert_eq!(session.snapshot.amount, "600");
        assert_eq!(session.snapshot, session.draft);
    }

    #[tokio::test]
    async fn submit_without_a_single_selection_sends_nothing_but_completes() {
        let api = RecordingApi::with_expenses(sample_expenses());
        let mut session = EditSession::new();
        session.load(&api, USER, Vec::new()).await.unwrap();

        let completed = session
            .submit(&api, USER, Duration::ZERO)
            .await
            .unwrap();

        assert!(completed);
        assert!(api.calls().is_empty());
        assert_eq!(session.snapshot, session.draft);
    }

    #[tokio::test]
    async fn failed_cost_edit_aborts_the_sequence_and_keeps_the_snapshot() {
        let mut api = RecordingApi::with_expenses(sample_expenses());
        api.fail_cost = true;
        let mut session = EditSession::new();
        session.load(&api, USER, vec!["1".to_string()]).await.unwrap();
        let snapshot_before = session.snapshot.clone();

        session.draft.amount = "600".to_string();
        let result = session.submit(&api, USER, Duration::ZERO).await;

        assert!(matches!(result, Err(ApiError::Api { status_code: 400, .. })));
        // edit_date and edit_category never ran.
        assert_eq!(api.calls(), vec![Call::Fetch]);
        assert_eq!(session.snapshot, snapshot_before);
    }
}
