use async_trait::async_trait;
use eyre::Result;
use mockall::mock;
use uuid::Uuid;

use bayan_core::models::appointment::UserIdentity;
use bayan_core::models::notification::NotificationEvent;

use crate::store::{Directory, NotificationSink};

// Mock collaborators for failure-injection tests. The stateful store mocks
// live in mock::memory; these cover the lookup/sink seams where tests only
// need canned answers or errors.
mock! {
    pub DirectoryClient {}

    #[async_trait]
    impl Directory for DirectoryClient {
        async fn identity(&self, user_id: Uuid) -> Result<Option<UserIdentity>>;
    }
}

mock! {
    pub Notifier {}

    #[async_trait]
    impl NotificationSink for Notifier {
        async fn notify(&self, event: NotificationEvent) -> Result<()>;
    }
}
