//! Shared test doubles and crate-level behaviour tests.

use mockall::mock;

use crate::host::{HostCall, HostCallError};

mod behaviour;

mock! {
    pub(crate) Host {}
    impl HostCall for Host {
        fn call(
            &self,
            namespace: &str,
            capability: &str,
            operation: &str,
            payload: &[u8],
        ) -> Result<Vec<u8>, HostCallError>;
    }
}
