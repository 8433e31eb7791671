use serde::{Deserialize, Serialize};

use crate::services::auth::Principal;

/// Success body of the who-am-i endpoints: `{ "user": Principal }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeResponse {
    pub user: Principal,
}
