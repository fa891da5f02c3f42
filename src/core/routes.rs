//! Client-side route tokens

use serde::{Deserialize, Serialize};

/// Views the application can navigate to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Route {
    Login,
    Bills,
    NewBill,
    Dashboard,
}

impl Route {
    /// Route token passed to the navigator
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "",
            Route::Bills => "#employee/bills",
            Route::NewBill => "#employee/bill/new",
            Route::Dashboard => "#admin/dashboard",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        [Route::Login, Route::Bills, Route::NewBill, Route::Dashboard]
            .into_iter()
            .find(|r| r.path() == path)
    }
}
