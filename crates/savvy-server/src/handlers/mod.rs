//! Request handlers, organized by domain

mod expenses;
mod forecast;

pub use expenses::{create_expense, delete_expense, list_expenses};
pub use forecast::{predict_budget, train_budget};

use axum::Json;

use crate::MessageResponse;

/// GET / - Liveness/welcome
pub async fn read_root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Welcome to SavvySpend Backend".to_string(),
    })
}
