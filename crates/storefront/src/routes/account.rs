//! Account route handlers.
//!
//! Authentication happens upstream: sign-in hands over a full user document.
//! Every other route acts on whoever is currently signed in and answers 404
//! when nobody is.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;

use shopfront_core::{Email, UserRole};

use crate::error::{AppError, Result, add_breadcrumb};
use crate::models::{Address, Order, PaymentMethod, User};
use crate::state::AppState;
use crate::store::{AccountAction, Store};

/// Partial profile update.
#[derive(Debug, Deserialize)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<Email>,
}

/// Role change.
#[derive(Debug, Deserialize)]
pub struct RoleUpdate {
    pub role: UserRole,
}

fn current_user(store: &Store) -> Result<User> {
    store
        .select(|s| s.account.user().cloned())
        .ok_or_else(|| AppError::NotFound("no signed-in user".to_string()))
}

/// Dispatch an action that needs a signed-in user, then return the user.
fn update_user(store: &Store, action: AccountAction) -> Result<Json<User>> {
    current_user(store)?;
    store.dispatch(action);
    current_user(store).map(Json)
}

/// Show the signed-in user.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Result<Json<User>> {
    current_user(state.store()).map(Json)
}

/// Sign a user in, replacing whoever was signed in before.
#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn sign_in(State(state): State<AppState>, Json(user): Json<User>) -> Json<User> {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user.id.to_string()),
            email: Some(user.email.to_string()),
            ..Default::default()
        }));
    });
    add_breadcrumb("account", "Signed in");

    state
        .store()
        .dispatch(AccountAction::SignIn(Box::new(user.clone())));
    Json(user)
}

/// Sign out. Idempotent.
#[instrument(skip(state))]
pub async fn sign_out(State(state): State<AppState>) -> StatusCode {
    state.store().dispatch(AccountAction::SignOut);
    sentry::configure_scope(|scope| scope.set_user(None));
    StatusCode::NO_CONTENT
}

/// Update display name and/or email.
#[instrument(skip(state))]
pub async fn update_profile(
    State(state): State<AppState>,
    Json(update): Json<ProfileUpdate>,
) -> Result<Json<User>> {
    let name = match update.name {
        Some(name) if name.trim().is_empty() => {
            return Err(AppError::BadRequest("name cannot be empty".to_string()));
        }
        Some(name) => Some(name.trim().to_string()),
        None => None,
    };

    update_user(
        state.store(),
        AccountAction::UpdateProfile {
            name,
            email: update.email,
        },
    )
}

/// Set the user's role.
#[instrument(skip(state))]
pub async fn set_role(
    State(state): State<AppState>,
    Json(update): Json<RoleUpdate>,
) -> Result<Json<User>> {
    update_user(state.store(), AccountAction::SetRole(update.role))
}

/// Set the shipping address.
#[instrument(skip(state, address))]
pub async fn set_address(
    State(state): State<AppState>,
    Json(address): Json<Address>,
) -> Result<Json<User>> {
    update_user(state.store(), AccountAction::SetAddress(address))
}

/// Set the payment method.
#[instrument(skip(state, method))]
pub async fn set_payment_method(
    State(state): State<AppState>,
    Json(method): Json<PaymentMethod>,
) -> Result<Json<User>> {
    if let PaymentMethod::Card { last4, .. } = &method
        && (last4.len() != 4 || !last4.chars().all(|c| c.is_ascii_digit()))
    {
        return Err(AppError::BadRequest(
            "card last4 must be four digits".to_string(),
        ));
    }

    update_user(state.store(), AccountAction::SetPaymentMethod(method))
}

/// Order history of the signed-in user.
#[instrument(skip(state))]
pub async fn orders(State(state): State<AppState>) -> Result<Json<Vec<Order>>> {
    current_user(state.store()).map(|user| Json(user.orders))
}

/// Remove the order at `index`. Out-of-range indexes leave the history as is.
#[instrument(skip(state))]
pub async fn delete_order(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<Vec<Order>>> {
    update_user(state.store(), AccountAction::DeleteOrder(index))
        .map(|Json(user)| Json(user.orders))
}
