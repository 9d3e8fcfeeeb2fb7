use std::{collections::BTreeMap, sync::Arc};

use shared::{
    domain::{User, UserId},
    error::ApiError,
};
use tokio::sync::RwLock;

/// In-memory user table shared by every request handler.
#[derive(Clone, Default)]
pub struct ApiContext {
    users: Arc<RwLock<BTreeMap<UserId, User>>>,
}

impl ApiContext {
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let users = users.into_iter().map(|user| (user.id, user)).collect();
        Self {
            users: Arc::new(RwLock::new(users)),
        }
    }
}

pub fn user_route_pattern() -> &'static str {
    "/users/:user_id"
}

pub fn seed_users() -> Vec<User> {
    let seed = [
        (1, "Ada Lovelace", "ada@example.com", Some("555-0101"), Some("12 Analytical Row")),
        (2, "Grace Hopper", "grace@example.com", Some("555-0102"), None),
        (3, "Alan Turing", "alan@example.com", None, Some("Bletchley Park")),
    ];
    seed.into_iter()
        .map(|(id, name, email, phone, address)| User {
            id: UserId(id),
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.map(str::to_string),
            address: address.map(str::to_string),
            password: format!("password{id}"),
            remember_token: None,
        })
        .collect()
}

pub async fn list_users(ctx: &ApiContext) -> Vec<User> {
    ctx.users.read().await.values().cloned().collect()
}

pub async fn get_user(ctx: &ApiContext, user_id: UserId) -> Result<User, ApiError> {
    ctx.users
        .read()
        .await
        .get(&user_id)
        .cloned()
        .ok_or_else(|| missing(user_id))
}

/// Replaces the stored record wholesale; the path id wins over the body id.
pub async fn replace_user(
    ctx: &ApiContext,
    user_id: UserId,
    mut user: User,
) -> Result<User, ApiError> {
    let mut users = ctx.users.write().await;
    let slot = users.get_mut(&user_id).ok_or_else(|| missing(user_id))?;
    user.id = user_id;
    *slot = user.clone();
    Ok(user)
}

pub async fn delete_user(ctx: &ApiContext, user_id: UserId) -> Result<(), ApiError> {
    ctx.users
        .write()
        .await
        .remove(&user_id)
        .map(|_| ())
        .ok_or_else(|| missing(user_id))
}

fn missing(user_id: UserId) -> ApiError {
    ApiError::not_found(format!("user {user_id} not found"))
}

#[cfg(test)]
#[path = "tests/mod_tests.rs"]
mod tests;
