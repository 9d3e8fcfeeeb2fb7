use crate::domain::UserId;

pub fn users_route() -> &'static str {
    "/users"
}

pub fn user_route(user_id: UserId) -> String {
    format!("{}/{}", users_route(), user_id.0)
}
