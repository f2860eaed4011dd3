use tracing::info;

use crate::db::models::User;
use crate::db::repo::UserStore;
use crate::error::StoreError;

pub const SEED_PASSWORD: &str = "XXXXXXXXXXX";
pub const SEED_PHONE: &str = "123-456-7890";

/// Builds a demo user with the fixed masked password and phone number.
pub fn seed_user(
    id: i64,
    username: &str,
    first_name: &str,
    last_name: &str,
    email: &str,
    user_status: i32,
) -> User {
    User {
        id: Some(id),
        username: Some(username.to_string()),
        first_name: Some(first_name.to_string()),
        last_name: Some(last_name.to_string()),
        email: Some(email.to_string()),
        password: Some(SEED_PASSWORD.to_string()),
        phone: Some(SEED_PHONE.to_string()),
        user_status: Some(user_status),
    }
}

/// The eleven demo users, in insertion order.
pub fn seed_users() -> Vec<User> {
    vec![
        // active
        seed_user(1, "user1", "first name 1", "last name 1", "email1@test.com", 1),
        seed_user(4, "user4", "first name 4", "last name 4", "email4@test.com", 1),
        seed_user(7, "user7", "first name 7", "last name 7", "email7@test.com", 1),
        seed_user(10, "user10", "first name 10", "last name 10", "email10@test.com", 1),
        seed_user(11, "user?10", "first name ?10", "last name ?10", "email101@test.com", 1),
        // pending
        seed_user(2, "user2", "first name 2", "last name 2", "email2@test.com", 2),
        seed_user(5, "user5", "first name 5", "last name 5", "email5@test.com", 2),
        seed_user(8, "user8", "first name 8", "last name 8", "email8@test.com", 2),
        // inactive
        seed_user(3, "user3", "first name 3", "last name 3", "email3@test.com", 3),
        seed_user(6, "user6", "first name 6", "last name 6", "email6@test.com", 3),
        seed_user(9, "user9", "first name 9", "last name 9", "email9@test.com", 3),
    ]
}

/// Inserts the demo users. Called once by `main` after the store is built.
pub async fn seed(store: &dyn UserStore) -> Result<(), StoreError> {
    let users = seed_users();
    let count = users.len();
    for user in users {
        store.put(user).await?;
    }
    info!(count, "Seeded user store");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory::MemoryUserStore;

    #[test]
    fn test_seed_user_fills_fixed_fields() {
        let user = seed_user(3, "user3", "f", "l", "e@test.com", 3);
        assert_eq!(user.password.as_deref(), Some("XXXXXXXXXXX"));
        assert_eq!(user.phone.as_deref(), Some("123-456-7890"));
        assert_eq!(user.user_status, Some(3));
    }

    #[test]
    fn test_seed_order_and_statuses() {
        let users = seed_users();
        let ids: Vec<i64> = users.iter().filter_map(|u| u.id).collect();
        let statuses: Vec<i32> = users.iter().filter_map(|u| u.user_status).collect();

        assert_eq!(ids, vec![1, 4, 7, 10, 11, 2, 5, 8, 3, 6, 9]);
        assert_eq!(statuses, vec![1, 1, 1, 1, 1, 2, 2, 2, 3, 3, 3]);
    }

    #[tokio::test]
    async fn test_seed_populates_store() {
        let store = MemoryUserStore::new();
        seed(&store).await.unwrap();

        for i in 1..=10 {
            let name = format!("user{}", i);
            let user = store.get(&name).await.unwrap();
            assert_eq!(user.and_then(|u| u.id), Some(i));
        }
        let odd = store.get("user?10").await.unwrap().unwrap();
        assert_eq!(odd.id, Some(11));
        assert_eq!(odd.email.as_deref(), Some("email101@test.com"));
        assert!(store.get("user11").await.unwrap().is_none());
    }
}
