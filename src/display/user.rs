//! User display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::User;

#[derive(Tabled)]
struct UserRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Phone")]
    phone: String,
    #[tabled(rename = "Since")]
    since: String,
}

/// Format registered users as a table
pub fn format_user_list(users: &[User]) -> String {
    if users.is_empty() {
        return "No users found.".to_string();
    }

    let rows = users.iter().map(|u| UserRow {
        id: u.id.to_string(),
        name: u.name.clone(),
        email: u.email.clone(),
        phone: u.phone.clone().unwrap_or_default(),
        since: u.created_at.format("%Y-%m-%d").to_string(),
    });

    Table::new(rows).with(Style::psql()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_list() {
        let user = User::new("Ana Lima", "ana@example.com", Some("555-0100".into()));
        let output = format_user_list(&[user.clone()]);

        assert!(output.contains("Email"));
        assert!(output.contains("ana@example.com"));
        assert!(output.contains(&user.id.to_string()));
        assert_eq!(format_user_list(&[]), "No users found.");
    }
}
