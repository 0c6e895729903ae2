//! Category listing

use crate::models::Category;

/// Print the fixed category set
pub fn handle_categories_command() {
    println!("{:<20} {:<14} {:>12}", "Category", "Short name", "Prior weight");
    println!("{}", "-".repeat(48));
    for category in Category::ALL {
        let prior = if category.is_savings() {
            "-".to_string()
        } else {
            format!("{:.0}%", category.prior_weight() * 100.0)
        };
        println!("{:<20} {:<14} {:>12}", category.label(), category.slug(), prior);
    }
}
