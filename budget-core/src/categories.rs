//! Income categories and expense category groups.
//!
//! Expense groups are split into fixed (essential) and variable spending; an
//! expense's class is derived from the group its category belongs to.

use serde::{Deserialize, Serialize};

pub const INCOME_CATEGORIES: &[&str] = &[
    "Earned Income",
    "Business Income",
    "Investment Income",
    "Government Support",
    "Borrowed Money",
    "Gifted or Windfall Money",
    "Sales / Resale Income",
];

/// A named group of expense categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryGroup {
    pub name: &'static str,
    pub options: &'static [&'static str],
}

pub const FIXED_GROUPS: &[CategoryGroup] = &[
    CategoryGroup {
        name: "Housing",
        options: &[
            "Rent / Mortgage",
            "Property Taxes",
            "Homeowners/Renters Insurance",
            "HOA Fees",
            "Home Maintenance / Repairs",
            "Other Housing",
        ],
    },
    CategoryGroup {
        name: "Utilities",
        options: &[
            "Electricity / Gas",
            "Water / Sewer",
            "Internet / Cable TV",
            "Mobile Phone",
            "Trash / Recycling",
            "Other Utilities",
        ],
    },
    CategoryGroup {
        name: "Transportation",
        options: &[
            "Car Payment",
            "Car Insurance",
            "Fuel (Gas/Petrol)",
            "Public Transportation (Bus, Train, Metro)",
            "Ride Sharing (Uber, Lyft, Ola, etc.)",
            "Vehicle Maintenance / Repairs",
            "Parking Fees / Tolls",
            "Other Transportation",
        ],
    },
    CategoryGroup {
        name: "Debt Payments",
        options: &[
            "Credit Card Payments",
            "Student Loans",
            "Personal Loans",
            "Other Loan Payments",
        ],
    },
];

pub const VARIABLE_GROUPS: &[CategoryGroup] = &[
    CategoryGroup {
        name: "Food",
        options: &[
            "Groceries",
            "Dining Out / Restaurants",
            "Coffee Shops",
            "Takeaway / Delivery",
            "Other Food",
        ],
    },
    CategoryGroup {
        name: "Personal Care",
        options: &[
            "Haircuts / Salon",
            "Toiletries / Personal Hygiene Products",
            "Gym / Fitness",
            "Clothing / Shoes",
            "Dry Cleaning / Laundry",
            "Other Personal Care",
        ],
    },
    CategoryGroup {
        name: "Entertainment",
        options: &[
            "Streaming Services (Netflix, Spotify, etc.)",
            "Movies / Cinema",
            "Concerts / Events",
            "Hobbies",
            "Books / Music",
            "Video Games",
            "Other Entertainment",
        ],
    },
    CategoryGroup {
        name: "Shopping",
        options: &[
            "General Shopping",
            "Electronics",
            "Home Goods",
            "Gifts",
            "Other Shopping",
        ],
    },
];

/// Spending class shown next to each expense
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ExpenseClass {
    #[serde(rename = "essential")]
    Essential,
    #[serde(rename = "variable")]
    Variable,
}

impl ExpenseClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseClass::Essential => "essential",
            ExpenseClass::Variable => "variable",
        }
    }
}

pub fn all_groups() -> impl Iterator<Item = &'static CategoryGroup> {
    FIXED_GROUPS.iter().chain(VARIABLE_GROUPS.iter())
}

/// Group name for a detailed expense category.
pub fn group_of(category: &str) -> Option<&'static str> {
    all_groups()
        .find(|g| g.options.contains(&category))
        .map(|g| g.name)
}

/// URL-style group key: "Personal Care" -> "personal-care".
pub fn group_slug(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Look a group up by display name or slug, ignoring case.
pub fn find_group(name: &str) -> Option<&'static CategoryGroup> {
    let wanted = group_slug(name);
    all_groups().find(|g| group_slug(g.name) == wanted)
}

/// Anything outside the fixed groups counts as variable spending.
pub fn expense_class(category: &str) -> ExpenseClass {
    if FIXED_GROUPS.iter().any(|g| g.options.contains(&category)) {
        ExpenseClass::Essential
    } else {
        ExpenseClass::Variable
    }
}

pub fn is_income_category(category: &str) -> bool {
    INCOME_CATEGORIES.contains(&category)
}

pub fn is_expense_category(category: &str) -> bool {
    group_of(category).is_some()
}
