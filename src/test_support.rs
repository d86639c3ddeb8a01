//! Shared fixtures for unit tests.

use chrono::NaiveDate;

use crate::models::{Employee, EmployeeId, Gender};

pub fn employee(id: EmployeeId, name: &str, designation: &str, gender: Gender, state: &str) -> Employee {
    Employee {
        id,
        name: name.to_string(),
        designation: designation.to_string(),
        date_of_join: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap() + chrono::Duration::days(id * 30),
        date_of_birth: NaiveDate::from_ymd_opt(1990, 6, 15).unwrap(),
        salary: 30000.0 + id as f64 * 1000.0,
        gender,
        state_id: id % 3 + 1,
        state_name: state.to_string(),
    }
}

/// Seven employees in deliberately unsorted server order.
pub fn seven_employees() -> Vec<Employee> {
    vec![
        employee(1, "Ravi Kumar", "Engineer", Gender::Male, "Karnataka"),
        employee(2, "Asha Menon", "Manager", Gender::Female, "Kerala"),
        employee(3, "Deepak Rao", "Analyst", Gender::Male, "Goa"),
        employee(4, "Meera Iyer", "Engineer", Gender::Female, "Tamil Nadu"),
        employee(5, "Zubin Shah", "Designer", Gender::Male, "Gujarat"),
        employee(6, "Lakshmi N", "Clerk", Gender::Female, "Karnataka"),
        employee(7, "Bharat Singh", "Driver", Gender::Male, "Punjab"),
    ]
}
