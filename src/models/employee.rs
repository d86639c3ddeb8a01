//! Employee record and form draft.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Server-assigned employee identifier.
pub type EmployeeId = i64;

/// Employee gender as accepted by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// All values in picker order.
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }

    /// Parse case-insensitively.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "male" => Some(Gender::Male),
            "female" => Some(Gender::Female),
            _ => None,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Gender {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Gender {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Gender::parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("unknown gender '{raw}'")))
    }
}

/// Employee record as returned by the `Employee` resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub designation: String,
    #[serde(with = "flexible_date")]
    pub date_of_join: NaiveDate,
    #[serde(with = "flexible_date")]
    pub date_of_birth: NaiveDate,
    pub salary: f64,
    pub gender: Gender,
    pub state_id: i64,
    /// Display value joined in by the service; may be null.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub state_name: String,
}

impl Employee {
    /// Salary as shown in the table and exports.
    pub fn salary_display(&self) -> String {
        format_salary(self.salary)
    }
}

/// Unsaved form state for one employee. Every field holds raw input text and is
/// sent to the service unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDraft {
    pub name: String,
    pub designation: String,
    pub date_of_join: String,
    pub date_of_birth: String,
    pub salary: String,
    pub gender: String,
    pub state_id: String,
}

impl EmployeeDraft {
    /// Create a draft pre-filled from an existing employee.
    pub fn from_employee(emp: &Employee) -> Self {
        Self {
            name: emp.name.clone(),
            designation: emp.designation.clone(),
            date_of_join: emp.date_of_join.format("%Y-%m-%d").to_string(),
            date_of_birth: emp.date_of_birth.format("%Y-%m-%d").to_string(),
            salary: emp.salary_display(),
            gender: emp.gender.as_str().to_string(),
            state_id: emp.state_id.to_string(),
        }
    }

    /// Field labels paired with their current values, in form order.
    pub fn fields(&self) -> [(&'static str, &str); 7] {
        [
            ("Name", self.name.as_str()),
            ("Designation", self.designation.as_str()),
            ("Date of Join", self.date_of_join.as_str()),
            ("Date of Birth", self.date_of_birth.as_str()),
            ("Salary", self.salary.as_str()),
            ("Gender", self.gender.as_str()),
            ("State", self.state_id.as_str()),
        ]
    }

    pub fn is_empty(&self) -> bool {
        self.fields().iter().all(|(_, v)| v.is_empty())
    }
}

/// Format a salary without a trailing `.0` for whole amounts.
pub fn format_salary(salary: f64) -> String {
    if salary.fract() == 0.0 && salary.abs() < 1e15 {
        format!("{salary:.0}")
    } else {
        salary.to_string()
    }
}

/// Parse date input flexibly, accepting multiple formats.
///
/// Date-time strings (`2024-01-15T00:00:00`) are cut to their date part.
pub fn parse_flexible_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    let date_part = match input.find(['T', ' ']) {
        Some(idx) => &input[..idx],
        None => input,
    };

    for fmt in &["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(date_part, fmt) {
            return Some(date);
        }
    }
    None
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

mod flexible_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format("%Y-%m-%d").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_flexible_date(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid date '{raw}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "id": 7,
        "name": "Asha Menon",
        "designation": "Engineer",
        "dateOfJoin": "2021-04-01T00:00:00",
        "dateOfBirth": "1994-11-23",
        "salary": 55000,
        "gender": "Female",
        "stateId": 3,
        "stateName": "Kerala"
    }"#;

    #[test]
    fn test_deserialize_employee() {
        let emp: Employee = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(emp.id, 7);
        assert_eq!(emp.date_of_join, NaiveDate::from_ymd_opt(2021, 4, 1).unwrap());
        assert_eq!(emp.date_of_birth, NaiveDate::from_ymd_opt(1994, 11, 23).unwrap());
        assert_eq!(emp.gender, Gender::Female);
        assert_eq!(emp.state_name, "Kerala");
    }

    #[test]
    fn test_null_state_name_becomes_empty() {
        let json = SAMPLE.replace(r#""stateName": "Kerala""#, r#""stateName": null"#);
        let emp: Employee = serde_json::from_str(&json).unwrap();
        assert_eq!(emp.state_name, "");
    }

    #[test]
    fn test_reject_unknown_gender() {
        let json = SAMPLE.replace(r#""Female""#, r#""Unknown""#);
        assert!(serde_json::from_str::<Employee>(&json).is_err());
    }

    #[test]
    fn test_reject_missing_name() {
        let json = SAMPLE.replace(r#""name": "Asha Menon","#, "");
        assert!(serde_json::from_str::<Employee>(&json).is_err());
    }

    #[test]
    fn test_gender_parse_case_insensitive() {
        assert_eq!(Gender::parse("male"), Some(Gender::Male));
        assert_eq!(Gender::parse(" FEMALE "), Some(Gender::Female));
        assert_eq!(Gender::parse(""), None);
    }

    #[test]
    fn test_draft_from_employee() {
        let emp: Employee = serde_json::from_str(SAMPLE).unwrap();
        let draft = EmployeeDraft::from_employee(&emp);
        assert_eq!(draft.name, "Asha Menon");
        assert_eq!(draft.date_of_join, "2021-04-01");
        assert_eq!(draft.salary, "55000");
        assert_eq!(draft.gender, "Female");
        assert_eq!(draft.state_id, "3");
    }

    #[test]
    fn test_draft_serializes_raw_strings() {
        let draft = EmployeeDraft {
            name: "Ravi".to_string(),
            designation: "Clerk".to_string(),
            date_of_join: "2023-01-02".to_string(),
            date_of_birth: "1999-05-06".to_string(),
            salary: "18000.50".to_string(),
            gender: "Male".to_string(),
            state_id: "4".to_string(),
        };
        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(value["salary"], "18000.50");
        assert_eq!(value["stateId"], "4");
        assert_eq!(value["dateOfJoin"], "2023-01-02");
    }

    #[test]
    fn test_format_salary() {
        assert_eq!(format_salary(55000.0), "55000");
        assert_eq!(format_salary(1234.5), "1234.5");
    }

    #[test]
    fn test_parse_flexible_date() {
        let expected = NaiveDate::from_ymd_opt(2024, 2, 29);
        assert_eq!(parse_flexible_date("2024-02-29"), expected);
        assert_eq!(parse_flexible_date("2024/02/29"), expected);
        assert_eq!(parse_flexible_date("2024-02-29T10:30:00.123"), expected);
        assert_eq!(parse_flexible_date("not a date"), None);
        assert_eq!(parse_flexible_date("  "), None);
    }
}
