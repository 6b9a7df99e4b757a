use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Server-assigned identifier.
///
/// The remote store hands ids out as strings, but older records carry plain
/// numbers, so both decode. The id is always kept and re-encoded as a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EmployeeId(String);

impl EmployeeId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EmployeeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for EmployeeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<u64> for EmployeeId {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

impl<'de> Deserialize<'de> for EmployeeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => EmployeeId(s),
            RawId::Number(n) => EmployeeId(n.to_string()),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Department {
    Hr,
    It,
    Finance,
    Marketing,
    /// A code this client does not know; displayed as-is.
    Other(String),
}

impl Department {
    pub const ALL: [Department; 4] = [
        Department::Hr,
        Department::It,
        Department::Finance,
        Department::Marketing,
    ];

    pub fn code(&self) -> &str {
        match self {
            Department::Hr => "hr",
            Department::It => "it",
            Department::Finance => "finance",
            Department::Marketing => "marketing",
            Department::Other(code) => code,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Department::Hr => "Human Resources",
            Department::It => "Information Technology",
            Department::Finance => "Finance",
            Department::Marketing => "Marketing",
            Department::Other(code) => code,
        }
    }
}

impl From<String> for Department {
    fn from(code: String) -> Self {
        match code.as_str() {
            "hr" => Department::Hr,
            "it" => Department::It,
            "finance" => Department::Finance,
            "marketing" => Department::Marketing,
            _ => Department::Other(code),
        }
    }
}

impl From<Department> for String {
    fn from(dept: Department) -> Self {
        match dept {
            Department::Other(code) => code,
            known => known.code().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EmployeeType {
    FullTime,
    PartTime,
    Contract,
    Internship,
    Other(String),
}

impl EmployeeType {
    pub const ALL: [EmployeeType; 4] = [
        EmployeeType::FullTime,
        EmployeeType::PartTime,
        EmployeeType::Contract,
        EmployeeType::Internship,
    ];

    pub fn code(&self) -> &str {
        match self {
            EmployeeType::FullTime => "full-time",
            EmployeeType::PartTime => "part-time",
            EmployeeType::Contract => "contract-basis",
            EmployeeType::Internship => "internship",
            EmployeeType::Other(code) => code,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            EmployeeType::FullTime => "Full Time",
            EmployeeType::PartTime => "Part Time",
            EmployeeType::Contract => "Contract",
            EmployeeType::Internship => "Intern",
            EmployeeType::Other(code) => code,
        }
    }
}

impl From<String> for EmployeeType {
    fn from(code: String) -> Self {
        match code.as_str() {
            "full-time" => EmployeeType::FullTime,
            "part-time" => EmployeeType::PartTime,
            "contract-basis" => EmployeeType::Contract,
            "internship" => EmployeeType::Internship,
            _ => EmployeeType::Other(code),
        }
    }
}

impl From<EmployeeType> for String {
    fn from(kind: EmployeeType) -> Self {
        match kind {
            EmployeeType::Other(code) => code,
            known => known.code().to_string(),
        }
    }
}

/// Display text for a performance rating option.
pub fn rating_label(rating: u8) -> &'static str {
    match rating {
        1 => "1 - Poor",
        2 => "2 - Can Do Better",
        3 => "3 - Good",
        4 => "4 - Very Good",
        5 => "5 - Exceeds Expectations",
        _ => "-",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EmployeeId>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub phone: String,
    #[serde(rename = "departmentId", default, deserialize_with = "non_empty")]
    pub department: Option<Department>,
    #[serde(rename = "employeeType", default, deserialize_with = "non_empty")]
    pub employee_type: Option<EmployeeType>,
    #[serde(rename = "hireDate", default, with = "iso_date")]
    pub hire_date: Option<NaiveDate>,
    #[serde(rename = "birthDate", default, with = "iso_date")]
    pub birth_date: Option<NaiveDate>,
    #[serde(default = "default_active", deserialize_with = "lenient_bool")]
    pub active: bool,
    #[serde(default, deserialize_with = "lenient_int")]
    pub experience: Option<u32>,
    #[serde(rename = "performanceRating", default, deserialize_with = "lenient_int")]
    pub performance_rating: Option<u8>,
    #[serde(default, deserialize_with = "non_empty")]
    pub notes: Option<String>,
}

impl Default for Employee {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            department: None,
            employee_type: None,
            hire_date: None,
            birth_date: None,
            active: true,
            experience: None,
            performance_rating: None,
            notes: None,
        }
    }
}

impl Employee {
    /// First character of the name, or `?` for a nameless record.
    pub fn avatar_initial(&self) -> char {
        self.name.trim().chars().next().unwrap_or('?')
    }

    pub fn department_label(&self) -> &str {
        self.department.as_ref().map(Department::label).unwrap_or("-")
    }

    pub fn type_label(&self) -> &str {
        self.employee_type.as_ref().map(EmployeeType::label).unwrap_or("-")
    }

    pub fn status_label(&self) -> &'static str {
        if self.active {
            "Active"
        } else {
            "Inactive"
        }
    }

    /// Copy of the record with the id stripped, for request bodies.
    pub fn without_id(&self) -> Employee {
        Employee {
            id: None,
            ..self.clone()
        }
    }

    /// Same field values, ignoring the id.
    pub fn same_fields(&self, other: &Employee) -> bool {
        self.without_id() == other.without_id()
    }
}

fn default_active() -> bool {
    true
}

/// Text carried by a loosely typed JSON value: numbers and bools keep their
/// literal form, anything else has no text.
fn value_text(value: serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(value_text(serde_json::Value::deserialize(deserializer)?).unwrap_or_default())
}

/// Decode a text field, treating `null` and blank strings as absent.
fn non_empty<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: From<String>,
{
    let raw = value_text(serde_json::Value::deserialize(deserializer)?);
    Ok(raw.filter(|s| !s.trim().is_empty()).map(T::from))
}

fn lenient_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Bool(b) => b,
        serde_json::Value::String(s) => !s.trim().eq_ignore_ascii_case("false"),
        serde_json::Value::Number(n) => n.as_f64().map(|v| v != 0.0).unwrap_or(true),
        _ => default_active(),
    })
}

/// Integer coercion for numbers sent as numbers or numeric strings.
fn lenient_int<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<i64>,
{
    let value = match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        serde_json::Value::String(s) => parse_int_prefix(&s),
        _ => None,
    };
    Ok(value.and_then(|v| T::try_from(v).ok()))
}

/// Parse the leading integer of a string: `" 4 stars"` is 4, `"abc"` is nothing.
pub fn parse_int_prefix(s: &str) -> Option<i64> {
    let s = s.trim();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|v| sign * v)
}

/// Parse a calendar date from `YYYY-MM-DD` or the date part of a timestamp.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    let head = s.get(..10)?;
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}

/// `Option<NaiveDate>` as a `YYYY-MM-DD` string or `null`.
pub mod iso_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S: Serializer>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(d) => serializer.collect_str(&d.format(FORMAT)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDate>, D::Error> {
        Ok(match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::String(s) => super::parse_date(&s),
            _ => None,
        })
    }
}
