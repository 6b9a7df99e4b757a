//! Editable form state for one employee record.
//!
//! Every field has an explicit typed slot in [`FormState`]. Input goes in
//! through setters, and [`FormState::submit`] reads all slots at once,
//! validates them, and returns either a record ready to send or a per-field
//! error map. Nothing is sent anywhere from here.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use validator::Validate;

use crate::models::{iso_date, parse_date, rating_label, Department, Employee, EmployeeType};

/// Per-field validation messages, in form order.
pub type FieldErrors = BTreeMap<Field, String>;

const MAX_NAME_LENGTH: usize = 100;
const MAX_EMAIL_LENGTH: usize = 254;
const MAX_PHONE_LENGTH: usize = 32;
const MAX_DATE_LENGTH: usize = 10;
const MAX_EXPERIENCE_LENGTH: usize = 2;
const MAX_NOTES_LENGTH: usize = 500;

const INVALID_DATE_MESSAGE: &str = "Please enter a valid date (YYYY-MM-DD)";
const INVALID_EXPERIENCE_MESSAGE: &str = "Experience must be between 0 and 50";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Email,
    Phone,
    Department,
    HireDate,
    BirthDate,
    Active,
    EmployeeType,
    Experience,
    PerformanceRating,
    Notes,
}

/// How a field is edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Date,
    Number,
    Choice,
    Toggle,
}

impl Field {
    pub const ALL: [Field; 11] = [
        Field::Name,
        Field::Email,
        Field::Phone,
        Field::Department,
        Field::HireDate,
        Field::BirthDate,
        Field::Active,
        Field::EmployeeType,
        Field::Experience,
        Field::PerformanceRating,
        Field::Notes,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Email => "Email",
            Field::Phone => "Phone Number",
            Field::Department => "Department",
            Field::HireDate => "Hire Date",
            Field::BirthDate => "Birth Date",
            Field::Active => "Active Status",
            Field::EmployeeType => "Employee Type",
            Field::Experience => "Experience (Years)",
            Field::PerformanceRating => "Performance Rating",
            Field::Notes => "Notes",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            Field::Name => "First Name",
            Field::Email => "Email",
            Field::Phone => "Phone Number",
            Field::Department => "Select Department",
            Field::HireDate | Field::BirthDate => "YYYY-MM-DD",
            Field::Active => "",
            Field::EmployeeType => "Select Type",
            Field::Experience => "0-50",
            Field::PerformanceRating => "Rating",
            Field::Notes => "More Info about the employee",
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            Field::Name | Field::Email | Field::Phone | Field::Notes => FieldKind::Text,
            Field::HireDate | Field::BirthDate => FieldKind::Date,
            Field::Experience => FieldKind::Number,
            Field::Department | Field::EmployeeType | Field::PerformanceRating => FieldKind::Choice,
            Field::Active => FieldKind::Toggle,
        }
    }

    pub fn is_required(&self) -> bool {
        matches!(
            self,
            Field::Name
                | Field::Email
                | Field::Phone
                | Field::Department
                | Field::HireDate
                | Field::EmployeeType
        )
    }

    /// Next field in focus order (wrapping around)
    pub fn next(&self) -> Self {
        let idx = Self::ALL.iter().position(|f| f == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Previous field in focus order (wrapping around)
    pub fn prev(&self) -> Self {
        let idx = Self::ALL.iter().position(|f| f == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    fn max_length(&self) -> usize {
        match self {
            Field::Name => MAX_NAME_LENGTH,
            Field::Email => MAX_EMAIL_LENGTH,
            Field::Phone => MAX_PHONE_LENGTH,
            Field::HireDate | Field::BirthDate => MAX_DATE_LENGTH,
            Field::Experience => MAX_EXPERIENCE_LENGTH,
            Field::Notes => MAX_NOTES_LENGTH,
            _ => 0,
        }
    }

    /// Map a validator field key back to the form field.
    fn from_key(key: &str) -> Option<Self> {
        match key {
            "name" => Some(Field::Name),
            "email" => Some(Field::Email),
            "phone" => Some(Field::Phone),
            "department" => Some(Field::Department),
            "employee_type" => Some(Field::EmployeeType),
            "hire_date" => Some(Field::HireDate),
            "experience" => Some(Field::Experience),
            "performance_rating" => Some(Field::PerformanceRating),
            _ => None,
        }
    }
}

/// Check if a character should be accepted into a field of the given current length
pub fn can_add_char(field: Field, current_len: usize, c: char) -> bool {
    if c.is_control() || current_len >= field.max_length() {
        return false;
    }
    match field.kind() {
        FieldKind::Text => true,
        FieldKind::Date => c.is_ascii_digit() || c == '-',
        FieldKind::Number => c.is_ascii_digit(),
        FieldKind::Choice | FieldKind::Toggle => false,
    }
}

/// Snapshot of the form values checked on submit.
#[derive(Debug, Validate)]
struct EmployeeDraft {
    #[validate(
        required(message = "Please enter name"),
        length(min = 4, message = "Name must be more than 3 characters")
    )]
    name: Option<String>,
    #[validate(
        required(message = "Please enter email"),
        email(message = "Please enter a valid email")
    )]
    email: Option<String>,
    #[validate(required(message = "Please enter phone number"))]
    phone: Option<String>,
    #[validate(required(message = "Please select department"))]
    department: Option<Department>,
    #[validate(required(message = "Please select Hire date"))]
    hire_date: Option<NaiveDate>,
    #[validate(required(message = "Please select employee type"))]
    employee_type: Option<EmployeeType>,
    #[validate(range(min = 0, max = 50, message = "Experience must be between 0 and 50"))]
    experience: Option<i64>,
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    performance_rating: Option<i64>,
    birth_date: Option<NaiveDate>,
    active: bool,
    notes: Option<String>,
}

impl EmployeeDraft {
    /// Build the record to send. Only called after validation passed.
    fn into_employee(self) -> Employee {
        Employee {
            id: None,
            name: self.name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            phone: self.phone.unwrap_or_default(),
            department: self.department,
            employee_type: self.employee_type,
            hire_date: self.hire_date,
            birth_date: self.birth_date,
            active: self.active,
            experience: self.experience.and_then(|v| u32::try_from(v).ok()),
            performance_rating: self.performance_rating.and_then(|v| u8::try_from(v).ok()),
            notes: self.notes,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub department: Option<Department>,
    pub hire_date: String,
    pub birth_date: String,
    pub active: bool,
    pub employee_type: Option<EmployeeType>,
    pub experience: String,
    pub performance_rating: Option<u8>,
    pub notes: String,
    errors: FieldErrors,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            department: None,
            hire_date: String::new(),
            birth_date: String::new(),
            active: true,
            employee_type: None,
            experience: String::new(),
            performance_rating: None,
            notes: String::new(),
            errors: FieldErrors::new(),
        }
    }
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset every field to its initial value and drop all errors.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Fill the form from a fetched record.
    pub fn populate(&mut self, employee: &Employee) {
        let format_date = |d: &Option<NaiveDate>| {
            d.map(|d| d.format(iso_date::FORMAT).to_string()).unwrap_or_default()
        };

        *self = Self {
            name: employee.name.clone(),
            email: employee.email.clone(),
            phone: employee.phone.clone(),
            department: employee.department.clone(),
            hire_date: format_date(&employee.hire_date),
            birth_date: format_date(&employee.birth_date),
            active: employee.active,
            employee_type: employee.employee_type.clone(),
            experience: employee.experience.map(|e| e.to_string()).unwrap_or_default(),
            performance_rating: employee.performance_rating,
            notes: employee.notes.clone().unwrap_or_default(),
            errors: FieldErrors::new(),
        };
    }

    fn text_slot(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::Name => Some(&mut self.name),
            Field::Email => Some(&mut self.email),
            Field::Phone => Some(&mut self.phone),
            Field::HireDate => Some(&mut self.hire_date),
            Field::BirthDate => Some(&mut self.birth_date),
            Field::Experience => Some(&mut self.experience),
            Field::Notes => Some(&mut self.notes),
            Field::Department | Field::Active | Field::EmployeeType | Field::PerformanceRating => None,
        }
    }

    /// Replace the text of a text, date, or number field.
    pub fn set_text(&mut self, field: Field, value: &str) {
        if let Some(slot) = self.text_slot(field) {
            *slot = value.to_string();
            self.errors.remove(&field);
        }
    }

    /// Append a typed character. Returns false if the field rejected it.
    pub fn push_char(&mut self, field: Field, c: char) -> bool {
        let Some(slot) = self.text_slot(field) else {
            return false;
        };
        if !can_add_char(field, slot.chars().count(), c) {
            return false;
        }
        slot.push(c);
        self.errors.remove(&field);
        true
    }

    pub fn pop_char(&mut self, field: Field) {
        if let Some(slot) = self.text_slot(field) {
            slot.pop();
            self.errors.remove(&field);
        }
    }

    /// Step a choice field to its next (or previous) option.
    /// Optional choices pass through "no selection"; required ones do not.
    pub fn cycle_choice(&mut self, field: Field, forward: bool) {
        match field {
            Field::Department => {
                self.department = cycle(&self.department, &Department::ALL, forward, false);
            }
            Field::EmployeeType => {
                self.employee_type = cycle(&self.employee_type, &EmployeeType::ALL, forward, false);
            }
            Field::PerformanceRating => {
                self.performance_rating = cycle(&self.performance_rating, &[1, 2, 3, 4, 5], forward, true);
            }
            _ => return,
        }
        self.errors.remove(&field);
    }

    pub fn toggle(&mut self, field: Field) {
        if field == Field::Active {
            self.active = !self.active;
        }
    }

    /// Current value as shown in the form, or `None` when the field is empty.
    pub fn display_value(&self, field: Field) -> Option<String> {
        let text = |s: &str| (!s.is_empty()).then(|| s.to_string());
        match field {
            Field::Name => text(&self.name),
            Field::Email => text(&self.email),
            Field::Phone => text(&self.phone),
            Field::HireDate => text(&self.hire_date),
            Field::BirthDate => text(&self.birth_date),
            Field::Experience => text(&self.experience),
            Field::Notes => text(&self.notes),
            Field::Department => self.department.as_ref().map(|d| d.label().to_string()),
            Field::EmployeeType => self.employee_type.as_ref().map(|t| t.label().to_string()),
            Field::PerformanceRating => self.performance_rating.map(|r| rating_label(r).to_string()),
            Field::Active => Some(if self.active { "On" } else { "Off" }.to_string()),
        }
    }

    pub fn error(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Validate the whole form.
    ///
    /// On success returns the record to send (without an id). On failure the
    /// same error map is kept on the form for inline display.
    pub fn submit(&mut self) -> Result<Employee, FieldErrors> {
        let mut errors = FieldErrors::new();

        let hire_date = parse_date_input(&self.hire_date, Field::HireDate, &mut errors);
        let birth_date = parse_date_input(&self.birth_date, Field::BirthDate, &mut errors);

        let experience = match non_blank(&self.experience) {
            Some(raw) => match raw.parse::<i64>() {
                Ok(v) => Some(v),
                Err(_) => {
                    errors.insert(Field::Experience, INVALID_EXPERIENCE_MESSAGE.to_string());
                    None
                }
            },
            None => None,
        };

        let draft = EmployeeDraft {
            name: non_blank(&self.name),
            email: non_blank(&self.email),
            phone: non_blank(&self.phone),
            department: self.department.clone(),
            hire_date,
            employee_type: self.employee_type.clone(),
            experience,
            performance_rating: self.performance_rating.map(i64::from),
            birth_date,
            active: self.active,
            notes: non_blank(&self.notes),
        };

        if let Err(validation) = draft.validate() {
            for (key, field_errors) in validation.field_errors() {
                let Some(field) = Field::from_key(&key) else {
                    continue;
                };
                let message = field_errors
                    .first()
                    .and_then(|e| e.message.as_ref())
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid {}", field.label().to_lowercase()));
                // Parse errors recorded above win over the generic rule
                errors.entry(field).or_insert(message);
            }
        }

        self.errors = errors.clone();
        if errors.is_empty() {
            Ok(draft.into_employee())
        } else {
            Err(errors)
        }
    }
}

fn non_blank(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn parse_date_input(raw: &str, field: Field, errors: &mut FieldErrors) -> Option<NaiveDate> {
    let raw = non_blank(raw)?;
    // Require the full form, not just a parsable prefix
    let parsed = (raw.len() == MAX_DATE_LENGTH).then(|| parse_date(&raw)).flatten();
    if parsed.is_none() {
        errors.insert(field, INVALID_DATE_MESSAGE.to_string());
    }
    parsed
}

fn cycle<T: Clone + PartialEq>(current: &Option<T>, options: &[T], forward: bool, allow_none: bool) -> Option<T> {
    let mut slots: Vec<Option<T>> = Vec::with_capacity(options.len() + 1);
    if allow_none {
        slots.push(None);
    }
    slots.extend(options.iter().cloned().map(Some));

    match slots.iter().position(|s| s == current) {
        Some(idx) => {
            let len = slots.len();
            let next = if forward { (idx + 1) % len } else { (idx + len - 1) % len };
            slots[next].clone()
        }
        // Unknown or empty current value: start from either end
        None => {
            let fallback = if forward { options.first() } else { options.last() };
            fallback.cloned()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EmployeeId;

    fn filled_form() -> FormState {
        let mut form = FormState::new();
        form.set_text(Field::Name, "Grace Hopper");
        form.set_text(Field::Email, "grace@example.com");
        form.set_text(Field::Phone, "555-123-4567");
        form.department = Some(Department::It);
        form.employee_type = Some(EmployeeType::FullTime);
        form.set_text(Field::HireDate, "2024-03-15");
        form
    }

    #[test]
    fn test_valid_form_submits() {
        let mut form = filled_form();
        let emp = form.submit().expect("valid form");
        assert_eq!(emp.id, None);
        assert_eq!(emp.name, "Grace Hopper");
        assert_eq!(emp.hire_date, NaiveDate::from_ymd_opt(2024, 3, 15));
        assert!(emp.active);
        assert_eq!(emp.birth_date, None);
        assert_eq!(emp.notes, None);
        assert!(!form.has_errors());
    }

    #[test]
    fn test_short_name_rejected() {
        let mut form = filled_form();
        form.set_text(Field::Name, "Bob");
        let errors = form.submit().expect_err("name too short");
        assert_eq!(
            errors.get(&Field::Name).map(String::as_str),
            Some("Name must be more than 3 characters")
        );
        assert_eq!(form.error(Field::Name), Some("Name must be more than 3 characters"));
    }

    #[test]
    fn test_four_character_name_accepted() {
        let mut form = filled_form();
        form.set_text(Field::Name, "  Anna  ");
        let emp = form.submit().expect("four characters is enough");
        assert_eq!(emp.name, "Anna");
    }

    #[test]
    fn test_empty_form_reports_every_required_field() {
        let mut form = FormState::new();
        let errors = form.submit().expect_err("empty form");
        assert_eq!(errors.get(&Field::Name).map(String::as_str), Some("Please enter name"));
        assert_eq!(errors.get(&Field::Email).map(String::as_str), Some("Please enter email"));
        assert_eq!(errors.get(&Field::Phone).map(String::as_str), Some("Please enter phone number"));
        assert_eq!(errors.get(&Field::Department).map(String::as_str), Some("Please select department"));
        assert_eq!(errors.get(&Field::HireDate).map(String::as_str), Some("Please select Hire date"));
        assert_eq!(
            errors.get(&Field::EmployeeType).map(String::as_str),
            Some("Please select employee type")
        );
        assert!(!errors.contains_key(&Field::BirthDate));
        assert!(!errors.contains_key(&Field::Notes));
    }

    #[test]
    fn test_each_required_field_is_checked_alone() {
        for field in [Field::Email, Field::Phone, Field::HireDate] {
            let mut form = filled_form();
            form.set_text(field, "   ");
            let errors = form.submit().expect_err("missing required field");
            assert_eq!(errors.len(), 1, "only {:?} should fail", field);
            assert!(errors.contains_key(&field));
        }

        let mut form = filled_form();
        form.department = None;
        assert!(form.submit().expect_err("no department").contains_key(&Field::Department));

        let mut form = filled_form();
        form.employee_type = None;
        assert!(form.submit().expect_err("no type").contains_key(&Field::EmployeeType));
    }

    #[test]
    fn test_invalid_email_rejected() {
        let mut form = filled_form();
        form.set_text(Field::Email, "grace-at-example");
        let errors = form.submit().expect_err("bad email");
        assert_eq!(errors.get(&Field::Email).map(String::as_str), Some("Please enter a valid email"));
    }

    #[test]
    fn test_invalid_dates_rejected() {
        let mut form = filled_form();
        form.set_text(Field::HireDate, "2024-02-30");
        form.set_text(Field::BirthDate, "1990-1-1");
        let errors = form.submit().expect_err("bad dates");
        assert_eq!(errors.get(&Field::HireDate).map(String::as_str), Some(INVALID_DATE_MESSAGE));
        assert_eq!(errors.get(&Field::BirthDate).map(String::as_str), Some(INVALID_DATE_MESSAGE));
    }

    #[test]
    fn test_experience_range() {
        let mut form = filled_form();
        form.set_text(Field::Experience, "51");
        let errors = form.submit().expect_err("too much experience");
        assert_eq!(
            errors.get(&Field::Experience).map(String::as_str),
            Some("Experience must be between 0 and 50")
        );

        form.set_text(Field::Experience, "50");
        assert_eq!(form.submit().expect("upper bound ok").experience, Some(50));

        form.set_text(Field::Experience, "0");
        assert_eq!(form.submit().expect("lower bound ok").experience, Some(0));
    }

    #[test]
    fn test_populate_then_submit_preserves_fields() {
        let original = Employee {
            id: Some(EmployeeId::from("2")),
            name: "Grace Hopper".to_string(),
            email: "grace@example.com".to_string(),
            phone: "5551234567".to_string(),
            department: Some(Department::Marketing),
            employee_type: Some(EmployeeType::PartTime),
            hire_date: NaiveDate::from_ymd_opt(2024, 3, 15),
            birth_date: NaiveDate::from_ymd_opt(1990, 12, 9),
            active: false,
            experience: Some(7),
            performance_rating: Some(3),
            notes: Some("Night shift".to_string()),
        };

        let mut form = FormState::new();
        form.populate(&original);
        assert_eq!(form.hire_date, "2024-03-15");
        assert_eq!(form.birth_date, "1990-12-09");
        assert_eq!(form.display_value(Field::PerformanceRating).as_deref(), Some("3 - Good"));

        let submitted = form.submit().expect("populated form is valid");
        assert_eq!(submitted.id, None);
        assert!(submitted.same_fields(&original));
    }

    #[test]
    fn test_clear_resets_to_defaults() {
        let mut form = filled_form();
        form.active = false;
        form.set_text(Field::Name, "Bob");
        let _ = form.submit();
        assert!(form.has_errors());

        form.clear();
        assert_eq!(form, FormState::default());
        assert!(form.active);
    }

    #[test]
    fn test_editing_a_field_clears_its_error() {
        let mut form = FormState::new();
        let _ = form.submit();
        assert!(form.error(Field::Name).is_some());
        form.push_char(Field::Name, 'G');
        assert!(form.error(Field::Name).is_none());
        assert!(form.error(Field::Email).is_some());
    }

    #[test]
    fn test_cycle_required_choice_skips_none() {
        let mut form = FormState::new();
        form.cycle_choice(Field::Department, true);
        assert_eq!(form.department, Some(Department::Hr));
        form.cycle_choice(Field::Department, false);
        assert_eq!(form.department, Some(Department::Marketing));
        form.cycle_choice(Field::Department, true);
        assert_eq!(form.department, Some(Department::Hr));

        form.department = Some(Department::Other("legal".to_string()));
        form.cycle_choice(Field::Department, true);
        assert_eq!(form.department, Some(Department::Hr));
    }

    #[test]
    fn test_cycle_optional_rating_passes_through_none() {
        let mut form = FormState::new();
        form.cycle_choice(Field::PerformanceRating, false);
        assert_eq!(form.performance_rating, Some(5));
        form.cycle_choice(Field::PerformanceRating, true);
        assert_eq!(form.performance_rating, None);
        form.cycle_choice(Field::PerformanceRating, true);
        assert_eq!(form.performance_rating, Some(1));
    }

    #[test]
    fn test_can_add_char() {
        assert!(can_add_char(Field::Name, 0, 'a'));
        assert!(!can_add_char(Field::Name, MAX_NAME_LENGTH, 'a'));
        assert!(!can_add_char(Field::Name, 0, '\n'));
        assert!(can_add_char(Field::HireDate, 4, '-'));
        assert!(!can_add_char(Field::HireDate, 4, '/'));
        assert!(!can_add_char(Field::HireDate, 10, '1'));
        assert!(can_add_char(Field::Experience, 1, '9'));
        assert!(!can_add_char(Field::Experience, 0, 'x'));
        assert!(!can_add_char(Field::Experience, 2, '1'));
        assert!(!can_add_char(Field::Department, 0, 'h'));
    }

    #[test]
    fn test_field_focus_order_wraps() {
        assert_eq!(Field::Name.next(), Field::Email);
        assert_eq!(Field::Notes.next(), Field::Name);
        assert_eq!(Field::Name.prev(), Field::Notes);
        assert_eq!(Field::Active.prev(), Field::BirthDate);
    }
}
