//! Form definitions, editing state and input-constraint validation.
//!
//! Validation mirrors what a browser enforces on `required`, `type=email`,
//! `type=date` and `<select>` inputs.  A form only reaches the submission
//! controller as a [`ValidatedForm`].

use chrono::NaiveDate;
use thiserror::Error;

/// Which form on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormKind {
    /// "Give Me a Project": hiring request with type, budget and deadline.
    ProjectRequest,
    /// Plain contact message.
    Contact,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Multiline,
    Date,
    Choice(&'static [&'static str]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Name sent to the relay.
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub placeholder: &'static str,
}

pub const PROJECT_TYPES: &[&str] = &[
    "Portfolio Website",
    "React Website",
    "E-commerce Website",
    "Landing Page",
    "Full MERN App",
    "Other",
];

const PROJECT_REQUEST_FIELDS: &[FieldSpec] = &[
    FieldSpec { name: "name", label: "Your Name", kind: FieldKind::Text, required: true, placeholder: "" },
    FieldSpec { name: "email", label: "Email", kind: FieldKind::Email, required: true, placeholder: "" },
    FieldSpec {
        name: "project_type",
        label: "Project Type",
        kind: FieldKind::Choice(PROJECT_TYPES),
        required: true,
        placeholder: "",
    },
    FieldSpec { name: "budget", label: "Budget (INR)", kind: FieldKind::Text, required: false, placeholder: "₹2000 - ₹15000" },
    FieldSpec { name: "deadline", label: "Deadline", kind: FieldKind::Date, required: false, placeholder: "YYYY-MM-DD" },
    FieldSpec {
        name: "description",
        label: "Project Description",
        kind: FieldKind::Multiline,
        required: true,
        placeholder: "",
    },
];

const CONTACT_FIELDS: &[FieldSpec] = &[
    FieldSpec { name: "name", label: "Name", kind: FieldKind::Text, required: true, placeholder: "" },
    FieldSpec { name: "email", label: "Email", kind: FieldKind::Email, required: true, placeholder: "" },
    FieldSpec { name: "message", label: "Message", kind: FieldKind::Multiline, required: true, placeholder: "" },
];

impl FormKind {
    pub fn fields(self) -> &'static [FieldSpec] {
        match self {
            FormKind::ProjectRequest => PROJECT_REQUEST_FIELDS,
            FormKind::Contact => CONTACT_FIELDS,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            FormKind::ProjectRequest => "Give Me a Project",
            FormKind::Contact => "Send a Message",
        }
    }

    pub fn submit_label(self) -> &'static str {
        match self {
            FormKind::ProjectRequest => "Submit Project",
            FormKind::Contact => "Send Message",
        }
    }

    /// Subject line attached to the relayed email.
    pub fn subject(self, sender: &str) -> String {
        match self {
            FormKind::ProjectRequest => format!("New project request from {sender}"),
            FormKind::Contact => format!("New message from {sender}"),
        }
    }
}

// ───────────────────────────────────────── validation ────────

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FieldError {
    #[error("{label} is required")]
    Missing { field: &'static str, label: &'static str },
    #[error("{label} must be a valid email address")]
    InvalidEmail { field: &'static str, label: &'static str },
    #[error("{label} must be a date like 2025-01-31")]
    InvalidDate { field: &'static str, label: &'static str },
    #[error("{label} must be one of the listed options")]
    UnknownChoice { field: &'static str, label: &'static str },
}

impl FieldError {
    pub fn field(&self) -> &'static str {
        match self {
            FieldError::Missing { field, .. }
            | FieldError::InvalidEmail { field, .. }
            | FieldError::InvalidDate { field, .. }
            | FieldError::UnknownChoice { field, .. } => *field,
        }
    }
}

/// A form whose values passed every constraint.  Values are trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedForm {
    pub kind: FormKind,
    pub fields: Vec<(&'static str, String)>,
}

impl ValidatedForm {
    pub fn value(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Same acceptance rule as an HTML `type=email` input.
pub fn is_valid_email(s: &str) -> bool {
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    const LOCAL_EXTRA: &str = ".!#$%&'*+/=?^_`{|}~-";
    let local_ok = !local.is_empty()
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || LOCAL_EXTRA.contains(c));
    let domain_ok = !domain.is_empty()
        && domain.split('.').all(|label| {
            !label.is_empty()
                && label.len() <= 63
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        });
    local_ok && domain_ok
}

fn check_field(spec: &FieldSpec, value: &str) -> Result<(), FieldError> {
    let (field, label) = (spec.name, spec.label);
    if value.is_empty() {
        return if spec.required {
            Err(FieldError::Missing { field, label })
        } else {
            Ok(())
        };
    }
    match spec.kind {
        FieldKind::Email if !is_valid_email(value) => Err(FieldError::InvalidEmail { field, label }),
        FieldKind::Date if NaiveDate::parse_from_str(value, "%Y-%m-%d").is_err() => {
            Err(FieldError::InvalidDate { field, label })
        }
        FieldKind::Choice(options) if !options.iter().any(|o| *o == value) => {
            Err(FieldError::UnknownChoice { field, label })
        }
        _ => Ok(()),
    }
}

// ───────────────────────────────────────── editing state ─────

/// Values and cursor for one form.  Focus index `fields().len()` is the
/// submit button.
#[derive(Debug, Clone)]
pub struct FormState {
    kind: FormKind,
    values: Vec<String>,
    focus: usize,
}

impl FormState {
    pub fn new(kind: FormKind) -> Self {
        let mut form = Self {
            kind,
            values: Vec::new(),
            focus: 0,
        };
        form.clear();
        form
    }

    /// Reset every field to its initial value.  Choices fall back to their
    /// first option, like an untouched `<select>`.
    pub fn clear(&mut self) {
        self.values = self
            .kind
            .fields()
            .iter()
            .map(|spec| match spec.kind {
                FieldKind::Choice(options) => options.first().copied().unwrap_or("").to_string(),
                _ => String::new(),
            })
            .collect();
        self.focus = 0;
    }

    #[cfg(test)]
    pub fn value(&self, name: &str) -> Option<&str> {
        let idx = self.kind.fields().iter().position(|f| f.name == name)?;
        Some(self.values[idx].as_str())
    }

    #[cfg(test)]
    pub fn set_value(&mut self, name: &str, value: &str) -> bool {
        match self.kind.fields().iter().position(|f| f.name == name) {
            Some(idx) => {
                self.values[idx] = value.to_string();
                true
            }
            None => false,
        }
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// True when every field still holds its initial value.
    #[cfg(test)]
    pub fn is_pristine(&self) -> bool {
        let fresh = FormState::new(self.kind);
        self.values == fresh.values
    }

    pub fn validate(&self) -> Result<ValidatedForm, Vec<FieldError>> {
        let mut errors = Vec::new();
        let mut fields = Vec::new();
        for (spec, raw) in self.kind.fields().iter().zip(&self.values) {
            let value = raw.trim();
            match check_field(spec, value) {
                Ok(()) => fields.push((spec.name, value.to_string())),
                Err(e) => errors.push(e),
            }
        }
        if errors.is_empty() {
            Ok(ValidatedForm {
                kind: self.kind,
                fields,
            })
        } else {
            Err(errors)
        }
    }

    // ── focus ───────────────────────────────────────────────────

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn focused_field(&self) -> Option<&'static FieldSpec> {
        self.kind.fields().get(self.focus)
    }

    pub fn is_submit_focused(&self) -> bool {
        self.focus == self.kind.fields().len()
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % (self.kind.fields().len() + 1);
    }

    pub fn focus_prev(&mut self) {
        let slots = self.kind.fields().len() + 1;
        self.focus = (self.focus + slots - 1) % slots;
    }

    /// Move focus to the named field.
    pub fn focus_field(&mut self, name: &str) {
        if let Some(idx) = self.kind.fields().iter().position(|f| f.name == name) {
            self.focus = idx;
        }
    }

    // ── editing ─────────────────────────────────────────────────

    /// Type a character into the focused field.  Choice fields and the
    /// submit button ignore typing.
    pub fn insert_char(&mut self, c: char) {
        let Some(spec) = self.focused_field() else {
            return;
        };
        if matches!(spec.kind, FieldKind::Choice(_)) {
            return;
        }
        if c == '\n' && spec.kind != FieldKind::Multiline {
            return;
        }
        self.values[self.focus].push(c);
    }

    pub fn backspace(&mut self) {
        let Some(spec) = self.focused_field() else {
            return;
        };
        if !matches!(spec.kind, FieldKind::Choice(_)) {
            self.values[self.focus].pop();
        }
    }

    /// Step a focused choice field through its options.
    pub fn cycle_choice(&mut self, forward: bool) {
        let Some(FieldSpec {
            kind: FieldKind::Choice(options),
            ..
        }) = self.focused_field()
        else {
            return;
        };
        if options.is_empty() {
            return;
        }
        let current = options
            .iter()
            .position(|o| *o == self.values[self.focus])
            .unwrap_or(0);
        let next = if forward {
            (current + 1) % options.len()
        } else {
            (current + options.len() - 1) % options.len()
        };
        self.values[self.focus] = options[next].to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_contact() -> FormState {
        let mut f = FormState::new(FormKind::Contact);
        f.set_value("name", "Ann");
        f.set_value("email", "a@b.com");
        f.set_value("message", "hi");
        f
    }

    #[test]
    fn email_rule_matches_html_input() {
        for ok in ["a@b.com", "first.last+tag@sub.example.org", "x@localhost"] {
            assert!(is_valid_email(ok), "{ok}");
        }
        for bad in ["", "plain", "@b.com", "a@", "a@b..com", "a b@c.com", "a@-b.com", "a@b_c.com"] {
            assert!(!is_valid_email(bad), "{bad}");
        }
    }

    #[test]
    fn complete_contact_form_validates() {
        let v = filled_contact().validate().unwrap();
        assert_eq!(v.kind, FormKind::Contact);
        assert_eq!(v.value("name"), Some("Ann"));
        assert_eq!(v.value("message"), Some("hi"));
    }

    #[test]
    fn blank_required_fields_are_reported() {
        let mut f = FormState::new(FormKind::Contact);
        f.set_value("name", "   ");
        let errors = f.validate().unwrap_err();
        let fields: Vec<_> = errors.iter().map(FieldError::field).collect();
        assert_eq!(fields, ["name", "email", "message"]);
        assert_eq!(errors[0].to_string(), "Name is required");
    }

    #[test]
    fn bad_email_is_reported() {
        let mut f = filled_contact();
        f.set_value("email", "not-an-email");
        let errors = f.validate().unwrap_err();
        assert_eq!(
            errors,
            vec![FieldError::InvalidEmail {
                field: "email",
                label: "Email"
            }]
        );
    }

    #[test]
    fn project_request_optional_fields_may_be_empty() {
        let mut f = FormState::new(FormKind::ProjectRequest);
        f.set_value("name", "Ann");
        f.set_value("email", "a@b.com");
        f.set_value("description", "A landing page");
        let v = f.validate().unwrap();
        assert_eq!(v.value("project_type"), Some("Portfolio Website"));
        assert_eq!(v.value("budget"), Some(""));
    }

    #[test]
    fn deadline_must_be_a_real_date() {
        let mut f = FormState::new(FormKind::ProjectRequest);
        f.set_value("name", "Ann");
        f.set_value("email", "a@b.com");
        f.set_value("description", "x");
        f.set_value("deadline", "2025-02-30");
        let errors = f.validate().unwrap_err();
        assert_eq!(errors[0].field(), "deadline");

        f.set_value("deadline", "2025-02-28");
        assert!(f.validate().is_ok());
    }

    #[test]
    fn choice_outside_options_is_rejected() {
        let mut f = FormState::new(FormKind::ProjectRequest);
        f.set_value("project_type", "Mobile Game");
        let errors = f.validate().unwrap_err();
        assert!(errors.iter().any(|e| matches!(e, FieldError::UnknownChoice { .. })));
    }

    #[test]
    fn typing_respects_field_kind() {
        let mut f = FormState::new(FormKind::ProjectRequest);
        f.insert_char('A');
        f.insert_char('\n');
        assert_eq!(f.value("name"), Some("A"));

        f.focus_field("project_type");
        f.insert_char('x');
        assert_eq!(f.value("project_type"), Some("Portfolio Website"));
        f.cycle_choice(true);
        assert_eq!(f.value("project_type"), Some("React Website"));
        f.cycle_choice(false);
        f.cycle_choice(false);
        assert_eq!(f.value("project_type"), Some("Other"));

        f.focus_field("description");
        f.insert_char('a');
        f.insert_char('\n');
        f.insert_char('b');
        f.backspace();
        assert_eq!(f.value("description"), Some("a\n"));
    }

    #[test]
    fn focus_cycles_through_submit_button() {
        let mut f = FormState::new(FormKind::Contact);
        for _ in 0..3 {
            f.focus_next();
        }
        assert!(f.is_submit_focused());
        f.focus_next();
        assert_eq!(f.focus(), 0);
        f.focus_prev();
        assert!(f.is_submit_focused());
    }

    #[test]
    fn clear_resets_values_and_focus() {
        let mut f = filled_contact();
        f.focus_next();
        assert!(!f.is_pristine());
        f.clear();
        assert!(f.is_pristine());
        assert_eq!(f.focus(), 0);
    }
}
