//! Field rules shared by the API and the referral form.
//!
//! The server runs these on every create and is authoritative; the form runs the
//! same functions up front so the user sees per-field feedback before submitting.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;
use validator::{ValidationError, ValidationErrors};

/// Wire names of the candidate fields, in the order they appear on the form.
pub const FIELD_ORDER: [&str; 4] = ["name", "email", "phone", "jobTitle"];

pub const NAME_REQUIRED: &str = "Name is required";
pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Invalid email format";
pub const PHONE_REQUIRED: &str = "Phone is required";
pub const PHONE_INVALID: &str = "Phone must be a valid 10-digit number starting with 6-9";
pub const JOB_TITLE_REQUIRED: &str = "Job title is required";
pub const RESUME_NOT_PDF: &str = "Only PDF files are allowed";

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("email pattern compiles"));
// ASCII digits only; `\d` in this engine also matches other scripts.
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[6-9][0-9]{9}$").expect("phone pattern compiles"));

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_RE.is_match(phone)
}

/// Client-side resume check. Only the file name is inspected.
pub fn is_pdf_file_name(file_name: &str) -> bool {
    file_name.ends_with(".pdf")
}

pub fn name_error(name: &str) -> Option<&'static str> {
    required(name, NAME_REQUIRED)
}

pub fn email_error(email: &str) -> Option<&'static str> {
    required(email, EMAIL_REQUIRED).or_else(|| (!is_valid_email(email)).then_some(EMAIL_INVALID))
}

pub fn phone_error(phone: &str) -> Option<&'static str> {
    required(phone, PHONE_REQUIRED).or_else(|| (!is_valid_phone(phone)).then_some(PHONE_INVALID))
}

pub fn job_title_error(job_title: &str) -> Option<&'static str> {
    required(job_title, JOB_TITLE_REQUIRED)
}

fn required(value: &str, message: &'static str) -> Option<&'static str> {
    value.trim().is_empty().then_some(message)
}

/// Collects the per-field failures of a candidate's contact fields.
pub fn candidate_field_errors(
    name: &str,
    email: &str,
    phone: &str,
    job_title: &str,
) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    let checks = [
        ("name", "required", name_error(name)),
        ("email", "email", email_error(email)),
        ("phone", "phone", phone_error(phone)),
        ("jobTitle", "required", job_title_error(job_title)),
    ];
    for (field, code, message) in checks {
        if let Some(message) = message {
            errors.add(field, field_error(code, message));
        }
    }
    errors
}

fn field_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

/// First message per failing field, keyed by wire name.
pub fn first_messages(errors: &ValidationErrors) -> Vec<(&'static str, String)> {
    let field_errors = errors.field_errors();
    FIELD_ORDER
        .iter()
        .filter_map(|field| {
            let first = field_errors.get(*field)?.first()?;
            let message = first
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| first.code.to_string());
            Some((*field, message))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_simple_emails() {
        assert!(is_valid_email("jane@co.com"));
        assert!(is_valid_email("a.b+c@sub.domain.org"));
    }

    #[test]
    fn rejects_malformed_emails() {
        for email in ["", "jane", "jane@co", "@co.com", "jane@.com ", "ja ne@co.com", "jane@co."] {
            assert!(!is_valid_email(email), "{email:?} should be rejected");
        }
    }

    #[test]
    fn phone_must_be_ten_digits_starting_six_to_nine() {
        assert!(is_valid_phone("9123456789"));
        assert!(is_valid_phone("6000000000"));
        for phone in ["5123456789", "912345678", "91234567890", "91234a6789", "+919123456", "९१२३४५६७८९"] {
            assert!(!is_valid_phone(phone), "{phone:?} should be rejected");
        }
    }

    #[test]
    fn required_fields_report_required_before_format() {
        assert_eq!(email_error("   "), Some(EMAIL_REQUIRED));
        assert_eq!(email_error("nope"), Some(EMAIL_INVALID));
        assert_eq!(phone_error(""), Some(PHONE_REQUIRED));
        assert_eq!(phone_error("123"), Some(PHONE_INVALID));
        assert_eq!(name_error(" "), Some(NAME_REQUIRED));
        assert_eq!(job_title_error("Engineer"), None);
    }

    #[test]
    fn collects_every_failing_field_in_form_order() {
        let errors = candidate_field_errors("", "bad", "123", "Engineer");
        let messages = first_messages(&errors);
        assert_eq!(
            messages,
            vec![
                ("name", NAME_REQUIRED.to_string()),
                ("email", EMAIL_INVALID.to_string()),
                ("phone", PHONE_INVALID.to_string()),
            ]
        );
    }

    #[test]
    fn valid_fields_produce_no_errors() {
        let errors = candidate_field_errors("Jane Roe", "jane@co.com", "9123456789", "Engineer");
        assert!(errors.is_empty());
    }

    #[test]
    fn pdf_check_looks_at_suffix_only() {
        assert!(is_pdf_file_name("cv.pdf"));
        assert!(!is_pdf_file_name("cv.PDF"));
        assert!(!is_pdf_file_name("cv.docx"));
    }
}
