//! Text sent to the shop when a visitor submits the popup.

use super::validation::PopupFormData;

/// `Name`, `Mobile No` and `Address` lines, plus an `Email` line when one was given.
#[must_use]
pub fn compose_popup_message(data: &PopupFormData) -> String {
    let mut message = format!(
        "Name: {}\nMobile No: {}\nAddress: {}",
        data.name, data.mobile_no, data.address
    );
    if let Some(email) = &data.email {
        message.push_str("\nEmail: ");
        message.push_str(email);
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(email: Option<&str>) -> PopupFormData {
        PopupFormData {
            name: "Ada".to_string(),
            mobile_no: "9999999999".to_string(),
            address: "12 Main St".to_string(),
            email: email.map(str::to_string),
        }
    }

    #[test]
    fn email_line_only_when_present() {
        assert_eq!(
            compose_popup_message(&data(None)),
            "Name: Ada\nMobile No: 9999999999\nAddress: 12 Main St"
        );
        assert_eq!(
            compose_popup_message(&data(Some("a@b.com"))),
            "Name: Ada\nMobile No: 9999999999\nAddress: 12 Main St\nEmail: a@b.com"
        );
    }
}
