/// Draft state for creating or editing one contact
use crate::contact_store::Contact;
use crate::error::{Result, SosError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

/// Trimmed values ready for `ContactStore::add` or `ContactStore::update`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormOutput {
    pub name: String,
    pub phone: String,
    pub icon: String,
}

/// Raw draft fields exactly as typed.
///
/// The session does not know which contact id an edit targets; whoever
/// opened it keeps that binding.
#[derive(Debug, Clone)]
pub struct FormSession {
    pub name: String,
    pub phone: String,
    pub icon: String,
    mode: FormMode,
}

impl FormSession {
    pub fn new(existing: Option<&Contact>) -> Self {
        match existing {
            Some(c) => Self {
                name: c.name.clone(),
                phone: c.phone.clone(),
                icon: c.icon.clone(),
                mode: FormMode::Edit,
            },
            None => Self {
                name: String::new(),
                phone: String::new(),
                icon: String::new(),
                mode: FormMode::Create,
            },
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    /// Name and phone both need a non-whitespace character; icon is free
    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty() && !self.phone.trim().is_empty()
    }

    pub fn commit(&self) -> Result<FormOutput> {
        if self.name.trim().is_empty() {
            return Err(SosError::InvalidForm("name"));
        }
        if self.phone.trim().is_empty() {
            return Err(SosError::InvalidForm("phone"));
        }
        Ok(FormOutput {
            name: self.name.trim().to_string(),
            phone: self.phone.trim().to_string(),
            icon: self.icon.trim().to_string(),
        })
    }

    /// Drop the draft without touching the store
    pub fn cancel(self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_blank_and_invalid() {
        let form = FormSession::new(None);
        assert_eq!(form.mode(), FormMode::Create);
        assert!(form.name.is_empty() && form.phone.is_empty() && form.icon.is_empty());
        assert!(!form.is_valid());
    }

    #[test]
    fn test_edit_session_is_seeded() {
        let contact = Contact {
            id: 7,
            name: "Mom".to_string(),
            phone: "555-1111".to_string(),
            icon: "📱".to_string(),
        };
        let form = FormSession::new(Some(&contact));
        assert_eq!(form.mode(), FormMode::Edit);
        assert_eq!(form.name, "Mom");
        assert_eq!(form.phone, "555-1111");
        assert_eq!(form.icon, "📱");
        assert!(form.is_valid());
    }

    #[test]
    fn test_validity_ignores_whitespace_and_icon() {
        let mut form = FormSession::new(None);
        form.name = "   ".to_string();
        form.phone = "555".to_string();
        assert!(!form.is_valid());

        form.name = " a ".to_string();
        form.phone = "\t\n".to_string();
        assert!(!form.is_valid());

        form.phone = " 1".to_string();
        form.icon = String::new();
        assert!(form.is_valid());
    }

    #[test]
    fn test_commit_trims_every_field() {
        let mut form = FormSession::new(None);
        form.name = "  Mom ".to_string();
        form.phone = " 555-1111\n".to_string();
        form.icon = " 📱 ".to_string();

        assert_eq!(
            form.commit().unwrap(),
            FormOutput {
                name: "Mom".to_string(),
                phone: "555-1111".to_string(),
                icon: "📱".to_string(),
            }
        );
    }

    #[test]
    fn test_commit_refused_when_invalid() {
        let mut form = FormSession::new(None);
        form.phone = "555".to_string();
        assert!(matches!(form.commit(), Err(SosError::InvalidForm("name"))));

        form.name = "Mom".to_string();
        form.phone = "  ".to_string();
        assert!(matches!(form.commit(), Err(SosError::InvalidForm("phone"))));
    }
}
