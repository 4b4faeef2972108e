use serde::Serialize;

/// Current input values of the contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContactFields {
    pub name: String,
    pub company: String,
    pub email: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    Name,
    Company,
    Email,
    Message,
}

impl ContactFields {
    pub fn set(&mut self, field: ContactField, value: String) {
        let slot = match field {
            ContactField::Name => &mut self.name,
            ContactField::Company => &mut self.company,
            ContactField::Email => &mut self.email,
            ContactField::Message => &mut self.message,
        };
        *slot = value;
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn set_replaces_single_field() {
        let mut fields = ContactFields {
            name: "Max".into(),
            ..Default::default()
        };

        fields.set(ContactField::Email, "max@example.de".into());
        fields.set(ContactField::Name, "Erika".into());

        assert_eq!(
            fields,
            ContactFields {
                name: "Erika".into(),
                company: String::new(),
                email: "max@example.de".into(),
                message: String::new(),
            }
        );
    }

    #[test]
    fn serializes_all_fields() {
        let fields = ContactFields {
            name: "Max".into(),
            company: String::new(),
            email: "max@example.de".into(),
            message: "Hi".into(),
        };

        let json = serde_json::to_value(&fields).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "name": "Max",
                "company": "",
                "email": "max@example.de",
                "message": "Hi",
            })
        );
    }
}
