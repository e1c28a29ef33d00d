use reqwest::multipart::{Form, Part};

use common::types::StudentFields;

/// Build the student multipart form the API expects. Field names are part
/// of the wire contract and are PascalCase, unlike the JSON payloads.
pub fn student_form(fields: &StudentFields, photo: Option<(String, Vec<u8>)>) -> Form {
    let group_id = fields
        .group_id
        .map(|id| id.to_string())
        .unwrap_or_default();
    let mut form = Form::new()
        .text("FirstName", fields.first_name.clone())
        .text("LastName", fields.last_name.clone())
        .text("Email", fields.email.clone())
        .text("Phone", fields.phone.clone())
        .text("Address", fields.address.clone())
        .text("BirthDate", fields.birth_date.format("%Y-%m-%d").to_string())
        .text("GroupId", group_id);
    if let Some((file_name, bytes)) = photo {
        form = form.part("Photo", Part::bytes(bytes).file_name(file_name));
    }
    form
}
