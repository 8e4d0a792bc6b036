use crate::error::{OfferError, OfferResult};
use validator::{Validate, ValidationErrors};

pub fn validate_model<T: Validate>(model: &T) -> OfferResult<()> {
    match model.validate() {
        Ok(()) => Ok(()),
        Err(errors) => Err(OfferError::data_validation(format_validation_errors(
            &errors,
        ))),
    }
}

pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut messages = Vec::new();

    for (field, field_errors) in errors.field_errors() {
        for error in field_errors {
            let message = match &error.message {
                Some(message) => message.to_string(),
                None => format!("Validation failed for field '{}': {}", field, error.code),
            };
            messages.push(message);
        }
    }

    // Nested errors (list entries) are not flattened into field_errors;
    // fall back to the full rendering so the message is never empty.
    if messages.is_empty() {
        return errors.to_string();
    }

    messages.join(", ")
}

pub fn validate_file_size(file_size: u64, max_size: u64) -> OfferResult<()> {
    if file_size > max_size {
        return Err(OfferError::file_parsing(format!(
            "File size {} bytes exceeds maximum allowed size {} bytes",
            file_size, max_size
        )));
    }

    Ok(())
}
