use account_automation_core::error::AutomationError;
use aws_sdk_sts::error::{DisplayErrorContext, ProvideErrorMetadata};

const VALIDATION_CODES: [&str; 7] = [
    "IllegalArgumentException",
    "InvalidResourceStateException",
    "ResourceAlreadyExistsException",
    "QuotaExceededException",
    "InvalidPaginationTokenException",
    "CaseCreationLimitExceeded",
    "AttachmentSetIdNotFound",
];

/// Maps an SDK error onto the automation error taxonomy by its error code.
pub fn classify_sdk_error<E>(operation: &str, error: &E) -> AutomationError
where
    E: ProvideErrorMetadata + std::error::Error,
{
    let message = format!("{operation} failed: {}", DisplayErrorContext(error));
    classify_error_code(error.code(), message)
}

/// Maps an `sts:AssumeRole` failure. The role could not be assumed unless the
/// call was throttled or never got a modeled response.
pub fn classify_assume_role_sdk_error<E>(error: &E) -> AutomationError
where
    E: ProvideErrorMetadata + std::error::Error,
{
    let message = format!("sts:AssumeRole failed: {}", DisplayErrorContext(error));
    classify_assume_role_error(error.code(), message)
}

pub fn classify_assume_role_error(code: Option<&str>, message: String) -> AutomationError {
    match code {
        None => AutomationError::Transient(message),
        Some(code) if code.starts_with("Throttling") || code.ends_with("ServiceException") => {
            AutomationError::Transient(message)
        }
        Some(_) => AutomationError::Authorization(message),
    }
}

pub fn classify_error_code(code: Option<&str>, message: String) -> AutomationError {
    let Some(code) = code else {
        // No service code means the request never got a modeled response
        // (dispatch failure, timeout, or an unparseable body).
        return AutomationError::Transient(message);
    };

    if code.starts_with("AccessDenied")
        || code.contains("NotAuthorized")
        || code.starts_with("ExpiredToken")
    {
        AutomationError::Authorization(message)
    } else if code == "NoSuchResourceException" {
        AutomationError::NotFound(message)
    } else if VALIDATION_CODES.iter().any(|candidate| *candidate == code) {
        AutomationError::Validation(message)
    } else {
        AutomationError::Transient(message)
    }
}

#[cfg(test)]
mod tests {
    use account_automation_core::error::ErrorKind;

    use super::*;

    fn kind_of(code: Option<&str>) -> ErrorKind {
        classify_error_code(code, "boom".to_string()).kind()
    }

    #[test]
    fn authorization_codes() {
        assert_eq!(kind_of(Some("AccessDenied")), ErrorKind::Authorization);
        assert_eq!(kind_of(Some("AccessDeniedException")), ErrorKind::Authorization);
        assert_eq!(kind_of(Some("ExpiredTokenException")), ErrorKind::Authorization);
        assert_eq!(
            kind_of(Some("RegionDisabledNotAuthorized")),
            ErrorKind::Authorization
        );
    }

    #[test]
    fn not_found_and_validation_codes() {
        assert_eq!(kind_of(Some("NoSuchResourceException")), ErrorKind::NotFound);
        assert_eq!(
            kind_of(Some("ResourceAlreadyExistsException")),
            ErrorKind::Validation
        );
        assert_eq!(kind_of(Some("CaseCreationLimitExceeded")), ErrorKind::Validation);
    }

    #[test]
    fn everything_else_is_transient() {
        assert_eq!(kind_of(Some("TooManyRequestsException")), ErrorKind::Transient);
        assert_eq!(kind_of(Some("ServiceException")), ErrorKind::Transient);
        assert_eq!(kind_of(None), ErrorKind::Transient);
    }

    fn assume_role_kind_of(code: Option<&str>) -> ErrorKind {
        classify_assume_role_error(code, "boom".to_string()).kind()
    }

    #[test]
    fn assume_role_rejections_are_authorization() {
        for code in [
            "AccessDenied",
            "RegionDisabledException",
            "MalformedPolicyDocument",
            "PackedPolicyTooLarge",
            "ExpiredTokenException",
        ] {
            assert_eq!(
                assume_role_kind_of(Some(code)),
                ErrorKind::Authorization,
                "{code} should be an authorization failure"
            );
        }
    }

    #[test]
    fn assume_role_throttling_and_dispatch_failures_are_transient() {
        assert_eq!(assume_role_kind_of(Some("Throttling")), ErrorKind::Transient);
        assert_eq!(
            assume_role_kind_of(Some("ThrottlingException")),
            ErrorKind::Transient
        );
        assert_eq!(
            assume_role_kind_of(Some("InternalServiceException")),
            ErrorKind::Transient
        );
        assert_eq!(assume_role_kind_of(None), ErrorKind::Transient);
    }

    #[test]
    fn message_is_preserved() {
        let error = classify_error_code(Some("NoSuchResourceException"), "gone".to_string());
        assert_eq!(error, AutomationError::NotFound("gone".to_string()));
    }
}
