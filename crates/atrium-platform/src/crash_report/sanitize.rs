use regex::Regex;

const REDACTED: &str = "[REDACTED]";

/// Patterns replaced wholesale. More specific first.
const SECRET_PATTERNS: &[&str] = &[
    // Google access tokens
    r"ya29\.[A-Za-z0-9._\-]+",
    // Google authorization codes
    r"4/0[A-Za-z0-9._\-]{10,}",
    // Google OAuth client secrets
    r"GOCSPX-[A-Za-z0-9_\-]+",
    // Bearer tokens
    r"Bearer [A-Za-z0-9._\-]+",
];

/// Query/form parameters whose value is a secret. The name is kept.
const SECRET_PARAMS: &str =
    r"(?i)((?:code|code_verifier|access_token|refresh_token|id_token|client_secret|password)=)[^&\s]+";

/// Redacts OAuth material and other secrets from `input`.
pub fn sanitize_secrets(input: &str) -> String {
    let mut result = input.to_owned();

    for pattern in SECRET_PATTERNS {
        // Static patterns; a pattern that fails to compile is skipped since
        // this runs inside the panic hook.
        if let Ok(re) = Regex::new(pattern) {
            result = re.replace_all(&result, REDACTED).into_owned();
        }
    }

    if let Ok(re) = Regex::new(SECRET_PARAMS) {
        result = re
            .replace_all(&result, format!("${{1}}{REDACTED}"))
            .into_owned();
    }

    result
}
