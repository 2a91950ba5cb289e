//! Email adapter configuration builder

use crate::env::{vars, EnvironmentMap};
use tracing::{info, warn};
use types::utils::parse_flag;
use types::{EmailAdapterConfig, EmailOptions, EmailSettings};

pub struct EmailAdapterConfigBuilder;

impl EmailAdapterConfigBuilder {
    /// Without a module name there is no adapter and email verification is
    /// forced off, whatever `requested_verify` says.
    pub fn build(
        module: Option<&str>,
        from_address: Option<&str>,
        domain: Option<&str>,
        api_key: Option<&str>,
        requested_verify: Option<&str>,
    ) -> EmailSettings {
        let Some(module) = module.filter(|m| !m.is_empty()) else {
            if parse_flag(requested_verify) {
                warn!("VERIFY_USER_EMAILS ignored: no EMAIL_MODULE configured");
            }
            return EmailSettings::default();
        };

        let verify_user_emails = parse_flag(requested_verify);
        info!(module, verify_user_emails, "Email adapter configured");

        EmailSettings {
            adapter: Some(EmailAdapterConfig {
                module: module.to_string(),
                options: EmailOptions {
                    from_address: from_address.map(str::to_string),
                    domain: domain.map(str::to_string),
                    api_key: api_key.map(str::to_string),
                },
            }),
            verify_user_emails,
        }
    }

    pub fn build_from_env(env: &EnvironmentMap) -> EmailSettings {
        Self::build(
            env.get(vars::EMAIL_MODULE),
            env.get(vars::EMAIL_FROM),
            env.get(vars::EMAIL_DOMAIN),
            env.get(vars::EMAIL_API_KEY),
            env.get_raw(vars::VERIFY_USER_EMAILS),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_module_forces_verification_off() {
        let settings = EmailAdapterConfigBuilder::build(None, Some("a@b.c"), None, None, Some("true"));
        assert!(settings.adapter.is_none());
        assert!(!settings.verify_user_emails);

        let settings = EmailAdapterConfigBuilder::build(Some(""), None, None, None, Some("1"));
        assert!(settings.adapter.is_none());
        assert!(!settings.verify_user_emails);
    }

    #[test]
    fn test_mailgun_with_verification() {
        let settings = EmailAdapterConfigBuilder::build(
            Some("mailgun"),
            Some("noreply@example.com"),
            Some("mg.example.com"),
            Some("key-123"),
            Some("1"),
        );
        assert!(settings.verify_user_emails);
        let adapter = settings.adapter.unwrap();
        assert_eq!(adapter.module, "mailgun");
        assert_eq!(adapter.options.from_address.as_deref(), Some("noreply@example.com"));
        assert_eq!(adapter.options.domain.as_deref(), Some("mg.example.com"));
        assert_eq!(adapter.options.api_key.as_deref(), Some("key-123"));
    }

    #[test]
    fn test_verify_is_literal_and_case_sensitive() {
        for (value, expected) in [
            (Some("true"), true),
            (Some("1"), true),
            (Some("TRUE"), false),
            (Some("yes"), false),
            (None, false),
        ] {
            let settings = EmailAdapterConfigBuilder::build(Some("mailgun"), None, None, None, value);
            assert_eq!(settings.verify_user_emails, expected, "VERIFY_USER_EMAILS={value:?}");
            assert!(settings.adapter.is_some());
        }
    }

    #[test]
    fn test_build_from_env() {
        let env = EnvironmentMap::new()
            .with(vars::EMAIL_MODULE, "parse-server-simple-mailgun-adapter")
            .with(vars::EMAIL_FROM, "noreply@example.com")
            .with(vars::VERIFY_USER_EMAILS, "true");
        let settings = EmailAdapterConfigBuilder::build_from_env(&env);
        assert!(settings.verify_user_emails);
        let adapter = settings.adapter.unwrap();
        assert_eq!(adapter.options.domain, None);
    }
}
