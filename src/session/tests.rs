// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

#[cfg(test)]
mod session_tests {
    use crate::common::ScrapConfig;
    use crate::session::{
        AuthGate, FileSessionStorage, GateOutcome, MemorySessionStorage, PresenceValidator,
        Redirect, SessionStorage, SessionToken, SessionValidator,
    };
    use std::sync::Arc;

    fn login_redirect() -> GateOutcome<&'static str> {
        GateOutcome::Redirect(Redirect {
            to: "/login".to_string(),
            replace: true,
        })
    }

    #[test]
    fn gate_tests() {
        let storage = Arc::new(MemorySessionStorage::default());
        let gate = AuthGate::new(storage.clone());

        assert_eq!(gate.guard("board"), login_redirect());
        assert!(gate.guard("board").into_children().is_none());

        storage.set_item("invite_code", "").expect("set empty");
        assert_eq!(gate.guard("board"), login_redirect());

        gate.sign_in(&SessionToken("LH2024".to_string()))
            .expect("sign in");
        assert_eq!(storage.get_item("invite_code").unwrap().as_deref(), Some("LH2024"));
        assert_eq!(gate.guard("board"), GateOutcome::Render("board"));
        assert_eq!(gate.session_token().as_deref(), Some("LH2024"));

        gate.sign_out().expect("sign out");
        assert_eq!(gate.guard("board"), login_redirect());
        assert!(!gate.logger().contains_warnings());
    }

    #[test]
    fn gate_config_tests() {
        let scrap_config = ScrapConfig::builder()
            .toml_str(
                r#"
                [session]
                key = "token"
                login_path = "/signin"
                "#,
            )
            .build()
            .expect("session config");
        let storage = Arc::new(MemorySessionStorage::default());
        storage.set_item("invite_code", "ignored").expect("set");
        let gate = AuthGate::from_config(&scrap_config, storage.clone()).expect("gate");
        assert_eq!(gate.login_path(), "/signin");
        assert_eq!(
            gate.guard(()),
            GateOutcome::Redirect(Redirect {
                to: "/signin".to_string(),
                replace: true,
            })
        );
        storage.set_item("token", "x").expect("set");
        assert_eq!(gate.guard(()), GateOutcome::Render(()));

        let defaults = ScrapConfig::builder().toml_str("").build().expect("empty");
        let gate = AuthGate::from_config(&defaults, storage).expect("default gate");
        assert_eq!(gate.login_path(), "/login");
    }

    #[test]
    fn presence_validator_tests() {
        assert!(PresenceValidator
            .validate(&SessionToken("anything".to_string()))
            .is_ok());
        assert!(PresenceValidator.validate(&SessionToken::default()).is_err());
    }

    #[test]
    fn file_storage_tests() {
        let path = std::env::temp_dir().join(format!(
            "scrapboard-session-{}.json",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);

        let storage = FileSessionStorage::new(&path);
        assert_eq!(storage.get_item("invite_code").expect("get"), None);
        storage.remove_item("invite_code").expect("remove missing");
        storage.set_item("invite_code", "abc").expect("set");

        let reopened = FileSessionStorage::new(&path);
        assert_eq!(
            reopened.get_item("invite_code").expect("get").as_deref(),
            Some("abc")
        );
        reopened.remove_item("invite_code").expect("remove");
        assert_eq!(storage.get_item("invite_code").expect("get"), None);

        std::fs::write(&path, "not json").expect("corrupt");
        assert!(storage.get_item("invite_code").is_err());
        let gate = AuthGate::new(Arc::new(FileSessionStorage::new(&path)));
        assert!(matches!(gate.guard(()), GateOutcome::Redirect(_)));
        assert!(gate.logger().contains_warnings());

        let _ = std::fs::remove_file(&path);
    }

    #[cfg(feature = "jwt")]
    #[test]
    fn jwt_validator_tests() {
        use crate::session::JwtValidator;
        use jsonwebtoken::{encode, EncodingKey, Header};
        use serde_json::json;
        use std::time::{SystemTime, UNIX_EPOCH};

        let scrap_config = ScrapConfig::builder()
            .toml_str(
                r#"
                [jwt]
                secret = "test-secret"
                "#,
            )
            .build()
            .expect("jwt config");
        let validator = JwtValidator::new(&scrap_config).expect("validator");

        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_secs();
        let sign = |secret: &str, exp: u64| {
            encode(
                &Header::default(),
                &json!({ "sub": "u1", "exp": exp }),
                &EncodingKey::from_secret(secret.as_bytes()),
            )
            .expect("encode")
        };

        let valid = SessionToken(sign("test-secret", now + 3600));
        assert!(validator.validate(&valid).is_ok());
        assert!(validator
            .validate(&SessionToken(sign("other-secret", now + 3600)))
            .is_err());
        assert!(validator
            .validate(&SessionToken(sign("test-secret", now - 3600)))
            .is_err());
        assert!(validator
            .validate(&SessionToken("LH2024".to_string()))
            .is_err());

        let storage = Arc::new(MemorySessionStorage::default());
        let gate = AuthGate::new(storage.clone()).with_validator(validator);
        gate.sign_in(&SessionToken("LH2024".to_string()))
            .expect("sign in");
        assert!(matches!(gate.guard(()), GateOutcome::Redirect(_)));
        gate.sign_in(&valid).expect("sign in");
        assert_eq!(gate.guard(()), GateOutcome::Render(()));

        let missing = ScrapConfig::builder()
            .toml_str("[jwt]")
            .build()
            .expect("jwt config");
        assert!(JwtValidator::new(&missing).is_err());
    }
}
