//! Registration, login and code-based password recovery

mod common;

use common::*;
use shared::error::ErrorCode;
use shared::models::{
    LoginRequest, RegisterRequest, ResetPasswordRequest, SendCodeRequest, VerifyCodeRequest,
};

fn register_req(email: &str, password: &str) -> RegisterRequest {
    RegisterRequest {
        name: "Asha".into(),
        email: email.into(),
        phone: Some("9800000000".into()),
        password: password.into(),
    }
}

fn login_req(email: &str, password: &str) -> LoginRequest {
    LoginRequest {
        email: email.into(),
        password: password.into(),
    }
}

#[tokio::test]
async fn test_register_and_login() {
    let app = setup().await;
    let accounts = &app.state.accounts;

    let profile = accounts
        .register(register_req("Asha@Example.com", "s3cret-pass"))
        .await
        .unwrap();
    assert_eq!(profile.email, "asha@example.com");
    assert_eq!(profile.phone.as_deref(), Some("9800000000"));

    let logged_in = accounts
        .login(login_req("asha@example.com", "s3cret-pass"))
        .await
        .unwrap();
    assert_eq!(logged_in.id, profile.id);

    let err = accounts
        .login(login_req("asha@example.com", "wrong-pass"))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidCredentials);

    // Unknown emails get the same answer
    let err = accounts
        .login(login_req("nobody@example.com", "s3cret-pass"))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidCredentials);
}

#[tokio::test]
async fn test_register_rejections() {
    let app = setup().await;
    let accounts = &app.state.accounts;

    let err = accounts
        .register(register_req("asha@example.com", "short"))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::PasswordTooShort);

    let err = accounts
        .register(register_req("not-an-email", "long-enough"))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationFailed);

    accounts
        .register(register_req("asha@example.com", "long-enough"))
        .await
        .unwrap();
    let err = accounts
        .register(register_req("ASHA@example.com", "long-enough"))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::EmailAlreadyRegistered);
}

#[tokio::test]
async fn test_password_recovery_flow() {
    let app = setup().await;
    let accounts = &app.state.accounts;
    accounts
        .register(register_req("asha@example.com", "old-password"))
        .await
        .unwrap();

    accounts
        .send_code(SendCodeRequest {
            email: "asha@example.com".into(),
        })
        .await
        .unwrap();
    let code = app.mailer.last_code("asha@example.com").unwrap();

    accounts
        .verify_code(VerifyCodeRequest {
            email: "asha@example.com".into(),
            code: code.clone(),
        })
        .await
        .unwrap();

    // Verification does not consume the code
    accounts
        .reset_password(ResetPasswordRequest {
            email: "asha@example.com".into(),
            code: code.clone(),
            new_password: "new-password".into(),
        })
        .await
        .unwrap();

    accounts
        .login(login_req("asha@example.com", "new-password"))
        .await
        .unwrap();
    let err = accounts
        .login(login_req("asha@example.com", "old-password"))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidCredentials);

    // The reset consumed the code
    let err = accounts
        .reset_password(ResetPasswordRequest {
            email: "asha@example.com".into(),
            code,
            new_password: "another-password".into(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::VerificationCodeMissing);
}

#[tokio::test]
async fn test_send_code_to_unknown_email_is_silent() {
    let app = setup().await;
    app.state
        .accounts
        .send_code(SendCodeRequest {
            email: "ghost@example.com".into(),
        })
        .await
        .unwrap();
    assert_eq!(app.mailer.sent_count(), 0);
    assert!(app.state.accounts.codes().is_empty());
}

#[tokio::test]
async fn test_wrong_codes_exhaust_attempts() {
    let app = setup().await;
    let accounts = &app.state.accounts;
    accounts
        .register(register_req("asha@example.com", "old-password"))
        .await
        .unwrap();
    accounts
        .send_code(SendCodeRequest {
            email: "asha@example.com".into(),
        })
        .await
        .unwrap();
    let code = app.mailer.last_code("asha@example.com").unwrap();
    let wrong = if code == "000000" { "111111" } else { "000000" };

    let verify = |code: &str| VerifyCodeRequest {
        email: "asha@example.com".into(),
        code: code.into(),
    };

    for _ in 0..5 {
        let err = accounts.verify_code(verify(wrong)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::VerificationCodeInvalid);
    }
    let err = accounts.verify_code(verify(wrong)).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::TooManyAttempts);

    let err = accounts.verify_code(verify(&code)).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::VerificationCodeMissing);
}

#[tokio::test]
async fn test_reset_requires_verified_code() {
    let app = setup().await;
    let accounts = &app.state.accounts;
    accounts
        .register(register_req("nima@example.com", "old-password"))
        .await
        .unwrap();
    accounts
        .send_code(SendCodeRequest {
            email: "nima@example.com".into(),
        })
        .await
        .unwrap();
    let code = app.mailer.last_code("nima@example.com").unwrap();

    let reset = || ResetPasswordRequest {
        email: "nima@example.com".into(),
        code: code.clone(),
        new_password: "new-password".into(),
    };

    let err = accounts.reset_password(reset()).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::VerificationRequired);
    // The password is unchanged and the code is still live
    accounts
        .login(login_req("nima@example.com", "old-password"))
        .await
        .unwrap();

    accounts
        .verify_code(VerifyCodeRequest {
            email: "nima@example.com".into(),
            code: code.clone(),
        })
        .await
        .unwrap();
    accounts.reset_password(reset()).await.unwrap();
    accounts
        .login(login_req("nima@example.com", "new-password"))
        .await
        .unwrap();
}
