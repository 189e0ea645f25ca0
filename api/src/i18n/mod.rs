//! Bilingual user-facing messages
//!
//! Every verification and resend outcome has its own wording in English and
//! Chinese so the client can show an actionable message without mapping
//! codes itself.

use edu_core::domain::value_objects::{ResendOutcome, VerifyEmailOutcome};
use edu_shared::Language;

/// Pick the message for the requested language
pub fn localized(lang: Language, en: &str, zh: &str) -> String {
    match lang {
        Language::English => en.to_string(),
        Language::Chinese => zh.to_string(),
    }
}

pub fn verify_outcome_message(outcome: &VerifyEmailOutcome, lang: Language) -> String {
    match outcome {
        VerifyEmailOutcome::Success { .. } => localized(
            lang,
            "Your email address has been verified",
            "您的邮箱已验证成功",
        ),
        VerifyEmailOutcome::Invalid => localized(
            lang,
            "This verification link is invalid. Please request a new one",
            "验证链接无效，请重新获取验证邮件",
        ),
        VerifyEmailOutcome::Expired { .. } => localized(
            lang,
            "This verification link has expired. Please request a new one",
            "验证链接已过期，请重新获取验证邮件",
        ),
        VerifyEmailOutcome::AlreadyUsed { .. } => localized(
            lang,
            "This verification link has already been used. Please request a new one",
            "该验证链接已被使用，请重新获取验证邮件",
        ),
        VerifyEmailOutcome::AlreadyVerified { .. } => localized(
            lang,
            "Your email address is already verified",
            "您的邮箱已经验证过了",
        ),
        VerifyEmailOutcome::ExceededAttempts { .. } => localized(
            lang,
            "Too many verification attempts. Please contact support to unlock your account",
            "验证次数过多，请联系客服解锁账户",
        ),
        VerifyEmailOutcome::Error { .. } => localized(
            lang,
            "This link was just used by another request. Please check your verification status",
            "该链接刚刚被另一个请求使用，请查看您的验证状态",
        ),
    }
}

pub fn resend_outcome_message(outcome: &ResendOutcome, lang: Language) -> String {
    match outcome {
        ResendOutcome::Sent { .. } => localized(
            lang,
            "A new verification email has been sent",
            "新的验证邮件已发送",
        ),
        ResendOutcome::RateLimited {
            retry_after_seconds,
        } => {
            let minutes = (retry_after_seconds + 59) / 60;
            localized(
                lang,
                &format!(
                    "A verification email was sent recently. Please try again in {} minute(s)",
                    minutes
                ),
                &format!("验证邮件刚刚发送过，请在{}分钟后重试", minutes),
            )
        }
        ResendOutcome::NotFound => localized(
            lang,
            "No account is registered with this email address",
            "该邮箱尚未注册账户",
        ),
        ResendOutcome::AlreadyVerified => localized(
            lang,
            "This email address is already verified",
            "该邮箱已经验证过了",
        ),
        ResendOutcome::ExceededAttempts => localized(
            lang,
            "Too many verification attempts. Please contact support to unlock your account",
            "验证次数过多，请联系客服解锁账户",
        ),
    }
}

pub fn service_unavailable(lang: Language) -> String {
    localized(
        lang,
        "The service is temporarily unavailable. Please try again later",
        "服务暂时不可用，请稍后重试",
    )
}

pub fn invalid_request(lang: Language) -> String {
    localized(lang, "Invalid request data", "请求数据无效")
}

pub fn missing_token(lang: Language) -> String {
    localized(
        lang,
        "The verification link is missing its token",
        "验证链接缺少令牌",
    )
}

pub fn user_not_found(lang: Language) -> String {
    localized(lang, "User not found", "用户不存在")
}

pub fn unauthorized(lang: Language) -> String {
    localized(lang, "A valid admin key is required", "需要有效的管理员密钥")
}

pub fn attempts_reset(lang: Language) -> String {
    localized(
        lang,
        "Verification attempts have been reset",
        "验证次数已重置",
    )
}

pub fn not_found(lang: Language) -> String {
    localized(
        lang,
        "The requested resource was not found",
        "请求的资源不存在",
    )
}
