//! Verification email content

use super::email_service::EmailMessage;

const SUBJECT: &str = "Verify your email address / 验证您的邮箱";

/// Render the verification email for `to` carrying `verification_url`
pub fn verification_email(to: &str, verification_url: &str, ttl_hours: i64) -> EmailMessage {
    let text_body = format!(
        "Welcome to LearnHub!\n\n\
         Confirm your email address by opening this link:\n{url}\n\n\
         The link expires in {ttl} hours. If you did not sign up, ignore this email.\n\n\
         欢迎加入 LearnHub！请打开以下链接验证您的邮箱：\n{url}\n\
         链接将在 {ttl} 小时后失效。如果这不是您本人的操作，请忽略此邮件。\n",
        url = verification_url,
        ttl = ttl_hours,
    );

    let html_body = format!(
        "<p>Welcome to LearnHub!</p>\
         <p>Confirm your email address:</p>\
         <p><a href=\"{url}\">Verify email</a></p>\
         <p>The link expires in {ttl} hours. If you did not sign up, ignore this email.</p>\
         <hr/>\
         <p>欢迎加入 LearnHub！请点击以下链接验证您的邮箱：</p>\
         <p><a href=\"{url}\">验证邮箱</a></p>\
         <p>链接将在 {ttl} 小时后失效。</p>",
        url = verification_url,
        ttl = ttl_hours,
    );

    EmailMessage {
        to: to.to_string(),
        subject: SUBJECT.to_string(),
        html_body,
        text_body,
    }
}
